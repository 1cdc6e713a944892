//! Component pool records.
//!
//! A pool stores library items as one JSON file per record:
//!
//! - **Unit** — named pins with direction and alternate names
//! - **Entity** — gates, each instantiating a unit
//! - **Part** — an orderable component mapping package pads to gate pins
//!
//! Records reference each other by UUID: a gate names its unit, a part
//! names its entity and package, and each pad map entry names a gate and a
//! pin of that gate's unit.

pub mod records;
pub mod writer;

pub use records::{Attribute, Direction, Entity, Gate, PadMapEntry, Part, Unit, UnitPin};
pub use writer::{record_paths, write_records, WrittenRecords};
