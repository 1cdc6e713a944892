//! Pin table import.
//!
//! Builds a unit, an entity and a part from a vendor pin table and an
//! existing package record:
//!
//! ```text
//! package record ──► package::load_package ──┐
//!                                            ├─► align::validate
//! pin table ───────► pintable::load_pin_table┘        │
//!                                                     ▼
//!                          unit::synthesize_unit ─► entity::synthesize_entity ─► part::synthesize_part
//! ```
//!
//! Everything here is pure and in-memory. Nothing is returned until all
//! three records have been built, so a failed import leaves nothing to
//! write.

pub mod align;
pub mod entity;
pub mod error;
pub mod package;
pub mod part;
pub mod pintable;
pub mod unit;

pub use error::{AlignmentError, AlignmentReason, ImportError, ImportResult};
pub use package::{load_package, PackageIndex, PadIndex};
pub use pintable::{load_pin_table, PinTable, RawPin};
pub use unit::{PositionIndex, SynthesizedUnit};

use std::path::Path;

use serde::Serialize;

use crate::pool::{Entity, Part, Unit};
use entity::EntityInfo;
use part::PartInfo;
use unit::UnitInfo;

/// Naming and metadata for the records of one import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Part number, also used as unit and entity name.
    pub part_name: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Reference designator prefix of the entity.
    pub prefix: String,
    /// Tags for the entity and the part.
    pub tags: Vec<String>,
    /// Datasheet URL.
    pub datasheet: String,
    /// Part description.
    pub description: String,
}

impl ImportOptions {
    fn unit_info(&self) -> UnitInfo {
        UnitInfo {
            name: self.part_name.clone(),
            manufacturer: self.manufacturer.clone(),
        }
    }

    fn entity_info(&self) -> EntityInfo {
        EntityInfo {
            name: self.part_name.clone(),
            manufacturer: self.manufacturer.clone(),
            prefix: self.prefix.clone(),
            tags: self.tags.clone(),
        }
    }

    fn part_info(&self) -> PartInfo {
        PartInfo {
            mpn: self.part_name.clone(),
            manufacturer: self.manufacturer.clone(),
            datasheet: self.datasheet.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// The three linked records produced by one import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedRecords {
    /// Pin definitions.
    pub unit: Unit,
    /// Symbolic wrapper around the unit.
    pub entity: Entity,
    /// Orderable part joining the entity to the package.
    pub part: Part,
}

/// Validates the inputs and builds unit, entity and part.
///
/// # Errors
///
/// Returns [`ImportError::Alignment`] if the pin table does not match the
/// package, [`ImportError::UnknownPinType`] for an unrecognised pin type, or
/// [`ImportError::InvariantViolation`] if the records come out inconsistent.
pub fn import(
    package: &PackageIndex,
    table: &PinTable,
    options: &ImportOptions,
) -> ImportResult<ImportedRecords> {
    align::validate(&package.pads, &table.pins)?;

    let SynthesizedUnit { unit, positions } =
        unit::synthesize_unit(&table.pins, &options.unit_info())?;
    let entity = entity::synthesize_entity(&unit, &options.entity_info());
    let part = part::synthesize_part(&entity, &positions, package, &options.part_info())?;

    tracing::info!(
        part = %options.part_name,
        pins = unit.pins.len(),
        "Built unit, entity and part"
    );

    Ok(ImportedRecords { unit, entity, part })
}

/// Parses both documents and runs [`import`].
///
/// # Errors
///
/// Returns any loader error, then any error from [`import`].
pub fn import_sources(
    package_json: &str,
    pin_table_xml: &str,
    options: &ImportOptions,
) -> ImportResult<ImportedRecords> {
    let package = load_package(package_json)?;
    let table = load_pin_table(pin_table_xml)?;
    import(&package, &table, options)
}

/// Reads and parses a package record file.
///
/// # Errors
///
/// Returns [`ImportError::FileRead`] if the file cannot be read, or any
/// error from [`load_package`].
pub fn read_package(path: impl AsRef<Path>) -> ImportResult<PackageIndex> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| ImportError::file_read(path, e))?;
    load_package(&contents)
}

/// Reads and parses a pin table file.
///
/// # Errors
///
/// Returns [`ImportError::FileRead`] if the file cannot be read, or any
/// error from [`load_pin_table`].
pub fn read_pin_table(path: impl AsRef<Path>) -> ImportResult<PinTable> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| ImportError::file_read(path, e))?;
    load_pin_table(&contents)
}
