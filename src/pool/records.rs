//! Pool record types for units, entities and parts.
//!
//! These types serialise to the JSON layout the pool expects. Maps are
//! [`IndexMap`]s so records are written in a stable, readable order.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signal direction of a unit pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Input only.
    Input,
    /// Input and output.
    Bidirectional,
    /// Supply pin.
    PowerInput,
}

impl Direction {
    /// Maps a pin table electrical type to a direction.
    ///
    /// Only `Reset`, `Boot`, `I/O` and `Power` are recognised. Anything else
    /// returns `None`; callers must treat that as fatal.
    #[must_use]
    pub fn from_pin_type(pin_type: &str) -> Option<Self> {
        match pin_type {
            "Reset" | "Boot" => Some(Self::Input),
            "I/O" => Some(Self::Bidirectional),
            "Power" => Some(Self::PowerInput),
            _ => None,
        }
    }

    /// Returns the name used in pool records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Bidirectional => "bidirectional",
            Self::PowerInput => "power_input",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pin of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPin {
    /// Signal direction.
    pub direction: Direction,
    /// Alternate names (attached signals).
    pub names: Vec<String>,
    /// Name shown on the symbol.
    pub primary_name: String,
    /// Swap group, 0 for none.
    pub swap_group: u32,
}

/// A unit: a reusable set of named pins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "unit")]
pub struct Unit {
    /// Record identifier.
    pub uuid: Uuid,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Unit name.
    pub name: String,
    /// Pins keyed by pin identifier.
    pub pins: IndexMap<Uuid, UnitPin>,
}

/// A gate of an entity, instantiating one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Gate name.
    pub name: String,
    /// Reference designator suffix.
    pub suffix: String,
    /// Swap group, 0 for none.
    pub swap_group: u32,
    /// Referenced unit.
    pub unit: Uuid,
}

/// An entity: the symbolic wrapper around one or more units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "entity")]
pub struct Entity {
    /// Record identifier.
    pub uuid: Uuid,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Entity name.
    pub name: String,
    /// Reference designator prefix (e.g., "U").
    pub prefix: String,
    /// Search tags.
    pub tags: Vec<String>,
    /// Gates keyed by gate identifier.
    pub gates: IndexMap<Uuid, Gate>,
}

/// Connection of one package pad to a gate pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadMapEntry {
    /// Gate of the part's entity.
    pub gate: Uuid,
    /// Pin of the gate's unit.
    pub pin: Uuid,
}

/// A part attribute in `[inherit, value]` form.
///
/// Parts created here have no base part, so `inherit` is always `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute(pub bool, pub String);

impl Attribute {
    /// Creates a non-inherited attribute.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(false, value.into())
    }

    /// Returns the attribute value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.1
    }
}

/// A part: an orderable component joining an entity to a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "part")]
pub struct Part {
    /// Record identifier.
    pub uuid: Uuid,
    /// Manufacturer part number.
    #[serde(rename = "MPN")]
    pub mpn: Attribute,
    /// Datasheet URL.
    pub datasheet: Attribute,
    /// Free-form description.
    pub description: Attribute,
    /// Referenced entity.
    pub entity: Uuid,
    /// Use the package's default 3D model.
    pub inherit_model: bool,
    /// Inherit tags from a base part.
    pub inherit_tags: bool,
    /// Manufacturer name.
    pub manufacturer: Attribute,
    /// Alternative orderable part numbers.
    #[serde(rename = "orderable_MPNs")]
    pub orderable_mpns: IndexMap<Uuid, String>,
    /// Referenced package.
    pub package: Uuid,
    /// Pad map keyed by package pad identifier.
    pub pad_map: IndexMap<Uuid, PadMapEntry>,
    /// Parametric search data.
    pub parametric: IndexMap<String, String>,
    /// Search tags.
    pub tags: Vec<String>,
    /// Value shown on the schematic.
    pub value: Attribute,
}
