//! Part synthesis.
//!
//! Joins the unit's position index with the package pad index: the pin
//! at position `P` connects to the pad named `P`. Alignment has already
//! been checked, so any mismatch here is an internal error.

use indexmap::IndexMap;
use uuid::Uuid;

use super::package::PackageIndex;
use super::unit::PositionIndex;
use super::{ImportError, ImportResult};
use crate::pool::{Attribute, Entity, PadMapEntry, Part};

/// Orderable details of the part to create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartInfo {
    /// Manufacturer part number.
    pub mpn: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Datasheet URL.
    pub datasheet: String,
    /// Free-form description.
    pub description: String,
    /// Search tags.
    pub tags: Vec<String>,
}

/// Builds the part record connecting `entity` to `package`.
///
/// # Errors
///
/// Returns [`ImportError::InvariantViolation`] if the entity has no gate, a
/// position has no pad, a pad is mapped twice, or a pad is left unmapped.
pub fn synthesize_part(
    entity: &Entity,
    positions: &PositionIndex,
    package: &PackageIndex,
    info: &PartInfo,
) -> ImportResult<Part> {
    let gate = entity
        .gates
        .keys()
        .next()
        .copied()
        .ok_or_else(|| ImportError::invariant(format!("entity {} has no gate", entity.uuid)))?;

    let pad_map = pad_map(gate, positions, package)?;

    let part = Part {
        uuid: Uuid::new_v4(),
        mpn: Attribute::new(&info.mpn),
        datasheet: Attribute::new(&info.datasheet),
        description: Attribute::new(&info.description),
        entity: entity.uuid,
        inherit_model: true,
        inherit_tags: false,
        manufacturer: Attribute::new(&info.manufacturer),
        orderable_mpns: IndexMap::new(),
        package: package.uuid,
        pad_map,
        parametric: IndexMap::new(),
        tags: info.tags.clone(),
        value: Attribute::new(&info.mpn),
    };

    tracing::debug!(
        part = %part.uuid,
        pads = part.pad_map.len(),
        "Synthesized part"
    );
    Ok(part)
}

fn pad_map(
    gate: Uuid,
    positions: &PositionIndex,
    package: &PackageIndex,
) -> ImportResult<IndexMap<Uuid, PadMapEntry>> {
    let mut map = IndexMap::with_capacity(positions.len());
    for (position, &pin) in positions {
        let pad = *package.pads.get(position).ok_or_else(|| {
            ImportError::invariant(format!("position {position} has no pad in the package"))
        })?;
        if map.insert(pad, PadMapEntry { gate, pin }).is_some() {
            return Err(ImportError::invariant(format!(
                "pad {pad} mapped more than once"
            )));
        }
    }

    if map.len() != package.pads.len() {
        return Err(ImportError::invariant(format!(
            "pad map covers {} of {} pads",
            map.len(),
            package.pads.len()
        )));
    }
    Ok(map)
}
