//! Unit synthesis.
//!
//! Turns the raw pin table rows into a unit record. Pins are stored sorted
//! by primary name; the position index maps each pin table position to the
//! identifier minted for its pin, for joining against the package pads.

use indexmap::IndexMap;
use uuid::Uuid;

use super::pintable::RawPin;
use super::{ImportError, ImportResult};
use crate::pool::{Direction, Unit, UnitPin};

/// Separates the primary pin name from its suffix (e.g. `PC14-OSC32_IN`).
pub const NAME_SEPARATOR: char = '-';

/// Pin table position → unit pin identifier, in pin table order.
pub type PositionIndex = IndexMap<String, Uuid>;

/// Identity of the unit to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitInfo {
    /// Unit name.
    pub name: String,
    /// Manufacturer name.
    pub manufacturer: String,
}

/// A unit together with its position index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedUnit {
    /// The unit record.
    pub unit: Unit,
    /// Pin identifiers by pin table position.
    pub positions: PositionIndex,
}

/// Returns the part of `name` before the first [`NAME_SEPARATOR`].
#[must_use]
pub fn primary_name(name: &str) -> &str {
    name.split_once(NAME_SEPARATOR).map_or(name, |(head, _)| head)
}

/// A normalised pin before it is given an identifier.
struct Candidate<'a> {
    row: usize,
    position: &'a str,
    pin: UnitPin,
}

/// Builds a unit from pin table rows.
///
/// # Errors
///
/// Returns [`ImportError::UnknownPinType`] for the first pin whose type is
/// not one of `Reset`, `Boot`, `I/O` or `Power`.
pub fn synthesize_unit(pins: &[RawPin], info: &UnitInfo) -> ImportResult<SynthesizedUnit> {
    let mut candidates = Vec::with_capacity(pins.len());
    for (row, raw) in pins.iter().enumerate() {
        let direction = Direction::from_pin_type(&raw.pin_type)
            .ok_or_else(|| ImportError::unknown_pin_type(&raw.pin_type, &raw.position))?;
        tracing::trace!(
            position = %raw.position,
            name = %raw.name,
            direction = %direction,
            "Mapped pin"
        );
        candidates.push(Candidate {
            row,
            position: &raw.position,
            pin: UnitPin {
                direction,
                names: raw.signals.clone(),
                primary_name: primary_name(&raw.name).to_string(),
                swap_group: 0,
            },
        });
    }

    // Stable: equal primary names keep pin table order.
    candidates.sort_by(|a, b| a.pin.primary_name.cmp(&b.pin.primary_name));

    let identified: Vec<(Uuid, Candidate<'_>)> = candidates
        .into_iter()
        .map(|candidate| (Uuid::new_v4(), candidate))
        .collect();

    let positions = position_index(&identified);

    let unit = Unit {
        uuid: Uuid::new_v4(),
        manufacturer: info.manufacturer.clone(),
        name: info.name.clone(),
        pins: identified
            .into_iter()
            .map(|(uuid, candidate)| (uuid, candidate.pin))
            .collect(),
    };

    tracing::debug!(
        unit = %unit.uuid,
        pins = unit.pins.len(),
        "Synthesized unit"
    );

    Ok(SynthesizedUnit { unit, positions })
}

fn position_index(identified: &[(Uuid, Candidate<'_>)]) -> PositionIndex {
    let mut by_row: Vec<(usize, &str, Uuid)> = identified
        .iter()
        .map(|(uuid, candidate)| (candidate.row, candidate.position, *uuid))
        .collect();
    by_row.sort_unstable_by_key(|(row, _, _)| *row);
    by_row
        .into_iter()
        .map(|(_, position, uuid)| (position.to_string(), uuid))
        .collect()
}
