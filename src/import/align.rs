//! Alignment of the pin table against the package pads.
//!
//! The pin table and the package are authored independently. Before any
//! record is built they must describe the same device: one pin per pad,
//! each pin position naming a distinct pad.

use std::collections::HashSet;

use super::package::PadIndex;
use super::pintable::RawPin;
use super::AlignmentError;

/// Checks that `pins` line up one-to-one with the pads in `pads`.
///
/// Checks run in order: pin and pad counts, repeated positions, then
/// positions with no matching pad. Each check inspects every pin so the
/// error lists all offending positions.
///
/// # Errors
///
/// Returns the first failing check as an [`AlignmentError`].
pub fn validate(pads: &PadIndex, pins: &[RawPin]) -> Result<(), AlignmentError> {
    if pins.len() != pads.len() {
        return Err(AlignmentError::CardinalityMismatch {
            pads: pads.len(),
            pins: pins.len(),
        });
    }

    let mut seen = HashSet::with_capacity(pins.len());
    let mut duplicates: Vec<String> = Vec::new();
    for pin in pins {
        if !seen.insert(pin.position.as_str()) && !duplicates.contains(&pin.position) {
            duplicates.push(pin.position.clone());
        }
    }
    if !duplicates.is_empty() {
        return Err(AlignmentError::DuplicatePosition {
            positions: duplicates,
        });
    }

    let unresolved: Vec<String> = pins
        .iter()
        .filter(|pin| !pads.contains_key(&pin.position))
        .map(|pin| pin.position.clone())
        .collect();
    if !unresolved.is_empty() {
        return Err(AlignmentError::UnresolvedPosition {
            positions: unresolved,
        });
    }

    tracing::debug!(pins = pins.len(), "Pin table aligned with package");
    Ok(())
}
