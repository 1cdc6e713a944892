//! Entity synthesis.

use indexmap::IndexMap;
use uuid::Uuid;

use crate::pool::{Entity, Gate, Unit};

/// Name of the single gate wrapping the unit.
pub const GATE_NAME: &str = "Main";

/// Identity of the entity to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    /// Entity name.
    pub name: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Reference designator prefix.
    pub prefix: String,
    /// Search tags.
    pub tags: Vec<String>,
}

/// Wraps `unit` in a new entity with a single gate named [`GATE_NAME`].
#[must_use]
pub fn synthesize_entity(unit: &Unit, info: &EntityInfo) -> Entity {
    let gate = Gate {
        name: GATE_NAME.to_string(),
        suffix: String::new(),
        swap_group: 0,
        unit: unit.uuid,
    };

    let mut gates = IndexMap::with_capacity(1);
    gates.insert(Uuid::new_v4(), gate);

    let entity = Entity {
        uuid: Uuid::new_v4(),
        manufacturer: info.manufacturer.clone(),
        name: info.name.clone(),
        prefix: info.prefix.clone(),
        tags: info.tags.clone(),
        gates,
    };

    tracing::debug!(entity = %entity.uuid, unit = %unit.uuid, "Synthesized entity");
    entity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_main_gate() {
        let unit = Unit {
            uuid: Uuid::new_v4(),
            manufacturer: "ST".to_string(),
            name: "STM32".to_string(),
            pins: IndexMap::new(),
        };
        let info = EntityInfo {
            name: "STM32".to_string(),
            manufacturer: "ST".to_string(),
            prefix: "U".to_string(),
            tags: vec!["mcu".to_string(), "arm".to_string()],
        };

        let entity = synthesize_entity(&unit, &info);

        assert_eq!(entity.gates.len(), 1);
        let (gate_uuid, gate) = entity.gates.first().unwrap();
        assert_ne!(*gate_uuid, entity.uuid);
        assert_ne!(*gate_uuid, unit.uuid);
        assert_eq!(gate.name, "Main");
        assert_eq!(gate.suffix, "");
        assert_eq!(gate.swap_group, 0);
        assert_eq!(gate.unit, unit.uuid);
        assert_eq!(entity.prefix, "U");
        assert_eq!(entity.tags, ["mcu", "arm"]);
    }
}
