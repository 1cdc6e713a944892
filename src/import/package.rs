//! Package record loading.
//!
//! A package record lists its pads keyed by pad identifier:
//!
//! ```json
//! {
//!     "type": "package",
//!     "uuid": "…",
//!     "name": "LQFP-48",
//!     "pads": {
//!         "<pad uuid>": { "name": "1", "padstack": "…", "placement": { … } }
//!     }
//! }
//! ```
//!
//! Only the package identifier and each pad's `name` are used. The pad
//! index built here maps pad name to pad identifier.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Deserialize;
use uuid::Uuid;

use super::{ImportError, ImportResult};

/// Pad display name → pad identifier, in package record order.
pub type PadIndex = IndexMap<String, Uuid>;

/// The parts of a package record needed to build a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIndex {
    /// Package identifier.
    pub uuid: Uuid,
    /// Package name, if the record has one.
    pub name: Option<String>,
    /// Pads by display name.
    pub pads: PadIndex,
}

#[derive(Deserialize)]
struct PackageRecord {
    #[serde(default)]
    uuid: Option<Uuid>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    pads: Option<IndexMap<Uuid, PadRecord>>,
}

#[derive(Deserialize)]
struct PadRecord {
    #[serde(default)]
    name: Option<String>,
}

/// Parses a package record into a [`PackageIndex`].
///
/// # Errors
///
/// Returns [`ImportError::Schema`] if the record is not valid JSON, lacks a
/// `uuid` or `pads` field, or contains a pad without a `name`. Returns
/// [`ImportError::DuplicatePadName`] if two pads share a name.
pub fn load_package(json: &str) -> ImportResult<PackageIndex> {
    let record: PackageRecord =
        serde_json::from_str(json).map_err(|e| ImportError::schema(e.to_string()))?;

    let uuid = record
        .uuid
        .ok_or_else(|| ImportError::schema("missing 'uuid' field"))?;
    let pads = record
        .pads
        .ok_or_else(|| ImportError::schema("missing 'pads' field"))?;

    let mut index = PadIndex::with_capacity(pads.len());
    for (pad_uuid, pad) in pads {
        let name = pad
            .name
            .ok_or_else(|| ImportError::schema(format!("pad {pad_uuid} has no 'name'")))?;
        match index.entry(name) {
            Entry::Occupied(entry) => {
                return Err(ImportError::DuplicatePadName {
                    name: entry.key().clone(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(pad_uuid);
            }
        }
    }

    tracing::debug!(
        package = %uuid,
        name = record.name.as_deref().unwrap_or("<unnamed>"),
        pads = index.len(),
        "Loaded package pad index"
    );

    Ok(PackageIndex {
        uuid,
        name: record.name,
        pads: index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAD_A: &str = "6a1e7f4e-2c55-4f0e-9d7c-6f0b1c1e0a01";
    const PAD_B: &str = "6a1e7f4e-2c55-4f0e-9d7c-6f0b1c1e0a02";
    const PKG: &str = "0b3c4d5e-0000-4000-8000-000000000001";

    #[test]
    fn builds_name_index() {
        let json = format!(
            r#"{{
                "type": "package",
                "uuid": "{PKG}",
                "name": "LQFP-48",
                "pads": {{
                    "{PAD_A}": {{ "name": "PA1", "padstack": "x" }},
                    "{PAD_B}": {{ "name": "PA2" }}
                }}
            }}"#
        );
        let package = load_package(&json).unwrap();
        assert_eq!(package.uuid, PKG.parse::<Uuid>().unwrap());
        assert_eq!(package.name.as_deref(), Some("LQFP-48"));
        assert_eq!(package.pads.len(), 2);
        assert_eq!(package.pads["PA1"], PAD_A.parse::<Uuid>().unwrap());
        assert_eq!(package.pads["PA2"], PAD_B.parse::<Uuid>().unwrap());
    }

    #[test]
    fn missing_pads_is_schema_error() {
        let json = format!(r#"{{ "uuid": "{PKG}" }}"#);
        let err = load_package(&json).unwrap_err();
        assert!(matches!(err, ImportError::Schema { .. }));
        assert!(err.to_string().contains("pads"));
    }

    #[test]
    fn missing_uuid_is_schema_error() {
        let err = load_package(r#"{ "pads": {} }"#).unwrap_err();
        assert!(matches!(err, ImportError::Schema { .. }));
        assert!(err.to_string().contains("uuid"));
    }

    #[test]
    fn pad_without_name_is_schema_error() {
        let json = format!(r#"{{ "uuid": "{PKG}", "pads": {{ "{PAD_A}": {{ "padstack": "x" }} }} }}"#);
        let err = load_package(&json).unwrap_err();
        assert!(matches!(err, ImportError::Schema { .. }));
        assert!(err.to_string().contains(PAD_A));
    }

    #[test]
    fn invalid_json_is_schema_error() {
        let err = load_package("not json").unwrap_err();
        assert!(matches!(err, ImportError::Schema { .. }));
    }

    #[test]
    fn duplicate_pad_name_rejected() {
        let json = format!(
            r#"{{ "uuid": "{PKG}", "pads": {{
                "{PAD_A}": {{ "name": "1" }},
                "{PAD_B}": {{ "name": "1" }}
            }} }}"#
        );
        let err = load_package(&json).unwrap_err();
        assert!(matches!(err, ImportError::DuplicatePadName { ref name } if name == "1"));
    }
}
