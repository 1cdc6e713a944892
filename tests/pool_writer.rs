//! Pool writer tests: records on disk, no overwrites, no partial output.

use std::fs;

use mcu_pool_import::import::{import_sources, ImportError, ImportOptions, ImportedRecords};
use mcu_pool_import::pool::{record_paths, write_records};
use tempfile::tempdir;

const PACKAGE: &str = r#"{
    "type": "package",
    "uuid": "a0a0a0a0-0000-4000-8000-000000000001",
    "pads": {
        "d3a2c1b0-0000-4000-8000-00000000000a": { "name": "1" },
        "d3a2c1b0-0000-4000-8000-00000000000b": { "name": "2" },
        "d3a2c1b0-0000-4000-8000-00000000000c": { "name": "3" }
    }
}"#;

const PIN_TABLE: &str = r#"<Mcu RefName="STM32G030J6Mx">
    <Pin Name="PB7" Position="1" Type="I/O">
        <Signal Name="I2C1_SDA"/>
        <Signal Name="USART1_RX"/>
    </Pin>
    <Pin Name="VDD" Position="2" Type="Power"/>
    <Pin Name="PF2-NRST" Position="3" Type="Reset"/>
</Mcu>"#;

fn records() -> ImportedRecords {
    let options = ImportOptions {
        part_name: "STM32G030J6M6".to_string(),
        manufacturer: "STMicroelectronics".to_string(),
        prefix: "U".to_string(),
        tags: vec!["mcu".to_string()],
        datasheet: String::new(),
        description: String::new(),
    };
    import_sources(PACKAGE, PIN_TABLE, &options).expect("import failed")
}

#[test]
fn writes_three_records() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let records = records();

    let written = write_records(temp_dir.path(), &records).expect("Failed to write");

    assert_eq!(
        written.unit,
        temp_dir.path().join("units").join("STM32G030J6M6.json")
    );
    assert_eq!(
        written.entity,
        temp_dir.path().join("entities").join("STM32G030J6M6.json")
    );
    assert_eq!(
        written.part,
        temp_dir.path().join("parts").join("STM32G030J6M6.json")
    );

    let unit: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written.unit).unwrap()).unwrap();
    let entity: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written.entity).unwrap()).unwrap();
    let part: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written.part).unwrap()).unwrap();

    assert_eq!(unit["type"], "unit");
    assert_eq!(unit["uuid"], records.unit.uuid.to_string());
    assert_eq!(entity["type"], "entity");
    assert_eq!(part["type"], "part");
    assert_eq!(part["entity"], entity["uuid"]);

    // Every gate references the written unit
    for gate in entity["gates"].as_object().unwrap().values() {
        assert_eq!(gate["unit"], unit["uuid"]);
    }

    // Every pad map entry references a written gate and unit pin
    let gates = entity["gates"].as_object().unwrap();
    let pins = unit["pins"].as_object().unwrap();
    let pad_map = part["pad_map"].as_object().unwrap();
    assert_eq!(pad_map.len(), 3);
    for entry in pad_map.values() {
        assert!(gates.contains_key(entry["gate"].as_str().unwrap()));
        assert!(pins.contains_key(entry["pin"].as_str().unwrap()));
    }
}

#[test]
fn written_unit_is_sorted_by_primary_name() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let written = write_records(temp_dir.path(), &records()).expect("Failed to write");

    let unit: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written.unit).unwrap()).unwrap();
    let names: Vec<&str> = unit["pins"]
        .as_object()
        .unwrap()
        .values()
        .map(|p| p["primary_name"].as_str().unwrap())
        .collect();
    // Value maps reorder keys; check the record order on the file text.
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, ["PB7", "PF2", "VDD"]);

    let file = fs::read_to_string(&written.unit).unwrap();
    let pb7 = file.find("\"PB7\"").unwrap();
    let pf2 = file.find("\"PF2\"").unwrap();
    let vdd = file.find("\"VDD\"").unwrap();
    assert!(pb7 < pf2 && pf2 < vdd);
}

#[test]
fn refuses_to_overwrite() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let records = records();
    let paths = record_paths(temp_dir.path(), &records);

    // Only the part exists beforehand
    fs::create_dir_all(paths.part.parent().unwrap()).unwrap();
    fs::write(&paths.part, "{}").unwrap();

    let err = write_records(temp_dir.path(), &records).unwrap_err();
    assert!(matches!(err, ImportError::OutputExists { ref path } if *path == paths.part));

    // Nothing else was written, existing file untouched
    assert!(!paths.unit.exists());
    assert!(!paths.entity.exists());
    assert_eq!(fs::read_to_string(&paths.part).unwrap(), "{}");
}

#[test]
fn second_import_of_same_name_fails() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    write_records(temp_dir.path(), &records()).expect("first write");
    let err = write_records(temp_dir.path(), &records()).unwrap_err();
    assert!(matches!(err, ImportError::OutputExists { .. }));
}

#[test]
fn failed_entity_write_removes_unit() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let records = records();
    let paths = record_paths(temp_dir.path(), &records);

    // A regular file where the entities directory should be
    fs::write(temp_dir.path().join("entities"), "not a directory").unwrap();

    let err = write_records(temp_dir.path(), &records).unwrap_err();
    assert!(matches!(err, ImportError::FileWrite { .. }));

    // The unit was written first and then rolled back
    assert!(!paths.unit.exists());
    assert!(!paths.part.exists());
    let leftovers: Vec<_> = fs::read_dir(temp_dir.path().join("units"))
        .expect("units directory was created")
        .collect();
    assert!(leftovers.is_empty());

    // Nothing blocks a retry once the obstruction is gone
    fs::remove_file(temp_dir.path().join("entities")).unwrap();
    write_records(temp_dir.path(), &records).expect("Failed to write on retry");
    assert!(paths.unit.exists());
    assert!(paths.entity.exists());
    assert!(paths.part.exists());
}
