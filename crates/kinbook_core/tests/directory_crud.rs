use kinbook_core::{ContactRecord, Directory, DirectoryError};

fn record(name: &str, phone: &str) -> ContactRecord {
    let mut record = ContactRecord::new(name).unwrap();
    record.add_phone(phone).unwrap();
    record
}

#[test]
fn add_then_find_returns_the_record() {
    let mut directory = Directory::new();
    directory.add_record(record("Edd", "1234567890"));

    let found = directory.find("Edd").unwrap();
    assert_eq!(found.name().as_str(), "Edd");
    assert_eq!(found.phones()[0].as_str(), "1234567890");
}

#[test]
fn re_adding_a_name_replaces_the_record() {
    let mut directory = Directory::new();
    assert!(directory.add_record(record("Edd", "1234567890")).is_none());

    let replaced = directory.add_record(record("Edd", "0987654321")).unwrap();
    assert_eq!(replaced.phones()[0].as_str(), "1234567890");

    assert_eq!(directory.len(), 1);
    let current = directory.find("Edd").unwrap();
    assert_eq!(current.phones()[0].as_str(), "0987654321");
}

#[test]
fn find_is_exact_and_case_sensitive() {
    let mut directory = Directory::new();
    directory.add_record(record("Edd", "1234567890"));

    assert!(directory.find("Edd").is_some());
    assert!(directory.find("edd").is_none());
    assert!(directory.find("Ed").is_none());
}

#[test]
fn find_mut_edits_are_visible_through_find() {
    let mut directory = Directory::new();
    directory.add_record(record("Edd", "1234567890"));

    directory
        .find_mut("Edd")
        .unwrap()
        .add_phone("0987654321")
        .unwrap();

    assert_eq!(directory.find("Edd").unwrap().phones().len(), 2);
}

#[test]
fn delete_returns_the_removed_record() {
    let mut directory = Directory::new();
    directory.add_record(record("Edd", "1234567890"));

    let removed = directory.delete("Edd").unwrap();
    assert_eq!(removed.name().as_str(), "Edd");
    assert!(directory.find("Edd").is_none());
    assert!(directory.is_empty());
}

#[test]
fn delete_unknown_name_is_an_error() {
    let mut directory = Directory::new();
    let err = directory.delete("Ghost").unwrap_err();
    assert!(matches!(err, DirectoryError::NameNotFound(name) if name == "Ghost"));
}

#[test]
fn records_iterate_in_name_order() {
    let mut directory = Directory::new();
    directory.add_record(record("Zed", "1112223333"));
    directory.add_record(record("Anna", "4445556666"));
    directory.add_record(record("Mike", "7778889999"));

    let names: Vec<&str> = directory
        .records()
        .map(|record| record.name().as_str())
        .collect();
    assert_eq!(names, vec!["Anna", "Mike", "Zed"]);
}

#[test]
fn len_and_is_empty_track_mutations() {
    let mut directory = Directory::new();
    assert!(directory.is_empty());
    assert_eq!(directory.len(), 0);

    directory.add_record(record("Edd", "1234567890"));
    assert!(!directory.is_empty());
    assert_eq!(directory.len(), 1);

    directory.delete("Edd").unwrap();
    assert!(directory.is_empty());
}

#[test]
fn directory_serializes_as_a_name_keyed_map() {
    let mut directory = Directory::new();
    let mut edd = record("Edd", "1234567890");
    edd.set_birthday("24.06.1985").unwrap();
    directory.add_record(edd);

    let value = serde_json::to_value(&directory).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "Edd": {
                "name": "Edd",
                "phones": ["1234567890"],
                "birthday": "24.06.1985"
            }
        })
    );

    let parsed: Directory = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, directory);
}

#[test]
fn deserialization_rejects_key_name_mismatch() {
    let raw = serde_json::json!({
        "Edd": {
            "name": "Mike",
            "phones": [],
            "birthday": null
        }
    });

    assert!(serde_json::from_value::<Directory>(raw).is_err());
}
