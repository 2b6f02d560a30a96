use brickstore_core::config::{AggregateConfiguration, BrickstoreConfig};
use brickstore_core::errors::ExErrorKind;
use brickstore_core::events::{IdSettingListener, RelationalEvent};
use brickstore_core::logging_facility::Profile;
use brickstore_core::mapping::NamingStrategy;
use brickstore_core::{LegoSet, Manual};
use std::io::Write;

#[test]
fn test_load_from_file_and_wire() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[logging]
profile = "test"

[naming.column_aliases]
"lego_set.int_maximum_age" = "oldest"

[naming.reverse_column_aliases]
manual = "set_id"
"#
    )
    .unwrap();

    let config = BrickstoreConfig::load(file.path()).unwrap();
    assert_eq!(config.logging.profile, Profile::Test);

    let wiring = AggregateConfiguration::from_config(&config, IdSettingListener::new());
    let naming = wiring.naming_strategy();
    assert_eq!(naming.column_name(&LegoSet::MAXIMUM_AGE), "oldest");
    assert_eq!(naming.column_name(&LegoSet::MINIMUM_AGE), "int_minimum_age");
    assert_eq!(naming.reverse_column_name(&LegoSet::MANUAL), "set_id");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BrickstoreConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
}

#[test]
fn test_malformed_file_is_invalid_input() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[database\npath = ").unwrap();
    let err = BrickstoreConfig::load(file.path()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_wired_publisher_assigns_ids() {
    let wiring = AggregateConfiguration::new(
        BrickstoreConfig::default().naming,
        IdSettingListener::starting_after(100),
    );
    let mut set = LegoSet::new("Millennium Falcon");
    set.set_manual(Manual::new("Han", "Punch it"));

    wiring
        .event_publisher()
        .publish(&mut RelationalEvent::BeforeSave { entity: &mut set });

    assert_eq!(set.id, 101);
    assert_eq!(set.manual.unwrap().id, 101);
    assert_eq!(wiring.id_setting().last_assigned(), 101);
}
