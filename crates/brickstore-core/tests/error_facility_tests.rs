use brickstore_core::errors::{BrickstoreError, ExError, ExErrorKind};

#[test]
fn test_not_found_verifiable_by_kind() {
    let err: ExError = BrickstoreError::LegoSetNotFound { id: 12 }.into();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.code(), "ERR_NOT_FOUND");
    assert_eq!(err.entity_id(), Some("12"));
}

#[test]
fn test_missing_converter_names_column() {
    let err: ExError = BrickstoreError::MissingClobConverter {
        column: "handbuch.text".to_string(),
    }
    .into();

    assert_eq!(err.kind(), ExErrorKind::MissingConverter);
    assert_eq!(err.op(), Some("read_clob"));
    assert!(err.message().contains("handbuch.text"));
}

#[test]
fn test_display_includes_code_op_and_cause() {
    let err = ExError::new(ExErrorKind::Conversion)
        .with_op("convert_clob")
        .with_message("Failed to convert CLOB to String.")
        .with_source(ExError::new(ExErrorKind::Persistence).with_message("database is locked"));

    let rendered = err.to_string();
    assert!(rendered.starts_with("[ERR_CONVERSION]"));
    assert!(rendered.contains("convert_clob"));
    assert!(rendered.contains("database is locked"));
}

#[test]
fn test_error_codes_are_unique() {
    let kinds = [
        ExErrorKind::InvalidInput,
        ExErrorKind::NotFound,
        ExErrorKind::ConstraintViolation,
        ExErrorKind::Conversion,
        ExErrorKind::MissingConverter,
        ExErrorKind::Io,
        ExErrorKind::Persistence,
    ];
    let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), kinds.len());
}
