use clap::Parser;
use pg_field_codecs::{decode_column, encode_column, CodecOpts, ColumnKind, DEFAULT_ATTRIBUTE};
use pg_field_codecs::field_core::FieldConfig;
use serde_json::json;
use std::io::Write;

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    opts: CodecOpts,
}

#[test]
fn test_codec_opts_defaults() {
    let config = CodecOpts::default().field_config().unwrap();
    assert_eq!(config.attribute_name().unwrap(), DEFAULT_ATTRIBUTE);
    assert!(config.on_empty_save_null);
}

#[test]
fn test_codec_opts_parsing() {
    let cli = TestCli::parse_from([
        "test",
        "--attribute",
        "tags",
        "--on-empty-save-null",
        "false",
    ]);
    let config = cli.opts.field_config().unwrap();
    assert_eq!(config.attribute_name().unwrap(), "tags");
    assert!(!config.on_empty_save_null);
}

#[test]
fn test_codec_opts_overrides_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "attribute_field_name: payload").unwrap();
    writeln!(file, "on_empty_save_null: false").unwrap();

    let opts = CodecOpts {
        config: Some(file.path().to_path_buf()),
        attribute: None,
        on_empty_save_null: Some(true),
    };
    let config = opts.field_config().unwrap();
    assert_eq!(config.attribute_name().unwrap(), "payload");
    assert!(config.on_empty_save_null);
}

#[test]
fn test_codec_opts_missing_config_file() {
    let opts = CodecOpts {
        config: Some("/nonexistent/codec.yaml".into()),
        ..CodecOpts::default()
    };
    let err = opts.field_config().unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load codec config"));
}

#[test]
fn test_decode_array_column() {
    let config = FieldConfig::new("tags");
    assert_eq!(
        decode_column(ColumnKind::Array, config.clone(), Some(r#"["a",1]"#)).unwrap(),
        json!(["a", 1])
    );
    assert_eq!(
        decode_column(ColumnKind::Array, config.clone(), None).unwrap(),
        json!([])
    );
    assert_eq!(
        decode_column(ColumnKind::Array, config, Some("garbage")).unwrap(),
        json!([])
    );
}

#[test]
fn test_decode_jsonb_column() {
    let config = FieldConfig::new("data");
    assert_eq!(
        decode_column(ColumnKind::Jsonb, config.clone(), Some(r#""{\"a\":{\"b\":2}}""#)).unwrap(),
        json!({"a": {"b": 2}})
    );
    assert_eq!(
        decode_column(ColumnKind::Jsonb, config, Some("x")).unwrap(),
        json!({})
    );
}

#[test]
fn test_encode_columns() {
    let config = FieldConfig::new("value");
    assert_eq!(
        encode_column(ColumnKind::Array, config.clone(), "[1, 2]").unwrap(),
        Some("[1,2]".to_string())
    );
    assert_eq!(
        encode_column(ColumnKind::Jsonb, config.clone(), r#"{"b": 1, "a": null}"#).unwrap(),
        Some(r#"{"a":null,"b":1}"#.to_string())
    );
    assert_eq!(encode_column(ColumnKind::Array, config.clone(), "[]").unwrap(), None);
    assert_eq!(
        encode_column(
            ColumnKind::Array,
            config.with_on_empty_save_null(false),
            "[]"
        )
        .unwrap(),
        Some("{}".to_string())
    );
}

#[test]
fn test_encode_rejects_invalid_json() {
    let err = encode_column(ColumnKind::Jsonb, FieldConfig::new("value"), "{oops").unwrap_err();
    assert!(err.to_string().contains("Failed to parse input as JSON"));
}
