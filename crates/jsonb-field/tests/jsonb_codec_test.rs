//! Lifecycle tests for the JSONB column codec.

use field_core::{
    Attribute, Attributes, CodecError, DynamicStructure, FieldCodec, FieldValue, Lifecycle,
    LifecycleEvent, MemoryRecord, Record,
};
use jsonb_field::JsonbFieldCodec;
use serde_json::json;

fn structure_mut(lifecycle: &mut Lifecycle<MemoryRecord>) -> &mut DynamicStructure {
    lifecycle
        .record_mut()
        .get_mut("data")
        .and_then(FieldValue::as_structure_mut)
        .expect("data should be decoded")
}

fn data(lifecycle: &Lifecycle<MemoryRecord>) -> Option<&FieldValue> {
    lifecycle.record().get("data")
}

#[test]
fn test_after_find_decodes_quoted_document() {
    let record = MemoryRecord::new().with_attribute("data", r#""{\"a\":1,\"b\":{\"c\":true}}""#);
    let mut lifecycle = Lifecycle::new(record).with(JsonbFieldCodec::for_attribute("data"));
    lifecycle.trigger(LifecycleEvent::AfterFind).unwrap();

    let doc = structure_mut(&mut lifecycle);
    assert_eq!(doc.get("a"), Some(&Attribute::Value(json!(1))));
    let b = doc.child("b").unwrap();
    assert_eq!(b.get("c"), Some(&Attribute::Value(json!(true))));
}

#[test]
fn test_new_record_builds_document_by_deep_path() {
    let mut lifecycle =
        Lifecycle::new(MemoryRecord::new()).with(JsonbFieldCodec::for_attribute("data"));
    lifecycle.trigger(LifecycleEvent::Init).unwrap();

    let doc = structure_mut(&mut lifecycle);
    assert!(doc.is_empty());
    *doc.path_mut(&["settings", "theme", "color"]).unwrap() = json!("dark").into();

    lifecycle.trigger(LifecycleEvent::BeforeValidate).unwrap();
    assert_eq!(
        data(&lifecycle),
        Some(&FieldValue::from(r#"{"settings":{"theme":{"color":"dark"}}}"#))
    );
}

#[test]
fn test_encode_runs_before_validate_and_insert() {
    let codec = JsonbFieldCodec::for_attribute("data");
    let lifecycle = Lifecycle::new(MemoryRecord::new()).with(codec);
    for event in [
        LifecycleEvent::BeforeValidate,
        LifecycleEvent::BeforeInsert,
        LifecycleEvent::BeforeUpdate,
    ] {
        assert_eq!(lifecycle.actions_for(event).len(), 1, "{event}");
    }
}

#[test]
fn test_save_path_encodes_once_and_keeps_text() {
    let mut doc = DynamicStructure::new();
    doc.set("a", json!([1, 2]));
    let record = MemoryRecord::new().with_attribute("data", doc);
    let mut lifecycle = Lifecycle::new(record).with(JsonbFieldCodec::for_attribute("data"));

    lifecycle
        .trigger_all(&[LifecycleEvent::BeforeValidate, LifecycleEvent::BeforeInsert])
        .unwrap();
    assert_eq!(data(&lifecycle), Some(&FieldValue::from(r#"{"a":[1,2]}"#)));
}

#[test]
fn test_plain_json_is_not_the_read_format() {
    // Encode writes plain JSON but decode expects the quoted driver form.
    let record = MemoryRecord::new().with_attribute("data", json!({"a": 1}));
    let mut lifecycle = Lifecycle::new(record).with(JsonbFieldCodec::for_attribute("data"));

    lifecycle.trigger(LifecycleEvent::BeforeInsert).unwrap();
    assert_eq!(data(&lifecycle), Some(&FieldValue::from(r#"{"a":1}"#)));

    lifecycle.trigger(LifecycleEvent::AfterInsert).unwrap();
    assert_eq!(
        data(&lifecycle),
        Some(&FieldValue::Structure(DynamicStructure::new()))
    );
}

#[test]
fn test_empty_document_storage() {
    let record = MemoryRecord::new().with_attribute("data", DynamicStructure::new());
    let mut lifecycle = Lifecycle::new(record).with(JsonbFieldCodec::for_attribute("data"));
    lifecycle.trigger(LifecycleEvent::BeforeInsert).unwrap();
    assert_eq!(data(&lifecycle), Some(&FieldValue::Null));

    let record = MemoryRecord::new().with_attribute("data", DynamicStructure::new());
    let codec = JsonbFieldCodec::for_attribute("data").with_on_empty_save_null(false);
    let mut lifecycle = Lifecycle::new(record).with(codec);
    lifecycle.trigger(LifecycleEvent::BeforeInsert).unwrap();
    assert_eq!(data(&lifecycle), Some(&FieldValue::from("{}")));
}

#[test]
fn test_malformed_stored_value_reads_as_empty() {
    for raw in ["", "x", "not json", r#""[1,2]""#] {
        let record = MemoryRecord::new().with_attribute("data", raw);
        let mut lifecycle = Lifecycle::new(record).with(JsonbFieldCodec::for_attribute("data"));
        lifecycle.trigger(LifecycleEvent::AfterFind).unwrap();
        assert_eq!(
            data(&lifecycle),
            Some(&FieldValue::Structure(DynamicStructure::new())),
            "{raw:?}"
        );
    }
}

#[test]
fn test_attribute_name_required() {
    let mut codec = JsonbFieldCodec::default();
    assert!(matches!(
        codec.attribute_name(),
        Err(CodecError::Configuration(_))
    ));
    codec.set_attribute_name("data");
    assert_eq!(codec.attribute_name().unwrap(), "data");
}

struct Report;

impl Record for Report {
    fn attributes_mut(&mut self) -> Option<&mut dyn Attributes> {
        None
    }
}

#[test]
fn test_record_without_attributes_is_rejected() {
    let mut lifecycle = Lifecycle::new(Report).with(JsonbFieldCodec::for_attribute("data"));
    let err = lifecycle.trigger(LifecycleEvent::BeforeValidate).unwrap_err();
    match err {
        CodecError::UnsupportedHost { type_name } => assert!(type_name.ends_with("Report")),
        other => panic!("unexpected error: {other}"),
    }
}
