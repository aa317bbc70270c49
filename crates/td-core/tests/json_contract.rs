//! Integration tests for the Design JSON contract.

use td_core::{Component, Connection, Design};

#[test]
fn serializes_to_contract_shape() {
    let design = Design::chain(vec![Component::Pump, Component::Filter, Component::Tank]).unwrap();
    let json = serde_json::to_value(&design).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "components": ["Pump", "Filter", "Tank"],
            "connections": [["Pump", "Filter"], ["Filter", "Tank"]]
        })
    );
}

#[test]
fn empty_design_serializes_to_empty_lists() {
    let json = serde_json::to_string(&Design::empty()).unwrap();
    assert_eq!(json, r#"{"components":[],"connections":[]}"#);
}

#[test]
fn deserializes_valid_design() {
    let design: Design = serde_json::from_str(
        r#"{"components": ["Tank", "Valve"], "connections": [["Tank", "Valve"]]}"#,
    )
    .unwrap();
    assert_eq!(design.components(), &[Component::Tank, Component::Valve]);
    assert_eq!(
        design.connections(),
        &[Connection::new(Component::Tank, Component::Valve)]
    );
}

#[test]
fn deserialize_rejects_dangling_connection() {
    let result: Result<Design, _> = serde_json::from_str(
        r#"{"components": ["Pump"], "connections": [["Pump", "Tank"]]}"#,
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Tank"));
}

#[test]
fn deserialize_rejects_extra_fields() {
    let result: Result<Design, _> = serde_json::from_str(
        r#"{"components": [], "connections": [], "notes": "hello"}"#,
    );
    assert!(result.is_err());
}

#[test]
fn deserialize_rejects_missing_field() {
    let result: Result<Design, _> = serde_json::from_str(r#"{"components": ["Pump"]}"#);
    assert!(result.is_err());
}

#[test]
fn deserialize_rejects_three_element_connection() {
    let result: Result<Design, _> = serde_json::from_str(
        r#"{"components": ["Pump", "Tank", "Valve"], "connections": [["Pump", "Tank", "Valve"]]}"#,
    );
    assert!(result.is_err());
}
