use parcel_core::{Parcel, ParcelStatus};

#[test]
fn status_serializes_as_plain_text() {
    assert_eq!(
        serde_json::to_string(&ParcelStatus::Registered).unwrap(),
        "\"registered\""
    );
    assert_eq!(
        serde_json::to_string(&ParcelStatus::parse("returned")).unwrap(),
        "\"returned\""
    );
    let parsed: ParcelStatus = serde_json::from_str("\"sent\"").unwrap();
    assert_eq!(parsed, ParcelStatus::Sent);
    let custom: ParcelStatus = serde_json::from_str("\"returned\"").unwrap();
    assert!(matches!(custom, ParcelStatus::Other(_)));
}

#[test]
fn parcel_json_uses_field_names() {
    let parcel = Parcel::new(1000, "test", "2024-01-01T00:00:00Z").with_number(3);
    let value = serde_json::to_value(&parcel).unwrap();

    assert_eq!(value["number"], 3);
    assert_eq!(value["client"], 1000);
    assert_eq!(value["status"], "registered");
    assert_eq!(value["created_at"], "2024-01-01T00:00:00Z");
}
