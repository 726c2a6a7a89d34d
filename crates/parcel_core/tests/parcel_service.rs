use parcel_core::db::open_db_in_memory;
use parcel_core::{ParcelService, ParcelStatus, ServiceError, SqliteParcelRepository};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[test]
fn register_persists_registered_parcel_with_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::try_new(&conn).unwrap());

    let parcel = service.register(1000, "Pushkin st. 10").unwrap();
    assert!(parcel.number > 0);
    assert_eq!(parcel.status, ParcelStatus::Registered);
    OffsetDateTime::parse(&parcel.created_at, &Rfc3339).unwrap();

    assert_eq!(service.parcel(parcel.number).unwrap(), parcel);
}

#[test]
fn next_status_walks_lifecycle_and_stops_at_delivered() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::new(&conn));
    let parcel = service
        .register_at(1, "Lenin ave. 5", "2024-01-01T00:00:00Z")
        .unwrap();

    assert_eq!(
        service.next_status(parcel.number).unwrap(),
        Some(ParcelStatus::Sent)
    );
    assert_eq!(
        service.next_status(parcel.number).unwrap(),
        Some(ParcelStatus::Delivered)
    );
    assert_eq!(service.next_status(parcel.number).unwrap(), None);
    assert_eq!(
        service.parcel(parcel.number).unwrap().status,
        ParcelStatus::Delivered
    );
}

#[test]
fn next_status_on_missing_parcel_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::new(&conn));

    let err = service.next_status(99).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(99)));
}

#[test]
fn address_change_and_delete_only_apply_while_registered() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::new(&conn));
    let editable = service.register(7, "old").unwrap();
    let shipped = service.register(7, "old").unwrap();
    service.next_status(shipped.number).unwrap();

    service.change_address(editable.number, "new").unwrap();
    service.change_address(shipped.number, "new").unwrap();
    assert_eq!(service.parcel(editable.number).unwrap().address, "new");
    assert_eq!(service.parcel(shipped.number).unwrap().address, "old");

    service.delete(editable.number).unwrap();
    service.delete(shipped.number).unwrap();
    assert!(matches!(
        service.parcel(editable.number),
        Err(ServiceError::NotFound(_))
    ));

    let remaining = service.client_parcels(7).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].number, shipped.number);
    assert_eq!(remaining[0].status, ParcelStatus::Sent);
}
