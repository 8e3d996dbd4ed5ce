mod common;

use common::TestApp;
use stockroom_api::{errors::ServiceError, services::materials::MaterialInput};

#[tokio::test]
async fn material_names_round_trip_through_create_and_update() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;

    let created = app
        .services()
        .materials
        .create(MaterialInput {
            base_name: "MS Rod".to_string(),
            defined_name_with_spec: "MS Rod 12mm".to_string(),
            dealer_id: Some(dealer_id),
            units: Some("pcs".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.base_name.as_deref(), Some("MS Rod"));
    assert_eq!(created.defined_name_with_spec.as_deref(), Some("MS Rod 12mm"));

    let updated = app
        .services()
        .materials
        .update(
            created.id,
            MaterialInput {
                base_name: "MS Rod".to_string(),
                defined_name_with_spec: "MS Rod 16mm".to_string(),
                dealer_id: Some(dealer_id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.defined_name_with_spec.as_deref(), Some("MS Rod 16mm"));

    let hits = app
        .services()
        .materials
        .list(Some("16mm"), None)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, created.id);
}

#[tokio::test]
async fn blank_material_names_are_rejected() {
    let app = TestApp::new().await;

    let err = app
        .services()
        .materials
        .create(MaterialInput {
            base_name: "  ".to_string(),
            defined_name_with_spec: "MS Rod 12mm".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}
