mod common;

use common::{test_date, TestApp};
use stockroom_api::{
    errors::ServiceError,
    services::bom::{BomMaterialInput, NewBom, NewSupply, SupplyItemInput},
};

fn new_bom(materials: Vec<BomMaterialInput>) -> NewBom {
    NewBom {
        consignee: Some("Fabrication Unit".to_string()),
        product_name: Some("Control Panel".to_string()),
        date: test_date(),
        notes: None,
        materials,
    }
}

#[tokio::test]
async fn supply_transactions_accumulate_until_completion() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let sheet_id = app.seed_material("Sheet 2mm", dealer_id).await;
    let wire_id = app.seed_material("Copper Wire", dealer_id).await;

    let bom = app
        .services()
        .bom
        .create(new_bom(vec![
            BomMaterialInput { material_id: sheet_id, quantity_required: 10.0 },
            BomMaterialInput { material_id: wire_id, quantity_required: 10.0 },
        ]))
        .await
        .unwrap();
    assert!(bom.bom_identifier.starts_with("BOM-"));
    assert_eq!(bom.status, "in_progress");

    app.services()
        .bom
        .record_supply(
            bom.id,
            NewSupply {
                supply_date: test_date(),
                supply_type: Some("partial".to_string()),
                notes: None,
                items: vec![
                    SupplyItemInput { material_id: sheet_id, quantity_provided: 5.0 },
                    SupplyItemInput { material_id: wire_id, quantity_provided: 10.0 },
                ],
            },
        )
        .await
        .unwrap();

    let detail = app.services().bom.get(bom.id).await.unwrap();
    assert_eq!(detail.bom.status, "in_progress");
    assert_eq!(detail.progress_percent, 75.0);
    let sheet_line = detail
        .materials
        .iter()
        .find(|m| m.material_id == sheet_id)
        .unwrap();
    assert!(!sheet_line.is_fully_provided);

    app.services()
        .bom
        .record_supply(
            bom.id,
            NewSupply {
                supply_date: test_date(),
                supply_type: Some("final".to_string()),
                notes: None,
                items: vec![SupplyItemInput { material_id: sheet_id, quantity_provided: 5.0 }],
            },
        )
        .await
        .unwrap();

    let detail = app.services().bom.get(bom.id).await.unwrap();
    assert_eq!(detail.bom.status, "completed");
    assert_eq!(detail.bom.completion_date, Some(test_date()));
    assert_eq!(detail.progress_percent, 100.0);
    assert_eq!(detail.transactions.len(), 2);
}

#[tokio::test]
async fn supplying_a_material_not_on_the_bom_is_rejected() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let sheet_id = app.seed_material("Sheet 2mm", dealer_id).await;
    let stray_id = app.seed_material("Stray Part", dealer_id).await;

    let bom = app
        .services()
        .bom
        .create(new_bom(vec![BomMaterialInput {
            material_id: sheet_id,
            quantity_required: 10.0,
        }]))
        .await
        .unwrap();

    let err = app
        .services()
        .bom
        .record_supply(
            bom.id,
            NewSupply {
                supply_date: test_date(),
                supply_type: None,
                notes: None,
                items: vec![SupplyItemInput { material_id: stray_id, quantity_provided: 1.0 }],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));

    // Rolled back: no transaction recorded, quantities untouched
    let detail = app.services().bom.get(bom.id).await.unwrap();
    assert!(detail.transactions.is_empty());
    assert_eq!(detail.progress_percent, 0.0);
}

#[tokio::test]
async fn delete_removes_the_bom_and_its_lines() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let sheet_id = app.seed_material("Sheet 2mm", dealer_id).await;

    let bom = app
        .services()
        .bom
        .create(new_bom(vec![BomMaterialInput {
            material_id: sheet_id,
            quantity_required: 10.0,
        }]))
        .await
        .unwrap();

    app.services().bom.delete(bom.id).await.unwrap();
    assert!(matches!(
        app.services().bom.get(bom.id).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(app.services().bom.list().await.unwrap().is_empty());
}
