//! End-to-end workflow tests for the receive/pending/resolve cycle, running
//! against an in-memory SQLite database with the full schema.

mod common;

use common::{po_item, test_date, TestApp};
use stockroom_api::{
    errors::ServiceError,
    forms::{InwardLineForm, PendingUpdateForm},
    services::{
        material_inward::NewMaterialInward,
        pending_materials::{PendingBatchHeader, ResolveInput},
    },
};

fn inward_input(po_no: i32, lines: Vec<InwardLineForm>) -> NewMaterialInward {
    NewMaterialInward {
        po_no,
        date_of_inward: test_date(),
        bill_no: Some("BILL-1".to_string()),
        bill_date: Some(test_date()),
        cost: 0.0,
        payment_method: Some("credit".to_string()),
        lines,
    }
}

fn received(po_item_id: i32, quantity: i32) -> InwardLineForm {
    InwardLineForm {
        po_item_id,
        received: true,
        quantity_received: quantity,
    }
}

#[tokio::test]
async fn full_receipt_completes_inward_and_po_with_no_pending() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let material_id = app.seed_material("MS Rod 12mm", dealer_id).await;
    let po_no = app
        .seed_purchase_order(dealer_id, vec![po_item(material_id, "MS Rod 12mm", 10, 5.0)])
        .await;

    let detail = app.services().purchase_orders.get(po_no).await.unwrap();
    assert_eq!(detail.totals.grand_total, 55.0);
    let po_item_id = detail.items[0].id;

    let inward_id = app
        .services()
        .material_inward
        .create(inward_input(po_no, vec![received(po_item_id, 10)]))
        .await
        .unwrap();

    let inward = app.services().material_inward.get(inward_id).await.unwrap();
    assert_eq!(inward.inward.status, "completed");
    assert_eq!(inward.items.len(), 1);
    assert_eq!(inward.items[0].status, "completed");

    let po = app.services().purchase_orders.get(po_no).await.unwrap();
    assert_eq!(po.order.status, "received");

    let pending = app.services().pending_materials.list_for_po(po_no).await.unwrap();
    assert!(pending.is_empty());
}

#[tokio::test]
async fn short_receipt_registers_pending_and_single_resolution_closes_it() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let material_id = app.seed_material("MS Rod 12mm", dealer_id).await;
    let po_no = app
        .seed_purchase_order(dealer_id, vec![po_item(material_id, "MS Rod 12mm", 10, 5.0)])
        .await;
    let po_item_id = app.services().purchase_orders.get(po_no).await.unwrap().items[0].id;

    let inward_id = app
        .services()
        .material_inward
        .create(inward_input(po_no, vec![received(po_item_id, 6)]))
        .await
        .unwrap();

    let inward = app.services().material_inward.get(inward_id).await.unwrap();
    assert_eq!(inward.inward.status, "partial");

    let po = app.services().purchase_orders.get(po_no).await.unwrap();
    assert_eq!(po.order.status, "partial");

    let pending = app.services().pending_materials.list_for_po(po_no).await.unwrap();
    assert_eq!(pending.len(), 1);
    let row = &pending[0];
    assert_eq!(row.ordered_quantity, 10);
    assert_eq!(row.received_quantity, 6);
    assert_eq!(row.pending_quantity, 4);
    assert_eq!(row.status, "partially_resolved");
    assert_eq!(row.original_inward_id, Some(inward_id));

    let resolved = app
        .services()
        .pending_materials
        .resolve(
            row.id,
            ResolveInput {
                resolve_quantity: 4,
                bill_no: Some("BILL-2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(resolved.pending_quantity, 0);
    assert_eq!(resolved.received_quantity, 10);
    assert_eq!(resolved.status, "resolved");

    let history = app.services().pending_materials.resolutions(row.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].resolved_quantity, 4);
    assert_eq!(history[0].bill_no.as_deref(), Some("BILL-2"));

    // No open rows remain, so the PO settles
    let po = app.services().purchase_orders.get(po_no).await.unwrap();
    assert_eq!(po.order.status, "received");

    // Row is retained after resolution but leaves the operational list
    let unresolved = app.services().pending_materials.list_unresolved().await.unwrap();
    assert!(unresolved.iter().all(|r| r.pending.id != row.id));
    let all = app.services().pending_materials.list_for_po(po_no).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn two_partial_resolutions_accumulate_into_resolved() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let material_id = app.seed_material("MS Rod 12mm", dealer_id).await;
    let po_no = app
        .seed_purchase_order(dealer_id, vec![po_item(material_id, "MS Rod 12mm", 10, 5.0)])
        .await;
    let po_item_id = app.services().purchase_orders.get(po_no).await.unwrap().items[0].id;

    app.services()
        .material_inward
        .create(inward_input(po_no, vec![received(po_item_id, 6)]))
        .await
        .unwrap();
    let pending_id = app.services().pending_materials.list_for_po(po_no).await.unwrap()[0].id;

    let first = app
        .services()
        .pending_materials
        .resolve(pending_id, ResolveInput { resolve_quantity: 2, ..Default::default() })
        .await
        .unwrap();
    assert_eq!(first.pending_quantity, 2);
    assert_eq!(first.status, "partially_resolved");

    let second = app
        .services()
        .pending_materials
        .resolve(pending_id, ResolveInput { resolve_quantity: 2, ..Default::default() })
        .await
        .unwrap();
    assert_eq!(second.pending_quantity, 0);
    assert_eq!(second.status, "resolved");

    let history = app.services().pending_materials.resolutions(pending_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|r| r.resolved_quantity == 2));
}

#[tokio::test]
async fn over_receipt_and_over_resolution_are_rejected() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let material_id = app.seed_material("MS Rod 12mm", dealer_id).await;
    let po_no = app
        .seed_purchase_order(dealer_id, vec![po_item(material_id, "MS Rod 12mm", 10, 5.0)])
        .await;
    let po_item_id = app.services().purchase_orders.get(po_no).await.unwrap().items[0].id;

    let err = app
        .services()
        .material_inward
        .create(inward_input(po_no, vec![received(po_item_id, 12)]))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));

    // The rejected event must not leave partial state behind
    assert!(app.services().material_inward.list().await.unwrap().is_empty());
    assert!(app.services().pending_materials.list_for_po(po_no).await.unwrap().is_empty());

    app.services()
        .material_inward
        .create(inward_input(po_no, vec![received(po_item_id, 6)]))
        .await
        .unwrap();
    let pending_id = app.services().pending_materials.list_for_po(po_no).await.unwrap()[0].id;

    let err = app
        .services()
        .pending_materials
        .resolve(pending_id, ResolveInput { resolve_quantity: 5, ..Default::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));

    let row = &app.services().pending_materials.list_for_po(po_no).await.unwrap()[0];
    assert_eq!(row.pending_quantity, 4);
    assert!(app.services().pending_materials.resolutions(pending_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn zero_quantity_resolution_is_a_noop() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let material_id = app.seed_material("MS Rod 12mm", dealer_id).await;
    let po_no = app
        .seed_purchase_order(dealer_id, vec![po_item(material_id, "MS Rod 12mm", 10, 5.0)])
        .await;
    let po_item_id = app.services().purchase_orders.get(po_no).await.unwrap().items[0].id;

    app.services()
        .material_inward
        .create(inward_input(po_no, vec![received(po_item_id, 6)]))
        .await
        .unwrap();
    let pending_id = app.services().pending_materials.list_for_po(po_no).await.unwrap()[0].id;

    let row = app
        .services()
        .pending_materials
        .resolve(pending_id, ResolveInput::default())
        .await
        .unwrap();
    assert_eq!(row.pending_quantity, 4);
    assert_eq!(row.status, "partially_resolved");
    assert!(app.services().pending_materials.resolutions(pending_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn batch_resolution_records_pending_inward_and_settles_the_po() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let material_id = app.seed_material("MS Rod 12mm", dealer_id).await;
    let angle_id = app.seed_material("Angle 40x40", dealer_id).await;
    let po_no = app
        .seed_purchase_order(
            dealer_id,
            vec![
                po_item(material_id, "MS Rod 12mm", 10, 5.0),
                po_item(angle_id, "Angle 40x40", 8, 3.0),
            ],
        )
        .await;
    let items = app.services().purchase_orders.get(po_no).await.unwrap().items;

    app.services()
        .material_inward
        .create(inward_input(
            po_no,
            vec![received(items[0].id, 6), received(items[1].id, 8)],
        ))
        .await
        .unwrap();

    let pending = app.services().pending_materials.open_for_po(po_no).await.unwrap();
    assert_eq!(pending.len(), 1);
    let pending_id = pending[0].id;

    let inward_id = app
        .services()
        .pending_materials
        .batch_update(
            po_no,
            PendingBatchHeader {
                date_of_inward: test_date(),
                bill_no: Some("BILL-3".to_string()),
                bill_date: Some(test_date()),
                cost: 20.0,
                payment_method: None,
            },
            vec![PendingUpdateForm { pending_id, quantity_received: 4 }],
        )
        .await
        .unwrap();

    let inward = app.services().material_inward.get(inward_id).await.unwrap();
    assert!(inward.inward.is_pending_inward);
    assert_eq!(inward.inward.status, "partial");
    assert_eq!(inward.items.len(), 1);
    assert_eq!(inward.items[0].status, "completed");
    assert_eq!(inward.items[0].quantity_received, 4);

    let row = &app.services().pending_materials.list_for_po(po_no).await.unwrap()[0];
    assert_eq!(row.status, "resolved");
    assert_eq!(row.pending_quantity, 0);

    let history = app.services().pending_materials.resolutions(pending_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].material_inward_id, Some(inward_id));

    let po = app.services().purchase_orders.get(po_no).await.unwrap();
    assert_eq!(po.order.status, "received");
}

#[tokio::test]
async fn deleting_a_po_keeps_inward_and_pending_history() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let material_id = app.seed_material("MS Rod 12mm", dealer_id).await;
    let po_no = app
        .seed_purchase_order(dealer_id, vec![po_item(material_id, "MS Rod 12mm", 10, 5.0)])
        .await;
    let po_item_id = app.services().purchase_orders.get(po_no).await.unwrap().items[0].id;

    let inward_id = app
        .services()
        .material_inward
        .create(inward_input(po_no, vec![received(po_item_id, 6)]))
        .await
        .unwrap();

    app.services().purchase_orders.delete(po_no).await.unwrap();
    assert!(matches!(
        app.services().purchase_orders.get(po_no).await,
        Err(ServiceError::NotFound(_))
    ));

    // Satellite aggregates survive the PO deletion
    assert!(app.services().material_inward.get(inward_id).await.is_ok());
    assert_eq!(
        app.services().pending_materials.list_for_po(po_no).await.unwrap().len(),
        1
    );
}
