mod common;

use common::{po_item, test_date, TestApp};
use stockroom_api::{
    config::AppConfig,
    services::{documents, purchase_orders::PurchaseOrderInput},
};

#[tokio::test]
async fn po_numbers_are_sequential_from_one() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let material_id = app.seed_material("MS Rod 12mm", dealer_id).await;

    assert_eq!(app.services().purchase_orders.next_po_number().await.unwrap(), 1);

    let first = app
        .seed_purchase_order(dealer_id, vec![po_item(material_id, "MS Rod 12mm", 1, 1.0)])
        .await;
    let second = app
        .seed_purchase_order(dealer_id, vec![po_item(material_id, "MS Rod 12mm", 2, 1.0)])
        .await;
    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(app.services().purchase_orders.next_po_number().await.unwrap(), 3);
}

#[tokio::test]
async fn edit_replaces_the_entire_item_set() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let rod_id = app.seed_material("MS Rod 12mm", dealer_id).await;
    let angle_id = app.seed_material("Angle 40x40", dealer_id).await;
    let po_no = app
        .seed_purchase_order(
            dealer_id,
            vec![
                po_item(rod_id, "MS Rod 12mm", 10, 5.0),
                po_item(angle_id, "Angle 40x40", 4, 3.0),
            ],
        )
        .await;

    app.services()
        .purchase_orders
        .update(
            po_no,
            PurchaseOrderInput {
                dealer_id: Some(dealer_id),
                date: test_date(),
                status: None,
                notes: Some("revised".to_string()),
                discount: 10.0,
                items: vec![po_item(rod_id, "MS Rod 12mm", 20, 4.5)],
            },
        )
        .await
        .unwrap();

    let detail = app.services().purchase_orders.get(po_no).await.unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].quantity, 20);
    assert_eq!(detail.order.notes.as_deref(), Some("revised"));
    assert_eq!(detail.totals.subtotal, 90.0);
    assert_eq!(detail.totals.discount_amount, 9.0);
    assert_eq!(detail.totals.grand_total, 90.0 + 9.0 - 9.0);
}

#[tokio::test]
async fn list_filters_by_item_snapshot_search() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let rod_id = app.seed_material("MS Rod 12mm", dealer_id).await;
    let angle_id = app.seed_material("Angle 40x40", dealer_id).await;

    let rod_po = app
        .seed_purchase_order(dealer_id, vec![po_item(rod_id, "MS Rod 12mm", 10, 5.0)])
        .await;
    app.seed_purchase_order(dealer_id, vec![po_item(angle_id, "Angle 40x40", 4, 3.0)])
        .await;

    let hits = app
        .services()
        .purchase_orders
        .list(Some("Rod"), None, 50, 0)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].order.po_no, rod_po);

    let all = app
        .services()
        .purchase_orders
        .list(None, None, 50, 0)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    // Newest first
    assert!(all[0].order.po_no > all[1].order.po_no);
}

#[tokio::test]
async fn configured_tax_rate_flows_into_totals() {
    let mut config = AppConfig::default();
    config.tax_rate = 0.25;
    let app = TestApp::with_config(config).await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let material_id = app.seed_material("MS Rod 12mm", dealer_id).await;
    let po_no = app
        .seed_purchase_order(dealer_id, vec![po_item(material_id, "MS Rod 12mm", 10, 5.0)])
        .await;

    let detail = app.services().purchase_orders.get(po_no).await.unwrap();
    assert_eq!(detail.totals.subtotal, 50.0);
    assert_eq!(detail.totals.tax_amount, 12.5);
    assert_eq!(detail.totals.grand_total, 62.5);
}

#[tokio::test]
async fn rendered_document_carries_voucher_totals_and_words() {
    let app = TestApp::new().await;
    let dealer_id = app.seed_dealer("Acme Metals").await;
    let material_id = app.seed_material("MS Rod 12mm", dealer_id).await;
    let po_no = app
        .seed_purchase_order(dealer_id, vec![po_item(material_id, "MS Rod 12mm", 10, 5.0)])
        .await;

    let detail = app.services().purchase_orders.get(po_no).await.unwrap();
    let html = documents::render_order_document(&detail);

    assert!(html.contains("PO-N-1-25-26"));
    assert!(html.contains("Acme Metals"));
    assert!(html.contains("MS Rod 12mm"));
    assert!(html.contains("₹55.00"));
    assert!(html.contains("Fifty Five Rupees Only"));
}
