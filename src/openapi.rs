use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "1.0.0",
        description = r#"
# Stockroom Inventory & Procurement API

Manages the procurement lifecycle: dealers, the material catalog, purchase
orders, material inward (receiving) events, pending-material reconciliation
and bills of materials.

## Workflow

1. Raise a purchase order against a dealer with line items.
2. Record material inward events as deliveries arrive; short deliveries
   automatically register pending-material rows.
3. Resolve pending rows as follow-up deliveries arrive, singly (with an
   optional proof document) or in batch per purchase order.
4. A fully received order transitions to status `received`.

Form endpoints accept `application/x-www-form-urlencoded` bodies with
indexed line-item arrays (`items[0][quantity]`, ...) and answer with a
303 redirect; the rest of the API is JSON.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "purchase-orders", description = "Purchase order management"),
        (name = "material-inward", description = "Receiving events and pending resolution"),
        (name = "pending-materials", description = "Pending material reconciliation"),
        (name = "dealers", description = "Dealer directory"),
        (name = "materials", description = "Material catalog"),
        (name = "bom", description = "Bills of materials")
    ),
    paths(
        // Purchase orders
        crate::handlers::purchase_orders::list_purchase_orders,
        crate::handlers::purchase_orders::add_purchase_order_form,
        crate::handlers::purchase_orders::add_purchase_order,
        crate::handlers::purchase_orders::get_purchase_order,
        crate::handlers::purchase_orders::edit_purchase_order_form,
        crate::handlers::purchase_orders::edit_purchase_order,
        crate::handlers::purchase_orders::delete_purchase_order,
        crate::handlers::purchase_orders::mark_purchase_order_received,
        crate::handlers::purchase_orders::purchase_order_document,

        // Material inward
        crate::handlers::material_inward::list_material_inward,
        crate::handlers::material_inward::lookup_po,
        crate::handlers::material_inward::add_material_inward_form,
        crate::handlers::material_inward::add_material_inward,
        crate::handlers::material_inward::edit_material_inward_form,
        crate::handlers::material_inward::edit_material_inward,
        crate::handlers::material_inward::delete_material_inward,
        crate::handlers::material_inward::list_pending,
        crate::handlers::material_inward::resolve_pending,

        // Pending materials
        crate::handlers::pending_materials::list_pending_materials,
        crate::handlers::pending_materials::add_pending_form,
        crate::handlers::pending_materials::add_pending,
        crate::handlers::pending_materials::update_pending_form,
        crate::handlers::pending_materials::update_pending,

        // Dealers
        crate::handlers::dealers::list_dealers,
        crate::handlers::dealers::get_dealer,
        crate::handlers::dealers::add_dealer,
        crate::handlers::dealers::edit_dealer,
        crate::handlers::dealers::delete_dealer,

        // Materials
        crate::handlers::materials::list_materials,
        crate::handlers::materials::get_material,
        crate::handlers::materials::add_material,
        crate::handlers::materials::edit_material,
        crate::handlers::materials::delete_material,

        // BOM
        crate::handlers::bom::list_boms,
        crate::handlers::bom::get_bom,
        crate::handlers::bom::create_bom,
        crate::handlers::bom::record_supply,
        crate::handlers::bom::delete_bom,
    ),
    components(
        schemas(
            crate::handlers::bom::CreateBomRequest,
            crate::handlers::bom::BomMaterialRequest,
            crate::handlers::bom::RecordSupplyRequest,
            crate::handlers::bom::SupplyItemRequest,
            crate::services::material_inward::PoLookup,
            crate::services::purchase_orders::PoTotals,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_generates() {
        let openapi = ApiDoc::openapi();
        let json = serde_json::to_string(&openapi).unwrap();
        assert!(json.contains("Stockroom API"));
        assert!(json.contains("/purchase_orders"));
        assert!(json.contains("/material_inward/pending/resolve/{id}"));
    }
}
