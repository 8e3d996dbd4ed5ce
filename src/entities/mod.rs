pub mod bom;
pub mod bom_material;
pub mod bom_supply_item;
pub mod bom_supply_transaction;
pub mod dealer;
pub mod material;
pub mod material_inward;
pub mod material_inward_item;
pub mod pending_material;
pub mod pending_material_resolution;
pub mod purchase_order;
pub mod purchase_order_item;
