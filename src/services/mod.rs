pub mod bom;
pub mod dealers;
pub mod documents;
pub mod material_inward;
pub mod materials;
pub mod pending_materials;
pub mod purchase_orders;
