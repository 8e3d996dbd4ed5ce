//! Typed parsing for legacy form submissions.
//!
//! Line items arrive as indexed fields (`items[0][quantity]`,
//! `items[1][quantity]`, ...). The list has no length field; the first index
//! whose sentinel key is absent or empty terminates it. Each parser here
//! walks the indexes and produces a fully validated `Vec` of typed line
//! structs before any persistence starts.

use crate::errors::ServiceError;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Flat view over a urlencoded form body. Later duplicates of a key win,
/// matching how browsers serialize re-submitted fields.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    fields: HashMap<String, String>,
}

impl FormFields {
    pub fn parse(body: &str) -> Self {
        let fields = url::form_urlencoded::parse(body.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { fields }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the trimmed value, mapping missing keys and empty strings to
    /// `None`. Empty means "not filled in" for every form in this app.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    pub fn get_i32(&self, key: &str) -> Result<Option<i32>, ServiceError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<i32>().map(Some).map_err(|_| {
                ServiceError::ValidationError(format!("Field '{}' must be an integer", key))
            }),
        }
    }

    pub fn get_i32_or(&self, key: &str, default: i32) -> Result<i32, ServiceError> {
        Ok(self.get_i32(key)?.unwrap_or(default))
    }

    pub fn require_i32(&self, key: &str) -> Result<i32, ServiceError> {
        self.get_i32(key)?
            .ok_or_else(|| ServiceError::ValidationError(format!("Field '{}' is required", key)))
    }

    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, ServiceError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<f64>().map(Some).map_err(|_| {
                ServiceError::ValidationError(format!("Field '{}' must be a number", key))
            }),
        }
    }

    pub fn get_f64_or(&self, key: &str, default: f64) -> Result<f64, ServiceError> {
        Ok(self.get_f64(key)?.unwrap_or(default))
    }

    pub fn get_date(&self, key: &str) -> Result<Option<NaiveDate>, ServiceError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(Some).map_err(|_| {
                ServiceError::ValidationError(format!("Field '{}' must be a YYYY-MM-DD date", key))
            }),
        }
    }

    /// Checkbox semantics: present with value "on" means checked.
    pub fn get_checkbox(&self, key: &str) -> bool {
        self.get(key) == Some("on")
    }
}

fn item_key(index: usize, field: &str) -> String {
    format!("items[{}][{}]", index, field)
}

/// One submitted purchase order line.
#[derive(Debug, Clone, PartialEq)]
pub struct PoItemForm {
    pub material_id: i32,
    pub material_name: Option<String>,
    pub spec: Option<String>,
    pub brand: Option<String>,
    pub dealer_name: Option<String>,
    pub quantity: i32,
    pub price: f64,
    pub unit: Option<String>,
}

/// Parses the PO line-item array. `items[i][material_id]` is the sentinel:
/// the first index where it is absent ends the list.
pub fn parse_po_items(form: &FormFields) -> Result<Vec<PoItemForm>, ServiceError> {
    let mut items = Vec::new();
    let mut index = 0;

    while let Some(material_id) = form.get_i32(&item_key(index, "material_id"))? {
        let quantity = form.get_i32_or(&item_key(index, "quantity"), 0)?;
        if quantity < 0 {
            return Err(ServiceError::ValidationError(format!(
                "Line {}: quantity must not be negative",
                index
            )));
        }
        let price = form.get_f64_or(&item_key(index, "price"), 0.0)?;
        if price < 0.0 {
            return Err(ServiceError::ValidationError(format!(
                "Line {}: price must not be negative",
                index
            )));
        }

        items.push(PoItemForm {
            material_id,
            material_name: form.get_string(&item_key(index, "material_name")),
            spec: form.get_string(&item_key(index, "spec")),
            brand: form.get_string(&item_key(index, "brand")),
            dealer_name: form.get_string(&item_key(index, "dealer_name")),
            quantity,
            price,
            unit: form.get_string(&item_key(index, "unit")),
        });
        index += 1;
    }

    Ok(items)
}

/// One submitted receipt line on the material inward form.
#[derive(Debug, Clone, PartialEq)]
pub struct InwardLineForm {
    pub po_item_id: i32,
    pub received: bool,
    pub quantity_received: i32,
}

/// Parses the per-line receipt entries. Sentinel is `items[i][po_item_id]`.
pub fn parse_inward_lines(form: &FormFields) -> Result<Vec<InwardLineForm>, ServiceError> {
    let mut lines = Vec::new();
    let mut index = 0;

    while let Some(po_item_id) = form.get_i32(&item_key(index, "po_item_id"))? {
        let quantity_received = form.get_i32_or(&item_key(index, "quantity_received"), 0)?;
        if quantity_received < 0 {
            return Err(ServiceError::ValidationError(format!(
                "Line {}: quantity_received must not be negative",
                index
            )));
        }

        lines.push(InwardLineForm {
            po_item_id,
            received: form.get_checkbox(&item_key(index, "received")),
            quantity_received,
        });
        index += 1;
    }

    Ok(lines)
}

/// One shortfall row submitted on the pending-registration form.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRegistrationForm {
    pub po_item_id: i32,
    pub is_pending: bool,
    pub material_name: Option<String>,
    pub spec: Option<String>,
    pub brand: Option<String>,
    pub ordered_quantity: i32,
    pub received_quantity: i32,
    pub pending_quantity: i32,
    pub unit: Option<String>,
}

/// Parses the explicit pending-registration array posted from an inward's
/// shortfall view. Sentinel is `items[i][po_item_id]`; only rows with the
/// `is_pending` checkbox set are registered.
pub fn parse_pending_registrations(
    form: &FormFields,
) -> Result<Vec<PendingRegistrationForm>, ServiceError> {
    let mut rows = Vec::new();
    let mut index = 0;

    while let Some(po_item_id) = form.get_i32(&item_key(index, "po_item_id"))? {
        let ordered_quantity = form.require_i32(&item_key(index, "ordered_quantity"))?;
        let received_quantity = form.get_i32_or(&item_key(index, "received_quantity"), 0)?;
        let pending_quantity = form.require_i32(&item_key(index, "pending_quantity"))?;
        if pending_quantity < 0 || pending_quantity > ordered_quantity {
            return Err(ServiceError::ValidationError(format!(
                "Line {}: pending quantity must be between 0 and the ordered quantity",
                index
            )));
        }

        rows.push(PendingRegistrationForm {
            po_item_id,
            is_pending: form.get_checkbox(&item_key(index, "is_pending")),
            material_name: form.get_string(&item_key(index, "material_name")),
            spec: form.get_string(&item_key(index, "spec")),
            brand: form.get_string(&item_key(index, "brand")),
            ordered_quantity,
            received_quantity,
            pending_quantity,
            unit: form.get_string(&item_key(index, "unit")),
        });
        index += 1;
    }

    Ok(rows)
}

/// One batch-resolution line: the pending row id plus the quantity arriving
/// in this event.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpdateForm {
    pub pending_id: i32,
    pub quantity_received: i32,
}

/// Parses the batch-resolution array. Sentinel is `items[i][id]`.
pub fn parse_pending_updates(form: &FormFields) -> Result<Vec<PendingUpdateForm>, ServiceError> {
    let mut rows = Vec::new();
    let mut index = 0;

    while let Some(pending_id) = form.get_i32(&item_key(index, "id"))? {
        let quantity_received = form.get_i32_or(&item_key(index, "quantity_received"), 0)?;
        if quantity_received < 0 {
            return Err(ServiceError::ValidationError(format!(
                "Line {}: quantity_received must not be negative",
                index
            )));
        }

        rows.push(PendingUpdateForm {
            pending_id,
            quantity_received,
        });
        index += 1;
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stops_at_first_missing_index() {
        let form = FormFields::from_pairs([
            ("items[0][material_id]", "7"),
            ("items[0][quantity]", "10"),
            ("items[0][price]", "5.5"),
            // index 1 missing on purpose
            ("items[2][material_id]", "9"),
            ("items[2][quantity]", "3"),
        ]);

        let items = parse_po_items(&form).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].material_id, 7);
        assert_eq!(items[0].quantity, 10);
        assert_eq!(items[0].price, 5.5);
    }

    #[test]
    fn empty_sentinel_terminates_like_missing() {
        let form = FormFields::from_pairs([
            ("items[0][material_id]", "7"),
            ("items[0][quantity]", "4"),
            ("items[1][material_id]", ""),
            ("items[1][quantity]", "2"),
        ]);

        let items = parse_po_items(&form).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn missing_optional_fields_default() {
        let form = FormFields::from_pairs([("items[0][material_id]", "1")]);

        let items = parse_po_items(&form).unwrap();
        assert_eq!(items[0].quantity, 0);
        assert_eq!(items[0].price, 0.0);
        assert_eq!(items[0].material_name, None);
    }

    #[test]
    fn malformed_number_is_a_validation_error() {
        let form = FormFields::from_pairs([
            ("items[0][material_id]", "1"),
            ("items[0][quantity]", "ten"),
        ]);

        let err = parse_po_items(&form).unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }

    #[test]
    fn negative_quantity_rejected() {
        let form = FormFields::from_pairs([
            ("items[0][material_id]", "1"),
            ("items[0][quantity]", "-2"),
        ]);

        assert!(parse_po_items(&form).is_err());
    }

    #[test]
    fn inward_lines_capture_checkbox_state() {
        let form = FormFields::from_pairs([
            ("items[0][po_item_id]", "11"),
            ("items[0][received]", "on"),
            ("items[0][quantity_received]", "6"),
            ("items[1][po_item_id]", "12"),
            ("items[1][quantity_received]", "0"),
        ]);

        let lines = parse_inward_lines(&form).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].received);
        assert_eq!(lines[0].quantity_received, 6);
        assert!(!lines[1].received);
        assert_eq!(lines[1].quantity_received, 0);
    }

    #[test]
    fn pending_registration_quantities_must_be_consistent() {
        let form = FormFields::from_pairs([
            ("items[0][po_item_id]", "11"),
            ("items[0][is_pending]", "on"),
            ("items[0][ordered_quantity]", "10"),
            ("items[0][received_quantity]", "6"),
            ("items[0][pending_quantity]", "11"),
        ]);

        assert!(parse_pending_registrations(&form).is_err());
    }

    #[test]
    fn urlencoded_body_round_trips() {
        let form = FormFields::parse(
            "po_no=42&date=2025-03-09&items%5B0%5D%5Bid%5D=3&items%5B0%5D%5Bquantity_received%5D=4",
        );
        assert_eq!(form.require_i32("po_no").unwrap(), 42);
        assert_eq!(
            form.get_date("date").unwrap(),
            Some(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap())
        );

        let rows = parse_pending_updates(&form).unwrap();
        assert_eq!(rows, vec![PendingUpdateForm { pending_id: 3, quantity_received: 4 }]);
    }
}
