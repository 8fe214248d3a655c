//! Proforma invoice (PI) types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw PI CSV row - one row per line item, flattened.
#[derive(Debug, Clone, Deserialize)]
pub struct PiRow {
    pub company_code: Option<String>,
    pub company_name: Option<String>,
    pub voucher_no: Option<String>,
    pub date: Option<String>,
    pub consignee: Option<String>,
    pub buyer: Option<String>,
    pub status: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub hsn_sac: Option<String>,
    pub made_in: Option<String>,
    pub quantity: Option<String>,
    pub rate: Option<String>,
}

/// PI workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PiStatus {
    Draft,
    Pending,
    Approved,
    Cancelled,
}

impl PiStatus {
    pub fn parse(s: &str) -> Option<PiStatus> {
        match s {
            "Draft" => Some(PiStatus::Draft),
            "Pending" => Some(PiStatus::Pending),
            "Approved" => Some(PiStatus::Approved),
            "Cancelled" => Some(PiStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PiStatus::Draft => "Draft",
            PiStatus::Pending => "Pending",
            PiStatus::Approved => "Approved",
            PiStatus::Cancelled => "Cancelled",
        }
    }
}

/// One PI line item. Owned by its parent document, no identity of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiItem {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub hsn_sac: Option<String>,
    pub made_in: Option<String>,
    pub quantity: f64,
    pub rate: f64,
}

impl PiItem {
    pub fn from_row(row: &PiRow) -> Self {
        Self {
            product_id: row.product_id.clone(),
            product_name: row.product_name.clone(),
            sku: row.sku.clone(),
            category: row.category.clone(),
            brand: row.brand.clone(),
            hsn_sac: row.hsn_sac.clone(),
            made_in: row.made_in.clone(),
            quantity: parse_number(row.quantity.as_deref()),
            rate: parse_number(row.rate.as_deref()),
        }
    }
}

/// PI aggregate document. Assembled from all CSV rows sharing one voucher.
///
/// `total_quantity` and `total_amount` are derived sums over `items`;
/// [`PiDocument::push_item`] is the only place they change.
#[derive(Debug, Clone, Serialize)]
pub struct PiDocument {
    pub company_id: Uuid,
    pub voucher_no: String,
    pub date: Option<NaiveDate>,
    pub consignee: Option<String>,
    pub buyer: Option<String>,
    pub status: PiStatus,
    pub items: Vec<PiItem>,
    pub total_quantity: f64,
    pub total_amount: f64,
}

impl PiDocument {
    /// Open a new document for a voucher from its first row. Header fields
    /// (date, consignee, buyer, status) come from that first row; later rows
    /// only contribute items.
    pub fn open(company_id: Uuid, voucher_no: String, row: &PiRow) -> Self {
        Self {
            company_id,
            voucher_no,
            date: row.date.as_deref().and_then(parse_date),
            consignee: row.consignee.clone(),
            buyer: row.buyer.clone(),
            status: row
                .status
                .as_deref()
                .and_then(PiStatus::parse)
                .unwrap_or(PiStatus::Draft),
            items: Vec::new(),
            total_quantity: 0.0,
            total_amount: 0.0,
        }
    }

    /// Append an item and roll its quantity and amount into the totals.
    pub fn push_item(&mut self, item: PiItem) {
        self.total_quantity += item.quantity;
        self.total_amount += item.quantity * item.rate;
        self.items.push(item);
    }
}

/// Lenient numeric parse: absent or non-numeric values become 0.
fn parse_number(s: Option<&str>) -> f64 {
    s.and_then(|v| v.trim().parse::<f64>().ok()).unwrap_or(0.0)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    // Try YYYY-MM-DD
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    // Try DD.MM.YYYY
    if let Ok(date) = NaiveDate::parse_from_str(s, "%d.%m.%Y") {
        return Some(date);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, rate: f64) -> PiItem {
        PiItem {
            product_id: None,
            product_name: Some("Widget".to_string()),
            sku: Some("W-1".to_string()),
            category: None,
            brand: None,
            hsn_sac: Some("8479".to_string()),
            made_in: None,
            quantity,
            rate,
        }
    }

    fn first_row() -> PiRow {
        PiRow {
            company_code: Some("C1".to_string()),
            company_name: Some("Acme Exports".to_string()),
            voucher_no: Some("V1".to_string()),
            date: Some("2023-10-01".to_string()),
            consignee: Some("Consignee A".to_string()),
            buyer: Some("Buyer A".to_string()),
            status: None,
            product_id: None,
            product_name: Some("Widget".to_string()),
            sku: Some("W-1".to_string()),
            category: None,
            brand: None,
            hsn_sac: Some("8479".to_string()),
            made_in: Some("India".to_string()),
            quantity: Some("10".to_string()),
            rate: Some("100".to_string()),
        }
    }

    #[test]
    fn test_push_item_maintains_totals() {
        let mut doc = PiDocument::open(Uuid::new_v4(), "V1".to_string(), &first_row());
        doc.push_item(item(10.0, 100.0));
        doc.push_item(item(5.0, 20.0));

        assert_eq!(doc.items.len(), 2);
        assert_eq!(doc.total_quantity, 15.0);
        assert_eq!(doc.total_amount, 10.0 * 100.0 + 5.0 * 20.0);
    }

    #[test]
    fn test_status_defaults_to_draft() {
        let doc = PiDocument::open(Uuid::new_v4(), "V1".to_string(), &first_row());
        assert_eq!(doc.status, PiStatus::Draft);

        let mut row = first_row();
        row.status = Some("Approved".to_string());
        let doc = PiDocument::open(Uuid::new_v4(), "V1".to_string(), &row);
        assert_eq!(doc.status, PiStatus::Approved);

        row.status = Some("garbage".to_string());
        let doc = PiDocument::open(Uuid::new_v4(), "V1".to_string(), &row);
        assert_eq!(doc.status, PiStatus::Draft);
    }

    #[test]
    fn test_parse_number_defaults_to_zero() {
        assert_eq!(parse_number(Some("10.5")), 10.5);
        assert_eq!(parse_number(Some("abc")), 0.0);
        assert_eq!(parse_number(Some("")), 0.0);
        assert_eq!(parse_number(None), 0.0);
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(
            parse_date("2023-10-01"),
            NaiveDate::from_ymd_opt(2023, 10, 1)
        );
        assert_eq!(
            parse_date("01.10.2023"),
            NaiveDate::from_ymd_opt(2023, 10, 1)
        );
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_item_from_row_parses_numbers_leniently() {
        let mut row = first_row();
        row.quantity = Some("oops".to_string());
        row.rate = None;
        let item = PiItem::from_row(&row);
        assert_eq!(item.quantity, 0.0);
        assert_eq!(item.rate, 0.0);
    }
}
