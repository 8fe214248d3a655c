//! Company import types

use serde::{Deserialize, Serialize};

/// Raw company CSV row.
///
/// Exports from different tools disagree on header casing, so every field
/// accepts both variants via serde aliases. All fields are optional here;
/// the required-field rules live in [`CompanyRecord::from_row`].
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyRow {
    #[serde(alias = "Name")]
    pub name: Option<String>,
    #[serde(rename = "GSTNumber", alias = "GST")]
    pub gst_number: Option<String>,
    #[serde(alias = "APOB")]
    pub apob: Option<String>,
    #[serde(alias = "City")]
    pub city: Option<String>,
    #[serde(alias = "Country")]
    pub country: Option<String>,
    #[serde(alias = "Contact")]
    pub contact: Option<String>,
    #[serde(alias = "Address")]
    pub address: Option<String>,
}

/// Company insert candidate produced by the aggregator.
///
/// Only name and GST number are required to become a candidate; everything
/// else is validated by the store's column constraints at insert time.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyRecord {
    pub name: String,
    pub gst_number: String,
    pub apob: Option<String>,
    pub city: Option<String>,
    pub country: String,
    pub contact: Option<String>,
    pub address: Option<String>,
}

impl CompanyRecord {
    /// Map a CSV row to a candidate. Rows missing name or GST number are
    /// not candidates and yield `None` (skipped, not an error).
    pub fn from_row(row: CompanyRow) -> Option<Self> {
        let name = row.name.filter(|s| !s.is_empty())?;
        let gst = row.gst_number.filter(|s| !s.is_empty())?;

        Some(Self {
            name,
            gst_number: gst.to_uppercase(),
            apob: row.apob.filter(|s| !s.is_empty()),
            city: row.city.filter(|s| !s.is_empty()),
            country: row
                .country
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "India".to_string()),
            contact: row
                .contact
                .filter(|s| !s.is_empty())
                .map(|c| clean_contact(&c)),
            address: row.address.filter(|s| !s.is_empty()),
        })
    }
}

/// Normalize a contact number to the 10-digit local format.
///
/// Strips all non-digits; a value longer than 10 digits with the "91"
/// country prefix keeps only the trailing 10. Anything else is kept as the
/// stripped digits and left for the store's format check to reject.
pub fn clean_contact(contact: &str) -> String {
    let digits: String = contact.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() > 10 && digits.starts_with("91") {
        digits[digits.len() - 10..].to_string()
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: Option<&str>, gst: Option<&str>) -> CompanyRow {
        CompanyRow {
            name: name.map(String::from),
            gst_number: gst.map(String::from),
            apob: None,
            city: None,
            country: None,
            contact: None,
            address: None,
        }
    }

    #[test]
    fn test_clean_contact_ten_digits_unchanged() {
        assert_eq!(clean_contact("9876543210"), "9876543210");
    }

    #[test]
    fn test_clean_contact_strips_country_prefix() {
        assert_eq!(clean_contact("919876543210"), "9876543210");
        assert_eq!(clean_contact("+91 98765 43210"), "9876543210");
    }

    #[test]
    fn test_clean_contact_short_value_kept_as_is() {
        // Not 10 digits - left for downstream validation to reject
        assert_eq!(clean_contact("12345"), "12345");
    }

    #[test]
    fn test_clean_contact_strips_formatting() {
        assert_eq!(clean_contact("98765-43210"), "9876543210");
    }

    #[test]
    fn test_from_row_requires_name_and_gst() {
        assert!(CompanyRecord::from_row(row(None, Some("27ABCDE1234F1Z5"))).is_none());
        assert!(CompanyRecord::from_row(row(Some("Acme Exports"), None)).is_none());
        assert!(CompanyRecord::from_row(row(Some(""), Some("27ABCDE1234F1Z5"))).is_none());
        assert!(CompanyRecord::from_row(row(Some("Acme Exports"), Some("27ABCDE1234F1Z5"))).is_some());
    }

    #[test]
    fn test_from_row_uppercases_gst() {
        let record = CompanyRecord::from_row(row(Some("Acme Exports"), Some("27abcde1234f1z5"))).unwrap();
        assert_eq!(record.gst_number, "27ABCDE1234F1Z5");
    }

    #[test]
    fn test_from_row_defaults_country_to_india() {
        let record = CompanyRecord::from_row(row(Some("Acme Exports"), Some("27ABCDE1234F1Z5"))).unwrap();
        assert_eq!(record.country, "India");

        let mut with_country = row(Some("Acme Exports"), Some("27ABCDE1234F1Z5"));
        with_country.country = Some("Nepal".to_string());
        let record = CompanyRecord::from_row(with_country).unwrap();
        assert_eq!(record.country, "Nepal");
    }

    #[test]
    fn test_from_row_normalizes_contact() {
        let mut r = row(Some("Acme Exports"), Some("27ABCDE1234F1Z5"));
        r.contact = Some("919876543210".to_string());
        let record = CompanyRecord::from_row(r).unwrap();
        assert_eq!(record.contact.as_deref(), Some("9876543210"));
    }
}
