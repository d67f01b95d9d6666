use serde::{Deserialize, Serialize};
use std::fmt;

use super::lenient::{integral, null_as_default};
use super::Identifier;

/// Reserved classification prefix used for administrative placeholder lines
pub const RESERVED_PREFIX: &str = "98";

/// Absent numerics count as zero wherever values are aggregated.
pub fn num_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Which of the two compared documents (pedimento base or contraparte)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentSide {
    A,
    B,
}

impl fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A (pedimento)"),
            Self::B => f.write_str("B (contraparte)"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    #[default]
    General,
    #[serde(alias = "Consolidado")]
    Consolidated,
}

/// Pedimento header plus its partidas, as returned by the extraction provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub document_type: DocumentType,
    #[serde(default)]
    pub customs_office: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default, deserialize_with = "integral")]
    pub declared_item_count: Option<i64>,
    #[serde(default)]
    pub gross_weight: Option<f64>,
    #[serde(default, rename = "valueUSD")]
    pub value_usd: Option<f64>,
    #[serde(default)]
    pub package_count: Option<f64>,
    #[serde(default)]
    pub identifiers: Option<Vec<Identifier>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line_items: Vec<LineItem>,
}

/// Partida (one declared goods line)
///
/// `original_classification_code` and `rule_applied` are only ever set by the
/// Regla Octava pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(
        default,
        deserialize_with = "integral",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_number: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub classification_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sub_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub declared_unit_code: String,
    #[serde(default)]
    pub declared_quantity: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trade_unit_code: String,
    #[serde(default)]
    pub trade_quantity: Option<f64>,
    #[serde(default)]
    pub gross_weight: Option<f64>,
    #[serde(default, rename = "valueUSD")]
    pub value_usd: Option<f64>,
    #[serde(default)]
    pub package_count: Option<f64>,
    #[serde(default)]
    pub identifiers: Option<Vec<Identifier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_classification_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rule_applied: bool,
}

impl LineItem {
    /// Grouping key `fraccion-nico`. Dashes inside either code are not escaped.
    pub fn group_key(&self) -> String {
        format!("{}-{}", self.classification_code, self.sub_code)
    }

    pub fn has_reserved_code(&self) -> bool {
        self.classification_code.starts_with(RESERVED_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_or_zero_treats_absent_as_zero() {
        assert_eq!(num_or_zero(None), 0.0);
        assert_eq!(num_or_zero(Some(f64::NAN)), 0.0);
        assert_eq!(num_or_zero(Some(2.5)), 2.5);
    }

    #[test]
    fn deserializes_sparse_record() {
        let json = r#"{
            "documentType": "Consolidado",
            "customsOffice": "240",
            "lineItems": [{ "subCode": "00", "declaredQuantity": 4 }]
        }"#;
        let record: DocumentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.document_type, DocumentType::Consolidated);
        assert_eq!(record.customs_office.as_deref(), Some("240"));
        assert!(record.identifiers.is_none());
        assert_eq!(record.line_items.len(), 1);

        let item = &record.line_items[0];
        assert_eq!(item.classification_code, "");
        assert_eq!(item.declared_quantity, Some(4.0));
        assert_eq!(item.trade_quantity, None);
        assert!(!item.rule_applied);
        assert_eq!(item.group_key(), "-00");
    }

    #[test]
    fn missing_line_items_array_is_empty() {
        let record: DocumentRecord = serde_json::from_str(r#"{"referenceNumber":"1"}"#).unwrap();
        assert!(record.line_items.is_empty());
    }

    #[test]
    fn integral_floats_are_accepted_for_integers() {
        let json = r#"{
            "declaredItemCount": 3.0,
            "lineItems": [{ "itemNumber": 1.0, "classificationCode": "84713001" }]
        }"#;
        let record: DocumentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.declared_item_count, Some(3));
        assert_eq!(record.line_items[0].item_number, Some(1));

        let record: DocumentRecord =
            serde_json::from_str(r#"{"declaredItemCount": 3, "lineItems": null}"#).unwrap();
        assert_eq!(record.declared_item_count, Some(3));
        assert!(record.line_items.is_empty());
    }

    #[test]
    fn fractional_item_count_is_rejected() {
        assert!(serde_json::from_str::<DocumentRecord>(r#"{"declaredItemCount": 3.5}"#).is_err());
    }

    #[test]
    fn null_codes_fall_back_to_empty() {
        let json = r#"{"lineItems": [{
            "itemNumber": null,
            "classificationCode": null,
            "subCode": null,
            "declaredUnitCode": null,
            "tradeUnitCode": null,
            "declaredQuantity": null,
            "ruleApplied": null,
            "identifiers": [{ "key": "V1", "complement1": "A", "complement2": null }]
        }]}"#;
        let record: DocumentRecord = serde_json::from_str(json).unwrap();
        let item = &record.line_items[0];

        assert_eq!(item.item_number, None);
        assert_eq!(item.classification_code, "");
        assert_eq!(item.sub_code, "");
        assert_eq!(item.group_key(), "-");
        assert_eq!(item.declared_quantity, None);
        assert!(!item.rule_applied);
        assert_eq!(item.identifiers.as_ref().unwrap()[0].complement2, "");
    }

    #[test]
    fn value_usd_uses_upper_case_suffix() {
        let item: LineItem = serde_json::from_str(r#"{"valueUSD": 12.5}"#).unwrap();
        assert_eq!(item.value_usd, Some(12.5));
    }
}
