use serde::{Deserialize, Serialize};

use super::pedimento::{num_or_zero, RESERVED_PREFIX};
use super::{Identifier, LineItem};

/// Homogenized partida: every raw item sharing `fraccion-nico` folded into one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalLineItem {
    pub classification_code: String,
    pub sub_code: String,
    pub declared_unit_code: String,
    pub declared_quantity: f64,
    pub trade_unit_code: String,
    pub trade_quantity: f64,
    pub gross_weight: f64,
    #[serde(rename = "valueUSD")]
    pub value_usd: f64,
    pub package_count: f64,
    pub identifiers: Vec<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_classification_code: Option<String>,
    pub rule_applied: bool,
    pub merged_item_numbers: Vec<i64>,
}

impl CanonicalLineItem {
    pub fn group_key(&self) -> String {
        format!("{}-{}", self.classification_code, self.sub_code)
    }

    /// Still carries a reserved `98` code after correction (needs manual review)
    pub fn is_unresolved(&self) -> bool {
        self.classification_code.starts_with(RESERVED_PREFIX) && !self.rule_applied
    }

    /// New canonical value with `item` added to the running sums.
    ///
    /// Descriptive fields stay those of the first contributor.
    pub fn merged_with(&self, item: &LineItem) -> Self {
        let mut merged_item_numbers = self.merged_item_numbers.clone();
        merged_item_numbers.extend(item.item_number);

        Self {
            declared_quantity: self.declared_quantity + num_or_zero(item.declared_quantity),
            trade_quantity: self.trade_quantity + num_or_zero(item.trade_quantity),
            gross_weight: self.gross_weight + num_or_zero(item.gross_weight),
            value_usd: self.value_usd + num_or_zero(item.value_usd),
            package_count: self.package_count + num_or_zero(item.package_count),
            rule_applied: self.rule_applied || item.rule_applied,
            merged_item_numbers,
            ..self.clone()
        }
    }
}

impl From<&LineItem> for CanonicalLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            classification_code: item.classification_code.clone(),
            sub_code: item.sub_code.clone(),
            declared_unit_code: item.declared_unit_code.clone(),
            declared_quantity: num_or_zero(item.declared_quantity),
            trade_unit_code: item.trade_unit_code.clone(),
            trade_quantity: num_or_zero(item.trade_quantity),
            gross_weight: num_or_zero(item.gross_weight),
            value_usd: num_or_zero(item.value_usd),
            package_count: num_or_zero(item.package_count),
            identifiers: item.identifiers.clone().unwrap_or_default(),
            notes: item.notes.clone(),
            original_classification_code: item.original_classification_code.clone(),
            rule_applied: item.rule_applied,
            merged_item_numbers: item.item_number.into_iter().collect(),
        }
    }
}
