use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::CanonicalLineItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Match,
    Mismatch,
}

/// Header value as read from one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Missing,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Missing => Ok(()),
        }
    }
}

/// Header comparison row (one per compared field)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldComparison {
    pub field: String,
    pub value_a: FieldValue,
    pub value_b: FieldValue,
    pub status: MatchStatus,
}

/// Partida comparison row (one per group key present in either document)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemComparison {
    pub group_key: String,
    pub item_a: Option<CanonicalLineItem>,
    pub item_b: Option<CanonicalLineItem>,
    pub has_discrepancy: bool,
    /// UMC/UMT codes differ; advisory unless strict unit comparison is on
    pub unit_code_mismatch: bool,
}

/// Totales row: canonical quantities summed per side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityTotals {
    pub declared_quantity_a: f64,
    pub trade_quantity_a: f64,
    pub declared_quantity_b: f64,
    pub trade_quantity_b: f64,
}

impl QuantityTotals {
    pub fn from_comparisons(comparisons: &[LineItemComparison]) -> Self {
        comparisons.iter().fold(Self::default(), |totals, c| Self {
            declared_quantity_a: totals.declared_quantity_a
                + c.item_a.as_ref().map_or(0.0, |i| i.declared_quantity),
            trade_quantity_a: totals.trade_quantity_a
                + c.item_a.as_ref().map_or(0.0, |i| i.trade_quantity),
            declared_quantity_b: totals.declared_quantity_b
                + c.item_b.as_ref().map_or(0.0, |i| i.declared_quantity),
            trade_quantity_b: totals.trade_quantity_b
                + c.item_b.as_ref().map_or(0.0, |i| i.trade_quantity),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub header_mismatches: usize,
    pub line_item_discrepancies: usize,
    /// Canonical items still on a reserved `98` code
    pub unresolved_a: usize,
    pub unresolved_b: usize,
    /// Canonical items rewritten by Regla Octava
    pub corrected_a: usize,
    pub corrected_b: usize,
}

impl AuditSummary {
    pub fn is_clean(&self) -> bool {
        self.header_mismatches == 0 && self.line_item_discrepancies == 0
    }
}

/// Full cotejo result handed to presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub headers: Vec<FieldComparison>,
    pub line_items: Vec<LineItemComparison>,
    pub totals: QuantityTotals,
    pub summary: AuditSummary,
}
