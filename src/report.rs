use serde::Serialize;

use crate::error::AuditError;
use crate::models::{CanonicalLineItem, LineItemComparison};

/// One CSV line of the partidas comparison
#[derive(Debug, Serialize)]
struct LineItemRow<'a> {
    #[serde(rename = "Partida")]
    index: usize,
    #[serde(rename = "Clave")]
    group_key: &'a str,
    #[serde(rename = "Partidas A")]
    items_a: Option<String>,
    #[serde(rename = "Fraccion A")]
    fraccion_a: Option<&'a str>,
    #[serde(rename = "NICO A")]
    nico_a: Option<&'a str>,
    #[serde(rename = "UMC A")]
    umc_a: Option<&'a str>,
    #[serde(rename = "Cant. UMC A")]
    cantidad_umc_a: Option<f64>,
    #[serde(rename = "UMT A")]
    umt_a: Option<&'a str>,
    #[serde(rename = "Cant. UMT A")]
    cantidad_umt_a: Option<f64>,
    #[serde(rename = "Partidas B")]
    items_b: Option<String>,
    #[serde(rename = "Fraccion B")]
    fraccion_b: Option<&'a str>,
    #[serde(rename = "NICO B")]
    nico_b: Option<&'a str>,
    #[serde(rename = "UMC B")]
    umc_b: Option<&'a str>,
    #[serde(rename = "Cant. UMC B")]
    cantidad_umc_b: Option<f64>,
    #[serde(rename = "UMT B")]
    umt_b: Option<&'a str>,
    #[serde(rename = "Cant. UMT B")]
    cantidad_umt_b: Option<f64>,
    #[serde(rename = "Diferencia")]
    has_discrepancy: bool,
    #[serde(rename = "Unidades distintas")]
    unit_code_mismatch: bool,
}

fn item_numbers(item: &CanonicalLineItem) -> String {
    item.merged_item_numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl<'a> LineItemRow<'a> {
    fn new(index: usize, c: &'a LineItemComparison) -> Self {
        let a = c.item_a.as_ref();
        let b = c.item_b.as_ref();
        Self {
            index,
            group_key: &c.group_key,
            items_a: a.map(item_numbers),
            fraccion_a: a.map(|i| i.classification_code.as_str()),
            nico_a: a.map(|i| i.sub_code.as_str()),
            umc_a: a.map(|i| i.declared_unit_code.as_str()),
            cantidad_umc_a: a.map(|i| i.declared_quantity),
            umt_a: a.map(|i| i.trade_unit_code.as_str()),
            cantidad_umt_a: a.map(|i| i.trade_quantity),
            items_b: b.map(item_numbers),
            fraccion_b: b.map(|i| i.classification_code.as_str()),
            nico_b: b.map(|i| i.sub_code.as_str()),
            umc_b: b.map(|i| i.declared_unit_code.as_str()),
            cantidad_umc_b: b.map(|i| i.declared_quantity),
            umt_b: b.map(|i| i.trade_unit_code.as_str()),
            cantidad_umt_b: b.map(|i| i.trade_quantity),
            has_discrepancy: c.has_discrepancy,
            unit_code_mismatch: c.unit_code_mismatch,
        }
    }
}

/// Partidas comparison as CSV, rows numbered from 1 in report order.
pub fn write_line_items_csv(comparisons: &[LineItemComparison]) -> Result<String, AuditError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (idx, comparison) in comparisons.iter().enumerate() {
        writer.serialize(LineItemRow::new(idx + 1, comparison))?;
    }
    writer.flush().map_err(|e| AuditError::Export(e.to_string()))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| AuditError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AuditError::Export(e.to_string()))
}
