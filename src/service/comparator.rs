use serde::{Deserialize, Serialize};

use crate::models::{
    CanonicalLineItem, DocumentRecord, FieldComparison, FieldValue, LineItemComparison,
    MatchStatus,
};
use crate::service::homogenizer::HomogenizedItems;
use crate::service::identifiers::resolve_identifier;

/// Tolerance for counts (bultos, número de partidas)
pub const COUNT_TOLERANCE: f64 = 0.1;
/// Tolerance for every other numeric comparison
pub const AMOUNT_TOLERANCE: f64 = 0.01;

/// One compared header concept; `tolerance` is set only for numeric fields
struct HeaderField {
    name: &'static str,
    read: fn(&DocumentRecord) -> FieldValue,
    tolerance: Option<f64>,
}

fn text(value: &Option<String>) -> FieldValue {
    value.clone().map_or(FieldValue::Missing, FieldValue::Text)
}

fn number(value: Option<f64>) -> FieldValue {
    value.map_or(FieldValue::Missing, FieldValue::Number)
}

const HEADER_FIELDS: &[HeaderField] = &[
    HeaderField {
        name: "Aduana",
        read: |d| text(&d.customs_office),
        tolerance: None,
    },
    HeaderField {
        name: "Patente",
        read: |d| text(&d.license_number),
        tolerance: None,
    },
    HeaderField {
        name: "Pedimento",
        read: |d| text(&d.reference_number),
        tolerance: None,
    },
    HeaderField {
        name: "Partidas",
        read: |d| number(d.declared_item_count.map(|n| n as f64)),
        tolerance: Some(COUNT_TOLERANCE),
    },
    HeaderField {
        name: "Peso Bruto",
        read: |d| number(d.gross_weight),
        tolerance: Some(AMOUNT_TOLERANCE),
    },
    HeaderField {
        name: "Valor Dlls",
        read: |d| number(d.value_usd),
        tolerance: Some(AMOUNT_TOLERANCE),
    },
    HeaderField {
        name: "Bultos",
        read: |d| number(d.package_count),
        tolerance: Some(COUNT_TOLERANCE),
    },
    HeaderField {
        name: "V1 (Identificador)",
        read: |d| FieldValue::Text(resolve_identifier(d.identifiers.as_deref(), "V1")),
        tolerance: None,
    },
    HeaderField {
        name: "IM (Identificador)",
        read: |d| FieldValue::Text(resolve_identifier(d.identifiers.as_deref(), "IM")),
        tolerance: None,
    },
];

fn header_status(a: &FieldValue, b: &FieldValue, tolerance: Option<f64>) -> MatchStatus {
    let matches = match (a, b, tolerance) {
        (FieldValue::Missing, _, _) | (_, FieldValue::Missing, _) => false,
        (FieldValue::Number(x), FieldValue::Number(y), Some(tol)) => (x - y).abs() <= tol,
        _ => a.to_string().trim().to_lowercase() == b.to_string().trim().to_lowercase(),
    };

    if matches {
        MatchStatus::Match
    } else {
        MatchStatus::Mismatch
    }
}

/// Encabezado comparison, one row per field in fixed order.
pub fn compare_headers(a: &DocumentRecord, b: &DocumentRecord) -> Vec<FieldComparison> {
    HEADER_FIELDS
        .iter()
        .map(|field| {
            let value_a = (field.read)(a);
            let value_b = (field.read)(b);
            let status = header_status(&value_a, &value_b, field.tolerance);
            FieldComparison {
                field: field.name.to_string(),
                value_a,
                value_b,
                status,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOptions {
    /// Count UMC/UMT code differences as discrepancies
    pub strict_unit_codes: bool,
}

/// Partida comparison with default options (unit codes advisory)
pub fn compare_line_items(
    map_a: &HomogenizedItems,
    map_b: &HomogenizedItems,
) -> Vec<LineItemComparison> {
    compare_line_items_with(map_a, map_b, ComparisonOptions::default())
}

/// Pairs canonical partidas by key: keys of `map_a` in order, then keys only
/// present in `map_b`. A one-sided key is always a discrepancy.
pub fn compare_line_items_with(
    map_a: &HomogenizedItems,
    map_b: &HomogenizedItems,
    options: ComparisonOptions,
) -> Vec<LineItemComparison> {
    let keys = map_a
        .keys()
        .chain(map_b.keys().filter(|k| !map_a.contains_key(*k)));

    keys.map(|key| {
        let item_a = map_a.get(key);
        let item_b = map_b.get(key);

        let (has_discrepancy, unit_code_mismatch) = match (item_a, item_b) {
            (Some(a), Some(b)) => {
                let units = units_differ(a, b);
                (
                    values_differ(a, b) || (options.strict_unit_codes && units),
                    units,
                )
            }
            _ => (true, false),
        };

        LineItemComparison {
            group_key: key.clone(),
            item_a: item_a.cloned(),
            item_b: item_b.cloned(),
            has_discrepancy,
            unit_code_mismatch,
        }
    })
    .collect()
}

fn values_differ(a: &CanonicalLineItem, b: &CanonicalLineItem) -> bool {
    a.classification_code != b.classification_code
        || a.sub_code != b.sub_code
        || (a.declared_quantity - b.declared_quantity).abs() > AMOUNT_TOLERANCE
        || (a.trade_quantity - b.trade_quantity).abs() > AMOUNT_TOLERANCE
}

fn units_differ(a: &CanonicalLineItem, b: &CanonicalLineItem) -> bool {
    a.declared_unit_code != b.declared_unit_code || a.trade_unit_code != b.trade_unit_code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Identifier, LineItem};
    use crate::service::homogenizer::homogenize;

    fn header(packages: f64, weight: f64) -> DocumentRecord {
        DocumentRecord {
            customs_office: Some("240".into()),
            license_number: Some("3420".into()),
            reference_number: Some("5001234".into()),
            declared_item_count: Some(3),
            gross_weight: Some(weight),
            value_usd: Some(1500.0),
            package_count: Some(packages),
            identifiers: Some(vec![
                Identifier::new("V1", "ABC", "", "123"),
                Identifier::new("IM", "X", "", ""),
            ]),
            ..DocumentRecord::default()
        }
    }

    fn status_of(rows: &[FieldComparison], field: &str) -> MatchStatus {
        rows.iter().find(|r| r.field == field).unwrap().status
    }

    #[test]
    fn headers_in_fixed_order() {
        let rows = compare_headers(&header(100.0, 50.0), &header(100.0, 50.0));
        let names: Vec<_> = rows.iter().map(|r| r.field.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Aduana",
                "Patente",
                "Pedimento",
                "Partidas",
                "Peso Bruto",
                "Valor Dlls",
                "Bultos",
                "V1 (Identificador)",
                "IM (Identificador)",
            ]
        );
        assert!(rows.iter().all(|r| r.status == MatchStatus::Match));
        assert_eq!(rows[7].value_a, FieldValue::Text("ABC | 123".into()));
    }

    #[test]
    fn package_count_tolerance_boundary() {
        let base = header(100.0, 50.0);
        let rows = compare_headers(&base, &header(100.1, 50.0));
        assert_eq!(status_of(&rows, "Bultos"), MatchStatus::Match);

        let rows = compare_headers(&base, &header(100.2, 50.0));
        assert_eq!(status_of(&rows, "Bultos"), MatchStatus::Mismatch);
    }

    #[test]
    fn weight_uses_amount_tolerance() {
        let base = header(100.0, 50.0);
        assert_eq!(
            status_of(&compare_headers(&base, &header(100.0, 50.005)), "Peso Bruto"),
            MatchStatus::Match
        );
        assert_eq!(
            status_of(&compare_headers(&base, &header(100.0, 50.05)), "Peso Bruto"),
            MatchStatus::Mismatch
        );
    }

    #[test]
    fn only_numeric_fields_carry_a_tolerance() {
        for field in HEADER_FIELDS {
            let numeric = matches!(
                (field.read)(&header(1.0, 1.0)),
                FieldValue::Number(_)
            );
            assert_eq!(field.tolerance.is_some(), numeric, "{}", field.name);
        }
    }

    #[test]
    fn text_fields_ignore_case_and_padding() {
        let a = header(1.0, 1.0);
        let mut b = header(1.0, 1.0);
        b.reference_number = Some("  5001234 ".into());
        b.identifiers = Some(vec![
            Identifier::new("v1", "abc", "", "123"),
            Identifier::new("im", "x", "", ""),
        ]);
        b.customs_office = Some("241".into());

        let rows = compare_headers(&a, &b);
        assert_eq!(status_of(&rows, "Pedimento"), MatchStatus::Match);
        assert_eq!(status_of(&rows, "V1 (Identificador)"), MatchStatus::Match);
        assert_eq!(status_of(&rows, "Aduana"), MatchStatus::Mismatch);
    }

    #[test]
    fn missing_header_value_is_mismatch() {
        let a = header(1.0, 1.0);
        let mut b = header(1.0, 1.0);
        b.license_number = None;
        b.gross_weight = None;
        b.identifiers = None;

        let rows = compare_headers(&a, &b);
        assert_eq!(rows.len(), 9);
        assert_eq!(status_of(&rows, "Patente"), MatchStatus::Mismatch);
        assert_eq!(status_of(&rows, "Peso Bruto"), MatchStatus::Mismatch);
        assert_eq!(rows[7].value_b, FieldValue::Text("N/A".into()));
        assert_eq!(status_of(&rows, "V1 (Identificador)"), MatchStatus::Mismatch);
    }

    fn single(code: &str, nico: &str, qty: f64, umc: &str) -> HomogenizedItems {
        homogenize(&DocumentRecord {
            line_items: vec![LineItem {
                classification_code: code.into(),
                sub_code: nico.into(),
                declared_unit_code: umc.into(),
                declared_quantity: Some(qty),
                trade_unit_code: "1".into(),
                trade_quantity: Some(qty),
                ..LineItem::default()
            }],
            ..DocumentRecord::default()
        })
    }

    #[test]
    fn quantities_within_tolerance_match() {
        let a = single("1234.56", "00", 10.0, "6");

        let rows = compare_line_items(&a, &single("1234.56", "00", 10.005, "6"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].group_key, "1234.56-00");
        assert!(!rows[0].has_discrepancy);

        let rows = compare_line_items(&a, &single("1234.56", "00", 10.02, "6"));
        assert!(rows[0].has_discrepancy);
    }

    #[test]
    fn one_sided_keys_are_discrepant() {
        let a = single("84713001", "00", 1.0, "6");
        let b = single("39269099", "00", 1.0, "6");
        let rows = compare_line_items(&a, &b);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].group_key, "84713001-00");
        assert!(rows[0].item_b.is_none());
        assert_eq!(rows[1].group_key, "39269099-00");
        assert!(rows[1].item_a.is_none());
        assert!(rows.iter().all(|r| r.has_discrepancy));
    }

    #[test]
    fn unit_codes_are_advisory_unless_strict() {
        let a = single("84713001", "00", 1.0, "6");
        let b = single("84713001", "00", 1.0, "1");

        let rows = compare_line_items(&a, &b);
        assert!(!rows[0].has_discrepancy);
        assert!(rows[0].unit_code_mismatch);

        let strict = ComparisonOptions {
            strict_unit_codes: true,
        };
        assert!(compare_line_items_with(&a, &b, strict)[0].has_discrepancy);
    }

    #[test]
    fn empty_maps_give_empty_report() {
        assert!(compare_line_items(&HomogenizedItems::new(), &HomogenizedItems::new()).is_empty());
    }
}
