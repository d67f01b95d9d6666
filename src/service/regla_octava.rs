//! Regla Octava: partidas filed under the reserved `98` fracción carry the
//! real tariff classification in their observaciones. Recover it before
//! grouping so unrelated goods don't collapse onto one placeholder key.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{DocumentRecord, LineItem};

/// Minimum digits for a usable fracción
const FRACCION_LEN: usize = 8;
/// Digits needed to also recover the NICO
const FRACCION_WITH_NICO_LEN: usize = 10;

static ORIGINAL_FRACCION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:FRACCI[OÓ]N|FRACC|FRAC)\.?\s+(?:ORIGINAL|ORIG|REAL)\.?[\s:\-]*([0-9.\s\-]{8,15})",
    )
    .expect("fraccion original pattern")
});

/// Rewrites reserved-code partidas of `record` when `enabled`.
///
/// Items outside the reserved prefix are untouched, as are reserved items
/// whose notes don't yield a fracción (left unresolved for manual review).
pub fn apply_correction_rule(record: DocumentRecord, enabled: bool) -> DocumentRecord {
    if !enabled {
        return record;
    }

    DocumentRecord {
        line_items: record.line_items.into_iter().map(correct_line_item).collect(),
        ..record
    }
}

fn correct_line_item(item: LineItem) -> LineItem {
    if !item.has_reserved_code() {
        return item;
    }

    let Some(digits) = item.notes.as_deref().and_then(recover_fraccion) else {
        tracing::debug!(
            "Regla Octava: partida {:?} ({}) unresolved",
            item.item_number,
            item.classification_code
        );
        return item;
    };

    let sub_code = if digits.len() >= FRACCION_WITH_NICO_LEN {
        digits[FRACCION_LEN..FRACCION_WITH_NICO_LEN].to_string()
    } else {
        item.sub_code.clone()
    };

    tracing::debug!(
        "Regla Octava: partida {:?} {} -> {}-{}",
        item.item_number,
        item.classification_code,
        &digits[..FRACCION_LEN],
        sub_code
    );

    LineItem {
        original_classification_code: Some(item.classification_code.clone()),
        classification_code: digits[..FRACCION_LEN].to_string(),
        sub_code,
        rule_applied: true,
        ..item
    }
}

/// Digits of the fracción declared in `notes`, if at least eight were found
fn recover_fraccion(notes: &str) -> Option<String> {
    let normalized = notes.split_whitespace().collect::<Vec<_>>().join(" ");
    let captured = ORIGINAL_FRACCION_RE.captures(&normalized)?.get(1)?;

    let digits: String = captured
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    (digits.len() >= FRACCION_LEN).then_some(digits)
}
