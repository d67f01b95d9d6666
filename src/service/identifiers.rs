use crate::models::Identifier;

/// Returned when the identifier collection is absent or has no such clave
pub const NOT_AVAILABLE: &str = "N/A";

/// Composite value of the identifier `key` (case-insensitive).
///
/// Trimmed non-empty complements joined with `" | "`. A present identifier
/// whose complements are all empty yields `""`, never `"N/A"`.
pub fn resolve_identifier(identifiers: Option<&[Identifier]>, key: &str) -> String {
    let Some(found) = identifiers
        .unwrap_or_default()
        .iter()
        .find(|id| id.key.trim().eq_ignore_ascii_case(key.trim()))
    else {
        return NOT_AVAILABLE.to_string();
    };

    found
        .complements()
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}
