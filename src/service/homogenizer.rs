use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::models::{CanonicalLineItem, DocumentRecord};

/// Homogenized partidas keyed by `fraccion-nico`, in first-seen order
pub type HomogenizedItems = IndexMap<String, CanonicalLineItem>;

/// Groups the raw partidas of `record` by fracción + NICO.
///
/// Quantities, value, weight and bultos are summed, item numbers collected and
/// `rule_applied` OR-ed across contributors.
pub fn homogenize(record: &DocumentRecord) -> HomogenizedItems {
    record
        .line_items
        .iter()
        .fold(HomogenizedItems::new(), |mut groups, item| {
            match groups.entry(item.group_key()) {
                Entry::Occupied(mut slot) => {
                    let merged = slot.get().merged_with(item);
                    slot.insert(merged);
                }
                Entry::Vacant(slot) => {
                    slot.insert(CanonicalLineItem::from(item));
                }
            }
            groups
        })
}
