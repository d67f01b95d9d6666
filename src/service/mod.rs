pub mod auditor;
pub mod comparator;
pub mod homogenizer;
pub mod identifiers;
pub mod regla_octava;

pub use auditor::{reconcile, AuditOptions, AuditService};
pub use comparator::{compare_headers, compare_line_items, compare_line_items_with, ComparisonOptions};
pub use homogenizer::{homogenize, HomogenizedItems};
pub use identifiers::resolve_identifier;
pub use regla_octava::apply_correction_rule;
