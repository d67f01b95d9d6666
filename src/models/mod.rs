pub mod canonical;
pub mod identifier;
pub mod lenient;
pub mod pedimento;
pub mod result;

pub use canonical::CanonicalLineItem;
pub use identifier::Identifier;
pub use pedimento::{num_or_zero, DocumentRecord, DocumentSide, DocumentType, LineItem};
pub use result::{
    AuditReport, AuditSummary, FieldComparison, FieldValue, LineItemComparison, MatchStatus,
    QuantityTotals,
};
