use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::AuditError;
use crate::extraction::{Document, Extractor};
use crate::models::{
    AuditReport, AuditSummary, DocumentRecord, DocumentSide, MatchStatus, QuantityTotals,
};
use crate::service::comparator::{compare_headers, compare_line_items_with, ComparisonOptions};
use crate::service::homogenizer::{homogenize, HomogenizedItems};
use crate::service::regla_octava::apply_correction_rule;

/// Per-run switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditOptions {
    pub regla_octava: bool,
    pub strict_unit_codes: bool,
}

/// Full cotejo of two already-extracted records.
///
/// Regla Octava (when enabled) runs identically on both sides before grouping.
pub fn reconcile(a: DocumentRecord, b: DocumentRecord, options: AuditOptions) -> AuditReport {
    let a = apply_correction_rule(a, options.regla_octava);
    let b = apply_correction_rule(b, options.regla_octava);

    let headers = compare_headers(&a, &b);

    let map_a = homogenize(&a);
    let map_b = homogenize(&b);
    log_unresolved(DocumentSide::A, &map_a);
    log_unresolved(DocumentSide::B, &map_b);

    let line_items = compare_line_items_with(
        &map_a,
        &map_b,
        ComparisonOptions {
            strict_unit_codes: options.strict_unit_codes,
        },
    );

    let summary = AuditSummary {
        header_mismatches: headers
            .iter()
            .filter(|h| h.status == MatchStatus::Mismatch)
            .count(),
        line_item_discrepancies: line_items.iter().filter(|c| c.has_discrepancy).count(),
        unresolved_a: map_a.values().filter(|i| i.is_unresolved()).count(),
        unresolved_b: map_b.values().filter(|i| i.is_unresolved()).count(),
        corrected_a: map_a.values().filter(|i| i.rule_applied).count(),
        corrected_b: map_b.values().filter(|i| i.rule_applied).count(),
    };

    tracing::info!(
        "Cotejo complete: {} header mismatches, {} of {} partidas with discrepancies",
        summary.header_mismatches,
        summary.line_item_discrepancies,
        line_items.len()
    );

    AuditReport {
        generated_at: Utc::now(),
        totals: QuantityTotals::from_comparisons(&line_items),
        headers,
        line_items,
        summary,
    }
}

fn log_unresolved(side: DocumentSide, items: &HomogenizedItems) {
    for (key, item) in items.iter().filter(|(_, i)| i.is_unresolved()) {
        tracing::warn!(
            "Document {}: partida {} ({:?}) keeps reserved fracción, needs manual review",
            side,
            key,
            item.merged_item_numbers
        );
    }
}

/// Extracts both documents concurrently, then reconciles them
pub struct AuditService {
    extractor: Arc<dyn Extractor>,
    defaults: AuditOptions,
}

impl AuditService {
    pub fn new(extractor: Arc<dyn Extractor>, defaults: AuditOptions) -> Self {
        Self {
            extractor,
            defaults,
        }
    }

    pub fn defaults(&self) -> AuditOptions {
        self.defaults
    }

    /// Any extraction failure aborts the run; the engine never sees a partial pair.
    pub async fn audit_documents(
        &self,
        doc_a: &Document,
        doc_b: &Document,
        options: AuditOptions,
    ) -> Result<AuditReport, AuditError> {
        tracing::info!(
            "Starting cotejo: A={} B={} (regla octava: {})",
            doc_a.file_name.as_deref().unwrap_or("-"),
            doc_b.file_name.as_deref().unwrap_or("-"),
            options.regla_octava
        );

        let (record_a, record_b) = futures::try_join!(
            self.extract(DocumentSide::A, doc_a),
            self.extract(DocumentSide::B, doc_b)
        )?;

        Ok(reconcile(record_a, record_b, options))
    }

    pub fn audit_records(
        &self,
        record_a: DocumentRecord,
        record_b: DocumentRecord,
        options: AuditOptions,
    ) -> AuditReport {
        reconcile(record_a, record_b, options)
    }

    async fn extract(
        &self,
        side: DocumentSide,
        document: &Document,
    ) -> Result<DocumentRecord, AuditError> {
        match self.extractor.extract(document).await {
            Ok(record) => {
                tracing::info!(
                    "Document {} extracted: {} partidas",
                    side,
                    record.line_items.len()
                );
                Ok(record)
            }
            Err(source) => {
                tracing::error!("Document {} extraction failed: {}", side, source);
                Err(AuditError::Extraction { side, source })
            }
        }
    }
}
