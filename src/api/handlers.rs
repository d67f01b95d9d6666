use crate::error::AuditError;
use crate::extraction::Document;
use crate::models::{AuditReport, DocumentRecord};
use crate::report::write_line_items_csv;
use crate::service::{AuditOptions, AuditService};
use axum::{
    extract::{rejection::JsonRejection, Json, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body: two already-extracted records
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsAuditRequest {
    pub record_a: DocumentRecord,
    pub record_b: DocumentRecord,
    pub regla_octava: Option<bool>,
    pub strict_units: Option<bool>,
}

/// Response body
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditResponse {
    pub success: bool,
    pub message: String,
    pub report: Option<AuditReport>,
}

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

fn options_with(
    defaults: AuditOptions,
    regla_octava: Option<bool>,
    strict_units: Option<bool>,
) -> AuditOptions {
    AuditOptions {
        regla_octava: regla_octava.unwrap_or(defaults.regla_octava),
        strict_unit_codes: strict_units.unwrap_or(defaults.strict_unit_codes),
    }
}

fn success_response(report: AuditReport) -> Response {
    let response = AuditResponse {
        success: true,
        message: format!(
            "Cotejo complete: {} header mismatches, {} partidas with discrepancies",
            report.summary.header_mismatches, report.summary.line_item_discrepancies
        ),
        report: Some(report),
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn error_response(e: AuditError) -> Response {
    let status = match &e {
        AuditError::Extraction { .. } => StatusCode::BAD_GATEWAY,
        AuditError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AuditError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let response = AuditResponse {
        success: false,
        message: format!("Error: {}", e),
        report: None,
    };
    (status, Json(response)).into_response()
}

fn parse_flag(name: &str, value: &str) -> Result<bool, AuditError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" | "" => Ok(false),
        other => Err(AuditError::InvalidInput(format!(
            "field '{name}' must be true or false, got '{other}'"
        ))),
    }
}

/// Upload form: `file_a`, `file_b` and optional `regla_octava` / `strict_units`
struct UploadForm {
    file_a: Option<Document>,
    file_b: Option<Document>,
    regla_octava: Option<bool>,
    strict_units: Option<bool>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AuditError> {
    let mut form = UploadForm {
        file_a: None,
        file_b: None,
        regla_octava: None,
        strict_units: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AuditError::InvalidInput(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file_a" | "file_b" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AuditError::InvalidInput(format!("cannot read {name}: {e}")))?;
                if bytes.is_empty() {
                    return Err(AuditError::InvalidInput(format!("{name} is empty")));
                }
                let doc = Document::new(bytes.to_vec(), file_name, content_type.as_deref());
                if name == "file_a" {
                    form.file_a = Some(doc);
                } else {
                    form.file_b = Some(doc);
                }
            }
            "regla_octava" | "strict_units" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AuditError::InvalidInput(e.to_string()))?;
                let flag = Some(parse_flag(&name, &text)?);
                if name == "regla_octava" {
                    form.regla_octava = flag;
                } else {
                    form.strict_units = flag;
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Cotejo of two uploaded pedimentos (extraction + reconciliation)
pub async fn audit_upload(
    State(service): State<Arc<AuditService>>,
    multipart: Multipart,
) -> Response {
    let form = match read_upload_form(multipart).await {
        Ok(form) => form,
        Err(e) => return error_response(e),
    };

    let (Some(doc_a), Some(doc_b)) = (form.file_a, form.file_b) else {
        return error_response(AuditError::InvalidInput(
            "both file_a and file_b are required".to_string(),
        ));
    };

    let options = options_with(service.defaults(), form.regla_octava, form.strict_units);
    match service.audit_documents(&doc_a, &doc_b, options).await {
        Ok(report) => success_response(report),
        Err(e) => error_response(e),
    }
}

/// Cotejo of two records that were extracted elsewhere
pub async fn audit_records(
    State(service): State<Arc<AuditService>>,
    payload: Result<Json<RecordsAuditRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(AuditError::InvalidInput(rejection.body_text())),
    };
    let options = options_with(service.defaults(), req.regla_octava, req.strict_units);
    success_response(service.audit_records(req.record_a, req.record_b, options))
}

/// Partidas comparison of two records as CSV
pub async fn audit_records_csv(
    State(service): State<Arc<AuditService>>,
    payload: Result<Json<RecordsAuditRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(AuditError::InvalidInput(rejection.body_text())),
    };
    let options = options_with(service.defaults(), req.regla_octava, req.strict_units);
    let report = service.audit_records(req.record_a, req.record_b, options);

    match write_line_items_csv(&report.line_items) {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("regla_octava", " TRUE ").unwrap());
        assert!(parse_flag("regla_octava", "on").unwrap());
        assert!(!parse_flag("regla_octava", "0").unwrap());
        assert!(parse_flag("regla_octava", "quizas").is_err());
    }

    #[test]
    fn request_flags_override_defaults() {
        let defaults = AuditOptions {
            regla_octava: true,
            strict_unit_codes: false,
        };
        let options = options_with(defaults, None, Some(true));
        assert!(options.regla_octava);
        assert!(options.strict_unit_codes);
        assert!(!options_with(defaults, Some(false), None).regla_octava);
    }
}
