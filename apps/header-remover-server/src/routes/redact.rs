//! Header removal endpoint
//!
//! `POST /remove-headers` takes a multipart form:
//! - `file`: the PDF (`application/pdf` or `application/octet-stream`)
//! - `header_texts`: header strings, one per line
//! - `band_mm`, `margin_mm`, `ignore_case`: optional overrides
//!
//! and answers with the redacted PDF as an attachment.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::redact::{self, RedactionOptions};
use crate::state::AppState;

/// Content types accepted for the `file` field
const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["application/pdf", "application/octet-stream"];

/// Create the redaction router
pub fn router() -> Router<AppState> {
    Router::new().route("/remove-headers", post(remove_headers))
}

struct UploadedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

/// Raw form fields as received
#[derive(Default)]
struct RemoveHeadersForm {
    file: Option<UploadedFile>,
    header_texts: Option<String>,
    band_mm: Option<String>,
    margin_mm: Option<String>,
    ignore_case: Option<String>,
}

impl RemoveHeadersForm {
    async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await?;

                    tracing::debug!(
                        file_name = ?file_name,
                        content_type = ?content_type,
                        bytes = data.len(),
                        "Received file field"
                    );

                    form.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        data,
                    });
                }
                "header_texts" => form.header_texts = Some(field.text().await?),
                "band_mm" => form.band_mm = Some(field.text().await?),
                "margin_mm" => form.margin_mm = Some(field.text().await?),
                "ignore_case" => form.ignore_case = Some(field.text().await?),
                other => tracing::debug!("Ignoring unknown form field '{}'", other),
            }
        }

        Ok(form)
    }

    /// Merge the optional fields over the server defaults
    fn options(&self, defaults: RedactionOptions) -> Result<RedactionOptions> {
        Ok(RedactionOptions {
            band_mm: parse_float("band_mm", self.band_mm.as_deref())?.unwrap_or(defaults.band_mm),
            margin_mm: parse_float("margin_mm", self.margin_mm.as_deref())?
                .unwrap_or(defaults.margin_mm),
            ignore_case: parse_bool("ignore_case", self.ignore_case.as_deref())?
                .unwrap_or(defaults.ignore_case),
            merge_strategy: defaults.merge_strategy,
        })
    }
}

/// POST /remove-headers
async fn remove_headers(State(state): State<AppState>, multipart: Multipart) -> Result<Response> {
    let form = RemoveHeadersForm::read(multipart).await?;

    let file = form
        .file
        .as_ref()
        .ok_or_else(|| AppError::bad_request("'file' alanı zorunludur."))?;

    if !is_accepted_content_type(file.content_type.as_deref()) {
        tracing::debug!(content_type = ?file.content_type, "Rejected upload content type");
        return Err(AppError::bad_request("Lütfen PDF dosyası yükleyin."));
    }

    let header_texts = form
        .header_texts
        .clone()
        .ok_or_else(|| AppError::bad_request("'header_texts' alanı zorunludur."))?;

    let options = form.options(state.default_options())?;
    let out_name = output_file_name(file.file_name.as_deref());
    let data = file.data.clone();

    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        file_name = %out_name,
        bytes = data.len(),
        band_mm = options.band_mm,
        margin_mm = options.margin_mm,
        ignore_case = options.ignore_case,
        "Removing headers"
    );

    // MuPDF work is CPU-bound and must stay on one thread
    let redacted = tokio::task::spawn_blocking(move || {
        redact::remove_headers(&data, &header_texts, &options)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    tracing::info!(
        %request_id,
        pages = redacted.summary.pages_processed,
        pages_modified = redacted.summary.pages_modified,
        regions = redacted.summary.regions_redacted,
        degraded_searches = redacted.summary.degraded_searches,
        output_bytes = redacted.bytes.len(),
        "Headers removed"
    );

    let disposition = format!("attachment; filename=\"{}\"", out_name);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        redacted.bytes,
    )
        .into_response())
}

// ============================================================================
// Helpers
// ============================================================================

fn is_accepted_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    ACCEPTED_CONTENT_TYPES.contains(&essence.as_str())
}

/// Blank values count as absent
fn parse_float(field: &str, raw: Option<&str>) -> Result<Option<f64>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| AppError::bad_request(format!("'{}' sayı olmalıdır: {}", field, value))),
    }
}

fn parse_bool(field: &str, raw: Option<&str>) -> Result<Option<bool>> {
    let Some(value) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Ok(Some(true)),
        "false" | "0" | "no" | "off" | "f" | "n" => Ok(Some(false)),
        _ => Err(AppError::bad_request(format!(
            "'{}' true/false olmalıdır: {}",
            field, value
        ))),
    }
}

/// `<basename>_noheaders.pdf` for the uploaded file name
///
/// Directory parts and the last extension are dropped; characters that
/// would break the header's quoted string are replaced.
fn output_file_name(original: Option<&str>) -> String {
    let base = original
        .map(|name| name.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(name))
        .map(|name| name.rsplit_once('.').map_or(name, |(stem, _)| stem))
        .filter(|stem| !stem.is_empty())
        .unwrap_or("output");

    let base: String = base
        .chars()
        .map(|c| if c == '"' || c.is_control() { '_' } else { c })
        .collect();

    format!("{}_noheaders.pdf", base)
}
