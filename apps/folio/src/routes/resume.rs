use anyhow::Context;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// GET <RESUME_URL>
///
/// Streams the configured resume PDF inline so the new tab opened by the
/// download button can display or save it. `ServeFile` handles range
/// requests and conditional headers; the file is never buffered whole.
pub async fn handle_resume(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    let path = &state.config.resume_file;
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(resume_missing(path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(resume_missing(path)),
        Err(e) => {
            return Err(AppError::Internal(
                anyhow::Error::new(e).context(format!("failed to stat {}", path.display())),
            ))
        }
    }

    let response = ServeFile::new(path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});
    // The file can disappear between the stat and the open.
    if response.status() == StatusCode::NOT_FOUND {
        return Err(resume_missing(path));
    }

    let mut response = response.map(Body::new);
    let disposition = HeaderValue::from_str(&content_disposition(
        &state.config.resume_download_name,
    ))
    .context("RESUME_DOWNLOAD_NAME is not a valid header value")?;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    Ok(response)
}

fn resume_missing(path: &std::path::Path) -> AppError {
    warn!("Resume file {} is missing", path.display());
    AppError::NotFound("Resume is not available".to_string())
}

/// `inline; filename="..."` with characters that would break the quoted string removed.
fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect();
    let safe = if safe.trim().is_empty() {
        "resume.pdf".to_string()
    } else {
        safe
    };
    format!("inline; filename=\"{safe}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_quotes_name() {
        assert_eq!(
            content_disposition("Jane_Doe_Resume.pdf"),
            "inline; filename=\"Jane_Doe_Resume.pdf\""
        );
    }

    #[test]
    fn test_content_disposition_strips_unsafe_chars() {
        assert_eq!(
            content_disposition("a\"b\\c\n.pdf"),
            "inline; filename=\"abc.pdf\""
        );
        assert_eq!(content_disposition("\"\""), "inline; filename=\"resume.pdf\"");
    }
}
