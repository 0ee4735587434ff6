//! Multipart upload parsing for `POST /api/v1/resumes`.
//!
//! Expected fields: `resume` (the file, required) and `student_id` (text, optional).
//! Unknown fields are ignored.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;
use uuid::Uuid;

use crate::errors::AppError;

const FILE_FIELD: &str = "resume";
const STUDENT_FIELD: &str = "student_id";

/// Extra room on top of the file limit for multipart framing and text fields.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Debug)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
    pub student_id: Option<Uuid>,
}

pub async fn read_upload(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<ResumeUpload, AppError> {
    let mut file: Option<(String, String, Bytes)> = None;
    let mut student_id = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some((file_name, content_type, bytes));
            }
            Some(STUDENT_FIELD) => {
                let raw = field.text().await.map_err(multipart_error)?;
                student_id = parse_student_id(&raw)?;
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) = file.ok_or_else(|| {
        AppError::Validation(format!("multipart field '{FILE_FIELD}' is required"))
    })?;
    check_size(bytes.len(), max_bytes)?;

    Ok(ResumeUpload {
        file_name,
        content_type,
        bytes,
        student_id,
    })
}

fn parse_student_id(raw: &str) -> Result<Option<Uuid>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Uuid::parse_str(raw)
        .map(Some)
        .map_err(|_| AppError::Validation(format!("student_id '{raw}' is not a valid UUID")))
}

fn check_size(len: usize, max_bytes: usize) -> Result<(), AppError> {
    if len == 0 {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }
    if len > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "uploaded file is {len} bytes; the limit is {max_bytes} bytes"
        )));
    }
    Ok(())
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header, Request};

    const BOUNDARY: &str = "X-RESUME-BOUNDARY";

    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file_name {
                Some(f) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: application/pdf\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    async fn multipart(parts: &[(&str, Option<&str>, &str)]) -> Multipart {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/resumes")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_reads_file_and_student_id() {
        let student = Uuid::new_v4().to_string();
        let mut mp = multipart(&[
            ("resume", Some("asha.pdf"), "%PDF-1.7 body"),
            ("student_id", None, student.as_str()),
        ])
        .await;

        let upload = read_upload(&mut mp, 1024).await.unwrap();
        assert_eq!(upload.file_name, "asha.pdf");
        assert_eq!(upload.content_type, "application/pdf");
        assert_eq!(&upload.bytes[..], b"%PDF-1.7 body");
        assert_eq!(upload.student_id.map(|id| id.to_string()), Some(student));
    }

    #[tokio::test]
    async fn test_missing_file_is_validation_error() {
        let mut mp = multipart(&[("notes", None, "hello")]).await;
        let err = read_upload(&mut mp, 1024).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_bad_student_id_is_validation_error() {
        let mut mp = multipart(&[
            ("resume", Some("a.pdf"), "%PDF"),
            ("student_id", None, "not-a-uuid"),
        ])
        .await;
        let err = read_upload(&mut mp, 1024).await.unwrap_err();
        assert!(err.to_string().contains("not-a-uuid"));
    }

    #[tokio::test]
    async fn test_blank_student_id_is_none() {
        let mut mp = multipart(&[
            ("resume", Some("a.pdf"), "%PDF"),
            ("student_id", None, "  "),
        ])
        .await;
        let upload = read_upload(&mut mp, 1024).await.unwrap();
        assert!(upload.student_id.is_none());
    }

    #[tokio::test]
    async fn test_oversized_file_rejected() {
        let mut mp = multipart(&[("resume", Some("a.pdf"), "0123456789")]).await;
        let err = read_upload(&mut mp, 4).await.unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!(matches!(
            check_size(0, 10),
            Err(AppError::Validation(_))
        ));
        assert!(check_size(10, 10).is_ok());
    }
}
