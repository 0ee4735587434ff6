use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

/// Object key for an uploaded document: `resumes/<resume_id>/<sanitized file name>`.
pub fn document_key(resume_id: Uuid, file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let safe: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim_start_matches('.');
    let safe = if safe.is_empty() { "resume" } else { safe };
    format!("resumes/{resume_id}/{safe}")
}

/// Uploads the raw document bytes.
pub async fn put_document(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    body: Bytes,
    content_type: &str,
) -> Result<()> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

    info!("Uploaded document to s3://{}/{}", bucket, key);
    Ok(())
}

/// Removes a document whose record was never stored.
pub async fn delete_document(s3: &aws_sdk_s3::Client, bucket: &str, key: &str) -> Result<()> {
    s3.delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 delete failed: {e}"))?;

    info!("Deleted document s3://{}/{}", bucket, key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
    use httpmock::prelude::*;

    fn s3_client(server: &MockServer) -> aws_sdk_s3::Client {
        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .endpoint_url(server.base_url())
            .force_path_style(true)
            .build();
        aws_sdk_s3::Client::from_conf(config)
    }

    #[tokio::test]
    async fn test_delete_document_removes_the_key() {
        let server = MockServer::start_async().await;
        let key = document_key(Uuid::nil(), "cv.pdf");
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path(format!("/resumes-bucket/{key}"));
                then.status(204);
            })
            .await;

        delete_document(&s3_client(&server), "resumes-bucket", &key)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_document_reports_storage_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE);
                then.status(403)
                    .header("content-type", "application/xml")
                    .body("<Error><Code>AccessDenied</Code><Message>denied</Message></Error>");
            })
            .await;

        let key = document_key(Uuid::nil(), "cv.pdf");
        let err = delete_document(&s3_client(&server), "resumes-bucket", &key)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("S3 delete failed"));
    }

    #[test]
    fn test_key_keeps_plain_names() {
        let id = Uuid::nil();
        assert_eq!(
            document_key(id, "asha_rao-cv.pdf"),
            format!("resumes/{id}/asha_rao-cv.pdf")
        );
    }

    #[test]
    fn test_key_strips_directories() {
        let id = Uuid::nil();
        assert_eq!(
            document_key(id, "../../etc/passwd"),
            format!("resumes/{id}/passwd")
        );
        assert_eq!(
            document_key(id, r"C:\Users\asha\My CV.pdf"),
            format!("resumes/{id}/My_CV.pdf")
        );
    }

    #[test]
    fn test_key_falls_back_for_empty_names() {
        let id = Uuid::nil();
        assert_eq!(document_key(id, ""), format!("resumes/{id}/resume"));
        assert_eq!(document_key(id, "..."), format!("resumes/{id}/resume"));
    }
}
