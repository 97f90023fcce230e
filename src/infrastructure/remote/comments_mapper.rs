//! Pure mapper from HTTP responses to image comments.

use crate::domain::entities::ImageComment;
use crate::domain::errors::LoadError;
use crate::domain::ports::HttpResponse;

use super::dto::CommentsPayload;

/// Maps a comments endpoint response into domain comments.
///
/// # Errors
/// Returns `InvalidData` on a non-2xx status or an undecodable body.
pub fn map_comments(response: &HttpResponse) -> Result<Vec<ImageComment>, LoadError> {
    if !response.is_success() {
        return Err(LoadError::invalid_data(format!(
            "unexpected status {}",
            response.status
        )));
    }

    let payload: CommentsPayload = serde_json::from_slice(&response.body)
        .map_err(|e| LoadError::invalid_data(format!("undecodable comments payload: {e}")))?;

    Ok(payload
        .items
        .into_iter()
        .map(super::dto::ImageCommentDto::into_domain)
        .collect())
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    #[test]
    fn test_comments_are_mapped_with_iso8601_timestamps() {
        let body = r#"{
            "items": [
                {
                    "id": "7019d8a7-0252-4d8d-92e2-5af5e4f4f61e",
                    "message": "nice shot",
                    "created_at": "2026-07-30T10:15:00Z",
                    "author": { "username": "ana" }
                }
            ]
        }"#;

        let result = map_comments(&response(200, body)).unwrap();

        let expected: chrono::DateTime<chrono::Utc> = "2026-07-30T10:15:00Z".parse().unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].message, "nice shot");
        assert_eq!(result[0].username, "ana");
        assert_eq!(result[0].created_at, expected);
    }

    #[test]
    fn test_non_2xx_status_is_invalid() {
        let result = map_comments(&response(401, r#"{"items": []}"#));

        assert!(matches!(result, Err(LoadError::InvalidData { .. })));
    }

    #[test]
    fn test_malformed_timestamp_is_invalid() {
        let body = r#"{
            "items": [
                {
                    "id": "7019d8a7-0252-4d8d-92e2-5af5e4f4f61e",
                    "message": "nice shot",
                    "created_at": "yesterday",
                    "author": { "username": "ana" }
                }
            ]
        }"#;

        let result = map_comments(&response(200, body));

        assert!(matches!(result, Err(LoadError::InvalidData { .. })));
    }
}
