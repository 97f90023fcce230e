//! Pure mapper from HTTP responses to feed images.

use crate::domain::entities::FeedImage;
use crate::domain::errors::LoadError;
use crate::domain::ports::HttpResponse;

use super::dto::FeedPayload;

/// Maps a feed endpoint response into domain images.
///
/// Any 2xx status with a decodable `items` payload is accepted; everything
/// else is invalid data.
///
/// # Errors
/// Returns `InvalidData` on a non-2xx status or an undecodable body.
pub fn map_feed(response: &HttpResponse) -> Result<Vec<FeedImage>, LoadError> {
    if !response.is_success() {
        return Err(LoadError::invalid_data(format!(
            "unexpected status {}",
            response.status
        )));
    }

    let payload: FeedPayload = serde_json::from_slice(&response.body)
        .map_err(|e| LoadError::invalid_data(format!("undecodable feed payload: {e}")))?;

    Ok(payload
        .items
        .into_iter()
        .map(super::dto::FeedImageDto::into_domain)
        .collect())
}
