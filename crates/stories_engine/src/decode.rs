use serde::Deserialize;

use crate::{FailureKind, SearchError, StoryHit};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "objectID")]
    object_id: String,
    url: Option<String>,
    title: Option<String>,
    author: Option<String>,
    num_comments: Option<u32>,
    points: Option<i64>,
}

/// Decode a `{hits: [...]}` search response body.
///
/// Hits keep the order of the response. Null text fields become empty strings
/// and null counts become zero.
pub fn decode_hits(body: &[u8]) -> Result<Vec<StoryHit>, SearchError> {
    let response: SearchResponse = serde_json::from_slice(body)
        .map_err(|err| SearchError::new(FailureKind::MalformedPayload, err.to_string()))?;

    Ok(response
        .hits
        .into_iter()
        .map(|hit| StoryHit {
            object_id: hit.object_id,
            url: hit.url.unwrap_or_default(),
            title: hit.title.unwrap_or_default(),
            author: hit.author.unwrap_or_default(),
            num_comments: hit.num_comments.unwrap_or(0),
            points: hit.points.unwrap_or(0),
        })
        .collect())
}
