use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image metadata as returned to clients. The bytes are served separately
/// from `GET /images/{id}/file`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageResponse {
    pub id: i64,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub project_id: i64,
    pub created_at: DateTime<Utc>,
}
