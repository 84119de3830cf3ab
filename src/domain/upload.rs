use serde::{Deserialize, Serialize};
use std::fmt;

pub const SHORTS_HASHTAG: &str = "#Shorts";
/// People & Blogs
pub const CATEGORY_ID: &str = "22";
pub const PRIVACY_STATUS: &str = "public";
const SHORTS_URL_PREFIX: &str = "https://www.youtube.com/shorts/";

/// A validated publish request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub video_url: String,
    pub description: String,
}

/// Sequential title minted from the fact counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactTitle(pub u64);

impl FactTitle {
    pub fn number(&self) -> u64 {
        self.0
    }

    /// "Daily Fact #N"
    pub fn label(&self) -> String {
        format!("Daily Fact #{}", self.0)
    }

    /// Title sent to the platform, tagged so it is classified as a Short.
    pub fn platform_title(&self) -> String {
        format!("{} {}", self.label(), SHORTS_HASHTAG)
    }
}

impl fmt::Display for FactTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    pub description: String,
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub privacy_status: String,
    pub self_declared_made_for_kids: bool,
}

/// The `snippet` and `status` parts of a video resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub snippet: VideoSnippet,
    pub status: VideoStatus,
}

impl VideoMetadata {
    /// Metadata for a public, not-made-for-kids Short.
    pub fn shorts(title: &str, description: &str) -> Self {
        Self {
            snippet: VideoSnippet {
                title: title.to_string(),
                description: format!("{}\n\n{}", description, SHORTS_HASHTAG),
                category_id: CATEGORY_ID.to_string(),
            },
            status: VideoStatus {
                privacy_status: PRIVACY_STATUS.to_string(),
                self_declared_made_for_kids: false,
            },
        }
    }
}

/// Identifier assigned by the platform to an uploaded video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedVideo {
    pub id: String,
}

impl PublishedVideo {
    pub fn shorts_url(&self) -> String {
        format!("{}{}", SHORTS_URL_PREFIX, self.id)
    }
}

/// Result of a completed pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub fact_number: u64,
    pub video: PublishedVideo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fact_title() {
        let title = FactTitle(6);
        assert_eq!(title.label(), "Daily Fact #6");
        assert_eq!(title.platform_title(), "Daily Fact #6 #Shorts");
        assert_eq!(title.to_string(), "Daily Fact #6");
    }

    #[test]
    fn test_shorts_metadata_wire_format() {
        let metadata = VideoMetadata::shorts("Daily Fact #6 #Shorts", "A fact");
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            value,
            json!({
                "snippet": {
                    "title": "Daily Fact #6 #Shorts",
                    "description": "A fact\n\n#Shorts",
                    "categoryId": "22"
                },
                "status": {
                    "privacyStatus": "public",
                    "selfDeclaredMadeForKids": false
                }
            })
        );
    }

    #[test]
    fn test_shorts_url() {
        let video = PublishedVideo {
            id: "abc123".to_string(),
        };
        assert_eq!(video.shorts_url(), "https://www.youtube.com/shorts/abc123");
    }
}
