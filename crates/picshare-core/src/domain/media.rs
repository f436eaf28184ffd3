use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Kind of a media attachment. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Carousel,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Image, MediaType::Video, MediaType::Carousel];

    /// Wire value used in serialized mappings.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Carousel => "carousel",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::Validation(format!("Unknown media type '{}'", s)))
    }
}

/// Media entity - an image, video or carousel attached to one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: i32,
    pub media_type: MediaType,
    pub url: String,
    pub post_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insertion form of [`Media`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMedia {
    pub post_id: i32,
    pub media_type: MediaType,
    pub url: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewMedia {
    pub fn new(post_id: i32, media_type: MediaType, url: impl Into<String>) -> Self {
        Self {
            post_id,
            media_type,
            url: url.into(),
            created_at: None,
        }
    }

    pub fn into_media(self, id: i32, created_at: Option<DateTime<Utc>>) -> Media {
        Media {
            id,
            media_type: self.media_type,
            url: self.url,
            post_id: self.post_id,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_parses_wire_values() {
        assert_eq!("image".parse::<MediaType>().unwrap(), MediaType::Image);
        assert_eq!("VIDEO".parse::<MediaType>().unwrap(), MediaType::Video);
        assert_eq!("carousel".parse::<MediaType>().unwrap(), MediaType::Carousel);
    }

    #[test]
    fn test_media_type_rejects_unknown() {
        let err = "gif".parse::<MediaType>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_media_type_display_matches_as_str() {
        for t in MediaType::ALL {
            assert_eq!(t.to_string(), t.as_str());
        }
    }
}
