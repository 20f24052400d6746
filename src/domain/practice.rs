//! Practice entry model and the paged response that carries it.
//!
//! A [`Practice`] is one recorded practice video as described by the backend.
//! The client only ever holds read-only copies of these records; they are
//! created, mutated and deleted on the server. Pages of practices arrive
//! together with a positionally paired list of thumbnail URLs, which
//! [`PracticePage::into_entries`] zips into [`FeedEntry`] values so an entry
//! can never be separated from its thumbnail.

use crate::domain::error::{PracticeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Fallback title for practices saved without one.
pub const UNTITLED: &str = "Untitled practice";

/// A single recorded practice video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practice {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: i64,

    /// Identifier of the user that recorded the practice.
    #[serde(default)]
    pub user_id: Option<i64>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Length of the video in seconds.
    #[serde(default)]
    pub duration: Option<f64>,

    /// Directory on the recording device the file was uploaded from.
    #[serde(default)]
    pub from_directory: Option<String>,

    /// Time the practice was recorded, as sent by the device.
    #[serde(default)]
    pub practice_time: Option<f64>,

    /// Opaque key into remote object storage.
    #[serde(default)]
    pub s3_key: Option<String>,

    /// Denormalized owner information.
    #[serde(default, deserialize_with = "deserialize_user")]
    pub user: PracticeUser,

    /// Raw view count. The backend sends it either as a number or as a
    /// numeric string.
    #[serde(default, deserialize_with = "deserialize_views")]
    pub views: Option<u64>,

    /// Creation time on the backend.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Owner details embedded in each practice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeUser {
    #[serde(default)]
    pub username: String,
}

impl Practice {
    /// Returns the title, or [`UNTITLED`] when the practice has none.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.user.username
    }
}

/// An explicit `null` user reads as an anonymous one.
fn deserialize_user<'de, D>(deserializer: D) -> std::result::Result<PracticeUser, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<PracticeUser>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `12`, `12.0` and `"12"`; anything else becomes `None`.
fn deserialize_views<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawViews {
        Integer(u64),
        Float(f64),
        Text(String),
    }

    let views = match Option::<RawViews>::deserialize(deserializer)? {
        Some(RawViews::Integer(n)) => Some(n),
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(RawViews::Float(f)) if f.is_finite() && f >= 0.0 => Some(f as u64),
        Some(RawViews::Text(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(views)
}

/// One page of the practice listing as returned by `GET /practice`.
///
/// `thumbnail_urls[i]` belongs to `practices[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticePage {
    #[serde(default)]
    pub total_items: u64,

    #[serde(default)]
    pub practices: Vec<Practice>,

    #[serde(default)]
    pub total_pages: u32,

    #[serde(default)]
    pub current_page: u32,

    #[serde(rename = "thumbnailURLs", default)]
    pub thumbnail_urls: Vec<String>,
}

impl PracticePage {
    /// Pairs every practice with its thumbnail, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::MisalignedPage`] when the two lists differ in
    /// length, since positional pairing would then attach thumbnails to the
    /// wrong entries.
    pub fn into_entries(self) -> Result<Vec<FeedEntry>> {
        if self.practices.len() != self.thumbnail_urls.len() {
            return Err(PracticeError::MisalignedPage {
                practices: self.practices.len(),
                thumbnails: self.thumbnail_urls.len(),
            });
        }

        Ok(self
            .practices
            .into_iter()
            .zip(self.thumbnail_urls)
            .map(|(practice, thumbnail_url)| FeedEntry {
                practice,
                thumbnail_url,
            })
            .collect())
    }
}

/// A practice together with the thumbnail that was delivered for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub practice: Practice,
    pub thumbnail_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_JSON: &str = r#"{
        "totalItems": 12,
        "practices": [
            {
                "_id": 7,
                "user_id": 3,
                "title": "Scales in G",
                "description": null,
                "duration": 125,
                "from_directory": "/storage/emulated/0/Movies",
                "practice_time": 1651406400,
                "s3_key": "practice/3/7.mp4",
                "user": {"username": "mira"},
                "views": "1500",
                "createdAt": "2022-05-01T12:00:00.000Z"
            },
            {
                "_id": 8,
                "user": {"username": "joon"},
                "views": 42
            }
        ],
        "totalPages": 2,
        "currentPage": 0,
        "thumbnailURLs": ["https://cdn/7.jpg", "https://cdn/8.jpg"]
    }"#;

    #[test]
    fn decodes_backend_page() {
        let page: PracticePage = serde_json::from_str(PAGE_JSON).unwrap();

        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.practices.len(), 2);

        let first = &page.practices[0];
        assert_eq!(first.id, 7);
        assert_eq!(first.duration, Some(125.0));
        assert_eq!(first.views, Some(1500));
        assert_eq!(first.username(), "mira");
        assert_eq!(
            first.created_at.map(|t| t.timestamp()),
            Some(1_651_406_400)
        );

        let second = &page.practices[1];
        assert_eq!(second.views, Some(42));
        assert!(second.title.is_none());
        assert!(second.created_at.is_none());
    }

    #[test]
    fn non_numeric_views_are_absent() {
        let practice: Practice =
            serde_json::from_str(r#"{"_id": 1, "views": "many"}"#).unwrap();
        assert_eq!(practice.views, None);
    }

    #[test]
    fn null_user_reads_as_anonymous() {
        let practice: Practice =
            serde_json::from_str(r#"{"_id": 1, "user": null}"#).unwrap();
        assert_eq!(practice.user, PracticeUser::default());
        assert_eq!(practice.username(), "");
    }

    #[test]
    fn into_entries_pairs_by_position() {
        let page: PracticePage = serde_json::from_str(PAGE_JSON).unwrap();
        let entries = page.into_entries().unwrap();

        assert_eq!(entries[0].practice.id, 7);
        assert_eq!(entries[0].thumbnail_url, "https://cdn/7.jpg");
        assert_eq!(entries[1].practice.id, 8);
        assert_eq!(entries[1].thumbnail_url, "https://cdn/8.jpg");
    }

    #[test]
    fn into_entries_rejects_missing_thumbnail() {
        let mut page: PracticePage = serde_json::from_str(PAGE_JSON).unwrap();
        page.thumbnail_urls.pop();

        let err = page.into_entries().unwrap_err();
        assert!(matches!(
            err,
            PracticeError::MisalignedPage {
                practices: 2,
                thumbnails: 1
            }
        ));
    }

    #[test]
    fn blank_title_falls_back() {
        let practice: Practice =
            serde_json::from_str(r#"{"_id": 1, "title": "   "}"#).unwrap();
        assert_eq!(practice.display_title(), UNTITLED);
    }
}
