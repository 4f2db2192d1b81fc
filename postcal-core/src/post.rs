//! Post records.
//!
//! A post is one planned piece of content tied to a single calendar date.
//! `PostDraft` carries every user-editable field; `Post` adds the id that the
//! store assigns.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PostcalError, PostcalResult};

/// Content pillars suggested when creating a post.
pub const SUGGESTED_PILLARS: &[&str] = &[
    "International Health Day",
    "Duchess Health Tips",
    "Product",
    "Info",
];

/// Content types suggested when creating a post.
pub const SUGGESTED_CONTENT_TYPES: &[&str] = &["Carousel", "Video", "Image", "Reel", "Story"];

/// A post stored in the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub link: Option<String>,
    #[serde(deserialize_with = "iso_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub content_pillar: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub comments: Option<String>,
}

/// Everything about a post except its id.
///
/// Unknown fields (including `id`) are ignored when decoding, so exported
/// posts decode straight into drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub link: Option<String>,
    #[serde(deserialize_with = "iso_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub content_pillar: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub comments: Option<String>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        PostDraft {
            title: title.into(),
            link: None,
            date,
            content_pillar: None,
            status: PostStatus::default(),
            content_type: None,
            platforms: Vec::new(),
            notes: None,
            comments: None,
        }
    }

    /// A post needs a non-blank title before it can be saved.
    pub fn validate(&self) -> PostcalResult<()> {
        if self.title.trim().is_empty() {
            return Err(PostcalError::Validation("Title is required".into()));
        }
        Ok(())
    }

    /// Collapse repeated platforms, keeping the first occurrence.
    pub fn normalized(mut self) -> Self {
        self.platforms = dedup_platforms(self.platforms);
        self
    }
}

impl Post {
    pub fn from_draft(id: u64, draft: PostDraft) -> Self {
        let draft = draft.normalized();
        Post {
            id,
            title: draft.title,
            link: draft.link,
            date: draft.date,
            content_pillar: draft.content_pillar,
            status: draft.status,
            content_type: draft.content_type,
            platforms: draft.platforms,
            notes: draft.notes,
            comments: draft.comments,
        }
    }

    pub fn to_draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.clone(),
            link: self.link.clone(),
            date: self.date,
            content_pillar: self.content_pillar.clone(),
            status: self.status,
            content_type: self.content_type.clone(),
            platforms: self.platforms.clone(),
            notes: self.notes.clone(),
            comments: self.comments.clone(),
        }
    }

    /// The ISO `YYYY-MM-DD` form of the post's date.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Workflow status of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostStatus {
    #[default]
    Draft,
    #[serde(rename = "Copy Ready")]
    CopyReady,
    Scheduled,
    Published,
}

impl PostStatus {
    pub const ALL: [PostStatus; 4] = [
        PostStatus::Draft,
        PostStatus::CopyReady,
        PostStatus::Scheduled,
        PostStatus::Published,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PostStatus::Draft => "Draft",
            PostStatus::CopyReady => "Copy Ready",
            PostStatus::Scheduled => "Scheduled",
            PostStatus::Published => "Published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PostStatus {
    type Err = PostcalError;

    /// Accepts the display label in any case, with spaces, dashes or
    /// underscores between words ("copy-ready", "Copy Ready").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "draft" => Ok(PostStatus::Draft),
            "copyready" => Ok(PostStatus::CopyReady),
            "scheduled" => Ok(PostStatus::Scheduled),
            "published" => Ok(PostStatus::Published),
            _ => Err(PostcalError::Validation(format!(
                "Unknown status '{}'. Expected one of: Draft, Copy Ready, Scheduled, Published",
                s
            ))),
        }
    }
}

/// Social platforms a post can be published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    Facebook,
    LinkedIn,
    Twitter,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::Facebook,
        Platform::LinkedIn,
        Platform::Twitter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "Twitter",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Platform::Instagram => "📷",
            Platform::Facebook => "📘",
            Platform::LinkedIn => "💼",
            Platform::Twitter => "🐦",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = PostcalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                PostcalError::Validation(format!(
                    "Unknown platform '{}'. Expected one of: Instagram, Facebook, LinkedIn, Twitter",
                    s
                ))
            })
    }
}

fn dedup_platforms(platforms: Vec<Platform>) -> Vec<Platform> {
    let mut seen = Vec::with_capacity(platforms.len());
    for p in platforms {
        if !seen.contains(&p) {
            seen.push(p);
        }
    }
    seen
}

/// Parse a date written exactly as `YYYY-MM-DD`.
///
/// chrono alone also accepts forms like `2024-3-5`, so the shape is checked
/// before parsing.
pub fn parse_iso_date(s: &str) -> PostcalResult<NaiveDate> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(PostcalError::InvalidDate(format!("'{s}'. Expected YYYY-MM-DD")));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| PostcalError::InvalidDate(format!("'{s}' is not a calendar date")))
}

fn iso_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso_date(&raw).map_err(serde::de::Error::custom)
}

/// Treat `""` the same as a missing value.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_serializes_with_display_labels() {
        assert_eq!(serde_json::to_value(PostStatus::CopyReady).unwrap(), json!("Copy Ready"));
        assert_eq!(serde_json::to_value(PostStatus::Draft).unwrap(), json!("Draft"));
    }

    #[test]
    fn status_parses_loose_spellings() {
        assert_eq!("copy-ready".parse::<PostStatus>().unwrap(), PostStatus::CopyReady);
        assert_eq!("Copy Ready".parse::<PostStatus>().unwrap(), PostStatus::CopyReady);
        assert_eq!("PUBLISHED".parse::<PostStatus>().unwrap(), PostStatus::Published);
        assert!("archived".parse::<PostStatus>().is_err());
    }

    #[test]
    fn platform_parses_case_insensitively() {
        assert_eq!("linkedin".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert_eq!(" Twitter ".parse::<Platform>().unwrap(), Platform::Twitter);
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn draft_decodes_legacy_record_with_empty_strings() {
        let draft: PostDraft = serde_json::from_value(json!({
            "id": 7,
            "title": "Launch",
            "link": "",
            "date": "2024-03-15",
            "content_pillar": "Product",
            "status": "Scheduled",
            "content_type": "",
            "platforms": ["Instagram", "Facebook"],
            "notes": ""
        }))
        .unwrap();

        assert_eq!(draft.title, "Launch");
        assert_eq!(draft.link, None);
        assert_eq!(draft.date, date(2024, 3, 15));
        assert_eq!(draft.content_pillar.as_deref(), Some("Product"));
        assert_eq!(draft.status, PostStatus::Scheduled);
        assert_eq!(draft.content_type, None);
        assert_eq!(draft.platforms, vec![Platform::Instagram, Platform::Facebook]);
        assert_eq!(draft.comments, None);
    }

    #[test]
    fn draft_requires_title_and_date() {
        let missing_date = serde_json::from_value::<PostDraft>(json!({ "title": "x" }));
        assert!(missing_date.is_err());

        let missing_title = serde_json::from_value::<PostDraft>(json!({ "date": "2024-01-01" }));
        assert!(missing_title.is_err());
    }

    #[test]
    fn date_must_be_zero_padded_iso() {
        assert_eq!(parse_iso_date("2024-03-05").unwrap(), date(2024, 3, 5));
        for bad in ["2024-3-5", "2024-03-5", "24-03-05", "2024/03/05", "2024-02-30", " 2024-03-05"] {
            assert!(
                matches!(parse_iso_date(bad), Err(PostcalError::InvalidDate(_))),
                "accepted {bad}"
            );
        }

        let short = serde_json::from_value::<PostDraft>(json!({ "title": "x", "date": "2024-3-5" }));
        assert!(short.is_err());
    }

    #[test]
    fn status_defaults_to_draft() {
        let draft: PostDraft =
            serde_json::from_value(json!({ "title": "x", "date": "2024-01-01" })).unwrap();
        assert_eq!(draft.status, PostStatus::Draft);
    }

    #[test]
    fn blank_title_fails_validation() {
        assert!(PostDraft::new("   ", date(2024, 1, 1)).validate().is_err());
        assert!(PostDraft::new("Launch", date(2024, 1, 1)).validate().is_ok());
    }

    #[test]
    fn from_draft_collapses_repeated_platforms() {
        let mut draft = PostDraft::new("Launch", date(2024, 1, 1));
        draft.platforms = vec![
            Platform::Twitter,
            Platform::Instagram,
            Platform::Twitter,
        ];

        let post = Post::from_draft(3, draft);
        assert_eq!(post.id, 3);
        assert_eq!(post.platforms, vec![Platform::Twitter, Platform::Instagram]);
    }

    #[test]
    fn exported_post_carries_full_field_set() {
        let post = Post::from_draft(1, PostDraft::new("Launch", date(2024, 3, 15)));
        let value = serde_json::to_value(&post).unwrap();
        let obj = value.as_object().unwrap();

        for field in [
            "id",
            "title",
            "link",
            "date",
            "content_pillar",
            "status",
            "content_type",
            "platforms",
            "notes",
            "comments",
        ] {
            assert!(obj.contains_key(field), "missing {field}");
        }
        assert_eq!(obj["date"], json!("2024-03-15"));
        assert_eq!(obj["platforms"], json!([]));
    }
}
