pub mod clear;
pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod month;
pub mod new;
pub mod stats;

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use postcal_core::post::parse_iso_date;
use postcal_core::{Platform, PostDraft, PostStatus};

/// Post fields shared by `new` and `edit`.
#[derive(Args, Debug, Default)]
pub struct PostFields {
    /// Date (YYYY-MM-DD, "today" or "tomorrow")
    #[arg(short, long)]
    pub date: Option<String>,

    /// Link to the draft (Google Docs, etc.)
    #[arg(short, long)]
    pub link: Option<String>,

    /// Content pillar (e.g. "Product", "Info")
    #[arg(short, long)]
    pub pillar: Option<String>,

    /// Draft, "Copy Ready", Scheduled or Published
    #[arg(short, long)]
    pub status: Option<String>,

    /// Content type (e.g. Reel, Carousel)
    #[arg(short = 't', long = "type")]
    pub content_type: Option<String>,

    /// Platform to publish on (repeat for several)
    #[arg(short = 'P', long = "platform")]
    pub platforms: Vec<String>,

    /// Remove all platforms
    #[arg(long, conflicts_with = "platforms")]
    pub no_platforms: bool,

    #[arg(short, long)]
    pub notes: Option<String>,

    #[arg(short, long)]
    pub comments: Option<String>,
}

impl PostFields {
    /// True when no field flag was given.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.link.is_none()
            && self.pillar.is_none()
            && self.status.is_none()
            && self.content_type.is_none()
            && self.platforms.is_empty()
            && !self.no_platforms
            && self.notes.is_none()
            && self.comments.is_none()
    }

    /// Write the given flags over `draft`. An empty string clears an
    /// optional field.
    pub fn apply(&self, draft: &mut PostDraft) -> Result<()> {
        if let Some(date) = &self.date {
            draft.date = parse_date(date)?;
        }
        if let Some(link) = &self.link {
            draft.link = non_empty(link);
        }
        if let Some(pillar) = &self.pillar {
            draft.content_pillar = non_empty(pillar);
        }
        if let Some(status) = &self.status {
            draft.status = status.parse::<PostStatus>()?;
        }
        if let Some(content_type) = &self.content_type {
            draft.content_type = non_empty(content_type);
        }
        if self.no_platforms {
            draft.platforms.clear();
        } else if !self.platforms.is_empty() {
            draft.platforms = self
                .platforms
                .iter()
                .map(|p| p.parse::<Platform>())
                .collect::<Result<_, _>>()?;
        }
        if let Some(notes) = &self.notes {
            draft.notes = non_empty(notes);
        }
        if let Some(comments) = &self.comments {
            draft.comments = non_empty(comments);
        }
        Ok(())
    }
}

/// Parse a post date: YYYY-MM-DD, "today", "tomorrow" or "yesterday".
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let today = Local::now().date_naive();

    match input.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => Ok(today + Duration::days(1)),
        "yesterday" => Ok(today - Duration::days(1)),
        s => parse_iso_date(s).with_context(|| format!("Invalid date '{}'", input)),
    }
}

pub fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft::new("Launch", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    #[test]
    fn parse_date_iso() {
        assert_eq!(
            parse_date("2024-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert!(parse_date("15/03/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("2024-3-5").is_err());
    }

    #[test]
    fn parse_date_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date("Today").unwrap(), today);
        assert_eq!(parse_date("tomorrow").unwrap(), today + Duration::days(1));
    }

    #[test]
    fn no_flags_is_empty() {
        assert!(PostFields::default().is_empty());

        let fields = PostFields {
            no_platforms: true,
            ..Default::default()
        };
        assert!(!fields.is_empty());
    }

    #[test]
    fn apply_overwrites_given_fields_only() {
        let mut d = draft();
        d.notes = Some("keep me".into());

        let fields = PostFields {
            date: Some("2024-04-01".into()),
            pillar: Some("Product".into()),
            status: Some("copy ready".into()),
            platforms: vec!["instagram".into(), "LinkedIn".into()],
            ..Default::default()
        };
        fields.apply(&mut d).unwrap();

        assert_eq!(d.date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(d.content_pillar.as_deref(), Some("Product"));
        assert_eq!(d.status, PostStatus::CopyReady);
        assert_eq!(d.platforms, vec![Platform::Instagram, Platform::LinkedIn]);
        assert_eq!(d.notes.as_deref(), Some("keep me"));
        assert_eq!(d.title, "Launch");
    }

    #[test]
    fn apply_empty_string_clears() {
        let mut d = draft();
        d.link = Some("https://example.com".into());
        d.platforms = vec![Platform::Twitter];

        let fields = PostFields {
            link: Some(String::new()),
            no_platforms: true,
            ..Default::default()
        };
        fields.apply(&mut d).unwrap();

        assert_eq!(d.link, None);
        assert!(d.platforms.is_empty());
    }

    #[test]
    fn apply_rejects_unknown_values() {
        let fields = PostFields {
            platforms: vec!["Myspace".into()],
            ..Default::default()
        };
        assert!(fields.apply(&mut draft()).is_err());

        let fields = PostFields {
            status: Some("Archived".into()),
            ..Default::default()
        };
        assert!(fields.apply(&mut draft()).is_err());
    }
}
