//! Post counts by status and platform.

use crate::post::{Platform, Post, PostStatus};

#[derive(Debug, Default, PartialEq)]
pub struct Stats {
    pub total: usize,
    /// Counts in the order each status first appears.
    pub by_status: Vec<(PostStatus, usize)>,
    /// Counts in the order each platform first appears.
    pub by_platform: Vec<(Platform, usize)>,
}

impl Stats {
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut stats = Stats {
            total: posts.len(),
            ..Default::default()
        };

        for post in posts {
            bump(&mut stats.by_status, post.status);
            for platform in &post.platforms {
                bump(&mut stats.by_platform, *platform);
            }
        }

        stats
    }
}

fn bump<K: PartialEq>(counts: &mut Vec<(K, usize)>, key: K) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostDraft;
    use chrono::NaiveDate;

    fn post(id: u64, status: PostStatus, platforms: &[Platform]) -> Post {
        let mut draft = PostDraft::new("x", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        draft.status = status;
        draft.platforms = platforms.to_vec();
        Post::from_draft(id, draft)
    }

    #[test]
    fn empty() {
        assert_eq!(Stats::from_posts(&[]), Stats::default());
    }

    #[test]
    fn counts_in_first_seen_order() {
        let posts = vec![
            post(1, PostStatus::Scheduled, &[Platform::Twitter]),
            post(2, PostStatus::Draft, &[Platform::Instagram, Platform::Twitter]),
            post(3, PostStatus::Scheduled, &[]),
        ];

        let stats = Stats::from_posts(&posts);

        assert_eq!(stats.total, 3);
        assert_eq!(
            stats.by_status,
            vec![(PostStatus::Scheduled, 2), (PostStatus::Draft, 1)]
        );
        assert_eq!(
            stats.by_platform,
            vec![(Platform::Twitter, 2), (Platform::Instagram, 1)]
        );
    }
}
