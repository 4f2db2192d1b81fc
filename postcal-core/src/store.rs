//! The post store.
//!
//! Holds every post in insertion order plus the id counter, loaded once from
//! a [`PersistenceSink`] and written back whole after each mutation. Saving
//! is best-effort: a failed read or write is logged and queued as a warning,
//! and the in-memory state keeps working either way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PostcalError, PostcalResult};
use crate::post::{Post, PostDraft};
use crate::sink::PersistenceSink;

/// Key the full store state is saved under.
pub const STATE_KEY: &str = "calendar_state";

/// Keys used by the older layout that stored posts and the counter apart.
pub const LEGACY_POSTS_KEY: &str = "calendar_posts";
pub const LEGACY_NEXT_ID_KEY: &str = "next_post_id";

#[derive(Deserialize)]
struct StoreState {
    posts: Vec<Post>,
    next_id: u64,
}

#[derive(Serialize)]
struct SavedState<'a> {
    posts: &'a [Post],
    next_id: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        StoreState {
            posts: Vec::new(),
            next_id: 1,
        }
    }
}

/// Outcome of an import.
#[derive(Debug)]
pub struct ImportReport {
    pub imported: Vec<Post>,
    pub rejected: usize,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.imported.len() + self.rejected
    }

    /// A `MalformedImport` warning when any records were dropped.
    pub fn rejection(&self) -> Option<PostcalError> {
        (self.rejected > 0).then(|| PostcalError::MalformedImport {
            rejected: self.rejected,
            total: self.total(),
        })
    }
}

pub struct PostStore<S: PersistenceSink> {
    posts: Vec<Post>,
    next_id: u64,
    sink: S,
    warnings: Vec<PostcalError>,
}

impl<S: PersistenceSink> PostStore<S> {
    /// Load the store from `sink`. Unreadable or corrupt state starts an
    /// empty store and queues a `PersistenceRead` warning.
    pub fn open(sink: S) -> Self {
        let mut warnings = Vec::new();

        let state = match load_state(&sink).and_then(repair_counter) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("{e}; starting with an empty calendar");
                warnings.push(e);
                StoreState::default()
            }
        };
        let next_id = state.next_id;

        log::debug!("Loaded {} posts, next id {}", state.posts.len(), next_id);

        PostStore {
            posts: state.posts,
            next_id,
            sink,
            warnings,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn get(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Posts on `date`, in the order they were added.
    pub fn list_for_date(&self, date: NaiveDate) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.date == date).collect()
    }

    pub fn add(&mut self, draft: PostDraft) -> Post {
        let post = Post::from_draft(self.take_id(), draft);
        self.posts.push(post.clone());
        self.persist();
        post
    }

    /// Replace the post with `id`, keeping its id and position.
    pub fn update(&mut self, id: u64, draft: PostDraft) -> PostcalResult<Post> {
        let slot = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PostcalError::NotFound(id))?;

        *slot = Post::from_draft(id, draft);
        let post = slot.clone();

        self.persist();
        Ok(post)
    }

    pub fn delete(&mut self, id: u64) -> PostcalResult<Post> {
        let index = self
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(PostcalError::NotFound(id))?;

        let removed = self.posts.remove(index);
        // Ids are unique, but drop any stray duplicates loaded from disk too
        self.posts.retain(|p| p.id != id);

        self.persist();
        Ok(removed)
    }

    /// Remove every post and restart ids at 1.
    pub fn clear_all(&mut self) {
        self.posts.clear();
        self.next_id = 1;
        self.persist();
    }

    /// Every post as a pretty-printed JSON array.
    pub fn export_all(&self) -> PostcalResult<String> {
        Ok(serde_json::to_string_pretty(&self.posts)?)
    }

    /// Import a JSON array of posts, assigning fresh ids.
    ///
    /// Records that are not a valid post (missing or blank title, missing or
    /// malformed date, unknown status or platform) are skipped and counted in
    /// the report. Input that is not a JSON array is rejected whole.
    pub fn import_many(&mut self, raw: &str) -> PostcalResult<ImportReport> {
        let records: Vec<Value> = match serde_json::from_str::<Value>(raw)? {
            Value::Array(records) => records,
            _ => {
                return Err(PostcalError::MalformedImport {
                    rejected: 1,
                    total: 1,
                });
            }
        };

        let mut drafts = Vec::with_capacity(records.len());
        let mut rejected = 0;

        for (i, record) in records.into_iter().enumerate() {
            match decode_draft(record) {
                Ok(draft) => drafts.push(draft),
                Err(e) => {
                    log::warn!("Skipping imported record {}: {e}", i + 1);
                    rejected += 1;
                }
            }
        }

        let imported = self.import_drafts(drafts);

        Ok(ImportReport { imported, rejected })
    }

    /// Append already-decoded drafts with fresh ids, saving once.
    pub fn import_drafts(&mut self, drafts: Vec<PostDraft>) -> Vec<Post> {
        let imported: Vec<Post> = drafts
            .into_iter()
            .map(|draft| Post::from_draft(self.take_id(), draft))
            .collect();

        self.posts.extend(imported.iter().cloned());
        self.persist();
        imported
    }

    /// Drain warnings from failed loads or saves.
    pub fn take_warnings(&mut self) -> Vec<PostcalError> {
        std::mem::take(&mut self.warnings)
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        // Loading keeps the counter below u64::MAX
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            log::warn!("{e}; changes are kept in memory only");
            self.warnings.push(e);
        }
    }

    fn save(&mut self) -> PostcalResult<()> {
        let content = serde_json::to_string(&SavedState {
            posts: &self.posts,
            next_id: self.next_id,
        })?;
        self.sink.set(STATE_KEY, &content)
    }
}

fn decode_draft(record: Value) -> PostcalResult<PostDraft> {
    let draft: PostDraft = serde_json::from_value(record)?;
    draft.validate()?;
    Ok(draft)
}

/// Move the counter past every loaded id so none is handed out twice.
/// State whose ids leave no room for another post is treated as unreadable.
fn repair_counter(mut state: StoreState) -> PostcalResult<StoreState> {
    let exhausted = || PostcalError::PersistenceRead("post ids are out of range".into());

    let min_next = match state.posts.iter().map(|p| p.id).max() {
        Some(max) => max.checked_add(1).ok_or_else(exhausted)?,
        None => 1,
    };
    state.next_id = state.next_id.max(min_next);

    if state.next_id == u64::MAX {
        return Err(exhausted());
    }
    Ok(state)
}

fn load_state<S: PersistenceSink>(sink: &S) -> PostcalResult<StoreState> {
    let read_err = |e: serde_json::Error| PostcalError::PersistenceRead(e.to_string());

    if let Some(content) = sink.get(STATE_KEY)? {
        return serde_json::from_str(&content).map_err(read_err);
    }

    let Some(posts) = sink.get(LEGACY_POSTS_KEY)? else {
        return Ok(StoreState::default());
    };

    log::debug!("Reading posts from the {LEGACY_POSTS_KEY}/{LEGACY_NEXT_ID_KEY} layout");

    let posts: Vec<Post> = serde_json::from_str(&posts).map_err(read_err)?;
    let next_id = sink
        .get(LEGACY_NEXT_ID_KEY)?
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(1);

    Ok(StoreState { posts, next_id })
}
