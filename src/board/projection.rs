//! Per-stage grouping of the task collection under the active filters.

use crate::task::domain::{PlatformFilter, Stage, Task};
use serde::Serialize;
use std::sync::Arc;

/// Normalized free-text search.
///
/// Input is trimmed and lowercased once; an empty query matches every title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Normalizes raw search input.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Returns the normalized query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the query matches every title.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when `title` contains the query, ignoring case.
    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        self.is_empty() || title.to_lowercase().contains(&self.0)
    }
}

/// Active platform filter and search query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoardFilter {
    /// Platform selector.
    pub platform: PlatformFilter,
    /// Title search.
    pub query: SearchQuery,
}

impl BoardFilter {
    /// Returns `true` when `task` passes both filters.
    #[must_use]
    pub fn admits(&self, task: &Task) -> bool {
        self.platform.admits(task.platform()) && self.query.matches(task.title())
    }
}

/// Tasks grouped into the four pipeline columns.
///
/// Every stage is always present, possibly empty. Within a column tasks keep
/// the collection's order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StageColumns {
    #[serde(rename = "Ideas")]
    ideas: Vec<Task>,
    #[serde(rename = "Script")]
    script: Vec<Task>,
    #[serde(rename = "Production")]
    production: Vec<Task>,
    #[serde(rename = "Published")]
    published: Vec<Task>,
}

impl StageColumns {
    /// Returns the tasks in `stage`.
    #[must_use]
    pub fn column(&self, stage: Stage) -> &[Task] {
        match stage {
            Stage::Ideas => &self.ideas,
            Stage::Script => &self.script,
            Stage::Production => &self.production,
            Stage::Published => &self.published,
        }
    }

    fn column_mut(&mut self, stage: Stage) -> &mut Vec<Task> {
        match stage {
            Stage::Ideas => &mut self.ideas,
            Stage::Script => &mut self.script,
            Stage::Production => &mut self.production,
            Stage::Published => &mut self.published,
        }
    }

    /// Iterates the columns in board order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &[Task])> + '_ {
        Stage::ALL.into_iter().map(|stage| (stage, self.column(stage)))
    }

    /// Returns the number of tasks across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().map(|(_, tasks)| tasks.len()).sum()
    }

    /// Returns `true` when every column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Groups `tasks` by stage, keeping those admitted by `filter`.
#[must_use]
pub fn project(tasks: &[Task], filter: &BoardFilter) -> StageColumns {
    let mut columns = StageColumns::default();
    for task in tasks.iter().filter(|task| filter.admits(task)) {
        columns.column_mut(task.status()).push(task.clone());
    }
    columns
}

/// Memoized projection keyed on the collection revision and the filter.
#[derive(Debug, Default)]
pub struct BoardProjection {
    cached: Option<CachedColumns>,
}

#[derive(Debug)]
struct CachedColumns {
    revision: u64,
    filter: BoardFilter,
    columns: Arc<StageColumns>,
}

impl BoardProjection {
    /// Returns the columns for `filter`, recomputing only when `revision` or
    /// the filter changed since the last call.
    pub fn columns(
        &mut self,
        tasks: &[Task],
        revision: u64,
        filter: &BoardFilter,
    ) -> Arc<StageColumns> {
        let stale = !self.is_fresh(revision, filter);
        if stale {
            tracing::trace!(revision, "recomputing board projection");
        }
        let cached = match self.cached.take() {
            Some(cached) if !stale => cached,
            _ => CachedColumns {
                revision,
                filter: filter.clone(),
                columns: Arc::new(project(tasks, filter)),
            },
        };
        Arc::clone(&self.cached.insert(cached).columns)
    }

    /// Returns `true` when a call with `revision` and `filter` would reuse
    /// the cached columns.
    #[must_use]
    pub fn is_fresh(&self, revision: u64, filter: &BoardFilter) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|cached| cached.revision == revision && cached.filter == *filter)
    }

    /// Drops the cached columns.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
