use crate::error::AppError;
use crate::model::{Task, TaskDraft, TaskFilter, TaskSort, Timestamp};
use crate::storage::json_store::{self, StorageInfo};
use crate::view;
use log::warn;
use std::path::{Path, PathBuf};

/// Authoritative task collection plus UI-selection state (filter, sort,
/// search query).
///
/// Lifecycle: construct with [`TaskStore::new`], hydrate once with
/// [`TaskStore::load`], then mutate. Every committed mutation autosaves to
/// the store path; autosave is held back until `load` has run so the empty
/// pre-load state can never overwrite previously saved data.
///
/// Storage order is insertion order. Display order is always derived through
/// [`TaskStore::filtered_tasks`] and never written back.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: TaskFilter,
    sort: TaskSort,
    search_query: String,
    is_loaded: bool,
    store_path: PathBuf,
    last_save_error: Option<AppError>,
}

impl TaskStore {
    pub fn new(store_path: PathBuf) -> Self {
        Self {
            tasks: Vec::new(),
            filter: TaskFilter::default(),
            sort: TaskSort::default(),
            search_query: String::new(),
            is_loaded: false,
            store_path,
            last_save_error: None,
        }
    }

    /// Hydrates the collection from durable storage and opens the autosave
    /// gate. A missing or corrupt store file yields an empty collection.
    pub fn load(&mut self) {
        self.tasks = json_store::load(&self.store_path);
        self.is_loaded = true;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn sort(&self) -> TaskSort {
        self.sort
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// The most recent autosave failure, if the last save did not succeed.
    /// Autosave failures never propagate out of mutations; callers that want
    /// to surface them read this instead.
    pub fn last_save_error(&self) -> Option<&AppError> {
        self.last_save_error.as_ref()
    }

    /// Creates a task from a draft. The trimmed title must be non-empty;
    /// id and both timestamps are assigned here.
    pub fn add(&mut self, draft: TaskDraft) -> Result<Task, AppError> {
        let title = draft.validated_title()?.to_string();
        let now = Timestamp::now();
        let task = Task {
            id: format!("task-{}", now.unix_timestamp_nanos()),
            title,
            description: draft.description.filter(|text| !text.trim().is_empty()),
            completed: false,
            priority: draft.priority,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        };

        self.tasks.push(task.clone());
        self.autosave();
        Ok(task)
    }

    /// Replaces the task matching `task.id` and refreshes `updated_at`.
    /// Returns `None` (a no-op) when no task has that id.
    pub fn update(&mut self, task: Task) -> Option<Task> {
        let index = self.tasks.iter().position(|existing| existing.id == task.id)?;
        let updated = Task {
            updated_at: Timestamp::now(),
            ..task
        };
        self.tasks[index] = updated.clone();
        self.autosave();
        Some(updated)
    }

    /// Removes the matching task. Returns `None` (a no-op) when absent.
    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        let removed = self.tasks.remove(index);
        self.autosave();
        Some(removed)
    }

    /// Flips `completed` on the matching task and refreshes `updated_at`.
    pub fn toggle(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        task.updated_at = Timestamp::now();
        let toggled = task.clone();
        self.autosave();
        Some(toggled)
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    pub fn set_sort(&mut self, sort: TaskSort) {
        self.sort = sort;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// The derived view: search, filter, and sort applied to current state.
    pub fn filtered_tasks(&self) -> Vec<Task> {
        view::compose_view(&self.tasks, self.filter, self.sort, &self.search_query)
    }

    /// Writes the whole collection to a dated backup file under `dir`.
    pub fn export_tasks(&self, dir: &Path) -> Result<PathBuf, AppError> {
        json_store::export_to_file(&self.tasks, dir)
    }

    /// Replaces the entire collection with the file's contents. On any parse
    /// or validation failure the current collection is left untouched and the
    /// error propagates.
    pub fn import_tasks(&mut self, file: &Path) -> Result<usize, AppError> {
        let imported = json_store::import_from_file(file)?;
        let count = imported.len();
        self.tasks = imported;
        self.autosave();
        Ok(count)
    }

    /// Empties the collection and erases durable storage.
    pub fn clear_all(&mut self) {
        self.tasks.clear();
        if let Err(err) = json_store::clear(&self.store_path) {
            warn!(
                "failed to clear stored tasks at {}: {}",
                self.store_path.display(),
                err
            );
            self.last_save_error = Some(err);
        }
    }

    pub fn has_stored_data(&self) -> bool {
        json_store::has_stored_data(&self.store_path)
    }

    pub fn storage_info(&self) -> StorageInfo {
        json_store::storage_info(&self.store_path)
    }

    fn autosave(&mut self) {
        if !self.is_loaded {
            return;
        }

        match json_store::save(&self.store_path, &self.tasks) {
            Ok(()) => {
                self.last_save_error = None;
            }
            Err(err) => {
                warn!("autosave to {} failed: {}", self.store_path.display(), err);
                self.last_save_error = Some(err);
            }
        }
    }
}
