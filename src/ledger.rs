//! The task ledger: date buckets of logged tasks plus the to-do list, and the
//! load/migrate/save contract with the data file.
//!
//! Every mutation rewrites the whole document. A document that cannot be
//! parsed is replaced with an empty one at load time.

use crate::errors::AppError;
use crate::models::{
    LedgerData, Priority, ResetResponse, StoredDocument, TaskEntry, TaskKind, TaskLoggedResponse,
    TodoItem,
};
use crate::stats::date_key;
use crate::storage::{read_document, write_document, ReadError};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    FirstRun,
    Loaded { migrated: usize },
    /// The document was unreadable and has been overwritten with an empty one.
    Reset,
    /// The file could not be read at all. The ledger starts empty and refuses
    /// to save, so the file is left untouched.
    ReadFailed,
}

#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    data: LedgerData,
    /// Cleared when an existing file could not be read, so it is never replaced
    /// by a document that does not reflect its contents.
    writable: bool,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>, data: LedgerData) -> Self {
        Self {
            path: path.into(),
            data,
            writable: true,
        }
    }

    pub async fn load(path: impl Into<PathBuf>) -> Self {
        Self::load_at(path, Local::now().date_naive()).await.0
    }

    /// Loads using `today` as the default deadline for legacy to-do items.
    pub async fn load_at(path: impl Into<PathBuf>, today: NaiveDate) -> (Self, LoadOutcome) {
        let path = path.into();
        match read_document(&path).await {
            Ok(None) => {
                info!(path = %path.display(), "no data file yet, starting empty");
                (Self::new(path, LedgerData::default()), LoadOutcome::FirstRun)
            }
            Ok(Some(document)) => {
                let (data, migrated) = migrate(document, today);
                if migrated > 0 {
                    info!(migrated, "assigned defaults to legacy to-do items");
                }
                info!(
                    path = %path.display(),
                    days = data.tasks.len(),
                    tasks = data.total_tasks(),
                    todos = data.todo_list.len(),
                    "ledger loaded"
                );
                (Self::new(path, data), LoadOutcome::Loaded { migrated })
            }
            Err(ReadError::Unreadable(err)) => {
                error!(path = %path.display(), "discarding unreadable data file: {err}");
                let ledger = Self::new(path, LedgerData::default());
                if let Err(err) = ledger.save().await {
                    error!("failed to overwrite unreadable data file: {}", err.message);
                }
                (ledger, LoadOutcome::Reset)
            }
            Err(err @ ReadError::Io(_)) => {
                error!(path = %path.display(), "{err}; changes will not be saved");
                let mut ledger = Self::new(path, LedgerData::default());
                ledger.writable = false;
                (ledger, LoadOutcome::ReadFailed)
            }
        }
    }

    pub async fn save(&self) -> Result<(), AppError> {
        self.write(&self.data).await
    }

    pub fn data(&self) -> &LedgerData {
        &self.data
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn todo(&self, id: Uuid) -> Option<&TodoItem> {
        self.data.todo_list.iter().find(|todo| todo.id == id)
    }

    /// Appends an entry to today's bucket.
    pub async fn log_task(
        &mut self,
        kind: TaskKind,
        description: impl Into<String>,
        priority: Priority,
    ) -> Result<TaskLoggedResponse, AppError> {
        self.log_task_on(Local::now().date_naive(), kind, description, priority)
            .await
    }

    pub async fn log_task_on(
        &mut self,
        date: NaiveDate,
        kind: TaskKind,
        description: impl Into<String>,
        priority: Priority,
    ) -> Result<TaskLoggedResponse, AppError> {
        let date = date_key(date);
        let entry = TaskEntry {
            kind,
            description: description.into(),
            priority,
        };

        let mut next = self.data.clone();
        let bucket = next.tasks.entry(date.clone()).or_default();
        bucket.push(entry.clone());
        let bucket_size = bucket.len();

        self.commit(next).await?;
        info!(date = %date, kind = %entry.kind, bucket_size, "task logged");

        Ok(TaskLoggedResponse {
            date,
            entry,
            bucket_size,
        })
    }

    pub async fn add_todo(
        &mut self,
        task: impl Into<String>,
        priority: Priority,
        deadline: impl Into<String>,
    ) -> Result<TodoItem, AppError> {
        let todo = TodoItem {
            task: task.into(),
            completed: false,
            priority,
            deadline: deadline.into(),
            id: Uuid::new_v4(),
        };
        let mut next = self.data.clone();
        next.todo_list.push(todo.clone());

        self.commit(next).await?;
        info!(id = %todo.id, deadline = %todo.deadline, "to-do added");
        Ok(todo)
    }

    pub async fn toggle_todo(&mut self, id: Uuid, completed: bool) -> Result<TodoItem, AppError> {
        let mut next = self.data.clone();
        let todo = next
            .todo_list
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| missing_todo(id))?;
        todo.completed = completed;
        let updated = todo.clone();

        self.commit(next).await?;
        debug!(id = %id, completed, "to-do toggled");
        Ok(updated)
    }

    /// Removes the item; later items keep their relative order.
    pub async fn delete_todo(&mut self, id: Uuid) -> Result<TodoItem, AppError> {
        let index = self
            .data
            .todo_list
            .iter()
            .position(|todo| todo.id == id)
            .ok_or_else(|| missing_todo(id))?;
        let mut next = self.data.clone();
        let removed = next.todo_list.remove(index);

        self.commit(next).await?;
        info!(id = %id, "to-do deleted");
        Ok(removed)
    }

    pub async fn reset_all(&mut self) -> Result<ResetResponse, AppError> {
        let cleared = ResetResponse {
            tasks_cleared: self.data.total_tasks(),
            todos_cleared: self.data.todo_list.len(),
        };

        self.commit(LedgerData::default()).await?;
        warn!(
            tasks = cleared.tasks_cleared,
            todos = cleared.todos_cleared,
            "all data reset"
        );
        Ok(cleared)
    }

    /// Persists `next` and only then makes it the in-memory state.
    async fn commit(&mut self, next: LedgerData) -> Result<(), AppError> {
        self.write(&next).await?;
        self.data = next;
        Ok(())
    }

    async fn write(&self, data: &LedgerData) -> Result<(), AppError> {
        if !self.writable {
            return Err(AppError::unavailable(format!(
                "{} could not be read at startup; refusing to overwrite it",
                self.path.display()
            )));
        }
        write_document(&self.path, data).await.inspect_err(|err| {
            error!(path = %self.path.display(), "failed to save ledger: {}", err.message);
        })
    }
}

fn missing_todo(id: Uuid) -> AppError {
    AppError::not_found(format!("no to-do item with id {id}"))
}

/// Fills in fields that older data files did not record. Returns the number of
/// to-do items that needed a default.
fn migrate(document: StoredDocument, today: NaiveDate) -> (LedgerData, usize) {
    let today = date_key(today);
    let mut migrated = 0;

    let todo_list = document
        .todo_list
        .into_iter()
        .map(|stored| {
            if stored.deadline.is_none() || stored.id.is_none() {
                migrated += 1;
            }
            TodoItem {
                task: stored.task,
                completed: stored.completed,
                priority: stored.priority,
                deadline: stored.deadline.unwrap_or_else(|| today.clone()),
                id: stored.id.unwrap_or_else(Uuid::new_v4),
            }
        })
        .collect();

    let data = LedgerData {
        tasks: document.tasks,
        todo_list,
    };
    (data, migrated)
}
