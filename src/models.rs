use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category of a logged task.
///
/// Stored as a plain string. Names outside the fixed set survive a load/save
/// cycle as `Custom`, the HTTP layer refuses to create them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskKind {
    Coding,
    Exercise,
    Reading,
    Other,
    Custom(String),
}

impl TaskKind {
    pub const NAMES: [&'static str; 4] = ["Coding", "Exercise", "Reading", "Other"];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Coding => "Coding",
            Self::Exercise => "Exercise",
            Self::Reading => "Reading",
            Self::Other => "Other",
            Self::Custom(name) => name,
        }
    }

    /// Lenient parse for user input: trims and ignores ASCII case, only
    /// accepts the fixed names.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::NAMES
            .iter()
            .find(|name| name.eq_ignore_ascii_case(value))
            .map(|name| Self::from(name.to_string()))
    }
}

impl From<String> for TaskKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Coding" => Self::Coding,
            "Exercise" => Self::Exercise,
            "Reading" => Self::Reading,
            "Other" => Self::Other,
            _ => Self::Custom(value),
        }
    }
}

impl From<TaskKind> for String {
    fn from(kind: TaskKind) -> Self {
        match kind {
            TaskKind::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority shared by logged tasks and to-do items. Same storage rules as
/// [`TaskKind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
    Custom(String),
}

impl Priority {
    pub const NAMES: [&'static str; 3] = ["High", "Medium", "Low"];

    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Custom(name) => name,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::NAMES
            .iter()
            .find(|name| name.eq_ignore_ascii_case(value))
            .map(|name| Self::from(name.to_string()))
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            _ => Self::Custom(value),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On load, `description` and `priority` fall back to defaults like the
/// to-do fields do; `type` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    #[serde(rename = "type")]
    pub kind: TaskKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub task: String,
    pub completed: bool,
    pub priority: Priority,
    /// `YYYY-MM-DD`; not re-validated once stored.
    pub deadline: String,
    pub id: Uuid,
}

/// The persisted document: date buckets in insertion order plus the to-do list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LedgerData {
    pub tasks: IndexMap<String, Vec<TaskEntry>>,
    pub todo_list: Vec<TodoItem>,
}

impl LedgerData {
    pub fn total_tasks(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }
}

/// Document shape as read from disk, before legacy migration fills in
/// missing to-do fields.
#[derive(Debug, Deserialize, Default)]
pub struct StoredDocument {
    #[serde(default)]
    pub tasks: IndexMap<String, Vec<TaskEntry>>,
    #[serde(default)]
    pub todo_list: Vec<StoredTodo>,
}

#[derive(Debug, Deserialize)]
pub struct StoredTodo {
    pub task: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct LogTaskRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    pub priority: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskLoggedResponse {
    pub date: String,
    pub entry: TaskEntry,
    pub bucket_size: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddTodoRequest {
    pub task: String,
    pub priority: String,
    pub deadline: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleTodoRequest {
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub tasks_cleared: usize,
    pub todos_cleared: usize,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: String,
    pub day: u32,
    /// 0 = Monday.
    pub weekday: u8,
    pub has_tasks: bool,
}

#[derive(Debug, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub leading_blanks: u8,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: usize,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DayCount {
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub today: String,
    pub calendar: CalendarMonth,
    pub streak: u32,
    pub streak_ratio: f64,
    pub streak_anchor: String,
    pub total_tasks: usize,
    pub type_distribution: Vec<TypeCount>,
    pub tasks_per_day: Vec<DayCount>,
}
