use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{NimbusError, Result};
use crate::time;

/// The per-kind payload of a task. Rendering and serialization are exhaustive
/// matches over this tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { due: NaiveDateTime },
    Event { start: NaiveDateTime, end: NaiveDateTime },
}

#[derive(Debug, Clone)]
pub struct Task {
    description: String,
    done: bool,
    created_at: DateTime<Utc>,
    tags: BTreeSet<String>,
    kind: TaskKind,
}

impl Task {
    /// Creates a todo. Fails if the description is blank after trimming.
    pub fn todo(description: &str) -> Result<Self> {
        Self::new(description, "todo", TaskKind::Todo)
    }

    /// Creates a deadline, parsing the due date text at construction.
    pub fn deadline(description: &str, due: &str) -> Result<Self> {
        let due = time::parse_date_time(due)?;
        Self::new(description, "deadline", TaskKind::Deadline { due })
    }

    /// Creates an event, parsing both bounds independently. The end is not
    /// required to follow the start.
    pub fn event(description: &str, from: &str, to: &str) -> Result<Self> {
        let start = time::parse_date_time(from)?;
        let end = time::parse_date_time(to)?;
        Self::new(description, "event", TaskKind::Event { start, end })
    }

    fn new(description: &str, kind_name: &'static str, kind: TaskKind) -> Result<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(NimbusError::EmptyDescription { kind: kind_name });
        }
        Ok(Task {
            description: description.to_string(),
            done: false,
            created_at: Utc::now(),
            tags: BTreeSet::new(),
            kind,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn unmark(&mut self) {
        self.done = false;
    }

    /// Tags are stored lowercase; membership checks are case-insensitive.
    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() {
            self.tags.insert(tag);
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag.trim().to_lowercase())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }

    /// True if any of the task's date fields falls on the given calendar
    /// date. Todos never match.
    pub fn is_on_date(&self, date: NaiveDate) -> bool {
        match &self.kind {
            TaskKind::Todo => false,
            TaskKind::Deadline { due } => due.date() == date,
            TaskKind::Event { start, end } => start.date() == date || end.date() == date,
        }
    }

    fn status_icon(&self) -> char {
        if self.done {
            'X'
        } else {
            ' '
        }
    }

    /// Produces the pipe-delimited storage line, using the canonical storage
    /// date format regardless of how the dates were originally entered.
    pub fn to_storage_line(&self) -> String {
        let status = if self.done { "1" } else { "0" };
        match &self.kind {
            TaskKind::Todo => format!("T | {status} | {}", self.description),
            TaskKind::Deadline { due } => format!(
                "D | {status} | {} | {}",
                self.description,
                time::format_storage(*due)
            ),
            TaskKind::Event { start, end } => format!(
                "E | {status} | {} | {} | {}",
                self.description,
                time::format_storage(*start),
                time::format_storage(*end)
            ),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TaskKind::Todo => {
                write!(f, "[T][{}] {}", self.status_icon(), self.description)
            }
            TaskKind::Deadline { due } => write!(
                f,
                "[D][{}] {} (by: {})",
                self.status_icon(),
                self.description,
                time::format_display(*due)
            ),
            TaskKind::Event { start, end } => write!(
                f,
                "[E][{}] {} (from: {} to: {})",
                self.status_icon(),
                self.description,
                time::format_display(*start),
                time::format_display(*end)
            ),
        }
    }
}

// Identity is what survives a storage round trip: description, status and
// kind. `created_at` and tags are session metadata.
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description && self.done == other.done && self.kind == other.kind
    }
}

impl Eq for Task {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_renders_description_verbatim() {
        let task = Task::todo("Read book").unwrap();
        assert_eq!(task.to_string(), "[T][ ] Read book");
    }

    #[test]
    fn deadline_renders_due_date() {
        let task = Task::deadline("Submit report", "2023-12-01 1800").unwrap();
        assert_eq!(
            task.to_string(),
            "[D][ ] Submit report (by: Dec 01 2023, 6:00 pm)"
        );
    }

    #[test]
    fn event_renders_both_bounds() {
        let task = Task::event("Team meeting", "2023-11-01 1000", "2023-11-01 1200").unwrap();
        assert_eq!(
            task.to_string(),
            "[E][ ] Team meeting (from: Nov 01 2023, 10:00 am to: Nov 01 2023, 12:00 pm)"
        );
    }

    #[test]
    fn blank_description_is_rejected() {
        assert!(matches!(
            Task::todo(""),
            Err(NimbusError::EmptyDescription { kind: "todo" })
        ));
        assert!(matches!(
            Task::todo("   "),
            Err(NimbusError::EmptyDescription { kind: "todo" })
        ));
        assert!(matches!(
            Task::deadline("  ", "2023-12-01 1800"),
            Err(NimbusError::EmptyDescription { kind: "deadline" })
        ));
    }

    #[test]
    fn mark_then_unmark_restores_render() {
        let mut task = Task::todo("Read book").unwrap();
        let before = task.to_string();
        task.mark_done();
        assert_eq!(task.to_string(), "[T][X] Read book");
        task.unmark();
        assert_eq!(task.to_string(), before);
    }

    #[test]
    fn event_end_before_start_is_accepted() {
        let task = Task::event("Time travel", "2023-11-01 1200", "2023-11-01 1000").unwrap();
        assert!(matches!(task.kind(), TaskKind::Event { .. }));
    }

    #[test]
    fn storage_line_uses_canonical_date_format() {
        let task = Task::deadline("Submit report", "Dec 01 2023 1800").unwrap();
        assert_eq!(
            task.to_storage_line(),
            "D | 0 | Submit report | 2023-12-01 1800"
        );
    }

    #[test]
    fn deadline_matches_its_calendar_date_only() {
        let task = Task::deadline("Submit report", "2023-12-01 1800").unwrap();
        assert!(task.is_on_date(chrono::NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()));
        assert!(!task.is_on_date(chrono::NaiveDate::from_ymd_opt(2023, 12, 2).unwrap()));
    }

    #[test]
    fn tags_are_case_insensitive() {
        let mut task = Task::todo("Read book").unwrap();
        task.add_tag("Leisure");
        assert!(task.has_tag("leisure"));
        assert!(task.has_tag("LEISURE"));
        assert!(!task.has_tag("work"));
        assert_eq!(task.tags().collect::<Vec<_>>(), vec!["leisure"]);
    }
}
