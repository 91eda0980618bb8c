use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{NimbusError, Result};
use crate::model::task::Task;
use crate::repository::traits::TaskStore;

pub const DEFAULT_DATA_FILE: &str = "./data/nimbus.txt";

const FIELD_SEPARATOR: &str = " | ";

/// Encodes a task list as the line-oriented storage text, one task per line,
/// newline-terminated.
pub fn encode_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&task.to_storage_line());
        out.push('\n');
    }
    out
}

/// Decodes storage text back into tasks. Each line is parsed independently; a
/// line that cannot be parsed is skipped with a warning, never fatal.
pub fn decode_tasks(content: &str) -> Vec<Task> {
    let mut tasks = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(line) {
            Ok(task) => tasks.push(task),
            Err(reason) => warn!("skipping corrupted task in storage: {line} ({reason})"),
        }
    }
    tasks
}

/// Parses one storage line: `TYPE | STATUS | DESCRIPTION` with the date
/// fields the type requires appended. Surplus fields are ignored.
fn decode_line(line: &str) -> Result<Task, String> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() < 3 {
        return Err("fewer than 3 fields".to_string());
    }

    let description = fields[2];
    let mut task = match fields[0] {
        "T" => Task::todo(description),
        "D" => {
            if fields.len() < 4 {
                return Err("deadline is missing its date field".to_string());
            }
            Task::deadline(description, fields[3])
        }
        "E" => {
            if fields.len() < 5 {
                return Err("event is missing a date field".to_string());
            }
            Task::event(description, fields[3], fields[4])
        }
        other => return Err(format!("unknown task type '{other}'")),
    }
    .map_err(|e| e.to_string())?;

    if fields[1] == "1" {
        task.mark_done();
    }
    Ok(task)
}

/// Flat-file task store. Saving overwrites the whole file; loading a missing
/// file yields an empty list.
#[derive(Debug, Clone)]
pub struct FileTaskStore {
    path: PathBuf,
}

impl FileTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTaskStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStore for FileTaskStore {
    fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| NimbusError::io("loading tasks from file", e))?;
        Ok(decode_tasks(&content))
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| NimbusError::io("creating storage directory", e))?;
            }
        }
        let file =
            File::create(&self.path).map_err(|e| NimbusError::io("saving tasks to file", e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(encode_tasks(tasks).as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| NimbusError::io("saving tasks to file", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_tasks() -> Vec<Task> {
        let mut todo = Task::todo("Read book").unwrap();
        todo.mark_done();
        vec![
            todo,
            Task::deadline("Submit report", "2023-12-01 1800").unwrap(),
            Task::event("Team meeting", "2023-11-01 1000", "2023-11-01 1200").unwrap(),
        ]
    }

    #[test]
    fn encode_then_decode_round_trips() {
        let tasks = sample_tasks();
        let decoded = decode_tasks(&encode_tasks(&tasks));
        assert_eq!(decoded, tasks);
        assert!(decoded[0].is_done());
        assert!(!decoded[1].is_done());
    }

    #[test]
    fn encoded_lines_match_the_wire_format() {
        let text = encode_tasks(&sample_tasks());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "T | 1 | Read book",
                "D | 0 | Submit report | 2023-12-01 1800",
                "E | 0 | Team meeting | 2023-11-01 1000 | 2023-11-01 1200",
            ]
        );
    }

    #[test]
    fn short_line_is_skipped_not_fatal() {
        let decoded = decode_tasks("T | 0 | Read book\nT | 1\n");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].description(), "Read book");
    }

    #[test]
    fn unknown_type_tag_is_skipped() {
        let decoded = decode_tasks("X | 0 | Mystery\nT | 0 | Read book\n");
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn bad_date_field_is_skipped() {
        let decoded = decode_tasks("D | 0 | Submit report | not-a-date\nT | 0 | Read book\n");
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn loading_missing_file_yields_empty_list() {
        let dir = tempdir().unwrap();
        let store = FileTaskStore::new(dir.path().join("absent.txt"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_tasks() {
        let dir = tempdir().unwrap();
        let store = FileTaskStore::new(dir.path().join("tasks.txt"));
        let tasks = sample_tasks();
        store.save(&tasks).unwrap();
        assert_eq!(store.load().unwrap(), tasks);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let store = FileTaskStore::new(dir.path().join("data").join("nested").join("tasks.txt"));
        store.save(&sample_tasks()).unwrap();
        assert_eq!(store.load().unwrap().len(), 3);
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let store = FileTaskStore::new(dir.path().join("tasks.txt"));
        store.save(&sample_tasks()).unwrap();
        store.save(&[Task::todo("Only task").unwrap()]).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].description(), "Only task");
    }
}
