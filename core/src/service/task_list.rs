use chrono::NaiveDate;

use crate::error::{NimbusError, Result};
use crate::model::task::Task;

/// The ordered task collection and the validation around it. Indices coming
/// in from commands are 1-based; insertion order is preserved across every
/// operation.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        TaskList { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add_todo(&mut self, args: &str) -> Result<&Task> {
        let task = Task::todo(args)?;
        self.tasks.push(task);
        Ok(self.tasks.last().unwrap())
    }

    /// Splits the raw arguments on the `/by` marker and builds a deadline.
    pub fn add_deadline(&mut self, args: &str) -> Result<&Task> {
        let (description, due) = args
            .split_once("/by")
            .ok_or(NimbusError::MissingDateMarker)?;
        let task = Task::deadline(description, due)?;
        self.tasks.push(task);
        Ok(self.tasks.last().unwrap())
    }

    /// Splits the raw arguments on the `/from` and `/to` markers and builds
    /// an event. Both bounds are parsed independently.
    pub fn add_event(&mut self, args: &str) -> Result<&Task> {
        let (description, range) = args
            .split_once("/from")
            .ok_or(NimbusError::MissingRangeMarkers)?;
        let (from, to) = range
            .split_once("/to")
            .ok_or(NimbusError::MissingRangeMarkers)?;
        let task = Task::event(description, from, to)?;
        self.tasks.push(task);
        Ok(self.tasks.last().unwrap())
    }

    pub fn mark(&mut self, args: &str, done: bool) -> Result<&Task> {
        let index = self.parse_index(args)?;
        let task = &mut self.tasks[index];
        if done {
            task.mark_done();
        } else {
            task.unmark();
        }
        Ok(&self.tasks[index])
    }

    /// Removes and returns the task at the given 1-based index.
    pub fn delete(&mut self, args: &str) -> Result<Task> {
        let index = self.parse_index(args)?;
        Ok(self.tasks.remove(index))
    }

    pub fn find_by_keyword(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.matches_keyword(keyword))
            .collect()
    }

    /// Matches deadlines due on the date and events starting or ending on it;
    /// time-of-day is discarded.
    pub fn find_by_date(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.is_on_date(date))
            .collect()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Converts a 1-based external index into a valid position.
    fn parse_index(&self, args: &str) -> Result<usize> {
        let number: usize = args
            .trim()
            .parse()
            .map_err(|_| NimbusError::InvalidIndexFormat)?;
        if number == 0 || number > self.tasks.len() {
            return Err(NimbusError::IndexOutOfRange);
        }
        Ok(number - 1)
    }
}
