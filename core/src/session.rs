use chrono::NaiveDate;
use tracing::warn;

use crate::error::{NimbusError, Result};
use crate::input::{parse_input, Command};
use crate::model::task::Task;
use crate::repository::file::FileTaskStore;
use crate::repository::traits::TaskStore;
use crate::service::task_list::TaskList;
use crate::time;

/// The interpreter's answer to one raw submission. `exit` is set once `bye`
/// has been seen; the host must treat it as terminal and accept no further
/// input.
#[derive(Debug)]
pub struct Reply {
    pub text: String,
    pub exit: bool,
}

enum Outcome {
    Continue(String),
    Exit(String),
}

/// One interactive session: the task list, the backing store, and the command
/// dispatch between them. Constructed once and threaded through the whole
/// run; there is no global state.
pub struct Session {
    list: TaskList,
    store: FileTaskStore,
}

impl Session {
    /// Loads the initial task list from the store. Corrupt lines have
    /// already been skipped by the codec; only I/O failures surface here.
    pub fn new(store: FileTaskStore) -> Result<Self> {
        let tasks = store.load()?;
        Ok(Session {
            list: TaskList::from_tasks(tasks),
            store,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    /// Processes one raw submission. The host may have bundled several
    /// commands separated by newlines or semicolons; each is executed
    /// independently and the responses are concatenated in order. `bye`
    /// short-circuits whatever follows it.
    pub fn handle(&mut self, raw: &str) -> Reply {
        let mut sections = Vec::new();
        let mut exit = false;

        for segment in raw.split(['\n', ';']) {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            match self.run_command(segment) {
                Ok(Outcome::Continue(text)) => sections.push(text),
                Ok(Outcome::Exit(text)) => {
                    sections.push(text);
                    exit = true;
                    break;
                }
                Err(e) => sections.push(error_message(&e)),
            }
        }

        if sections.is_empty() {
            sections.push(error_message(&NimbusError::EmptyInput));
        }

        Reply {
            text: sections.join("\n"),
            exit,
        }
    }

    fn run_command(&mut self, line: &str) -> Result<Outcome> {
        let input = parse_input(line)?;

        let text = match input.command {
            Command::Bye => return Ok(Outcome::Exit(exit_message().to_string())),
            Command::List => show_task_list(self.list.tasks()),
            Command::Todo => {
                let rendered = self.list.add_todo(&input.args)?.to_string();
                self.after_mutation(show_task_added(&rendered, self.list.len()))
            }
            Command::Deadline => {
                let rendered = self.list.add_deadline(&input.args)?.to_string();
                self.after_mutation(show_task_added(&rendered, self.list.len()))
            }
            Command::Event => {
                let rendered = self.list.add_event(&input.args)?.to_string();
                self.after_mutation(show_task_added(&rendered, self.list.len()))
            }
            Command::Mark => {
                let rendered = self.list.mark(&input.args, true)?.to_string();
                self.after_mutation(show_task_marked(&rendered, true))
            }
            Command::Unmark => {
                let rendered = self.list.mark(&input.args, false)?.to_string();
                self.after_mutation(show_task_marked(&rendered, false))
            }
            Command::Delete => {
                let removed = self.list.delete(&input.args)?;
                self.after_mutation(show_task_deleted(&removed.to_string(), self.list.len()))
            }
            Command::Find => {
                if input.args.is_empty() {
                    return Err(NimbusError::EmptyInput);
                }
                show_matching_tasks(&self.list.find_by_keyword(&input.args), &input.args)
            }
            Command::FindDate => {
                if input.args.is_empty() {
                    return Err(NimbusError::EmptyInput);
                }
                let date = time::parse_date(&input.args)?;
                show_tasks_on_date(date, &self.list.find_by_date(date))
            }
            Command::Clear => {
                self.list.clear();
                self.after_mutation("All tasks have been cleared.".to_string())
            }
        };

        Ok(Outcome::Continue(text))
    }

    /// Persists the post-mutation snapshot. A save failure is reported in
    /// the response but the in-memory change stands; the next successful
    /// save reconciles the file.
    fn after_mutation(&self, mut text: String) -> String {
        if let Err(e) = self.store.save(self.list.tasks()) {
            warn!("failed to persist task list: {e}");
            text.push('\n');
            text.push_str(&error_message(&e));
        }
        text
    }
}

pub fn welcome_message() -> &'static str {
    "Hey there! I'm Nimbus, your assistant.\nHow can I make your day brighter?"
}

pub fn exit_message() -> &'static str {
    "Stay awesome, and I'll see you soon!"
}

fn error_message(error: &NimbusError) -> String {
    format!("ERROR: {error}")
}

fn show_task_added(task: &str, count: usize) -> String {
    format!("Got it. I've added this task:\n  {task}\nNow you have {count} tasks in the list.")
}

fn show_task_marked(task: &str, done: bool) -> String {
    if done {
        format!("Nice! I've marked this task as done:\n  {task}")
    } else {
        format!("OK, I've marked this task as not done yet:\n  {task}")
    }
}

fn show_task_deleted(task: &str, count: usize) -> String {
    format!("Noted. I've removed this task:\n  {task}\nNow you have {count} tasks in the list.")
}

fn show_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "Hmm... Your task list is empty. Ready to add something?".to_string();
    }
    let mut out = String::from("Here are the tasks in your list:");
    for (i, task) in tasks.iter().enumerate() {
        out.push_str(&format!("\n{}. {task}", i + 1));
    }
    out
}

fn show_matching_tasks(matches: &[&Task], keyword: &str) -> String {
    let mut out = format!("Here are the matching tasks for \"{keyword}\":");
    if matches.is_empty() {
        out.push_str("\n  No matching tasks found.");
    } else {
        for (i, task) in matches.iter().enumerate() {
            out.push_str(&format!("\n{}. {task}", i + 1));
        }
    }
    out
}

fn show_tasks_on_date(date: NaiveDate, matches: &[&Task]) -> String {
    let mut out = format!("Tasks on {}:", time::format_display_date(date));
    if matches.is_empty() {
        out.push_str("\n  No tasks found on this date.");
    } else {
        for task in matches {
            out.push_str(&format!("\n  {task}"));
        }
    }
    out
}
