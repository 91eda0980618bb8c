pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod session;
pub mod time;

pub use error::NimbusError;
pub use input::{parse_input, Command, ParsedInput};
pub use model::task::{Task, TaskKind};
pub use repository::{FileTaskStore, TaskStore, DEFAULT_DATA_FILE};
pub use service::task_list::TaskList;
pub use session::{exit_message, welcome_message, Reply, Session};
