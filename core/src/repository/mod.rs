pub mod file;
pub mod traits;

pub use file::{decode_tasks, encode_tasks, FileTaskStore, DEFAULT_DATA_FILE};
pub use traits::TaskStore;
