use crate::error::Result;
use crate::model::task::Task;

pub trait TaskStore {
    fn load(&self) -> Result<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
}
