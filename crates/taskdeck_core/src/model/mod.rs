pub mod task;
pub mod timestamp;

pub use task::{Priority, Task, TaskDraft, TaskFilter, TaskSort};
pub use timestamp::Timestamp;
