pub mod stats;
pub mod task;
pub mod view;

pub use stats::{completion_stats, CompletionStats};
pub use task::{parse_deadline, Category, Repeat, Task, TaskDraft, TaskId, REPEAT_OCCURRENCES};
pub use view::{CategoryFilter, CompletionFilter, SortMode, ViewOptions};
