use std::fmt;

use chrono::{DateTime, Days, Local, NaiveDate};
use uuid::Uuid;

use crate::error::{Result, TaskletError};

/// 重复任务额外生成的份数（不含原任务）
pub const REPEAT_OCCURRENCES: u64 = 7;

/// 任务 ID，创建时生成，之后永不改变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// 任务分类（固定集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    School,
    Work,
    Hobby,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::School,
        Category::Work,
        Category::Hobby,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::School => "School",
            Category::Work => "Work",
            Category::Hobby => "Hobby",
            Category::Other => "Other",
        }
    }

    pub fn next(&self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(&self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// 重复规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    None,
    Daily,
    Weekly,
}

impl Repeat {
    pub const ALL: [Repeat; 3] = [Repeat::None, Repeat::Daily, Repeat::Weekly];

    pub fn label(&self) -> &'static str {
        match self {
            Repeat::None => "None",
            Repeat::Daily => "Daily",
            Repeat::Weekly => "Weekly",
        }
    }

    pub fn next(&self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(&self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }

    /// 第 `n` 次重复的截止日期
    ///
    /// `None` 规则或日期溢出时返回 `None`。
    pub fn nth_deadline(&self, deadline: NaiveDate, n: u64) -> Option<NaiveDate> {
        match self {
            Repeat::None => None,
            Repeat::Daily => deadline.checked_add_days(Days::new(n)),
            Repeat::Weekly => deadline.checked_add_days(Days::new(n * 7)),
        }
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: &T, step: usize) -> T {
    let index = all.iter().position(|v| v == current).unwrap_or(0);
    all[(index + step) % all.len()]
}

/// 任务
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub deadline: NaiveDate,
    pub memo: String,
    pub category: Category,
    pub completed: bool,
    pub created: DateTime<Local>,
    pub repeat: Repeat,
}

impl Task {
    /// 未完成且截止日期早于 `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.deadline < today
    }
}

/// 用户可编辑的任务字段（新建与编辑共用）
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub name: String,
    pub deadline: NaiveDate,
    pub memo: String,
    pub category: Category,
    pub repeat: Repeat,
}

impl TaskDraft {
    pub fn new(name: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            deadline,
            memo: String::new(),
            category: Category::default(),
            repeat: Repeat::default(),
        }
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            deadline: task.deadline,
            memo: task.memo.clone(),
            category: task.category,
            repeat: task.repeat,
        }
    }
}

/// 解析 `YYYY-MM-DD` 格式的日期
pub fn parse_deadline(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| TaskletError::invalid_data(format!("deadline '{}': {}", input.trim(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_task_ids_are_unique() {
        let a = TaskId::new();
        let b = TaskId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 36);
    }

    #[test]
    fn test_category_cycle() {
        assert_eq!(Category::School.next(), Category::Work);
        assert_eq!(Category::Other.next(), Category::School);
        assert_eq!(Category::School.prev(), Category::Other);
    }

    #[test]
    fn test_repeat_cycle() {
        assert_eq!(Repeat::None.next(), Repeat::Daily);
        assert_eq!(Repeat::Weekly.next(), Repeat::None);
        assert_eq!(Repeat::None.prev(), Repeat::Weekly);
    }

    #[test]
    fn test_nth_deadline() {
        let d = date(2024, 12, 30);
        assert_eq!(Repeat::None.nth_deadline(d, 1), None);
        assert_eq!(Repeat::Daily.nth_deadline(d, 3), Some(date(2025, 1, 2)));
        assert_eq!(Repeat::Weekly.nth_deadline(d, 2), Some(date(2025, 1, 13)));
    }

    #[test]
    fn test_parse_deadline() {
        assert_eq!(parse_deadline(" 2025-03-01 ").unwrap(), date(2025, 3, 1));
        assert!(parse_deadline("2025-02-30").is_err());
        assert!(parse_deadline("tomorrow").is_err());
    }

    #[test]
    fn test_is_overdue() {
        let mut task = Task {
            id: TaskId::new(),
            name: "report".to_string(),
            deadline: date(2025, 1, 10),
            memo: String::new(),
            category: Category::Work,
            completed: false,
            created: Local::now(),
            repeat: Repeat::None,
        };
        assert!(task.is_overdue(date(2025, 1, 11)));
        assert!(!task.is_overdue(date(2025, 1, 10)));
        task.completed = true;
        assert!(!task.is_overdue(date(2025, 1, 11)));
    }

    #[test]
    fn test_draft_from_task() {
        let task = Task {
            id: TaskId::new(),
            name: "piano".to_string(),
            deadline: date(2025, 5, 1),
            memo: "scales".to_string(),
            category: Category::Hobby,
            completed: true,
            created: Local::now(),
            repeat: Repeat::Weekly,
        };
        let draft = TaskDraft::from(&task);
        assert_eq!(
            draft,
            TaskDraft::new("piano", date(2025, 5, 1))
                .memo("scales")
                .category(Category::Hobby)
                .repeat(Repeat::Weekly)
        );
    }
}
