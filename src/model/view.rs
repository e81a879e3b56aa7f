//! 任务列表的排序与过滤
//!
//! 纯函数，不修改 store，只返回引用序列。

use super::task::{Category, Task};

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// 添加顺序
    #[default]
    Insertion,
    /// 截止日期升序（同日保持添加顺序）
    Deadline,
}

impl SortMode {
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Insertion => "Added",
            SortMode::Deadline => "Deadline",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SortMode::Insertion => SortMode::Deadline,
            SortMode::Deadline => SortMode::Insertion,
        }
    }
}

/// 完成状态过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl CompletionFilter {
    pub fn label(&self) -> &'static str {
        match self {
            CompletionFilter::All => "All",
            CompletionFilter::Completed => "Completed",
            CompletionFilter::Incomplete => "Incomplete",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            CompletionFilter::All => CompletionFilter::Completed,
            CompletionFilter::Completed => CompletionFilter::Incomplete,
            CompletionFilter::Incomplete => CompletionFilter::All,
        }
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            CompletionFilter::All => true,
            CompletionFilter::Completed => task.completed,
            CompletionFilter::Incomplete => !task.completed,
        }
    }
}

/// 分类过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => task.category == *category,
        }
    }
}

/// 当前列表视图的三项选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewOptions {
    pub sort: SortMode,
    pub completion: CompletionFilter,
    pub category: CategoryFilter,
}

/// 按 `mode` 排序
pub fn sort(tasks: &[Task], mode: SortMode) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    if mode == SortMode::Deadline {
        // sort_by_key 是稳定排序
        sorted.sort_by_key(|t| t.deadline);
    }
    sorted
}

/// 同时应用完成状态和分类两个过滤条件，保持相对顺序
pub fn filter<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    completion: CompletionFilter,
    category: CategoryFilter,
) -> Vec<&'a Task> {
    tasks
        .into_iter()
        .filter(|t| completion.matches(t) && category.matches(t))
        .collect()
}

/// 先排序后过滤，得到界面上显示的任务
pub fn visible<'a>(tasks: &'a [Task], options: &ViewOptions) -> Vec<&'a Task> {
    filter(
        sort(tasks, options.sort),
        options.completion,
        options.category,
    )
}

/// 分类过滤选项：`All` + 当前任务中实际出现过的分类（按首次出现顺序）
pub fn category_options(tasks: &[Task]) -> Vec<CategoryFilter> {
    let mut options = vec![CategoryFilter::All];
    for task in tasks {
        let option = CategoryFilter::Only(task.category);
        if !options.contains(&option) {
            options.push(option);
        }
    }
    options
}

/// 在 `options` 中循环到下一个分类过滤；当前选择不在列表中时回到 `All`
pub fn next_category_filter(current: CategoryFilter, options: &[CategoryFilter]) -> CategoryFilter {
    match options.iter().position(|o| *o == current) {
        Some(index) => options[(index + 1) % options.len()],
        None => CategoryFilter::All,
    }
}
