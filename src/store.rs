//! 会话内的任务存储
//!
//! 所有任务只保存在内存中，进程退出即丢失。
//! 变更操作不返回结果，调用方在每次变更后重新读取 `list()` 刷新界面；
//! 空名称、未知 ID 等情况静默忽略。

use chrono::Local;
use tracing::debug;

use crate::model::{Task, TaskDraft, TaskId, REPEAT_OCCURRENCES};

/// 有序任务集合（按添加顺序）
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加任务
    ///
    /// 名称为空时什么都不做。重复规则不是 `None` 时额外生成 7 个任务，
    /// 第 i 个（i = 1..=7）截止日期后移 i 天/周，名称带 "(i+1)" 后缀。
    pub fn add(&mut self, draft: TaskDraft) {
        if draft.name.is_empty() {
            debug!("add ignored: empty name");
            return;
        }

        let now = Local::now();
        let first = Task {
            id: TaskId::new(),
            name: draft.name.clone(),
            deadline: draft.deadline,
            memo: draft.memo.clone(),
            category: draft.category,
            completed: false,
            created: now,
            repeat: draft.repeat,
        };
        debug!(id = %first.id, name = %first.name, "task added");
        self.tasks.push(first);

        for i in 1..=REPEAT_OCCURRENCES {
            let Some(deadline) = draft.repeat.nth_deadline(draft.deadline, i) else {
                break;
            };
            let task = Task {
                id: TaskId::new(),
                name: format!("{} ({})", draft.name, i + 1),
                deadline,
                memo: draft.memo.clone(),
                category: draft.category,
                completed: false,
                created: now,
                repeat: draft.repeat,
            };
            debug!(id = %task.id, name = %task.name, "repeat task added");
            self.tasks.push(task);
        }
    }

    /// 覆盖名称、截止日期、备注、分类、重复规则；ID、创建时间、完成状态不变
    pub fn edit(&mut self, id: TaskId, draft: TaskDraft) {
        let Some(task) = self.get_mut(id) else {
            debug!(%id, "edit ignored: unknown id");
            return;
        };
        task.name = draft.name;
        task.deadline = draft.deadline;
        task.memo = draft.memo;
        task.category = draft.category;
        task.repeat = draft.repeat;
        debug!(%id, name = %task.name, "task edited");
    }

    pub fn delete(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            debug!(%id, "delete ignored: unknown id");
        } else {
            debug!(%id, "task deleted");
        }
    }

    pub fn toggle_completed(&mut self, id: TaskId, value: bool) {
        match self.get_mut(id) {
            Some(task) => {
                task.completed = value;
                debug!(%id, completed = value, "task completion set");
            }
            None => debug!(%id, "toggle ignored: unknown id"),
        }
    }

    /// 按添加顺序返回所有任务
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
