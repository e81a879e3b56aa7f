use super::task::Task;

/// 完成率统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompletionStats {
    pub done: usize,
    pub total: usize,
}

impl CompletionStats {
    pub fn pending(&self) -> usize {
        self.total - self.done
    }

    /// 完成比例；没有任务时为 `None`（不绘制图表）
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.done as f64 / self.total as f64)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

pub fn completion_stats(tasks: &[Task]) -> CompletionStats {
    CompletionStats {
        done: tasks.iter().filter(|t| t.completed).count(),
        total: tasks.len(),
    }
}
