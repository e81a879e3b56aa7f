use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use ratatui::widgets::ListState;
use tracing::{info, warn};

use crate::export;
use crate::model::{completion_stats, view, CompletionStats, Task, TaskId, ViewOptions};
use crate::storage::config::{self, Config};
use crate::store::TaskStore;
use crate::theme::{detect_system_theme, get_theme_colors, Theme, ThemeColors};
use crate::ui::components::confirm_dialog::ConfirmType;
use crate::ui::components::task_form::{FormField, FormMode, TaskFormData};

/// Toast 类型（决定边框颜色）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Warning,
    Error,
}

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind, duration: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// 全局应用状态（一次会话一个）
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 任务集合
    pub store: TaskStore,
    /// 排序/过滤选择
    pub view: ViewOptions,
    /// 列表选择状态（索引基于过滤后的列表）
    pub list_state: ListState,
    /// 新建/编辑弹窗
    pub form: Option<TaskFormData>,
    /// 确认弹窗
    pub confirm_dialog: Option<ConfirmType>,
    /// 是否显示帮助面板
    pub show_help: bool,
    /// 右侧面板显示完成率图表（否则显示任务详情）
    pub show_progress: bool,
    /// Toast 提示
    pub toast: Option<Toast>,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
    /// 是否显示主题选择器
    pub show_theme_selector: bool,
    /// 主题选择器当前选中索引
    pub theme_selector_index: usize,
    /// 上次检测到的系统主题（用于 Auto 模式检测变化）
    last_system_dark: bool,
    /// Excel 导出路径
    pub export_path: PathBuf,
    /// 启动时加载的配置（主题切换时回写）
    config: Config,
}

impl App {
    /// 创建应用；`theme` / `export_path` 为命令行覆盖值，只对本次会话生效
    pub fn new(config: Config, theme: Option<Theme>, export_path: Option<PathBuf>) -> Self {
        let theme = theme.unwrap_or_else(|| Theme::from_name(&config.theme.name));
        let export_path = export_path.unwrap_or_else(|| config.export.path.clone());

        Self {
            should_quit: false,
            store: TaskStore::new(),
            view: ViewOptions::default(),
            list_state: ListState::default(),
            form: None,
            confirm_dialog: None,
            show_help: false,
            show_progress: false,
            toast: None,
            theme,
            colors: get_theme_colors(theme),
            show_theme_selector: false,
            theme_selector_index: 0,
            last_system_dark: detect_system_theme(),
            export_path,
            config,
        }
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    // ========== Task List ==========

    /// 排序并过滤后的任务
    pub fn visible_tasks(&self) -> Vec<&Task> {
        view::visible(self.store.list(), &self.view)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let index = self.list_state.selected()?;
        self.visible_tasks().get(index).copied()
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.selected_task().map(|t| t.id)
    }

    pub fn stats(&self) -> CompletionStats {
        completion_stats(self.store.list())
    }

    /// 选中下一项
    pub fn select_next(&mut self) {
        let list_len = self.visible_tasks().len();
        if list_len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((current + 1) % list_len));
    }

    /// 选中上一项
    pub fn select_previous(&mut self) {
        let list_len = self.visible_tasks().len();
        if list_len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let prev = if current == 0 {
            list_len - 1
        } else {
            current - 1
        };
        self.list_state.select(Some(prev));
    }

    /// 选中指定任务（不在可见列表中时保持原选择）
    fn select_id(&mut self, id: TaskId) {
        let index = self.visible_tasks().iter().position(|t| t.id == id);
        if index.is_some() {
            self.list_state.select(index);
        }
        self.ensure_selection();
    }

    /// 确保选择索引落在可见列表范围内
    pub fn ensure_selection(&mut self) {
        let list_len = self.visible_tasks().len();
        match self.list_state.selected() {
            _ if list_len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(i) if i >= list_len => self.list_state.select(Some(list_len - 1)),
            Some(_) => {}
        }
    }

    /// 变更后刷新视图：分类已消失时重置分类过滤，并修正选择
    fn refresh_view(&mut self) {
        let options = view::category_options(self.store.list());
        if !options.contains(&self.view.category) {
            self.view.category = view::CategoryFilter::All;
        }
        self.ensure_selection();
    }

    // ========== Sort / Filter ==========

    pub fn cycle_sort(&mut self) {
        let keep = self.selected_id();
        self.view.sort = self.view.sort.next();
        self.reselect(keep);
    }

    pub fn cycle_completion_filter(&mut self) {
        let keep = self.selected_id();
        self.view.completion = self.view.completion.next();
        self.reselect(keep);
    }

    /// 在当前存在的分类中循环
    pub fn cycle_category_filter(&mut self) {
        let keep = self.selected_id();
        let options = view::category_options(self.store.list());
        self.view.category = view::next_category_filter(self.view.category, &options);
        self.reselect(keep);
    }

    fn reselect(&mut self, keep: Option<TaskId>) {
        match keep {
            Some(id) => self.select_id(id),
            None => self.ensure_selection(),
        }
    }

    // ========== Task Form ==========

    /// 打开新建任务弹窗
    pub fn open_new_task_form(&mut self) {
        self.form = Some(TaskFormData::new(Self::today()));
    }

    /// 打开编辑弹窗（预填选中任务）
    pub fn open_edit_form(&mut self) {
        if let Some(task) = self.selected_task() {
            self.form = Some(TaskFormData::edit(task));
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// 提交表单
    ///
    /// 新建时名称为空则什么都不发生（表单保持打开）；编辑时拒绝空名称。
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let mode = form.mode;
        let Some(draft) = form.to_draft() else {
            return;
        };
        if matches!(mode, FormMode::Edit(_)) && draft.name.is_empty() {
            form.invalid = Some(FormField::Name);
            form.focus = FormField::Name;
            return;
        }

        match mode {
            FormMode::Add => {
                let before = self.store.len();
                self.store.add(draft);
                let added = self.store.len() - before;
                if added == 0 {
                    return;
                }
                self.form = None;
                let first = self.store.list()[before].id;
                self.refresh_view();
                self.select_id(first);
                if added == 1 {
                    self.show_toast("Task added");
                } else {
                    self.show_toast(format!("Added {} tasks", added));
                }
            }
            FormMode::Edit(id) => {
                self.store.edit(id, draft);
                self.form = None;
                self.refresh_view();
                self.select_id(id);
                self.show_toast("Task updated");
            }
        }
    }

    // ========== Task Actions ==========

    /// 切换选中任务的完成状态
    pub fn toggle_selected(&mut self) {
        let Some((id, completed)) = self.selected_task().map(|t| (t.id, t.completed)) else {
            return;
        };
        self.store.toggle_completed(id, !completed);
        self.ensure_selection();
    }

    /// 请求删除选中任务（弹出确认）
    pub fn request_delete(&mut self) {
        if let Some(task) = self.selected_task() {
            self.confirm_dialog = Some(ConfirmType::DeleteTask {
                id: task.id,
                name: task.name.clone(),
            });
        }
    }

    pub fn confirm(&mut self) {
        match self.confirm_dialog.take() {
            Some(ConfirmType::DeleteTask { id, .. }) => {
                self.store.delete(id);
                self.refresh_view();
                self.show_toast_kind("Task deleted", ToastKind::Warning);
            }
            None => {}
        }
    }

    pub fn cancel_confirm(&mut self) {
        self.confirm_dialog = None;
    }

    pub fn toggle_progress(&mut self) {
        self.show_progress = !self.show_progress;
    }

    /// 导出全部任务到 Excel
    pub fn export(&mut self) {
        match export::export_to_spreadsheet(self.store.list(), &self.export_path) {
            Ok(()) => {
                let message = format!(
                    "Exported {} tasks to {}",
                    self.store.len(),
                    self.export_path.display()
                );
                self.show_toast(message);
            }
            Err(e) => {
                warn!(path = %self.export_path.display(), error = %e, "export failed");
                self.show_toast_kind(format!("Export failed: {}", e), ToastKind::Error);
            }
        }
    }

    // ========== Theme ==========

    /// 打开主题选择器
    pub fn open_theme_selector(&mut self) {
        let themes = Theme::all();
        self.theme_selector_index = themes
            .iter()
            .position(|t| *t == self.theme)
            .unwrap_or(0);
        self.show_theme_selector = true;
    }

    /// 关闭主题选择器，恢复预览前的主题
    pub fn close_theme_selector(&mut self) {
        self.show_theme_selector = false;
        self.colors = get_theme_colors(self.theme);
    }

    /// 主题选择器 - 选择上一个
    pub fn theme_selector_prev(&mut self) {
        let len = Theme::all().len();
        self.theme_selector_index = if self.theme_selector_index == 0 {
            len - 1
        } else {
            self.theme_selector_index - 1
        };
        self.preview_theme_at_index(self.theme_selector_index);
    }

    /// 主题选择器 - 选择下一个
    pub fn theme_selector_next(&mut self) {
        let len = Theme::all().len();
        self.theme_selector_index = (self.theme_selector_index + 1) % len;
        self.preview_theme_at_index(self.theme_selector_index);
    }

    /// 主题选择器 - 确认选择并写入配置
    pub fn theme_selector_confirm(&mut self) {
        if let Some(theme) = Theme::all().get(self.theme_selector_index) {
            self.theme = *theme;
            self.colors = get_theme_colors(*theme);
        }
        self.show_theme_selector = false;

        self.config.theme.name = self.theme.label().to_string();
        if let Err(e) = config::save_config(&self.config) {
            warn!(error = %e, "failed to save theme");
        } else {
            info!(theme = self.theme.label(), "theme saved");
        }
        self.show_toast(format!("Theme: {}", self.theme.label()));
    }

    /// 实时预览（不改变 `theme`）
    fn preview_theme_at_index(&mut self, index: usize) {
        if let Some(theme) = Theme::all().get(index) {
            self.colors = get_theme_colors(*theme);
        }
    }

    /// 检查系统主题变化（用于 Auto 模式）
    pub fn check_system_theme(&mut self) {
        if self.theme != Theme::Auto || self.show_theme_selector {
            return;
        }

        let current_dark = detect_system_theme();
        if current_dark != self.last_system_dark {
            self.last_system_dark = current_dark;
            self.colors = get_theme_colors(Theme::Auto);
        }
    }

    // ========== Toast ==========

    /// 显示 Toast 消息
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.show_toast_kind(message, ToastKind::Info);
    }

    pub fn show_toast_kind(&mut self, message: impl Into<String>, kind: ToastKind) {
        let duration = match kind {
            ToastKind::Error => Duration::from_secs(4),
            _ => Duration::from_secs(2),
        };
        self.toast = Some(Toast::new(message, kind, duration));
    }

    /// 更新 Toast 状态（清理过期的 Toast）
    pub fn update_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    /// 退出应用
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, CategoryFilter, CompletionFilter, Repeat, SortMode, TaskDraft};

    fn app() -> App {
        App::new(Config::default(), Some(Theme::Dark), None)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn names(app: &App) -> Vec<String> {
        app.visible_tasks().iter().map(|t| t.name.clone()).collect()
    }

    fn toast(app: &App) -> Option<(&str, ToastKind)> {
        app.toast.as_ref().map(|t| (t.message.as_str(), t.kind))
    }

    #[test]
    fn test_new_applies_overrides() {
        let mut config = Config::default();
        config.theme.name = "Nord".to_string();
        config.export.path = PathBuf::from("from-config.xlsx");

        let app = App::new(config.clone(), None, None);
        assert_eq!(app.theme, Theme::Nord);
        assert_eq!(app.export_path, PathBuf::from("from-config.xlsx"));

        let app = App::new(config, Some(Theme::Light), Some(PathBuf::from("cli.xlsx")));
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.export_path, PathBuf::from("cli.xlsx"));
    }

    #[test]
    fn test_submit_new_task() {
        let mut app = app();
        app.open_new_task_form();
        let form = app.form.as_mut().unwrap();
        form.name = "Essay".to_string();
        form.deadline = "2025-06-01".to_string();
        form.category = Category::School;

        app.submit_form();
        assert!(app.form.is_none());
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.selected_task().unwrap().name, "Essay");
        assert_eq!(toast(&app), Some(("Task added", ToastKind::Info)));
    }

    #[test]
    fn test_submit_repeat_task_reports_count() {
        let mut app = app();
        app.open_new_task_form();
        let form = app.form.as_mut().unwrap();
        form.name = "Run".to_string();
        form.repeat = Repeat::Daily;

        app.submit_form();
        assert_eq!(app.store.len(), 8);
        assert_eq!(toast(&app), Some(("Added 8 tasks", ToastKind::Info)));
        assert_eq!(app.selected_task().unwrap().name, "Run");
    }

    #[test]
    fn test_submit_empty_name_keeps_form_open() {
        let mut app = app();
        app.open_new_task_form();
        app.form.as_mut().unwrap().name = "   ".to_string();

        app.submit_form();
        assert!(app.form.is_some());
        assert!(app.store.is_empty());
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_submit_invalid_deadline_keeps_form_open() {
        let mut app = app();
        app.open_new_task_form();
        let form = app.form.as_mut().unwrap();
        form.name = "Essay".to_string();
        form.deadline = "2025-02-30".to_string();

        app.submit_form();
        assert!(app.store.is_empty());
        assert_eq!(
            app.form.as_ref().unwrap().invalid,
            Some(FormField::Deadline)
        );
    }

    #[test]
    fn test_edit_selected_task() {
        let mut app = app();
        app.store.add(TaskDraft::new("a", date(2025, 1, 1)));
        app.store.add(TaskDraft::new("b", date(2025, 1, 2)));
        app.ensure_selection();
        app.select_next();

        app.open_edit_form();
        let form = app.form.as_mut().unwrap();
        assert_eq!(form.name, "b");
        form.name = "b2".to_string();
        form.memo = "note".to_string();
        app.submit_form();

        assert!(app.form.is_none());
        assert_eq!(names(&app), ["a", "b2"]);
        assert_eq!(app.selected_task().unwrap().memo, "note");
        assert_eq!(toast(&app), Some(("Task updated", ToastKind::Info)));
    }

    #[test]
    fn test_edit_rejects_empty_name() {
        let mut app = app();
        app.store.add(TaskDraft::new("a", date(2025, 1, 1)));
        app.ensure_selection();
        app.open_edit_form();
        app.form.as_mut().unwrap().name.clear();

        app.submit_form();
        assert_eq!(app.form.as_ref().unwrap().invalid, Some(FormField::Name));
        assert_eq!(names(&app), ["a"]);
    }

    #[test]
    fn test_toggle_selected() {
        let mut app = app();
        app.store.add(TaskDraft::new("a", date(2025, 1, 1)));
        app.ensure_selection();

        app.toggle_selected();
        assert!(app.selected_task().unwrap().completed);
        assert_eq!(app.stats(), CompletionStats { done: 1, total: 1 });
        app.toggle_selected();
        assert!(!app.selected_task().unwrap().completed);
    }

    #[test]
    fn test_toggle_under_incomplete_filter_moves_selection() {
        let mut app = app();
        app.store.add(TaskDraft::new("a", date(2025, 1, 1)));
        app.store.add(TaskDraft::new("b", date(2025, 1, 1)));
        app.view.completion = CompletionFilter::Incomplete;
        app.ensure_selection();
        app.select_next();

        app.toggle_selected();
        assert_eq!(names(&app), ["a"]);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = app();
        app.store.add(TaskDraft::new("a", date(2025, 1, 1)));
        app.store.add(TaskDraft::new("b", date(2025, 1, 1)));
        app.ensure_selection();

        app.request_delete();
        assert!(matches!(
            app.confirm_dialog,
            Some(ConfirmType::DeleteTask { ref name, .. }) if name == "a"
        ));
        app.cancel_confirm();
        assert_eq!(app.store.len(), 2);

        app.request_delete();
        app.confirm();
        assert_eq!(names(&app), ["b"]);
        assert_eq!(toast(&app), Some(("Task deleted", ToastKind::Warning)));
    }

    #[test]
    fn test_deleting_last_of_category_resets_filter() {
        let mut app = app();
        app.store.add(TaskDraft::new("a", date(2025, 1, 1)).category(Category::School));
        app.store.add(TaskDraft::new("b", date(2025, 1, 1)).category(Category::Hobby));
        app.cycle_category_filter();
        app.cycle_category_filter();
        assert_eq!(app.view.category, CategoryFilter::Only(Category::Hobby));
        assert_eq!(names(&app), ["b"]);

        app.request_delete();
        app.confirm();
        assert_eq!(app.view.category, CategoryFilter::All);
        assert_eq!(names(&app), ["a"]);
    }

    #[test]
    fn test_sort_keeps_selected_task() {
        let mut app = app();
        app.store.add(TaskDraft::new("late", date(2025, 3, 1)));
        app.store.add(TaskDraft::new("early", date(2025, 1, 1)));
        app.ensure_selection();
        assert_eq!(app.selected_task().unwrap().name, "late");

        app.cycle_sort();
        assert_eq!(app.view.sort, SortMode::Deadline);
        assert_eq!(names(&app), ["early", "late"]);
        assert_eq!(app.selected_task().unwrap().name, "late");
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = app();
        app.select_next();
        assert_eq!(app.list_state.selected(), None);

        app.store.add(TaskDraft::new("a", date(2025, 1, 1)));
        app.store.add(TaskDraft::new("b", date(2025, 1, 1)));
        app.ensure_selection();
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(1));
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_export_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            Config::default(),
            Some(Theme::Dark),
            Some(dir.path().join("out.xlsx")),
        );
        app.store.add(TaskDraft::new("a", date(2025, 1, 1)));

        app.export();
        assert!(dir.path().join("out.xlsx").exists());
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Info);
        assert!(app.toast.as_ref().unwrap().message.starts_with("Exported 1 tasks"));

        app.export_path = dir.path().join("missing").join("out.xlsx");
        app.export();
        let t = app.toast.as_ref().unwrap();
        assert_eq!(t.kind, ToastKind::Error);
        assert!(t.message.starts_with("Export failed"));
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn test_theme_selector_preview_and_cancel() {
        let mut app = app();
        app.open_theme_selector();
        assert_eq!(Theme::all()[app.theme_selector_index], Theme::Dark);

        app.theme_selector_next();
        assert_eq!(app.theme, Theme::Dark);
        app.close_theme_selector();
        assert_eq!(app.theme, Theme::Dark);
        assert!(!app.show_theme_selector);
    }
}
