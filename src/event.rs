use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::ui::components::task_form::FormField;

/// 表单中 PageUp/PageDown 调整截止日期的天数
const WEEK_DAYS: i64 = 7;

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    // 更新 Toast 状态
    app.update_toast();

    // 检查系统主题变化（用于 Auto 模式）
    app.check_system_theme();

    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // 只处理按下事件
            if key.kind != KeyEventKind::Press {
                return Ok(true);
            }
            handle_key(app, key);
        }
    }

    Ok(!app.should_quit)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C 任何时候都退出
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // 优先处理弹窗事件

    // 帮助面板
    if app.show_help {
        handle_help_key(app, key);
        return;
    }

    // 确认弹窗
    if app.confirm_dialog.is_some() {
        handle_confirm_dialog_key(app, key);
        return;
    }

    // 新建/编辑弹窗
    if app.form.is_some() {
        handle_form_key(app, key);
        return;
    }

    // 主题选择器
    if app.show_theme_selector {
        handle_theme_selector_key(app, key);
        return;
    }

    handle_main_key(app, key);
}

/// 主列表
fn handle_main_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 退出
        KeyCode::Char('q') => app.quit(),

        // 导航
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),

        // 任务操作
        KeyCode::Char('n') => app.open_new_task_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),

        // 排序/过滤
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('f') => app.cycle_completion_filter(),
        KeyCode::Char('c') => app.cycle_category_filter(),

        // 图表 / 导出
        KeyCode::Char('g') => app.toggle_progress(),
        KeyCode::Char('x') => app.export(),

        // 主题 / 帮助
        KeyCode::Char('t') => app.open_theme_selector(),
        KeyCode::Char('?') => app.show_help = true,

        _ => {}
    }
}

/// 新建/编辑表单
fn handle_form_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('s') {
            app.submit_form();
        }
        return;
    }

    let Some(form) = app.form.as_mut() else {
        return;
    };

    match key.code {
        // 取消
        KeyCode::Esc => app.close_form(),

        // 字段切换
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),

        // Memo 中换行，保存按钮上提交，其它字段跳到下一项
        KeyCode::Enter => match form.focus {
            FormField::Memo => form.insert_newline(),
            FormField::Submit => app.submit_form(),
            _ => form.next_field(),
        },

        // 日期 ±1 天 / 选项切换
        KeyCode::Left => form.select_prev(),
        KeyCode::Right => form.select_next(),

        // 日期 ±1 周
        KeyCode::PageUp => form.shift_deadline(-WEEK_DAYS),
        KeyCode::PageDown => form.shift_deadline(WEEK_DAYS),

        // 输入
        KeyCode::Backspace => form.delete_char(),
        KeyCode::Char(c) => form.input_char(c),

        _ => {}
    }
}

fn handle_confirm_dialog_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 确认
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.confirm();
        }

        // 取消
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.cancel_confirm();
        }

        _ => {}
    }
}

fn handle_theme_selector_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 导航 - 上移
        KeyCode::Char('k') | KeyCode::Up => {
            app.theme_selector_prev();
        }

        // 导航 - 下移
        KeyCode::Char('j') | KeyCode::Down => {
            app.theme_selector_next();
        }

        // 确认选择
        KeyCode::Enter => {
            app.theme_selector_confirm();
        }

        // 取消
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_theme_selector();
        }

        _ => {}
    }
}

fn handle_help_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
            app.show_help = false;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::Config;
    use crate::theme::Theme;

    fn app() -> App {
        App::new(Config::default(), Some(Theme::Dark), None)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_add_task_with_keyboard() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert!(app.form.is_some());

        // 表单内的 'q' 是输入而不是退出
        type_str(&mut app, "quiz");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "line1");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "line2");
        ctrl(&mut app, 's');

        assert!(!app.should_quit);
        assert!(app.form.is_none());
        let task = &app.store.list()[0];
        assert_eq!(task.name, "quiz");
        assert_eq!(task.memo, "line1\nline2");
        assert_eq!(task.deadline, App::today());
    }

    #[test]
    fn test_enter_on_submit_button_adds_task() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "a");
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.form.as_ref().unwrap().focus, FormField::Submit);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn test_page_keys_shift_deadline_by_week() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Right);
        type_str(&mut app, "x");
        press(&mut app, KeyCode::BackTab);
        type_str(&mut app, "a");
        ctrl(&mut app, 's');

        let expected = App::today() + chrono::Days::new(8);
        assert_eq!(app.store.list()[0].deadline, expected);
    }

    #[test]
    fn test_escape_cancels_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "draft");
        press(&mut app, KeyCode::Esc);
        assert!(app.form.is_none());
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_delete_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "a");
        ctrl(&mut app, 's');

        press(&mut app, KeyCode::Char('d'));
        assert!(app.confirm_dialog.is_some());
        // 确认弹窗打开时其它按键无效
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_toggle_and_filters() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "a");
        ctrl(&mut app, 's');

        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.list()[0].completed);

        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Char('f'));
        assert!(app.visible_tasks().is_empty());
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('g'));
        assert!(app.show_progress);
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }
}
