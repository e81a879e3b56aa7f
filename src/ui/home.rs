use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Widget},
    Frame,
};

use crate::app::App;

use super::components::empty_state::EmptyReason;
use super::components::{
    confirm_dialog, empty_state, footer, header, help_panel, progress_chart, task_detail,
    task_form, task_list, theme_selector, toast, toolbar,
};

/// 右侧面板最小宽度；终端更窄时只显示列表
const SPLIT_MIN_WIDTH: u16 = 80;

/// 渲染主页面
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.colors;
    let today = App::today();
    let stats = app.stats();

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [header_area, toolbar_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    header::render(frame, header_area, stats, today, colors);
    toolbar::render(frame, toolbar_area, &app.view, colors);

    let (list_area, panel_area) = if body_area.width >= SPLIT_MIN_WIDTH || app.show_progress {
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(body_area);
        (left_area, Some(right_area))
    } else {
        (body_area, None)
    };

    // 渲染列表或空状态（使用过滤后的数据）
    let tasks = app.visible_tasks();
    if tasks.is_empty() {
        let reason = if app.store.is_empty() {
            EmptyReason::NoTasks
        } else {
            EmptyReason::Filtered
        };
        empty_state::render(frame, list_area, reason, colors);
    } else {
        task_list::render(
            frame,
            list_area,
            &tasks,
            app.list_state.selected(),
            today,
            colors,
        );
    }

    if let Some(panel_area) = panel_area {
        if app.show_progress {
            progress_chart::render(frame, panel_area, stats, colors);
        } else {
            task_detail::render(frame, panel_area, app.selected_task(), today, colors);
        }
    }

    footer::render(frame, footer_area, !tasks.is_empty(), colors);

    // 渲染 Toast（如果有）
    if let Some(ref t) = app.toast {
        if !t.is_expired() {
            toast::render(frame, &t.message, t.kind, colors);
        }
    }

    // 渲染主题选择器（如果打开）
    if app.show_theme_selector {
        theme_selector::render(frame, app.theme_selector_index, colors);
    }

    // 渲染新建/编辑弹窗
    if let Some(ref data) = app.form {
        task_form::render(frame, data, colors);
    }

    // 渲染确认弹窗
    if let Some(ref confirm_type) = app.confirm_dialog {
        confirm_dialog::render(frame, confirm_type, colors);
    }

    // 渲染帮助面板
    if app.show_help {
        help_panel::render(frame, colors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, TaskDraft};
    use crate::storage::config::Config;
    use crate::theme::Theme;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with_tasks() -> App {
        let mut app = App::new(Config::default(), Some(Theme::Dark), None);
        app.store.add(
            TaskDraft::new("Write essay", NaiveDate::from_ymd_opt(2099, 5, 1).unwrap())
                .category(Category::School)
                .memo("three pages"),
        );
        app.store.add(TaskDraft::new(
            "Fix bike",
            NaiveDate::from_ymd_opt(2099, 5, 2).unwrap(),
        ));
        app.ensure_selection();
        app
    }

    #[test]
    fn test_render_list_and_detail() {
        let app = app_with_tasks();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Write essay"));
        assert!(text.contains("Fix bike"));
        assert!(text.contains("three pages"));
        assert!(text.contains("0/2"));
    }

    #[test]
    fn test_render_empty_state_and_chart_placeholder() {
        let mut app = App::new(Config::default(), Some(Theme::Dark), None);
        app.show_progress = true;
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("No tasks yet"));
        assert!(text.contains("No tasks to chart yet"));
    }

    #[test]
    fn test_render_chart_labels() {
        let mut app = app_with_tasks();
        app.toggle_selected();
        app.show_progress = true;
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("done 50.0%"));
        assert!(text.contains("not done 50.0%"));
    }

    #[test]
    fn test_render_overlays_on_small_terminal() {
        let mut app = app_with_tasks();
        app.open_new_task_form();
        app.show_help = true;
        app.request_delete();
        app.show_toast("hello");
        let mut terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
    }
}
