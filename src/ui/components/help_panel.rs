//! 快捷键帮助面板

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialog_utils::center_dialog;
use crate::theme::ThemeColors;

/// 帮助面板宽度
const PANEL_WIDTH: u16 = 40;

/// 渲染帮助面板
pub fn render(frame: &mut Frame, colors: &ThemeColors) {
    let lines = build_help_lines(colors);
    let panel_height = lines.len() as u16 + 2;
    let panel_area = center_dialog(frame.area(), PANEL_WIDTH, panel_height);

    // 清除背景
    frame.render_widget(Clear, panel_area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, panel_area);
}

/// 构建帮助内容行
fn build_help_lines(colors: &ThemeColors) -> Vec<Line<'static>> {
    vec![
        // Navigation 分组
        section_header("Navigation", colors),
        key_line("j / ↓", "Move down", colors),
        key_line("k / ↑", "Move up", colors),
        Line::from(""),
        // Tasks 分组
        section_header("Tasks", colors),
        key_line("n", "New task", colors),
        key_line("e / Enter", "Edit task", colors),
        key_line("Space", "Toggle done", colors),
        key_line("d", "Delete task", colors),
        Line::from(""),
        // View 分组
        section_header("View", colors),
        key_line("s", "Cycle sort", colors),
        key_line("f", "Cycle completion filter", colors),
        key_line("c", "Cycle category filter", colors),
        key_line("g", "Toggle progress chart", colors),
        Line::from(""),
        // Form 分组
        section_header("Task Form", colors),
        key_line("Tab / S-Tab", "Next / previous field", colors),
        key_line("← / →", "Day / option", colors),
        key_line("PgUp / PgDn", "Week", colors),
        key_line("Ctrl+S", "Save", colors),
        Line::from(""),
        // Other 分组
        section_header("Other", colors),
        key_line("x", "Export to Excel", colors),
        key_line("t", "Theme selector", colors),
        key_line("?", "This help", colors),
        key_line("q", "Quit", colors),
        Line::from(""),
        Line::from(Span::styled(
            format!("  tasklet v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(colors.muted),
        )),
    ]
}

/// 分组标题
fn section_header(title: &'static str, colors: &ThemeColors) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(colors.highlight)
            .add_modifier(Modifier::BOLD),
    ))
}

/// 快捷键行
fn key_line(key: &'static str, desc: &'static str, colors: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<13}", key), Style::default().fg(colors.text)),
        Span::styled(desc, Style::default().fg(colors.muted)),
    ])
}
