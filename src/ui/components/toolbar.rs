use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{CategoryFilter, CompletionFilter, SortMode, ViewOptions};
use crate::theme::ThemeColors;

/// 渲染排序/过滤栏
///
/// 每一项显示为 `key label: value`，非默认值用高亮块标出。
pub fn render(frame: &mut Frame, area: Rect, view: &ViewOptions, colors: &ThemeColors) {
    let items = [
        ("s", "Sort", view.sort.label(), view.sort != SortMode::default()),
        (
            "f",
            "Show",
            view.completion.label(),
            view.completion != CompletionFilter::All,
        ),
        (
            "c",
            "Category",
            view.category.label(),
            view.category != CategoryFilter::All,
        ),
    ];

    let mut spans = Vec::new();
    spans.push(Span::raw("   "));

    for (i, (key, label, value, active)) in items.iter().enumerate() {
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}: ", label),
            Style::default().fg(colors.muted),
        ));

        let value_style = if *active {
            Style::default()
                .fg(colors.tab_active_fg)
                .bg(colors.tab_active_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.text)
        };
        spans.push(Span::styled(format!(" {} ", value), value_style));

        if i < items.len() - 1 {
            spans.push(Span::raw("    "));
        }
    }

    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
        .border_style(Style::default().fg(colors.border));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
