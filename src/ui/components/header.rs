use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::CompletionStats;
use crate::theme::ThemeColors;

/// Header 总高度：1 (边框) + 1 (标题行)
pub const HEADER_HEIGHT: u16 = 2;

/// 渲染顶部区域（应用名 + 完成计数 + 今天日期）
pub fn render(
    frame: &mut Frame,
    area: Rect,
    stats: CompletionStats,
    today: NaiveDate,
    colors: &ThemeColors,
) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(colors.border));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let [title_area, info_area] =
        Layout::horizontal([Constraint::Length(14), Constraint::Fill(1)]).areas(inner_area);

    let title = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            "✓ tasklet",
            Style::default()
                .fg(colors.logo)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(title, title_area);

    let info = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{}/{}", stats.done, stats.total),
            Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" done", Style::default().fg(colors.muted)),
        Span::styled("  ·  ", Style::default().fg(colors.border)),
        Span::styled(
            today.format("%Y-%m-%d").to_string(),
            Style::default().fg(colors.muted),
        ),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(info, info_area);
}
