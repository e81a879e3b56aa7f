//! 任务详情面板（右侧，只读）

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::model::{Repeat, Task};
use crate::theme::ThemeColors;

/// 状态文字及颜色
fn status(task: &Task, today: NaiveDate, colors: &ThemeColors) -> (&'static str, Color) {
    if task.completed {
        ("Done", colors.status_done)
    } else if task.is_overdue(today) {
        ("Overdue", colors.status_overdue)
    } else {
        ("Open", colors.status_pending)
    }
}

/// 渲染任务详情
pub fn render(
    frame: &mut Frame,
    area: Rect,
    task: Option<&Task>,
    today: NaiveDate,
    colors: &ThemeColors,
) {
    let block = Block::default()
        .title(" Details ")
        .title_style(
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));

    let Some(task) = task else {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No task selected",
                Style::default().fg(colors.muted),
            )),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let (status_text, status_color) = status(task, today, colors);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", task.name),
            Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {:<10}", "Status"), Style::default().fg(colors.muted)),
            Span::styled(status_text, Style::default().fg(status_color)),
        ]),
        info_line("Deadline", &task.deadline.format("%Y-%m-%d").to_string(), colors),
        info_line("Category", task.category.label(), colors),
    ];
    if task.repeat != Repeat::None {
        lines.push(info_line("Repeat", task.repeat.label(), colors));
    }
    lines.push(info_line(
        "Created",
        &task.created.format("%Y-%m-%d %H:%M").to_string(),
        colors,
    ));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Memo",
        Style::default().fg(colors.muted),
    )));
    if task.memo.is_empty() {
        lines.push(Line::from(Span::styled(
            "  —",
            Style::default().fg(colors.muted),
        )));
    } else {
        for memo_line in task.memo.lines() {
            lines.push(Line::from(Span::styled(
                format!("  {}", memo_line),
                Style::default().fg(colors.text),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// 信息行
fn info_line(label: &str, value: &str, colors: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", label), Style::default().fg(colors.muted)),
        Span::styled(value.to_string(), Style::default().fg(colors.text)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskDraft;
    use crate::store::TaskStore;
    use crate::theme::{get_theme_colors, Theme};

    #[test]
    fn test_status() {
        let colors = get_theme_colors(Theme::Dark);
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut store = TaskStore::new();
        store.add(TaskDraft::new("past", NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()));
        store.add(TaskDraft::new("today", today));
        let past = store.list()[0].id;

        assert_eq!(status(&store.list()[0], today, &colors).0, "Overdue");
        assert_eq!(status(&store.list()[1], today, &colors).0, "Open");

        store.toggle_completed(past, true);
        assert_eq!(status(&store.list()[0], today, &colors).0, "Done");
    }
}
