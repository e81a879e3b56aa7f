use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::model::Task;
use crate::theme::ThemeColors;

/// 复选框文本
fn checkbox(task: &Task) -> &'static str {
    if task.completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// 渲染任务列表
pub fn render(
    frame: &mut Frame,
    area: Rect,
    tasks: &[&Task],
    selected_index: Option<usize>,
    today: NaiveDate,
    colors: &ThemeColors,
) {
    // 表头
    let header = Row::new(vec![
        Cell::from(""), // 选择指示器
        Cell::from(""), // 复选框
        Cell::from("TASK"),
        Cell::from("CATEGORY"),
        Cell::from("DEADLINE"),
    ])
    .style(Style::default().fg(colors.muted))
    .height(1)
    .bottom_margin(1);

    let rows: Vec<Row> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = selected_index == Some(i);
            let selector = if is_selected { "❯" } else { " " };

            let (check_style, name_style) = if task.completed {
                (
                    Style::default().fg(colors.status_done),
                    Style::default()
                        .fg(colors.muted)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                (
                    Style::default().fg(colors.status_pending),
                    Style::default().fg(colors.text),
                )
            };

            let deadline_style = if task.is_overdue(today) {
                Style::default()
                    .fg(colors.status_overdue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.muted)
            };

            let row_style = if is_selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(selector).style(Style::default().fg(colors.highlight)),
                Cell::from(checkbox(task)).style(check_style),
                Cell::from(task.name.clone()).style(name_style),
                Cell::from(task.category.label()).style(Style::default().fg(colors.muted)),
                Cell::from(task.deadline.format("%Y-%m-%d").to_string()).style(deadline_style),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(2),  // 选择器
        Constraint::Length(4),  // 复选框
        Constraint::Fill(1),    // TASK (flex)
        Constraint::Length(9),  // CATEGORY
        Constraint::Length(11), // DEADLINE
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(Style::default().fg(colors.border)),
        )
        .row_highlight_style(
            Style::default()
                .bg(colors.bg_secondary)
                .add_modifier(Modifier::BOLD),
        );

    let mut table_state = TableState::default();
    table_state.select(selected_index);

    frame.render_stateful_widget(table, area, &mut table_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskDraft;
    use crate::store::TaskStore;

    #[test]
    fn test_checkbox_follows_completion() {
        let mut store = TaskStore::new();
        store.add(TaskDraft::new(
            "a",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ));
        let id = store.list()[0].id;
        assert_eq!(checkbox(&store.list()[0]), "[ ]");

        store.toggle_completed(id, true);
        assert_eq!(checkbox(&store.list()[0]), "[x]");
    }
}
