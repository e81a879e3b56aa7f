//! 确认弹窗组件

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::dialog_utils::{center_dialog, render_dialog_frame};
use super::truncate;
use crate::model::TaskId;
use crate::theme::ThemeColors;

/// 确认弹窗类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmType {
    /// 删除任务
    DeleteTask { id: TaskId, name: String },
}

impl ConfirmType {
    pub fn title(&self) -> &str {
        match self {
            ConfirmType::DeleteTask { .. } => " Delete ",
        }
    }

    pub fn message(&self) -> Vec<Line<'static>> {
        match self {
            ConfirmType::DeleteTask { name, .. } => {
                vec![
                    Line::from(format!("Task: {}", truncate(name, 30))),
                    Line::from(""),
                    Line::from("Delete this task?"),
                ]
            }
        }
    }
}

/// 渲染确认弹窗
pub fn render(frame: &mut Frame, confirm_type: &ConfirmType, colors: &ThemeColors) {
    let message_lines = confirm_type.message();
    let popup_height = (message_lines.len() as u16) + 5; // 边框 + 上下留白 + 提示
    let popup_area = center_dialog(frame.area(), 40, popup_height);

    let inner_area = render_dialog_frame(
        frame,
        popup_area,
        confirm_type.title(),
        colors.warning,
        colors,
    );

    let [_, content_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner_area);

    let styled_lines: Vec<Line> = message_lines
        .into_iter()
        .map(|line| {
            Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(colors.text),
            ))
        })
        .collect();

    let content = Paragraph::new(styled_lines).alignment(Alignment::Center);
    frame.render_widget(content, content_area);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled(
            "Y",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("/", Style::default().fg(colors.muted)),
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(" confirm  ", Style::default().fg(colors.muted)),
        Span::styled(
            "N",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("/", Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" cancel", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_message_truncates_long_names() {
        let confirm = ConfirmType::DeleteTask {
            id: TaskId::new(),
            name: "a".repeat(80),
        };
        let first = confirm.message()[0].to_string();
        assert!(first.ends_with('…'));
        assert_eq!(first.chars().count(), "Task: ".len() + 30);
    }
}
