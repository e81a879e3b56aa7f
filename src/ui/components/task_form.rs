//! 新建/编辑任务弹窗
//!
//! 两种模式共用同一套字段：名称、截止日期、备注、分类、重复规则。
//! 编辑模式用当前任务的值预填。

use chrono::{Days, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::dialog_utils::{center_dialog, render_dialog_frame, render_hint};
use crate::model::{parse_deadline, Category, Repeat, Task, TaskDraft, TaskId, REPEAT_OCCURRENCES};
use crate::theme::ThemeColors;

/// 备注输入框可见行数
const MEMO_HEIGHT: u16 = 4;
/// 弹窗高度：边框 2 + 单行字段/留白 10 + 备注
const FORM_HEIGHT: u16 = 12 + MEMO_HEIGHT;
const FORM_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 10;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Deadline,
    Memo,
    Category,
    Repeat,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Name,
        FormField::Deadline,
        FormField::Memo,
        FormField::Category,
        FormField::Repeat,
        FormField::Submit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Task",
            FormField::Deadline => "Deadline",
            FormField::Memo => "Memo",
            FormField::Category => "Category",
            FormField::Repeat => "Repeat",
            FormField::Submit => "Save",
        }
    }

    fn index(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// 新建还是编辑某个任务
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(TaskId),
}

/// 表单数据
#[derive(Debug, Clone)]
pub struct TaskFormData {
    pub mode: FormMode,
    pub focus: FormField,
    pub name: String,
    /// 截止日期输入（`YYYY-MM-DD` 文本，提交时解析）
    pub deadline: String,
    pub memo: String,
    pub category: Category,
    pub repeat: Repeat,
    /// 校验失败的字段
    pub invalid: Option<FormField>,
}

impl TaskFormData {
    /// 新建任务，截止日期默认今天
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Add,
            focus: FormField::Name,
            name: String::new(),
            deadline: today.format(DATE_FORMAT).to_string(),
            memo: String::new(),
            category: Category::default(),
            repeat: Repeat::default(),
            invalid: None,
        }
    }

    /// 编辑任务，预填当前值
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            focus: FormField::Name,
            name: task.name.clone(),
            deadline: task.deadline.format(DATE_FORMAT).to_string(),
            memo: task.memo.clone(),
            category: task.category,
            repeat: task.repeat,
            invalid: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => " New Task ",
            FormMode::Edit(_) => " Edit Task ",
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// 输入字符；日期字段只接受数字和 '-'
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            FormField::Name => self.name.push(c),
            FormField::Memo => self.memo.push(c),
            FormField::Deadline => {
                if (c.is_ascii_digit() || c == '-') && self.deadline.len() < 10 {
                    self.deadline.push(c);
                }
            }
            FormField::Category | FormField::Repeat | FormField::Submit => return,
        }
        self.invalid = None;
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Memo => {
                self.memo.pop();
            }
            FormField::Deadline => {
                self.deadline.pop();
            }
            FormField::Category | FormField::Repeat | FormField::Submit => return,
        }
        self.invalid = None;
    }

    /// 备注内换行
    pub fn insert_newline(&mut self) {
        if self.focus == FormField::Memo {
            self.memo.push('\n');
        }
    }

    /// ← 键：日期减一天，选择器向前
    pub fn select_prev(&mut self) {
        match self.focus {
            FormField::Deadline => self.shift_deadline(-1),
            FormField::Category => self.category = self.category.prev(),
            FormField::Repeat => self.repeat = self.repeat.prev(),
            _ => {}
        }
    }

    /// → 键：日期加一天，选择器向后
    pub fn select_next(&mut self) {
        match self.focus {
            FormField::Deadline => self.shift_deadline(1),
            FormField::Category => self.category = self.category.next(),
            FormField::Repeat => self.repeat = self.repeat.next(),
            _ => {}
        }
    }

    /// 按天移动截止日期；当前输入无法解析时不动
    pub fn shift_deadline(&mut self, days: i64) {
        let Ok(current) = parse_deadline(&self.deadline) else {
            self.invalid = Some(FormField::Deadline);
            return;
        };
        let step = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            current.checked_add_days(step)
        } else {
            current.checked_sub_days(step)
        };
        if let Some(date) = shifted {
            self.deadline = date.format(DATE_FORMAT).to_string();
            self.invalid = None;
        }
    }

    /// 生成提交用的草稿；日期无法解析时标记错误并返回 `None`
    ///
    /// 名称只去掉首尾空白，不做非空检查（由 store 静默忽略）。
    pub fn to_draft(&mut self) -> Option<TaskDraft> {
        match parse_deadline(&self.deadline) {
            Ok(deadline) => Some(
                TaskDraft::new(self.name.trim(), deadline)
                    .memo(self.memo.clone())
                    .category(self.category)
                    .repeat(self.repeat),
            ),
            Err(_) => {
                self.invalid = Some(FormField::Deadline);
                self.focus = FormField::Deadline;
                None
            }
        }
    }

    /// 新建重复任务时会生成的任务数
    pub fn preview_count(&self) -> usize {
        match (self.mode, self.repeat) {
            (FormMode::Add, Repeat::Daily | Repeat::Weekly) => 1 + REPEAT_OCCURRENCES as usize,
            _ => 1,
        }
    }
}

/// 渲染任务表单弹窗
pub fn render(frame: &mut Frame, data: &TaskFormData, colors: &ThemeColors) {
    let width = FORM_WIDTH.min(frame.area().width.saturating_sub(4));
    let popup_area = center_dialog(frame.area(), width, FORM_HEIGHT);
    let inner_area = render_dialog_frame(frame, popup_area, data.title(), colors.highlight, colors);

    let [_, name_area, deadline_area, memo_area, category_area, repeat_area, _, preview_area, submit_area, _, hint_area] =
        Layout::vertical([
            Constraint::Length(1), // 顶部空行
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(MEMO_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1), // 空行
            Constraint::Length(1), // 预览行
            Constraint::Length(1), // 保存按钮
            Constraint::Length(1), // 空行
            Constraint::Length(1), // 提示行
        ])
        .areas(inner_area);

    render_text_field(frame, name_area, data, FormField::Name, &data.name, colors);
    render_text_field(frame, deadline_area, data, FormField::Deadline, &data.deadline, colors);
    render_memo(frame, memo_area, data, colors);
    render_selector(frame, category_area, data, FormField::Category, data.category.label(), colors);
    render_selector(frame, repeat_area, data, FormField::Repeat, data.repeat.label(), colors);
    render_preview(frame, preview_area, data, colors);
    render_submit(frame, submit_area, data, colors);

    let hints: &[(&str, &str)] = match data.focus {
        FormField::Deadline => &[("Tab", "next"), ("←/→", "±1 day"), ("^S", "save"), ("Esc", "cancel")],
        FormField::Category | FormField::Repeat => {
            &[("Tab", "next"), ("←/→", "change"), ("^S", "save"), ("Esc", "cancel")]
        }
        FormField::Memo => &[("Tab", "next"), ("Enter", "newline"), ("^S", "save"), ("Esc", "cancel")],
        _ => &[("Tab", "next"), ("Enter", "confirm"), ("^S", "save"), ("Esc", "cancel")],
    };
    render_hint(frame, hint_area, hints, colors);
}

fn label_span(data: &TaskFormData, field: FormField, colors: &ThemeColors) -> [Span<'static>; 2] {
    let focused = data.focus == field;
    let marker = if focused { "❯ " } else { "  " };
    let style = if data.invalid == Some(field) {
        Style::default().fg(colors.error).add_modifier(Modifier::BOLD)
    } else if focused {
        Style::default().fg(colors.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.muted)
    };
    [
        Span::styled(marker, Style::default().fg(colors.highlight)),
        Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), style),
    ]
}

fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    data: &TaskFormData,
    field: FormField,
    value: &str,
    colors: &ThemeColors,
) {
    let [marker, label] = label_span(data, field, colors);
    let mut spans = vec![marker, label, Span::styled(value.to_string(), Style::default().fg(colors.text))];
    if data.focus == field {
        spans.push(Span::styled("█", Style::default().fg(colors.highlight))); // 光标
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_memo(frame: &mut Frame, area: Rect, data: &TaskFormData, colors: &ThemeColors) {
    let [label_area, box_area] = Layout::horizontal([
        Constraint::Length(2 + LABEL_WIDTH as u16),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [marker, label] = label_span(data, FormField::Memo, colors);
    frame.render_widget(Paragraph::new(Line::from(vec![marker, label])), label_area);

    let focused = data.focus == FormField::Memo;
    let mut lines: Vec<Line> = data
        .memo
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(colors.text))))
        .collect();
    if focused {
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("█", Style::default().fg(colors.highlight)));
        }
    }

    // 只显示最后几行，保证光标可见
    let visible = MEMO_HEIGHT.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible.max(1));
    let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

    let border = if focused { colors.highlight } else { colors.border };
    let memo = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(memo, box_area.inner(ratatui::layout::Margin::new(1, 0)));
}

fn render_selector(
    frame: &mut Frame,
    area: Rect,
    data: &TaskFormData,
    field: FormField,
    value: &str,
    colors: &ThemeColors,
) {
    let focused = data.focus == field;
    let arrow_style = if focused {
        Style::default().fg(colors.highlight)
    } else {
        Style::default().fg(colors.muted)
    };
    let [marker, label] = label_span(data, field, colors);
    let line = Line::from(vec![
        marker,
        label,
        Span::styled("‹ ", arrow_style),
        Span::styled(value.to_string(), Style::default().fg(colors.text)),
        Span::styled(" ›", arrow_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_preview(frame: &mut Frame, area: Rect, data: &TaskFormData, colors: &ThemeColors) {
    let line = if data.invalid == Some(FormField::Deadline) {
        Line::from(Span::styled(
            "  Deadline must be YYYY-MM-DD",
            Style::default().fg(colors.error),
        ))
    } else if data.preview_count() > 1 {
        Line::from(vec![
            Span::styled("  → ", Style::default().fg(colors.status_done)),
            Span::styled(
                format!("{} tasks", data.preview_count()),
                Style::default()
                    .fg(colors.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({} repeat)", data.repeat.label().to_lowercase()),
                Style::default().fg(colors.muted),
            ),
        ])
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_submit(frame: &mut Frame, area: Rect, data: &TaskFormData, colors: &ThemeColors) {
    let focused = data.focus == FormField::Submit;
    let style = if focused {
        Style::default()
            .fg(colors.tab_active_fg)
            .bg(colors.tab_active_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.muted)
    };
    let label = match data.mode {
        FormMode::Add => "  Add  ",
        FormMode::Edit(_) => "  Save  ",
    };
    let line = Line::from(Span::styled(label, style)).centered();
    frame.render_widget(Paragraph::new(line), area);
}
