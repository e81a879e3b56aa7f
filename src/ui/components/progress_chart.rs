//! 完成率图表面板：左侧饼图（比例），右侧柱状图（数量）

use std::f64::consts::TAU;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Bar, BarChart, BarGroup, Block, Borders, Paragraph,
    },
    Frame,
};

use crate::model::CompletionStats;
use crate::theme::ThemeColors;

pub const DONE_COLOR: Color = Color::Rgb(0x4C, 0xAF, 0x50);
pub const NOT_DONE_COLOR: Color = Color::Rgb(0xFF, 0x6F, 0x61);

const DONE_LABEL: &str = "done";
const NOT_DONE_LABEL: &str = "not done";

/// 饼图采样网格密度（每个方向）
const PIE_STEPS: usize = 64;
/// 饼图半径外的留白
const PIE_MARGIN: f64 = 1.1;

/// 百分比文本，保留一位小数
pub fn percent_label(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}

/// 单位圆内的采样点，按扇区分成（完成，未完成）两组
///
/// 完成扇区从正东方向开始逆时针覆盖 `ratio * 360°`。
pub fn pie_points(ratio: f64, steps: usize) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let ratio = ratio.clamp(0.0, 1.0);
    let steps = steps.max(1);
    let mut done = Vec::new();
    let mut pending = Vec::new();

    for ix in 0..=steps {
        for iy in 0..=steps {
            let x = -1.0 + 2.0 * ix as f64 / steps as f64;
            let y = -1.0 + 2.0 * iy as f64 / steps as f64;
            if x * x + y * y > 1.0 {
                continue;
            }
            let mut angle = y.atan2(x);
            if angle < 0.0 {
                angle += TAU;
            }
            if angle < ratio * TAU {
                done.push((x, y));
            } else {
                pending.push((x, y));
            }
        }
    }

    (done, pending)
}

/// 画布坐标范围，使圆在终端字符（约 1:2）下保持圆形
pub fn pie_bounds(width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
    let w = width.max(1) as f64;
    let h = height.max(1) as f64 * 2.0;
    if w >= h {
        let half = PIE_MARGIN * w / h;
        ([-half, half], [-PIE_MARGIN, PIE_MARGIN])
    } else {
        let half = PIE_MARGIN * h / w;
        ([-PIE_MARGIN, PIE_MARGIN], [-half, half])
    }
}

/// 渲染图表面板
pub fn render(frame: &mut Frame, area: Rect, stats: CompletionStats, colors: &ThemeColors) {
    let block = Block::default()
        .title(" Progress ")
        .title_style(
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let Some(ratio) = stats.ratio() else {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No tasks to chart yet",
                Style::default().fg(colors.muted),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(placeholder, inner_area);
        return;
    };

    let [summary_area, chart_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner_area);

    let summary = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{}/{}", stats.done, stats.total),
            Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" done ({})", percent_label(stats.done, stats.total)),
            Style::default().fg(colors.muted),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(summary, summary_area);

    let [pie_area, bar_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(chart_area);

    render_pie(frame, pie_area, stats, ratio, colors);
    render_bars(frame, bar_area, stats, colors);
}

fn render_pie(
    frame: &mut Frame,
    area: Rect,
    stats: CompletionStats,
    ratio: f64,
    colors: &ThemeColors,
) {
    let [canvas_area, legend_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).areas(area);

    let (done, pending) = pie_points(ratio, PIE_STEPS);
    let (x_bounds, y_bounds) = pie_bounds(canvas_area.width, canvas_area.height);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(colors.bg)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &done,
                color: DONE_COLOR,
            });
            ctx.draw(&Points {
                coords: &pending,
                color: NOT_DONE_COLOR,
            });
        });
    frame.render_widget(canvas, canvas_area);

    let legend = Paragraph::new(vec![
        legend_line(DONE_LABEL, stats.done, stats.total, DONE_COLOR, colors),
        legend_line(NOT_DONE_LABEL, stats.pending(), stats.total, NOT_DONE_COLOR, colors),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(legend, legend_area);
}

fn legend_line(
    label: &'static str,
    count: usize,
    total: usize,
    swatch: Color,
    colors: &ThemeColors,
) -> Line<'static> {
    Line::from(vec![
        Span::styled("■ ", Style::default().fg(swatch)),
        Span::styled(label, Style::default().fg(colors.text)),
        Span::styled(
            format!(" {}", percent_label(count, total)),
            Style::default().fg(colors.muted),
        ),
    ])
}

fn render_bars(frame: &mut Frame, area: Rect, stats: CompletionStats, colors: &ThemeColors) {
    let bars = [
        Bar::default()
            .value(stats.done as u64)
            .label(Line::from(DONE_LABEL))
            .style(Style::default().fg(DONE_COLOR))
            .value_style(Style::default().fg(colors.bg).bg(DONE_COLOR)),
        Bar::default()
            .value(stats.pending() as u64)
            .label(Line::from(NOT_DONE_LABEL))
            .style(Style::default().fg(NOT_DONE_COLOR))
            .value_style(Style::default().fg(colors.bg).bg(NOT_DONE_COLOR)),
    ];

    // 两根柱子在可用宽度内居中
    let bar_width = (area.width.saturating_sub(6) / 2).clamp(1, 10);
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2)
        .label_style(Style::default().fg(colors.text))
        .max(stats.total as u64);

    let used = bar_width * 2 + 2;
    let [_, chart_area, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(used),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(chart, chart_area);
}
