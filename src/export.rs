//! 导出任务列表到 Excel
//!
//! 导出整个任务集合（不受当前排序/过滤影响），表头为字段名，每个任务一行。
//! 目标文件已存在时直接覆盖。

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::error::Result;
use crate::model::Task;

/// 默认导出路径（相对当前目录）
pub const DEFAULT_EXPORT_PATH: &str = "todo_export.xlsx";

/// 工作表名称
pub const SHEET_NAME: &str = "Tasks";

/// 表头，与 `Task` 字段顺序一致
pub const HEADERS: [&str; 8] = [
    "id",
    "name",
    "deadline",
    "memo",
    "category",
    "completed",
    "created",
    "repeat",
];

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 将任务写入 `path`
pub fn export_to_spreadsheet(tasks: &[Task], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, task) in tasks.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, task.id.to_string())?;
        worksheet.write_string(row, 1, task.name.as_str())?;
        worksheet.write_string(row, 2, task.deadline.format(DATE_FORMAT).to_string())?;
        worksheet.write_string(row, 3, task.memo.as_str())?;
        worksheet.write_string(row, 4, task.category.label())?;
        worksheet.write_boolean(row, 5, task.completed)?;
        worksheet.write_string(row, 6, task.created.format(DATETIME_FORMAT).to_string())?;
        worksheet.write_string(row, 7, task.repeat.label())?;
    }

    worksheet.set_column_width(0, 38)?;
    worksheet.set_column_width(1, 24)?;
    worksheet.set_column_width(3, 32)?;
    worksheet.set_column_width(6, 20)?;

    workbook.save(path)?;
    info!(path = %path.display(), count = tasks.len(), "tasks exported");
    Ok(())
}
