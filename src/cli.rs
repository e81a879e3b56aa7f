//! CLI 参数

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "tasklet")]
#[command(version)]
#[command(about = "Terminal to-do list with deadlines, repeats, progress charts and Excel export")]
pub struct Cli {
    /// Color theme for this session (Auto, Dark, Light, Dracula, Nord, Gruvbox)
    #[arg(long)]
    pub theme: Option<String>,
    /// Where `x` writes the Excel export (default: todo_export.xlsx)
    #[arg(long)]
    pub export_path: Option<PathBuf>,
}
