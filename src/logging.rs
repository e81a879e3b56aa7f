//! 文件日志初始化
//!
//! TUI 占用终端，日志只能写文件：`~/.tasklet/logs/tasklet.log`（追加）。
//! 过滤表达式优先读 `TASKLET_LOG` 环境变量，其次是配置中的 `[log] level`。

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Result, TaskletError};

/// 日志过滤环境变量
pub const LOG_ENV: &str = "TASKLET_LOG";

const LOG_FILE_NAME: &str = "tasklet.log";

/// 初始化全局 subscriber，返回日志文件路径
pub fn init(log_dir: &Path, default_level: &str) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(std::env::var(LOG_ENV).ok().as_deref(), default_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| TaskletError::logging(e.to_string()))?;

    Ok(path)
}

/// 环境变量 > 配置 > "info"，无法解析的表达式逐级回退
fn build_filter(env_value: Option<&str>, default_level: &str) -> EnvFilter {
    env_value
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_new(default_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
