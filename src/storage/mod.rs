//! `~/.tasklet/` 目录下的本地文件（配置与日志）
//!
//! 任务本身从不落盘。

pub mod config;

use std::path::{Path, PathBuf};

use crate::error::{Result, TaskletError};

/// 获取 ~/.tasklet/ 目录路径
pub fn tasklet_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".tasklet"))
        .ok_or_else(|| TaskletError::config("Cannot find home directory"))
}

/// 日志目录: ~/.tasklet/logs/
pub fn logs_dir() -> Result<PathBuf> {
    Ok(tasklet_dir()?.join("logs"))
}

/// 从 TOML 文件加载反序列化数据
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// 将数据序列化后保存到 TOML 文件（自动创建父目录）
pub fn save_toml<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(data)?;
    std::fs::write(path, content)?;
    Ok(())
}
