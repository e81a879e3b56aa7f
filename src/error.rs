//! Tasklet 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，支持错误链式传播。

use std::io;
use thiserror::Error;

/// Tasklet 错误类型
#[derive(Debug, Error)]
pub enum TaskletError {
    /// I/O 错误（文件读写、目录操作等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Excel 导出错误
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),

    /// 日志初始化错误
    #[error("Logging error: {0}")]
    Logging(String),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// 无效数据
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Tasklet Result 类型别名
pub type Result<T> = std::result::Result<T, TaskletError>;

impl TaskletError {
    /// 创建 Config 错误
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// 创建 Logging 错误
    pub fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }

    /// 创建 InvalidData 错误
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskletError::config("home directory not found");
        assert_eq!(err.to_string(), "Config error: home directory not found");

        let err = TaskletError::invalid_data("bad date");
        assert_eq!(err.to_string(), "Invalid data: bad date");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: TaskletError = io_err.into();
        assert!(matches!(err, TaskletError::Io(_)));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: TaskletError = parse_err.into();
        assert!(matches!(err, TaskletError::TomlParse(_)));
    }
}
