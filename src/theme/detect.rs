//! 系统主题检测

use std::process::Command;

/// 检测系统/终端是否为深色模式
///
/// 优先读取终端导出的 `COLORFGBG`（格式 "前景;背景"），
/// 其次在 macOS 上读取 AppleInterfaceStyle，都拿不到时按深色处理。
pub fn detect_system_theme() -> bool {
    if let Ok(value) = std::env::var("COLORFGBG") {
        if let Some(dark) = parse_colorfgbg(&value) {
            return dark;
        }
    }

    if cfg!(target_os = "macos") {
        return Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            .map(|output| {
                output.status.success()
                    && String::from_utf8_lossy(&output.stdout)
                        .trim()
                        .eq_ignore_ascii_case("dark")
            })
            .unwrap_or(false);
    }

    true
}

/// 解析 COLORFGBG，背景色为 0-6 或 8 视为深色
fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(bg < 7 || bg == 8)
}
