mod app;
mod cli;
mod error;
mod event;
mod export;
mod logging;
mod model;
mod storage;
mod store;
mod theme;
mod ui;

use std::io;
use std::panic;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::info;

use app::App;
use cli::Cli;
use theme::Theme;

/// 启动 TUI 界面
fn run_tui(app: &mut App) -> io::Result<()> {
    // 初始化终端
    let mut terminal = ratatui::init();

    // 运行主循环
    let result = run(&mut terminal, app);

    // 恢复终端
    ratatui::restore();

    result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::home::render(frame, app))?;

        if !event::handle_events(app)? {
            break;
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 解析命令行参数
    let cli = Cli::parse();

    let config = storage::config::load_config();

    // 日志失败不影响使用
    match storage::logs_dir().and_then(|dir| logging::init(&dir, &config.log.level)) {
        Ok(path) => info!(log = %path.display(), version = env!("CARGO_PKG_VERSION"), "tasklet starting"),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }
    info!(
        theme = %config.theme.name,
        export = %config.export.path.display(),
        "config loaded"
    );

    let theme = cli.theme.as_deref().map(Theme::from_name);
    let mut app = App::new(config, theme, cli.export_path);

    let result = run_tui(&mut app);
    info!(tasks = app.store.len(), "tasklet exiting");
    result
}
