//! # Artigen - 基于 LLM 的单元测试与文档生成工具
//!
//! 把源文件发送给远程大模型，生成单元测试或 Markdown 文档并写回源文件旁。
//!
//! ## 子命令
//! - `tests` - 生成单元测试（单文件 / 目录并行）
//! - `doc` - 生成文档（单文件 / 目录并行）
//! - `cover` - 运行 Go 测试并生成覆盖率文件
//! - `view-cover` - 在浏览器中查看覆盖率
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (目录扫描、并行派发、报告)
//!   │     └── artifact/  (单任务流水线、生成客户端、后处理)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod artifact;
mod batch;
mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = commands::run(cli.command) {
        tracing::debug!(error = ?e, "command failed");
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

/// 初始化日志（输出到 stderr，RUST_LOG 优先）
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "artigen=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
