//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `tests`: 生成单元测试
//! - `doc`: 生成 Markdown 文档
//! - `cover`: 运行测试并生成覆盖率文件
//! - `view-cover`: 在浏览器中查看覆盖率
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: generate, cover

pub mod cover;
pub mod generate;

use clap::{Parser, Subcommand};

/// Artigen - 基于 LLM 的测试与文档生成工具
#[derive(Parser, Debug)]
#[command(name = "artigen")]
#[command(version)]
#[command(about = "Generate unit tests and documentation for source files with a remote LLM", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate unit tests for a source file or every source file in a folder
    Tests(generate::GenerateArgs),

    /// Generate Markdown documentation for a source file or folder
    Doc(generate::GenerateArgs),

    /// Run Go tests and write a coverage profile
    Cover(cover::CoverArgs),

    /// Open a coverage profile in the browser
    ViewCover(cover::ViewCoverArgs),
}
