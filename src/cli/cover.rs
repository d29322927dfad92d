//! # cover / view-cover 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/cover.rs`

use clap::Args;
use std::path::PathBuf;

/// cover 子命令参数
#[derive(Args, Debug)]
pub struct CoverArgs {
    /// Coverage profile filename
    #[arg(short, long, default_value = "coverage.out")]
    pub output: PathBuf,

    /// Package to test (default './...')
    #[arg(short, long)]
    pub package: Option<String>,
}

/// view-cover 子命令参数
#[derive(Args, Debug)]
pub struct ViewCoverArgs {
    /// Coverage profile filename
    #[arg(short, long, default_value = "coverage.out")]
    pub input: PathBuf,
}
