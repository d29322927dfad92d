//! # tests / doc 子命令 CLI 定义
//!
//! 两个子命令共享同一组参数，只是产物类型不同。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/generate.rs`

use crate::artifact::Language;
use clap::{ArgGroup, Args};
use std::path::PathBuf;

/// tests / doc 子命令参数
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "folder"])))]
pub struct GenerateArgs {
    /// Input source file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output file (single file mode only)
    #[arg(short, long, conflicts_with = "folder")]
    pub output: Option<PathBuf>,

    /// Input folder (recursively processes every source file)
    #[arg(short = 'd', long)]
    pub folder: Option<PathBuf>,

    /// Source language
    #[arg(long, value_enum, default_value = "go")]
    pub lang: Language,

    /// API key for the generation service
    #[arg(short, long, env = "API_KEY", hide_env_values = true)]
    pub key: Option<String>,

    // ─────────────────────────────────────────────────────────────
    // Folder mode options
    // ─────────────────────────────────────────────────────────────
    /// Number of parallel jobs (0 = one per file)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// File name patterns to skip (comma-separated globs, e.g. '*.pb.go')
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Also write the batch report to this CSV file
    #[arg(long, conflicts_with = "file")]
    pub report: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────
    // Generation service options
    // ─────────────────────────────────────────────────────────────
    /// Model name
    #[arg(long, env = "ARTIGEN_MODEL", default_value = crate::artifact::gemini::DEFAULT_MODEL)]
    pub model: String,

    /// API base URL
    #[arg(long, env = "ARTIGEN_ENDPOINT", default_value = crate::artifact::gemini::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,
}
