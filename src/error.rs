//! # 统一错误处理模块
//!
//! 定义 Artigen 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分层
//! - `ArtigenError`: 致命错误，直接中止命令
//! - `TaskError`: 单个文件任务的错误，批量模式下只记录不中止
//! - `GenerationError`: 远程生成服务的错误，统一归入 `generate` 阶段
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 使用 `batch/outcome.rs` 的 `Stage`

use crate::batch::Stage;
use thiserror::Error;

/// Artigen 统一错误类型
#[derive(Error, Debug)]
pub enum ArtigenError {
    // ─────────────────────────────────────────────────────────────
    // 扫描错误
    // ─────────────────────────────────────────────────────────────
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Failed to scan directory {path}: {source}")]
    Scan {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数 / 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Missing API key: pass --key or set the API_KEY environment variable")]
    MissingCredential,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 运行时错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Task(#[from] TaskError),

    // ─────────────────────────────────────────────────────────────
    // 报告输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },
}

/// 单个文件任务的错误
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to generate artifact for {path}: {source}")]
    Generate {
        path: String,
        #[source]
        source: GenerationError,
    },

    #[error("Failed to write file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker panicked during {stage} stage: {message}")]
    Panicked { stage: Stage, message: String },
}

impl TaskError {
    /// 错误发生的阶段
    pub fn stage(&self) -> Stage {
        match self {
            TaskError::Read { .. } => Stage::Read,
            TaskError::Generate { .. } => Stage::Generate,
            TaskError::Write { .. } => Stage::Write,
            TaskError::Panicked { stage, .. } => *stage,
        }
    }
}

/// 远程生成服务错误
///
/// 调用方无法区分这些情况，统一视为生成失败。
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("no content in API response")]
    EmptyResponse,
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ArtigenError>;
