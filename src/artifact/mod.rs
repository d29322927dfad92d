//! # 产物模块
//!
//! 源文件到生成产物（单元测试 / 文档）的完整处理链路。
//!
//! ## 子模块
//! - `gemini`: 远程生成服务客户端
//! - `prompt`: 提示词模板
//! - `postprocess`: 生成文本清理
//! - `writer`: 原子写入
//! - `pipeline`: 单任务四步流水线（读取 → 生成 → 后处理 → 写入）
//!
//! ## 依赖关系
//! - 被 `batch/`, `commands/generate.rs` 使用

pub mod gemini;
pub mod pipeline;
pub mod postprocess;
pub mod prompt;
pub mod writer;

pub use gemini::{ArtifactGenerator, GeminiConfig, GeminiGenerator};
pub use pipeline::{run_task, TaskContext};

use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};

/// 源语言
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Language {
    /// Go (*.go, tests in *_test.go)
    Go,
    /// Python (*.py, tests in test_*.py)
    Python,
    /// Rust (*.rs, tests in *_test.rs)
    Rust,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Go => write!(f, "Go"),
            Language::Python => write!(f, "Python"),
            Language::Rust => write!(f, "Rust"),
        }
    }
}

impl Language {
    /// 源文件扩展名
    pub fn extension(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Python => "py",
            Language::Rust => "rs",
        }
    }

    /// Markdown 代码块标记
    pub fn fence_tag(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Python => "python",
            Language::Rust => "rust",
        }
    }

    /// 测试框架描述（用于提示词）
    pub fn test_framework(self) -> &'static str {
        match self {
            Language::Go => "the standard testing package",
            Language::Python => "pytest",
            Language::Rust => "the built-in #[test] harness",
        }
    }

    /// 是否为该语言的源文件
    pub fn is_source(self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension())
    }

    /// 是否为已生成的测试文件
    pub fn is_generated_test(self, path: &Path) -> bool {
        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => return false,
        };
        match self {
            Language::Go | Language::Rust => stem.ends_with("_test"),
            Language::Python => stem.starts_with("test_") || stem.ends_with("_test"),
        }
    }

    /// 测试文件名
    fn test_file_name(self, stem: &str) -> String {
        match self {
            Language::Go => format!("{}_test.go", stem),
            Language::Python => format!("test_{}.py", stem),
            Language::Rust => format!("{}_test.rs", stem),
        }
    }
}

/// 产物类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// 单元测试代码
    Tests,
    /// Markdown 文档
    Docs,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Tests => write!(f, "tests"),
            ArtifactKind::Docs => write!(f, "documentation"),
        }
    }
}

impl ArtifactKind {
    /// 由输入路径推导输出路径（同目录）
    pub fn output_path(self, language: Language, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");

        let name = match self {
            ArtifactKind::Tests => language.test_file_name(stem),
            ArtifactKind::Docs => format!("{}_doc.md", stem),
        };

        input.with_file_name(name)
    }

    /// 对生成文本做后处理
    pub fn post_process(self, language: Language, text: &str) -> String {
        match self {
            ArtifactKind::Tests => postprocess::clean_code(text, language),
            ArtifactKind::Docs => postprocess::clean_markdown(text),
        }
    }
}
