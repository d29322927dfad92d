//! # 任务与结果模型
//!
//! 批量处理中流转的数据结构：任务、阶段、单任务结果与汇总报告。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `artifact/pipeline.rs`, `commands/generate.rs` 使用
//! - 使用 `csv` 导出报告

use crate::error::{ArtigenError, Result};

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// 扫描得到的单个待处理文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    path: PathBuf,
}

impl FileTask {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// 任务处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Generate,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Read => write!(f, "read"),
            Stage::Generate => write!(f, "generate"),
            Stage::Write => write!(f, "write"),
        }
    }
}

/// 单个文件处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// 处理成功，记录输出路径
    Success { output: PathBuf },
    /// 处理失败
    Failure {
        input: PathBuf,
        stage: Stage,
        error: String,
    },
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success { .. })
    }
}

/// 批量处理报告（按输入路径排序）
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: BTreeMap<PathBuf, TaskOutcome>,
}

impl BatchReport {
    /// 由各任务结果汇总
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (FileTask, TaskOutcome)>,
    {
        let outcomes = outcomes
            .into_iter()
            .map(|(task, outcome)| (task.path, outcome))
            .collect();
        Self { outcomes }
    }

    /// 总任务数
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// 按输入路径顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &TaskOutcome)> {
        self.outcomes.iter()
    }

    /// 成功任务的输出路径
    pub fn successes(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.values().filter_map(|o| match o {
            TaskOutcome::Success { output } => Some(output.as_path()),
            TaskOutcome::Failure { .. } => None,
        })
    }

    /// 失败详情 (输入路径, 阶段, 错误信息)
    pub fn failures(&self) -> impl Iterator<Item = (&Path, Stage, &str)> {
        self.outcomes.values().filter_map(|o| match o {
            TaskOutcome::Failure {
                input,
                stage,
                error,
            } => Some((input.as_path(), *stage, error.as_str())),
            TaskOutcome::Success { .. } => None,
        })
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// 导出报告为 CSV
    pub fn to_csv(&self, output_path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(output_path)?;

        wtr.write_record(["input", "status", "stage", "output", "error"])?;

        for (input, outcome) in self.iter() {
            let input = input.display().to_string();
            match outcome {
                TaskOutcome::Success { output } => {
                    let output = output.display().to_string();
                    wtr.write_record([input.as_str(), "success", "", output.as_str(), ""])?
                }
                TaskOutcome::Failure { stage, error, .. } => {
                    let stage = stage.to_string();
                    wtr.write_record([input.as_str(), "failure", stage.as_str(), "", error.as_str()])?
                }
            }
        }

        wtr.flush().map_err(|e| ArtigenError::FileWriteError {
            path: output_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }
}
