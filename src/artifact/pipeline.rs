//! # 单任务流水线
//!
//! 每个文件依次经过：读取 → 生成 → 后处理 → 写入。
//! 任一步失败即短路为该任务的失败结果，不影响其他任务。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 调用（单文件模式直接调用，目录模式经 `BatchRunner`）
//! - 使用 `artifact/gemini.rs`, `artifact/postprocess.rs`, `artifact/writer.rs`

use super::{writer, ArtifactGenerator, ArtifactKind, Language};
use crate::batch::{FileTask, Stage, TaskOutcome};
use crate::error::TaskError;

use std::any::Any;
use std::cell::Cell;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// 任务执行上下文（所有任务共享，只读）
pub struct TaskContext<'a> {
    pub kind: ArtifactKind,
    pub language: Language,
    pub api_key: &'a str,
    pub generator: &'a dyn ArtifactGenerator,
}

impl TaskContext<'_> {
    /// 输入文件对应的默认输出路径
    pub fn output_for(&self, input: &Path) -> PathBuf {
        self.kind.output_path(self.language, input)
    }

    /// 处理单个文件，返回输出路径
    pub fn process(&self, input: &Path, output: &Path) -> Result<PathBuf, TaskError> {
        self.process_tracked(input, output, &Cell::new(Stage::Read))
    }

    fn process_tracked(
        &self,
        input: &Path,
        output: &Path,
        stage: &Cell<Stage>,
    ) -> Result<PathBuf, TaskError> {
        stage.set(Stage::Read);
        let source = fs::read_to_string(input).map_err(|e| TaskError::Read {
            path: input.display().to_string(),
            source: e,
        })?;

        stage.set(Stage::Generate);
        let raw = self
            .generator
            .generate(&source, self.api_key)
            .map_err(|e| TaskError::Generate {
                path: input.display().to_string(),
                source: e,
            })?;
        let artifact = self.kind.post_process(self.language, &raw);

        stage.set(Stage::Write);
        writer::write_atomic(output, &artifact).map_err(|e| TaskError::Write {
            path: output.display().to_string(),
            source: e,
        })?;

        tracing::debug!(input = %input.display(), output = %output.display(), "artifact written");
        Ok(output.to_path_buf())
    }
}

/// 批量模式下处理单个任务
///
/// 总是返回结果：错误和 panic 都被转换为 `TaskOutcome::Failure`。
pub fn run_task(ctx: &TaskContext<'_>, task: &FileTask) -> TaskOutcome {
    let input = task.path();
    let output = ctx.output_for(input);
    let stage = Cell::new(Stage::Read);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        ctx.process_tracked(input, &output, &stage)
    }))
    .unwrap_or_else(|payload| {
        Err(TaskError::Panicked {
            stage: stage.get(),
            message: panic_message(payload.as_ref()),
        })
    });

    match result {
        Ok(output) => TaskOutcome::Success { output },
        Err(e) => {
            tracing::debug!(input = %input.display(), stage = %e.stage(), error = %e, "task failed");
            TaskOutcome::Failure {
                input: input.to_path_buf(),
                stage: e.stage(),
                error: e.to_string(),
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
