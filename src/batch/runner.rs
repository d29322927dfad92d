//! # 批量执行器
//!
//! 并行执行批量处理任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，默认每个文件一个工作线程
//! - 进度条显示
//! - 等待全部任务完成后汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::batch::{BatchReport, FileTask, TaskOutcome};
use crate::error::Result;
use crate::utils::progress;

use rayon::prelude::*;

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数，0 表示不限制（每个任务一个线程）
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(jobs: usize) -> Self {
        Self { jobs }
    }

    /// 实际线程数
    fn pool_size(&self, tasks: usize) -> usize {
        let fan_out = tasks.max(1);
        if self.jobs == 0 {
            fan_out
        } else {
            self.jobs.min(fan_out)
        }
    }

    /// 并行处理任务列表
    ///
    /// `processor` 必须对每个任务返回结果；报告条目数与任务数一致。
    pub fn run<F>(&self, tasks: Vec<FileTask>, processor: F) -> Result<BatchReport>
    where
        F: Fn(&FileTask) -> TaskOutcome + Sync + Send,
    {
        let total = tasks.len();
        let pb = progress::create_progress_bar(total as u64, "Generating");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.pool_size(total))
            .thread_name(|i| format!("artigen-worker-{}", i))
            .build()?;

        tracing::debug!(tasks = total, threads = pool.current_num_threads(), "dispatching batch");

        let results: Vec<(FileTask, TaskOutcome)> = pool.install(|| {
            tasks
                .into_par_iter()
                .map(|task| {
                    let outcome = processor(&task);
                    pb.inc(1);
                    (task, outcome)
                })
                .collect()
        });

        pb.finish_and_clear();

        let report = BatchReport::from_outcomes(results);
        debug_assert_eq!(report.len(), total);
        Ok(report)
    }
}
