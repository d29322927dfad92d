//! # 批量处理模块
//!
//! 目录模式下的并行文件处理。
//!
//! ## 功能
//! - 扫描根目录，收集待处理文件
//! - 并行派发，每个文件一个任务
//! - 等待全部任务完成，汇总为按路径排序的报告
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod outcome;
pub mod runner;

pub use collector::FileCollector;
pub use outcome::{BatchReport, FileTask, Stage, TaskOutcome};
pub use runner::BatchRunner;
