//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `artifact/`, `utils/`
//! - 子模块: generate, cover

pub mod cover;
pub mod generate;

use crate::artifact::ArtifactKind;
use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Tests(args) => generate::execute(ArtifactKind::Tests, args),
        Commands::Doc(args) => generate::execute(ArtifactKind::Docs, args),
        Commands::Cover(args) => cover::execute_cover(args),
        Commands::ViewCover(args) => cover::execute_view_cover(args),
    }
}
