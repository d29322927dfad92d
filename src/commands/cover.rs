//! # cover / view-cover 命令实现
//!
//! 调用 Go 工具链运行测试、生成并查看覆盖率文件。
//!
//! ## 依赖关系
//! - 使用 `cli/cover.rs` 定义的参数
//! - 使用 `utils/output.rs`

use crate::cli::cover::{CoverArgs, ViewCoverArgs};
use crate::error::{ArtigenError, Result};
use crate::utils::output;

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

const GO: &str = "go";
const DEFAULT_PACKAGE: &str = "./...";

/// 执行 cover 命令
pub fn execute_cover(args: CoverArgs) -> Result<()> {
    let package = args.package.as_deref().unwrap_or(DEFAULT_PACKAGE);

    output::print_info(&format!("Running tests for package: {}", package));
    run_go(&cover_args(package, &args.output))?;

    output::print_done(&format!(
        "Coverage profile generated: {}",
        args.output.display()
    ));
    Ok(())
}

/// 执行 view-cover 命令
pub fn execute_view_cover(args: ViewCoverArgs) -> Result<()> {
    if !args.input.is_file() {
        return Err(ArtigenError::InvalidArgument(format!(
            "Coverage profile not found: {}",
            args.input.display()
        )));
    }

    output::print_info(&format!(
        "Opening coverage visualization for: {}",
        args.input.display()
    ));
    run_go(&view_cover_args(&args.input))
}

fn cover_args(package: &str, profile: &Path) -> Vec<String> {
    vec![
        "test".to_string(),
        package.to_string(),
        "-coverprofile".to_string(),
        profile.display().to_string(),
    ]
}

fn view_cover_args(profile: &Path) -> Vec<String> {
    vec![
        "tool".to_string(),
        "cover".to_string(),
        "-html".to_string(),
        profile.display().to_string(),
    ]
}

/// 运行 go 命令，继承标准输入输出
fn run_go(args: &[String]) -> Result<()> {
    let command_line = format!("{} {}", GO, args.join(" "));
    tracing::debug!(command = %command_line, "running external command");

    let status = Command::new(GO).args(args).status().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ArtigenError::CommandNotFound {
                command: GO.to_string(),
            }
        } else {
            ArtigenError::CommandFailed {
                command: command_line.clone(),
                stderr: e.to_string(),
            }
        }
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(ArtigenError::CommandFailed {
            command: command_line,
            stderr: format!("exited with {}", status),
        })
    }
}
