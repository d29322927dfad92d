//! # tests / doc 命令实现
//!
//! 把源文件发送给生成服务，写出单元测试或文档。
//!
//! ## 功能
//! - 单文件模式：内联执行流水线，任何错误都是致命错误
//! - 目录模式：扫描 → 并行派发 → 等待全部完成 → 按路径排序打印报告
//! - 可选导出 CSV 报告
//!
//! ## 依赖关系
//! - 使用 `cli/generate.rs` 定义的参数
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `artifact/` 模块执行单任务流水线
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::artifact::{
    run_task, ArtifactGenerator, ArtifactKind, GeminiConfig, GeminiGenerator, Language,
    TaskContext,
};
use crate::batch::{BatchReport, BatchRunner, FileCollector};
use crate::cli::generate::GenerateArgs;
use crate::error::{ArtigenError, Result};
use crate::utils::{output, progress};

use std::path::{Path, PathBuf};
use std::time::Duration;
use tabled::{Table, Tabled};

/// 输入模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// 单文件，输出路径缺省时自动推导
    Single {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    /// 递归处理目录
    Folder { root: PathBuf },
}

/// 生成命令配置（构造后不再修改）
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub kind: ArtifactKind,
    pub language: Language,
    pub mode: Mode,
    pub api_key: String,
    pub jobs: usize,
    pub excludes: Vec<String>,
    pub report: Option<PathBuf>,
    pub gemini: GeminiConfig,
}

impl GenerateConfig {
    /// 由命令行参数构造配置，先校验凭据再做其他事
    pub fn from_args(kind: ArtifactKind, args: GenerateArgs) -> Result<Self> {
        let api_key = args
            .key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ArtigenError::MissingCredential)?;

        let mode = match (args.file, args.folder) {
            (Some(input), None) => Mode::Single {
                input,
                output: args.output,
            },
            (None, Some(root)) => Mode::Folder { root },
            _ => {
                return Err(ArtigenError::InvalidArgument(
                    "You must specify exactly one of --file or --folder".to_string(),
                ))
            }
        };

        if args.timeout == 0 {
            return Err(ArtigenError::InvalidArgument(
                "--timeout must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            kind,
            language: args.lang,
            mode,
            api_key,
            jobs: args.jobs,
            excludes: args.exclude,
            report: args.report,
            gemini: GeminiConfig {
                endpoint: args.endpoint,
                model: args.model,
                timeout: Duration::from_secs(args.timeout),
            },
        })
    }
}

/// 执行 tests / doc 命令
pub fn execute(kind: ArtifactKind, args: GenerateArgs) -> Result<()> {
    let config = GenerateConfig::from_args(kind, args)?;

    output::print_header(&format!("Generating {} {}", config.language, config.kind));
    output::print_info(&format!("Using model: {}", config.gemini.model));

    let generator = GeminiGenerator::new(&config.gemini, config.kind, config.language)?;
    run(&config, &generator)
}

/// 使用给定生成器执行
pub fn run(config: &GenerateConfig, generator: &dyn ArtifactGenerator) -> Result<()> {
    let ctx = TaskContext {
        kind: config.kind,
        language: config.language,
        api_key: &config.api_key,
        generator,
    };

    match &config.mode {
        Mode::Single { input, output: explicit } => {
            execute_single_file(&ctx, input, explicit.as_deref())
        }
        Mode::Folder { root } => execute_batch(&ctx, config, root),
    }
}

/// 单文件模式
fn execute_single_file(
    ctx: &TaskContext<'_>,
    input: &Path,
    explicit_output: Option<&Path>,
) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", input.display()));

    let output_path = explicit_output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| ctx.output_for(input));

    let spinner = progress::create_spinner(&format!("Generating {}...", ctx.kind));
    let result = ctx.process(input, &output_path);
    spinner.finish_and_clear();

    let written = result?;
    output::print_generated(&written);
    Ok(())
}

/// 目录模式
fn execute_batch(ctx: &TaskContext<'_>, config: &GenerateConfig, root: &Path) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", root.display()));

    let tasks = FileCollector::new(root.to_path_buf(), config.language)
        .with_excludes(&config.excludes)?
        .collect()?;

    if tasks.is_empty() {
        output::print_warning(&format!(
            "No {} source files found in '{}', nothing to do",
            config.language,
            root.display()
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} source files", tasks.len()));
    tracing::info!(root = %root.display(), files = tasks.len(), kind = %config.kind, "starting batch");

    let report = BatchRunner::new(config.jobs).run(tasks, |task| run_task(ctx, task))?;

    print_report(&report);

    if let Some(path) = &config.report {
        report.to_csv(path)?;
        output::print_info(&format!("Report written to '{}'", path.display()));
    }

    Ok(())
}

/// 打印批量报告
fn print_report(report: &BatchReport) {
    #[derive(Tabled)]
    struct FailureRow {
        #[tabled(rename = "File")]
        file: String,
        #[tabled(rename = "Stage")]
        stage: String,
        #[tabled(rename = "Error")]
        error: String,
    }

    output::print_separator();
    for path in report.successes() {
        output::print_generated(path);
    }

    let rows: Vec<FailureRow> = report
        .failures()
        .map(|(input, stage, error)| FailureRow {
            file: input.display().to_string(),
            stage: stage.to_string(),
            error: error.split_whitespace().collect::<Vec<_>>().join(" "),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("Errors ({})", rows.len()));
        println!("{}", Table::new(&rows));
    }

    output::print_separator();
    output::print_done(&format!(
        "Batch complete: {} generated, {} failed",
        report.success_count(),
        report.failure_count()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenerationError, TaskError};
    use std::fs;

    struct EchoGenerator;

    impl ArtifactGenerator for EchoGenerator {
        fn generate(
            &self,
            source: &str,
            _api_key: &str,
        ) -> std::result::Result<String, GenerationError> {
            if source.contains("FAIL") {
                return Err(GenerationError::EmptyResponse);
            }
            Ok(format!("```go\n// tests for\n{}```", source))
        }
    }

    fn args(file: Option<&Path>, folder: Option<&Path>, key: Option<&str>) -> GenerateArgs {
        GenerateArgs {
            file: file.map(Path::to_path_buf),
            output: None,
            folder: folder.map(Path::to_path_buf),
            lang: Language::Go,
            key: key.map(str::to_string),
            jobs: 0,
            exclude: Vec::new(),
            report: None,
            model: "gemini-test".to_string(),
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout: 5,
        }
    }

    fn folder_config(root: &Path) -> GenerateConfig {
        GenerateConfig::from_args(ArtifactKind::Tests, args(None, Some(root), Some("k"))).unwrap()
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let err = GenerateConfig::from_args(
            ArtifactKind::Tests,
            args(Some(Path::new("a.go")), None, None),
        )
        .unwrap_err();
        assert!(matches!(err, ArtigenError::MissingCredential));

        let err = GenerateConfig::from_args(
            ArtifactKind::Docs,
            args(None, Some(Path::new("pkg")), Some("   ")),
        )
        .unwrap_err();
        assert!(matches!(err, ArtigenError::MissingCredential));
    }

    #[test]
    fn test_config_modes() {
        let config = GenerateConfig::from_args(
            ArtifactKind::Tests,
            args(Some(Path::new("a.go")), None, Some(" key ")),
        )
        .unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(
            config.mode,
            Mode::Single {
                input: PathBuf::from("a.go"),
                output: None
            }
        );

        let err =
            GenerateConfig::from_args(ArtifactKind::Tests, args(None, None, Some("k"))).unwrap_err();
        assert!(matches!(err, ArtigenError::InvalidArgument(_)));
    }

    #[test]
    fn test_folder_mode_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("util")).unwrap();
        fs::write(dir.path().join("util/num.go"), "package util\n").unwrap();
        fs::write(dir.path().join("util/strings.go"), "FAIL\n").unwrap();
        fs::write(dir.path().join("util/old_test.go"), "package util\n").unwrap();
        let report_path = dir.path().join("report.csv");

        let mut config = folder_config(dir.path());
        config.report = Some(report_path.clone());

        run(&config, &EchoGenerator).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("util/num_test.go")).unwrap(),
            "// tests for\npackage util\n"
        );
        assert!(!dir.path().join("util/strings_test.go").exists());
        // 已有的测试文件不会被当作输入
        assert!(!dir.path().join("util/old_test_test.go").exists());

        let csv = fs::read_to_string(report_path).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("strings.go,failure,generate"));
    }

    #[test]
    fn test_folder_mode_nothing_to_do() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "# hi").unwrap();

        run(&folder_config(dir.path()), &EchoGenerator).unwrap();

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_folder_mode_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&folder_config(&dir.path().join("missing")), &EchoGenerator).unwrap_err();
        assert!(matches!(err, ArtigenError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_single_file_mode_default_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stack.go");
        fs::write(&input, "package ds\n").unwrap();

        let config =
            GenerateConfig::from_args(ArtifactKind::Tests, args(Some(&input), None, Some("k")))
                .unwrap();
        run(&config, &EchoGenerator).unwrap();

        assert!(dir.path().join("stack_test.go").exists());
    }

    #[test]
    fn test_single_file_mode_explicit_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stack.go");
        let out = dir.path().join("generated.go");
        fs::write(&input, "package ds\n").unwrap();

        let mut a = args(Some(&input), None, Some("k"));
        a.output = Some(out.clone());
        let config = GenerateConfig::from_args(ArtifactKind::Tests, a).unwrap();
        run(&config, &EchoGenerator).unwrap();

        assert!(out.exists());
        assert!(!dir.path().join("stack_test.go").exists());
    }

    #[test]
    fn test_single_file_mode_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stack.go");
        fs::write(&input, "FAIL").unwrap();

        let config =
            GenerateConfig::from_args(ArtifactKind::Tests, args(Some(&input), None, Some("k")))
                .unwrap();
        let err = run(&config, &EchoGenerator).unwrap_err();

        assert!(matches!(err, ArtigenError::Task(TaskError::Generate { .. })));
        assert!(!dir.path().join("stack_test.go").exists());
    }

    #[test]
    fn test_single_file_mode_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.go");

        let config =
            GenerateConfig::from_args(ArtifactKind::Docs, args(Some(&input), None, Some("k")))
                .unwrap();
        let err = run(&config, &EchoGenerator).unwrap_err();

        assert!(matches!(err, ArtigenError::Task(TaskError::Read { .. })));
        assert!(!dir.path().join("missing_doc.md").exists());
    }
}
