//! # 文件收集器
//!
//! 递归扫描根目录，收集待生成产物的源文件列表。
//!
//! ## 功能
//! - 按语言扩展名过滤
//! - 排除已生成的测试文件
//! - glob 排除模式
//! - 按文件名排序，结果确定
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 调用
//! - 使用 `artifact::Language` 判断文件类型
//! - 使用 `walkdir` 遍历目录

use crate::artifact::Language;
use crate::batch::FileTask;
use crate::error::{ArtigenError, Result};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 扫描根目录
    root: PathBuf,
    /// 源语言
    language: Language,
    /// 排除模式列表（匹配文件名）
    excludes: Vec<Pattern>,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(root: PathBuf, language: Language) -> Self {
        Self {
            root,
            language,
            excludes: Vec::new(),
        }
    }

    /// 设置排除模式（逗号分隔的多模式）
    pub fn with_excludes(mut self, patterns: &[String]) -> Result<Self> {
        self.excludes = patterns
            .iter()
            .flat_map(|p| p.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    ArtigenError::InvalidArgument(format!("Invalid exclude pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    /// 收集所有符合条件的文件
    ///
    /// 根目录不可读时返回错误；子目录中的错误只记录警告并跳过。
    pub fn collect(&self) -> Result<Vec<FileTask>> {
        if !self.root.exists() {
            return Err(ArtigenError::DirectoryNotFound {
                path: self.root.display().to_string(),
            });
        }
        if !self.root.is_dir() {
            return Err(ArtigenError::NotADirectory {
                path: self.root.display().to_string(),
            });
        }

        let mut tasks = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ArtigenError::Scan {
                        path: self.root.display().to_string(),
                        source: e,
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_file() && self.is_eligible(entry.path()) {
                tasks.push(FileTask::new(entry.into_path()));
            }
        }

        tracing::debug!(root = %self.root.display(), count = tasks.len(), "scan finished");
        Ok(tasks)
    }

    /// 检查文件是否应被处理
    fn is_eligible(&self, path: &Path) -> bool {
        if !self.language.is_source(path) || self.language.is_generated_test(path) {
            return false;
        }

        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        !self.excludes.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "package x\n").unwrap();
    }

    fn relative(root: &Path, tasks: &[FileTask]) -> Vec<String> {
        tasks
            .iter()
            .map(|t| {
                t.path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_collect_recursive_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "util/strings.go");
        touch(dir.path(), "util/num.go");
        touch(dir.path(), "util/num_test.go");
        touch(dir.path(), "ds/stack.go");
        touch(dir.path(), "README.md");
        touch(dir.path(), "main.py");

        let tasks = FileCollector::new(dir.path().to_path_buf(), Language::Go)
            .collect()
            .unwrap();

        assert_eq!(
            relative(dir.path(), &tasks),
            vec!["ds/stack.go", "util/num.go", "util/strings.go"]
        );
    }

    #[test]
    fn test_collect_with_excludes() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.go");
        touch(dir.path(), "b.pb.go");
        touch(dir.path(), "gen/c_mock.go");

        let tasks = FileCollector::new(dir.path().to_path_buf(), Language::Go)
            .with_excludes(&["*.pb.go, *_mock.go".to_string()])
            .unwrap()
            .collect()
            .unwrap();

        assert_eq!(relative(dir.path(), &tasks), vec!["a.go"]);
    }

    #[test]
    fn test_collect_python_skips_test_modules() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "analyzer.py");
        touch(dir.path(), "test_analyzer.py");

        let tasks = FileCollector::new(dir.path().to_path_buf(), Language::Python)
            .collect()
            .unwrap();

        assert_eq!(relative(dir.path(), &tasks), vec!["analyzer.py"]);
    }

    #[test]
    fn test_collect_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.txt");

        let tasks = FileCollector::new(dir.path().to_path_buf(), Language::Go)
            .collect()
            .unwrap();

        assert!(tasks.is_empty());
    }

    #[test]
    fn test_collect_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = FileCollector::new(missing, Language::Go)
            .collect()
            .unwrap_err();

        assert!(matches!(err, ArtigenError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_collect_root_is_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "main.go");

        let err = FileCollector::new(dir.path().join("main.go"), Language::Go)
            .collect()
            .unwrap_err();

        assert!(matches!(err, ArtigenError::NotADirectory { .. }));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let result = FileCollector::new(PathBuf::from("."), Language::Go)
            .with_excludes(&["[".to_string()]);
        assert!(matches!(result, Err(ArtigenError::InvalidArgument(_))));
    }
}
