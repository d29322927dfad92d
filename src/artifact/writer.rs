//! # 原子写入
//!
//! 先写入目标目录下的临时文件，再重命名到目标路径。
//! 读者只会看到旧文件或完整的新文件；失败时临时文件被删除。
//!
//! ## 依赖关系
//! - 被 `artifact/pipeline.rs` 调用
//! - 使用 `tempfile`

use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// 原子写入文本内容（覆盖已有文件）
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
