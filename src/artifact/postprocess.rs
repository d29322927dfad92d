//! # 生成文本后处理
//!
//! 纯函数，不会失败。
//!
//! ## 功能
//! - 测试代码：提取 Markdown 代码块正文
//! - 文档：清理模型输出中常见的 Markdown 瑕疵
//!
//! ## 依赖关系
//! - 被 `artifact/mod.rs` 的 `ArtifactKind::post_process` 调用
//! - 使用 `regex`

use super::Language;

use regex::Regex;
use std::sync::OnceLock;

const FENCE: &str = "```";

/// 清理生成的测试代码
pub fn clean_code(text: &str, language: Language) -> String {
    let body = extract_code_block(text, language.fence_tag());
    with_trailing_newline(body.trim())
}

/// 提取代码块正文
///
/// 优先匹配带语言标记的代码块，其次任意代码块，截止到最后一个围栏。
/// 没有围栏时原样返回；围栏未闭合时返回开头围栏之后的全部内容。
fn extract_code_block<'a>(content: &'a str, tag: &str) -> &'a str {
    let tagged = format!("{}{}", FENCE, tag);

    let open = match content.find(&tagged).or_else(|| content.find(FENCE)) {
        Some(i) => i,
        None => return content,
    };

    // 跳过围栏所在行（含 info string）
    let start = match content[open..].find('\n') {
        Some(nl) => open + nl + 1,
        None => return content,
    };

    match content[start..].rfind(FENCE) {
        Some(end) => &content[start..start + end],
        None => &content[start..],
    }
}

fn bold_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\*\*[ \t]*([^*\n]*?[^*\s])[ \t]*\*\*").expect("bold marker regex")
    })
}

/// 清理生成的 Markdown 文档
pub fn clean_markdown(text: &str) -> String {
    let text = strip_wrapping_fence(text.trim());

    let mut lines: Vec<String> = Vec::new();
    let mut in_fence = false;
    let mut blank_run = 0;

    for line in text.lines() {
        let line = line.trim_end();

        if line.trim_start().starts_with(FENCE) {
            in_fence = !in_fence;
            blank_run = 0;
            lines.push(line.to_string());
            continue;
        }

        if in_fence {
            lines.push(line.to_string());
            continue;
        }

        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }

        lines.push(bold_marker().replace_all(line, "**$1**").into_owned());
    }

    with_trailing_newline(lines.join("\n").trim())
}

/// 去掉包裹整篇文档的 ```markdown 围栏
fn strip_wrapping_fence(text: &str) -> &str {
    let first_line = text.lines().next().unwrap_or_default().trim();
    let wrapped = matches!(first_line, "```markdown" | "```md") && text.ends_with(FENCE);
    if !wrapped {
        return text;
    }

    let body_start = text.find('\n').map(|i| i + 1).unwrap_or(text.len());
    let body_end = text.len() - FENCE.len();
    if body_start >= body_end {
        return "";
    }
    text[body_start..body_end].trim()
}

fn with_trailing_newline(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("{}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_code_tagged_fence() {
        let raw = "Here are your tests:\n\n```go\npackage util\n\nfunc TestAdd(t *testing.T) {}\n```\n\nEnjoy!";
        assert_eq!(
            clean_code(raw, Language::Go),
            "package util\n\nfunc TestAdd(t *testing.T) {}\n"
        );
    }

    #[test]
    fn test_clean_code_untagged_fence() {
        let raw = "```\ndef test_x():\n    assert True\n```";
        assert_eq!(
            clean_code(raw, Language::Python),
            "def test_x():\n    assert True\n"
        );
    }

    #[test]
    fn test_clean_code_prefers_language_tag() {
        let raw = "```text\nnotes\n```\n```rust\n#[test]\nfn it_works() {}\n```";
        assert_eq!(clean_code(raw, Language::Rust), "#[test]\nfn it_works() {}\n");
    }

    #[test]
    fn test_clean_code_without_fence() {
        assert_eq!(
            clean_code("package util\n", Language::Go),
            "package util\n"
        );
    }

    #[test]
    fn test_clean_code_unterminated_fence() {
        assert_eq!(
            clean_code("```go\npackage util\nfunc TestA(", Language::Go),
            "package util\nfunc TestA(\n"
        );
    }

    #[test]
    fn test_clean_markdown_strips_wrapper() {
        let raw = "```markdown\n# Stack\n\nA LIFO stack.\n```";
        assert_eq!(clean_markdown(raw), "# Stack\n\nA LIFO stack.\n");
    }

    #[test]
    fn test_clean_markdown_tightens_bold() {
        assert_eq!(
            clean_markdown("- ** Push ** adds an item\n- **Pop ** removes one"),
            "- **Push** adds an item\n- **Pop** removes one\n"
        );
    }

    #[test]
    fn test_clean_markdown_keeps_code_blocks() {
        let raw = "# Pow\n\n```python\nx = 2 ** 3 ** 2\n\n\n\ny = x\n```   \n";
        assert_eq!(
            clean_markdown(raw),
            "# Pow\n\n```python\nx = 2 ** 3 ** 2\n\n\n\ny = x\n```\n"
        );
    }

    #[test]
    fn test_clean_markdown_collapses_blank_lines() {
        assert_eq!(
            clean_markdown("# A   \n\n\n\nText\t\n\n\n## B"),
            "# A\n\nText\n\n## B\n"
        );
    }

    #[test]
    fn test_clean_markdown_is_idempotent() {
        let once = clean_markdown("```md\n# T\n\n\n** bold **\n```");
        assert_eq!(clean_markdown(&once), once);
    }
}
