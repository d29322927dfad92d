//! # 提示词模板
//!
//! 根据产物类型与源语言拼装发送给模型的提示词。
//!
//! ## 依赖关系
//! - 被 `artifact/gemini.rs` 使用

use super::{ArtifactKind, Language};

/// 提示词模板
#[derive(Debug, Clone, Copy)]
pub struct Prompt {
    kind: ArtifactKind,
    language: Language,
}

impl Prompt {
    pub fn new(kind: ArtifactKind, language: Language) -> Self {
        Self { kind, language }
    }

    /// 拼装完整提示词
    pub fn render(&self, source: &str) -> String {
        match self.kind {
            ArtifactKind::Tests => self.render_tests(source),
            ArtifactKind::Docs => self.render_docs(source),
        }
    }

    fn render_tests(&self, source: &str) -> String {
        let lang = self.language;
        format!(
            r#"You are an expert {lang} developer. Write unit tests for the code below using {framework}.
Requirements:
1. Output a single complete {lang} test file that compiles as-is.
2. Prefer table-driven tests and descriptive test names.
3. Cover edge cases, boundary values, zero values and error returns.
4. Add benchmarks where the language supports them and they make sense.
5. Only import what the tests actually use.
6. Reply with one ```{fence} code block and no explanations.

{lang} code:

{source}"#,
            lang = lang,
            framework = lang.test_framework(),
            fence = lang.fence_tag(),
            source = source,
        )
    }

    fn render_docs(&self, source: &str) -> String {
        let lang = self.language;
        format!(
            r#"You are an expert {lang} documentation writer. Document the code below.
Include:
1. An overview of the module or package
2. Every function with its parameters and return values
3. Type definitions and what they are for
4. Usage examples where helpful
5. Notable behaviour, caveats and error conditions

Write Markdown with headings and ```{fence} code blocks.

{lang} code:

{source}"#,
            lang = lang,
            fence = lang.fence_tag(),
            source = source,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tests_prompt() {
        let prompt = Prompt::new(ArtifactKind::Tests, Language::Go).render("func Add(a, b int) int");
        assert!(prompt.contains("expert Go developer"));
        assert!(prompt.contains("standard testing package"));
        assert!(prompt.contains("```go"));
        assert!(prompt.ends_with("func Add(a, b int) int"));
    }

    #[test]
    fn test_render_docs_prompt() {
        let prompt = Prompt::new(ArtifactKind::Docs, Language::Python).render("def f(): pass");
        assert!(prompt.contains("Python documentation writer"));
        assert!(prompt.contains("```python"));
        assert!(prompt.ends_with("def f(): pass"));
    }
}
