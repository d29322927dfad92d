//! # Gemini 生成客户端
//!
//! 调用 Gemini `generateContent` 接口生成产物文本。
//!
//! ## 协议
//! ```text
//! POST {endpoint}/models/{model}:generateContent
//! x-goog-api-key: <api key>
//! {"contents":[{"parts":[{"text":"..."}]}]}
//! ```
//! 响应取 `candidates[0].content.parts[0].text`。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 构造，被 `artifact/pipeline.rs` 调用
//! - 使用 `reqwest` (blocking) 与 `serde_json`

use super::prompt::Prompt;
use super::{ArtifactKind, Language};
use crate::error::{ArtigenError, GenerationError, Result};

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// 错误响应体保留的最大字符数
const MAX_ERROR_BODY_CHARS: usize = 200;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// 产物生成器
///
/// 远程调用可能很慢，也可能失败；调用方不做重试。
pub trait ArtifactGenerator: Send + Sync {
    fn generate(&self, source: &str, api_key: &str) -> std::result::Result<String, GenerationError>;
}

// ─────────────────────────────────────────────────────────────
// 请求 / 响应结构
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// 取第一个候选的第一段文本
    fn into_text(self) -> std::result::Result<String, GenerationError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

fn build_request(prompt: &str) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part { text: prompt }],
        }],
    }
}

// ─────────────────────────────────────────────────────────────
// 客户端
// ─────────────────────────────────────────────────────────────

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl GeminiConfig {
    /// 请求 URL（不含 key）
    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// 基于 Gemini 的产物生成器
pub struct GeminiGenerator {
    client: reqwest::blocking::Client,
    url: String,
    prompt: Prompt,
}

impl GeminiGenerator {
    pub fn new(config: &GeminiConfig, kind: ArtifactKind, language: Language) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ArtigenError::HttpClient)?;

        Ok(Self {
            client,
            url: config.url(),
            prompt: Prompt::new(kind, language),
        })
    }
}

impl ArtifactGenerator for GeminiGenerator {
    fn generate(&self, source: &str, api_key: &str) -> std::result::Result<String, GenerationError> {
        let prompt = self.prompt.render(source);

        tracing::debug!(url = %self.url, prompt_len = prompt.len(), "sending generation request");

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, api_key)
            .json(&build_request(&prompt))
            .send()
            .map_err(redact)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let body = response.text().map_err(redact)?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Decode(e.to_string()))?;

        parsed.into_text()
    }
}

/// 去掉错误中的 URL，错误文本会进入报告
fn redact(e: reqwest::Error) -> GenerationError {
    GenerationError::Request(e.without_url())
}

/// 截断错误响应体，压缩空白
fn truncate_body(body: &str) -> String {
    let body = body.split_whitespace().collect::<Vec<_>>().join(" ");
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body,
    }
}
