use anyhow::{anyhow, Context, Result};
use musli::json;
use musli::{Decode, Encode};
use reqwest::blocking::Client;
use std::io::BufReader;
use std::time::Duration;

use super::stream::{sse_data, LineFragments};
use super::{FragmentStream, LlmClient};
use crate::logging::truncate;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Encode, Decode)]
struct GeminiPart {
    #[musli(default)]
    text: Option<String>,
}

#[derive(Debug, Encode, Decode)]
struct GeminiContent {
    #[musli(default)]
    role: Option<String>,
    #[musli(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Encode)]
struct GenerateRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Decode)]
struct GeminiCandidate {
    #[musli(default)]
    content: Option<GeminiContent>,
}

#[derive(Debug, Decode)]
struct GeminiError {
    #[musli(default)]
    message: Option<String>,
}

#[derive(Debug, Decode)]
struct StreamResponse {
    #[musli(default)]
    candidates: Vec<GeminiCandidate>,
    #[musli(default)]
    error: Option<GeminiError>,
}

/// Synchronous client for the Generative Language API streaming endpoint.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(90))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn stream_url(&self) -> String {
        let model = self.model.trim_start_matches("models/");
        format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.base_url, model
        )
    }
}

fn parse_stream_line(line: &str) -> Result<Option<String>> {
    let Some(data) = sse_data(line) else {
        return Ok(None);
    };

    let parsed: StreamResponse =
        json::from_str(data).map_err(|e| anyhow!("Failed to decode Gemini stream JSON: {e}"))?;

    if let Some(err) = parsed.error {
        return Err(anyhow!(
            "Gemini reported an error mid-stream: {}",
            err.message.unwrap_or_else(|| "unknown error".to_string())
        ));
    }

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

impl LlmClient for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    fn generate(&self, prompt: &str) -> Result<FragmentStream<'_>> {
        let req_body = GenerateRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let body_str = json::to_string(&req_body)
            .map_err(|e| anyhow!("Failed to encode Gemini JSON request: {e}"))?;

        log::trace!("Gemini request body: {}", truncate(&body_str, 3000));
        log::info!("Streaming Gemini model {:?}", &self.model);

        let url = self.stream_url();

        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", &self.api_key)
            .body(body_str)
            .send()
            .map_err(|e| anyhow!("Error calling Gemini at {url}: {e}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(anyhow!(
                "Gemini API error: HTTP {} - {}",
                status.as_u16(),
                text
            ));
        }

        let reader = BufReader::new(resp);
        Ok(Box::new(LineFragments::new(reader, parse_stream_line)))
    }
}
