// src/remote.rs
//! Chat-completion client for OpenAI-compatible endpoints.

#![deny(missing_docs)]

use crate::error::TypofixResult;
use anyhow::{Context, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::debug;

/// Default endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// One message of a chat exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// `system` or `user`.
    pub role: &'static str,
    /// Message body.
    pub content: String,
}

/// A single chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Model name.
    pub model: String,
    /// System instruction followed by the user text.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
}

impl ChatRequest {
    /// Build a request carrying one system and one user message.
    pub fn new(model: &str, system: String, user: &str, temperature: f32) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            temperature,
        }
    }
}

/// Anything that can answer a chat request with plain text.
pub trait ChatBackend {
    /// Send `request` and return the reply text.
    fn complete(&self, request: &ChatRequest) -> TypofixResult<String>;
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Blocking client for `POST {base_url}/chat/completions`.
pub struct OpenAiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// Client for the endpoint named by `$OPENAI_BASE_URL`, or the default one.
    pub fn new(api_key: &str) -> TypofixResult<Self> {
        let base_url = env::var(BASE_URL_ENV)
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(api_key, &base_url)
    }

    /// Client for an explicit endpoint root.
    pub fn with_base_url(api_key: &str, base_url: &str) -> TypofixResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("typofix/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl ChatBackend for OpenAiClient {
    fn complete(&self, request: &ChatRequest) -> TypofixResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(%url, model = %request.model, "sending chat request");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .with_context(|| format!("request to {url} failed"))?;

        let status = resp.status();
        let body = resp.text().context("reading response body")?;
        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            bail!("{status}: {}", detail.trim());
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).context("malformed chat completion response")?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("response contained no message content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve exactly one HTTP response and hand back the raw request.
    fn one_shot_server(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/v1", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
                head.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut payload = vec![0; content_length];
            reader.read_exact(&mut payload).unwrap();
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();
            head + &String::from_utf8(payload).unwrap()
        });
        (base, handle)
    }

    fn request() -> ChatRequest {
        ChatRequest::new("gpt-4o-mini", "system text".into(), "helo wrld", 0.3)
    }

    #[test]
    fn returns_first_choice_content() {
        let (base, server) = one_shot_server(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"hello world"}}]}"#,
        );
        let client = OpenAiClient::with_base_url("sk-test", &base).unwrap();
        assert_eq!(client.complete(&request()).unwrap(), "hello world");

        let raw = server.join().unwrap();
        assert!(raw.starts_with("POST /v1/chat/completions"));
        assert!(raw.to_ascii_lowercase().contains("authorization: bearer sk-test"));
        assert!(raw.contains(r#""role":"system""#));
        assert!(raw.contains(r#""content":"helo wrld""#));
        assert!(raw.contains(r#""temperature":0.3"#));
    }

    #[test]
    fn surfaces_provider_error_message() {
        let (base, server) = one_shot_server(
            "401 Unauthorized",
            r#"{"error":{"message":"Incorrect API key provided"}}"#,
        );
        let client = OpenAiClient::with_base_url("bad", &base).unwrap();
        let err = client.complete(&request()).unwrap_err().to_string();
        assert!(err.contains("401"), "got: {err}");
        assert!(err.contains("Incorrect API key provided"), "got: {err}");
        server.join().unwrap();
    }

    #[test]
    fn empty_choices_is_an_error() {
        let (base, server) = one_shot_server("200 OK", r#"{"choices":[]}"#);
        let client = OpenAiClient::with_base_url("k", &base).unwrap();
        assert!(client.complete(&request()).is_err());
        server.join().unwrap();
    }
}
