//! Gemini REST client implementing [`Generator`].
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, streaming through the
//! `streamGenerateContent?alt=sse` endpoint and reading the response body as
//! server-sent events.
//! Native builds get the pure request/response shaping and a stub that
//! reports every call as a transport failure.
//!
//! ERROR HANDLING
//! ==============
//! Transport problems, non-2xx statuses and API error payloads all become
//! [`GenerateError::Transport`] carrying the API's message when it has one.

#[cfg(test)]
#[path = "gemini_test.rs"]
mod gemini_test;

use serde_json::{Value, json};

use super::config::AiConfig;
use super::generator::{GenerateError, GenerateRequest, Generator, ModelTier, Part, TextStream};

/// Gemini generator; the credential comes from the [`AiConfig`] passed to
/// each call.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeminiGenerator;

/// Endpoint for `tier`, streaming or one-shot.
#[must_use]
pub fn endpoint(config: &AiConfig, tier: ModelTier, streaming: bool) -> String {
    let base = config.base_url.trim_end_matches('/');
    let model = config.model_name(tier);
    if streaming {
        format!("{base}/models/{model}:streamGenerateContent?alt=sse")
    } else {
        format!("{base}/models/{model}:generateContent")
    }
}

/// JSON request body for a single user turn.
#[must_use]
pub fn request_body(request: &GenerateRequest) -> Value {
    let parts: Vec<Value> = request
        .parts
        .iter()
        .map(|part| match part {
            Part::Text(text) => json!({ "text": text }),
            Part::InlineData { mime_type, data } => json!({ "inlineData": { "mimeType": mime_type, "data": data } }),
        })
        .collect();
    json!({ "contents": [{ "role": "user", "parts": parts }] })
}

/// Concatenated text of the first candidate. Missing fields yield "".
#[must_use]
pub fn candidate_text(response: &Value) -> String {
    response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| parts.iter().filter_map(|p| p.get("text").and_then(Value::as_str)).collect())
        .unwrap_or_default()
}

/// Text of one response object, or the API error it carries.
///
/// # Errors
///
/// Returns [`GenerateError::Transport`] for unparseable payloads and for
/// payloads with an `error` object.
pub fn parse_response(payload: &str) -> Result<String, GenerateError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| GenerateError::Transport(format!("unreadable response: {e}")))?;
    if let Some(error) = value.get("error") {
        return Err(GenerateError::Transport(api_error_message(error)));
    }
    Ok(candidate_text(&value))
}

/// Error text for a non-2xx response body.
#[must_use]
pub fn status_error(status: u16, body: &str) -> GenerateError {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").map(api_error_message))
        .unwrap_or_else(|| body.trim().chars().take(200).collect());
    GenerateError::Transport(format!("status {status}: {detail}"))
}

fn api_error_message(error: &Value) -> String {
    error
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| error.to_string(), str::to_owned)
}

// =============================================================================
// SSE DECODING
// =============================================================================

/// Splits a byte stream into `data:` payloads.
///
/// Lines are cut on `\n`, which never occurs inside a multi-byte UTF-8
/// sequence, so chunk boundaries cannot split a character.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Feed bytes and return every payload whose line is now complete.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);
        let mut payloads = Vec::new();
        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=end).collect();
            if let Some(payload) = data_payload(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Payload of a trailing line without a newline, if any.
    pub fn finish(&mut self) -> Option<String> {
        let line = std::mem::take(&mut self.buffer);
        data_payload(&line)
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let payload = line.trim_end_matches(['\r', '\n']).strip_prefix("data:")?.trim_start();
    (!payload.is_empty() && payload != "[DONE]").then(|| payload.to_owned())
}

// =============================================================================
// HTTP (csr)
// =============================================================================

#[cfg(feature = "csr")]
#[async_trait::async_trait(?Send)]
impl Generator for GeminiGenerator {
    fn stream(&self, config: &AiConfig, request: GenerateRequest) -> TextStream {
        use futures::StreamExt;

        let (tx, rx) = futures::channel::mpsc::unbounded();
        let url = endpoint(config, request.model, true);
        let api_key = config.api_key.clone();
        let body = request_body(&request);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = pump_stream(&url, &api_key, &body, &tx).await {
                let _ = tx.unbounded_send(Err(err));
            }
        });
        rx.boxed_local()
    }

    async fn complete(&self, config: &AiConfig, request: GenerateRequest) -> Result<String, GenerateError> {
        let url = endpoint(config, request.model, false);
        let response = send(&url, &config.api_key, &request_body(&request)).await?;
        let text = response.text().await.map_err(|e| GenerateError::Transport(e.to_string()))?;
        parse_response(&text)
    }
}

#[cfg(not(feature = "csr"))]
#[async_trait::async_trait(?Send)]
impl Generator for GeminiGenerator {
    fn stream(&self, _config: &AiConfig, _request: GenerateRequest) -> TextStream {
        use futures::StreamExt;

        futures::stream::once(async { Err(offline()) }).boxed_local()
    }

    async fn complete(&self, _config: &AiConfig, _request: GenerateRequest) -> Result<String, GenerateError> {
        Err(offline())
    }
}

#[cfg(not(feature = "csr"))]
fn offline() -> GenerateError {
    GenerateError::Transport("model calls are only available in the browser".into())
}

#[cfg(feature = "csr")]
async fn send(url: &str, api_key: &str, body: &Value) -> Result<gloo_net::http::Response, GenerateError> {
    let response = gloo_net::http::Request::post(url)
        .header("x-goog-api-key", api_key)
        .json(body)
        .map_err(|e| GenerateError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| GenerateError::Transport(e.to_string()))?;
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, &body));
    }
    Ok(response)
}

#[cfg(feature = "csr")]
async fn pump_stream(
    url: &str,
    api_key: &str,
    body: &Value,
    tx: &futures::channel::mpsc::UnboundedSender<Result<String, GenerateError>>,
) -> Result<(), GenerateError> {
    use wasm_bindgen::JsCast;

    let js_err = |e: wasm_bindgen::JsValue| GenerateError::Transport(format!("{e:?}"));
    let response = send(url, api_key, body).await?;
    let stream = response.body().ok_or(GenerateError::EmptyResponse)?;
    let reader: web_sys::ReadableStreamDefaultReader = stream.get_reader().unchecked_into();
    let mut decoder = SseDecoder::default();

    loop {
        let chunk = wasm_bindgen_futures::JsFuture::from(reader.read()).await.map_err(js_err)?;
        let done = js_sys::Reflect::get(&chunk, &"done".into())
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            break;
        }
        let value = js_sys::Reflect::get(&chunk, &"value".into()).map_err(js_err)?;
        let bytes = js_sys::Uint8Array::new(&value).to_vec();
        for payload in decoder.push(&bytes) {
            forward(tx, &payload)?;
        }
    }
    if let Some(payload) = decoder.finish() {
        forward(tx, &payload)?;
    }
    Ok(())
}

#[cfg(feature = "csr")]
fn forward(
    tx: &futures::channel::mpsc::UnboundedSender<Result<String, GenerateError>>,
    payload: &str,
) -> Result<(), GenerateError> {
    let text = parse_response(payload)?;
    if !text.is_empty() && tx.unbounded_send(Ok(text)).is_err() {
        // Receiver dropped; stop reading.
        return Err(GenerateError::Transport("stream receiver closed".into()));
    }
    Ok(())
}
