//! Relay of Anthropic server-sent events as plain text fragments.

use futures::{Stream, StreamExt};
use serde::Deserialize;
use tracing::{info, warn};

use super::TextStream;

/// Upper bound on the provider message carried by an error fragment.
const ERROR_FRAGMENT_MAX_CHARS: usize = 200;

#[derive(Debug, PartialEq)]
pub(crate) enum SseEvent {
    Text(String),
    Done,
    Error(String),
    Ignored,
}

#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    event_type: String,
    delta: Option<StreamDelta>,
    error: Option<StreamErrorBody>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamErrorBody {
    message: String,
}

/// Classifies one SSE line. Only `data:` lines carry anything we relay.
pub(crate) fn parse_sse_line(line: &str) -> SseEvent {
    let Some(data) = line.strip_prefix("data:") else {
        return SseEvent::Ignored;
    };
    let data = data.trim();
    if data == "[DONE]" {
        return SseEvent::Done;
    }
    let Ok(event) = serde_json::from_str::<StreamEvent>(data) else {
        return SseEvent::Ignored;
    };

    match event.event_type.as_str() {
        "content_block_delta" => event
            .delta
            .and_then(|d| d.text)
            .filter(|t| !t.is_empty())
            .map(SseEvent::Text)
            .unwrap_or(SseEvent::Ignored),
        "message_stop" => SseEvent::Done,
        "error" => SseEvent::Error(
            event
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "unknown provider error".to_string()),
        ),
        _ => SseEvent::Ignored,
    }
}

pub(crate) fn error_fragment(message: &str) -> String {
    let truncated: String = message.chars().take(ERROR_FRAGMENT_MAX_CHARS).collect();
    if message.chars().count() > ERROR_FRAGMENT_MAX_CHARS {
        format!("[error] {truncated}...")
    } else {
        format!("[error] {truncated}")
    }
}

/// Sends a streaming request and relays its text deltas.
pub(crate) fn relay(request: reqwest::RequestBuilder) -> TextStream {
    Box::pin(async_stream::stream! {
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("LLM stream request failed: {e}");
                yield error_fragment(&e.to_string());
                return;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM stream returned {}: {}", status, body);
            yield error_fragment(&format!("provider returned {status}: {body}"));
            return;
        }

        let fragments = relay_body(response.bytes_stream());
        futures::pin_mut!(fragments);
        while let Some(fragment) = fragments.next().await {
            yield fragment;
        }
    })
}

/// Splits a raw SSE byte stream into lines and yields text deltas until the provider
/// signals completion, an error event arrives, or the body fails.
pub(crate) fn relay_body<S, B, E>(body: S) -> impl Stream<Item = String> + Send
where
    S: Stream<Item = Result<B, E>> + Send,
    B: AsRef<[u8]> + Send,
    E: std::fmt::Display + Send,
{
    async_stream::stream! {
        futures::pin_mut!(body);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    warn!("LLM stream interrupted: {e}");
                    yield error_fragment(&e.to_string());
                    return;
                }
            };
            buffer.extend_from_slice(chunk.as_ref());

            while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=pos).collect();
                let event = parse_sse_line(String::from_utf8_lossy(&line).trim_end());
                match event {
                    SseEvent::Text(text) => yield text,
                    SseEvent::Done => {
                        info!("LLM stream completed");
                        return;
                    }
                    SseEvent::Error(message) => {
                        warn!("LLM stream error event: {message}");
                        yield error_fragment(&message);
                        return;
                    }
                    SseEvent::Ignored => {}
                }
            }
        }

        // Final line without a trailing newline.
        if !buffer.is_empty() {
            match parse_sse_line(String::from_utf8_lossy(&buffer).trim_end()) {
                SseEvent::Text(text) => yield text,
                SseEvent::Error(message) => {
                    warn!("LLM stream error event: {message}");
                    yield error_fragment(&message);
                }
                SseEvent::Done | SseEvent::Ignored => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn delta(text: &str) -> String {
        format!(
            "event: content_block_delta\ndata: {{\"type\":\"content_block_delta\",\"index\":0,\"delta\":{{\"type\":\"text_delta\",\"text\":\"{text}\"}}}}\n\n"
        )
    }

    #[test]
    fn test_parse_text_delta() {
        let line = r#"data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hello"}}"#;
        assert_eq!(parse_sse_line(line), SseEvent::Text("Hello".to_string()));
    }

    #[test]
    fn test_parse_message_stop() {
        assert_eq!(
            parse_sse_line(r#"data: {"type":"message_stop"}"#),
            SseEvent::Done
        );
    }

    #[test]
    fn test_parse_error_event() {
        let line = r#"data: {"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(parse_sse_line(line), SseEvent::Error("Overloaded".to_string()));
    }

    #[test]
    fn test_event_name_lines_are_ignored() {
        assert_eq!(parse_sse_line("event: ping"), SseEvent::Ignored);
        assert_eq!(parse_sse_line(""), SseEvent::Ignored);
        assert_eq!(parse_sse_line("data: not json"), SseEvent::Ignored);
    }

    #[test]
    fn test_error_fragment_truncates_long_messages() {
        let long = "x".repeat(500);
        let fragment = error_fragment(&long);
        assert!(fragment.starts_with("[error] "));
        assert!(fragment.ends_with("..."));
        assert_eq!(fragment.chars().count(), "[error] ".len() + ERROR_FRAGMENT_MAX_CHARS + 3);
    }

    #[tokio::test]
    async fn test_relay_body_yields_deltas_across_chunk_boundaries() {
        let raw = format!("{}{}data: {{\"type\":\"message_stop\"}}\n", delta("Hel"), delta("lo"));
        let (a, b) = raw.split_at(30);
        let chunks: Vec<Result<Vec<u8>, String>> =
            vec![Ok(a.as_bytes().to_vec()), Ok(b.as_bytes().to_vec())];

        let fragments: Vec<String> = relay_body(stream::iter(chunks)).collect().await;
        assert_eq!(fragments, vec!["Hel".to_string(), "lo".to_string()]);
    }

    #[tokio::test]
    async fn test_relay_body_ends_after_single_error_fragment() {
        let chunks: Vec<Result<Vec<u8>, String>> = vec![
            Ok(delta("partial").into_bytes()),
            Err("connection reset by peer".to_string()),
            Ok(delta("never").into_bytes()),
        ];

        let fragments: Vec<String> = relay_body(stream::iter(chunks)).collect().await;
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], "partial");
        assert_eq!(fragments[1], "[error] connection reset by peer");
    }

    #[tokio::test]
    async fn test_relay_body_stops_at_message_stop() {
        let raw = format!("{}data: {{\"type\":\"message_stop\"}}\n{}", delta("a"), delta("b"));
        let chunks: Vec<Result<Vec<u8>, String>> = vec![Ok(raw.into_bytes())];

        let fragments: Vec<String> = relay_body(stream::iter(chunks)).collect().await;
        assert_eq!(fragments, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_relay_body_keeps_unterminated_final_line() {
        let last = delta("tail");
        let raw = format!("{}{}", delta("head"), last.trim_end());
        let chunks: Vec<Result<Vec<u8>, String>> = vec![Ok(raw.into_bytes())];

        let fragments: Vec<String> = relay_body(stream::iter(chunks)).collect().await;
        assert_eq!(fragments, vec!["head".to_string(), "tail".to_string()]);
    }
}
