//! Server-sent events framing.
//!
//! Turns a raw byte stream into the `data:` payload of each event. Events
//! are separated by a blank line; multiple `data:` lines in one event are
//! joined with `\n`; other fields and comments are ignored. A UTF-8
//! sequence split across network chunks is held back until it completes.

use crate::model::ModelError;
use bytes::Bytes;
use futures::stream::{BoxStream, Stream, StreamExt};
use std::fmt::Display;

/// Payload of every event in `stream`, in order. Ends after the first
/// transport error.
pub fn sse_data<S, E>(stream: S) -> BoxStream<'static, Result<String, ModelError>>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    let bytes = stream
        .map(|chunk| chunk.map_err(|err| ModelError::stream(err.to_string())))
        .boxed();

    futures::stream::unfold(SseReader::new(bytes), |mut reader| async move {
        let item = reader.next_data().await?;
        Some((item, reader))
    })
    .boxed()
}

struct SseReader {
    bytes: BoxStream<'static, Result<Bytes, ModelError>>,
    text: String,
    pending: Vec<u8>,
    finished: bool,
}

impl SseReader {
    fn new(bytes: BoxStream<'static, Result<Bytes, ModelError>>) -> Self {
        Self {
            bytes,
            text: String::new(),
            pending: Vec::new(),
            finished: false,
        }
    }

    async fn next_data(&mut self) -> Option<Result<String, ModelError>> {
        loop {
            if let Some(end) = self.text.find("\n\n") {
                let event: String = self.text.drain(..end + 2).collect();
                if let Some(data) = event_data(&event) {
                    return Some(Ok(data));
                }
                continue;
            }

            if self.finished {
                // Last event may lack its trailing blank line.
                let event = std::mem::take(&mut self.text);
                return event_data(&event).map(Ok);
            }

            match self.bytes.next().await {
                Some(Ok(chunk)) => self.push(&chunk),
                Some(Err(err)) => {
                    self.finished = true;
                    self.text.clear();
                    return Some(Err(err));
                }
                None => {
                    self.finished = true;
                    if !self.pending.is_empty() {
                        let rest = String::from_utf8_lossy(&self.pending).into_owned();
                        self.pending.clear();
                        self.append(&rest);
                    }
                }
            }
        }
    }

    fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);

        let valid = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            // Incomplete sequence at the end: wait for the next chunk.
            Err(err) if err.error_len().is_none() => err.valid_up_to(),
            Err(_) => {
                let lossy = String::from_utf8_lossy(&self.pending).into_owned();
                self.pending.clear();
                self.append(&lossy);
                return;
            }
        };

        let decoded: Vec<u8> = self.pending.drain(..valid).collect();
        if let Ok(text) = String::from_utf8(decoded) {
            self.append(&text);
        }
    }

    fn append(&mut self, text: &str) {
        self.text.push_str(text);
        if self.text.contains('\r') {
            self.text = self.text.replace("\r\n", "\n");
        }
    }
}

fn event_data(event: &str) -> Option<String> {
    let mut data: Option<String> = None;
    for line in event.lines() {
        let Some(rest) = line.strip_prefix("data:") else {
            continue;
        };
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        match data.as_mut() {
            Some(joined) => {
                joined.push('\n');
                joined.push_str(rest);
            }
            None => data = Some(rest.to_string()),
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    async fn collect(chunks: Vec<&'static [u8]>) -> Vec<Result<String, ModelError>> {
        let stream = futures::stream::iter(
            chunks
                .into_iter()
                .map(|c| Ok::<_, Infallible>(Bytes::from_static(c))),
        );
        sse_data(stream).collect().await
    }

    fn ok(items: Vec<Result<String, ModelError>>) -> Vec<String> {
        items.into_iter().map(|i| i.unwrap()).collect()
    }

    #[tokio::test]
    async fn test_events_split_across_chunks() {
        let items = collect(vec![
            b"event: content_block_delta\ndata: {\"a\":",
            b"1}\n\ndata: second\n",
            b"\n",
        ])
        .await;
        assert_eq!(ok(items), vec!["{\"a\":1}", "second"]);
    }

    #[tokio::test]
    async fn test_crlf_and_comments() {
        let items = collect(vec![b": keep-alive\r\n\r\ndata: one\r\n\r\ndata:two\r\n\r\n"]).await;
        assert_eq!(ok(items), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_multi_line_data_and_trailing_event() {
        let items = collect(vec![b"data: a\ndata: b\n\ndata: tail"]).await;
        assert_eq!(ok(items), vec!["a\nb", "tail"]);
    }

    #[tokio::test]
    async fn test_utf8_split_between_chunks() {
        // "é" is 0xC3 0xA9.
        let items = collect(vec![b"data: caf\xC3", b"\xA9\n\n"]).await;
        assert_eq!(ok(items), vec!["café"]);
    }

    #[tokio::test]
    async fn test_transport_error_ends_stream() {
        let stream = futures::stream::iter(vec![
            Ok(Bytes::from_static(b"data: first\n\n")),
            Err("connection reset"),
            Ok(Bytes::from_static(b"data: never\n\n")),
        ]);
        let items: Vec<_> = sse_data(stream).collect().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_deref(), Ok("first"));
        assert!(matches!(&items[1], Err(ModelError::Stream(msg)) if msg == "connection reset"));
    }
}
