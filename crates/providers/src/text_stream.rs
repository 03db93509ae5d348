//! Lazy, single-pass sequence of text fragments from a streaming backend.

use futures::Stream;
use jarvis_core::error::ProviderError;
use jarvis_core::provider::ChunkReceiver;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Text fragments in generation order. Ends after the backend's final chunk.
///
/// Consuming it is the only way to read it; it cannot be restarted.
pub struct TextStream {
    rx: ChunkReceiver,
    finished: bool,
}

impl TextStream {
    pub fn new(rx: ChunkReceiver) -> Self {
        Self { rx, finished: false }
    }

    /// Drain the stream and concatenate every fragment.
    pub async fn collect_text(mut self) -> Result<String, ProviderError> {
        use futures::StreamExt;

        let mut text = String::new();
        while let Some(fragment) = self.next().await {
            text.push_str(&fragment?);
        }
        Ok(text)
    }
}

impl Stream for TextStream {
    type Item = Result<String, ProviderError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if self.finished {
                return Poll::Ready(None);
            }
            match self.rx.poll_recv(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(None) => {
                    self.finished = true;
                    return Poll::Ready(None);
                }
                Poll::Ready(Some(Err(e))) => {
                    self.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(Some(Ok(chunk))) => {
                    if chunk.done {
                        self.finished = true;
                    }
                    match chunk.content {
                        Some(text) if !text.is_empty() => return Poll::Ready(Some(Ok(text))),
                        _ => continue,
                    }
                }
            }
        }
    }
}
