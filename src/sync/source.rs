use futures_util::stream::{self, BoxStream, StreamExt};
use reqwest::Client;
use reqwest::header::ACCEPT;
use std::future::Future;

use super::sse::SseDecoder;
use crate::api::ensure_success;
use crate::errors::AppError;

/// Raw event payloads from one subscription. The stream ends or yields an
/// error when the subscription is lost.
pub type EventStream = BoxStream<'static, Result<String, AppError>>;

/// Something the sync channel can subscribe to.
pub trait EventSource: Send + Sync + 'static {
    fn connect(&self) -> impl Future<Output = Result<EventStream, AppError>> + Send;
}

/// Server-sent events over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEventSource {
    http: Client,
    url: String,
}

impl HttpEventSource {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        HttpEventSource { http, url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl EventSource for HttpEventSource {
    async fn connect(&self) -> Result<EventStream, AppError> {
        let response = self
            .http
            .get(&self.url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let mut decoder = SseDecoder::new();
        let events = response
            .bytes_stream()
            .map(move |chunk| match chunk {
                Ok(bytes) => decoder.feed(&bytes).into_iter().map(Ok).collect::<Vec<_>>(),
                Err(e) => vec![Err(AppError::from(e))],
            })
            .flat_map(stream::iter)
            .boxed();
        Ok(events)
    }
}
