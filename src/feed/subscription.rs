use actix_web::rt::task::JoinHandle;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use tokio::sync::watch;

use super::sse::{MAX_EVENT_BYTES, SseDecoder};
use super::{FeedError, FeedHandle, FeedState, decode_snapshot};

/// Owned connection to the dashboard event stream.
///
/// The relay task lives exactly as long as this handle: [`close`](Self::close)
/// or dropping it aborts the connection whatever state it is in. A failed
/// or finished stream is not reopened; the terminal status is published
/// instead.
pub struct FeedSubscription {
    url: String,
    rx: watch::Receiver<FeedState>,
    task: Option<JoinHandle<()>>,
}

impl FeedSubscription {
    /// Connect to `url` and start relaying snapshots. Must be called from
    /// within the actix runtime.
    pub fn open(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self::open_with_event_limit(client, url, MAX_EVENT_BYTES)
    }

    /// Like [`open`](Self::open), failing the feed once a single event grows
    /// past `max_event_bytes`.
    pub fn open_with_event_limit(
        client: reqwest::Client,
        url: impl Into<String>,
        max_event_bytes: usize,
    ) -> Self {
        let url = url.into();
        let (tx, rx) = watch::channel(FeedState::connecting());
        log::info!("Opening dashboard feed {url}");
        let decoder = SseDecoder::with_limit(max_event_bytes);
        let task = actix_web::rt::spawn(relay(client, url.clone(), decoder, tx));
        FeedSubscription { url, rx, task: Some(task) }
    }

    pub fn handle(&self) -> FeedHandle {
        FeedHandle::from_receiver(self.rx.clone())
    }

    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log::info!("Closed dashboard feed {}", self.url);
        }
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn publish(tx: &watch::Sender<FeedState>, outcome: Result<super::Snapshot, FeedError>) {
    tx.send_modify(|state| state.apply(outcome));
}

async fn relay(
    client: reqwest::Client,
    url: String,
    mut decoder: SseDecoder,
    tx: watch::Sender<FeedState>,
) {
    let response = match client.get(&url).header(ACCEPT, "text/event-stream").send().await {
        Ok(response) => response,
        Err(e) => {
            publish(&tx, Err(FeedError::Transport(e.to_string())));
            return;
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        publish(&tx, Err(FeedError::Transport(format!("feed responded with status {status}"))));
        return;
    }
    log::info!("Dashboard feed connected");

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                publish(&tx, Err(FeedError::Transport(e.to_string())));
                return;
            }
        };
        for event in decoder.push(&chunk) {
            publish(&tx, decode_snapshot(&event));
        }
        if let Err(e) = decoder.check_limit() {
            publish(&tx, Err(e));
            return;
        }
    }

    if let Some(event) = decoder.finish() {
        publish(&tx, decode_snapshot(&event));
    }
    publish(&tx, Err(FeedError::Closed));
}
