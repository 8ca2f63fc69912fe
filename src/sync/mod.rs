//! Live sync channel: one long-lived event subscription that keeps the store
//! current.
//!
//! Connection failures never reach the caller. They are logged, the
//! subscription is dropped, and exactly one new attempt is made after a fixed
//! delay. There is no backoff growth and no retry ceiling. The loop only ends
//! through [`SyncHandle::shutdown`], which also cancels a pending delay.

pub mod event;
pub mod source;
pub mod sse;

use futures_util::StreamExt;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::store::Store;
use event::LiveEvent;
use source::EventSource;

pub struct LiveSync<S> {
    source: S,
    store: Store,
    reconnect_delay: Duration,
}

/// Owns the running channel. Dropping the handle stops the channel as well,
/// but only `shutdown` waits for the task to finish.
#[derive(Debug)]
pub struct SyncHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Stop the channel, including any pending reconnect, and wait for it.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            log::error!("Live sync task failed: {e}");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<S: EventSource> LiveSync<S> {
    pub fn new(source: S, store: Store, reconnect_delay: Duration) -> Self {
        LiveSync {
            source,
            store,
            reconnect_delay,
        }
    }

    pub fn spawn(self) -> SyncHandle {
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(self.run(rx));
        SyncHandle { shutdown: tx, task }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        loop {
            let connected = tokio::select! {
                _ = shutdown.changed() => break,
                result = self.source.connect() => result,
            };

            match connected {
                Ok(mut events) => {
                    log::info!("Live sync connected");
                    loop {
                        tokio::select! {
                            _ = shutdown.changed() => return,
                            next = events.next() => match next {
                                Some(Ok(payload)) => self.handle(&payload),
                                Some(Err(e)) => {
                                    log::error!("Live sync stream error: {e}");
                                    break;
                                }
                                None => {
                                    log::warn!("Live sync stream closed by server");
                                    break;
                                }
                            },
                        }
                    }
                }
                Err(e) => log::error!("Live sync connection failed: {e}"),
            }

            log::info!("Reconnecting live sync in {:?}", self.reconnect_delay);
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = tokio::time::sleep(self.reconnect_delay) => {}
            }
        }
        log::info!("Live sync stopped");
    }

    /// Decode and apply one payload. Bad payloads are logged and skipped.
    pub fn handle(&self, payload: &str) {
        match LiveEvent::decode(payload) {
            Ok(LiveEvent::Ignored(kind)) => log::info!("Unknown event type: {kind}"),
            Ok(event) => {
                self.store.apply_event(event);
                log::debug!("Applied live event, stats now {:?}", self.store.stats());
            }
            Err(e) => log::warn!("Ignoring live event: {e}"),
        }
    }
}
