//! Server Events
//!
//! One server-sent-event stream for the whole app. Each message names a
//! topic, which is republished on the in-process invalidation bus.

use entity_sync::{InvalidationBus, Topic};
use futures::StreamExt;
use gloo_net::eventsource::futures::EventSource;
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use log::{debug, info, warn};
use serde::Deserialize;

const INITIAL_BACKOFF_MS: u32 = 1_000;
const MAX_BACKOFF_MS: u32 = 30_000;

/// Wire format of a server event
#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
}

/// Extract the topic from a message payload
pub fn parse_event(data: &str) -> Option<Topic> {
    let envelope: Envelope = serde_json::from_str(data).ok()?;
    if envelope.event.is_empty() {
        return None;
    }
    Some(Topic::new(envelope.event))
}

/// Listen on `url` forever, reconnecting with exponential backoff
pub fn start_event_stream(url: String, bus: InvalidationBus) {
    spawn_local(async move {
        let mut backoff = INITIAL_BACKOFF_MS;
        loop {
            match pump(&url, &bus).await {
                Ok(delivered) => {
                    debug!("event stream closed after {} message(s)", delivered);
                    if delivered > 0 {
                        backoff = INITIAL_BACKOFF_MS;
                    }
                }
                Err(e) => warn!("event stream error: {}", e),
            }
            TimeoutFuture::new(backoff).await;
            backoff = (backoff * 2).min(MAX_BACKOFF_MS);
        }
    });
}

/// Forward messages until the stream ends or errors
async fn pump(url: &str, bus: &InvalidationBus) -> Result<usize, String> {
    let mut source = EventSource::new(url).map_err(|e| format!("{:?}", e))?;
    let mut messages = source.subscribe("message").map_err(|e| format!("{:?}", e))?;
    info!("listening for server events at {}", url);

    let mut delivered = 0;
    while let Some(item) = messages.next().await {
        let (_, message) = item.map_err(|e| format!("{:?}", e))?;
        let Some(data) = message.data().as_string() else {
            continue;
        };
        match parse_event(&data) {
            Some(topic) => {
                let woken = bus.publish(&topic);
                debug!("{} -> {} subscriber(s)", topic, woken);
                delivered += 1;
            }
            None => debug!("ignoring malformed server event: {}", data),
        }
    }
    drop(source);
    Ok(delivered)
}
