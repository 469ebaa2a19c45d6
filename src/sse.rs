use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use serde_json::json;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Sequence numbers emitted once per `period`, first one after a full period.
///
/// The interval lives inside the stream state, so dropping the stream (the
/// peer disconnecting) releases the timer with it.
pub fn heartbeat_ticks(period: Duration) -> impl Stream<Item = u64> {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    stream::unfold((ticker, 0u64), |(mut ticker, seq)| async move {
        ticker.tick().await;
        let next = seq + 1;
        Some((next, (ticker, next)))
    })
}

/// The keep-alive channel served on `GET /` for event-stream clients.
pub fn channel(period: Duration) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!("Streaming channel opened");

    let opened = stream::once(async { Event::default().comment("connected") });
    let beats = heartbeat_ticks(period).map(|seq| {
        Event::default()
            .event("heartbeat")
            .data(json!({ "seq": seq }).to_string())
    });

    Sse::new(opened.chain(beats).map(Ok::<Event, Infallible>))
        .keep_alive(KeepAlive::new().interval(period * 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ticks_count_up() {
        let ticks: Vec<u64> = heartbeat_ticks(Duration::from_millis(5))
            .take(3)
            .collect()
            .await;
        assert_eq!(ticks, vec![1, 2, 3]);
    }
}
