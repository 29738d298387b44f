//! Pub/sub hub for engine events
//!
//! One broadcast channel per topic, created lazily on first subscribe.
//! Publishing is best-effort: a topic nobody listens to is dropped, and
//! a slow subscriber loses the oldest messages from its own buffer
//! rather than slowing the engine down.

use dashmap::DashMap;
use tokio::sync::broadcast;

/// Buffered messages per topic before a lagging subscriber starts
/// losing the oldest.
const TOPIC_CAPACITY: usize = 1024;

/// Fan-out hub keyed by topic name.
#[derive(Debug, Default)]
pub struct EventHub {
    topics: DashMap<String, broadcast::Sender<String>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a topic, creating it on first use.
    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<String> {
        self.topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .subscribe()
    }

    /// Publish a payload to a topic. Returns the number of subscribers
    /// that received it; zero (including a never-subscribed topic) is
    /// not an error.
    pub fn publish(&self, topic: &str, payload: String) -> usize {
        match self.topics.get(topic) {
            Some(sender) => sender.send(payload).unwrap_or(0),
            None => 0,
        }
    }

    /// Number of live subscribers on a topic.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .get(topic)
            .map_or(0, |sender| sender.receiver_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers() {
        let hub = EventHub::new();
        assert_eq!(hub.publish("orderbook:BTCUSD", "x".into()), 0);
    }

    #[test]
    fn test_subscribe_then_publish() {
        let hub = EventHub::new();
        let mut rx = hub.subscribe("trades:BTCUSD");
        assert_eq!(hub.publish("trades:BTCUSD", "100,1,1".into()), 1);
        assert_eq!(rx.try_recv().unwrap(), "100,1,1");
    }

    #[test]
    fn test_topics_are_isolated() {
        let hub = EventHub::new();
        let mut a = hub.subscribe("trades:AAA");
        let mut b = hub.subscribe("trades:BBB");
        hub.publish("trades:AAA", "only-a".into());
        assert_eq!(a.try_recv().unwrap(), "only-a");
        assert!(b.try_recv().is_err());
    }

    #[test]
    fn test_subscriber_count() {
        let hub = EventHub::new();
        assert_eq!(hub.subscriber_count("t"), 0);
        let _rx1 = hub.subscribe("t");
        let _rx2 = hub.subscribe("t");
        assert_eq!(hub.subscriber_count("t"), 2);
    }
}
