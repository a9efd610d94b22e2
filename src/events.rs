use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Domain events emitted by the service layer. Consumed by a single
/// in-process task that records them; nothing downstream depends on
/// delivery, so sends are fire-and-forget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Order events
    OrderCreated { transaksi_id: String },
    OrderCostQuoted { transaksi_id: String },
    OrderConfirmed { transaksi_id: String },
    OrderVerified { transaksi_id: String },
    OrderCompleted { transaksi_id: String },
    OrderCanceled { transaksi_id: String, reason: Option<String> },

    // Payment events
    PaymentProofUploaded { transaksi_id: String },
    PaymentCanceled { transaksi_id: String, reason: Option<String> },

    // Catalog events
    CatalogSynced { label: String, upserted: usize },

    // Account events
    UserRegistered { user_id: String },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event, logging instead of failing when the channel is gone.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.sender.send(event).await {
            warn!("Failed to send event: {}", e);
        }
    }
}

/// Builds a connected sender/receiver pair with a bounded channel.
pub fn channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender::new(tx), rx)
}

/// Background consumer: records every domain event to the log stream.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        info!(?event, "domain event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_or_log_swallows_closed_channel() {
        let (sender, receiver) = channel(4);
        drop(receiver);
        // Should not panic or error out.
        sender
            .send_or_log(Event::OrderCreated {
                transaksi_id: "#010101000000-TEST".into(),
            })
            .await;
    }

    #[tokio::test]
    async fn events_round_trip_through_channel() {
        let (sender, mut receiver) = channel(4);
        sender
            .send_or_log(Event::CatalogSynced {
                label: "produk".into(),
                upserted: 3,
            })
            .await;

        match receiver.recv().await {
            Some(Event::CatalogSynced { label, upserted }) => {
                assert_eq!(label, "produk");
                assert_eq!(upserted, 3);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
