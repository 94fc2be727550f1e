//! Tomorrow's sync: the hand-off point for confirmed lesson queues and
//! bulletins. Nothing here is durable; the simulated outbox only acknowledges.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::bulletin::Bulletin;
use crate::models::QueueItem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub id: Uuid,
    pub queued_at: DateTime<Utc>,
    pub deliver_on: NaiveDate,
    pub summary: String,
}

impl DeliveryReceipt {
    fn issue(summary: String) -> Self {
        let queued_at = Utc::now();
        Self {
            id: Uuid::new_v4(),
            queued_at,
            deliver_on: queued_at.date_naive() + Duration::days(1),
            summary,
        }
    }
}

pub trait Delivery {
    fn deliver_lessons(&mut self, items: &[QueueItem]) -> DeliveryReceipt;
    fn deliver_bulletin(&mut self, bulletin: &Bulletin) -> DeliveryReceipt;
}

/// Acknowledges everything immediately and keeps the receipts in memory.
#[derive(Debug, Default)]
pub struct SimulatedSync {
    receipts: Vec<DeliveryReceipt>,
}

impl SimulatedSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receipts(&self) -> &[DeliveryReceipt] {
        &self.receipts
    }

    fn record(&mut self, receipt: DeliveryReceipt) -> DeliveryReceipt {
        info!(
            receipt = %receipt.id,
            deliver_on = %receipt.deliver_on,
            summary = %receipt.summary,
            "queued for tomorrow's sync"
        );
        self.receipts.push(receipt.clone());
        receipt
    }
}

impl Delivery for SimulatedSync {
    fn deliver_lessons(&mut self, items: &[QueueItem]) -> DeliveryReceipt {
        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        self.record(DeliveryReceipt::issue(format!(
            "{} lessons for tomorrow's sync [{}]",
            items.len(),
            ids.join(", ")
        )))
    }

    fn deliver_bulletin(&mut self, bulletin: &Bulletin) -> DeliveryReceipt {
        self.record(DeliveryReceipt::issue(format!(
            "bulletin to {} ({} characters)",
            bulletin.recipient,
            bulletin.message.chars().count()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulletin::Recipient;

    #[test]
    fn receipts_are_for_the_next_day() {
        let mut sync = SimulatedSync::new();
        let receipt = sync.deliver_lessons(&[]);
        assert_eq!(
            receipt.deliver_on,
            receipt.queued_at.date_naive() + Duration::days(1)
        );
        assert_eq!(receipt.summary, "0 lessons for tomorrow's sync []");
    }

    #[test]
    fn every_delivery_is_recorded() {
        let mut sync = SimulatedSync::new();
        let first = sync.deliver_bulletin(&Bulletin {
            recipient: Recipient::All,
            message: "Quiz on Friday".to_string(),
        });
        let second = sync.deliver_bulletin(&Bulletin {
            recipient: Recipient::Student("Asha".to_string()),
            message: "Great work".to_string(),
        });

        assert_ne!(first.id, second.id);
        assert_eq!(sync.receipts().len(), 2);
        assert_eq!(sync.receipts()[1].summary, "bulletin to Asha (10 characters)");
    }
}
