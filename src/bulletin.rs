use std::fmt;

use tracing::{info, warn};

use crate::error::DashboardError;
use crate::models::Student;
use crate::sync::{Delivery, DeliveryReceipt};

/// Shown next to the draft; longer messages still go out.
pub const SOFT_CHAR_LIMIT: usize = 500;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Recipient {
    #[default]
    All,
    Student(String),
}

impl Recipient {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            Recipient::All
        } else {
            Recipient::Student(value.to_string())
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::All => f.write_str("All Students"),
            Recipient::Student(name) => f.write_str(name),
        }
    }
}

/// What gets handed to the sync once a draft is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bulletin {
    pub recipient: Recipient,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletinDraft {
    pub recipient: Recipient,
    pub message: String,
}

impl BulletinDraft {
    pub fn char_count(&self) -> usize {
        self.message.chars().count()
    }

    pub fn over_limit(&self) -> bool {
        self.char_count() > SOFT_CHAR_LIMIT
    }

    /// "123/500 characters"
    pub fn counter(&self) -> String {
        format!("{}/{} characters", self.char_count(), SOFT_CHAR_LIMIT)
    }
}

#[derive(Debug, Default)]
pub struct BulletinComposer {
    draft: BulletinDraft,
}

impl BulletinComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_draft(&mut self, message: impl Into<String>, recipient: Recipient) {
        self.draft = BulletinDraft {
            recipient,
            message: message.into(),
        };
    }

    pub fn draft(&self) -> &BulletinDraft {
        &self.draft
    }

    pub fn can_send(&self) -> bool {
        !self.draft.message.trim().is_empty()
    }

    /// Hands the draft to `delivery` and resets it. A blank message leaves
    /// the draft untouched.
    pub fn send(&mut self, delivery: &mut dyn Delivery) -> Result<DeliveryReceipt, DashboardError> {
        if !self.can_send() {
            return Err(DashboardError::EmptyMessage);
        }

        if self.draft.over_limit() {
            warn!(
                chars = self.draft.char_count(),
                limit = SOFT_CHAR_LIMIT,
                "bulletin is longer than the suggested limit"
            );
        }

        let draft = std::mem::take(&mut self.draft);
        let bulletin = Bulletin {
            recipient: draft.recipient,
            message: draft.message,
        };
        let receipt = delivery.deliver_bulletin(&bulletin);
        info!(recipient = %bulletin.recipient, receipt = %receipt.id, "bulletin sent");
        Ok(receipt)
    }
}

/// "All Students" first, then every student by name.
pub fn recipient_choices(students: &[Student]) -> Vec<Recipient> {
    std::iter::once(Recipient::All)
        .chain(
            students
                .iter()
                .map(|student| Recipient::Student(student.name.clone())),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::SimulatedSync;

    #[test]
    fn empty_message_is_rejected() {
        let mut composer = BulletinComposer::new();
        let mut sync = SimulatedSync::new();

        composer.set_draft("", Recipient::All);
        assert!(!composer.can_send());
        assert!(matches!(
            composer.send(&mut sync),
            Err(DashboardError::EmptyMessage)
        ));
        assert!(sync.receipts().is_empty());
    }

    #[test]
    fn whitespace_only_message_keeps_the_draft() {
        let mut composer = BulletinComposer::new();
        let mut sync = SimulatedSync::new();
        let asha = Recipient::Student("Asha".to_string());

        composer.set_draft("   \n", asha.clone());
        assert!(composer.send(&mut sync).is_err());
        assert_eq!(composer.draft().recipient, asha);
        assert_eq!(composer.draft().message, "   \n");
    }

    #[test]
    fn send_delivers_and_resets() {
        let mut composer = BulletinComposer::new();
        let mut sync = SimulatedSync::new();

        composer.set_draft("Review fractions", Recipient::Student("Ben".to_string()));
        assert!(composer.can_send());
        let receipt = composer.send(&mut sync).unwrap();

        assert_eq!(receipt.summary, "bulletin to Ben (16 characters)");
        assert_eq!(composer.draft(), &BulletinDraft::default());
        assert_eq!(composer.draft().recipient, Recipient::All);
        assert!(!composer.can_send());
    }

    #[test]
    fn long_messages_are_not_blocked() {
        let mut composer = BulletinComposer::new();
        let mut sync = SimulatedSync::new();

        composer.set_draft("a".repeat(SOFT_CHAR_LIMIT + 1), Recipient::All);
        assert!(composer.draft().over_limit());
        assert_eq!(composer.draft().counter(), "501/500 characters");
        assert!(composer.send(&mut sync).is_ok());
    }

    #[test]
    fn counter_counts_characters_not_bytes() {
        let draft = BulletinDraft {
            recipient: Recipient::All,
            message: "नमस्ते".to_string(),
        };
        assert_eq!(draft.char_count(), 6);
        assert!(!draft.over_limit());
    }

    #[test]
    fn recipients_start_with_everyone() {
        assert_eq!(Recipient::parse("ALL"), Recipient::All);
        assert_eq!(
            Recipient::parse("Asha"),
            Recipient::Student("Asha".to_string())
        );
        assert_eq!(Recipient::All.to_string(), "All Students");
        assert_eq!(recipient_choices(&[]), vec![Recipient::All]);
    }
}
