use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A fully rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    /// Address of the person who submitted the form
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

/// Delivers outgoing mail.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}
