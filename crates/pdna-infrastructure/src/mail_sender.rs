//! [`MailSender`] implementations.
//!
//! There is no SMTP client here: inquiry mail is either logged or dropped
//! into an outbox directory for an external relay to pick up.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use pdna_core::error::Result;
use pdna_core::inquiry::{MailSender, OutgoingMail};

use crate::storage::{AtomicFile, blocking};

/// Logs each message through `tracing` and discards it.
#[derive(Debug, Default)]
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        tracing::info!(
            to = %mail.to,
            reply_to = %mail.reply_to,
            "[Mail] {}",
            mail.subject
        );
        tracing::debug!("[Mail] Body:\n{}", mail.body);
        Ok(())
    }
}

/// Writes each message as a JSON file into an outbox directory.
///
/// File names are `<timestamp>-<uuid>.json` so a relay can process them in
/// submission order.
#[derive(Debug, Clone)]
pub struct OutboxMailSender {
    dir: PathBuf,
}

impl OutboxMailSender {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl MailSender for OutboxMailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let file_name = format!(
            "{}-{}.json",
            Utc::now().format("%Y%m%dT%H%M%S%.3fZ"),
            uuid::Uuid::new_v4()
        );
        let path = self.dir.join(file_name);
        tracing::info!("[Mail] Queued '{}' for {} at {}", mail.subject, mail.to, path.display());

        let file = AtomicFile::<OutgoingMail>::json(path);
        let mail = mail.clone();
        blocking(move || file.save(&mail)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mail() -> OutgoingMail {
        OutgoingMail {
            from: "no-reply@parentdna.example".to_string(),
            to: "support@parentdna.example".to_string(),
            reply_to: "parent@home.example".to_string(),
            subject: "[Parent DNA] Support request from Ann".to_string(),
            body: "The results page is blank.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_outbox_writes_one_file_per_message() {
        let temp_dir = TempDir::new().unwrap();
        let sender = OutboxMailSender::new(temp_dir.path().join("outbox"));

        sender.send(&mail()).await.unwrap();
        sender.send(&mail()).await.unwrap();

        let mut files: Vec<_> = std::fs::read_dir(temp_dir.path().join("outbox"))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        files.sort();
        assert_eq!(files.len(), 2);

        let stored: OutgoingMail =
            serde_json::from_str(&std::fs::read_to_string(&files[0]).unwrap()).unwrap();
        assert_eq!(stored, mail());
    }

    #[tokio::test]
    async fn test_log_sender_accepts_everything() {
        assert!(LogMailSender.send(&mail()).await.is_ok());
    }
}
