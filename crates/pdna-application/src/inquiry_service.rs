//! Inquiry submission use case.

use std::sync::Arc;

use pdna_core::config::InquirySettings;
use pdna_core::error::Result;
use pdna_core::inquiry::{InquiryComposer, InquiryForm, MailSender};
use serde::Serialize;

/// Outcome of a submission, shaped for the form front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InquiryReceipt {
    pub success: bool,
    pub message: String,
    /// Destination the inquiry was routed to, when it was sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routed_to: Option<String>,
}

pub struct InquiryService {
    composer: InquiryComposer,
    sender: Arc<dyn MailSender>,
}

impl InquiryService {
    pub fn new(settings: InquirySettings, sender: Arc<dyn MailSender>) -> Result<Self> {
        Ok(Self {
            composer: InquiryComposer::new(settings)?,
            sender,
        })
    }

    /// Validates, routes, renders and sends a form.
    ///
    /// Invalid input and delivery failures both come back as an unsuccessful
    /// receipt; nothing is retried.
    pub async fn submit(&self, form: &InquiryForm) -> InquiryReceipt {
        let mail = match self.composer.compose(form) {
            Ok(mail) => mail,
            Err(e) => {
                tracing::info!("[Inquiry] Rejected {} inquiry: {}", form.inquiry_type, e);
                return InquiryReceipt {
                    success: false,
                    message: e.to_string(),
                    routed_to: None,
                };
            }
        };

        match self.sender.send(&mail).await {
            Ok(()) => {
                tracing::info!("[Inquiry] Sent {} inquiry to {}", form.inquiry_type, mail.to);
                InquiryReceipt {
                    success: true,
                    message: "Thank you! We will be in touch soon.".to_string(),
                    routed_to: Some(mail.to),
                }
            }
            Err(e) => {
                tracing::error!("[Inquiry] Delivery to {} failed: {}", mail.to, e);
                InquiryReceipt {
                    success: false,
                    message: format!("Your message could not be sent: {}", e),
                    routed_to: None,
                }
            }
        }
    }
}
