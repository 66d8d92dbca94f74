use std::sync::Arc;

use anyhow::Result;
use pdna_application::InquiryService;
use pdna_core::inquiry::{InquiryForm, MailSender};
use pdna_infrastructure::{LogMailSender, OutboxMailSender};

use super::context::{StoreOptions, load_config};

pub async fn run(options: &StoreOptions, form: &InquiryForm, outbox: bool, json: bool) -> Result<()> {
    let (paths, config) = load_config(options)?;

    let sender: Arc<dyn MailSender> = if outbox {
        Arc::new(OutboxMailSender::new(paths.outbox_dir()))
    } else {
        Arc::new(LogMailSender)
    };
    let service = InquiryService::new(config.inquiry, sender)?;

    let receipt = service.submit(form).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else if receipt.success {
        println!("✉️  {}", receipt.message);
        if let Some(to) = &receipt.routed_to {
            println!("   Routed to {}", to);
        }
        if outbox {
            println!("📂 Outbox: {}", paths.outbox_dir().display());
        }
    }

    if !receipt.success {
        anyhow::bail!("{}", receipt.message);
    }
    Ok(())
}
