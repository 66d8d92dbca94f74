//! Tracing layer that streams log events of running admin operations.
//!
//! The console installs [`OperationLogLayer`] next to its normal subscriber
//! layers and drains the receiving end of the channel while an operation
//! runs, so gateway progress shows up live in the REPL.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// A single captured log line.
#[derive(Debug, Clone, Serialize)]
pub struct OperationLogEntry {
    /// Module path of the emitting code (e.g. `pdna_application::parent_dna_service`)
    pub target: String,
    /// Log level (INFO, DEBUG, WARN, ERROR)
    pub level: String,
    pub message: String,
    /// Structured fields other than the message
    pub fields: BTreeMap<String, Value>,
    pub timestamp: String,
}

pub type OperationLogReceiver = mpsc::UnboundedReceiver<OperationLogEntry>;

/// Forwards every event it sees to an unbounded channel.
pub struct OperationLogLayer {
    sender: mpsc::UnboundedSender<OperationLogEntry>,
}

impl OperationLogLayer {
    pub fn new(sender: mpsc::UnboundedSender<OperationLogEntry>) -> Self {
        Self { sender }
    }

    /// Creates a layer together with the receiver of its events.
    pub fn channel() -> (Self, OperationLogReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl<S> Layer<S> for OperationLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldVisitor(&mut fields));

        let message = match fields.remove("message") {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let entry = OperationLogEntry {
            target: event.metadata().target().to_string(),
            level: event.metadata().level().to_string(),
            message,
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // A dropped receiver just means nobody is watching
        let _ = self.sender.send(entry);
    }
}

/// Collects event fields as JSON values.
struct FieldVisitor<'a>(&'a mut BTreeMap<String, Value>);

impl Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(format!("{:?}", value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_events_are_forwarded() {
        let (layer, mut receiver) = OperationLogLayer::channel();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(documents = 54u64, "[Gateway] Load complete");
            tracing::warn!("[Gateway] {} existing documents found", 3);
        });

        let first = receiver.try_recv().unwrap();
        assert_eq!(first.level, "INFO");
        assert_eq!(first.message, "[Gateway] Load complete");
        assert_eq!(first.fields["documents"], 54);
        assert!(!first.fields.contains_key("message"));

        let second = receiver.try_recv().unwrap();
        assert_eq!(second.level, "WARN");
        assert_eq!(second.message, "[Gateway] 3 existing documents found");
        assert!(receiver.try_recv().is_err());
    }
}
