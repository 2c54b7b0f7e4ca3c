//! Notification dispatch
//!
//! Builds the notification payload for an eligible fault and hands it to the
//! external mail-transport collaborator. One outbound message per eligible
//! fault; the throttle gate is the only defense against duplicate sends.

use crate::config::NotifierConfig;
use crate::error::TransportError;
use crate::fault::{classify, Fault, FaultCategory};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Body format requested from the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadFormat {
    /// Plain text only
    Text,
    /// HTML only
    Html,
    /// Both text and HTML parts
    Both,
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Html => write!(f, "html"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Outbound notification message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Subject line, category-specific with optional site/environment suffixes
    pub subject: String,
    /// Structured fields for body rendering: the fault itself plus the
    /// configured environment and site labels
    pub fields: BTreeMap<String, Value>,
    /// Recipient override, if configured
    pub to: Option<String>,
    /// Sender override, if configured
    pub from: Option<String>,
    /// Requested body format
    pub format: PayloadFormat,
}

/// External mail-sending collaborator
pub trait MailTransport: Send + Sync {
    /// Deliver one payload
    fn send(&self, payload: &NotificationPayload) -> Result<(), TransportError>;

    /// Transport name for logging
    fn name(&self) -> &str;
}

impl<T: MailTransport + ?Sized> MailTransport for std::sync::Arc<T> {
    fn send(&self, payload: &NotificationPayload) -> Result<(), TransportError> {
        (**self).send(payload)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Builds payloads and hands them to the transport
pub struct Dispatcher {
    config: NotifierConfig,
    transport: Box<dyn MailTransport>,
}

impl Dispatcher {
    /// Create a dispatcher over the given transport
    pub fn new(config: NotifierConfig, transport: Box<dyn MailTransport>) -> Self {
        Self { config, transport }
    }

    /// Build the payload for a fault without sending it
    pub fn build_payload(&self, fault: &Fault) -> NotificationPayload {
        let category = classify(fault);
        let subject = self.subject_for(category);

        let mut fields = BTreeMap::new();
        // Fatal runtime errors render through the error template, everything
        // else through the exception template; the field key selects it.
        let fault_key = if category == FaultCategory::FatalError {
            "error"
        } else {
            "exception"
        };
        fields.insert(
            fault_key.to_string(),
            serde_json::to_value(fault).unwrap_or(Value::Null),
        );
        fields.insert(
            "environment".to_string(),
            label_value(&self.config.environment_label),
        );
        fields.insert("site".to_string(), label_value(&self.config.site_label));

        NotificationPayload {
            subject,
            fields,
            to: self.config.to_address.clone(),
            from: self.config.from_address.clone(),
            format: PayloadFormat::Both,
        }
    }

    /// Build the payload and hand it to the transport
    pub fn dispatch(&self, fault: &Fault) -> Result<(), TransportError> {
        let payload = self.build_payload(fault);
        self.transport.send(&payload)
    }

    /// Transport name for logging
    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    fn subject_for(&self, category: FaultCategory) -> String {
        let mut subject = if category == FaultCategory::FatalError {
            "An error has been thrown".to_string()
        } else {
            "An exception has been thrown".to_string()
        };
        if let Some(site) = &self.config.site_label {
            subject.push_str(&format!(" on {}", site));
        }
        if let Some(environment) = &self.config.environment_label {
            subject.push_str(&format!(" ({})", environment));
        }
        subject
    }
}

fn label_value(label: &Option<String>) -> Value {
    label
        .as_ref()
        .map(|s| Value::String(s.clone()))
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultKind;
    use crate::mock::MockTransport;
    use std::sync::Arc;

    fn config_with_labels(site: Option<&str>, environment: Option<&str>) -> NotifierConfig {
        NotifierConfig {
            to_address: Some("dev@example.com".to_string()),
            from_address: Some("noreply@example.com".to_string()),
            site_label: site.map(|s| s.to_string()),
            environment_label: environment.map(|s| s.to_string()),
            ..NotifierConfig::default()
        }
    }

    fn dispatcher(config: NotifierConfig) -> (Dispatcher, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = Dispatcher::new(config, Box::new(Arc::clone(&transport)));
        (dispatcher, transport)
    }

    #[test]
    fn test_exception_subject() {
        let (dispatcher, _) = dispatcher(config_with_labels(None, None));
        let payload = dispatcher.build_payload(&Fault::exception("App\\Boom", "x"));
        assert_eq!(payload.subject, "An exception has been thrown");
    }

    #[test]
    fn test_fatal_error_subject_and_field_key() {
        let (dispatcher, _) = dispatcher(config_with_labels(None, None));
        let fault = Fault::runtime(FaultKind::FatalError, "Error", "segfault");
        let payload = dispatcher.build_payload(&fault);
        assert_eq!(payload.subject, "An error has been thrown");
        assert!(payload.fields.contains_key("error"));
        assert!(!payload.fields.contains_key("exception"));
    }

    #[test]
    fn test_warning_uses_exception_template() {
        let (dispatcher, _) = dispatcher(config_with_labels(None, None));
        let fault = Fault::runtime(FaultKind::Warning, "Warning", "deprecated call");
        let payload = dispatcher.build_payload(&fault);
        assert_eq!(payload.subject, "An exception has been thrown");
        assert!(payload.fields.contains_key("exception"));
    }

    #[test]
    fn test_subject_with_site_and_environment() {
        let (dispatcher, _) = dispatcher(config_with_labels(Some("site"), Some("local")));
        let payload = dispatcher.build_payload(&Fault::exception("App\\Boom", "x"));
        assert_eq!(payload.subject, "An exception has been thrown on site (local)");
    }

    #[test]
    fn test_subject_with_site_only() {
        let (dispatcher, _) = dispatcher(config_with_labels(Some("storefront"), None));
        let payload = dispatcher.build_payload(&Fault::exception("App\\Boom", "x"));
        assert_eq!(payload.subject, "An exception has been thrown on storefront");
    }

    #[test]
    fn test_payload_fields_and_addresses() {
        let (dispatcher, _) = dispatcher(config_with_labels(Some("site"), Some("local")));
        let fault = Fault::exception("App\\Boom", "x");
        let payload = dispatcher.build_payload(&fault);

        assert_eq!(payload.to.as_deref(), Some("dev@example.com"));
        assert_eq!(payload.from.as_deref(), Some("noreply@example.com"));
        assert_eq!(payload.format, PayloadFormat::Both);
        assert_eq!(
            payload.fields["site"],
            Value::String("site".to_string())
        );
        assert_eq!(
            payload.fields["environment"],
            Value::String("local".to_string())
        );
        assert_eq!(
            payload.fields["exception"],
            serde_json::to_value(&fault).unwrap()
        );
    }

    #[test]
    fn test_dispatch_hands_payload_to_transport() {
        let (dispatcher, transport) = dispatcher(config_with_labels(None, None));
        dispatcher
            .dispatch(&Fault::exception("App\\Boom", "x"))
            .unwrap();
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "An exception has been thrown");
    }

    #[test]
    fn test_dispatch_reports_transport_failure() {
        let config = config_with_labels(None, None);
        let transport = MockTransport::failing("mailbox full");
        let dispatcher = Dispatcher::new(config, Box::new(transport));
        let result = dispatcher.dispatch(&Fault::exception("App\\Boom", "x"));
        assert!(matches!(result, Err(TransportError::SendFailed(_))));
    }
}
