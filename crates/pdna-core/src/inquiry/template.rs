//! Subject and body templates for inquiry mail.

use minijinja::{Environment, context};

use super::mail::OutgoingMail;
use super::model::InquiryForm;
use crate::config::InquirySettings;
use crate::error::Result;

const SUBJECT_TEMPLATE: &str = "subject";
const BODY_TEMPLATE: &str = "body";

const DEFAULT_SUBJECT: &str =
    "[Parent DNA] {{ label }} from {{ form.name }}{% if form.organization %} ({{ form.organization }}){% endif %}";

const DEFAULT_BODY: &str = r#"New {{ label | lower }} received.

Name:         {{ form.name }}
Email:        {{ form.email }}
Organization: {{ form.organization or "-" }}
Role:         {{ form.role or "-" }}
Type:         {{ form.inquiry_type }}

{{ form.message }}
"#;

/// Renders inquiry forms into routed [`OutgoingMail`].
pub struct InquiryComposer {
    env: Environment<'static>,
    settings: InquirySettings,
}

impl InquiryComposer {
    /// Creates a composer with the built-in templates.
    pub fn new(settings: InquirySettings) -> Result<Self> {
        Self::with_templates(settings, DEFAULT_SUBJECT, DEFAULT_BODY)
    }

    /// Creates a composer with custom subject and body templates.
    pub fn with_templates(
        settings: InquirySettings,
        subject: &'static str,
        body: &'static str,
    ) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(SUBJECT_TEMPLATE, subject)?;
        env.add_template(BODY_TEMPLATE, body)?;
        Ok(Self { env, settings })
    }

    /// Validates, routes and renders a form.
    pub fn compose(&self, form: &InquiryForm) -> Result<OutgoingMail> {
        form.validate()?;

        let ctx = context! {
            form => form,
            label => form.inquiry_type.label(),
        };
        let subject = self.env.get_template(SUBJECT_TEMPLATE)?.render(&ctx)?;
        let body = self.env.get_template(BODY_TEMPLATE)?.render(&ctx)?;

        Ok(OutgoingMail {
            from: self.settings.from_address.clone(),
            to: self.settings.destination(form.inquiry_type).to_string(),
            reply_to: form.email.trim().to_string(),
            subject: subject.trim().to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdnaError;
    use crate::inquiry::InquiryType;

    fn form(inquiry_type: InquiryType) -> InquiryForm {
        InquiryForm {
            name: "Tom Reyes".to_string(),
            email: "tom@holyfamily.example".to_string(),
            organization: "Holy Family Academy".to_string(),
            role: String::new(),
            inquiry_type,
            message: "Can we pilot this with our 4th grade?".to_string(),
        }
    }

    #[test]
    fn test_compose_routes_by_type() {
        let composer = InquiryComposer::new(InquirySettings::default()).unwrap();
        let mail = composer.compose(&form(InquiryType::Partnership)).unwrap();
        assert_eq!(mail.to, "partners@parentdna.example");
        assert_eq!(mail.reply_to, "tom@holyfamily.example");
        assert_eq!(
            mail.subject,
            "[Parent DNA] Partnership from Tom Reyes (Holy Family Academy)"
        );
        assert!(mail.body.contains("Role:         -"));
        assert!(mail.body.contains("Type:         partnership"));
        assert!(mail.body.contains("pilot this with our 4th grade"));
    }

    #[test]
    fn test_compose_rejects_invalid_form() {
        let composer = InquiryComposer::new(InquirySettings::default()).unwrap();
        let mut bad = form(InquiryType::General);
        bad.email = "not-an-email".to_string();
        assert!(matches!(composer.compose(&bad).unwrap_err(), PdnaError::Validation(_)));
    }

    #[test]
    fn test_custom_templates() {
        let composer = InquiryComposer::with_templates(
            InquirySettings::default(),
            "{{ form.inquiry_type }}",
            "{{ form.message }}",
        )
        .unwrap();
        let mail = composer.compose(&form(InquiryType::Press)).unwrap();
        assert_eq!(mail.subject, "press");
        assert_eq!(mail.to, "press@parentdna.example");
    }
}
