use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{PdnaError, Result};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Returns whether `email` is a syntactically valid address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

/// What the inquiry is about. Decides the destination address.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InquiryType {
    #[default]
    General,
    Licensing,
    Partnership,
    Support,
    Press,
}

impl InquiryType {
    /// Human-readable label used in subjects.
    pub fn label(self) -> &'static str {
        match self {
            InquiryType::General => "General inquiry",
            InquiryType::Licensing => "School licensing",
            InquiryType::Partnership => "Partnership",
            InquiryType::Support => "Support request",
            InquiryType::Press => "Press inquiry",
        }
    }
}

/// A contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub inquiry_type: InquiryType,
    pub message: String,
}

impl InquiryForm {
    /// Validates the required fields.
    ///
    /// Every problem is reported in one [`PdnaError::Validation`] message.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("name is required");
        }
        if !is_valid_email(&self.email) {
            problems.push("email is not a valid address");
        }
        if self.message.trim().is_empty() {
            problems.push("message is required");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(PdnaError::validation(problems.join("; ")))
        }
    }
}
