//! Inquiry form contract of the marketing pages.
//!
//! A visitor submits an [`InquiryForm`]; it is validated, routed to a
//! destination address by [`InquiryType`], rendered into an [`OutgoingMail`]
//! and handed to a [`MailSender`].

pub mod mail;
pub mod model;
pub mod template;

pub use mail::{MailSender, OutgoingMail};
pub use model::{InquiryForm, InquiryType, is_valid_email};
pub use template::InquiryComposer;
