pub mod admin;
pub mod inquiry_service;
pub mod operation_log;
pub mod parent_dna_service;

pub use admin::{ActionEnvelope, AdminAction, AdminConsole, ConsoleState};
pub use inquiry_service::{InquiryReceipt, InquiryService};
pub use operation_log::{OperationLogEntry, OperationLogLayer};
pub use parent_dna_service::{
    Assessment, DnaStats, LoadReport, ParentDnaService, ValidationCounts, ValidationReport,
};
