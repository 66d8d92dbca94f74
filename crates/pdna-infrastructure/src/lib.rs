pub mod config_service;
pub mod dir_store;
pub mod document_parent_dna_repository;
pub mod dto;
pub mod mail_sender;
pub mod memory_store;
pub mod paths;
pub mod session_store;
pub mod shared_secret_auth;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::dir_store::DirDocumentStore;
pub use crate::document_parent_dna_repository::DocumentParentDnaRepository;
pub use crate::mail_sender::{LogMailSender, OutboxMailSender};
pub use crate::memory_store::InMemoryDocumentStore;
pub use crate::paths::PdnaPaths;
pub use crate::session_store::{FileSessionStore, InMemorySessionStore};
pub use crate::shared_secret_auth::SharedSecretAuth;
