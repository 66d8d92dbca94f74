//! Admin console: authentication, session timeout and action dispatch.

pub mod action;
pub mod console;

pub use action::{ActionEnvelope, AdminAction, execute};
pub use console::{AdminConsole, ConsoleState};
