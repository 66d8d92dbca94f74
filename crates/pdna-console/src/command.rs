//! Console command parsing.

use std::str::FromStr;

use pdna_application::AdminAction;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Run an admin action; `confirm` skips the overwrite prompt
    Action { action: AdminAction, confirm: bool },
    Status,
    Logout,
    Help,
    Quit,
    Unknown(String),
}

const SESSION_COMMANDS: [&str; 5] = ["status", "logout", "help", "quit", "exit"];

/// Every word the console accepts as a command.
pub fn command_names() -> Vec<String> {
    AdminAction::iter()
        .map(|a| a.to_string())
        .chain(SESSION_COMMANDS.iter().map(|s| s.to_string()))
        .collect()
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return ConsoleCommand::Unknown(String::new());
        };
        let rest: Vec<&str> = words.collect();

        match head {
            "status" => ConsoleCommand::Status,
            "logout" => ConsoleCommand::Logout,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            other => match AdminAction::from_str(other) {
                Ok(action) => {
                    let confirm = rest.iter().any(|w| matches!(*w, "--yes" | "-y"));
                    let unexpected = rest.iter().any(|w| !matches!(*w, "--yes" | "-y"));
                    if unexpected || (confirm && !action.is_destructive()) {
                        ConsoleCommand::Unknown(line.trim().to_string())
                    } else {
                        ConsoleCommand::Action { action, confirm }
                    }
                }
                Err(_) => ConsoleCommand::Unknown(line.trim().to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            ConsoleCommand::parse("setup-complete"),
            ConsoleCommand::Action {
                action: AdminAction::SetupComplete,
                confirm: false
            }
        );
        assert_eq!(
            ConsoleCommand::parse("  setup-complete --yes "),
            ConsoleCommand::Action {
                action: AdminAction::SetupComplete,
                confirm: true
            }
        );
        assert_eq!(
            ConsoleCommand::parse("get-assessment"),
            ConsoleCommand::Action {
                action: AdminAction::GetAssessment,
                confirm: false
            }
        );
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(ConsoleCommand::parse("exit"), ConsoleCommand::Quit);
        assert_eq!(ConsoleCommand::parse("?"), ConsoleCommand::Help);
        assert_eq!(ConsoleCommand::parse("logout"), ConsoleCommand::Logout);
    }

    #[test]
    fn test_rejects_stray_arguments() {
        assert!(matches!(ConsoleCommand::parse("stats --yes"), ConsoleCommand::Unknown(_)));
        assert!(matches!(ConsoleCommand::parse("validate now"), ConsoleCommand::Unknown(_)));
        assert!(matches!(ConsoleCommand::parse("drop-everything"), ConsoleCommand::Unknown(_)));
    }

    #[test]
    fn test_command_names_cover_actions() {
        let names = command_names();
        for action in AdminAction::iter() {
            assert!(names.contains(&action.to_string()));
        }
        assert!(names.contains(&"logout".to_string()));
    }
}
