use std::fmt;

use super::{Brew, BrewError, CommandOutput};

/// Package actions that run to completion without streaming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Uninstall,
    Upgrade,
}

impl CommandKind {
    /// The `brew` subcommand this kind runs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Uninstall => "uninstall",
            Self::Upgrade => "upgrade",
        }
    }

    pub fn action_title(self) -> &'static str {
        match self {
            Self::Uninstall => "Uninstall",
            Self::Upgrade => "Upgrade",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of a fire-and-forget package action.
#[derive(Debug)]
pub struct CommandMessage {
    pub kind: CommandKind,
    pub pkg: String,
    pub result: Result<CommandOutput, BrewError>,
}

pub async fn run_package_command(
    brew: &Brew,
    kind: CommandKind,
    pkg: &str,
) -> Result<CommandOutput, BrewError> {
    brew.run(&[kind.label(), pkg]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fake_brew;

    #[test]
    fn labels_match_brew_subcommands() {
        assert_eq!(CommandKind::Uninstall.to_string(), "uninstall");
        assert_eq!(CommandKind::Upgrade.to_string(), "upgrade");
        assert_eq!(CommandKind::Upgrade.action_title(), "Upgrade");
    }

    #[tokio::test]
    async fn package_command_passes_subcommand_and_name() {
        let (_dir, brew) = fake_brew(r#"echo "$1:$2""#);
        let output = run_package_command(&brew, CommandKind::Uninstall, "wget")
            .await
            .unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "uninstall:wget");
    }
}
