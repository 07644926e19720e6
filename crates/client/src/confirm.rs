//! Confirmation for destructive commands.

use dialoguer::Confirm;

use crate::error::{ClientError, Result};

/// How a destructive command may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPolicy {
    /// `--force`: go ahead without asking.
    Skip,
    /// `--no-input` without `--force`: refuse.
    Refuse,
    /// Ask on the terminal.
    Ask,
}

impl ConfirmPolicy {
    pub fn new(force: bool, no_input: bool) -> Self {
        match (force, no_input) {
            (true, _) => ConfirmPolicy::Skip,
            (false, true) => ConfirmPolicy::Refuse,
            (false, false) => ConfirmPolicy::Ask,
        }
    }

    /// Checks that `action` may run, prompting when needed.
    pub fn confirm(self, action: &str) -> Result<()> {
        match self {
            ConfirmPolicy::Skip => Ok(()),
            ConfirmPolicy::Refuse => Err(ClientError::InvalidInput(format!(
                "refusing to {action} without --force (non-interactive)"
            ))),
            ConfirmPolicy::Ask => {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Proceed to {action}?"))
                    .default(false)
                    .interact()
                    .map_err(|e| ClientError::Prompt(e.to_string()))?;
                if !confirmed {
                    return Err(ClientError::Aborted);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_flags() {
        assert_eq!(ConfirmPolicy::new(true, true), ConfirmPolicy::Skip);
        assert_eq!(ConfirmPolicy::new(true, false), ConfirmPolicy::Skip);
        assert_eq!(ConfirmPolicy::new(false, true), ConfirmPolicy::Refuse);
        assert_eq!(ConfirmPolicy::new(false, false), ConfirmPolicy::Ask);
    }

    #[test]
    fn test_refuse_without_force() {
        let err = ConfirmPolicy::Refuse
            .confirm("delete event E1 from calendar primary")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: refusing to delete event E1 from calendar primary without --force (non-interactive)"
        );
    }

    #[test]
    fn test_skip_never_prompts() {
        assert!(ConfirmPolicy::Skip.confirm("delete event E1").is_ok());
    }
}
