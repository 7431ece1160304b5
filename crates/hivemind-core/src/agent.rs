//! Task handlers — the agents that steps are dispatched to.
//!
//! A handler receives an action name and the optional user input collected for
//! the step, and answers with a text result. Dispatch is by action name; an
//! action the handler does not know yields [`ACTION_NOT_RECOGNIZED`].

use async_trait::async_trait;

/// Result text for an action the handler does not implement.
pub const ACTION_NOT_RECOGNIZED: &str = "Action not recognized.";

#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// Instructions the agent was configured with.
    fn instructions(&self) -> &str;

    /// Names of the actions this handler implements.
    fn actions(&self) -> &[&'static str];

    /// Perform `action`. Unknown actions answer with [`ACTION_NOT_RECOGNIZED`].
    async fn perform_action(&self, action: &str, user_input: Option<&str>) -> String;
}

/// The built-in customer-service agent.
#[derive(Debug, Clone)]
pub struct SwarmAgent {
    name: String,
    instructions: String,
}

impl SwarmAgent {
    pub const ACTIONS: &'static [&'static str] = &[
        "collect_issue_details",
        "propose_fix",
        "offer_refund",
        "process_refund",
    ];

    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn collect_issue_details(&self, user_input: Option<&str>) -> String {
        match user_input {
            Some(details) if !details.is_empty() => {
                format!("Collected issue details: {}", details)
            }
            _ => "No issue details provided.".to_string(),
        }
    }

    fn propose_fix(&self) -> String {
        "Based on the issue, we recommend restarting the device.".to_string()
    }

    fn offer_refund(&self) -> String {
        "We have processed your refund.".to_string()
    }

    fn process_refund(&self, user_input: Option<&str>) -> String {
        let confirmed = user_input
            .map(|s| s.trim().to_lowercase())
            .map(|s| s == "yes" || s == "y")
            .unwrap_or(false);

        if confirmed {
            "Refund processed successfully.".to_string()
        } else {
            "Refund process cancelled.".to_string()
        }
    }
}

#[async_trait]
impl TaskHandler for SwarmAgent {
    fn instructions(&self) -> &str {
        &self.instructions
    }

    fn actions(&self) -> &[&'static str] {
        Self::ACTIONS
    }

    async fn perform_action(&self, action: &str, user_input: Option<&str>) -> String {
        tracing::debug!("[{}] perform_action '{}' (input: {:?})", self.name, action, user_input);
        match action {
            "collect_issue_details" => self.collect_issue_details(user_input),
            "propose_fix" => self.propose_fix(),
            "offer_refund" => self.offer_refund(),
            "process_refund" => self.process_refund(user_input),
            other => {
                tracing::warn!("[{}] Unknown action '{}'", self.name, other);
                ACTION_NOT_RECOGNIZED.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> SwarmAgent {
        SwarmAgent::new("RefundAgent", "Handle refunds")
    }

    #[tokio::test]
    async fn test_unknown_action_yields_sentinel() {
        let result = agent().perform_action("summon_manager", None).await;
        assert_eq!(result, "Action not recognized.");
        assert_eq!(result, ACTION_NOT_RECOGNIZED);
    }

    #[tokio::test]
    async fn test_collect_issue_details() {
        let a = agent();
        assert_eq!(
            a.perform_action("collect_issue_details", Some("screen flickers")).await,
            "Collected issue details: screen flickers"
        );
        assert_eq!(
            a.perform_action("collect_issue_details", Some("   ")).await,
            "Collected issue details:    "
        );
        assert_eq!(
            a.perform_action("collect_issue_details", Some("  cracked screen ")).await,
            "Collected issue details:   cracked screen "
        );
        assert_eq!(
            a.perform_action("collect_issue_details", Some("")).await,
            "No issue details provided."
        );
        assert_eq!(
            a.perform_action("collect_issue_details", None).await,
            "No issue details provided."
        );
    }

    #[tokio::test]
    async fn test_process_refund_confirmation() {
        let a = agent();
        for yes in ["yes", "Y", " YES ", "y"] {
            assert_eq!(
                a.perform_action("process_refund", Some(yes)).await,
                "Refund processed successfully.",
                "input {:?}",
                yes
            );
        }
        for no in ["no", "yeah", ""] {
            assert_eq!(
                a.perform_action("process_refund", Some(no)).await,
                "Refund process cancelled."
            );
        }
        assert_eq!(
            a.perform_action("process_refund", None).await,
            "Refund process cancelled."
        );
    }

    #[tokio::test]
    async fn test_fixed_responses_ignore_input() {
        let a = agent();
        assert_eq!(
            a.perform_action("propose_fix", Some("anything")).await,
            "Based on the issue, we recommend restarting the device."
        );
        assert_eq!(
            a.perform_action("offer_refund", None).await,
            "We have processed your refund."
        );
    }

    #[test]
    fn test_actions_listed() {
        let a = agent();
        assert_eq!(a.actions().len(), 4);
        assert_eq!(a.instructions(), "Handle refunds");
        assert_eq!(a.name(), "RefundAgent");
    }
}
