//! Schema types for workflow definitions.
//!
//! A workflow file (YAML or JSON) declares the agents that take part and the
//! ordered steps dispatched to them:
//!
//! ```yaml
//! name: "Refund Flow"
//!
//! agents:
//!   IssuesAndRepairsAgent:
//!     instructions: "Help the customer diagnose and fix product issues."
//!   RefundAgent:
//!     instructions: "Offer and process refunds."
//!
//! steps:
//!   - step_name: "Collect Issue"
//!     agent: IssuesAndRepairsAgent
//!     action: collect_issue_details
//!     requires_user_input: true
//!     prompt: "Describe the issue: "
//!
//!   - step_name: "Process Refund"
//!     agent: RefundAgent
//!     action: process_refund
//!     requires_user_input: true
//!     prompt: "Confirm refund (yes/no): "
//!     condition: "fix_failed"
//!     on_success: "notify_customer"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::agent::SwarmAgent;
use crate::error::{HivemindError, Result};
use crate::registry::KNOWN_AGENTS;

/// Prompt shown when a step requires input but does not provide one.
pub const DEFAULT_PROMPT: &str = "Please provide input: ";

/// Top-level workflow document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowSpec {
    /// Optional workflow name
    #[serde(default)]
    pub name: Option<String>,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Agent name → instructions
    #[serde(default)]
    pub agents: BTreeMap<String, AgentSpec>,

    /// Ordered list of steps
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

/// Per-agent block from the `agents` mapping.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSpec {
    pub instructions: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// A single step in the workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowStep {
    /// Display name of the step
    #[serde(default, alias = "name")]
    pub step_name: Option<String>,

    /// Agent that handles this step
    pub agent: String,

    /// Action the agent performs
    pub action: String,

    /// Whether the user is asked for input before dispatch
    #[serde(default)]
    pub requires_user_input: bool,

    /// Prompt shown when collecting input
    #[serde(default)]
    pub prompt: Option<String>,

    /// Guard expression. Handed to the condition evaluator.
    #[serde(default)]
    pub condition: Option<String>,

    /// Hook named for a successful result. Recorded, never executed.
    #[serde(default)]
    pub on_success: Option<String>,

    /// Hook named for a failed result. Recorded, never executed.
    #[serde(default)]
    pub on_failure: Option<String>,
}

impl WorkflowStep {
    /// Name used in progress output; `index` is zero-based.
    pub fn display_name(&self, index: usize) -> String {
        match self.step_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("step-{}", index + 1),
        }
    }

    /// Prompt to show when this step collects input.
    pub fn effective_prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    pub fn has_hooks(&self) -> bool {
        self.on_success.is_some() || self.on_failure.is_some()
    }
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One finding from [`WorkflowSpec::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Zero-based step index, if the finding concerns a step
    pub step: Option<usize>,
    pub message: String,
}

impl ValidationIssue {
    fn new(severity: Severity, step: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            severity,
            step,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.step {
            Some(i) => write!(f, "[{}] step {}: {}", self.severity, i + 1, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

impl WorkflowSpec {
    /// Parse a workflow from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| HivemindError::Parse(format!("invalid YAML: {}", e)))
    }

    /// Parse a workflow from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| HivemindError::Parse(format!("invalid JSON: {}", e)))
    }

    /// Load a workflow from a file. `.json` files are parsed as JSON,
    /// everything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| HivemindError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let spec = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };

        tracing::info!(
            "[Workflow] Loaded '{}' ({} agent(s), {} step(s))",
            path.display(),
            spec.agents.len(),
            spec.steps.len()
        );
        Ok(spec)
    }

    /// Name for banners and results.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed workflow")
    }

    /// Static checks over the document. Findings are advisory: a workflow
    /// with errors still runs, with the affected steps degrading at dispatch.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.steps.is_empty() {
            issues.push(ValidationIssue::new(
                Severity::Warning,
                None,
                "workflow has no steps",
            ));
        }

        for name in self.agents.keys() {
            if !KNOWN_AGENTS.contains(&name.as_str()) {
                issues.push(ValidationIssue::new(
                    Severity::Warning,
                    None,
                    format!("agent '{}' has no built-in handler", name),
                ));
            }
        }

        for (i, step) in self.steps.iter().enumerate() {
            if step.agent.trim().is_empty() {
                issues.push(ValidationIssue::new(Severity::Error, Some(i), "empty agent name"));
            } else if !self.agents.contains_key(&step.agent) {
                issues.push(ValidationIssue::new(
                    Severity::Warning,
                    Some(i),
                    format!("agent '{}' is not declared in `agents`", step.agent),
                ));
            }

            if step.action.trim().is_empty() {
                issues.push(ValidationIssue::new(Severity::Error, Some(i), "empty action"));
            } else if KNOWN_AGENTS.contains(&step.agent.as_str())
                && !SwarmAgent::ACTIONS.contains(&step.action.as_str())
            {
                issues.push(ValidationIssue::new(
                    Severity::Warning,
                    Some(i),
                    format!("action '{}' is not recognized by agent '{}'", step.action, step.agent),
                ));
            }

            if step.has_hooks() {
                issues.push(ValidationIssue::new(
                    Severity::Info,
                    Some(i),
                    "on_success/on_failure hooks are recorded but not executed",
                ));
            }
        }

        issues
    }
}
