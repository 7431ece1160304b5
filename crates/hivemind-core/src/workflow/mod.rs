//! Workflow definitions: the file schema and step guards.
//!
//! ```text
//! workflow.yaml ──► WorkflowSpec ──► HiveMind (executor)
//!                       │                 │
//!                   AgentSpec ──► AgentRegistry ──► SwarmAgent
//! ```

pub mod condition;
pub mod schema;

pub use condition::{ConditionEvaluator, PermissiveConditions, RunContext};
pub use schema::{AgentSpec, Severity, ValidationIssue, WorkflowSpec, WorkflowStep, DEFAULT_PROMPT};
