//! HiveMind Core — declarative agent workflows.
//!
//! A workflow file names a set of agents and an ordered list of steps. The
//! [`HiveMind`] runner walks the steps one at a time, collects user input when
//! a step asks for it, and dispatches the step's action to the agent's
//! [`TaskHandler`]. There is no parallelism, retry or persistence.

pub mod agent;
pub mod error;
pub mod executor;
pub mod input;
pub mod registry;
pub mod workflow;

// Convenience re-exports
pub use agent::{SwarmAgent, TaskHandler, ACTION_NOT_RECOGNIZED};
pub use error::{HivemindError, Result};
pub use executor::{HiveMind, HistoryEntry, Role, StepOutcome, StepStatus, WorkflowResult};
pub use input::{InputSource, ScriptedInput, StdinInput};
pub use registry::{AgentRegistry, KNOWN_AGENTS};
pub use workflow::{ConditionEvaluator, PermissiveConditions, RunContext, WorkflowSpec, WorkflowStep};
