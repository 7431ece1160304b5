//! Agent registry — maps agent names from the workflow to task handlers.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::agent::{SwarmAgent, TaskHandler};
use crate::workflow::WorkflowSpec;

/// Agent names that get a built-in [`SwarmAgent`] when declared in a workflow.
pub const KNOWN_AGENTS: &[&str] = &["IssuesAndRepairsAgent", "RefundAgent"];

/// Handlers indexed by agent name.
#[derive(Default, Clone)]
pub struct AgentRegistry {
    handlers: BTreeMap<String, Arc<dyn TaskHandler>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build handlers for the agents a workflow declares.
    ///
    /// Only [`KNOWN_AGENTS`] are instantiated. Other declared agents are
    /// skipped; steps that reference them report the agent as not found.
    pub fn from_spec(spec: &WorkflowSpec) -> Self {
        let mut registry = Self::new();

        for (name, agent) in &spec.agents {
            if KNOWN_AGENTS.contains(&name.as_str()) {
                registry.register(
                    name.clone(),
                    Arc::new(SwarmAgent::new(name.clone(), agent.instructions.clone())),
                );
            } else {
                tracing::warn!("[Registry] No handler for agent '{}', skipping", name);
            }
        }

        tracing::info!("[Registry] Initialized agents: {:?}", registry.names());
        registry
    }

    /// Register (or replace) the handler for `name`.
    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn TaskHandler>) {
        let name = name.into();
        if self.handlers.insert(name.clone(), handler).is_some() {
            tracing::debug!("[Registry] Replaced handler for '{}'", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn TaskHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("agents", &self.names())
            .finish()
    }
}
