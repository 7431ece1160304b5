//! HiveMind — runs a workflow spec step by step.
//!
//! For each step, in list order and one at a time, the runner:
//! 1. Evaluates the step condition (if any)
//! 2. Collects user input when the step asks for it
//! 3. Dispatches the action to the step's agent and awaits the result
//! 4. Records the outcome and the message history
//!
//! Unknown agents and unknown actions never abort the run. Only a failure to
//! collect input does.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::input::{InputSource, StdinInput};
use crate::registry::AgentRegistry;
use crate::workflow::{ConditionEvaluator, PermissiveConditions, RunContext, WorkflowSpec, WorkflowStep};

/// What happened to a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Completed { result: String },
    AgentNotFound,
    Skipped { condition: String },
}

/// Record of one executed (or skipped) step.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub name: String,
    pub agent: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_input: Option<String>,
    #[serde(flatten)]
    pub status: StepStatus,
}

impl StepOutcome {
    pub fn result(&self) -> Option<&str> {
        match &self.status {
            StepStatus::Completed { result } => Some(result),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    System,
}

/// One message exchanged during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub agent: String,
    pub content: String,
}

/// Result of executing the entire workflow.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub run_id: Uuid,
    pub workflow: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepOutcome>,
    pub history: Vec<HistoryEntry>,
}

impl WorkflowResult {
    pub fn completed(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Completed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Skipped { .. }))
    }

    pub fn missing_agents(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::AgentNotFound))
    }

    fn count(&self, pred: impl Fn(&StepStatus) -> bool) -> usize {
        self.steps.iter().filter(|o| pred(&o.status)).count()
    }
}

/// The central orchestrator: owns the spec, the agent handlers, the
/// condition evaluator and the input source.
pub struct HiveMind {
    spec: WorkflowSpec,
    registry: AgentRegistry,
    conditions: Arc<dyn ConditionEvaluator>,
    input: Arc<dyn InputSource>,
    current_step: usize,
    history: Vec<HistoryEntry>,
    verbose: bool,
}

impl HiveMind {
    pub fn new(spec: WorkflowSpec) -> Self {
        let registry = AgentRegistry::from_spec(&spec);
        Self {
            spec,
            registry,
            conditions: Arc::new(PermissiveConditions),
            input: Arc::new(StdinInput),
            current_step: 0,
            history: Vec::new(),
            verbose: false,
        }
    }

    /// Load a workflow file and build the runner for it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(WorkflowSpec::from_file(path)?))
    }

    pub fn with_registry(mut self, registry: AgentRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_conditions(mut self, conditions: Arc<dyn ConditionEvaluator>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_input(mut self, input: Arc<dyn InputSource>) -> Self {
        self.input = input;
        self
    }

    /// Set verbose mode for detailed output.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn spec(&self) -> &WorkflowSpec {
        &self.spec
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Index of the next step to run.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Execute every step of the workflow.
    pub async fn run(&mut self) -> Result<WorkflowResult> {
        let started_at = Utc::now();
        let run_id = Uuid::new_v4();
        let total = self.spec.steps.len();

        println!("╔══════════════════════════════════════════════════════════╗");
        println!("║  HiveMind Workflow                                      ║");
        println!("╠══════════════════════════════════════════════════════════╣");
        println!("║  Workflow : {:<44} ║", truncate(self.spec.display_name(), 44));
        println!("║  Agents   : {:<44} ║", truncate(&self.registry.names().join(", "), 44));
        println!("║  Steps    : {:<44} ║", total);
        println!("╚══════════════════════════════════════════════════════════╝");
        println!();

        tracing::info!("[HiveMind] Run {} started ({} steps)", run_id, total);

        self.current_step = 0;
        self.history.clear();
        let mut outcomes: Vec<StepOutcome> = Vec::with_capacity(total);

        while self.current_step < total {
            let index = self.current_step;
            let step = self.spec.steps[index].clone();
            let name = step.display_name(index);

            println!("── Step {}/{}: {} ──", index + 1, total, name);

            let (status, user_input) = self.execute_step(index, &step, &outcomes).await?;

            self.handle_result(&step, &status);

            outcomes.push(StepOutcome {
                index,
                name,
                agent: step.agent.clone(),
                action: step.action.clone(),
                user_input,
                status,
            });

            println!("   Step completed");
            println!();
            self.current_step += 1;
        }

        let result = WorkflowResult {
            run_id,
            workflow: self.spec.display_name().to_string(),
            started_at,
            finished_at: Utc::now(),
            steps: outcomes,
            history: self.history.clone(),
        };

        println!("═══════════════════════════════════════════════════════════");
        println!("  Workflow Complete: {}", result.workflow);
        println!(
            "  Steps: {} completed, {} skipped, {} without agent",
            result.completed(),
            result.skipped(),
            result.missing_agents()
        );
        println!("═══════════════════════════════════════════════════════════");

        tracing::info!(
            "[HiveMind] Run {} finished in {}ms",
            run_id,
            (result.finished_at - result.started_at).num_milliseconds()
        );

        Ok(result)
    }

    async fn execute_step(
        &mut self,
        index: usize,
        step: &WorkflowStep,
        completed: &[StepOutcome],
    ) -> Result<(StepStatus, Option<String>)> {
        if let Some(ref condition) = step.condition {
            println!("   Condition: {}", condition);
            let ctx = RunContext {
                step_index: index,
                completed,
            };
            if !self.conditions.evaluate(condition, &ctx) {
                println!("   ⏭  Skipped (condition not met)");
                return Ok((
                    StepStatus::Skipped {
                        condition: condition.clone(),
                    },
                    None,
                ));
            }
        }

        let user_input = if step.requires_user_input {
            let answer = self.input.read_line(step.effective_prompt()).await?;
            self.record(Role::User, &step.agent, &answer);
            Some(answer)
        } else {
            None
        };

        let Some(agent) = self.registry.get(&step.agent) else {
            println!("   Agent '{}' not found.", step.agent);
            self.record(
                Role::System,
                &step.agent,
                &format!("Agent '{}' not found.", step.agent),
            );
            return Ok((StepStatus::AgentNotFound, user_input));
        };

        if self.verbose {
            println!(
                "   🔧 Delegating '{}' to '{}' with input: {:?}",
                step.action, step.agent, user_input
            );
        }

        let result = agent
            .perform_action(&step.action, user_input.as_deref())
            .await;
        println!("   Result: {}", result);
        self.record(Role::Agent, &step.agent, &result);

        Ok((StepStatus::Completed { result }, user_input))
    }

    /// Success and failure hooks are carried in the workflow file but not executed.
    fn handle_result(&self, step: &WorkflowStep, status: &StepStatus) {
        tracing::debug!("[HiveMind] Handling result from '{}': {:?}", step.agent, status);
        if let Some(ref hook) = step.on_success {
            tracing::debug!("[HiveMind] on_success '{}' not executed", hook);
        }
        if let Some(ref hook) = step.on_failure {
            tracing::debug!("[HiveMind] on_failure '{}' not executed", hook);
        }
    }

    fn record(&mut self, role: Role, agent: &str, content: &str) {
        self.history.push(HistoryEntry {
            role,
            agent: agent.to_string(),
            content: content.to_string(),
        });
    }
}

/// Shorten `s` to at most `max` characters, ending in `...` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
