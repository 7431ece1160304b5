//! `hivemind run | validate | agents | actions` — workflow commands.

use std::sync::Arc;

use hivemind_core::agent::SwarmAgent;
use hivemind_core::executor::{truncate, HiveMind, WorkflowResult};
use hivemind_core::input::{InputSource, ScriptedInput};
use hivemind_core::registry::AgentRegistry;
use hivemind_core::workflow::{Severity, WorkflowSpec};

use super::input::TerminalInput;
use super::print_json;

/// Options for `hivemind run`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub file: String,
    /// Pre-supplied answers; when non-empty the terminal is never prompted
    pub answers: Vec<String>,
    pub json: bool,
    pub verbose: bool,
}

/// Run a workflow file to completion.
pub async fn run(opts: &RunOptions) -> Result<WorkflowResult, String> {
    let spec = WorkflowSpec::from_file(&opts.file).map_err(|e| e.to_string())?;
    tracing::info!(
        "[Workflow] Loaded '{}' from {} ({} step(s))",
        spec.display_name(),
        opts.file,
        spec.steps.len()
    );

    println!("📄 Loaded workflow: {} ({})", spec.display_name(), opts.file);
    println!("   {} agent(s), {} step(s)", spec.agents.len(), spec.steps.len());
    println!();

    let input: Arc<dyn InputSource> = if opts.answers.is_empty() {
        tracing::info!("[Workflow] Using terminal input");
        Arc::new(TerminalInput)
    } else {
        tracing::info!("[Workflow] Using scripted input ({} answer(s))", opts.answers.len());
        Arc::new(ScriptedInput::new(opts.answers.iter().cloned()))
    };

    let mut hivemind = HiveMind::new(spec).with_input(input);
    hivemind.set_verbose(opts.verbose);

    let result = hivemind.run().await.map_err(|e| e.to_string())?;
    tracing::info!(
        "[Workflow] Run {} finished: {} completed, {} skipped, {} missing agent(s)",
        result.run_id,
        result.completed(),
        result.skipped(),
        result.missing_agents()
    );

    if opts.json {
        let value = serde_json::to_value(&result)
            .map_err(|e| format!("Failed to serialize result: {}", e))?;
        print_json(&value);
    }

    Ok(result)
}

/// Validate a workflow file without executing it.
pub async fn validate(file: &str) -> Result<(), String> {
    let spec = WorkflowSpec::from_file(file).map_err(|e| e.to_string())?;
    let issues = spec.validate();
    tracing::info!(
        "[Workflow] Validated '{}': {} issue(s)",
        spec.display_name(),
        issues.len()
    );

    println!("Workflow '{}' ({})", spec.display_name(), file);
    println!("   Agents: {}", spec.agents.len());
    println!("   Steps: {}", spec.steps.len());

    for (i, step) in spec.steps.iter().enumerate() {
        println!(
            "   {}. {} (agent: {}, action: {}{})",
            i + 1,
            step.display_name(i),
            step.agent,
            step.action,
            if step.requires_user_input { ", input" } else { "" }
        );
    }

    if issues.is_empty() {
        println!("✅ No issues found");
        return Ok(());
    }

    println!();
    for issue in &issues {
        println!("   {}", issue);
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    if errors > 0 {
        tracing::warn!("[Workflow] '{}' failed validation with {} error(s)", file, errors);
        Err(format!("Workflow '{}' has {} error(s)", file, errors))
    } else {
        println!("✅ Workflow is valid ({} warning(s)/note(s))", issues.len());
        Ok(())
    }
}

/// List the agents a workflow declares and whether a handler backs them.
pub async fn agents(file: &str) -> Result<(), String> {
    let spec = WorkflowSpec::from_file(file).map_err(|e| e.to_string())?;
    let registry = AgentRegistry::from_spec(&spec);

    println!("┌──────────────────────────┬─────────┬──────────────────────────────────────────┐");
    println!("│ Agent                    │ Handler │ Instructions                             │");
    println!("├──────────────────────────┼─────────┼──────────────────────────────────────────┤");

    for (name, agent) in &spec.agents {
        println!(
            "│ {:<24} │ {:<7} │ {:<40} │",
            truncate(name, 24),
            if registry.contains(name) { "yes" } else { "no" },
            truncate(&agent.instructions.replace('\n', " "), 40)
        );
    }

    println!("└──────────────────────────┴─────────┴──────────────────────────────────────────┘");
    Ok(())
}

/// List the actions the built-in agent understands.
pub async fn actions() -> Result<(), String> {
    println!("Built-in actions:");
    for action in SwarmAgent::ACTIONS {
        println!("   - {}", action);
    }
    Ok(())
}
