//! Integration tests for the hivemind CLI commands.
//!
//! These exercise the same code paths as the binary, with scripted answers
//! instead of terminal prompts and workflow files written to temp dirs.

use std::path::PathBuf;

use hivemind_cli::commands::workflow::{self, RunOptions};
use hivemind_core::{StepStatus, WorkflowSpec, ACTION_NOT_RECOGNIZED};

fn demo_workflow() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../workflows/refund_workflow.yaml")
        .to_string_lossy()
        .to_string()
}

fn write_workflow(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write workflow file");
    path.to_string_lossy().to_string()
}

fn opts(file: String, answers: &[&str]) -> RunOptions {
    RunOptions {
        file,
        answers: answers.iter().map(|s| s.to_string()).collect(),
        json: false,
        verbose: false,
    }
}

#[test]
fn test_demo_workflow_is_valid() {
    let spec = WorkflowSpec::from_file(demo_workflow()).expect("demo workflow should parse");
    assert_eq!(spec.agents.len(), 2);
    assert_eq!(spec.steps.len(), 4);
    assert!(spec
        .validate()
        .iter()
        .all(|i| i.severity != hivemind_core::workflow::Severity::Error));
}

#[tokio::test]
async fn test_run_demo_workflow_with_answers() {
    let result = workflow::run(&opts(demo_workflow(), &["screen is cracked", "y"]))
        .await
        .expect("run should succeed");

    let names: Vec<&str> = result.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Collect Issue Details",
            "Propose Fix",
            "Offer Refund",
            "Process Refund"
        ]
    );
    assert_eq!(
        result.steps[0].result(),
        Some("Collected issue details: screen is cracked")
    );
    assert_eq!(result.steps[2].result(), Some("We have processed your refund."));
    assert_eq!(result.steps[3].result(), Some("Refund processed successfully."));
    assert_eq!(result.completed(), 4);
}

#[tokio::test]
async fn test_run_json_workflow_with_unknowns() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_workflow(
        &dir,
        "flow.json",
        r#"{
            "name": "Edge Cases",
            "agents": {
                "RefundAgent": { "instructions": "Refunds" },
                "SalesAgent": { "instructions": "No handler exists for me" }
            },
            "steps": [
                { "agent": "SalesAgent", "action": "upsell" },
                { "agent": "RefundAgent", "action": "warp_drive" },
                { "agent": "RefundAgent", "action": "process_refund", "requires_user_input": true }
            ]
        }"#,
    );

    let mut run_opts = opts(file, &["nope"]);
    run_opts.json = true;
    let result = workflow::run(&run_opts).await.expect("run should succeed");

    assert_eq!(result.workflow, "Edge Cases");
    assert_eq!(result.steps[0].status, StepStatus::AgentNotFound);
    assert_eq!(result.steps[1].result(), Some(ACTION_NOT_RECOGNIZED));
    assert_eq!(result.steps[2].result(), Some("Refund process cancelled."));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["steps"][0]["status"], "agent_not_found");
    assert_eq!(json["steps"][2]["user_input"], "nope");
}

#[tokio::test]
async fn test_run_missing_file_is_error() {
    let err = workflow::run(&opts("does/not/exist.yaml".to_string(), &[]))
        .await
        .unwrap_err();
    assert!(err.contains("does/not/exist.yaml"));
}

#[tokio::test]
async fn test_run_runs_out_of_answers() {
    let err = workflow::run(&opts(demo_workflow(), &["only one answer"]))
        .await
        .unwrap_err();
    assert!(err.contains("no scripted answer"));
}

#[tokio::test]
async fn test_validate_commands() {
    let dir = tempfile::tempdir().unwrap();
    let ok = write_workflow(
        &dir,
        "ok.yaml",
        "agents:\n  RefundAgent:\n    instructions: refunds\nsteps:\n  - agent: RefundAgent\n    action: offer_refund\n",
    );
    let broken = write_workflow(
        &dir,
        "broken.yaml",
        "steps:\n  - agent: RefundAgent\n    action: \"\"\n",
    );
    let unparsable = write_workflow(&dir, "bad.yaml", "steps: [ {agent: RefundAgent} ]\n");

    assert!(workflow::validate(&ok).await.is_ok());
    assert!(workflow::validate(&broken)
        .await
        .unwrap_err()
        .contains("1 error(s)"));
    assert!(workflow::validate(&unparsable).await.is_err());
}

#[tokio::test]
async fn test_listing_commands() {
    assert!(workflow::agents(&demo_workflow()).await.is_ok());
    assert!(workflow::actions().await.is_ok());
}

#[tokio::test]
async fn test_run_keeps_answer_padding() {
    let result = workflow::run(&opts(demo_workflow(), &["  cracked screen ", "no"]))
        .await
        .expect("run should succeed");
    assert_eq!(
        result.steps[0].result(),
        Some("Collected issue details:   cracked screen ")
    );
    assert_eq!(result.steps[3].result(), Some("Refund process cancelled."));
}

#[tokio::test]
async fn test_agents_lists_long_instructions() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_workflow(
        &dir,
        "long.yaml",
        "agents:\n  IssuesAndRepairsAgentWithAVeryLongName:\n    instructions: \"Überprüfe das Gerät gründlich,\\nbevor eine Erstattung angeboten wird.\"\nsteps: []\n",
    );
    assert!(workflow::agents(&file).await.is_ok());
    assert_eq!(
        hivemind_core::executor::truncate("Überprüfe das Gerät gründlich", 12),
        "Überprüfe..."
    );
}
