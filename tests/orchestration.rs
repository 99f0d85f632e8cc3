//! Bulk orchestration pass tests.

use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc;

use workflow_orchestrator::config::{EndpointConfig, OrchestratorConfig, WorkflowConfig};
use workflow_orchestrator::endpoint::EndpointClient;
use workflow_orchestrator::lifecycle::{Orchestrator, Shutdown};

mod common;

fn endpoint(url: String, workflows: Vec<(&Path, u16)>) -> EndpointConfig {
    EndpointConfig {
        url,
        workflows: workflows
            .into_iter()
            .map(|(path, port)| WorkflowConfig {
                workflow: path.to_path_buf(),
                port,
            })
            .collect(),
    }
}

fn spawn_orchestrator(
    config: OrchestratorConfig,
) -> (mpsc::UnboundedSender<OrchestratorConfig>, Shutdown) {
    let shutdown = Shutdown::new();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let shutdown_rx = shutdown.subscribe();

    tokio::spawn(async move {
        let orchestrator = Orchestrator::new(EndpointClient::new());
        orchestrator.run(config, update_rx, shutdown_rx).await;
    });

    (update_tx, shutdown)
}

#[tokio::test]
async fn bulk_pass_without_workflows_only_terminates() {
    let first = common::MockEndpoint::start().await;
    let second = common::MockEndpoint::start().await;

    let config = OrchestratorConfig {
        verbose: false,
        endpoints: vec![
            endpoint(first.url(), vec![]),
            endpoint(second.url(), vec![]),
        ],
    };

    let (_updates, shutdown) = spawn_orchestrator(config);
    tokio::time::sleep(Duration::from_millis(800)).await;

    for mock in [&first, &second] {
        assert_eq!(mock.terminate_count(), 1);
        assert!(mock.execute_requests().is_empty());
    }

    shutdown.trigger();
}

#[tokio::test]
async fn terminate_failure_does_not_suppress_executes() {
    // Everything answers 500, so the terminate fails; the execute attempt
    // must still be issued.
    let mock = common::MockEndpoint::with_status(500).await;

    let dir = tempfile::tempdir().unwrap();
    let flow = dir.path().join("flow.json");
    std::fs::write(&flow, r#"{"name": "flow"}"#).unwrap();

    let config = OrchestratorConfig {
        verbose: false,
        endpoints: vec![endpoint(mock.url(), vec![(&flow, 8001)])],
    };

    let (_updates, shutdown) = spawn_orchestrator(config);
    tokio::time::sleep(Duration::from_millis(800)).await;

    assert_eq!(mock.terminate_count(), 1);
    assert_eq!(mock.execute_requests().len(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn unparseable_workflow_skipped_sibling_executes() {
    let mock = common::MockEndpoint::start().await;

    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    let good = dir.path().join("good.json");
    std::fs::write(&bad, "{not json").unwrap();
    std::fs::write(&good, r#"{"name": "good"}"#).unwrap();

    let config = OrchestratorConfig {
        verbose: false,
        endpoints: vec![endpoint(mock.url(), vec![(&bad, 8001), (&good, 8002)])],
    };

    let (_updates, shutdown) = spawn_orchestrator(config);
    tokio::time::sleep(Duration::from_millis(800)).await;

    let executes = mock.execute_requests();
    assert_eq!(executes.len(), 1, "only the parseable workflow executes");

    let body: serde_json::Value = serde_json::from_str(&executes[0].body).unwrap();
    assert_eq!(body["parallel"], true);
    assert_eq!(body["host"], "0.0.0.0");
    assert_eq!(body["port"], "8002");
    assert_eq!(body["workflow_api"]["name"], "good");

    shutdown.trigger();
}

#[tokio::test]
async fn bulk_pass_is_idempotent() {
    let mock = common::MockEndpoint::start().await;

    let dir = tempfile::tempdir().unwrap();
    let flow = dir.path().join("flow.json");
    std::fs::write(&flow, r#"{"name": "flow"}"#).unwrap();

    let config = OrchestratorConfig {
        verbose: false,
        endpoints: vec![endpoint(mock.url(), vec![(&flow, 8001)])],
    };

    let (updates, shutdown) = spawn_orchestrator(config.clone());
    tokio::time::sleep(Duration::from_millis(800)).await;

    let first_pass: Vec<_> = mock.requests().iter().map(|r| r.path.clone()).collect();
    assert_eq!(
        first_pass,
        ["/api/bentoml/serve/terminate", "/api/bentoml/serve"]
    );

    // Unchanged configuration, second cycle.
    updates.send(config).unwrap();
    tokio::time::sleep(Duration::from_millis(800)).await;

    let all: Vec<_> = mock.requests().iter().map(|r| r.path.clone()).collect();
    assert_eq!(all.len(), first_pass.len() * 2);
    assert_eq!(&all[..first_pass.len()], first_pass.as_slice());
    assert_eq!(&all[first_pass.len()..], first_pass.as_slice());

    shutdown.trigger();
}
