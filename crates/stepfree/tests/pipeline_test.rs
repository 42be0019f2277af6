mod common;

use std::time::Duration;

use common::{Reply, SCRIPTED_MODEL, ScriptedProvider, example_value, plan_with_backups};
use serde_json::{Value, json};
use stepfree::{
    ErrorKind, Planner, PlannerConfig, ResultEnvelope,
    generic::GenericRole,
    model::Model,
    types::example::{EXAMPLE_PLAN_JSON, example_plan},
};
use tokio_util::sync::CancellationToken;

fn request() -> Value {
    json!({"start": "King's Cross Station", "destination": "London Bridge"})
}

fn planner(provider: ScriptedProvider) -> Planner<ScriptedProvider> {
    Planner::new(provider, PlannerConfig::default()).unwrap()
}

async fn run(planner: &Planner<ScriptedProvider>, body: Value) -> ResultEnvelope {
    planner.plan(&body, CancellationToken::new()).await
}

#[tokio::test]
async fn test_happy_path() {
    let planner = planner(ScriptedProvider::text(EXAMPLE_PLAN_JSON));
    let envelope = run(&planner, request()).await;

    assert!(envelope.is_ok(), "{envelope:?}");
    assert_eq!(envelope.status_code(), 200);
    assert_eq!(envelope.data(), Some(&example_plan().unwrap()));

    let diagnostics = envelope.diagnostics();
    assert_eq!(diagnostics.model.as_deref(), Some(SCRIPTED_MODEL));
    assert!(!diagnostics.repaired);
    assert_eq!(planner.backend().call_count(), 1);

    let wire = serde_json::to_value(&envelope).unwrap();
    assert_eq!(wire["ok"], true);
    assert_eq!(wire["debug"]["repaired"], false);
}

#[tokio::test]
async fn test_successful_plan_upholds_invariants() {
    let planner = planner(ScriptedProvider::text(EXAMPLE_PLAN_JSON));
    let envelope = run(&planner, request()).await;
    let plan = envelope.data().unwrap();

    assert_eq!(plan.backup_plans.len(), 2);
    assert!(!plan.primary_plan.steps.is_empty());
    assert!((0.0..=100.0).contains(&plan.confidence_score));
}

#[tokio::test]
async fn test_request_carries_prompt_contract_and_config() {
    let config = PlannerConfig::default()
        .with_model(Model::custom("claude-test"))
        .with_max_tokens(1234);
    let planner = Planner::new(ScriptedProvider::text(EXAMPLE_PLAN_JSON), config).unwrap();

    run(
        &planner,
        json!({
            "start": "King's Cross Station",
            "destination": "London Bridge",
            "needs": "no escalators",
        }),
    )
    .await;

    let seen = planner.backend().seen();
    let params = &seen[0];

    assert_eq!(params.model, Model::custom("claude-test"));
    assert_eq!(params.max_tokens, 1234);
    assert_eq!(params.messages.len(), 2);
    assert_eq!(params.messages[0].role, GenericRole::System);
    assert!(params.messages[0].content.contains("backup_plans"));
    assert!(params.messages[1].content.contains("no escalators"));

    let schema = params.response_format.as_ref().unwrap();
    assert_eq!(schema["properties"]["backup_plans"]["type"], "array");
}

#[tokio::test]
async fn test_same_request_same_prompt() {
    let planner = planner(ScriptedProvider::new([
        Reply::Text(EXAMPLE_PLAN_JSON.into()),
        Reply::Text(EXAMPLE_PLAN_JSON.into()),
    ]));
    run(&planner, request()).await;
    run(&planner, request()).await;

    let seen = planner.backend().seen();
    assert_eq!(seen[0].messages, seen[1].messages);
}

#[tokio::test]
async fn test_empty_start_is_rejected_before_any_call() {
    let planner = planner(ScriptedProvider::new(Vec::<Reply>::new()));
    let envelope = run(
        &planner,
        json!({"start": "", "destination": "London Bridge"}),
    )
    .await;

    assert_eq!(envelope.kind(), Some(ErrorKind::InvalidRequest));
    assert_eq!(envelope.status_code(), 400);
    assert_eq!(planner.backend().call_count(), 0);

    let details = envelope.error().unwrap().details().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].path, "start");
}

#[tokio::test]
async fn test_one_backup_plan_is_business_rule_violation() {
    let planner = planner(ScriptedProvider::text(plan_with_backups(1)));
    let envelope = run(&planner, request()).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::BusinessRuleViolation));
    assert_eq!(envelope.status_code(), 500);

    let error = envelope.error().unwrap();
    assert!(error.to_string().contains("got 1"));
    assert!(error.raw_preview().is_some());
    assert_eq!(envelope.diagnostics().model.as_deref(), Some(SCRIPTED_MODEL));
}

#[tokio::test]
async fn test_three_backup_plans_is_business_rule_violation() {
    let planner = planner(ScriptedProvider::text(plan_with_backups(3)));
    let envelope = run(&planner, request()).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::BusinessRuleViolation));
    assert!(envelope.error().unwrap().to_string().contains("got 3"));
}

#[tokio::test]
async fn test_zero_backup_plans_is_schema_violation() {
    let planner = planner(ScriptedProvider::text(plan_with_backups(0)));
    let envelope = run(&planner, request()).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::SchemaViolation));
}

#[tokio::test]
async fn test_fenced_json_is_unwrapped() {
    let fenced = format!("```json\n{EXAMPLE_PLAN_JSON}\n```");
    let planner = planner(ScriptedProvider::text(fenced));
    let envelope = run(&planner, request()).await;

    assert!(envelope.is_ok(), "{envelope:?}");
    assert_eq!(envelope.data(), Some(&example_plan().unwrap()));
}

#[tokio::test]
async fn test_prose_answer_is_parse_error_with_bounded_preview() {
    let prose = format!("I'd be happy to help! {}", "blah ".repeat(1_000));
    let planner = planner(ScriptedProvider::text(prose));
    let envelope = run(&planner, request()).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::ParseError));
    let preview = envelope.error().unwrap().raw_preview().unwrap();
    assert!(preview.starts_with("I'd be happy to help!"));
    assert!(preview.chars().count() <= 501);

    let wire = serde_json::to_value(&envelope).unwrap();
    assert_eq!(wire["ok"], false);
    assert_eq!(wire["kind"], "ParseError");
    assert!(wire["debug"]["latency_ms"].is_u64());
}

#[tokio::test]
async fn test_schema_violations_are_itemised() {
    let mut value = example_value();
    value["confidence_score"] = json!(250);
    value["primary_plan"]["steps"][0]["title"] = json!("");

    let planner = planner(ScriptedProvider::text(value.to_string()));
    let envelope = run(&planner, request()).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::SchemaViolation));
    let paths: Vec<String> = envelope
        .error()
        .unwrap()
        .details()
        .unwrap()
        .iter()
        .map(|v| v.path.clone())
        .collect();
    assert_eq!(paths.len(), 2);
    assert!(paths.contains(&"confidence_score".to_owned()));
    assert!(paths.contains(&"primary_plan.steps.0.title".to_owned()));
}

#[tokio::test]
async fn test_upstream_status_is_surfaced() {
    let planner = planner(ScriptedProvider::new([Reply::Upstream {
        status: 529,
        body: "{\"type\":\"overloaded_error\"}".into(),
    }]));
    let envelope = run(&planner, request()).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::UpstreamError));
    let message = envelope.error().unwrap().to_string();
    assert!(message.contains("529"));
    assert!(message.contains("overloaded_error"));
    assert_eq!(envelope.diagnostics().model, None);
}

#[tokio::test]
async fn test_format_mismatch_is_distinct() {
    let planner = planner(ScriptedProvider::new([Reply::Format(
        "unexpected content block type `tool_use`".into(),
    )]));
    let envelope = run(&planner, request()).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::FormatMismatch));
    assert_eq!(envelope.status_code(), 500);
}

#[tokio::test]
async fn test_repair_is_off_by_default() {
    let planner = planner(ScriptedProvider::new([
        Reply::Text(plan_with_backups(1)),
        Reply::Text(EXAMPLE_PLAN_JSON.into()),
    ]));
    let envelope = run(&planner, request()).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::BusinessRuleViolation));
    assert_eq!(planner.backend().call_count(), 1);
}

#[tokio::test]
async fn test_repair_reprompts_once_and_flags_success() {
    let rejected = plan_with_backups(1);
    let provider = ScriptedProvider::new([
        Reply::Text(rejected.clone()),
        Reply::Text(EXAMPLE_PLAN_JSON.into()),
    ]);
    let planner =
        Planner::new(provider, PlannerConfig::default().with_repair(true)).unwrap();

    let envelope = run(&planner, request()).await;

    assert!(envelope.is_ok(), "{envelope:?}");
    assert!(envelope.diagnostics().repaired);
    assert_eq!(planner.backend().call_count(), 2);

    let seen = planner.backend().seen();
    let retry = &seen[1].messages;
    assert_eq!(retry.len(), 4);
    assert_eq!(&retry[..2], &seen[0].messages[..]);
    assert_eq!(retry[2].role, GenericRole::Assistant);
    assert_eq!(retry[2].content, rejected);
    assert_eq!(retry[3].role, GenericRole::User);
    assert!(retry[3].content.contains("expected exactly 2 backup plans, got 1"));
}

#[tokio::test]
async fn test_failed_repair_reports_second_answer() {
    let mut broken = example_value();
    broken["summary"] = json!("");

    let provider = ScriptedProvider::new([
        Reply::Text(broken.to_string()),
        Reply::Text(plan_with_backups(3)),
    ]);
    let planner =
        Planner::new(provider, PlannerConfig::default().with_repair(true)).unwrap();

    let envelope = run(&planner, request()).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::BusinessRuleViolation));
    assert!(!envelope.diagnostics().repaired);
    assert_eq!(planner.backend().call_count(), 2);
    assert!(planner.backend().seen()[1].messages[3].content.contains("summary"));
}

#[tokio::test]
async fn test_parse_errors_are_not_repaired() {
    let provider = ScriptedProvider::new([
        Reply::Text("not json".into()),
        Reply::Text(EXAMPLE_PLAN_JSON.into()),
    ]);
    let planner =
        Planner::new(provider, PlannerConfig::default().with_repair(true)).unwrap();

    let envelope = run(&planner, request()).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::ParseError));
    assert_eq!(planner.backend().call_count(), 1);
}

#[tokio::test]
async fn test_deadline_expires() {
    let deadline = Duration::from_millis(50);
    let planner = Planner::new(
        ScriptedProvider::new([Reply::Hang]),
        PlannerConfig::default().with_deadline(deadline),
    )
    .unwrap();

    let envelope = run(&planner, request()).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::UpstreamTimeout));
    assert_eq!(envelope.status_code(), 504);
    assert!(envelope.diagnostics().latency_ms >= 50);
}

#[tokio::test]
async fn test_cancellation_aborts_the_call() {
    let planner = planner(ScriptedProvider::new([Reply::Hang]));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let envelope = planner.plan(&request(), cancel).await;

    assert_eq!(envelope.kind(), Some(ErrorKind::Cancelled));
    assert_eq!(planner.backend().call_count(), 1);
}

#[cfg(feature = "anthropic")]
mod missing_credential {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use stepfree::anthropic::AnthropicAdapterBuilder;
    use tokio::net::TcpListener;

    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_configuration_error_without_network() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        {
            let connections = Arc::clone(&connections);
            tokio::spawn(async move {
                while listener.accept().await.is_ok() {
                    connections.fetch_add(1, Ordering::SeqCst);
                }
            });
        }

        let backend = AnthropicAdapterBuilder::new()
            .with_base_url(format!("http://{addr}/v1"))
            .build()
            .unwrap();
        let planner = Planner::new(backend, PlannerConfig::default()).unwrap();

        let envelope = planner
            .plan(&request(), CancellationToken::new())
            .await;

        assert_eq!(envelope.kind(), Some(ErrorKind::ConfigurationError));
        assert_eq!(envelope.status_code(), 500);
        assert!(envelope.error().unwrap().to_string().contains("ANTHROPIC_API_KEY"));
        assert_eq!(connections.load(Ordering::SeqCst), 0);
    }
}
