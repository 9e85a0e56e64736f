//! Tests for fleet provisioning.

use super::*;
use std::collections::BTreeMap;

use async_trait::async_trait;
use build_config::{BuildStatus, BuildTypeSubscriptionDefaults, SubscriptionOptions};
use provisioning::{
    BuildProjectProperties, ComputeType, ProjectArtifacts, ProjectEnvironment, ProjectSource,
    RecordingEngine, WebhookFilter, WebhookFilterGroup, WebhookFilterType,
};

use crate::errors::{BoxError, FleetError};
use crate::events::SubscriptionEvent;
use crate::resolver::BuildConfiguration;

// ============================================================================
// Test Helpers
// ============================================================================

struct NoopCallback;

#[async_trait]
impl SubscriptionCallback for NoopCallback {
    async fn on_build_state_change(
        &self,
        _event: &SubscriptionEvent,
        _options: &SubscriptionOptions,
    ) -> Result<(), BoxError> {
        Ok(())
    }
}

fn build_properties(name: &str) -> BuildProjectProperties {
    BuildProjectProperties {
        name: name.to_string(),
        description: None,
        service_role: None,
        source: ProjectSource {
            source_type: "GITHUB".to_string(),
            location: None,
            buildspec: None,
        },
        environment: ProjectEnvironment {
            compute_type: ComputeType::BuildGeneral1Small,
            image: "aws/codebuild/standard:7.0".to_string(),
            environment_type: "LINUX_CONTAINER".to_string(),
            privileged_mode: false,
            environment_variables: vec![],
        },
        artifacts: ProjectArtifacts {
            artifacts_type: "NO_ARTIFACTS".to_string(),
            location: None,
        },
        build_timeout_minutes: None,
        tags: BTreeMap::new(),
    }
}

fn push_filter_group() -> Vec<WebhookFilterGroup> {
    vec![WebhookFilterGroup {
        filters: vec![WebhookFilter {
            filter_type: WebhookFilterType::Event,
            pattern: "PUSH".to_string(),
            exclude_matched_pattern: None,
        }],
    }]
}

/// Strategy producing a `ci` build with a push webhook per project.
fn ci_setup(spec: &ProjectSpec) -> BTreeMap<String, BuildConfiguration> {
    BTreeMap::from([(
        "ci".to_string(),
        BuildConfiguration {
            build: build_properties(&format!("{}-ci", spec.name)),
            webhook_filter_groups: Some(push_filter_group()),
        },
    )])
}

fn project(name: &str) -> ProjectSpec {
    ProjectSpec {
        name: name.to_string(),
        params: BTreeMap::new(),
        subscriptions: BTreeMap::new(),
    }
}

fn ci_subscription_defaults(status: Vec<BuildStatus>) -> SubscriptionDefaults {
    SubscriptionDefaults {
        config: serde_json::Value::Null,
        build_types: BTreeMap::from([(
            "ci".to_string(),
            BuildTypeSubscriptionDefaults {
                status,
                config: None,
            },
        )]),
    }
}

fn fleet_args(projects: Vec<ProjectSpec>, subscriptions: Option<SubscriptionArgs>) -> FleetArgs {
    FleetArgs {
        build_setup: Box::new(ci_setup),
        subscriptions,
        project_defaults: ProjectDefaults::default(),
        projects,
    }
}

// ============================================================================
// Provisioning Tests (no subscriptions)
// ============================================================================

#[tokio::test]
async fn test_declares_projects_and_webhooks() {
    let engine = RecordingEngine::new();
    let fleet = FleetServer::provision(
        "automation",
        fleet_args(vec![project("api"), project("billing")], None),
        &engine,
    )
    .await
    .unwrap();

    assert_eq!(fleet.projects.len(), 2);
    assert_eq!(fleet.webhooks.len(), 2);
    assert!(fleet.dispatcher().is_none());
    assert!(fleet.event_rules.is_empty());

    assert!(engine.find("api-ci").is_some());
    assert!(engine.find("api-ci-webhook").is_some());
    assert!(engine.of_kind(ResourceKind::Role).is_empty());
}

#[tokio::test]
async fn test_everything_parented_under_component() {
    let engine = RecordingEngine::new();
    let fleet = FleetServer::provision("automation", fleet_args(vec![project("api")], None), &engine)
        .await
        .unwrap();

    for declaration in engine.declarations() {
        if declaration.handle.kind == ResourceKind::Component {
            continue;
        }
        assert_eq!(
            declaration.parent.as_deref(),
            Some(fleet.component.id.as_str()),
            "{} must be parented under the fleet component",
            declaration.handle.name
        );
    }
}

#[tokio::test]
async fn test_configuration_errors_declare_nothing() {
    let engine = RecordingEngine::new();
    let mut spec = project("api");
    spec.subscriptions.insert(
        "release".to_string(),
        build_config::SubscriptionOverride {
            status: Some(vec![BuildStatus::Failed]),
            config: None,
        },
    );

    let result =
        FleetServer::provision("automation", fleet_args(vec![spec], None), &engine).await;

    assert!(matches!(result, Err(FleetError::Config(_))));
    assert!(
        engine.declarations().is_empty(),
        "resolution fails before any resource is declared"
    );
}

// ============================================================================
// Provisioning Tests (with subscriptions)
// ============================================================================

#[tokio::test]
async fn test_declares_subscription_plumbing() {
    let engine = RecordingEngine::new();
    let fleet = FleetServer::provision(
        "automation",
        fleet_args(
            vec![project("api")],
            Some(SubscriptionArgs {
                defaults: ci_subscription_defaults(vec![BuildStatus::Failed]),
                callback: Arc::new(NoopCallback),
            }),
        ),
        &engine,
    )
    .await
    .unwrap();

    assert!(fleet.subscription_role.is_some());
    assert!(fleet.subscription_role_policy.is_some());
    assert!(fleet.subscription_role_policy_attachment.is_some());
    assert!(fleet.notification_function.is_some());
    assert_eq!(fleet.event_rules.len(), 1);
    assert_eq!(fleet.event_targets.len(), 1);
    assert_eq!(fleet.dispatcher().map(|d| d.subscription_count()), Some(1));

    assert!(engine.find("automation-subscription-role").is_some());
    assert!(engine.find("automation-subscription-function").is_some());
    assert!(engine.find("automation-event-rule-0").is_some());
}

#[tokio::test]
async fn test_one_rule_per_distinct_status_set() {
    let engine = RecordingEngine::new();
    let mut billing = project("billing");
    billing.subscriptions.insert(
        "ci".to_string(),
        build_config::SubscriptionOverride {
            status: Some(vec![BuildStatus::Failed, BuildStatus::Stopped]),
            config: None,
        },
    );

    let fleet = FleetServer::provision(
        "automation",
        fleet_args(
            vec![project("api"), billing, project("gateway")],
            Some(SubscriptionArgs {
                defaults: ci_subscription_defaults(vec![BuildStatus::Failed]),
                callback: Arc::new(NoopCallback),
            }),
        ),
        &engine,
    )
    .await
    .unwrap();

    // api and gateway share {FAILED}; billing gets {FAILED, STOPPED}.
    assert_eq!(fleet.event_rules.len(), 2);

    let rules = engine.of_kind(ResourceKind::EventRule);
    let patterns: Vec<_> = rules
        .iter()
        .map(|r| match &r.properties {
            ResourceProperties::EventRule(properties) => properties.event_pattern.clone(),
            other => panic!("expected event rule properties, got {:?}", other),
        })
        .collect();

    assert_eq!(
        patterns[0]["detail"]["project-name"],
        serde_json::json!(["api-ci", "gateway-ci"])
    );
    assert_eq!(
        patterns[0]["detail"]["build-status"],
        serde_json::json!(["FAILED"])
    );
    assert_eq!(
        patterns[1]["detail"]["project-name"],
        serde_json::json!(["billing-ci"])
    );
    assert_eq!(
        patterns[1]["detail"]["build-status"],
        serde_json::json!(["FAILED", "STOPPED"])
    );
}

#[tokio::test]
async fn test_empty_status_sets_declare_no_rules() {
    let engine = RecordingEngine::new();
    let fleet = FleetServer::provision(
        "automation",
        fleet_args(
            vec![project("api")],
            Some(SubscriptionArgs {
                defaults: ci_subscription_defaults(vec![]),
                callback: Arc::new(NoopCallback),
            }),
        ),
        &engine,
    )
    .await
    .unwrap();

    assert!(fleet.event_rules.is_empty());
    assert_eq!(
        fleet.dispatcher().map(|d| d.subscription_count()),
        Some(0),
        "nothing to dispatch when every status set is empty"
    );
    // The IAM plumbing and function are still declared; only rules depend
    // on the groups.
    assert!(fleet.notification_function.is_some());
}

#[tokio::test]
async fn test_role_policy_grants_build_result_access() {
    let engine = RecordingEngine::new();
    FleetServer::provision(
        "automation",
        fleet_args(
            vec![project("api")],
            Some(SubscriptionArgs {
                defaults: ci_subscription_defaults(vec![BuildStatus::Failed]),
                callback: Arc::new(NoopCallback),
            }),
        ),
        &engine,
    )
    .await
    .unwrap();

    let policies = engine.of_kind(ResourceKind::RolePolicy);
    assert_eq!(policies.len(), 1);
    match &policies[0].properties {
        ResourceProperties::RolePolicy(properties) => {
            assert_eq!(
                properties.policy.statement[0].action,
                vec!["codebuild:ListBuildsForProject", "codebuild:BatchGetBuilds"]
            );
        }
        other => panic!("expected role policy properties, got {:?}", other),
    }
}
