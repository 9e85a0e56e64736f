//! Tests for project spec merging.

use super::*;
use crate::subscriptions::SubscriptionOverride;
use crate::BuildStatus;

// ============================================================================
// Test Helpers
// ============================================================================

fn spec_with_params(name: &str, params: &[(&str, serde_json::Value)]) -> ProjectSpec {
    ProjectSpec {
        name: name.to_string(),
        params: params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
        subscriptions: BTreeMap::new(),
    }
}

fn defaults_with_params(params: &[(&str, serde_json::Value)]) -> ProjectDefaults {
    ProjectDefaults {
        params: params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
        subscriptions: BTreeMap::new(),
    }
}

// ============================================================================
// Param Merge Tests
// ============================================================================

#[test]
fn test_project_param_wins_over_default() {
    let defaults = defaults_with_params(&[("branch", serde_json::json!("main"))]);
    let project = spec_with_params("api", &[("branch", serde_json::json!("develop"))]);

    let merged = merge_project_spec(&defaults, &project);
    assert_eq!(merged.params["branch"], serde_json::json!("develop"));
}

#[test]
fn test_default_param_kept_when_project_omits_it() {
    let defaults = defaults_with_params(&[
        ("branch", serde_json::json!("main")),
        ("timeout", serde_json::json!(30)),
    ]);
    let project = spec_with_params("api", &[("branch", serde_json::json!("develop"))]);

    let merged = merge_project_spec(&defaults, &project);
    assert_eq!(merged.params["timeout"], serde_json::json!(30));
}

#[test]
fn test_falsy_project_param_still_wins() {
    // A key the project sets always wins, even when its value is null,
    // false, or empty.
    let defaults = defaults_with_params(&[
        ("privileged", serde_json::json!(true)),
        ("image", serde_json::json!("aws/codebuild/standard:7.0")),
    ]);
    let project = spec_with_params(
        "api",
        &[
            ("privileged", serde_json::json!(false)),
            ("image", serde_json::json!(null)),
        ],
    );

    let merged = merge_project_spec(&defaults, &project);
    assert_eq!(merged.params["privileged"], serde_json::json!(false));
    assert_eq!(merged.params["image"], serde_json::json!(null));
}

#[test]
fn test_name_comes_from_project_only() {
    let merged = merge_project_spec(&ProjectDefaults::default(), &spec_with_params("api", &[]));
    assert_eq!(merged.name, "api");
}

#[test]
fn test_inputs_are_not_mutated() {
    let defaults = defaults_with_params(&[("branch", serde_json::json!("main"))]);
    let project = spec_with_params("api", &[("branch", serde_json::json!("develop"))]);

    let _ = merge_project_spec(&defaults, &project);
    assert_eq!(defaults.params["branch"], serde_json::json!("main"));
    assert_eq!(project.params["branch"], serde_json::json!("develop"));
}

// ============================================================================
// Subscription Merge Tests
// ============================================================================

#[test]
fn test_project_subscription_entry_replaces_default_entry() {
    let defaults = ProjectDefaults {
        params: BTreeMap::new(),
        subscriptions: BTreeMap::from([(
            "ci".to_string(),
            SubscriptionOverride {
                status: Some(vec![BuildStatus::Failed]),
                config: Some(serde_json::json!({"channel": "#default"})),
            },
        )]),
    };
    let project = ProjectSpec {
        name: "api".to_string(),
        params: BTreeMap::new(),
        subscriptions: BTreeMap::from([(
            "ci".to_string(),
            SubscriptionOverride {
                status: Some(vec![BuildStatus::Stopped]),
                config: None,
            },
        )]),
    };

    let merged = merge_project_spec(&defaults, &project);
    let entry = &merged.subscriptions["ci"];
    assert_eq!(entry.status, Some(vec![BuildStatus::Stopped]));
    assert_eq!(
        entry.config, None,
        "the merge is shallow: the project's entry replaces the default entry wholesale"
    );
}

#[test]
fn test_default_subscription_entries_for_other_build_types_kept() {
    let defaults = ProjectDefaults {
        params: BTreeMap::new(),
        subscriptions: BTreeMap::from([(
            "release".to_string(),
            SubscriptionOverride {
                status: Some(vec![BuildStatus::Succeeded]),
                config: None,
            },
        )]),
    };
    let project = ProjectSpec {
        name: "api".to_string(),
        params: BTreeMap::new(),
        subscriptions: BTreeMap::from([(
            "ci".to_string(),
            SubscriptionOverride {
                status: Some(vec![BuildStatus::Failed]),
                config: None,
            },
        )]),
    };

    let merged = merge_project_spec(&defaults, &project);
    assert_eq!(merged.subscriptions.len(), 2);
    assert_eq!(
        merged.subscriptions["release"].status,
        Some(vec![BuildStatus::Succeeded])
    );
}
