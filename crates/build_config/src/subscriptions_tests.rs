//! Tests for subscription option resolution.

use super::*;
use std::collections::BTreeMap;

// ============================================================================
// Test Helpers
// ============================================================================

/// Subscription defaults with a global config and one `ci` build type.
fn create_test_defaults() -> SubscriptionDefaults {
    SubscriptionDefaults {
        config: serde_json::json!({"channel": "#builds"}),
        build_types: BTreeMap::from([(
            "ci".to_string(),
            BuildTypeSubscriptionDefaults {
                status: vec![BuildStatus::Failed],
                config: None,
            },
        )]),
    }
}

// ============================================================================
// Status Precedence Tests
// ============================================================================

#[test]
fn test_status_falls_back_to_build_type_default() {
    let options = resolve_subscription_options(&create_test_defaults(), "ci", None);
    assert_eq!(options.status, vec![BuildStatus::Failed]);
}

#[test]
fn test_override_status_wins() {
    let overrides = SubscriptionOverride {
        status: Some(vec![BuildStatus::Failed, BuildStatus::Stopped]),
        config: None,
    };
    let options = resolve_subscription_options(&create_test_defaults(), "ci", Some(&overrides));
    assert_eq!(options.status, vec![BuildStatus::Failed, BuildStatus::Stopped]);
}

#[test]
fn test_status_is_canonicalized() {
    let overrides = SubscriptionOverride {
        status: Some(vec![
            BuildStatus::Stopped,
            BuildStatus::Failed,
            BuildStatus::Stopped,
        ]),
        config: None,
    };
    let options = resolve_subscription_options(&create_test_defaults(), "ci", Some(&overrides));
    assert_eq!(
        options.status,
        vec![BuildStatus::Failed, BuildStatus::Stopped],
        "resolved status lists must be sorted and deduplicated"
    );
}

#[test]
fn test_unknown_build_type_resolves_to_empty_status() {
    let options = resolve_subscription_options(&create_test_defaults(), "nightly", None);
    assert!(
        options.status.is_empty(),
        "a build type with no defaults and no override has nothing to notify on"
    );
}

#[test]
fn test_empty_override_status_wins_over_default() {
    // An explicitly empty override opts the project out even when the build
    // type defaults to a non-empty set.
    let overrides = SubscriptionOverride {
        status: Some(vec![]),
        config: None,
    };
    let options = resolve_subscription_options(&create_test_defaults(), "ci", Some(&overrides));
    assert!(options.status.is_empty());
}

// ============================================================================
// Config Precedence Tests
// ============================================================================

#[test]
fn test_config_falls_back_to_global() {
    let options = resolve_subscription_options(&create_test_defaults(), "ci", None);
    assert_eq!(options.config, serde_json::json!({"channel": "#builds"}));
}

#[test]
fn test_build_type_config_wins_over_global() {
    let mut defaults = create_test_defaults();
    defaults
        .build_types
        .get_mut("ci")
        .unwrap()
        .config = Some(serde_json::json!({"channel": "#ci"}));

    let options = resolve_subscription_options(&defaults, "ci", None);
    assert_eq!(options.config, serde_json::json!({"channel": "#ci"}));
}

#[test]
fn test_override_config_wins_over_everything() {
    let mut defaults = create_test_defaults();
    defaults
        .build_types
        .get_mut("ci")
        .unwrap()
        .config = Some(serde_json::json!({"channel": "#ci"}));
    let overrides = SubscriptionOverride {
        status: None,
        config: Some(serde_json::json!({"channel": "#billing"})),
    };

    let options = resolve_subscription_options(&defaults, "ci", Some(&overrides));
    assert_eq!(options.config, serde_json::json!({"channel": "#billing"}));
}

#[test]
fn test_fields_override_independently() {
    // An override that sets only `status` keeps the default config, and an
    // override that sets only `config` keeps the default status.
    let defaults = create_test_defaults();

    let status_only = SubscriptionOverride {
        status: Some(vec![BuildStatus::TimedOut]),
        config: None,
    };
    let options = resolve_subscription_options(&defaults, "ci", Some(&status_only));
    assert_eq!(options.status, vec![BuildStatus::TimedOut]);
    assert_eq!(options.config, serde_json::json!({"channel": "#builds"}));

    let config_only = SubscriptionOverride {
        status: None,
        config: Some(serde_json::json!({"channel": "#oncall"})),
    };
    let options = resolve_subscription_options(&defaults, "ci", Some(&config_only));
    assert_eq!(options.status, vec![BuildStatus::Failed]);
    assert_eq!(options.config, serde_json::json!({"channel": "#oncall"}));
}
