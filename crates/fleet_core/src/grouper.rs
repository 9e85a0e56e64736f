//! Status-set grouping of effective subscriptions.
//!
//! Every distinct status set becomes one [`StatusGroup`], and each group
//! maps 1:1 to one declared event rule covering all of its member builds.
//! Grouping on the canonical status set keeps the number of rules minimal:
//! two subscriptions with set-equal but differently-ordered status lists
//! always land in the same group.

use std::collections::BTreeMap;

use build_config::BuildStatus;

use crate::events::{BUILD_STATE_CHANGE_DETAIL_TYPE, EVENT_SOURCE};
use crate::resolver::EffectiveSubscription;

#[cfg(test)]
#[path = "grouper_tests.rs"]
mod tests;

/// The subscriptions sharing one status set.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusGroup {
    /// The canonical status list shared by every member.
    pub status: Vec<BuildStatus>,

    /// Static build names of the members, in subscription order.
    pub build_names: Vec<String>,
}

/// Partitions subscriptions into status groups.
///
/// An explicit two-pass computation: collect members under their canonical
/// status set, then emit one group per distinct set. Group membership
/// depends only on status set content; the `BTreeMap` key makes the output
/// order deterministic regardless of input order.
pub fn group_subscriptions(subscriptions: &[EffectiveSubscription]) -> Vec<StatusGroup> {
    let mut groups: BTreeMap<Vec<BuildStatus>, Vec<String>> = BTreeMap::new();
    for subscription in subscriptions {
        groups
            .entry(subscription.status.clone())
            .or_default()
            .push(subscription.build_name.clone());
    }

    groups
        .into_iter()
        .map(|(status, build_names)| StatusGroup {
            status,
            build_names,
        })
        .collect()
}

/// Renders the event pattern for one group's event rule.
///
/// The rule matches build state changes whose status is in the group's
/// status list and whose project name is one of the group's members.
pub fn event_pattern(group: &StatusGroup) -> serde_json::Value {
    serde_json::json!({
        "source": [EVENT_SOURCE],
        "detail-type": [BUILD_STATE_CHANGE_DETAIL_TYPE],
        "detail": {
            "build-status": group.status,
            "project-name": group.build_names,
        },
    })
}
