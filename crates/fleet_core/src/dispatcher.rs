//! The shared notification handler.
//!
//! One dispatcher serves every event rule of a fleet. It is armed once at
//! setup completion with the table of effective subscriptions and stays in
//! that state for the lifetime of the declared infrastructure; the table is
//! never mutated afterwards, so concurrent deliveries share it read-only
//! without locking.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use build_config::{resolve_subscription_options, SubscriptionDefaults, SubscriptionOptions};

use crate::errors::{BoxError, DispatchError};
use crate::events::{BuildStateChangeDetail, EventRuleEvent, SubscriptionEvent};
use crate::resolver::EffectiveSubscription;

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;

/// The caller-supplied notification callback.
///
/// Invoked exactly once per delivered event; the dispatcher awaits
/// completion before considering the invocation finished. Failures
/// propagate to the dispatcher's caller unchanged; there is no retry,
/// batching, or dead-lettering layer here.
#[async_trait]
pub trait SubscriptionCallback: Send + Sync {
    async fn on_build_state_change(
        &self,
        event: &SubscriptionEvent,
        options: &SubscriptionOptions,
    ) -> Result<(), BoxError>;
}

/// Dispatches build state change events to the subscription callback.
pub struct NotificationDispatcher {
    table: HashMap<String, EffectiveSubscription>,
    defaults: SubscriptionDefaults,
    callback: Arc<dyn SubscriptionCallback>,
}

impl NotificationDispatcher {
    /// Arms a dispatcher with the fleet's effective subscriptions.
    pub fn new(
        subscriptions: Vec<EffectiveSubscription>,
        defaults: SubscriptionDefaults,
        callback: Arc<dyn SubscriptionCallback>,
    ) -> Self {
        let table: HashMap<String, EffectiveSubscription> = subscriptions
            .into_iter()
            .map(|s| (s.build_name.clone(), s))
            .collect();
        info!(subscriptions = table.len(), "notification dispatcher armed");
        Self {
            table,
            defaults,
            callback,
        }
    }

    /// Number of builds the dispatcher knows about.
    pub fn subscription_count(&self) -> usize {
        self.table.len()
    }

    /// Handles one delivered event.
    ///
    /// Parses the detail, looks the originating build up by the inbound
    /// `project-name`, resolves the effective options, and invokes the
    /// callback once, awaiting its completion.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::InvalidDetail`] when the payload is not a build
    ///   state change.
    /// - [`DispatchError::UnknownProject`] when no subscription matches the
    ///   inbound project name; the event is never silently dropped.
    /// - [`DispatchError::CallbackFailed`] wrapping whatever the callback
    ///   returned.
    pub async fn handle_event(&self, event: EventRuleEvent) -> Result<(), DispatchError> {
        let detail: BuildStateChangeDetail = serde_json::from_value(event.detail.clone())
            .map_err(|e| DispatchError::InvalidDetail {
                reason: e.to_string(),
            })?;

        debug!(
            project = %detail.project_name,
            status = %detail.build_status,
            "received build state change"
        );

        let subscription = self.table.get(&detail.project_name).ok_or_else(|| {
            warn!(project = %detail.project_name, "no subscription for inbound project");
            DispatchError::UnknownProject {
                project: detail.project_name.clone(),
            }
        })?;

        let options = resolve_subscription_options(
            &self.defaults,
            &subscription.build_type,
            subscription.project_override.as_ref(),
        );

        let subscription_event = SubscriptionEvent { event, detail };
        self.callback
            .on_build_state_change(&subscription_event, &options)
            .await
            .map_err(|source| DispatchError::CallbackFailed { source })
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("subscriptions", &self.table.len())
            .finish_non_exhaustive()
    }
}
