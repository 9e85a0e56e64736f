//! Fleet orchestration for BuildFleet.
//!
//! This crate turns a fleet description (project specs + defaults + a
//! build-setup strategy) into declared cloud resources and an armed
//! notification dispatcher:
//!
//! - [`resolver`] merges configuration and invokes the strategy, producing
//!   build configurations and effective subscriptions.
//! - [`grouper`] partitions subscriptions by status set, one event rule per
//!   distinct set.
//! - [`dispatcher`] receives build state change events and invokes the
//!   caller's callback with the resolved options.
//! - [`server`] declares everything through a
//!   [`provisioning::ResourceEngine`] and hands back the handles.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//!
//! use build_config::{ProjectDefaults, ProjectSpec, SubscriptionDefaults};
//! use fleet_core::{BuildConfiguration, FleetArgs, FleetServer, SubscriptionArgs};
//! use provisioning::RecordingEngine;
//!
//! # async fn example(
//! #     build_setup: Box<dyn fleet_core::BuildSetup>,
//! #     callback: Arc<dyn fleet_core::SubscriptionCallback>,
//! # ) -> Result<(), fleet_core::FleetError> {
//! let engine = RecordingEngine::new();
//! let fleet = FleetServer::provision(
//!     "automation",
//!     FleetArgs {
//!         build_setup,
//!         subscriptions: Some(SubscriptionArgs {
//!             defaults: SubscriptionDefaults::default(),
//!             callback,
//!         }),
//!         project_defaults: ProjectDefaults::default(),
//!         projects: vec![ProjectSpec {
//!             name: "billing-service".to_string(),
//!             params: BTreeMap::new(),
//!             subscriptions: BTreeMap::new(),
//!         }],
//!     },
//!     &engine,
//! )
//! .await?;
//! assert!(fleet.dispatcher().is_some());
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;
pub mod errors;
pub mod events;
pub mod grouper;
pub mod resolver;
pub mod server;


// Re-export for convenient access
pub use dispatcher::{NotificationDispatcher, SubscriptionCallback};
pub use errors::{BoxError, DispatchError, FleetError, FleetResult};
pub use events::{
    AdditionalInformation, BuildStateChangeDetail, EventRuleEvent, Phase, PhaseKind, PhaseStatus,
    SubscriptionEvent, BUILD_STATE_CHANGE_DETAIL_TYPE, EVENT_SOURCE,
};
pub use grouper::{event_pattern, group_subscriptions, StatusGroup};
pub use resolver::{
    effective_subscriptions, resolve_projects, BuildConfiguration, BuildSetup,
    EffectiveSubscription, ResolvedProject,
};
pub use server::{FleetArgs, FleetServer, SubscriptionArgs};
