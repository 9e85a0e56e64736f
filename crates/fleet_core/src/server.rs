//! Fleet provisioning: declaring the whole resource surface.
//!
//! [`FleetServer::provision`] is the one entry point: it resolves the fleet
//! configuration, declares every build project and webhook, and, when
//! subscriptions are requested, the IAM plumbing, the shared notification
//! function, and one event rule per distinct status set, all through the
//! [`ResourceEngine`] the caller supplies.

use std::sync::Arc;

use tracing::info;

use build_config::{ProjectDefaults, ProjectSpec, SubscriptionDefaults};
use provisioning::{
    assume_role_policy_for_service, EventRuleProperties, EventTargetProperties,
    FunctionProperties, PolicyDocument, PolicyStatement, ResourceEngine, ResourceHandle,
    ResourceKind, ResourceProperties, RolePolicyAttachmentProperties, RolePolicyProperties,
    RoleProperties, WebhookProperties,
};

use crate::dispatcher::{NotificationDispatcher, SubscriptionCallback};
use crate::errors::FleetResult;
use crate::grouper::{event_pattern, group_subscriptions};
use crate::resolver::{effective_subscriptions, resolve_projects, BuildSetup};

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;

/// Managed policy attached to the subscription role.
const SUBSCRIPTION_ROLE_POLICY_ARN: &str = "arn:aws:iam::aws:policy/AWSLambdaFullAccess";

/// Subscription wiring for a fleet: the defaults and the callback events are
/// dispatched to.
pub struct SubscriptionArgs {
    pub defaults: SubscriptionDefaults,
    pub callback: Arc<dyn SubscriptionCallback>,
}

/// Everything needed to provision a fleet.
pub struct FleetArgs {
    /// Strategy producing the build configurations of each project.
    pub build_setup: Box<dyn BuildSetup>,

    /// Notification wiring; `None` declares builds and webhooks only.
    pub subscriptions: Option<SubscriptionArgs>,

    /// Defaults merged underneath every project spec.
    pub project_defaults: ProjectDefaults,

    /// The projects of the fleet.
    pub projects: Vec<ProjectSpec>,
}

/// A provisioned fleet: handles to every declared resource plus the armed
/// dispatcher.
///
/// The subscription-related fields are `None` when the fleet was provisioned
/// without subscriptions. Teardown is the provisioning engine's
/// responsibility; dropping this value releases nothing in the cloud.
#[derive(Debug)]
pub struct FleetServer {
    /// The component resource everything else is parented under.
    pub component: ResourceHandle,

    /// One handle per declared build project.
    pub projects: Vec<ResourceHandle>,

    /// One handle per declared webhook.
    pub webhooks: Vec<ResourceHandle>,

    pub subscription_role: Option<ResourceHandle>,
    pub subscription_role_policy_attachment: Option<ResourceHandle>,
    pub subscription_role_policy: Option<ResourceHandle>,

    /// The shared notification handler function.
    pub notification_function: Option<ResourceHandle>,

    /// One event rule per distinct status set.
    pub event_rules: Vec<ResourceHandle>,

    /// The rule-to-function connections, one per rule.
    pub event_targets: Vec<ResourceHandle>,

    dispatcher: Option<NotificationDispatcher>,
}

impl FleetServer {
    /// Provisions a fleet against the given engine.
    ///
    /// Resolution happens first and fails fast on configuration errors; no
    /// resource is declared until the whole fleet resolves. Declaration
    /// order follows dependency order (component, builds, webhooks, IAM,
    /// function, rules, targets); any batching or parallelism beyond that is
    /// the engine's concern.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FleetError::Config`] on configuration errors and
    /// [`crate::FleetError::Engine`] when the engine rejects a declaration.
    pub async fn provision(
        name: &str,
        args: FleetArgs,
        engine: &dyn ResourceEngine,
    ) -> FleetResult<FleetServer> {
        let resolved = resolve_projects(&args.projects, &args.project_defaults, args.build_setup.as_ref())?;

        let component = engine
            .declare(ResourceKind::Component, name, ResourceProperties::Component, None)
            .await?;

        let mut projects = Vec::new();
        let mut webhooks = Vec::new();
        for project in &resolved {
            for configuration in project.builds.values() {
                let build_name = configuration.build.name.clone();
                let handle = engine
                    .declare(
                        ResourceKind::BuildProject,
                        &build_name,
                        ResourceProperties::BuildProject(configuration.build.clone()),
                        Some(&component),
                    )
                    .await?;
                projects.push(handle);

                if let Some(filter_groups) = &configuration.webhook_filter_groups {
                    let webhook = engine
                        .declare(
                            ResourceKind::Webhook,
                            &format!("{}-webhook", build_name),
                            ResourceProperties::Webhook(WebhookProperties {
                                project_name: build_name,
                                filter_groups: filter_groups.clone(),
                            }),
                            Some(&component),
                        )
                        .await?;
                    webhooks.push(webhook);
                }
            }
        }
        info!(
            fleet = name,
            projects = projects.len(),
            webhooks = webhooks.len(),
            "declared build projects"
        );

        let mut server = FleetServer {
            component,
            projects,
            webhooks,
            subscription_role: None,
            subscription_role_policy_attachment: None,
            subscription_role_policy: None,
            notification_function: None,
            event_rules: Vec::new(),
            event_targets: Vec::new(),
            dispatcher: None,
        };

        if let Some(subscription_args) = args.subscriptions {
            let subscriptions = effective_subscriptions(&resolved, &subscription_args.defaults);
            let groups = group_subscriptions(&subscriptions);

            let role = engine
                .declare(
                    ResourceKind::Role,
                    &format!("{}-subscription-role", name),
                    ResourceProperties::Role(RoleProperties {
                        assume_role_policy: assume_role_policy_for_service("lambda.amazonaws.com"),
                    }),
                    Some(&server.component),
                )
                .await?;

            let attachment = engine
                .declare(
                    ResourceKind::RolePolicyAttachment,
                    &format!("{}-subscription-role-policy-attachment", name),
                    ResourceProperties::RolePolicyAttachment(RolePolicyAttachmentProperties {
                        role: role.id.clone(),
                        policy_arn: SUBSCRIPTION_ROLE_POLICY_ARN.to_string(),
                    }),
                    Some(&server.component),
                )
                .await?;

            let policy = engine
                .declare(
                    ResourceKind::RolePolicy,
                    &format!("{}-subscription-role-policy", name),
                    ResourceProperties::RolePolicy(RolePolicyProperties {
                        role: role.id.clone(),
                        policy: build_results_policy(),
                    }),
                    Some(&server.component),
                )
                .await?;

            let function = engine
                .declare(
                    ResourceKind::Function,
                    &format!("{}-subscription-function", name),
                    ResourceProperties::Function(FunctionProperties {
                        role: role.id.clone(),
                        description: Some(format!(
                            "Build state change notification handler for fleet '{}'",
                            name
                        )),
                    }),
                    Some(&server.component),
                )
                .await?;

            for (index, group) in groups.iter().enumerate() {
                let rule = engine
                    .declare(
                        ResourceKind::EventRule,
                        &format!("{}-event-rule-{}", name, index),
                        ResourceProperties::EventRule(EventRuleProperties {
                            event_pattern: event_pattern(group),
                            description: None,
                        }),
                        Some(&server.component),
                    )
                    .await?;
                let target = engine
                    .declare(
                        ResourceKind::EventTarget,
                        &format!("{}-event-rule-target-{}", name, index),
                        ResourceProperties::EventTarget(EventTargetProperties {
                            rule: rule.id.clone(),
                            function: function.id.clone(),
                        }),
                        Some(&server.component),
                    )
                    .await?;
                server.event_rules.push(rule);
                server.event_targets.push(target);
            }
            info!(
                fleet = name,
                groups = server.event_rules.len(),
                subscriptions = subscriptions.len(),
                "declared event subscriptions"
            );

            server.subscription_role = Some(role);
            server.subscription_role_policy_attachment = Some(attachment);
            server.subscription_role_policy = Some(policy);
            server.notification_function = Some(function);
            server.dispatcher = Some(NotificationDispatcher::new(
                subscriptions,
                subscription_args.defaults,
                subscription_args.callback,
            ));
        }

        Ok(server)
    }

    /// The armed dispatcher, present when subscriptions were requested.
    pub fn dispatcher(&self) -> Option<&NotificationDispatcher> {
        self.dispatcher.as_ref()
    }
}

/// The inline policy granting the notification handler read access to build
/// results.
fn build_results_policy() -> PolicyDocument {
    PolicyDocument::new(vec![PolicyStatement {
        effect: "Allow".to_string(),
        action: vec![
            "codebuild:ListBuildsForProject".to_string(),
            "codebuild:BatchGetBuilds".to_string(),
        ],
        resource: Some("*".to_string()),
        principal: None,
    }])
}
