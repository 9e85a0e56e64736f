//! IAM policy document types.
//!
//! Minimal serde models for the policy documents the fleet declares: the
//! lambda assume-role policy and the inline policy granting read access to
//! build results. Field names follow the AWS policy grammar, so serializing
//! one of these produces a document the cloud accepts verbatim.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "iam_tests.rs"]
mod tests;

/// The principal a statement applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Service principal, e.g. `lambda.amazonaws.com`.
    #[serde(rename = "Service")]
    pub service: String,
}

/// One statement of a policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyStatement {
    /// `Allow` or `Deny`.
    #[serde(rename = "Effect")]
    pub effect: String,

    /// Actions the statement covers.
    #[serde(rename = "Action")]
    pub action: Vec<String>,

    /// Resource ARN pattern; absent on assume-role statements.
    #[serde(rename = "Resource", skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    /// Principal; present only on assume-role statements.
    #[serde(rename = "Principal", skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
}

/// A complete IAM policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Policy grammar version, always `2012-10-17`.
    #[serde(rename = "Version")]
    pub version: String,

    /// The statements of the document.
    #[serde(rename = "Statement")]
    pub statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// Creates a document with the current policy grammar version.
    pub fn new(statement: Vec<PolicyStatement>) -> Self {
        Self {
            version: "2012-10-17".to_string(),
            statement,
        }
    }
}

/// Builds the assume-role policy that lets a service principal assume a
/// role.
///
/// # Examples
///
/// ```rust
/// use provisioning::iam::assume_role_policy_for_service;
///
/// let policy = assume_role_policy_for_service("lambda.amazonaws.com");
/// assert_eq!(policy.statement[0].action, vec!["sts:AssumeRole"]);
/// ```
pub fn assume_role_policy_for_service(service: &str) -> PolicyDocument {
    PolicyDocument::new(vec![PolicyStatement {
        effect: "Allow".to_string(),
        action: vec!["sts:AssumeRole".to_string()],
        resource: None,
        principal: Some(Principal {
            service: service.to_string(),
        }),
    }])
}
