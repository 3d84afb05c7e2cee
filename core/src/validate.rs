//! Switch spec validation.
//!
//! [`parse`](crate::parse) never validates its spec: an inconsistent spec is
//! a caller error that still produces a well-defined outcome. This module
//! lets callers catch such mistakes up front, e.g. in a test or a CI step.
//!
//! # Examples
//!
//! ```
//! use commando_core::*;
//!
//! let spec = SwitchSpec::new("tool")
//!     .add_switch("path", SwitchType::String, "Input", SwitchOptions::new().alias("p"));
//! assert!(validate_spec(&spec).is_empty());
//!
//! // Required name that was never registered
//! let bad = spec.mark_required("output");
//! assert_eq!(
//!     validate_spec(&bad),
//!     vec![SpecIssue::RequiredNotRegistered("output".into())]
//! );
//! ```

use thiserror::Error;

use crate::{SwitchSpec, SwitchType};

/// Structural problems found in a [`SwitchSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecIssue {
    /// Application name is empty or whitespace-only.
    #[error("application name cannot be empty")]
    EmptyAppName,
    /// A switch or alias name is empty.
    #[error("switch name cannot be empty")]
    EmptySwitchName,
    /// A switch or alias name starts with a dash or contains whitespace.
    #[error("invalid switch name: {0}")]
    InvalidSwitchName(String),
    /// A required name has no registered type.
    #[error("required switch is not registered: {0}")]
    RequiredNotRegistered(String),
    /// An alias points at a name with no registered type.
    #[error("alias -{alias} targets unregistered switch: {target}")]
    AliasTargetMissing { alias: String, target: String },
    /// An alias has the same spelling as a switch name, which takes precedence.
    #[error("alias shadows a switch name: {0}")]
    AliasShadowsSwitch(String),
    /// A default does not match the switch's declared type.
    #[error("default for --{name} is not a valid {expected}")]
    DefaultTypeMismatch { name: String, expected: SwitchType },
    /// A default was recorded for a name with no registered type.
    #[error("default recorded for unregistered switch: {0}")]
    OrphanDefault(String),
    /// A description was recorded for a name with no registered type.
    #[error("description recorded for unregistered switch: {0}")]
    OrphanDescription(String),
    /// A required switch also has a default, which can never apply.
    #[error("required switch has an unreachable default: {0}")]
    RequiredWithDefault(String),
}

/// Validates `spec`, returning every issue found in table order.
pub fn validate_spec(spec: &SwitchSpec) -> Vec<SpecIssue> {
    let mut issues = Vec::new();

    if spec.name().trim().is_empty() {
        issues.push(SpecIssue::EmptyAppName);
    }

    for name in spec.types().keys() {
        if let Some(issue) = check_name(name) {
            issues.push(issue);
        }
    }

    for (alias, target) in spec.aliases() {
        if let Some(issue) = check_name(alias) {
            issues.push(issue);
            continue;
        }
        if !spec.types().contains_key(target) {
            issues.push(SpecIssue::AliasTargetMissing {
                alias: alias.clone(),
                target: target.clone(),
            });
        } else if alias != target && spec.types().contains_key(alias) {
            issues.push(SpecIssue::AliasShadowsSwitch(alias.clone()));
        }
    }

    for (name, default) in spec.defaults() {
        match spec.types().get(name) {
            None => issues.push(SpecIssue::OrphanDefault(name.clone())),
            Some(expected) if !expected.accepts(default) => {
                issues.push(SpecIssue::DefaultTypeMismatch {
                    name: name.clone(),
                    expected: *expected,
                });
            }
            Some(_) => {}
        }
    }

    for name in spec.descriptions().keys() {
        if !spec.types().contains_key(name) {
            issues.push(SpecIssue::OrphanDescription(name.clone()));
        }
    }

    for name in spec.required() {
        if !spec.types().contains_key(name) {
            issues.push(SpecIssue::RequiredNotRegistered(name.clone()));
        } else if spec.defaults().contains_key(name) {
            issues.push(SpecIssue::RequiredWithDefault(name.clone()));
        }
    }

    issues
}

fn check_name(name: &str) -> Option<SpecIssue> {
    if name.is_empty() {
        return Some(SpecIssue::EmptySwitchName);
    }
    if name.starts_with('-') || name.contains(char::is_whitespace) || name.contains('=') {
        return Some(SpecIssue::InvalidSwitchName(name.to_string()));
    }
    None
}
