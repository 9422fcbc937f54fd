// crates/policy-generator/src/binding.rs
// ============================================================================
// Module: Binding Grouper
// Description: Groups policies by placement rule and builds PlacementBindings.
// Purpose: Emit one binding per distinct placement rule with stable naming.
// Dependencies: serde_yaml
// ============================================================================

//! ## Overview
//! Policies resolving to the same placement rule share one binding. Groups
//! keep the order in which their placement rule was first seen, so the first
//! group takes the base binding name and later groups take `base2`, `base3`,
//! and so on, identically on every run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_yaml::Value;

use crate::manifest::Document;
use crate::manifest::object;
use crate::placement::PLACEMENT_RULE_API_VERSION;
use crate::placement::PLACEMENT_RULE_KIND;
use crate::policy::POLICY_API_VERSION;
use crate::policy::POLICY_KIND;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// API version of the PlacementBinding kind.
pub const PLACEMENT_BINDING_API_VERSION: &str = "policy.open-cluster-management.io/v1";
/// PlacementBinding kind.
pub const PLACEMENT_BINDING_KIND: &str = "PlacementBinding";

// ============================================================================
// SECTION: Grouping
// ============================================================================

/// Policies bound to one placement rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementGroup {
    /// Placement rule name.
    pub placement: String,
    /// Indices of the bound policies, in declaration order.
    pub policies: Vec<usize>,
}

/// Insertion-ordered grouping of policy indices by placement rule name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementGroups {
    /// Groups in first-seen order.
    groups: Vec<PlacementGroup>,
}

impl PlacementGroups {
    /// Creates an empty grouping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            groups: Vec::new(),
        }
    }

    /// Records that the policy at `index` binds to `placement`.
    pub fn add(&mut self, placement: &str, index: usize) {
        match self.groups.iter_mut().find(|group| group.placement == placement) {
            Some(group) => group.policies.push(index),
            None => self.groups.push(PlacementGroup {
                placement: placement.to_string(),
                policies: vec![index],
            }),
        }
    }

    /// Returns the groups in first-seen order.
    #[must_use]
    pub fn groups(&self) -> &[PlacementGroup] {
        &self.groups
    }

    /// Returns the number of groups.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true when no policy has been grouped.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Returns the binding name for the group at the zero-based `position`.
#[must_use]
pub fn binding_name(base: &str, position: usize) -> String {
    if position == 0 { base.to_string() } else { format!("{base}{}", position + 1) }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds a PlacementBinding tying the named policies to a placement rule.
#[must_use]
pub fn build_placement_binding(
    name: &str,
    namespace: &str,
    placement: &str,
    policy_names: &[&str],
) -> Document {
    let subjects = policy_names
        .iter()
        .map(|policy| {
            Value::Mapping(object([
                ("apiGroup", Value::from(POLICY_API_VERSION)),
                ("kind", Value::from(POLICY_KIND)),
                ("name", Value::from(*policy)),
            ]))
        })
        .collect();

    object([
        ("apiVersion", Value::from(PLACEMENT_BINDING_API_VERSION)),
        ("kind", Value::from(PLACEMENT_BINDING_KIND)),
        (
            "metadata",
            Value::Mapping(object([
                ("name", Value::from(name)),
                ("namespace", Value::from(namespace)),
            ])),
        ),
        (
            "placementRef",
            Value::Mapping(object([
                ("apiGroup", Value::from(PLACEMENT_RULE_API_VERSION)),
                ("kind", Value::from(PLACEMENT_RULE_KIND)),
                ("name", Value::from(placement)),
            ])),
        ),
        ("subjects", Value::Sequence(subjects)),
    ])
}

// ============================================================================
// SECTION: Tests
// ============================================================================
