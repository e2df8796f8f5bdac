//! Read-only traversal of pattern trees.
//!
//! Evaluators and serializers implement [`Visitor`] and override the hooks
//! they care about. Every hook defaults to descending into its children via
//! the matching `walk_*` function, so an override that does not call the
//! walker prunes that subtree.
//!
//! # Example
//!
//! ```rust
//! use stix_pattern::visit::Visitor;
//! use stix_pattern::{
//!     ComparatorKind, ComparisonExpression, ObservationExpression, Pattern,
//! };
//!
//! struct Paths(Vec<String>);
//!
//! impl Visitor for Paths {
//!     fn visit_comparison(&mut self, cmp: &ComparisonExpression) {
//!         self.0.push(cmp.object_path.clone());
//!     }
//! }
//!
//! let pattern = Pattern::new(
//!     ObservationExpression::new(ComparisonExpression::new(
//!         "file:name",
//!         "a.exe",
//!         ComparatorKind::Equal,
//!     )),
//!     None,
//! )
//! .unwrap();
//!
//! let mut paths = Paths(Vec::new());
//! paths.visit_pattern(&pattern);
//! assert_eq!(paths.0, vec!["file:name"]);
//! ```

use crate::comparison::{
    BaseComparisonExpression, CombinedComparisonExpression, ComparisonExpression,
};
use crate::observation::{
    BaseObservationExpression, CombinedObservationExpression, ObservationExpression,
};
use crate::pattern::Pattern;
use crate::qualifier::QualifierList;

/// Hooks called while walking a pattern tree, root first, left to right.
pub trait Visitor {
    /// Called for the root.
    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }

    /// Called for every observation-layer node.
    fn visit_observation_expression(&mut self, expr: &BaseObservationExpression) {
        walk_observation_expression(self, expr);
    }

    /// Called for every single observation.
    fn visit_observation(&mut self, observation: &ObservationExpression) {
        walk_observation(self, observation);
    }

    /// Called for every combined observation.
    fn visit_combined_observation(&mut self, combined: &CombinedObservationExpression) {
        walk_combined_observation(self, combined);
    }

    /// Called for every comparison-layer node.
    fn visit_comparison_expression(&mut self, expr: &BaseComparisonExpression) {
        walk_comparison_expression(self, expr);
    }

    /// Called for every leaf comparison.
    fn visit_comparison(&mut self, comparison: &ComparisonExpression) {
        walk_comparison(self, comparison);
    }

    /// Called for every combined comparison.
    fn visit_combined_comparison(&mut self, combined: &CombinedComparisonExpression) {
        walk_combined_comparison(self, combined);
    }

    /// Called for every attached qualifier list, after the node's children.
    fn visit_qualifiers(&mut self, _qualifiers: &QualifierList) {}
}

/// Visits the root observation expression.
pub fn walk_pattern<V: Visitor + ?Sized>(visitor: &mut V, pattern: &Pattern) {
    visitor.visit_observation_expression(&pattern.expression);
}

/// Dispatches to the single or combined observation hook.
pub fn walk_observation_expression<V: Visitor + ?Sized>(
    visitor: &mut V,
    expr: &BaseObservationExpression,
) {
    match expr {
        BaseObservationExpression::Observation(o) => visitor.visit_observation(o),
        BaseObservationExpression::Combined(o) => visitor.visit_combined_observation(o),
    }
}

/// Visits the comparison tree, then the qualifiers.
pub fn walk_observation<V: Visitor + ?Sized>(visitor: &mut V, observation: &ObservationExpression) {
    visitor.visit_comparison_expression(&observation.comparison);
    if let Some(ref qualifiers) = observation.qualifiers {
        visitor.visit_qualifiers(qualifiers);
    }
}

/// Visits left, then right, then the qualifiers.
pub fn walk_combined_observation<V: Visitor + ?Sized>(
    visitor: &mut V,
    combined: &CombinedObservationExpression,
) {
    visitor.visit_observation_expression(&combined.left);
    visitor.visit_observation_expression(&combined.right);
    if let Some(ref qualifiers) = combined.qualifiers {
        visitor.visit_qualifiers(qualifiers);
    }
}

/// Dispatches to the leaf or combined comparison hook.
pub fn walk_comparison_expression<V: Visitor + ?Sized>(
    visitor: &mut V,
    expr: &BaseComparisonExpression,
) {
    match expr {
        BaseComparisonExpression::Comparison(c) => visitor.visit_comparison(c),
        BaseComparisonExpression::Combined(c) => visitor.visit_combined_comparison(c),
    }
}

/// Visits the qualifiers of a leaf comparison.
pub fn walk_comparison<V: Visitor + ?Sized>(visitor: &mut V, comparison: &ComparisonExpression) {
    if let Some(ref qualifiers) = comparison.qualifiers {
        visitor.visit_qualifiers(qualifiers);
    }
}

/// Visits left, then right, then the qualifiers.
pub fn walk_combined_comparison<V: Visitor + ?Sized>(
    visitor: &mut V,
    combined: &CombinedComparisonExpression,
) {
    visitor.visit_comparison_expression(&combined.left);
    visitor.visit_comparison_expression(&combined.right);
    if let Some(ref qualifiers) = combined.qualifiers {
        visitor.visit_qualifiers(qualifiers);
    }
}
