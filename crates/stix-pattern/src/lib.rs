//! # stix-pattern
//!
//! In-memory expression tree for STIX indicator patterns such as
//! `[file:hashes.MD5 = 'abc123'] FOLLOWEDBY [process:name = 'cmd.exe']`.
//!
//! This crate provides the typed node hierarchy a parser produces and an
//! evaluator or serializer consumes. It enforces structural well-formedness
//! only; it does not check that object paths or values are legal STIX.
//!
//! ## Layers
//!
//! | Layer | Leaf | Combined | Operators |
//! |-------|------|----------|-----------|
//! | Comparison | [`ComparisonExpression`] | [`CombinedComparisonExpression`] | [`LogicalOperator`] |
//! | Observation | [`ObservationExpression`] | [`CombinedObservationExpression`] | [`ObservationOperator`] |
//! | Root | [`Pattern`] | | |
//!
//! ## Usage
//!
//! ```rust
//! use stix_pattern::{
//!     CombinedComparisonExpression, ComparatorKind, ComparisonExpression, LogicalOperator,
//!     ObservationExpression, Pattern, ValueSet,
//! };
//!
//! let mut sizes = ValueSet::new();
//! sizes.append(1).unwrap();
//! sizes.append(2).unwrap();
//! sizes.close();
//!
//! let comparison = CombinedComparisonExpression::new(
//!     ComparisonExpression::new("file:hashes.MD5", "abc123", ComparatorKind::Equal),
//!     ComparisonExpression::new("file:size", sizes, ComparatorKind::In),
//!     LogicalOperator::And,
//! );
//! let pattern = Pattern::new(ObservationExpression::new(comparison), None).unwrap();
//! assert_eq!(pattern.comparisons().len(), 2);
//! ```
//!
//! ## Untyped construction
//!
//! Parsers holding a stack of mixed operands use [`Node`], [`Symbol`] and the
//! `try_new` constructors. These fail with [`PatternError::TypeMismatch`]
//! rather than coercing:
//!
//! ```rust
//! use stix_pattern::{CombinedObservationExpression, ErrorKind, ComparatorKind,
//!     ComparisonExpression, ObservationExpression};
//!
//! let obs = || ObservationExpression::new(
//!     ComparisonExpression::new("file:name", "a.exe", ComparatorKind::Equal),
//! );
//! let err = CombinedObservationExpression::try_new(obs(), obs(), "AND").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::TypeMismatch);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod comparison;
mod error;
mod node;
mod observation;
mod operators;
mod pattern;
mod qualifier;
mod value;
pub mod visit;

pub use comparison::{
    BaseComparisonExpression, CombinedComparisonExpression, ComparisonExpression,
};
pub use error::{EmptyQualifierList, ErrorKind, PatternError, PatternResult};
pub use node::{Node, Symbol};
pub use observation::{
    BaseObservationExpression, CombinedObservationExpression, ObservationExpression,
};
pub use operators::{ComparatorKind, LogicalOperator, ObservationOperator, QualifierKind};
pub use pattern::Pattern;
pub use qualifier::{Qualifier, QualifierList};
pub use value::{ComparisonValue, SetState, Value, ValueSet};
