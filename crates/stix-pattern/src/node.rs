//! Untyped construction inputs.
//!
//! A parser that keeps a heterogeneous stack of operands and operators
//! cannot lean on the type system to pick the right constructor. [`Node`]
//! and [`Symbol`] carry those untyped operands; converting them into the
//! typed model checks layer and vocabulary membership and fails with
//! [`PatternError::TypeMismatch`] instead of coercing.

use crate::comparison::{
    BaseComparisonExpression, CombinedComparisonExpression, ComparisonExpression,
};
use crate::error::PatternError;
use crate::observation::{
    BaseObservationExpression, CombinedObservationExpression, ObservationExpression,
};
use crate::operators::{ComparatorKind, LogicalOperator, ObservationOperator, QualifierKind};

/// An operator or comparator token of unknown vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A comparator.
    Comparator(ComparatorKind),
    /// A comparison-level operator.
    Logical(LogicalOperator),
    /// An observation-level operator.
    Observation(ObservationOperator),
    /// A qualifier kind.
    Qualifier(QualifierKind),
    /// Raw text. Never converted into a variant, even if it spells one.
    Text(String),
}

impl Symbol {
    fn describe(&self) -> String {
        match self {
            Symbol::Comparator(k) => format!("ComparatorKind::{}", k),
            Symbol::Logical(op) => format!("LogicalOperator::{}", op),
            Symbol::Observation(op) => format!("ObservationOperator::{}", op),
            Symbol::Qualifier(k) => format!("QualifierKind::{}", k),
            Symbol::Text(s) => format!("text {:?}", s),
        }
    }
}

impl From<ComparatorKind> for Symbol {
    fn from(k: ComparatorKind) -> Self {
        Symbol::Comparator(k)
    }
}

impl From<LogicalOperator> for Symbol {
    fn from(op: LogicalOperator) -> Self {
        Symbol::Logical(op)
    }
}

impl From<ObservationOperator> for Symbol {
    fn from(op: ObservationOperator) -> Self {
        Symbol::Observation(op)
    }
}

impl From<QualifierKind> for Symbol {
    fn from(k: QualifierKind) -> Self {
        Symbol::Qualifier(k)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::Text(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::Text(s)
    }
}

impl TryFrom<Symbol> for ComparatorKind {
    type Error = PatternError;

    fn try_from(symbol: Symbol) -> Result<Self, Self::Error> {
        match symbol {
            Symbol::Comparator(k) => Ok(k),
            other => Err(PatternError::type_mismatch("ComparatorKind", other.describe())),
        }
    }
}

impl TryFrom<Symbol> for LogicalOperator {
    type Error = PatternError;

    fn try_from(symbol: Symbol) -> Result<Self, Self::Error> {
        match symbol {
            Symbol::Logical(op) => Ok(op),
            other => Err(PatternError::type_mismatch("LogicalOperator", other.describe())),
        }
    }
}

impl TryFrom<Symbol> for ObservationOperator {
    type Error = PatternError;

    fn try_from(symbol: Symbol) -> Result<Self, Self::Error> {
        match symbol {
            Symbol::Observation(op) => Ok(op),
            other => Err(PatternError::type_mismatch(
                "ObservationOperator",
                other.describe(),
            )),
        }
    }
}

impl TryFrom<Symbol> for QualifierKind {
    type Error = PatternError;

    fn try_from(symbol: Symbol) -> Result<Self, Self::Error> {
        match symbol {
            Symbol::Qualifier(k) => Ok(k),
            other => Err(PatternError::type_mismatch("QualifierKind", other.describe())),
        }
    }
}

/// Any expression node, regardless of layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Leaf comparison.
    Comparison(ComparisonExpression),
    /// Combined comparison.
    CombinedComparison(CombinedComparisonExpression),
    /// Observation wrapping a comparison tree.
    Observation(ObservationExpression),
    /// Combined observation.
    CombinedObservation(CombinedObservationExpression),
}

impl Node {
    /// Node kind name.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Comparison(_) => "ComparisonExpression",
            Node::CombinedComparison(_) => "CombinedComparisonExpression",
            Node::Observation(_) => "ObservationExpression",
            Node::CombinedObservation(_) => "CombinedObservationExpression",
        }
    }

    /// Returns true for comparison-layer nodes.
    pub fn is_comparison(&self) -> bool {
        matches!(self, Node::Comparison(_) | Node::CombinedComparison(_))
    }

    /// Returns true for observation-layer nodes.
    pub fn is_observation(&self) -> bool {
        matches!(self, Node::Observation(_) | Node::CombinedObservation(_))
    }
}

impl From<ComparisonExpression> for Node {
    fn from(c: ComparisonExpression) -> Self {
        Node::Comparison(c)
    }
}

impl From<CombinedComparisonExpression> for Node {
    fn from(c: CombinedComparisonExpression) -> Self {
        Node::CombinedComparison(c)
    }
}

impl From<ObservationExpression> for Node {
    fn from(o: ObservationExpression) -> Self {
        Node::Observation(o)
    }
}

impl From<CombinedObservationExpression> for Node {
    fn from(o: CombinedObservationExpression) -> Self {
        Node::CombinedObservation(o)
    }
}

impl From<BaseComparisonExpression> for Node {
    fn from(c: BaseComparisonExpression) -> Self {
        match c {
            BaseComparisonExpression::Comparison(c) => Node::Comparison(c),
            BaseComparisonExpression::Combined(c) => Node::CombinedComparison(c),
        }
    }
}

impl From<BaseObservationExpression> for Node {
    fn from(o: BaseObservationExpression) -> Self {
        match o {
            BaseObservationExpression::Observation(o) => Node::Observation(o),
            BaseObservationExpression::Combined(o) => Node::CombinedObservation(o),
        }
    }
}

impl TryFrom<Node> for BaseComparisonExpression {
    type Error = PatternError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::Comparison(c) => Ok(BaseComparisonExpression::Comparison(c)),
            Node::CombinedComparison(c) => Ok(BaseComparisonExpression::Combined(c)),
            other => Err(PatternError::type_mismatch(
                "comparison expression",
                other.kind_name(),
            )),
        }
    }
}

impl TryFrom<Node> for BaseObservationExpression {
    type Error = PatternError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::Observation(o) => Ok(BaseObservationExpression::Observation(o)),
            Node::CombinedObservation(o) => Ok(BaseObservationExpression::Combined(o)),
            other => Err(PatternError::type_mismatch(
                "observation expression",
                other.kind_name(),
            )),
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Comparison(c) => write!(f, "{}", c),
            Node::CombinedComparison(c) => write!(f, "{}", c),
            Node::Observation(o) => write!(f, "{}", o),
            Node::CombinedObservation(o) => write!(f, "{}", o),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn leaf() -> ComparisonExpression {
        ComparisonExpression::new("process:pid", 4, ComparatorKind::Equal)
    }

    #[test]
    fn test_symbol_from_typed_variant() {
        assert_eq!(
            ComparatorKind::try_from(Symbol::from(ComparatorKind::Matches)),
            Ok(ComparatorKind::Matches)
        );
        assert_eq!(
            ObservationOperator::try_from(Symbol::from(ObservationOperator::FollowedBy)),
            Ok(ObservationOperator::FollowedBy)
        );
        assert_eq!(
            QualifierKind::try_from(Symbol::from(QualifierKind::Within)),
            Ok(QualifierKind::Within)
        );
    }

    #[test]
    fn test_text_that_spells_a_variant_is_rejected() {
        for text in ["Equal", "And", "FollowedBy", "Repeats"] {
            assert!(ComparatorKind::try_from(Symbol::from(text)).is_err());
            assert!(LogicalOperator::try_from(Symbol::from(text)).is_err());
            assert!(ObservationOperator::try_from(Symbol::from(text)).is_err());
            assert!(QualifierKind::try_from(Symbol::from(text)).is_err());
        }
    }

    #[test]
    fn test_wrong_vocabulary_is_rejected() {
        let err = LogicalOperator::try_from(Symbol::from(ObservationOperator::And)).unwrap_err();
        assert_eq!(
            err,
            PatternError::TypeMismatch {
                expected: "LogicalOperator",
                found: "ObservationOperator::And".to_string(),
            }
        );
    }

    #[test]
    fn test_text_is_described_quoted() {
        let err = ComparatorKind::try_from(Symbol::from(String::from("="))).unwrap_err();
        assert_eq!(err.to_string(), "type mismatch: expected ComparatorKind, found text \"=\"");
    }

    #[test]
    fn test_node_layers() {
        let comparison = Node::from(leaf());
        assert!(comparison.is_comparison());
        assert!(!comparison.is_observation());
        assert_eq!(comparison.kind_name(), "ComparisonExpression");

        let observation = Node::from(ObservationExpression::new(leaf()));
        assert!(observation.is_observation());
        assert_eq!(observation.kind_name(), "ObservationExpression");
    }

    #[test]
    fn test_comparison_capability() {
        assert!(BaseComparisonExpression::try_from(Node::from(leaf())).is_ok());

        let err =
            BaseComparisonExpression::try_from(Node::from(ObservationExpression::new(leaf())))
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_observation_capability() {
        let err = BaseObservationExpression::try_from(Node::from(leaf())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch: expected observation expression, found ComparisonExpression"
        );

        let observation = BaseObservationExpression::from(ObservationExpression::new(leaf()));
        let round = BaseObservationExpression::try_from(Node::from(observation.clone())).unwrap();
        assert_eq!(round, observation);
    }
}
