//! Observation layer: single observations and their AND/OR/FOLLOWEDBY
//! combinations.

use crate::comparison::{BaseComparisonExpression, ComparisonExpression};
use crate::error::PatternResult;
use crate::node::{Node, Symbol};
use crate::operators::ObservationOperator;
use crate::qualifier::{OptionalQualifiers, QualifierList};

/// A single matched event described by a comparison tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationExpression {
    /// Comparison tree.
    pub comparison: BaseComparisonExpression,
    /// Optional qualifiers.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub qualifiers: Option<QualifierList>,
}

impl ObservationExpression {
    /// Wraps a comparison tree.
    pub fn new(comparison: impl Into<BaseComparisonExpression>) -> Self {
        Self {
            comparison: comparison.into(),
            qualifiers: None,
        }
    }

    /// Wraps an untyped node, which must be a comparison expression.
    pub fn try_new(comparison: impl Into<Node>) -> PatternResult<Self> {
        let comparison = BaseComparisonExpression::try_from(comparison.into())
            .inspect_err(|e| log::debug!("rejected ObservationExpression: {}", e))?;
        Ok(Self::new(comparison))
    }

    /// Attaches qualifiers.
    pub fn with_qualifiers(mut self, qualifiers: QualifierList) -> Self {
        self.qualifiers = Some(qualifiers);
        self
    }
}

/// Two observation expressions joined by AND, OR or FOLLOWEDBY.
///
/// With [`ObservationOperator::FollowedBy`] the left observation must occur
/// before the right one. The ordering is recorded, not checked.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinedObservationExpression {
    /// Left operand.
    pub left: Box<BaseObservationExpression>,
    /// Right operand.
    pub right: Box<BaseObservationExpression>,
    /// Observation operator.
    pub operator: ObservationOperator,
    /// Optional qualifiers.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub qualifiers: Option<QualifierList>,
}

impl CombinedObservationExpression {
    /// Joins two observation expressions.
    pub fn new(
        left: impl Into<BaseObservationExpression>,
        right: impl Into<BaseObservationExpression>,
        operator: ObservationOperator,
    ) -> Self {
        Self {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
            operator,
            qualifiers: None,
        }
    }

    /// Joins two untyped nodes with an untyped operator.
    ///
    /// Both nodes must be observation expressions and the operator must hold
    /// an [`ObservationOperator`].
    pub fn try_new(
        left: impl Into<Node>,
        right: impl Into<Node>,
        operator: impl Into<Symbol>,
    ) -> PatternResult<Self> {
        Self::from_nodes(left.into(), right.into(), operator.into())
            .inspect_err(|e| log::debug!("rejected CombinedObservationExpression: {}", e))
    }

    fn from_nodes(left: Node, right: Node, operator: Symbol) -> PatternResult<Self> {
        let left = BaseObservationExpression::try_from(left)?;
        let right = BaseObservationExpression::try_from(right)?;
        let operator = ObservationOperator::try_from(operator)?;
        Ok(Self::new(left, right, operator))
    }

    /// Attaches qualifiers.
    pub fn with_qualifiers(mut self, qualifiers: QualifierList) -> Self {
        self.qualifiers = Some(qualifiers);
        self
    }

    /// Moves combined children into `pending`, leaving leaves in their place.
    fn detach_into(&mut self, pending: &mut Vec<BaseObservationExpression>) {
        for child in [&mut self.left, &mut self.right] {
            if child.is_combined() {
                let vacant = BaseObservationExpression::Observation(ObservationExpression::new(
                    ComparisonExpression::vacant(),
                ));
                pending.push(std::mem::replace(&mut **child, vacant));
            }
        }
    }
}

impl Drop for CombinedObservationExpression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_into(&mut pending);
        while let Some(mut node) = pending.pop() {
            if let BaseObservationExpression::Combined(ref mut o) = node {
                o.detach_into(&mut pending);
            }
        }
    }
}

/// Anything usable as an observation operand: a single observation or a
/// combination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BaseObservationExpression {
    /// Single observation.
    Observation(ObservationExpression),
    /// AND/OR/FOLLOWEDBY combination.
    Combined(CombinedObservationExpression),
}

impl BaseObservationExpression {
    /// Qualifiers attached directly to this node.
    pub fn qualifiers(&self) -> Option<&QualifierList> {
        match self {
            BaseObservationExpression::Observation(o) => o.qualifiers.as_ref(),
            BaseObservationExpression::Combined(o) => o.qualifiers.as_ref(),
        }
    }

    /// Returns true if this is a combination.
    pub fn is_combined(&self) -> bool {
        matches!(self, BaseObservationExpression::Combined(_))
    }

    /// All single observations, left to right.
    pub fn observations(&self) -> Vec<&ObservationExpression> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                BaseObservationExpression::Observation(o) => leaves.push(o),
                BaseObservationExpression::Combined(o) => {
                    stack.push(&o.right);
                    stack.push(&o.left);
                }
            }
        }
        leaves
    }

    /// All leaf comparisons across every observation, left to right.
    pub fn comparisons(&self) -> Vec<&ComparisonExpression> {
        self.observations()
            .into_iter()
            .flat_map(|o| o.comparison.comparisons())
            .collect()
    }

    /// Returns true if any combination in the tree uses FOLLOWEDBY.
    pub fn has_temporal_ordering(&self) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let BaseObservationExpression::Combined(o) = node {
                if o.operator.is_ordered() {
                    return true;
                }
                stack.push(&o.right);
                stack.push(&o.left);
            }
        }
        false
    }
}

impl From<ObservationExpression> for BaseObservationExpression {
    fn from(o: ObservationExpression) -> Self {
        BaseObservationExpression::Observation(o)
    }
}

impl From<CombinedObservationExpression> for BaseObservationExpression {
    fn from(o: CombinedObservationExpression) -> Self {
        BaseObservationExpression::Combined(o)
    }
}

impl std::fmt::Display for ObservationExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ObservationExpression({} {})",
            self.comparison,
            OptionalQualifiers(&self.qualifiers)
        )
    }
}

enum Piece<'a> {
    Node(&'a BaseObservationExpression),
    Operator(ObservationOperator),
    Close(&'a Option<QualifierList>),
}

impl CombinedObservationExpression {
    fn open<'a>(
        &'a self,
        f: &mut std::fmt::Formatter<'_>,
        stack: &mut Vec<Piece<'a>>,
    ) -> std::fmt::Result {
        f.write_str("CombinedObservationExpression(")?;
        stack.push(Piece::Close(&self.qualifiers));
        stack.push(Piece::Node(&self.right));
        stack.push(Piece::Operator(self.operator));
        stack.push(Piece::Node(&self.left));
        Ok(())
    }
}

fn render(f: &mut std::fmt::Formatter<'_>, mut stack: Vec<Piece<'_>>) -> std::fmt::Result {
    while let Some(piece) = stack.pop() {
        match piece {
            Piece::Node(BaseObservationExpression::Observation(o)) => write!(f, "{}", o)?,
            Piece::Node(BaseObservationExpression::Combined(o)) => o.open(f, &mut stack)?,
            Piece::Operator(op) => write!(f, " {} ", op)?,
            Piece::Close(qualifiers) => write!(f, " {})", OptionalQualifiers(qualifiers))?,
        }
    }
    Ok(())
}

impl std::fmt::Display for CombinedObservationExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut stack = Vec::new();
        self.open(f, &mut stack)?;
        render(f, stack)
    }
}

impl std::fmt::Display for BaseObservationExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(f, vec![Piece::Node(self)])
    }
}
