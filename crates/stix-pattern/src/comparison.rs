//! Comparison layer: leaf predicates and their AND/OR combinations.

use crate::error::PatternResult;
use crate::node::{Node, Symbol};
use crate::operators::{ComparatorKind, LogicalOperator};
use crate::qualifier::{OptionalQualifiers, QualifierList};
use crate::value::{ComparisonValue, Value};

/// Compares the field at `object_path` against a value.
///
/// The comparator is not checked against the value's shape; an `In`
/// comparison with a scalar value is accepted here and left to a validator.
///
/// # Examples
///
/// ```rust
/// use stix_pattern::{ComparatorKind, ComparisonExpression};
///
/// let cmp = ComparisonExpression::new("file:hashes.MD5", "abc123", ComparatorKind::Equal);
/// assert_eq!(cmp.object_path, "file:hashes.MD5");
/// assert!(!cmp.negated);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonExpression {
    /// Object path, e.g. `file:hashes.MD5`.
    pub object_path: String,
    /// Right-hand side.
    pub value: ComparisonValue,
    /// Comparator.
    pub comparator: ComparatorKind,
    /// Whether the comparison is negated (`NOT`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub negated: bool,
    /// Optional qualifiers.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub qualifiers: Option<QualifierList>,
}

impl ComparisonExpression {
    /// Creates a non-negated comparison without qualifiers.
    pub fn new(
        object_path: impl Into<String>,
        value: impl Into<ComparisonValue>,
        comparator: ComparatorKind,
    ) -> Self {
        Self {
            object_path: object_path.into(),
            value: value.into(),
            comparator,
            negated: false,
            qualifiers: None,
        }
    }

    /// Creates a comparison from an untyped comparator symbol.
    ///
    /// Fails with a type mismatch unless `comparator` holds a
    /// [`ComparatorKind`].
    pub fn try_new(
        object_path: impl Into<String>,
        value: impl Into<ComparisonValue>,
        comparator: impl Into<Symbol>,
    ) -> PatternResult<Self> {
        let comparator = ComparatorKind::try_from(comparator.into()).inspect_err(|e| {
            log::debug!("rejected ComparisonExpression: {}", e);
        })?;
        Ok(Self::new(object_path, value, comparator))
    }

    /// Sets the negation flag.
    pub fn with_negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    /// Attaches qualifiers.
    pub fn with_qualifiers(mut self, qualifiers: QualifierList) -> Self {
        self.qualifiers = Some(qualifiers);
        self
    }

    /// Allocation-free stand-in left behind when a subtree is moved out
    /// during drop.
    pub(crate) fn vacant() -> Self {
        Self::new(String::new(), Value::Boolean(false), ComparatorKind::Equal)
    }
}

/// Two comparison expressions joined by AND or OR.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinedComparisonExpression {
    /// Left operand.
    pub left: Box<BaseComparisonExpression>,
    /// Right operand.
    pub right: Box<BaseComparisonExpression>,
    /// Logical operator.
    pub operator: LogicalOperator,
    /// Optional qualifiers.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub qualifiers: Option<QualifierList>,
}

impl CombinedComparisonExpression {
    /// Joins two comparison expressions.
    pub fn new(
        left: impl Into<BaseComparisonExpression>,
        right: impl Into<BaseComparisonExpression>,
        operator: LogicalOperator,
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
    /// Both nodes must be comparison expressions and the operator must hold
    /// a [`LogicalOperator`].
    pub fn try_new(
        left: impl Into<Node>,
        right: impl Into<Node>,
        operator: impl Into<Symbol>,
    ) -> PatternResult<Self> {
        Self::from_nodes(left.into(), right.into(), operator.into()).inspect_err(|e| {
            log::debug!("rejected CombinedComparisonExpression: {}", e);
        })
    }

    fn from_nodes(left: Node, right: Node, operator: Symbol) -> PatternResult<Self> {
        let left = BaseComparisonExpression::try_from(left)?;
        let right = BaseComparisonExpression::try_from(right)?;
        let operator = LogicalOperator::try_from(operator)?;
        Ok(Self::new(left, right, operator))
    }

    /// Attaches qualifiers.
    pub fn with_qualifiers(mut self, qualifiers: QualifierList) -> Self {
        self.qualifiers = Some(qualifiers);
        self
    }

    /// Moves combined children into `pending`, leaving leaves in their place.
    fn detach_into(&mut self, pending: &mut Vec<BaseComparisonExpression>) {
        for child in [&mut self.left, &mut self.right] {
            if child.is_combined() {
                let vacant = BaseComparisonExpression::Comparison(ComparisonExpression::vacant());
                pending.push(std::mem::replace(&mut **child, vacant));
            }
        }
    }
}

// Chains run thousands of levels deep; drop them without recursion.
impl Drop for CombinedComparisonExpression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_into(&mut pending);
        while let Some(mut node) = pending.pop() {
            if let BaseComparisonExpression::Combined(ref mut c) = node {
                c.detach_into(&mut pending);
            }
        }
    }
}

/// Anything usable as a comparison operand: a leaf or a combination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BaseComparisonExpression {
    /// Leaf comparison.
    Comparison(ComparisonExpression),
    /// AND/OR combination.
    Combined(CombinedComparisonExpression),
}

impl BaseComparisonExpression {
    /// Qualifiers attached directly to this node.
    pub fn qualifiers(&self) -> Option<&QualifierList> {
        match self {
            BaseComparisonExpression::Comparison(c) => c.qualifiers.as_ref(),
            BaseComparisonExpression::Combined(c) => c.qualifiers.as_ref(),
        }
    }

    /// Returns true if this is an AND/OR combination.
    pub fn is_combined(&self) -> bool {
        matches!(self, BaseComparisonExpression::Combined(_))
    }

    /// Returns the leaf comparison if this is one.
    pub fn as_comparison(&self) -> Option<&ComparisonExpression> {
        match self {
            BaseComparisonExpression::Comparison(c) => Some(c),
            BaseComparisonExpression::Combined(_) => None,
        }
    }

    /// All leaf comparisons, left to right.
    pub fn comparisons(&self) -> Vec<&ComparisonExpression> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                BaseComparisonExpression::Comparison(c) => leaves.push(c),
                BaseComparisonExpression::Combined(c) => {
                    stack.push(&c.right);
                    stack.push(&c.left);
                }
            }
        }
        leaves
    }

    /// Height of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let BaseComparisonExpression::Combined(c) = node {
                stack.push((&*c.right, level + 1));
                stack.push((&*c.left, level + 1));
            }
        }
        deepest
    }
}

impl From<ComparisonExpression> for BaseComparisonExpression {
    fn from(c: ComparisonExpression) -> Self {
        BaseComparisonExpression::Comparison(c)
    }
}

impl From<CombinedComparisonExpression> for BaseComparisonExpression {
    fn from(c: CombinedComparisonExpression) -> Self {
        BaseComparisonExpression::Combined(c)
    }
}

// =============================================================================
// Display implementations
// =============================================================================

impl std::fmt::Display for ComparisonExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ComparisonExpression({} ", self.object_path)?;
        if self.negated {
            write!(f, "NOT ")?;
        }
        write!(
            f,
            "{} {} {})",
            self.comparator,
            self.value,
            OptionalQualifiers(&self.qualifiers)
        )
    }
}

/// Pending output while rendering a comparison tree without recursion.
enum Piece<'a> {
    Node(&'a BaseComparisonExpression),
    Operator(LogicalOperator),
    Close(&'a Option<QualifierList>),
}

impl CombinedComparisonExpression {
    /// Writes the opening of this node and schedules the rest on `stack`.
    fn open<'a>(
        &'a self,
        f: &mut std::fmt::Formatter<'_>,
        stack: &mut Vec<Piece<'a>>,
    ) -> std::fmt::Result {
        f.write_str("CombinedComparisonExpression(")?;
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
            Piece::Node(BaseComparisonExpression::Comparison(c)) => write!(f, "{}", c)?,
            Piece::Node(BaseComparisonExpression::Combined(c)) => c.open(f, &mut stack)?,
            Piece::Operator(op) => write!(f, " {} ", op)?,
            Piece::Close(qualifiers) => write!(f, " {})", OptionalQualifiers(qualifiers))?,
        }
    }
    Ok(())
}

impl std::fmt::Display for CombinedComparisonExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut stack = Vec::new();
        self.open(f, &mut stack)?;
        render(f, stack)
    }
}

impl std::fmt::Display for BaseComparisonExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(f, vec![Piece::Node(self)])
    }
}
