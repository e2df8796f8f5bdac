//! Root of a pattern tree.

use crate::comparison::ComparisonExpression;
use crate::error::{PatternError, PatternResult};
use crate::node::Node;
use crate::observation::{BaseObservationExpression, ObservationExpression};
use crate::qualifier::QualifierList;

/// A complete pattern wrapping one observation expression.
///
/// # Examples
///
/// ```rust
/// use stix_pattern::{ComparatorKind, ComparisonExpression, ObservationExpression, Pattern};
///
/// let observation = ObservationExpression::new(ComparisonExpression::new(
///     "file:hashes.MD5",
///     "abc123",
///     ComparatorKind::Equal,
/// ));
/// let pattern = Pattern::new(observation, None).unwrap();
/// assert_eq!(pattern.comparisons().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Pattern {
    /// Root observation expression.
    pub expression: BaseObservationExpression,
}

impl Pattern {
    /// Creates a pattern.
    ///
    /// Pattern-level qualifiers are not supported; passing one fails with
    /// [`PatternError::NotSupported`].
    pub fn new(
        expression: impl Into<BaseObservationExpression>,
        qualifier: Option<QualifierList>,
    ) -> PatternResult<Self> {
        if let Some(qualifier) = qualifier {
            log::debug!("rejected Pattern with root qualifier {}", qualifier);
            return Err(PatternError::NotSupported {
                feature: "pattern-level qualifiers".to_string(),
            });
        }
        Ok(Self {
            expression: expression.into(),
        })
    }

    /// Creates a pattern from an untyped node, which must be an observation
    /// expression.
    pub fn try_new(
        expression: impl Into<Node>,
        qualifier: Option<QualifierList>,
    ) -> PatternResult<Self> {
        let expression = BaseObservationExpression::try_from(expression.into())
            .inspect_err(|e| log::debug!("rejected Pattern: {}", e))?;
        Self::new(expression, qualifier)
    }

    /// All single observations, left to right.
    pub fn observations(&self) -> Vec<&ObservationExpression> {
        self.expression.observations()
    }

    /// All leaf comparisons, left to right.
    pub fn comparisons(&self) -> Vec<&ComparisonExpression> {
        self.expression.comparisons()
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pattern[{}]", self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::operators::{ComparatorKind, QualifierKind};
    use crate::qualifier::Qualifier;

    fn observation() -> ObservationExpression {
        ObservationExpression::new(ComparisonExpression::new(
            "url:value",
            "http://example.com/",
            ComparatorKind::Equal,
        ))
    }

    #[test]
    fn test_pattern_without_qualifier() {
        let pattern = Pattern::new(observation(), None).unwrap();
        assert_eq!(pattern.expression, BaseObservationExpression::from(observation()));
    }

    #[test]
    fn test_pattern_with_qualifier_is_not_supported() {
        let quals = QualifierList::new(Qualifier::new(QualifierKind::Repeats, 2));
        let err = Pattern::new(observation(), Some(quals)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
    }

    #[test]
    fn test_try_new_rejects_comparison() {
        let cmp = ComparisonExpression::new("url:value", "x", ComparatorKind::Equal);
        let err = Pattern::try_new(cmp, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_try_new_checks_type_before_qualifier() {
        let cmp = ComparisonExpression::new("url:value", "x", ComparatorKind::Equal);
        let quals = QualifierList::new(Qualifier::new(QualifierKind::Within, 1));
        let err = Pattern::try_new(cmp, Some(quals)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_display_pattern() {
        let pattern = Pattern::new(observation(), None).unwrap();
        assert_eq!(
            pattern.to_string(),
            "Pattern[ObservationExpression(ComparisonExpression(url:value Equal 'http://example.com/' None) None)]"
        );
    }
}
