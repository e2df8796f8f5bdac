//! Qualifiers attached to comparison and observation expressions.

use crate::error::{EmptyQualifierList, PatternResult};
use crate::node::Symbol;
use crate::operators::QualifierKind;

/// A single constraint such as a repeat count or time window.
///
/// `value2` is optional for every kind; which kinds need a second bound is
/// left to whoever evaluates the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Qualifier {
    /// Qualifier kind.
    pub kind: QualifierKind,
    /// First operand (count, seconds, or start bound).
    pub value1: i64,
    /// Second operand, if any.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub value2: Option<i64>,
}

impl Qualifier {
    /// Creates a single-operand qualifier.
    pub fn new(kind: QualifierKind, value1: i64) -> Self {
        Self {
            kind,
            value1,
            value2: None,
        }
    }

    /// Creates a two-operand qualifier.
    pub fn range(kind: QualifierKind, value1: i64, value2: i64) -> Self {
        Self {
            kind,
            value1,
            value2: Some(value2),
        }
    }

    /// Creates a qualifier from an untyped kind symbol.
    ///
    /// Fails with a type mismatch unless `kind` holds a [`QualifierKind`].
    pub fn try_new(
        kind: impl Into<Symbol>,
        value1: i64,
        value2: Option<i64>,
    ) -> PatternResult<Self> {
        let kind = QualifierKind::try_from(kind.into())
            .inspect_err(|e| log::debug!("rejected Qualifier: {}", e))?;
        Ok(Self {
            kind,
            value1,
            value2,
        })
    }
}

/// Ordered, non-empty list of qualifiers.
///
/// Qualifiers apply left to right. The list only grows; there is no removal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "Vec<Qualifier>", try_from = "Vec<Qualifier>")
)]
pub struct QualifierList {
    qualifiers: Vec<Qualifier>,
}

impl QualifierList {
    /// Creates a list holding one qualifier.
    pub fn new(first: Qualifier) -> Self {
        Self {
            qualifiers: vec![first],
        }
    }

    /// Appends a qualifier.
    pub fn add(&mut self, qualifier: Qualifier) {
        self.qualifiers.push(qualifier);
    }

    /// Appends a qualifier, builder style.
    pub fn with(mut self, qualifier: Qualifier) -> Self {
        self.add(qualifier);
        self
    }

    /// The first qualifier. Always present.
    pub fn first(&self) -> &Qualifier {
        &self.qualifiers[0]
    }

    /// Number of qualifiers (at least one).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.qualifiers.len()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Qualifier> {
        self.qualifiers.iter()
    }

    /// The qualifiers as a slice.
    pub fn as_slice(&self) -> &[Qualifier] {
        &self.qualifiers
    }
}

impl From<Qualifier> for QualifierList {
    fn from(first: Qualifier) -> Self {
        Self::new(first)
    }
}

impl From<QualifierList> for Vec<Qualifier> {
    fn from(list: QualifierList) -> Self {
        list.qualifiers
    }
}

impl TryFrom<Vec<Qualifier>> for QualifierList {
    type Error = EmptyQualifierList;

    fn try_from(qualifiers: Vec<Qualifier>) -> Result<Self, Self::Error> {
        if qualifiers.is_empty() {
            return Err(EmptyQualifierList);
        }
        Ok(Self { qualifiers })
    }
}

impl<'a> IntoIterator for &'a QualifierList {
    type Item = &'a Qualifier;
    type IntoIter = std::slice::Iter<'a, Qualifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for Qualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Qualifier({} {} ", self.kind, self.value1)?;
        match self.value2 {
            Some(v) => write!(f, "{})", v),
            None => write!(f, "None)"),
        }
    }
}

impl std::fmt::Display for QualifierList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "QualifierList([")?;
        for (i, q) in self.qualifiers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", q)?;
        }
        write!(f, "])")
    }
}

/// Renders an optional qualifier list the way node debug strings expect.
pub(crate) struct OptionalQualifiers<'a>(pub(crate) &'a Option<QualifierList>);

impl std::fmt::Display for OptionalQualifiers<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(list) => write!(f, "{}", list),
            None => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::operators::ObservationOperator;

    #[test]
    fn test_qualifier_single_operand() {
        let q = Qualifier::new(QualifierKind::Repeats, 5);
        assert_eq!(q.kind, QualifierKind::Repeats);
        assert_eq!(q.value1, 5);
        assert!(q.value2.is_none());
    }

    #[test]
    fn test_qualifier_range() {
        let q = Qualifier::range(QualifierKind::StartStop, 100, 200);
        assert_eq!(q.value2, Some(200));
    }

    #[test]
    fn test_try_new_accepts_kind_symbol() {
        let q = Qualifier::try_new(QualifierKind::StartStop, 10, Some(20)).unwrap();
        assert_eq!(q, Qualifier::range(QualifierKind::StartStop, 10, 20));

        let q = Qualifier::try_new(Symbol::from(QualifierKind::Repeats), 3, None).unwrap();
        assert_eq!(q, Qualifier::new(QualifierKind::Repeats, 3));
    }

    #[test]
    fn test_try_new_rejects_text_kind() {
        let err = Qualifier::try_new("WITHIN", 5, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(
            err.to_string(),
            "type mismatch: expected QualifierKind, found text \"WITHIN\""
        );
    }

    #[test]
    fn test_try_new_rejects_other_vocabulary() {
        let err = Qualifier::try_new(ObservationOperator::FollowedBy, 5, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_list_is_never_empty() {
        let list = QualifierList::new(Qualifier::new(QualifierKind::Within, 300));
        assert_eq!(list.len(), 1);
        assert_eq!(list.first().kind, QualifierKind::Within);
    }

    #[test]
    fn test_add_preserves_order() {
        let mut list = QualifierList::new(Qualifier::new(QualifierKind::Repeats, 2));
        list.add(Qualifier::new(QualifierKind::Within, 60));
        list.add(Qualifier::range(QualifierKind::StartStop, 1, 2));

        let kinds: Vec<QualifierKind> = list.iter().map(|q| q.kind).collect();
        assert_eq!(
            kinds,
            vec![QualifierKind::Repeats, QualifierKind::Within, QualifierKind::StartStop]
        );
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_with_chains() {
        let list = QualifierList::from(Qualifier::new(QualifierKind::Repeats, 2))
            .with(Qualifier::new(QualifierKind::Within, 60));
        assert_eq!(list.as_slice().len(), 2);
        assert_eq!(list.as_slice()[1].value1, 60);
    }

    #[test]
    fn test_try_from_vec() {
        assert_eq!(
            QualifierList::try_from(Vec::<Qualifier>::new()),
            Err(EmptyQualifierList)
        );

        let list =
            QualifierList::try_from(vec![Qualifier::new(QualifierKind::Repeats, 1)]).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(Vec::from(list).len(), 1);
    }

    #[test]
    fn test_display_qualifier() {
        assert_eq!(
            Qualifier::new(QualifierKind::Repeats, 5).to_string(),
            "Qualifier(Repeats 5 None)"
        );
        assert_eq!(
            Qualifier::range(QualifierKind::StartStop, 1, 9).to_string(),
            "Qualifier(StartStop 1 9)"
        );
    }

    #[test]
    fn test_display_list() {
        let list = QualifierList::new(Qualifier::new(QualifierKind::Repeats, 5))
            .with(Qualifier::new(QualifierKind::Within, 10));
        assert_eq!(
            list.to_string(),
            "QualifierList([Qualifier(Repeats 5 None), Qualifier(Within 10 None)])"
        );
    }

    #[test]
    fn test_display_optional() {
        assert_eq!(OptionalQualifiers(&None).to_string(), "None");
    }
}
