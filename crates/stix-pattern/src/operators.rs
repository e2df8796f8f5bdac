//! Closed vocabularies used by pattern nodes.
//!
//! Each enum keeps its declaration order as a stable 0-based ordinal for
//! collaborators that serialize by position. Behavior never depends on the
//! ordinal; match on the variant instead.

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Position of the variant in declaration order.
            pub fn ordinal(self) -> u8 {
                self as u8
            }

            /// Looks up a variant by its ordinal.
            pub fn from_ordinal(ordinal: u8) -> Option<Self> {
                Self::ALL.get(usize::from(ordinal)).copied()
            }

            /// Variant name.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

vocabulary! {
    /// Relationship between an object path and a value inside a comparison.
    pub enum ComparatorKind {
        /// `=`
        Equal,
        /// `!=`
        NotEqual,
        /// `>`
        GreaterThan,
        /// `<`
        LessThan,
        /// `>=`
        GreaterThanOrEqual,
        /// `<=`
        LessThanOrEqual,
        /// `IN (...)`
        In,
        /// `LIKE`
        Like,
        /// `MATCHES`
        Matches,
        /// `ISSUBSET`
        IsSubsetOf,
        /// `ISSUPERSET`
        IsSupersetOf,
    }
}

vocabulary! {
    /// Combines two comparison expressions.
    pub enum LogicalOperator {
        /// Both comparisons must hold.
        And,
        /// Either comparison may hold.
        Or,
    }
}

vocabulary! {
    /// Combines two observation expressions.
    pub enum ObservationOperator {
        /// Both observations must be matched.
        And,
        /// Either observation may be matched.
        Or,
        /// The left observation must be matched before the right one.
        FollowedBy,
    }
}

vocabulary! {
    /// Kind of constraint carried by a qualifier.
    pub enum QualifierKind {
        /// `REPEATS n TIMES`
        Repeats,
        /// `WITHIN n SECONDS`
        Within,
        /// `START t1 STOP t2`
        StartStop,
    }
}

impl ComparatorKind {
    /// Returns true for comparators whose right-hand side is a value set.
    pub fn takes_set(self) -> bool {
        matches!(
            self,
            ComparatorKind::In | ComparatorKind::IsSubsetOf | ComparatorKind::IsSupersetOf
        )
    }
}

impl ObservationOperator {
    /// Returns true if the operator imposes a temporal ordering.
    pub fn is_ordered(self) -> bool {
        matches!(self, ObservationOperator::FollowedBy)
    }
}
