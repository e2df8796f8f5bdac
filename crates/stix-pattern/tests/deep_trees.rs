//! Long left-nested chains, the shape indicator feeds produce when they OR
//! together thousands of hashes.

use stix_pattern::{
    BaseComparisonExpression, BaseObservationExpression, CombinedComparisonExpression,
    CombinedObservationExpression, ComparatorKind, ComparisonExpression, LogicalOperator,
    ObservationExpression, ObservationOperator, Pattern,
};

const LEVELS: usize = 20_000;

fn hash(i: usize) -> ComparisonExpression {
    ComparisonExpression::new("file:hashes.MD5", format!("{:032x}", i), ComparatorKind::Equal)
}

fn comparison_chain(levels: usize) -> BaseComparisonExpression {
    let mut tree = BaseComparisonExpression::from(hash(0));
    for i in 1..levels {
        tree = CombinedComparisonExpression::new(tree, hash(i), LogicalOperator::Or).into();
    }
    tree
}

fn observation_chain(levels: usize) -> BaseObservationExpression {
    let mut tree = BaseObservationExpression::from(ObservationExpression::new(hash(0)));
    for i in 1..levels {
        let operator = if i == levels / 2 {
            ObservationOperator::FollowedBy
        } else {
            ObservationOperator::And
        };
        let next = ObservationExpression::new(hash(i));
        tree = CombinedObservationExpression::new(tree, next, operator).into();
    }
    tree
}

#[test]
fn test_deep_comparison_chain_renders() {
    let tree = comparison_chain(LEVELS);
    let text = tree.to_string();

    assert!(text.starts_with("CombinedComparisonExpression(CombinedComparisonExpression("));
    assert_eq!(text.matches("CombinedComparisonExpression(").count(), LEVELS - 1);
    assert_eq!(text.matches(" Or ").count(), LEVELS - 1);
    assert!(text.ends_with(" None)"));
}

#[test]
fn test_deep_comparison_chain_traverses() {
    let tree = comparison_chain(LEVELS);
    assert_eq!(tree.depth(), LEVELS);

    let leaves = tree.comparisons();
    assert_eq!(leaves.len(), LEVELS);
    assert_eq!(leaves[0], &hash(0));
    assert_eq!(leaves[LEVELS - 1], &hash(LEVELS - 1));
}

#[test]
fn test_deep_comparison_chain_drops() {
    let tree = comparison_chain(LEVELS);
    drop(tree);

    let right_nested = (1..LEVELS).fold(BaseComparisonExpression::from(hash(0)), |tree, i| {
        CombinedComparisonExpression::new(hash(i), tree, LogicalOperator::And).into()
    });
    assert_eq!(right_nested.depth(), LEVELS);
    drop(right_nested);
}

#[test]
fn test_deep_observation_chain_renders_and_drops() {
    let tree = observation_chain(LEVELS);

    assert!(tree.has_temporal_ordering());
    assert_eq!(tree.observations().len(), LEVELS);

    let pattern = Pattern::new(tree, None).unwrap();
    let text = pattern.to_string();
    assert!(text.starts_with("Pattern[CombinedObservationExpression("));
    assert_eq!(text.matches("CombinedObservationExpression(").count(), LEVELS - 1);
    assert_eq!(text.matches(" FollowedBy ").count(), 1);
    assert!(text.ends_with(" None)]"));

    drop(pattern);
}

#[test]
fn test_deep_comparison_inside_observation_drops() {
    let observation = ObservationExpression::new(comparison_chain(LEVELS));
    let tree = CombinedObservationExpression::new(
        observation,
        ObservationExpression::new(hash(0)),
        ObservationOperator::Or,
    );
    assert_eq!(tree.left.comparisons().len(), LEVELS);
    assert!(tree.to_string().contains(" Or ObservationExpression("));
    drop(tree);
}
