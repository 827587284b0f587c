//! `proptest` strategies for converging sequences.
//!
//! Enabled by the `proptest` feature.

use crate::shape::ConvergingShape;
use proptest::collection::vec;
use proptest::prelude::*;

/// Shapes with prefixes of `0..=max_prefix` values and a shared suffix of
/// `0..=max_shared` values, each drawn from `values`.
pub fn converging_shape<S>(
    values: S,
    max_prefix: usize,
    max_shared: usize,
) -> impl Strategy<Value = ConvergingShape<S::Value>>
where
    S: Strategy + Clone,
{
    (
        vec(values.clone(), 0..=max_prefix),
        vec(values.clone(), 0..=max_prefix),
        vec(values, 0..=max_shared),
    )
        .prop_map(|(prefix_a, prefix_b, shared)| ConvergingShape::new(prefix_a, prefix_b, shared))
}

/// Shapes whose sequences always meet (non-empty shared suffix).
pub fn meeting_shape<S>(
    values: S,
    max_prefix: usize,
    max_shared: usize,
) -> impl Strategy<Value = ConvergingShape<S::Value>>
where
    S: Strategy + Clone,
{
    (
        vec(values.clone(), 0..=max_prefix),
        vec(values.clone(), 0..=max_prefix),
        vec(values, 1..=max_shared.max(1)),
    )
        .prop_map(|(prefix_a, prefix_b, shared)| ConvergingShape::new(prefix_a, prefix_b, shared))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::intersection::{analyze_convergence, find_intersection};
    use crate::collections::ConvergingLists;
    use crate::GhostToken;
    use std::rc::Rc;

    proptest! {
        #[test]
        fn table_search_finds_the_shared_head(shape in converging_shape(any::<u8>(), 8, 8)) {
            let (table, heads) = shape.build_table();
            prop_assert_eq!(find_intersection(&table, heads.a, heads.b), heads.shared);
            prop_assert_eq!(find_intersection(&table, heads.b, heads.a), heads.shared);
            prop_assert_eq!(
                analyze_convergence(&table, heads.a, heads.b).stats(),
                shape.expected_stats()
            );
        }

        #[test]
        fn arena_search_finds_the_shared_head(shape in converging_shape(0..4i32, 8, 8)) {
            GhostToken::new(|mut token| {
                let lists = ConvergingLists::new();
                let heads = shape.build_lists(&lists, &mut token);
                assert_eq!(lists.intersection(&token, heads.a, heads.b), heads.shared);
                assert_eq!(lists.convergence(&token, heads.a, heads.b).stats(), shape.expected_stats());
            });
        }

        #[test]
        fn rc_search_finds_the_shared_head(shape in meeting_shape(0..4i32, 8, 8)) {
            let (a, b, shared) = shape.build_shared();
            let meet = a.intersection(&b);
            prop_assert!(meet.is_some());
            prop_assert!(Rc::ptr_eq(meet.as_ref().unwrap(), shared.head().unwrap()));
        }

        // Small value alphabets make equal payloads on distinct nodes common.
        #[test]
        fn equal_values_never_match(values in vec(0..2u8, 0..10)) {
            GhostToken::new(|mut token| {
                let lists = ConvergingLists::new();
                let a = lists.chain(&mut token, values.iter().copied(), None);
                let b = lists.chain(&mut token, values.iter().copied(), None);
                assert_eq!(lists.intersection(&token, a, b), None);
            });
        }
    }
}
