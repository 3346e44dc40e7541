//! Property-based tests for path expressions and resolution.

use super::{Anchor, PathExpression, PathExpressionParser};
use crate::tree::Tree;
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]([A-Za-z0-9_ -]{0,6}[A-Za-z0-9_-])?"
}

fn anchor_strategy() -> impl Strategy<Value = Anchor> {
    prop_oneof![
        Just(Anchor::None),
        Just(Anchor::Root),
        Just(Anchor::Current),
        Just(Anchor::Parent),
    ]
}

fn expression_strategy() -> impl Strategy<Value = PathExpression> {
    (anchor_strategy(), prop::collection::vec(segment_strategy(), 0..5))
        .prop_filter("empty relative expression", |(anchor, segments)| {
            *anchor != Anchor::None || !segments.is_empty()
        })
        .prop_map(|(anchor, segments)| {
            PathExpression::new(anchor, segments).expect("generated segments are valid")
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn canonical_path_round_trips(expr in expression_strategy()) {
        let parser = PathExpressionParser::new();
        let reparsed = parser.parse(expr.canonical_path()).unwrap().unwrap();
        prop_assert_eq!(reparsed.anchor(), expr.anchor());
        prop_assert_eq!(reparsed.segments(), expr.segments());
        prop_assert_eq!(reparsed.canonical_path(), expr.canonical_path());
    }

    #[test]
    fn padded_separators_parse_to_same_segments(
        segments in prop::collection::vec(segment_strategy(), 1..5),
        padding in prop::collection::vec("[ /\\\\]{0,3}", 5),
    ) {
        let mut text = String::from("/");
        for (index, segment) in segments.iter().enumerate() {
            text.push_str(&padding[index]);
            text.push_str(segment);
            text.push(' ');
            text.push('/');
        }

        let expr = PathExpressionParser::new().parse(&text).unwrap().unwrap();
        prop_assert_eq!(expr.anchor(), Anchor::Root);
        prop_assert_eq!(expr.segments(), segments.as_slice());
    }

    #[test]
    fn parsed_segments_are_never_empty(text in "[a-c ./\\\\]{0,24}") {
        if let Ok(Some(expr)) = PathExpressionParser::new().parse(&text) {
            for segment in expr.segments() {
                prop_assert!(!segment.is_empty());
                prop_assert_eq!(segment.trim(), segment.as_str());
            }
        }
    }

    #[test]
    fn try_parse_agrees_with_parse(text in "[a-c ./*@\\[]{0,16}") {
        let parser = PathExpressionParser::new();
        prop_assert_eq!(parser.try_parse(&text), parser.parse(&text).ok().flatten());
    }

    #[test]
    fn full_path_resolves_to_node(
        names in prop::collection::vec((0usize..8, segment_strategy()), 1..24),
    ) {
        let mut tree = Tree::new(());
        let mut ids = vec![tree.root()];
        for (parent_pick, name) in names {
            let parent = ids[parent_pick % ids.len()];
            if let Ok(id) = tree.insert(parent, &name, ()) {
                ids.push(id);
            }
        }

        for &id in &ids {
            let node = tree.get(id).unwrap();
            prop_assert_eq!(tree.find(tree.root(), node.full_path()).unwrap(), Some(id));
            prop_assert_eq!(
                tree.find(tree.root(), &node.full_path().to_lowercase()).unwrap(),
                Some(id)
            );
            prop_assert_eq!(tree.find(id, "").unwrap(), Some(id));
        }
    }
}
