//! Height properties across all traversal strategies

use bstheight::{height, height_checked, height_from, height_queue, height_stack, Node, Strategy, TreeError};
use rstest::{fixture, rstest};

const STRATEGIES: [Strategy; 3] = [Strategy::Recursive, Strategy::Stack, Strategy::Queue];

#[ctor::ctor]
fn init() {
    bstheight::util::testing::init_test_setup();
}

//      A
//     / \
//    B   C
//   /
//  D
#[fixture]
fn scenario() -> Node<char> {
    Node::leaf('A')
        .with_left(Node::leaf('B').with_left(Node::leaf('D')))
        .with_right(Node::leaf('C'))
}

// ============================================================
// Base cases
// ============================================================

#[test]
fn given_absent_root_when_height_then_minus_one() {
    for strategy in STRATEGIES {
        assert_eq!(strategy.height::<char>(None), -1, "{}", strategy);
    }
}

#[test]
fn given_single_node_when_height_then_zero() {
    let node = Node::leaf(1);
    for strategy in STRATEGIES {
        assert_eq!(strategy.height(Some(&node)), 0, "{}", strategy);
    }
}

// ============================================================
// Shapes
// ============================================================

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(5)]
#[case(10)]
fn given_perfect_tree_when_height_then_leaf_depth(#[case] depth: usize) {
    let tree = Node::perfect(depth, ());
    assert_eq!(tree.len(), (1 << (depth + 1)) - 1);
    for strategy in STRATEGIES {
        assert_eq!(strategy.height(Some(&tree)), depth as i64, "{}", strategy);
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(7)]
#[case(100)]
fn given_chain_of_n_nodes_when_height_then_n_minus_one(#[case] n: usize) {
    let left = Node::chain_left(0..n).unwrap();
    let right = Node::chain_right(0..n).unwrap();
    for strategy in STRATEGIES {
        assert_eq!(strategy.height(Some(&left)), n as i64 - 1, "{}", strategy);
        assert_eq!(strategy.height(Some(&right)), n as i64 - 1, "{}", strategy);
    }
}

#[test]
fn given_very_deep_chain_when_iterative_height_then_no_stack_exhaustion() {
    let chain = Node::chain_left(0..500_000).unwrap();
    assert_eq!(height_stack(Some(&chain)), 499_999);
    assert_eq!(height_queue(Some(&chain)), 499_999);
}

#[rstest]
fn given_scenario_when_height_of_each_node_then_matches_expected(scenario: Node<char>) {
    let b = scenario.left().unwrap();
    let c = scenario.right().unwrap();
    let d = b.left().unwrap();

    assert_eq!(height(Some(d)), 0);
    assert_eq!(height(Some(b)), 1);
    assert_eq!(height(Some(c)), 0);
    assert_eq!(height(Some(&scenario)), 2);
}

// ============================================================
// Properties
// ============================================================

#[rstest]
fn given_same_tree_when_height_repeated_then_same_result(scenario: Node<char>) {
    let first = height(Some(&scenario));
    for _ in 0..10 {
        assert_eq!(height(Some(&scenario)), first);
    }
    assert_eq!(scenario.len(), 4);
}

#[rstest]
fn given_mirrored_tree_when_height_then_unchanged(scenario: Node<char>) {
    let original = scenario.clone();
    let mut mirrored = scenario;
    mirrored.mirror();
    assert_ne!(original, mirrored);
    for strategy in STRATEGIES {
        assert_eq!(
            strategy.height(Some(&original)),
            strategy.height(Some(&mirrored)),
            "{}",
            strategy
        );
    }
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(-4)]
fn given_start_depth_when_height_from_then_shifted(scenario: Node<char>, #[case] start: i64) {
    assert_eq!(height_from(Some(&scenario), start), height(Some(&scenario)) + start);
    assert_eq!(height_from::<char>(None, start), start - 1);
}

#[test]
fn given_lopsided_tree_when_height_then_strategies_agree() {
    // 1 -> right 2 -> left 3 -> right 4, plus a short left arm on the root
    let tree = Node::leaf(1)
        .with_left(Node::leaf(5))
        .with_right(Node::leaf(2).with_left(Node::leaf(3).with_right(Node::leaf(4))));
    for strategy in STRATEGIES {
        assert_eq!(strategy.height(Some(&tree)), 3, "{}", strategy);
    }
}

// ============================================================
// Depth limit
// ============================================================

#[rstest]
#[case(5, 5, true)]
#[case(5, 6, true)]
#[case(5, 4, false)]
#[case(1, 1, true)]
#[case(1, 0, false)]
fn given_depth_limit_when_height_checked_then_fails_only_above_limit(
    #[case] nodes: usize,
    #[case] limit: usize,
    #[case] ok: bool,
) {
    let chain = Node::chain_left(0..nodes).unwrap();
    match height_checked(Some(&chain), limit) {
        Ok(h) => {
            assert!(ok);
            assert_eq!(h, nodes as i64 - 1);
        }
        Err(TreeError::DepthLimitExceeded { limit: l }) => {
            assert!(!ok);
            assert_eq!(l, limit);
        }
        Err(e) => panic!("unexpected error: {}", e),
    }
}
