//! Property tests for nearest-item resolution and placement decisions.
//!
//! Each case builds a single list of stacked items with random heights and
//! checks the resolver against a brute-force scan of the same geometry.

use dropline_core::event::DragEvent;
use dropline_layout::{
    DropPosition, ItemTree, NodeId, Rect, decide_placement, move_between, move_within,
    resolve_nearest,
};
use proptest::prelude::*;

struct Board {
    tree: ItemTree,
    list: NodeId,
    items: Vec<NodeId>,
    ids: Vec<String>,
}

fn build_board(heights: &[u16]) -> Board {
    let mut tree = ItemTree::new();
    let list = tree
        .add_container(tree.root(), Rect::new(0, 0, 40, 400))
        .expect("list");
    tree.add_node(list, Rect::new(0, 0, 40, 1)).expect("header");
    let mut items = Vec::with_capacity(heights.len());
    let mut ids = Vec::with_capacity(heights.len());
    let mut top = 1_u16;
    for (i, height) in heights.iter().enumerate() {
        let id = format!("item-{i}");
        items.push(
            tree.add_item(list, id.as_str(), Rect::new(0, top, 40, *height))
                .expect("item"),
        );
        ids.push(id);
        top += height;
    }
    Board {
        tree,
        list,
        items,
        ids,
    }
}

/// First index with the smallest doubled-unit center distance.
fn brute_force_closest(board: &Board, pointer_y: u16) -> usize {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (index, item) in board.items.iter().enumerate() {
        let rect = board.tree.node(*item).expect("node").rect;
        let center2 = 2 * u32::from(rect.y) + u32::from(rect.height);
        let distance = (2 * u32::from(pointer_y)).abs_diff(center2);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

fn item_heights() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(1u16..=20, 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn resolution_is_deterministic(heights in item_heights(), pointer_y in 0u16..300) {
        let board = build_board(&heights);
        let event = DragEvent::moved(pointer_y, Some(board.list));
        let first = decide_placement(&board.tree, &board.tree, &event, "item-0");
        let second = decide_placement(&board.tree, &board.tree, &event, "item-0");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn single_item_always_wins(height in 1u16..=40, pointer_y in 0u16..200) {
        let board = build_board(&[height]);
        let event = DragEvent::moved(pointer_y, Some(board.list));
        let placement = decide_placement(&board.tree, &board.tree, &event, "outsider")
            .expect("placement");
        prop_assert_eq!(placement.target, board.items[0]);
        let expected_before = 2 * u32::from(pointer_y) < 2 + u32::from(height);
        prop_assert_eq!(placement.place_before, expected_before);
        prop_assert_eq!(placement.insertion_index, usize::from(!expected_before));
    }

    #[test]
    fn before_flag_flips_once_across_midpoint(height in 1u16..=40, top in 0u16..100) {
        let mut tree = ItemTree::new();
        let list = tree
            .add_container(tree.root(), Rect::new(0, 0, 10, 300))
            .expect("list");
        let item = tree.add_item(list, "only", Rect::new(0, top, 10, height)).expect("item");

        let flags: Vec<bool> = (0u16..=200)
            .map(|y| {
                let event = DragEvent::moved(y, Some(item));
                decide_placement(&tree, &tree, &event, "other")
                    .expect("placement")
                    .place_before
            })
            .collect();
        let flips = flags.windows(2).filter(|pair| pair[0] != pair[1]).count();
        prop_assert_eq!(flips, 1);
        prop_assert!(flags[0]);
        prop_assert!(!flags[200]);
    }

    #[test]
    fn same_list_correction(
        heights in item_heights(),
        pointer_y in 0u16..300,
        source_seed in any::<usize>(),
    ) {
        let board = build_board(&heights);
        let source = source_seed % board.items.len();
        let raw = brute_force_closest(&board, pointer_y);

        let nearest = resolve_nearest(
            &board.tree,
            &board.tree,
            pointer_y,
            Some(board.list),
            &board.ids[source],
        )
        .expect("nearest");

        prop_assert_eq!(nearest.node, board.items[raw]);
        let expected = if source < raw { raw - 1 } else { raw };
        prop_assert_eq!(nearest.index, expected);
        prop_assert_eq!(nearest.item_count, board.items.len() - 1);
    }

    #[test]
    fn outsider_gets_raw_index(heights in item_heights(), pointer_y in 0u16..300) {
        let board = build_board(&heights);
        let raw = brute_force_closest(&board, pointer_y);
        let nearest = resolve_nearest(&board.tree, &board.tree, pointer_y, Some(board.list), "outsider")
            .expect("nearest");
        prop_assert_eq!(nearest.index, raw);
    }

    #[test]
    fn insertion_index_stays_in_post_removal_range(
        heights in item_heights(),
        pointer_y in 0u16..300,
        source_seed in any::<usize>(),
    ) {
        let board = build_board(&heights);
        let source = source_seed % board.items.len();
        let event = DragEvent::moved(pointer_y, Some(board.list));
        let placement = decide_placement(&board.tree, &board.tree, &event, &board.ids[source])
            .expect("placement");
        prop_assert!(placement.insertion_index < board.items.len());
    }

    #[test]
    fn origin_outside_any_list_is_absent(heights in item_heights(), pointer_y in 0u16..300) {
        let mut board = build_board(&heights);
        let root = board.tree.root();
        let stray = board.tree.add_node(root, Rect::new(50, 0, 5, 5)).expect("stray");
        for origin in [root, stray] {
            let event = DragEvent::moved(pointer_y, Some(origin));
            prop_assert_eq!(decide_placement(&board.tree, &board.tree, &event, "item-0"), None);
        }
    }

    #[test]
    fn list_without_items_is_absent(decorations in 0usize..5, pointer_y in 0u16..300) {
        let mut tree = ItemTree::new();
        let list = tree
            .add_container(tree.root(), Rect::new(0, 0, 10, 50))
            .expect("list");
        for row in 0..decorations {
            tree.add_node(list, Rect::new(0, row as u16, 10, 1)).expect("decoration");
        }
        let event = DragEvent::moved(pointer_y, Some(list));
        prop_assert_eq!(decide_placement(&tree, &tree, &event, "A"), None);
    }

    #[test]
    fn move_within_preserves_members(
        len in 1usize..16,
        pick in any::<usize>(),
        raw_position in -3i64..20,
    ) {
        let mut order: Vec<usize> = (0..len).collect();
        let item = pick % len;
        let position = DropPosition::from_signed(raw_position);
        let index = move_within(&mut order, &item, position).expect("move");

        prop_assert_eq!(order[index], item);
        prop_assert_eq!(index, position.resolve(len - 1));
        let mut sorted = order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..len).collect::<Vec<_>>());
    }

    #[test]
    fn move_between_preserves_members(
        from_len in 1usize..10,
        to_len in 0usize..10,
        pick in any::<usize>(),
        raw_position in -3i64..20,
    ) {
        let mut from: Vec<usize> = (0..from_len).collect();
        let mut to: Vec<usize> = (100..100 + to_len).collect();
        let item = pick % from_len;
        let position = DropPosition::from_signed(raw_position);
        let index = move_between(&mut from, &mut to, &item, position).expect("move");

        prop_assert_eq!(to[index], item);
        prop_assert_eq!(index, position.resolve(to_len));
        prop_assert_eq!(from.len() + to.len(), from_len + to_len);
        prop_assert!(!from.contains(&item));
    }
}
