//! Hidden container tests - staging and revealing boards row by row

use bubble_shooter::core::{
    BinaryBubbleBoard, BubbleGenerator, BubbleModelRegistry, HiddenBubbleContainer,
    LevelProperties, NoTextures,
};
use bubble_shooter::types::{BoardColumnStyle, BubbleColor, HiddenBubbleContainerType};

fn registry() -> BubbleModelRegistry {
    let mut registry = BubbleModelRegistry::new(Some("plain".to_string()));
    registry.create_model("plain");
    registry
}

/// Board with `count` red bubbles on `row`
fn board_with(row: usize, count: usize) -> BinaryBubbleBoard {
    let mut board = BinaryBubbleBoard::new(BoardColumnStyle::Min);
    for column in 0..count {
        board.insert(row, column, "plain", BubbleColor::RED);
    }
    board
}

fn level(kind: HiddenBubbleContainerType, boards: Vec<BinaryBubbleBoard>) -> LevelProperties {
    let mut level = LevelProperties::new();
    level.set_seed(4242);
    level.set_hidden_container_type(kind);
    for board in boards {
        level.push_board(board);
    }
    level
}

fn load(level: &mut LevelProperties) -> (BubbleGenerator, HiddenBubbleContainer) {
    let mut generator = BubbleGenerator::new();
    generator.setup(level);
    let mut hidden = HiddenBubbleContainer::new();
    hidden.load_level(level);
    (generator, hidden)
}

#[test]
fn test_discrete_reveals_bottom_row_first() {
    let registry = registry();
    let mut level = level(
        HiddenBubbleContainerType::DISCRETE,
        vec![board_with(13, 3)],
    );
    let (mut generator, mut hidden) = load(&mut level);

    assert_eq!(hidden.row_count(), 14);
    assert_eq!(hidden.valid_bubble_count(), 3);

    let row = hidden
        .generate_row(&mut generator, &registry, &NoTextures)
        .unwrap();
    assert_eq!(row.row_id, 13);
    assert_eq!(row.cells.len(), 8);
    assert_eq!(row.bubble_count(), 3);

    // The rest are padding rows of empty cells
    for expected in (0..13).rev() {
        let row = hidden
            .generate_row(&mut generator, &registry, &NoTextures)
            .unwrap();
        assert_eq!(row.row_id, expected);
        assert_eq!(row.bubble_count(), 0);
    }
    assert!(hidden.is_empty());
    assert!(hidden
        .generate_row(&mut generator, &registry, &NoTextures)
        .is_none());
}

#[test]
fn test_rows_padded_to_level_width() {
    let registry = registry();
    let mut level = level(HiddenBubbleContainerType::DISCRETE, vec![board_with(0, 8)]);
    level.set_column_style(BoardColumnStyle::Large);
    let (mut generator, mut hidden) = load(&mut level);

    let row = hidden
        .generate_row(&mut generator, &registry, &NoTextures)
        .unwrap();
    assert_eq!(row.cells.len(), 14);
    assert_eq!(hidden.column_style(), BoardColumnStyle::Large);
}

#[test]
fn test_valid_count_drops_with_each_row() {
    let registry = registry();
    let mut board = BinaryBubbleBoard::new(BoardColumnStyle::Min);
    for row in 0..4 {
        for column in 0..=row {
            board.insert(row, column, "plain", BubbleColor::RANDOM);
        }
    }
    let mut level = level(HiddenBubbleContainerType::CONTINUOUS, vec![board]);
    let (mut generator, mut hidden) = load(&mut level);

    // Continuous trims the empty rows below row 3
    assert_eq!(hidden.row_count(), 4);
    let mut expected = hidden.valid_bubble_count();
    assert_eq!(expected, 1 + 2 + 3 + 4);

    while let Some(row) = hidden.generate_row(&mut generator, &registry, &NoTextures) {
        expected -= row.bubble_count();
        assert_eq!(hidden.valid_bubble_count(), expected);
    }
    assert_eq!(expected, 0);
    assert_eq!(generator.heap().len(), 10);
}

#[test]
fn test_continuous_joins_boards() {
    let registry = registry();
    let mut level = level(
        HiddenBubbleContainerType::CONTINUOUS,
        vec![board_with(0, 1), board_with(0, 2)],
    );
    let (mut generator, mut hidden) = load(&mut level);

    // Both boards trimmed to their single filled row
    assert_eq!(hidden.row_count(), 2);
    assert_eq!(hidden.board_count(), 2);

    let first = hidden
        .generate_row(&mut generator, &registry, &NoTextures)
        .unwrap();
    assert_eq!((first.board_id, first.row_id), (0, 0));
    assert_eq!(first.bubble_count(), 1);

    // Board 1 content follows directly
    let next = hidden
        .generate_row(&mut generator, &registry, &NoTextures)
        .unwrap();
    assert_eq!((next.board_id, next.row_id), (1, 0));
    assert_eq!(next.bubble_count(), 2);
    assert!(hidden.is_empty());
}

#[test]
fn test_continuous_three_boards_have_no_empty_rows_between() {
    let registry = registry();
    let boards: Vec<_> = (0..3)
        .map(|_| {
            let mut board = board_with(0, 8);
            for column in 0..8 {
                board.insert(1, column, "plain", BubbleColor::GREEN);
            }
            board
        })
        .collect();
    let mut level = level(HiddenBubbleContainerType::CONTINUOUS, boards);
    let (mut generator, mut hidden) = load(&mut level);

    let mut revealed = Vec::new();
    while let Some(row) = hidden.generate_row(&mut generator, &registry, &NoTextures) {
        assert_eq!(row.bubble_count(), 8, "empty row between boards");
        revealed.push((row.board_id, row.row_id));
    }
    assert_eq!(
        revealed,
        vec![(0, 1), (0, 0), (1, 1), (1, 0), (2, 1), (2, 0)]
    );
}

#[test]
fn test_endless_generate_twice() {
    let registry = registry();
    let mut level = level(
        HiddenBubbleContainerType::ENDLESS_CONTINUOUS,
        vec![board_with(0, 3)],
    );
    let (mut generator, mut hidden) = load(&mut level);

    let first = hidden.generate(&mut generator, &registry, &NoTextures);
    let second = hidden.generate(&mut generator, &registry, &NoTextures);
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].bubble_count(), 3);
    assert!(!hidden.is_empty());
}

#[test]
fn test_random_keeps_boards_whole() {
    let registry = registry();
    let boards: Vec<_> = (1..=6).map(|n| board_with(13, n)).collect();
    let mut level = level(HiddenBubbleContainerType::RANDOM_DISCRETE, boards);
    let (mut generator, mut hidden) = load(&mut level);

    let rows = hidden.generate(&mut generator, &registry, &NoTextures);
    assert_eq!(rows.len(), 6 * 14);

    let mut seen = Vec::new();
    for board in rows.chunks(14) {
        let id = board[0].board_id;
        assert!(board.iter().all(|row| row.board_id == id));
        assert_eq!(board[0].bubble_count(), id as usize + 1);
        seen.push(id);
    }
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_random_order_is_reproducible() {
    let registry = registry();
    let order = |seed: u32| {
        let boards: Vec<_> = (1..=8).map(|n| board_with(0, n)).collect();
        let mut level = level(HiddenBubbleContainerType::RANDOM_DISCRETE, boards);
        level.set_seed(seed);
        let (mut generator, mut hidden) = load(&mut level);
        let mut ids = Vec::new();
        while let Some(row) = hidden.generate_row(&mut generator, &registry, &NoTextures) {
            if ids.last() != Some(&row.board_id) {
                ids.push(row.board_id);
            }
        }
        ids
    };

    assert_eq!(order(99), order(99));
    assert_eq!(order(99).len(), 8);
}

#[test]
fn test_endless_never_runs_dry() {
    let registry = registry();
    let mut level = level(
        HiddenBubbleContainerType::ENDLESS_CONTINUOUS,
        vec![board_with(0, 2), board_with(0, 3)],
    );
    let (mut generator, mut hidden) = load(&mut level);

    let cycle = hidden.row_count();
    let mut bubbles = 0;
    for _ in 0..cycle * 3 {
        let row = hidden
            .generate_row(&mut generator, &registry, &NoTextures)
            .unwrap();
        bubbles += row.bubble_count();
        assert!(!hidden.is_empty());
    }
    assert_eq!(bubbles, 3 * (2 + 3));
}
