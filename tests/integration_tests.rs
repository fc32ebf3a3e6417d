//! Integration tests - level loading through revealed bubbles

use std::cell::Cell;
use std::rc::Rc;

use bubble_shooter::core::{
    BinaryBubbleBoard, Bubble, BubbleBehavior, BubbleGenerator, BubbleModelRegistry,
    HiddenBubbleContainer, InitContext, LevelProperties, NoTextures, Properties,
};
use bubble_shooter::preview::{preview_level, preview_registry};
use bubble_shooter::types::{BoardColumnStyle, BubbleColor, HiddenBubbleContainerType};
use serde_json::json;

#[test]
fn test_single_row_board_reveals_then_empties() {
    let mut registry = BubbleModelRegistry::new(Some("plain".to_string()));
    registry.create_model("plain");

    let mut board = BinaryBubbleBoard::new(BoardColumnStyle::Min);
    board.insert(0, 0, "plain", BubbleColor::RED);
    board.insert(0, 1, "plain", BubbleColor::RED);

    let mut level = LevelProperties::new();
    level.set_seed(1);
    level.set_hidden_container_type(HiddenBubbleContainerType::CONTINUOUS);
    level.push_board(board);

    let mut generator = BubbleGenerator::new();
    generator.setup(&mut level);
    let mut hidden = HiddenBubbleContainer::new();
    hidden.load_level(&mut level);

    let row = hidden
        .generate_row(&mut generator, &registry, &NoTextures)
        .unwrap();
    assert_eq!(row.bubble_count(), 2);
    for bubble in row.bubbles() {
        let bubble = generator.heap().get(bubble).unwrap();
        assert_eq!(bubble.model_name(), "plain");
        assert_eq!(bubble.color(), BubbleColor::RED);
    }

    // Nothing left: no row means zero bubbles
    let next = hidden.generate_row(&mut generator, &registry, &NoTextures);
    assert_eq!(next.map_or(0, |row| row.bubble_count()), 0);
    assert!(hidden.is_empty());
}

#[test]
fn test_unknown_model_uses_default() {
    let mut registry = BubbleModelRegistry::new(Some("plain".to_string()));
    registry.create_model("plain");

    let mut level = LevelProperties::new();
    level.set_seed(8);
    let mut board = BinaryBubbleBoard::new(BoardColumnStyle::Min);
    board.insert(0, 0, "ghost", BubbleColor::GREEN);
    level.push_board(board);

    let lines = preview_level(&mut level, &registry, 1);
    assert_eq!(lines, vec!["board  0 row  0 | green . . . . . . ."]);
}

#[test]
fn test_level_from_json() {
    let level = json!({
        "seed": 31337,
        "columns": 9,
        "hidden_type": HiddenBubbleContainerType::DISCRETE.bits(),
        "enabled_colors": 0b0000_0011,
        "arrow_models": { "scores": { "plain": 10, "bomb": 1 } },
        "boards": [
            {
                "columns": 9,
                "rows": [
                    [
                        { "model": "plain", "color": "random" },
                        { "model": "plain", "color": "gray" }
                    ]
                ]
            }
        ]
    });
    let mut level = LevelProperties::from_json(&level.to_string()).unwrap();

    assert_eq!(level.seed(), 31337);
    assert_eq!(level.column_style(), BoardColumnStyle::VerySmall);
    assert!(level.hidden_container_type().is_discrete());
    assert_eq!(level.arrow_model_selector().total_score(), 11);
    assert_eq!(level.board(0).unwrap().valid_bubble_count(), 2);

    let registry = preview_registry(&Properties::new());
    let mut generator = BubbleGenerator::new();
    generator.setup(&mut level);
    let mut hidden = HiddenBubbleContainer::new();
    hidden.load_level(&mut level);

    // Discrete: the designed row 0 comes out last
    let rows = hidden.generate(&mut generator, &registry, &NoTextures);
    assert_eq!(rows.len(), 14);
    let last = rows.last().unwrap();
    assert_eq!(last.row_id, 0);
    assert_eq!(last.cells.len(), 9);

    let colors: Vec<BubbleColor> = last
        .bubbles()
        .map(|b| generator.heap().get(b).unwrap().color())
        .collect();
    assert!(level.is_color_enabled(colors[0]));
    assert_eq!(colors[1], BubbleColor::GRAY);
}

#[test]
fn test_level_json_survives_round_trip() {
    let mut level = LevelProperties::new();
    level.set_seed(5);
    level.set_column_style(BoardColumnStyle::Max);
    level.set_board_count(2);
    level
        .board_mut(1)
        .unwrap()
        .insert(2, 15, "plain", BubbleColor::BLACK);

    let back = LevelProperties::from_json(&level.to_json().unwrap()).unwrap();
    assert_eq!(back.boards(), level.boards());
    assert_eq!(back.column_style(), BoardColumnStyle::Max);
}

/// Counts hook calls and stamps a local value on init
struct Counting {
    inits: Rc<Cell<u32>>,
    explosions: Rc<Cell<u32>>,
}

impl BubbleBehavior for Counting {
    fn init(&self, bubble: &mut Bubble, ctx: &InitContext<'_>) {
        self.inits.set(self.inits.get() + 1);
        let _ = bubble.set_local_int(0, ctx.color.code() as i32);
    }

    fn on_explode(&self, _bubble: &mut Bubble) {
        self.explosions.set(self.explosions.get() + 1);
    }
}

#[test]
fn test_model_hooks_run_for_revealed_bubbles() {
    let inits = Rc::new(Cell::new(0));
    let explosions = Rc::new(Cell::new(0));

    let mut registry = BubbleModelRegistry::new(Some("plain".to_string()));
    registry.create_model("plain");
    let bomb = registry.create_model("bomb").unwrap();
    bomb.local_ints = 1;
    bomb.set_behavior(Counting {
        inits: Rc::clone(&inits),
        explosions: Rc::clone(&explosions),
    });

    let mut level = LevelProperties::new();
    level.set_seed(3);
    let mut board = BinaryBubbleBoard::new(BoardColumnStyle::Min);
    board.insert(0, 0, "bomb", BubbleColor::ORANGE);
    board.insert(0, 1, "plain", BubbleColor::ORANGE);
    board.insert(0, 2, "bomb", BubbleColor::BLUE);
    level.push_board(board);

    let mut generator = BubbleGenerator::new();
    generator.setup(&mut level);
    let mut hidden = HiddenBubbleContainer::new();
    hidden.load_level(&mut level);

    let row = hidden
        .generate_row(&mut generator, &registry, &NoTextures)
        .unwrap();
    assert_eq!(inits.get(), 2);

    let first = row.cells[0].unwrap();
    let bubble = generator.heap().get(first).unwrap();
    assert_eq!(bubble.local_int(0), Some(BubbleColor::ORANGE.code() as i32));

    for bubble in row.bubbles() {
        assert!(generator.heap_mut().explode(bubble));
    }
    assert_eq!(explosions.get(), 2);
    assert!(generator.heap().iter().all(|(_, b)| b.has_exploded()));
}
