//! Generator tests - seeded selection of models and colors

use bubble_shooter::core::{
    BubbleGenerator, BubbleIdentifier, BubbleModelRegistry, LevelProperties, NoTextures,
    RandomModelSelector, Rng,
};
use bubble_shooter::types::{BubbleColor, BubbleColorType, ColorMask};

fn registry() -> BubbleModelRegistry {
    let mut registry = BubbleModelRegistry::new(Some("plain".to_string()));
    registry.create_model("plain");
    registry.create_model("bomb").unwrap().color_type = BubbleColorType::Colorless;
    registry.create_model("rainbow").unwrap().color_type = BubbleColorType::MultiColor;
    registry
}

fn level(seed: u32) -> LevelProperties {
    let mut level = LevelProperties::new();
    level.set_seed(seed);
    level.set_enabled_colors(
        ColorMask::EMPTY + BubbleColor::RED + BubbleColor::YELLOW + BubbleColor::BLUE,
    );
    let arrow = level.arrow_model_selector_mut();
    arrow.set_model_score("plain", 50);
    arrow.set_model_score("rainbow", 5);
    let board = level.board_model_selector_mut();
    board.set_model_score("plain", 30);
    board.set_model_score("bomb", 10);
    level
}

/// Model names and colors of a fixed sequence of calls
fn run(generator: &mut BubbleGenerator, registry: &BubbleModelRegistry) -> Vec<(String, BubbleColor)> {
    let random_id = BubbleIdentifier::new("plain", BubbleColor::RANDOM);
    let mut out = Vec::new();
    for i in 0..60 {
        let bubble = match i % 3 {
            0 => generator.generate_random(true, registry, &NoTextures),
            1 => generator.generate_random(false, registry, &NoTextures),
            _ => generator.generate(&random_id, registry, &NoTextures),
        }
        .unwrap();
        let bubble = generator.heap().get(bubble).unwrap();
        out.push((bubble.model_name().to_string(), bubble.color()));
    }
    out
}

#[test]
fn test_same_seed_same_sequence() {
    let registry = registry();

    let mut level_a = level(2024);
    let mut a = BubbleGenerator::new();
    a.setup(&mut level_a);

    let mut level_b = level(2024);
    let mut b = BubbleGenerator::new();
    b.setup(&mut level_b);

    assert_eq!(run(&mut a, &registry), run(&mut b, &registry));
}

#[test]
fn test_different_seed_different_sequence() {
    let registry = registry();

    let mut level_a = level(1);
    let mut a = BubbleGenerator::new();
    a.setup(&mut level_a);

    let mut level_b = level(2);
    let mut b = BubbleGenerator::new();
    b.setup(&mut level_b);

    assert_ne!(run(&mut a, &registry), run(&mut b, &registry));
}

#[test]
fn test_generated_content_respects_level() {
    let registry = registry();
    let mut level = level(77);
    let mut generator = BubbleGenerator::new();
    generator.setup(&mut level);

    for (model, color) in run(&mut generator, &registry) {
        assert!(["plain", "bomb", "rainbow"].contains(&model.as_str()));
        assert!(level.is_color_enabled(color), "{} not enabled", color);
    }
}

#[test]
fn test_weighted_pick_bands() {
    let mut selector = RandomModelSelector::new();
    selector.set_model_score("A", 10);
    selector.set_model_score("B", 20);

    for v in 0..10 {
        assert_eq!(selector.pick(v), Some("A"));
    }
    for v in 10..30 {
        assert_eq!(selector.pick(v), Some("B"));
    }
}

#[test]
fn test_zero_total_uses_default_model() {
    let registry = registry();
    let selector = RandomModelSelector::new();
    let mut rng = Rng::new(3);
    for _ in 0..20 {
        let model = selector.select_model(&mut rng, &registry).unwrap();
        assert_eq!(model.name(), "plain");
    }
}

#[test]
fn test_color_match_between_generated_bubbles() {
    let registry = registry();
    let mut generator = BubbleGenerator::new();

    let red = BubbleIdentifier::new("plain", BubbleColor::RED);
    let blue = BubbleIdentifier::new("plain", BubbleColor::BLUE);
    let bomb = BubbleIdentifier::new("bomb", BubbleColor::RED);
    let rainbow = BubbleIdentifier::new("rainbow", BubbleColor::GREEN);

    let [red, red2, blue, bomb, rainbow] = [&red, &red, &blue, &bomb, &rainbow]
        .map(|id| generator.generate(id, &registry, &NoTextures).unwrap());
    let heap = generator.heap();
    let get = move |r| heap.get(r).unwrap();

    assert!(get(red).color_match(get(red2)));
    assert!(!get(red).color_match(get(blue)));
    assert!(!get(red).color_match(get(bomb)));
    assert!(get(red).color_match(get(rainbow)));
    assert!(get(rainbow).color_match(get(blue)));
    assert!(!get(rainbow).color_match(get(bomb)));
}
