//! Weighted model and color selection
//!
//! Both selectors are deterministic for a given stream: models are walked in
//! name order and colors in declaration order, so the same draws always map
//! to the same picks.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::model::{BubbleModel, BubbleModelRegistry};
use crate::rng::Rng;
use crate::types::{BubbleColor, ColorMask};

/// Conventional upper bound for a model score (not enforced)
pub const MAX_MODEL_SCORE: u16 = 1000;

/// Weighted lottery over model names
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomModelSelector {
    scores: BTreeMap<String, u16>,
    #[serde(skip)]
    total: Cell<Option<u32>>,
}

impl RandomModelSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a model's weight; zero removes it
    pub fn set_model_score(&mut self, model: &str, score: u16) {
        if score == 0 {
            let _ = self.scores.remove(model);
        } else {
            let _ = self.scores.insert(model.to_string(), score);
        }
        self.total.set(None);
    }

    pub fn model_score(&self, model: &str) -> u16 {
        self.scores.get(model).copied().unwrap_or(0)
    }

    pub fn total_score(&self) -> u32 {
        if let Some(total) = self.total.get() {
            return total;
        }
        let total = self.scores.values().map(|&s| s as u32).sum();
        self.total.set(Some(total));
        total
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Entries in selection order
    pub fn scores(&self) -> impl Iterator<Item = (&str, u16)> {
        self.scores.iter().map(|(name, &score)| (name.as_str(), score))
    }

    pub fn clear(&mut self) {
        self.scores.clear();
        self.total.set(None);
    }

    /// Model whose band contains `draw`, walking names in order
    ///
    /// `None` when `draw` is not below the total score.
    pub fn pick(&self, draw: u32) -> Option<&str> {
        let mut remaining = draw;
        for (name, &score) in &self.scores {
            let score = score as u32;
            if remaining < score {
                return Some(name);
            }
            remaining -= score;
        }
        None
    }

    /// Draw a model from `rng`
    ///
    /// With no weights the registry's default model is returned and the
    /// stream is left untouched.
    pub fn select_model(
        &self,
        rng: &mut Rng,
        registry: &BubbleModelRegistry,
    ) -> Option<Rc<BubbleModel>> {
        let total = self.total_score();
        if total == 0 {
            return registry.default_model();
        }
        match self.pick(rng.below(total)) {
            Some(name) => registry.get_model(name),
            None => registry.default_model(),
        }
    }
}

impl PartialEq for RandomModelSelector {
    fn eq(&self, other: &Self) -> bool {
        self.scores == other.scores
    }
}

/// Uniform pick among the enabled colors
#[derive(Debug, Clone)]
pub struct BubbleColorSelector {
    rng: Rng,
    colors: ColorMask,
    map: Vec<BubbleColor>,
    dirty: bool,
}

impl BubbleColorSelector {
    pub fn new(rng: Rng) -> Self {
        Self {
            rng,
            colors: ColorMask::EMPTY,
            map: Vec::new(),
            dirty: true,
        }
    }

    pub fn rng(&self) -> &Rng {
        &self.rng
    }

    pub fn set_rng(&mut self, rng: Rng) {
        self.rng = rng;
    }

    pub fn available_colors(&self) -> ColorMask {
        self.colors
    }

    pub fn set_available_colors(&mut self, colors: ColorMask) {
        if self.colors != colors {
            self.colors = colors;
            self.dirty = true;
        }
    }

    pub fn is_available_color(&self, color: BubbleColor) -> bool {
        self.colors.contains(color)
    }

    pub fn set_available_color(&mut self, color: BubbleColor, enabled: bool) {
        let colors = if enabled {
            self.colors + color
        } else {
            self.colors - color
        };
        self.set_available_colors(colors);
    }

    /// Enabled colors in declaration order
    pub fn color_list(&mut self) -> &[BubbleColor] {
        self.update_map();
        &self.map
    }

    /// Draw a color; an empty palette yields the default color
    pub fn select(&mut self) -> BubbleColor {
        self.update_map();
        if self.map.is_empty() {
            return BubbleColor::default_color();
        }
        let index = self.rng.below(self.map.len() as u32) as usize;
        self.map[index]
    }

    fn update_map(&mut self) {
        if self.dirty {
            self.map = self.colors.colors().collect();
            self.dirty = false;
        }
    }
}

impl Default for BubbleColorSelector {
    fn default() -> Self {
        Self::new(Rng::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted() -> RandomModelSelector {
        let mut selector = RandomModelSelector::new();
        selector.set_model_score("B", 20);
        selector.set_model_score("A", 10);
        selector
    }

    #[test]
    fn draw_bands_follow_name_order() {
        let selector = weighted();
        assert_eq!(selector.total_score(), 30);
        for v in 0..10 {
            assert_eq!(selector.pick(v), Some("A"));
        }
        for v in 10..30 {
            assert_eq!(selector.pick(v), Some("B"));
        }
        assert_eq!(selector.pick(30), None);
    }

    #[test]
    fn zero_score_removes_entry() {
        let mut selector = weighted();
        selector.set_model_score("A", 0);
        assert_eq!(selector.model_score("A"), 0);
        assert_eq!(selector.total_score(), 20);
        assert_eq!(selector.pick(0), Some("B"));

        selector.set_model_score("B", 5);
        assert_eq!(selector.total_score(), 5);
    }

    #[test]
    fn empty_selector_returns_default_without_drawing() {
        let mut registry = BubbleModelRegistry::new(Some("plain".to_string()));
        registry.create_model("plain");
        registry.create_model("A");

        let selector = RandomModelSelector::new();
        let mut rng = Rng::new(5);
        let before = rng.clone();
        for _ in 0..10 {
            let model = selector.select_model(&mut rng, &registry).unwrap();
            assert_eq!(model.name(), "plain");
        }
        assert_eq!(rng, before);
    }

    #[test]
    fn select_model_is_reproducible() {
        let mut registry = BubbleModelRegistry::new(Some("plain".to_string()));
        registry.create_model("plain");
        registry.create_model("A");
        registry.create_model("B");
        let selector = weighted();

        let mut r1 = Rng::new(77);
        let mut r2 = Rng::new(77);
        for _ in 0..50 {
            let a = selector.select_model(&mut r1, &registry).unwrap();
            let b = selector.select_model(&mut r2, &registry).unwrap();
            assert_eq!(a.name(), b.name());
            assert!(a.name() == "A" || a.name() == "B");
        }
    }

    #[test]
    fn color_selector_respects_mask() {
        let mut selector = BubbleColorSelector::new(Rng::new(9));
        selector.set_available_color(BubbleColor::RED, true);
        selector.set_available_color(BubbleColor::GREEN, true);
        assert_eq!(
            selector.color_list(),
            &[BubbleColor::RED, BubbleColor::GREEN]
        );

        for _ in 0..100 {
            let color = selector.select();
            assert!(color == BubbleColor::RED || color == BubbleColor::GREEN);
        }

        selector.set_available_color(BubbleColor::RED, false);
        for _ in 0..20 {
            assert_eq!(selector.select(), BubbleColor::GREEN);
        }
    }

    #[test]
    fn empty_palette_yields_default_color() {
        let mut selector = BubbleColorSelector::new(Rng::new(9));
        assert_eq!(selector.select(), BubbleColor::BLUE);
        assert!(!selector.is_available_color(BubbleColor::BLUE));
    }

    #[test]
    fn scores_serialize_without_cache() {
        let selector = weighted();
        let _ = selector.total_score();
        let json = serde_json::to_string(&selector).unwrap();
        assert_eq!(json, r#"{"scores":{"A":10,"B":20}}"#);

        let back: RandomModelSelector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selector);
        assert_eq!(back.total_score(), 30);
    }
}
