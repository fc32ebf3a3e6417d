//! Bubble generation
//!
//! The generator turns identifiers and weighted lotteries into live bubbles.
//! It owns the bubble heap and three random streams (colors, arrow models,
//! board models) derived from the level seed in a fixed order.

use tracing::{debug, trace};

use crate::heap::{BubbleHeap, BubbleRef};
use crate::identifier::BubbleIdentifier;
use crate::level::LevelProperties;
use crate::model::{BubbleModelRegistry, TextureContext};
use crate::rng::{Rng, Seed};
use crate::selector::{BubbleColorSelector, RandomModelSelector};
use crate::types::{BubbleColor, ColorMask};

#[derive(Debug)]
pub struct BubbleGenerator {
    heap: BubbleHeap,
    colors: BubbleColorSelector,
    arrow_rng: Rng,
    board_rng: Rng,
    arrow_models: RandomModelSelector,
    board_models: RandomModelSelector,
    last_color: BubbleColor,
}

impl BubbleGenerator {
    pub fn new() -> Self {
        Self {
            heap: BubbleHeap::new(),
            colors: BubbleColorSelector::default(),
            arrow_rng: Rng::default(),
            board_rng: Rng::default(),
            arrow_models: RandomModelSelector::new(),
            board_models: RandomModelSelector::new(),
            last_color: BubbleColor::default_color(),
        }
    }

    pub fn with_seed(
        arrow_models: RandomModelSelector,
        board_models: RandomModelSelector,
        colors: ColorMask,
        seed: Seed,
    ) -> Self {
        let mut generator = Self {
            arrow_models,
            board_models,
            ..Self::new()
        };
        generator.set_seed(seed);
        generator.set_colors(colors);
        generator
    }

    /// Prepare for a level
    ///
    /// Derives one stream from the level and splits it into the color, arrow
    /// and board streams, in that order.
    pub fn setup(&mut self, level: &mut LevelProperties) {
        let stream = level.generate_rng();
        self.split_streams(stream);
        self.arrow_models = level.arrow_model_selector().clone();
        self.board_models = level.board_model_selector().clone();
        self.colors.set_available_colors(level.enabled_colors());
        self.last_color = BubbleColor::default_color();
        debug!(
            colors = level.enabled_colors().len(),
            arrow_models = self.arrow_models.scores().count(),
            board_models = self.board_models.scores().count(),
            "generator ready"
        );
    }

    /// Reseed all streams from `seed`
    pub fn set_seed(&mut self, seed: Seed) {
        self.split_streams(Rng::new(seed));
    }

    fn split_streams(&mut self, mut stream: Rng) {
        self.colors.set_rng(stream.derive());
        self.arrow_rng = stream.derive();
        self.board_rng = stream.derive();
    }

    pub fn colors(&self) -> ColorMask {
        self.colors.available_colors()
    }

    pub fn set_colors(&mut self, colors: ColorMask) {
        self.colors.set_available_colors(colors);
    }

    pub fn color_selector(&self) -> &BubbleColorSelector {
        &self.colors
    }

    pub fn color_selector_mut(&mut self) -> &mut BubbleColorSelector {
        &mut self.colors
    }

    /// Arrow selector when `arrow` is true, board selector otherwise
    pub fn model_selector(&self, arrow: bool) -> &RandomModelSelector {
        if arrow {
            &self.arrow_models
        } else {
            &self.board_models
        }
    }

    pub fn model_selector_mut(&mut self, arrow: bool) -> &mut RandomModelSelector {
        if arrow {
            &mut self.arrow_models
        } else {
            &mut self.board_models
        }
    }

    /// Color of the last random arrow bubble
    pub fn last_color(&self) -> BubbleColor {
        self.last_color
    }

    pub fn heap(&self) -> &BubbleHeap {
        &self.heap
    }

    pub fn heap_mut(&mut self) -> &mut BubbleHeap {
        &mut self.heap
    }

    /// Create the bubble `identifier` describes
    ///
    /// A random color is resolved through the color selector first.
    pub fn generate(
        &mut self,
        identifier: &BubbleIdentifier,
        registry: &BubbleModelRegistry,
        textures: &dyn TextureContext,
    ) -> Option<BubbleRef> {
        if identifier.is_invalid() {
            return None;
        }
        let color = if identifier.color().is_random() {
            self.colors.select()
        } else {
            identifier.color()
        };
        self.heap
            .create(registry, identifier.model(), textures, false, color)
    }

    /// Create a bubble with a model from the weighted selector and a random color
    pub fn generate_random(
        &mut self,
        arrow: bool,
        registry: &BubbleModelRegistry,
        textures: &dyn TextureContext,
    ) -> Option<BubbleRef> {
        let model = if arrow {
            self.arrow_models.select_model(&mut self.arrow_rng, registry)
        } else {
            self.board_models.select_model(&mut self.board_rng, registry)
        };
        let Some(model) = model else {
            trace!(arrow, "no model available for random bubble");
            return None;
        };

        let color = self.colors.select();
        if arrow {
            self.last_color = color;
        }
        Some(self.heap.create_with_model(model, textures, false, color))
    }

    pub fn destroy(&mut self, bubble: BubbleRef) -> bool {
        self.heap.destroy(bubble).is_some()
    }
}

impl Default for BubbleGenerator {
    fn default() -> Self {
        Self::new()
    }
}
