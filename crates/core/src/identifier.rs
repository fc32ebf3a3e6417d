//! Lightweight bubble references
//!
//! A [`BubbleIdentifier`] names a bubble by model and color without creating
//! it. Boards and hidden content store identifiers; live bubbles are only made
//! when a cell is revealed.

use serde::{Deserialize, Serialize};

use crate::heap::{BubbleHeap, BubbleRef};
use crate::model::{BubbleModelRegistry, TextureContext};
use crate::types::BubbleColor;

/// (model, color) pair; an empty model name marks an empty cell
///
/// Ordering compares the model name first, then the color.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BubbleIdentifier {
    #[serde(default)]
    model: String,
    #[serde(default = "BubbleColor::default_color")]
    color: BubbleColor,
}

impl BubbleIdentifier {
    pub fn new(model: impl Into<String>, color: BubbleColor) -> Self {
        Self {
            model: model.into(),
            color,
        }
    }

    /// The empty-cell identifier
    pub fn invalid() -> Self {
        Self::new(String::new(), BubbleColor::default_color())
    }

    pub fn is_invalid(&self) -> bool {
        self.model.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.is_invalid()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn color(&self) -> BubbleColor {
        self.color
    }

    pub fn set_color(&mut self, color: BubbleColor) {
        self.color = color;
    }

    /// Instantiate this identifier in `heap`
    ///
    /// `None` for invalid identifiers and for models that cannot be resolved.
    pub fn create_bubble(
        &self,
        heap: &mut BubbleHeap,
        registry: &BubbleModelRegistry,
        textures: &dyn TextureContext,
        editor_mode: bool,
    ) -> Option<BubbleRef> {
        heap.create_from_identifier(registry, self, textures, editor_mode)
    }
}

impl Default for BubbleIdentifier {
    fn default() -> Self {
        Self::invalid()
    }
}
