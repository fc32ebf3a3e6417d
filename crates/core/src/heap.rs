//! Bubble arena
//!
//! Live bubbles are owned by a [`BubbleHeap`] and addressed by [`BubbleRef`]
//! keys. Keys are generation checked: once a bubble is destroyed its key
//! reads as `None` even if the slot is reused.
//!
//! Behavior hooks receive `&mut Bubble`, so hook dispatch goes through the
//! heap, which can hand out two disjoint bubbles at once.

use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::bubble::Bubble;
use crate::identifier::BubbleIdentifier;
use crate::model::{BubbleModel, BubbleModelRegistry, InitContext, TextureContext};
use crate::types::BubbleColor;

new_key_type! {
    /// Handle to a bubble in a [`BubbleHeap`]
    pub struct BubbleRef;
}

#[derive(Debug, Default)]
pub struct BubbleHeap {
    bubbles: SlotMap<BubbleRef, Bubble>,
}

impl BubbleHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bubbles: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Allocate a bubble of the named model
    ///
    /// Unknown names resolve to the registry's default model. Returns `None`
    /// when neither exists.
    pub fn create(
        &mut self,
        registry: &BubbleModelRegistry,
        model_name: &str,
        textures: &dyn TextureContext,
        editor_mode: bool,
        color: BubbleColor,
    ) -> Option<BubbleRef> {
        let Some(model) = registry.get_model(model_name) else {
            trace!(model = model_name, "no model to create bubble from");
            return None;
        };
        Some(self.create_with_model(model, textures, editor_mode, color))
    }

    /// Allocate the bubble an identifier describes; `None` for invalid identifiers
    pub fn create_from_identifier(
        &mut self,
        registry: &BubbleModelRegistry,
        identifier: &BubbleIdentifier,
        textures: &dyn TextureContext,
        editor_mode: bool,
    ) -> Option<BubbleRef> {
        if identifier.is_invalid() {
            return None;
        }
        self.create(
            registry,
            identifier.model(),
            textures,
            editor_mode,
            identifier.color(),
        )
    }

    /// Allocate from a resolved model and run its init hook
    pub fn create_with_model(
        &mut self,
        model: Rc<BubbleModel>,
        textures: &dyn TextureContext,
        editor_mode: bool,
        color: BubbleColor,
    ) -> BubbleRef {
        let behavior = Rc::clone(&model.behavior);
        let mut bubble = Bubble::new(model);
        bubble.set_color(color);

        let ctx = InitContext {
            color,
            editor_mode,
            textures,
        };
        behavior.init(&mut bubble, &ctx);

        self.bubbles.insert(bubble)
    }

    /// Release a bubble, returning it if the handle was live
    pub fn destroy(&mut self, bubble: BubbleRef) -> Option<Bubble> {
        self.bubbles.remove(bubble)
    }

    pub fn get(&self, bubble: BubbleRef) -> Option<&Bubble> {
        self.bubbles.get(bubble)
    }

    pub fn get_mut(&mut self, bubble: BubbleRef) -> Option<&mut Bubble> {
        self.bubbles.get_mut(bubble)
    }

    pub fn contains(&self, bubble: BubbleRef) -> bool {
        self.bubbles.contains_key(bubble)
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BubbleRef, &Bubble)> {
        self.bubbles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BubbleRef, &mut Bubble)> {
        self.bubbles.iter_mut()
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
    }

    /// Advance every bubble by `delta` seconds
    pub fn update(&mut self, delta: f32) {
        for (_, bubble) in self.bubbles.iter_mut() {
            bubble.update(delta);
        }
    }

    /// Run `bubble`'s collide hook against `other`
    ///
    /// Returns false if either handle is stale or both are the same bubble.
    pub fn collide(&mut self, bubble: BubbleRef, other: BubbleRef) -> bool {
        let Some([bubble, other]) = self.bubbles.get_disjoint_mut([bubble, other]) else {
            return false;
        };
        let behavior = Rc::clone(&bubble.model().behavior);
        behavior.on_collide(bubble, other);
        true
    }

    pub fn inserted(&mut self, bubble: BubbleRef) -> bool {
        let Some(bubble) = self.bubbles.get_mut(bubble) else {
            return false;
        };
        let behavior = Rc::clone(&bubble.model().behavior);
        behavior.on_inserted(bubble);
        true
    }

    /// Mark a bubble exploded and run its explode hook
    pub fn explode(&mut self, bubble: BubbleRef) -> bool {
        let Some(bubble) = self.bubbles.get_mut(bubble) else {
            return false;
        };
        bubble.explode();
        let behavior = Rc::clone(&bubble.model().behavior);
        behavior.on_explode(bubble);
        true
    }

    /// Tell `bubble` that `neighbor` was inserted next to it
    pub fn neighbor_inserted(&mut self, bubble: BubbleRef, neighbor: BubbleRef) -> bool {
        let Some([bubble, neighbor]) = self.bubbles.get_disjoint_mut([bubble, neighbor]) else {
            return false;
        };
        let behavior = Rc::clone(&bubble.model().behavior);
        behavior.on_neighbor_inserted(bubble, neighbor);
        true
    }

    /// Tell `bubble` that `neighbor` exploded next to it
    pub fn neighbor_exploded(&mut self, bubble: BubbleRef, neighbor: BubbleRef) -> bool {
        let Some([bubble, neighbor]) = self.bubbles.get_disjoint_mut([bubble, neighbor]) else {
            return false;
        };
        let behavior = Rc::clone(&bubble.model().behavior);
        behavior.on_neighbor_explode(bubble, neighbor);
        true
    }
}
