//! Live bubble instances
//!
//! A [`Bubble`] is the mutable game entity built from a model and a color.
//! It owns its kinematic state, sprite, bounce limits and the per-instance
//! local slots whose sizes come from the model.

use std::rc::Rc;

use crate::model::BubbleModel;
use crate::sprite::AnimatedSprite;
use crate::types::{BounceEdge, BubbleColor, BubbleColorType, IntRect, Vec2, BUBBLE_RADIUS};

/// Edges a moving bubble bounces off
///
/// Left and right are always active. Top and bottom are opt-in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BouncingBounds {
    bounds: IntRect,
    top: bool,
    bottom: bool,
}

impl BouncingBounds {
    pub fn set_bounds(&mut self, bounds: IntRect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> IntRect {
        self.bounds
    }

    pub fn set_top_enabled(&mut self, enabled: bool) {
        self.top = enabled;
    }

    pub fn set_bottom_enabled(&mut self, enabled: bool) {
        self.bottom = enabled;
    }

    /// Reflect `speed` and snap `position` inside the first edge crossed
    pub fn check(&self, position: &mut Vec2, speed: &mut Vec2) -> BounceEdge {
        let radius = BUBBLE_RADIUS as f32;
        let b = self.bounds;

        if self.top && position.y - radius <= b.top as f32 {
            position.y = (b.top as f32) + radius;
            speed.y = -speed.y;
            return BounceEdge::Top;
        }
        if self.bottom && position.y + radius >= (b.top + b.height) as f32 {
            position.y = (b.top + b.height) as f32 - radius;
            speed.y = -speed.y;
            return BounceEdge::Bottom;
        }
        if position.x - radius <= b.left as f32 {
            position.x = (b.left as f32) + radius;
            speed.x = -speed.x;
            return BounceEdge::Left;
        }
        if position.x + radius >= (b.left + b.width) as f32 {
            position.x = (b.left + b.width) as f32 - radius;
            speed.x = -speed.x;
            return BounceEdge::Right;
        }
        BounceEdge::None
    }
}

/// A live bubble bound to its model
#[derive(Debug, Clone)]
pub struct Bubble {
    model: Rc<BubbleModel>,
    exploded: bool,
    position: Vec2,
    speed: Vec2,
    acceleration: Vec2,
    alloc_position: Vec2,
    alloc_cell: (i32, i32),
    floating_check_phase: bool,
    color: BubbleColor,
    sprite: AnimatedSprite,
    bounds: BouncingBounds,
    local_ints: Vec<i32>,
    local_floats: Vec<f32>,
    local_strings: Vec<String>,
}

impl Bubble {
    /// Fresh bubble with the default color and zeroed local slots
    pub fn new(model: Rc<BubbleModel>) -> Self {
        let local_ints = vec![0; model.local_ints as usize];
        let local_floats = vec![0.0; model.local_floats as usize];
        let local_strings = vec![String::new(); model.local_strings as usize];
        Self {
            model,
            exploded: false,
            position: Vec2::zero(),
            speed: Vec2::zero(),
            acceleration: Vec2::zero(),
            alloc_position: Vec2::zero(),
            alloc_cell: (0, 0),
            floating_check_phase: false,
            color: BubbleColor::default_color(),
            sprite: AnimatedSprite::new(),
            bounds: BouncingBounds::default(),
            local_ints,
            local_floats,
            local_strings,
        }
    }

    pub fn model(&self) -> &Rc<BubbleModel> {
        &self.model
    }

    pub fn model_name(&self) -> &str {
        &self.model.name
    }

    pub fn has_exploded(&self) -> bool {
        self.exploded
    }

    pub fn explode(&mut self) {
        self.exploded = true;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn speed(&self) -> Vec2 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Vec2) {
        self.speed = speed;
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    /// Set speed and acceleration together
    pub fn launch(&mut self, speed: Vec2, acceleration: Vec2) {
        self.speed = speed;
        self.acceleration = acceleration;
    }

    pub fn alloc_position(&self) -> Vec2 {
        self.alloc_position
    }

    pub fn set_alloc_position(&mut self, position: Vec2) {
        self.alloc_position = position;
    }

    /// Board cell as (row, column)
    pub fn alloc_cell(&self) -> (i32, i32) {
        self.alloc_cell
    }

    pub fn set_alloc_cell(&mut self, row: i32, column: i32) {
        self.alloc_cell = (row, column);
    }

    pub fn is_floating_check_phase(&self) -> bool {
        self.floating_check_phase
    }

    pub fn set_floating_check_phase(&mut self, phase: bool) {
        self.floating_check_phase = phase;
    }

    pub fn color(&self) -> BubbleColor {
        self.color
    }

    pub fn set_color(&mut self, color: BubbleColor) {
        self.color = color;
    }

    pub fn color_type(&self) -> BubbleColorType {
        self.model.color_type
    }

    /// Whether two bubbles count as the same color for matching
    ///
    /// | self \ other | Colorless | Normal | Multi |
    /// |--------------|-----------|--------|-------|
    /// | Colorless    | no        | no     | no    |
    /// | Normal       | no        | same color | yes |
    /// | Multi        | no        | yes    | yes   |
    pub fn color_match(&self, other: &Bubble) -> bool {
        use BubbleColorType::*;

        match (self.color_type(), other.color_type()) {
            (Colorless, _) | (_, Colorless) => false,
            (NormalColor, NormalColor) => self.color == other.color,
            (MultiColor, _) | (_, MultiColor) => true,
        }
    }

    pub fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut AnimatedSprite {
        &mut self.sprite
    }

    pub fn bouncing_bounds(&self) -> &BouncingBounds {
        &self.bounds
    }

    pub fn bouncing_bounds_mut(&mut self) -> &mut BouncingBounds {
        &mut self.bounds
    }

    pub fn check_bounds(&mut self) -> BounceEdge {
        self.bounds.check(&mut self.position, &mut self.speed)
    }

    /// Integrate motion and animation over `delta` seconds
    pub fn update(&mut self, delta: f32) {
        self.speed += self.acceleration * delta;
        self.position += self.speed * delta;
        self.sprite.update(delta);
    }

    pub fn resistance(&self) -> i8 {
        self.model.resistance
    }

    pub fn is_indestructible(&self) -> bool {
        self.model.is_indestructible()
    }

    pub fn is_floating(&self) -> bool {
        self.model.floating
    }

    pub fn destroy_in_bottom(&self) -> bool {
        self.model.destroy_in_bottom
    }

    pub fn require_destroy_to_clear(&self) -> bool {
        self.model.require_destroy_to_clear
    }

    pub fn points_of_turns_to_down(&self) -> f32 {
        self.model.points_of_turns_to_down
    }

    pub fn local_int(&self, index: usize) -> Option<i32> {
        self.local_ints.get(index).copied()
    }

    pub fn local_float(&self, index: usize) -> Option<f32> {
        self.local_floats.get(index).copied()
    }

    pub fn local_string(&self, index: usize) -> Option<&str> {
        self.local_strings.get(index).map(String::as_str)
    }

    /// Returns false when the slot does not exist
    pub fn set_local_int(&mut self, index: usize, value: i32) -> bool {
        match self.local_ints.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn set_local_float(&mut self, index: usize, value: f32) -> bool {
        match self.local_floats.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn set_local_string(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.local_strings.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Replace the int slots with at most the model's slot count of `values`
    ///
    /// An empty input, or a model with no int slots, leaves no slots.
    pub fn copy_local_ints(&mut self, values: &[i32]) {
        self.local_ints = copy_limited(values, self.model.local_ints);
    }

    pub fn copy_local_floats(&mut self, values: &[f32]) {
        self.local_floats = copy_limited(values, self.model.local_floats);
    }

    pub fn copy_local_strings(&mut self, values: &[String]) {
        self.local_strings = copy_limited(values, self.model.local_strings);
    }
}

fn copy_limited<T: Clone>(values: &[T], slots: u8) -> Vec<T> {
    values.iter().take(slots as usize).cloned().collect()
}
