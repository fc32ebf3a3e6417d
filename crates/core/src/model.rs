//! Bubble models and the model registry
//!
//! A model is the shared template behind every live bubble: color
//! classification, physical flags, slot counts and the behavior hooks an
//! external scripting layer supplies. Models are created through a
//! [`BubbleModelRegistry`], filled in while the registry still holds the only
//! handle, and shared read-only as `Rc<BubbleModel>` afterwards.

use std::cell::OnceCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::bubble::Bubble;
use crate::config::{Properties, DEFAULT_BUBBLE_MODEL_KEY};
use crate::types::{BubbleColor, BubbleColorType};

/// Frame geometry of a named texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// Texture lookups handed to behavior hooks
///
/// Rendering lives outside this crate. Hooks only need to know whether a
/// texture exists and how large it is in order to configure a bubble's sprite.
pub trait TextureContext {
    fn texture(&self, name: &str) -> Option<TextureInfo>;
}

/// Texture context with nothing loaded
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextures;

impl TextureContext for NoTextures {
    fn texture(&self, _name: &str) -> Option<TextureInfo> {
        None
    }
}

/// Arguments for [`BubbleBehavior::init`]
pub struct InitContext<'a> {
    /// Color requested by the caller
    pub color: BubbleColor,
    /// True while a level editor builds the bubble
    pub editor_mode: bool,
    pub textures: &'a dyn TextureContext,
}

/// Callbacks a model runs on its bubbles
///
/// Every hook defaults to doing nothing, so a model without scripted behavior
/// is valid as is.
pub trait BubbleBehavior {
    /// Runs once after allocation. The bubble already carries the requested color.
    fn init(&self, _bubble: &mut Bubble, _ctx: &InitContext<'_>) {}

    fn on_collide(&self, _bubble: &mut Bubble, _other: &mut Bubble) {}

    fn on_inserted(&self, _bubble: &mut Bubble) {}

    fn on_explode(&self, _bubble: &mut Bubble) {}

    fn on_neighbor_inserted(&self, _bubble: &mut Bubble, _neighbor: &mut Bubble) {}

    fn on_neighbor_explode(&self, _bubble: &mut Bubble, _neighbor: &mut Bubble) {}
}

/// Behavior with every hook left empty
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBehavior;

impl BubbleBehavior for NoopBehavior {}

/// Named bubble template
///
/// Two models are equal when their names are equal.
#[derive(Clone)]
pub struct BubbleModel {
    pub name: String,
    pub color_type: BubbleColorType,
    pub floating: bool,
    pub destroy_in_bottom: bool,
    pub require_destroy_to_clear: bool,
    /// Hits needed to destroy; negative means indestructible
    pub resistance: i8,
    pub points_of_turns_to_down: f32,
    pub local_ints: u8,
    pub local_floats: u8,
    pub local_strings: u8,
    pub behavior: Rc<dyn BubbleBehavior>,
}

impl BubbleModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_type: BubbleColorType::NormalColor,
            floating: false,
            destroy_in_bottom: false,
            require_destroy_to_clear: false,
            resistance: 0,
            points_of_turns_to_down: 0.0,
            local_ints: 0,
            local_floats: 0,
            local_strings: 0,
            behavior: Rc::new(NoopBehavior),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_indestructible(&self) -> bool {
        self.resistance < 0
    }

    pub fn set_behavior(&mut self, behavior: impl BubbleBehavior + 'static) {
        self.behavior = Rc::new(behavior);
    }
}

impl PartialEq for BubbleModel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for BubbleModel {}

impl fmt::Debug for BubbleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BubbleModel")
            .field("name", &self.name)
            .field("color_type", &self.color_type)
            .field("floating", &self.floating)
            .field("destroy_in_bottom", &self.destroy_in_bottom)
            .field("require_destroy_to_clear", &self.require_destroy_to_clear)
            .field("resistance", &self.resistance)
            .field("points_of_turns_to_down", &self.points_of_turns_to_down)
            .field("local_ints", &self.local_ints)
            .field("local_floats", &self.local_floats)
            .field("local_strings", &self.local_strings)
            .finish_non_exhaustive()
    }
}

/// Name-keyed collection of bubble models
///
/// Lookups that miss fall back to the default model, whose name comes from
/// configuration and is resolved once and cached. Any change to the set of
/// models or to the default name drops the cache.
#[derive(Debug, Default)]
pub struct BubbleModelRegistry {
    models: HashMap<String, Rc<BubbleModel>>,
    default_name: Option<String>,
    default_model: OnceCell<Option<Rc<BubbleModel>>>,
}

impl BubbleModelRegistry {
    pub fn new(default_name: Option<String>) -> Self {
        Self {
            models: HashMap::new(),
            default_name: default_name.filter(|name| !name.is_empty()),
            default_model: OnceCell::new(),
        }
    }

    /// Registry whose default model is named by `default_bubble_model`
    pub fn from_properties(props: &Properties) -> Self {
        Self::new(Some(props.get_string(DEFAULT_BUBBLE_MODEL_KEY, "")))
    }

    /// Register a new model and return it for population
    ///
    /// Returns `None` if the name is already taken.
    pub fn create_model(&mut self, name: &str) -> Option<&mut BubbleModel> {
        match self.models.entry(name.to_string()) {
            Entry::Occupied(_) => {
                debug!(model = name, "model already registered");
                None
            }
            Entry::Vacant(slot) => {
                let _ = self.default_model.take();
                Rc::get_mut(slot.insert(Rc::new(BubbleModel::new(name))))
            }
        }
    }

    /// Mutable access while no shared handle to the model exists
    pub fn model_mut(&mut self, name: &str) -> Option<&mut BubbleModel> {
        self.models.get_mut(name).and_then(Rc::get_mut)
    }

    /// Model by name, or the default model when the name is unknown
    pub fn get_model(&self, name: &str) -> Option<Rc<BubbleModel>> {
        match self.models.get(name) {
            Some(model) => Some(Rc::clone(model)),
            None => self.default_model(),
        }
    }

    /// The configured default model
    ///
    /// `None` when no default is configured or the configured name is not
    /// registered.
    pub fn default_model(&self) -> Option<Rc<BubbleModel>> {
        self.default_model
            .get_or_init(|| {
                let Some(name) = self.default_name.as_deref() else {
                    warn!("no default bubble model configured");
                    return None;
                };
                let model = self.models.get(name).cloned();
                if model.is_none() {
                    warn!(model = name, "default bubble model is not registered");
                }
                model
            })
            .clone()
    }

    pub fn default_model_name(&self) -> Option<&str> {
        self.default_name.as_deref()
    }

    pub fn set_default_model_name(&mut self, name: Option<String>) {
        self.default_name = name.filter(|name| !name.is_empty());
        let _ = self.default_model.take();
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Remove a model. Bubbles already holding it keep their handle.
    pub fn destroy_model(&mut self, name: &str) -> bool {
        let removed = self.models.remove(name).is_some();
        if removed {
            let _ = self.default_model.take();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.models.clear();
        let _ = self.default_model.take();
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}
