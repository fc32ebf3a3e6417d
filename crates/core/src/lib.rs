//! Core simulation module - boards, generation and staged reveal
//!
//! This crate holds the data model of a bubble shooter level and the pipeline
//! that turns it into live bubbles. It has **no dependencies** on rendering,
//! audio or scripting, which makes it:
//!
//! - **Deterministic**: the same level seed reproduces the same colors, models and board order
//! - **Testable**: every rule is exercised without a window or an interpreter
//! - **Embeddable**: hooks and textures are narrow traits with no-op defaults
//!
//! # Module Structure
//!
//! - [`board`]: 14-row designer grid of identifiers with clamped indexing
//! - [`bubble`]: live bubble state, color matching and bounce limits
//! - [`config`]: typed key/value properties loaded from JSON or the environment
//! - [`generator`]: color and model selection feeding the bubble heap
//! - [`heap`]: generation-checked arena of live bubbles and hook dispatch
//! - [`hidden`]: queue of staged boards revealed row by row
//! - [`identifier`]: (model, color) references stored in boards
//! - [`level`]: level properties, goals and the root random stream
//! - [`model`]: bubble models, behavior hooks and the model registry
//! - [`rng`]: `minstd_rand` streams with ordered derivation
//! - [`selector`]: weighted model lottery and palette color picks
//! - [`sprite`]: animation frame state
//!
//! # Example
//!
//! ```
//! use bubble_shooter_core::{
//!     BinaryBubbleBoard, BubbleGenerator, BubbleModelRegistry, HiddenBubbleContainer,
//!     LevelProperties, NoTextures,
//! };
//! use bubble_shooter_types::{BoardColumnStyle, BubbleColor};
//!
//! let mut registry = BubbleModelRegistry::new(Some("plain".to_string()));
//! registry.create_model("plain");
//!
//! let mut level = LevelProperties::new();
//! level.set_seed(12345);
//! let mut board = BinaryBubbleBoard::new(BoardColumnStyle::Min);
//! board.insert(0, 0, "plain", BubbleColor::RED);
//! board.insert(0, 1, "plain", BubbleColor::RANDOM);
//! level.push_board(board);
//!
//! let mut generator = BubbleGenerator::new();
//! generator.setup(&mut level);
//! let mut hidden = HiddenBubbleContainer::new();
//! hidden.load_level(&mut level);
//!
//! let row = hidden.generate_row(&mut generator, &registry, &NoTextures).unwrap();
//! assert_eq!(row.bubble_count(), 2);
//! assert!(hidden.is_empty());
//! ```
//!
//! # Random Streams
//!
//! A level owns one root stream. Each consumer derives its own stream from it
//! at setup, and each derivation consumes a root value, so setup order is
//! part of reproducing a level:
//!
//! 1. [`BubbleGenerator::setup`] derives one stream and splits it into color,
//!    arrow and board streams
//! 2. [`HiddenBubbleContainer::setup`] derives the board shuffle stream

pub mod board;
pub mod bubble;
pub mod config;
pub mod error;
pub mod generator;
pub mod heap;
pub mod hidden;
pub mod identifier;
pub mod level;
pub mod model;
pub mod rng;
pub mod selector;
pub mod sprite;

pub use bubble_shooter_types as types;

// Re-export commonly used types for convenience
pub use board::BinaryBubbleBoard;
pub use bubble::{BouncingBounds, Bubble};
pub use config::{Properties, Property, DEFAULT_BUBBLE_MODEL_KEY};
pub use error::{ConfigError, LevelError};
pub use generator::BubbleGenerator;
pub use heap::{BubbleHeap, BubbleRef};
pub use hidden::{HiddenBoard, HiddenBubbleContainer, HiddenRow, RevealedRow};
pub use identifier::BubbleIdentifier;
pub use level::{LevelProperties, MetaGoals};
pub use model::{
    BubbleBehavior, BubbleModel, BubbleModelRegistry, InitContext, NoTextures, NoopBehavior,
    TextureContext, TextureInfo,
};
pub use rng::{Rng, Seed};
pub use selector::{BubbleColorSelector, RandomModelSelector};
pub use sprite::{AnimatedSprite, SpriteMode};
