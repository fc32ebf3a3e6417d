//! Animated sprite state
//!
//! Frame bookkeeping only: which frame of a horizontal strip is showing and
//! how it advances with time. Drawing is left to the renderer, which reads
//! [`AnimatedSprite::frame_rect`].

use crate::rng::{Rng, Seed};
use crate::types::IntRect;

/// How frames advance on [`AnimatedSprite::update`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SpriteMode {
    /// Frame never changes on its own
    #[default]
    Static,
    /// Plays once and stops on the last frame
    Sequence,
    /// Wraps back to the first frame
    Loop,
    /// Jumps to a random frame after a random wait in `[min, max]` seconds
    Random { min: f32, max: f32 },
}

#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    texture: Option<String>,
    frame_x: u32,
    frame_y: u32,
    frame_width: u32,
    frame_height: u32,
    frame_count: u32,
    mode: SpriteMode,
    current: f32,
    /// Frames per second
    speed: f32,
    running: bool,
    ended: bool,
    wait: f32,
    rng: Rng,
}

impl AnimatedSprite {
    pub fn new() -> Self {
        Self {
            texture: None,
            frame_x: 0,
            frame_y: 0,
            frame_width: 0,
            frame_height: 0,
            frame_count: 1,
            mode: SpriteMode::Static,
            current: 0.0,
            speed: 1.0,
            running: false,
            ended: false,
            wait: 0.0,
            rng: Rng::default(),
        }
    }

    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    pub fn set_texture(&mut self, name: Option<String>) {
        self.texture = name;
    }

    /// Geometry of the first frame in the texture
    pub fn set_frame_dimensions(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.frame_x = x;
        self.frame_y = y;
        self.frame_width = width;
        self.frame_height = height;
    }

    pub fn set_frame_count(&mut self, frames: u32) {
        self.frame_count = frames.max(1);
        self.set_exact_current_frame(self.current);
    }

    pub fn set_static_mode(&mut self) {
        self.mode = SpriteMode::Static;
    }

    pub fn set_sequence_mode(&mut self) {
        self.mode = SpriteMode::Sequence;
    }

    pub fn set_loop_mode(&mut self) {
        self.mode = SpriteMode::Loop;
    }

    pub fn set_random_mode(&mut self, min: f32, max: f32) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.mode = SpriteMode::Random {
            min: min.max(0.0),
            max: max.max(0.0),
        };
        self.wait = self.draw_wait();
    }

    /// Reseed the stream used by random mode
    pub fn reseed(&mut self, seed: Seed) {
        self.rng = Rng::new(seed);
    }

    pub fn mode(&self) -> SpriteMode {
        self.mode
    }

    pub fn is_static_mode(&self) -> bool {
        matches!(self.mode, SpriteMode::Static)
    }

    pub fn is_sequence_mode(&self) -> bool {
        matches!(self.mode, SpriteMode::Sequence)
    }

    pub fn is_loop_mode(&self) -> bool {
        matches!(self.mode, SpriteMode::Loop)
    }

    pub fn is_random_mode(&self) -> bool {
        matches!(self.mode, SpriteMode::Random { .. })
    }

    pub fn set_speed(&mut self, frames_per_second: f32) {
        self.speed = frames_per_second.max(0.0);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// True once a sequence reached its last frame
    pub fn has_ended(&self) -> bool {
        self.ended
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
        self.ended = false;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn set_current_frame(&mut self, frame: u32) {
        self.set_exact_current_frame(frame as f32);
    }

    pub fn set_exact_current_frame(&mut self, frame: f32) {
        self.current = frame.clamp(0.0, self.last_frame() as f32);
    }

    pub fn current_frame(&self) -> u32 {
        self.current as u32
    }

    pub fn exact_current_frame(&self) -> f32 {
        self.current
    }

    pub fn rewind(&mut self) {
        self.current = 0.0;
        self.ended = false;
    }

    pub fn fast_forward(&mut self) {
        self.current = self.last_frame() as f32;
        self.ended = self.is_sequence_mode();
    }

    pub fn frame_x(&self) -> u32 {
        self.frame_x
    }

    pub fn frame_y(&self) -> u32 {
        self.frame_y
    }

    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Texture area of the current frame
    pub fn frame_rect(&self) -> IntRect {
        let left = self.frame_x + self.current_frame() * self.frame_width;
        IntRect::new(
            left as i32,
            self.frame_y as i32,
            self.frame_width as i32,
            self.frame_height as i32,
        )
    }

    /// Advance by `delta` seconds
    pub fn update(&mut self, delta: f32) {
        if !self.running || self.frame_count <= 1 {
            return;
        }

        match self.mode {
            SpriteMode::Static => {}
            SpriteMode::Sequence => {
                let last = self.last_frame() as f32;
                self.current += self.speed * delta;
                if self.current >= last {
                    self.current = last;
                    self.ended = true;
                    self.running = false;
                }
            }
            SpriteMode::Loop => {
                let frames = self.frame_count as f32;
                self.current = (self.current + self.speed * delta) % frames;
            }
            SpriteMode::Random { .. } => {
                self.wait -= delta;
                if self.wait <= 0.0 {
                    self.current = self.rng.below(self.frame_count) as f32;
                    self.wait = self.draw_wait();
                }
            }
        }
    }

    fn last_frame(&self) -> u32 {
        self.frame_count.saturating_sub(1)
    }

    fn draw_wait(&mut self) -> f32 {
        match self.mode {
            SpriteMode::Random { min, max } => min + (max - min) * self.rng.random_float(),
            _ => 0.0,
        }
    }
}

impl Default for AnimatedSprite {
    fn default() -> Self {
        Self::new()
    }
}
