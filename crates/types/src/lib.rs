//! Core types module - shared value types and constants
//!
//! This module defines the plain data types used throughout the bubble shooter
//! core. Everything here is a value type: colors and color masks, board shape
//! constants, the hidden container flags, and small geometry helpers. None of
//! these types know about models, bubbles, or random streams.
//!
//! # Board Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_COLUMN_COUNT` | 8 | Narrowest board |
//! | `MAX_COLUMN_COUNT` | 16 | Widest board |
//! | `VISIBLE_ROWS` | 14 | Rows stored by a designer board |
//! | `BOTTOM_ROWS` | 3 | Extra rows below the visible area |
//! | `TOP_ROWS` | 1 | Extra rows above the visible area |
//! | `TOTAL_ROWS` | 18 | Visible plus off-screen rows |
//!
//! # Colors
//!
//! Each concrete color is a single bit of a byte, so a whole palette fits in a
//! [`ColorMask`] and membership tests are one `&`. The random marker lives
//! outside the byte entirely and never collides with a real color.
//!
//! # Examples
//!
//! ```
//! use bubble_shooter_types::{BoardColumnStyle, BubbleColor, ColorMask};
//!
//! let mask = ColorMask::EMPTY + BubbleColor::RED + BubbleColor::BLUE;
//! assert!(mask.contains(BubbleColor::RED));
//! assert!(!mask.contains(BubbleColor::GREEN));
//!
//! let mask = mask - BubbleColor::RED;
//! assert_eq!(mask.colors().collect::<Vec<_>>(), vec![BubbleColor::BLUE]);
//!
//! assert_eq!(BoardColumnStyle::from_column_count(30), BoardColumnStyle::Max);
//! assert_eq!(BoardColumnStyle::Medium.column_count(), 12);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, BitAnd, BitOr, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Narrowest supported board (8 columns)
pub const MIN_COLUMN_COUNT: usize = 8;

/// Widest supported board (16 columns)
pub const MAX_COLUMN_COUNT: usize = 16;

/// Rows stored by a designer board
pub const VISIBLE_ROWS: usize = 14;

/// Rows below the visible play field
pub const BOTTOM_ROWS: usize = 3;

/// Rows above the visible play field
pub const TOP_ROWS: usize = 1;

/// Off-screen rows (top plus bottom)
pub const HIDDEN_ROWS: usize = BOTTOM_ROWS + TOP_ROWS;

/// Visible plus off-screen rows
pub const TOTAL_ROWS: usize = VISIBLE_ROWS + HIDDEN_ROWS;

/// Bubble radius in world units
pub const BUBBLE_RADIUS: u32 = 32;

/// Bubble hitbox width in world units
pub const BUBBLE_HITBOX_WIDTH: u32 = 64;

/// Bubble hitbox height in world units
pub const BUBBLE_HITBOX_HEIGHT: u32 = 54;

const CODE_RED: u8 = 0x1 << 0;
const CODE_ORANGE: u8 = 0x1 << 1;
const CODE_YELLOW: u8 = 0x1 << 2;
const CODE_GREEN: u8 = 0x1 << 3;
const CODE_BLUE: u8 = 0x1 << 4;
const CODE_PURPLE: u8 = 0x1 << 5;
const CODE_GRAY: u8 = 0x1 << 6;
const CODE_BLACK: u8 = 0x1 << 7;

/// Name returned for codes that are not a predefined color
pub const INVALID_COLOR_NAME: &str = "<invalid-color>";

/// A bubble color: one bit of a byte, or nothing.
///
/// The zero code is the "no color" value and is falsy (see
/// [`BubbleColor::is_valid`]). [`BubbleColor::RANDOM`] is an out-of-band marker
/// used by identifiers that want their color picked at generation time; its
/// code is zero so it can never be mistaken for a palette entry.
///
/// Colors order by code first, so the predefined colors sort in declaration
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BubbleColor {
    code: u8,
    random: bool,
}

impl BubbleColor {
    /// No color
    pub const NONE: BubbleColor = BubbleColor::from_code(0);
    pub const RED: BubbleColor = BubbleColor::from_code(CODE_RED);
    pub const ORANGE: BubbleColor = BubbleColor::from_code(CODE_ORANGE);
    pub const YELLOW: BubbleColor = BubbleColor::from_code(CODE_YELLOW);
    pub const GREEN: BubbleColor = BubbleColor::from_code(CODE_GREEN);
    pub const BLUE: BubbleColor = BubbleColor::from_code(CODE_BLUE);
    pub const PURPLE: BubbleColor = BubbleColor::from_code(CODE_PURPLE);
    pub const GRAY: BubbleColor = BubbleColor::from_code(CODE_GRAY);
    pub const BLACK: BubbleColor = BubbleColor::from_code(CODE_BLACK);

    /// Marker asking the generator to pick a color from the enabled palette
    pub const RANDOM: BubbleColor = BubbleColor {
        code: 0,
        random: true,
    };

    /// Build a color from a raw code.
    ///
    /// Codes that are not a single predefined bit are representable but have
    /// no name (see [`BubbleColor::name`]).
    pub const fn from_code(code: u8) -> Self {
        Self {
            code,
            random: false,
        }
    }

    /// Raw 8-bit code (zero for [`BubbleColor::NONE`] and [`BubbleColor::RANDOM`])
    pub const fn code(&self) -> u8 {
        self.code
    }

    /// True for any non-zero code
    pub const fn is_valid(&self) -> bool {
        self.code != 0
    }

    /// True only for the [`BubbleColor::RANDOM`] marker
    pub const fn is_random(&self) -> bool {
        self.random
    }

    /// Lowercase name of the color
    ///
    /// # Examples
    ///
    /// ```
    /// use bubble_shooter_types::BubbleColor;
    ///
    /// assert_eq!(BubbleColor::RED.name(), "red");
    /// assert_eq!(BubbleColor::from_code(0x3).name(), "<invalid-color>");
    /// ```
    pub fn name(&self) -> &'static str {
        if self.random {
            return "random";
        }
        match self.code {
            CODE_RED => "red",
            CODE_ORANGE => "orange",
            CODE_YELLOW => "yellow",
            CODE_GREEN => "green",
            CODE_BLUE => "blue",
            CODE_PURPLE => "purple",
            CODE_GRAY => "gray",
            CODE_BLACK => "black",
            _ => INVALID_COLOR_NAME,
        }
    }

    /// Parse a color from its name (case-insensitive).
    ///
    /// Accepts the eight color names, `"random"`, and `""`/`"none"` for
    /// [`BubbleColor::NONE`].
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "" | "none" => Some(BubbleColor::NONE),
            "random" => Some(BubbleColor::RANDOM),
            "red" => Some(BubbleColor::RED),
            "orange" => Some(BubbleColor::ORANGE),
            "yellow" => Some(BubbleColor::YELLOW),
            "green" => Some(BubbleColor::GREEN),
            "blue" => Some(BubbleColor::BLUE),
            "purple" => Some(BubbleColor::PURPLE),
            "gray" | "grey" => Some(BubbleColor::GRAY),
            "black" => Some(BubbleColor::BLACK),
            _ => None,
        }
    }

    pub fn add_to_mask(&self, mask: ColorMask) -> ColorMask {
        mask + *self
    }

    pub fn remove_from_mask(&self, mask: ColorMask) -> ColorMask {
        mask - *self
    }

    pub fn has_in_mask(&self, mask: ColorMask) -> bool {
        mask.contains(*self)
    }

    /// The eight predefined colors in declaration order
    pub const fn all() -> [BubbleColor; 8] {
        [
            BubbleColor::RED,
            BubbleColor::ORANGE,
            BubbleColor::YELLOW,
            BubbleColor::GREEN,
            BubbleColor::BLUE,
            BubbleColor::PURPLE,
            BubbleColor::GRAY,
            BubbleColor::BLACK,
        ]
    }

    /// Color used whenever nothing else is available
    pub const fn default_color() -> BubbleColor {
        BubbleColor::BLUE
    }
}

impl fmt::Display for BubbleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a color name does not parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColorName(pub String);

impl fmt::Display for UnknownColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown bubble color name: {:?}", self.0)
    }
}

impl std::error::Error for UnknownColorName {}

impl TryFrom<String> for BubbleColor {
    type Error = UnknownColorName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BubbleColor::from_name(&value).ok_or(UnknownColorName(value))
    }
}

impl From<BubbleColor> for String {
    fn from(color: BubbleColor) -> Self {
        if !color.is_valid() && !color.is_random() {
            return String::new();
        }
        color.name().to_string()
    }
}

/// Bitwise union of bubble colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMask(u8);

impl ColorMask {
    pub const EMPTY: ColorMask = ColorMask(0);
    pub const ALL: ColorMask = ColorMask(0xff);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when any bit of `color` is set in the mask
    pub const fn contains(&self, color: BubbleColor) -> bool {
        self.0 & color.code() != 0
    }

    /// Number of colors in the mask
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Colors present in the mask, in declaration order
    pub fn colors(self) -> impl Iterator<Item = BubbleColor> {
        BubbleColor::all()
            .into_iter()
            .filter(move |color| self.contains(*color))
    }
}

impl From<BubbleColor> for ColorMask {
    fn from(color: BubbleColor) -> Self {
        ColorMask(color.code())
    }
}

impl Add<BubbleColor> for ColorMask {
    type Output = ColorMask;
    fn add(self, rhs: BubbleColor) -> ColorMask {
        ColorMask(self.0 | rhs.code())
    }
}

impl Add<ColorMask> for BubbleColor {
    type Output = ColorMask;
    fn add(self, rhs: ColorMask) -> ColorMask {
        rhs + self
    }
}

impl Sub<BubbleColor> for ColorMask {
    type Output = ColorMask;
    fn sub(self, rhs: BubbleColor) -> ColorMask {
        ColorMask(self.0 & !rhs.code())
    }
}

impl AddAssign<BubbleColor> for ColorMask {
    fn add_assign(&mut self, rhs: BubbleColor) {
        *self = *self + rhs;
    }
}

impl SubAssign<BubbleColor> for ColorMask {
    fn sub_assign(&mut self, rhs: BubbleColor) {
        *self = *self - rhs;
    }
}

impl BitAnd<BubbleColor> for ColorMask {
    type Output = ColorMask;
    fn bitand(self, rhs: BubbleColor) -> ColorMask {
        ColorMask(self.0 & rhs.code())
    }
}

impl BitOr for ColorMask {
    type Output = ColorMask;
    fn bitor(self, rhs: ColorMask) -> ColorMask {
        ColorMask(self.0 | rhs.0)
    }
}

/// How a bubble model takes part in color matching
///
/// - **Colorless**: never matches anything
/// - **NormalColor**: matches identical colors and multicolor bubbles
/// - **MultiColor**: matches anything that is not colorless
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BubbleColorType {
    Colorless,
    #[default]
    NormalColor,
    MultiColor,
}

/// Board width presets, clamped to `[MIN_COLUMN_COUNT, MAX_COLUMN_COUNT]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
#[repr(u8)]
pub enum BoardColumnStyle {
    #[default]
    Min = 8,
    VerySmall = 9,
    Small = 10,
    SmallMedium = 11,
    Medium = 12,
    LargeMedium = 13,
    Large = 14,
    VeryLarge = 15,
    Max = 16,
}

impl BoardColumnStyle {
    /// Number of columns in a row of this style
    pub const fn column_count(self) -> usize {
        self as usize
    }

    /// Style for a column count, clamped to the supported range
    pub const fn from_column_count(columns: usize) -> Self {
        let clamped = if columns < MIN_COLUMN_COUNT {
            MIN_COLUMN_COUNT
        } else if columns > MAX_COLUMN_COUNT {
            MAX_COLUMN_COUNT
        } else {
            columns
        };
        match clamped {
            8 => BoardColumnStyle::Min,
            9 => BoardColumnStyle::VerySmall,
            10 => BoardColumnStyle::Small,
            11 => BoardColumnStyle::SmallMedium,
            12 => BoardColumnStyle::Medium,
            13 => BoardColumnStyle::LargeMedium,
            14 => BoardColumnStyle::Large,
            15 => BoardColumnStyle::VeryLarge,
            _ => BoardColumnStyle::Max,
        }
    }

    /// Even column counts stagger rows differently from odd ones
    pub const fn is_pair_column(self) -> bool {
        self.column_count() % 2 == 0
    }
}

impl From<u8> for BoardColumnStyle {
    fn from(value: u8) -> Self {
        BoardColumnStyle::from_column_count(value as usize)
    }
}

impl From<BoardColumnStyle> for u8 {
    fn from(style: BoardColumnStyle) -> Self {
        style as u8
    }
}

/// Hidden content flow flags
///
/// Three independent bits compose the eight container kinds:
///
/// | Bit | Meaning |
/// |-----|---------|
/// | `0x1` | Discrete: boards keep a hard boundary |
/// | `0x2` | Random: whole boards are shuffled once at fill time |
/// | `0x4` | Endless: drained boards are queued again |
///
/// With no bits set the container is continuous and sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HiddenBubbleContainerType(u8);

impl HiddenBubbleContainerType {
    pub const CONTINUOUS: Self = Self(0x0);
    pub const DISCRETE: Self = Self(0x1);
    pub const RANDOM_CONTINUOUS: Self = Self(0x2);
    pub const RANDOM_DISCRETE: Self = Self(0x3);
    pub const ENDLESS_CONTINUOUS: Self = Self(0x4);
    pub const ENDLESS_DISCRETE: Self = Self(0x5);
    pub const ENDLESS_RANDOM_CONTINUOUS: Self = Self(0x6);
    pub const ENDLESS_RANDOM_DISCRETE: Self = Self(0x7);

    /// Build from raw bits; unknown bits are dropped
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x7)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// True when every bit of `other` is set in `self`
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_discrete(&self) -> bool {
        self.contains(Self::DISCRETE)
    }

    pub const fn is_random(&self) -> bool {
        self.contains(Self::RANDOM_CONTINUOUS)
    }

    pub const fn is_endless(&self) -> bool {
        self.contains(Self::ENDLESS_CONTINUOUS)
    }
}

impl BitOr for HiddenBubbleContainerType {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for HiddenBubbleContainerType {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Which player a level belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerId {
    #[default]
    First,
    Second,
}

impl PlayerId {
    /// Single player games use the first slot
    pub const SINGLE: PlayerId = PlayerId::First;
}

/// Level timer behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimerMode {
    /// Per-turn countdown
    #[default]
    Turn,
    /// Whole-level countdown
    End,
    /// Both timers run
    TurnAndEnd,
}

impl TimerMode {
    pub const fn has_turn_timer(&self) -> bool {
        matches!(self, TimerMode::Turn | TimerMode::TurnAndEnd)
    }

    pub const fn has_end_timer(&self) -> bool {
        matches!(self, TimerMode::End | TimerMode::TurnAndEnd)
    }
}

/// Edge a bubble bounced off during a bounds check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BounceEdge {
    None,
    Top,
    Bottom,
    Left,
    Right,
}

/// 2D vector for bubble kinematics
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Integer rectangle (left, top, width, height)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_shape_defaults() {
        assert_eq!(MIN_COLUMN_COUNT, 8);
        assert_eq!(MAX_COLUMN_COUNT, 16);
        assert_eq!(VISIBLE_ROWS, 14);
        assert_eq!(HIDDEN_ROWS, 4);
        assert_eq!(TOTAL_ROWS, 18);
    }

    #[test]
    fn every_color_is_one_bit() {
        for color in BubbleColor::all() {
            assert_eq!(color.code().count_ones(), 1, "{} is not one-hot", color);
        }
        assert!(!BubbleColor::NONE.is_valid());
        assert!(!BubbleColor::RANDOM.is_valid());
        assert!(BubbleColor::RANDOM.is_random());
    }

    #[test]
    fn random_marker_never_touches_the_mask() {
        let mask = ColorMask::EMPTY + BubbleColor::RANDOM;
        assert!(mask.is_empty());
        assert!(!ColorMask::ALL.contains(BubbleColor::RANDOM));
    }

    #[test]
    fn mask_add_remove() {
        let mut mask = ColorMask::EMPTY;
        mask += BubbleColor::GREEN;
        mask += BubbleColor::BLACK;
        assert!(BubbleColor::GREEN.has_in_mask(mask));
        assert_eq!(mask.len(), 2);

        mask -= BubbleColor::GREEN;
        assert!(!BubbleColor::GREEN.has_in_mask(mask));
        assert_eq!(BubbleColor::BLACK.remove_from_mask(mask), ColorMask::EMPTY);
        assert_eq!(
            BubbleColor::RED.add_to_mask(ColorMask::EMPTY),
            ColorMask::from(BubbleColor::RED)
        );
    }

    #[test]
    fn colors_keep_declaration_order() {
        let mask = ColorMask::EMPTY + BubbleColor::BLACK + BubbleColor::RED + BubbleColor::BLUE;
        let colors: Vec<_> = mask.colors().collect();
        assert_eq!(
            colors,
            vec![BubbleColor::RED, BubbleColor::BLUE, BubbleColor::BLACK]
        );
    }

    #[test]
    fn color_order_follows_code() {
        assert!(BubbleColor::NONE < BubbleColor::RED);
        assert!(BubbleColor::RED < BubbleColor::ORANGE);
        assert!(BubbleColor::GRAY < BubbleColor::BLACK);
    }

    #[test]
    fn color_names_round_trip_through_serde() {
        let json = serde_json::to_string(&BubbleColor::PURPLE).unwrap();
        assert_eq!(json, "\"purple\"");
        let back: BubbleColor = serde_json::from_str("\"random\"").unwrap();
        assert_eq!(back, BubbleColor::RANDOM);
        assert!(serde_json::from_str::<BubbleColor>("\"teal\"").is_err());
    }

    #[test]
    fn column_style_clamps() {
        assert_eq!(BoardColumnStyle::from_column_count(0), BoardColumnStyle::Min);
        assert_eq!(BoardColumnStyle::from_column_count(11), BoardColumnStyle::SmallMedium);
        assert_eq!(BoardColumnStyle::from_column_count(99), BoardColumnStyle::Max);
        assert!(BoardColumnStyle::Medium.is_pair_column());
        assert!(!BoardColumnStyle::VerySmall.is_pair_column());
    }

    #[test]
    fn container_type_flags() {
        let kind = HiddenBubbleContainerType::RANDOM_CONTINUOUS | HiddenBubbleContainerType::DISCRETE;
        assert_eq!(kind, HiddenBubbleContainerType::RANDOM_DISCRETE);
        assert!(kind.is_discrete());
        assert!(kind.is_random());
        assert!(!kind.is_endless());

        let plain = HiddenBubbleContainerType::CONTINUOUS;
        assert!(!plain.is_discrete() && !plain.is_random() && !plain.is_endless());
        assert!(HiddenBubbleContainerType::ENDLESS_RANDOM_DISCRETE.is_endless());
    }

    #[test]
    fn timer_mode_flags() {
        assert!(TimerMode::TurnAndEnd.has_turn_timer());
        assert!(TimerMode::TurnAndEnd.has_end_timer());
        assert!(!TimerMode::Turn.has_end_timer());
    }
}
