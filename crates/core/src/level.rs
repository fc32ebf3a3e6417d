//! Level description
//!
//! [`LevelProperties`] is everything a level designer sets up before play:
//! the boards, palette, goals, timers and the seed every random stream of
//! the level derives from.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::BinaryBubbleBoard;
use crate::error::LevelError;
use crate::identifier::BubbleIdentifier;
use crate::rng::{Rng, Seed};
use crate::selector::RandomModelSelector;
use crate::types::{
    BoardColumnStyle, BubbleColor, ColorMask, HiddenBubbleContainerType, PlayerId, TimerMode,
};

/// Level objectives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GoalsRepr", into = "GoalsRepr")]
pub struct MetaGoals {
    bubble_goals: BTreeMap<BubbleIdentifier, u32>,
    cleared_board_count: u32,
}

#[derive(Serialize, Deserialize)]
struct GoalEntry {
    bubble: BubbleIdentifier,
    amount: u32,
}

#[derive(Serialize, Deserialize)]
struct GoalsRepr {
    #[serde(default)]
    bubbles: Vec<GoalEntry>,
    #[serde(default)]
    cleared_boards: u32,
}

impl From<GoalsRepr> for MetaGoals {
    fn from(repr: GoalsRepr) -> Self {
        Self {
            bubble_goals: repr
                .bubbles
                .into_iter()
                .map(|entry| (entry.bubble, entry.amount))
                .collect(),
            cleared_board_count: repr.cleared_boards,
        }
    }
}

impl From<MetaGoals> for GoalsRepr {
    fn from(goals: MetaGoals) -> Self {
        Self {
            bubbles: goals
                .bubble_goals
                .into_iter()
                .map(|(bubble, amount)| GoalEntry { bubble, amount })
                .collect(),
            cleared_boards: goals.cleared_board_count,
        }
    }
}

impl MetaGoals {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when clearing boards is an objective
    pub fn has_cleared_board_goal(&self) -> bool {
        self.cleared_board_count > 0
    }

    pub fn cleared_board_count(&self) -> u32 {
        self.cleared_board_count
    }

    pub fn set_cleared_board_count(&mut self, amount: u32) {
        self.cleared_board_count = amount;
    }

    /// Target count for a bubble kind, zero when unset
    pub fn bubble_goal(&self, id: &BubbleIdentifier) -> u32 {
        self.bubble_goals.get(id).copied().unwrap_or(0)
    }

    pub fn set_bubble_goal(&mut self, id: BubbleIdentifier, amount: u32) {
        let _ = self.bubble_goals.insert(id, amount);
    }

    /// Goals in identifier order
    pub fn bubble_goals(&self) -> impl Iterator<Item = (&BubbleIdentifier, u32)> {
        self.bubble_goals.iter().map(|(id, &amount)| (id, amount))
    }
}

/// Full description of a level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelProperties {
    player: PlayerId,
    columns: BoardColumnStyle,
    boards: Vec<BinaryBubbleBoard>,
    hidden_type: HiddenBubbleContainerType,
    cleared_boards_required: u32,
    enabled_colors: ColorMask,
    /// Zero picks a random seed on first use
    seed: Seed,
    initial_filled_rows: u32,
    generate_up_bubbles: bool,
    arrow_models: RandomModelSelector,
    board_models: RandomModelSelector,
    roof: bool,
    remote_bubbles: bool,
    hide_timer: bool,
    timer_turn_time: u32,
    timer_end_time: u32,
    timer_mode: TimerMode,
    bubble_swap: bool,
    background: String,
    goals: MetaGoals,
    #[serde(skip)]
    rng: Option<Rng>,
}

impl Default for LevelProperties {
    fn default() -> Self {
        Self {
            player: PlayerId::SINGLE,
            columns: BoardColumnStyle::default(),
            boards: Vec::new(),
            hidden_type: HiddenBubbleContainerType::CONTINUOUS,
            cleared_boards_required: 0,
            enabled_colors: ColorMask::ALL,
            seed: 0,
            initial_filled_rows: 0,
            generate_up_bubbles: false,
            arrow_models: RandomModelSelector::new(),
            board_models: RandomModelSelector::new(),
            roof: false,
            remote_bubbles: false,
            hide_timer: false,
            timer_turn_time: 0,
            timer_end_time: 0,
            timer_mode: TimerMode::default(),
            bubble_swap: false,
            background: String::new(),
            goals: MetaGoals::new(),
            rng: None,
        }
    }
}

impl LevelProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a level from JSON; boards are normalized to the level's width
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let mut level: LevelProperties = serde_json::from_str(json)?;
        let columns = level.columns;
        for board in &mut level.boards {
            board.set_column_style(columns);
        }
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json(&text)?;
        debug!(path = %path.display(), boards = level.board_count(), "loaded level");
        Ok(level)
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn set_player(&mut self, player: PlayerId) {
        self.player = player;
    }

    pub fn column_style(&self) -> BoardColumnStyle {
        self.columns
    }

    /// Change the width of the level and of every board in it
    pub fn set_column_style(&mut self, columns: BoardColumnStyle) {
        self.columns = columns;
        for board in &mut self.boards {
            board.set_column_style(columns);
        }
    }

    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    /// Replace all boards with `count` empty ones
    pub fn set_board_count(&mut self, count: usize) {
        self.boards = vec![BinaryBubbleBoard::new(self.columns); count];
    }

    pub fn boards(&self) -> &[BinaryBubbleBoard] {
        &self.boards
    }

    pub fn board(&self, index: usize) -> Option<&BinaryBubbleBoard> {
        self.boards.get(index)
    }

    pub fn board_mut(&mut self, index: usize) -> Option<&mut BinaryBubbleBoard> {
        self.boards.get_mut(index)
    }

    /// Append a board, resized to the level's width
    pub fn push_board(&mut self, mut board: BinaryBubbleBoard) {
        board.set_column_style(self.columns);
        self.boards.push(board);
    }

    pub fn hidden_container_type(&self) -> HiddenBubbleContainerType {
        self.hidden_type
    }

    pub fn set_hidden_container_type(&mut self, kind: HiddenBubbleContainerType) {
        self.hidden_type = kind;
    }

    pub fn cleared_boards_required(&self) -> u32 {
        self.cleared_boards_required
    }

    pub fn set_cleared_boards_required(&mut self, amount: u32) {
        self.cleared_boards_required = amount;
    }

    pub fn enabled_colors(&self) -> ColorMask {
        self.enabled_colors
    }

    pub fn set_enabled_colors(&mut self, colors: ColorMask) {
        self.enabled_colors = colors;
    }

    pub fn is_color_enabled(&self, color: BubbleColor) -> bool {
        self.enabled_colors.contains(color)
    }

    pub fn set_color_enabled(&mut self, color: BubbleColor, enabled: bool) {
        if enabled {
            self.enabled_colors += color;
        } else {
            self.enabled_colors -= color;
        }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn is_random_seed(&self) -> bool {
        self.seed == 0
    }

    /// Set the seed; the root stream restarts on the next derivation
    pub fn set_seed(&mut self, seed: Seed) {
        self.seed = seed;
        self.rng = None;
    }

    pub fn set_seed_random(&mut self) {
        self.set_seed(0);
    }

    /// Derive a new independent stream from the level's root stream
    ///
    /// The root is seeded on first use. Each call consumes one root value, so
    /// callers must derive in a fixed order to reproduce a level.
    pub fn generate_rng(&mut self) -> Rng {
        let seed = self.seed;
        self.rng
            .get_or_insert_with(|| Rng::new(resolve_seed(seed)))
            .derive()
    }

    pub fn initial_filled_rows(&self) -> u32 {
        self.initial_filled_rows
    }

    pub fn set_initial_filled_rows(&mut self, rows: u32) {
        self.initial_filled_rows = rows;
    }

    pub fn is_bubble_generation_enabled(&self) -> bool {
        self.generate_up_bubbles
    }

    pub fn set_bubble_generation_enabled(&mut self, enabled: bool) {
        self.generate_up_bubbles = enabled;
    }

    pub fn arrow_model_selector(&self) -> &RandomModelSelector {
        &self.arrow_models
    }

    pub fn arrow_model_selector_mut(&mut self) -> &mut RandomModelSelector {
        &mut self.arrow_models
    }

    pub fn board_model_selector(&self) -> &RandomModelSelector {
        &self.board_models
    }

    pub fn board_model_selector_mut(&mut self) -> &mut RandomModelSelector {
        &mut self.board_models
    }

    pub fn is_roof_enabled(&self) -> bool {
        self.roof
    }

    pub fn set_roof_enabled(&mut self, enabled: bool) {
        self.roof = enabled;
    }

    pub fn is_remote_bubbles_enabled(&self) -> bool {
        self.remote_bubbles
    }

    pub fn set_remote_bubbles_enabled(&mut self, enabled: bool) {
        self.remote_bubbles = enabled;
    }

    pub fn is_hide_timer(&self) -> bool {
        self.hide_timer
    }

    pub fn set_hide_timer(&mut self, hidden: bool) {
        self.hide_timer = hidden;
    }

    /// Seconds per turn
    pub fn timer_turn_time(&self) -> u32 {
        self.timer_turn_time
    }

    pub fn set_timer_turn_time(&mut self, seconds: u32) {
        self.timer_turn_time = seconds;
    }

    /// Seconds for the whole level
    pub fn timer_end_time(&self) -> u32 {
        self.timer_end_time
    }

    pub fn set_timer_end_time(&mut self, seconds: u32) {
        self.timer_end_time = seconds;
    }

    pub fn timer_mode(&self) -> TimerMode {
        self.timer_mode
    }

    pub fn set_timer_mode(&mut self, mode: TimerMode) {
        self.timer_mode = mode;
    }

    pub fn is_bubble_swap_enabled(&self) -> bool {
        self.bubble_swap
    }

    pub fn set_bubble_swap_enabled(&mut self, enabled: bool) {
        self.bubble_swap = enabled;
    }

    /// Background texture name
    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn set_background(&mut self, texture: impl Into<String>) {
        self.background = texture.into();
    }

    pub fn goals(&self) -> &MetaGoals {
        &self.goals
    }

    pub fn goals_mut(&mut self) -> &mut MetaGoals {
        &mut self.goals
    }
}

fn resolve_seed(seed: Seed) -> Seed {
    if seed != 0 {
        return seed;
    }
    let seed = Rng::from_entropy().random_seed();
    debug!(seed, "picked random level seed");
    seed
}
