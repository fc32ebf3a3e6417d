//! Hidden bubble content
//!
//! Rows a level has not revealed yet. Designer boards are turned into a queue
//! of [`HiddenBoard`]s, each a queue of [`HiddenRow`]s of identifiers, and
//! rows leave from the front only, turning into live bubbles as they go.
//!
//! # Row order
//!
//! Boards are walked bottom row first, so the first row revealed is the
//! source board's row 13 and the last is its row 0. Empty rows at the bottom
//! of a source board therefore sit at the front of its queue.
//!
//! # Container flags
//!
//! - Continuous (not discrete): those leading empty rows are dropped from
//!   every board so one board flows into the next without a gap.
//! - Discrete: boards are kept exactly as designed.
//! - Random: whole boards are shuffled once, at fill time.
//! - Endless: after the last board drains, the filled boards are queued
//!   again (reshuffled when random).

use std::cell::Cell;
use std::collections::VecDeque;

use arrayvec::ArrayVec;
use tracing::debug;

use crate::board::BinaryBubbleBoard;
use crate::generator::BubbleGenerator;
use crate::heap::BubbleRef;
use crate::identifier::BubbleIdentifier;
use crate::level::LevelProperties;
use crate::model::{BubbleModelRegistry, TextureContext};
use crate::rng::Rng;
use crate::types::{BoardColumnStyle, HiddenBubbleContainerType, MAX_COLUMN_COUNT};

/// One staged row of identifiers
#[derive(Debug, Clone)]
pub struct HiddenRow {
    bubbles: ArrayVec<BubbleIdentifier, MAX_COLUMN_COUNT>,
    count: Cell<Option<usize>>,
    row_id: u8,
    board_id: u32,
}

impl HiddenRow {
    pub fn new(board_id: u32, row_id: u8) -> Self {
        Self {
            bubbles: ArrayVec::new(),
            count: Cell::new(None),
            row_id,
            board_id,
        }
    }

    /// Row holding `bubbles`, cut to the widest board
    pub fn with_bubbles<I>(bubbles: I, board_id: u32, row_id: u8) -> Self
    where
        I: IntoIterator<Item = BubbleIdentifier>,
    {
        let mut row = Self::new(board_id, row_id);
        row.set_bubbles(bubbles);
        row
    }

    /// True when the row has no cells at all
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn bubbles(&self) -> &[BubbleIdentifier] {
        &self.bubbles
    }

    pub fn set_bubbles<I>(&mut self, bubbles: I)
    where
        I: IntoIterator<Item = BubbleIdentifier>,
    {
        self.bubbles = bubbles.into_iter().take(MAX_COLUMN_COUNT).collect();
        self.count.set(None);
    }

    pub fn valid_bubble_count(&self) -> usize {
        if let Some(count) = self.count.get() {
            return count;
        }
        let count = self.bubbles.iter().filter(|id| id.is_valid()).count();
        self.count.set(Some(count));
        count
    }

    pub fn row_id(&self) -> u8 {
        self.row_id
    }

    pub fn set_row_id(&mut self, row_id: u8) {
        self.row_id = row_id;
    }

    pub fn board_id(&self) -> u32 {
        self.board_id
    }

    pub fn set_board_id(&mut self, board_id: u32) {
        self.board_id = board_id;
    }

    /// Create the row's bubbles, one slot per column
    pub fn generate(
        &self,
        generator: &mut BubbleGenerator,
        registry: &BubbleModelRegistry,
        textures: &dyn TextureContext,
    ) -> RevealedRow {
        let cells = self
            .bubbles
            .iter()
            .map(|id| generator.generate(id, registry, textures))
            .collect();
        RevealedRow {
            board_id: self.board_id,
            row_id: self.row_id,
            cells,
        }
    }
}

/// A staged board: rows in reveal order
#[derive(Debug, Clone)]
pub struct HiddenBoard {
    board_id: u32,
    rows: VecDeque<HiddenRow>,
    count: Cell<Option<usize>>,
}

impl HiddenBoard {
    pub fn new(board_id: u32) -> Self {
        Self {
            board_id,
            rows: VecDeque::new(),
            count: Cell::new(None),
        }
    }

    /// Stage a designer board, bottom row first, padded to `columns`
    pub fn from_board(board_id: u32, board: &BinaryBubbleBoard, columns: BoardColumnStyle) -> Self {
        let mut hidden = Self::new(board_id);
        let width = columns.column_count();
        for (row_id, source) in board.rows().enumerate().rev() {
            let cells = (0..width).map(|column| {
                source
                    .get(column)
                    .cloned()
                    .unwrap_or_else(BubbleIdentifier::invalid)
            });
            hidden.push_row(HiddenRow::with_bubbles(cells, board_id, row_id as u8));
        }
        hidden
    }

    pub fn board_id(&self) -> u32 {
        self.board_id
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &HiddenRow> {
        self.rows.iter()
    }

    pub fn front(&self) -> Option<&HiddenRow> {
        self.rows.front()
    }

    pub fn push_row(&mut self, row: HiddenRow) {
        self.rows.push_back(row);
        self.count.set(None);
    }

    pub fn pop_row(&mut self) -> Option<HiddenRow> {
        let row = self.rows.pop_front();
        self.count.set(None);
        row
    }

    /// Drop empty rows from the front; returns how many were dropped
    pub fn trim_leading_empty_rows(&mut self) -> usize {
        let mut trimmed = 0;
        while self
            .rows
            .front()
            .is_some_and(|row| row.valid_bubble_count() == 0)
        {
            let _ = self.rows.pop_front();
            trimmed += 1;
        }
        if trimmed > 0 {
            self.count.set(None);
        }
        trimmed
    }

    pub fn valid_bubble_count(&self) -> usize {
        if let Some(count) = self.count.get() {
            return count;
        }
        let count = self.rows.iter().map(HiddenRow::valid_bubble_count).sum();
        self.count.set(Some(count));
        count
    }
}

/// Bubbles created from one hidden row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedRow {
    pub board_id: u32,
    /// Row index in the source board
    pub row_id: u8,
    /// One entry per column; `None` where the cell was empty
    pub cells: Vec<Option<BubbleRef>>,
}

impl RevealedRow {
    pub fn bubbles(&self) -> impl Iterator<Item = BubbleRef> + '_ {
        self.cells.iter().flatten().copied()
    }

    pub fn bubble_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

/// Queue of hidden boards revealed row by row
#[derive(Debug, Clone, Default)]
pub struct HiddenBubbleContainer {
    columns: BoardColumnStyle,
    kind: HiddenBubbleContainerType,
    rng: Rng,
    current: Option<HiddenBoard>,
    boards: VecDeque<HiddenBoard>,
    templates: Vec<HiddenBoard>,
}

impl HiddenBubbleContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a level and derive the shuffle stream from it
    pub fn setup(&mut self, level: &mut LevelProperties) {
        self.clear();
        self.columns = level.column_style();
        self.kind = level.hidden_container_type();
        self.rng = level.generate_rng();
    }

    /// [`setup`](Self::setup) followed by [`fill`](Self::fill) with the level's boards
    pub fn load_level(&mut self, level: &mut LevelProperties) {
        self.setup(level);
        self.fill(level.boards());
    }

    /// Stage `boards`, replacing anything queued
    pub fn fill(&mut self, boards: &[BinaryBubbleBoard]) {
        self.current = None;
        self.boards.clear();
        self.templates.clear();

        let mut staged: Vec<HiddenBoard> = boards
            .iter()
            .enumerate()
            .map(|(id, board)| HiddenBoard::from_board(id as u32, board, self.columns))
            .collect();

        if !self.kind.is_discrete() {
            for board in &mut staged {
                let _ = board.trim_leading_empty_rows();
            }
        }

        if self.kind.is_endless() {
            self.templates = staged.iter().filter(|b| !b.is_empty()).cloned().collect();
        }

        if self.kind.is_random() {
            staged = self.rng.take_in_random_order(staged);
        }

        self.boards = staged.into();
        debug!(
            boards = self.boards.len(),
            rows = self.row_count(),
            bubbles = self.valid_bubble_count(),
            kind = self.kind.bits(),
            "hidden container filled"
        );
    }

    /// Make sure the current board has a row to give
    ///
    /// Promotes the next non-empty queued board when the current one is
    /// drained, re-queueing the templates first for endless containers.
    pub fn check_next(&mut self) {
        if self.current.as_ref().is_some_and(|b| !b.is_empty()) {
            return;
        }
        self.current = None;

        if self.boards.iter().all(HiddenBoard::is_empty) {
            self.restock();
        }

        while let Some(board) = self.boards.pop_front() {
            if !board.is_empty() {
                self.current = Some(board);
                return;
            }
        }
    }

    fn restock(&mut self) {
        if !self.kind.is_endless() || self.templates.is_empty() {
            return;
        }
        let mut boards = self.templates.clone();
        if self.kind.is_random() {
            boards = self.rng.take_in_random_order(boards);
        }
        debug!(boards = boards.len(), "restocking endless hidden content");
        self.boards = boards.into();
    }

    /// Reveal the next row
    ///
    /// `None` once nothing is left.
    pub fn generate_row(
        &mut self,
        generator: &mut BubbleGenerator,
        registry: &BubbleModelRegistry,
        textures: &dyn TextureContext,
    ) -> Option<RevealedRow> {
        self.check_next();
        let row = self.current.as_mut()?.pop_row()?;
        Some(row.generate(generator, registry, textures))
    }

    /// Reveal every remaining row of the current board
    pub fn generate_board(
        &mut self,
        generator: &mut BubbleGenerator,
        registry: &BubbleModelRegistry,
        textures: &dyn TextureContext,
    ) -> Vec<RevealedRow> {
        self.check_next();
        match self.current.take() {
            Some(board) => board
                .rows()
                .map(|row| row.generate(generator, registry, textures))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Reveal everything queued
    ///
    /// Endless containers are drained for the current cycle only.
    pub fn generate(
        &mut self,
        generator: &mut BubbleGenerator,
        registry: &BubbleModelRegistry,
        textures: &dyn TextureContext,
    ) -> Vec<RevealedRow> {
        self.check_next();
        let boards: Vec<HiddenBoard> = self
            .current
            .take()
            .into_iter()
            .chain(self.boards.drain(..))
            .collect();
        boards
            .iter()
            .flat_map(HiddenBoard::rows)
            .map(|row| row.generate(generator, registry, textures))
            .collect()
    }

    /// Next row to be revealed, without revealing it
    pub fn peek_row(&self) -> Option<&HiddenRow> {
        self.current
            .iter()
            .chain(self.boards.iter())
            .find_map(HiddenBoard::front)
    }

    /// Non-invalid identifiers over every row still staged
    pub fn valid_bubble_count(&self) -> usize {
        self.staged().map(HiddenBoard::valid_bubble_count).sum()
    }

    pub fn row_count(&self) -> usize {
        self.staged().map(HiddenBoard::row_count).sum()
    }

    /// Boards with rows left, including the current one
    pub fn board_count(&self) -> usize {
        self.staged().filter(|b| !b.is_empty()).count()
    }

    /// True when no row can be revealed any more
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 && !(self.kind.is_endless() && !self.templates.is_empty())
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.boards.clear();
        self.templates.clear();
    }

    pub fn column_style(&self) -> BoardColumnStyle {
        self.columns
    }

    pub fn container_type(&self) -> HiddenBubbleContainerType {
        self.kind
    }

    fn staged(&self) -> impl Iterator<Item = &HiddenBoard> {
        self.current.iter().chain(self.boards.iter())
    }
}
