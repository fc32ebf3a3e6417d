//! Board module - designer bubble grids
//!
//! A board is 14 rows of identifiers, each row as wide as the board's column
//! style (8 to 16). Row 0 is the top of the play field.
//!
//! Every index is clamped instead of checked: a row past the bottom reads the
//! last row and a column past the edge reads the last column. Callers never
//! see a panic or an error for out-of-range cells.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::identifier::BubbleIdentifier;
use crate::types::{BoardColumnStyle, BubbleColor, VISIBLE_ROWS};

/// Fixed-height grid of bubble identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBoard")]
pub struct BinaryBubbleBoard {
    columns: BoardColumnStyle,
    rows: Vec<Vec<BubbleIdentifier>>,
}

/// Unchecked shape accepted when deserializing
#[derive(Deserialize)]
struct RawBoard {
    #[serde(default)]
    columns: BoardColumnStyle,
    #[serde(default)]
    rows: Vec<Vec<BubbleIdentifier>>,
}

impl From<RawBoard> for BinaryBubbleBoard {
    fn from(raw: RawBoard) -> Self {
        BinaryBubbleBoard::from_rows(raw.columns, raw.rows)
    }
}

impl BinaryBubbleBoard {
    /// Create an empty board
    pub fn new(columns: BoardColumnStyle) -> Self {
        Self {
            columns,
            rows: vec![vec![BubbleIdentifier::invalid(); columns.column_count()]; VISIBLE_ROWS],
        }
    }

    /// Build from row data, padding or cutting to the fixed shape
    pub fn from_rows(columns: BoardColumnStyle, rows: Vec<Vec<BubbleIdentifier>>) -> Self {
        let mut board = Self::new(columns);
        for (target, source) in board.rows.iter_mut().zip(rows) {
            for (cell, id) in target.iter_mut().zip(source) {
                *cell = id;
            }
        }
        board
    }

    pub fn column_style(&self) -> BoardColumnStyle {
        self.columns
    }

    /// Change the width, keeping every cell that still fits
    pub fn set_column_style(&mut self, columns: BoardColumnStyle) {
        if self.columns != columns {
            self.columns = columns;
            for row in &mut self.rows {
                row.resize(columns.column_count(), BubbleIdentifier::invalid());
            }
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.column_count()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    fn clamp(&self, row: usize, column: usize) -> (usize, usize) {
        (
            row.min(VISIBLE_ROWS - 1),
            column.min(self.column_count() - 1),
        )
    }

    /// Store `bubble` at the (clamped) cell and return it
    pub fn insert_bubble(
        &mut self,
        row: usize,
        column: usize,
        bubble: BubbleIdentifier,
    ) -> &mut BubbleIdentifier {
        let cell = self.peek_bubble_mut(row, column);
        *cell = bubble;
        cell
    }

    pub fn insert(
        &mut self,
        row: usize,
        column: usize,
        model: &str,
        color: BubbleColor,
    ) -> &mut BubbleIdentifier {
        self.insert_bubble(row, column, BubbleIdentifier::new(model, color))
    }

    pub fn peek_bubble(&self, row: usize, column: usize) -> &BubbleIdentifier {
        let (row, column) = self.clamp(row, column);
        &self.rows[row][column]
    }

    pub fn peek_bubble_mut(&mut self, row: usize, column: usize) -> &mut BubbleIdentifier {
        let (row, column) = self.clamp(row, column);
        &mut self.rows[row][column]
    }

    pub fn peek_row(&self, row: usize) -> &[BubbleIdentifier] {
        &self.rows[row.min(VISIBLE_ROWS - 1)]
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[BubbleIdentifier]> + ExactSizeIterator {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Reset every cell to the invalid identifier
    pub fn clear(&mut self) {
        for cell in self.rows.iter_mut().flatten() {
            *cell = BubbleIdentifier::invalid();
        }
    }

    pub fn valid_bubble_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|id| id.is_valid())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_bubble_count() == 0
    }
}

impl Default for BinaryBubbleBoard {
    fn default() -> Self {
        Self::new(BoardColumnStyle::default())
    }
}

impl Index<(usize, usize)> for BinaryBubbleBoard {
    type Output = BubbleIdentifier;

    fn index(&self, (row, column): (usize, usize)) -> &BubbleIdentifier {
        self.peek_bubble(row, column)
    }
}

impl IndexMut<(usize, usize)> for BinaryBubbleBoard {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut BubbleIdentifier {
        self.peek_bubble_mut(row, column)
    }
}

impl Index<usize> for BinaryBubbleBoard {
    type Output = [BubbleIdentifier];

    fn index(&self, row: usize) -> &[BubbleIdentifier] {
        self.peek_row(row)
    }
}
