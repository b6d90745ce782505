//! Placement engine: where notation symbols land on the sheet.
//!
//! Symbols are placed either at a clicked position (click mode) or at an
//! auto-advancing cursor (sequential mode, driven by keyboard or MIDI). The
//! cursor is never stored independently of the symbols it follows: after
//! every change to a page's symbol list it is re-derived from the last
//! placed symbol. Line breaks are the one exception and move the cursor
//! without touching the list.

use crate::config::SheetConfig;
use crate::notation::SymbolDescriptor;
use crate::page::{ElementId, Page, PlacedSymbol};
use crate::util::clamp_to_range;
use thiserror::Error;

/// Insertion point for the next sequential placement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    pub next_insert_x: f64,
    /// Index into the layout's line positions
    pub current_line_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no room left on the page: line {} is the last line", line + 1)]
    LinesExhausted { line: usize },
}

/// Sheet geometry used for placement decisions.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub width: f64,
    pub height: f64,
    /// Inset applied to click placements
    pub margin: f64,
    pub left_boundary: f64,
    pub right_boundary: f64,
    /// Horizontal advance after each sequential placement
    pub increment: f64,
    line_positions: Vec<f64>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self::from(&SheetConfig::default())
    }
}

impl From<&SheetConfig> for SheetLayout {
    fn from(config: &SheetConfig) -> Self {
        let mut line_positions = config.line_positions.clone();
        if line_positions.is_empty() {
            line_positions = SheetConfig::default().line_positions;
        }
        line_positions.sort_by(f64::total_cmp);

        Self {
            width: config.width,
            height: config.height,
            margin: config.margin,
            left_boundary: config.left_boundary,
            right_boundary: config.right_boundary,
            increment: config.increment,
            line_positions,
        }
    }
}

impl SheetLayout {
    /// Line Y positions, top to bottom. Never empty.
    pub fn line_positions(&self) -> &[f64] {
        &self.line_positions
    }

    pub fn last_line(&self) -> usize {
        self.line_positions.len() - 1
    }

    /// Y of a line; indices past the end resolve to the last line.
    pub fn line_y(&self, index: usize) -> f64 {
        self.line_positions[index.min(self.last_line())]
    }

    /// Index of the line whose Y is nearest to `y` (first wins on ties).
    pub fn nearest_line(&self, y: f64) -> usize {
        let mut best = 0;
        for (index, line_y) in self.line_positions.iter().enumerate() {
            if (line_y - y).abs() < (self.line_positions[best] - y).abs() {
                best = index;
            }
        }
        best
    }

    /// Clamps a click into the placeable area.
    pub fn clamp_click(&self, x: f64, y: f64) -> (f64, f64) {
        (
            clamp_to_range(x, self.margin, self.width - self.margin),
            clamp_to_range(y, self.margin, self.height - self.margin),
        )
    }
}

/// Stateless placement rules over a [`SheetLayout`].
#[derive(Debug, Clone, Default)]
pub struct PlacementEngine {
    layout: SheetLayout,
}

impl PlacementEngine {
    pub fn new(layout: SheetLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// Cursor for a page with no symbols.
    pub fn initial_cursor(&self) -> CursorState {
        CursorState {
            next_insert_x: self.layout.left_boundary,
            current_line_index: 0,
        }
    }

    /// Derives the cursor from the last placed symbol.
    pub fn derive_cursor(&self, page: &Page) -> CursorState {
        match page.symbols().last() {
            Some(last) => CursorState {
                next_insert_x: last.x + self.layout.increment,
                current_line_index: self.layout.nearest_line(last.y),
            },
            None => self.initial_cursor(),
        }
    }

    /// Recomputes a page's cursor from its symbol list.
    pub fn rederive(&self, page: &mut Page) {
        page.cursor = self.derive_cursor(page);
        log::debug!(
            "Cursor at x={} line={}",
            page.cursor.next_insert_x,
            page.cursor.current_line_index
        );
    }

    /// Places a symbol at a clicked position, clamped into the sheet margins.
    pub fn place_at_click<'p>(
        &self,
        page: &'p mut Page,
        symbol: &SymbolDescriptor,
        x: f64,
        y: f64,
    ) -> &'p PlacedSymbol {
        let (x, y) = self.layout.clamp_click(x, y);
        let stave = self.layout.nearest_line(y);
        let index = page.symbols().len();
        page.push_symbol(symbol.trigger, x, y, stave, None);
        self.rederive(page);
        &page.symbols()[index]
    }

    /// Places a symbol at the cursor, wrapping to the next line when it
    /// would cross the right boundary.
    ///
    /// Rejected placements leave the page untouched.
    pub fn place_sequential<'p>(
        &self,
        page: &'p mut Page,
        symbol: &SymbolDescriptor,
        octave: Option<i8>,
    ) -> Result<&'p PlacedSymbol, PlacementError> {
        let cursor = page.cursor();
        let mut x = cursor.next_insert_x;
        let mut line = cursor.current_line_index.min(self.layout.last_line());

        if x + symbol.width > self.layout.right_boundary {
            if line >= self.layout.last_line() {
                return Err(PlacementError::LinesExhausted { line });
            }
            x = self.layout.left_boundary;
            line += 1;
        }

        let y = self.layout.line_y(line);
        let index = page.symbols().len();
        page.push_symbol(symbol.trigger, x, y, line, octave);
        page.cursor = CursorState {
            next_insert_x: x + self.layout.increment,
            current_line_index: line,
        };
        Ok(&page.symbols()[index])
    }

    /// Moves the cursor to the start of the next line.
    pub fn line_break(&self, page: &mut Page) -> Result<(), PlacementError> {
        let line = page.cursor.current_line_index;
        if line >= self.layout.last_line() {
            return Err(PlacementError::LinesExhausted { line });
        }
        page.cursor = CursorState {
            next_insert_x: self.layout.left_boundary,
            current_line_index: line + 1,
        };
        Ok(())
    }

    /// Removes the most recently placed symbol.
    pub fn undo_last(&self, page: &mut Page) -> Option<PlacedSymbol> {
        let removed = page.pop_symbol()?;
        self.rederive(page);
        Some(removed)
    }

    /// Removes a symbol by id and re-derives the cursor from the new last symbol.
    pub fn remove(&self, page: &mut Page, id: ElementId) -> Option<PlacedSymbol> {
        let removed = page.remove_symbol(id)?;
        self.rederive(page);
        Some(removed)
    }

    /// Removes every symbol on the page.
    pub fn clear(&self, page: &mut Page) -> Vec<PlacedSymbol> {
        let removed = page.clear_symbols();
        self.rederive(page);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::NotationRegistry;

    fn setup() -> (PlacementEngine, Page, SymbolDescriptor) {
        let engine = PlacementEngine::default();
        let mut page = Page::new();
        engine.rederive(&mut page);
        let quarter = NotationRegistry::builtin().lookup('c').cloned().unwrap();
        (engine, page, quarter)
    }

    #[test]
    fn default_layout_matches_sheet() {
        let layout = SheetLayout::default();
        assert_eq!(layout.line_positions().len(), 11);
        assert_eq!(layout.line_y(0), 200.0);
        assert_eq!(layout.line_y(10), 1200.0);
        assert_eq!(layout.line_y(99), 1200.0);
    }

    #[test]
    fn sequential_placements_advance_by_increment() {
        let (engine, mut page, quarter) = setup();
        let xs: Vec<f64> = (0..3)
            .map(|_| engine.place_sequential(&mut page, &quarter, None).unwrap().x)
            .collect();
        assert_eq!(xs, vec![170.0, 220.0, 270.0]);
        assert!(page.symbols().iter().all(|s| s.y == 200.0));
        assert_eq!(page.cursor().next_insert_x, 320.0);
    }

    #[test]
    fn placement_wraps_at_right_boundary() {
        let (engine, mut page, quarter) = setup();
        page.cursor = CursorState {
            next_insert_x: 970.0,
            current_line_index: 0,
        };

        let placed = engine.place_sequential(&mut page, &quarter, None).unwrap();
        assert_eq!((placed.x, placed.y, placed.stave), (170.0, 300.0, 1));
        assert_eq!(
            page.cursor(),
            CursorState {
                next_insert_x: 220.0,
                current_line_index: 1
            }
        );
    }

    #[test]
    fn last_line_overflow_is_rejected_without_mutation() {
        let (engine, mut page, quarter) = setup();
        page.cursor = CursorState {
            next_insert_x: 970.0,
            current_line_index: 10,
        };
        let before = page.clone();

        let err = engine.place_sequential(&mut page, &quarter, None).unwrap_err();
        assert_eq!(err, PlacementError::LinesExhausted { line: 10 });
        assert_eq!(page, before);
    }

    #[test]
    fn line_break_moves_to_next_line_start() {
        let (engine, mut page, quarter) = setup();
        engine.place_sequential(&mut page, &quarter, None).unwrap();
        engine.line_break(&mut page).unwrap();
        assert_eq!(page.symbols().len(), 1);

        let placed = engine.place_sequential(&mut page, &quarter, None).unwrap();
        assert_eq!((placed.x, placed.y), (170.0, 300.0));
    }

    #[test]
    fn line_break_on_last_line_is_rejected() {
        let (engine, mut page, _) = setup();
        for _ in 0..10 {
            engine.line_break(&mut page).unwrap();
        }
        assert!(engine.line_break(&mut page).is_err());
        assert_eq!(page.cursor().current_line_index, 10);
    }

    #[test]
    fn undo_last_rederives_cursor() {
        let (engine, mut page, quarter) = setup();
        for _ in 0..3 {
            engine.place_sequential(&mut page, &quarter, None).unwrap();
        }

        let removed = engine.undo_last(&mut page).unwrap();
        assert_eq!(removed.x, 270.0);
        assert_eq!(page.cursor().next_insert_x, 270.0);

        engine.undo_last(&mut page);
        engine.undo_last(&mut page);
        assert_eq!(page.cursor(), engine.initial_cursor());
        assert!(engine.undo_last(&mut page).is_none());
    }

    #[test]
    fn undo_after_line_break_returns_to_previous_line() {
        let (engine, mut page, quarter) = setup();
        engine.place_sequential(&mut page, &quarter, None).unwrap();
        engine.line_break(&mut page).unwrap();
        engine.place_sequential(&mut page, &quarter, None).unwrap();

        engine.undo_last(&mut page);
        assert_eq!(
            page.cursor(),
            CursorState {
                next_insert_x: 220.0,
                current_line_index: 0
            }
        );
    }

    #[test]
    fn click_placement_is_clamped_and_moves_cursor() {
        let (engine, mut page, quarter) = setup();
        let placed = engine.place_at_click(&mut page, &quarter, 5.0, 1390.0);
        assert_eq!((placed.x, placed.y), (20.0, 1380.0));
        assert_eq!(placed.stave, 10);

        // The cursor follows the list, so the next sequential symbol lands after it
        assert_eq!(page.cursor().next_insert_x, 70.0);
        assert_eq!(page.cursor().current_line_index, 10);
    }

    #[test]
    fn remove_by_id_rederives_from_new_last() {
        let (engine, mut page, quarter) = setup();
        let first = engine.place_sequential(&mut page, &quarter, None).unwrap().id;
        engine.place_sequential(&mut page, &quarter, None).unwrap();
        let last = engine.place_sequential(&mut page, &quarter, None).unwrap().id;

        engine.remove(&mut page, first).unwrap();
        assert_eq!(page.cursor().next_insert_x, 320.0);
        engine.remove(&mut page, last).unwrap();
        assert_eq!(page.cursor().next_insert_x, 270.0);
        assert!(engine.remove(&mut page, first).is_none());
    }

    #[test]
    fn nearest_line_prefers_first_on_tie() {
        let layout = SheetLayout::default();
        assert_eq!(layout.nearest_line(250.0), 0);
        assert_eq!(layout.nearest_line(251.0), 1);
        assert_eq!(layout.nearest_line(-40.0), 0);
    }
}
