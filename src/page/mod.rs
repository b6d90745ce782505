//! Page and project model.
//!
//! A [`Page`] owns everything placed on one scoresheet: notation symbols,
//! text, articulations, lines, the ink history, and the metadata settings.
//! A [`Project`] is an ordered list of pages with one current page.

pub mod elements;
pub mod hit;
pub mod observer;
pub mod settings;

pub use elements::{
    ArticulationElement, ArticulationKind, ElementId, LineElement, PlacedSymbol, TextElement,
    TextStyle,
};
pub use hit::{HitTarget, HitTolerance, hit_test};
pub use observer::{NullObserver, PageObserver};
pub use settings::{LabelKind, LabelPositions, PageSettings};

use crate::draw::Color;
use crate::draw::ink::{DrawnStroke, InkOp};
use crate::placement::CursorState;
use serde::{Deserialize, Serialize};

/// One scoresheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    next_id: u64,
    symbols: Vec<PlacedSymbol>,
    texts: Vec<TextElement>,
    articulations: Vec<ArticulationElement>,
    lines: Vec<LineElement>,
    ink: Vec<InkOp>,
    pub settings: PageSettings,
    /// Derived from `symbols`; restored by the placement engine after load
    #[serde(skip)]
    pub(crate) cursor: CursorState,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> ElementId {
        // Ids from older files may exceed the stored counter
        let floor = self.max_id().map_or(0, |id| id.0 + 1);
        self.next_id = self.next_id.max(floor);
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn max_id(&self) -> Option<ElementId> {
        self.symbols
            .iter()
            .map(|s| s.id)
            .chain(self.texts.iter().map(|t| t.id))
            .chain(self.articulations.iter().map(|a| a.id))
            .chain(self.lines.iter().map(|l| l.id))
            .max()
    }

    /// Returns true if nothing has been placed or drawn.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
            && self.texts.is_empty()
            && self.articulations.is_empty()
            && self.lines.is_empty()
            && self.ink.is_empty()
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    // ------------------------------------------------------------------
    // Symbols (mutated through the placement engine)
    // ------------------------------------------------------------------

    /// Placed symbols in insertion order.
    pub fn symbols(&self) -> &[PlacedSymbol] {
        &self.symbols
    }

    pub fn symbol(&self, id: ElementId) -> Option<&PlacedSymbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    pub(crate) fn symbol_mut(&mut self, id: ElementId) -> Option<&mut PlacedSymbol> {
        self.symbols.iter_mut().find(|s| s.id == id)
    }

    pub(crate) fn push_symbol(
        &mut self,
        trigger: char,
        x: f64,
        y: f64,
        stave: usize,
        octave: Option<i8>,
    ) -> &PlacedSymbol {
        let id = self.allocate_id();
        let index = self.symbols.len();
        self.symbols.push(PlacedSymbol {
            id,
            trigger,
            x,
            y,
            stave,
            octave,
        });
        &self.symbols[index]
    }

    pub(crate) fn pop_symbol(&mut self) -> Option<PlacedSymbol> {
        self.symbols.pop()
    }

    pub(crate) fn remove_symbol(&mut self, id: ElementId) -> Option<PlacedSymbol> {
        let index = self.symbols.iter().position(|s| s.id == id)?;
        Some(self.symbols.remove(index))
    }

    pub(crate) fn clear_symbols(&mut self) -> Vec<PlacedSymbol> {
        std::mem::take(&mut self.symbols)
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    pub fn texts(&self) -> &[TextElement] {
        &self.texts
    }

    pub fn text(&self, id: ElementId) -> Option<&TextElement> {
        self.texts.iter().find(|t| t.id == id)
    }

    pub fn text_mut(&mut self, id: ElementId) -> Option<&mut TextElement> {
        self.texts.iter_mut().find(|t| t.id == id)
    }

    pub fn add_text(&mut self, content: String, x: f64, y: f64, font_size: f64) -> &TextElement {
        let id = self.allocate_id();
        let index = self.texts.len();
        self.texts.push(TextElement {
            id,
            content,
            x,
            y,
            font_size,
            bold: false,
            italic: false,
            underline: false,
        });
        &self.texts[index]
    }

    pub fn remove_text(&mut self, id: ElementId) -> Option<TextElement> {
        let index = self.texts.iter().position(|t| t.id == id)?;
        Some(self.texts.remove(index))
    }

    // ------------------------------------------------------------------
    // Articulations
    // ------------------------------------------------------------------

    pub fn articulations(&self) -> &[ArticulationElement] {
        &self.articulations
    }

    pub fn articulation_mut(&mut self, id: ElementId) -> Option<&mut ArticulationElement> {
        self.articulations.iter_mut().find(|a| a.id == id)
    }

    pub fn add_articulation(
        &mut self,
        kind: ArticulationKind,
        x: f64,
        y: f64,
    ) -> &ArticulationElement {
        let id = self.allocate_id();
        let index = self.articulations.len();
        self.articulations.push(ArticulationElement {
            id,
            kind,
            symbol: kind.symbol().to_string(),
            x,
            y,
        });
        &self.articulations[index]
    }

    pub fn remove_articulation(&mut self, id: ElementId) -> Option<ArticulationElement> {
        let index = self.articulations.iter().position(|a| a.id == id)?;
        Some(self.articulations.remove(index))
    }

    /// Removes every articulation whose centre is within `radius` of
    /// `(x, y)`, boundary included. Returns the removed ids.
    pub fn remove_articulations_within(&mut self, x: f64, y: f64, radius: f64) -> Vec<ElementId> {
        let mut removed = Vec::new();
        self.articulations.retain(|a| {
            let hit = (a.x - x).hypot(a.y - y) <= radius;
            if hit {
                removed.push(a.id);
            }
            !hit
        });
        removed
    }

    // ------------------------------------------------------------------
    // Lines
    // ------------------------------------------------------------------

    pub fn lines(&self) -> &[LineElement] {
        &self.lines
    }

    pub fn line_mut(&mut self, id: ElementId) -> Option<&mut LineElement> {
        self.lines.iter_mut().find(|l| l.id == id)
    }

    pub fn add_line(
        &mut self,
        (x1, y1): (f64, f64),
        (x2, y2): (f64, f64),
        color: Color,
        thickness: f64,
    ) -> &LineElement {
        let id = self.allocate_id();
        let index = self.lines.len();
        self.lines.push(LineElement {
            id,
            x1,
            y1,
            x2,
            y2,
            color,
            thickness,
        });
        &self.lines[index]
    }

    pub fn remove_line(&mut self, id: ElementId) -> Option<LineElement> {
        let index = self.lines.iter().position(|l| l.id == id)?;
        Some(self.lines.remove(index))
    }

    // ------------------------------------------------------------------
    // Ink
    // ------------------------------------------------------------------

    /// Ink history in the order it was recorded.
    pub fn ink(&self) -> &[InkOp] {
        &self.ink
    }

    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> impl Iterator<Item = &DrawnStroke> {
        self.ink.iter().filter_map(|op| match op {
            InkOp::Stroke(stroke) => Some(stroke),
            InkOp::Erase { .. } => None,
        })
    }

    pub fn push_ink(&mut self, op: InkOp) {
        self.ink.push(op);
    }

    /// Removes the newest committed stroke. Eraser dabs recorded after it
    /// stay in the history unless no stroke precedes them any more.
    pub fn pop_stroke(&mut self) -> Option<DrawnStroke> {
        let index = self
            .ink
            .iter()
            .rposition(|op| matches!(op, InkOp::Stroke(_)))?;
        let removed = match self.ink.remove(index) {
            InkOp::Stroke(stroke) => Some(stroke),
            InkOp::Erase { .. } => None,
        };

        let first_stroke = self
            .ink
            .iter()
            .position(|op| matches!(op, InkOp::Stroke(_)))
            .unwrap_or(self.ink.len());
        self.ink.drain(..first_stroke);
        removed
    }

    pub fn clear_ink(&mut self) {
        self.ink.clear();
    }

    /// Removes everything except the settings.
    pub(crate) fn clear_elements(&mut self) {
        self.symbols.clear();
        self.texts.clear();
        self.articulations.clear();
        self.lines.clear();
        self.ink.clear();
    }
}

/// Ordered pages with a current page. Always holds at least one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pages: Vec<Page>,
    current: usize,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            title: "Untitled score".to_string(),
            pages: vec![Page::new()],
            current: 0,
        }
    }
}

impl Project {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Restores the at-least-one-page invariant after deserialization.
    pub(crate) fn normalize(&mut self) {
        if self.pages.is_empty() {
            log::warn!("Project had no pages; adding an empty page");
            self.pages.push(Page::new());
        }
        if self.current >= self.pages.len() {
            log::warn!(
                "Current page index {} out of range; using page 0",
                self.current
            );
            self.current = 0;
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub(crate) fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.current]
    }

    pub fn current_page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.current]
    }

    /// Appends an empty page and returns its index.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::new());
        self.pages.len() - 1
    }

    /// Makes `index` the current page. Returns false if out of range.
    pub fn switch_to(&mut self, index: usize) -> bool {
        if index >= self.pages.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// Removes a page; the last remaining page cannot be removed.
    pub fn remove_page(&mut self, index: usize) -> Option<Page> {
        if self.pages.len() <= 1 || index >= self.pages.len() {
            return None;
        }
        let page = self.pages.remove(index);
        if self.current > index || self.current >= self.pages.len() {
            self.current = self.current.saturating_sub(1);
        }
        Some(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BLACK;
    use crate::util::Point;

    #[test]
    fn ids_are_unique_across_collections() {
        let mut page = Page::new();
        let a = page.push_symbol('c', 170.0, 200.0, 0, None).id;
        let b = page.add_text("Allegro".into(), 10.0, 10.0, 16.0).id;
        let c = page.add_articulation(ArticulationKind::Accent, 5.0, 5.0).id;
        let d = page.add_line((0.0, 0.0), (10.0, 0.0), BLACK, 2.0).id;
        assert!(a < b && b < c && c < d);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut page = Page::new();
        let first = page.push_symbol('c', 170.0, 200.0, 0, None).id;
        page.pop_symbol();
        let second = page.push_symbol('c', 170.0, 200.0, 0, None).id;
        assert_ne!(first, second);
    }

    #[test]
    fn loaded_pages_allocate_above_existing_ids() {
        let json = r#"{"symbols":[{"id":41,"trigger":"c","x":170.0,"y":200.0}]}"#;
        let mut page: Page = serde_json::from_str(json).unwrap();
        let id = page.add_text("x".into(), 0.0, 0.0, 12.0).id;
        assert_eq!(id, ElementId(42));
    }

    #[test]
    fn articulation_removal_is_inclusive() {
        let mut page = Page::new();
        let inside = page.add_articulation(ArticulationKind::Staccato, 100.0, 100.0).id;
        let boundary = page.add_articulation(ArticulationKind::Accent, 110.0, 100.0).id;
        let outside = page.add_articulation(ArticulationKind::Tenuto, 111.0, 100.0).id;

        let removed = page.remove_articulations_within(100.0, 100.0, 10.0);
        assert_eq!(removed, vec![inside, boundary]);
        assert_eq!(page.articulations().len(), 1);
        assert_eq!(page.articulations()[0].id, outside);
    }

    #[test]
    fn pop_stroke_keeps_erase_ops_that_follow_a_stroke() {
        let stroke = || {
            InkOp::Stroke(DrawnStroke {
                points: vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)],
                color: BLACK,
                thickness: 2.0,
            })
        };
        let erase = InkOp::Erase {
            x: 1.0,
            y: 1.0,
            radius: 3.0,
        };
        let mut page = Page::new();
        page.push_ink(stroke());
        page.push_ink(stroke());
        page.push_ink(erase.clone());

        assert!(page.pop_stroke().is_some());
        assert_eq!(page.ink().len(), 2);
        assert_eq!(page.ink()[1], erase);

        // The dab no longer follows any stroke
        assert!(page.pop_stroke().is_some());
        assert!(page.ink().is_empty());
        assert!(page.is_empty());
        assert!(page.pop_stroke().is_none());
    }

    #[test]
    fn project_keeps_one_page() {
        let mut project = Project::default();
        assert!(project.remove_page(0).is_none());

        let second = project.add_page();
        assert!(project.switch_to(second));
        assert!(project.remove_page(second).is_some());
        assert_eq!(project.current_index(), 0);
        assert!(!project.switch_to(5));
    }

    #[test]
    fn normalize_repairs_empty_project() {
        let mut project: Project = serde_json::from_str(r#"{"pages":[],"current":3}"#).unwrap();
        project.normalize();
        assert_eq!(project.page_count(), 1);
        assert_eq!(project.current_index(), 0);
    }
}
