//! Outbound notifications for hosts that re-render on page changes.

use super::{
    ArticulationElement, ElementId, LineElement, PageSettings, PlacedSymbol, TextElement,
};
use crate::draw::ink::InkOp;

/// Receives committed page mutations and live drag steps.
///
/// Every method has an empty default so hosts only implement what they
/// render. Calls happen synchronously from inside the input handlers.
#[allow(unused_variables)]
pub trait PageObserver {
    fn on_symbol_added(&mut self, symbol: &PlacedSymbol) {}
    fn on_symbol_moved(&mut self, symbol: &PlacedSymbol) {}
    fn on_symbol_removed(&mut self, id: ElementId) {}

    fn on_text_added(&mut self, text: &TextElement) {}
    /// Content, style, or position changed
    fn on_text_updated(&mut self, text: &TextElement) {}
    fn on_text_removed(&mut self, id: ElementId) {}

    fn on_articulation_added(&mut self, articulation: &ArticulationElement) {}
    fn on_articulation_moved(&mut self, articulation: &ArticulationElement) {}
    fn on_articulation_removed(&mut self, id: ElementId) {}

    fn on_line_added(&mut self, line: &LineElement) {}
    fn on_line_moved(&mut self, line: &LineElement) {}
    fn on_line_removed(&mut self, id: ElementId) {}

    /// The ink history changed; the overlay has already been redrawn.
    fn on_ink_changed(&mut self, ink: &[InkOp]) {}

    fn on_settings_changed(&mut self, settings: &PageSettings) {}

    fn on_page_switched(&mut self, index: usize) {}

    /// A user-visible warning, e.g. a rejected placement.
    fn on_warning(&mut self, message: &str) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl PageObserver for NullObserver {}
