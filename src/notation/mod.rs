//! Notation registry: trigger characters to symbol descriptors.
//!
//! Triggers are case-sensitive, so `c` (quarter note) and `C` (dotted
//! quarter note) are distinct symbols. The built-in table covers `a`-`z`
//! and `A`-`S`.

pub mod midi;

use std::collections::HashMap;

/// Static description of a placeable notation symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolDescriptor {
    /// Character that places this symbol from the keyboard
    pub trigger: char,
    /// Stable identifier (kebab-case)
    pub name: &'static str,
    /// Unicode glyph used when rendering
    pub glyph: &'static str,
    /// Image asset path relative to the host's asset root
    pub asset: &'static str,
    /// Visual width in canvas units
    pub width: f64,
    /// Visual height in canvas units
    pub height: f64,
}

macro_rules! symbol {
    ($trigger:literal, $name:literal, $glyph:literal, $width:expr, $height:expr) => {
        SymbolDescriptor {
            trigger: $trigger,
            name: $name,
            glyph: $glyph,
            asset: concat!("notation/", $name, ".png"),
            width: $width,
            height: $height,
        }
    };
    ($trigger:literal, $name:literal, $glyph:literal, $width:expr) => {
        symbol!($trigger, $name, $glyph, $width, 64.0)
    };
}

const NOTE: f64 = 48.0;
const ACCIDENTAL: f64 = 24.0;
const CLEF: f64 = 40.0;
const BARLINE: f64 = 16.0;

const BUILTIN: &[SymbolDescriptor] = &[
    symbol!('a', "whole-note", "\u{1D15D}", NOTE),
    symbol!('b', "half-note", "\u{1D15E}", NOTE),
    symbol!('c', "quarter-note", "\u{1D15F}", NOTE),
    symbol!('d', "eighth-note", "\u{1D160}", NOTE),
    symbol!('e', "sixteenth-note", "\u{1D161}", NOTE),
    symbol!('f', "thirty-second-note", "\u{1D162}", NOTE),
    symbol!('g', "beamed-eighths", "\u{266B}", NOTE),
    symbol!('h', "beamed-sixteenths", "\u{266C}", NOTE),
    symbol!('i', "whole-rest", "\u{1D13B}", NOTE, 32.0),
    symbol!('j', "half-rest", "\u{1D13C}", NOTE, 32.0),
    symbol!('k', "quarter-rest", "\u{1D13D}", NOTE),
    symbol!('l', "eighth-rest", "\u{1D13E}", NOTE),
    symbol!('m', "sixteenth-rest", "\u{1D13F}", NOTE),
    symbol!('n', "sharp", "\u{266F}", ACCIDENTAL),
    symbol!('o', "flat", "\u{266D}", ACCIDENTAL),
    symbol!('p', "natural", "\u{266E}", ACCIDENTAL),
    symbol!('q', "double-sharp", "\u{1D12A}", ACCIDENTAL),
    symbol!('r', "double-flat", "\u{1D12B}", ACCIDENTAL),
    symbol!('s', "treble-clef", "\u{1D11E}", CLEF, 96.0),
    symbol!('t', "bass-clef", "\u{1D122}", CLEF),
    symbol!('u', "alto-clef", "\u{1D121}", CLEF),
    symbol!('v', "barline", "\u{1D100}", BARLINE),
    symbol!('w', "double-barline", "\u{1D101}", BARLINE),
    symbol!('x', "final-barline", "\u{1D102}", BARLINE),
    symbol!('y', "repeat-start", "\u{1D106}", BARLINE),
    symbol!('z', "repeat-end", "\u{1D107}", BARLINE),
    symbol!('A', "dotted-whole-note", "\u{1D15D}.", NOTE),
    symbol!('B', "dotted-half-note", "\u{1D15E}.", NOTE),
    symbol!('C', "dotted-quarter-note", "\u{1D15F}.", NOTE),
    symbol!('D', "dotted-eighth-note", "\u{1D160}.", NOTE),
    symbol!('E', "augmentation-dot", "\u{1D16D}", 12.0, 12.0),
    symbol!('F', "fermata", "\u{1D110}", NOTE, 32.0),
    symbol!('G', "breath-mark", "\u{1D112}", ACCIDENTAL, 32.0),
    symbol!('H', "caesura", "\u{1D113}", ACCIDENTAL),
    symbol!('I', "common-time", "\u{1D134}", 32.0),
    symbol!('J', "cut-time", "\u{1D135}", 32.0),
    symbol!('K', "segno", "\u{1D10B}", NOTE),
    symbol!('L', "coda", "\u{1D10C}", NOTE),
    symbol!('M', "dal-segno", "\u{1D109}", NOTE),
    symbol!('N', "da-capo", "\u{1D10A}", NOTE),
    symbol!('O', "crescendo", "\u{1D192}", 96.0, 32.0),
    symbol!('P', "decrescendo", "\u{1D193}", 96.0, 32.0),
    symbol!('Q', "tie", "\u{2040}", NOTE, 24.0),
    symbol!('R', "double-whole-note", "\u{1D15C}", 64.0),
    symbol!('S', "percussion-clef", "\u{1D125}", CLEF),
];

/// Lookup table from trigger characters to symbol descriptors.
#[derive(Debug, Clone)]
pub struct NotationRegistry {
    symbols: Vec<SymbolDescriptor>,
    by_trigger: HashMap<char, usize>,
}

impl Default for NotationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NotationRegistry {
    /// The built-in 45-symbol table.
    pub fn builtin() -> Self {
        Self::from_descriptors(BUILTIN.to_vec())
    }

    /// Builds a registry from custom descriptors. Later duplicates of a
    /// trigger replace earlier ones.
    pub fn from_descriptors(symbols: Vec<SymbolDescriptor>) -> Self {
        let mut by_trigger = HashMap::with_capacity(symbols.len());
        for (index, symbol) in symbols.iter().enumerate() {
            if let Some(previous) = by_trigger.insert(symbol.trigger, index) {
                log::warn!(
                    "Trigger '{}' is mapped twice ({} and {}); keeping {}",
                    symbol.trigger,
                    symbols[previous].name,
                    symbol.name,
                    symbol.name
                );
            }
        }
        Self {
            symbols,
            by_trigger,
        }
    }

    /// Resolves a trigger character. Unmapped characters yield `None`.
    pub fn lookup(&self, trigger: char) -> Option<&SymbolDescriptor> {
        self.by_trigger
            .get(&trigger)
            .map(|&index| &self.symbols[index])
    }

    /// Finds a descriptor by its stable name.
    pub fn by_name(&self, name: &str) -> Option<&SymbolDescriptor> {
        self.symbols.iter().find(|symbol| symbol.name == name)
    }

    /// Width of the widest symbol, 0.0 for an empty registry.
    pub fn max_width(&self) -> f64 {
        self.symbols
            .iter()
            .map(|symbol| symbol.width)
            .fold(0.0, f64::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolDescriptor> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.by_trigger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_trigger.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_45_unique_triggers() {
        let registry = NotationRegistry::builtin();
        assert_eq!(registry.len(), 45);
        assert_eq!(BUILTIN.len(), 45);
    }

    #[test]
    fn widest_builtin_symbol() {
        let registry = NotationRegistry::builtin();
        assert_eq!(registry.max_width(), 96.0);
        assert_eq!(registry.lookup('O').unwrap().width, 96.0);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = NotationRegistry::builtin();
        let lower = registry.lookup('c').unwrap();
        let upper = registry.lookup('C').unwrap();
        assert_eq!(lower.name, "quarter-note");
        assert_eq!(upper.name, "dotted-quarter-note");
        assert_ne!(lower, upper);
    }

    #[test]
    fn unmapped_keys_resolve_to_none() {
        let registry = NotationRegistry::builtin();
        assert!(registry.lookup('T').is_none());
        assert!(registry.lookup('7').is_none());
        assert!(registry.lookup(' ').is_none());
    }

    #[test]
    fn assets_follow_symbol_names() {
        let registry = NotationRegistry::builtin();
        let clef = registry.by_name("treble-clef").unwrap();
        assert_eq!(clef.trigger, 's');
        assert_eq!(clef.asset, "notation/treble-clef.png");
    }

    #[test]
    fn later_duplicates_win() {
        let mut symbols = BUILTIN[..2].to_vec();
        let mut replacement = BUILTIN[2].clone();
        replacement.trigger = 'a';
        symbols.push(replacement);

        let registry = NotationRegistry::from_descriptors(symbols);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup('a').unwrap().name, "quarter-note");
    }
}
