//! Font descriptor for text and glyph rendering.

/// Font configuration passed to Pango.
///
/// Text elements carry bold/italic flags; the descriptor turns them together
/// with the configured family into a Pango font description string.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Serif", "Bravura Text")
    pub family: String,

    /// Font weight ("normal" or "bold")
    pub weight: String,

    /// Font style ("normal" or "italic")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new("Sans".to_string(), "normal".to_string(), "normal".to_string())
    }
}

impl FontDescriptor {
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Builds a descriptor for a text element's style flags.
    pub fn for_text(family: &str, bold: bool, italic: bool) -> Self {
        Self::new(
            family.to_string(),
            if bold { "bold" } else { "normal" }.to_string(),
            if italic { "italic" } else { "normal" }.to_string(),
        )
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size", e.g. "Serif Italic Bold 16"
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if !self.style.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.style));
        }

        if !self.weight.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}", size.round() as i32));

        parts.join(" ")
    }

    /// Builds the Pango description for this font at `size`.
    pub fn to_pango(&self, size: f64) -> pango::FontDescription {
        pango::FontDescription::from_string(&self.to_pango_string(size))
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
