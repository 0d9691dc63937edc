//! Numeric fact extraction from rendered listing text.

use regex::Regex;

/// Pulls prices and sizes out of listing text.
///
/// Both patterns locate a digit run (dot-grouped thousands accepted)
/// immediately preceding the unit glyph. Text that does not match yields no
/// fact; a listing with placeholder price text is skipped, not flagged.
pub struct FactExtractor {
    price: Regex,
    size: Regex,
}

impl FactExtractor {
    pub fn new() -> Self {
        Self {
            price: Regex::new(r"(\d+(?:\.\d{3})*)\s*€").unwrap(),
            size: Regex::new(r"(\d+(?:\.\d{3})*)\s*τ\.μ\.").unwrap(),
        }
    }

    /// Price in whole euros, if the text carries one.
    pub fn price(&self, text: &str) -> Option<u32> {
        self.first_number(&self.price, text)
    }

    /// Size in square meters, if the text carries one.
    pub fn size(&self, text: &str) -> Option<u32> {
        self.first_number(&self.size, text)
    }

    fn first_number(&self, pattern: &Regex, text: &str) -> Option<u32> {
        let grouped = pattern.captures(text)?.get(1)?.as_str();
        grouped.replace('.', "").parse().ok()
    }
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self::new()
    }
}
