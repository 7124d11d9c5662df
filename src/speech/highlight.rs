//! Word highlight mapping
//!
//! Maps the spoken word's character range back onto the displayed text.
//! Offsets count `char`s (Unicode scalar values).
//!
//! Ingredient rows are spoken as `"<original measure> <name>"` but displayed
//! as two cells, the first holding the scaled/converted measure. Cell spans
//! are laid out against the original spoken text, so when the displayed
//! measure differs a lot in length from the original ("1 cup" vs "237 ml")
//! the highlight can land a few characters off. This is a known
//! approximation: aligning exactly would mean speaking the displayed text
//! instead.

use serde::{Deserialize, Serialize};

/// Character range of the word currently being spoken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRange {
    pub sentence_index: i32,
    pub start_char: i32,
    pub end_char: i32,
}

impl WordRange {
    /// No active highlight
    pub const CLEARED: WordRange = WordRange {
        sentence_index: -1,
        start_char: -1,
        end_char: -1,
    };

    /// Range from a word-boundary event (`char_index`, `char_length`)
    pub fn from_boundary(sentence_index: usize, char_index: usize, char_length: usize) -> Self {
        Self {
            sentence_index: to_i32(sentence_index),
            start_char: to_i32(char_index),
            end_char: to_i32(char_index.saturating_add(char_length)),
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.sentence_index < 0 || self.start_char < 0 || self.end_char < 0
    }

    /// Whether this range targets the given row
    pub fn is_on(&self, sentence_index: usize) -> bool {
        !self.is_cleared() && self.sentence_index as usize == sentence_index
    }
}

impl Default for WordRange {
    fn default() -> Self {
        Self::CLEARED
    }
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// A displayed string split around its highlighted word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan<'a> {
    pub before: &'a str,
    pub highlighted: &'a str,
    pub after: &'a str,
}

impl<'a> HighlightSpan<'a> {
    /// Split `text` at char offsets `start..end` (clamped to the text)
    fn split(text: &'a str, start: usize, end: usize) -> Option<Self> {
        let len = text.chars().count();
        let end = end.min(len);
        let start = start.min(end);
        if start == end {
            return None;
        }
        let start_byte = byte_offset(text, start);
        let end_byte = byte_offset(text, end);
        Some(Self {
            before: &text[..start_byte],
            highlighted: &text[start_byte..end_byte],
            after: &text[end_byte..],
        })
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Highlight within an instruction step; spoken and displayed text are the same
pub fn highlight_instruction<'a>(
    text: &'a str,
    sentence_index: usize,
    range: &WordRange,
) -> Option<HighlightSpan<'a>> {
    if !range.is_on(sentence_index) {
        return None;
    }
    HighlightSpan::split(text, range.start_char as usize, range.end_char as usize)
}

/// Highlight within one cell that starts at `cell_offset` in the spoken sentence
///
/// `cell_len` is the cell's length in the spoken sentence; the returned span
/// is clipped to both that and the displayed `text`.
pub fn highlight_cell<'a>(
    text: &'a str,
    cell_offset: usize,
    cell_len: usize,
    sentence_index: usize,
    range: &WordRange,
) -> Option<HighlightSpan<'a>> {
    if !range.is_on(sentence_index) {
        return None;
    }

    let start = range.start_char as usize;
    let end = range.end_char as usize;
    let cell_end = cell_offset + cell_len;
    if end <= cell_offset || start >= cell_end {
        return None;
    }

    let local_start = start.saturating_sub(cell_offset);
    let local_end = (end - cell_offset).min(cell_len);
    HighlightSpan::split(text, local_start, local_end)
}

/// Highlights for the two cells of an ingredient row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngredientHighlight<'a> {
    pub measure: Option<HighlightSpan<'a>>,
    pub name: Option<HighlightSpan<'a>>,
}

/// Map the spoken range onto an ingredient row's measure and name cells
///
/// `original_measure` is the measure as spoken; `displayed_measure` is what
/// the quantity cell shows after scaling and conversion.
pub fn highlight_ingredient<'a>(
    original_measure: &str,
    displayed_measure: &'a str,
    name: &'a str,
    sentence_index: usize,
    range: &WordRange,
) -> IngredientHighlight<'a> {
    let measure_len = original_measure.trim().chars().count();
    let name_len = name.chars().count();

    IngredientHighlight {
        measure: highlight_cell(displayed_measure, 0, measure_len, sentence_index, range),
        name: highlight_cell(name, measure_len + 1, name_len, sentence_index, range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleared_range() {
        assert!(WordRange::CLEARED.is_cleared());
        assert!(WordRange::default().is_cleared());
        assert!(!WordRange::CLEARED.is_on(0));
        assert_eq!(highlight_instruction("Boil milk", 0, &WordRange::CLEARED), None);
    }

    #[test]
    fn test_instruction_direct_mapping() {
        let range = WordRange::from_boundary(1, 5, 4);
        let span = highlight_instruction("Boil milk gently", 1, &range).unwrap();
        assert_eq!(span.before, "Boil ");
        assert_eq!(span.highlighted, "milk");
        assert_eq!(span.after, " gently");

        assert_eq!(highlight_instruction("Boil milk gently", 0, &range), None);
    }

    #[test]
    fn test_ingredient_word_in_measure_cell() {
        // spoken: "1/2 cup Greek yogurt", word "cup" at 4..7
        let range = WordRange::from_boundary(0, 4, 3);
        let row = highlight_ingredient("1/2 cup", "1 cup", "Greek yogurt", 0, &range);
        let measure = row.measure.unwrap();
        assert_eq!(measure.before, "1 cu");
        assert_eq!(measure.highlighted, "p");
        assert_eq!(row.name, None);
    }

    #[test]
    fn test_ingredient_word_in_name_cell() {
        // spoken: "1/2 cup Greek yogurt", word "yogurt" at 14..20
        let range = WordRange::from_boundary(0, 14, 6);
        let row = highlight_ingredient("1/2 cup", "237 ml", "Greek yogurt", 0, &range);
        assert_eq!(row.measure, None);
        let name = row.name.unwrap();
        assert_eq!(name.before, "Greek ");
        assert_eq!(name.highlighted, "yogurt");
        assert_eq!(name.after, "");
    }

    #[test]
    fn test_name_offset_uses_original_measure_length() {
        // displayed measure is much longer than the spoken one
        // spoken: "1 l milk", word "milk" at 4..8
        let range = WordRange::from_boundary(2, 4, 4);
        let row = highlight_ingredient("1 l", "4 ¼ cups", "milk", 2, &range);
        assert_eq!(row.name.unwrap().highlighted, "milk");
        assert_eq!(row.measure, None);
    }

    #[test]
    fn test_other_rows_are_not_highlighted() {
        let range = WordRange::from_boundary(3, 0, 1);
        let row = highlight_ingredient("2 cups", "2 cups", "flour", 1, &range);
        assert_eq!(row, IngredientHighlight::default());
    }

    #[test]
    fn test_range_beyond_short_display_is_clipped() {
        // spoken measure "2 tablespoons", displayed "2 tbsp"
        let range = WordRange::from_boundary(0, 2, 11);
        let row = highlight_ingredient("2 tablespoons", "2 tbsp", "oil", 0, &range);
        let measure = row.measure.unwrap();
        assert_eq!(measure.highlighted, "tbsp");
        assert_eq!(row.name, None);
    }

    #[test]
    fn test_multibyte_text() {
        let range = WordRange::from_boundary(0, 0, 1);
        let row = highlight_ingredient("½ cup", "½ cup", "sugar", 0, &range);
        assert_eq!(row.measure.unwrap().highlighted, "½");
    }
}
