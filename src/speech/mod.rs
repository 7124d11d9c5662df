//! Read-aloud support: playback arbitration and word highlighting

pub mod highlight;
pub mod playback;

pub use highlight::{
    highlight_cell, highlight_ingredient, highlight_instruction, HighlightSpan,
    IngredientHighlight, WordRange,
};
pub use playback::{
    PlaybackArbiter, PlayerState, SpeechEngine, SpeechEvent, Track, TrackHandle, Utterance,
};
