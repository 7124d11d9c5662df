//! Read-aloud playback
//!
//! One arbiter owns the speech engine and at most one active track
//! (instructions or ingredients). Starting a track force-stops the other,
//! so the two can never play at once.
//!
//! State per track: `Idle -> Playing -> Paused -> Playing -> Idle`.

use serde::Serialize;

use super::highlight::WordRange;

const UTTERANCE_LANG: &str = "en-US";
const UTTERANCE_RATE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Instructions,
    Ingredients,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// A single sentence handed to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Playback session the utterance belongs to; echoed back in events
    pub session: u64,
    pub track: Track,
    pub index: usize,
    pub text: String,
    pub lang: String,
    pub rate: f32,
}

/// Callback from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechEvent {
    /// A word started; offsets are into the utterance text
    WordBoundary {
        session: u64,
        index: usize,
        char_index: usize,
        char_length: usize,
    },
    /// An utterance finished
    End { session: u64, index: usize },
}

impl SpeechEvent {
    fn session(&self) -> u64 {
        match self {
            SpeechEvent::WordBoundary { session, .. } | SpeechEvent::End { session, .. } => *session,
        }
    }
}

/// Speech synthesis engine contract
pub trait SpeechEngine {
    /// Queue an utterance after any already queued
    fn speak(&mut self, utterance: Utterance);
    fn pause(&mut self);
    fn resume(&mut self);
    /// Drop everything queued or speaking
    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy)]
struct ActiveTrack {
    track: Track,
    state: PlayerState,
    range: WordRange,
}

/// Arbitrates the single speech engine between the two tracks
pub struct PlaybackArbiter<E: SpeechEngine> {
    engine: E,
    instructions: Vec<String>,
    ingredients: Vec<String>,
    active: Option<ActiveTrack>,
    session: u64,
}

impl<E: SpeechEngine> PlaybackArbiter<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            instructions: Vec::new(),
            ingredients: Vec::new(),
            active: None,
            session: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Replace the sentences of both tracks, cancelling any playback
    pub fn load(&mut self, instructions: Vec<String>, ingredients: Vec<String>) {
        self.stop();
        self.instructions = instructions;
        self.ingredients = ingredients;
    }

    pub fn sentences(&self, track: Track) -> &[String] {
        match track {
            Track::Instructions => &self.instructions,
            Track::Ingredients => &self.ingredients,
        }
    }

    pub fn state(&self, track: Track) -> PlayerState {
        match self.active {
            Some(active) if active.track == track => active.state,
            _ => PlayerState::Idle,
        }
    }

    pub fn range(&self, track: Track) -> WordRange {
        match self.active {
            Some(active) if active.track == track => active.range,
            _ => WordRange::CLEARED,
        }
    }

    /// Start or resume a track, stopping the other one first
    pub fn play(&mut self, track: Track) {
        if matches!(self.active, Some(active) if active.track != track) {
            tracing::debug!("Stopping {:?} playback to play {:?}", self.active.map(|a| a.track), track);
            self.stop();
        }

        match self.state(track) {
            PlayerState::Playing => {}
            PlayerState::Paused => {
                self.engine.resume();
                self.set_state(PlayerState::Playing);
            }
            PlayerState::Idle => self.speak_all(track),
        }
    }

    pub fn pause(&mut self, track: Track) {
        if self.state(track) == PlayerState::Playing {
            self.engine.pause();
            self.set_state(PlayerState::Paused);
        }
    }

    /// Cancel whatever is playing and start `track` from its first sentence
    pub fn restart(&mut self, track: Track) {
        self.stop();
        self.play(track);
    }

    /// Cancel playback; later events from the cancelled session are ignored
    pub fn stop(&mut self) {
        self.engine.cancel();
        self.active = None;
        self.session += 1;
    }

    pub fn handle_event(&mut self, event: SpeechEvent) {
        if event.session() != self.session {
            tracing::trace!("Ignoring stale speech event {:?}", event);
            return;
        }
        let Some(active) = self.active.as_mut() else {
            return;
        };

        match event {
            SpeechEvent::WordBoundary {
                index,
                char_index,
                char_length,
                ..
            } => {
                active.range = WordRange::from_boundary(index, char_index, char_length);
            }
            SpeechEvent::End { index, .. } => {
                let last = match active.track {
                    Track::Instructions => self.instructions.len(),
                    Track::Ingredients => self.ingredients.len(),
                };
                if index + 1 >= last {
                    self.active = None;
                }
            }
        }
    }

    pub fn instructions(&mut self) -> TrackHandle<'_, E> {
        TrackHandle {
            arbiter: self,
            track: Track::Instructions,
        }
    }

    pub fn ingredients(&mut self) -> TrackHandle<'_, E> {
        TrackHandle {
            arbiter: self,
            track: Track::Ingredients,
        }
    }

    fn speak_all(&mut self, track: Track) {
        if self.sentences(track).is_empty() {
            return;
        }

        self.session += 1;
        let session = self.session;
        let sentences = match track {
            Track::Instructions => &self.instructions,
            Track::Ingredients => &self.ingredients,
        };
        for (index, text) in sentences.iter().enumerate() {
            self.engine.speak(Utterance {
                session,
                track,
                index,
                text: text.clone(),
                lang: UTTERANCE_LANG.to_string(),
                rate: UTTERANCE_RATE,
            });
        }

        self.active = Some(ActiveTrack {
            track,
            state: PlayerState::Playing,
            range: WordRange::CLEARED,
        });
    }

    fn set_state(&mut self, state: PlayerState) {
        if let Some(active) = self.active.as_mut() {
            active.state = state;
        }
    }
}

impl<E: SpeechEngine> Drop for PlaybackArbiter<E> {
    fn drop(&mut self) {
        if self.active.is_some() {
            self.engine.cancel();
        }
    }
}

/// One track's view of the arbiter
pub struct TrackHandle<'a, E: SpeechEngine> {
    arbiter: &'a mut PlaybackArbiter<E>,
    track: Track,
}

impl<'a, E: SpeechEngine> TrackHandle<'a, E> {
    pub fn play(&mut self) {
        self.arbiter.play(self.track);
    }

    pub fn pause(&mut self) {
        self.arbiter.pause(self.track);
    }

    pub fn restart(&mut self) {
        self.arbiter.restart(self.track);
    }

    pub fn state(&self) -> PlayerState {
        self.arbiter.state(self.track)
    }

    pub fn range(&self) -> WordRange {
        self.arbiter.range(self.track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Speak(Utterance),
        Pause,
        Resume,
        Cancel,
    }

    #[derive(Default)]
    struct RecordingEngine {
        calls: Vec<Call>,
    }

    impl RecordingEngine {
        fn spoken(&self) -> Vec<&Utterance> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Speak(u) => Some(u),
                    _ => None,
                })
                .collect()
        }

        fn count(&self, call: &Call) -> usize {
            self.calls.iter().filter(|c| *c == call).count()
        }
    }

    impl SpeechEngine for RecordingEngine {
        fn speak(&mut self, utterance: Utterance) {
            self.calls.push(Call::Speak(utterance));
        }
        fn pause(&mut self) {
            self.calls.push(Call::Pause);
        }
        fn resume(&mut self) {
            self.calls.push(Call::Resume);
        }
        fn cancel(&mut self) {
            self.calls.push(Call::Cancel);
        }
    }

    fn loaded() -> PlaybackArbiter<RecordingEngine> {
        let mut arbiter = PlaybackArbiter::new(RecordingEngine::default());
        arbiter.load(
            vec!["Boil milk".to_string(), "Add vermicelli".to_string()],
            vec!["1 cup vermicelli".to_string(), "4 cups milk".to_string()],
        );
        arbiter
    }

    fn current_session(arbiter: &PlaybackArbiter<RecordingEngine>) -> u64 {
        arbiter.engine().spoken().last().map(|u| u.session).unwrap()
    }

    #[test]
    fn test_play_speaks_all_sentences() {
        let mut arbiter = loaded();
        arbiter.instructions().play();

        let spoken = arbiter.engine().spoken();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[0].text, "Boil milk");
        assert_eq!(spoken[0].lang, "en-US");
        assert_eq!(spoken[1].index, 1);
        assert_eq!(arbiter.state(Track::Instructions), PlayerState::Playing);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut arbiter = loaded();
        arbiter.instructions().play();
        arbiter.instructions().pause();
        assert_eq!(arbiter.state(Track::Instructions), PlayerState::Paused);

        arbiter.instructions().play();
        assert_eq!(arbiter.state(Track::Instructions), PlayerState::Playing);
        assert_eq!(arbiter.engine().count(&Call::Resume), 1);
        // resuming does not re-queue the sentences
        assert_eq!(arbiter.engine().spoken().len(), 2);
    }

    #[test]
    fn test_pause_when_idle_is_ignored() {
        let mut arbiter = loaded();
        arbiter.ingredients().pause();
        assert_eq!(arbiter.state(Track::Ingredients), PlayerState::Idle);
        assert_eq!(arbiter.engine().count(&Call::Pause), 0);
    }

    #[test]
    fn test_play_while_playing_is_noop() {
        let mut arbiter = loaded();
        arbiter.instructions().play();
        arbiter.instructions().play();
        assert_eq!(arbiter.engine().spoken().len(), 2);
    }

    #[test]
    fn test_track_exclusivity() {
        let mut arbiter = loaded();
        arbiter.instructions().play();
        let session = current_session(&arbiter);
        arbiter.handle_event(SpeechEvent::WordBoundary {
            session,
            index: 0,
            char_index: 5,
            char_length: 4,
        });
        assert!(!arbiter.range(Track::Instructions).is_cleared());

        arbiter.ingredients().play();

        assert_eq!(arbiter.state(Track::Instructions), PlayerState::Idle);
        assert!(arbiter.range(Track::Instructions).is_cleared());
        assert_eq!(arbiter.state(Track::Ingredients), PlayerState::Playing);

        // the cancel happened before the ingredient sentences were queued
        let cancel_at = arbiter.engine().calls.iter().rposition(|c| *c == Call::Cancel).unwrap();
        let first_ingredient = arbiter
            .engine()
            .calls
            .iter()
            .position(|c| matches!(c, Call::Speak(u) if u.track == Track::Ingredients))
            .unwrap();
        assert!(cancel_at < first_ingredient);
    }

    #[test]
    fn test_paused_track_is_reset_when_other_starts() {
        let mut arbiter = loaded();
        arbiter.ingredients().play();
        arbiter.ingredients().pause();
        arbiter.instructions().play();
        assert_eq!(arbiter.state(Track::Ingredients), PlayerState::Idle);
        assert_eq!(arbiter.state(Track::Instructions), PlayerState::Playing);
    }

    #[test]
    fn test_word_boundaries_update_range() {
        let mut arbiter = loaded();
        arbiter.ingredients().play();
        let session = current_session(&arbiter);
        arbiter.handle_event(SpeechEvent::WordBoundary {
            session,
            index: 1,
            char_index: 2,
            char_length: 4,
        });
        assert_eq!(
            arbiter.ingredients().range(),
            WordRange { sentence_index: 1, start_char: 2, end_char: 6 }
        );
    }

    #[test]
    fn test_end_of_last_sentence_returns_to_idle() {
        let mut arbiter = loaded();
        arbiter.instructions().play();
        let session = current_session(&arbiter);

        arbiter.handle_event(SpeechEvent::End { session, index: 0 });
        assert_eq!(arbiter.state(Track::Instructions), PlayerState::Playing);

        arbiter.handle_event(SpeechEvent::End { session, index: 1 });
        assert_eq!(arbiter.state(Track::Instructions), PlayerState::Idle);
        assert!(arbiter.range(Track::Instructions).is_cleared());
    }

    #[test]
    fn test_stale_events_are_ignored() {
        let mut arbiter = loaded();
        arbiter.instructions().play();
        let old_session = current_session(&arbiter);

        arbiter.instructions().restart();
        assert_eq!(arbiter.state(Track::Instructions), PlayerState::Playing);
        assert_ne!(current_session(&arbiter), old_session);

        arbiter.handle_event(SpeechEvent::End { session: old_session, index: 1 });
        assert_eq!(arbiter.state(Track::Instructions), PlayerState::Playing);

        arbiter.handle_event(SpeechEvent::WordBoundary {
            session: old_session,
            index: 0,
            char_index: 0,
            char_length: 4,
        });
        assert!(arbiter.range(Track::Instructions).is_cleared());
    }

    #[test]
    fn test_restart_requeues_from_start() {
        let mut arbiter = loaded();
        arbiter.ingredients().play();
        arbiter.ingredients().pause();
        arbiter.ingredients().restart();

        assert_eq!(arbiter.state(Track::Ingredients), PlayerState::Playing);
        assert_eq!(arbiter.engine().spoken().len(), 4);
    }

    #[test]
    fn test_load_cancels_playback() {
        let mut arbiter = loaded();
        arbiter.instructions().play();
        arbiter.load(vec!["Serve".to_string()], Vec::new());
        assert_eq!(arbiter.state(Track::Instructions), PlayerState::Idle);
        assert_eq!(arbiter.sentences(Track::Instructions), ["Serve".to_string()]);
    }

    #[test]
    fn test_empty_track_stays_idle() {
        let mut arbiter = PlaybackArbiter::new(RecordingEngine::default());
        arbiter.ingredients().play();
        assert_eq!(arbiter.state(Track::Ingredients), PlayerState::Idle);
        assert!(arbiter.engine().spoken().is_empty());
    }
}
