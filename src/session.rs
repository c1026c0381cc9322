use std::time::Instant;

/// Where a session is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingFirstInput,
    InProgress,
    Finished,
    Interrupted,
}

impl Phase {
    /// No further input is processed once this is true.
    pub fn is_done(self) -> bool {
        matches!(self, Phase::Finished | Phase::Interrupted)
    }
}

/// Position inside the current word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Between words: the previous word is complete and the next one has not
    /// been entered with a separator yet.
    Between,
    At(usize),
}

/// Mutable typing progress for one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub word_index: usize,
    pub cursor: Cursor,
    /// Keystrokes that advanced the cursor, net of backspaces.
    pub typed: usize,
    pub started_at: Option<Instant>,
    pub phase: Phase,
    /// Number of words in the sentence.
    pub word_count: usize,
}

impl SessionState {
    pub fn new(word_count: usize) -> Self {
        let phase = if word_count == 0 {
            Phase::Finished
        } else {
            Phase::AwaitingFirstInput
        };
        Self {
            word_index: 0,
            cursor: Cursor::At(0),
            typed: 0,
            started_at: None,
            phase,
            word_count,
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase.is_done()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_waits_at_first_letter() {
        let s = SessionState::new(3);
        assert_eq!(s.word_index, 0);
        assert_eq!(s.cursor, Cursor::At(0));
        assert_eq!(s.typed, 0);
        assert_eq!(s.phase, Phase::AwaitingFirstInput);
        assert!(!s.has_started());
        assert!(!s.is_done());
    }

    #[test]
    fn empty_sentence_is_already_finished() {
        let s = SessionState::new(0);
        assert_eq!(s.phase, Phase::Finished);
        assert_eq!(s.word_index, s.word_count);
    }

    #[test]
    fn only_finished_and_interrupted_are_done() {
        assert!(!Phase::AwaitingFirstInput.is_done());
        assert!(!Phase::InProgress.is_done());
        assert!(Phase::Finished.is_done());
        assert!(Phase::Interrupted.is_done());
    }
}
