use std::time::Instant;

use tracing::{debug, trace};

use crate::render::{RenderAction, Style};
use crate::session::{Cursor, Phase, SessionState};

/// Ctrl-C as delivered in raw mode.
pub const INTERRUPT: u8 = 0x03;
/// DEL, sent by the backspace key.
pub const BACKSPACE: u8 = 0x7f;

pub fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\t')
}

/// Apply one input byte to `state`.
///
/// Pure: the same state, words, byte and clock reading always produce the
/// same next state and rendering actions. `words` must hold
/// `state.word_count` non-empty words.
pub fn transition(
    state: SessionState,
    words: &[String],
    byte: u8,
    now: Instant,
) -> (SessionState, Vec<RenderAction>) {
    let mut s = state;
    let mut actions = Vec::new();

    if s.is_done() {
        return (s, actions);
    }

    if byte == INTERRUPT {
        s.phase = Phase::Interrupted;
        actions.push(RenderAction::Reset);
        return (s, actions);
    }

    if s.started_at.is_none() {
        s.started_at = Some(now);
        s.phase = Phase::InProgress;
    }

    match byte {
        BACKSPACE => backspace(&mut s, words, &mut actions),
        b if is_separator(b) => separator(&mut s, words, &mut actions),
        b if b < 0x20 => trace!(byte = b, "ignoring control byte"),
        b => printable(&mut s, words, b, &mut actions),
    }

    (s, actions)
}

fn word_len(words: &[String], index: usize) -> usize {
    words.get(index).map_or(0, String::len)
}

fn target_byte(words: &[String], word: usize, pos: usize) -> Option<u8> {
    words.get(word).and_then(|w| w.as_bytes().get(pos).copied())
}

/// Move the cursor onto position `next` of the current word, completing the
/// word when `next` runs off its end.
fn advance_to(s: &mut SessionState, words: &[String], next: usize, actions: &mut Vec<RenderAction>) {
    if next < word_len(words, s.word_index) {
        s.cursor = Cursor::At(next);
        return;
    }

    s.cursor = Cursor::Between;
    s.word_index += 1;
    if s.word_index >= s.word_count {
        s.phase = Phase::Finished;
        actions.push(RenderAction::Reset);
        debug!(typed = s.typed, "sentence complete");
    }
}

fn printable(s: &mut SessionState, words: &[String], byte: u8, actions: &mut Vec<RenderAction>) {
    let Cursor::At(pos) = s.cursor else {
        // extra characters between words are shown but never counted
        actions.push(RenderAction::Echo {
            byte,
            style: Style::Incorrect,
        });
        return;
    };

    let style = if target_byte(words, s.word_index, pos) == Some(byte) {
        Style::Correct
    } else {
        Style::Incorrect
    };
    actions.push(RenderAction::Echo { byte, style });

    s.typed += 1;
    advance_to(s, words, pos + 1, actions);
}

fn separator(s: &mut SessionState, words: &[String], actions: &mut Vec<RenderAction>) {
    actions.push(RenderAction::Separator);
    s.typed += 1;
    match s.cursor {
        Cursor::Between => advance_to(s, words, 0, actions),
        Cursor::At(pos) => advance_to(s, words, pos + 1, actions),
    }
}

fn backspace(s: &mut SessionState, words: &[String], actions: &mut Vec<RenderAction>) {
    match s.cursor {
        Cursor::At(pos) if pos > 0 => {
            s.cursor = Cursor::At(pos - 1);
            s.typed = s.typed.saturating_sub(1);
            if let Some(original) = target_byte(words, s.word_index, pos - 1) {
                actions.push(RenderAction::Revert(original));
            }
        }
        Cursor::At(0) if s.word_index > 0 => {
            s.word_index -= 1;
            let last = word_len(words, s.word_index).saturating_sub(1);
            s.cursor = Cursor::At(last);
            // undoes both the separator and the word's final character
            s.typed = s.typed.saturating_sub(2);
            actions.push(RenderAction::CursorLeft(1));
            if let Some(original) = target_byte(words, s.word_index, last) {
                actions.push(RenderAction::Revert(original));
            }
        }
        _ => {}
    }
}

/// Owns the target words and the session state, feeding bytes through
/// [`transition`].
#[derive(Debug, Clone)]
pub struct KeystrokeProcessor {
    words: Vec<String>,
    state: SessionState,
}

impl KeystrokeProcessor {
    pub fn new(words: Vec<String>) -> Self {
        let state = SessionState::new(words.len());
        Self { words, state }
    }

    pub fn process(&mut self, byte: u8, now: Instant) -> Vec<RenderAction> {
        let (next, actions) = transition(self.state, &self.words, byte, now);
        self.state = next;
        actions
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }
}
