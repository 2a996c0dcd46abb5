use std::time::Duration;

use crate::engine::matcher;
use crate::session::round::RoundState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeystrokeEvent {
    pub expected: char,
    pub actual: char,
    pub at: Duration,
    pub correct: bool,
}

/// Checks `ch` against the next expected character. On acceptance the
/// phrase's own character is appended, so `typed_prefix` stays a literal
/// prefix of the phrase even when an unaccented letter was typed.
pub fn process_char(round: &mut RoundState, ch: char, at: Duration) -> Option<KeystrokeEvent> {
    if round.is_complete() {
        return None;
    }

    let expected = round.target[round.cursor];
    let correct = matcher::accepts(expected, ch);

    if correct {
        round.typed_prefix.push(expected);
        round.cursor += 1;
    }

    Some(KeystrokeEvent {
        expected,
        actual: ch,
        at,
        correct,
    })
}

/// Shortens the typed prefix to `len` characters. Returns false when `len` is
/// not shorter than what is already typed.
pub fn process_backspace_to(round: &mut RoundState, len: usize) -> bool {
    if len >= round.cursor {
        return false;
    }
    round.cursor = len;
    round.typed_prefix = round.target[..len].iter().collect();
    true
}
