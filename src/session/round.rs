use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::engine::difficulty::RoundOutcome;
use crate::engine::profile::DifficultyProfile;
use crate::engine::selector::PhraseSelector;
use crate::error::Result;
use crate::phrase::Phrase;
use crate::session::input;
use crate::session::timer::{Scheduler, TimerEvent, TimerHandle};

/// Share of the round countdown still left, for the pizza timer.
pub fn fraction_remaining(now: Duration, start: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }
    let elapsed = now.saturating_sub(start).as_secs_f64();
    (1.0 - elapsed / duration.as_secs_f64()).max(0.0)
}

pub struct RoundState {
    pub phrase: Phrase,
    pub target: Vec<char>,
    pub typed_prefix: String,
    pub cursor: usize,
    pub started_at: Duration,
    pub time_limit: Duration,
}

impl RoundState {
    pub fn new(phrase: Phrase, started_at: Duration, time_limit: Duration) -> Self {
        Self {
            target: phrase.text.chars().collect(),
            phrase,
            typed_prefix: String::new(),
            cursor: 0,
            started_at,
            time_limit,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.typed_prefix == self.phrase.text
    }

    pub fn remaining_fraction(&self, now: Duration) -> f64 {
        fraction_remaining(now, self.started_at, self.time_limit)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    Idle,
    AwaitingInput,
    Resolved(RoundOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Accepted,
    /// Accepted and finished the phrase.
    Completed,
    Rejected { expected: char, typed: char },
    /// No round is awaiting input.
    Ignored,
}

pub struct RoundController {
    status: RoundStatus,
    round: Option<RoundState>,
    timer: Option<TimerHandle>,
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundController {
    pub fn new() -> Self {
        Self {
            status: RoundStatus::Idle,
            round: None,
            timer: None,
        }
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn start_round<R: Rng, S: Scheduler>(
        &mut self,
        profile: &DifficultyProfile,
        offset: i32,
        selector: &mut PhraseSelector<R>,
        scheduler: &mut S,
    ) -> Result<&RoundState> {
        self.stop_timer(scheduler);

        let phrase = selector.select_next(profile, offset)?;
        let limit = Duration::from_secs(profile.phrase_time_limit_secs as u64);
        info!(text = %phrase.text, cost = phrase.cost, offset, "round started");

        self.timer = Some(scheduler.schedule_once(limit, TimerEvent::RoundTimeout));
        self.status = RoundStatus::AwaitingInput;
        Ok(&*self.round.insert(RoundState::new(phrase, scheduler.now(), limit)))
    }

    pub fn submit_char<S: Scheduler>(&mut self, ch: char, scheduler: &mut S) -> Keystroke {
        if self.status != RoundStatus::AwaitingInput {
            return Keystroke::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return Keystroke::Ignored;
        };

        match input::process_char(round, ch, scheduler.now()) {
            None => Keystroke::Ignored,
            Some(ev) if !ev.correct => {
                debug!(expected = %ev.expected, typed = %ev.actual, "keystroke rejected");
                Keystroke::Rejected {
                    expected: ev.expected,
                    typed: ev.actual,
                }
            }
            Some(_) if round.is_complete() => {
                self.resolve(RoundOutcome::Success, scheduler);
                Keystroke::Completed
            }
            Some(_) => Keystroke::Accepted,
        }
    }

    pub fn submit_backspace_to(&mut self, len: usize) -> bool {
        if self.status != RoundStatus::AwaitingInput {
            return false;
        }
        self.round
            .as_mut()
            .is_some_and(|round| input::process_backspace_to(round, len))
    }

    /// Resolves the round as timed out if `handle` is this round's live timer.
    pub fn on_timeout<S: Scheduler>(
        &mut self,
        handle: TimerHandle,
        scheduler: &mut S,
    ) -> Option<RoundOutcome> {
        if self.status != RoundStatus::AwaitingInput || self.timer != Some(handle) {
            debug!(?handle, status = ?self.status, "stale round timer ignored");
            return None;
        }
        self.resolve(RoundOutcome::Timeout, scheduler);
        Some(RoundOutcome::Timeout)
    }

    /// Tears the round down without an outcome, e.g. when the session ends.
    pub fn stop<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.stop_timer(scheduler);
        self.status = RoundStatus::Idle;
    }

    pub fn remaining_fraction(&self, now: Duration) -> f64 {
        match (self.status, &self.round) {
            (RoundStatus::AwaitingInput, Some(round)) => round.remaining_fraction(now),
            _ => 0.0,
        }
    }

    fn resolve<S: Scheduler>(&mut self, outcome: RoundOutcome, scheduler: &mut S) {
        self.stop_timer(scheduler);
        self.status = RoundStatus::Resolved(outcome);
        if let Some(round) = &self.round {
            info!(text = %round.phrase.text, ?outcome, "round resolved");
        }
    }

    fn stop_timer<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::engine::profile::EASY;
    use crate::phrase::PhraseBank;
    use crate::session::timer::TimerQueue;

    fn setup(text: &str) -> (RoundController, PhraseSelector<SmallRng>, TimerQueue) {
        let bank = PhraseBank::new(vec![Phrase::new(text, "test", 1)]).unwrap();
        (
            RoundController::new(),
            PhraseSelector::new(bank, SmallRng::seed_from_u64(1)),
            TimerQueue::new(),
        )
    }

    #[test]
    fn test_fraction_remaining() {
        let limit = Duration::from_secs(8);
        assert_eq!(fraction_remaining(Duration::ZERO, Duration::ZERO, limit), 1.0);
        assert!((fraction_remaining(Duration::from_secs(2), Duration::ZERO, limit) - 0.75).abs() < 1e-9);
        assert_eq!(fraction_remaining(Duration::from_secs(20), Duration::ZERO, limit), 0.0);
        assert_eq!(fraction_remaining(Duration::ZERO, Duration::from_secs(1), limit), 1.0);
        assert_eq!(fraction_remaining(Duration::from_secs(1), Duration::ZERO, Duration::ZERO), 0.0);
    }

    #[test]
    fn test_start_round_arms_timer() {
        let (mut rc, mut sel, mut timers) = setup("Ciao");
        assert_eq!(rc.status(), RoundStatus::Idle);
        let round = rc.start_round(&EASY, 0, &mut sel, &mut timers).unwrap();
        assert_eq!(round.phrase.text, "Ciao");
        assert_eq!(round.typed_prefix, "");
        assert_eq!(rc.status(), RoundStatus::AwaitingInput);
        assert!(timers.is_pending(rc.timer().unwrap()));
        assert_eq!(rc.remaining_fraction(timers.now()), 1.0);
    }

    #[test]
    fn test_typing_phrase_completes_and_cancels_timer() {
        let (mut rc, mut sel, mut timers) = setup("Sì");
        rc.start_round(&EASY, 0, &mut sel, &mut timers).unwrap();
        let handle = rc.timer().unwrap();

        assert_eq!(rc.submit_char('S', &mut timers), Keystroke::Accepted);
        assert_eq!(rc.submit_char('i', &mut timers), Keystroke::Completed);
        assert_eq!(rc.status(), RoundStatus::Resolved(RoundOutcome::Success));
        assert!(!timers.is_pending(handle));
        assert_eq!(timers.pending(), 0);

        // A late fire of the old handle cannot resolve the round again.
        assert_eq!(rc.on_timeout(handle, &mut timers), None);
        assert_eq!(rc.submit_char('x', &mut timers), Keystroke::Ignored);
    }

    #[test]
    fn test_rejected_keystroke() {
        let (mut rc, mut sel, mut timers) = setup("No");
        rc.start_round(&EASY, 0, &mut sel, &mut timers).unwrap();
        assert_eq!(
            rc.submit_char('n', &mut timers),
            Keystroke::Rejected { expected: 'N', typed: 'n' }
        );
        assert_eq!(rc.round().unwrap().typed_prefix, "");
        assert_eq!(rc.status(), RoundStatus::AwaitingInput);
    }

    #[test]
    fn test_timeout_resolves_round() {
        let (mut rc, mut sel, mut timers) = setup("Grazie");
        rc.start_round(&EASY, 0, &mut sel, &mut timers).unwrap();
        assert!(timers.pop_due(Duration::from_secs(7)).is_none());
        let (handle, event) = timers.pop_due(Duration::from_secs(8)).unwrap();
        assert_eq!(event, TimerEvent::RoundTimeout);
        assert_eq!(rc.on_timeout(handle, &mut timers), Some(RoundOutcome::Timeout));
        assert_eq!(rc.status(), RoundStatus::Resolved(RoundOutcome::Timeout));
        assert_eq!(rc.remaining_fraction(timers.now()), 0.0);
    }

    #[test]
    fn test_restart_cancels_previous_timer() {
        let (mut rc, mut sel, mut timers) = setup("Ciao");
        rc.start_round(&EASY, 0, &mut sel, &mut timers).unwrap();
        let first = rc.timer().unwrap();
        rc.start_round(&EASY, 0, &mut sel, &mut timers).unwrap();
        assert!(!timers.is_pending(first));
        assert_eq!(timers.pending(), 1);
        assert_eq!(rc.on_timeout(first, &mut timers), None);
    }

    #[test]
    fn test_backspace_then_retype() {
        let (mut rc, mut sel, mut timers) = setup("Tè");
        rc.start_round(&EASY, 0, &mut sel, &mut timers).unwrap();
        rc.submit_char('T', &mut timers);
        assert!(rc.submit_backspace_to(0));
        assert!(!rc.submit_backspace_to(0));
        rc.submit_char('T', &mut timers);
        assert_eq!(rc.submit_char('e', &mut timers), Keystroke::Completed);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut rc, mut sel, mut timers) = setup("Ciao");
        rc.start_round(&EASY, 0, &mut sel, &mut timers).unwrap();
        rc.stop(&mut timers);
        rc.stop(&mut timers);
        assert_eq!(rc.status(), RoundStatus::Idle);
        assert_eq!(timers.pending(), 0);
        assert_eq!(rc.submit_char('C', &mut timers), Keystroke::Ignored);
    }
}
