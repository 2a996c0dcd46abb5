use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info};

use crate::engine::difficulty::{self, RoundOutcome};
use crate::engine::profile::{DifficultyKey, DifficultyProfile};
use crate::engine::scoring;
use crate::engine::selector::PhraseSelector;
use crate::error::{GameError, Result};
use crate::phrase::PhraseBank;
use crate::session::result::SessionResult;
use crate::session::round::{Keystroke, RoundController, RoundStatus};
use crate::session::timer::{Scheduler, TimerEvent, TimerHandle, TimerQueue};

pub const DEFAULT_SESSION_SECS: u32 = 60;
const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Title,
    Playing,
    Result,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub difficulty: DifficultyKey,
    pub overall_time_left_secs: u32,
    pub score: u32,
    pub success_count: u32,
    pub miss_count: u32,
    pub miss_streak: u32,
    pub dynamic_difficulty_offset: i32,
    pub total_chars_typed: u32,
}

impl SessionState {
    fn fresh(phase: Phase, difficulty: DifficultyKey, session_secs: u32) -> Self {
        Self {
            phase,
            difficulty,
            overall_time_left_secs: session_secs,
            score: 0,
            success_count: 0,
            miss_count: 0,
            miss_streak: 0,
            dynamic_difficulty_offset: 0,
            total_chars_typed: 0,
        }
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        self.difficulty.profile()
    }
}

#[derive(Clone, Debug)]
pub struct RoundView {
    pub text: String,
    pub translation: String,
    pub cost: u8,
    pub typed_len: usize,
    pub remaining_fraction: f64,
}

/// Read-only view handed to the presentation layer after each change.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub label: &'static str,
    pub state: SessionState,
    pub round: Option<RoundView>,
}

impl Snapshot {
    pub fn phase(&self) -> Phase {
        self.state.phase
    }
}

/// Owns the session counters, the active round and both game timers.
///
/// Time only moves through [`SessionController::advance`]; timers that come
/// due are handled one by one in order, so a round resolved by typing has its
/// timeout cancelled before anything else can fire.
pub struct SessionController<R: Rng = SmallRng> {
    state: SessionState,
    session_secs: u32,
    round: RoundController,
    selector: PhraseSelector<R>,
    timers: TimerQueue,
    tick: Option<TimerHandle>,
}

impl SessionController<SmallRng> {
    pub fn new(bank: PhraseBank) -> Result<Self> {
        Self::with_rng(bank, SmallRng::from_entropy())
    }
}

impl<R: Rng> SessionController<R> {
    /// Fails if any difficulty's base cost range has no phrase in `bank`.
    pub fn with_rng(bank: PhraseBank, rng: R) -> Result<Self> {
        for key in DifficultyKey::ALL {
            let (min, max) = key.profile().cost_range;
            bank.ensure_covers(min, max)?;
        }
        Ok(Self {
            state: SessionState::fresh(Phase::Title, DifficultyKey::Easy, DEFAULT_SESSION_SECS),
            session_secs: DEFAULT_SESSION_SECS,
            round: RoundController::new(),
            selector: PhraseSelector::new(bank, rng),
            timers: TimerQueue::new(),
            tick: None,
        })
    }

    /// Session length used from the next `start_session` on.
    pub fn with_session_secs(mut self, secs: u32) -> Self {
        self.session_secs = secs.max(1);
        if self.state.phase == Phase::Title {
            self.state.overall_time_left_secs = self.session_secs;
        }
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn session_secs(&self) -> u32 {
        self.session_secs
    }

    pub fn round(&self) -> &RoundController {
        &self.round
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Number of armed timers (session tick and round countdown).
    pub fn active_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn start_session(&mut self, difficulty: &str) -> Result<()> {
        let key: DifficultyKey = difficulty.parse()?;
        self.start(key)
    }

    pub fn start(&mut self, key: DifficultyKey) -> Result<()> {
        match self.state.phase {
            Phase::Title => {}
            Phase::Playing => return Err(GameError::SessionAlreadyActive),
            Phase::Result => return Err(GameError::NotOnTitle),
        }

        self.stop_timers();
        self.state = SessionState::fresh(Phase::Playing, key, self.session_secs);
        self.tick = Some(self.timers.schedule_repeating(TICK, TimerEvent::SessionTick));
        info!(difficulty = %key, secs = self.session_secs, "session started");

        if let Err(err) = self.start_round() {
            self.stop_timers();
            self.state.phase = Phase::Title;
            return Err(err);
        }
        Ok(())
    }

    pub fn submit_character(&mut self, ch: char) -> Keystroke {
        if self.state.phase != Phase::Playing {
            return Keystroke::Ignored;
        }

        let keystroke = self.round.submit_char(ch, &mut self.timers);
        match keystroke {
            Keystroke::Accepted => {
                self.state.total_chars_typed += 1;
                self.state.miss_streak = 0;
            }
            Keystroke::Completed => {
                self.state.total_chars_typed += 1;
                self.state.miss_streak = 0;
                self.resolve_round(RoundOutcome::Success);
            }
            Keystroke::Rejected { .. } => {
                self.state.miss_count += 1;
                self.state.miss_streak += 1;
            }
            Keystroke::Ignored => {}
        }
        keystroke
    }

    pub fn submit_backspace_to(&mut self, len: usize) -> bool {
        if self.state.phase != Phase::Playing {
            return false;
        }
        self.round.submit_backspace_to(len)
    }

    /// Moves game time forward by `by`, firing every timer that comes due.
    ///
    /// When the session tick and a round timeout fall on the same instant the
    /// tick fires first; if it ends the session the timeout never fires.
    pub fn advance(&mut self, by: Duration) {
        let until = self.timers.now() + by;
        while let Some((handle, event)) = self.timers.pop_due(until) {
            self.on_timer(handle, event);
        }
        self.timers.advance_clock(until);
    }

    pub fn end_session(&mut self) {
        if self.state.phase != Phase::Playing {
            return;
        }
        self.stop_timers();
        self.state.phase = Phase::Result;
        info!(
            score = self.state.score,
            successes = self.state.success_count,
            misses = self.state.miss_count,
            "session ended"
        );
    }

    /// Result -> Title. Returns false from any other phase.
    pub fn return_to_title(&mut self) -> bool {
        if self.state.phase != Phase::Result {
            return false;
        }
        self.state.phase = Phase::Title;
        debug!("returned to title");
        true
    }

    pub fn remaining_fraction(&self) -> f64 {
        if self.state.phase != Phase::Playing {
            return 0.0;
        }
        self.round.remaining_fraction(self.timers.now())
    }

    pub fn result(&self) -> Option<SessionResult> {
        (self.state.phase == Phase::Result)
            .then(|| SessionResult::from_state(&self.state, self.session_secs))
    }

    pub fn snapshot(&self) -> Snapshot {
        let round = match (self.state.phase, self.round.status(), self.round.round()) {
            (Phase::Playing, RoundStatus::AwaitingInput, Some(r)) => Some(RoundView {
                text: r.phrase.text.clone(),
                translation: r.phrase.translation.clone(),
                cost: r.phrase.cost,
                typed_len: r.cursor,
                remaining_fraction: r.remaining_fraction(self.timers.now()),
            }),
            _ => None,
        };
        Snapshot {
            label: self.state.profile().label,
            state: self.state.clone(),
            round,
        }
    }

    fn on_timer(&mut self, handle: TimerHandle, event: TimerEvent) {
        if self.state.phase != Phase::Playing {
            debug!(?handle, ?event, "timer fired outside play");
            return;
        }
        match event {
            TimerEvent::SessionTick => self.on_session_tick(),
            TimerEvent::RoundTimeout => {
                if let Some(outcome) = self.round.on_timeout(handle, &mut self.timers) {
                    self.resolve_round(outcome);
                }
            }
        }
    }

    fn on_session_tick(&mut self) {
        self.state.overall_time_left_secs = self.state.overall_time_left_secs.saturating_sub(1);
        if self.state.overall_time_left_secs == 0 {
            self.end_session();
        }
    }

    fn resolve_round(&mut self, outcome: RoundOutcome) {
        let profile = self.state.profile();
        match outcome {
            RoundOutcome::Success => {
                let cost = self.round.round().map_or(0, |r| r.phrase.cost);
                self.state.success_count += 1;
                self.state.miss_streak = 0;
                self.state.score += scoring::phrase_score(cost);
                self.state.overall_time_left_secs += profile.time_bonus_on_success;
            }
            RoundOutcome::Timeout => {
                self.state.miss_count += 1;
                self.state.miss_streak += 1;
            }
        }

        let previous = self.state.dynamic_difficulty_offset;
        self.state.dynamic_difficulty_offset = difficulty::next_offset(
            previous,
            outcome,
            self.state.success_count,
            self.state.miss_streak,
            profile.difficulty_ramp_step,
        );
        if previous != self.state.dynamic_difficulty_offset {
            info!(
                from = previous,
                to = self.state.dynamic_difficulty_offset,
                "difficulty offset changed"
            );
        }

        if self.state.phase == Phase::Playing {
            if let Err(err) = self.start_round() {
                // The bank was validated on construction, so this is a broken invariant.
                error!(%err, "could not start next round");
                self.end_session();
            }
        }
    }

    fn start_round(&mut self) -> Result<()> {
        self.round.start_round(
            self.state.profile(),
            self.state.dynamic_difficulty_offset,
            &mut self.selector,
            &mut self.timers,
        )?;
        Ok(())
    }

    fn stop_timers(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.timers.cancel(handle);
        }
        self.round.stop(&mut self.timers);
    }
}
