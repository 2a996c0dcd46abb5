use crate::engine::profile::DifficultyKey;
use crate::engine::scoring;
use crate::session::controller::SessionState;

/// Summary shown on the result screen.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionResult {
    pub difficulty: DifficultyKey,
    pub score: u32,
    pub success_count: u32,
    pub miss_count: u32,
    pub total_chars_typed: u32,
    pub chars_per_sec: f64,
}

impl SessionResult {
    pub fn from_state(state: &SessionState, session_secs: u32) -> Self {
        Self {
            difficulty: state.difficulty,
            score: state.score,
            success_count: state.success_count,
            miss_count: state.miss_count,
            total_chars_typed: state.total_chars_typed,
            chars_per_sec: scoring::typing_speed(
                state.total_chars_typed,
                session_secs,
                state.overall_time_left_secs,
            ),
        }
    }

    pub fn speed_display(&self) -> String {
        format!("{:.2}", self.chars_per_sec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::controller::Phase;

    fn finished(total_chars_typed: u32, time_left: u32) -> SessionState {
        SessionState {
            phase: Phase::Result,
            difficulty: DifficultyKey::Medium,
            overall_time_left_secs: time_left,
            score: 90,
            success_count: 4,
            miss_count: 3,
            miss_streak: 1,
            dynamic_difficulty_offset: 0,
            total_chars_typed,
        }
    }

    #[test]
    fn test_from_state_copies_counters() {
        let result = SessionResult::from_state(&finished(90, 0), 60);
        assert_eq!(result.difficulty, DifficultyKey::Medium);
        assert_eq!(result.score, 90);
        assert_eq!(result.success_count, 4);
        assert_eq!(result.miss_count, 3);
        assert_eq!(result.speed_display(), "1.50");
    }

    #[test]
    fn test_speed_zero_when_ended_before_time_passed() {
        let result = SessionResult::from_state(&finished(12, 64), 60);
        assert_eq!(result.chars_per_sec, 0.0);
        assert_eq!(result.speed_display(), "0.00");
    }
}
