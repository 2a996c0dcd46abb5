/// Every this many successful rounds the offset ramps up.
pub const RAMP_EVERY: u32 = 5;
/// Consecutive misses needed before a timeout relaxes the offset.
pub const RELAX_AFTER_MISSES: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Success,
    Timeout,
}

/// Offset after a round resolves. `success_count` and `miss_streak` are the
/// values already updated for this round.
pub fn next_offset(
    offset: i32,
    outcome: RoundOutcome,
    success_count: u32,
    miss_streak: u32,
    ramp_step: i32,
) -> i32 {
    match outcome {
        RoundOutcome::Success if success_count % RAMP_EVERY == 0 => offset + ramp_step,
        RoundOutcome::Success => offset,
        RoundOutcome::Timeout if miss_streak >= RELAX_AFTER_MISSES && offset > 0 => offset - 1,
        RoundOutcome::Timeout => offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramps_on_every_fifth_success() {
        let mut offset = 0;
        for n in 1..=4 {
            offset = next_offset(offset, RoundOutcome::Success, n, 0, 2);
            assert_eq!(offset, 0);
        }
        offset = next_offset(offset, RoundOutcome::Success, 5, 0, 2);
        assert_eq!(offset, 2);
        offset = next_offset(offset, RoundOutcome::Success, 10, 0, 2);
        assert_eq!(offset, 4);
    }

    #[test]
    fn test_single_timeout_does_not_relax() {
        assert_eq!(next_offset(3, RoundOutcome::Timeout, 5, 1, 1), 3);
    }

    #[test]
    fn test_streak_of_two_relaxes_by_one() {
        assert_eq!(next_offset(3, RoundOutcome::Timeout, 5, 2, 3), 2);
        assert_eq!(next_offset(2, RoundOutcome::Timeout, 5, 7, 3), 1);
    }

    #[test]
    fn test_never_below_zero() {
        assert_eq!(next_offset(0, RoundOutcome::Timeout, 0, 5, 1), 0);
    }

    #[test]
    fn test_ramp_then_relax() {
        let step = 3;
        let mut offset = 0;
        for n in 1..=5 {
            offset = next_offset(offset, RoundOutcome::Success, n, 0, step);
        }
        assert_eq!(offset, step);
        offset = next_offset(offset, RoundOutcome::Timeout, 5, 1, step);
        offset = next_offset(offset, RoundOutcome::Timeout, 5, 2, step);
        assert_eq!(offset, step - 1);
    }
}
