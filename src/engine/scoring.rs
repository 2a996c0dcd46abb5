pub const POINTS_PER_COST: u32 = 10;

pub fn phrase_score(cost: u8) -> u32 {
    cost as u32 * POINTS_PER_COST
}

/// Characters per second over the played part of the session. Bonus time can
/// push `time_left` past the session length, in which case nothing has elapsed.
pub fn typing_speed(total_chars: u32, session_secs: u32, time_left: u32) -> f64 {
    let elapsed = session_secs as i64 - time_left as i64;
    if elapsed <= 0 {
        return 0.0;
    }
    total_chars as f64 / elapsed as f64
}
