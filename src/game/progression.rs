use super::{
    config::{MIN_TICK_MS, TICK_STEP_MS},
    state::Session,
};

/// Tick interval after one growth event
pub fn next_tick_interval(current_ms: f64) -> f64 {
    (current_ms - TICK_STEP_MS).max(MIN_TICK_MS)
}

/// Credit one apple to the session
///
/// The high score follows the score once the score catches up with it.
/// Returns the new high score when it changed and should be persisted.
pub fn award_point(session: &mut Session) -> Option<u32> {
    let mut raised = None;

    if session.score == session.high_score {
        session.high_score += 1;
        session.new_high_score = true;
        raised = Some(session.high_score);
    }

    session.score += 1;
    session.tick_interval_ms = next_tick_interval(session.tick_interval_ms);

    raised
}
