use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use typing_feast::engine::profile::EASY;
use typing_feast::phrase::{Phrase, PhraseBank};
use typing_feast::session::round::Keystroke;
use typing_feast::{Phase, SessionController};

fn bank() -> PhraseBank {
    PhraseBank::new(vec![
        Phrase::new("Caffè", "coffee", 1),
        Phrase::new("Tè", "tea", 1),
        Phrase::new("Sì", "yes", 1),
        Phrase::new("Mi chiamo Mario", "my name is Mario", 4),
    ])
    .unwrap()
}

fn controller(seed: u64) -> SessionController<SmallRng> {
    SessionController::with_rng(bank(), SmallRng::seed_from_u64(seed)).unwrap()
}

/// Types the current phrase using unaccented letters wherever allowed.
fn type_plain(ctl: &mut SessionController<SmallRng>) -> Keystroke {
    let text = ctl.snapshot().round.expect("round in progress").text;
    let mut last = Keystroke::Ignored;
    for ch in text.chars() {
        let plain = match ch {
            'è' | 'é' => 'e',
            'ì' => 'i',
            other => other,
        };
        last = ctl.submit_character(plain);
        assert_ne!(last, Keystroke::Ignored);
    }
    last
}

#[test]
fn easy_session_end_to_end() {
    let mut ctl = controller(3);
    ctl.start_session("easy").unwrap();
    assert_eq!(ctl.phase(), Phase::Playing);

    // Let the first round time out; the session tick also runs for 8 seconds.
    ctl.advance(Duration::from_secs(EASY.phrase_time_limit_secs as u64));
    let state = ctl.state().clone();
    assert_eq!(state.miss_count, 1);
    assert_eq!(state.miss_streak, 1);
    assert_eq!(state.score, 0);
    assert_eq!(state.overall_time_left_secs, 60 - 8);

    // Type the next cost-1 phrase, accents replaced by base letters.
    assert_eq!(ctl.snapshot().round.unwrap().cost, 1);
    assert_eq!(type_plain(&mut ctl), Keystroke::Completed);
    let state = ctl.state().clone();
    assert_eq!(state.success_count, 1);
    assert_eq!(state.score, 10);
    assert_eq!(state.miss_streak, 0);
    assert_eq!(state.overall_time_left_secs, 60 - 8 + EASY.time_bonus_on_success);

    // Run the clock out.
    for _ in 0..200 {
        if ctl.phase() == Phase::Result {
            break;
        }
        ctl.advance(Duration::from_secs(1));
    }
    assert_eq!(ctl.phase(), Phase::Result);
    assert_eq!(ctl.state().overall_time_left_secs, 0);
    assert_eq!(ctl.active_timers(), 0);

    let frozen = ctl.state().clone();
    for ch in "Caffe Te Si".chars() {
        assert_eq!(ctl.submit_character(ch), Keystroke::Ignored);
    }
    ctl.advance(Duration::from_secs(30));
    assert_eq!(ctl.state(), &frozen);

    let result = ctl.result().unwrap();
    assert_eq!(result.score, frozen.score);
    assert_eq!(result.success_count, 1);
    assert!(result.chars_per_sec > 0.0);
}

#[test]
fn success_cancels_round_timeout() {
    let mut ctl = controller(11);
    ctl.start_session("easy").unwrap();
    ctl.advance(Duration::from_millis(7900));
    type_plain(&mut ctl);

    // The first round's deadline at 8s passes without a miss.
    ctl.advance(Duration::from_millis(200));
    assert_eq!(ctl.state().miss_count, 0);
    assert_eq!(ctl.state().success_count, 1);
    assert!(ctl.snapshot().round.unwrap().remaining_fraction > 0.9);
}

#[test]
fn misses_relax_ramped_difficulty() {
    let mut ctl = controller(5);
    ctl.start_session("easy").unwrap();
    for _ in 0..5 {
        type_plain(&mut ctl);
    }
    assert_eq!(ctl.state().dynamic_difficulty_offset, EASY.difficulty_ramp_step);

    ctl.advance(Duration::from_secs(8));
    ctl.advance(Duration::from_secs(8));
    assert_eq!(ctl.state().dynamic_difficulty_offset, EASY.difficulty_ramp_step - 1);
    assert_eq!(ctl.state().miss_streak, 2);
}

#[test]
fn restart_after_result_is_clean() {
    let mut ctl = controller(9);
    ctl.start_session("facile").unwrap();
    type_plain(&mut ctl);
    ctl.submit_character('#');
    ctl.end_session();
    assert!(ctl.return_to_title());

    ctl.start_session("difficile").unwrap();
    let snap = ctl.snapshot();
    assert_eq!(snap.label, "Difficile");
    assert_eq!(snap.state.score, 0);
    assert_eq!(snap.state.success_count, 0);
    assert_eq!(snap.state.miss_count, 0);
    assert_eq!(snap.state.overall_time_left_secs, 60);
    assert_eq!(snap.round.unwrap().text, "Mi chiamo Mario");
}

#[test]
fn bundled_bank_supports_every_difficulty() {
    let bank = PhraseBank::italian().unwrap();
    let mut ctl = SessionController::with_rng(bank, SmallRng::seed_from_u64(1)).unwrap();
    for key in ["easy", "medium", "hard"] {
        ctl.start_session(key).unwrap();
        assert!(ctl.snapshot().round.is_some());
        ctl.end_session();
        ctl.return_to_title();
    }
}
