use startrail_core::composite::InsertPosition;
use startrail_core::pipeline::{opacity_for, trail_length, FadeMode};

fn sequence(fade: FadeMode, len: usize) -> Vec<f32> {
    (1..=len).map(|i| opacity_for(i, len, fade)).collect()
}

#[test]
fn test_fade_in_ramps_up() {
    assert_eq!(sequence(FadeMode::In, 5), vec![20.0, 40.0, 60.0, 80.0, 100.0]);
}

#[test]
fn test_fade_out_ramps_down() {
    assert_eq!(sequence(FadeMode::Out, 5), vec![100.0, 80.0, 60.0, 40.0, 20.0]);
}

#[test]
fn test_no_fade_is_full_opacity() {
    assert_eq!(sequence(FadeMode::None, 4), vec![100.0; 4]);
}

#[test]
fn test_opacity_clamped_past_trail_length() {
    // With a trail limit shorter than the run, later frames overshoot.
    assert_eq!(opacity_for(8, 5, FadeMode::In), 100.0);
    assert_eq!(opacity_for(8, 5, FadeMode::Out), 0.0);
}

#[test]
fn test_trail_length_uses_smaller_limit() {
    assert_eq!(trail_length(0, 12), 12);
    assert_eq!(trail_length(5, 12), 5);
    assert_eq!(trail_length(20, 12), 12);
}

#[test]
fn test_insert_position_per_fade() {
    assert_eq!(FadeMode::In.insert_position(), InsertPosition::End);
    assert_eq!(FadeMode::Out.insert_position(), InsertPosition::Front);
    assert_eq!(FadeMode::None.insert_position(), InsertPosition::Front);
}

#[test]
fn test_fade_mode_from_index() {
    assert_eq!(FadeMode::try_from(0).unwrap(), FadeMode::None);
    assert_eq!(FadeMode::try_from(1).unwrap(), FadeMode::In);
    assert_eq!(FadeMode::try_from(2).unwrap(), FadeMode::Out);
    assert!(FadeMode::try_from(3).is_err());
}
