use super::*;
use crate::animation::state::PartialState;
use crate::foundation::core::Length;

fn vp() -> Viewport {
    Viewport::new(1000.0, 800.0).unwrap()
}

fn ids(names: &[&str]) -> Vec<TargetId> {
    names.iter().map(|n| TargetId::from(*n)).collect()
}

fn window(from: f64, to: f64) -> Window {
    Window::new(from, to).unwrap()
}

/// Background, staggered heading, body and label, entering then exiting.
fn section_phases() -> Vec<Phase> {
    vec![
        Phase::entrance(ids(&["bg"]), window(0.0, 0.4))
            .from_state(PartialState::new().scale(1.12).x(Length::vw(6.0)).opacity(0.6))
            .to_state(PartialState::new().scale(1.0).x(Length::px(0.0)).opacity(1.0))
            .ease(Ease::Linear),
        Phase::entrance(ids(&["w0", "w1", "w2"]), window(0.0, 0.5))
            .from_state(PartialState::new().y(Length::px(40.0)).opacity(0.0))
            .to_state(PartialState::new().y(Length::px(0.0)).opacity(1.0))
            .stagger(0.05)
            .ease(Ease::Linear),
        Phase::entrance(ids(&["body"]), window(0.05, 0.45))
            .from_state(PartialState::new().y(Length::vh(10.0)).opacity(0.0))
            .to_state(PartialState::new().y(Length::px(0.0)).opacity(1.0)),
        Phase::entrance(ids(&["label"]), window(0.0, 0.4))
            .from_state(PartialState::new().y(Length::px(-12.0)).opacity(0.0))
            .to_state(PartialState::new().y(Length::px(0.0)).opacity(1.0)),
        Phase::exit(ids(&["bg"]), window(0.6, 1.0))
            .from_state(PartialState::new().scale(1.0).x(Length::px(0.0)).opacity(1.0))
            .to_state(PartialState::new().scale(1.06).x(Length::vw(-6.0)).opacity(0.0)),
        Phase::exit(ids(&["label"]), window(0.6, 1.0))
            .from_state(PartialState::new().opacity(1.0))
            .to_state(PartialState::new().opacity(0.0)),
    ]
}

fn targets() -> Vec<TargetId> {
    ids(&["bg", "w0", "w1", "w2", "body", "label"])
}

fn compile() -> PhaseTimeline {
    PhaseTimeline::compile(&section_phases(), &targets(), vp())
}

fn eval(tl: &PhaseTimeline, p: f64) -> Vec<VisualState> {
    let mut out = vec![VisualState::RESTING; tl.target_count()];
    tl.evaluate(p, &mut out);
    out
}

#[test]
fn window_boundaries_reproduce_declared_states() {
    let tl = compile();

    let start = eval(&tl, 0.0);
    assert_eq!(start[0].scale, 1.12);
    assert_eq!(start[0].translate.x, 60.0);
    assert_eq!(start[0].opacity, 0.6);

    let entered = eval(&tl, 0.4);
    assert_eq!(entered[0].scale, 1.0);
    assert_eq!(entered[0].translate.x, 0.0);
    assert_eq!(entered[0].opacity, 1.0);

    let exit_start = eval(&tl, 0.6);
    assert_eq!(exit_start[0].opacity, 1.0);
    assert_eq!(exit_start[5].opacity, 1.0);

    let end = eval(&tl, 1.0);
    assert_eq!(end[0].scale, 1.06);
    assert_eq!(end[0].translate.x, -60.0);
    assert_eq!(end[0].opacity, 0.0);
    assert_eq!(end[5].opacity, 0.0);
}

#[test]
fn outside_windows_hold_nearest_boundary() {
    let tl = compile();
    let hold = eval(&tl, 0.5);
    assert_eq!(hold[0].scale, 1.0);
    assert_eq!(hold[0].opacity, 1.0);
    assert_eq!(hold[4].translate.y, 0.0);

    // Body's window starts at 0.05: before that it sits at its start state.
    let early = eval(&tl, 0.01);
    assert_eq!(early[4].translate.y, 80.0);
    assert_eq!(early[4].opacity, 0.0);
}

#[test]
fn stagger_offsets_each_member() {
    let tl = compile();
    let s = eval(&tl, 0.05);
    // w0 has moved, w1 is exactly at its start, w2 has not started yet.
    assert!(s[1].opacity > 0.0);
    assert_eq!(s[2].opacity, 0.0);
    assert_eq!(s[2].translate.y, 40.0);
    assert_eq!(s[3].opacity, 0.0);

    let done = eval(&tl, 0.5);
    for w in &done[1..4] {
        assert_eq!(w.opacity, 1.0);
        assert_eq!(w.translate.y, 0.0);
    }
}

#[test]
fn evaluation_is_idempotent_under_scrubbing() {
    let tl = compile();
    let reference = eval(&tl, 0.73);
    let mut out = vec![VisualState::RESTING; tl.target_count()];
    for p in [0.0, 1.0, 0.2, 0.9, 0.73, 0.1, 0.73] {
        tl.evaluate(p, &mut out);
    }
    assert_eq!(out, reference);
    assert_eq!(eval(&tl, 0.73), reference);
}

#[test]
fn four_concurrent_phases_animate_together() {
    let tl = compile();
    let s = eval(&tl, 0.2);
    assert!(s[0].scale < 1.12 && s[0].scale > 1.0);
    assert!(s[1].opacity > 0.0 && s[1].opacity < 1.0);
    assert!(s[4].opacity > 0.0 && s[4].opacity < 1.0);
    assert!(s[5].opacity > 0.0 && s[5].opacity < 1.0);
}

#[test]
fn unknown_targets_are_ignored() {
    let tl = PhaseTimeline::compile(&section_phases(), &ids(&["bg"]), vp());
    assert_eq!(tl.target_count(), 1);
    // bg animates x, opacity and scale.
    assert_eq!(tl.channel_count(), 3);
}

#[test]
fn zero_length_window_steps_at_its_start() {
    let phases = vec![
        Phase::entrance(ids(&["a"]), window(0.5, 0.5))
            .from_state(PartialState::new().opacity(0.0))
            .to_state(PartialState::new().opacity(1.0)),
    ];
    let tl = PhaseTimeline::compile(&phases, &ids(&["a"]), vp());
    assert_eq!(eval(&tl, 0.49)[0].opacity, 0.0);
    assert_eq!(eval(&tl, 0.5)[0].opacity, 1.0);
}

#[test]
fn overlay_leaves_unanimated_targets_alone() {
    let phases = vec![
        Phase::entrance(ids(&["a"]), Window::FULL)
            .from_state(PartialState::new().opacity(0.0))
            .to_state(PartialState::new().opacity(1.0)),
    ];
    let tl = PhaseTimeline::compile(&phases, &ids(&["a", "b"]), vp());
    let marker = VisualState {
        opacity: 0.25,
        ..VisualState::RESTING
    };
    let mut out = vec![marker; 2];
    tl.overlay(0.0, &mut out);
    assert_eq!(out[0].opacity, 0.0);
    assert_eq!(out[1], marker);
}
