use super::*;
use crate::animation::state::PartialState;
use crate::animation::timeline::{Position, TimelineBuilder, Tween, Window};
use crate::foundation::core::{Length, Viewport};
use crate::scroll::headless::HeadlessHost;

fn vp() -> Viewport {
    Viewport::new(1000.0, 800.0).unwrap()
}

fn host() -> HeadlessHost {
    HeadlessHost::new(vp())
        .stack_anchor("intro", 800.0)
        .stack_anchor("sec", 800.0)
        .with_targets(["bg", "heading"])
}

fn timeline() -> Timeline {
    Timeline::from_phases(vec![
        Phase::entrance(["bg".into()], Window::new(0.0, 0.4).unwrap())
            .from_state(PartialState::new().opacity(0.0).x(Length::px(-100.0)))
            .to_state(PartialState::new().opacity(1.0).x(Length::px(0.0))),
        Phase::entrance(["caption".into()], Window::new(0.1, 0.4).unwrap())
            .from_state(PartialState::new().opacity(0.0))
            .to_state(PartialState::new().opacity(1.0)),
        Phase::exit(["bg".into(), "heading".into()], Window::new(0.6, 1.0).unwrap())
            .from_state(PartialState::new().opacity(1.0))
            .to_state(PartialState::new().opacity(0.0)),
    ])
}

fn section() -> SectionSpec {
    SectionSpec::pinned("sec", "sec", timeline()).with_scrub(Scrub::Instant)
}

fn register(host: &mut HeadlessHost, section: &SectionSpec) -> RegionController {
    RegionController::register(host, section, &ChoreoConfig::default())
        .unwrap()
        .unwrap()
}

#[test]
fn pinned_region_reserves_distance_and_attaches_trigger() {
    let mut host = host();
    let rc = register(&mut host, &section());

    let range = rc.region().scroll_range;
    assert_eq!(range.start, 800.0);
    assert_eq!(range.end, 1840.0);
    assert!(rc.trigger().is_some());
    assert_eq!(host.live_triggers(), 1);

    let spec = host.triggers().next().unwrap();
    assert!(spec.pin);
    assert_eq!(spec.pin_spacing, 1040.0);
}

#[test]
fn missing_target_skips_only_its_phase() {
    let mut host = host();
    let rc = register(&mut host, &section());
    // "caption" is not rendered: its phase is dropped, the other two survive.
    assert_eq!(rc.region().phases.len(), 2);
    assert_eq!(rc.targets(), &[TargetId::from("bg"), TargetId::from("heading")]);
}

#[test]
fn unmeasurable_anchor_is_skipped() {
    let mut host = host();
    let spec = SectionSpec::pinned("ghost", "nowhere", timeline());
    let rc = RegionController::register(&mut host, &spec, &ChoreoConfig::default()).unwrap();
    assert!(rc.is_none());
    assert_eq!(host.live_triggers(), 0);
}

#[test]
fn degenerate_region_stays_inactive() {
    let mut host = host();
    let config = ChoreoConfig {
        pin_distance: Length::ZERO,
        ..ChoreoConfig::default()
    };
    let mut rc = RegionController::register(&mut host, &section(), &config)
        .unwrap()
        .unwrap();
    assert!(!rc.is_active());
    assert!(rc.trigger().is_none());
    assert_eq!(host.live_triggers(), 0);

    rc.update_scroll(900.0, ScrollDirection::Forward, false);
    assert_eq!(rc.state(), RegionState::Before);
}

#[test]
fn invalid_timeline_is_a_validation_error() {
    let mut host = host();
    let bad = SectionSpec::pinned(
        "sec",
        "sec",
        Timeline::from_phases(vec![
            Phase::entrance(["bg".into()], Window::FULL)
                .from_state(PartialState::new().opacity(0.0)),
        ]),
    );
    let err = RegionController::register(&mut host, &bad, &ChoreoConfig::default()).unwrap_err();
    assert!(matches!(err, ChoreoError::Validation(_)));
}

#[test]
fn host_refusal_surfaces_as_host_error() {
    let mut host = host();
    host.set_attach_limit(Some(0));
    let err =
        RegionController::register(&mut host, &section(), &ChoreoConfig::default()).unwrap_err();
    assert!(matches!(err, ChoreoError::Host(_)));
    assert!(err.to_string().contains("sec"));
}

#[test]
fn leave_back_shows_settled_state_not_hidden_one() {
    let mut host = host();
    let mut rc = register(&mut host, &section().reset_on_leave_back());
    let bg = TargetId::from("bg");

    rc.update_scroll(0.0, ScrollDirection::Still, true);
    rc.render(&mut host, true);
    let hidden = host.state_of(&bg).unwrap();
    assert_eq!(hidden.opacity, 0.0);

    for offset in [1000.0, 1400.0, 1840.0, 2500.0] {
        rc.update_scroll(offset, ScrollDirection::Forward, false);
        rc.render(&mut host, false);
    }
    assert_eq!(rc.state(), RegionState::Exiting);
    assert_eq!(host.state_of(&bg).unwrap().opacity, 0.0);

    for offset in [1400.0, 900.0, 100.0] {
        rc.update_scroll(offset, ScrollDirection::Backward, false);
        rc.render(&mut host, false);
    }
    assert_eq!(rc.state(), RegionState::Before);
    assert_eq!(rc.pose(), Pose::Settled);
    let shown = host.state_of(&bg).unwrap();
    assert_eq!(shown, VisualState::RESTING);
    assert_eq!(rc.current_states(), rc.resting_states());

    // Scrolling forward again hands control back to the timeline.
    rc.update_scroll(1000.0, ScrollDirection::Forward, false);
    assert_eq!(rc.pose(), Pose::Scrubbed);
}

#[test]
fn without_reset_leave_back_rewinds_to_hidden() {
    let mut host = host();
    let mut rc = register(&mut host, &section());
    let bg = TargetId::from("bg");

    rc.update_scroll(2000.0, ScrollDirection::Forward, false);
    rc.update_scroll(0.0, ScrollDirection::Backward, false);
    rc.render(&mut host, false);
    assert_eq!(rc.pose(), Pose::Scrubbed);
    assert_eq!(host.state_of(&bg).unwrap().opacity, 0.0);
    assert_eq!(host.state_of(&bg).unwrap().translate.x, -100.0);
}

#[test]
fn evaluation_at_same_progress_is_idempotent() {
    let mut host = host();
    let rc = register(&mut host, &section());
    let mut a = vec![VisualState::RESTING; rc.targets().len()];
    let mut b = a.clone();
    rc.evaluate_at(0.3, &mut a);
    rc.evaluate_at(0.9, &mut b);
    rc.evaluate_at(0.3, &mut b);
    assert_eq!(a, b);
}

#[test]
fn smooth_scrub_catches_up_over_time() {
    let mut host = host();
    let mut rc = register(&mut host, &section().with_scrub(Scrub::Smooth { secs: 0.6 }));

    rc.update_scroll(800.0, ScrollDirection::Still, true);
    rc.update_scroll(1840.0, ScrollDirection::Forward, false);
    assert_eq!(rc.scroll_progress(), 1.0);
    assert_eq!(rc.shown_progress(), 0.0);

    rc.tick(0.1);
    let partial = rc.shown_progress();
    assert!(partial > 0.0 && partial < 1.0);

    for _ in 0..120 {
        rc.tick(1.0 / 60.0);
    }
    assert_eq!(rc.shown_progress(), 1.0);
}

#[test]
fn intro_plays_then_yields_to_scroll() {
    let mut host = host();
    let intro = TimelineBuilder::new()
        .add(
            Tween::entrance(["heading".into()])
                .from(PartialState::new().y(Length::px(40.0)).opacity(0.0))
                .to(PartialState::new().y(Length::px(0.0)).opacity(1.0))
                .duration(1.0),
            Position::END,
        )
        .build()
        .unwrap();
    let mut rc = register(&mut host, &section().with_intro(intro, 0.2));
    let heading = TargetId::from("heading");

    rc.update_scroll(0.0, ScrollDirection::Still, true);
    rc.render(&mut host, true);
    assert!(rc.intro_running());
    assert_eq!(host.state_of(&heading).unwrap().opacity, 0.0);

    rc.tick(0.1);
    rc.render(&mut host, false);
    assert_eq!(host.state_of(&heading).unwrap().opacity, 0.0);

    rc.tick(0.6);
    rc.render(&mut host, false);
    let mid = host.state_of(&heading).unwrap().opacity;
    assert!(mid > 0.0 && mid < 1.0);

    rc.update_scroll(900.0, ScrollDirection::Forward, false);
    assert!(!rc.intro_running());
    rc.render(&mut host, false);
    assert_eq!(host.state_of(&heading).unwrap().opacity, 1.0);
}

#[test]
fn detach_is_idempotent() {
    let mut host = host();
    let mut rc = register(&mut host, &section());
    rc.detach(&mut host);
    rc.detach(&mut host);
    assert_eq!(host.live_triggers(), 0);
    assert!(rc.trigger().is_none());
}

#[test]
fn absent_member_does_not_respace_its_siblings() {
    let staggered = SectionSpec::pinned(
        "sec",
        "sec",
        Timeline::from_phases(vec![
            Phase::entrance(["bg".into(), "heading".into()], Window::new(0.0, 0.5).unwrap())
                .from_state(PartialState::new().opacity(0.0))
                .to_state(PartialState::new().opacity(1.0))
                .stagger(0.1),
        ]),
    );

    let mut full = host();
    let with_sibling = register(&mut full, &staggered);
    let mut partial = host();
    partial.remove_target(&TargetId::from("heading"));
    let without_sibling = register(&mut partial, &staggered);

    assert_eq!(without_sibling.targets(), &[TargetId::from("bg")]);
    assert_eq!(without_sibling.region().phases.len(), 1);

    let mut a = vec![VisualState::RESTING; 2];
    let mut b = vec![VisualState::RESTING; 1];
    for p in [0.1, 0.25, 0.4] {
        with_sibling.evaluate_at(p, &mut a);
        without_sibling.evaluate_at(p, &mut b);
        assert_eq!(a[0], b[0], "progress {p}");
    }
    // bg's own window is 0..0.4 in both cases.
    assert_eq!(b[0].opacity, 1.0);
}

#[test]
fn smooth_scrub_resumes_from_start_after_leave_back() {
    let mut host = host();
    let mut rc = register(
        &mut host,
        &section()
            .with_scrub(Scrub::Smooth { secs: 0.6 })
            .reset_on_leave_back(),
    );
    let bg = TargetId::from("bg");

    rc.update_scroll(800.0, ScrollDirection::Still, true);
    rc.update_scroll(1400.0, ScrollDirection::Forward, false);
    for _ in 0..120 {
        rc.tick(1.0 / 60.0);
    }
    assert_eq!(rc.state(), RegionState::Settled);
    assert!(rc.shown_progress() > 0.5);

    rc.update_scroll(100.0, ScrollDirection::Backward, false);
    assert_eq!(rc.pose(), Pose::Settled);

    rc.update_scroll(810.0, ScrollDirection::Forward, false);
    assert_eq!(rc.pose(), Pose::Scrubbed);
    rc.tick(1.0 / 60.0);
    rc.render(&mut host, false);
    assert!(rc.shown_progress() <= rc.scroll_progress());
    assert!(host.state_of(&bg).unwrap().opacity < 0.1);
}
