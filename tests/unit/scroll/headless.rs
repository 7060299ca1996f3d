use super::*;
use crate::foundation::core::{RegionId, ScrollRange};

fn vp() -> Viewport {
    Viewport::new(1000.0, 800.0).unwrap()
}

fn pinned(anchor: &str, start: f64, spacing: f64) -> TriggerSpec {
    TriggerSpec {
        role: TriggerRole::Region {
            id: RegionId::from(anchor),
            anchor: AnchorId::from(anchor),
        },
        range: ScrollRange::new(start, start + spacing).unwrap(),
        pin: true,
        pin_spacing: spacing,
    }
}

#[test]
fn stacked_anchors_follow_each_other() {
    let host = HeadlessHost::new(vp())
        .stack_anchor("a", 800.0)
        .stack_anchor("b", 800.0);
    assert_eq!(host.measure_anchor(&"b".into()).unwrap().top, 800.0);
    assert_eq!(host.max_scroll(), 800.0);
    assert!(host.measure_anchor(&"missing".into()).is_none());
}

#[test]
fn pinned_triggers_push_later_anchors_and_grow_scroll() {
    let mut host = HeadlessHost::new(vp())
        .stack_anchor("a", 800.0)
        .stack_anchor("b", 800.0);
    let id = host.attach_trigger(&pinned("a", 0.0, 1040.0)).unwrap();

    assert_eq!(host.measure_anchor(&"a".into()).unwrap().top, 0.0);
    assert_eq!(host.measure_anchor(&"b".into()).unwrap().top, 1840.0);
    assert_eq!(host.max_scroll(), 1840.0);

    host.detach_trigger(id);
    host.detach_trigger(id);
    assert_eq!(host.live_triggers(), 0);
    assert_eq!(host.attached_total(), 1);
    assert_eq!(host.max_scroll(), 800.0);
}

#[test]
fn attach_limit_injects_failures() {
    let mut host = HeadlessHost::new(vp()).stack_anchor("a", 800.0);
    host.set_attach_limit(Some(0));
    assert!(host.attach_trigger(&pinned("a", 0.0, 10.0)).is_err());
    host.set_attach_limit(None);
    assert!(host.attach_trigger(&pinned("a", 0.0, 10.0)).is_ok());
}

#[test]
fn states_only_land_on_present_targets() {
    let mut host = HeadlessHost::new(vp()).with_targets(["t"]);
    host.apply_state(&"t".into(), &VisualState::RESTING);
    host.apply_state(&"ghost".into(), &VisualState::RESTING);
    assert_eq!(host.state_of(&"t".into()), Some(VisualState::RESTING));
    assert_eq!(host.state_of(&"ghost".into()), None);
    assert!(!host.has_target(&"ghost".into()));
}

#[test]
fn scroll_animations_can_finish_or_cancel() {
    let mut host = HeadlessHost::new(vp());
    let a = host.animate_scroll(100.0, 0.2, Ease::OutCubic);
    let b = host.animate_scroll(200.0, 0.3, Ease::OutCubic);
    host.cancel_scroll_animation(a);
    assert_eq!(host.scroll_animations().count(), 1);
    assert_eq!(host.finish_scroll_animation(b).unwrap().to, 200.0);
    assert_eq!(host.scroll_animations().count(), 0);
}
