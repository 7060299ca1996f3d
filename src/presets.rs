//! The credential-consulting landing page: five pinned sections followed by two flowing ones.
//!
//! Target handles are `<section>.<element>`, with `.<n>` appended for split headline words,
//! lines and repeated cards.

use crate::{
    animation::{
        ease::Ease,
        state::PartialState,
        timeline::{Position, Timeline, TimelineBuilder, Tween},
    },
    choreo::{lifecycle::PageSpec, region::SectionSpec},
    foundation::core::{Length, TargetId},
    foundation::error::ChoreoResult,
    scroll::trigger::{Scrub, TriggerBounds, TriggerEdge},
};

/// Every target the landing page animates, in section order.
pub const LANDING_TARGETS: &[&str] = &[
    "hero.image",
    "hero.content",
    "hero.word.0",
    "hero.word.1",
    "hero.word.2",
    "hero.word.3",
    "hero.word.4",
    "hero.word.5",
    "hero.sub",
    "hero.cta",
    "hero.caption",
    "journey.bg",
    "journey.line.0",
    "journey.line.1",
    "journey.line.2",
    "journey.body",
    "journey.label",
    "process.image",
    "process.text",
    "process.word.0",
    "process.word.1",
    "process.word.2",
    "process.word.3",
    "process.body",
    "support.bg",
    "support.line.0",
    "support.line.1",
    "support.line.2",
    "support.body",
    "results.text",
    "results.image",
    "results.word.0",
    "results.word.1",
    "results.word.2",
    "results.word.3",
    "results.body",
    "services.card.0",
    "services.card.1",
    "services.card.2",
    "closing.item.0",
    "closing.item.1",
    "closing.item.2",
    "closing.item.3",
    "closing.item.4",
];

/// Targets a host may legitimately leave unrendered (e.g. on narrow viewports).
pub const OPTIONAL_TARGETS: &[&str] = &["hero.caption"];

/// Section anchors, top to bottom.
pub const LANDING_ANCHORS: &[&str] = &[
    "hero", "journey", "process", "support", "results", "services", "closing",
];

fn one(name: &str) -> [TargetId; 1] {
    [TargetId::from(name)]
}

fn group(prefix: &str, n: usize) -> Vec<TargetId> {
    (0..n)
        .map(|i| TargetId::from(format!("{prefix}.{i}")))
        .collect()
}

fn shown() -> PartialState {
    PartialState::new().opacity(1.0)
}

fn at_x(x: Length, opacity: f64) -> PartialState {
    PartialState::new().x(x).opacity(opacity)
}

fn at_y(y: Length, opacity: f64) -> PartialState {
    PartialState::new().y(y).opacity(opacity)
}

/// Declare the whole page.
pub fn landing_page() -> ChoreoResult<PageSpec> {
    Ok(PageSpec::new(vec![
        hero()?,
        backdrop_section("journey", true)?,
        split_section("process", Side::Image)?,
        backdrop_section("support", false)?,
        split_section("results", Side::Text)?,
        flowing(
            "services",
            group("services.card", 3),
            40.0,
            0.12,
            TriggerEdge::at(0.0, 0.4),
        )?,
        flowing(
            "closing",
            group("closing.item", 5),
            24.0,
            0.1,
            TriggerEdge::at(0.0, 0.5),
        )?,
    ]))
}

fn hero() -> ChoreoResult<SectionSpec> {
    let words = group("hero.word", 6);
    let copy = [TargetId::from("hero.sub"), TargetId::from("hero.cta")];

    let intro = TimelineBuilder::new()
        .add(
            Tween::entrance(one("hero.image"))
                .from(at_x(Length::vw(-60.0), 0.0))
                .to(at_x(Length::ZERO, 1.0))
                .duration(1.0),
            Position::END,
        )
        .add(
            Tween::entrance(one("hero.content"))
                .from(at_x(Length::vw(40.0), 0.0))
                .to(at_x(Length::ZERO, 1.0))
                .duration(0.9),
            Position::FromEnd(-0.7),
        )
        .add(
            Tween::entrance(words.clone())
                .from(at_y(Length::px(40.0), 0.0))
                .to(at_y(Length::ZERO, 1.0))
                .duration(0.6)
                .stagger(0.04),
            Position::FromEnd(-0.5),
        )
        .add(
            Tween::entrance(copy.clone())
                .from(at_y(Length::px(18.0), 0.0))
                .to(at_y(Length::ZERO, 1.0))
                .duration(0.5)
                .stagger(0.08),
            Position::FromEnd(-0.3),
        )
        .add(
            Tween::entrance(one("hero.caption"))
                .from(at_y(Length::px(12.0), 0.0))
                .to(at_y(Length::ZERO, 1.0))
                .duration(0.4),
            Position::FromEnd(-0.2),
        )
        .build()?;

    let scroll = TimelineBuilder::new()
        .add(
            Tween::exit(words)
                .from(at_x(Length::ZERO, 1.0))
                .to(at_x(Length::vw(-18.0), 0.0)),
            Position::At(0.7),
        )
        .add(
            Tween::exit(one("hero.content"))
                .from(at_x(Length::ZERO, 1.0))
                .to(at_x(Length::vw(20.0), 0.3)),
            Position::At(0.7),
        )
        .add(
            Tween::exit(one("hero.image"))
                .from(at_x(Length::ZERO, 1.0))
                .to(at_x(Length::vw(-18.0), 0.3)),
            Position::At(0.7),
        )
        .add(
            Tween::exit(copy)
                .from(at_y(Length::ZERO, 1.0))
                .to(at_y(Length::vh(10.0), 0.0)),
            Position::At(0.75),
        )
        .build()?;

    Ok(SectionSpec::pinned("hero", "hero", scroll)
        .with_intro(intro, 0.2)
        .reset_on_leave_back())
}

/// Full-bleed background with a line-split headline (journey, support).
fn backdrop_section(name: &str, with_label: bool) -> ChoreoResult<SectionSpec> {
    let bg = format!("{name}.bg");
    let body = format!("{name}.body");
    let label = format!("{name}.label");
    let lines = group(&format!("{name}.line"), 3);

    let mut tl = TimelineBuilder::new()
        .add(
            Tween::entrance(one(&bg))
                .from(
                    PartialState::new()
                        .scale(1.12)
                        .x(Length::vw(6.0))
                        .opacity(0.6),
                )
                .to(PartialState::new().scale(1.0).x(Length::ZERO).opacity(1.0))
                .ease(Ease::Linear),
            Position::At(0.0),
        )
        .add(
            Tween::entrance(lines.clone())
                .from(at_x(Length::vw(-60.0), 0.0))
                .to(at_x(Length::ZERO, 1.0))
                .stagger(0.02)
                .ease(Ease::Linear),
            Position::At(0.0),
        )
        .add(
            Tween::entrance(one(&body))
                .from(at_y(Length::vh(10.0), 0.0))
                .to(at_y(Length::ZERO, 1.0))
                .ease(Ease::Linear),
            Position::At(0.05),
        );
    if with_label {
        tl = tl.add(
            Tween::entrance(one(&label))
                .from(at_y(Length::px(-12.0), 0.0))
                .to(at_y(Length::ZERO, 1.0))
                .ease(Ease::Linear),
            Position::At(0.0),
        );
    }
    tl = tl
        .add(
            Tween::exit(one(&bg))
                .from(PartialState::new().scale(1.0).x(Length::ZERO).opacity(1.0))
                .to(PartialState::new()
                    .scale(1.06)
                    .x(Length::vw(-6.0))
                    .opacity(0.0)),
            Position::At(0.7),
        )
        .add(
            Tween::exit(lines)
                .from(at_y(Length::ZERO, 1.0))
                .to(at_y(Length::vh(-18.0), 0.0))
                .stagger(0.01),
            Position::At(0.7),
        )
        .add(
            Tween::exit(one(&body))
                .from(at_y(Length::ZERO, 1.0))
                .to(at_y(Length::vh(8.0), 0.0)),
            Position::At(0.7),
        );
    if with_label {
        tl = tl.add(
            Tween::exit(one(&label))
                .from(shown())
                .to(PartialState::new().opacity(0.0)),
            Position::At(0.7),
        );
    }

    Ok(SectionSpec::pinned(name, name, tl.build()?))
}

/// Which half of a split section slides in from the left.
#[derive(Clone, Copy)]
enum Side {
    Image,
    Text,
}

/// Image and text halves with a word-split headline (process, results).
fn split_section(name: &str, from_left: Side) -> ChoreoResult<SectionSpec> {
    let image = format!("{name}.image");
    let text = format!("{name}.text");
    let body = format!("{name}.body");
    let words = group(&format!("{name}.word"), 4);

    // The image leans away from the side it enters from.
    let (image_x, image_rot, text_x) = match from_left {
        Side::Image => (-60.0, -2.0, 40.0),
        Side::Text => (60.0, 2.0, -60.0),
    };
    let image_in = Tween::entrance(one(&image))
        .from(
            PartialState::new()
                .x(Length::vw(image_x))
                .rotate(image_rot)
                .opacity(0.0),
        )
        .to(PartialState::new().x(Length::ZERO).rotate(0.0).opacity(1.0))
        .ease(Ease::Linear);
    let text_in = Tween::entrance(one(&text))
        .from(at_x(Length::vw(text_x), 0.0))
        .to(at_x(Length::ZERO, 1.0))
        .ease(Ease::Linear);
    let (first, second) = match from_left {
        Side::Image => (image_in, text_in),
        Side::Text => (text_in, image_in),
    };

    let (image_out, text_out) = match from_left {
        Side::Image => ((-18.0, 0.0), (18.0, 0.3)),
        Side::Text => ((18.0, 0.3), (-18.0, 0.3)),
    };
    let image_exit = Tween::exit(one(&image))
        .from(at_x(Length::ZERO, 1.0))
        .to(at_x(Length::vw(image_out.0), image_out.1));
    let text_exit = Tween::exit(one(&text))
        .from(at_x(Length::ZERO, 1.0))
        .to(at_x(Length::vw(text_out.0), text_out.1));
    let (first_exit, second_exit) = match from_left {
        Side::Image => (image_exit, text_exit),
        Side::Text => (text_exit, image_exit),
    };

    let tl = TimelineBuilder::new()
        .add(first, Position::At(0.0))
        .add(second, Position::At(0.0))
        .add(
            Tween::entrance(words)
                .from(at_y(Length::px(40.0), 0.0))
                .to(at_y(Length::ZERO, 1.0))
                .stagger(0.02)
                .ease(Ease::Linear),
            Position::At(0.05),
        )
        .add(
            Tween::entrance(one(&body))
                .from(at_y(Length::px(24.0), 0.0))
                .to(at_y(Length::ZERO, 1.0))
                .ease(Ease::Linear),
            Position::At(0.1),
        )
        .add(first_exit, Position::At(0.7))
        .add(second_exit, Position::At(0.7))
        .build()?;

    Ok(SectionSpec::pinned(name, name, tl))
}

/// Unpinned section whose items rise in while its top travels from 80% of the viewport to `end`.
fn flowing(
    name: &str,
    items: Vec<TargetId>,
    rise_px: f64,
    stagger: f64,
    end: TriggerEdge,
) -> ChoreoResult<SectionSpec> {
    let tl: Timeline = TimelineBuilder::new()
        .add(
            Tween::entrance(items)
                .from(at_y(Length::px(rise_px), 0.0))
                .to(at_y(Length::ZERO, 1.0))
                .stagger(stagger)
                .ease(Ease::OutQuad),
            Position::At(0.0),
        )
        .build()?;
    Ok(SectionSpec::flowing(
        name,
        name,
        TriggerBounds::between(TriggerEdge::at(0.0, 0.8), end),
        tl,
    )
    .with_scrub(Scrub::Smooth { secs: 0.5 }))
}

#[cfg(test)]
#[path = "../tests/unit/presets.rs"]
mod tests;
