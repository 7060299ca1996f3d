use std::collections::BTreeMap;

use crate::{
    animation::{
        ease::Ease,
        state::{Property, VisualState, lerp},
        timeline::{Phase, Window},
    },
    foundation::core::{TargetId, Viewport},
};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Segment {
    window: Window,
    from: f64,
    to: f64,
    ease: Ease,
}

impl Segment {
    fn sample(&self, p: f64) -> f64 {
        let len = self.window.len();
        let t = if len > 0.0 {
            (p - self.window.from) / len
        } else if p >= self.window.from {
            1.0
        } else {
            0.0
        };
        lerp(self.from, self.to, self.ease.apply(t))
    }
}

/// Segments of one (target, property) pair, stored as a slice of the timeline's segment table.
#[derive(Clone, Copy, Debug)]
struct Channel {
    target: usize,
    prop: Property,
    first: usize,
    len: usize,
}

/// A region's phases flattened into per-(target, property) channels.
///
/// Lengths are resolved once at compile time; evaluation only reads the tables and writes into a
/// caller-owned buffer, so it can run on every animation frame.
#[derive(Clone, Debug, Default)]
pub struct PhaseTimeline {
    channels: Vec<Channel>,
    segments: Vec<Segment>,
    target_count: usize,
}

impl PhaseTimeline {
    /// Compile `phases` against the target table `targets`.
    ///
    /// Members of a phase that are not in `targets` are ignored. Within a channel, segments are
    /// ordered by window start; phases starting together keep declaration order.
    pub fn compile(phases: &[Phase], targets: &[TargetId], viewport: Viewport) -> Self {
        let mut by_channel: BTreeMap<(usize, Property), Vec<Segment>> = BTreeMap::new();

        for phase in phases {
            let n = phase.targets.len();
            for (i, target) in phase.targets.iter().enumerate() {
                let Some(target_idx) = targets.iter().position(|t| t == target) else {
                    continue;
                };
                let window = phase.member_window(i, n);
                for prop in Property::ALL {
                    let (Some(from), Some(to)) = (
                        phase.from.resolve(prop, viewport),
                        phase.to.resolve(prop, viewport),
                    ) else {
                        continue;
                    };
                    by_channel
                        .entry((target_idx, prop))
                        .or_default()
                        .push(Segment {
                            window,
                            from,
                            to,
                            ease: phase.ease,
                        });
                }
            }
        }

        let mut channels = Vec::with_capacity(by_channel.len());
        let mut segments = Vec::new();
        for ((target, prop), mut segs) in by_channel {
            segs.sort_by(|a, b| a.window.from.total_cmp(&b.window.from));
            channels.push(Channel {
                target,
                prop,
                first: segments.len(),
                len: segs.len(),
            });
            segments.extend(segs);
        }

        Self {
            channels,
            segments,
            target_count: targets.len(),
        }
    }

    /// Size of the target table the timeline was compiled against.
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Number of animated (target, property) pairs.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// `true` when nothing is animated.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Write the state of every target at progress `p` into `out`.
    ///
    /// Properties no phase animates stay at [`VisualState::RESTING`].
    pub fn evaluate(&self, p: f64, out: &mut [VisualState]) {
        out.fill(VisualState::RESTING);
        self.overlay(p, out);
    }

    /// Write only the animated properties at progress `p`, leaving the rest of `out` untouched.
    ///
    /// The governing segment of a channel is the last one whose window starts at or before `p`,
    /// or the first one when `p` precedes them all. Its value is clamped to the segment's
    /// endpoints, so progress outside every window holds the nearest boundary state.
    pub fn overlay(&self, p: f64, out: &mut [VisualState]) {
        debug_assert!(out.len() >= self.target_count);
        for ch in &self.channels {
            let segs = &self.segments[ch.first..ch.first + ch.len];
            let idx = segs.partition_point(|s| s.window.from <= p);
            let seg = &segs[idx.saturating_sub(1)];
            if let Some(slot) = out.get_mut(ch.target) {
                slot.set(ch.prop, seg.sample(p));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/phase.rs"]
mod tests;
