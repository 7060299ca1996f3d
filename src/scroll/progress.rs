use crate::foundation::core::ScrollRange;

/// Map scroll offset `s` into normalized progress through `range`.
///
/// Returns `clamp((s - start) / (end - start), 0, 1)`, or `None` for a degenerate range or a
/// non-finite offset. Pure and allocation-free; it runs on every scroll sample.
#[inline]
pub fn map_progress(s: f64, range: ScrollRange) -> Option<f64> {
    let len = range.end - range.start;
    if !(len > 0.0) || !s.is_finite() {
        return None;
    }
    Some(((s - range.start) / len).clamp(0.0, 1.0))
}

/// Direction of travel between two consecutive scroll samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ScrollDirection {
    /// Offset increased.
    Forward,
    /// Offset decreased.
    Backward,
    /// Same offset, e.g. a priming sample.
    Still,
}

impl ScrollDirection {
    /// Direction from `previous` to `current`.
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Self::Forward
        } else if current < previous {
            Self::Backward
        } else {
            Self::Still
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
