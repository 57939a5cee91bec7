use crate::arc::{CircularLayout, ScrollDirection};
use crate::host::{ItemIndex, LayoutHost};

const SETTLE_EPSILON: f64 = 1e-6;
pub const DEFAULT_GLIDE_STEP: f64 = 40.0;

/// Which way to move to reach a target, decided from the first attached
/// child at the moment the animation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionHint {
    first_attached: Option<ItemIndex>,
    item_count: usize,
}

impl DirectionHint {
    pub fn new(first_attached: Option<ItemIndex>, item_count: usize) -> Self {
        Self {
            first_attached,
            item_count,
        }
    }

    pub fn resolve(&self, target: ItemIndex) -> Option<ScrollDirection> {
        if target.get() >= self.item_count {
            return None;
        }
        let first = self.first_attached?;
        Some(if target < first {
            ScrollDirection::Backward
        } else {
            ScrollDirection::Forward
        })
    }
}

/// Animator driven by [`CircularLayout::smooth_scroll_to_index`].
pub trait SmoothScroller {
    fn start(&mut self, target: ItemIndex, hint: DirectionHint);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollStep {
    Idle,
    Moved(f64),
    Finished,
}

/// Moves a fixed distance per frame: toward the hinted side while the target
/// is off the arc, then straight to its front position.
#[derive(Debug, Clone)]
pub struct LinearSmoothScroller {
    step: f64,
    pending: Option<(ItemIndex, DirectionHint)>,
}

impl LinearSmoothScroller {
    /// `step` is the drag distance per frame. A step that is zero or not
    /// finite falls back to [`DEFAULT_GLIDE_STEP`].
    pub fn new(step: f64) -> Self {
        let step = if step.is_finite() && step != 0.0 {
            step.abs()
        } else {
            log::warn!("invalid glide step {step}; using {DEFAULT_GLIDE_STEP}");
            DEFAULT_GLIDE_STEP
        };
        Self {
            step,
            pending: None,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn target(&self) -> Option<ItemIndex> {
        self.pending.map(|(target, _)| target)
    }

    pub fn stop(&mut self) {
        self.pending = None;
    }

    fn finish(&mut self) -> ScrollStep {
        if let Some(target) = self.target() {
            log::debug!("smooth scroll to item {target} finished");
        }
        self.stop();
        ScrollStep::Finished
    }

    /// Advances one frame.
    pub fn tick<H: LayoutHost>(&mut self, layout: &mut CircularLayout, host: &mut H) -> ScrollStep {
        let Some((target, hint)) = self.pending else {
            return ScrollStep::Idle;
        };

        let item_count = host.item_count();
        if target.get() >= item_count {
            return self.finish();
        }

        let dx = if layout.is_attached(target) {
            let remaining = (layout.target_offset(target, item_count) - layout.offset())
                * layout.params().distance_ratio;
            remaining.clamp(-self.step, self.step)
        } else {
            match hint.resolve(target) {
                Some(direction) => direction.sign() * self.step,
                None => return self.finish(),
            }
        };

        if dx.abs() < SETTLE_EPSILON {
            return self.finish();
        }

        let consumed = layout.scroll_by(host, dx);
        if consumed.abs() < SETTLE_EPSILON {
            return self.finish();
        }
        ScrollStep::Moved(consumed)
    }
}

impl SmoothScroller for LinearSmoothScroller {
    fn start(&mut self, target: ItemIndex, hint: DirectionHint) {
        log::debug!("smooth scroll to item {target}, hint {:?}", hint.resolve(target));
        self.pending = Some((target, hint));
    }
}
