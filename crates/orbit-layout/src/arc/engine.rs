use super::geometry::{ItemTransform, Point, Size};
use super::params::{LayoutParams, ParamsError};
use crate::host::{ItemIndex, LayoutHost};
use crate::scroller::{DirectionHint, SmoothScroller};
use serde::Serialize;
use strum::Display as StrumDisplay;

/// Which way along the arc a pass is moving. `Backward` brings lower indices
/// toward the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Backward,
    Forward,
}

impl ScrollDirection {
    pub fn from_delta(dx: f64) -> Self {
        if dx < 0.0 { Self::Backward } else { Self::Forward }
    }

    pub fn sign(self) -> f64 {
        match self {
            Self::Backward => -1.0,
            Self::Forward => 1.0,
        }
    }
}

/// Places same-sized items on an arc and keeps the host's view tree in step
/// with a single rotation offset.
///
/// Per-item state lives in two parallel tables sized to the item count of the
/// last full layout: the assigned angle and whether a view is attached.
#[derive(Debug, Clone)]
pub struct CircularLayout {
    params: LayoutParams,
    offset: f64,
    angles: Vec<f64>,
    attached: Vec<bool>,
    item_size: Size,
    anchor: Point,
}

impl Default for CircularLayout {
    fn default() -> Self {
        Self::new(LayoutParams::default())
    }
}

impl CircularLayout {
    /// Takes `params` as given. Use [`CircularLayout::try_new`] for values
    /// that have not been through [`LayoutParams::validate`].
    pub fn new(params: LayoutParams) -> Self {
        Self {
            params,
            offset: 0.0,
            angles: Vec::new(),
            attached: Vec::new(),
            item_size: Size::default(),
            anchor: Point::default(),
        }
    }

    pub fn try_new(params: LayoutParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self::new(params))
    }

    pub fn with_radius(radius: f64) -> Self {
        Self::new(LayoutParams::with_radius(radius))
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn item_size(&self) -> Size {
        self.item_size
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn can_scroll_horizontally(&self) -> bool {
        true
    }

    pub fn max_offset(&self, item_count: usize) -> f64 {
        item_count.saturating_sub(1) as f64 * self.params.interval_angle
    }

    /// Angle assigned at the last full layout.
    pub fn angle(&self, index: ItemIndex) -> Option<f64> {
        self.angles.get(index.get()).copied()
    }

    pub fn is_attached(&self, index: ItemIndex) -> bool {
        self.attached.get(index.get()).copied().unwrap_or(false)
    }

    pub fn attached_indices(&self) -> impl Iterator<Item = ItemIndex> + '_ {
        self.attached
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(ItemIndex::new(i)))
    }

    /// Offset that brings `index` to the front, clamped to the scroll range.
    pub fn target_offset(&self, index: ItemIndex, item_count: usize) -> f64 {
        (index.get() as f64 * self.params.interval_angle).clamp(0.0, self.max_offset(item_count))
    }

    fn relative_angle(&self, index: ItemIndex) -> Option<f64> {
        self.angle(index).map(|angle| angle - self.offset)
    }

    fn clamp_offset(&mut self, item_count: usize) {
        self.offset = self.offset.clamp(0.0, self.max_offset(item_count));
    }

    fn transform(&self, rotate: f64) -> ItemTransform {
        ItemTransform::calculate(
            self.anchor,
            self.item_size,
            self.params.radius,
            rotate,
            self.params.max_scale,
            self.params.min_scale_rotate,
        )
    }

    fn apply_transform<H: LayoutHost>(&self, host: &mut H, view: &H::View, rotate: f64) {
        let t = self.transform(rotate);
        host.place(view, t.bounds);
        host.set_rotation(view, t.rotation);
        host.set_scale(view, t.scale, t.scale);
    }

    fn mark_attached(&mut self, index: ItemIndex) {
        let slot = &mut self.attached[index.get()];
        debug_assert!(!*slot, "item {index} attached twice");
        if *slot {
            log::warn!("item {index} was already attached; overwriting");
        }
        *slot = true;
    }

    fn mark_detached(&mut self, index: ItemIndex) {
        if let Some(slot) = self.attached.get_mut(index.get()) {
            *slot = false;
        }
    }

    /// Rebuilds angles and attachments from scratch and lays out the visible
    /// window.
    pub fn full_layout<H: LayoutHost>(&mut self, host: &mut H) {
        let item_count = host.item_count();
        if item_count == 0 {
            log::debug!("full layout with no items");
            self.offset = 0.0;
            self.angles.clear();
            self.attached.clear();
            host.detach_all();
            host.recycle_scrap();
            return;
        }

        // all items share one size, so measuring item 0 is enough
        let content = host.content_size();
        let probe = host.request_view(ItemIndex::new(0));
        host.insert(&probe, false);
        self.item_size = host.measure(&probe, content);
        self.anchor = Point::new((content.width - self.item_size.width) / 2.0, 0.0);

        let (first, step) = (self.params.first_angle, self.params.interval_angle);
        self.angles = (0..item_count).map(|i| first + i as f64 * step).collect();
        self.attached = vec![false; item_count];

        host.detach_all();
        self.clamp_offset(item_count);
        log::debug!(
            "full layout: {} items, offset {:.2}, item {}x{}",
            item_count,
            self.offset,
            self.item_size.width,
            self.item_size.height
        );
        self.layout_items(host, ScrollDirection::Forward);
        host.recycle_scrap();
    }

    /// Detaches children that left the window, then attaches every in-window
    /// item that has no view yet, in ascending index order.
    pub fn layout_items<H: LayoutHost>(&mut self, host: &mut H, direction: ScrollDirection) {
        for view in host.children() {
            let index = host.index_of(&view);
            let visible = self
                .relative_angle(index)
                .is_some_and(|rotate| self.params.in_window(rotate));
            if !visible {
                log::trace!("detach item {index}");
                self.mark_detached(index);
                host.remove_and_recycle(view);
            }
        }

        let content = host.content_size();
        for i in 0..self.angles.len() {
            let index = ItemIndex::new(i);
            let rotate = self.angles[i] - self.offset;
            if !self.params.in_window(rotate) || self.attached[i] {
                continue;
            }

            let view = host.request_view(index);
            host.measure(&view, content);
            host.insert(&view, direction == ScrollDirection::Backward);
            self.apply_transform(host, &view, rotate);
            log::trace!("attach item {index} at {rotate:.2}");
            self.mark_attached(index);
        }
    }

    /// Rotates the arc by a drag of `dx` and returns how much of it was
    /// consumed. A drag past either end lands exactly on the bound and
    /// reports only the distance actually travelled.
    pub fn scroll_by<H: LayoutHost>(&mut self, host: &mut H, dx: f64) -> f64 {
        let item_count = host.item_count();
        if item_count == 0 {
            return 0.0;
        }
        if dx.is_nan() {
            log::warn!("ignoring drag of NaN");
            return 0.0;
        }

        let ratio = self.params.distance_ratio;
        let max = self.max_offset(item_count);
        let target = self.offset + dx / ratio;

        let (consumed, next) = if target < 0.0 {
            (-self.offset * ratio, 0.0)
        } else if target > max {
            ((max - self.offset) * ratio, max)
        } else {
            (dx, target)
        };

        let theta = next - self.offset;
        self.offset = next;

        for view in host.children() {
            let rotate = host.rotation(&view) - theta;
            self.apply_transform(host, &view, rotate);
        }

        self.layout_items(host, ScrollDirection::from_delta(dx));
        consumed
    }

    /// Jumps so `index` sits at the front. Takes effect on the next layout
    /// pass, which is requested from the host.
    pub fn scroll_to_index<H: LayoutHost>(&mut self, host: &mut H, index: ItemIndex) {
        let item_count = host.item_count();
        if index.get() >= item_count {
            return;
        }

        let target = index.get() as f64 * self.params.interval_angle;
        if target == self.offset {
            return;
        }

        log::debug!("scroll to item {index}: offset {:.2} -> {target:.2}", self.offset);
        self.offset = target;
        self.clamp_offset(item_count);
        host.request_layout();
    }

    pub fn smooth_scroll_to_index<H, S>(&self, host: &H, scroller: &mut S, index: ItemIndex)
    where
        H: LayoutHost,
        S: SmoothScroller,
    {
        if index.get() >= host.item_count() {
            return;
        }
        scroller.start(index, self.direction_strategy(host));
    }

    /// Snapshot of what the direction hint depends on, for handing to an
    /// animator.
    pub fn direction_strategy<H: LayoutHost>(&self, host: &H) -> DirectionHint {
        let first_attached = host.children().first().map(|view| host.index_of(view));
        DirectionHint::new(first_attached, host.item_count())
    }

    /// `None` when nothing is attached or `target` is out of range.
    pub fn direction_hint<H: LayoutHost>(
        &self,
        host: &H,
        target: ItemIndex,
    ) -> Option<ScrollDirection> {
        self.direction_strategy(host).resolve(target)
    }

    /// The item collection was replaced: drop every view and rewind. Angles
    /// are rebuilt on the next full layout.
    pub fn on_data_reset<H: LayoutHost>(&mut self, host: &mut H) {
        log::debug!("data reset");
        host.remove_all_views();
        self.offset = 0.0;
        self.attached.fill(false);
    }
}
