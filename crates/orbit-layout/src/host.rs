use crate::arc::{Bounds, Size};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a data element in `[0, item_count)`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
)]
#[serde(transparent)]
pub struct ItemIndex(usize);

impl ItemIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// The view tree a [`CircularLayout`](crate::CircularLayout) lays out into.
///
/// The host owns every view. A handle obtained from [`request_view`] belongs
/// to the engine until it is handed back through [`remove_and_recycle`] (or
/// the host reclaims it wholesale via [`detach_all`] / [`remove_all_views`]).
///
/// [`request_view`]: LayoutHost::request_view
/// [`remove_and_recycle`]: LayoutHost::remove_and_recycle
/// [`detach_all`]: LayoutHost::detach_all
/// [`remove_all_views`]: LayoutHost::remove_all_views
pub trait LayoutHost {
    type View: Clone + fmt::Debug + PartialEq;

    fn item_count(&self) -> usize;

    /// Layout area after padding.
    fn content_size(&self) -> Size;

    /// A view bound to `index`, possibly recycled.
    fn request_view(&mut self, index: ItemIndex) -> Self::View;

    fn measure(&mut self, view: &Self::View, constraint: Size) -> Size;

    fn insert(&mut self, view: &Self::View, at_front: bool);

    fn remove_and_recycle(&mut self, view: Self::View);

    /// Detaches every child into scrap; the views stay bound to their index.
    fn detach_all(&mut self);

    /// Returns scrap left over after a layout pass to the pool.
    fn recycle_scrap(&mut self);

    /// Drops every child without keeping its binding.
    fn remove_all_views(&mut self);

    /// Attached children in traversal order.
    fn children(&self) -> Vec<Self::View>;

    fn index_of(&self, view: &Self::View) -> ItemIndex;

    fn rotation(&self, view: &Self::View) -> f64;

    fn place(&mut self, view: &Self::View, bounds: Bounds);

    fn set_rotation(&mut self, view: &Self::View, degrees: f64);

    fn set_scale(&mut self, view: &Self::View, x: f64, y: f64);

    /// Schedules a layout pass on a later host tick.
    fn request_layout(&mut self);
}
