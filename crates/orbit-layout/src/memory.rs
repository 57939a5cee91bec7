use crate::arc::{Bounds, Size};
use crate::host::{ItemIndex, LayoutHost};
use derive_more::Display;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[display("view#{_0}")]
#[serde(transparent)]
pub struct ViewId(usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryView {
    pub id: ViewId,
    pub index: ItemIndex,
    pub measured: Size,
    pub bounds: Bounds,
    pub rotation: f64,
    pub scale: (f64, f64),
}

impl MemoryView {
    fn new(id: ViewId, index: ItemIndex) -> Self {
        Self {
            id,
            index,
            measured: Size::default(),
            bounds: Bounds::default(),
            rotation: 0.0,
            scale: (1.0, 1.0),
        }
    }

    fn rebind(&mut self, index: ItemIndex) {
        *self = Self::new(self.id, index);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HostStats {
    pub created: usize,
    pub rebound: usize,
    pub recycled: usize,
}

/// A view tree without a toolkit behind it.
///
/// Views live in an arena and move between three places: the attached
/// children (in traversal order), the scrap list (detached but still bound to
/// their item) and the recycled pool (free for any item).
#[derive(Debug, Clone)]
pub struct MemoryHost {
    item_count: usize,
    content: Size,
    item_size: Size,
    views: Vec<MemoryView>,
    children: Vec<ViewId>,
    scrap: Vec<ViewId>,
    pool: Vec<ViewId>,
    layout_requested: bool,
    stats: HostStats,
}

impl MemoryHost {
    pub fn new(item_count: usize, content: Size, item_size: Size) -> Self {
        Self {
            item_count,
            content,
            item_size,
            views: Vec::new(),
            children: Vec::new(),
            scrap: Vec::new(),
            pool: Vec::new(),
            layout_requested: false,
            stats: HostStats::default(),
        }
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
    }

    /// Clears and returns the pending layout request.
    pub fn take_layout_request(&mut self) -> bool {
        std::mem::take(&mut self.layout_requested)
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    pub fn view(&self, id: ViewId) -> Option<&MemoryView> {
        self.views.get(id.0)
    }

    /// Attached views in traversal order.
    pub fn snapshot(&self) -> Vec<MemoryView> {
        self.children
            .iter()
            .map(|id| self.views[id.0].clone())
            .collect()
    }

    pub fn scrap_is_empty(&self) -> bool {
        self.scrap.is_empty()
    }

    fn view_mut(&mut self, id: ViewId) -> &mut MemoryView {
        &mut self.views[id.0]
    }

    fn bound_to(&self, ids: &[ViewId], index: ItemIndex) -> Option<usize> {
        ids.iter().position(|id| self.views[id.0].index == index)
    }
}

impl LayoutHost for MemoryHost {
    type View = ViewId;

    fn item_count(&self) -> usize {
        self.item_count
    }

    fn content_size(&self) -> Size {
        self.content
    }

    fn request_view(&mut self, index: ItemIndex) -> ViewId {
        if let Some(pos) = self.bound_to(&self.children, index) {
            return self.children[pos];
        }
        if let Some(pos) = self.bound_to(&self.scrap, index) {
            return self.scrap.remove(pos);
        }
        if let Some(id) = self.pool.pop() {
            self.view_mut(id).rebind(index);
            self.stats.rebound += 1;
            return id;
        }

        let id = ViewId(self.views.len());
        self.views.push(MemoryView::new(id, index));
        self.stats.created += 1;
        id
    }

    fn measure(&mut self, view: &ViewId, _constraint: Size) -> Size {
        let size = self.item_size;
        self.view_mut(*view).measured = size;
        size
    }

    fn insert(&mut self, view: &ViewId, at_front: bool) {
        if self.children.contains(view) {
            return;
        }
        if at_front {
            self.children.insert(0, *view);
        } else {
            self.children.push(*view);
        }
    }

    fn remove_and_recycle(&mut self, view: ViewId) {
        self.children.retain(|id| *id != view);
        self.pool.push(view);
        self.stats.recycled += 1;
    }

    fn detach_all(&mut self) {
        self.scrap.append(&mut self.children);
    }

    fn recycle_scrap(&mut self) {
        self.stats.recycled += self.scrap.len();
        self.pool.append(&mut self.scrap);
    }

    fn remove_all_views(&mut self) {
        let removed = std::mem::take(&mut self.children);
        for id in &removed {
            self.view_mut(*id).rebind(ItemIndex::default());
        }
        self.pool.extend(removed);
    }

    fn children(&self) -> Vec<ViewId> {
        self.children.clone()
    }

    fn index_of(&self, view: &ViewId) -> ItemIndex {
        self.views[view.0].index
    }

    fn rotation(&self, view: &ViewId) -> f64 {
        self.views[view.0].rotation
    }

    fn place(&mut self, view: &ViewId, bounds: Bounds) {
        self.view_mut(*view).bounds = bounds;
    }

    fn set_rotation(&mut self, view: &ViewId, degrees: f64) {
        self.view_mut(*view).rotation = degrees;
    }

    fn set_scale(&mut self, view: &ViewId, x: f64, y: f64) {
        self.view_mut(*view).scale = (x, y);
    }

    fn request_layout(&mut self) {
        self.layout_requested = true;
    }
}
