use crate::config::Config;
use crate::report::{Frame, ItemReport};
use crate::script::Step;
use orbit_layout::{
    CircularLayout, ItemIndex, LayoutHost, LinearSmoothScroller, MemoryHost, ParamsError,
    ScrollStep,
};

const MAX_GLIDE_FRAMES: usize = 10_000;

/// Plays the host's part for a headless carousel: forwards steps to the
/// layout engine and runs the layout passes it asks for.
#[derive(Debug)]
pub struct Session {
    layout: CircularLayout,
    host: MemoryHost,
    scroller: LinearSmoothScroller,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, ParamsError> {
        Ok(Self {
            layout: CircularLayout::try_new(config.layout.clone())?,
            host: MemoryHost::new(config.items, config.viewport, config.item),
            scroller: LinearSmoothScroller::new(config.glide_step),
        })
    }

    pub fn layout(&self) -> &CircularLayout {
        &self.layout
    }

    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    pub fn apply(&mut self, step: Step) -> Frame {
        let mut consumed = None;
        let mut frames = None;

        match step {
            Step::Layout => self.layout.full_layout(&mut self.host),
            Step::Drag(dx) => {
                let used = self.layout.scroll_by(&mut self.host, dx);
                if used != dx {
                    log::info!("drag of {dx} clamped to {used}");
                }
                consumed = Some(used);
            }
            Step::Jump(index) => self.layout.scroll_to_index(&mut self.host, index),
            Step::Glide(index) => {
                let (used, count) = self.glide(index);
                consumed = Some(used);
                frames = Some(count);
            }
            Step::Reset => self.layout.on_data_reset(&mut self.host),
            Step::Items(count) => {
                self.host.set_item_count(count);
                self.layout.full_layout(&mut self.host);
            }
        }

        self.settle();
        self.frame(step, consumed, frames)
    }

    fn glide(&mut self, index: ItemIndex) -> (f64, usize) {
        self.layout
            .smooth_scroll_to_index(&self.host, &mut self.scroller, index);

        let (mut total, mut count) = (0.0, 0);
        while count < MAX_GLIDE_FRAMES {
            match self.scroller.tick(&mut self.layout, &mut self.host) {
                ScrollStep::Moved(used) => {
                    total += used;
                    count += 1;
                }
                ScrollStep::Finished | ScrollStep::Idle => break,
            }
        }

        if self.scroller.is_running() {
            log::warn!("glide to item {index} stopped after {MAX_GLIDE_FRAMES} frames");
            self.scroller.stop();
        }
        (total, count)
    }

    /// Runs the deferred layout pass the engine may have requested.
    fn settle(&mut self) {
        if self.host.take_layout_request() {
            self.layout.full_layout(&mut self.host);
        }
    }

    fn frame(&self, step: Step, consumed: Option<f64>, frames: Option<usize>) -> Frame {
        let items = self
            .host
            .snapshot()
            .into_iter()
            .map(|view| ItemReport {
                index: view.index,
                rotation: view.rotation,
                scale: view.scale.0,
                bounds: view.bounds,
            })
            .collect();

        Frame {
            step: step.to_string(),
            offset: self.layout.offset(),
            max_offset: self.layout.max_offset(self.host.item_count()),
            consumed,
            frames,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(items: usize) -> Session {
        let config = Config {
            items,
            ..Config::default()
        };
        let mut session = Session::new(&config).unwrap();
        session.apply(Step::Layout);
        session
    }

    fn indices(frame: &Frame) -> Vec<usize> {
        let mut v: Vec<usize> = frame.items.iter().map(|i| i.index.get()).collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_initial_frame() {
        let mut session = session(6);
        let frame = session.apply(Step::Layout);
        assert_eq!(frame.step, "layout");
        assert_eq!(frame.offset, 0.0);
        assert_eq!(frame.max_offset, 150.0);
        assert_eq!(indices(&frame), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_jump_runs_deferred_layout() {
        let mut session = session(10);
        let frame = session.apply(Step::Jump(ItemIndex::new(3)));
        assert_eq!(frame.offset, 90.0);
        assert_eq!(indices(&frame), vec![0, 1, 2, 3, 4, 5, 6, 7]);
        let front = frame.items.iter().find(|i| i.index.get() == 3).unwrap();
        assert!(front.rotation.abs() < 1e-9);
    }

    #[test]
    fn test_drag_reports_consumed() {
        let mut session = session(6);
        let frame = session.apply(Step::Drag(-40.0));
        assert_eq!(frame.consumed, Some(0.0));
        assert_eq!(frame.offset, 0.0);

        let frame = session.apply(Step::Drag(100.0));
        assert_eq!(frame.consumed, Some(100.0));
        assert!((frame.offset - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_glide() {
        let mut session = session(12);
        let frame = session.apply(Step::Glide(ItemIndex::new(5)));
        assert!((frame.offset - 150.0).abs() < 1e-6);
        assert!(frame.frames.unwrap() > 0);
        assert!((frame.consumed.unwrap() - 1500.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_layout_params_rejected() {
        let mut config = Config::default();
        config.layout.interval_angle = 0.0;
        assert!(matches!(
            Session::new(&config),
            Err(ParamsError::NotPositive { name: "interval_angle", .. })
        ));
    }

    #[test]
    fn test_nan_drag_leaves_frame_unchanged() {
        let mut session = session(6);
        let before = session.apply(Step::Drag(100.0));
        let frame = session.apply(Step::Drag(f64::NAN));
        assert_eq!(frame.consumed, Some(0.0));
        assert_eq!(frame.offset, before.offset);
        assert_eq!(indices(&frame), indices(&before));
    }

    #[test]
    fn test_reset_and_items() {
        let mut session = session(12);
        session.apply(Step::Drag(500.0));

        let frame = session.apply(Step::Reset);
        assert!(frame.items.is_empty());
        assert_eq!(frame.offset, 0.0);

        let frame = session.apply(Step::Items(2));
        assert_eq!(indices(&frame), vec![0, 1]);
        assert_eq!(frame.max_offset, 30.0);
        assert!(session.host().scrap_is_empty());
        assert!(session.layout().can_scroll_horizontally());
    }
}
