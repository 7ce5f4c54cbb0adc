// Fake host: fixed bounds, manual frame scheduler, recording surface.
// Cancellations are shared so they stay visible after the component drops.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use wavefield_engine::component::{Bounds, FrameHandle, Host};
use wavefield_engine::surface::Recorder;
use wavefield_engine::{FieldError, Result};

#[derive(Default)]
pub struct FakeHost {
    pub rect: Bounds,
    pub scroll: f64,
    pub surface: Recorder,
    pub style: Recorder,
    pub next_id: i32,
    pub requested: Vec<FrameHandle>,
    pub cancelled: Rc<RefCell<Vec<FrameHandle>>>,
    pub refuse_frames: bool,
}

impl FakeHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            rect: Bounds { left: 0.0, top: 0.0, width, height },
            ..Self::default()
        }
    }
}

impl Host for FakeHost {
    type Surface = Recorder;
    type Style = Recorder;

    fn bounds(&mut self) -> Result<Bounds> {
        Ok(self.rect)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll
    }

    fn sinks(&mut self) -> (&mut Recorder, &mut Recorder) {
        (&mut self.surface, &mut self.style)
    }

    fn request_frame(&mut self) -> Result<FrameHandle> {
        if self.refuse_frames {
            return Err(FieldError::Host("scheduler gone".into()));
        }
        self.next_id += 1;
        let h = FrameHandle(self.next_id);
        self.requested.push(h);
        Ok(h)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.borrow_mut().push(handle);
    }
}

/// Same rounding the renderer applies.
pub fn round_tenth(v: f64) -> f64 {
    (v * 10.0 + 0.5).floor() / 10.0
}
