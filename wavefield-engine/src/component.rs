// component.rs - Attach/detach lifecycle around a WaveField
//
// The host supplies bounds, a drawing surface, a style sink and a frame
// scheduler. Every frame the component schedules is tracked so detach can
// cancel it; a loop is never left running after teardown.

use crate::config::FieldConfig;
use crate::error::{FieldError, Result};
use crate::field::WaveField;
use crate::surface::{StyleSink, Surface};

/// Host-space rectangle of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Opaque id of a pending animation-frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

pub trait Host {
    type Surface: Surface;
    type Style: StyleSink;

    /// Current surface rectangle; also resizes the backing store to match.
    fn bounds(&mut self) -> Result<Bounds>;

    /// Vertical page scroll, added to pointer y.
    fn scroll_y(&self) -> f64;

    /// Drawing surface and style sink, borrowed together for one frame.
    fn sinks(&mut self) -> (&mut Self::Surface, &mut Self::Style);

    /// Ask for one `tick` on the next display refresh.
    fn request_frame(&mut self) -> Result<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub struct Component<H: Host> {
    host: H,
    config: FieldConfig,
    bounds: Bounds,
    field: Option<WaveField>,
    pending: Option<FrameHandle>,
}

impl<H: Host> Component<H> {
    pub fn new(host: H, config: FieldConfig) -> Self {
        Self {
            host,
            config,
            bounds: Bounds::default(),
            field: None,
            pending: None,
        }
    }

    /// Build the grid for the current bounds and start the frame loop.
    pub fn attach(&mut self, seed: u32) -> Result<()> {
        if self.field.is_some() {
            return Err(FieldError::AlreadyAttached);
        }

        let bounds = self.host.bounds()?;
        let field = WaveField::new(bounds.width, bounds.height, self.config.clone(), seed)?;
        let handle = self.host.request_frame()?;

        log::info!("wave field attached at {}x{}", bounds.width, bounds.height);
        self.bounds = bounds;
        self.field = Some(field);
        self.pending = Some(handle);
        Ok(())
    }

    /// Stop the frame loop and drop all field state.
    pub fn detach(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
        if self.field.take().is_some() {
            log::info!("wave field detached");
        }
    }

    pub fn on_resize(&mut self) -> Result<()> {
        let field = self.field.as_mut().ok_or(FieldError::NotAttached)?;
        let bounds = self.host.bounds()?;
        field.resize(bounds.width, bounds.height)?;
        self.bounds = bounds;
        Ok(())
    }

    /// Page-space pointer position from a mouse or touch event.
    pub fn on_pointer_move(&mut self, page_x: f64, page_y: f64) {
        let scroll = self.host.scroll_y();
        let Some(field) = self.field.as_mut() else {
            log::warn!("pointer event while detached");
            return;
        };
        let x = page_x - self.bounds.left;
        let y = page_y - self.bounds.top + scroll;
        field.pointer_move(x, y);
    }

    /// Run one frame and schedule the next. A stale callback firing after
    /// detach is a no-op.
    pub fn tick(&mut self, time: f64) -> Result<()> {
        let Self { host, field, pending, .. } = self;
        *pending = None;
        let Some(field) = field.as_mut() else {
            log::warn!("frame after detach ignored");
            return Ok(());
        };

        let (surface, style) = host.sinks();
        field.tick(time, surface, style);

        *pending = Some(host.request_frame()?);
        Ok(())
    }

    pub fn is_attached(&self) -> bool { self.field.is_some() }
    pub fn field(&self) -> Option<&WaveField> { self.field.as_ref() }
    pub fn host(&self) -> &H { &self.host }
    pub fn host_mut(&mut self) -> &mut H { &mut self.host }
    pub fn pending(&self) -> Option<FrameHandle> { self.pending }
    pub fn bounds(&self) -> Bounds { self.bounds }
}

impl<H: Host> Drop for Component<H> {
    fn drop(&mut self) {
        self.detach();
    }
}
