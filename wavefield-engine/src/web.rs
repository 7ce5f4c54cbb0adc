// web.rs - Browser host: canvas, animation frames, listeners
//
// `WaveCanvas` owns the component behind `Rc<RefCell<..>>` so the frame
// callback and event listeners can reach it. Callbacks hold a `Weak`, and
// detach unregisters everything it registered.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys as web;

use crate::component::{Bounds, Component, FrameHandle, Host};
use crate::config::FieldConfig;
use crate::error::{FieldError, Result};
use crate::page::{self, PageState};
use crate::surface::{StyleSink, Surface};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

fn host_err(e: JsValue) -> FieldError {
    FieldError::Host(format!("{e:?}"))
}

fn to_js(e: FieldError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ============================================================================
// Surface + style
// ============================================================================

pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    fn clear(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }
    fn set_stroke_color(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }
    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }
    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}

pub struct ElementStyle {
    element: web::HtmlElement,
}

impl StyleSink for ElementStyle {
    fn set_px(&mut self, name: &str, value: f64) {
        if let Err(e) = self.element.style().set_property(name, &format!("{value}px")) {
            log::debug!("style {name} rejected: {e:?}");
        }
    }
}

// ============================================================================
// Host
// ============================================================================

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct WebHost {
    window: web::Window,
    element: web::HtmlElement,
    canvas: web::HtmlCanvasElement,
    surface: CanvasSurface,
    style: ElementStyle,
    frame: FrameCallback,
}

impl WebHost {
    fn new(window: web::Window, element: web::HtmlElement) -> Result<Self> {
        let canvas = element
            .query_selector("canvas")
            .map_err(host_err)?
            .ok_or_else(|| FieldError::Host("element has no <canvas> child".into()))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|_| FieldError::Host("canvas child is not a canvas".into()))?;

        let ctx = canvas
            .get_context("2d")
            .map_err(host_err)?
            .ok_or_else(|| FieldError::Host("no 2d context".into()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| FieldError::Host("unexpected context type".into()))?;

        Ok(Self {
            window,
            style: ElementStyle { element: element.clone() },
            element,
            canvas,
            surface: CanvasSurface { ctx },
            frame: Rc::new(RefCell::new(None)),
        })
    }
}

impl Host for WebHost {
    type Surface = CanvasSurface;
    type Style = ElementStyle;

    fn bounds(&mut self) -> Result<Bounds> {
        let rect = self.element.get_bounding_client_rect();
        let (width, height) = (rect.width(), rect.height());
        if width < 1.0 || height < 1.0 {
            return Err(FieldError::EmptySurface { width, height });
        }
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        Ok(Bounds { left: rect.left(), top: rect.top(), width, height })
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn sinks(&mut self) -> (&mut CanvasSurface, &mut ElementStyle) {
        (&mut self.surface, &mut self.style)
    }

    fn request_frame(&mut self) -> Result<FrameHandle> {
        let frame = self.frame.borrow();
        let cb = frame
            .as_ref()
            .ok_or_else(|| FieldError::Host("frame callback not installed".into()))?;
        let id = self
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(host_err)?;
        Ok(FrameHandle(id))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {e:?}");
        }
    }
}

// ============================================================================
// Exported component
// ============================================================================

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

#[wasm_bindgen]
pub struct WaveCanvas {
    component: Rc<RefCell<Component<WebHost>>>,
    frame: FrameCallback,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WaveCanvas {
    /// Attach to `element`, which must contain a `<canvas>`. `config` is an
    /// optional JSON object overriding tuning constants.
    #[wasm_bindgen(constructor)]
    pub fn new(element: web::HtmlElement, config: Option<String>) -> std::result::Result<WaveCanvas, JsValue> {
        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let config = match config {
            Some(json) => FieldConfig::from_json(&json).map_err(to_js)?,
            None => FieldConfig::default(),
        };

        let host = WebHost::new(window.clone(), element).map_err(to_js)?;
        let frame = host.frame.clone();
        let component = Rc::new(RefCell::new(Component::new(host, config)));

        let weak = Rc::downgrade(&component);
        frame.borrow_mut().replace(Closure::new(move |time: f64| {
            if let Some(c) = weak.upgrade() {
                if let Err(e) = c.borrow_mut().tick(time) {
                    log::error!("frame error: {e}");
                }
            }
        }));

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u32;
        component.borrow_mut().attach(seed).map_err(to_js)?;

        let mut this = WaveCanvas { component, frame, listeners: Vec::new() };
        let target: web::EventTarget = window.into();

        this.listen(&target, "mousemove", |c, e| {
            if let Some(m) = e.dyn_ref::<web::MouseEvent>() {
                c.on_pointer_move(m.page_x() as f64, m.page_y() as f64);
            }
        })?;
        this.listen(&target, "touchmove", |c, e| {
            let touch = e
                .dyn_ref::<web::TouchEvent>()
                .and_then(|t| t.touches().get(0));
            if let Some(t) = touch {
                c.on_pointer_move(t.client_x() as f64, t.client_y() as f64);
            }
        })?;
        this.listen(&target, "resize", |c, _| {
            if let Err(e) = c.on_resize() {
                log::warn!("resize skipped: {e}");
            }
        })?;

        Ok(this)
    }

    /// Cancel the frame loop and remove all listeners. Safe to call twice.
    pub fn detach(&mut self) {
        self.component.borrow_mut().detach();
        for l in self.listeners.drain(..) {
            if let Err(e) = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref())
            {
                log::warn!("removeEventListener({}) failed: {e:?}", l.kind);
            }
        }
        self.frame.borrow_mut().take();
    }

    #[wasm_bindgen(getter)]
    pub fn attached(&self) -> bool {
        self.component.borrow().is_attached()
    }
}

impl WaveCanvas {
    fn listen<F>(&mut self, target: &web::EventTarget, kind: &'static str, mut f: F) -> std::result::Result<(), JsValue>
    where
        F: FnMut(&mut Component<WebHost>, &web::Event) + 'static,
    {
        let weak = Rc::downgrade(&self.component);
        let closure = Closure::<dyn FnMut(web::Event)>::new(move |e: web::Event| {
            if let Some(c) = weak.upgrade() {
                f(&mut c.borrow_mut(), &e);
            }
        });
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.listeners.push(Listener { target: target.clone(), kind, closure });
        Ok(())
    }
}

impl Drop for WaveCanvas {
    fn drop(&mut self) {
        self.detach();
    }
}

// ============================================================================
// Page glue
// ============================================================================

#[wasm_bindgen]
pub struct PageController {
    state: PageState,
}

#[wasm_bindgen]
impl PageController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PageController {
        PageController { state: PageState::default() }
    }

    /// Mark `value` as the active menu item; returns the slide to show.
    pub fn select(&mut self, value: &str) -> usize {
        self.state.select(value)
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> Option<String> {
        self.state.active().map(str::to_string)
    }

    #[wasm_bindgen(js_name = slideSpeed)]
    pub fn slide_speed() -> u32 {
        page::SLIDE_SPEED_MS
    }
}

impl Default for PageController {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_name = slideIndex)]
pub fn slide_index(value: &str) -> usize {
    page::slide_index(value)
}
