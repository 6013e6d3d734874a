use crate::core::{
    AnimationLoop, FieldRenderer, FrameHandle, FrameScheduler, LoopError, StartOutcome,
};
use crate::dom;
use crate::render::CanvasPainter;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one mounted canvas owns. Shared with event closures through
/// `Rc<RefCell<_>>`; input handlers only append bursts.
pub struct FrameContext {
    pub renderer: FieldRenderer,
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub anim: AnimationLoop,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(
        renderer: FieldRenderer,
        canvas: web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
    ) -> Self {
        let reduced = renderer.reduced_motion();
        Self {
            renderer,
            canvas,
            ctx,
            anim: AnimationLoop::new(reduced),
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let mut painter = CanvasPainter::new(&self.ctx);
        self.renderer.tick(dt, &mut painter);
    }

    pub fn render_static(&self) {
        let mut painter = CanvasPainter::new(&self.ctx);
        self.renderer.render_static(&mut painter);
    }

    /// Re-read layout, resize the backing buffer and reseed.
    pub fn is_disposed(&self) -> bool {
        self.renderer.is_disposed()
    }

    pub fn sync_size(&mut self) {
        if self.is_disposed() {
            return;
        }
        let (w, h, dpr) = dom::measure_canvas(&self.canvas);
        let surface = self.renderer.resize(w, h, dpr);
        dom::apply_surface(&self.canvas, &self.ctx, &surface);
        if !self.anim.is_running() {
            self.render_static();
        }
    }

    pub fn start(&mut self, scheduler: &mut RafScheduler) {
        if self.is_disposed() {
            return;
        }
        self.last_instant = Instant::now();
        match self.anim.start(scheduler) {
            Ok(StartOutcome::StaticFrame) => self.render_static(),
            Ok(_) => {}
            Err(e) => log::error!("[loop] start failed: {}", e),
        }
    }

    pub fn stop(&mut self, scheduler: &mut RafScheduler) {
        self.anim.stop(scheduler);
    }

    /// Stop for good and drop all entities; later starts and resizes no-op.
    pub fn dispose(&mut self, scheduler: &mut RafScheduler) {
        self.anim.stop(scheduler);
        self.renderer.dispose();
    }

    /// Apply the reduced-motion preference: stop and freeze, or resume.
    pub fn set_reduced_motion(&mut self, reduced: bool, scheduler: &mut RafScheduler) {
        self.renderer.set_reduced_motion(reduced);
        self.anim.set_reduced_motion(reduced);
        if self.is_disposed() {
            return;
        }
        if reduced {
            self.anim.stop(scheduler);
            self.render_static();
        } else {
            self.start(scheduler);
        }
    }
}

/// `requestAnimationFrame` scheduler bound to the loop's tick closure.
#[derive(Clone)]
pub struct RafScheduler {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl RafScheduler {
    /// Drop the tick closure, breaking the closure/scheduler cycle. Must not be
    /// called from inside the tick itself.
    pub fn release(&self) {
        self.tick.borrow_mut().take();
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, LoopError> {
        let window = web::window().ok_or(LoopError::Detached)?;
        let tick = self.tick.borrow();
        let cb = tick.as_ref().ok_or(LoopError::Detached)?;
        window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| LoopError::Request(format!("{:?}", e)))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(w) = web::window() {
            _ = w.cancel_animation_frame(handle);
        }
    }
}

/// Build the tick closure for `frame_ctx` and return its scheduler. The loop
/// is not started.
pub fn install_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> RafScheduler {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler { tick: tick.clone() };
    let mut scheduler_tick = scheduler.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut fc = frame_ctx.borrow_mut();
        if !fc.anim.begin_frame() {
            return;
        }
        fc.frame();
        if let Err(e) = fc.anim.schedule_next(&mut scheduler_tick) {
            log::error!("[loop] {}", e);
        }
    }) as Box<dyn FnMut()>));
    scheduler
}
