//! The input window.
//!
//! A plain window cleared to a solid colour.  While it has keyboard focus,
//! every key press and release is translated to a [`rcs_core::LogicalKey`] and
//! handed to the [`ForwardInputUseCase`], which writes the packet inline.
//! Closing the window ends the event loop; the transport is dropped (and so
//! closed) with the handler.
//!
//! # Event loop (for beginners)
//!
//! winit owns the main thread while the window is open.  It calls back into
//! [`InputWindow`] through the [`ApplicationHandler`] trait:
//!
//! - `resumed` – the platform is ready; create the window and its framebuffer.
//! - `window_event` – keyboard input, redraw requests, close requests.
//!
//! The loop uses [`ControlFlow::Wait`], so it sleeps until the OS delivers an
//! event instead of spinning.

pub mod keys;

use std::num::NonZeroU32;
use std::rc::Rc;

use rcs_core::KeyState;
use thiserror::Error;
use tracing::{debug, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

use crate::application::forward_input::{ForwardInputUseCase, ForwardStats, PacketSink};

pub use keys::{translate_event_key, translate_key};

/// Errors that stop the input window from running.
#[derive(Debug, Error)]
pub enum WindowError {
    /// The platform event loop could not be created or failed while running.
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),
    /// The OS refused to create the window.
    #[error("failed to create input window: {0}")]
    CreateWindow(#[from] OsError),
}

/// Appearance of the input window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Clear colour as `[r, g, b]`.
    pub background: [u8; 3],
}

/// Packs an RGB triple into softbuffer's `0x00RRGGBB` pixel format.
pub fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Decides whether a keyboard event reaches the forwarding use case.
///
/// winit fabricates presses for keys already held when focus arrives, and
/// releases for keys still held when focus leaves.  Only the synthetic
/// releases are kept, so the server never sees a stuck key.
pub fn should_forward(state: KeyState, is_synthetic: bool) -> bool {
    !(is_synthetic && state == KeyState::Pressed)
}

/// The event's key with modifiers ignored, on platforms that report it.
#[cfg(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
))]
fn unmodified_key(event: &KeyEvent) -> Option<Key> {
    use winit::platform::modifier_supplement::KeyEventExtModifierSupplement;
    Some(event.key_without_modifiers())
}

#[cfg(not(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
)))]
fn unmodified_key(_event: &KeyEvent) -> Option<Key> {
    None
}

/// Framebuffer used to clear the window.
struct Canvas {
    // The surface borrows platform state owned by the context.
    _context: softbuffer::Context<Rc<Window>>,
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
}

impl Canvas {
    fn new(window: &Rc<Window>) -> Result<Self, softbuffer::SoftBufferError> {
        let context = softbuffer::Context::new(Rc::clone(window))?;
        let surface = softbuffer::Surface::new(&context, Rc::clone(window))?;
        Ok(Self {
            _context: context,
            surface,
        })
    }

    fn clear(&mut self, window: &Window, pixel: u32) -> Result<(), softbuffer::SoftBufferError> {
        let size = window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // Minimised windows report a zero size; nothing to draw.
            return Ok(());
        };
        self.surface.resize(width, height)?;
        let mut buffer = self.surface.buffer_mut()?;
        buffer.fill(pixel);
        buffer.present()
    }
}

/// winit application handler driving the forwarding use case.
pub struct InputWindow<S: PacketSink> {
    options: WindowOptions,
    forward: ForwardInputUseCase<S>,
    window: Option<Rc<Window>>,
    canvas: Option<Canvas>,
    error: Option<WindowError>,
}

impl<S: PacketSink> InputWindow<S> {
    /// Creates the handler; the window itself is created on `resumed`.
    pub fn new(options: WindowOptions, forward: ForwardInputUseCase<S>) -> Self {
        Self {
            options,
            forward,
            window: None,
            canvas: None,
            error: None,
        }
    }

    /// Returns the forwarding counters so far.
    pub fn stats(&self) -> ForwardStats {
        self.forward.stats()
    }

    fn handle_keyboard_input(&mut self, event: &KeyEvent, is_synthetic: bool) {
        let state = KeyState::from(event.state.is_pressed());
        if !should_forward(state, is_synthetic) {
            return;
        }
        let unmodified = unmodified_key(event);
        let key = translate_event_key(&event.logical_key, unmodified.as_ref(), event.location);
        let outcome = self.forward.handle_key(key, state, event.repeat);
        debug!(?key, ?state, ?outcome, "key event");
    }

    fn redraw(&mut self) {
        let (Some(window), Some(canvas)) = (&self.window, &mut self.canvas) else {
            return;
        };
        if let Err(e) = canvas.clear(window, pack_rgb(self.options.background)) {
            warn!("failed to clear input window: {e}");
        }
    }
}

impl<S: PacketSink> ApplicationHandler for InputWindow<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(LogicalSize::new(self.options.width, self.options.height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                self.error = Some(WindowError::CreateWindow(e));
                event_loop.exit();
                return;
            }
        };

        match Canvas::new(&window) {
            Ok(canvas) => self.canvas = Some(canvas),
            // Input still works without a framebuffer; the window just stays undrawn.
            Err(e) => warn!("framebuffer unavailable, window will not be cleared: {e}"),
        }

        info!("input window open; focus it and press keys to send them");
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("input window closed");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event,
                is_synthetic,
                ..
            } => self.handle_keyboard_input(&event, is_synthetic),
            WindowEvent::Resized(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

/// Opens the input window and runs the event loop until it is closed.
///
/// Returns the forwarding counters accumulated over the session.
///
/// # Errors
///
/// Returns [`WindowError`] if the event loop or the window cannot be created.
pub fn run<S: PacketSink>(
    options: WindowOptions,
    forward: ForwardInputUseCase<S>,
) -> Result<ForwardStats, WindowError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = InputWindow::new(options, forward);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(app.stats()),
    }
}
