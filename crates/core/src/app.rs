//! Application main loop (C9): the orchestrator tying every other
//! component together at a fixed frame rate.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, warn};

use crate::error::{Error, Result};
use crate::framebuffer::FrameBuffer;
use crate::key::{KeyEvent, NamedKey};
use crate::key_decoder::KeyDecoder;
use crate::keybinding::KeyBindingRegistry;
use crate::menu::{MenuAction, MenuSystem};
use crate::screen::{Screen, ScreenStack};
use crate::terminal::Terminal;

/// A handler invoked when a key-binding's action id fires. Receives the
/// screen stack so it can navigate.
pub type ActionHandler = Box<dyn FnMut(&mut ScreenStack)>;

/// Builds a fresh screen instance by type name, used by [`Application::navigate_to`]
/// when the target isn't already anywhere in the stack.
pub type ScreenConstructor = Box<dyn Fn() -> Box<dyn Screen>>;

/// Clamp range for the configurable frame rate.
const MIN_FPS: u32 = 1;
const MAX_FPS: u32 = 60;
const DEFAULT_FPS: u32 = 30;

/// Process-wide run flags, written only from signal handlers or the loop
/// itself. Signal handlers must never do more than a flag write.
#[derive(Clone, Default)]
pub struct RunFlags {
    running: Arc<AtomicBool>,
    resize_pending: Arc<AtomicBool>,
}

impl RunFlags {
    /// A fresh flag set with `running = true`.
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            resize_pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request the loop stop after the current frame.
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Note that a window-change signal fired; the loop will handle resize
    /// at its next iteration.
    pub fn request_resize(&self) {
        self.resize_pending.store(true, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn take_resize_pending(&self) -> bool {
        self.resize_pending.swap(false, Ordering::SeqCst)
    }
}

/// Builder for [`Application`] that makes "menu system and screen registry
/// configured before running" a construction-time guarantee rather than a
/// runtime exception: [`ApplicationBuilder::build`] is the only way to
/// produce an `Application`, and it requires both to already be set.
pub struct ApplicationBuilder {
    fps: u32,
    screens: Option<ScreenStack>,
    menu_system: Option<MenuSystem>,
    bindings: KeyBindingRegistry,
    handlers: HashMap<String, ActionHandler>,
    screen_registry: HashMap<String, ScreenConstructor>,
    flags: RunFlags,
}

impl ApplicationBuilder {
    /// Start a builder with the default frame rate.
    pub fn new() -> Self {
        Self {
            fps: DEFAULT_FPS,
            screens: None,
            menu_system: None,
            bindings: KeyBindingRegistry::new(),
            handlers: HashMap::new(),
            screen_registry: HashMap::new(),
            flags: RunFlags::new(),
        }
    }

    /// Supply the run-flag handles up front, e.g. so a quit action or menu
    /// item built before [`ApplicationBuilder::build`] can capture a clone
    /// of the same flags a signal handler will also write to.
    #[must_use]
    pub fn flags(mut self, flags: RunFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the target frame rate, clamped to `1..=60`.
    #[must_use]
    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps.clamp(MIN_FPS, MAX_FPS);
        self
    }

    /// Provide the initial screen stack.
    #[must_use]
    pub fn screens(mut self, screens: ScreenStack) -> Self {
        self.screens = Some(screens);
        self
    }

    /// Provide the menu system.
    #[must_use]
    pub fn menu_system(mut self, menu_system: MenuSystem) -> Self {
        self.menu_system = Some(menu_system);
        self
    }

    /// Provide the key-binding registry.
    #[must_use]
    pub fn bindings(mut self, bindings: KeyBindingRegistry) -> Self {
        self.bindings = bindings;
        self
    }

    /// Register a handler for an action id.
    #[must_use]
    pub fn action_handler(mut self, action_id: impl Into<String>, handler: ActionHandler) -> Self {
        self.handlers.insert(action_id.into(), handler);
        self
    }

    /// Register a constructor for a named screen type, so
    /// [`Application`]'s navigation can `push` a fresh instance when the
    /// target isn't already anywhere in the stack (spec'd F-key navigation
    /// fallback). The name must match the screen's [`Screen::type_name`].
    #[must_use]
    pub fn register_screen(
        mut self,
        name: impl Into<String>,
        ctor: impl Fn() -> Box<dyn Screen> + 'static,
    ) -> Self {
        self.screen_registry.insert(name.into(), Box::new(ctor));
        self
    }

    /// Build the application. Fails if either the screen stack or the menu
    /// system was never supplied.
    pub fn build(self, fb: FrameBuffer) -> Result<Application> {
        let screens = self
            .screens
            .ok_or(Error::Configuration("screen registry not configured"))?;
        let menu_system = self
            .menu_system
            .ok_or(Error::Configuration("menu system not configured"))?;
        Ok(Application {
            fps: self.fps,
            screens,
            menu_system,
            bindings: self.bindings,
            handlers: self.handlers,
            screen_registry: self.screen_registry,
            fb,
            flags: self.flags,
            last_depth: 0,
        })
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The orchestrator: drives the terminal driver, key decoder, dispatch
/// layers, and renderer at a target frame rate.
pub struct Application {
    fps: u32,
    screens: ScreenStack,
    menu_system: MenuSystem,
    bindings: KeyBindingRegistry,
    handlers: HashMap<String, ActionHandler>,
    screen_registry: HashMap<String, ScreenConstructor>,
    fb: FrameBuffer,
    flags: RunFlags,
    last_depth: usize,
}

impl Application {
    /// Start building an application.
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    /// A clone of the run-flag handles, for installing signal handlers.
    pub fn run_flags(&self) -> RunFlags {
        self.flags.clone()
    }

    /// Run the main loop until `running` is cleared or the screen stack
    /// empties.
    pub fn run(&mut self, term: &mut dyn Terminal) -> Result<()> {
        term.initialize()?;
        self.last_depth = self.screens.depth();
        let mut decoder = if term.is_interactive() {
            KeyDecoder::for_real_terminal()
        } else {
            KeyDecoder::for_virtual_terminal()
        };

        let result = self.run_inner(term, &mut decoder);
        let _ = term.cleanup();
        result
    }

    fn run_inner(&mut self, term: &mut dyn Terminal, decoder: &mut KeyDecoder) -> Result<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / self.fps as f64);

        while self.flags.is_running() && self.screens.has_screens() {
            let frame_start = Instant::now();
            // Actual resize detection happens unconditionally below via
            // `handle_resize`; this just keeps the signal-set flag from
            // accumulating across frames.
            self.flags.take_resize_pending();

            self.drain_input(term, decoder);

            self.screens.update();

            self.fb.handle_resize(term);
            self.fb.begin_frame();
            let (width, height) = self.fb.size();
            let theme = self.fb.theme_context().clone();
            self.menu_system.render(&mut self.fb, &theme, width);
            self.screens.render(&mut self.fb, 0, 1, width, height.saturating_sub(1));
            self.fb.end_frame(term);

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            }
        }

        Ok(())
    }

    fn drain_input(&mut self, term: &mut dyn Terminal, decoder: &mut KeyDecoder) {
        while let Some(key) = decoder.next_key(term) {
            self.dispatch_one(&key);
            self.detect_screen_change();
        }
    }

    fn dispatch_one(&mut self, key: &KeyEvent) {
        let (consumed, menu_action) = self.menu_system.handle_input(key);
        if consumed {
            self.apply_menu_action(menu_action);
            return;
        }

        if let Some(binding) = self.bindings.match_key(key) {
            let action_id = binding.action_id.clone();
            if let Some(handler) = self.handlers.get_mut(&action_id) {
                let screens = &mut self.screens;
                if panic::catch_unwind(AssertUnwindSafe(|| handler(screens))).is_err() {
                    error!(action_id = %action_id, "action handler panicked; forcing redraw");
                    self.fb.invalidate();
                }
                return;
            }
        }

        if self.screens.handle_input(key) {
            return;
        }

        if matches!(key, KeyEvent::Named(NamedKey::Escape)) && self.screens.depth() > 1 {
            self.screens.pop();
        }
    }

    fn apply_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::NavigateTo(name) => self.navigate_to(&name),
            MenuAction::Invalidate => self.fb.invalidate(),
            MenuAction::None => {}
        }
    }

    /// Navigate to the screen type named `name`. If the current top is
    /// already that type, this is a no-op; if it is present deeper in the
    /// stack, the stack pops back to it; otherwise, if a constructor for
    /// `name` was registered via [`ApplicationBuilder::register_screen`], a
    /// fresh instance is pushed; otherwise the navigation is a no-op and a
    /// diagnostic is recorded.
    fn navigate_to(&mut self, name: &str) {
        if let Some(top) = self.screens.current() {
            if top.type_name() == name {
                return;
            }
        }
        let present_deeper = self.screens.stack().iter().any(|s| s.type_name() == name);
        if present_deeper {
            self.screens.pop_until(|s| s.type_name() == name);
        } else if let Some(ctor) = self.screen_registry.get(name) {
            self.screens.push(ctor());
        } else {
            warn!(screen = name, "navigation target not found in stack or screen registry");
        }
    }

    fn detect_screen_change(&mut self) {
        let depth = self.screens.depth();
        if depth != self.last_depth {
            self.fb.invalidate();
            self.last_depth = depth;
        }
    }
}

/// Install process signal handlers that only ever write the given run
/// flags; no terminal manipulation happens in signal context.
#[cfg(unix)]
pub fn install_signal_handlers(flags: RunFlags) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM, SIGWINCH};

    let stop = flags.running.clone();
    unsafe {
        signal_hook::low_level::register(SIGINT, move || stop.store(false, Ordering::SeqCst))
            .map_err(Error::Io)?;
    }
    let stop = flags.running.clone();
    unsafe {
        signal_hook::low_level::register(SIGTERM, move || stop.store(false, Ordering::SeqCst))
            .map_err(Error::Io)?;
    }
    let resize = flags.resize_pending.clone();
    unsafe {
        signal_hook::low_level::register(SIGWINCH, move || resize.store(true, Ordering::SeqCst))
            .map_err(Error::Io)?;
    }
    Ok(())
}
