//! In-memory implementations of the OS capability traits.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::rc::Rc;

use wincenter::error::{HookInstallError, HotkeyRegistrationError, WindowError};
use wincenter::input::{
    HookVerdict, HotkeyBackend, HotkeyId, KeyHandler, KeyState, KeyTransition, KeyboardHook,
    ModifierState,
};
use wincenter::model::{modifier_from_vk, KeyChord, Rect, WorkArea};
use wincenter::window::{
    DisplaySystem, MonitorId, WindowAttributes, WindowHandle, WindowManipulator, WindowSystem,
};

pub const PRIMARY: MonitorId = MonitorId(1);
pub const SECONDARY: MonitorId = MonitorId(2);

#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub attributes: WindowAttributes,
    pub rect: Rect,
    pub pid: u32,
    pub monitor: MonitorId,
}

impl FakeWindow {
    /// A normal application window on the primary monitor.
    pub fn app(title: &str, rect: Rect) -> Self {
        Self {
            attributes: WindowAttributes {
                title: title.to_string(),
                visible: true,
                captioned: true,
                ..Default::default()
            },
            rect,
            pid: 100,
            monitor: PRIMARY,
        }
    }

    pub fn on(mut self, monitor: MonitorId) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    pub fn with(mut self, f: impl FnOnce(&mut WindowAttributes)) -> Self {
        f(&mut self.attributes);
        self
    }
}

#[derive(Default)]
pub struct FakeDesktop {
    windows: RefCell<Vec<(WindowHandle, FakeWindow)>>,
    // Reported by enumeration but already closed when queried.
    ghosts: RefCell<Vec<WindowHandle>>,
    monitors: HashMap<MonitorId, WorkArea>,
    processes: HashMap<u32, String>,
    foreground: Cell<Option<WindowHandle>>,
    moves: RefCell<Vec<(WindowHandle, i32, i32)>>,
    refuse_moves: Cell<bool>,
    attribute_queries: Cell<usize>,
}

impl FakeDesktop {
    /// One 1920x1080 monitor with a 40px taskbar at the bottom.
    pub fn new() -> Self {
        Self::default().with_monitor(PRIMARY, WorkArea::new(0, 0, 1920, 1040))
    }

    pub fn with_monitor(mut self, id: MonitorId, work: WorkArea) -> Self {
        self.monitors.insert(id, work);
        self
    }

    pub fn with_process(mut self, pid: u32, name: &str) -> Self {
        self.processes.insert(pid, name.to_string());
        self
    }

    pub fn with_window(self, handle: WindowHandle, window: FakeWindow) -> Self {
        self.windows.borrow_mut().push((handle, window));
        self
    }

    pub fn with_ghost(self, handle: WindowHandle) -> Self {
        self.ghosts.borrow_mut().push(handle);
        self
    }

    pub fn focus(&self, handle: Option<WindowHandle>) {
        self.foreground.set(handle);
    }

    /// Close a window; its handle goes stale.
    pub fn close(&self, handle: WindowHandle) {
        self.windows.borrow_mut().retain(|(h, _)| *h != handle);
    }

    pub fn refuse_moves(&self) {
        self.refuse_moves.set(true);
    }

    pub fn moves(&self) -> Vec<(WindowHandle, i32, i32)> {
        self.moves.borrow().clone()
    }

    pub fn rect_of(&self, handle: WindowHandle) -> Option<Rect> {
        self.window(handle).ok().map(|w| w.rect)
    }

    pub fn attribute_queries(&self) -> usize {
        self.attribute_queries.get()
    }

    fn window(&self, handle: WindowHandle) -> Result<FakeWindow, WindowError> {
        self.windows
            .borrow()
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, w)| w.clone())
            .ok_or(WindowError::StaleHandle(handle))
    }
}

impl WindowSystem for FakeDesktop {
    fn foreground_window(&self) -> Option<WindowHandle> {
        self.foreground.get()
    }

    fn enumerate_windows(&self, visitor: &mut dyn FnMut(WindowHandle) -> ControlFlow<()>) {
        let mut handles: Vec<WindowHandle> =
            self.windows.borrow().iter().map(|(h, _)| *h).collect();
        handles.extend(self.ghosts.borrow().iter().copied());
        for handle in handles {
            if visitor(handle).is_break() {
                break;
            }
        }
    }

    fn window_attributes(&self, handle: WindowHandle) -> Result<WindowAttributes, WindowError> {
        self.attribute_queries.set(self.attribute_queries.get() + 1);
        Ok(self.window(handle)?.attributes)
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WindowError> {
        Ok(self.window(handle)?.rect)
    }

    fn window_process_id(&self, handle: WindowHandle) -> Result<u32, WindowError> {
        Ok(self.window(handle)?.pid)
    }

    fn process_name(&self, pid: u32) -> Option<String> {
        self.processes.get(&pid).cloned()
    }
}

impl DisplaySystem for FakeDesktop {
    fn monitor_from_window(&self, handle: WindowHandle) -> Result<MonitorId, WindowError> {
        Ok(self.window(handle)?.monitor)
    }

    fn monitor_work_area(&self, monitor: MonitorId) -> Result<WorkArea, WindowError> {
        self.monitors
            .get(&monitor)
            .copied()
            .ok_or(WindowError::Query {
                handle: WindowHandle(0),
                what: "monitor info",
            })
    }
}

impl WindowManipulator for FakeDesktop {
    fn move_window(&self, handle: WindowHandle, left: i32, top: i32) -> Result<(), WindowError> {
        if self.refuse_moves.get() {
            return Err(WindowError::Move {
                handle,
                reason: "access denied".into(),
            });
        }
        let mut windows = self.windows.borrow_mut();
        let (_, window) = windows
            .iter_mut()
            .find(|(h, _)| *h == handle)
            .ok_or(WindowError::StaleHandle(handle))?;
        window.rect = window.rect.moved_to(left, top);
        self.moves.borrow_mut().push((handle, left, top));
        Ok(())
    }
}

/// Keyboard hook whose handler the test drives directly.
#[derive(Clone, Default)]
pub struct FakeHook {
    slot: Rc<RefCell<Option<KeyHandler>>>,
    attaches: Rc<Cell<usize>>,
    refuse: bool,
}

impl FakeHook {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Default::default()
        }
    }

    pub fn is_attached(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn attaches(&self) -> usize {
        self.attaches.get()
    }

    /// Deliver a transition the way the OS would. `Forward` when detached.
    pub fn send(&self, transition: KeyTransition) -> HookVerdict {
        match self.slot.borrow_mut().as_mut() {
            Some(handler) => handler(transition),
            None => HookVerdict::Forward,
        }
    }
}

impl KeyboardHook for FakeHook {
    fn attach(&mut self, handler: KeyHandler) -> Result<(), HookInstallError> {
        if self.refuse {
            return Err(HookInstallError::new("access denied"));
        }
        self.attaches.set(self.attaches.get() + 1);
        *self.slot.borrow_mut() = Some(handler);
        Ok(())
    }

    fn detach(&mut self) {
        self.slot.borrow_mut().take();
    }
}

/// Physical modifier state the test controls, shared between clones.
#[derive(Clone, Default)]
pub struct FakeKeyState {
    held: Rc<Cell<ModifierState>>,
}

impl FakeKeyState {
    /// Mark sided modifier vks as physically down; everything else is up.
    pub fn hold(&self, vks: &[u32]) {
        let mut state = ModifierState::new();
        for vk in vks {
            if let Some((modifier, side)) = modifier_from_vk(*vk) {
                state.update(modifier, side, true);
            }
        }
        self.held.set(state);
    }
}

impl KeyState for FakeKeyState {
    fn physical_modifiers(&self) -> ModifierState {
        self.held.get()
    }
}

/// Hotkey backend that refuses a configurable set of chords.
#[derive(Clone, Default)]
pub struct FakeHotkeys {
    pub refused: Vec<KeyChord>,
    pub attempts: Rc<RefCell<Vec<(HotkeyId, KeyChord)>>>,
    pub held: Rc<RefCell<Vec<HotkeyId>>>,
}

impl FakeHotkeys {
    pub fn refusing(refused: &[KeyChord]) -> Self {
        Self {
            refused: refused.to_vec(),
            ..Default::default()
        }
    }
}

impl HotkeyBackend for FakeHotkeys {
    fn register(&mut self, id: HotkeyId, chord: KeyChord) -> Result<(), HotkeyRegistrationError> {
        self.attempts.borrow_mut().push((id, chord));
        if self.refused.contains(&chord) {
            return Err(HotkeyRegistrationError {
                id,
                chord,
                reason: "Hot key is already registered.".into(),
            });
        }
        self.held.borrow_mut().push(id);
        Ok(())
    }

    fn unregister(
        &mut self,
        id: HotkeyId,
        _chord: KeyChord,
    ) -> Result<(), HotkeyRegistrationError> {
        self.held.borrow_mut().retain(|held| *held != id);
        Ok(())
    }
}

pub fn handle(raw: isize) -> WindowHandle {
    WindowHandle(raw)
}
