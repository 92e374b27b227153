//! System-wide keyboard observation.
//!
//! The OS hook backend hands every raw key transition to a [`ChordMatcher`],
//! which keeps modifier state and decides whether the transition completes one
//! of the configured chords. A match is published on the event bus and the key
//! is swallowed so the focused application never sees it.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use super::modifier_state::ModifierState;
use crate::error::HookInstallError;
use crate::events::{AppEvent, EventPublisher};
use crate::model::{modifier_from_vk, Key, KeyChord, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Down,
    Up,
}

/// One raw key event as delivered by the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    /// Windows virtual-key code.
    pub vk: u32,
    pub direction: KeyDirection,
}

impl KeyTransition {
    pub const fn down(vk: u32) -> Self {
        Self {
            vk,
            direction: KeyDirection::Down,
        }
    }

    pub const fn up(vk: u32) -> Self {
        Self {
            vk,
            direction: KeyDirection::Up,
        }
    }
}

/// What the hook should do with the transition it just reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookVerdict {
    /// Pass it on to the next hook and the focused application.
    Forward,
    /// Swallow it.
    Consume,
}

pub type KeyHandler = Box<dyn FnMut(KeyTransition) -> HookVerdict>;

/// OS capability: deliver every keyboard transition to a handler.
pub trait KeyboardHook {
    fn attach(&mut self, handler: KeyHandler) -> Result<(), HookInstallError>;

    /// Must be safe to call when nothing is attached.
    fn detach(&mut self);
}

/// OS capability: which modifier keys are physically down right now.
///
/// Releases can happen where the hook never sees them (secure desktop,
/// session lock, a hook earlier in the chain eating the key-up), so the
/// tracked state is resynchronized from here before every match.
pub trait KeyState {
    fn physical_modifiers(&self) -> ModifierState;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    Installed,
    AlreadyInstalled,
}

/// Pure chord recognizer fed by the hook.
pub struct ChordMatcher {
    state: ModifierState,
    chords: Vec<KeyChord>,
    publisher: EventPublisher,
    key_state: Option<Box<dyn KeyState>>,
    // Base key of the last match while it is still down; its repeats are swallowed.
    held_key: Option<Key>,
}

impl ChordMatcher {
    pub fn new(chords: impl IntoIterator<Item = KeyChord>, publisher: EventPublisher) -> Self {
        let mut unique = Vec::new();
        for chord in chords {
            if !unique.contains(&chord) {
                unique.push(chord);
            }
        }
        Self {
            state: ModifierState::new(),
            chords: unique,
            publisher,
            key_state: None,
            held_key: None,
        }
    }

    /// Resync modifiers from `source` on every non-modifier key-down.
    pub fn set_key_state(&mut self, source: Box<dyn KeyState>) {
        self.key_state = Some(source);
    }

    pub fn chords(&self) -> &[KeyChord] {
        &self.chords
    }

    pub fn modifiers(&self) -> Modifiers {
        self.state.to_modifiers()
    }

    /// Forget held keys. Used when the hook is detached, since releases that
    /// happen while detached are never seen.
    pub fn reset(&mut self) {
        self.state.clear();
        self.held_key = None;
    }

    pub fn on_key(&mut self, transition: KeyTransition) -> HookVerdict {
        let pressed = transition.direction == KeyDirection::Down;

        if let Some((modifier, side)) = modifier_from_vk(transition.vk) {
            self.state.update(modifier, side, pressed);
            return HookVerdict::Forward;
        }

        let Some(key) = Key::from_vk(transition.vk) else {
            return HookVerdict::Forward;
        };

        if !pressed {
            if self.held_key == Some(key) {
                self.held_key = None;
            }
            return HookVerdict::Forward;
        }

        if self.held_key == Some(key) {
            return HookVerdict::Consume;
        }

        if let Some(source) = &self.key_state {
            let physical = source.physical_modifiers();
            if physical != self.state {
                debug!(
                    "Modifier state resynced from {:?} to {:?}",
                    self.state.to_modifiers(),
                    physical.to_modifiers()
                );
                self.state = physical;
            }
        }

        let observed = KeyChord::new(key, self.state.to_modifiers());
        if !self.chords.contains(&observed) {
            return HookVerdict::Forward;
        }

        debug!("Keyboard hook matched {}", observed);
        self.held_key = Some(key);
        self.publisher.publish(AppEvent::ChordMatched(observed));
        HookVerdict::Consume
    }
}

/// Owns the hook registration and the matcher behind it.
///
/// Dropping the monitor detaches the hook.
pub struct KeyboardMonitor<H: KeyboardHook> {
    hook: H,
    matcher: Rc<RefCell<ChordMatcher>>,
    installed: bool,
}

impl<H: KeyboardHook> KeyboardMonitor<H> {
    pub fn new(
        hook: H,
        chords: impl IntoIterator<Item = KeyChord>,
        publisher: EventPublisher,
    ) -> Self {
        Self {
            hook,
            matcher: Rc::new(RefCell::new(ChordMatcher::new(chords, publisher))),
            installed: false,
        }
    }

    /// Resync modifiers from the OS before each match.
    pub fn with_key_state(self, source: impl KeyState + 'static) -> Self {
        self.matcher.borrow_mut().set_key_state(Box::new(source));
        self
    }

    /// Forget held keys, e.g. after the session was locked.
    pub fn reset(&mut self) {
        if let Ok(mut matcher) = self.matcher.try_borrow_mut() {
            matcher.reset();
            debug!("Keyboard monitor state reset");
        }
    }

    pub fn install(&mut self) -> Result<InstallStatus, HookInstallError> {
        if self.installed {
            info!("Keyboard monitor already installed");
            return Ok(InstallStatus::AlreadyInstalled);
        }

        let matcher = Rc::clone(&self.matcher);
        self.hook.attach(Box::new(move |transition| {
            match matcher.try_borrow_mut() {
                Ok(mut matcher) => matcher.on_key(transition),
                Err(_) => HookVerdict::Forward,
            }
        }))?;

        self.installed = true;
        info!(
            "Keyboard monitor installed for {} chord(s)",
            self.matcher.borrow().chords().len()
        );
        Ok(InstallStatus::Installed)
    }

    pub fn uninstall(&mut self) {
        if !self.installed {
            return;
        }
        self.hook.detach();
        self.installed = false;
        self.matcher.borrow_mut().reset();
        info!("Keyboard monitor uninstalled");
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn modifiers(&self) -> Modifiers {
        self.matcher.borrow().modifiers()
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }
}

impl<H: KeyboardHook> Drop for KeyboardMonitor<H> {
    fn drop(&mut self) {
        self.uninstall();
    }
}
