//! Turns drained events into centering commands.
//!
//! ```text
//! drain_events() → ShortcutDispatcher::commands() → WindowPositioner
//! ```
//!
//! Both shortcut paths (keyboard hook and `WM_HOTKEY`) end up here, as do the
//! tray menu commands. It runs on the message-loop thread after every
//! dispatched message.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::WindowError;
use crate::events::AppEvent;
use crate::input::{HotkeyBinding, HotkeyId};
use crate::model::{KeyChord, ShortcutConfiguration};
use crate::window::{CenterOutcome, Desktop, WindowHandle, WindowPositioner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CenterActiveWindow,
    CenterWindow(WindowHandle),
}

/// Which of the two shortcut paths reported a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggerPath {
    Hook,
    Hotkey,
}

pub struct ShortcutDispatcher {
    chords: Vec<KeyChord>,
    hotkeys: HashMap<HotkeyId, KeyChord>,
}

impl ShortcutDispatcher {
    pub fn new(config: &ShortcutConfiguration) -> Self {
        Self {
            chords: config.chords().to_vec(),
            hotkeys: HashMap::new(),
        }
    }

    /// Remember which ids the OS accepted. Failed attempts are ignored.
    pub fn bind_hotkeys(&mut self, bindings: &[HotkeyBinding]) {
        self.hotkeys = bindings
            .iter()
            .filter(|b| b.is_registered())
            .map(|b| (b.id, b.chord))
            .collect();
    }

    fn shortcut_chord(&self, event: &AppEvent) -> Option<KeyChord> {
        match event {
            AppEvent::ChordMatched(chord) if self.chords.contains(chord) => Some(*chord),
            AppEvent::HotkeyPressed(id) => self.hotkeys.get(id).copied(),
            _ => None,
        }
    }

    pub fn resolve(&self, event: &AppEvent) -> Option<Command> {
        match event {
            AppEvent::CenterActiveWindow => Some(Command::CenterActiveWindow),
            AppEvent::CenterWindow(handle) => Some(Command::CenterWindow(*handle)),
            AppEvent::ChordMatched(_) | AppEvent::HotkeyPressed(_) => {
                match self.shortcut_chord(event) {
                    Some(_) => Some(Command::CenterActiveWindow),
                    None => {
                        debug!("Ignoring unbound shortcut {:?}", event);
                        None
                    }
                }
            }
        }
    }

    fn trigger(&self, event: &AppEvent) -> Option<(KeyChord, TriggerPath)> {
        let path = match event {
            AppEvent::ChordMatched(_) => TriggerPath::Hook,
            AppEvent::HotkeyPressed(_) => TriggerPath::Hotkey,
            _ => return None,
        };
        self.shortcut_chord(event).map(|chord| (chord, path))
    }

    /// Resolve a drained batch. A hook trigger and a hotkey trigger for the same
    /// chord back to back count once, since both paths can report one press.
    /// Two triggers from the same path are two presses.
    pub fn commands(&self, events: &[AppEvent]) -> Vec<Command> {
        let mut commands = Vec::new();
        let mut last_trigger: Option<(KeyChord, TriggerPath)> = None;

        for event in events {
            let trigger = self.trigger(event);
            if let (Some((chord, path)), Some((last_chord, last_path))) =
                (trigger, last_trigger)
            {
                if chord == last_chord && path != last_path {
                    debug!("Coalescing duplicate trigger {:?}", event);
                    // Pair consumed; a third trigger is a new press.
                    last_trigger = None;
                    continue;
                }
            }
            last_trigger = trigger;

            if let Some(command) = self.resolve(event) {
                commands.push(command);
            }
        }
        commands
    }

    /// Run every command in the batch. Failures are logged, not propagated.
    pub fn dispatch<D: Desktop + ?Sized>(
        &self,
        events: &[AppEvent],
        positioner: &WindowPositioner<'_, D>,
    ) -> Vec<Result<CenterOutcome, WindowError>> {
        self.commands(events)
            .into_iter()
            .map(|command| {
                let result = match command {
                    Command::CenterActiveWindow => positioner.center_active_window(),
                    Command::CenterWindow(handle) => positioner.center_specific_window(handle),
                };
                match &result {
                    Ok(CenterOutcome::Moved { handle, to, .. }) => {
                        debug!("{:?} moved {} to {}", command, handle, to)
                    }
                    Ok(outcome) => info!("{:?}: {:?}", command, outcome),
                    Err(e) => warn!("{:?} failed: {}", command, e),
                }
                result
            })
            .collect()
    }
}
