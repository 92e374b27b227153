//! Global hotkey registration with ordered fallback.
//!
//! Another application may already own one of the configured chords, so the
//! chords are tried in priority order and the first one the OS accepts wins.
//! Failures are recoverable; the keyboard monitor and the tray menu keep the
//! center command reachable even when nothing could be registered.

use tracing::{debug, error, info, warn};

use crate::error::HotkeyRegistrationError;
use crate::model::{KeyChord, HOTKEY_PRIMARY, HOTKEY_SECONDARY, HOTKEY_TERTIARY};

/// Identifier of one OS hotkey registration.
pub type HotkeyId = i32;

/// OS capability: bind and release global hotkeys.
pub trait HotkeyBackend {
    fn register(&mut self, id: HotkeyId, chord: KeyChord) -> Result<(), HotkeyRegistrationError>;
    fn unregister(&mut self, id: HotkeyId, chord: KeyChord)
        -> Result<(), HotkeyRegistrationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    Failed(String),
}

/// One registration attempt and what the OS said about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub id: HotkeyId,
    pub chord: KeyChord,
    pub outcome: RegistrationOutcome,
}

impl HotkeyBinding {
    pub fn is_registered(&self) -> bool {
        self.outcome == RegistrationOutcome::Registered
    }
}

/// Tracks which hotkey ids are held and releases them on drop.
pub struct HotkeyRegistrar<B: HotkeyBackend> {
    backend: B,
    bindings: Vec<HotkeyBinding>,
}

impl<B: HotkeyBackend> HotkeyRegistrar<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            bindings: Vec::new(),
        }
    }

    /// Try `primary` (id 1), then `secondary` (id 2), then `tertiary` (id 3),
    /// stopping at the first success.
    pub fn register_with_fallback(
        &mut self,
        primary: KeyChord,
        secondary: KeyChord,
        tertiary: KeyChord,
    ) -> Vec<HotkeyBinding> {
        self.register_ids(&[
            (HOTKEY_PRIMARY, primary),
            (HOTKEY_SECONDARY, secondary),
            (HOTKEY_TERTIARY, tertiary),
        ])
    }

    /// Same policy for any prioritized list; ids are assigned 1..=n.
    pub fn register_chords(&mut self, chords: &[KeyChord]) -> Vec<HotkeyBinding> {
        let candidates: Vec<(HotkeyId, KeyChord)> = chords
            .iter()
            .zip(1..)
            .map(|(chord, id)| (id, *chord))
            .collect();
        self.register_ids(&candidates)
    }

    fn register_ids(&mut self, candidates: &[(HotkeyId, KeyChord)]) -> Vec<HotkeyBinding> {
        self.unregister_all();

        for &(id, chord) in candidates {
            match self.backend.register(id, chord) {
                Ok(()) => {
                    info!("Registered hotkey {} as id {}", chord, id);
                    self.bindings.push(HotkeyBinding {
                        id,
                        chord,
                        outcome: RegistrationOutcome::Registered,
                    });
                    break;
                }
                Err(e) => {
                    warn!("{}; trying next shortcut", e);
                    self.bindings.push(HotkeyBinding {
                        id,
                        chord,
                        outcome: RegistrationOutcome::Failed(e.reason),
                    });
                }
            }
        }

        if !candidates.is_empty() && self.registered().is_empty() {
            error!(
                "No global hotkey could be registered; centering stays available from the \
                 tray menu and the keyboard monitor"
            );
        }

        self.bindings.clone()
    }

    /// Release every held id. Safe to call when nothing is registered.
    pub fn unregister_all(&mut self) {
        for binding in self.bindings.drain(..) {
            if !binding.is_registered() {
                continue;
            }
            match self.backend.unregister(binding.id, binding.chord) {
                Ok(()) => debug!("Unregistered hotkey id {}", binding.id),
                Err(e) => warn!("Failed to unregister hotkey id {}: {}", binding.id, e.reason),
            }
        }
    }

    /// Every attempt made by the last registration call, in order.
    pub fn bindings(&self) -> &[HotkeyBinding] {
        &self.bindings
    }

    /// Ids currently held, with their chords.
    pub fn registered(&self) -> Vec<(HotkeyId, KeyChord)> {
        self.bindings
            .iter()
            .filter(|b| b.is_registered())
            .map(|b| (b.id, b.chord))
            .collect()
    }

    pub fn chord_for(&self, id: HotkeyId) -> Option<KeyChord> {
        self.bindings
            .iter()
            .find(|b| b.id == id && b.is_registered())
            .map(|b| b.chord)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: HotkeyBackend> Drop for HotkeyRegistrar<B> {
    fn drop(&mut self) {
        self.unregister_all();
    }
}
