//! Keyboard monitor lifecycle and chord matching through a fake hook.

mod support;

use support::{FakeHook, FakeKeyState};
use wincenter::events::{AppEvent, EventBus};
use wincenter::input::{
    HookVerdict, InstallStatus, KeyTransition, KeyboardMonitor, ModifierState,
};
use wincenter::model::{
    modifier_from_vk, KeyChord, ModifierKey, Modifiers, DEFAULT_CENTER_KEY1,
    DEFAULT_CENTER_KEY2, DEFAULT_CENTER_KEY3,
};

const VK_LSHIFT: u32 = 0xA0;
const VK_RSHIFT: u32 = 0xA1;
const VK_LCONTROL: u32 = 0xA2;
const VK_RCONTROL: u32 = 0xA3;
const VK_LMENU: u32 = 0xA4;
const VK_RMENU: u32 = 0xA5;
const VK_LWIN: u32 = 0x5B;
const VK_RWIN: u32 = 0x5C;
const VK_C: u32 = 0x43;
const VK_F11: u32 = 0x7A;

const MODIFIER_VKS: [u32; 8] = [
    VK_LSHIFT, VK_RSHIFT, VK_LCONTROL, VK_RCONTROL, VK_LMENU, VK_RMENU, VK_LWIN, VK_RWIN,
];

fn installed(bus: &EventBus) -> (KeyboardMonitor<FakeHook>, FakeHook) {
    let hook = FakeHook::default();
    let mut monitor = KeyboardMonitor::new(
        hook.clone(),
        [DEFAULT_CENTER_KEY1, DEFAULT_CENTER_KEY2, DEFAULT_CENTER_KEY3],
        bus.publisher(),
    );
    assert_eq!(monitor.install().unwrap(), InstallStatus::Installed);
    (monitor, hook)
}

fn press(hook: &FakeHook, modifiers: &[u32], key: u32) -> HookVerdict {
    for vk in modifiers {
        hook.send(KeyTransition::down(*vk));
    }
    let verdict = hook.send(KeyTransition::down(key));
    hook.send(KeyTransition::up(key));
    for vk in modifiers.iter().rev() {
        hook.send(KeyTransition::up(*vk));
    }
    verdict
}

#[test]
fn install_twice_reports_already_installed() {
    let bus = EventBus::new();
    let (mut monitor, hook) = installed(&bus);

    assert_eq!(monitor.install().unwrap(), InstallStatus::AlreadyInstalled);
    assert_eq!(hook.attaches(), 1);
    assert!(monitor.is_installed());
}

#[test]
fn refused_hook_is_an_error_and_leaves_monitor_uninstalled() {
    let bus = EventBus::new();
    let mut monitor = KeyboardMonitor::new(FakeHook::refusing(), [DEFAULT_CENTER_KEY1], bus.publisher());

    assert!(monitor.install().is_err());
    assert!(!monitor.is_installed());
}

#[test]
fn uninstall_is_repeatable_and_drop_detaches() {
    let bus = EventBus::new();
    let (mut monitor, hook) = installed(&bus);

    monitor.uninstall();
    monitor.uninstall();
    assert!(!hook.is_attached());

    monitor.install().unwrap();
    assert!(hook.is_attached());
    drop(monitor);
    assert!(!hook.is_attached());
}

#[test]
fn detached_monitor_sees_nothing() {
    let bus = EventBus::new();
    let (mut monitor, hook) = installed(&bus);
    monitor.uninstall();

    assert_eq!(press(&hook, &[VK_LCONTROL, VK_LMENU], VK_C), HookVerdict::Forward);
    assert!(bus.drain().is_empty());
}

#[test]
fn configured_chord_publishes_once_and_is_swallowed() {
    let bus = EventBus::new();
    let (_monitor, hook) = installed(&bus);

    assert_eq!(press(&hook, &[VK_LCONTROL, VK_LSHIFT], VK_F11), HookVerdict::Consume);
    assert_eq!(bus.drain(), vec![AppEvent::ChordMatched(DEFAULT_CENTER_KEY2)]);
}

#[test]
fn modifier_order_does_not_matter() {
    let orders: [[u32; 2]; 4] = [
        [VK_LCONTROL, VK_LMENU],
        [VK_LMENU, VK_LCONTROL],
        [VK_RCONTROL, VK_RMENU],
        [VK_RMENU, VK_LCONTROL],
    ];
    for order in orders {
        let bus = EventBus::new();
        let (_monitor, hook) = installed(&bus);

        assert_eq!(press(&hook, &order, VK_C), HookVerdict::Consume, "{order:x?}");
        assert_eq!(bus.drain(), vec![AppEvent::ChordMatched(DEFAULT_CENTER_KEY1)]);
    }
}

#[test]
fn auto_repeat_does_not_fire_again() {
    let bus = EventBus::new();
    let (_monitor, hook) = installed(&bus);

    hook.send(KeyTransition::down(VK_LCONTROL));
    hook.send(KeyTransition::down(VK_LMENU));
    for _ in 0..5 {
        assert_eq!(hook.send(KeyTransition::down(VK_C)), HookVerdict::Consume);
    }
    assert_eq!(hook.send(KeyTransition::up(VK_C)), HookVerdict::Forward);
    assert_eq!(bus.drain().len(), 1);

    // A new physical press fires again.
    hook.send(KeyTransition::down(VK_C));
    assert_eq!(bus.drain().len(), 1);
}

#[test]
fn unconfigured_chords_are_forwarded() {
    let bus = EventBus::new();
    let (_monitor, hook) = installed(&bus);

    assert_eq!(press(&hook, &[], VK_C), HookVerdict::Forward);
    assert_eq!(press(&hook, &[VK_LCONTROL], VK_C), HookVerdict::Forward);
    assert_eq!(press(&hook, &[VK_LCONTROL, VK_LMENU, VK_LWIN], VK_C), HookVerdict::Forward);
    assert!(bus.drain().is_empty());
}

#[test]
fn meta_chords_can_match() {
    let bus = EventBus::new();
    let chord: KeyChord = "Win+Shift+C".parse().unwrap();
    let hook = FakeHook::default();
    let mut monitor = KeyboardMonitor::new(hook.clone(), [chord], bus.publisher());
    monitor.install().unwrap();

    assert_eq!(press(&hook, &[VK_RWIN, VK_RSHIFT], VK_C), HookVerdict::Consume);
    assert_eq!(bus.drain(), vec![AppEvent::ChordMatched(chord)]);
}

#[test]
fn monitor_exposes_current_modifiers() {
    let bus = EventBus::new();
    let (monitor, hook) = installed(&bus);

    hook.send(KeyTransition::down(VK_RCONTROL));
    assert_eq!(monitor.modifiers(), Modifiers::NONE.with(ModifierKey::Ctrl));
    hook.send(KeyTransition::up(VK_RCONTROL));
    assert_eq!(monitor.modifiers(), Modifiers::NONE);
}

fn installed_with_key_state(
    bus: &EventBus,
) -> (KeyboardMonitor<FakeHook>, FakeHook, FakeKeyState) {
    let hook = FakeHook::default();
    let keys = FakeKeyState::default();
    let mut monitor = KeyboardMonitor::new(
        hook.clone(),
        [DEFAULT_CENTER_KEY1, DEFAULT_CENTER_KEY2, DEFAULT_CENTER_KEY3],
        bus.publisher(),
    )
    .with_key_state(keys.clone());
    monitor.install().unwrap();
    (monitor, hook, keys)
}

#[test]
fn missed_modifier_releases_do_not_swallow_plain_keys() {
    let bus = EventBus::new();
    let (monitor, hook, keys) = installed_with_key_state(&bus);

    // Ctrl+Alt+Del: the downs reach the hook, the ups happen on the secure desktop.
    hook.send(KeyTransition::down(VK_LCONTROL));
    hook.send(KeyTransition::down(VK_LMENU));
    keys.hold(&[]);

    assert_eq!(hook.send(KeyTransition::down(VK_C)), HookVerdict::Forward);
    assert!(bus.drain().is_empty());
    assert_eq!(monitor.modifiers(), Modifiers::NONE);
}

#[test]
fn physical_state_wins_over_tracked_state() {
    let bus = EventBus::new();
    let (_monitor, hook, keys) = installed_with_key_state(&bus);

    // The downs were eaten by another hook but the keys are held.
    keys.hold(&[VK_RCONTROL, VK_LMENU]);
    assert_eq!(hook.send(KeyTransition::down(VK_C)), HookVerdict::Consume);
    assert_eq!(bus.drain(), vec![AppEvent::ChordMatched(DEFAULT_CENTER_KEY1)]);
}

#[test]
fn reset_forgets_held_modifiers() {
    let bus = EventBus::new();
    let (mut monitor, hook) = installed(&bus);

    hook.send(KeyTransition::down(VK_LCONTROL));
    hook.send(KeyTransition::down(VK_LMENU));
    monitor.reset();

    assert_eq!(monitor.modifiers(), Modifiers::NONE);
    assert_eq!(hook.send(KeyTransition::down(VK_C)), HookVerdict::Forward);
    assert!(monitor.is_installed());
}

/// Small deterministic generator so the replay test needs no extra crate.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

#[test]
fn replayed_modifier_sequences_match_held_keys() {
    let mut rng = Lcg(7);
    for _ in 0..200 {
        let mut state = ModifierState::new();
        let mut held = [false; MODIFIER_VKS.len()];

        for _ in 0..40 {
            let index = (rng.next() % MODIFIER_VKS.len() as u64) as usize;
            let pressed = rng.next() % 2 == 0;
            let (modifier, side) = modifier_from_vk(MODIFIER_VKS[index]).unwrap();
            state.update(modifier, side, pressed);
            held[index] = pressed;

            let expected = |m: ModifierKey| {
                MODIFIER_VKS
                    .iter()
                    .zip(held)
                    .any(|(vk, down)| down && modifier_from_vk(*vk).map(|(k, _)| k) == Some(m))
            };
            for m in ModifierKey::ALL {
                assert_eq!(state.is_held(m), expected(m));
            }
        }
    }
}
