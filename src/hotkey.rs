pub use rdev::Key;
use rdev::{listen, EventType};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hotkey {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            key: Key::F4,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }
}

/// Parse a hotkey string like "Ctrl+Shift+F4" into a [`Hotkey`].
pub fn parse_hotkey(s: &str) -> Option<Hotkey> {
    let mut hotkey = Hotkey::default();
    let mut key: Option<Key> = None;

    for part in s.split('+') {
        let upper = part.trim().to_ascii_uppercase();
        match upper.as_str() {
            "CTRL" | "CONTROL" => hotkey.ctrl = true,
            "SHIFT" => hotkey.shift = true,
            "ALT" => hotkey.alt = true,
            "" => {}
            _ => key = Some(parse_key(&upper)?),
        }
    }

    key.map(|key| Hotkey { key, ..hotkey })
}

const LETTERS: [Key; 26] = [
    Key::KeyA, Key::KeyB, Key::KeyC, Key::KeyD, Key::KeyE, Key::KeyF, Key::KeyG,
    Key::KeyH, Key::KeyI, Key::KeyJ, Key::KeyK, Key::KeyL, Key::KeyM, Key::KeyN,
    Key::KeyO, Key::KeyP, Key::KeyQ, Key::KeyR, Key::KeyS, Key::KeyT, Key::KeyU,
    Key::KeyV, Key::KeyW, Key::KeyX, Key::KeyY, Key::KeyZ,
];

const DIGITS: [Key; 10] = [
    Key::Num0, Key::Num1, Key::Num2, Key::Num3, Key::Num4,
    Key::Num5, Key::Num6, Key::Num7, Key::Num8, Key::Num9,
];

const FUNCTION_KEYS: [Key; 12] = [
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
    Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
];

fn parse_key(upper: &str) -> Option<Key> {
    let named = match upper {
        "SPACE" => Some(Key::Space),
        "TAB" => Some(Key::Tab),
        "ENTER" | "RETURN" => Some(Key::Return),
        "ESC" | "ESCAPE" => Some(Key::Escape),
        "CAPSLOCK" => Some(Key::CapsLock),
        "HOME" => Some(Key::Home),
        "END" => Some(Key::End),
        "PAGEUP" => Some(Key::PageUp),
        "PAGEDOWN" => Some(Key::PageDown),
        "INSERT" => Some(Key::Insert),
        "PAUSE" => Some(Key::Pause),
        _ => None,
    };
    if named.is_some() {
        return named;
    }

    let mut chars = upper.chars();
    match (chars.next(), chars.as_str()) {
        (Some(c), "") if c.is_ascii_uppercase() => Some(LETTERS[(c as u8 - b'A') as usize]),
        (Some(c), "") if c.is_ascii_digit() => Some(DIGITS[(c as u8 - b'0') as usize]),
        (Some('F'), rest) => match rest.parse::<usize>() {
            Ok(n @ 1..=12) => Some(FUNCTION_KEYS[n - 1]),
            _ => None,
        },
        _ => None,
    }
}

/// The one capability the overlay needs from the hotkey facility: a latched
/// "show/toggle" signal that is consumed on read.
pub trait ToggleSignal {
    fn take(&self) -> bool;
}

type Waker = Box<dyn Fn() + Send + Sync>;

/// Global hotkey listener. The listener thread latches `fired` whenever the
/// registered combination goes down.
pub struct HotkeyTrigger {
    pub fired: Arc<AtomicBool>,
    pub hotkey: Hotkey,
    waker: Arc<Mutex<Option<Waker>>>,
}

impl HotkeyTrigger {
    pub fn new(hotkey: Hotkey) -> Self {
        Self {
            fired: Arc::new(AtomicBool::new(false)),
            hotkey,
            waker: Arc::new(Mutex::new(None)),
        }
    }

    /// Called from the listener thread after the flag is set, e.g. to wake an
    /// idle UI loop.
    pub fn set_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut guard) = self.waker.lock() {
            *guard = Some(Box::new(waker));
        }
    }

    pub fn start_listener(&self) -> anyhow::Result<()> {
        let fired = self.fired.clone();
        let waker = self.waker.clone();
        let hotkey = self.hotkey;
        tracing::debug!(key = ?hotkey.key, "starting hotkey listener");
        thread::Builder::new()
            .name("hotkey-listener".to_string())
            .spawn(move || loop {
                let mut state = ComboState::default();
                let fired = fired.clone();
                let waker = waker.clone();
                let result = listen(move |event| {
                    let just_pressed = match event.event_type {
                        EventType::KeyPress(k) => state.press(k, &hotkey),
                        EventType::KeyRelease(k) => {
                            state.release(k, &hotkey);
                            false
                        }
                        _ => false,
                    };
                    if just_pressed {
                        tracing::debug!("hotkey match -> fired");
                        fired.store(true, Ordering::SeqCst);
                        if let Ok(guard) = waker.lock() {
                            if let Some(wake) = guard.as_ref() {
                                wake();
                            }
                        }
                    }
                });

                match result {
                    Ok(()) => tracing::warn!("hotkey listener exited unexpectedly, restarting"),
                    Err(e) => tracing::warn!("hotkey listener failed: {:?}, retrying", e),
                }
                thread::sleep(Duration::from_millis(500));
            })?;
        Ok(())
    }
}

impl ToggleSignal for HotkeyTrigger {
    fn take(&self) -> bool {
        self.fired.swap(false, Ordering::SeqCst)
    }
}

/// Modifier and key state tracked by the listener. A combination fires once
/// per press and re-arms when the watched key is released.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComboState {
    ctrl: bool,
    shift: bool,
    alt: bool,
    armed_out: bool,
}

impl ComboState {
    /// Returns `true` when this press completes the combination.
    pub fn press(&mut self, key: Key, hotkey: &Hotkey) -> bool {
        match key {
            Key::ControlLeft | Key::ControlRight => self.ctrl = true,
            Key::ShiftLeft | Key::ShiftRight => self.shift = true,
            Key::Alt | Key::AltGr => self.alt = true,
            _ => {}
        }
        if key != hotkey.key || self.armed_out {
            return false;
        }
        let combo = (!hotkey.ctrl || self.ctrl)
            && (!hotkey.shift || self.shift)
            && (!hotkey.alt || self.alt);
        if combo {
            self.armed_out = true;
        }
        combo
    }

    pub fn release(&mut self, key: Key, hotkey: &Hotkey) {
        match key {
            Key::ControlLeft | Key::ControlRight => self.ctrl = false,
            Key::ShiftLeft | Key::ShiftRight => self.shift = false,
            Key::Alt | Key::AltGr => self.alt = false,
            _ => {}
        }
        if key == hotkey.key {
            self.armed_out = false;
        }
    }
}
