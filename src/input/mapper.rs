//! Keycode Mapping Tables
//!
//! Linux evdev keycode to RDP (set 1) scancode translation. Wayland hands out
//! evdev codes; the lookup is keyed by X11 keycode (evdev + 8) the way XKB
//! keymaps number keys. Extended (E0) keys carry [`KBDEXT`].

use std::collections::HashMap;

use crate::input::flags::KBDEXT;

/// Offset between evdev keycodes and X11/XKB keycodes
pub const X11_KEYCODE_OFFSET: u32 = 8;

/// Linux evdev keycodes
#[allow(missing_docs)]
pub mod keycodes {
    pub const KEY_ESC: u32 = 1;
    pub const KEY_1: u32 = 2;
    pub const KEY_0: u32 = 11;
    pub const KEY_ENTER: u32 = 28;
    pub const KEY_LEFTCTRL: u32 = 29;
    pub const KEY_A: u32 = 30;
    pub const KEY_Z: u32 = 44;
    pub const KEY_SPACE: u32 = 57;
    pub const KEY_CAPSLOCK: u32 = 58;
    pub const KEY_F1: u32 = 59;
    pub const KEY_NUMLOCK: u32 = 69;
    pub const KEY_KPDOT: u32 = 83;
    pub const KEY_ZENKAKUHANKAKU: u32 = 85;
    pub const KEY_102ND: u32 = 86;
    pub const KEY_F11: u32 = 87;
    pub const KEY_F12: u32 = 88;
    pub const KEY_RO: u32 = 89;
    pub const KEY_KATAKANA: u32 = 90;
    pub const KEY_HIRAGANA: u32 = 91;
    pub const KEY_HENKAN: u32 = 92;
    pub const KEY_KATAKANAHIRAGANA: u32 = 93;
    pub const KEY_MUHENKAN: u32 = 94;
    pub const KEY_KPENTER: u32 = 96;
    pub const KEY_RIGHTCTRL: u32 = 97;
    pub const KEY_KPSLASH: u32 = 98;
    pub const KEY_SYSRQ: u32 = 99;
    pub const KEY_RIGHTALT: u32 = 100;
    pub const KEY_HOME: u32 = 102;
    pub const KEY_UP: u32 = 103;
    pub const KEY_PAGEUP: u32 = 104;
    pub const KEY_LEFT: u32 = 105;
    pub const KEY_RIGHT: u32 = 106;
    pub const KEY_END: u32 = 107;
    pub const KEY_DOWN: u32 = 108;
    pub const KEY_PAGEDOWN: u32 = 109;
    pub const KEY_INSERT: u32 = 110;
    pub const KEY_DELETE: u32 = 111;
    pub const KEY_MUTE: u32 = 113;
    pub const KEY_VOLUMEDOWN: u32 = 114;
    pub const KEY_VOLUMEUP: u32 = 115;
    pub const KEY_POWER: u32 = 116;
    pub const KEY_KPEQUAL: u32 = 117;
    pub const KEY_PAUSE: u32 = 119;
    pub const KEY_KPCOMMA: u32 = 121;
    pub const KEY_HANGEUL: u32 = 122;
    pub const KEY_HANJA: u32 = 123;
    pub const KEY_YEN: u32 = 124;
    pub const KEY_LEFTMETA: u32 = 125;
    pub const KEY_RIGHTMETA: u32 = 126;
    pub const KEY_COMPOSE: u32 = 127;
    pub const KEY_CALC: u32 = 140;
    pub const KEY_SLEEP: u32 = 142;
    pub const KEY_WAKEUP: u32 = 143;
    pub const KEY_MAIL: u32 = 155;
    pub const KEY_BOOKMARKS: u32 = 156;
    pub const KEY_COMPUTER: u32 = 157;
    pub const KEY_BACK: u32 = 158;
    pub const KEY_FORWARD: u32 = 159;
    pub const KEY_NEXTSONG: u32 = 163;
    pub const KEY_PLAYPAUSE: u32 = 164;
    pub const KEY_PREVIOUSSONG: u32 = 165;
    pub const KEY_STOPCD: u32 = 166;
    pub const KEY_HOMEPAGE: u32 = 172;
    pub const KEY_REFRESH: u32 = 173;
    pub const KEY_F13: u32 = 183;
    pub const KEY_F23: u32 = 193;
    pub const KEY_F24: u32 = 194;
    pub const KEY_SEARCH: u32 = 217;
    pub const KEY_MEDIA: u32 = 226;
}

use keycodes::*;

/// Keycode mapper handles evdev keycode to RDP scancode translation
#[derive(Debug, Clone)]
pub struct ScancodeMapper {
    /// evdev keycode -> scancode (with KBDEXT for E0 keys)
    map: HashMap<u32, u16>,
}

impl ScancodeMapper {
    /// Create a mapper with the full table loaded
    pub fn new() -> Self {
        let mut mapper = Self {
            map: HashMap::new(),
        };

        mapper.initialize_primary_map();
        mapper.initialize_extended_map();
        mapper
    }

    /// Keys whose evdev code and set-1 scancode differ only by the E0 prefix
    fn initialize_primary_map(&mut self) {
        // KEY_ESC..=KEY_KPDOT share their numbering with set 1.
        for keycode in KEY_ESC..=KEY_KPDOT {
            self.map.insert(keycode, keycode as u16);
        }

        let mappings = [
            (KEY_ZENKAKUHANKAKU, 0x29),
            (KEY_102ND, 0x56),
            (KEY_F11, 0x57),
            (KEY_F12, 0x58),
            (KEY_RO, 0x73),
            (KEY_KATAKANA, 0x70),
            (KEY_HIRAGANA, 0x70),
            (KEY_HENKAN, 0x79),
            (KEY_KATAKANAHIRAGANA, 0x70),
            (KEY_MUHENKAN, 0x7B),
            (KEY_KPEQUAL, 0x59),
            (KEY_KPCOMMA, 0x7E),
            (KEY_HANGEUL, 0x72),
            (KEY_HANJA, 0x71),
            (KEY_YEN, 0x7D),
            (KEY_F24, 0x76),
        ];

        for (keycode, scancode) in mappings {
            self.map.insert(keycode, scancode);
        }

        // F13..F23 are contiguous on both sides.
        for (i, keycode) in (KEY_F13..=KEY_F23).enumerate() {
            self.map.insert(keycode, 0x64 + i as u16);
        }
    }

    /// E0-prefixed keys
    fn initialize_extended_map(&mut self) {
        let mappings = [
            (KEY_KPENTER, 0x1C),
            (KEY_RIGHTCTRL, 0x1D),
            (KEY_KPSLASH, 0x35),
            (KEY_SYSRQ, 0x37),
            (KEY_RIGHTALT, 0x38),
            (KEY_PAUSE, 0x46),
            (KEY_HOME, 0x47),
            (KEY_UP, 0x48),
            (KEY_PAGEUP, 0x49),
            (KEY_LEFT, 0x4B),
            (KEY_RIGHT, 0x4D),
            (KEY_END, 0x4F),
            (KEY_DOWN, 0x50),
            (KEY_PAGEDOWN, 0x51),
            (KEY_INSERT, 0x52),
            (KEY_DELETE, 0x53),
            (KEY_LEFTMETA, 0x5B),
            (KEY_RIGHTMETA, 0x5C),
            (KEY_COMPOSE, 0x5D),
            (KEY_POWER, 0x5E),
            (KEY_SLEEP, 0x5F),
            (KEY_WAKEUP, 0x63),
            (KEY_PREVIOUSSONG, 0x10),
            (KEY_NEXTSONG, 0x19),
            (KEY_MUTE, 0x20),
            (KEY_CALC, 0x21),
            (KEY_PLAYPAUSE, 0x22),
            (KEY_STOPCD, 0x24),
            (KEY_VOLUMEDOWN, 0x2E),
            (KEY_VOLUMEUP, 0x30),
            (KEY_HOMEPAGE, 0x32),
            (KEY_SEARCH, 0x65),
            (KEY_BOOKMARKS, 0x66),
            (KEY_REFRESH, 0x67),
            (KEY_FORWARD, 0x69),
            (KEY_BACK, 0x6A),
            (KEY_COMPUTER, 0x6B),
            (KEY_MAIL, 0x6C),
            (KEY_MEDIA, 0x6D),
        ];

        for (keycode, scancode) in mappings {
            self.map.insert(keycode, KBDEXT | scancode);
        }
    }

    /// Translate an evdev keycode
    pub fn scancode_for_evdev(&self, keycode: u32) -> Option<u16> {
        self.map.get(&keycode).copied()
    }

    /// Translate an X11/XKB keycode (evdev + 8)
    pub fn scancode_for_x11_keycode(&self, keycode: u32) -> Option<u16> {
        keycode
            .checked_sub(X11_KEYCODE_OFFSET)
            .and_then(|evdev| self.scancode_for_evdev(evdev))
    }

    /// Get total number of mapped keys
    pub fn mapped_key_count(&self) -> usize {
        self.map.len()
    }
}

impl Default for ScancodeMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a packed scancode is an E0 key
pub fn is_extended(scancode: u16) -> bool {
    scancode & KBDEXT != 0
}
