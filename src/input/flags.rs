//! RDP wire flag values (MS-RDPBCGR 2.2.8.1.1.3.1.1)
//!
//! Pointer flags, extended pointer flags and synchronize lock flags as they
//! appear on the wire. Values are bit-exact; do not renumber.

/// Pointer event flags (TS_POINTER_EVENT.pointerFlags)
pub mod pointer {
    /// Two's-complement rotation magnitude (9 bits including the sign bit)
    pub const WHEEL_ROTATION_MASK: u16 = 0x01FF;
    /// Wheel rotation is negative
    pub const WHEEL_NEGATIVE: u16 = 0x0100;
    /// Vertical wheel event
    pub const WHEEL: u16 = 0x0200;
    /// Horizontal wheel event
    pub const HWHEEL: u16 = 0x0400;
    /// Pointer moved
    pub const MOVE: u16 = 0x0800;
    /// Left button
    pub const BUTTON1: u16 = 0x1000;
    /// Right button
    pub const BUTTON2: u16 = 0x2000;
    /// Middle button
    pub const BUTTON3: u16 = 0x4000;
    /// Button pressed (absent means released)
    pub const DOWN: u16 = 0x8000;
}

/// Extended pointer event flags (TS_POINTERX_EVENT.pointerFlags)
pub mod pointer_x {
    /// Back / side button
    pub const BUTTON1: u16 = 0x0001;
    /// Forward / extra button
    pub const BUTTON2: u16 = 0x0002;
    /// Button pressed
    pub const DOWN: u16 = 0x8000;
}

/// Synchronize event toggle flags (TS_SYNC_EVENT.toggleFlags)
pub mod sync {
    /// Scroll lock on
    pub const SCROLL_LOCK: u16 = 0x0001;
    /// Num lock on
    pub const NUM_LOCK: u16 = 0x0002;
    /// Caps lock on
    pub const CAPS_LOCK: u16 = 0x0004;
    /// Kana lock on
    pub const KANA_LOCK: u16 = 0x0008;
}

/// Keyboard scancode extension bit (KBDFLAGS_EXTENDED folded into the code)
pub const KBDEXT: u16 = 0x0100;
