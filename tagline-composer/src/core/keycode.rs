//! Key code definitions and key event handling
//!
//! Front ends translate their native key events (terminal, browser, toolkit)
//! into these X11-style keysyms before handing them to the composer.

/// Key symbol (keysym) values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keysym(pub u32);

impl Keysym {
    // Editing keys
    pub const BACKSPACE: Keysym = Keysym(0xff08);
    pub const TAB: Keysym = Keysym(0xff09);
    pub const RETURN: Keysym = Keysym(0xff0d);
    pub const ESCAPE: Keysym = Keysym(0xff1b);
    pub const DELETE: Keysym = Keysym(0xffff);

    // Cursor movement
    pub const HOME: Keysym = Keysym(0xff50);
    pub const LEFT: Keysym = Keysym(0xff51);
    pub const UP: Keysym = Keysym(0xff52);
    pub const RIGHT: Keysym = Keysym(0xff53);
    pub const DOWN: Keysym = Keysym(0xff54);
    pub const END: Keysym = Keysym(0xff57);

    // Modifiers
    pub const SHIFT_L: Keysym = Keysym(0xffe1);
    pub const SHIFT_R: Keysym = Keysym(0xffe2);
    pub const CONTROL_L: Keysym = Keysym(0xffe3);
    pub const CONTROL_R: Keysym = Keysym(0xffe4);
    pub const META_L: Keysym = Keysym(0xffe7);
    pub const META_R: Keysym = Keysym(0xffe8);
    pub const ALT_L: Keysym = Keysym(0xffe9);
    pub const ALT_R: Keysym = Keysym(0xffea);
    pub const SUPER_L: Keysym = Keysym(0xffeb);
    pub const SUPER_R: Keysym = Keysym(0xffec);

    // Space
    pub const SPACE: Keysym = Keysym(0x0020);

    // Letters used by Emacs-style shortcuts (lowercase and uppercase)
    pub const KEY_A: Keysym = Keysym(0x0061);
    pub const KEY_A_UPPER: Keysym = Keysym(0x0041);
    pub const KEY_B: Keysym = Keysym(0x0062);
    pub const KEY_B_UPPER: Keysym = Keysym(0x0042);
    pub const KEY_E: Keysym = Keysym(0x0065);
    pub const KEY_E_UPPER: Keysym = Keysym(0x0045);
    pub const KEY_F: Keysym = Keysym(0x0066);
    pub const KEY_F_UPPER: Keysym = Keysym(0x0046);
    pub const KEY_N: Keysym = Keysym(0x006e);
    pub const KEY_N_UPPER: Keysym = Keysym(0x004e);
    pub const KEY_P: Keysym = Keysym(0x0070);
    pub const KEY_P_UPPER: Keysym = Keysym(0x0050);

    /// Keysym for a character typed as-is.
    ///
    /// Latin-1 characters map to themselves, everything else uses the
    /// `0x0100_0000 + codepoint` Unicode keysym range.
    pub fn from_char(ch: char) -> Self {
        let code = ch as u32;
        if (0x0020..=0x007e).contains(&code) || (0x00a0..=0x00ff).contains(&code) {
            Keysym(code)
        } else {
            Keysym(0x0100_0000 + code)
        }
    }

    /// Check if this keysym represents a printable character
    pub fn is_printable(&self) -> bool {
        self.to_char().is_some()
    }

    /// Try to convert this keysym to a character
    pub fn to_char(&self) -> Option<char> {
        match self.0 {
            0x0020..=0x007e | 0x00a0..=0x00ff => char::from_u32(self.0),
            0x0100_0100..=0x0110_ffff => {
                char::from_u32(self.0 - 0x0100_0000).filter(|c| !c.is_control())
            }
            _ => None,
        }
    }

    /// Check if this is a modifier key
    pub fn is_modifier(&self) -> bool {
        matches!(
            *self,
            Self::SHIFT_L
                | Self::SHIFT_R
                | Self::CONTROL_L
                | Self::CONTROL_R
                | Self::META_L
                | Self::META_R
                | Self::ALT_L
                | Self::ALT_R
                | Self::SUPER_L
                | Self::SUPER_R
        )
    }
}

/// Key modifier flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift_key: bool,
    pub control_key: bool,
    pub alt_key: bool,
    pub super_key: bool,
}

impl KeyModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_control(mut self, control: bool) -> Self {
        self.control_key = control;
        self
    }
}

/// A key event
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// The key symbol
    pub keysym: Keysym,
    /// Modifier key state
    pub modifiers: KeyModifiers,
    /// Whether this is a key press (true) or release (false)
    pub is_press: bool,
}

impl KeyEvent {
    pub fn new(keysym: Keysym, modifiers: KeyModifiers, is_press: bool) -> Self {
        Self {
            keysym,
            modifiers,
            is_press,
        }
    }

    /// Create a simple key press event without modifiers
    pub fn press(keysym: Keysym) -> Self {
        Self::new(keysym, KeyModifiers::default(), true)
    }

    /// Key press typing `ch`
    pub fn char(ch: char) -> Self {
        Self::press(Keysym::from_char(ch))
    }

    /// Check if this is a printable character key press
    pub fn is_printable_press(&self) -> bool {
        self.is_press
            && self.keysym.is_printable()
            && !self.modifiers.control_key
            && !self.modifiers.alt_key
    }

    /// Get the character for this key event if it's a printable press
    pub fn to_char(&self) -> Option<char> {
        if self.is_printable_press() {
            self.keysym.to_char()
        } else {
            None
        }
    }
}
