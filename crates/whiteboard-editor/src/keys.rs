/// Physical key codes the editor reacts to.
pub mod codes {
    pub const H: &str = "KeyH";
    pub const V: &str = "KeyV";
}

/// A key press as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyEvent {
    /// Layout-independent code, e.g. `"KeyH"`.
    pub code: String,
    pub shift: bool,
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub ctrl_or_cmd: bool,
    pub alt: bool,
}

impl KeyEvent {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            ..Default::default()
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl_or_cmd(mut self) -> Self {
        self.ctrl_or_cmd = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn is_code(&self, code: &str) -> bool {
        self.code == code
    }
}
