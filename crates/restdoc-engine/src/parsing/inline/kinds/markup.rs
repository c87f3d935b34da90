/// Inline literal: ``` ``text`` ```. A raw zone; nothing is parsed inside.
pub struct Literal;

impl Literal {
    pub const MARK: &'static [u8; 2] = b"``";
}

/// Strong emphasis: `**text**`.
pub struct Strong;

impl Strong {
    pub const MARK: &'static [u8; 2] = b"**";
}

/// Emphasis: `*text*`.
pub struct Emphasis;

impl Emphasis {
    pub const MARK: &'static [u8; 1] = b"*";
}

/// Interpreted text: `` `text` ``, optionally prefixed by `:role:`.
pub struct Interpreted;

impl Interpreted {
    pub const TICK: &'static [u8; 1] = b"`";
    pub const ROLE_MARK: u8 = b':';
    /// Role applied to interpreted text without an explicit role.
    pub const DEFAULT_ROLE: &'static str = "title-reference";

    pub fn is_role_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'+' | b':')
    }
}
