//! Terminal styling helpers with NO_COLOR support.

/// Check if color output is enabled (respects `NO_COLOR` env var).
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Terminal style helper that respects NO_COLOR.
pub struct Style {
    enabled: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

impl Style {
    pub fn new() -> Self {
        Self {
            enabled: color_enabled(),
        }
    }

    /// Colors on only if both the caller and the environment allow it.
    pub fn with_color(wanted: bool) -> Self {
        Self {
            enabled: wanted && color_enabled(),
        }
    }

    /// Create a style with colors explicitly enabled (for tests).
    pub fn force_enabled() -> Self {
        Self { enabled: true }
    }

    /// Create a style with colors explicitly disabled.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn code(&self, seq: &'static str) -> &'static str {
        if self.enabled {
            seq
        } else {
            ""
        }
    }

    pub fn dim_start(&self) -> &'static str {
        self.code("\x1b[2m")
    }

    pub fn bold_start(&self) -> &'static str {
        self.code("\x1b[1m")
    }

    pub fn red_start(&self) -> &'static str {
        self.code("\x1b[31m")
    }

    pub fn yellow_start(&self) -> &'static str {
        self.code("\x1b[33m")
    }

    pub fn green_start(&self) -> &'static str {
        self.code("\x1b[32m")
    }

    pub fn cyan_start(&self) -> &'static str {
        self.code("\x1b[36m")
    }

    pub fn reset(&self) -> &'static str {
        self.code("\x1b[0m")
    }
}

/// Compute visible width of a string, ignoring ANSI escape sequences.
pub fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if in_escape {
            if c.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if c == '\x1b' {
            in_escape = true;
        } else {
            width += char_width(c);
        }
    }
    width
}

/// Terminal columns taken by one character: 0 for controls, 2 for East
/// Asian wide and fullwidth forms, 1 otherwise.
fn char_width(c: char) -> usize {
    if c < ' ' {
        return 0;
    }
    if c.is_ascii() {
        return 1;
    }
    let cp = u32::from(c);
    let wide = (0x1100..=0x115F).contains(&cp) // Hangul Jamo
        || (0x2E80..=0x303E).contains(&cp) // CJK radicals and punctuation
        || (0x3040..=0x33BF).contains(&cp) // kana
        || (0x3400..=0x4DBF).contains(&cp)
        || (0x4E00..=0x9FFF).contains(&cp)
        || (0xAC00..=0xD7A3).contains(&cp) // Hangul syllables
        || (0xF900..=0xFAFF).contains(&cp)
        || (0xFE30..=0xFE6F).contains(&cp)
        || (0xFF01..=0xFF60).contains(&cp) // fullwidth forms
        || (0xFFE0..=0xFFE6).contains(&cp)
        || (0x1F300..=0x1F64F).contains(&cp) // emoji
        || (0x1F900..=0x1F9FF).contains(&cp)
        || (0x20000..=0x2FFFD).contains(&cp);
    if wide {
        2
    } else {
        1
    }
}

/// Pad `s` with spaces on the right to `width` visible columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{s}{}", " ".repeat(pad))
}

/// Pad `s` with spaces on the left to `width` visible columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{}{s}", " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_disabled_returns_empty_codes() {
        let style = Style::disabled();
        assert_eq!(style.dim_start(), "");
        assert_eq!(style.bold_start(), "");
        assert_eq!(style.red_start(), "");
        assert_eq!(style.yellow_start(), "");
        assert_eq!(style.green_start(), "");
        assert_eq!(style.cyan_start(), "");
        assert_eq!(style.reset(), "");
    }

    #[test]
    fn color_enabled_returns_escape_codes() {
        let style = Style::force_enabled();
        assert_eq!(style.dim_start(), "\x1b[2m");
        assert_eq!(style.reset(), "\x1b[0m");
        assert_eq!(style.red_start(), "\x1b[31m");
    }

    #[test]
    fn with_color_false_disables() {
        assert!(!Style::with_color(false).is_enabled());
    }

    #[test]
    fn visible_width_strips_ansi() {
        assert_eq!(visible_width("\x1b[31mhello\x1b[0m"), 5);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn visible_width_box_drawing() {
        assert_eq!(visible_width("┌───────┐"), 9);
        assert_eq!(visible_width("│ ● ● ● │"), 9);
    }

    #[test]
    fn visible_width_counts_wide_characters_twice() {
        assert_eq!(visible_width("山田"), 4);
        assert_eq!(visible_width("김민"), 4);
        assert_eq!(visible_width("Ｚｏｅ"), 6);
        assert_eq!(visible_width("Zoë"), 3);
        assert_eq!(visible_width("a\tb"), 2);
    }

    #[test]
    fn padding_accounts_for_wide_characters() {
        assert_eq!(pad_left("山田", 6), "  山田");
        assert_eq!(pad_right("山田", 5), "山田 ");
    }

    #[test]
    fn padding_ignores_escapes() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("7", 3), "  7");
        assert_eq!(pad_left("\x1b[1m7\x1b[0m", 3), "  \x1b[1m7\x1b[0m");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }
}
