use ratatui::style::Color;

pub const THEME_FILE: &str = "theme.conf";

/// Colour palette for the dashboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub error: Color,
    pub skeleton: Color,
}

impl Theme {
    /// Catppuccin Mocha palette.
    pub fn mocha() -> Self {
        // https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),        // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),       // overlay1
            accent: Color::Rgb(0xcb, 0xa6, 0xf7),      // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),      // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),   // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),   // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),   // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),   // text
            selected_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            selected_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error: Color::Rgb(0xf3, 0x8b, 0xa8),       // red
            skeleton: Color::Rgb(0x31, 0x32, 0x44),    // surface0
        }
    }

    fn fields_mut(&mut self) -> [(&'static str, &mut Color); 12] {
        [
            ("text", &mut self.text),
            ("muted", &mut self.muted),
            ("accent", &mut self.accent),
            ("border", &mut self.border),
            ("header_bg", &mut self.header_bg),
            ("header_fg", &mut self.header_fg),
            ("status_bg", &mut self.status_bg),
            ("status_fg", &mut self.status_fg),
            ("selected_fg", &mut self.selected_fg),
            ("selected_bg", &mut self.selected_bg),
            ("error", &mut self.error),
            ("skeleton", &mut self.skeleton),
        ]
    }

    /// Load from a `key = #RRGGBB` file. Missing or bad keys keep `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let (key, val) = (key.trim(), val.trim());
            if let Some(color) = parse_color(val) {
                if let Some((_, slot)) = theme.fields_mut().into_iter().find(|(k, _)| *k == key) {
                    *slot = color;
                }
            }
        }
        Some(theme)
    }

    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut copy = *self;
        let mut buf = String::new();
        buf.push_str("# userdeck theme\n");
        buf.push_str("# Colors: #RRGGBB, RRGGBB or 'reset'\n\n");
        for (key, color) in copy.fields_mut() {
            let _ = writeln!(&mut buf, "{key} = {}", color_to_str(*color));
        }
        std::fs::write(path, buf)
    }

    /// Read `path` if present, otherwise write the defaults there and use them.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        if let Some(existing) = super::config::config_file_read_path(THEME_FILE) {
            if let Some(theme) = Self::from_file(&existing.to_string_lossy()) {
                return theme;
            }
        }
        let theme = Self::mocha();
        let _ = theme.write_file(path);
        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

pub fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_str(c: Color) -> String {
    match c {
        Color::Rgb(r, g, b) => format!("#{r:02X}{g:02X}{b:02X}"),
        Color::Reset => "reset".to_string(),
        // Named colours are only produced by code, never by the file.
        other => format!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_reset() {
        assert_eq!(parse_color("#FF0080"), Some(Color::Rgb(0xff, 0x00, 0x80)));
        assert_eq!(parse_color("00ff00"), Some(Color::Rgb(0, 0xff, 0)));
        assert_eq!(parse_color("Reset"), Some(Color::Reset));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("zzzzzz"), None);
    }
}
