use chrono::{DateTime, Local};
use yansi::Paint;

pub const TIME_LAYOUT: &str = "%Y-%m-%d %H:%M";

/// Color palette shared by the CLI output and the terminal UI.
#[derive(Clone, Copy)]
pub struct ColorPalette {
    pub primary: (u8, u8, u8),   // IDs, muted text
    pub secondary: (u8, u8, u8), // Headers, emphasis
    pub timestamp: (u8, u8, u8), // Timestamps
    pub accent: (u8, u8, u8),    // Focus and selection
    pub danger: (u8, u8, u8),    // Destructive actions, errors
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        primary: (108, 112, 134),   // Gray
        secondary: (148, 226, 213), // Teal
        timestamp: (137, 180, 250), // Blue
        accent: (37, 176, 103),     // Green
        danger: (243, 139, 168),    // Pink
    };
}

/// Formatting context for plain CLI output.
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    pub fn from_env() -> Self {
        let use_color = std::env::var("NO_COLOR").is_err();
        Self::new(use_color)
    }

    fn paint(&self, text: &str, rgb: (u8, u8, u8)) -> String {
        if self.use_color {
            let (r, g, b) = rgb;
            Paint::rgb(text, r, g, b).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_id(&self, id: &str) -> String {
        self.paint(id, self.palette.primary)
    }

    pub fn format_header(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.secondary;
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_timestamp(&self, ts: &str) -> String {
        self.paint(ts, self.palette.timestamp)
    }

    pub fn format_path(&self, path: &str) -> String {
        self.paint(path, self.palette.accent)
    }
}

/// Timestamp formatting with relative/absolute modes
pub struct TimeFormatter {
    relative_mode: bool,
    now: DateTime<Local>,
}

impl TimeFormatter {
    pub fn new(relative_mode: bool, now: DateTime<Local>) -> Self {
        Self { relative_mode, now }
    }

    pub fn format(&self, dt: &DateTime<Local>) -> String {
        if self.relative_mode {
            self.format_relative(dt)
        } else {
            dt.format(TIME_LAYOUT).to_string()
        }
    }

    pub fn format_relative(&self, dt: &DateTime<Local>) -> String {
        let dur = self.now.signed_duration_since(*dt);
        let total_minutes = dur.num_minutes().max(0);
        let total_hours = dur.num_hours().max(0);
        let total_days = dur.num_days().max(0);

        if total_minutes < 1 {
            return "just now".to_string();
        }
        if total_hours == 0 {
            return format!("{}m ago", total_minutes);
        }
        if total_days < 30 {
            if total_days == 0 {
                return format!("{}h ago", total_hours);
            }
            let hours = (total_hours - total_days * 24).max(0);
            if hours > 0 {
                format!("{}d {}h ago", total_days, hours)
            } else {
                format!("{}d ago", total_days)
            }
        } else if total_days < 365 {
            let months = total_days / 30;
            let days = total_days % 30;
            if days > 0 {
                format!("{}mo {}d ago", months, days)
            } else {
                format!("{}mo ago", months)
            }
        } else {
            let years = total_days / 365;
            let months = (total_days % 365) / 30;
            if months > 0 {
                format!("{}y {}mo ago", years, months)
            } else {
                format!("{}y ago", years)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_format_context_no_color() {
        let ctx = FormatContext::new(false);
        assert_eq!(ctx.format_id("abc123"), "abc123");
        assert_eq!(ctx.format_header("Header"), "Header");
        assert_eq!(ctx.format_timestamp("2024-01-01"), "2024-01-01");
    }

    #[test]
    fn test_format_context_with_color() {
        let ctx = FormatContext::new(true);
        let id = ctx.format_id("abc123");
        assert!(id.contains("abc123"));
        assert!(id.len() > "abc123".len()); // Has ANSI codes
    }

    #[test]
    fn test_relative_buckets() {
        let now = at(12, 0);
        let f = TimeFormatter::new(true, now);
        assert_eq!(f.format(&now), "just now");
        assert_eq!(f.format(&at(11, 45)), "15m ago");
        assert_eq!(f.format(&at(9, 0)), "3h ago");
        assert_eq!(f.format(&(now - Duration::hours(50))), "2d 2h ago");
        assert_eq!(f.format(&(now - Duration::days(45))), "1mo 15d ago");
        assert_eq!(f.format(&(now - Duration::days(400))), "1y 1mo ago");
    }

    #[test]
    fn test_future_times_are_clamped() {
        let now = at(12, 0);
        let f = TimeFormatter::new(true, now);
        assert_eq!(f.format(&at(13, 0)), "just now");
    }

    #[test]
    fn test_absolute_mode() {
        let f = TimeFormatter::new(false, at(12, 0));
        assert_eq!(f.format(&at(8, 5)), "2024-06-01 08:05");
    }
}
