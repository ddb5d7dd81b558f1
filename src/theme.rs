use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    // Backgrounds
    pub bg_main: Color,
    pub bg_panel: Color,
    pub bg_selection: Color,
    pub bg_gauge: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_on_accent: Color,

    // Accents
    pub accent: Color,
    pub accent_secondary: Color,
    pub border: Color,
    pub border_active: Color,

    // Status
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            bg_main: Color::Rgb(255, 250, 240),
            bg_panel: Color::Rgb(250, 240, 220),
            bg_selection: Color::Rgb(238, 222, 190),
            bg_gauge: Color::Rgb(230, 215, 190),

            text_primary: Color::Rgb(70, 50, 35),
            text_secondary: Color::Rgb(120, 90, 60),
            text_muted: Color::Rgb(160, 135, 110),
            text_on_accent: Color::Rgb(255, 255, 255),

            accent: Color::Rgb(212, 145, 40),
            accent_secondary: Color::Rgb(166, 100, 50),
            border: Color::Rgb(180, 150, 120),
            border_active: Color::Rgb(212, 145, 40),

            green: Color::Rgb(76, 132, 60),
            yellow: Color::Rgb(176, 128, 20),
            red: Color::Rgb(178, 58, 48),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg_main: Color::Rgb(30, 22, 16),
            bg_panel: Color::Rgb(45, 32, 22),
            bg_selection: Color::Rgb(70, 50, 32),
            bg_gauge: Color::Rgb(60, 44, 30),

            text_primary: Color::Rgb(245, 235, 220),
            text_secondary: Color::Rgb(200, 180, 160),
            text_muted: Color::Rgb(140, 120, 100),
            text_on_accent: Color::Rgb(25, 18, 12),

            accent: Color::Rgb(255, 191, 0),
            accent_secondary: Color::Rgb(205, 133, 63),
            border: Color::Rgb(100, 75, 55),
            border_active: Color::Rgb(255, 191, 0),

            green: Color::Rgb(124, 179, 66),
            yellow: Color::Rgb(230, 190, 60),
            red: Color::Rgb(230, 90, 70),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Auto => detect_system_theme(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemeMode {
    pub fn next(self) -> Self {
        match self {
            Self::Auto => Self::Light,
            Self::Light => Self::Dark,
            Self::Dark => Self::Auto,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

pub fn detect_system_theme() -> Theme {
    // COLORFGBG is "fg;bg"; 0 or 8-15 as background means a dark terminal
    if let Ok(colorfgbg) = std::env::var("COLORFGBG")
        && let Some(bg) = colorfgbg.split(';').next_back()
        && let Ok(bg_num) = bg.parse::<u8>()
    {
        if bg_num == 0 || (8..=15).contains(&bg_num) {
            return Theme::dark();
        }
        return Theme::light();
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            let style = String::from_utf8_lossy(&output.stdout);
            if output.status.success() && style.trim().eq_ignore_ascii_case("dark") {
                return Theme::dark();
            }
            // Missing key means light mode
            return Theme::light();
        }
    }

    Theme::dark()
}
