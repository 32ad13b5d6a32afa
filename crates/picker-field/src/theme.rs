use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, OnceLock};

use crate::visual::{BorderColorToken, RingToken};

pub const THEME_ENV: &str = "PICKER_FIELD_THEME";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Default,
    Ocean,
    Forest,
}

impl ThemeName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Default => &["blue", "light"],
            Self::Ocean => &["teal"],
            Self::Forest => &["green"],
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeOption {
    pub name: ThemeName,
    pub preview: &'static str,
}

const THEME_OPTIONS: &[ThemeOption] = &[
    ThemeOption {
        name: ThemeName::Default,
        preview: "blue focus ring, gray borders (default)",
    },
    ThemeOption {
        name: ThemeName::Ocean,
        preview: "teal focus ring",
    },
    ThemeOption {
        name: ThemeName::Forest,
        preview: "green focus ring",
    },
];

pub fn theme_options() -> &'static [ThemeOption] {
    THEME_OPTIONS
}

pub fn theme_option(name: ThemeName) -> &'static ThemeOption {
    THEME_OPTIONS
        .iter()
        .find(|option| option.name == name)
        .unwrap_or(&THEME_OPTIONS[0])
}

/// The theme after `name` in picker order, wrapping around.
pub fn next_theme_name(name: ThemeName) -> ThemeName {
    let index = THEME_OPTIONS
        .iter()
        .position(|option| option.name == name)
        .unwrap_or(0);
    THEME_OPTIONS[(index + 1) % THEME_OPTIONS.len()].name
}

/// Blank input selects the default theme; unknown names yield `None`.
pub fn parse_theme_name(value: &str) -> Option<ThemeName> {
    let trimmed = value.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        return Some(ThemeName::Default);
    }
    THEME_OPTIONS.iter().find_map(|option| {
        (trimmed == option.name.as_str()
            || option.name.aliases().iter().any(|alias| *alias == trimmed))
        .then_some(option.name)
    })
}

/// Shared color tokens. Fields select among these; they never define colors themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub error: Color,
    pub neutral_filled: Color,
    pub neutral_empty: Color,
    pub label: Color,
    pub light_accent: Color,
    pub light_error: Color,
    pub text: Color,
}

const RED: Color = Color::Rgb(220, 53, 69);
const LIGHT_RED: Color = Color::Rgb(94, 36, 42);
const GRAY_400: Color = Color::Rgb(150, 155, 160);
const GRAY_500: Color = Color::Rgb(118, 124, 130);
const GRAY_600: Color = Color::Rgb(96, 102, 108);

impl Palette {
    pub const fn for_theme(name: ThemeName) -> Self {
        let (primary, light_accent) = match name {
            ThemeName::Default => (Color::Rgb(0, 122, 255), Color::Rgb(28, 52, 84)),
            ThemeName::Ocean => (Color::Rgb(38, 166, 178), Color::Rgb(22, 60, 66)),
            ThemeName::Forest => (Color::Rgb(76, 175, 80), Color::Rgb(30, 62, 34)),
        };
        Self {
            primary,
            error: RED,
            neutral_filled: GRAY_500,
            neutral_empty: GRAY_400,
            label: GRAY_600,
            light_accent,
            light_error: LIGHT_RED,
            text: Color::White,
        }
    }

    pub fn border(&self, token: BorderColorToken) -> Color {
        match token {
            BorderColorToken::Primary => self.primary,
            BorderColorToken::Error => self.error,
            BorderColorToken::NeutralFilled => self.neutral_filled,
            BorderColorToken::NeutralEmpty => self.neutral_empty,
        }
    }

    pub fn ring(&self, token: RingToken) -> Color {
        match token {
            RingToken::LightAccent => self.light_accent,
            RingToken::LightError => self.light_error,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(ThemeName::Default)
    }
}

static CURRENT_THEME_NAME: OnceLock<Mutex<ThemeName>> = OnceLock::new();

fn selected_theme_name_from_env() -> ThemeName {
    if let Ok(selected) = std::env::var(THEME_ENV) {
        if let Some(parsed) = parse_theme_name(&selected) {
            return parsed;
        }
        log::warn!("unknown {THEME_ENV} value {selected:?}; using the default theme");
    }
    ThemeName::Default
}

fn current_theme_mutex() -> &'static Mutex<ThemeName> {
    CURRENT_THEME_NAME.get_or_init(|| Mutex::new(selected_theme_name_from_env()))
}

pub fn active_theme_name() -> ThemeName {
    current_theme_mutex()
        .lock()
        .map(|name| *name)
        .unwrap_or(ThemeName::Default)
}

pub fn apply_theme_name(name: ThemeName) {
    if let Ok(mut current) = current_theme_mutex().lock() {
        *current = name;
    }
}

/// Palette of the active theme.
pub fn palette() -> Palette {
    Palette::for_theme(active_theme_name())
}
