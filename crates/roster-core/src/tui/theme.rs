//! Theme and styling for the roster TUI.
//!
//! Wraps ftui's `Theme`/`StyleSheet` with four variants and WCAG contrast
//! checks on the accent colors. Widgets look styles up by class name:
//!
//! | class            | used for                              |
//! |------------------|---------------------------------------|
//! | `table.header`   | column headers, help section titles   |
//! | `table.selected` | cursor row, focused dialog button      |
//! | `row.marked`     | rows in the selection                 |
//! | `row.editing`    | rows in edit mode                     |
//! | `pager.active`   | current page button                   |
//! | `border.*`       | `normal` / `focused` block borders    |
//! | `status.*`       | `normal` / `error` / `warning` / `success` |

use ftui::style::{
    contrast_ratio, meets_wcag_aa, meets_wcag_aaa, Rgb as FtuiRgb, StyleSheet,
    Theme as FtuiTheme, ThemeBuilder,
};
use ftui::PackedRgba;
use ftui::Style as FtuiStyle;
use roster_config::ThemeName;

/// Theme mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
    /// WCAG AAA contrast.
    HighContrast,
    /// Attributes only; honors `NO_COLOR`.
    NoColor,
}

/// Palette entries that carry meaning and get contrast-checked.
#[derive(Debug, Clone)]
struct Palette {
    marked: FtuiRgb,
    editing: FtuiRgb,
    error: FtuiRgb,
    success: FtuiRgb,
    accent: FtuiRgb,
    muted: FtuiRgb,
    bg: FtuiRgb,
    fg: FtuiRgb,
}

/// Theme configuration for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    ftui_theme: FtuiTheme,
    stylesheet: StyleSheet,
    palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_env()
    }
}

const DARK: Palette = Palette {
    marked: FtuiRgb::new(80, 220, 80),
    editing: FtuiRgb::new(255, 200, 50),
    error: FtuiRgb::new(255, 80, 80),
    success: FtuiRgb::new(80, 220, 80),
    accent: FtuiRgb::new(0, 200, 200),
    muted: FtuiRgb::new(150, 150, 150),
    bg: FtuiRgb::new(30, 30, 30),
    fg: FtuiRgb::new(220, 220, 220),
};

const LIGHT: Palette = Palette {
    marked: FtuiRgb::new(0, 110, 0),
    editing: FtuiRgb::new(140, 90, 0),
    error: FtuiRgb::new(200, 0, 0),
    success: FtuiRgb::new(0, 110, 0),
    accent: FtuiRgb::new(0, 80, 200),
    muted: FtuiRgb::new(100, 100, 100),
    bg: FtuiRgb::new(255, 255, 255),
    fg: FtuiRgb::new(30, 30, 30),
};

const HIGH_CONTRAST: Palette = Palette {
    marked: FtuiRgb::new(100, 255, 100),
    editing: FtuiRgb::new(255, 255, 80),
    error: FtuiRgb::new(255, 100, 100),
    success: FtuiRgb::new(100, 255, 100),
    accent: FtuiRgb::new(255, 255, 0),
    muted: FtuiRgb::new(200, 200, 200),
    bg: FtuiRgb::new(0, 0, 0),
    fg: FtuiRgb::new(255, 255, 255),
};

fn color(rgb: FtuiRgb) -> ftui::Color {
    ftui::Color::rgb(rgb.r, rgb.g, rgb.b)
}

fn packed(rgb: FtuiRgb) -> PackedRgba {
    PackedRgba::rgb(rgb.r, rgb.g, rgb.b)
}

impl Theme {
    /// Pick a theme from the environment.
    ///
    /// `NO_COLOR` wins over `ROSTER_HIGH_CONTRAST`; otherwise dark.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            return Self::no_color();
        }
        if std::env::var_os("ROSTER_HIGH_CONTRAST").is_some() {
            return Self::high_contrast();
        }
        Self::dark()
    }

    /// Theme named in the config file; `None` falls back to the environment.
    pub fn from_name(name: Option<ThemeName>) -> Self {
        match name {
            Some(ThemeName::Dark) => Self::dark(),
            Some(ThemeName::Light) => Self::light(),
            Some(ThemeName::HighContrast) => Self::high_contrast(),
            Some(ThemeName::NoColor) => Self::no_color(),
            None => Self::from_env(),
        }
    }

    pub fn dark() -> Self {
        Self::from_palette(ThemeMode::Dark, DARK, false)
    }

    pub fn light() -> Self {
        Self::from_palette(ThemeMode::Light, LIGHT, false)
    }

    pub fn high_contrast() -> Self {
        Self::from_palette(ThemeMode::HighContrast, HIGH_CONTRAST, true)
    }

    /// Text attributes only (<https://no-color.org/>).
    pub fn no_color() -> Self {
        let white = FtuiRgb::new(255, 255, 255);
        Self {
            mode: ThemeMode::NoColor,
            ftui_theme: ThemeBuilder::new().build(),
            stylesheet: build_no_color_stylesheet(),
            palette: Palette {
                marked: white,
                editing: white,
                error: white,
                success: white,
                accent: white,
                muted: white,
                bg: FtuiRgb::new(0, 0, 0),
                fg: white,
            },
        }
    }

    fn from_palette(mode: ThemeMode, palette: Palette, bold: bool) -> Self {
        let ftui_theme = ThemeBuilder::new()
            .background(color(palette.bg))
            .text(color(palette.fg))
            .error(color(palette.error))
            .warning(color(palette.editing))
            .success(color(palette.success))
            .primary(color(palette.accent))
            .text_muted(color(palette.muted))
            .border(color(palette.muted))
            .border_focused(color(palette.accent))
            .build();
        let stylesheet = build_stylesheet(&palette, bold);
        Self {
            mode,
            ftui_theme,
            stylesheet,
            palette,
        }
    }

    pub fn ftui_theme(&self) -> &FtuiTheme {
        &self.ftui_theme
    }

    pub fn stylesheet(&self) -> &StyleSheet {
        &self.stylesheet
    }

    /// Style for a class; unknown classes yield the default style.
    pub fn class(&self, name: &str) -> FtuiStyle {
        self.stylesheet.get_or_default(name)
    }

    fn checked_pairs(&self) -> [(&'static str, FtuiRgb); 5] {
        [
            ("marked", self.palette.marked),
            ("editing", self.palette.editing),
            ("error", self.palette.error),
            ("accent", self.palette.accent),
            ("text", self.palette.fg),
        ]
    }

    /// Accent colors failing WCAG AA (4.5:1) against the background.
    pub fn validate_wcag_aa(&self) -> Vec<String> {
        let bg = self.palette.bg;
        self.checked_pairs()
            .into_iter()
            .filter(|(_, fg)| !meets_wcag_aa(*fg, bg))
            .map(|(name, fg)| {
                let ratio = contrast_ratio(fg, bg);
                format!("{name} ({fg:?}) on bg ({bg:?}) fails WCAG AA: {ratio:.2}:1 < 4.5:1")
            })
            .collect()
    }

    /// Accent colors failing WCAG AAA (7:1) against the background.
    pub fn validate_wcag_aaa(&self) -> Vec<String> {
        let bg = self.palette.bg;
        self.checked_pairs()
            .into_iter()
            .filter(|(_, fg)| !meets_wcag_aaa(*fg, bg))
            .map(|(name, fg)| {
                let ratio = contrast_ratio(fg, bg);
                format!("{name} ({fg:?}) on bg ({bg:?}) fails WCAG AAA: {ratio:.2}:1 < 7.0:1")
            })
            .collect()
    }
}

fn build_stylesheet(palette: &Palette, bold: bool) -> StyleSheet {
    let sheet = StyleSheet::new();

    let marked = FtuiStyle::new().fg(packed(palette.marked));
    let editing = FtuiStyle::new().fg(packed(palette.editing)).underline();
    sheet.define("row.marked", if bold { marked.bold() } else { marked });
    sheet.define("row.editing", if bold { editing.bold() } else { editing });

    sheet.define(
        "table.header",
        FtuiStyle::new().fg(packed(palette.fg)).bold(),
    );
    sheet.define(
        "table.selected",
        FtuiStyle::new()
            .fg(packed(palette.bg))
            .bg(packed(palette.accent)),
    );
    sheet.define(
        "pager.active",
        FtuiStyle::new().fg(packed(palette.accent)).bold().underline(),
    );

    sheet.define("status.normal", FtuiStyle::new().fg(packed(palette.muted)));
    sheet.define(
        "status.error",
        FtuiStyle::new().fg(packed(palette.error)).bold(),
    );
    sheet.define("status.warning", FtuiStyle::new().fg(packed(palette.editing)));
    sheet.define("status.success", FtuiStyle::new().fg(packed(palette.success)));

    sheet.define("border.normal", FtuiStyle::new().fg(packed(palette.muted)));
    sheet.define(
        "border.focused",
        FtuiStyle::new().fg(packed(palette.accent)).bold(),
    );

    sheet
}

fn build_no_color_stylesheet() -> StyleSheet {
    let sheet = StyleSheet::new();

    sheet.define("row.marked", FtuiStyle::new().bold());
    sheet.define("row.editing", FtuiStyle::new().underline());
    sheet.define("table.header", FtuiStyle::new().bold());
    sheet.define("table.selected", FtuiStyle::new().reverse());
    sheet.define("pager.active", FtuiStyle::new().reverse());

    sheet.define("status.normal", FtuiStyle::new());
    sheet.define("status.error", FtuiStyle::new().bold().underline());
    sheet.define("status.warning", FtuiStyle::new().bold());
    sheet.define("status.success", FtuiStyle::new());

    sheet.define("border.normal", FtuiStyle::new());
    sheet.define("border.focused", FtuiStyle::new().bold());

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSES: [&str; 11] = [
        "row.marked",
        "row.editing",
        "table.header",
        "table.selected",
        "pager.active",
        "status.normal",
        "status.error",
        "status.warning",
        "status.success",
        "border.normal",
        "border.focused",
    ];

    #[test]
    fn test_modes() {
        assert_eq!(Theme::dark().mode, ThemeMode::Dark);
        assert_eq!(Theme::light().mode, ThemeMode::Light);
        assert_eq!(Theme::high_contrast().mode, ThemeMode::HighContrast);
        assert_eq!(Theme::no_color().mode, ThemeMode::NoColor);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name(Some(ThemeName::Light)).mode, ThemeMode::Light);
        assert_eq!(
            Theme::from_name(Some(ThemeName::HighContrast)).mode,
            ThemeMode::HighContrast
        );
        assert_eq!(
            Theme::from_name(Some(ThemeName::NoColor)).mode,
            ThemeMode::NoColor
        );
    }

    #[test]
    fn test_every_theme_defines_all_classes() {
        for theme in [
            Theme::dark(),
            Theme::light(),
            Theme::high_contrast(),
            Theme::no_color(),
        ] {
            for class in CLASSES {
                assert!(
                    theme.stylesheet().contains(class),
                    "Theme {:?} missing stylesheet class: {class}",
                    theme.mode
                );
            }
        }
    }

    #[test]
    fn test_dark_meets_wcag_aa() {
        let failures = Theme::dark().validate_wcag_aa();
        assert!(failures.is_empty(), "Dark theme WCAG AA failures: {failures:?}");
    }

    #[test]
    fn test_light_meets_wcag_aa() {
        let failures = Theme::light().validate_wcag_aa();
        assert!(failures.is_empty(), "Light theme WCAG AA failures: {failures:?}");
    }

    #[test]
    fn test_high_contrast_meets_wcag_aaa() {
        let failures = Theme::high_contrast().validate_wcag_aaa();
        assert!(
            failures.is_empty(),
            "High contrast WCAG AAA failures: {failures:?}"
        );
    }

    #[test]
    fn test_class_accessor() {
        let theme = Theme::dark();
        let _style = theme.class("row.marked");
        // Missing class returns default style without panic
        let _default = theme.class("nonexistent.class");
    }

    #[test]
    fn test_distinct_backgrounds() {
        assert_ne!(Theme::dark().palette.bg, Theme::light().palette.bg);
        assert_ne!(Theme::dark().palette.bg, Theme::high_contrast().palette.bg);
    }
}
