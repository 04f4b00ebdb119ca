//! Color themes for the dashboard.

use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};

/// The selectable theme set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeKind {
    #[default]
    Default,
    Neon,
    Light,
}

impl ThemeKind {
    /// The next theme in the cycle order bound to the `t` key.
    pub fn next(self) -> Self {
        match self {
            Self::Default => Self::Neon,
            Self::Neon => Self::Light,
            Self::Light => Self::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub header: Color,
    pub dim: Color,
    pub text: Color,

    // Severity ramp
    pub ok: Color,
    pub warn: Color,
    pub crit: Color,

    // Alert banner
    pub alert_fg: Color,
    pub alert_bg: Color,

    // Panel borders
    pub cpu: Color,
    pub memory: Color,
    pub thermal: Color,
    pub gpu: Color,
    pub processes: Color,
    pub network: Color,
    pub disk: Color,
    pub containers: Color,
}

impl Theme {
    pub fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Default => Self::default_theme(),
            ThemeKind::Neon => Self::neon(),
            ThemeKind::Light => Self::light(),
        }
    }

    pub fn cycle(&mut self) {
        *self = Self::from_kind(self.kind.next());
    }

    fn default_theme() -> Self {
        Self {
            kind: ThemeKind::Default,
            colors: ThemeColors {
                header: Color::Cyan,
                dim: Color::Indexed(8),
                text: Color::Reset,
                ok: Color::Green,
                warn: Color::Yellow,
                crit: Color::Red,
                alert_fg: Color::White,
                alert_bg: Color::Red,
                cpu: Color::Cyan,
                memory: Color::Magenta,
                thermal: Color::Red,
                gpu: Color::Green,
                processes: Color::Green,
                network: Color::Blue,
                disk: Color::Yellow,
                containers: Color::Cyan,
            },
        }
    }

    fn neon() -> Self {
        Self {
            kind: ThemeKind::Neon,
            colors: ThemeColors {
                header: Color::Magenta,
                dim: Color::Indexed(8),
                text: Color::Reset,
                ok: Color::LightGreen,
                warn: Color::LightYellow,
                crit: Color::LightRed,
                alert_fg: Color::Red,
                alert_bg: Color::Yellow,
                cpu: Color::LightCyan,
                memory: Color::LightMagenta,
                thermal: Color::LightRed,
                gpu: Color::LightGreen,
                processes: Color::LightGreen,
                network: Color::LightBlue,
                disk: Color::LightYellow,
                containers: Color::LightCyan,
            },
        }
    }

    fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            colors: ThemeColors {
                header: Color::Blue,
                dim: Color::Gray,
                text: Color::Black,
                ok: Color::Green,
                warn: Color::Yellow,
                crit: Color::Red,
                alert_fg: Color::White,
                alert_bg: Color::Red,
                cpu: Color::Blue,
                memory: Color::Magenta,
                thermal: Color::Red,
                gpu: Color::Green,
                processes: Color::Green,
                network: Color::Blue,
                disk: Color::Yellow,
                containers: Color::Blue,
            },
        }
    }

    /// Color for a percentage-like magnitude: ok below 50, warn below 80,
    /// crit at or above.
    pub fn severity_color(&self, percent: f64) -> Color {
        if percent < 50.0 {
            self.colors.ok
        } else if percent < 80.0 {
            self.colors.warn
        } else {
            self.colors.crit
        }
    }

    pub fn severity(&self, percent: f64) -> Style {
        Style::default().fg(self.severity_color(percent))
    }

    pub fn severity_bold(&self, percent: f64) -> Style {
        self.severity(percent).add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.colors.dim)
    }

    pub fn dim_bold(&self) -> Style {
        self.dim().add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.colors.text)
    }

    pub fn bold(&self) -> Style {
        self.text().add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, color: Color) -> Style {
        Style::default().fg(color)
    }

    pub fn title(&self, color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.colors.header)
            .add_modifier(Modifier::BOLD)
    }

    /// Banner style while the alert condition holds. The blink modifier is
    /// set whenever alert is true; blink cadence is the terminal's
    /// concern.
    pub fn alert(&self) -> Style {
        Style::default()
            .fg(self.colors.alert_fg)
            .bg(self.colors.alert_bg)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
