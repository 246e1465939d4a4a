use bikeshare_data::analysis::WeatherFactor;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Endpoints of the diverging heatmap scale (coolwarm).
const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Complete theme definition carrying all UI styles used by the dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,
    /// Explanatory text under a chart or table.
    pub caption: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Navigation ───────────────────────────────────────────────────────────
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub section_active: Style,
    pub section_inactive: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    /// Highlighted row (busiest weekday).
    pub table_highlight: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_axis: Style,
    pub chart_histogram: Style,
    pub chart_density: Style,
    /// Weekday trend line.
    pub chart_line: Style,
    /// Weekday bars on the aggregate tab.
    pub chart_bar: Style,
    /// Weekday bars on the conclusions tab.
    pub chart_bar_alt: Style,
    pub chart_working_day: Style,
    pub chart_off_day: Style,
    pub scatter_temperature: Style,
    pub scatter_humidity: Style,
    pub scatter_windspeed: Style,

    /// `true` when heatmap cells may use 24-bit colour.
    pub truecolor: bool,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            caption: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            section_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            section_inactive: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_highlight: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            chart_axis: Style::default().fg(Color::Gray),
            chart_histogram: Style::default().fg(Color::Blue),
            chart_density: Style::default().fg(Color::LightCyan),
            chart_line: Style::default().fg(Color::LightRed),
            chart_bar: Style::default().fg(Color::Blue),
            chart_bar_alt: Style::default().fg(Color::Magenta),
            chart_working_day: Style::default().fg(Color::Cyan),
            chart_off_day: Style::default().fg(Color::Yellow),
            scatter_temperature: Style::default().fg(Color::LightBlue),
            scatter_humidity: Style::default().fg(Color::Green),
            scatter_windspeed: Style::default().fg(Color::Red),

            truecolor: true,
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and saturated accents so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            caption: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            section_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            section_inactive: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_highlight: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            chart_axis: Style::default().fg(Color::DarkGray),
            chart_histogram: Style::default().fg(Color::Blue),
            chart_density: Style::default().fg(Color::Black),
            chart_line: Style::default().fg(Color::Red),
            chart_bar: Style::default().fg(Color::Blue),
            chart_bar_alt: Style::default().fg(Color::Magenta),
            chart_working_day: Style::default().fg(Color::Blue),
            chart_off_day: Style::default().fg(Color::Red),
            scatter_temperature: Style::default().fg(Color::Blue),
            scatter_humidity: Style::default().fg(Color::Green),
            scatter_windspeed: Style::default().fg(Color::Red),

            truecolor: true,
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers and 24-bit colour to maximise compatibility with
    /// minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            caption: Style::default().fg(Color::Gray),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default().fg(Color::Yellow),
            tab_inactive: Style::default().fg(Color::White),
            section_active: Style::default().fg(Color::Cyan),
            section_inactive: Style::default().fg(Color::DarkGray),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_highlight: Style::default().fg(Color::Yellow),

            chart_axis: Style::default().fg(Color::White),
            chart_histogram: Style::default().fg(Color::Blue),
            chart_density: Style::default().fg(Color::Cyan),
            chart_line: Style::default().fg(Color::Yellow),
            chart_bar: Style::default().fg(Color::Blue),
            chart_bar_alt: Style::default().fg(Color::Magenta),
            chart_working_day: Style::default().fg(Color::Cyan),
            chart_off_day: Style::default().fg(Color::Yellow),
            scatter_temperature: Style::default().fg(Color::Blue),
            scatter_humidity: Style::default().fg(Color::Green),
            scatter_windspeed: Style::default().fg(Color::Red),

            truecolor: false,
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Marker colour for a weather scatter plot.
    pub fn scatter_style(&self, factor: WeatherFactor) -> Style {
        match factor {
            WeatherFactor::Temperature => self.scatter_temperature,
            WeatherFactor::Humidity => self.scatter_humidity,
            WeatherFactor::Windspeed => self.scatter_windspeed,
        }
    }

    /// Cell style for a correlation coefficient in `[-1, 1]`.
    ///
    /// Truecolor themes interpolate the coolwarm scale; the classic theme
    /// buckets into blue / neutral / red.  Undefined coefficients are dimmed.
    pub fn heatmap_style(&self, r: Option<f64>) -> Style {
        let Some(r) = r else {
            return self.dim;
        };
        let r = r.clamp(-1.0, 1.0);

        if !self.truecolor {
            return if r <= -0.3 {
                Style::default().fg(Color::White).bg(Color::Blue)
            } else if r >= 0.3 {
                Style::default().fg(Color::White).bg(Color::Red)
            } else {
                Style::default().fg(Color::Black).bg(Color::Gray)
            };
        }

        let (from, to, t) = if r < 0.0 {
            (NEUTRAL, COOL, -r)
        } else {
            (NEUTRAL, WARM, r)
        };
        let bg = Color::Rgb(
            lerp(from.0, to.0, t),
            lerp(from.1, to.1, t),
            lerp(from.2, to.2, t),
        );
        let fg = if r.abs() > 0.55 {
            Color::White
        } else {
            Color::Black
        };
        Style::default().fg(fg).bg(bg)
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

// ── Tests ─────────────────────────────────────────────────────────────────────
