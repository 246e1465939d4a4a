//! Main application state and TUI event loop for the bike-sharing dashboard.
//!
//! [`App`] owns the theme, the selected tab and section, and the analysed
//! [`DashboardData`].  Data is loaded once before the loop starts and again
//! only when the user asks for a reload.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame, Terminal,
};
use tracing::{debug, info};

use bikeshare_core::error::Result;
use bikeshare_data::analysis::{analyze_dashboard, AnalysisOptions, DashboardData};

use crate::components::header::Header;
use crate::themes::Theme;
use crate::views::{conclusions, eda, overview, rfm};

/// Rows moved per PageUp / PageDown.
const SCROLL_STEP: u16 = 5;

// ── Tab ───────────────────────────────────────────────────────────────────────

/// Top-level dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Exploratory,
    Aggregate,
    Conclusions,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Overview,
        Tab::Exploratory,
        Tab::Aggregate,
        Tab::Conclusions,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Exploratory => "Exploratory Analysis",
            Tab::Aggregate => "Aggregate Analysis",
            Tab::Conclusions => "Conclusions",
        }
    }

    /// Parse a `--tab` value.  Unknown names fall back to the overview.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "eda" => Tab::Exploratory,
            "rfm" => Tab::Aggregate,
            "conclusions" => Tab::Conclusions,
            _ => Tab::Overview,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Section names in display order.
    pub fn sections(self) -> &'static [&'static str] {
        match self {
            Tab::Overview => &overview::SECTIONS,
            Tab::Exploratory => &eda::SECTIONS,
            Tab::Aggregate => &rfm::SECTIONS,
            Tab::Conclusions => &conclusions::SECTIONS,
        }
    }
}

// ── Action ────────────────────────────────────────────────────────────────────

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Reload,
}

// ── TerminalGuard ─────────────────────────────────────────────────────────────

/// Raw mode plus alternate screen, restored when dropped.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Selected tab.
    pub tab: Tab,
    /// Selected section within the tab.
    pub section: usize,
    /// Vertical scroll offset for text sections.
    pub scroll: u16,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Analysed datasets currently on screen.
    pub data: DashboardData,
    /// Options reused on reload.
    pub options: AnalysisOptions,
}

impl App {
    /// Construct a new application around already-analysed data.
    pub fn new(theme_name: &str, tab_name: &str, data: DashboardData, options: AnalysisOptions) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            tab: Tab::from_name(tab_name),
            section: 0,
            scroll: 0,
            should_quit: false,
            data,
            options,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// on the current task and yields to the runtime between polls.  A failed
    /// reload ends the session with that error.
    pub async fn run(mut self) -> Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            guard.terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match self.handle_key(key) {
                            Action::Quit => self.should_quit = true,
                            Action::Reload => self.reload()?,
                            Action::None => {}
                        }
                    }
                }
            }

            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Apply one key press to the navigation state.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => Action::Reload,
            KeyCode::Right | KeyCode::Tab => {
                self.select_tab(self.tab.next());
                Action::None
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.select_tab(self.tab.prev());
                Action::None
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.select_tab(Tab::ALL[index]);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.tab.sections().len().saturating_sub(1);
                self.select_section((self.section + 1).min(last));
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_section(self.section.saturating_sub(1));
                Action::None
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(SCROLL_STEP);
                Action::None
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
                Action::None
            }
            KeyCode::Home => {
                self.scroll = 0;
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Re-run the whole pipeline on the same files.  On failure the current
    /// data is left untouched and the error is returned.
    pub fn reload(&mut self) -> Result<()> {
        info!(
            day = %self.data.sources.day.display(),
            hour = %self.data.sources.hour.display(),
            "Reloading datasets"
        );
        self.data = analyze_dashboard(&self.data.sources, self.options)?;
        Ok(())
    }

    fn select_tab(&mut self, tab: Tab) {
        if tab != self.tab {
            debug!(tab = tab.title(), "Switching tab");
        }
        self.tab = tab;
        self.section = 0;
        self.scroll = 0;
    }

    fn select_section(&mut self, section: usize) {
        if section != self.section {
            self.scroll = 0;
        }
        self.section = section;
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the header, tab bar, section bar, content and help line.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, tabs_area, sections_area, content_area, footer_area] = Layout::vertical([
            Constraint::Length(Header::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let day = self.data.sources.day.display().to_string();
        let hour = self.data.sources.hour.display().to_string();
        let header = Header::new(&day, &hour, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), header_area);

        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
            .select(self.tab.index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .divider("|");
        frame.render_widget(tabs, tabs_area);

        frame.render_widget(Paragraph::new(self.section_line()), sections_area);

        let theme = &self.theme;
        match self.tab {
            Tab::Overview => {
                overview::render(frame, content_area, &self.data, self.section, self.scroll, theme)
            }
            Tab::Exploratory => eda::render(frame, content_area, &self.data, self.section, theme),
            Tab::Aggregate => rfm::render(frame, content_area, &self.data, self.section, theme),
            Tab::Conclusions => conclusions::render(
                frame,
                content_area,
                &self.data,
                self.section,
                self.scroll,
                theme,
            ),
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "←/→ tab · ↑/↓ section · PgUp/PgDn scroll · r reload · q quit",
                self.theme.dim,
            ))),
            footer_area,
        );
    }

    fn section_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, name) in self.tab.sections().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", self.theme.dim));
            }
            let style = if i == self.section {
                self.theme.section_active
            } else {
                self.theme.section_inactive
            };
            spans.push(Span::styled(*name, style));
        }
        Line::from(spans)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
