//! Interactive chart viewer
//!
//! Draws a [`Figure`] as a braille line chart in the terminal and blocks
//! until the user dismisses it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, warn};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use crate::app::tui::{Tui, MIN_HEIGHT, MIN_WIDTH};
use crate::models::{Figure, Rgb};
use crate::util::units::{format_axis_value, format_micros, ticks};
use crate::{BmkError, Result};

const TICK_COUNT: usize = 5;

/// What a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    /// Dismiss the chart (q, Q, Esc, Enter, Ctrl+C)
    Close,
    /// No action
    None,
}

impl ViewerAction {
    /// Convert keyboard event to a viewer action
    pub fn from_key(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => ViewerAction::Close,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ViewerAction::Close
            }
            KeyCode::Esc | KeyCode::Enter => ViewerAction::Close,
            _ => ViewerAction::None,
        }
    }
}

/// Screen component that lays out the chart and the help line
#[derive(Debug, Clone)]
pub struct ChartScreen {
    figure: Figure,
}

impl ChartScreen {
    pub fn new(figure: Figure) -> Self {
        Self { figure }
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Render the whole screen
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Chart
                Constraint::Length(1), // Help text
            ])
            .split(f.size());

        self.render_chart(f, chunks[0]);
        self.render_help(f, chunks[1]);
    }

    fn render_chart(&self, f: &mut Frame, area: Rect) {
        let subplot = &self.figure.subplot;
        let block = Block::default()
            .title(Span::styled(
                self.figure.title.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);

        let Some((x_min, x_max, y_min, y_max)) = subplot.bounds() else {
            let empty = Paragraph::new("No data points")
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(empty, area);
            return;
        };

        let datasets = subplot
            .series
            .iter()
            .map(|series| {
                let Rgb(r, g, b) = series.color;
                Dataset::default()
                    .name(series.label.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Color::Rgb(r, g, b)))
                    .data(&series.points)
            })
            .collect::<Vec<_>>();

        let x_labels = ticks(x_min, x_max, TICK_COUNT)
            .into_iter()
            .map(|v| Span::raw(format_axis_value(v)))
            .collect();
        let y_labels = ticks(y_min, y_max, TICK_COUNT)
            .into_iter()
            .map(|v| Span::raw(format_micros(v)))
            .collect();

        let mut chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title(subplot.x_label.clone())
                    .style(Style::default().fg(Color::Gray))
                    .bounds([x_min, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(subplot.y_label.clone())
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            );

        chart = if subplot.legend {
            chart
                .legend_position(Some(LegendPosition::TopLeft))
                .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
        } else {
            chart.legend_position(None)
        };

        f.render_widget(chart, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help = Paragraph::new("q / Esc / Enter: close")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(help, area);
    }
}

fn terminal_error(err: std::io::Error) -> BmkError {
    BmkError::TerminalError(err.to_string())
}

/// Blocking terminal viewer for one figure
pub struct Viewer {
    tui: Tui,
    screen: ChartScreen,
}

impl Viewer {
    /// Attach to the current terminal without changing its mode yet
    pub fn new(figure: Figure) -> Result<Self> {
        Ok(Self {
            tui: Tui::new().map_err(terminal_error)?,
            screen: ChartScreen::new(figure),
        })
    }

    /// Show the chart until dismissed, then restore the terminal
    pub fn run(mut self) -> Result<()> {
        if !self.tui.is_size_adequate().map_err(terminal_error)? {
            warn!(
                "Terminal is smaller than {}x{}, the chart may be unreadable",
                MIN_WIDTH, MIN_HEIGHT
            );
        }

        self.tui.init().map_err(terminal_error)?;
        debug!("Viewer opened for '{}'", self.screen.figure().title);

        let outcome = self.event_loop();
        self.tui.restore().map_err(terminal_error)?;
        outcome
    }

    fn event_loop(&mut self) -> Result<()> {
        while !self.tui.should_quit() {
            let screen = &self.screen;
            self.tui.draw(|f| screen.render(f)).map_err(terminal_error)?;

            if let Some(key) = self.tui.next_key().map_err(terminal_error)? {
                if ViewerAction::from_key(key) == ViewerAction::Close {
                    self.tui.quit();
                }
            }
        }
        Ok(())
    }
}
