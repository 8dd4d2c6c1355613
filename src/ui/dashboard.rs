//! Dashboard screen rendering
//!
//! Renders the search bar, the current-conditions panel and the forecast
//! strip for the active query, plus the loading and error screens.

use chrono::{Local, NaiveDate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppState};
use crate::data::{CurrentWeather, ForecastDay};
use crate::ui::theme::{self, Theme};

/// Renders the whole UI for the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search bar
            Constraint::Min(0),    // main content
            Constraint::Length(1), // key hints
        ])
        .split(area);

    // Condition-themed page background, defaulting to the Clear theme
    // while no data is on screen.
    let current_theme = app
        .current
        .as_ref()
        .map(|c| theme::palette(c.condition))
        .unwrap_or_else(|| theme::palette(crate::data::ConditionCategory::Clear));

    if app.state == AppState::Ready {
        frame.render_widget(
            Block::default().style(Style::default().bg(current_theme.background)),
            area,
        );
    }

    render_search_bar(frame, app, chunks[0], current_theme);

    match &app.state {
        AppState::Loading => render_loading(frame, app, chunks[1]),
        AppState::Ready => render_weather(frame, app, chunks[1], current_theme),
        AppState::Error(message) => render_error(frame, message, chunks[1]),
    }

    render_key_hints(frame, app, chunks[2]);
}

/// Search input with the active unit mode in the title
fn render_search_bar(frame: &mut Frame, app: &App, area: Rect, current_theme: Theme) {
    let title = format!(" Search city ({}) ", app.query.unit.temp_symbol());
    let input = Paragraph::new(format!("{}\u{2588}", app.input)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(current_theme.accent)),
    );
    frame.render_widget(input, area);
}

/// Centered loading message naming the in-flight city
fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new(format!("Fetching weather for {}...", app.query.city))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Centered error message with the generic remediation text
fn render_error(frame: &mut Frame, message: &str, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(4),
            Constraint::Percentage(40),
        ])
        .split(area);

    let error_text = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true });

    frame.render_widget(error_text, chunks[1]);
}

/// Current conditions panel plus the forecast strip
fn render_weather(frame: &mut Frame, app: &App, area: Rect, current_theme: Theme) {
    let Some(current) = &app.current else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // current conditions
            Constraint::Min(6),     // forecast strip
        ])
        .split(area);

    render_current(frame, current, chunks[0], current_theme);
    render_forecast(frame, app, chunks[1], current_theme);
}

/// The big current-conditions panel
fn render_current(frame: &mut Frame, current: &CurrentWeather, area: Rect, current_theme: Theme) {
    let temp_symbol = current.unit.temp_symbol();
    let wind_symbol = current.unit.wind_symbol();

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} {}{}", theme::icon(current.condition), current.temperature, temp_symbol),
                Style::default()
                    .fg(current_theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                current.description.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            current.location_label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            current_date_label(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("Feels like {}{}", current.feels_like, temp_symbol)),
            Span::raw("   "),
            Span::raw(format!("Humidity {}%", current.humidity)),
            Span::raw("   "),
            Span::raw(format!("Wind {} {}", current.wind_speed, wind_symbol)),
            Span::raw("   "),
            Span::raw(format!("Pressure {} hPa", current.pressure_hpa)),
        ]),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Current conditions ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(current_theme.accent)),
    );

    frame.render_widget(panel, area);
}

/// Equal-width day cards, one per forecast entry; nothing is rendered when
/// the forecast is empty.
fn render_forecast(frame: &mut Frame, app: &App, area: Rect, current_theme: Theme) {
    let days = &app.forecast;
    if days.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = days
        .iter()
        .map(|_| Constraint::Ratio(1, days.len() as u32))
        .collect();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let temp_symbol = app.query.unit.temp_symbol();

    for (index, (day, column)) in days.iter().zip(columns.iter()).enumerate() {
        render_day_card(frame, day, index, *column, temp_symbol, current_theme);
    }
}

/// One forecast day card
fn render_day_card(
    frame: &mut Frame,
    day: &ForecastDay,
    index: usize,
    area: Rect,
    temp_symbol: &str,
    current_theme: Theme,
) {
    let lines = vec![
        Line::from(Span::raw(theme::icon(day.condition))),
        Line::from(vec![
            Span::styled(
                format!("{}{}", day.high_temp, temp_symbol),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" / "),
            Span::styled(
                format!("{}{}", day.low_temp, temp_symbol),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            day.description.clone(),
            Style::default().fg(Color::Gray),
        )),
    ];

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!(" {} ", day_label(index, day.date)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(current_theme.accent)),
        );

    frame.render_widget(card, area);
}

/// Key hints footer
fn render_key_hints(frame: &mut Frame, app: &App, area: Rect) {
    let other_unit = app.query.unit.toggled().temp_symbol();
    let hints = Paragraph::new(format!(
        "Enter: search   Tab: switch to {other_unit}   Esc: quit"
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, area);
}

/// Forecast day label: "Today", "Tomorrow", then the short weekday name
pub fn day_label(index: usize, date: NaiveDate) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a").to_string(),
    }
}

/// Long-form date line for the current conditions panel
fn current_date_label() -> String {
    Local::now().format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_label_today_and_tomorrow() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        assert_eq!(day_label(0, date), "Today");
        assert_eq!(day_label(1, date), "Tomorrow");
    }

    #[test]
    fn test_day_label_weekday_beyond_tomorrow() {
        // 2024-07-15 was a Monday.
        let monday = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        assert_eq!(day_label(2, monday), "Mon");
        assert_eq!(
            day_label(4, NaiveDate::from_ymd_opt(2024, 7, 19).unwrap()),
            "Fri"
        );
    }
}
