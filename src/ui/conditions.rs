//! Current-conditions panel rendering
//!
//! Renders a normalized weather snapshot: location header, temperature,
//! condition, and a detail grid (humidity, wind, pressure, visibility).

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::data::weather::icon_url;
use crate::data::WeatherSnapshot;

/// 16-point compass rose, clockwise from north
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Maps a wind direction in degrees to its 16-point compass label
pub fn compass_direction(degrees: u16) -> &'static str {
    let index = (f64::from(degrees) / 22.5).round() as usize % 16;
    COMPASS_POINTS[index]
}

/// Terminal glyph for a provider icon code (e.g. "01d" is clear sky)
pub fn condition_glyph(icon: &str) -> &'static str {
    match icon.get(..2) {
        Some("01") => "\u{2600}",          // ☀ clear
        Some("02") => "\u{26C5}",          // ⛅ few clouds
        Some("03") | Some("04") => "\u{2601}", // ☁ clouds
        Some("09") => "\u{1F326}",         // 🌦 shower rain
        Some("10") => "\u{1F327}",         // 🌧 rain
        Some("11") => "\u{26C8}",          // ⛈ thunderstorm
        Some("13") => "\u{2744}",          // ❄ snow
        Some("50") => "\u{1F32B}",         // 🌫 mist
        _ => "\u{2601}",
    }
}

/// Color for temperature (warmer is redder, cooler is bluer)
fn temperature_color(temp: i32) -> Color {
    if temp >= 30 {
        Color::Red
    } else if temp >= 25 {
        Color::LightRed
    } else if temp >= 20 {
        Color::Yellow
    } else if temp >= 10 {
        Color::Green
    } else if temp >= 0 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

/// Renders the conditions panel for a snapshot
pub fn render_conditions(frame: &mut Frame, snapshot: &WeatherSnapshot, area: Rect) {
    let block = Block::default()
        .title(" Current conditions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // header
            Constraint::Length(4), // detail grid
            Constraint::Min(0),    // footer
        ])
        .split(inner);

    render_header(frame, snapshot, chunks[0]);
    render_details(frame, snapshot, chunks[1]);
    render_footer(frame, snapshot, chunks[2]);
}

fn render_header(frame: &mut Frame, snapshot: &WeatherSnapshot, area: Rect) {
    let location = &snapshot.location;
    let current = &snapshot.current;

    let lines = vec![
        Line::from(vec![
            Span::styled("\u{1F4CD} ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}, {}", location.name, location.country),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(Span::styled(
            format!("{}\u{B0}C", current.temperature),
            Style::default()
                .fg(temperature_color(current.temperature))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(format!("{} ", condition_glyph(&current.icon))),
            Span::styled(
                current.condition.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", current.description),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(Span::styled(
            format!("Feels like {}\u{B0}C", current.feels_like),
            Style::default().fg(Color::Gray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_details(frame: &mut Frame, snapshot: &WeatherSnapshot, area: Rect) {
    let current = &snapshot.current;

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let wind = format!(
        "{} km/h {}",
        current.wind_speed,
        compass_direction(current.wind_direction)
    );

    detail_cell(frame, cells[0], "\u{1F4A7} Humidity", &format!("{}%", current.humidity));
    detail_cell(frame, cells[1], "\u{1F4A8} Wind", &wind);
    detail_cell(frame, cells[2], "\u{1F321} Pressure", &format!("{} hPa", current.pressure));
    detail_cell(frame, cells[3], "\u{1F441} Visibility", &format!("{} km", current.visibility));
}

fn detail_cell(frame: &mut Frame, area: Rect, label: &str, value: &str) {
    let lines = vec![
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_footer(frame: &mut Frame, snapshot: &WeatherSnapshot, area: Rect) {
    let updated = snapshot
        .fetched_at
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();

    let lines = vec![
        Line::from(Span::styled(
            format!("Updated {updated}"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("Icon: {}", icon_url(&snapshot.current.icon)),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CurrentConditions, Location};
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn sample_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            location: Location {
                name: "London".to_string(),
                country: "GB".to_string(),
                lat: 51.5073,
                lon: -0.1276,
            },
            current: CurrentConditions {
                temperature: 18,
                feels_like: 17,
                condition: "Clouds".to_string(),
                description: "scattered clouds".to_string(),
                icon: "03d".to_string(),
                humidity: 72,
                wind_speed: 15,
                wind_direction: 202,
                pressure: 1012,
                visibility: 10,
            },
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_compass_direction_cardinal_points() {
        assert_eq!(compass_direction(0), "N");
        assert_eq!(compass_direction(90), "E");
        assert_eq!(compass_direction(180), "S");
        assert_eq!(compass_direction(270), "W");
        assert_eq!(compass_direction(360), "N");
    }

    #[test]
    fn test_compass_direction_intermediate_points() {
        // round(202 / 22.5) = 9 -> SSW
        assert_eq!(compass_direction(202), "SSW");
        assert_eq!(compass_direction(45), "NE");
        assert_eq!(compass_direction(337), "NNW");
    }

    #[test]
    fn test_compass_direction_rounding_boundaries() {
        // 11 degrees rounds down to N, 12 rounds up to NNE.
        assert_eq!(compass_direction(11), "N");
        assert_eq!(compass_direction(12), "NNE");
        // 349 degrees rounds up past NNW back to N.
        assert_eq!(compass_direction(349), "N");
    }

    #[test]
    fn test_condition_glyph_mapping() {
        assert_eq!(condition_glyph("01d"), "\u{2600}");
        assert_eq!(condition_glyph("01n"), "\u{2600}");
        assert_eq!(condition_glyph("03d"), "\u{2601}");
        assert_eq!(condition_glyph("04n"), "\u{2601}");
        assert_eq!(condition_glyph("10d"), "\u{1F327}");
        assert_eq!(condition_glyph("11d"), "\u{26C8}");
        assert_eq!(condition_glyph("13d"), "\u{2744}");
        assert_eq!(condition_glyph("50d"), "\u{1F32B}");
    }

    #[test]
    fn test_condition_glyph_handles_unknown_codes() {
        assert_eq!(condition_glyph(""), "\u{2601}");
        assert_eq!(condition_glyph("x"), "\u{2601}");
        assert_eq!(condition_glyph("99z"), "\u{2601}");
    }

    #[test]
    fn test_render_conditions_shows_key_fields() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let snapshot = sample_snapshot();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_conditions(frame, &snapshot, area);
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(content.contains("London, GB"));
        assert!(content.contains("18\u{B0}C"));
        assert!(content.contains("scattered clouds"));
        assert!(content.contains("15 km/h SSW"));
        assert!(content.contains("1012 hPa"));
        assert!(content.contains("10 km"));
        assert!(content.contains("openweathermap.org/img/wn/03d@2x.png"));
    }
}
