use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Clear, Gauge, Paragraph};

use crate::output::day_name;
use crate::scoring::{forecast_peak, ScoreResult, StressInput};
use crate::tui::app::{App, Field, InputMode};
use crate::tui::theme::ThemeColors;

const SLIDER_WIDTH: usize = 20;
// Title + status + panel borders + one row and one spacer per slider
const MIN_HEIGHT: u16 = 4 + 2 * Field::ALL.len() as u16 - 1;
const MIN_WIDTH: u16 = 60;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = ThemeColors::dark();

    // Every slider and its spacer must fit inside the bordered panel
    if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let result = app.result();
    let forecast = app.forecast();

    // Layout: Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Fill(1),   // Sliders | gauge + forecast
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    let body = Layout::horizontal([
        Constraint::Length(48), // Sliders
        Constraint::Fill(1),    // Gauge and forecast
    ])
    .split(chunks[1]);

    let right = Layout::vertical([
        Constraint::Length(3), // Gauge
        Constraint::Fill(1),   // Forecast bars
    ])
    .split(body[1]);

    render_title(frame, chunks[0], app, &theme);
    render_sliders(frame, body[0], app, &theme);
    render_gauge(frame, right[0], &result, &theme);
    render_forecast(frame, right[1], &forecast, app.input.hour, &theme);
    render_status_bar(frame, chunks[2], app, &theme);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::Help => render_help_popup(frame, &theme),
        InputMode::ScoreBreakdown => render_breakdown_popup(frame, &result, &theme),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let title = "Grid Stress";
    let mut spans = vec![Span::styled(title, Style::default().fg(theme.title_color).bold())];

    if let Some(name) = app.preset_name() {
        let preset_text = format!("preset: {}", name);
        let padding_len = (area.width as usize).saturating_sub(title.len() + preset_text.len());
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(preset_text, Style::default().fg(theme.muted)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Text shown next to a slider.
pub fn field_value_text(field: Field, input: &StressInput) -> String {
    match field {
        Field::Temperature => format!("{}°F", input.temperature),
        Field::Humidity => format!("{}%", input.humidity),
        Field::Hour => format!("{:02}:00", input.hour),
        Field::DayOfWeek => day_name(input.day_of_week).to_string(),
        Field::WindSpeed => format!("{} mph", input.wind_speed),
        Field::CloudCover => format!("{}%", input.cloud_cover),
        Field::EvAdoption => input.ev_adoption.to_string(),
    }
}

/// Number of filled slider cells for `field` at its current value.
pub fn slider_fill(field: Field, input: &StressInput, width: usize) -> usize {
    let (min, max, _) = field.range();
    let ratio = ((field.value(input) - min) / (max - min)).clamp(0.0, 1.0);
    (ratio * width as f64).round() as usize
}

fn render_sliders(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let block = Block::bordered().title(" Conditions ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = Field::ALL
        .iter()
        .enumerate()
        .flat_map(|(idx, &field)| {
            let selected = idx == app.selected;
            let filled = slider_fill(field, &app.input, SLIDER_WIDTH);
            let empty = SLIDER_WIDTH.saturating_sub(filled);
            let marker = if selected { "▶ " } else { "  " };
            let fill_color = if selected {
                theme.slider_selected
            } else {
                theme.slider_filled
            };
            let label_style = if selected {
                Style::default().fg(theme.slider_selected).bold()
            } else {
                Style::default().fg(theme.slider_label)
            };

            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.slider_selected)),
                Span::styled(format!("{:<12}", field.label()), label_style),
                Span::styled("━".repeat(filled), Style::default().fg(fill_color)),
                Span::styled("─".repeat(empty), Style::default().fg(theme.bar_empty)),
                Span::raw(format!(" {}", field_value_text(field, &app.input))),
            ]);
            // Blank spacer between sliders
            [line, Line::from("")]
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_gauge(frame: &mut Frame, area: Rect, result: &ScoreResult, theme: &ThemeColors) {
    let color = theme.level_color(result.level);
    let gauge = Gauge::default()
        .block(Block::bordered().title(" Grid stress "))
        .gauge_style(Style::default().fg(color).bg(theme.bar_empty))
        .percent(result.score as u16)
        .label(Span::styled(
            format!("{} {}", result.score, result.level.label()),
            Style::default().fg(Color::White).bold(),
        ));
    frame.render_widget(gauge, area);
}

fn render_forecast(frame: &mut Frame, area: Rect, forecast: &[u8], current_hour: u32, theme: &ThemeColors) {
    let peak = forecast_peak(forecast);
    let title = match peak {
        Some((hour, score)) => format!(" 24-hour forecast (peak {:02}:00, {}) ", hour, score),
        None => " 24-hour forecast ".to_string(),
    };

    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width / forecast.len().max(1) as u16).saturating_sub(1).max(1);

    let bars: Vec<Bar> = forecast
        .iter()
        .enumerate()
        .map(|(hour, &score)| {
            let label_style = if hour as u32 == current_hour {
                Style::default().fg(theme.slider_selected).bold()
            } else {
                Style::default().fg(theme.muted)
            };
            Bar::default()
                .value(score as u64)
                .text_value(score.to_string())
                .label(Line::styled(format!("{}", hour), label_style))
                .style(Style::default().fg(theme.score_color(score)))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::bordered().title(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(100);

    frame.render_widget(chart, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("No ") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints = [
            ("j/k", ":field "),
            ("h/l", ":adjust "),
            ("H/L", ":x5 "),
            ("p", ":preset "),
            ("b", ":breakdown "),
            ("s", ":save "),
            ("?", ":help "),
            ("q", ":quit"),
        ];
        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(50, 15, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("j / Down      ", "Next slider"),
        ("k / Up        ", "Previous slider"),
        ("l / Right     ", "Increase value"),
        ("h / Left      ", "Decrease value"),
        ("L / H         ", "Increase / decrease by 5 steps"),
        ("p             ", "Load next preset"),
        ("b             ", "Show/hide score breakdown"),
        ("s             ", "Save scenario for next launch"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];
    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

fn render_breakdown_popup(frame: &mut Frame, result: &ScoreResult, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(46, 12, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Score Breakdown ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines: Vec<Line> = result
        .breakdown
        .factors
        .iter()
        .map(|c| {
            let mut spans = vec![
                Span::styled(format!("{:<18}", c.factor.label()), Style::default().fg(theme.muted)),
                Span::raw(format!("{:>+7.2}", c.weighted())),
            ];
            if c.weight != 1.0 {
                spans.push(Span::styled(
                    format!("  x{}", c.weight),
                    Style::default().fg(theme.muted),
                ));
            }
            Line::from(spans)
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<18}", "Total"), theme.header_style),
        Span::raw(format!("{:>7.2}", result.breakdown.raw_total)),
        Span::styled(
            format!("  -> {} {}", result.score, result.level.label()),
            Style::default().fg(theme.level_color(result.level)).bold(),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "b / Esc to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
