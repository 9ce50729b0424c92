//! UI rendering

use super::app::{App, Mode};
use super::help::{get_about_help, get_help_text};
use super::keymap::{STATUS_HINT, hint_for};
use deskcalc_core::{FormattedOutput, Snapshot, Theme};
use deskcalc_engine::engine::{Key, Operator, ascii_rows, render};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
const LEGEND_CELL_WIDTH: usize = 13;

/// Button layout of the key legend, top to bottom.
const LEGEND: &[&[Key]] = &[
    &[
        Key::MemoryClear,
        Key::MemoryRecall,
        Key::MemorySubtract,
        Key::MemoryAdd,
        Key::GrandTotalRecall,
    ],
    &[
        Key::AllClear,
        Key::Clear,
        Key::Backspace,
        Key::SignToggle,
        Key::SquareRoot,
    ],
    &[
        Key::Digit(7),
        Key::Digit(8),
        Key::Digit(9),
        Key::Operator(Operator::Div),
        Key::Percent,
    ],
    &[
        Key::Digit(4),
        Key::Digit(5),
        Key::Digit(6),
        Key::Operator(Operator::Mul),
        Key::TaxSubtract,
    ],
    &[
        Key::Digit(1),
        Key::Digit(2),
        Key::Digit(3),
        Key::Operator(Operator::Sub),
        Key::TaxAdd,
    ],
    &[
        Key::Digit(0),
        Key::Decimal,
        Key::Equals,
        Key::Operator(Operator::Add),
    ],
];

/// Colors of the calculator face.
struct Palette {
    lcd_fg: Color,
    lcd_bg: Color,
    border: Color,
    button: Color,
    function: Color,
    hint: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            lcd_fg: Color::Black,
            lcd_bg: Color::Rgb(196, 207, 161),
            border: Color::Gray,
            button: Color::White,
            function: Color::Cyan,
            hint: Color::DarkGray,
        },
        Theme::Dark => Palette {
            lcd_fg: Color::LightGreen,
            lcd_bg: Color::Black,
            border: Color::DarkGray,
            button: Color::Gray,
            function: Color::Yellow,
            hint: Color::DarkGray,
        },
    }
}

/// Rows needed inside the display border for the given output.
fn display_rows(output: &FormattedOutput) -> u16 {
    match output {
        FormattedOutput::Cells(_) => 4,
        FormattedOutput::Text(_) => 2,
    }
}

pub(crate) fn split_main_chunks(area: Rect, display_height: u16) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(display_height + 2),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

pub fn draw(f: &mut Frame, app: &App) {
    let output = app.session.display();
    let [display_area, legend_area, status_area] =
        split_main_chunks(f.area(), display_rows(&output));
    let colors = palette(app.session.settings().theme);

    draw_display(f, app, &output, &colors, display_area);
    draw_legend(f, &colors, legend_area);
    draw_status_bar(f, app, status_area);

    if app.help_modal {
        draw_help_modal(f, app);
    }
}

/// Indicator labels lit for a snapshot, in display order.
pub(crate) fn indicators(snapshot: &Snapshot) -> Vec<String> {
    let mut lit = Vec::new();
    if snapshot.memory != 0.0 {
        lit.push("M".to_string());
    }
    if snapshot.grand_total != 0.0 {
        lit.push("GT".to_string());
    }
    if snapshot.is_error {
        lit.push("E".to_string());
    }
    if let Some(op) = snapshot.pending_operator {
        lit.push(op.symbol().to_string());
    }
    lit
}

/// Display lines for the output, without styling.
pub(crate) fn display_lines(output: &FormattedOutput) -> Vec<String> {
    match output {
        FormattedOutput::Cells(cells) => ascii_rows(&render(cells)).into_iter().collect(),
        FormattedOutput::Text(text) => vec![text.clone()],
    }
}

fn draw_display(
    f: &mut Frame,
    app: &App,
    output: &FormattedOutput,
    colors: &Palette,
    area: Rect,
) {
    let snapshot = app.session.snapshot();
    let lcd = Style::default().fg(colors.lcd_fg).bg(colors.lcd_bg);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Deskcalc ")
        .border_style(Style::default().fg(colors.border))
        .style(lcd);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }
    let [indicator_area, digits_area] = {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        [chunks[0], chunks[1]]
    };

    let indicator_style = lcd.add_modifier(Modifier::BOLD);
    let lit = indicators(&snapshot).join(" ");
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(lit, indicator_style))),
        indicator_area,
    );
    let tax = format!("TAX {}%", app.session.settings().tax_rate);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(tax, lcd.add_modifier(Modifier::DIM))))
            .alignment(Alignment::Right),
        indicator_area,
    );

    let digit_style = if snapshot.is_error {
        lcd.fg(Color::Red)
    } else {
        lcd
    };
    let lines: Vec<Line> = display_lines(output)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, digit_style)))
        .collect();
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Right),
        digits_area,
    );
}

fn draw_legend(f: &mut Frame, colors: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Keys ")
        .border_style(Style::default().fg(colors.border));

    let mut lines: Vec<Line> = Vec::new();
    for row in LEGEND {
        let mut spans: Vec<Span> = Vec::new();
        for key in row.iter() {
            let label = key.label();
            let hint = hint_for(*key)
                .map(|hint| format!(" {}", hint))
                .unwrap_or_default();
            let style = match key {
                Key::Digit(_) | Key::Decimal => Style::default().fg(colors.button),
                _ => Style::default().fg(colors.function),
            };
            let used = label.chars().count() + hint.chars().count();
            let pad = " ".repeat(LEGEND_CELL_WIDTH.saturating_sub(used));
            spans.push(Span::styled(label, style.add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(hint, Style::default().fg(colors.hint)));
            spans.push(Span::raw(pad));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    if app.mode == Mode::TaxPrompt {
        let prefix = "Tax rate (%): ";
        let line = Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::Yellow)),
            Span::raw(app.prompt_buffer.as_str()),
        ]);
        f.render_widget(Paragraph::new(line), area);

        let before_cursor = app.prompt_buffer[..app.prompt_cursor].chars().count();
        let x = area.x + (prefix.len() + before_cursor) as u16;
        f.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
        return;
    }

    let status = if !app.status_message.is_empty() {
        app.status_message.clone()
    } else {
        STATUS_HINT.to_string()
    };

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else if !app.status_message.is_empty() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let paragraph = Paragraph::new(Line::from(vec![Span::styled(status, style)]));
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn help_modal_area(area: Rect) -> Rect {
    centered_rect(80, 85, area)
}

/// Rows of help text visible at once in a frame of size `area`.
pub fn help_viewport_height(area: Rect) -> usize {
    help_modal_area(area).height.saturating_sub(2) as usize
}

fn draw_help_modal(f: &mut Frame, app: &App) {
    let area = help_modal_area(f.area());

    let modal_style = Style::default().fg(Color::White).bg(Color::Black);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Green))
        .style(modal_style);

    let mut lines: Vec<Line> = Vec::new();
    for text in get_about_help() {
        let style = if text == "About Deskcalc" {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    lines.push(Line::from(""));

    for text in get_help_text() {
        let style = if text.starts_with("  ") || text.is_empty() {
            Style::default().fg(Color::White)
        } else {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let viewport_height = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(viewport_height);
    let effective_scroll = app.help_scroll.min(max_scroll);
    let scroll_y = u16::try_from(effective_scroll).unwrap_or(u16::MAX);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(modal_style)
        .scroll((scroll_y, 0))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
