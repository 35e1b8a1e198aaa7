//! TUI Rendering
//!
//! Stateless: everything drawn comes from [`App`] and the wizard inside it.

mod fields;
mod steps;
mod utils;

use super::app::{App, Screen};
use crate::wizard::{NotificationKind, PromptWizard, WizardStep};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// Main color palette
pub(super) const BRAND_BLUE: Color = Color::Rgb(70, 130, 180);
pub(super) const BRAND_GOLD: Color = Color::Rgb(218, 165, 32);
pub(super) const ACCENT_GOLD: Color = Color::Rgb(184, 134, 11);

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the entire UI
pub fn render(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Auth => render_auth(f, app),
        Screen::Wizard => render_wizard(f, app),
    }
}

fn spinner_frame(app: &App) -> &'static str {
    let tick = (app.started_at.elapsed().as_millis() / 100) as usize;
    SPINNER[tick % SPINNER.len()]
}

/// Box in the middle of the screen, `width` wide and as tall as needed
fn centered_box(area: Rect, width: u16, content_lines: usize) -> Rect {
    let box_width = width.min(area.width.saturating_sub(4));
    let box_height = u16::try_from(content_lines)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height.saturating_sub(2));

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .flex(Flex::Center)
        .constraints([Constraint::Length(box_height)])
        .split(area);
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .flex(Flex::Center)
        .constraints([Constraint::Length(box_width)])
        .split(v_chunks[0]);
    h_chunks[0]
}

/// Pad a line so it sits centered in `inner_width` columns
fn center_line(line: Line<'static>, inner_width: usize) -> Line<'static> {
    let width: usize = line.spans.iter().map(|s| s.content.width()).sum();
    if width == 0 || width >= inner_width {
        return line;
    }
    let mut spans = vec![Span::raw(" ".repeat((inner_width - width) / 2))];
    spans.extend(line.spans);
    Line::from(spans)
}

fn key_hint(key: &str, label: &str, color: Color) -> [Span<'static>; 2] {
    [
        Span::styled(
            format!("[{}] ", key),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{}  ", label), Style::default().fg(Color::White)),
    ]
}

fn render_wizard(f: &mut Frame, app: &App) {
    let wizard = &app.wizard;
    let area = f.area();
    let box_width = 76u16.min(area.width.saturating_sub(4));
    let inner_width = box_width.saturating_sub(2) as usize;
    let spinner = spinner_frame(app);

    let mut lines: Vec<Line<'static>> = Vec::new();

    // Header
    let step = wizard.step;
    let header = vec![
        Line::from(""),
        Line::from(Span::styled(
            render_progress_dots(step),
            Style::default().fg(BRAND_BLUE),
        )),
        Line::from(""),
        Line::from(Span::styled(
            step.title().to_string(),
            Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            step.subtitle().to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    lines.extend(header.into_iter().map(|l| center_line(l, inner_width)));

    render_notification(&mut lines, wizard);

    let focused_line = match step {
        WizardStep::Website => steps::render_website(&mut lines, wizard, spinner, inner_width),
        WizardStep::Collection => {
            steps::render_collection(&mut lines, wizard, spinner, inner_width)
        }
        WizardStep::Compose => steps::render_compose(&mut lines, wizard, spinner, inner_width),
    };

    if let Some(ref err) = app.error_message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  ! {}", err),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::from(""));
    lines.push(center_line(render_footer(step), inner_width));
    lines.push(Line::from(""));

    let wizard_area = centered_box(area, box_width, lines.len());

    // Keep the focused element on screen when the form is taller than the box
    let visible_rows = wizard_area.height.saturating_sub(2) as usize;
    let scroll = if lines.len() > visible_rows && focused_line > visible_rows / 2 {
        (focused_line - visible_rows / 2).min(lines.len() - visible_rows) as u16
    } else {
        0
    };

    let title = format!(
        " Prompt Wizard ({}/{}) ",
        step.number(),
        WizardStep::total()
    );
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BRAND_BLUE))
                .title(Span::styled(
                    title,
                    Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD),
                )),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    let paragraph = if scroll > 0 {
        paragraph.scroll((scroll, 0))
    } else {
        paragraph
    };

    f.render_widget(paragraph, wizard_area);
}

/// Render progress dots (filled for completed, hollow for remaining)
fn render_progress_dots(step: WizardStep) -> String {
    let current = step.number();
    (1..=WizardStep::total())
        .map(|i| if i <= current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_notification(lines: &mut Vec<Line<'static>>, wizard: &PromptWizard) {
    let Some(notification) = wizard.notification.as_ref() else {
        return;
    };
    let (icon, color) = match notification.kind {
        NotificationKind::Success => ("✓", Color::Green),
        NotificationKind::Error => ("✗", Color::Red),
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {} {}", icon, notification.message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  [Ctrl+X]", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));
}

fn render_footer(step: WizardStep) -> Line<'static> {
    let mut footer: Vec<Span<'static>> = Vec::new();
    let back = if step == WizardStep::Website {
        "Quit"
    } else {
        "Back"
    };
    footer.extend(key_hint("Esc", back, Color::Red));
    match step {
        WizardStep::Website | WizardStep::Collection => {
            footer.extend(key_hint("↑↓", "Move", BRAND_BLUE));
            footer.extend(key_hint("Enter", "Select", ACCENT_GOLD));
        }
        WizardStep::Compose => {
            footer.extend(key_hint("Tab", "Next Field", BRAND_BLUE));
            footer.extend(key_hint("Ctrl+S", "Submit", ACCENT_GOLD));
        }
    }
    Line::from(footer)
}

fn render_auth(f: &mut Frame, app: &App) {
    let area = f.area();
    let box_width = 60u16.min(area.width.saturating_sub(4));
    let inner_width = box_width.saturating_sub(2) as usize;

    let mut footer = Vec::new();
    footer.extend(key_hint("Enter", "Connect with Webflow", ACCENT_GOLD));
    footer.extend(key_hint("Esc", "Quit", Color::Red));

    let lines: Vec<Line<'static>> = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Prompt Wizard",
            Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Connect your Webflow account to continue",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            utils::truncate_to_width(&app.auth_url, inner_width.saturating_sub(2)),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(footer),
        Line::from(""),
    ]
    .into_iter()
    .map(|l| center_line(l, inner_width))
    .collect();

    let auth_area = centered_box(area, box_width, lines.len());
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BRAND_BLUE))
            .title(Span::styled(
                " Sign in ",
                Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(paragraph, auth_area);
}
