//! Field and selector rendering
//!
//! Every form input goes through [`render_text_field`]; every list picker
//! through [`render_selector`]. Both show only the validation message the
//! wizard hands them.

use super::utils::{truncate_to_width, wrap_text};
use super::{ACCENT_GOLD, BRAND_BLUE, BRAND_GOLD};
use crate::wizard::{Field, LoadState, Selector, SelectorItem};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Rows of a selector list shown at once
const LIST_WINDOW: usize = 8;

/// How a text field is drawn
pub(super) struct FieldView<'a> {
    pub field: Field,
    pub value: &'a str,
    pub focused: bool,
    pub required: bool,
    pub multiline: bool,
    pub error: Option<&'a str>,
}

/// Label, value (or placeholder), error. Returns the index of the value line.
pub(super) fn render_text_field(
    lines: &mut Vec<Line<'static>>,
    view: FieldView<'_>,
    width: usize,
) -> usize {
    let label_style = Style::default().fg(if view.focused {
        BRAND_BLUE
    } else {
        Color::DarkGray
    });
    let mut label = vec![Span::styled(format!("  {}", view.field.label()), label_style)];
    if view.required {
        label.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    lines.push(Line::from(label));

    let value_line = lines.len();
    let cursor = if view.focused { "█" } else { "" };
    let value_style = Style::default().fg(if view.focused {
        Color::White
    } else {
        Color::Gray
    });

    if view.value.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("    {}", view.field.placeholder()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(cursor.to_string(), value_style),
        ]));
    } else if view.multiline {
        let wrapped = wrap_text(view.value, width.saturating_sub(6));
        let last = wrapped.len().saturating_sub(1);
        for (i, text) in wrapped.into_iter().enumerate() {
            let tail = if i == last { cursor } else { "" };
            lines.push(Line::from(Span::styled(
                format!("    {}{}", text, tail),
                value_style,
            )));
        }
        // Trailing newline: the cursor sits on a fresh line
        if view.value.ends_with('\n') && view.focused {
            lines.push(Line::from(Span::styled(format!("    {}", cursor), value_style)));
        }
    } else {
        let shown = truncate_to_width(view.value, width.saturating_sub(6));
        lines.push(Line::from(Span::styled(
            format!("    {}{}", shown, cursor),
            value_style,
        )));
    }

    render_error(lines, view.error);
    value_line
}

pub(super) fn render_error(lines: &mut Vec<Line<'static>>, error: Option<&str>) {
    if let Some(message) = error {
        lines.push(Line::from(Span::styled(
            format!("    ! {}", message),
            Style::default().fg(Color::Red),
        )));
    }
}

/// Loading indicator, "no results", or a scrolling window of items.
/// Returns the index of the cursor line.
pub(super) fn render_selector<T: SelectorItem + Clone>(
    lines: &mut Vec<Line<'static>>,
    selector: &Selector<T>,
    selected_id: &str,
    focused: bool,
    error: Option<&str>,
    spinner: &str,
    width: usize,
) -> usize {
    if selector.has_filter() {
        let cursor = if focused { "█" } else { "" };
        let filter = selector.filter();
        let shown = if filter.is_empty() && !focused {
            Span::styled("Type to search...", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(format!("{}{}", filter, cursor), Style::default().fg(Color::White))
        };
        lines.push(Line::from(vec![
            Span::styled("  Search: ", Style::default().fg(BRAND_BLUE)),
            shown,
        ]));
        lines.push(Line::from(""));
    }

    let mut cursor_line = lines.len();
    match selector.state() {
        LoadState::Idle | LoadState::Loading => {
            lines.push(Line::from(Span::styled(
                format!("  {} Loading {}...", spinner, selector.kind()),
                Style::default().fg(BRAND_GOLD),
            )));
        }
        LoadState::Loaded(_) => {
            let visible = selector.visible();
            if visible.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", selector.empty_text()),
                    Style::default().fg(Color::DarkGray),
                )));
            } else {
                let start = selector
                    .cursor()
                    .saturating_sub(LIST_WINDOW / 2)
                    .min(visible.len().saturating_sub(LIST_WINDOW));
                let end = (start + LIST_WINDOW).min(visible.len());
                if start > 0 {
                    lines.push(Line::from(Span::styled(
                        format!("     ↑ {} more", start),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                for (i, item) in visible.iter().enumerate().take(end).skip(start) {
                    let highlighted = focused && i == selector.cursor();
                    let selected = item.id() == selected_id;
                    if highlighted {
                        cursor_line = lines.len();
                    }
                    lines.push(Line::from(vec![
                        Span::styled(
                            if highlighted { " > " } else { "   " },
                            Style::default().fg(ACCENT_GOLD),
                        ),
                        Span::styled(
                            if selected { "[*] " } else { "[ ] " },
                            Style::default().fg(if selected {
                                BRAND_GOLD
                            } else {
                                Color::DarkGray
                            }),
                        ),
                        Span::styled(
                            truncate_to_width(&item.label(), width.saturating_sub(10)),
                            Style::default()
                                .fg(if highlighted {
                                    Color::White
                                } else {
                                    Color::Gray
                                })
                                .add_modifier(if highlighted {
                                    Modifier::BOLD
                                } else {
                                    Modifier::empty()
                                }),
                        ),
                    ]));
                }
                if end < visible.len() {
                    lines.push(Line::from(Span::styled(
                        format!("     ↓ {} more", visible.len() - end),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
        }
    }

    render_error(lines, error);
    cursor_line
}
