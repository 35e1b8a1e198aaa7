//! Per-step wizard content.
//! All functions produce Vec<Line<'static>> by using owned strings throughout.

use super::fields::{FieldView, render_error, render_selector, render_text_field};
use super::utils::{truncate_to_width, wrap_text};
use super::{ACCENT_GOLD, BRAND_BLUE, BRAND_GOLD};
use crate::api::Sender;
use crate::wizard::{ChatPanel, ComposeFocus, ComposeForm, Field, PromptWizard};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Chat messages shown when expanded
const CHAT_HISTORY_ROWS: usize = 12;

pub(super) fn render_website(
    lines: &mut Vec<Line<'static>>,
    wizard: &PromptWizard,
    spinner: &str,
    width: usize,
) -> usize {
    render_selector(
        lines,
        &wizard.websites,
        &wizard.form.selected_website,
        true,
        wizard.errors.get(Field::SelectedWebsite),
        spinner,
        width,
    )
}

pub(super) fn render_collection(
    lines: &mut Vec<Line<'static>>,
    wizard: &PromptWizard,
    spinner: &str,
    width: usize,
) -> usize {
    lines.push(Line::from(vec![
        Span::styled("  Website: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            wizard.form.selected_website_name.clone(),
            Style::default().fg(Color::White),
        ),
    ]));
    lines.push(Line::from(""));
    render_selector(
        lines,
        &wizard.collections,
        &wizard.form.selected_collection,
        true,
        wizard.errors.get(Field::SelectedCollection),
        spinner,
        width,
    )
}

pub(super) fn render_compose(
    lines: &mut Vec<Line<'static>>,
    wizard: &PromptWizard,
    spinner: &str,
    width: usize,
) -> usize {
    render_summary(lines, wizard, width);

    let form = wizard.compose_form();
    let mut focused_line = 0;
    for &element in ComposeFocus::order(form) {
        let focused = wizard.compose_focus == element;
        let line = match element {
            ComposeFocus::Chat => match wizard.chat.as_ref() {
                Some(chat) => {
                    let line = render_chat(lines, chat, focused, spinner, width);
                    render_prompt_preview(lines, wizard, width);
                    line
                }
                None => lines.len(),
            },
            ComposeFocus::Model if form == ComposeForm::Assisted => {
                render_model_picker(lines, wizard, focused, spinner, width)
            }
            ComposeFocus::Submit => render_submit(lines, wizard, focused),
            other => match other.field() {
                Some(field) => {
                    let line = render_text_field(
                        lines,
                        FieldView {
                            field,
                            value: wizard.form.get(field),
                            focused,
                            required: is_required(wizard, field),
                            multiline: field == Field::Prompt,
                            error: wizard.errors.get(field),
                        },
                        width,
                    );
                    if field == Field::Prompt && focused {
                        lines.push(Line::from(Span::styled(
                            format!("    [Ctrl+T] Use \"{}\" template", wizard.preset().name),
                            Style::default().fg(Color::DarkGray),
                        )));
                    }
                    line
                }
                None => lines.len(),
            },
        };
        if focused {
            focused_line = line;
        }
        lines.push(Line::from(""));
    }
    focused_line
}

fn is_required(wizard: &PromptWizard, field: Field) -> bool {
    match field {
        Field::Prompt | Field::Model => true,
        Field::Category => wizard.is_blog_collection(),
        _ => false,
    }
}

/// Selected website and collection, boxed
fn render_summary(lines: &mut Vec<Line<'static>>, wizard: &PromptWizard, width: usize) {
    let inner = width.saturating_sub(6).max(10);
    let border = Style::default().fg(Color::DarkGray);
    let row = |label: &str, value: &str| {
        let text = truncate_to_width(&format!("{}: {}", label, value), inner.saturating_sub(2));
        let pad = inner.saturating_sub(2 + unicode_width::UnicodeWidthStr::width(text.as_str()));
        Line::from(vec![
            Span::styled("  │ ", border),
            Span::styled(text, Style::default().fg(Color::White)),
            Span::raw(" ".repeat(pad)),
            Span::styled(" │", border),
        ])
    };

    lines.push(Line::from(Span::styled(
        format!("  ┌{}┐", "─".repeat(inner)),
        border,
    )));
    lines.push(row("Website", &wizard.form.selected_website_name));
    lines.push(row("Collection", &wizard.form.selected_collection_name));
    lines.push(Line::from(Span::styled(
        format!("  └{}┘", "─".repeat(inner)),
        border,
    )));
    lines.push(Line::from(""));
}

fn render_chat(
    lines: &mut Vec<Line<'static>>,
    chat: &ChatPanel,
    focused: bool,
    spinner: &str,
    width: usize,
) -> usize {
    let toggle = if chat.is_minimized() { "expand" } else { "minimize" };
    lines.push(Line::from(vec![
        Span::styled(
            "  Prompt Assistant",
            Style::default()
                .fg(if focused { BRAND_BLUE } else { Color::DarkGray })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  [Ctrl+N] {}", toggle),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    if !chat.is_minimized() {
        let body_width = width.saturating_sub(12);
        let mut rendered: Vec<Line<'static>> = Vec::new();
        for message in chat.messages() {
            let (who, color) = match message.sender {
                Sender::User => ("You", ACCENT_GOLD),
                Sender::Bot => ("Bot", BRAND_BLUE),
            };
            for (i, text) in wrap_text(&message.text, body_width).into_iter().enumerate() {
                let prefix = if i == 0 {
                    format!("    {}: ", who)
                } else {
                    "         ".to_string()
                };
                rendered.push(Line::from(vec![
                    Span::styled(prefix, Style::default().fg(color)),
                    Span::styled(text, Style::default().fg(Color::Gray)),
                ]));
            }
        }
        // Newest at the bottom; older rows scroll off
        let skip = rendered.len().saturating_sub(CHAT_HISTORY_ROWS);
        if skip > 0 {
            lines.push(Line::from(Span::styled(
                "    ...",
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.extend(rendered.into_iter().skip(skip));
        if chat.is_busy() {
            lines.push(Line::from(Span::styled(
                format!("    {} thinking...", spinner),
                Style::default().fg(BRAND_GOLD),
            )));
        }
    }

    let input_line = lines.len();
    let cursor = if focused { "█" } else { "" };
    let input = if chat.input.is_empty() && !focused {
        Span::styled(
            "Describe the content you need...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(
            format!(
                "{}{}",
                truncate_to_width(&chat.input, width.saturating_sub(10)),
                cursor
            ),
            Style::default().fg(Color::White),
        )
    };
    lines.push(Line::from(vec![
        Span::styled("    > ", Style::default().fg(ACCENT_GOLD)),
        input,
    ]));
    if focused && chat.final_prompt().is_some() {
        lines.push(Line::from(Span::styled(
            "    Final prompt ready: [Ctrl+U] use it",
            Style::default().fg(BRAND_GOLD),
        )));
    }
    input_line
}

/// Read-only view of the prompt the chat produced
fn render_prompt_preview(lines: &mut Vec<Line<'static>>, wizard: &PromptWizard, width: usize) {
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Prompt", Style::default().fg(Color::DarkGray)),
        Span::styled(" *", Style::default().fg(Color::Red)),
    ]));
    if wizard.form.prompt.is_empty() {
        lines.push(Line::from(Span::styled(
            "    (chat with the assistant, then [Ctrl+U])",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for text in wrap_text(&wizard.form.prompt, width.saturating_sub(6)) {
            lines.push(Line::from(Span::styled(
                format!("    {}", text),
                Style::default().fg(Color::Gray),
            )));
        }
    }
    render_error(lines, wizard.errors.get(Field::Prompt));
}

fn render_model_picker(
    lines: &mut Vec<Line<'static>>,
    wizard: &PromptWizard,
    focused: bool,
    spinner: &str,
    width: usize,
) -> usize {
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {}", Field::Model.label()),
            Style::default().fg(if focused { BRAND_BLUE } else { Color::DarkGray }),
        ),
        Span::styled(" *", Style::default().fg(Color::Red)),
    ]));
    render_selector(
        lines,
        &wizard.models,
        &wizard.form.model,
        focused,
        wizard.errors.get(Field::Model),
        spinner,
        width,
    )
}

fn render_submit(lines: &mut Vec<Line<'static>>, wizard: &PromptWizard, focused: bool) -> usize {
    let label = if wizard.is_submitting {
        "[ Submitting... ]"
    } else {
        "[ Submit Prompt ]"
    };
    let style = if !wizard.can_submit() {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Black)
            .bg(BRAND_GOLD)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(BRAND_GOLD)
    };
    let line = lines.len();
    lines.push(Line::from(vec![
        Span::styled(if focused { " > " } else { "   " }, Style::default().fg(ACCENT_GOLD)),
        Span::styled(label, style),
    ]));
    line
}
