use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use parentcheck_core::NoticeKind;

use crate::app::{App, ConfirmFocus, Focus};
use crate::toast::Toast;

const TITLE: &str = "Parent Email Checker";
const SUBTITLE: &str = "Lookup a parent by email and (if found) clear their data with confirmation.";
const PLACEHOLDER: &str = "name@example.com";
const TOAST_WIDTH: u16 = 46;
const TOAST_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let found_height = if app.view.parent_id().is_some() { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(found_height),
            Constraint::Min(3),
            Constraint::Length(5),
        ])
        .split(size);

    render_header(frame, chunks[0]);
    render_form(frame, chunks[1], app);
    if found_height > 0 {
        render_found(frame, chunks[2], app);
    }
    render_inspector(frame, chunks[3], app);
    render_footer(frame, chunks[4], app);

    if app.view.gate().is_visible() {
        render_confirm(frame, size, app);
    }
    if app.show_help {
        render_help(frame, size);
    }
    render_toasts(frame, size, app);
}

fn render_header(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::DarkGray))),
    ];
    let block = Block::default().borders(Borders::ALL).title("parentcheck");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(18)])
        .split(area);

    let busy = app.view.is_busy();
    let email_focused = app.focus == Focus::Email && !app.view.gate().is_visible();
    let value = if app.view.email().is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else if busy {
        Span::styled(app.view.email().to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.view.email().to_string())
    };
    let field = Paragraph::new(Line::from(value)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Parent email")
            .border_style(focus_border(email_focused)),
    );
    frame.render_widget(field, chunks[0]);

    if email_focused && !busy && !app.show_help {
        let width = app.view.email().chars().count() as u16;
        let max_x = chunks[0].right().saturating_sub(2);
        let x = (chunks[0].x + 1 + width).min(max_x);
        frame.set_cursor_position((x, chunks[0].y + 1));
    }

    let label = if busy { "Checking..." } else { "Check" };
    let check = Paragraph::new(button(label, app.focus == Focus::Check, busy, Color::Blue))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(check, chunks[1]);
}

fn render_found(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let Some(parent_id) = app.view.parent_id() else {
        return;
    };
    let busy = app.view.is_busy();
    let label = if busy { "Clearing..." } else { "Clear Data" };
    let lines = vec![
        Line::from(Span::styled(
            "✅ Parent found",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("parentId: {}", parent_id),
            Style::default().fg(Color::Green),
        )),
        button(label, app.focus == Focus::ClearData, busy, Color::Red),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title("Result");
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_inspector(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let Some(pretty) = app.view.raw_pretty() else {
        return;
    };
    let focused = app.focus == Focus::Inspector;
    if !app.view.is_inspector_open() {
        let summary = Paragraph::new("▸ Response JSON").block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(focused)),
        );
        let height = area.height.min(3);
        frame.render_widget(summary, Rect { height, ..area });
        return;
    }

    let body = Paragraph::new(Text::from(pretty))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("▾ Response JSON")
                .border_style(focus_border(focused)),
        )
        .scroll((app.inspector_scroll, 0));
    frame.render_widget(body, area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = if app.view.gate().is_visible() {
        "y confirm  n/esc cancel  tab switch  click outside to close"
    } else {
        match app.focus {
            Focus::Email => "enter check  tab next  ctrl+u clear  ctrl+x dismiss  F1 help  ctrl+c quit",
            Focus::Inspector => "enter toggle  j/k scroll  tab next  F1 help  q quit",
            _ => "enter activate  tab next  ctrl+x dismiss  F1 help  q quit",
        }
    };
    let lines = vec![
        Line::from(vec![
            Span::raw("Using endpoint: "),
            Span::styled(
                app.endpoints.lookup.to_string(),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(vec![
            Span::raw("Clear endpoint: "),
            Span::styled(
                app.endpoints.clear.to_string(),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let Some(parent_id) = app.view.gate().target() else {
        return;
    };
    let modal = confirm_rect(area);
    frame.render_widget(Clear, modal);

    let busy = app.view.is_busy();
    let confirm_label = if busy { "Working..." } else { "Yes, clear it" };
    let lines = vec![
        Line::from("This action is irreversible. The following parent will be affected:"),
        Line::from(""),
        Line::from(Span::styled(
            format!("parent-id: {}", parent_id),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            button_span(
                "Cancel",
                app.confirm_focus == ConfirmFocus::Cancel,
                busy,
                Color::Gray,
            ),
            Span::raw("  "),
            button_span(
                confirm_label,
                app.confirm_focus == ConfirmFocus::Confirm,
                busy,
                Color::Red,
            ),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            "⚠ Clear parent & child data?",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        modal,
    );
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let modal = centered_rect(70, 60, area);
    frame.render_widget(Clear, modal);

    let text = vec![
        Line::from("Global: ctrl+c quit, F1 help, ctrl+x dismiss newest notification, tab/shift+tab move focus"),
        Line::from("Email: type to edit, enter check, ctrl+u clear, ctrl+w delete word"),
        Line::from("Buttons: enter or space activate, q quit"),
        Line::from("Result: d or enter opens the clear confirmation"),
        Line::from("Response JSON: enter toggle, j/k or pgup/pgdn scroll"),
        Line::from("Confirm: y confirm, n/esc cancel, tab switch button, click outside to close"),
        Line::from("Notifications: click one to dismiss it"),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn render_toasts(frame: &mut Frame<'_>, area: Rect, app: &App) {
    if app.toasts.is_empty() {
        return;
    }
    for (index, toast) in app.toasts.visible().enumerate() {
        let rect = toast_rect(area, index);
        if rect.height == 0 || rect.width == 0 {
            break;
        }
        frame.render_widget(Clear, rect);
        frame.render_widget(toast_widget(toast), rect);
    }
}

fn toast_widget(toast: &Toast) -> Paragraph<'_> {
    let color = match toast.kind {
        NoticeKind::Success => Color::Green,
        NoticeKind::Error => Color::Red,
    };
    Paragraph::new(toast.message.as_str())
        .style(Style::default().fg(Color::White).bg(color))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true })
}

/// Stack position of the `index`-th visible toast, newest at the top right.
pub fn toast_rect(area: Rect, index: usize) -> Rect {
    let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
    let x = area.right().saturating_sub(width + 1);
    let offset = (index as u16).saturating_mul(TOAST_HEIGHT);
    let y = area.y.saturating_add(1).saturating_add(offset);
    let height = TOAST_HEIGHT.min(area.bottom().saturating_sub(y));
    Rect {
        x,
        y,
        width,
        height,
    }
}

pub fn confirm_rect(area: Rect) -> Rect {
    centered_rect(60, 40, area)
}

fn button(label: &str, focused: bool, disabled: bool, color: Color) -> Line<'static> {
    Line::from(button_span(label, focused, disabled, color))
}

fn button_span(label: &str, focused: bool, disabled: bool, color: Color) -> Span<'static> {
    let style = if disabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    Span::styled(format!("[{}]", label), style)
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
