use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Position,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::{AppState, PresentationMode};
use crate::theme::{KeyChord, Theme, theme};

use super::view::{OverlayView, ViewItem, project};

/// Widest the overlay panel ever gets.
const MAX_WIDTH: u16 = 88;
/// Tallest the overlay panel ever gets.
const MAX_HEIGHT: u16 = 24;

/// What: Draw the page background and, when open, the search overlay.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: Application state; hit-test rects are refreshed as a side effect
///
/// Output: None.
///
/// Details:
/// - `overlay_rect` and `item_rows` are rewritten every frame so pointer
///   events always hit-test against what is actually on screen.
pub fn render_overlay(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    app.item_rows.clear();
    if !app.is_open {
        app.overlay_rect = None;
        render_closed_hint(f, app, &th, area);
        return;
    }

    let rect = centered(area);
    app.overlay_rect = Some((rect.x, rect.y, rect.width, rect.height));
    f.render_widget(Clear, rect);
    let block = Block::default()
        .title(Span::styled(
            format!(" Search {} ", app.site_name),
            Style::default().fg(th.heading).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.border))
        .style(Style::default().bg(th.surface));
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let view = project(app);

    // Input line with the terminal cursor after the query.
    let prompt = "> ";
    let input = Line::from(vec![
        Span::styled(prompt, Style::default().fg(th.accent)),
        Span::styled(view.query.clone(), Style::default().fg(th.text)),
    ]);
    f.render_widget(Paragraph::new(input), chunks[0]);
    let cursor_x = chunks[0]
        .x
        .saturating_add(u16::try_from(prompt.width() + view.query.width()).unwrap_or(u16::MAX))
        .min(chunks[0].right().saturating_sub(1));
    f.set_cursor_position(Position::new(cursor_x, chunks[0].y));

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "─".repeat(usize::from(chunks[1].width)),
            Style::default().fg(th.border),
        ))),
        chunks[1],
    );

    render_list(f, app, &view, &th, chunks[2]);
    render_status(f, app, &th, chunks[3]);
}

/// Hint shown on the page while the overlay is closed.
fn render_closed_hint(f: &mut Frame, app: &AppState, th: &Theme, area: Rect) {
    let keys: Vec<String> = app.keymap.open.iter().map(KeyChord::label).collect();
    let line = Line::from(vec![
        Span::styled(
            format!("{} docs", app.site_name),
            Style::default().fg(th.heading).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  press {} to search", keys.join(" or ")),
            Style::default().fg(th.subtext),
        ),
    ]);
    let row = Rect {
        x: area.x.saturating_add(2),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(4),
        height: area.height.min(1),
    };
    f.render_widget(Paragraph::new(line), row);
}

/// Panel rect centered horizontally, a little below the top edge.
fn centered(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(MAX_WIDTH);
    let height = area.height.saturating_sub(2).min(MAX_HEIGHT);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height).min(2),
        width,
        height,
    }
}

/// Draw section headings and items, scrolled so the selection stays visible.
fn render_list(f: &mut Frame, app: &mut AppState, view: &OverlayView, th: &Theme, area: Rect) {
    let width = usize::from(area.width);
    let mut lines: Vec<Line<'static>> = Vec::new();
    // (line number, flattened index) of every selectable row
    let mut selectable: Vec<(usize, usize)> = Vec::new();
    let mut selected_line = None;

    if let Some(notice) = &view.notice {
        lines.push(Line::from(Span::styled(
            format!("{notice} for \"{}\"", view.query.trim()),
            Style::default().fg(th.warning),
        )));
        lines.push(Line::from(Span::styled(
            "Try one of these instead:",
            Style::default().fg(th.subtext),
        )));
    }

    let mut last_group: Option<&str> = None;
    for section in &view.sections {
        if last_group != Some(section.group.as_str()) {
            lines.push(Line::from(Span::styled(
                truncate(&section.group.to_uppercase(), width),
                Style::default().fg(th.heading).add_modifier(Modifier::BOLD),
            )));
            last_group = Some(section.group.as_str());
        }
        lines.push(Line::from(Span::styled(
            truncate(&format!("  {}", section.category), width),
            Style::default().fg(th.subtext),
        )));
        for item in &section.items {
            if let Some(idx) = item.index {
                selectable.push((lines.len(), idx));
            }
            if item.selected {
                selected_line = Some(lines.len());
            }
            lines.push(item_line(item, th, width));
        }
    }

    let height = usize::from(area.height);
    let offset = match selected_line {
        Some(sel) if sel >= height => sel + 1 - height,
        _ => 0,
    };
    let visible: Vec<Line<'static>> = lines.into_iter().skip(offset).take(height).collect();
    for (line_no, idx) in selectable {
        if line_no >= offset && line_no < offset + height {
            let row = area.y + u16::try_from(line_no - offset).unwrap_or(0);
            app.item_rows.push((row, idx));
        }
    }
    f.render_widget(Paragraph::new(visible), area);
}

/// One result row: selection marker, kind badge, title, extra, description.
fn item_line(item: &ViewItem, th: &Theme, width: usize) -> Line<'static> {
    let (marker, title_style) = if item.selected {
        (
            "▌ ",
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
        )
    } else if item.index.is_none() {
        ("  ", Style::default().fg(th.subtext))
    } else {
        ("  ", Style::default().fg(th.text))
    };
    let badge = format!("{:<5}", item.kind.label());
    let mut title = item.title.clone();
    if let Some(sub) = &item.subtitle {
        title = format!("{sub} › {title}");
    }
    let mut used = 2 + 2 + badge.width();
    let title = truncate(&title, width.saturating_sub(used));
    used += title.width();
    let mut spans = vec![
        Span::styled(format!("  {marker}"), Style::default().fg(th.accent)),
        Span::styled(badge, Style::default().fg(th.border)),
        Span::styled(title, title_style),
    ];
    if let Some(extra) = &item.extra {
        let extra = truncate(&format!("  {extra}"), width.saturating_sub(used));
        used += extra.width();
        spans.push(Span::styled(extra, Style::default().fg(th.heading)));
    }
    if !item.description.is_empty() {
        let desc = truncate(
            &format!("  {}", item.description),
            width.saturating_sub(used),
        );
        spans.push(Span::styled(desc, Style::default().fg(th.subtext)));
    }
    Line::from(spans)
}

/// Status word for the mode; "searching" until the current query is answered.
fn status_label(app: &AppState) -> &'static str {
    match app.mode() {
        _ if app.dispatcher.is_awaiting() => "searching",
        PresentationMode::Suggesting => "suggestions",
        PresentationMode::Showing => "results",
        PresentationMode::Empty => "no results",
    }
}

/// Bottom line: mode, last diagnostics note, key hints.
fn render_status(f: &mut Frame, app: &AppState, th: &Theme, area: Rect) {
    let mode = status_label(app);
    let hints = "↑↓ move  Enter open  Esc close";
    let mut spans = vec![Span::styled(
        format!("[{mode}]"),
        Style::default().fg(th.subtext),
    )];
    let room = usize::from(area.width).saturating_sub(mode.width() + 2 + hints.width() + 2);
    if let Some(note) = &app.status_note {
        let note = truncate(&format!(" {note}"), room);
        spans.push(Span::styled(
            note,
            Style::default().fg(th.error).add_modifier(Modifier::DIM),
        ));
    }
    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    let pad = usize::from(area.width).saturating_sub(used + hints.width());
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(hints, Style::default().fg(th.border)));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Cut `s` to at most `max` display columns, ending with `…` when shortened.
fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
