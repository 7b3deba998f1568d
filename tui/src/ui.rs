//! Rendering. Pure function of `App` state plus the current time.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};
use todo_core::{time, Filter, Level, Palette, Rgb, Todo};

use crate::app::{App, Focus};

const TOAST_WIDTH: u16 = 44;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Success => Color::Green,
        Level::Warning => Color::Yellow,
        Level::Error => Color::Red,
    }
}

fn focus_style(focused: bool, palette: &Palette) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color(palette.muted))
    }
}

pub fn render(frame: &mut Frame<'_>, app: &mut App, now: DateTime<Utc>) {
    let palette = app.manager.theme().palette();
    let base = Style::default()
        .fg(color(palette.foreground))
        .bg(color(palette.background));
    let area = frame.area();
    frame.render_widget(Block::default().style(base), area);

    let banner_height = u16::from(app.manager.list_error().is_some());
    let [header, title, description, submit, tabs, banner, list, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(banner_height),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, app, header);
    render_input(frame, app, Focus::Title, title, palette);
    render_input(frame, app, Focus::Description, description, palette);
    render_submit(frame, app, submit, palette);
    render_tabs(frame, app, tabs, palette);
    if let Some(err) = app.manager.list_error() {
        let text = format!("Could not load todos: {err}. Press r to retry.");
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::Red)),
            banner,
        );
    }
    render_list(frame, app, list, palette, now);
    render_help(frame, app, help, palette);
    render_notifications(frame, app, area, base);
}

fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let toggle = format!("[t] {}", app.manager.theme().toggle_label());
    let toggle_width = u16::try_from(toggle.chars().count()).unwrap_or(u16::MAX);
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(toggle_width)]).areas(area);

    let heading = Paragraph::new(Span::styled(
        app.manager.form().heading(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(heading, left);
    frame.render_widget(Paragraph::new(toggle), right);
}

fn render_input(frame: &mut Frame<'_>, app: &App, which: Focus, area: Rect, palette: &Palette) {
    let form = app.manager.form();
    let (label, value) = match which {
        Focus::Title => ("Title", form.title.as_str()),
        _ => ("Description", form.description.as_str()),
    };
    let focused = app.focus == which;
    let block = Block::bordered()
        .title(label)
        .border_style(focus_style(focused, palette));

    let text = if value.is_empty() {
        Line::styled(label, Style::default().fg(color(palette.muted)))
    } else {
        Line::raw(value)
    };
    frame.render_widget(Paragraph::new(text).block(block), area);

    if focused {
        let inner_width = area.width.saturating_sub(2);
        let typed = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
        let x = area.x + 1 + typed.min(inner_width.saturating_sub(1));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_submit(frame: &mut Frame<'_>, app: &App, area: Rect, palette: &Palette) {
    let busy = app.manager.is_busy();
    let button = if busy {
        Style::default().fg(color(palette.muted))
    } else {
        Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    };
    let mut spans = vec![
        Span::styled(format!(" {} ", app.manager.submit_label()), button),
        Span::styled("  Enter to submit", Style::default().fg(color(palette.muted))),
    ];
    if app.manager.form().editing().is_some() {
        spans.push(Span::styled(
            " · Esc to cancel edit",
            Style::default().fg(color(palette.muted)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame<'_>, app: &App, area: Rect, palette: &Palette) {
    let selected = Filter::ALL
        .iter()
        .position(|f| *f == app.manager.filter())
        .unwrap_or(0);
    let tabs = Tabs::new(Filter::ALL.iter().map(|f| f.label()))
        .select(selected)
        .style(Style::default().fg(color(palette.muted)))
        .highlight_style(
            Style::default()
                .fg(color(palette.foreground))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, area);
}

fn todo_item(todo: &Todo, in_flight: bool, palette: &Palette, now: DateTime<Utc>) -> ListItem<'static> {
    let muted = Style::default().fg(color(palette.muted));
    let mut lines = vec![
        Line::styled(todo.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(todo.description.clone()),
    ];
    if let Some(created) = todo.created_at {
        lines.push(Line::styled(
            format!("Added {}", time::relative(created, now)),
            muted,
        ));
    }
    let mut status = vec![Span::raw(format!("Status: {}", todo.status_label()))];
    if in_flight {
        status.push(Span::styled("  (working...)", muted));
    }
    lines.push(Line::from(status));
    lines.push(Line::default());

    let item = ListItem::new(lines);
    if todo.completed {
        item.style(Style::default().bg(color(palette.done)))
    } else {
        item
    }
}

fn render_list(frame: &mut Frame<'_>, app: &mut App, area: Rect, palette: &Palette, now: DateTime<Utc>) {
    let visible = app.manager.visible();
    let block = Block::bordered()
        .title(format!(" Todos ({}) ", visible.len()))
        .border_style(focus_style(app.focus == Focus::List, palette));

    if visible.is_empty() {
        let message = if app.manager.is_refreshing() {
            "Loading..."
        } else {
            "No todos found"
        };
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem<'static>> = visible
        .iter()
        .map(|todo| todo_item(todo, app.manager.is_in_flight(&todo.id), palette, now))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_help(frame: &mut Frame<'_>, app: &App, area: Rect, palette: &Palette) {
    let text = match app.focus {
        Focus::List => "j/k move · e edit · c done · d delete · 1/2/3 f filter · r refresh · t theme · q quit",
        _ => "Tab next · Enter submit · Esc cancel/list · Ctrl-T theme · Ctrl-C quit",
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(color(palette.muted))),
        area,
    );
}

fn render_notifications(frame: &mut Frame<'_>, app: &App, area: Rect, base: Style) {
    let width = TOAST_WIDTH.min(area.width);
    let inner = usize::from(width.saturating_sub(2)).max(1);
    let x = area.right().saturating_sub(width);
    let mut y = area.y + 1;

    for note in app.manager.notifications().active() {
        let icon = match note.level {
            Level::Success => "✓ ",
            Level::Warning => "! ",
            Level::Error => "✗ ",
        };
        let text = format!("{icon}{}", note.message);
        let rows = text.chars().count().div_ceil(inner).clamp(1, 4) as u16;
        let height = rows + 2;
        if y + height > area.bottom() {
            break;
        }
        let rect = Rect::new(x, y, width, height);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(text)
                .style(base)
                .wrap(Wrap { trim: true })
                .block(Block::bordered().border_style(Style::default().fg(level_color(note.level)))),
            rect,
        );
        y += height;
    }
}
