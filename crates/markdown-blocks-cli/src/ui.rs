use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, Pane};

pub fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    let active = app.pane;
    let pane_style = |pane: Pane| {
        if active == pane {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    };

    // File list panel
    let file_items: Vec<ListItem> = app
        .files
        .iter()
        .map(|path| ListItem::new(Line::from(format!("📄 {path}"))))
        .collect();
    let files_list = List::new(file_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(pane_style(Pane::Files))
                .title("Files"),
        )
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Blocks panel
    let snapshot = app.editor.snapshot();
    let block_items: Vec<ListItem> = snapshot
        .blocks
        .iter()
        .map(|b| {
            let mark = if b.selected { "●" } else { " " };
            let mut style = Style::default();
            if b.selected {
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            }
            if b.malformed {
                style = style.fg(Color::Red);
            }
            ListItem::new(Line::from(vec![
                Span::raw(format!("{mark} ")),
                Span::styled(App::label(b.kind, b.level, &b.text), style),
            ]))
        })
        .collect();

    let title = match &app.open_file {
        Some(path) if app.dirty => format!("{path} [modified]"),
        Some(path) => path.to_string(),
        None => "Blocks".to_string(),
    };
    let blocks_list = List::new(block_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(pane_style(Pane::Blocks))
                .title(title),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    app.blocks_area = chunks[1];
    f.render_stateful_widget(blocks_list, chunks[1], &mut app.block_list_state);

    // Status and key help at the bottom
    let help = Line::from(vec![
        Span::raw("q quit | Tab pane | ↑↓ move | Enter select | t toggle | Shift+↑↓ range | "),
        Span::raw("Ctrl+A all | Esc clear | Del delete | d dup | m merge | w save | r reload"),
    ]);
    let status = Line::from(Span::styled(
        app.status.clone(),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(vec![status, help]), rows[1]);
}
