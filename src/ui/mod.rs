//! UI module for rendering the TUI

mod field_renderer;

use crate::app::App;
use crate::state::{Form, SubmitStatus};
use contact_form::Scheduler;
use field_renderer::draw_field;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Main draw function
pub fn draw<S: Scheduler>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Form
            Constraint::Length(7), // Submit result
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_form(frame, rows[0], app);
    draw_result(frame, rows[1], &app.submit_status);
    draw_status_bar(frame, rows[2], app);
}

fn draw_form<S: Scheduler>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let block = Block::default()
        .title(" Contact Us ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Email
            Constraint::Min(4),    // Message
            Constraint::Length(1), // Submit
        ])
        .margin(1)
        .split(area);

    let active = app.form.active_field();
    for (index, field) in app.form.fields().into_iter().enumerate() {
        draw_field(
            frame,
            chunks[index],
            field,
            active == index,
            app.marks.message(&field.name),
        );
    }

    let submit_style = if app.form.is_submit_active() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let submit = Paragraph::new(Line::from(Span::styled(" [ Send ] ", submit_style)));
    frame.render_widget(submit, chunks[3]);
}

fn draw_result(frame: &mut Frame, area: Rect, status: &SubmitStatus) {
    let (color, title) = match status {
        SubmitStatus::Idle => (Color::DarkGray, " Status "),
        SubmitStatus::Rejected(_) => (Color::Red, " Errors "),
        SubmitStatus::Accepted { .. } => (Color::Green, " Sent "),
    };

    let mut lines = vec![Line::from(Span::styled(
        status.summary(),
        Style::default().fg(color),
    ))];
    lines.extend(status.errors().iter().map(|msg| {
        Line::from(Span::styled(
            format!("  • {msg}"),
            Style::default().fg(Color::Red),
        ))
    }));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(paragraph, area);
}

fn draw_status_bar<S: Scheduler>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let mut spans = vec![];

    let ready = if app.can_submit() {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Yellow))
    };
    spans.push(ready);
    spans.push(Span::styled(
        "Tab/↑↓: move | Enter: next/newline | Ctrl+S: send | Esc: quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_form::{FormConfig, VirtualScheduler};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App<VirtualScheduler>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_idle_screen() {
        let app = App::new(&FormConfig::default(), VirtualScheduler::new());
        let out = screen(&app);
        assert!(out.contains("Contact Us"));
        assert!(out.contains("Press Ctrl+S to send"));
        assert!(out.contains("[ Send ]"));
    }

    #[test]
    fn test_rejected_screen_lists_errors() {
        let mut app = App::new(&FormConfig::default(), VirtualScheduler::new());
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        let out = screen(&app);
        assert!(out.contains("3 problems to fix"));
        assert!(out.contains("Email is required."));
        assert!(out.contains("Message is required."));
    }
}
