use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::link::extract_video_id;
use crate::models::{BlogPost, Focus, LinkStatus, SocialPost};

pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let loading_height = if app.loading { 4 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Title bar
            Constraint::Length(3),              // Link input
            Constraint::Length(1),              // Valid / error line
            Constraint::Length(1),              // Generate button
            Constraint::Length(loading_height), // Stage label + progress
            Constraint::Min(0),                 // Results
            Constraint::Length(1),              // Key hints
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_input(frame, app, chunks[1]);
    render_link_status(frame, app, chunks[2]);
    render_button(frame, app, chunks[3]);
    if app.loading {
        render_loading(frame, app, chunks[4]);
    }
    render_results(frame, app, chunks[5], now);
    render_footer(frame, app, chunks[6]);

    if app.show_help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" postsmith ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new("Turn a YouTube video into a blog post and an Instagram post")
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Input;
    let border = if focused { Color::Yellow } else { Color::DarkGray };

    let block = Block::default()
        .title(" YouTube video URL ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let input_text = if focused {
        format!("> {}_", app.link_input)
    } else {
        format!("> {}", app.link_input)
    };

    let paragraph = Paragraph::new(input_text)
        .block(block)
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, area);
}

fn render_link_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = match (&app.error_message, app.link_status) {
        (Some(message), _) => Line::from(Span::styled(
            format!(" ✗ {message}"),
            Style::default().fg(Color::Red),
        )),
        (None, LinkStatus::Valid) => Line::from(Span::styled(
            " ✓ Valid YouTube URL",
            Style::default().fg(Color::Green),
        )),
        (None, _) => Line::default(),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_button(frame: &mut Frame, app: &App, area: Rect) {
    let label = if app.loading { " Generating... " } else { " Generate Content " };

    let mut style = if app.submit_enabled {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray).bg(Color::Black)
    };
    if app.focus == Focus::Submit {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }

    let line = Line::from(vec![Span::raw(" "), Span::styled(label, style)]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3)])
        .split(area);

    let stage = app.stages.label().unwrap_or_default();
    // Both simulations have run out but the backend is still busy
    let waiting = if app.stages.is_exhausted() && !app.progress.is_running() {
        " (still working)"
    } else {
        ""
    };
    frame.render_widget(
        Paragraph::new(format!(" ⏳ {stage}{waiting}")).style(Style::default().fg(Color::Yellow)),
        rows[0],
    );

    let percent = app.progress.percent();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(percent)
        .label(format!("{percent}%"));
    frame.render_widget(gauge, rows[1]);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let result = match (&app.result, app.results_visible) {
        (Some(result), true) => result,
        _ => {
            let paragraph = Paragraph::new("Generated content will appear here.")
                .block(Block::default().borders(Borders::ALL).title(" Results "))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(paragraph, area);
            return;
        }
    };

    // Slide in from a little below and stay dim until settled
    let offset = app.reveal_offset(now).min(area.height);
    let area = Rect {
        y: area.y + offset,
        height: area.height - offset,
        ..area
    };
    let text_style = if offset > 0 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(3, 5), Constraint::Ratio(2, 5)])
        .split(area);

    let video = app
        .submitted_link
        .as_deref()
        .and_then(extract_video_id)
        .map(|id| format!(" Blog Post · {id} "))
        .unwrap_or_else(|| " Blog Post ".to_string());

    let blog = Paragraph::new(blog_lines(&result.blog_post))
        .block(
            Block::default()
                .title(video)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .style(text_style)
        .wrap(Wrap { trim: false })
        .scroll((app.results_scroll, 0));
    frame.render_widget(blog, panes[0]);

    let social = Paragraph::new(social_lines(&result.instagram_post))
        .block(
            Block::default()
                .title(" Instagram Post ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .style(text_style)
        .wrap(Wrap { trim: false })
        .scroll((app.results_scroll, 0));
    frame.render_widget(social, panes[1]);
}

pub fn blog_lines(post: &BlogPost) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            post.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    lines.extend(post.content.split('\n').map(|l| Line::from(l.to_string())));
    lines.push(Line::default());
    lines.push(badge_line(&post.tags, Style::default().fg(Color::Blue).bg(Color::LightBlue)));
    lines
}

pub fn social_lines(post: &SocialPost) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = post
        .caption
        .split('\n')
        .map(|l| Line::from(l.to_string()))
        .collect();
    lines.push(Line::default());
    lines.push(badge_line(
        &post.hashtags,
        Style::default().fg(Color::Magenta).bg(Color::LightMagenta),
    ));
    lines
}

/// One badge per item, in the order given. No items means an empty line.
pub fn badge_line(items: &[String], style: Style) -> Line<'static> {
    let mut spans = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!(" {item} "), style));
    }
    Line::from(spans)
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.focus {
        Focus::Input => "Enter:generate  Tab:button  ↑/↓:scroll  Ctrl+U:clear  F1:help  Esc:quit",
        Focus::Submit => "Enter/Space:generate  Tab:field  j/k:scroll  o:open video  ?:help  q:quit",
    };

    let paragraph = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = vec![
        "",
        " Link field:",
        "   type/paste   Enter a YouTube URL",
        "   Enter        Generate content",
        "   Ctrl+U       Clear the field",
        "",
        " Results:",
        "   ↑ / ↓        Scroll",
        "   PgUp / PgDn  Scroll a page",
        "   Ctrl+O       Open the video in a browser",
        "",
        " General:",
        "   Tab          Switch between field and button",
        "   F1 / ?       Toggle this help",
        "   Esc / q      Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(ratatui::widgets::Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
