use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
};
use cv_assistant_core::ChatRole;
use crate::app::App;
use crate::markdown::render_markdown;

/// Width of the profile panel, docked on wide terminals and drawn as a
/// drawer on narrow ones
const PANEL_WIDTH: u16 = 38;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    app.clear_hit_areas();
    app.follow_new_messages();

    let panel = app.session.panel().clone();

    if panel.is_narrow() {
        // Mobile layout: menu header on top, chat below, panel as a drawer
        let [header_area, main_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        render_menu_header(app, frame, header_area);
        render_main(app, frame, main_area);

        if panel.overlay_visible() {
            // Dim everything behind the drawer
            frame.buffer_mut().set_style(
                area,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            );
            app.overlay_area = Some(area);

            let drawer = Rect::new(area.x, area.y, PANEL_WIDTH.min(area.width), area.height);
            frame.render_widget(Clear, drawer);
            render_panel(app, frame, drawer);
        }
    } else {
        let [panel_area, main_area] = Layout::horizontal([
            Constraint::Length(PANEL_WIDTH),
            Constraint::Min(0),
        ])
        .areas(area);

        render_panel(app, frame, panel_area);
        render_main(app, frame, main_area);
    }
}

fn render_menu_header(app: &mut App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" ☰ ", Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::raw(" "),
        Span::styled(app.profile.name, Style::default().fg(Color::Cyan).bold()),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
    app.menu_area = Some(area);
}

fn render_main(app: &mut App, frame: &mut Frame, area: Rect) {
    let quick_height = app.profile.quick_questions.len() as u16;

    let [header_area, chat_area, quick_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(quick_height),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_chat_header(app, frame, header_area);
    render_chat(app, frame, chat_area);
    render_quick_questions(app, frame, quick_area);
    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_chat_header(app: &App, frame: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::from(Span::styled(
            format!(" {}", app.profile.header_title),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            format!(" {}", app.profile.header_subtitle),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(Paragraph::new(text), area);
}

/// Rows the paragraph occupies once word-wrapped to `width` columns
fn rendered_rows(paragraph: &Paragraph, width: u16) -> u16 {
    u16::try_from(paragraph.line_count(width)).unwrap_or(u16::MAX)
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Sohbet ");

    let inner = block.inner(area);
    app.chat_area = Some(area);
    app.chat_height = inner.height;

    let user_label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let assistant_label = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.session.messages() {
        match msg.role {
            ChatRole::User => {
                lines.push(Line::from(Span::styled("Siz:", user_label)));
                lines.extend(msg.content.lines().map(|l| Line::from(l.to_string())));
            }
            ChatRole::Assistant => {
                lines.push(Line::from(Span::styled("Meltem AI:", assistant_label)));
                lines.extend(render_markdown(&msg.content));
            }
        }
        lines.push(Line::default());
    }

    if app.is_busy() {
        lines.push(Line::from(Span::styled("Meltem AI:", assistant_label)));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            dots,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let chat = Paragraph::new(lines).wrap(Wrap { trim: false });
    let total_rows = rendered_rows(&chat, inner.width);

    app.max_chat_scroll = total_rows.saturating_sub(inner.height);
    if app.stick_to_bottom {
        app.chat_scroll = app.max_chat_scroll;
    } else {
        app.chat_scroll = app.chat_scroll.min(app.max_chat_scroll);
    }

    let chat = chat.block(block).scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);

    if app.max_chat_scroll > 0 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));

        let mut scrollbar_state = ScrollbarState::new(app.max_chat_scroll as usize)
            .position(app.chat_scroll as usize);

        frame.render_stateful_widget(
            scrollbar,
            area.inner(ratatui::layout::Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn render_quick_questions(app: &mut App, frame: &mut Frame, area: Rect) {
    let busy = app.is_busy();
    let key_style = if busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    };
    let label_style = if busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    for (i, question) in app.profile.quick_questions.iter().enumerate() {
        let row = i as u16;
        if row >= area.height {
            break;
        }
        let row_area = Rect::new(area.x, area.y + row, area.width, 1);
        let line = Line::from(vec![
            Span::styled(format!(" F{} ", i + 1), key_style),
            Span::styled(format!(" {}", question), label_style),
        ]);
        frame.render_widget(Paragraph::new(line), row_area);
        app.quick_question_areas.push(row_area);
    }
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let busy = app.is_busy();
    let border_color = if busy { Color::DarkGray } else { Color::Yellow };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Soru ");

    // Calculate visible portion of input with horizontal scrolling
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;

    // Calculate scroll offset to keep cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let draft = app.session.input_draft();
    let input = if draft.is_empty() {
        Paragraph::new(app.profile.input_placeholder)
            .style(Style::default().fg(Color::DarkGray))
    } else {
        let visible_text: String = draft.chars().skip(scroll_offset).take(inner_width).collect();
        Paragraph::new(visible_text).style(Style::default().fg(Color::Cyan))
    };

    frame.render_widget(input.block(input_block), area);

    // Show cursor unless input is disabled or covered by the drawer
    if !busy && !app.session.panel().overlay_visible() {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let status = if app.is_busy() {
        Span::styled(" YANIT BEKLENİYOR ", Style::default().bg(Color::Yellow).fg(Color::Black))
    } else {
        Span::styled(" HAZIR ", Style::default().bg(Color::Blue).fg(Color::White))
    };

    let mut hints = vec![
        status,
        Span::raw(" "),
        Span::styled(" Enter ", key_style),
        Span::styled(" gönder ", label_style),
        Span::styled(" F1-F4 ", key_style),
        Span::styled(" hızlı soru ", label_style),
        Span::styled(" PgUp/PgDn ", key_style),
        Span::styled(" kaydır ", label_style),
    ];
    if app.session.panel().is_narrow() {
        hints.extend(vec![
            Span::styled(" Ctrl+O ", key_style),
            Span::styled(" profil ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" kapat ", label_style),
        ]);
    }
    hints.extend(vec![
        Span::styled(" Ctrl+C ", key_style),
        Span::styled(" çıkış ", label_style),
    ]);

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

fn render_panel(app: &mut App, frame: &mut Frame, area: Rect) {
    let profile = app.profile;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Profil ");

    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.panel_area = Some(area);

    let footer_height = profile.social_links.len() as u16 + 1;
    let [content_area, footer_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(footer_height),
    ])
    .areas(inner);

    let heading = Style::default().fg(Color::Yellow).bold();
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(profile.name, Style::default().fg(Color::Cyan).bold())).centered(),
        Line::from(Span::styled(profile.title, Style::default().italic())).centered(),
        Line::from(Span::styled(format!("avatar: {}", profile.avatar_path), dim)).centered(),
        Line::default(),
    ];

    let badges: Vec<Span> = profile
        .badges
        .iter()
        .flat_map(|badge| {
            [
                Span::styled(format!(" {} ", badge), Style::default().bg(Color::DarkGray).fg(Color::White)),
                Span::raw(" "),
            ]
        })
        .collect();
    lines.push(Line::from(badges).centered());
    lines.push(Line::default());
    lines.push(Line::from(profile.bio));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(profile.skills_heading, heading)));
    let skills: Vec<Span> = profile
        .skills
        .iter()
        .flat_map(|skill| {
            [
                Span::styled(format!("[{}]", skill), Style::default().fg(Color::Cyan)),
                Span::raw(" "),
            ]
        })
        .collect();
    lines.push(Line::from(skills));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(profile.expertise_heading, heading)));
    for item in profile.expertise {
        lines.push(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(Color::Yellow)),
            Span::raw(*item),
        ]));
    }
    lines.push(Line::default());

    lines.push(Line::from(vec![
        Span::styled(profile.cv_label, Style::default().bold()),
        Span::styled(format!(" {}", profile.cv_path), dim),
    ]));

    let content = Paragraph::new(lines).wrap(Wrap { trim: true });
    app.max_panel_scroll = rendered_rows(&content, content_area.width)
        .saturating_sub(content_area.height);
    app.panel_scroll = app.panel_scroll.min(app.max_panel_scroll);
    frame.render_widget(content.scroll((app.panel_scroll, 0)), content_area);

    if app.max_panel_scroll > 0 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None);
        let mut scrollbar_state = ScrollbarState::new(app.max_panel_scroll as usize)
            .position(app.panel_scroll as usize);
        frame.render_stateful_widget(
            scrollbar,
            area.inner(ratatui::layout::Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }

    let mut footer: Vec<Line> = profile
        .social_links
        .iter()
        .map(|link| {
            Line::from(vec![
                Span::styled(format!("{} ", link.label), Style::default().fg(Color::Cyan).bold()),
                Span::styled(link.url, dim),
            ])
        })
        .collect();
    footer.push(Line::from(Span::styled(profile.copyright, dim)));
    frame.render_widget(Paragraph::new(footer), footer_area);
}
