//! Minimal markdown styling for assistant answers.
//!
//! Handles what the answer service actually sends: `**bold**`, `*italic*`,
//! `` `code` ``, `#` headings and `-`/`*` bullets. Anything unmatched is
//! shown literally.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Convert a block of markdown into styled lines
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    text.lines().map(parse_markdown_line).collect()
}

/// Parse one line, including block-level prefixes
pub fn parse_markdown_line(text: &str) -> Line<'static> {
    let heading_level = text.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&heading_level) && text[heading_level..].starts_with(' ') {
        let title = text[heading_level..].trim();
        let mut spans = parse_inline(title);
        for span in &mut spans {
            span.style = span
                .style
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD);
        }
        return Line::from(spans);
    }

    if let Some(rest) = text.strip_prefix("- ").or_else(|| text.strip_prefix("* ")) {
        let mut spans = vec![Span::styled("• ", Style::default().fg(Color::Yellow))];
        spans.extend(parse_inline(rest));
        return Line::from(spans);
    }

    let spans = parse_inline(text);
    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

/// Parse `**bold**`, `*italic*` and `` `code` `` inside a line
fn parse_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                // Consume the second *
                chars.next();

                // Find closing **
                let mut bold_text = String::new();
                let mut found_close = false;
                while let Some(c) = chars.next() {
                    if c == '*' && chars.peek() == Some(&'*') {
                        chars.next();
                        found_close = true;
                        break;
                    }
                    bold_text.push(c);
                }

                if found_close && !bold_text.is_empty() {
                    flush(&mut spans, &mut current_text);
                    spans.push(Span::styled(
                        bold_text,
                        Style::default().add_modifier(Modifier::BOLD),
                    ));
                } else {
                    // No closing **, treat as literal
                    current_text.push_str("**");
                    current_text.push_str(&bold_text);
                    if found_close {
                        current_text.push_str("**");
                    }
                }
            }
            '*' | '`' => {
                let delimiter = c;
                let mut inner = String::new();
                let mut found_close = false;
                while let Some(c) = chars.next() {
                    if c == delimiter {
                        found_close = true;
                        break;
                    }
                    inner.push(c);
                }

                if found_close && !inner.is_empty() {
                    flush(&mut spans, &mut current_text);
                    let style = if delimiter == '`' {
                        Style::default().fg(Color::Magenta)
                    } else {
                        Style::default().add_modifier(Modifier::ITALIC)
                    };
                    spans.push(Span::styled(inner, style));
                } else {
                    current_text.push(delimiter);
                    current_text.push_str(&inner);
                    if found_close {
                        current_text.push(delimiter);
                    }
                }
            }
            _ => current_text.push(c),
        }
    }

    flush(&mut spans, &mut current_text);
    spans
}

fn flush(spans: &mut Vec<Span<'static>>, current_text: &mut String) {
    if !current_text.is_empty() {
        spans.push(Span::raw(std::mem::take(current_text)));
    }
}
