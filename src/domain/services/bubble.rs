#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Message;
use crate::domain::models::Role;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        // Bubble text takes at most three quarters of the viewport.
        let text_max_width = ((self.window_max_width as f32 * 0.75) as usize).max(1);

        let header = format!(
            "{} · {}",
            self.message.role.to_string(),
            self.message.timestamp.format("%H:%M")
        );
        let header_style = match self.message.role {
            Role::User => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Role::Model => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        };

        let mut lines = vec![self.aligned_line(header, header_style)];
        for text_line in self.message.as_string_lines(text_max_width) {
            lines.push(self.aligned_line(text_line, Style::default()));
        }
        lines.push(Line::from(""));

        return lines;
    }

    fn aligned_line(&self, text: String, style: Style) -> Line<'static> {
        if self.alignment == BubbleAlignment::Right {
            let padding = " ".repeat(
                self.window_max_width
                    .saturating_sub(text.chars().count()),
            );
            return Line::from(vec![Span::from(padding), Span::styled(text, style)]);
        }

        return Line::from(Span::styled(text, style));
    }
}
