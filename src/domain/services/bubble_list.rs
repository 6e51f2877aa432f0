use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Message;
use crate::domain::models::Role;

/// Flattened transcript lines, rebuilt whenever the snapshot or the viewport
/// width changes. Conversations stay short enough that per-message caching
/// is not worth the bookkeeping.
#[derive(Default)]
pub struct BubbleList {
    lines: Vec<Line<'static>>,
}

impl BubbleList {
    pub fn set_messages(&mut self, messages: &[Message], line_width: usize) {
        self.lines = messages
            .iter()
            .flat_map(|message| {
                let mut align = BubbleAlignment::Left;
                if message.role == Role::User {
                    align = BubbleAlignment::Right;
                }

                return Bubble::new(message, align, line_width).as_lines();
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines.clone())
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
