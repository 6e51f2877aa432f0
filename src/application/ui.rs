use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Backend;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Margin;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;
#[cfg(feature = "dev")]
use tui_textarea::Input;
#[cfg(feature = "dev")]
use tui_textarea::Key;

use crate::domain::models::Action;
use crate::domain::models::ConversationSnapshot;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::TextArea;
use crate::domain::models::PROMPT_TITLE;
use crate::domain::services::events::EventsService;
use crate::domain::services::BubbleList;
use crate::domain::services::Scroll;

const RESET_CONFIRM_TITLE: &str = "Press CTRL+N again to clear the conversation";

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let loading = Loading::default();
    let mut bubble_list = BubbleList::default();
    let mut scroll = Scroll::default();
    let mut snapshot = ConversationSnapshot::default();
    let mut last_known_width: u16 = 0;
    let mut last_known_height: u16 = 0;
    let mut tick: usize = 0;
    let mut pending_reset = false;

    #[cfg(feature = "dev")]
    {
        let test_str = "Explain recursion with a simple example.";
        for char in test_str.chars() {
            textarea.input(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
            });
        }
    }

    loop {
        let title = if pending_reset {
            RESET_CONFIRM_TITLE
        } else {
            PROMPT_TITLE
        };
        textarea.set_block(TextArea::block(title));

        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Max(4)])
                .split(frame.size());

            if layout[0].width != last_known_width || layout[0].height != last_known_height {
                last_known_width = layout[0].width;
                last_known_height = layout[0].height;
                bubble_list.set_messages(&snapshot.messages, last_known_width as usize);
                scroll.set_state(bubble_list.len() as u16, last_known_height);
                scroll.last();
            }

            bubble_list.render(frame, layout[0], scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scroll.scrollbar_state,
            );

            if snapshot.is_typing {
                loading.render(frame, layout[1], tick);
            } else {
                frame.render_widget(textarea.widget(), layout[1]);
            }
        })?;

        match events.next().await? {
            Event::ConversationUpdated(next_snapshot) => {
                snapshot = next_snapshot;
                bubble_list.set_messages(&snapshot.messages, last_known_width as usize);
                scroll.set_state(bubble_list.len() as u16, last_known_height);
                scroll.last();
            }
            Event::KeyboardCharInput(input) => {
                pending_reset = false;
                if !snapshot.is_typing {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                pending_reset = false;
                if !snapshot.is_typing {
                    textarea.insert_str(&text);
                }
            }
            Event::KeyboardEnter() => {
                pending_reset = false;
                if snapshot.is_typing {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                textarea = TextArea::default();
                tx.send(Action::SubmitPrompt(input_str))?;
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLN() => {
                // Destructive, so the first press only arms the confirm.
                if pending_reset {
                    pending_reset = false;
                    tx.send(Action::ResetConversation())?;
                } else {
                    pending_reset = true;
                }
            }
            Event::UIScrollUp() => {
                scroll.up();
            }
            Event::UIScrollDown() => {
                scroll.down();
            }
            Event::UIScrollPageUp() => {
                scroll.up_page();
            }
            Event::UIScrollPageDown() => {
                scroll.down_page();
            }
            Event::UITick() => {
                tick += 1;
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
