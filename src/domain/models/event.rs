use tui_textarea::Input;

use super::ConversationSnapshot;

pub enum Event {
    ConversationUpdated(ConversationSnapshot),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLN(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
