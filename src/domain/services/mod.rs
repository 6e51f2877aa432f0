mod bubble;
mod bubble_list;
pub mod chat;
mod conversation;
pub mod events;
mod history;
mod scroll;

pub use bubble::*;
pub use bubble_list::*;
pub use conversation::*;
pub use history::*;
pub use scroll::*;
