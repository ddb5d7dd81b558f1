pub mod event_loop;
pub mod input;
pub mod messages;
pub mod terminal;
