pub mod command;
pub mod event;
pub mod key_bindings;
pub mod page;
pub mod runner;
pub mod scheduler;

pub use event::PageEvent;
pub use page::Page;
pub use runner::{Runtime, Session};
