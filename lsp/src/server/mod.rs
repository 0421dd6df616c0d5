mod cli;
mod completion;
mod config;
mod definition;
mod entry;
mod handlers;
mod state;
mod text;

pub use completion::completion_items;
pub use definition::definition_links;
pub use entry::run;
pub use text::RopeLines;
