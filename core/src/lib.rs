mod browser;
mod commands;
mod editor;
mod events;
mod history;
mod immutables;
mod native;
mod paste;
mod plugins;
mod router;
mod selection;
mod shortcuts;
mod surface;
mod toolbar;

pub use browser::*;
pub use commands::*;
pub use editor::*;
pub use events::*;
pub use history::*;
pub use immutables::*;
pub use native::*;
pub use paste::*;
pub use plugins::*;
pub use router::*;
pub use selection::*;
pub use shortcuts::*;
pub use surface::*;
pub use toolbar::*;
