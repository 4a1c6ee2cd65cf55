//! Core stack-split interaction logic. Keep this crate free of IO and
//! platform concerns.

pub mod cache;
pub mod config;
pub mod content;
pub mod crafting;
pub mod events;
pub mod handlers;
pub mod page;
pub mod registry;
pub mod session;
pub mod shop;
pub mod slots;
pub mod split;
pub mod stack;

pub use cache::*;
pub use config::*;
pub use content::*;
pub use events::*;
pub use handlers::*;
pub use page::*;
pub use registry::*;
pub use session::*;
pub use shop::*;
pub use slots::*;
pub use split::*;
pub use stack::*;
