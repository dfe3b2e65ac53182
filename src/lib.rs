#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::correctness)]
#![warn(clippy::complexity)]
#![warn(clippy::suspicious)]
#![warn(clippy::cargo)]

pub mod deferred_history;
pub mod error;
pub mod graph;
pub mod history;
pub mod shared;
pub mod traits;

pub mod prelude {
	pub use crate::deferred_history::DeferredHistory;
	pub use crate::error::{Error, Result};
	pub use crate::history::History;
	pub use crate::shared::Shared;
	pub use crate::traits::command::Command;
	pub use crate::traits::command_history::CommandHistory;
}
