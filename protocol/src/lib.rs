//! Wire types and the per-command flow around the game engine.
//!
//! A web layer (or the bundled CLI) keeps one [`GameState`] per session,
//! turns each player action into a [`Command`] and hands both to
//! [`dispatch`], storing the returned snapshot for the next request.
//! [`SessionStore`] does that bookkeeping in memory.

pub use bombdisposer_core::{GameConfig, GameState};

pub use command::*;
pub use dispatch::*;
pub use error::*;
pub use session::*;

mod command;
mod dispatch;
mod error;
mod session;
