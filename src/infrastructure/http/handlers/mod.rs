//! HTTP Handlers

mod asset;
mod generate;
mod options;
mod outline;
mod ping;
mod websocket;
mod workspace;

pub use asset::*;
pub use generate::*;
pub use options::*;
pub use outline::*;
pub use ping::*;
pub use websocket::*;
pub use workspace::*;
