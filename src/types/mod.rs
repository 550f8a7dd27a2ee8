mod capabilities;
mod client_hints;
mod flag;
mod user_agent;
mod version;

pub use capabilities::*;
pub use client_hints::*;
pub use flag::*;
pub use user_agent::*;
pub use version::*;
