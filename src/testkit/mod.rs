//! Test-only scripted venue adapters, gated by the `testkit` feature.
//! Lets integration tests drive the orchestrator without opening a real
//! socket.

mod stream;

pub use stream::{ScriptedUpdate, ScriptedVenue};
