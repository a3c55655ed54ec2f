// Server module entry point
// Listener creation, the accept loop and per-connection serving

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the module is renamed
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::bind;
pub use server_loop::serve;
