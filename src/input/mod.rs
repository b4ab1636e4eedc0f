mod handler;

pub use handler::{handle_focus, handle_key, handle_mouse};
