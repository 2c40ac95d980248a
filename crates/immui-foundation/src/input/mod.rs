mod keyboard;
mod pointer;
mod state;

pub use keyboard::*;
pub use pointer::*;
pub use state::*;
