//! Memory game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod deck;
pub mod events;
pub mod playback;
pub mod questions;
pub mod rng;
pub mod round;
pub mod session;
pub mod state;
pub mod timer;

pub use cards::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use playback::*;
pub use questions::*;
pub use rng::*;
pub use round::*;
pub use session::*;
pub use state::*;
pub use timer::*;
