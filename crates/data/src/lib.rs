//! Config loading and the music directory listing.

pub mod load;
pub mod tracks;

pub use load::*;
pub use tracks::*;
