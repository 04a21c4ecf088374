//! Type definitions for leetstreak

mod calendar;
mod display;
mod error;

pub use calendar::*;
pub use display::*;
pub use error::*;
