//! API request handlers.

mod export;
mod records;
mod review;
mod upload;

pub use export::*;
pub use records::*;
pub use review::*;
pub use upload::*;
