//! Session transcript persistence for PaperClip.
//!
//! Each session is a JSON file named after its id. Sessions are saved after
//! every successful submission and on shutdown.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod session;
mod store;

pub use session::Session;
pub use store::SessionStore;
