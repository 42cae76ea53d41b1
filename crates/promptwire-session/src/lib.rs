//! # Promptwire Session
//!
//! The message-passing boundary in front of the relay core. A [`Session`]
//! owns a dispatcher and translates wire requests into parse + dispatch
//! calls; it holds no state between calls, so the UI layer can create one
//! per connection and drop it freely.

mod session;

pub use session::Session;
