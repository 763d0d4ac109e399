//! Encore Core
//!
//! Domain types shared by every Encore crate.
//!
//! # Example
//!
//! ```rust
//! use encore_core::types::{Track, TrackId, User};
//!
//! let user = User::new("Alice").with_avatar("https://example.com/alice-large.jpg");
//! let track = Track::new("42", "My Favorite Song", user);
//!
//! assert_eq!(track.id, TrackId::new("42"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{Track, TrackId, User};
