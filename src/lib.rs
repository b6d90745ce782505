//! Scoresheet placement and input routing for music notation editors.
//!
//! The library owns the score model ([`page`]), decides where notation
//! symbols land ([`placement`]), routes host keyboard, pointer, and MIDI
//! events to page mutations ([`input`]), and renders, exports, and
//! persists the result ([`draw`], [`export`], [`session`]).

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod notation;
pub mod page;
pub mod placement;
pub mod script;
pub mod session;
pub mod util;

pub use config::Config;
pub use input::InputState;
pub use notation::NotationRegistry;
pub use page::{Page, Project};
