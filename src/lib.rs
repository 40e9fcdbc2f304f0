//! rabot: a Discord bot for Greek learners.
//!
//! Lookups against WordReference, Wiktionary and Forvo live under [`cogs`];
//! [`bot`] wires them into slash commands. The `wordref` and `conj` binaries
//! call the same lookups from the command line.

pub mod bot;
pub mod cogs;
pub mod config;
pub mod embed;
pub mod error;
pub mod fetch;
pub mod html;
pub mod logger;
pub mod pagination;
pub mod spelling;
pub mod text;
