//! Command groups, one module per source or topic.

pub mod faqs;
pub mod forvo;
pub mod fun;
pub mod pronunciation;
pub mod wiktionary;
pub mod wordref;
