//! Page navigation state behind the ◀️ ▶️ ⏭️ buttons.
//!
//! Kept free of Discord types; `bot::paginate` renders it.

pub const EMOJI_PREVIOUS: &str = "◀️";
pub const EMOJI_NEXT: &str = "▶️";
pub const EMOJI_LAST: &str = "⏭️";
pub const EMOJI_FIRST: &str = "⏮️";

/// Shown to anyone but the invoking user who presses a button.
pub const NOT_AUTHOR_NOTICE: &str = "Only the author of the command can perform this action.";
pub const NOT_AUTHOR_COLOR: u32 = 0xFF0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Previous,
    Next,
    /// Jumps to the far end: last page from the first half, first page otherwise.
    Jump,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Previous, Button::Next, Button::Jump];

    pub fn custom_id_suffix(self) -> &'static str {
        match self {
            Button::Previous => "prev",
            Button::Next => "next",
            Button::Jump => "jump",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.custom_id_suffix() == suffix)
    }
}

/// How one button should look for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub button: Button,
    pub emoji: &'static str,
    pub disabled: bool,
}

/// 1-based page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    index: usize,
    total: usize,
}

impl Pager {
    /// `None` when there is nothing to page through.
    pub fn new(total: usize) -> Option<Self> {
        (total > 0).then_some(Self { index: 1, total })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// A single page is sent without buttons.
    pub fn needs_buttons(&self) -> bool {
        self.total > 1
    }

    pub fn press(&mut self, button: Button) {
        match button {
            Button::Previous => self.index = self.index.saturating_sub(1).max(1),
            Button::Next => self.index = (self.index + 1).min(self.total),
            Button::Jump => {
                self.index = if self.index <= self.total / 2 { self.total } else { 1 };
            }
        }
    }

    pub fn buttons(&self) -> [ButtonState; 3] {
        let jump_emoji = if self.index > self.total / 2 { EMOJI_FIRST } else { EMOJI_LAST };
        [
            ButtonState { button: Button::Previous, emoji: EMOJI_PREVIOUS, disabled: self.index == 1 },
            ButtonState { button: Button::Next, emoji: EMOJI_NEXT, disabled: self.index == self.total },
            ButtonState { button: Button::Jump, emoji: jump_emoji, disabled: false },
        ]
    }
}

/// Component id of `button` in the pagination session `session`
/// (the invoking command's id).
pub fn custom_id(session: u64, button: Button) -> String {
    format!("{session}:{}", button.custom_id_suffix())
}

/// Prefix shared by every button of a session.
pub fn session_prefix(session: u64) -> String {
    format!("{session}:")
}

/// The button behind a component id, if it belongs to `session`.
pub fn button_from_custom_id(session: u64, id: &str) -> Option<Button> {
    id.strip_prefix(&session_prefix(session)).and_then(Button::from_suffix)
}

pub fn compute_total_pages(total_results: usize, results_per_page: usize) -> usize {
    if total_results == 0 || results_per_page == 0 {
        return 0;
    }
    (total_results - 1) / results_per_page + 1
}
