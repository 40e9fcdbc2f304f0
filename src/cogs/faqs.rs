//! Canned answers triggered by plain messages starting with `rabot`.

use crate::embed::Embed;

pub const FAQ_COLOR: u32 = 0x3392FF;

/// Author value meaning "no attribution".
const ANONYMOUS: &str = "me";

pub struct Faq {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub author: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const FAQS: &[Faq] = &[
    Faq {
        name: "default",
        aliases: &[],
        author: ANONYMOUS,
        title: "FAQ list",
        description: "
Available commands are:
`rabot, explain language transfer`
",
    },
    Faq {
        name: "language transfer",
        aliases: &["lt", "explain language transfer", "explain lt", "what is language transfer", "what is lt"],
        author: "scarlettparker",
        title: "What is Language Transfer?",
        description: "
Language Transfer is an audio series that teaches the basics of Modern Greek in a natural and easy-to-comprehend manner. It focuses on grammar and teaches useful vocabulary to prepare you for everyday conversations.

It's highly encouraged to check it out, as it will help you build a very solid foundation to communicate in Greek.
The complete series can be found on:
- [YouTube](https://www.youtube.com/watch?v=dHsgJkV9J30&list=PLeA5t3dWTWvtWkl4oOV8J9SMB7L9N9Ogt)
- [SoundCloud](https://soundcloud.com/languagetransfer/sets/complete-greek-more-audios)
- [Transcript (PDF)](https://static1.squarespace.com/static/5c69bfa4f4e531370e74fa44/t/5d03d32873f6f10001a364b5/1560531782855/COMPLETE+GREEK+-+Transcripts_LT.pdf)

The audio series follows the teacher (Mihalis) as he teaches a student useful grammatical constructions and how to form sentences naturally, allowing you to follow along by putting yourself in the student’s shoes. More useful resources can be found in [the resources channel](https://discord.com/channels/350234668680871946/359578025228107776/1132288734738522112), notably in the pins, to help you advance your Greek level after Language Transfer.
",
    },
    Faq {
        name: "quiz",
        aliases: &["explain quiz"],
        author: ANONYMOUS,
        title: "",
        description: "
Type `k!q DECK`.

Examples:
- `k!q mem5` (Memrise first 5k words by frequency)
- `k!q mem1` (Memrise first 1k words by frequency)
- `k!q apl` (Aorist Passive verbs)
- `k!q aal` (Aorist Active verbs)
- `k!q wd` (Words that appeared in 📅-word-of-the-day channel.
",
    },
];

/// What the bot answers to a plain message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub content: Embed,
    /// Remove the triggering message to keep the channel tidy.
    pub delete_starting_message: bool,
}

pub fn faq_footer(author: &str) -> String {
    if author == ANONYMOUS {
        "Type 'rabot' for the full FAQ list.".to_string()
    } else {
        format!("FAQ courtesy of {author}. Type 'rabot' for the full FAQ list.")
    }
}

impl Faq {
    pub fn matches(&self, cmd: &str) -> bool {
        self.name == cmd || self.aliases.contains(&cmd)
    }

    pub fn to_embed(&self) -> Embed {
        Embed::new(self.title)
            .description(self.description)
            .color(FAQ_COLOR)
            .footer(faq_footer(self.author))
    }
}

/// The FAQ named (or aliased) `cmd`, the FAQ list otherwise.
pub fn get_faq(cmd: &str) -> Embed {
    FAQS.iter()
        .find(|faq| faq.matches(cmd))
        .unwrap_or(&FAQS[0])
        .to_embed()
}

/// `rabot`, `rabot <faq>` and `rabot, <faq>` (any case) get an FAQ embed.
pub fn handle_message(content: &str) -> Option<MessageResponse> {
    let lowered = content.trim().to_lowercase();
    let cmd = if lowered == "rabot" {
        ""
    } else {
        lowered.strip_prefix("rabot ").or_else(|| lowered.strip_prefix("rabot,"))?
    };

    Some(MessageResponse { content: get_faq(cmd.trim()), delete_starting_message: true })
}
