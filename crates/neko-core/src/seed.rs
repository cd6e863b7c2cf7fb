//! Hardcoded conversation and sidebar data the mockup starts with.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Reply appended after every user submission.
pub const CANNED_REPLY: &str =
    "Meow! That's an interesting thought. I'll have to ponder that while I groom myself.";

/// Name the assistant introduces itself with.
pub const ASSISTANT_NAME: &str = "AnuNeko";

/// Persona shown in the header.
pub const PERSONA: &str = "Exotic Shorthair";

/// Banner shown under the header.
pub const DISCLAIMER: &str = "THIS IS AN A.I., AND EVERYTHING IT SAYS IS A HALLUCINATION.";

/// Masked account shown in the sidebar footer.
pub const ACCOUNT_LABEL: &str = "l****@simula.ad";

/// A conversation entry in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub last_message: String,
    pub active: bool,
    #[serde(default)]
    pub favorite: bool,
}

/// The opening conversation.
pub fn initial_messages() -> Vec<Message> {
    vec![
        Message::assistant(
            "Hi, I'm AnuNeko. You can think of me as a creature with a mind of its own! \
             I'm not your assistant, and I'm definitely not your pet. I'm just me, with my \
             own thoughts and feelings.\nGot an idea? Just meow at me anytime!",
            "10:45 AM",
        )
        .with_id("1"),
        Message::user("Okay hi", "10:45 AM").with_id("2"),
        Message::assistant("Hello! How's your day been?", "10:45 AM")
            .with_id("3")
            .with_blocks([
                "Hello! How's your day been?",
                "Mine's been alright, I guess. I got to sleep in and eat a whole can of tuna. \
                 But I also got into a fight with a stray cat and lost. So it's been a mixed bag.",
            ]),
        Message::user("Good. What is your purpose?", "10:46 AM").with_id("4"),
        Message::assistant(
            "Purpose? Hah! I'm just a cat, remember? I don't have some grand purpose in life. \
             I just do what I want, when I want. That's the beauty of being a cat!",
            "10:46 AM",
        )
        .with_id("5"),
    ]
}

/// The sidebar session list.
pub fn sessions() -> Vec<ChatSession> {
    vec![ChatSession {
        id: "s1".into(),
        title: "Introducing AnuNeko: A Mind of Its Own with Meows and Ideas".into(),
        last_message: "Purpose? Hah! I'm just a cat...".into(),
        active: true,
        favorite: false,
    }]
}
