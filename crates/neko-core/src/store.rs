//! The conversation store.
//!
//! [`ConversationStore`] owns the ordered message list and the input draft.
//! It never sleeps or spawns anything itself: a successful submission hands
//! back a [`ReplyTicket`], the caller arranges for the ticket to come back
//! after the reply delay (see [`crate::scheduler`]), and
//! [`ConversationStore::deliver_reply`] appends the assistant turn.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::draft::Draft;
use crate::message::Message;
use crate::seed;

/// Handle for one pending simulated reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTicket {
    /// Submission sequence number (1-based, in submission order).
    pub seq: u64,
    /// Id of the user message this reply answers.
    pub in_reply_to: String,
}

/// Where the conversation is in its submit/reply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPhase {
    /// No reply outstanding.
    Idle,
    /// At least one simulated reply has not landed yet.
    AwaitingReply { pending: usize },
}

/// Ordered conversation plus the uncommitted input.
#[derive(Debug)]
pub struct ConversationStore {
    messages: Vec<Message>,
    ids: HashSet<String>,
    draft: Draft,
    /// Sequence numbers of tickets whose reply has not landed.
    outstanding: HashSet<u64>,
    submissions: u64,
    canned_reply: String,
    clock: Arc<dyn Clock>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ConversationStore {
    /// Empty store using the system clock and the default canned reply.
    pub fn new() -> Self {
        Self::with_messages(Vec::new())
    }

    /// Store pre-filled with the opening conversation.
    pub fn seeded() -> Self {
        Self::with_messages(seed::initial_messages())
    }

    /// Store pre-filled with `messages`.
    ///
    /// Messages repeating an earlier id are dropped.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        let mut store = Self {
            messages: Vec::with_capacity(messages.len()),
            ids: HashSet::new(),
            draft: Draft::new(),
            outstanding: HashSet::new(),
            submissions: 0,
            canned_reply: seed::CANNED_REPLY.to_string(),
            clock: Arc::new(SystemClock),
        };
        for message in messages {
            store.push(message);
        }
        store
    }

    /// Use a different clock for timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a different canned reply.
    #[must_use]
    pub fn with_canned_reply(mut self, reply: impl Into<String>) -> Self {
        self.canned_reply = reply.into();
        self
    }

    /// All messages in creation order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether there are no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Look up a message by id.
    pub fn get(&self, id: &str) -> Option<&Message> {
        if !self.ids.contains(id) {
            return None;
        }
        self.messages.iter().find(|m| m.id == id)
    }

    /// The input draft.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Mutable access to the input draft for editing.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Replace the input text.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.draft.set(text);
    }

    /// Current input text.
    pub fn input(&self) -> &str {
        self.draft.content()
    }

    /// True iff the trimmed input is non-empty.
    pub fn can_submit(&self) -> bool {
        self.draft.has_text()
    }

    /// Current phase of the submit/reply cycle.
    pub fn phase(&self) -> ConversationPhase {
        match self.outstanding.len() {
            0 => ConversationPhase::Idle,
            pending => ConversationPhase::AwaitingReply { pending },
        }
    }

    /// Number of replies still outstanding.
    pub fn pending_replies(&self) -> usize {
        self.outstanding.len()
    }

    /// Whether `ticket` is still waiting for its reply.
    pub fn is_outstanding(&self, ticket: &ReplyTicket) -> bool {
        self.outstanding.contains(&ticket.seq)
    }

    /// Submit the current input draft.
    ///
    /// Whitespace-only input is ignored and left in place. The text only
    /// enters input history once the message has been appended.
    pub fn submit(&mut self) -> Option<ReplyTicket> {
        if !self.draft.has_text() {
            return None;
        }
        let text = self.draft.content().to_string();
        let ticket = self.submit_text(&text)?;
        self.draft.remember(text);
        Some(ticket)
    }

    /// Submit `text` as a user message.
    ///
    /// Returns `None` (and changes nothing) when `text` is blank. Otherwise
    /// appends the user message, clears the input, and returns the ticket
    /// for the simulated reply.
    pub fn submit_text(&mut self, text: &str) -> Option<ReplyTicket> {
        if text.trim().is_empty() {
            return None;
        }

        let message = Message::user(text, self.clock.timestamp());
        let id = message.id.clone();
        if !self.push(message) {
            return None;
        }
        self.draft.clear();

        self.submissions += 1;
        self.outstanding.insert(self.submissions);
        debug!(
            seq = self.submissions,
            id = %id,
            pending = self.outstanding.len(),
            "user message submitted"
        );

        Some(ReplyTicket {
            seq: self.submissions,
            in_reply_to: id,
        })
    }

    /// Append the simulated assistant reply for a fired ticket.
    ///
    /// Each ticket is honored once. Tickets that were already delivered,
    /// abandoned, or never issued by this store are ignored.
    pub fn deliver_reply(&mut self, ticket: &ReplyTicket) -> Option<&Message> {
        if !self.outstanding.remove(&ticket.seq) {
            warn!(seq = ticket.seq, "ignoring reply for unknown or settled ticket");
            return None;
        }
        let message = Message::assistant(self.canned_reply.clone(), self.clock.timestamp());
        if !self.push(message) {
            return None;
        }
        debug!(
            seq = ticket.seq,
            in_reply_to = %ticket.in_reply_to,
            pending = self.outstanding.len(),
            "simulated reply delivered"
        );
        self.messages.last()
    }

    /// Forget about replies that will never arrive (e.g. cancelled timers).
    ///
    /// Tickets issued before this call are no longer accepted.
    pub fn abandon_pending(&mut self) {
        if !self.outstanding.is_empty() {
            debug!(pending = self.outstanding.len(), "abandoning pending replies");
        }
        self.outstanding.clear();
    }

    /// Append a message, rejecting duplicate ids.
    fn push(&mut self, message: Message) -> bool {
        if !self.ids.insert(message.id.clone()) {
            warn!(id = %message.id, "rejected message with duplicate id");
            return false;
        }
        self.messages.push(message);
        true
    }
}
