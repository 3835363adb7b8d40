//! Conversation history and the per-context store.
//!
//! A [`Conversation`] is an append-only transcript for one context id. The
//! [`ConversationStore`] maps context ids to conversations, hands out a
//! per-conversation async lock so turns in the same context run one at a
//! time, and evicts the least-recently-used conversation when the store
//! exceeds its bound.

use crate::messages::Message;
use crate::types::ContextId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Append-only transcript for one conversation context.
#[derive(Debug, Clone)]
pub struct Conversation {
    /// System preamble, held outside the transcript
    system_preamble: String,
    /// User, assistant, and tool messages in arrival order
    turns: Vec<Message>,
}

impl Conversation {
    /// Creates an empty conversation with the given system preamble.
    #[must_use]
    pub fn new(system_preamble: impl Into<String>) -> Self {
        Self {
            system_preamble: system_preamble.into(),
            turns: Vec::new(),
        }
    }

    /// Appends a message to the transcript. Appending is the only mutation.
    pub fn append(&mut self, message: Message) {
        self.turns.push(message);
    }

    /// Returns the transcript, excluding the system preamble.
    #[must_use]
    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    /// Builds the message sequence for a chat completion: the system
    /// preamble first, then the transcript.
    #[must_use]
    pub fn messages_for_llm(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.turns.len() + 1);
        messages.push(Message::system(&self.system_preamble));
        messages.extend(self.turns.iter().cloned());
        messages
    }

    /// Returns the number of transcript messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if the transcript is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Handle to one conversation, locked for the duration of a turn.
pub type SharedConversation = std::sync::Arc<tokio::sync::Mutex<Conversation>>;

struct Entry {
    conversation: SharedConversation,
    /// Monotonic tick of the last touch, for least-recently-used ordering
    last_used: u64,
}

/// Store of conversations keyed by context id.
pub struct ConversationStore {
    inner: Mutex<HashMap<ContextId, Entry>>,
    system_preamble: String,
    max_conversations: usize,
    clock: AtomicU64,
}

impl ConversationStore {
    /// Creates a store whose conversations start with `system_preamble`.
    #[must_use]
    pub fn new(system_preamble: impl Into<String>, max_conversations: usize) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            system_preamble: system_preamble.into(),
            max_conversations: max_conversations.max(1),
            clock: AtomicU64::new(0),
        }
    }

    /// Returns the conversation for `context_id`, creating it on first use.
    ///
    /// Calling this twice with the same id yields the same conversation.
    /// Touching an entry refreshes its eviction clock; when the store grows
    /// past its bound the least-recently-used other entry is dropped.
    pub fn get_or_create(&self, context_id: &ContextId) -> SharedConversation {
        let mut map = self.inner.lock().expect("conversation store lock poisoned");
        let now = self.clock.fetch_add(1, Ordering::Relaxed);

        if let Some(entry) = map.get_mut(context_id) {
            entry.last_used = now;
            return entry.conversation.clone();
        }

        let conversation = SharedConversation::new(tokio::sync::Mutex::new(Conversation::new(
            &self.system_preamble,
        )));
        map.insert(
            context_id.clone(),
            Entry {
                conversation: conversation.clone(),
                last_used: now,
            },
        );

        if map.len() > self.max_conversations {
            let evict = map
                .iter()
                .filter(|(id, _)| *id != context_id)
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| id.clone());
            if let Some(id) = evict {
                tracing::debug!(context_id = %id, "Evicting least-recently-used conversation");
                map.remove(&id);
            }
        }

        conversation
    }

    /// Returns the conversation for `context_id` without creating one.
    #[must_use]
    pub fn get(&self, context_id: &ContextId) -> Option<SharedConversation> {
        self.inner
            .lock()
            .expect("conversation store lock poisoned")
            .get(context_id)
            .map(|entry| entry.conversation.clone())
    }

    /// Returns the number of retained conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("conversation store lock poisoned")
            .len()
    }

    /// Returns true if no conversations are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("len", &self.len())
            .field("max_conversations", &self.max_conversations)
            .finish()
    }
}
