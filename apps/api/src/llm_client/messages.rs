//! Chat message types and the builder that assembles outbound message lists.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Builds an outbound message list that always starts with a stage instruction.
///
/// The instruction is taken at construction and can't be edited or preceded
/// afterwards; every other method only appends.
#[derive(Debug, Clone)]
pub struct MessageListBuilder {
    messages: Vec<Message>,
}

impl MessageListBuilder {
    pub fn new(role: Role, instruction: &str) -> Self {
        Self {
            messages: vec![Message::new(role, instruction)],
        }
    }

    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(Role::User, content));
        self
    }

    /// Appends a user message holding `value` serialized as compact JSON.
    pub fn user_json(self, value: &Value) -> Self {
        self.user(to_json(value))
    }

    pub fn assistant(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(Role::Assistant, content));
        self
    }

    pub fn build(self) -> Vec<Message> {
        self.messages
    }
}

/// Serializes caller data for inclusion in a message body.
///
/// Takes a `Value` only: a `Value` always has string keys, so rendering it can't fail.
pub fn to_json(value: &Value) -> String {
    value.to_string()
}
