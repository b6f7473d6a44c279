//! Accumulated diagnostics of a processing step.
//!
//! `ProcessingInfo` is the only failure channel of batch execution: every
//! collaborator returns one, and the engine merges them into the job result.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Info,
    Warn,
    Error,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Info => write!(f, "INFO"),
            MessageType::Warn => write!(f, "WARN"),
            MessageType::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingMessage {
    pub message_type: MessageType,
    /// Label of the component that produced the message
    pub description: String,
    pub message: String,
}

impl ProcessingMessage {
    pub fn new(
        message_type: MessageType,
        description: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message_type,
            description: description.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ProcessingMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.message_type, self.description, self.message
        )
    }
}

/// Ordered, append-only list of processing messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingInfo {
    messages: Vec<ProcessingMessage>,
}

impl ProcessingInfo {
    /// Create an empty info.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an info holding a single error message.
    pub fn error(description: impl Into<String>, message: impl Into<String>) -> Self {
        let mut info = Self::new();
        info.add_error_message(description, message);
        info
    }

    /// Append a message.
    pub fn add_message(&mut self, message: ProcessingMessage) {
        self.messages.push(message);
    }

    pub fn add_info_message(&mut self, description: impl Into<String>, message: impl Into<String>) {
        self.add_message(ProcessingMessage::new(MessageType::Info, description, message));
    }

    pub fn add_warn_message(&mut self, description: impl Into<String>, message: impl Into<String>) {
        self.add_message(ProcessingMessage::new(MessageType::Warn, description, message));
    }

    pub fn add_error_message(
        &mut self,
        description: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.add_message(ProcessingMessage::new(
            MessageType::Error,
            description,
            message,
        ));
    }

    /// Append all messages of `other`, keeping their order.
    pub fn add_messages(&mut self, other: ProcessingInfo) {
        self.messages.extend(other.messages);
    }

    /// Get all messages in the order they were added.
    pub fn messages(&self) -> &[ProcessingMessage] {
        &self.messages
    }

    pub fn has_error_message(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.message_type == MessageType::Error)
    }

    /// Iterate over messages of the given type.
    pub fn of_type(&self, message_type: MessageType) -> impl Iterator<Item = &ProcessingMessage> {
        self.messages
            .iter()
            .filter(move |m| m.message_type == message_type)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ProcessingMessage> {
        self.of_type(MessageType::Error)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl fmt::Display for ProcessingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processing produced {} message(s):", self.messages.len())?;
        for (i, m) in self.messages.iter().enumerate() {
            writeln!(f, "  #{}: {}", i + 1, m)?;
        }
        Ok(())
    }
}
