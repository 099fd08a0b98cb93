use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The two fixed parties of a conversation. Identity is the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participant {
    Me,
    Ai,
}

impl Participant {
    pub fn name(self) -> &'static str {
        match self {
            Participant::Me => "You",
            Participant::Ai => "AI",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Text(String),
    /// Stand-in for a reply that is still being generated.
    Loading,
}

impl MessageKind {
    pub fn label(&self) -> &'static str {
        match self {
            MessageKind::Text(_) => "text",
            MessageKind::Loading => "loading",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub user: Participant,
    pub kind: MessageKind,
    pub date: DateTime<Utc>,
}

impl Message {
    pub fn new(user: Participant, kind: MessageKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            kind,
            date: Utc::now(),
        }
    }

    pub fn text(user: Participant, text: impl Into<String>) -> Self {
        Self::new(user, MessageKind::Text(text.into()))
    }

    pub fn loading() -> Self {
        Self::new(Participant::Ai, MessageKind::Loading)
    }

    pub fn is_sender(&self) -> bool {
        self.user != Participant::Ai
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            MessageKind::Text(t) => Some(t),
            MessageKind::Loading => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_flag_follows_author() {
        assert!(Message::text(Participant::Me, "hi").is_sender());
        assert!(!Message::text(Participant::Ai, "hi").is_sender());
        assert!(!Message::loading().is_sender());
    }

    #[test]
    fn ids_are_unique() {
        let a = Message::text(Participant::Me, "same");
        let b = Message::text(Participant::Me, "same");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn loading_has_no_text() {
        let msg = Message::loading();
        assert_eq!(msg.user, Participant::Ai);
        assert_eq!(msg.as_text(), None);
        assert_eq!(msg.kind.label(), "loading");
    }

    #[test]
    fn participant_names() {
        assert_eq!(Participant::Me.name(), "You");
        assert_eq!(Participant::Ai.name(), "AI");
    }
}
