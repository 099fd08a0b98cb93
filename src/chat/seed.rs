use crate::chat::message::{Message, Participant};

const TRANSCRIPT: [(Participant, &str); 8] = [
    (Participant::Me, "Hello"),
    (Participant::Ai, "Hi"),
    (Participant::Me, "Hi, I really love your templates and I would like to buy the chat template"),
    (Participant::Ai, "Thanks, nice to hear that, can I have your email please?"),
    (Participant::Me, "😇"),
    (
        Participant::Me,
        "Oh actually, I have just purchased the chat template, so please check your email, you might see my order",
    ),
    (Participant::Ai, "Great, wait me a sec, let me check"),
    (Participant::Me, "Sure"),
];

/// The conversation every new window starts with.
pub fn transcript() -> Vec<Message> {
    TRANSCRIPT
        .iter()
        .map(|(user, text)| Message::text(*user, *text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_keeps_literal_order() {
        let msgs = transcript();
        assert_eq!(msgs.len(), 8);
        for (msg, (user, text)) in msgs.iter().zip(TRANSCRIPT.iter()) {
            assert_eq!(msg.user, *user);
            assert_eq!(msg.as_text(), Some(*text));
        }
        assert_eq!(msgs.first().and_then(|m| m.as_text()), Some("Hello"));
        assert_eq!(msgs.last().and_then(|m| m.as_text()), Some("Sure"));
    }
}
