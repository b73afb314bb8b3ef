//! Chat session state: transcript, accepted history and the
//! one-request-in-flight guard. The HTTP call and the widget choreography
//! live in the app layer.

use serde::{Deserialize, Serialize};

use crate::device::Fingerprint;
use crate::i18n::{Lang, Tr};

/// Server error code meaning another request already holds the session; the
/// client stays silent and keeps its state.
pub const SESSION_LOCKED: &str = "SESSION_LOCKED";

/// Chat window open animation: content fades in, then messages appear.
pub const OPEN_CONTENT_MS: u64 = 300;
pub const OPEN_MESSAGES_MS: u64 = 700;
/// Close animation length before the window resets.
pub const CLOSE_MS: u64 = 700;

pub const GREETING: Tr = Tr::new(
    "Hi there! I'm Muhammad's AI assistant. Feel free to ask me anything \
     about him, his projects or his skills.",
    "Привет! Я ИИ-ассистент Мухаммеда. Спрашивайте меня о нём, его проектах \
     или навыках.",
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> ChatMessage {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> ChatMessage {
        ChatMessage {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of a `/chat` POST.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub uid: &'a str,
    #[serde(rename = "fingerprintData")]
    pub fingerprint: &'a Fingerprint,
    pub history: &'a [ChatMessage],
    #[serde(rename = "currentMessage")]
    pub current_message: &'a str,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What the widget should do with a finished request.
#[derive(Clone, Debug, PartialEq)]
pub enum ChatOutcome {
    Reply(String),
    /// Another request holds the session; drop this one silently.
    Locked,
    Error(String),
}

impl ChatOutcome {
    /// Classifies a decoded server response.
    pub fn classify(ok: bool, response: ChatResponse) -> ChatOutcome {
        if let Some(error) = response.error {
            if error == SESSION_LOCKED {
                return ChatOutcome::Locked;
            }
            return ChatOutcome::Error(error);
        }
        match (ok, response.reply) {
            (true, Some(reply)) => ChatOutcome::Reply(reply),
            _ => ChatOutcome::Error("Unexpected server response".to_string()),
        }
    }

    pub fn unreachable_server(lang: Lang) -> ChatOutcome {
        ChatOutcome::Error(
            crate::i18n::t(
                lang,
                "Could not reach server",
                "Не удалось связаться с сервером",
            )
            .to_string(),
        )
    }
}

/// One conversation. `transcript` is everything rendered in the window;
/// `history` holds only accepted exchanges and is what gets sent to the
/// server for context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    history: Vec<ChatMessage>,
    in_flight: Option<String>,
    greeted: bool,
}

impl ChatSession {
    /// Adds the one-time greeting on first open.
    pub fn greet(&mut self, lang: Lang) -> bool {
        if self.greeted {
            return false;
        }
        self.greeted = true;
        self.transcript
            .push(ChatMessage::assistant(GREETING.get(lang)));
        true
    }

    /// Starts a send if the input is non-empty after trimming and no request
    /// is already in flight. The user message appears in the transcript
    /// immediately; history is only updated on success.
    pub fn begin_send(&mut self, input: &str) -> Option<String> {
        if self.in_flight.is_some() {
            return None;
        }
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        let message = message.to_string();
        self.transcript.push(ChatMessage::user(message.clone()));
        self.in_flight = Some(message.clone());
        Some(message)
    }

    /// Applies the outcome of the in-flight request. Returns the bot message
    /// appended to the transcript, if any.
    pub fn finish(&mut self, outcome: ChatOutcome) -> Option<String> {
        let sent = self.in_flight.take()?;
        match outcome {
            ChatOutcome::Reply(reply) => {
                self.history.push(ChatMessage::user(sent));
                self.history.push(ChatMessage::assistant(reply.clone()));
                self.transcript.push(ChatMessage::assistant(reply.clone()));
                Some(reply)
            }
            ChatOutcome::Locked => None,
            ChatOutcome::Error(error) => {
                let text = format!("ERROR: {error}");
                self.transcript.push(ChatMessage::assistant(text.clone()));
                Some(text)
            }
        }
    }

    pub fn waiting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_appears_once() {
        let mut session = ChatSession::default();
        assert!(session.greet(Lang::En));
        assert!(!session.greet(Lang::En));
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, Role::Assistant);
    }

    #[test]
    fn empty_and_whitespace_inputs_are_rejected() {
        let mut session = ChatSession::default();
        assert_eq!(session.begin_send(""), None);
        assert_eq!(session.begin_send("   \n"), None);
        assert_eq!(session.begin_send("  hi  "), Some("hi".to_string()));
    }

    #[test]
    fn only_one_request_in_flight() {
        let mut session = ChatSession::default();
        assert!(session.begin_send("first").is_some());
        assert!(session.waiting());
        assert_eq!(session.begin_send("second"), None);

        session.finish(ChatOutcome::Reply("sure".into()));
        assert!(!session.waiting());
        assert!(session.begin_send("second").is_some());
    }

    #[test]
    fn history_grows_only_on_success() {
        let mut session = ChatSession::default();
        session.begin_send("hello");
        session.finish(ChatOutcome::Error("quota".into()));
        assert!(session.history().is_empty());
        // Transcript has the user message plus the inline error.
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].content, "ERROR: quota");

        session.begin_send("hello again");
        session.finish(ChatOutcome::Reply("hi".into()));
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0], ChatMessage::user("hello again"));
        assert_eq!(session.history()[1], ChatMessage::assistant("hi"));
    }

    #[test]
    fn session_lock_is_silent() {
        let mut session = ChatSession::default();
        session.begin_send("hello");
        assert_eq!(session.finish(ChatOutcome::Locked), None);
        assert!(session.history().is_empty());
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.waiting());
    }

    #[test]
    fn outcome_classification() {
        let locked = ChatResponse {
            reply: None,
            error: Some(SESSION_LOCKED.to_string()),
        };
        assert_eq!(ChatOutcome::classify(false, locked), ChatOutcome::Locked);

        let err = ChatResponse {
            reply: None,
            error: Some("Daily limit reached".to_string()),
        };
        assert_eq!(
            ChatOutcome::classify(false, err),
            ChatOutcome::Error("Daily limit reached".to_string())
        );

        let ok = ChatResponse {
            reply: Some("hi".to_string()),
            error: None,
        };
        assert_eq!(
            ChatOutcome::classify(true, ok),
            ChatOutcome::Reply("hi".to_string())
        );

        assert!(matches!(
            ChatOutcome::classify(true, ChatResponse::default()),
            ChatOutcome::Error(_)
        ));
    }

    #[test]
    fn request_wire_shape() {
        let fingerprint = Fingerprint {
            os: "Linux".into(),
            cores: 4,
            memory: 8.0,
            timezone: "UTC".into(),
        };
        let history = vec![ChatMessage::user("a"), ChatMessage::assistant("b")];
        let request = ChatRequest {
            uid: "uid-1",
            fingerprint: &fingerprint,
            history: &history,
            current_message: "c",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["currentMessage"], "c");
        assert_eq!(json["fingerprintData"]["os"], "Linux");
        assert_eq!(json["history"][0]["role"], "user");
        assert_eq!(json["history"][1]["role"], "assistant");
    }
}
