//! Tutor chat session.
//!
//! A session binds the assistant to one lesson's cleaned transcript and owns
//! an append-only conversation. Sends are single-flight: `send` holds the
//! session exclusively for the duration of the call, so a second send cannot
//! even be constructed while one is in flight. Model failures never surface
//! as errors here; the student sees a fallback sentence instead, because a
//! broken line of chat is acceptable where a broken lesson is not. A send
//! abandoned mid-flight (caller timeout, navigation) is closed the same way,
//! so the transcript never ends on an unanswered user message.

use std::sync::Arc;
use vidya_core::chat::ChatMessage;
use vidya_core::model::{ChatTurn, GenerateRequest, ModelClient};
use vidya_core::ChatSessionError;

/// Greeting seeded into every new session.
const GREETING: &str = "Hi! I'm your AI tutor. I've analyzed this lesson. Is there anything \
specific you found confusing, or shall I ask you a question to test your knowledge?";

/// Shown in place of a reply when the model call fails.
const CONNECT_FALLBACK: &str = "I'm having trouble connecting right now. Please try again.";

/// Shown when the model replies with empty text.
const EMPTY_REPLY_FALLBACK: &str = "I didn't catch that.";

/// A linear tutor conversation over one lesson.
pub struct TutorSession {
    client: Arc<dyn ModelClient>,
    /// The lesson's cleaned transcript; the assistant's only knowledge context.
    context: String,
    messages: Vec<ChatMessage>,
}

impl TutorSession {
    /// Opens a session over a lesson's cleaned transcript, seeded with the
    /// tutor greeting.
    pub fn new(client: Arc<dyn ModelClient>, cleaned_transcript: impl Into<String>) -> Self {
        Self {
            client,
            context: cleaned_transcript.into(),
            messages: vec![ChatMessage::model(GREETING)],
        }
    }

    /// The full transcript, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Sends a student message and returns the tutor's reply.
    ///
    /// The student message is appended optimistically before the model call;
    /// after a failed call the transcript therefore contains that message
    /// plus exactly one fallback reply. Dropping the returned future
    /// mid-await closes the turn the same way, leaving the session usable.
    pub async fn send(&mut self, text: &str) -> Result<ChatMessage, ChatSessionError> {
        if text.trim().is_empty() {
            return Err(ChatSessionError::EmptyMessage);
        }

        self.messages.push(ChatMessage::user(text));
        let request = self.build_request(text);
        let client = Arc::clone(&self.client);

        let guard = TurnGuard {
            session: Some(self),
        };
        let outcome = client.generate(request).await;
        let session = guard.disarm();

        let reply = match outcome {
            Ok(reply_text) if !reply_text.trim().is_empty() => {
                ChatMessage::model(reply_text.trim())
            }
            Ok(_) => ChatMessage::model(EMPTY_REPLY_FALLBACK),
            Err(err) => {
                tracing::warn!(error = %err, "tutor reply failed, falling back");
                ChatMessage::model(CONNECT_FALLBACK)
            }
        };

        session.messages.push(reply.clone());
        Ok(reply)
    }

    /// Builds the model request: the fixed context-binding priming turns,
    /// then every prior message in order, then the new text as the prompt.
    fn build_request(&self, text: &str) -> GenerateRequest {
        let mut history = vec![
            ChatTurn::user(format!(
                "You are a helpful AI tutor assistant. You have access to the following lesson \
                 content: \"{}\".\nYour goal is to help the student understand this specific \
                 lesson.\nTrack the student's learning behavior. If they seem confused, offer \
                 simpler explanations.\nAlways ask for feedback at the end of your explanation, \
                 like \"Does that make sense?\" or \"Shall we try another example?\"",
                self.context
            )),
            ChatTurn::model("Understood. I am ready to help the student with this lesson."),
        ];
        // All messages before the one just appended.
        history.extend(
            self.messages[..self.messages.len() - 1]
                .iter()
                .map(|m| ChatTurn {
                    role: m.role,
                    text: m.text.clone(),
                }),
        );

        GenerateRequest::new(text).with_history(history)
    }
}

/// Closes a turn whose send future was dropped mid-await.
///
/// A send appends the user message before the model call; if the caller
/// abandons the future, the guard appends the fallback reply so the
/// transcript keeps the "user message plus exactly one reply" shape and the
/// session stays usable.
struct TurnGuard<'a> {
    session: Option<&'a mut TutorSession>,
}

impl<'a> TurnGuard<'a> {
    fn disarm(mut self) -> &'a mut TutorSession {
        // Present until disarmed; Drop only acts while still armed.
        self.session.take().unwrap()
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            session.messages.push(ChatMessage::model(CONNECT_FALLBACK));
        }
    }
}
