use crate::common::{ChatCommand, ChatMessage, Language, Reply};

pub const GREETING: &str = "Hello! Welcome to LCB Fertilizers. How can I help you today? | नमस्ते! LCB उर्वरक में आपका स्वागत है। मैं आपकी कैसे सहायता कर सकता हूं?";

/// Hành động của người dùng, do các component trả về cho store xử lý.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    EditInput(String),
    Submit,
    SelectLanguage(Language),
    PickQuickQuestion(String),
}

/// Trạng thái cục bộ của UI.
///
/// Messages are append-only; at most one turn is pending at a time.
pub struct ConversationStore {
    messages: Vec<ChatMessage>,
    pending: bool,
    language: Language,
    input_text: String,
    scroll_requested: bool,
}

impl ConversationStore {
    pub fn new(language: Language) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            pending: false,
            language,
            input_text: String::new(),
            scroll_requested: true,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn dispatch(&mut self, action: UiAction) -> Option<ChatCommand> {
        match action {
            UiAction::EditInput(text) => {
                self.input_text = text;
                None
            }
            UiAction::Submit => {
                let text = self.input_text.clone();
                self.submit(text)
            }
            UiAction::SelectLanguage(language) => {
                if language != self.language {
                    log::debug!("Reply language set to {language:?}");
                    self.language = language;
                }
                None
            }
            UiAction::PickQuickQuestion(question) => {
                self.input_text = question.clone();
                self.submit(question)
            }
        }
    }

    /// Starts a turn. Returns the command for the transport, or `None` if the
    /// text is blank or a reply is still pending.
    pub fn submit(&mut self, text: String) -> Option<ChatCommand> {
        if self.pending || text.trim().is_empty() {
            return None;
        }

        self.push(ChatMessage::user(text.clone()));
        self.input_text.clear();
        self.pending = true;

        Some(ChatCommand::SendMessage {
            text,
            language: self.language,
        })
    }

    /// Ends the pending turn with exactly one assistant message.
    pub fn settle(&mut self, reply: Reply) {
        if !self.pending {
            log::warn!("Dropping reply that arrived with no turn pending");
            return;
        }

        self.push(ChatMessage::assistant(reply.into_text()));
        self.pending = false;
    }

    /// Canned questions for the current language, offered until the user's
    /// first message.
    pub fn quick_questions(&self) -> &'static [&'static str] {
        if self.messages.iter().any(|message| message.is_user) {
            &[]
        } else {
            self.language.quick_questions()
        }
    }

    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.scroll_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConversationStore {
        ConversationStore::new(Language::En)
    }

    #[test]
    fn starts_with_greeting_and_idle() {
        let store = store();
        assert_eq!(store.messages().len(), 1);
        assert_eq!(store.messages()[0].text, GREETING);
        assert!(!store.messages()[0].is_user);
        assert!(!store.is_pending());
    }

    #[test]
    fn a_turn_adds_exactly_two_messages() {
        let mut store = store();
        store.dispatch(UiAction::EditInput("What is urea?".to_string()));

        let command = store.dispatch(UiAction::Submit);
        assert_eq!(
            command,
            Some(ChatCommand::SendMessage {
                text: "What is urea?".to_string(),
                language: Language::En,
            })
        );
        assert_eq!(store.messages().len(), 2);
        assert!(store.messages()[1].is_user);
        assert!(store.is_pending());
        assert!(store.input_text().is_empty());

        store.settle(Reply::Delivered("Hi".to_string()));
        assert_eq!(store.messages().len(), 3);
        assert_eq!(store.messages()[2].text, "Hi");
        assert!(!store.messages()[2].is_user);
        assert!(!store.is_pending());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut store = store();
        for blank in ["", "   ", "\n\t "] {
            store.dispatch(UiAction::EditInput(blank.to_string()));
            assert_eq!(store.dispatch(UiAction::Submit), None);
            assert_eq!(store.messages().len(), 1);
            assert!(!store.is_pending());
        }
    }

    #[test]
    fn submit_is_ignored_while_pending() {
        let mut store = store();
        assert!(store.submit("first".to_string()).is_some());

        assert_eq!(store.submit("second".to_string()), None);
        assert_eq!(
            store.dispatch(UiAction::PickQuickQuestion("third".to_string())),
            None
        );
        assert_eq!(store.messages().len(), 2);
        assert!(store.is_pending());
    }

    #[test]
    fn failed_reply_shows_apology_and_unblocks_input() {
        let mut store = ConversationStore::new(Language::Hi);
        store.submit("खाद".to_string());
        store.settle(Reply::failed(Language::Hi));

        assert_eq!(store.messages().last().unwrap().text, Language::Hi.apology());
        assert!(!store.is_pending());
        assert!(store.submit("फिर से".to_string()).is_some());
    }

    #[test]
    fn stray_reply_is_dropped() {
        let mut store = store();
        store.settle(Reply::Delivered("unexpected".to_string()));
        assert_eq!(store.messages().len(), 1);
    }

    #[test]
    fn quick_question_submits_exact_text_once() {
        let mut store = store();
        let question = store.quick_questions()[0];

        let command = store.dispatch(UiAction::PickQuickQuestion(question.to_string()));
        assert_eq!(
            command,
            Some(ChatCommand::SendMessage {
                text: question.to_string(),
                language: Language::En,
            })
        );
        assert_eq!(store.messages().len(), 2);
        assert_eq!(store.messages()[1].text, question);
        assert!(store.quick_questions().is_empty());
    }

    #[test]
    fn language_change_only_affects_later_turns() {
        let mut store = store();
        store.submit("hello".to_string());
        store.settle(Reply::Delivered("Hi".to_string()));
        let before = store.messages().to_vec();

        store.dispatch(UiAction::SelectLanguage(Language::Hinglish));
        assert_eq!(store.messages(), before.as_slice());

        let command = store.submit("kya haal hai".to_string());
        assert_eq!(
            command,
            Some(ChatCommand::SendMessage {
                text: "kya haal hai".to_string(),
                language: Language::Hinglish,
            })
        );
    }

    #[test]
    fn quick_questions_follow_selected_language() {
        let mut store = store();
        assert_eq!(store.quick_questions(), Language::En.quick_questions());
        store.dispatch(UiAction::SelectLanguage(Language::Hi));
        assert_eq!(store.quick_questions(), Language::Hi.quick_questions());
    }

    #[test]
    fn scroll_is_requested_after_each_append() {
        let mut store = store();
        assert!(store.take_scroll_request());
        assert!(!store.take_scroll_request());

        store.submit("hello".to_string());
        assert!(store.take_scroll_request());
        store.settle(Reply::Delivered("Hi".to_string()));
        assert!(store.take_scroll_request());
        assert!(!store.take_scroll_request());
    }
}
