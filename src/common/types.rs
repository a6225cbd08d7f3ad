use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model đại diện một tin nhắn chat.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text.into(), true)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text.into(), false)
    }

    fn new(text: String, is_user: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            is_user,
            timestamp: Utc::now(),
        }
    }
}

/// Ngôn ngữ trả lời mà người dùng chọn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Hinglish,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Hinglish];

    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Hinglish => "Hinglish",
        }
    }

    /// Shown in place of a reply when the chat endpoint cannot be reached.
    pub fn apology(self) -> &'static str {
        match self {
            Language::En => "Sorry, I am having trouble connecting. Please try again later.",
            Language::Hi => {
                "क्षमा करें, मुझे कनेक्ट करने में समस्या हो रही है। कृपया बाद में पुनः प्रयास करें।"
            }
            Language::Hinglish => {
                "Sorry, mujhe connect karne mein problem ho rahi hai. Please baad mein try karein."
            }
        }
    }

    pub fn quick_questions_heading(self) -> &'static str {
        match self {
            Language::En | Language::Hinglish => "Quick questions:",
            Language::Hi => "त्वरित प्रश्न:",
        }
    }

    pub fn quick_questions(self) -> &'static [&'static str] {
        match self {
            Language::En => &[
                "What products do you offer?",
                "Tell me about your fertilizers",
            ],
            Language::Hi => &["आप कौन से उत्पाद पेश करते हैं?", "आपसे कैसे संपर्क करें?"],
            Language::Hinglish => &[
                "Aap kaunse products offer karte hain?",
                "Apne fertilizers ke baare mein bataiye",
            ],
        }
    }
}

/// Kết quả của một lượt gửi: câu trả lời thật hoặc lời xin lỗi đã bản địa hoá.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Delivered(String),
    Failed(String),
}

impl Reply {
    pub fn failed(language: Language) -> Self {
        Reply::Failed(language.apology().to_string())
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Reply::Delivered(_))
    }

    pub fn into_text(self) -> String {
        match self {
            Reply::Delivered(text) | Reply::Failed(text) => text,
        }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub language: Language,
}

/// Response body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}
