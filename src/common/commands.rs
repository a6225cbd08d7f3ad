use super::types::Language;

/// Lệnh UI gửi xuống tầng mạng.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Một lượt hỏi: nội dung người dùng gõ và ngôn ngữ đang chọn.
    SendMessage { text: String, language: Language },
}
