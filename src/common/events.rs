use super::types::Reply;

/// Sự kiện từ tầng mạng gửi lên UI.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    ReplyReceived(Reply),
}
