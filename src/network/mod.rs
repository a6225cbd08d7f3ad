pub mod client;
pub mod transport;

pub use client::ChatClient;
pub use transport::ChatTransport;
