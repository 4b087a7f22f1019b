// Adapters layer: concrete implementations of the domain ports over HTTP.

pub mod gemini;
pub mod http;

pub use gemini::GeminiChatClient;
pub use http::HttpBloodBankApi;
