//! Analysis services and collaborator clients

pub mod api_response;
pub mod comment_analyzer;
pub mod feddit_client;
pub mod merge_window;
pub mod polarity;
pub mod readiness;
pub mod sentiment_client;
pub mod title_resolver;

pub use comment_analyzer::CommentAnalyzer;
pub use feddit_client::FedditClient;
pub use merge_window::MergeWindow;
pub use sentiment_client::SentimentClient;
pub use title_resolver::{TitleCache, TitleResolver};
