pub mod client;
pub mod models;
pub mod source;

pub use client::GithubClient;
pub use source::InvitationSource;
