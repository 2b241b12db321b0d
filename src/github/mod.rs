pub mod client;

pub use client::{BoardService, GitHubClient};
