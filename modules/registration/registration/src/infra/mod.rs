pub mod http;
pub mod submission;

pub use submission::HttpSubmissionClient;
