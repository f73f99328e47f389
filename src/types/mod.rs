pub mod general;
pub mod git;

pub use general::CommandOutput;
pub use git::{RepositoryReport, RevCount, StatusCounts};
