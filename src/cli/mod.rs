pub mod commands;
pub mod output;

pub use commands::{GitStateArgs, Query};
pub use output::{execute, QueryOutput};
