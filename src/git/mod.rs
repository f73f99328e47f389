pub mod command;
pub mod inspector;
pub mod nonblocking;
pub mod parse;
pub mod repository;

pub use command::GitCommand;
pub use inspector::Inspector;
pub use nonblocking::AsyncInspector;
pub use repository::{find_repository_root, is_repository};
