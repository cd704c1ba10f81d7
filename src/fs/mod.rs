//! File system access behind a trait so inspectors and mutations can run
//! against an in-memory tree in tests.

mod mock;
mod real;
#[path = "trait.rs"]
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::FileSystem;
pub use real::RealFileSystem;
