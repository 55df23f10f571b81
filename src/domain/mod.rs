pub mod credential;
pub mod diff;
pub mod notice;
pub mod summary;
pub mod workspace;
