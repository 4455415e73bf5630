pub mod draw;
pub mod error;
pub mod proc;
