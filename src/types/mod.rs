// ReadnWin reader shared type definitions
// Each submodule defines types used across the session engine.

pub mod annotation;
pub mod audit;
pub mod book;
pub mod errors;
pub mod export;
pub mod progress;
pub mod session;
pub mod settings;
