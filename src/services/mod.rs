//! Service clients.
//!
//! Each module declares its endpoint descriptors and a small typed model
//! surface, then delegates every call to the shared
//! [`OperationExecutor`](crate::core::OperationExecutor). The wrappers own
//! exactly three things: required-parameter validation, descriptor plus DTO
//! declarations, and (for long-running resources) a poller-backed wait
//! helper.

pub mod assistant;
pub mod discovery;
pub mod language_translator;
pub mod speech_to_text;
pub mod text_to_speech;
