/*!
 * Core Module
 * Shared types, errors, and limits for the thread PAL
 */

pub mod errors;
pub mod limits;
pub mod types;

pub use errors::ThreadError;
pub use types::{Generation, StackSize, ThreadId, ThreadResult};
