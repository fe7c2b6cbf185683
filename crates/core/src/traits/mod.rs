//! Collaborator traits
//!
//! The command engine never talks to a concrete engine directly. These traits
//! let backends be swapped by configuration and replaced with mocks in tests.
//!
//! ```text
//! Speech:
//!   - SpeechToText: Audio → transcript (or a RecognitionFailure)
//!   - Narrator: Text → spoken audio, fire-and-forget
//!
//! Storage:
//!   - StateStore: whole-document load and save
//! ```

mod speech;
mod store;

pub use speech::{Narrator, SpeechToText};
pub use store::StateStore;
