//! Orchestration services for the Hebo health assistant.
//!
//! Three services sit between the HTTP layer and the collaborators
//! (completion backend, SQLite store):
//!
//! - [`HealthProfileService`] - scores free-text food histories into
//!   structured health records
//! - [`ConversationService`] - answers symptom/medicine questions over a
//!   bounded chat transcript, with paired deletion
//! - [`UserProfileService`] - lazily materializes user profiles
//!
//! Collaborators are constructed once at startup and injected; services
//! hold no ambient globals.

mod conversation;
mod error;
mod health;
mod locks;
mod profile;
pub mod prompts;

pub use conversation::ConversationService;
pub use error::ServiceError;
pub use health::HealthProfileService;
pub use locks::UserLocks;
pub use profile::{HealthRecord, UserProfile, UserProfileService};
