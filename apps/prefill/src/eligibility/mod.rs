//! Composite controls whose dependent fields follow a primary choice.
//!
//! Each submodule exposes a plain state struct, an action enum and a pure
//! `reduce(&state, action) -> state`. Clearing of dependent fields happens inside the
//! transition itself, so no sequence of actions can leave a stale value behind.

pub mod disability;
pub mod education;
pub mod military;
pub mod veteran;

pub use disability::{DisabilityAction, DisabilityState, Presence};
pub use education::{EducationAction, EducationEdit, EducationRecord, MajorEdit};
pub use military::{MilitaryAction, MilitaryState};
pub use veteran::{VeteranAction, VeteranState};
