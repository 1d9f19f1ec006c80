//! Form controls and the page-level aggregator.
//!
//! Leaf controls (`phone`, `email`, `address`, `file`, `fields`) each own the formatting and
//! validation of one attribute. [`page::PrefillForm`] holds one slot per control, derives
//! submittability and drives the submit lifecycle in [`submit`].

pub mod address;
pub mod draft;
pub mod email;
pub mod fields;
pub mod file;
pub mod page;
pub mod phone;
pub mod submit;

pub use draft::{DraftError, FormDraft};
pub use page::{FieldError, PrefillForm, Requirement};
pub use submit::{SubmitOutcome, SubmitRejection};
