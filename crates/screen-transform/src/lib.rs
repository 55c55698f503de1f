//! Record reshaping for rule evaluation.
//!
//! - **ic**: identity-card derived fields (birth date and validity flags) for
//!   the general view
//! - **lesion**: explosion of the four lesion slots into one row per slot for
//!   the lesion view

pub mod ic;
pub mod lesion;

pub use ic::{IcDerivation, derive_ic, general_view, resolve_century, valid_ic_digits};
pub use lesion::{
    VIEW_DESCRIPTORS, compute_lesion_filled, explode_lesions, lesion_view,
    normalize_not_applicable,
};
