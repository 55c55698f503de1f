pub mod columns;
pub mod error;
pub mod failure;
pub mod lesion;
pub mod options;
pub mod policy;
pub mod rules;

pub use error::{ModelError, Result};
pub use failure::{Category, FailureDescriptor, FailureRecord, RecordKey, StoreRecord};
pub use lesion::{LESION_SLOTS, LesionSlotId, SlotColumns};
pub use options::{NotApplicableMode, ReshapeOptions, RuleContext};
pub use policy::PolicyTable;
pub use rules::RuleId;
