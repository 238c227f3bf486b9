//! Form values and the field binding layer
//!
//! ```text
//! presentation ──set_direct──────┐
//!                                ├──> FieldStore ──> validator ──> CumulativeRecord
//! presentation ──set_field_value─┘
//! ```

pub mod record;
pub mod store;
pub mod value;

pub use record::CumulativeRecord;
pub use store::FieldStore;
pub use value::{DateRange, FieldValue, YearMonth};
