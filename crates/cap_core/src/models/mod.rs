//! Input and output records for the projection engine.
//!
//! Everything here mirrors the persistence layer's row shapes: base athlete
//! rows, annual/monthly compensation rows with supplemental buckets, and
//! string-encoded field overrides. All inputs are read-only snapshots for
//! the duration of one resolution pass.

pub mod athlete;
pub mod compensation;
pub mod overrides;

pub use athlete::{AdditionalDataRow, AthleteBase, ClassYear, RedshirtStatus};
pub use compensation::{
    AnnualCompensationRecord, CompRecord, CompensationRow, Month, MonthlyBreakdown,
    MonthlyCompensationRecord, SupplementalAmount, ALL_MONTHS, ANNUAL_MONTH_CODE,
};
pub use overrides::{
    decode_value, FieldKind, FieldOverrideRow, OverrideField, OverrideValue, ALL_OVERRIDE_FIELDS,
};
