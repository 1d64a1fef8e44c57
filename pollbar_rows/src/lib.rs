// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Survey rows as bar data.
//!
//! This crate sits between the data-fetch layer and the label planners:
//! - it normalizes loosely typed `{label, value, count}` rows into [`BarDatum`]s,
//! - it formats percentages the same way everywhere a rounded value is shown,
//! - it converts values into width fractions clamped to `[0, 100]`, and
//! - it orders categories through a pluggable [`CategoryOrdering`] strategy.
//!
//! Everything here is a pure function of its inputs; rows are recomputed from
//! scratch whenever the data changes.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
mod float;
mod format;
mod fraction;
mod order;
mod row;

pub use format::{NO_DATA_LABEL, format_percentage, respondents_label};
pub use fraction::{FractionScale, clamp_fraction, width_fractions};
pub use order::{
    CategoryOrdering, ExplicitOrder, KeywordHeuristic, OrderError, OrderResolver, OrderSource,
    OrdinalTemplate,
};
pub use row::{BarDatum, RawRow, RawValue};
