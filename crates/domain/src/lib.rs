// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod distribution;
mod eligibility;
mod error;
mod policy;
mod types;

#[cfg(test)]
mod tests;

pub use distribution::Distribution;
pub use eligibility::{EligibilityReason, evaluate_eligibility};
pub use error::DomainError;
pub use policy::{ClaimPolicy, ExpiryPolicy};
pub use types::{
    AlertStatus, AreaId, BookingAlert, Capability, ServiceId, ShiftWindow, StaffId, StaffProfile,
};
