//! Application lifecycle controller for the GensanWorks job-matching portal.
//!
//! The crate owns the rules that move a job application between statuses and the projections
//! that keep the PESO referral record and the applicant's employment status aligned with it.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
