//! OpenTripPlanner integration
//!
//! [`OtpClient`] talks to the OTP REST API (`/otp/routers/{router}` and its
//! `/plan` endpoint) and turns plan responses into [`Itinerary`] values.

pub mod client;
pub mod types;

pub use client::{
    parse_departure_date, parse_departure_time, Departure, OtpClient, OtpError, OtpStatus,
    PlanRequest,
};
pub use types::{Itinerary, Leg};
