//! Loyalty points service for retail purchases.
//!
//! The domain logic converts purchase amounts into loyalty points, accrues
//! them onto a customer's lifetime balance, and reports a month-by-month
//! breakdown over a date window. Persistence is abstracted behind ports so
//! the logic can run against any store implementation.

pub mod adapters;
pub mod commands;
pub mod domain;
pub mod ports;
