//! REST adapters for the remote timesheet service

pub mod client;
pub mod gateway;

pub use client::{RestClient, RestClientBuilder};
pub use gateway::RestTimesheetGateway;
