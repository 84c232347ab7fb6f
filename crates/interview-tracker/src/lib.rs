//! Interview approval tracking.
//!
//! A candidate's [`domain::Document`] travels through the ordered steps of a
//! [`workflows::Workflow`] generated from a [`workflows::WorkflowTemplate`]. The
//! [`requests::Request`] aggregate ties the two together with the requesting user and an
//! append-only event log.

pub mod config;
pub mod domain;
pub mod error;
pub mod requests;
pub mod telemetry;
pub mod workflows;
