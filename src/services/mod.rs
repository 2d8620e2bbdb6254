//! Orchestration of one extraction and the collaborators it drives.

pub mod aggregator;
pub mod aws;
pub mod extraction_service;
pub mod ports;
pub mod record_backend;
pub mod sqlite_store;

#[cfg(test)]
pub mod fakes;
