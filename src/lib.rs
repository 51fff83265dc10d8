// Trialmatch - Clinical trial matching adapter
// Copyright (c) 2025 Trialmatch Contributors
// Licensed under the MIT License

//! # Trialmatch - Clinical Trial Matching Adapter
//!
//! Trialmatch turns a FHIR patient bundle into a query for a clinical trial
//! matching service and normalizes the answer into FHIR `ResearchStudy`
//! records wrapped in a `searchset` bundle.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Building** a trial query from the bundle's `Parameters` resources
//! - **Dispatching** it to the matching service with bearer authentication
//! - **Classifying** the response and reporting failures as typed errors
//! - **Enriching** matched studies from ClinicalTrials.gov (optional)
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Query building, response conversion, and the lookup surface
//! - [`adapters`] - External integrations (matching service, ClinicalTrials.gov)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trialmatch::config::BackendConfig;
//! use trialmatch::core::lookup::create_lookup;
//! use trialmatch::domain::PatientBundle;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BackendConfig::new("https://matcher.example.com/match", "token");
//!     let lookup = create_lookup(&config, None)?;
//!
//!     let bundle = PatientBundle::from_resources(vec![json!({
//!         "resourceType": "Parameters",
//!         "parameter": [{ "name": "zipCode", "valueString": "01886" }]
//!     })]);
//!
//!     let results = lookup.lookup(&bundle).await?;
//!     println!("Found {} trials", results.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`domain::Result`]. Configuration problems are
//! reported before any request is made; matching service failures carry a
//! snapshot of the raw response:
//!
//! ```rust
//! use trialmatch::config::BackendConfig;
//! use trialmatch::core::lookup::create_lookup;
//!
//! let err = create_lookup(&BackendConfig::default(), None).err().unwrap();
//! assert_eq!(err.to_string(), "Missing endpoint in configuration");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
