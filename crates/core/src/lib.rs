//! Core library for soptools
//!
//! This crate implements the **Functional Core** of the soptools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The soptools project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`soptools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`soptools`**: I/O operations and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! The core crate is organized by domain:
//!
//! - [`sop`]: Section extraction and indexing over decoded SOP text
//! - [`calc`]: Closed-form molecular biology calculators
//!
//! Each module contains:
//!
//! - **Domain models**: Structured types representing inputs and outputs
//! - **Transformation functions**: Pure functions over those models
//! - **Comprehensive tests**: Unit tests using fixture data (no mocking)
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use soptools_core::sop::parse_sections;
//!
//! let text = "1. OVERVIEW\nScope of this procedure.\n2. MATERIALS AND METHODS\nUse PCR.";
//! let sections = parse_sections(text);
//!
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].title, "OVERVIEW");
//! ```

pub mod calc;
pub mod sop;
