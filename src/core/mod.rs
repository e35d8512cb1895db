//! Core data types for problem-list conversion.
//!
//! This module provides the fundamental types used throughout the
//! library:
//!
//! - [`CodeEntry`]: one (code, description) row of the reference table
//! - [`Candidate`]: a candidate problem phrase segmented from a note
//! - [`NoteDocument`]: the segmented note, candidates in note order
//! - [`CodeId`], [`Confidence`], [`Modifier`]: identifier and
//!   classification types
//!
//! Matching uses normalized text (lowercase, alphanumeric tokens);
//! both [`CodeEntry`] and [`Candidate`] pre-compute their normalized
//! forms on construction so the matching engine never re-tokenizes.
//!
//! [`CodeEntry`]: entry::CodeEntry
//! [`Candidate`]: candidate::Candidate
//! [`NoteDocument`]: note::NoteDocument
//! [`CodeId`]: types::CodeId
//! [`Confidence`]: types::Confidence
//! [`Modifier`]: types::Modifier

pub mod candidate;
pub mod entry;
pub mod note;
pub mod types;
