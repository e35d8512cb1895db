//! Note input and segmentation.
//!
//! This module turns raw note text into [`NoteDocument`] candidates:
//!
//! - **Abbreviation expansion**: common clinical shorthand (DM2, HTN,
//!   AKI, ...) is rewritten to full diagnosis names on word boundaries
//! - **Segmentation**: the expanded text is split on sentence and
//!   clause delimiters (`.`, `;`, `,`, newline) in a single pass
//!
//! ## Example
//!
//! ```rust
//! use cmsify::parsing::note::segment_note;
//!
//! let note = segment_note("DM2 on metformin, sugars okay.");
//! assert_eq!(note.candidates.len(), 2);
//! assert_eq!(note.candidates[0].text, "Type 2 diabetes mellitus on metformin");
//! ```
//!
//! [`NoteDocument`]: crate::core::note::NoteDocument

pub mod abbrev;
pub mod note;
