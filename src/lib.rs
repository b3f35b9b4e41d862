// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Hand-pinch gesture detection and grab / move / release manipulation of
//! scene objects.
//!
//! Each captured frame yields a thumb tip and an index tip in normalized
//! image coordinates. The fingertips are classified as pinched or not, the
//! index tip is projected into the view, and a small state machine turns
//! the result into commands against one externally-owned object at a time.
//!
//! # Key entry points
//!
//! - [`manipulation::PinchController`] - the per-frame driver
//! - [`manipulation::Scene`] - what the host scene must provide
//! - [`gesture::PinchDetector`] - the pure pinch classifier
//! - [`manipulation::transition`] - the pure state machine
//! - [`options::Options`] - thresholds and viewport configuration
//!
//! # Architecture
//!
//! Landmark inference and pinch detection may run on a background
//! [`pipeline::DetectionWorker`] thread, which publishes the newest reading
//! through a lock-free triple buffer. Commands are only ever emitted on the
//! scene's own thread, by the controller, so the held object is mutated
//! from one place.
//!
//! | Current | Event | Condition | Next | Command |
//! |---|---|---|---|---|
//! | Idle | Pinched | object under pinch point | Grabbing | `BeginGrab` |
//! | Idle | Pinched | nothing under pinch point | Idle | - |
//! | Idle | NoPinch | - | Idle | - |
//! | Grabbing | Pinched | - | Grabbing | `MoveTo` |
//! | Grabbing | NoPinch | - | Idle | `EndGrab` |

pub mod error;
pub mod gesture;
pub mod landmark;
pub mod manipulation;
pub mod options;
pub mod pipeline;
pub mod sim;
pub mod trace;
pub mod util;
