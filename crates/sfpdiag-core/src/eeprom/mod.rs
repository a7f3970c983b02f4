//! SFF-8472 EEPROM decoding.
//!
//! Each page family follows the same layered structure:
//! - `layout`: byte offsets, ranges and bit masks (source of truth)
//! - `reader`: safe byte access with explicit short-buffer errors
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! `identity` covers the A0h page (base identity 0..=63 and extended identity
//! 64..=95); `diagnostics` covers the A2h page (thresholds, realtime values,
//! status bits and the paged upper region). `common` holds the leaves shared
//! by both: checksums, length fields, vendor ASCII fields and unit scaling.
//!
//! Decoders are pure and contain no I/O. The total entry points (`decode_*`)
//! never fail and fall back to zero/unknown values on short buffers; the
//! strict entry points (`try_decode_*`) report short buffers as errors.

pub mod common;
pub mod diagnostics;
pub mod identity;
