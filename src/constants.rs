//! `sdp-elements` Constants
//!
//! This module contains the constants used throughout the decoder: wire
//! layout of the type descriptor byte and default limits.

/// Default number of nested sequences/alternatives accepted by the parser
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Shift of the 5-bit type code inside the type descriptor byte
pub const TYPE_DESCRIPTOR_SHIFT: u8 = 3;

/// Mask of the 3-bit size descriptor inside the type descriptor byte
pub const SIZE_DESCRIPTOR_MASK: u8 = 0x07;

/// Maximum number of ranges in an attribute filter
pub const MAX_FILTER_RANGES: usize = 8;

/// Maximum number of individual IDs in an attribute filter
pub const MAX_FILTER_IDS: usize = 16;
