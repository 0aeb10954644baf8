/// Route token parsing
///
/// Contains the pure parser that turns registration tokens (`about`,
/// `{id}`, `{id:[0-9]+}`, `{*rest}`) into typed segments.

pub mod pattern;

// Re-export commonly used types
pub use pattern::{classify_token, is_capture_token, SegmentPattern, SegmentToken};
