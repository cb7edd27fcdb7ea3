//! # Benchrep Core
//!
//! Core types and contracts for the benchrep repetition-counting workspace.
//!
//! This crate provides the foundational building blocks shared across the
//! benchrep ecosystem:
//!
//! - **Core Data Types**: [`PoseFrame`], [`Keypoint`], [`KeypointType`],
//!   [`Side`], and [`Confidence`] for representing per-frame 2D pose data
//!   in the 17-keypoint COCO topology.
//!
//! - **Error Types**: [`CoreError`] for contract violations at the
//!   detector boundary and invalid configuration.
//!
//! - **Traits**: [`PoseDetector`], the adapter seam to whichever
//!   pose-estimation backend supplies frames.
//!
//! ## Example
//!
//! ```rust
//! use benchrep_core::{Confidence, Keypoint, KeypointType};
//!
//! // Create a keypoint with high confidence
//! let keypoint = Keypoint::new(
//!     KeypointType::RightElbow,
//!     0.5,
//!     0.3,
//!     Confidence::new(0.95).unwrap(),
//! );
//!
//! assert!(keypoint.is_visible());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types at the crate root
pub use error::{CoreError, CoreResult};
pub use traits::PoseDetector;
pub use types::{Confidence, Keypoint, KeypointType, PoseFrame, Side};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of keypoints per subject (COCO format)
pub const KEYPOINT_COUNT: usize = 17;

/// Default confidence threshold for keypoint visibility
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// Prelude module for convenient imports.
///
/// ```rust
/// use benchrep_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::traits::PoseDetector;
    pub use crate::types::{Confidence, Keypoint, KeypointType, PoseFrame, Side};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_valid() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(KEYPOINT_COUNT, 17);
        assert!(DEFAULT_VISIBILITY_THRESHOLD > 0.0);
        assert!(DEFAULT_VISIBILITY_THRESHOLD < 1.0);
    }
}
