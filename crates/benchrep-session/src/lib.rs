//! Benchrep Session - Repetition Counting Pipeline
//!
//! This crate turns noisy, partially-missing 2D joint positions into a
//! repetition count for a bench-press movement:
//!
//! - **Arm Selection**: per-side confidence gating and a configurable
//!   fusion policy producing zero-or-one elbow angle per frame
//! - **Signal Smoothing**: exponential moving average over the raw angle
//! - **Rep Detection**: a hysteresis state machine with time-based
//!   cooldown debounce
//! - **Calibration**: raw-angle min/max tracking for threshold discovery
//! - **Trajectory Trail**: bounded wrist-position history for display
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//! use benchrep_session::{ArmPolicy, RepSession, SessionConfig};
//!
//! let config = SessionConfig::builder()
//!     .thresholds(105.0, 150.0, 170.0)
//!     .cooldown_secs(0.5)
//!     .arm_policy(ArmPolicy::AverageOfVisible)
//!     .build();
//!
//! let mut session = RepSession::new(config).unwrap();
//!
//! // One external loop feeds one frame at a time:
//! let report = session.update(None, Instant::now());
//! if report.rep_completed {
//!     // fire a one-shot alert
//! }
//! ```

#![forbid(unsafe_code)]

pub mod calibration;
pub mod config;
pub mod geometry;
pub mod machine;
pub mod rate;
pub mod selector;
pub mod session;
pub mod smoother;
pub mod trail;

// Re-export main types for convenience
pub use calibration::{CalibrationSnapshot, CalibrationTracker};
pub use config::{ArmPolicy, SessionConfig, SessionConfigBuilder, SessionMode};
pub use machine::{RepCounter, RepPhase, RepUpdate};
pub use rate::FrameRateEstimator;
pub use selector::{AngleSource, ArmAngle, ArmSelector};
pub use session::{FrameReport, RepSession, SessionId, SessionStats};
pub use smoother::AngleSmoother;
pub use trail::WristTrail;

use benchrep_core::CoreError;
use thiserror::Error;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Unified error type for the counting pipeline
#[derive(Debug, Error)]
pub enum SessionError {
    /// Invalid configuration, rejected at session construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error from core types or the detector adapter
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ArmPolicy, SessionConfig, SessionMode};
    pub use crate::machine::RepPhase;
    pub use crate::session::{FrameReport, RepSession, SessionStats};
    pub use crate::{Result, SessionError};
}
