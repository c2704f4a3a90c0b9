//! # devprint Testkit
//!
//! Testing utilities for devprint.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: deterministic fakes for every capability, bundled into a
//!   [`SimulatedEnvironment`] that can switch any of them off or make it fail
//! - **Golden vectors**: fold hash inputs and a full composite run with
//!   pinned outputs
//! - **Generators**: Proptest strategies for environments, navigators, and
//!   faulty capabilities
//!
//! ## Golden Vectors
//!
//! ```rust
//! use devprint_testkit::vectors::verify_hash_vectors;
//!
//! assert!(verify_hash_vectors().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use devprint_testkit::generators::environment;
//!
//! proptest! {
//!     #[test]
//!     fn capabilities_build(env in environment()) {
//!         let _caps = env.capabilities();
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use devprint_testkit::SimulatedEnvironment;
//!
//! let caps = SimulatedEnvironment::minimal().capabilities();
//! assert!(caps.canvas.is_none());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    AudioFault, AudioLifecycle, CanvasFault, FakeAudio, FakeCanvas, FakeDisplay, FakeFonts,
    FakeGraphics, FakeNavigator, FixedClock, SimulatedClock, SimulatedEnvironment, TickingClock,
    FIXED_NOW,
};
pub use vectors::{
    hash_vectors, verify_hash_vectors, CompositeVector, HashVector, MINIMAL_ENVIRONMENT,
    MINIMAL_USER_AGENT,
};
