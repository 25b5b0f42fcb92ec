//! # Reconciliation Engine
//!
//! Converges directory records onto desired identity states.
//!
//! This crate provides the core of identity reconciliation:
//! - Existence probing and create-vs-edit resolution
//! - Attribute staging with computed defaults and change detection
//! - Secret comparison against stored hashes, so unchanged secrets are
//!   never rewritten
//! - Group membership updates that only touch groups missing the member
//! - Dry-run reporting with the exact changes a live pass would make
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────────┐     ┌────────────────┐
//! │ DesiredState │────►│   Reconciler    │────►│   Directory    │
//! │ (per pass)   │     │                 │     │   (port)       │
//! └──────────────┘     └────────┬────────┘     └────────────────┘
//!                               │
//!              ┌────────────────┼────────────────┐
//!              ▼                ▼                ▼
//!       ┌────────────┐  ┌──────────────┐  ┌────────────┐
//!       │ attributes │  │  membership  │  │   delete   │
//!       │  (+secret) │  │ (per group)  │  │ (absent)   │
//!       └────────────┘  └──────────────┘  └────────────┘
//! ```
//!
//! A pass is sequential and touches one identity; it suspends only at
//! directory I/O. Concurrent passes over the same identity are not
//! coordinated here — the probe-then-mutate sequence relies on external
//! mutual exclusion per identity.
//!
//! ## Example
//!
//! ```ignore
//! use steward_reconcile::{DesiredState, Reconciler};
//!
//! let desired = DesiredState::present("jsmith")
//!     .with_attribute("firstname", "John")
//!     .with_attribute("lastname", "Smith")
//!     .with_secret("s3cr3t")
//!     .with_group("staff");
//!
//! let engine = Reconciler::new(directory);
//! let outcome = engine.reconcile(&desired).await?;
//!
//! if outcome.changed {
//!     println!("converged: {:?}", outcome.changed_attributes);
//! }
//! ```

pub mod attributes;
pub mod defaults;
pub mod desired;
pub mod engine;
pub mod error;
pub mod membership;
pub mod outcome;
pub mod secret;

// Re-exports for convenience
pub use attributes::reconcile_attributes;
pub use desired::{DesiredState, Presence};
pub use engine::Reconciler;
pub use error::{ReconcileError, ReconcileResult};
pub use membership::MembershipReconciler;
pub use outcome::ReconcileOutcome;
pub use secret::needs_update;
