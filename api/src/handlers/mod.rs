//! HTTP handlers
//!
//! Axum request handlers for the API endpoints. Handlers stay thin: they
//! normalize wire inputs and delegate to the engine services.

pub mod amounts;
pub mod eligibility;
pub mod loans;
pub mod ltv;
pub mod memo;
pub mod regions;
pub mod shares;

pub use amounts::normalize;
pub use eligibility::validate;
pub use loans::reconcile_line;
pub use ltv::{compute, from_required};
pub use memo::generate as generate_memo;
pub use regions::classify;
pub use shares::limit as share_limit;
