//! Application layer
//!
//! Contains the engine services and the policy configuration they consume.
//! Services hold only immutable policy tables behind `Arc` - every
//! evaluation is a pure function of its inputs.

pub mod amount_parser;
pub mod amount_service;
pub mod eligibility_service;
pub mod loan_service;
pub mod ltv_engine;
pub mod policy;
pub mod region_classifier;
pub mod share_service;

pub use amount_parser::normalize_amount;
pub use amount_service::AmountService;
pub use eligibility_service::{EligibilityInput, EligibilityService};
pub use loan_service::{ltv_from_required, ltv_limit, reconcile, EditedField, ReconciledLine};
pub use ltv_engine::{LtvEngine, LtvInput};
pub use policy::PolicyTables;
pub use region_classifier::{CountyRuling, RegionClassifier};
pub use share_service::{ShareLimitInput, ShareLimitLine, ShareService};
