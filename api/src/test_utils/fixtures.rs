//! Test fixtures

use std::sync::Arc;

use crate::adapters::RemoteNormalizerImpl;
use crate::app::{
    AmountService, EligibilityService, LtvEngine, PolicyTables, RegionClassifier, ShareService,
};
use crate::domain::entities::{LoanLine, LoanStatus, Owner};
use crate::AppState;

/// The full stateless service stack over the default policy tables
pub struct EngineStack {
    pub tables: Arc<PolicyTables>,
    pub regions: Arc<RegionClassifier>,
    pub ltv_engine: Arc<LtvEngine>,
    pub eligibility: Arc<EligibilityService>,
    pub shares: Arc<ShareService>,
}

pub fn engine_stack() -> EngineStack {
    let tables = Arc::new(PolicyTables::default());
    let regions = Arc::new(RegionClassifier::new(tables.clone()));
    let ltv_engine = Arc::new(LtvEngine::new(tables.clone(), regions.clone()));
    let eligibility = Arc::new(EligibilityService::new(tables.clone(), regions.clone()));
    let shares = Arc::new(ShareService::new(regions.clone()));
    EngineStack {
        tables,
        regions,
        ltv_engine,
        eligibility,
        shares,
    }
}

/// Handler-level state over the default tables, remote normalizer absent
pub fn app_state() -> AppState {
    let stack = engine_stack();
    let amounts: Arc<AmountService<RemoteNormalizerImpl>> = Arc::new(AmountService::new(None));
    AppState {
        amounts,
        regions: stack.regions,
        ltv_engine: stack.ltv_engine,
        eligibility: stack.eligibility,
        shares: stack.shares,
    }
}

pub fn loan_line(status: LoanStatus, max_amount: i64, principal: i64) -> LoanLine {
    LoanLine {
        lender: "테스트은행".to_string(),
        max_amount,
        ratio: 120.0,
        principal,
        status,
    }
}

pub fn owner(name: &str, share: &str) -> Owner {
    Owner {
        name: name.to_string(),
        share: share.to_string(),
    }
}
