//! Full integration tests for the underwriting engine
//!
//! Wires the complete service stack over the default policy tables and
//! walks an application the way the desk does:
//! 1. Normalize scraped lien text into figures
//! 2. Reconcile the loan lines
//! 3. Classify the address and look up the LTV ceiling
//! 4. Gate the application against a program
//! 5. Compute the per-owner share limit and render the memo
//!
//! Run with: cargo test integration_tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::app::{
        ltv_limit, normalize_amount, reconcile, AmountService, EditedField, EligibilityInput,
        LtvInput, ShareLimitInput,
    };
    use crate::domain::entities::{
        LoanBreakdown, LoanStatus, PriceBasis, Program, PropertyType, RegionScheme, RegionTier,
        Seniority,
    };
    use crate::summary::{render_memo, FeeSummary, LimitLine, MemoContext};
    use crate::test_utils::{engine_stack, loan_line, owner, FailingNormalizer};

    /// Basic smoke test - verify the full stack can be wired
    #[test]
    fn services_can_be_created() {
        let stack = engine_stack();
        assert!(!stack.tables.meritz_regions.is_empty());
        assert!(!stack.tables.share_regions.is_empty());
    }

    /// A senior tier-1 apartment application, end to end
    #[test]
    fn senior_tier1_apartment_flow() {
        let stack = engine_stack();
        let address = "서울특별시 강남구 역삼동 래미안아파트 제10층";

        // Scraped lien text -> figures -> reconciled line
        let max_amount = normalize_amount("238,800,000원");
        assert_eq!(max_amount, 23_880);
        let line = reconcile(max_amount, 0, 120.0, EditedField::MaxAmount);
        assert_eq!(line.principal, 19_900);

        // The single lien will be discharged before funding: senior deal
        let loans = vec![loan_line(LoanStatus::PriorPayoff, line.max_amount, line.principal)];
        let breakdown = LoanBreakdown::from_lines(&loans);
        assert_eq!(breakdown.seniority(), Seniority::First);

        // Address classifies tier 1; the matrix answers 83 for 84.9㎡
        let tier = stack.regions.classify_tier(address, RegionScheme::Meritz);
        assert_eq!(tier, RegionTier::Tier1);
        let ltv = stack
            .ltv_engine
            .compute(&LtvInput {
                area: 84.9,
                seniority: breakdown.seniority(),
                region: tier,
                property_type: PropertyType::Apartment,
                total_value: 50_000,
                completion_date: Some("2005-11".to_string()),
                address: Some(address.to_string()),
                as_of_year: 2025,
            })
            .unwrap();
        assert_eq!(ltv.value_percent, 83.0);
        assert!(!ltv.ineligible);

        // Whole-property limit at the determined ceiling
        let (limit, available) = ltv_limit(
            50_000,
            0,
            breakdown.repayable_sum(),
            breakdown.maintained_sum,
            ltv.value_percent,
            true,
        );
        assert_eq!(limit, 41_500);
        assert_eq!(available, 21_600);
    }

    /// Junior evaluation keeps the maintained stack and loses the
    /// per-owner available figure
    #[test]
    fn junior_share_limit_flow() {
        let stack = engine_stack();
        let loans = vec![loan_line(LoanStatus::Maintained, 12_000, 10_000)];

        let results = stack
            .shares
            .compute(&ShareLimitInput {
                total_value: 50_000,
                ltv_tiers: vec![70.0, 80.0],
                loans,
                owner: owner("홍길동", "1/2 (50.0%)"),
                address: None,
                pledge_program: false,
            })
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].limit, 17_500);
        assert!(results[0].available.is_none());
        assert_eq!(results[0].owner.as_deref(), Some("홍길동"));
        assert_eq!(results[0].share.as_deref(), Some("1/2 (50.0%)"));
        assert_eq!(results[1].limit, 20_000);
        assert!(results[1].owner.is_none());
    }

    /// Hope program gates plus the rate band for the winning LTV
    #[test]
    fn hope_program_gating_flow() {
        let stack = engine_stack();
        let input = EligibilityInput {
            kb_price: 45_000,
            unit_count: Some(480),
            completion_date: Some("2001".to_string()),
            property_type: PropertyType::Apartment,
            address: "경기도 성남시 분당구 정자동 한솔마을 5층".to_string(),
            seniority: Seniority::Second,
            ltv_percent: Some(78.0),
            region: None,
            as_of_year: 2025,
        };

        let result = stack.eligibility.validate(Program::HopeCollateral, &input);
        assert!(result.is_eligible());

        let region = stack.regions.hope_region(&input.address).unwrap();
        assert_eq!(stack.eligibility.rate_band(region, 78.0), "12.9% / 13.9%");
    }

    /// County-restricted collateral fails Meritz gating and the LTV
    /// engine tags it ineligible
    #[test]
    fn county_restriction_flow() {
        let stack = engine_stack();
        let address = "강원도 홍천군 홍천읍 신장대리";

        let gates = stack.eligibility.validate(
            Program::MeritzCollateral,
            &EligibilityInput {
                kb_price: 20_000,
                unit_count: None,
                completion_date: None,
                property_type: PropertyType::Apartment,
                address: address.to_string(),
                seniority: Seniority::First,
                ltv_percent: None,
                region: Some(RegionTier::Tier3),
                as_of_year: 2025,
            },
        );
        assert!(!gates.is_eligible());
    }

    /// Remote normalization outage degrades silently to the local grammar
    #[tokio::test]
    async fn normalization_outage_is_silent() {
        let service = AmountService::new(Some(Arc::new(FailingNormalizer)));
        assert_eq!(service.normalize("6억 5,500").await, 65_500);
        assert_eq!(service.normalize("").await, 0);
    }

    /// The HTTP surface end to end, through real routing and serde
    #[tokio::test]
    async fn http_surface_round_trip() {
        use axum::routing::post;
        use axum::Router;
        use axum_test::TestServer;
        use serde_json::json;

        use crate::handlers;
        use crate::test_utils::app_state;

        let app = Router::new()
            .route("/amounts/normalize", post(handlers::normalize))
            .route("/regions/classify", post(handlers::classify))
            .route("/ltv/compute", post(handlers::compute))
            .route("/shares/limit", post(handlers::share_limit))
            .with_state(app_state());
        let server = TestServer::new(app).unwrap();

        let normalized = server
            .post("/amounts/normalize")
            .json(&json!({"text": "6억 5,500"}))
            .await;
        normalized.assert_json(&json!({"amount": 65500}));

        let classified = server
            .post("/regions/classify")
            .json(&json!({"address": "경기도 평택시 비전동", "scheme": "meritz"}))
            .await;
        classified.assert_json(&json!({"scheme": "meritz", "tier": 3, "label": "3군"}));

        let ltv = server
            .post("/ltv/compute")
            .json(&json!({
                "area": 80.0,
                "seniority": "first",
                "region": 1,
                "property_type": "APT",
                "total_value": 160000
            }))
            .await;
        ltv.assert_json(&json!({
            "value_percent": 78.0,
            "ineligible": false,
            "adjustments": ["high_value_cut"]
        }));

        let shares = server
            .post("/shares/limit")
            .json(&json!({
                "total_value": 50000,
                "ltv_tiers": [70.0],
                "owner": {"name": "홍길동", "share": "50"}
            }))
            .await;
        shares.assert_json(&json!({
            "results": [{
                "ltv_percent": 70.0,
                "limit": 17500,
                "available": 17500,
                "owner": "홍길동",
                "share": "50%"
            }]
        }));
    }

    /// The rendered memo carries every section of the evaluation
    #[test]
    fn memo_rendering_flow() {
        let loans = vec![
            loan_line(LoanStatus::PriorPayoff, 23_880, 19_900),
            loan_line(LoanStatus::Refinanced, 6_000, 5_000),
        ];
        let breakdown = LoanBreakdown::from_lines(&loans);
        let (limit, available) = ltv_limit(
            50_000,
            0,
            breakdown.repayable_sum(),
            breakdown.maintained_sum,
            80.0,
            true,
        );

        let address = "서울특별시 강남구 역삼동 래미안아파트 제2층";
        let memo = render_memo(&MemoContext {
            customer_name: "홍길동 800101".to_string(),
            address: address.to_string(),
            area: "84.9㎡".to_string(),
            kb_price: 50_000,
            price_basis: PriceBasis::from_address(address),
            deduction_amount: 0,
            deduction_region: None,
            loans,
            limits: vec![LimitLine {
                seniority: breakdown.seniority(),
                ltv_percent: 80.0,
                limit,
                available,
            }],
            fees: FeeSummary::compute(10_000, 1.5, 0, 0.7),
            rate_band: Some("13.9% / 14.9%".to_string()),
            program: Some(Program::MeritzCollateral),
        });

        assert!(memo.contains("소유자: 홍길동 800101"));
        assert!(memo.contains("하안가 적용"));
        assert!(memo.contains("선순위 한도: LTV 80% 40,000만 가용 15,100만"));
        assert!(memo.contains("선말소 원금: 19,900만"));
        assert!(memo.contains("대환 원금: 5,000만"));
        assert!(memo.contains("필요금: 10,000만 컨설팅비용:(1.5%) 150만"));
        assert!(memo.contains("적용 금리 (연이율) 13.9% / 14.9%"));
        assert!(memo.ends_with("*연체이력 및 권리침해사항 1% 할증"));
    }
}
