//! Loan figure reconciliation and limit arithmetic
//!
//! Keeps a loan line's (maximum secured amount, ratio, principal) triple
//! consistent, and derives whole-property lending limits from the
//! appraisal, the deposit deduction, and the existing lien stack.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{round_half_up, LoanLine, LoanStatus};

/// Which field of the triple the caller just edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditedField {
    MaxAmount,
    Principal,
}

/// A reconciled (maximum secured amount, principal) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconciledLine {
    pub max_amount: i64,
    pub principal: i64,
}

/// Reconcile a loan line after one field was edited.
///
/// Editing the principal derives the maximum secured amount through the
/// ratio; editing the maximum amount (or the ratio itself) derives the
/// principal. A ratio of zero or below performs no derivation at all -
/// both fields come back exactly as entered.
pub fn reconcile(
    max_amount: i64,
    principal: i64,
    ratio: f64,
    edited: EditedField,
) -> ReconciledLine {
    if ratio <= 0.0 {
        return ReconciledLine {
            max_amount,
            principal,
        };
    }

    match edited {
        EditedField::Principal => {
            if principal > 0 {
                ReconciledLine {
                    max_amount: round_half_up(principal as f64 * (ratio / 100.0)),
                    principal,
                }
            } else {
                ReconciledLine {
                    max_amount,
                    principal,
                }
            }
        }
        EditedField::MaxAmount => {
            if max_amount > 0 {
                ReconciledLine {
                    max_amount,
                    principal: round_half_up(max_amount as f64 / (ratio / 100.0)),
                }
            } else {
                ReconciledLine {
                    max_amount,
                    principal,
                }
            }
        }
    }
}

/// Whole-property lending limit for one LTV tier, in 만원.
///
/// `limit` is the gross LTV amount net of the deposit deduction and - for
/// junior positions - the maintained lien stack. `available` further nets
/// the principal the new loan must repay at funding. Neither figure goes
/// negative.
pub fn ltv_limit(
    kb_price: i64,
    deduction: i64,
    repayable_sum: i64,
    maintained_sum: i64,
    ltv_percent: f64,
    senior: bool,
) -> (i64, i64) {
    let gross = round_half_up(kb_price as f64 * ltv_percent / 100.0);
    let maintained = if senior { 0 } else { maintained_sum };
    let limit = (gross - deduction - maintained).max(0);
    let available = (limit - repayable_sum).max(0);
    (limit, available)
}

/// Reverse derivation: the LTV percentage needed to raise `required`
/// cash on top of the deposit deduction and every status-bearing line's
/// secured maximum. Zero when the appraisal is unknown.
pub fn ltv_from_required(
    kb_price: i64,
    required: i64,
    loans: &[LoanLine],
    deduction: i64,
) -> i64 {
    if kb_price <= 0 {
        return 0;
    }
    let encumbrance: i64 = loans
        .iter()
        .filter(|line| line.status != LoanStatus::Unset)
        .map(|line| line.max_amount)
        .sum();
    let needed = required + deduction + encumbrance;
    round_half_up(needed as f64 / kb_price as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_edit_derives_max_amount() {
        let line = reconcile(0, 10_000, 120.0, EditedField::Principal);
        assert_eq!(line.max_amount, 12_000);
        assert_eq!(line.principal, 10_000);
    }

    #[test]
    fn max_amount_edit_derives_principal() {
        let line = reconcile(12_000, 0, 120.0, EditedField::MaxAmount);
        assert_eq!(line.max_amount, 12_000);
        assert_eq!(line.principal, 10_000);
    }

    #[test]
    fn derivation_rounds_half_up() {
        // 1001 / 1.2 = 834.1666... -> 834
        assert_eq!(reconcile(1001, 0, 120.0, EditedField::MaxAmount).principal, 834);
        // 835 * 1.1 = 918.5 -> 919
        assert_eq!(reconcile(0, 835, 110.0, EditedField::Principal).max_amount, 919);
    }

    #[test]
    fn zero_or_negative_ratio_leaves_fields_as_entered() {
        let line = reconcile(12_000, 7_777, 0.0, EditedField::MaxAmount);
        assert_eq!(line.max_amount, 12_000);
        assert_eq!(line.principal, 7_777);

        let negative = reconcile(12_000, 7_777, -5.0, EditedField::Principal);
        assert_eq!(negative.principal, 7_777);
        assert_eq!(negative.max_amount, 12_000);
    }

    #[test]
    fn zero_edited_field_derives_nothing() {
        let line = reconcile(0, 0, 120.0, EditedField::MaxAmount);
        assert_eq!(line.max_amount, 0);
        assert_eq!(line.principal, 0);
    }

    #[test]
    fn senior_limit_ignores_maintained_stack() {
        // 50000 * 70% = 35000; senior nets only the deduction
        let (limit, available) = ltv_limit(50_000, 2_000, 8_000, 12_000, 70.0, true);
        assert_eq!(limit, 33_000);
        assert_eq!(available, 25_000);
    }

    #[test]
    fn junior_limit_nets_maintained_stack() {
        let (limit, available) = ltv_limit(50_000, 0, 0, 12_000, 80.0, false);
        assert_eq!(limit, 28_000);
        assert_eq!(available, 28_000);
    }

    #[test]
    fn limits_never_go_negative() {
        let (limit, available) = ltv_limit(10_000, 5_000, 9_000, 0, 40.0, true);
        assert_eq!(limit, 0);
        assert_eq!(available, 0);
    }

    #[test]
    fn reverse_ltv_from_required_amount() {
        let loans = vec![
            LoanLine {
                lender: "A은행".to_string(),
                max_amount: 20_000,
                ratio: 120.0,
                principal: 0,
                status: LoanStatus::Maintained,
            },
            LoanLine {
                lender: String::new(),
                max_amount: 5_000,
                ratio: 120.0,
                principal: 0,
                status: LoanStatus::Unset,
            },
        ];
        // (8000 + 0 + 20000) / 50000 * 100 = 56
        assert_eq!(ltv_from_required(50_000, 8_000, &loans, 0), 56);
        // Unknown appraisal cannot be reversed
        assert_eq!(ltv_from_required(0, 8_000, &loans, 0), 0);
    }

    #[test]
    fn reverse_ltv_rounds_half_up() {
        // 333 / 1000 * 100 = 33.3 -> 33; 335 -> 33.5 -> 34
        assert_eq!(ltv_from_required(1_000, 333, &[], 0), 33);
        assert_eq!(ltv_from_required(1_000, 335, &[], 0), 34);
    }
}
