//! Loan line domain entities
//!
//! A loan line is one encumbrance on the collateral: the lender, the
//! maximum secured amount (채권최고액), the secured ratio, the principal,
//! and a progress status. The status set drives lien seniority: any line
//! that stays on the register after funding (유지/동의/비동의) makes the
//! new loan junior.

use serde::{Deserialize, Serialize};

/// Progress status of an existing loan line
///
/// The wire format keeps the Korean labels; anything unrecognized ("",
/// "-", a placeholder option) deserializes as `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanStatus {
    /// 유지 - stays on the register
    Maintained,
    /// 대환 - refinanced by the new loan
    Refinanced,
    /// 선말소 - discharged before funding
    PriorPayoff,
    /// 퇴거자금 - tenant vacating funds
    VacatingFunds,
    /// 동의 - junior consent given
    Consented,
    /// 비동의 - junior consent refused
    Dissented,
    /// Not selected yet
    Unset,
}

impl LoanStatus {
    /// Lines that remain senior to the new loan
    pub fn is_subordinating(&self) -> bool {
        matches!(
            self,
            LoanStatus::Maintained | LoanStatus::Consented | LoanStatus::Dissented
        )
    }

    /// Lines whose principal the new loan must repay at funding
    pub fn is_repayable(&self) -> bool {
        matches!(
            self,
            LoanStatus::Refinanced | LoanStatus::PriorPayoff | LoanStatus::VacatingFunds
        )
    }

    fn wire_label(&self) -> &'static str {
        match self {
            LoanStatus::Maintained => "유지",
            LoanStatus::Refinanced => "대환",
            LoanStatus::PriorPayoff => "선말소",
            LoanStatus::VacatingFunds => "퇴거자금",
            LoanStatus::Consented => "동의",
            LoanStatus::Dissented => "비동의",
            LoanStatus::Unset => "",
        }
    }

    fn unset() -> Self {
        LoanStatus::Unset
    }
}

impl Serialize for LoanStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_label())
    }
}

impl<'de> Deserialize<'de> for LoanStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(LoanStatus::Unset))
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanStatus::Maintained => write!(f, "유지"),
            LoanStatus::Refinanced => write!(f, "대환"),
            LoanStatus::PriorPayoff => write!(f, "선말소"),
            LoanStatus::VacatingFunds => write!(f, "퇴거자금"),
            LoanStatus::Consented => write!(f, "동의"),
            LoanStatus::Dissented => write!(f, "비동의"),
            LoanStatus::Unset => write!(f, "/"),
        }
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "유지" => LoanStatus::Maintained,
            "대환" => LoanStatus::Refinanced,
            "선말소" => LoanStatus::PriorPayoff,
            "퇴거자금" => LoanStatus::VacatingFunds,
            "동의" => LoanStatus::Consented,
            "비동의" => LoanStatus::Dissented,
            _ => LoanStatus::Unset,
        })
    }
}

/// Lien seniority of the loan under evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    First,
    Second,
}

impl Seniority {
    pub fn is_first(&self) -> bool {
        matches!(self, Seniority::First)
    }
}

impl std::fmt::Display for Seniority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seniority::First => write!(f, "선순위"),
            Seniority::Second => write!(f, "후순위"),
        }
    }
}

fn default_ratio() -> f64 {
    120.0
}

/// One existing encumbrance on the collateral
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanLine {
    #[serde(default)]
    pub lender: String,
    #[serde(default)]
    pub max_amount: i64,
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    #[serde(default)]
    pub principal: i64,
    #[serde(default = "LoanStatus::unset")]
    pub status: LoanStatus,
}

impl LoanLine {
    /// A line carries a figure if either monetary field is set
    pub fn has_amount(&self) -> bool {
        self.max_amount > 0 || self.principal > 0
    }
}

/// Status-bucketed totals over a loan set, in 만원
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoanBreakdown {
    /// Σ max amount (principal when max is absent) of subordinating lines
    pub maintained_sum: i64,
    /// Σ principal of 대환/선말소 lines
    pub refinance_sum: i64,
    /// Σ principal of 퇴거자금 lines
    pub vacating_sum: i64,
}

impl LoanBreakdown {
    pub fn from_lines(lines: &[LoanLine]) -> Self {
        let mut breakdown = LoanBreakdown::default();
        for line in lines {
            if line.status.is_subordinating() {
                // A maintained line counts at its secured maximum; the
                // principal stands in only when no maximum was registered
                breakdown.maintained_sum += if line.max_amount > 0 {
                    line.max_amount
                } else {
                    line.principal
                };
            } else if line.status.is_repayable() {
                if line.status == LoanStatus::VacatingFunds {
                    breakdown.vacating_sum += line.principal;
                } else {
                    breakdown.refinance_sum += line.principal;
                }
            }
        }
        breakdown
    }

    /// Principal the new loan must cover at funding
    pub fn repayable_sum(&self) -> i64 {
        self.refinance_sum + self.vacating_sum
    }

    /// No subordinating line means the new loan takes first position
    pub fn seniority(&self) -> Seniority {
        if self.maintained_sum == 0 {
            Seniority::First
        } else {
            Seniority::Second
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(status: LoanStatus, max_amount: i64, principal: i64) -> LoanLine {
        LoanLine {
            lender: "테스트은행".to_string(),
            max_amount,
            ratio: 120.0,
            principal,
            status,
        }
    }

    #[test]
    fn breakdown_buckets_by_status() {
        let lines = vec![
            line(LoanStatus::Maintained, 12000, 10000),
            line(LoanStatus::Refinanced, 6000, 5000),
            line(LoanStatus::VacatingFunds, 0, 3000),
            line(LoanStatus::Unset, 1000, 1000),
        ];
        let b = LoanBreakdown::from_lines(&lines);
        assert_eq!(b.maintained_sum, 12000);
        assert_eq!(b.refinance_sum, 5000);
        assert_eq!(b.vacating_sum, 3000);
        assert_eq!(b.repayable_sum(), 8000);
        assert_eq!(b.seniority(), Seniority::Second);
    }

    #[test]
    fn maintained_falls_back_to_principal() {
        let lines = vec![line(LoanStatus::Consented, 0, 7000)];
        let b = LoanBreakdown::from_lines(&lines);
        assert_eq!(b.maintained_sum, 7000);
    }

    #[test]
    fn no_subordinating_line_is_senior() {
        let lines = vec![
            line(LoanStatus::PriorPayoff, 6000, 5000),
            line(LoanStatus::Refinanced, 2400, 2000),
        ];
        assert_eq!(LoanBreakdown::from_lines(&lines).seniority(), Seniority::First);
        assert_eq!(LoanBreakdown::from_lines(&[]).seniority(), Seniority::First);
    }

    #[test]
    fn status_round_trips_korean_labels() {
        assert_eq!("유지".parse::<LoanStatus>().unwrap(), LoanStatus::Maintained);
        assert_eq!("비동의".parse::<LoanStatus>().unwrap(), LoanStatus::Dissented);
        assert_eq!("-".parse::<LoanStatus>().unwrap(), LoanStatus::Unset);
        assert_eq!("".parse::<LoanStatus>().unwrap(), LoanStatus::Unset);
        assert_eq!(LoanStatus::PriorPayoff.to_string(), "선말소");
    }

    #[test]
    fn status_deserializes_unknown_to_unset() {
        let status: LoanStatus = serde_json::from_str("\"구분 선택...\"").unwrap();
        assert_eq!(status, LoanStatus::Unset);
        let status: LoanStatus = serde_json::from_str("\"대환\"").unwrap();
        assert_eq!(status, LoanStatus::Refinanced);
    }

    #[test]
    fn loan_line_defaults() {
        let l: LoanLine = serde_json::from_str("{}").unwrap();
        assert_eq!(l.ratio, 120.0);
        assert_eq!(l.status, LoanStatus::Unset);
        assert!(!l.has_amount());
    }
}
