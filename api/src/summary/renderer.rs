//! Memo renderer
//!
//! Renders an underwriting evaluation to the plain-text memo format the
//! review desk uses. Layout follows the long-standing desk convention:
//! owner header, collateral line, price line, numbered loan lines, limit
//! lines, status subtotals between rules, fee block, rate band, and the
//! fixed program notices at the bottom.

use crate::domain::entities::format_manwon;

use super::{status_principal_sums, MemoContext};

const SEPARATOR: &str = "-----------------------";

/// Fixed notices appended whenever a pledge program is selected
const PROGRAM_NOTICES: &[&str] = &[
    "*본심사시 금리 변동될수 있습니다.",
    "*사업자 담보대출 (사업자필수)",
    "*계약 2년",
    "*중도 3%",
    "*환수 92일이내 50%",
    "*연체이력 및 권리침해사항 1% 할증",
];

/// Render a memo from a prepared evaluation context
pub fn render_memo(ctx: &MemoContext) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !ctx.customer_name.trim().is_empty() {
        lines.push(format!("소유자: {}", ctx.customer_name.trim()));
    }

    let mut address_parts: Vec<String> = Vec::new();
    if !ctx.address.trim().is_empty() {
        address_parts.push(format!("주소: {}", ctx.address.trim()));
    }
    if !ctx.area.trim().is_empty() {
        address_parts.push(format!("면적: {}", ctx.area.trim()));
    }
    if !address_parts.is_empty() {
        lines.push(address_parts.join(" | "));
    }

    let mut price_parts: Vec<String> = Vec::new();
    if ctx.kb_price > 0 {
        price_parts.push(format!("KB시세: {}", format_manwon(ctx.kb_price)));
    }
    if let Some(basis) = ctx.price_basis {
        price_parts.push(basis.to_string());
    }
    if ctx.deduction_amount > 0 {
        if let Some(region) = ctx.deduction_region.as_deref().filter(|r| !r.trim().is_empty()) {
            price_parts.push(format!(
                "방공제({}): {}",
                region.trim(),
                format_manwon(ctx.deduction_amount)
            ));
        } else {
            price_parts.push(format!("방공제: {}", format_manwon(ctx.deduction_amount)));
        }
    }
    if !price_parts.is_empty() {
        lines.push(price_parts.join(" | "));
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }

    // Numbered loan lines, figures-bearing only
    let mut printed_loans = false;
    for (index, loan) in ctx.loans.iter().filter(|l| l.has_amount()).enumerate() {
        let lender = if loan.lender.trim().is_empty() {
            "/"
        } else {
            loan.lender.trim()
        };
        let ratio = if loan.ratio > 0.0 {
            format!("{}%", loan.ratio)
        } else {
            "/".to_string()
        };
        lines.push(format!(
            "{}. {} | 설정금액: {} | {} | 원금: {} | {}",
            index + 1,
            lender,
            format_manwon(loan.max_amount),
            ratio,
            format_manwon(loan.principal),
            loan.status,
        ));
        printed_loans = true;
    }
    if printed_loans {
        lines.push(String::new());
    }

    if !ctx.limits.is_empty() {
        for limit in &ctx.limits {
            lines.push(format!(
                "{} 한도: LTV {}% {} 가용 {}",
                limit.seniority,
                limit.ltv_percent,
                format_manwon(limit.limit),
                format_manwon(limit.available),
            ));
        }
        lines.push(String::new());
    }

    let subtotals = status_principal_sums(&ctx.loans);
    if !subtotals.is_empty() {
        lines.push(SEPARATOR.to_string());
        for (status, sum) in &subtotals {
            lines.push(format!("{} 원금: {}", status, format_manwon(*sum)));
        }
        lines.push(SEPARATOR.to_string());
    }

    if let Some(fees) = &ctx.fees {
        if subtotals.is_empty() {
            lines.push(SEPARATOR.to_string());
        }
        if fees.consult_amount > 0 {
            lines.push(format!(
                "필요금: {} 컨설팅비용:({}%) {}",
                format_manwon(fees.consult_amount),
                fees.consult_rate,
                format_manwon(fees.consult_fee),
            ));
        }
        if fees.bridge_amount > 0 {
            lines.push(format!(
                "브릿지: {} 브릿지비용:({}%) {}",
                format_manwon(fees.bridge_amount),
                fees.bridge_rate,
                format_manwon(fees.bridge_fee),
            ));
        }
        if fees.total() > 0 {
            lines.push(format!("총 컨설팅 합계: {}", format_manwon(fees.total())));
        }
    }

    if let Some(band) = ctx.rate_band.as_deref() {
        lines.push(format!("적용 금리 (연이율) {}", band));
        lines.push(String::new());
    }

    if ctx.program.is_some() {
        for notice in PROGRAM_NOTICES {
            lines.push(notice.to_string());
        }
    }

    while lines.last().map(|l| l.is_empty()).unwrap_or(false) {
        lines.pop();
    }
    lines.join("\n")
}
