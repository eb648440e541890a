use std::fmt::Write;

use klara_assessment::recommend::{self, MGD_SYMPTOMS};
use klara_core::models::assessment::AssessmentResult;
use klara_core::models::history::{CHART_WINDOW, SymptomHistory, Trend};

pub fn referral(red_flags: &[String]) -> String {
    let mut out = String::from(
        "Some of your answers need in-person care rather than an online assessment.\n\
         Please contact an eye care provider or urgent care today.\n\n",
    );
    for flag in red_flags {
        let _ = writeln!(out, "  ! {flag}");
    }
    out
}

pub fn result(result: &AssessmentResult, max_total: Option<i32>) -> String {
    let plan = recommend::care_plan(result.severity);
    let mut out = String::new();

    let _ = writeln!(out, "Severity: {}", result.severity);
    let _ = writeln!(out, "{}\n", plan.summary);
    let _ = match max_total {
        Some(max) => writeln!(out, "Total score: {}/{max}", result.total_score),
        None => writeln!(out, "Total score: {}", result.total_score),
    };
    let _ = writeln!(
        out,
        "DEQ-5 score: {} ({})",
        result.deq5_score,
        if result.deq5_positive { "positive" } else { "negative" }
    );

    let factors = result.risk_factors.descriptions();
    if !factors.is_empty() {
        out.push_str("\nRisk factors identified:\n");
        for factor in factors {
            let _ = writeln!(out, "  - {factor}");
        }
    }

    if recommend::shows_mgd_guidance(&result.risk_factors) {
        out.push_str("\nSigns of meibomian gland dysfunction:\n");
        for symptom in MGD_SYMPTOMS {
            let _ = writeln!(out, "  - {symptom}");
        }
    }

    out.push_str("\nRecommended products:\n");
    for (category, quota) in plan.products {
        let _ = writeln!(out, "  - {category}: {quota}");
    }

    let treatments = plan.treatments();
    if !treatments.is_empty() {
        out.push_str("\nTreatments to discuss with your ophthalmologist:\n");
        for t in treatments {
            let _ = writeln!(out, "  - {} ({}): {}", t.name, t.category, t.description);
        }
    }

    if let Some(prompt) = plan.booking {
        let _ = writeln!(out, "\nBook a specialist consultation. {prompt}.");
    }
    out
}

pub fn history(history: &SymptomHistory) -> String {
    let Some(latest) = history.latest() else {
        return "Complete an assessment to start tracking your symptoms over time.\n".to_string();
    };

    let mut out = String::new();
    for entry in history.recent(CHART_WINDOW) {
        let _ = writeln!(
            out,
            "{}  {:>2}  {}",
            entry.timestamp.strftime("%Y-%m-%d"),
            entry.total_score,
            entry.severity
        );
    }
    let _ = writeln!(out, "\nLatest: {} ({})", latest.total_score, latest.severity);
    match history.trend() {
        Some(Trend::Improving) => out.push_str("Trend: improving\n"),
        Some(Trend::Worsening) => out.push_str("Trend: worsening\n"),
        Some(Trend::Stable) => out.push_str("Trend: stable\n"),
        None => out.push_str("Retake the assessment in a few weeks to see your trend.\n"),
    }
    out
}
