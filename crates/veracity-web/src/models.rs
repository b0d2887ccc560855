use serde::Serialize;

use veracity_core::NormalizedReport;

/// Report JSON returned to the page, camelCase to match the scoring
/// service's own field conventions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportJson {
    pub risk_score: f64,
    pub red_flags: Vec<String>,
    pub recommendations: Vec<String>,
}

impl From<&NormalizedReport> for ReportJson {
    fn from(report: &NormalizedReport) -> Self {
        Self {
            risk_score: report.risk_score,
            red_flags: report.red_flags.clone(),
            recommendations: report.recommendations.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorJson {
    pub error: String,
}
