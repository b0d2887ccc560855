use std::io::Write;

use owo_colors::OwoColorize;

use veracity_core::NormalizedReport;

/// Scores above this read as high risk, matching the report page.
const HIGH_RISK_THRESHOLD: f64 = 33.0;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the authenticity report for one resume.
pub fn print_report(
    w: &mut dyn Write,
    resume_name: &str,
    report: &NormalizedReport,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Resume Authenticity Report — {}", resume_name)?;
    writeln!(w)?;

    let score = format!("Risk score: {:.0}", report.risk_score);
    if color.enabled() {
        if report.risk_score > HIGH_RISK_THRESHOLD {
            writeln!(w, "{}", score.red().bold())?;
        } else {
            writeln!(w, "{}", score.green().bold())?;
        }
    } else {
        writeln!(w, "{}", score)?;
    }
    writeln!(w)?;

    print_section(w, "Potential red flags", &report.red_flags, color)?;
    writeln!(w)?;
    print_section(w, "Recommended next steps", &report.recommendations, color)?;

    Ok(())
}

fn print_section(
    w: &mut dyn Write,
    heading: &str,
    findings: &[String],
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", heading.bold())?;
    } else {
        writeln!(w, "{}", heading)?;
    }

    if findings.is_empty() {
        if color.enabled() {
            writeln!(w, "  {}", "(no findings reported)".dimmed())?;
        } else {
            writeln!(w, "  (no findings reported)")?;
        }
        return Ok(());
    }

    for finding in findings {
        writeln!(w, "  - {}", finding)?;
    }
    Ok(())
}
