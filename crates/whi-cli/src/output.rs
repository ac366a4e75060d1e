use std::fmt::Write as _;

use whi_scraper::WhiReport;

pub(crate) fn print_report(report: &WhiReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_text(report));
    }
    Ok(())
}

/// Index line, then the band on its own line.
pub(crate) fn render_text(report: &WhiReport) -> String {
    let mut out = String::new();

    if let Some(region) = &report.region {
        let _ = writeln!(
            out,
            "Region: {:.1} mi around ({:.4}, {:.4})",
            region.radius_miles,
            region.center.latitude(),
            region.center.longitude()
        );
    }
    let _ = writeln!(
        out,
        "{}: {} stores, {} open, {} closed",
        report.reference_date, report.total, report.open, report.closed
    );
    let _ = writeln!(out, "{}", report.index);
    let _ = writeln!(out, "{}", report.band);
    out
}
