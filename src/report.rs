// Reporting boundary — plain-text tables, CSV export, quiet console filter.

use std::path::Path;

use anyhow::{Context, Result};

use crate::engine::results::FetchOutcome;
use crate::engine::stats::Summary;

/// Render the end-of-run report: mean connect latency plus the two
/// grouped count tables.
pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();

    match summary.mean_connect_ms {
        Some(mean) => out.push_str(&format!("Took on average : {:.2} ms\n\n", mean)),
        None => out.push_str("Took on average : n/a\n\n"),
    }

    let status_rows: Vec<(String, usize)> = summary
        .by_status
        .iter()
        .map(|(code, count)| (code.to_string(), *count))
        .collect();
    out.push_str(&render_count_table("HTTP Code", &status_rows));
    out.push('\n');

    let cache_rows: Vec<(String, usize)> = summary
        .by_cache
        .iter()
        .map(|(key, count)| (key.clone(), *count))
        .collect();
    out.push_str(&render_count_table("Cache Hit", &cache_rows));

    out
}

/// Two-column table in the reference report's layout: header, dashed
/// rule per column, keys left-aligned, counts right-aligned.
fn render_count_table(key_header: &str, rows: &[(String, usize)]) -> String {
    let count_header = "Count";
    let key_width = rows
        .iter()
        .map(|(k, _)| k.len())
        .chain(std::iter::once(key_header.len()))
        .max()
        .unwrap_or(0);
    let count_width = rows
        .iter()
        .map(|(_, c)| c.to_string().len())
        .chain(std::iter::once(count_header.len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<key_width$}  {:>count_width$}\n",
        key_header, count_header
    ));
    out.push_str(&format!(
        "{}  {}\n",
        "-".repeat(key_width),
        "-".repeat(count_width)
    ));
    for (key, count) in rows {
        out.push_str(&format!("{:<key_width$}  {:>count_width$}\n", key, count));
    }
    out
}

/// Quiet mode only surfaces failures and 4xx/5xx responses.
pub fn should_print(outcome: &FetchOutcome, quiet: bool) -> bool {
    !quiet || outcome.status == 0 || outcome.status >= 400
}

/// One console line per outcome.
pub fn format_outcome_line(outcome: &FetchOutcome) -> String {
    let time = match outcome.connect_time {
        Some(t) => format!("{:.2}", t.as_secs_f64() * 1000.0),
        None => "-".to_string(),
    };
    format!(
        "{} http_code={} time_ms={} cache={}",
        outcome.url, outcome.status, time, outcome.cache
    )
}

/// Persist the result set as `url,http_code,time,age,x-cache` rows.
/// Null latency/age render as empty fields.
pub fn write_csv(path: &Path, outcomes: &[FetchOutcome]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create csv export {}", path.display()))?;

    writer
        .write_record(["url", "http_code", "time", "age", "x-cache"])
        .context("write csv header")?;

    for outcome in outcomes {
        let time = outcome
            .connect_time
            .map(|t| format!("{:.3}", t.as_secs_f64() * 1000.0))
            .unwrap_or_default();
        let age = outcome.age.map(|a| a.to_string()).unwrap_or_default();
        writer
            .write_record([
                outcome.url.as_str(),
                &outcome.status.to_string(),
                &time,
                &age,
                &outcome.cache.to_string(),
            ])
            .context("write csv record")?;
    }

    writer.flush().context("flush csv export")?;
    Ok(())
}
