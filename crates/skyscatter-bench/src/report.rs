use std::path::Path;

use crate::runner::BenchmarkResult;

/// A complete baseline containing results from all scenes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

/// Load a baseline from a JSON file. Returns None if the file is missing or
/// unreadable.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(baseline) => Some(baseline),
        Err(e) => {
            log::warn!("Ignoring malformed baseline {}: {e}", path.display());
            None
        }
    }
}

/// Save a baseline to a JSON file.
pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Compare current results against a baseline. Returns (scene name, percent
/// change) for every scene whose mean frame time grew past the threshold.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<(String, f64)> {
    let mut regressions = Vec::new();

    for result in current {
        let Some(base) = baseline
            .results
            .iter()
            .find(|b| b.scene_name == result.scene_name)
        else {
            continue;
        };
        if base.timings.mean_ms <= 0.0 {
            continue;
        }
        let pct_change =
            (result.timings.mean_ms - base.timings.mean_ms) / base.timings.mean_ms * 100.0;
        if pct_change > threshold_pct {
            regressions.push((result.scene_name.clone(), pct_change));
        }
    }

    regressions
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Size | Particles | Frames | Mean (ms) | Median (ms) | P95 (ms) | P99 (ms) | Min (ms) | Max (ms) |\n");
    out.push_str("|-------|------|-----------|--------|-----------|-------------|----------|----------|----------|----------|\n");

    for r in results {
        out.push_str(&format!(
            "| {} | {}x{} | {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |\n",
            r.scene_name,
            r.width,
            r.height,
            r.particle_count,
            r.frame_count,
            r.timings.mean_ms,
            r.timings.median_ms,
            r.timings.p95_ms,
            r.timings.p99_ms,
            r.timings.min_ms,
            r.timings.max_ms,
        ));
    }

    out
}

/// Format a comparison report showing regressions.
pub fn format_comparison(regressions: &[(String, f64)], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!(
            "All scenes within {:.0}% threshold. No regressions detected.\n",
            threshold_pct
        );
    }

    let mut out = String::new();
    out.push_str(&format!(
        "REGRESSIONS DETECTED (>{:.0}% threshold):\n",
        threshold_pct
    ));
    for (scene, pct) in regressions {
        out.push_str(&format!("  - {}: +{:.1}%\n", scene, pct));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::compute_timings;

    fn result(name: &str, frame_ms: f64) -> BenchmarkResult {
        BenchmarkResult {
            scene_name: name.to_string(),
            width: 64,
            height: 32,
            particle_count: 150,
            frame_count: 3,
            final_time_value: 50.0,
            timings: compute_timings(&[frame_ms; 3]),
        }
    }

    #[test]
    fn test_compare_flags_regressions_only() {
        let baseline = Baseline {
            timestamp: "t0".into(),
            results: vec![result("a", 10.0), result("b", 10.0), result("c", 0.0)],
        };
        let current = vec![
            result("a", 10.5),
            result("b", 12.0),
            result("c", 5.0),
            result("new", 99.0),
        ];
        let regressions = compare(&current, &baseline, 10.0);
        assert_eq!(regressions.len(), 1);
        assert_eq!(regressions[0].0, "b");
        assert!((regressions[0].1 - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_markdown_has_row_per_result() {
        let md = format_markdown(&[result("a", 1.0), result("b", 2.0)]);
        assert_eq!(md.lines().count(), 4);
        assert!(md.contains("| a | 64x32 | 150 | 3 | 1.00 |"));
    }

    #[test]
    fn test_comparison_text() {
        assert!(format_comparison(&[], 10.0).contains("No regressions"));
        let text = format_comparison(&[("b".into(), 20.0)], 10.0);
        assert!(text.contains("b: +20.0%"));
    }

    #[test]
    fn test_baseline_save_load() {
        let dir = std::env::temp_dir().join(format!("skyscatter-bench-{}", std::process::id()));
        let path = dir.join("baseline.json");
        let baseline = Baseline {
            timestamp: "t1".into(),
            results: vec![result("a", 3.0)],
        };
        save_baseline(&path, &baseline).expect("save");
        let loaded = load_baseline(&path).expect("load");
        assert_eq!(loaded.timestamp, "t1");
        assert_eq!(loaded.results[0].scene_name, "a");
        let _ = std::fs::remove_dir_all(&dir);

        assert!(load_baseline(&dir.join("missing.json")).is_none());
    }
}
