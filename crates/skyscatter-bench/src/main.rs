use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use skyscatter_bench::report;
use skyscatter_bench::runner::BenchmarkRunner;
use skyscatter_bench::scenes;

const USAGE: &str = "Usage: bench-runner [OPTIONS]
  --baseline <path>              Load baseline JSON for comparison
  --output <path>                Save current results as JSON baseline
  --regression-threshold <pct>   Regression threshold percentage (default: 10)
  --frames <n>                   Frames per scene (default: 240)
  --seed <n>                     Particle field seed (default: 42)";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut frame_count = 240u32;
    let mut seed = 42u64;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        if matches!(flag, "--help" | "-h") {
            eprintln!("{USAGE}");
            process::exit(0);
        }
        i += 1;
        let Some(value) = args.get(i) else {
            eprintln!("Missing value for {flag}\n{USAGE}");
            process::exit(1);
        };
        match flag {
            "--baseline" => baseline_path = Some(PathBuf::from(value)),
            "--output" => output_path = Some(PathBuf::from(value)),
            "--regression-threshold" => regression_threshold = parse_or_exit(flag, value),
            "--frames" => frame_count = parse_or_exit(flag, value),
            "--seed" => seed = parse_or_exit(flag, value),
            other => {
                eprintln!("Unknown argument: {other}\n{USAGE}");
                process::exit(1);
            }
        }
        i += 1;
    }

    let runner = BenchmarkRunner::new(frame_count, seed);
    let results: Vec<_> = scenes::standard_scenes()
        .iter()
        .map(|config| runner.run_scene(config))
        .collect();

    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: unix_timestamp(),
            results: results.clone(),
        };
        match report::save_baseline(path, &baseline) {
            Ok(()) => log::info!("Saved baseline to {}", path.display()),
            Err(e) => {
                log::error!("Failed to save baseline to {}: {e}", path.display());
                process::exit(1);
            }
        }
    }

    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Benchmark complete.");
}

fn parse_or_exit<T: std::str::FromStr>(flag: &str, value: &str) -> T {
    match value.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Invalid {flag} value: {value}");
            process::exit(1);
        }
    }
}

fn unix_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("unix-{secs}")
}
