//! Basic example demonstrating jump detection
//!
//! Run with: cargo run --example basic -p jump
//!
//! Set `RUST_LOG=jump_core=debug` to see per-test statistics.

use jump::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "basic=info,jump_core=info".into()),
        )
        .init();

    println!("=== jump Basic Examples ===\n");

    // Prior session closes followed by the next session's open
    let closes = [
        100.0, 100.2, 99.9, 100.1, 100.3, 100.0, 99.8, 100.1, 100.4, 100.2, 100.5, 100.3,
    ];
    let series = PriceSeries::join(&closes, 104.8)?;
    tracing::info!(prices = series.len(), "session window built");

    // 1. Combined detection with the default configuration
    let detector = JumpDetector::default();
    let log_prices = series.log_prices();
    let result = detector.detect(&log_prices)?;
    println!("1. Combined rule");
    println!("   threshold:       {:.5}", result.threshold_value());
    println!(
        "   BNS statistic:   {:.4} (critical {:.4})",
        result.bns().test_statistic(),
        result.bns().critical_value()
    );
    println!(
        "   threshold stat:  {:.4} (critical {:.4})",
        result.threshold().test_statistic(),
        result.threshold().critical_value()
    );
    println!("   jump detected:   {}", result.jump_detected());

    // 2. Realized variation
    let stats = detector.statistics(&log_prices)?;
    println!("\n2. Realized variation");
    println!("   quadratic:        {:.6}", stats.quadratic_variation);
    println!("   bipower:          {:.6}", stats.bipower_variation);
    println!("   threshold bipower: {:.6}", stats.threshold_bipower_variation);

    // 3. Sign-run test and localization
    let sign_run = sign_run_test(series.prices(), 0.05)?;
    println!("\n3. Sign runs");
    println!(
        "   up {} / down {}, p-value {:.4}",
        sign_run.up_moves(),
        sign_run.down_moves(),
        sign_run.p_value()
    );
    let localization = localize_jumps(series.prices(), None)?;
    println!(
        "   flagged indices: {:?} (threshold {:.3})",
        localization.flags.jump_indices(),
        localization.threshold
    );

    // 4. Configuration from JSON
    let config = JumpConfig::from_json(
        r#"{"significance_level": 0.05, "threshold": {"rule": "std_dev_multiple", "value": 3.0}}"#,
    )?;
    let strict = JumpDetector::new(config)?.detect(&log_prices)?;
    println!("\n4. 3-sigma threshold at 5%: jump detected = {}", strict.jump_detected());

    println!("\n=== Examples Complete ===");
    Ok(())
}
