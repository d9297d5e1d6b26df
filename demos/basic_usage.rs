// ============================================================================
// Basic Usage Example
// ============================================================================

use rounder::prelude::*;
use rounder::utils::init_logging;
use rust_decimal::Decimal;

fn main() -> Result<(), RoundingError> {
    if let Err(e) = init_logging(tracing::Level::DEBUG) {
        eprintln!("{}", e);
    }

    println!("=== Rounder Example ===\n");

    // A rounder that keeps two decimal places
    let rounder = RounderBuilder::new()
        .with_mode(RoundingMode::NearestTiesToEven)
        .decimal_places(2)
        .build()?;

    // Binary floats are rounded from their exact value
    println!("Rounding 2.675 (stored as 2.67499999...) to two places:");
    for mode in RoundingMode::ALL {
        let triple = rounder.round(&2.675f64, mode, rounder.config().policy)?;
        println!("  {:<30} {}", mode.name(), render(&triple, &RenderStyle::default()));
    }

    // The same digits written as a decimal are an exact tie
    println!("\nRounding the decimal literal 2.675 to two places:");
    for mode in RoundingMode::NEAREST {
        let rounded: String = rounder.round_to_places(&"2.675".to_string(), 2, mode)?;
        println!("  {:<30} {}", mode.name(), rounded);
    }

    // Significant figures with carry into the next decade
    println!("\n=== Significant Figures ===");
    let value = Decimal::new(9995, 3);
    for figures in 1..=4 {
        let rounded = rounder.round_to_figures(&value, figures, RoundingMode::NearestTiesToEven)?;
        println!("  {} to {} figures: {}", value, figures, rounded);
    }

    // Shortest-safe double output
    println!("\n=== Float Representation ===");
    let float_repr = RounderBuilder::from_config(RoundingConfig::float_repr()).build()?;
    for value in [0.1f64, 1.0 / 3.0, f64::from_bits(1), f64::MAX] {
        let triple = float_repr.round_default(&value)?;
        println!(
            "  {:<24e} -> {}",
            value,
            render(&triple, &RenderStyle::scientific().trim_trailing_zeros())
        );
    }

    // Format strings with a rounding-mode letter
    println!("\n=== Format Strings ===");
    let amount = Decimal::new(-4277, 4);
    for spec in [".3Mf", ".3Pf", ".3ef", "+010.2f", ".2e", ".1%"] {
        println!("  {:<10} {}", spec, rounder.format_value(&amount, spec)?);
    }

    Ok(())
}
