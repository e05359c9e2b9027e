//! Basic logger usage example
//!
//! Demonstrates decorators, toggling, multi-line messages, caller
//! annotation and the leveled facade on the console.
//!
//! Run with: cargo run --example basic_usage

use rust_decorated_logger::prelude::*;
use rust_decorated_logger::core::palette;

fn main() -> Result<()> {
    println!("=== Rust Decorated Logger - Basic Usage Example ===\n");

    let logger = Logger::new();
    logger
        .add_decorator(DateTimeDecoration::new())
        .add_decorator(TagDecoration::colored(palette::fg(colored::Color::Green), "[DEMO] "));

    println!("1. Decorated messages:");
    logger.log("Hello, world!")?;
    logger.log("A message\nspanning\nthree lines")?;

    println!("\n2. Toggling the timestamp off:");
    logger.disable(0)?;
    logger.log("Tag only")?;
    logger.enable(0)?;

    println!("\n3. Caller annotation:");
    logger.debug(true);
    logger.log("Full location")?;
    logger.debug_short(true);
    logger.log("Short location")?;
    logger.debug(false);

    println!("\n4. Leveled facade with a WARN threshold:");
    logger.set_min_level(LogLevel::Warn);
    logger.log("Hidden")?;
    logger.warn("Disk nearly full")?;
    logger.error("Disk full")?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
