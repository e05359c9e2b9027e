//! Named logger instances
//!
//! Two independently decorated loggers registered by name and looked up
//! from the global registry.
//!
//! Run with: cargo run --example multiple_loggers

use rust_decorated_logger::prelude::*;

fn greet(from: &str, to: &str, text: &str) -> Result<()> {
    if let Some(logger) = LoggerRegistry::global().get(from) {
        logger.log(format!("{} -> {}: {}", from, to, text))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    println!("=== Rust Decorated Logger - Multiple Loggers Example ===\n");

    let registry = LoggerRegistry::global();
    for name in ["xf8b", "sparky"] {
        let logger = Logger::builder()
            .name(name)
            .decorator(DateTimeDecoration::new())
            .decorator(TagDecoration::plain(format!("[{}] ", name)))
            .build();
        registry.register(logger)?;
    }

    greet("xf8b", "sparky", "hi sparky")?;
    greet("sparky", "xf8b", "Hi xf")?;

    if let Some(sparky) = registry.get("sparky") {
        sparky.disable(0)?.log("sparky without a timestamp")?;
    }
    greet("xf8b", "sparky", "mine is unchanged")?;

    println!("\nRegistered: {:?}", registry.names());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
