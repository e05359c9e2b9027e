//! Redirecting generic output through a logger
//!
//! Anything written with `write!`/`writeln!` to a logger gets decorated
//! line by line, and the logger's own output can be pointed at a file.
//!
//! Run with: cargo run --example redirect_output

use rust_decorated_logger::prelude::*;
use std::io::Write;

fn main() -> Result<()> {
    println!("=== Rust Decorated Logger - Redirect Output Example ===\n");

    let logger = Logger::builder()
        .decorator(TagDecoration::plain("[redirected] "))
        .build();

    let mut writer = &logger;
    writeln!(writer, "written with writeln!")?;
    write!(writer, "partial ")?;
    writeln!(writer, "line completed later")?;
    write!(writer, "flushed without newline")?;
    logger.flush()?;

    let path = std::env::temp_dir().join("rust_decorated_logger_demo.log");
    logger.set_output(FileSink::new(&path)?);
    logger.log("This line goes to the file\nand so does this one")?;
    logger.flush()?;

    println!("\nFile {} contains:", path.display());
    print!("{}", std::fs::read_to_string(&path)?);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
