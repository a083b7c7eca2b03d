// Basic usage example for tyconf
//
// Run with: cargo run --example basic_usage

use tyconf::{Config, TypeSpec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("📦 tyconf Basic Usage Example\n");

    // Declare properties with the builder
    let mut config = Config::builder()
        .property("host", (TypeSpec::Str, "localhost"))
        .property("port", (TypeSpec::Int, 8080))
        .property("debug", (TypeSpec::Bool, false))
        .property("VERSION", (TypeSpec::Str, "1.0.0", true))
        .build()?;

    println!("✅ Defaults:");
    config.show();
    println!();

    // Update a property
    println!("🔧 Changing port to 3000...");
    config.set("port", 3000)?;
    println!("✅ port = {}\n", config.get_as::<i64>("port")?);

    // Wrong type
    println!("🚫 Setting port to \"high\"...");
    if let Err(e) = config.set("port", "high") {
        println!("   Rejected: {e}\n");
    }

    // Read-only
    println!("🚫 Changing VERSION...");
    if let Err(e) = config.set("VERSION", "2.0.0") {
        println!("   Rejected: {e}\n");
    }

    // Add a property at runtime
    config.add("workers", (TypeSpec::Int, 4))?;
    println!("➕ Added 'workers': {:?}\n", config.list_properties());

    // Reset everything to defaults
    println!("🔄 Resetting...");
    config.reset()?;
    println!("✅ {config}\n");

    // Frozen configs reject every change
    config.freeze();
    if let Err(e) = config.set("debug", true) {
        println!("🧊 {e}");
    }

    Ok(())
}
