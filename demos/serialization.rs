// Serialization example for tyconf
//
// Run with: cargo run --example serialization

use std::collections::HashMap;
use tyconf::validators::range;
use tyconf::{Config, MergeOptions, SaveOptions, Schema, TypeSpec};

fn schema() -> Schema {
    Schema::new()
        .with("host", (TypeSpec::Str, "localhost"))
        .with("port", (TypeSpec::Int, 8080, range(1024, 65535)))
        .with("debug", (TypeSpec::Bool, false))
        .with("tags", (TypeSpec::list_of(TypeSpec::Str), vec!["web"]))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("💾 tyconf Serialization Example\n");

    let dir = std::env::temp_dir().join("tyconf_example");
    let mut config = Config::new(schema())?;
    config.set("host", "example.com")?;

    // Full metadata: self-describing
    let json_path = dir.join("config.json");
    config.to_json(Some(&json_path), &SaveOptions::default())?;
    println!("✅ Wrote {}", json_path.display());
    let loaded = Config::from_json(&json_path.to_string_lossy(), None)?;
    println!("   Loaded back: {loaded}\n");

    // Values only: needs the schema
    let values = config
        .to_json(None, &SaveOptions::default().values_only())?
        .unwrap_or_default();
    println!("📄 Values only:\n{values}\n");
    let loaded = Config::from_json(&values, Some(&schema()))?;
    println!("   Loaded back: {loaded}\n");

    // TOML
    let toml_path = dir.join("config.toml");
    config.to_toml(Some(&toml_path), &SaveOptions::default().values_only())?;
    println!("✅ Wrote {}", toml_path.display());
    let loaded = Config::from_toml(&toml_path.to_string_lossy(), Some(&schema()))?;
    println!("   Loaded back: {loaded}\n");

    // Merge an override document
    config.load_json(r#"{"port": 9000, "unknown": true}"#, MergeOptions::default())?;
    println!("🔀 After merge: {config}\n");

    // Environment overrides
    let env = HashMap::from([
        ("APP_DEBUG".to_string(), "yes".to_string()),
        ("APP_TAGS".to_string(), r#"["api", "web"]"#.to_string()),
    ]);
    config.load_env("APP_", &env)?;
    println!("🌱 After env: {config}");

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
