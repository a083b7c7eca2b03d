// Validation example for tyconf
//
// Run with: cargo run --example with_validation

use tyconf::validators::{
    all_of, any_of, min_length, non_empty, one_of, range, regex, starts_with, url_scheme,
};
use tyconf::{Config, TypeSpec, Validator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("🔒 tyconf Validation Example\n");

    let mut config = Config::builder()
        .property("port", (TypeSpec::Int, 8080, range(1024, 65535)))
        .property(
            "log_level",
            (TypeSpec::Str, "INFO", one_of(["DEBUG", "INFO", "WARNING", "ERROR"])),
        )
        .property(
            "username",
            (
                TypeSpec::Str,
                "admin",
                all_of([min_length(3), regex(r"^[a-z_]+$")?]),
            ),
        )
        .property(
            "endpoint",
            (
                TypeSpec::Str,
                "https://api.example.com",
                any_of([url_scheme(["https"]), starts_with("ftp://", true)]),
            ),
        )
        .property(
            "tags",
            (TypeSpec::list_of(TypeSpec::Str), vec!["web"], non_empty()),
        )
        // plain closures work too
        .property(
            "workers",
            (
                TypeSpec::Int,
                4,
                Validator::predicate(|v| v.as_i64().is_some_and(|n| n.count_ones() == 1)),
            ),
        )
        .build()?;

    let attempts: Vec<(&str, serde_json::Value)> = vec![
        ("port", 3000.into()),
        ("port", 80.into()),
        ("log_level", "TRACE".into()),
        ("username", "ab".into()),
        ("username", "John".into()),
        ("username", "john_doe".into()),
        ("endpoint", "http://example.com".into()),
        ("endpoint", "ftp://files.example.com".into()),
        ("tags", serde_json::json!([])),
        ("workers", 6.into()),
        ("workers", 8.into()),
    ];

    for (name, value) in attempts {
        match config.set(name, value.clone()) {
            Ok(()) => println!("✅ {name} = {value}"),
            Err(e) => println!("❌ {e}"),
        }
    }

    println!();
    config.show();

    Ok(())
}
