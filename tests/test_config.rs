use congressintel::domain::error::DomainError;
use congressintel::infrastructure::config::AppConfig;
use std::io::Write;
use std::path::Path;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = write_config(
        r#"
        [feed]
        base_url = "http://localhost:9000/beta"
        timeout_secs = 5

        [cache]
        ttl_secs = 60

        [logging]
        level = "debug"
        format = "json"

        [notifications]
        subject = "Desk alerts"

        [portfolio]
        capital = 1000.0

        [scoring.tiers]
        strong_buy = 6
        buy = 4
        watch = 2

        [scoring.allocation]
        max_positions = 5
        "#,
    );

    let config = AppConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.feed.base_url, "http://localhost:9000/beta");
    assert_eq!(config.feed.timeout_secs, 5);
    assert_eq!(config.cache.ttl_secs, 60);
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.notifications.subject, "Desk alerts");
    assert_eq!(config.portfolio.capital, 1000.0);
    assert_eq!(config.scoring.tiers.strong_buy, 6);
    assert_eq!(config.scoring.allocation.max_positions, 5);
    // Untouched sections keep their defaults.
    assert_eq!(config.prices.base_url, "https://query1.finance.yahoo.com");
    assert_eq!(config.scoring.skill.return_180d, 0.4);
}

#[test]
fn test_missing_file_is_config_error() {
    let err = AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
    assert!(matches!(err, DomainError::Config(_)));
}

#[test]
fn test_negative_capital_rejected() {
    let file = write_config("[portfolio]\ncapital = -5.0\n");
    let err = AppConfig::load(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("capital"));
}

#[test]
fn test_malformed_toml_rejected() {
    let file = write_config("[cache\nttl_secs = 1");
    assert!(AppConfig::load(Some(file.path())).is_err());
}
