//! Configuration integration tests

use price_relay::config::Config;

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.feed.product_ids, vec!["BTC-USD"]);
    assert_eq!(config.sink.stream, "bitcoin-price");
    assert!(config.validate().is_ok());
}
