//! Fuzz target for the TOML configuration parser.
//!
//! Run with: cargo +nightly fuzz run fuzz_config_parser
//!
//! Feeds arbitrary UTF-8 to `AppConfig::parse()`. Anything it accepts must
//! pass validation again after a round trip through `to_toml()`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use precis_config::AppConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = AppConfig::parse(s) {
        let rendered = config.to_toml().expect("parsed config serializes");
        assert_eq!(AppConfig::parse(&rendered).ok(), Some(config));
    }
});
