// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{ConfigError, Configuration};

use defmt::info;

/// Loggt die geladene Konfiguration beim Start (Passwort maskiert)
pub fn log_configuration(config: &Configuration) {
    let network = config.network();
    info!("Config: SSID '{}', hostname '{}'", network.ssid(), network.hostname());
    info!("Config: Pins {}", config.pins());
    info!("Config: NTP servers {}", config.ntp_servers());
    info!("Config: Clock style {}", config.clock_style());

    let rules = config.dst_rules();
    match rules.posix_tz() {
        Ok(tz) => info!("Config: Time zone {}", tz.as_str()),
        Err(_) => info!("Config: DST rules {}", rules),
    }
}
