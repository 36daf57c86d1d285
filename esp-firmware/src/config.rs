// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Die Werte hier sind nur Rohdaten. Geprüft und zu einer `Configuration`
// zusammengesetzt werden sie einmal beim Start über `CompiledConfig`.

use esp_core::{ClockStyle, ConfigProvider, DstRuleSpec, Month, PinAssignment, Week, Weekday};

// ============================================================================
// Pin Konfiguration (ILI9341 TFT + CCS811 am I2C-Bus)
// ============================================================================

/// TFT Data/Command Select
pub const TFT_DC: u8 = 4;

/// TFT Chip Select
pub const TFT_CS: u8 = 5;

/// TFT Hintergrundbeleuchtung
pub const TFT_LED: u8 = 15;

/// TFT Reset
pub const TFT_RST: u8 = 22;

/// I2C Datenleitung
pub const I2C_SDA: u8 = 25;

/// I2C Taktleitung
pub const I2C_SCL: u8 = 26;

/// WAKE-Pin des CCS811 (active low)
pub const CCS811_WAKE_PIN: u8 = 32;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Hostname für DHCP und mDNS (ohne .local suffix)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_HOSTNAME geladen
pub const WIFI_HOSTNAME: &str = env!(
    "WIFI_HOSTNAME",
    "WiFi Hostname nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

/// Wartezeit nach fehlgeschlagenem Verbindungsversuch
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

// ============================================================================
// Zeit Konfiguration
// ============================================================================

// NTP_SERVERS: &[&str] - generiert von build.rs aus der Variable NTP_SERVERS
// (kommagetrennt, Standard: 0-2.de.pool.ntp.org)
include!(concat!(env!("OUT_DIR"), "/ntp_servers.rs"));

/// "12" oder "24" - Standard 24h wenn CLOCK_STYLE nicht gesetzt ist
pub const CLOCK_STYLE: Option<&str> = option_env!("CLOCK_STYLE");

/// Normalzeit: UTC+1
pub const UTC_OFFSET_SECS: i32 = 3600;

/// Central European Summer Time = UTC+2
pub const DST_START: DstRuleSpec<'static> = DstRuleSpec {
    label: "CEST",
    week: Week::Last,
    weekday: Weekday::Sun,
    month: Month::Mar,
    hour: 2,
    offset_secs: 3600,
};

/// Central European Time = UTC+1
/// Stunde in der Lokalzeit vor dem Wechsel (03:00 CEST)
pub const DST_END: DstRuleSpec<'static> = DstRuleSpec {
    label: "CET",
    week: Week::Last,
    weekday: Weekday::Sun,
    month: Month::Oct,
    hour: 3,
    offset_secs: 0,
};

// ============================================================================
// mDNS-Konfiguration
// ============================================================================

/// mDNS TTL (Time To Live) in Sekunden
pub const MDNS_TTL_SECS: u32 = 120;

/// mDNS Reconnect Delay in Sekunden
pub const MDNS_RECONNECT_DELAY_SECS: u64 = 5;

/// mDNS Port (Standard: 5353, RFC 6762)
pub const MDNS_PORT: u16 = 5353;

/// mDNS IPv4 Multicast-Adresse (224.0.0.251)
pub const MDNS_MULTICAST_ADDR: [u8; 4] = [224, 0, 0, 251];

/// UDP Buffer-Größen für mDNS (TX, RX in Bytes)
pub const MDNS_UDP_BUFFER_SIZE: usize = 512;

/// mDNS Receive/Send Buffer-Größen in Bytes (Standard MTU)
pub const MDNS_PACKET_BUFFER_SIZE: usize = 1500;

// ============================================================================
// ConfigProvider
// ============================================================================

/// Liefert die zur Build-Zeit eingebackenen Werte an `Configuration::load`
pub struct CompiledConfig;

impl ConfigProvider for CompiledConfig {
    fn pins(&self) -> PinAssignment {
        PinAssignment {
            tft_dc: TFT_DC,
            tft_cs: TFT_CS,
            tft_led: TFT_LED,
            tft_rst: TFT_RST,
            i2c_sda: I2C_SDA,
            i2c_scl: I2C_SCL,
            sensor_wake: CCS811_WAKE_PIN,
        }
    }

    fn wifi_ssid(&self) -> &str {
        WIFI_SSID
    }

    fn wifi_password(&self) -> &str {
        WIFI_PASSWORD
    }

    fn hostname(&self) -> &str {
        WIFI_HOSTNAME
    }

    fn ntp_servers(&self) -> &[&str] {
        NTP_SERVERS
    }

    fn clock_style(&self) -> ClockStyle {
        // Unbekannte Werte lehnt build.rs bereits ab
        CLOCK_STYLE
            .and_then(|style| ClockStyle::try_from(style).ok())
            .unwrap_or_default()
    }

    fn utc_offset_secs(&self) -> i32 {
        UTC_OFFSET_SECS
    }

    fn dst_start(&self) -> DstRuleSpec<'_> {
        DST_START
    }

    fn dst_end(&self) -> DstRuleSpec<'_> {
        DST_END
    }
}
