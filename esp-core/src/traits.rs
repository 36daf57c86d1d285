//! Quelle der Konfigurations-Literale
//!
//! Der Trait trennt das Modell von der Herkunft der Werte.
//!
//! # Implementierungen
//! - **Production:** `CompiledConfig` (Build-Zeit Konstanten aus `.env`)
//! - **Testing:** `MockConfigProvider` (in-memory)

use crate::types::{ClockStyle, DstRuleSpec, PinAssignment};

/// Liefert die rohen, noch ungeprüften Konfigurationswerte
///
/// Wird genau einmal von [`Configuration::load`](crate::Configuration::load)
/// gelesen.
pub trait ConfigProvider {
    fn pins(&self) -> PinAssignment;

    fn wifi_ssid(&self) -> &str;

    fn wifi_password(&self) -> &str;

    /// Hostname für DHCP und mDNS (ohne `.local`)
    fn hostname(&self) -> &str;

    /// NTP-Server in der Reihenfolge, in der sie gefragt werden sollen
    fn ntp_servers(&self) -> &[&str];

    fn clock_style(&self) -> ClockStyle;

    /// Basis-Offset zu UTC in Sekunden (Normalzeit ohne Sommerzeit-Regel)
    fn utc_offset_secs(&self) -> i32;

    fn dst_start(&self) -> DstRuleSpec<'_>;

    fn dst_end(&self) -> DstRuleSpec<'_>;
}
