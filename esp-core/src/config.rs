//! Geprüftes Konfigurations-Modell
//!
//! [`Configuration::load`] ist der einzige Weg zu einer `Configuration`.
//! Danach gibt es nur noch lesende Zugriffe.

use core::fmt;

use heapless::{String, Vec};

use crate::error::{ConfigError, CredentialField, DstRuleError};
use crate::logic::{
    MAX_UTC_OFFSET_SECS, MIN_UTC_OFFSET_SECS, is_valid_hostname, is_valid_ntp_host,
    is_valid_tz_label, validate_pins, write_posix_label, write_posix_offset, write_posix_rule,
};
use crate::traits::ConfigProvider;
use crate::types::{ClockStyle, DstRuleSpec, Month, PinAssignment, Transition, Week, Weekday};

/// Maximale SSID-Länge laut 802.11
pub const MAX_SSID_LEN: usize = 32;

/// Maximale WPA2-Passphrase
pub const MAX_PASSWORD_LEN: usize = 64;

/// Maximale Hostname-Länge (Grenze der DHCP-Konfiguration von embassy-net)
pub const MAX_HOSTNAME_LEN: usize = 32;

/// Maximale Anzahl NTP-Server (SNTP auf dem ESP32 kennt 3)
pub const MAX_NTP_SERVERS: usize = 3;

pub const MAX_NTP_HOST_LEN: usize = 64;

/// Maximale Länge eines Zeitzonen-Labels ("CEST", "+0530")
pub const MAX_TZ_LABEL_LEN: usize = 7;

/// Buffer-Größe für den POSIX-TZ String
/// Reicht für zwei gequotete Labels, zwei Offsets mit Sekunden und zwei Regeln
pub const TZ_STRING_LEN: usize = 64;

pub type Ssid = String<MAX_SSID_LEN>;
pub type Password = String<MAX_PASSWORD_LEN>;
pub type Hostname = String<MAX_HOSTNAME_LEN>;
pub type NtpHost = String<MAX_NTP_HOST_LEN>;
pub type TzLabel = String<MAX_TZ_LABEL_LEN>;
pub type TzString = String<TZ_STRING_LEN>;

// ============================================================================
// WLAN-Zugangsdaten
// ============================================================================

/// SSID, Passphrase und Hostname
///
/// `Debug` und `defmt::Format` geben die Passphrase nie aus.
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkCredentials {
    ssid: Ssid,
    password: Password,
    hostname: Hostname,
}

impl NetworkCredentials {
    fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self, ConfigError> {
        let ssid = credential(provider.wifi_ssid(), CredentialField::Ssid)?;
        let password = credential(provider.wifi_password(), CredentialField::Password)?;
        let hostname: Hostname = credential(provider.hostname(), CredentialField::Hostname)?;
        if !is_valid_hostname(&hostname) {
            return Err(ConfigError::InvalidHostname);
        }
        Ok(Self {
            ssid,
            password,
            hostname,
        })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }
}

fn credential<const N: usize>(
    value: &str,
    field: CredentialField,
) -> Result<String<N>, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::EmptyCredential(field));
    }
    String::try_from(value).map_err(|_| ConfigError::CredentialTooLong(field))
}

impl fmt::Debug for NetworkCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkCredentials")
            .field("ssid", &self.ssid.as_str())
            .field("password", &"***")
            .field("hostname", &self.hostname.as_str())
            .finish()
    }
}

// ============================================================================
// NTP-Server
// ============================================================================

/// Geordnete Liste der NTP-Server, mindestens einer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NtpServerList {
    servers: Vec<NtpHost, MAX_NTP_SERVERS>,
}

impl NtpServerList {
    fn from_hosts(hosts: &[&str]) -> Result<Self, ConfigError> {
        if hosts.is_empty() {
            return Err(ConfigError::NoNtpServers);
        }
        if hosts.len() > MAX_NTP_SERVERS {
            return Err(ConfigError::TooManyNtpServers);
        }

        let mut servers = Vec::new();
        for (index, host) in hosts.iter().enumerate() {
            if !is_valid_ntp_host(host, MAX_NTP_HOST_LEN) {
                return Err(ConfigError::InvalidNtpServer { index });
            }
            let host =
                NtpHost::try_from(*host).map_err(|_| ConfigError::InvalidNtpServer { index })?;
            servers
                .push(host)
                .map_err(|_| ConfigError::TooManyNtpServers)?;
        }
        Ok(Self { servers })
    }

    /// Erster Server der Liste
    pub fn primary(&self) -> &str {
        // Mindestens ein Eintrag ist durch from_hosts garantiert
        self.servers.first().map(|s| s.as_str()).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.servers.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

// ============================================================================
// Sommerzeit
// ============================================================================

/// Geprüfte Wechsel-Regel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DstRule {
    label: TzLabel,
    week: Week,
    weekday: Weekday,
    month: Month,
    hour: u8,
    offset_secs: i32,
}

impl DstRule {
    fn from_spec(spec: &DstRuleSpec<'_>, transition: Transition) -> Result<Self, DstRuleError> {
        if !is_valid_tz_label(spec.label, MAX_TZ_LABEL_LEN) {
            return Err(DstRuleError::InvalidLabel(transition));
        }
        if spec.hour > 23 {
            return Err(DstRuleError::HourOutOfRange {
                transition,
                hour: spec.hour,
            });
        }
        let label =
            TzLabel::try_from(spec.label).map_err(|_| DstRuleError::InvalidLabel(transition))?;
        Ok(Self {
            label,
            week: spec.week,
            weekday: spec.weekday,
            month: spec.month,
            hour: spec.hour,
            offset_secs: spec.offset_secs,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn week(&self) -> Week {
        self.week
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Versatz nach dem Wechsel relativ zum Basis-Offset
    pub fn offset_secs(&self) -> i32 {
        self.offset_secs
    }

    /// Zurück in die rohe Form (z.B. für die TZ-Ausgabe)
    pub fn spec(&self) -> DstRuleSpec<'_> {
        DstRuleSpec {
            label: &self.label,
            week: self.week,
            weekday: self.weekday,
            month: self.month,
            hour: self.hour,
            offset_secs: self.offset_secs,
        }
    }
}

impl fmt::Display for DstRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {{ {:?} {:?} of {:?} at {}:00, {}s }}",
            self.label, self.week, self.weekday, self.month, self.hour, self.offset_secs
        )
    }
}

/// Start- und End-Regel mit gemeinsamem Basis-Offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DstRules {
    utc_offset_secs: i32,
    start: DstRule,
    end: DstRule,
}

impl DstRules {
    fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self, DstRuleError> {
        let utc_offset_secs = provider.utc_offset_secs();
        if !(MIN_UTC_OFFSET_SECS..=MAX_UTC_OFFSET_SECS).contains(&utc_offset_secs) {
            return Err(DstRuleError::BaseOffsetOutOfRange(utc_offset_secs));
        }

        let start = DstRule::from_spec(&provider.dst_start(), Transition::Start)?;
        let end = DstRule::from_spec(&provider.dst_end(), Transition::End)?;

        if start.offset_secs <= end.offset_secs {
            return Err(DstRuleError::OffsetOrder {
                start_secs: start.offset_secs,
                end_secs: end.offset_secs,
            });
        }
        if start.month == end.month && start.week == end.week {
            return Err(DstRuleError::SameTransition);
        }

        for (transition, rule) in [(Transition::Start, &start), (Transition::End, &end)] {
            let offset_secs = utc_offset_secs.saturating_add(rule.offset_secs);
            if !(MIN_UTC_OFFSET_SECS..=MAX_UTC_OFFSET_SECS).contains(&offset_secs) {
                return Err(DstRuleError::EffectiveOffsetOutOfRange {
                    transition,
                    offset_secs,
                });
            }
        }

        Ok(Self {
            utc_offset_secs,
            start,
            end,
        })
    }

    /// Gemeinsamer Basis-Offset zu UTC
    pub fn utc_offset_secs(&self) -> i32 {
        self.utc_offset_secs
    }

    pub fn start(&self) -> &DstRule {
        &self.start
    }

    pub fn end(&self) -> &DstRule {
        &self.end
    }

    /// UTC-Offset der Normalzeit (nach der End-Regel)
    pub fn standard_offset_secs(&self) -> i32 {
        self.utc_offset_secs + self.end.offset_secs
    }

    /// UTC-Offset der Sommerzeit (nach der Start-Regel)
    pub fn dst_offset_secs(&self) -> i32 {
        self.utc_offset_secs + self.start.offset_secs
    }

    /// POSIX TZ String für die Zeitsynchronisation
    ///
    /// # Beispiele
    ///
    /// Mitteleuropa: `CET-1CEST-2,M3.5.0/2,M10.5.0/3`
    pub fn posix_tz(&self) -> Result<TzString, fmt::Error> {
        let mut tz = TzString::new();
        write_posix_label(&mut tz, &self.end.label)?;
        write_posix_offset(&mut tz, self.standard_offset_secs())?;
        write_posix_label(&mut tz, &self.start.label)?;
        write_posix_offset(&mut tz, self.dst_offset_secs())?;
        write_posix_rule(&mut tz, &self.start.spec())?;
        write_posix_rule(&mut tz, &self.end.spec())?;
        Ok(tz)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Gesamte Geräte-Konfiguration
///
/// Wird einmal beim Start geladen und danach nur gelesen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pins: PinAssignment,
    network: NetworkCredentials,
    ntp_servers: NtpServerList,
    clock_style: ClockStyle,
    dst_rules: DstRules,
}

impl Configuration {
    /// Lädt und prüft die Konfiguration
    ///
    /// Reihenfolge der Prüfungen: Pins, Zugangsdaten, NTP-Server,
    /// Sommerzeit-Regeln. Der erste Fehler wird zurückgegeben.
    pub fn load<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self, ConfigError> {
        let pins = provider.pins();
        validate_pins(&pins)?;

        let network = NetworkCredentials::from_provider(provider)?;
        let ntp_servers = NtpServerList::from_hosts(provider.ntp_servers())?;
        let dst_rules = DstRules::from_provider(provider)?;

        Ok(Self {
            pins,
            network,
            ntp_servers,
            clock_style: provider.clock_style(),
            dst_rules,
        })
    }

    pub fn pins(&self) -> &PinAssignment {
        &self.pins
    }

    pub fn network(&self) -> &NetworkCredentials {
        &self.network
    }

    pub fn ntp_servers(&self) -> &NtpServerList {
        &self.ntp_servers
    }

    pub fn clock_style(&self) -> ClockStyle {
        self.clock_style
    }

    pub fn dst_rules(&self) -> &DstRules {
        &self.dst_rules
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for NetworkCredentials {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "NetworkCredentials {{ ssid: {}, password: ***, hostname: {} }}",
            self.ssid.as_str(),
            self.hostname.as_str()
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for NtpServerList {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "[");
        for (i, server) in self.iter().enumerate() {
            if i > 0 {
                defmt::write!(fmt, ", ");
            }
            defmt::write!(fmt, "{}", server);
        }
        defmt::write!(fmt, "]");
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DstRule {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{} {{ {} {} of {} at {}:00, {}s }}",
            self.label.as_str(),
            self.week,
            self.weekday,
            self.month,
            self.hour,
            self.offset_secs
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DstRules {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "DstRules {{ utc: {}s, start: {}, end: {} }}",
            self.utc_offset_secs,
            self.start,
            self.end
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Configuration {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Configuration {{ pins: {}, network: {}, ntp: {}, clock: {}, dst: {} }}",
            self.pins,
            self.network,
            self.ntp_servers,
            self.clock_style,
            self.dst_rules
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PinError;
    use crate::types::PinRole;

    struct Literals {
        pins: PinAssignment,
        ssid: &'static str,
        password: &'static str,
        hostname: &'static str,
        ntp: &'static [&'static str],
        utc_offset_secs: i32,
        start_offset_secs: i32,
        end_offset_secs: i32,
    }

    impl Literals {
        fn co2_meter() -> Self {
            Self {
                pins: PinAssignment {
                    tft_dc: 4,
                    tft_cs: 5,
                    tft_led: 15,
                    tft_rst: 22,
                    i2c_sda: 25,
                    i2c_scl: 26,
                    sensor_wake: 32,
                },
                ssid: "ssid",
                password: "password",
                hostname: "hostname",
                ntp: &["0.de.pool.ntp.org", "1.de.pool.ntp.org", "2.de.pool.ntp.org"],
                utc_offset_secs: 3600,
                start_offset_secs: 3600,
                end_offset_secs: 0,
            }
        }
    }

    impl ConfigProvider for Literals {
        fn pins(&self) -> PinAssignment {
            self.pins
        }
        fn wifi_ssid(&self) -> &str {
            self.ssid
        }
        fn wifi_password(&self) -> &str {
            self.password
        }
        fn hostname(&self) -> &str {
            self.hostname
        }
        fn ntp_servers(&self) -> &[&str] {
            self.ntp
        }
        fn clock_style(&self) -> ClockStyle {
            ClockStyle::TwentyFourHour
        }
        fn utc_offset_secs(&self) -> i32 {
            self.utc_offset_secs
        }
        fn dst_start(&self) -> DstRuleSpec<'_> {
            DstRuleSpec {
                label: "CEST",
                week: Week::Last,
                weekday: Weekday::Sun,
                month: Month::Mar,
                hour: 2,
                offset_secs: self.start_offset_secs,
            }
        }
        fn dst_end(&self) -> DstRuleSpec<'_> {
            DstRuleSpec {
                label: "CET",
                week: Week::Last,
                weekday: Weekday::Sun,
                month: Month::Oct,
                hour: 3,
                offset_secs: self.end_offset_secs,
            }
        }
    }

    #[test]
    fn test_load_co2_meter_defaults() {
        let config = Configuration::load(&Literals::co2_meter()).unwrap();
        assert_eq!(config.pins().tft_dc, 4);
        assert_eq!(config.network().ssid(), "ssid");
        assert_eq!(config.ntp_servers().len(), 3);
        assert_eq!(config.ntp_servers().primary(), "0.de.pool.ntp.org");
        assert_eq!(config.dst_rules().start().offset_secs(), 3600);
        assert_eq!(config.dst_rules().end().offset_secs(), 0);
    }

    #[test]
    fn test_pins_checked_before_credentials() {
        let mut literals = Literals::co2_meter();
        literals.pins = literals.pins.with_pin(PinRole::TftCs, 4);
        literals.ssid = "";
        assert_eq!(
            Configuration::load(&literals),
            Err(ConfigError::InvalidPinAssignment(PinError::Collision {
                pin: 4,
                first: PinRole::TftDc,
                second: PinRole::TftCs,
            }))
        );
    }

    #[test]
    fn test_password_too_long() {
        let mut literals = Literals::co2_meter();
        literals.password =
            "0123456789012345678901234567890123456789012345678901234567890123456789";
        assert_eq!(
            Configuration::load(&literals),
            Err(ConfigError::CredentialTooLong(CredentialField::Password))
        );
    }

    #[test]
    fn test_equal_dst_offsets_rejected() {
        let mut literals = Literals::co2_meter();
        literals.end_offset_secs = 3600;
        assert_eq!(
            Configuration::load(&literals),
            Err(ConfigError::InconsistentDstRule(DstRuleError::OffsetOrder {
                start_secs: 3600,
                end_secs: 3600,
            }))
        );
    }

    #[test]
    fn test_effective_offset_out_of_range() {
        let mut literals = Literals::co2_meter();
        literals.utc_offset_secs = 14 * 3600;
        assert_eq!(
            Configuration::load(&literals),
            Err(ConfigError::InconsistentDstRule(
                DstRuleError::EffectiveOffsetOutOfRange {
                    transition: Transition::Start,
                    offset_secs: 15 * 3600,
                }
            ))
        );
    }

    #[test]
    fn test_offsets_and_posix_tz() {
        let config = Configuration::load(&Literals::co2_meter()).unwrap();
        let rules = config.dst_rules();
        assert_eq!(rules.standard_offset_secs(), 3600);
        assert_eq!(rules.dst_offset_secs(), 7200);
        assert_eq!(
            rules.posix_tz().unwrap().as_str(),
            "CET-1CEST-2,M3.5.0/2,M10.5.0/3"
        );
    }

    #[test]
    fn test_rule_display_keeps_offset_sign() {
        use std::format;

        let mut provider = Literals::co2_meter();
        provider.utc_offset_secs = 7200;
        provider.start_offset_secs = 0;
        provider.end_offset_secs = -3600;
        let config = Configuration::load(&provider).unwrap();
        let rules = config.dst_rules();

        assert_eq!(
            format!("{}", rules.end()),
            "CET { Last Sun of Oct at 3:00, -3600s }"
        );
        assert_eq!(
            format!("{}", rules.start()),
            "CEST { Last Sun of Mar at 2:00, 0s }"
        );
    }

    #[test]
    fn test_debug_masks_password() {
        use std::format;

        let config = Configuration::load(&Literals::co2_meter()).unwrap();
        let out = format!("{:?}", config.network());
        assert!(out.contains("ssid"));
        assert!(!out.contains("\"password\""));
        assert!(out.contains("***"));
    }
}
