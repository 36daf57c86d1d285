//! Fehler-Typen für das Laden der Konfiguration
//!
//! Alle Fehler sind `Copy` und tragen nur feste Daten (kein `alloc`).
//! Jeder Fehler bricht den Start der Firmware ab.

use core::fmt;

use crate::types::{PinRole, Transition};

/// Fehler bei der Pin-Zuordnung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Zwei logische Rollen teilen sich denselben GPIO
    Collision {
        pin: u8,
        first: PinRole,
        second: PinRole,
    },
    /// GPIO existiert auf dem ESP32 nicht (> 39)
    OutOfRange { role: PinRole, pin: u8 },
    /// GPIO 6-11 sind mit dem SPI-Flash verbunden
    FlashReserved { role: PinRole, pin: u8 },
    /// GPIO 34-39 können nur als Eingang genutzt werden
    InputOnly { role: PinRole, pin: u8 },
}

/// Welches Feld der WLAN-Zugangsdaten betroffen ist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CredentialField {
    Ssid,
    Password,
    Hostname,
}

/// Fehler in den Sommerzeit-Regeln
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DstRuleError {
    /// Offset der Start-Regel ist nicht größer als der der End-Regel
    OffsetOrder { start_secs: i32, end_secs: i32 },
    /// Basis-Offset liegt außerhalb von UTC-12 bis UTC+14
    BaseOffsetOutOfRange(i32),
    /// Basis + Regel-Offset liegt außerhalb von UTC-12 bis UTC+14
    EffectiveOffsetOutOfRange { transition: Transition, offset_secs: i32 },
    /// Stunde des Wechsels ist nicht 0-23
    HourOutOfRange { transition: Transition, hour: u8 },
    /// Label leer, zu lang oder mit ungültigen Zeichen
    InvalidLabel(Transition),
    /// Start und Ende fallen auf dieselbe Woche im selben Monat
    SameTransition,
}

/// Fehler beim Laden der Konfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    InvalidPinAssignment(PinError),
    EmptyCredential(CredentialField),
    CredentialTooLong(CredentialField),
    /// Hostname ist kein gültiges DNS-Label
    InvalidHostname,
    NoNtpServers,
    TooManyNtpServers,
    /// NTP-Server an Position `index` ist leer, zu lang oder enthält Leerzeichen
    InvalidNtpServer { index: usize },
    InconsistentDstRule(DstRuleError),
}

impl From<PinError> for ConfigError {
    fn from(e: PinError) -> Self {
        ConfigError::InvalidPinAssignment(e)
    }
}

impl From<DstRuleError> for ConfigError {
    fn from(e: DstRuleError) -> Self {
        ConfigError::InconsistentDstRule(e)
    }
}

// ============================================================================
// Display Implementations
// ============================================================================

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinError::Collision { pin, first, second } => {
                write!(f, "GPIO{} used by both {} and {}", pin, first, second)
            }
            PinError::OutOfRange { role, pin } => {
                write!(f, "GPIO{} for {} does not exist", pin, role)
            }
            PinError::FlashReserved { role, pin } => {
                write!(f, "GPIO{} for {} is reserved for SPI flash", pin, role)
            }
            PinError::InputOnly { role, pin } => {
                write!(f, "GPIO{} for {} is input-only", pin, role)
            }
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CredentialField::Ssid => "WiFi SSID",
            CredentialField::Password => "WiFi password",
            CredentialField::Hostname => "hostname",
        })
    }
}

impl fmt::Display for DstRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DstRuleError::OffsetOrder {
                start_secs,
                end_secs,
            } => write!(
                f,
                "DST start offset {}s must exceed end offset {}s",
                start_secs, end_secs
            ),
            DstRuleError::BaseOffsetOutOfRange(secs) => {
                write!(f, "UTC offset {}s out of range", secs)
            }
            DstRuleError::EffectiveOffsetOutOfRange {
                transition,
                offset_secs,
            } => write!(
                f,
                "effective offset {}s after {} out of range",
                offset_secs, transition
            ),
            DstRuleError::HourOutOfRange { transition, hour } => {
                write!(f, "{} hour {} out of range", transition, hour)
            }
            DstRuleError::InvalidLabel(transition) => write!(f, "invalid {} label", transition),
            DstRuleError::SameTransition => {
                f.write_str("DST start and end fall on the same week of the same month")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPinAssignment(e) => write!(f, "invalid pin assignment: {}", e),
            ConfigError::EmptyCredential(field) => write!(f, "{} is empty", field),
            ConfigError::CredentialTooLong(field) => write!(f, "{} is too long", field),
            ConfigError::InvalidHostname => f.write_str("hostname is not a valid DNS label"),
            ConfigError::NoNtpServers => f.write_str("no NTP servers configured"),
            ConfigError::TooManyNtpServers => f.write_str("too many NTP servers configured"),
            ConfigError::InvalidNtpServer { index } => {
                write!(f, "NTP server #{} is invalid", index)
            }
            ConfigError::InconsistentDstRule(e) => write!(f, "inconsistent DST rules: {}", e),
        }
    }
}
