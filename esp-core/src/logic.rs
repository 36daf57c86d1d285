//! Pure Validierungs-Logik
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use core::fmt::{self, Write};

use crate::error::PinError;
use crate::types::{DstRuleSpec, PinAssignment};

/// Höchste GPIO-Nummer auf dem ESP32
pub const GPIO_MAX: u8 = 39;

/// GPIOs, die intern mit dem SPI-Flash verbunden sind
pub const FLASH_PINS: core::ops::RangeInclusive<u8> = 6..=11;

/// GPIOs ohne Ausgangstreiber
pub const INPUT_ONLY_PINS: core::ops::RangeInclusive<u8> = 34..=39;

/// Kleinster erlaubter UTC-Offset (UTC-12)
pub const MIN_UTC_OFFSET_SECS: i32 = -12 * 3600;

/// Größter erlaubter UTC-Offset (UTC+14)
pub const MAX_UTC_OFFSET_SECS: i32 = 14 * 3600;

/// Prüft Bereich und Eindeutigkeit aller Pins
///
/// Alle Rollen werden vom Controller getrieben, deshalb sind auch
/// Input-Only Pins ungültig.
///
/// # Beispiele
///
/// ```
/// # use esp_core::{PinAssignment, PinError, PinRole, validate_pins};
/// let pins = PinAssignment {
///     tft_dc: 4, tft_cs: 5, tft_led: 15, tft_rst: 22,
///     i2c_sda: 25, i2c_scl: 26, sensor_wake: 32,
/// };
/// assert!(validate_pins(&pins).is_ok());
///
/// let clash = pins.with_pin(PinRole::SensorWake, 4);
/// assert_eq!(
///     validate_pins(&clash),
///     Err(PinError::Collision { pin: 4, first: PinRole::TftDc, second: PinRole::SensorWake })
/// );
/// ```
pub fn validate_pins(pins: &PinAssignment) -> Result<(), PinError> {
    for (role, pin) in pins.iter() {
        if pin > GPIO_MAX {
            return Err(PinError::OutOfRange { role, pin });
        }
        if FLASH_PINS.contains(&pin) {
            return Err(PinError::FlashReserved { role, pin });
        }
        if INPUT_ONLY_PINS.contains(&pin) {
            return Err(PinError::InputOnly { role, pin });
        }
    }

    for (i, (first, pin)) in pins.iter().enumerate() {
        if let Some((second, _)) = pins.iter().skip(i + 1).find(|(_, other)| *other == pin) {
            return Err(PinError::Collision { pin, first, second });
        }
    }

    Ok(())
}

/// Hostname als einzelnes DNS-Label (RFC 1123)
pub fn is_valid_hostname(hostname: &str) -> bool {
    !hostname.is_empty()
        && !hostname.starts_with('-')
        && !hostname.ends_with('-')
        && hostname
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// NTP-Host: nicht leer, keine Leerzeichen, höchstens `max_len` Bytes
pub fn is_valid_ntp_host(host: &str, max_len: usize) -> bool {
    !host.is_empty() && host.len() <= max_len && !host.bytes().any(|b| b.is_ascii_whitespace())
}

/// Zerlegt eine kommagetrennte Server-Liste (z.B. aus `NTP_SERVERS`)
///
/// Eine leere Liste liefert keine Einträge, damit `Configuration::load`
/// `NoNtpServers` meldet. Leere Einträge zwischen Kommas bleiben erhalten
/// und fallen später als `InvalidNtpServer` auf.
pub fn split_ntp_list(list: &str) -> impl Iterator<Item = &str> {
    let list = list.trim();
    list.split(',')
        .map(str::trim)
        .take(if list.is_empty() { 0 } else { usize::MAX })
}

/// Zeitzonen-Label wie "CEST" oder "+03"
pub fn is_valid_tz_label(label: &str, max_len: usize) -> bool {
    !label.is_empty()
        && label.len() <= max_len
        && label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-')
}

/// Schreibt ein Label im POSIX-TZ Format
///
/// Rein alphabetische Labels mit mindestens 3 Zeichen stehen direkt,
/// alle anderen in spitzen Klammern (`<+03>`).
pub fn write_posix_label<W: Write>(w: &mut W, label: &str) -> fmt::Result {
    if label.len() >= 3 && label.bytes().all(|b| b.is_ascii_alphabetic()) {
        w.write_str(label)
    } else {
        write!(w, "<{}>", label)
    }
}

/// Schreibt einen UTC-Offset im POSIX-TZ Format
///
/// POSIX zählt westlich von Greenwich positiv: UTC+1 wird zu `-1`,
/// UTC-5 zu `5`, UTC+5:30 zu `-5:30`.
pub fn write_posix_offset<W: Write>(w: &mut W, utc_offset_secs: i32) -> fmt::Result {
    // in i64 negiert, sonst Überlauf bei i32::MIN
    let posix = -i64::from(utc_offset_secs);
    if posix < 0 {
        w.write_char('-')?;
    }
    let abs = posix.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3600, abs % 3600 / 60, abs % 60);
    write!(w, "{}", hours)?;
    if minutes != 0 || seconds != 0 {
        write!(w, ":{:02}", minutes)?;
    }
    if seconds != 0 {
        write!(w, ":{:02}", seconds)?;
    }
    Ok(())
}

/// Schreibt eine Wechsel-Regel als `,Mm.w.d/h`
pub fn write_posix_rule<W: Write>(w: &mut W, rule: &DstRuleSpec<'_>) -> fmt::Result {
    write!(
        w,
        ",M{}.{}.{}/{}",
        rule.month as u8, rule.week as u8, rule.weekday as u8, rule.hour
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Month, PinRole, Week, Weekday};
    use heapless::String;

    fn pins() -> PinAssignment {
        PinAssignment {
            tft_dc: 4,
            tft_cs: 5,
            tft_led: 15,
            tft_rst: 22,
            i2c_sda: 25,
            i2c_scl: 26,
            sensor_wake: 32,
        }
    }

    #[test]
    fn test_validate_pins_ok() {
        assert_eq!(validate_pins(&pins()), Ok(()));
    }

    #[test]
    fn test_validate_pins_collision_reports_both_roles() {
        let clash = pins().with_pin(PinRole::I2cScl, 25);
        assert_eq!(
            validate_pins(&clash),
            Err(PinError::Collision {
                pin: 25,
                first: PinRole::I2cSda,
                second: PinRole::I2cScl,
            })
        );
    }

    #[test]
    fn test_validate_pins_out_of_range() {
        let bad = pins().with_pin(PinRole::TftRst, 40);
        assert_eq!(
            validate_pins(&bad),
            Err(PinError::OutOfRange {
                role: PinRole::TftRst,
                pin: 40
            })
        );
    }

    #[test]
    fn test_validate_pins_flash_reserved() {
        let bad = pins().with_pin(PinRole::TftCs, 6);
        assert_eq!(
            validate_pins(&bad),
            Err(PinError::FlashReserved {
                role: PinRole::TftCs,
                pin: 6
            })
        );
    }

    #[test]
    fn test_validate_pins_input_only() {
        let bad = pins().with_pin(PinRole::SensorWake, 34);
        assert_eq!(
            validate_pins(&bad),
            Err(PinError::InputOnly {
                role: PinRole::SensorWake,
                pin: 34
            })
        );
    }

    #[test]
    fn test_hostname_rules() {
        assert!(is_valid_hostname("co2-meter"));
        assert!(is_valid_hostname("hostname"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("-co2"));
        assert!(!is_valid_hostname("co2-"));
        assert!(!is_valid_hostname("co2.local"));
        assert!(!is_valid_hostname("co2 meter"));
    }

    #[test]
    fn test_ntp_host_rules() {
        assert!(is_valid_ntp_host("0.de.pool.ntp.org", 64));
        assert!(!is_valid_ntp_host("", 64));
        assert!(!is_valid_ntp_host("pool .ntp.org", 64));
        assert!(!is_valid_ntp_host("0.de.pool.ntp.org", 8));
    }

    #[test]
    fn test_posix_offset_whole_hours() {
        let mut s: String<16> = String::new();
        write_posix_offset(&mut s, 3600).unwrap();
        assert_eq!(s.as_str(), "-1");

        let mut s: String<16> = String::new();
        write_posix_offset(&mut s, -5 * 3600).unwrap();
        assert_eq!(s.as_str(), "5");

        let mut s: String<16> = String::new();
        write_posix_offset(&mut s, 0).unwrap();
        assert_eq!(s.as_str(), "0");
    }

    #[test]
    fn test_posix_offset_extremes_do_not_overflow() {
        let mut s: String<16> = String::new();
        write_posix_offset(&mut s, i32::MIN).unwrap();
        assert_eq!(s.as_str(), "596523:14:08");

        let mut s: String<16> = String::new();
        write_posix_offset(&mut s, i32::MAX).unwrap();
        assert_eq!(s.as_str(), "-596523:14:07");
    }

    #[test]
    fn test_split_ntp_list_empty_variable_has_no_entries() {
        assert_eq!(split_ntp_list("").count(), 0);
        assert_eq!(split_ntp_list("   ").count(), 0);
    }

    #[test]
    fn test_split_ntp_list_keeps_order_and_blank_entries() {
        let mut hosts = split_ntp_list(" a.pool , ,b.pool");
        assert_eq!(hosts.next(), Some("a.pool"));
        assert_eq!(hosts.next(), Some(""));
        assert_eq!(hosts.next(), Some("b.pool"));
        assert_eq!(hosts.next(), None);
    }

    #[test]
    fn test_posix_offset_with_minutes() {
        let mut s: String<16> = String::new();
        write_posix_offset(&mut s, 5 * 3600 + 30 * 60).unwrap();
        assert_eq!(s.as_str(), "-5:30");
    }

    #[test]
    fn test_posix_label_quoting() {
        let mut s: String<16> = String::new();
        write_posix_label(&mut s, "CEST").unwrap();
        assert_eq!(s.as_str(), "CEST");

        let mut s: String<16> = String::new();
        write_posix_label(&mut s, "+03").unwrap();
        assert_eq!(s.as_str(), "<+03>");
    }

    #[test]
    fn test_posix_rule() {
        let rule = DstRuleSpec {
            label: "CEST",
            week: Week::Last,
            weekday: Weekday::Sun,
            month: Month::Mar,
            hour: 2,
            offset_secs: 3600,
        };
        let mut s: String<16> = String::new();
        write_posix_rule(&mut s, &rule).unwrap();
        assert_eq!(s.as_str(), ",M3.5.0/2");
    }
}
