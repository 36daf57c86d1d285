//! Core Types für die Geräte-Konfiguration
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt;

// ============================================================================
// Pins
// ============================================================================

/// Logische Rolle eines GPIO-Pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    /// TFT Data/Command Select
    TftDc,
    /// TFT Chip Select
    TftCs,
    /// TFT Hintergrundbeleuchtung
    TftLed,
    /// TFT Reset
    TftRst,
    I2cSda,
    I2cScl,
    /// WAKE-Pin des CO2-Sensors (CCS811)
    SensorWake,
}

impl PinRole {
    /// Alle Rollen in der Reihenfolge, in der sie geprüft werden
    pub const ALL: [PinRole; 7] = [
        PinRole::TftDc,
        PinRole::TftCs,
        PinRole::TftLed,
        PinRole::TftRst,
        PinRole::I2cSda,
        PinRole::I2cScl,
        PinRole::SensorWake,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PinRole::TftDc => "TFT_DC",
            PinRole::TftCs => "TFT_CS",
            PinRole::TftLed => "TFT_LED",
            PinRole::TftRst => "TFT_RST",
            PinRole::I2cSda => "I2C_SDA",
            PinRole::I2cScl => "I2C_SCL",
            PinRole::SensorWake => "SENSOR_WAKE",
        }
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GPIO-Zuordnung für Display (ILI9341), I2C-Bus und CO2-Sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    pub tft_dc: u8,
    pub tft_cs: u8,
    pub tft_led: u8,
    pub tft_rst: u8,
    pub i2c_sda: u8,
    pub i2c_scl: u8,
    pub sensor_wake: u8,
}

impl PinAssignment {
    /// GPIO-Nummer für eine Rolle
    pub fn pin(&self, role: PinRole) -> u8 {
        match role {
            PinRole::TftDc => self.tft_dc,
            PinRole::TftCs => self.tft_cs,
            PinRole::TftLed => self.tft_led,
            PinRole::TftRst => self.tft_rst,
            PinRole::I2cSda => self.i2c_sda,
            PinRole::I2cScl => self.i2c_scl,
            PinRole::SensorWake => self.sensor_wake,
        }
    }

    /// Setzt den GPIO für eine Rolle (nur vor dem Laden, z.B. in Tests)
    pub fn with_pin(mut self, role: PinRole, pin: u8) -> Self {
        match role {
            PinRole::TftDc => self.tft_dc = pin,
            PinRole::TftCs => self.tft_cs = pin,
            PinRole::TftLed => self.tft_led = pin,
            PinRole::TftRst => self.tft_rst = pin,
            PinRole::I2cSda => self.i2c_sda = pin,
            PinRole::I2cScl => self.i2c_scl = pin,
            PinRole::SensorWake => self.sensor_wake = pin,
        }
        self
    }

    /// Iteriert über (Rolle, GPIO) Paare
    pub fn iter(&self) -> impl Iterator<Item = (PinRole, u8)> + '_ {
        PinRole::ALL.into_iter().map(move |role| (role, self.pin(role)))
    }
}

// ============================================================================
// Uhr-Anzeige
// ============================================================================

/// 12- oder 24-Stunden-Anzeige der Uhr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStyle {
    TwelveHour,
    #[default]
    TwentyFourHour,
}

impl ClockStyle {
    pub fn is_twelve_hour(self) -> bool {
        self == ClockStyle::TwelveHour
    }

    /// Stunde für die Anzeige aus einer 24h-Stunde (0-23)
    ///
    /// ```
    /// # use esp_core::ClockStyle;
    /// assert_eq!(ClockStyle::TwelveHour.hour_for_display(0), 12);
    /// assert_eq!(ClockStyle::TwelveHour.hour_for_display(13), 1);
    /// assert_eq!(ClockStyle::TwentyFourHour.hour_for_display(13), 13);
    /// ```
    pub fn hour_for_display(self, hour: u8) -> u8 {
        match self {
            ClockStyle::TwentyFourHour => hour,
            ClockStyle::TwelveHour => match hour % 12 {
                0 => 12,
                h => h,
            },
        }
    }
}

impl core::convert::TryFrom<&str> for ClockStyle {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "12" | "12h" => Ok(Self::TwelveHour),
            "24" | "24h" => Ok(Self::TwentyFourHour),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Sommerzeit-Regeln
// ============================================================================

/// Welcher der beiden Zeitumstellungs-Wechsel gemeint ist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    Start,
    End,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transition::Start => "DST start",
            Transition::End => "DST end",
        })
    }
}

/// Woche im Monat (POSIX: 1-4, 5 = letzte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Week {
    First = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
    Last = 5,
}

/// Wochentag (POSIX: 0 = Sonntag)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Sun = 0,
    Mon = 1,
    Tue = 2,
    Wed = 3,
    Thu = 4,
    Fri = 5,
    Sat = 6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Month {
    Jan = 1,
    Feb = 2,
    Mar = 3,
    Apr = 4,
    May = 5,
    Jun = 6,
    Jul = 7,
    Aug = 8,
    Sep = 9,
    Oct = 10,
    Nov = 11,
    Dec = 12,
}

/// Rohe Sommerzeit-Regel, wie sie ein `ConfigProvider` liefert
///
/// `offset_secs` ist der Versatz nach dem Wechsel relativ zum Basis-UTC-Offset
/// (z.B. 3600 für CEST bei UTC+1). `hour` ist die Lokalzeit des Wechsels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstRuleSpec<'a> {
    pub label: &'a str,
    pub week: Week,
    pub weekday: Weekday,
    pub month: Month,
    pub hour: u8,
    pub offset_secs: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_pin_lookup_by_role() {
        let pins = pins();
        assert_eq!(pins.pin(PinRole::TftDc), 4);
        assert_eq!(pins.pin(PinRole::I2cScl), 26);
        assert_eq!(pins.pin(PinRole::SensorWake), 32);
    }

    #[test]
    fn test_with_pin_changes_only_one_role() {
        let pins = pins().with_pin(PinRole::TftLed, 2);
        assert_eq!(pins.tft_led, 2);
        assert_eq!(pins.tft_dc, 4);
        assert_eq!(pins.sensor_wake, 32);
    }

    #[test]
    fn test_iter_visits_all_roles() {
        let pins = pins();
        assert_eq!(pins.iter().count(), 7);
        assert_eq!(pins.iter().next(), Some((PinRole::TftDc, 4)));
    }

    #[test]
    fn test_clock_style_twelve_hour_mapping() {
        let style = ClockStyle::TwelveHour;
        assert_eq!(style.hour_for_display(0), 12);
        assert_eq!(style.hour_for_display(11), 11);
        assert_eq!(style.hour_for_display(12), 12);
        assert_eq!(style.hour_for_display(23), 11);
    }

    #[test]
    fn test_clock_style_try_from() {
        use core::convert::TryFrom;
        assert_eq!(ClockStyle::try_from("12"), Ok(ClockStyle::TwelveHour));
        assert_eq!(ClockStyle::try_from(" 24h "), Ok(ClockStyle::TwentyFourHour));
        assert!(ClockStyle::try_from("am/pm").is_err());
    }

    #[test]
    fn test_clock_style_default_is_24h() {
        assert_eq!(ClockStyle::default(), ClockStyle::TwentyFourHour);
        assert!(!ClockStyle::default().is_twelve_hour());
    }
}
