//! ESP Core - Platform-agnostic Configuration Model
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert das Konfigurations-Modell des CO2-Messgeräts,
//! dessen Validierung und den Provider-Trait.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod error;
pub mod logic;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use config::{
    Configuration, DstRule, DstRules, NetworkCredentials, NtpServerList, TzString,
};
pub use error::{ConfigError, CredentialField, DstRuleError, PinError};
pub use logic::{split_ntp_list, validate_pins};
pub use traits::ConfigProvider;
pub use types::{ClockStyle, DstRuleSpec, Month, PinAssignment, PinRole, Transition, Week, Weekday};
