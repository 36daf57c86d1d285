// Build-Script: Wird vor dem Kompilieren ausgeführt
// Backt die Geräte-Konfiguration ein und konfiguriert den Linker für ESP32

use std::fmt::Write as _;
use std::path::PathBuf;

/// Standard NTP-Server wenn NTP_SERVERS nicht gesetzt ist
const DEFAULT_NTP_SERVERS: &str = "0.de.pool.ntp.org,1.de.pool.ntp.org,2.de.pool.ntp.org";

/// Variablen die 1:1 an den Compiler weitergegeben werden
const FORWARDED_VARS: [&str; 4] = ["WIFI_SSID", "WIFI_PASSWORD", "WIFI_HOSTNAME", "CLOCK_STYLE"];

fn main() {
    // Lade .env file für WiFi-Credentials
    // Fehler ignorieren wenn .env nicht existiert (dann müssen ENV vars gesetzt sein)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  .env file nicht gefunden: {}", e);
        eprintln!("   Setze WIFI_SSID, WIFI_PASSWORD und WIFI_HOSTNAME als Environment-Variablen");
    }
    println!("cargo:rerun-if-changed=.env");

    // Gebe die Konfiguration an den Rust-Compiler weiter
    // Die Werte werden zur Compile-Zeit in den Code eingebacken
    for var in FORWARDED_VARS {
        println!("cargo:rerun-if-env-changed={}", var);
        if let Ok(value) = std::env::var(var) {
            println!("cargo:rustc-env={}={}", var, value);
        }
    }

    if let Ok(style) = std::env::var("CLOCK_STYLE") {
        if !matches!(style.trim(), "12" | "12h" | "24" | "24h") {
            panic!("CLOCK_STYLE muss \"12\" oder \"24\" sein, ist aber \"{}\"", style);
        }
    }

    println!("cargo:rerun-if-env-changed=NTP_SERVERS");
    let servers = std::env::var("NTP_SERVERS").unwrap_or_else(|_| DEFAULT_NTP_SERVERS.into());
    write_ntp_servers(&servers);

    // Registriere hilfsbereiten Error-Handler für Linker-Fehler
    linker_be_nice();

    // 1. defmt.x - defmt Logging-Support
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    // 2. linkall.x - ESP32 Memory-Layout
    //    WICHTIG: Muss als LETZTES kommen
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

// Schreibt NTP_SERVERS als `&[&str]` nach $OUT_DIR/ntp_servers.rs
// Zerlegung wie in esp-core, damit Configuration::load leere Listen
// als NoNtpServers und leere Einträge als InvalidNtpServer meldet
fn write_ntp_servers(servers: &str) {
    let mut code = String::from("/// NTP-Server in Abfrage-Reihenfolge\npub const NTP_SERVERS: &[&str] = &[");
    for server in esp_core::split_ntp_list(servers) {
        write!(code, "{:?}, ", server).unwrap();
    }
    code.push_str("];\n");

    let out = PathBuf::from(std::env::var("OUT_DIR").unwrap()).join("ntp_servers.rs");
    std::fs::write(out, code).unwrap();
}

// Error-Handler: Zeigt hilfreiche Tipps bei Linker-Fehlern
// Wird vom Linker als "--error-handling-script" aufgerufen
fn linker_be_nice() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 2 {
        let kind = &args[1]; // Fehler-Typ (z.B. "undefined-symbol")
        let what = &args[2]; // Symbol-Name (z.B. "_defmt_...")

        if kind != "undefined-symbol" {
            std::process::exit(1);
        }

        let hint = match what.as_str() {
            w if w.starts_with("_defmt_") => Some(
                "`defmt` not found - make sure `defmt.x` is added as a linker script",
            ),
            "_stack_start" => Some("Is the linker script `linkall.x` missing?"),
            w if w.starts_with("esp_rtos_") => Some(
                "`esp-radio` has no scheduler enabled. Make sure you have initialized `esp-rtos`.",
            ),
            "free" | "malloc" | "calloc" | "get_free_internal_heap_size" => Some(
                "Did you forget the `esp-alloc` dependency or didn't enable the `compat` feature on it?",
            ),
            _ => None,
        };
        if let Some(hint) = hint {
            eprintln!();
            eprintln!("💡 {}", hint);
            eprintln!();
        }

        std::process::exit(0);
    }

    println!(
        "cargo:rustc-link-arg=--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );
}
