// WiFi Task - Verbindet mit WLAN und managed Connection
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{DhcpConfig, Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_core::NetworkCredentials;
use esp_radio::wifi::{ClientConfig, ModeConfig, ScanConfig, WifiController, WifiDevice};

use crate::config::WIFI_RETRY_DELAY_SECS;

/// DHCP-Konfiguration mit dem konfigurierten Hostnamen
///
/// Der Hostname ist bereits beim Laden auf Länge und Zeichen geprüft,
/// passt also immer in die DHCP-Option.
pub fn dhcp_config(network: &NetworkCredentials) -> DhcpConfig {
    let mut config = DhcpConfig::default();
    config.hostname = network.hostname().parse().ok();
    if config.hostname.is_none() {
        warn!("WiFi: Hostname '{}' not usable for DHCP", network.hostname());
    }
    config
}

/// WiFi Connection Task
///
/// Managed die WiFi-Verbindung:
/// - Verbindet mit dem konfigurierten Access Point
/// - Überwacht Verbindung und reconnected bei Bedarf
#[embassy_executor::task]
pub async fn connection_task(
    mut controller: WifiController<'static>,
    network: &'static NetworkCredentials,
) {
    info!("WiFi: Starting connection task");

    loop {
        if matches!(controller.is_started(), Ok(false)) {
            info!("WiFi: Configuring and starting...");

            let client_config = ModeConfig::Client(
                ClientConfig::default()
                    .with_ssid(network.ssid().into())
                    .with_password(network.password().into()),
            );

            if let Err(e) = controller.set_config(&client_config) {
                error!("WiFi: Failed to set configuration: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                continue;
            }

            if let Err(e) = controller.start_async().await {
                error!("WiFi: Failed to start: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                continue;
            }

            info!("WiFi: Started successfully");
        }

        // Scan nur für die Diagnose: ist das Netz überhaupt sichtbar?
        match controller
            .scan_with_config_async(ScanConfig::default())
            .await
        {
            Ok(ap_infos) => {
                match ap_infos
                    .iter()
                    .find(|ap| ap.ssid.as_str() == network.ssid())
                {
                    Some(ap) => info!(
                        "WiFi: Target AP found - SSID: {}, Signal: {} dBm",
                        network.ssid(),
                        ap.signal_strength
                    ),
                    None => warn!(
                        "WiFi: '{}' not among {} access points",
                        network.ssid(),
                        ap_infos.len()
                    ),
                }
            }
            Err(e) => {
                warn!("WiFi: Scan failed: {}", Debug2Format(&e));
            }
        }

        info!("WiFi: Connecting to '{}'...", network.ssid());
        match controller.connect_async().await {
            Ok(_) => {
                info!("WiFi: Connected as '{}'", network.hostname());
            }
            Err(e) => {
                error!("WiFi: Connection failed: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                continue;
            }
        }

        controller
            .wait_for_event(esp_radio::wifi::WifiEvent::StaDisconnected)
            .await;
        warn!("WiFi: Disconnected from AP, will retry...");

        Timer::after(Duration::from_secs(2)).await;
    }
}

/// Network Task
///
/// Prozessiert Netzwerk-Pakete für den embassy-net Stack
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// DHCP Monitor Task
///
/// Wartet bis eine IP-Adresse vom DHCP-Server erhalten wurde
/// und loggt dann die Netzwerk-Konfiguration
#[embassy_executor::task]
pub async fn dhcp_task(stack: &'static Stack<'static>) {
    stack.wait_link_up().await;
    info!("WiFi: Link is up, waiting for IP address...");

    stack.wait_config_up().await;
    if let Some(config) = stack.config_v4() {
        info!("WiFi: Got IP address!");
        info!("  IP:      {}", Debug2Format(&config.address.address()));
        info!("  Gateway: {}", Debug2Format(&config.gateway));
        info!("  DNS:     {}", Debug2Format(&config.dns_servers));
    }
}
