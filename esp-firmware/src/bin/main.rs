// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use static_cell::StaticCell;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

use esp_co2_meter::config::{CompiledConfig, EXTRA_HEAP_SIZE, WIFI_HEAP_SIZE};
use esp_co2_meter::tasks::{
    connection_task, dhcp_config, dhcp_task, mdns_responder_task, net_task,
};
use esp_co2_meter::{Configuration, log_configuration};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
esp_bootloader_esp_idf::esp_app_desc!();

/// Geladene Konfiguration - einmal geschrieben, danach nur gelesen
static CONFIG: StaticCell<Configuration> = StaticCell::new();

/// Main Entry Point
///
/// Lädt die Konfiguration, initialisiert Hardware und WiFi und spawnt Tasks.
/// Eine ungültige Konfiguration bricht den Start ab, bevor irgendein Task läuft.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // CPU auf maximale Taktfrequenz
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // Konfiguration laden, bevor irgendein Subsystem sie braucht
    let config: &'static Configuration = match Configuration::load(&CompiledConfig) {
        Ok(config) => CONFIG.init(config),
        Err(e) => {
            error!("Config: {}", e);
            panic!("invalid configuration");
        }
    };
    log_configuration(config);

    // Zwei Heap-Bereiche: DRAM2 (64 KB) + extra (36 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    static RADIO_INIT: StaticCell<esp_radio::Controller> = StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = u64::from(rng.random()) << 32 | u64::from(rng.random());

    // DHCP (1) + mDNS (1) + Reserve
    static RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(dhcp_config(config.network())),
        resources,
        seed,
    );

    static STACK: StaticCell<Stack<'static>> = StaticCell::new();
    let stack = &*STACK.init(stack);

    spawner
        .spawn(connection_task(wifi_controller, config.network()))
        .unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();
    spawner
        .spawn(mdns_responder_task(stack, config.network().hostname()))
        .unwrap();

    info!("Main: Tasks started");

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
