// mDNS Responder Task - Advertised den konfigurierten Hostnamen via Multicast DNS
//
// Das Messgerät ist damit unter "<WIFI_HOSTNAME>.local" erreichbar,
// ohne dass ein DNS-Server benötigt wird (RFC 6762, nur A-Records).

use core::net::{Ipv4Addr, SocketAddr};
use core::sync::atomic::{AtomicU32, Ordering};

use defmt::{Debug2Format, error, info, warn};
use edge_mdns::{HostAnswersMdnsHandler, buf::VecBufAccess, domain::base::Ttl, host::Host, io};
use edge_nal::{MulticastV4, UdpBind, UdpSplit};
use edge_nal_embassy::{Udp, UdpBuffers};
use embassy_net::Stack;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};

use crate::config::{
    MDNS_MULTICAST_ADDR, MDNS_PACKET_BUFFER_SIZE, MDNS_PORT, MDNS_RECONNECT_DELAY_SECS,
    MDNS_TTL_SECS, MDNS_UDP_BUFFER_SIZE,
};

/// UDP-Stack für den Responder (1 Socket)
type MdnsUdp = Udp<'static, 1, MDNS_UDP_BUFFER_SIZE, MDNS_UDP_BUFFER_SIZE>;

/// Counter für mDNS Transaction IDs (Eindeutigkeit reicht, kein Zufall nötig)
static RNG_COUNTER: AtomicU32 = AtomicU32::new(0);

fn mdns_rng(buf: &mut [u8]) {
    let mut counter = RNG_COUNTER.fetch_add(1, Ordering::Relaxed);
    for chunk in buf.chunks_mut(4) {
        let bytes = counter.to_le_bytes();
        let len = chunk.len().min(4);
        chunk[..len].copy_from_slice(&bytes[..len]);
        counter = counter.wrapping_add(1);
    }
}

/// mDNS Responder Task
///
/// Wartet auf eine IPv4-Adresse und beantwortet dann A-Record Queries
/// für `hostname`. Bei jedem Fehler wird nach
/// `MDNS_RECONNECT_DELAY_SECS` neu gestartet.
///
/// # Parameter
/// - `stack`: embassy-net Stack (shared mit allen Tasks)
/// - `hostname`: Hostname aus der geladenen `Configuration`
#[embassy_executor::task]
pub async fn mdns_responder_task(stack: &'static Stack<'static>, hostname: &'static str) {
    info!("mDNS: Task started, waiting for network...");

    // Buffers nur einmal anlegen, der Socket wird pro Versuch neu gebunden
    static UDP_BUFFERS: static_cell::StaticCell<
        UdpBuffers<1, MDNS_UDP_BUFFER_SIZE, MDNS_UDP_BUFFER_SIZE>,
    > = static_cell::StaticCell::new();
    let udp_stack: MdnsUdp = Udp::new(*stack, UDP_BUFFERS.init(UdpBuffers::new()));

    loop {
        stack.wait_config_up().await;

        match run_mdns_responder(stack, &udp_stack, hostname).await {
            Ok(_) => warn!("mDNS: Responder stopped normally"),
            Err(e) => error!("mDNS: Error: {}", e),
        }
        info!("mDNS: Reconnecting in {}s...", MDNS_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MDNS_RECONNECT_DELAY_SECS)).await;
    }
}

async fn run_mdns_responder(
    stack: &'static Stack<'static>,
    udp_stack: &MdnsUdp,
    hostname: &'static str,
) -> Result<(), MdnsError> {
    let our_ip = stack
        .config_v4()
        .ok_or(MdnsError::NoAddress)?
        .address
        .address();
    info!("mDNS: Using IP {}", Debug2Format(&our_ip));

    let mut socket = udp_stack
        .bind(SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), MDNS_PORT))
        .await
        .map_err(|_| MdnsError::SocketBindFailed)?;

    socket
        .join_v4(Ipv4Addr::from(MDNS_MULTICAST_ADDR), Ipv4Addr::UNSPECIFIED)
        .await
        .map_err(|_| MdnsError::MulticastJoinFailed)?;

    let (recv, send) = socket.split();

    let host = Host {
        hostname,
        ipv4: our_ip.into(),
        ipv6: [0u8; 16].into(), // kein proto-ipv6 in smoltcp
        ttl: Ttl::from_secs(MDNS_TTL_SECS),
    };

    let recv_buf = VecBufAccess::<NoopRawMutex, MDNS_PACKET_BUFFER_SIZE>::new();
    let send_buf = VecBufAccess::<NoopRawMutex, MDNS_PACKET_BUFFER_SIZE>::new();

    // Von der API verlangt, wird nicht genutzt
    let signal = Signal::<NoopRawMutex, ()>::new();

    let mdns = io::Mdns::new(
        Some(our_ip),
        None,
        recv,
        send,
        recv_buf,
        send_buf,
        mdns_rng,
        &signal,
    );

    info!("mDNS: Responder running, advertising '{}.local'", hostname);

    mdns.run(HostAnswersMdnsHandler::new(&host))
        .await
        .map_err(|_| MdnsError::ResponderFailed)
}

/// mDNS Fehler-Typen
///
/// Jeder Fehler führt zu einem Reconnect-Versuch im Haupt-Loop.
#[derive(Debug, defmt::Format)]
enum MdnsError {
    /// DHCP-Lease verloren, bevor der Responder starten konnte
    NoAddress,
    SocketBindFailed,
    MulticastJoinFailed,
    ResponderFailed,
}
