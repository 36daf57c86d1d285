// Task-Modul: Enthält alle Embassy Tasks
//
// Alle Tasks lesen dieselbe `&'static Configuration`, die in main()
// vor dem ersten Spawn geladen wird.

pub mod mdns;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use mdns::mdns_responder_task;
pub use wifi::{connection_task, dhcp_config, dhcp_task, net_task};
