//! Local TCP liveness probes.

use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

/// Port the dolt sql-server listens on.
pub const DOLT_PORT: u16 = 3307;

pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Whether something accepts connections on `127.0.0.1:port`.
pub fn port_open(port: u16, timeout: Duration) -> bool {
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    TcpStream::connect_timeout(&addr, timeout).is_ok()
}

/// Sleep `interval`, then probe, up to `attempts` times.
pub fn wait_for_port(port: u16, attempts: u32, interval: Duration) -> bool {
    for _ in 0..attempts {
        thread::sleep(interval);
        if port_open(port, CONNECT_TIMEOUT) {
            return true;
        }
    }
    false
}
