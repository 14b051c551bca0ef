//! Tracker (bd) and companion database (dolt) bootstrap.

use hook_common::net::{self, CONNECT_TIMEOUT, DOLT_PORT};
use hook_common::subprocess::{self, PROBE_TIMEOUT};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const BD_INSTALL_HINT: &str = "npm install -g @beads/bd";
pub const DOLT_INSTALL_HINT: &str = "https://docs.dolthub.com/introduction/installation";

const READY_ATTEMPTS: u32 = 10;
const READY_INTERVAL: Duration = Duration::from_secs(1);

static BD_VERSION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^bd\s+(version\s+)?").unwrap());
static DOLT_VERSION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^dolt version\s*").unwrap());

fn version_of(program: &str, args: &[&str], prefix: &Regex) -> Option<String> {
    let result = subprocess::run_tool(program, args, None, PROBE_TIMEOUT).ok()?;
    if !result.success {
        return None;
    }
    Some(prefix.replace(result.stdout.trim(), "").into_owned())
}

/// Installed bd version, if bd runs.
pub fn bd_version() -> Option<String> {
    version_of("bd", &["--version"], &BD_VERSION_PREFIX)
}

/// Installed dolt version, if dolt runs.
pub fn dolt_version() -> Option<String> {
    version_of("dolt", &["version"], &DOLT_VERSION_PREFIX)
}

pub fn dolt_server_running() -> bool {
    net::port_open(DOLT_PORT, CONNECT_TIMEOUT)
}

/// Start `dolt sql-server` in the background without waiting for it.
///
/// The server runs from the home directory so it does not drop config and
/// log files into the project.
pub fn launch_dolt_server() -> anyhow::Result<()> {
    let port = DOLT_PORT.to_string();
    let cwd = dirs::home_dir().unwrap_or_else(std::env::temp_dir);

    if cfg!(target_os = "windows") {
        // Start-Process detaches the server from this console.
        let script = format!(
            "Start-Process -FilePath dolt -ArgumentList @(\"sql-server\",\"--port\",\"{}\") -WindowStyle Hidden",
            port
        );
        let handle = duct::cmd("powershell", ["-NoProfile", "-NonInteractive", "-Command", script.as_str()])
            .dir(&cwd)
            .stdin_null()
            .stdout_null()
            .stderr_null()
            .unchecked()
            .start()?;
        subprocess::wait_with_timeout(&handle, "powershell", Duration::from_secs(15))?;
    } else {
        // Dropping the handle leaves the server running.
        duct::cmd("dolt", ["sql-server", "--port", port.as_str()])
            .dir(&cwd)
            .stdin_null()
            .stdout_null()
            .stderr_null()
            .unchecked()
            .start()?;
    }
    Ok(())
}

/// Make sure something is serving on the dolt port, launching it if needed.
pub fn ensure_dolt_server() -> bool {
    if dolt_server_running() {
        return true;
    }

    println!("  .  dolt sql-server not running — starting...");
    if let Err(e) = launch_dolt_server() {
        println!("  !  could not launch dolt sql-server: {:#}", e);
        return false;
    }
    net::wait_for_port(DOLT_PORT, READY_ATTEMPTS, READY_INTERVAL)
}

/// Run `bd init` with an empty, non-terminal stdin so it skips its
/// interactive prompts. Output goes straight to the console.
pub fn bd_init(root: &Path) -> bool {
    subprocess::tool("bd", &["init"])
        .dir(root)
        .stdin_bytes(Vec::new())
        .unchecked()
        .run()
        .is_ok_and(|output| output.status.success())
}

/// Step 3: initialize beads unless `.beads/` already exists.
pub fn init_beads(root: &Path) {
    if hook_common::config::beads_dir(root).exists() {
        println!("  .  .beads/ already exists — skipping bd init");
        return;
    }

    if bd_version().is_none() {
        println!("  !  bd not found. Install beads and dolt first:");
        println!("     {}", BD_INSTALL_HINT);
        println!("     dolt: {}", DOLT_INSTALL_HINT);
        println!("     Then run: bd init");
        return;
    }

    if dolt_version().is_none() {
        println!("  !  dolt not found. beads requires dolt as storage backend.");
        println!("     Install from: {}", DOLT_INSTALL_HINT);
        println!("     Then run: bd init");
        return;
    }

    if !ensure_dolt_server() {
        println!("  !  dolt sql-server did not start.");
        println!("     Run \"dolt sql-server\" in a separate terminal, then \"bd init\".");
        return;
    }

    if !bd_init(root) {
        println!("  !  bd init failed — run \"bd init\" manually");
    }
}
