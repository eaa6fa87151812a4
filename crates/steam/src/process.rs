//! Blocking wait for the Steam client to exit.
//!
//! Steam rewrites shortcuts.vdf on shutdown, so writing while the client
//! runs loses the update. This is a plain liveness poll, not an IPC
//! handshake.

use std::time::Duration;

/// Returns true if a Steam client process appears to be running.
#[cfg(not(target_os = "windows"))]
pub fn is_running() -> bool {
    let Some(home) = std::env::var_os("HOME").map(std::path::PathBuf::from) else {
        return false;
    };

    // steam.pid is left stale after a crash, so check process liveness too.
    let pid_file = home.join(".steam").join("steam.pid");
    let Ok(pid) = std::fs::read_to_string(pid_file) else {
        return false;
    };
    let pid = pid.trim();
    if pid.parse::<u32>().is_err() {
        return false;
    }

    std::path::Path::new("/proc").join(pid).is_dir()
}

/// Returns true if a Steam client process appears to be running.
#[cfg(target_os = "windows")]
pub fn is_running() -> bool {
    let output = std::process::Command::new("tasklist")
        .args(["/FI", "IMAGENAME eq steam.exe", "/NH"])
        .output();
    match output {
        Ok(out) => String::from_utf8_lossy(&out.stdout).contains("steam.exe"),
        Err(e) => {
            tracing::warn!(error = %e, "could not query running processes");
            false
        }
    }
}

/// Blocks until the Steam client has exited, polling at `interval`.
pub fn wait_for_exit(interval: Duration) {
    while is_running() {
        tracing::debug!("steam still running");
        std::thread::sleep(interval);
    }
}
