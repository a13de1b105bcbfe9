//! Launching the platform file opener without tying it to the run's outcome.
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

/// The platform command that opens `path` with its default application.
pub fn opener_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/c", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Start the opener for `path` and wait for it on a background thread.
///
/// Spawn failures are logged and yield `None`. A non-zero exit is logged by the
/// returned thread, so join it before exiting to see that report.
pub fn open_in_background(path: PathBuf) -> Option<JoinHandle<()>> {
    spawn_watched(opener_command(&path), path)
}

fn spawn_watched(mut command: Command, path: PathBuf) -> Option<JoinHandle<()>> {
    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            warn!("Failed to open '{}': {}.", path.display(), e);
            return None;
        }
    };

    let handle = thread::Builder::new()
        .name("viewer".into())
        .spawn(move || match child.wait() {
            Ok(status) if status.success() => debug!("Opened '{}'.", path.display()),
            Ok(status) => warn!("Opener for '{}' exited with {}.", path.display(), status),
            Err(e) => warn!("Failed to wait for opener of '{}': {}.", path.display(), e),
        });

    match handle {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Failed to start viewer thread: {}.", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opener_receives_the_path_last() {
        let cmd = opener_command(Path::new("grid.html"));
        let last = cmd.get_args().last().map(|a| a.to_os_string());
        assert_eq!(last, Some("grid.html".into()));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn linux_uses_xdg_open() {
        let cmd = opener_command(Path::new("grid.html"));
        assert_eq!(cmd.get_program(), "xdg-open");
    }

    #[test]
    fn missing_opener_is_reported_without_a_thread() {
        let cmd = Command::new("hexgrid-no-such-opener");
        assert!(spawn_watched(cmd, PathBuf::from("grid.html")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn failing_opener_is_waited_for_on_a_joinable_thread() {
        let handle = spawn_watched(Command::new("false"), PathBuf::from("grid.html"))
            .expect("`false` spawns");
        assert_eq!(handle.thread().name(), Some("viewer"));
        assert!(handle.join().is_ok());
    }
}
