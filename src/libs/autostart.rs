//! Start the tracker when the user logs in.
//!
//! Each platform uses its per-user mechanism, so no elevated rights are
//! needed:
//!
//! - **macOS**: a LaunchAgent plist in `~/Library/LaunchAgents`
//! - **Linux**: an XDG autostart entry in `~/.config/autostart`
//! - **Windows**: a value under `HKCU\Software\Microsoft\Windows\CurrentVersion\Run`
//!
//! The registered command is `worktrack watch`.

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error_anyhow, msg_info};
use anyhow::Result;
use std::env;

#[cfg(not(target_os = "windows"))]
mod file_based {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};

    #[cfg(target_os = "macos")]
    const LABEL: &str = "com.lacodda.worktrack";

    fn home() -> Result<PathBuf> {
        env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| msg_error_anyhow!(Message::HomeDirectoryNotFound))
    }

    #[cfg(target_os = "macos")]
    pub fn login_item_path() -> Result<PathBuf> {
        Ok(home()?.join("Library/LaunchAgents").join(format!("{}.plist", LABEL)))
    }

    #[cfg(not(target_os = "macos"))]
    pub fn login_item_path() -> Result<PathBuf> {
        let config_home = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .map(Ok)
            .unwrap_or_else(|| home().map(|h| h.join(".config")))?;
        Ok(config_home.join("autostart").join("worktrack.desktop"))
    }

    #[cfg(target_os = "macos")]
    pub fn login_item_contents(exe: &Path) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{}</string>
        <string>watch</string>
    </array>
    <key>RunAtLoad</key>
    <true/>
</dict>
</plist>
"#,
            LABEL,
            exe.display()
        )
    }

    #[cfg(not(target_os = "macos"))]
    pub fn login_item_contents(exe: &Path) -> String {
        format!(
            "[Desktop Entry]\nType=Application\nName=worktrack\nComment=Work day tracker\nExec=\"{}\" watch\nX-GNOME-Autostart-enabled=true\nNoDisplay=true\n",
            exe.display()
        )
    }

    pub fn enable() -> Result<()> {
        let exe = env::current_exe()?;
        let path = login_item_path()?;
        msg_debug!(format!("Writing login item: {}", path.display()));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, login_item_contents(&exe))
            .map_err(|e| msg_error_anyhow!(Message::AutostartEnableFailed(e.to_string())))?;

        msg_info!(Message::AutostartEnabled);
        Ok(())
    }

    pub fn disable() -> Result<()> {
        let path = login_item_path()?;
        if !path.exists() {
            msg_info!(Message::AutostartAlreadyDisabled);
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| msg_error_anyhow!(Message::AutostartDisableFailed(e.to_string())))?;
        msg_info!(Message::AutostartDisabled);
        Ok(())
    }

    pub fn is_enabled() -> Result<bool> {
        Ok(login_item_path()?.exists())
    }
}

#[cfg(target_os = "windows")]
mod registry {
    use super::*;
    use std::os::windows::process::CommandExt;
    use std::process::Command;

    const RUN_KEY: &str = r"HKCU\Software\Microsoft\Windows\CurrentVersion\Run";
    const VALUE_NAME: &str = "worktrack";
    const CREATE_NO_WINDOW: u32 = 0x08000000;

    fn reg(args: &[&str]) -> Result<std::process::Output> {
        Ok(Command::new("reg").args(args).creation_flags(CREATE_NO_WINDOW).output()?)
    }

    pub fn enable() -> Result<()> {
        let exe = env::current_exe()?;
        let command = format!("\"{}\" watch", exe.to_string_lossy());
        msg_debug!(format!("Registering login item: {}", command));

        let output = reg(&["add", RUN_KEY, "/v", VALUE_NAME, "/t", "REG_SZ", "/d", &command, "/f"])?;
        if output.status.success() {
            msg_info!(Message::AutostartEnabled);
            Ok(())
        } else {
            let error = String::from_utf8_lossy(&output.stderr).to_string();
            Err(msg_error_anyhow!(Message::AutostartEnableFailed(error)))
        }
    }

    pub fn disable() -> Result<()> {
        if !is_enabled()? {
            msg_info!(Message::AutostartAlreadyDisabled);
            return Ok(());
        }
        let output = reg(&["delete", RUN_KEY, "/v", VALUE_NAME, "/f"])?;
        if output.status.success() {
            msg_info!(Message::AutostartDisabled);
            Ok(())
        } else {
            let error = String::from_utf8_lossy(&output.stderr).to_string();
            Err(msg_error_anyhow!(Message::AutostartDisableFailed(error)))
        }
    }

    pub fn is_enabled() -> Result<bool> {
        Ok(reg(&["query", RUN_KEY, "/v", VALUE_NAME])?.status.success())
    }
}

#[cfg(not(target_os = "windows"))]
pub use file_based::{login_item_contents, login_item_path};

pub fn enable() -> Result<()> {
    #[cfg(target_os = "windows")]
    return registry::enable();

    #[cfg(not(target_os = "windows"))]
    return file_based::enable();
}

pub fn disable() -> Result<()> {
    #[cfg(target_os = "windows")]
    return registry::disable();

    #[cfg(not(target_os = "windows"))]
    return file_based::disable();
}

pub fn is_enabled() -> Result<bool> {
    #[cfg(target_os = "windows")]
    return registry::is_enabled();

    #[cfg(not(target_os = "windows"))]
    return file_based::is_enabled();
}

pub fn status() -> Result<String> {
    match is_enabled()? {
        true => Ok("enabled".to_string()),
        false => Ok("disabled".to_string()),
    }
}
