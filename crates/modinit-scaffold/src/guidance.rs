//! Installation guidance shown when the toolchain is missing.

use std::path::PathBuf;

/// Platform type for installation hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
    Unknown,
}

impl Platform {
    /// Detect the current platform.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Unknown
        }
    }

    /// Get the platform display name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::MacOS => "macOS",
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::Unknown => "Unknown",
        }
    }

    /// Install commands for the Go toolchain on this platform.
    pub fn install_hints(&self) -> &'static [&'static str] {
        match self {
            Platform::MacOS => &["brew install go"],
            Platform::Linux => &[
                "sudo apt install golang-go   # Debian/Ubuntu",
                "sudo dnf install golang      # Fedora/RHEL",
                "sudo pacman -S go            # Arch",
            ],
            Platform::Windows => &["winget install GoLang.Go", "choco install golang"],
            Platform::Unknown => &[],
        }
    }
}

/// Render install guidance for `toolchain`.
///
/// `searched` lists the PATH directories that were searched.
pub fn generate_guidance(toolchain: &str, platform: Platform, searched: &[PathBuf]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n💻 Installing {toolchain} ({})\n",
        platform.name()
    ));
    for hint in platform.install_hints() {
        output.push_str(&format!("   {hint}\n"));
    }
    output.push_str("   Downloads: https://go.dev/dl/\n");

    output.push_str("\n🔍 Searched PATH:\n");
    if searched.is_empty() {
        output.push_str("   (PATH is empty or unset)\n");
    } else {
        for dir in searched {
            output.push_str(&format!("   {}\n", dir.display()));
        }
    }

    output.push_str(&format!(
        "\nAfter installing, make sure `{toolchain} version` works, then run modinit again.\n"
    ));
    output
}
