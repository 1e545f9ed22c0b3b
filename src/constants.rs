//! Application-wide constants
//!
//! This module contains the string literals and fixed sets used throughout
//! the application, providing a single source of truth for constant values.

/// GPU-offload wrapper command constants
pub mod prefix {
    /// Primus-based offload wrapper (preferred on most setups)
    pub const PRIMUSRUN: &str = "primusrun";

    /// VirtualGL-based offload wrapper shipped with Bumblebee
    pub const OPTIRUN: &str = "optirun";

    /// Closed set of recognized wrapper commands, in detection priority order
    pub const KNOWN: [&str; 2] = [PRIMUSRUN, OPTIRUN];

    /// Separator between the wrapper command and the launch command
    pub const SEPARATOR: char = ' ';
}

/// Desktop entry file constants
pub mod desktop {
    /// File extension of desktop entry files
    pub const EXTENSION: &str = ".desktop";

    /// Key holding the launch command line within a group
    pub const LAUNCH_KEY: &str = "Exec";

    /// Comment marker for desktop entry lines
    pub const COMMENT: char = '#';
}

/// Configuration file location constants
pub mod config {
    /// Directory under the XDG config dir holding the registry file
    pub const APP_DIR: &str = "bumblectl";

    /// Registry file name
    pub const FILENAME: &str = "bumblectl.toml";

    /// Directory name under the XDG data dir holding desktop entries
    pub const APPLICATIONS_DIR: &str = "applications";
}
