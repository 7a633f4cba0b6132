//! Shared building blocks for the Privado CLI and its installer.
//!
//! The install path and the runtime path share no state at run time, but
//! they agree on the platform vocabulary, the on-disk layout under
//! `~/.privado`, and the seams used to reach the host (directories and
//! external commands). Those agreements live here.

pub mod dirs;
pub mod exec;
pub mod fs;
pub mod layout;
pub mod platform;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use dirs::{BaseDirs, SystemBaseDirs};
pub use exec::{CommandExecutor, SystemCommandExecutor};
pub use fs::path_exists;
pub use layout::{InstallLayout, TOOL_NAME};
pub use platform::{Arch, Os, PlatformDescriptor};
