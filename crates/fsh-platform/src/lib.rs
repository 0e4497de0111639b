//! Platform service abstractions for fsh.
//!
//! The shell never launches processes directly. It talks to a [`Launcher`],
//! which the binary backs with [`DesktopLauncher`] and tests back with a
//! recording double.

mod services;

/// Hands a path to the OS default handler.
pub use services::Launcher;
/// `std::process` backed launcher for desktop systems.
pub use services::DesktopLauncher;
