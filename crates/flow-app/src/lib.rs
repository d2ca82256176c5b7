pub mod context;
pub mod nav;
pub mod screens;
pub mod shell;
pub mod views;

pub use context::{AppContext, ShellEvent};
pub use nav::{NavigationShell, Route};
pub use shell::RootShell;
