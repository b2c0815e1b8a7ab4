// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`bundle`] ships the node-side compiler script.
//! - [`locate`] finds the compiler executable on the search path.
//! - [`runner`] spawns one compiler process and waits for it, with a timeout.
//! - [`refresh`] tells the host a destination artifact changed.
//! - [`invoker`] ties the three together behind the `CompileInvoker` trait,
//!   which tests replace with a fake.

pub mod bundle;
pub mod invoker;
pub mod locate;
pub mod refresh;
pub mod runner;

pub use bundle::{default_bundle_dir, install_bundle};
pub use invoker::{CompileInvoker, InvokerSettings, ProcessInvoker};
pub use locate::{locate_executable, locate_in_environment, OsFlavor};
pub use refresh::{ArtifactHost, MetadataHost};
pub use runner::{run_compiler, CompileCommand};
