//! Diagnostic snapshots used to freeze and inspect a simulation offline.

pub mod dump;
pub mod trigger;

pub use dump::{dump_file_name, format_general, render_dump, write_debug_information, DumpReport};
pub use trigger::{DiagnosticTrigger, NonFiniteState, ParticleAtStep};
