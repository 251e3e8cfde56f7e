//! The C++ runtime that generated programs include.

/// File name the generated source includes the runtime under.
pub const RUNTIME_HEADER: &str = "builtins.hpp";

/// Contents of the runtime header, written next to the generated source.
pub const RUNTIME_SOURCE: &str = include_str!("../../runtime/builtins.hpp");
