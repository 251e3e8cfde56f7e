//! Drives the external C++ compiler.
//!
//! Generated source is written into a build directory next to the runtime
//! header, compiled with the configured compiler, and the resulting binary
//! is run with its standard output captured.

use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use log::{debug, info};

use crate::{
    compiler::runtime::{RUNTIME_HEADER, RUNTIME_SOURCE},
    errors::errors::ToolchainError,
};

pub const SOURCE_FILE: &str = "main.cpp";
pub const BINARY_FILE: &str = "main";

pub struct Toolchain {
    pub cxx: String,
    pub build_dir: PathBuf,
}

impl Toolchain {
    pub fn new(cxx: impl Into<String>, build_dir: impl Into<PathBuf>) -> Self {
        Toolchain {
            cxx: cxx.into(),
            build_dir: build_dir.into(),
        }
    }

    /// Writes the generated source and the runtime header, returning the
    /// path of the source file.
    pub fn write_sources(&self, cpp_source: &str) -> Result<PathBuf, ToolchainError> {
        fs::create_dir_all(&self.build_dir)?;

        let source_path = self.build_dir.join(SOURCE_FILE);
        fs::write(&source_path, cpp_source)?;
        fs::write(self.build_dir.join(RUNTIME_HEADER), RUNTIME_SOURCE)?;
        debug!("wrote {}", source_path.display());

        Ok(source_path)
    }

    /// Compiles `source_path` into a binary inside the build directory.
    pub fn compile(&self, source_path: &Path) -> Result<PathBuf, ToolchainError> {
        let binary_path = self.build_dir.join(BINARY_FILE);

        let mut command = Command::new(&self.cxx);
        command
            .arg("-std=c++17")
            .arg("-o")
            .arg(&binary_path)
            .arg(source_path);
        info!("compiling with {:?}", command);

        let output = spawn(&mut command, &self.cxx)?;
        if !output.status.success() {
            return Err(ToolchainError::CompilerFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(binary_path)
    }

    /// Runs a compiled program and returns what it printed.
    pub fn run(&self, binary_path: &Path) -> Result<String, ToolchainError> {
        let mut command = Command::new(binary_path);
        let output = spawn(&mut command, &binary_path.display().to_string())?;

        if !output.status.success() {
            return Err(ToolchainError::ProgramFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    pub fn build_and_run(&self, cpp_source: &str) -> Result<String, ToolchainError> {
        let source_path = self.write_sources(cpp_source)?;
        let binary_path = self.compile(&source_path)?;

        self.run(&binary_path)
    }

    /// Whether the configured compiler can be started at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.cxx)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

fn spawn(command: &mut Command, name: &str) -> Result<Output, ToolchainError> {
    command.output().map_err(|source| ToolchainError::Spawn {
        command: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{Toolchain, SOURCE_FILE};
    use crate::{compiler::runtime::{RUNTIME_HEADER, RUNTIME_SOURCE}, errors::errors::ToolchainError};

    #[test]
    fn test_write_sources_creates_build_dir() {
        let dir = tempdir().unwrap();
        let toolchain = Toolchain::new("g++", dir.path().join("nested").join("build"));

        let source_path = toolchain.write_sources("int main() { return 0; }\n").unwrap();

        assert_eq!(source_path, toolchain.build_dir.join(SOURCE_FILE));
        assert_eq!(fs::read_to_string(&source_path).unwrap(), "int main() { return 0; }\n");
        assert_eq!(
            fs::read_to_string(toolchain.build_dir.join(RUNTIME_HEADER)).unwrap(),
            RUNTIME_SOURCE
        );
    }

    #[test]
    fn test_missing_compiler_is_a_spawn_error() {
        let dir = tempdir().unwrap();
        let toolchain = Toolchain::new("toyc-no-such-compiler", dir.path());

        assert!(!toolchain.is_available());
        let error = toolchain.build_and_run("int main() { return 0; }\n").unwrap_err();
        assert!(matches!(error, ToolchainError::Spawn { ref command, .. } if command == "toyc-no-such-compiler"));
    }

    #[test]
    fn test_runtime_defines_every_type() {
        for class in ["class Nothing", "class Bool", "class Int", "class String"] {
            assert!(RUNTIME_SOURCE.contains(class), "runtime is missing {}", class);
        }
    }
}
