//! Build invoker - runs the external build tool that produces the extension module
//!
//! The build itself is a black box: the harness wipes the build output directory, runs the configured command
//! in the source directory with the build-flag environment set, and only looks at the exit status.
//!
//! Output handling follows the verbosity:
//! - verbose: the tool inherits stdio so its output streams live
//! - quiet: stdout and stderr are captured through one pipe and only shown when the build fails

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod locator;

use std::fs;
use std::io::{self, Read, Write};
use std::process::{Command, ExitStatus, Stdio};

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::runner::report::display_title;

pub use locator::locate_artifact_dir;

/// Build the extension module.
///
/// Returns normally iff the build tool exits with status 0. A failing build yields
/// [`HarnessError::Build`] carrying the tool's exit code; its output has already been written (streamed in
/// verbose mode, or printed from the capture to `out` in quiet mode).
#[tracing::instrument(skip_all, fields(program = %config.build_program, source_dir = %config.source_dir.display()))]
pub fn build_extension(config: &HarnessConfig, out: &mut dyn Write) -> HarnessResult<()> {
    display_title(out, "Build the C extension", config.verbose)?;

    clean_build_dir(config)?;

    let mut cmd = Command::new(&config.build_program);
    cmd.args(&config.build_args)
        .current_dir(&config.source_dir)
        .envs(config.build_env.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    tracing::debug!(args = ?config.build_args, env = ?config.build_env, "invoking build tool");

    if config.verbose {
        out.flush()?;
        let status = cmd
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| spawn_error(config, source))?;

        if !status.success() {
            return Err(HarnessError::Build {
                code: exit_code(status),
            });
        }
        writeln!(out)?;
    } else {
        let (status, captured) = run_captured(cmd, config)?;

        if !status.success() {
            writeln!(out, "{}", String::from_utf8_lossy(&captured).trim_end())?;
            out.flush()?;
            return Err(HarnessError::Build {
                code: exit_code(status),
            });
        }
    }

    tracing::debug!("build succeeded");
    Ok(())
}

/// Run `cmd` with stdout and stderr sharing one pipe, returning its status and the interleaved output.
fn run_captured(mut cmd: Command, config: &HarnessConfig) -> HarnessResult<(ExitStatus, Vec<u8>)> {
    let (mut reader, writer) = io::pipe()?;
    let writer_err = writer.try_clone()?;
    cmd.stdin(Stdio::null()).stdout(writer).stderr(writer_err);

    let mut child = cmd.spawn().map_err(|source| spawn_error(config, source))?;
    // The command still owns the write ends; close them so the read sees EOF when the child exits.
    drop(cmd);

    let mut captured = Vec::new();
    reader.read_to_end(&mut captured)?;
    let status = child.wait()?;
    Ok((status, captured))
}

/// Remove a previous build output directory so the locator only sees fresh artifacts.
fn clean_build_dir(config: &HarnessConfig) -> io::Result<()> {
    let build_dir = config.build_output_dir();
    if build_dir.exists() {
        tracing::debug!(dir = %build_dir.display(), "removing previous build output");
        fs::remove_dir_all(&build_dir)?;
    }
    Ok(())
}

fn spawn_error(config: &HarnessConfig, source: io::Error) -> HarnessError {
    HarnessError::BuildSpawn {
        program: config.build_program.clone(),
        source,
    }
}

/// Exit code to propagate for a failed build.
///
/// A tool killed by a signal has no exit code; report it the way shells do (`128 + signal`).
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
