//! Running the external programs the polling adapters read from.

use log::trace;
use sensor_panel_types::CommandSpec;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::SourceError;

/// Run `spec` to completion and return its stdout.
///
/// A non-zero exit is an error carrying whatever the program printed.
pub async fn run_command(spec: &CommandSpec) -> Result<String, SourceError> {
    trace!("Running '{}'", spec);

    let output = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| SourceError::Spawn {
            command: spec.to_string(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SourceError::Exit {
            command: spec.to_string(),
            status: output.status,
            output: format!("{}{}", stdout, stderr).trim().to_string(),
        });
    }

    Ok(stdout)
}
