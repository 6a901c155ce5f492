use std::{
    io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
#[error("failed to launch {}: {source}", path.display())]
pub struct LaunchError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Starts `path` without waiting for it; the child outlives this process.
pub fn launch_detached(path: &Path) -> Result<u32, LaunchError> {
    let mut command = Command::new(path);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt as _;

        const DETACHED_PROCESS: u32 = 0x0000_0008;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
        command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
    }

    let child = command.spawn().map_err(|source| LaunchError {
        path: path.to_path_buf(),
        source,
    })?;
    info!("opened vatSys executable at {} (pid {})", path.display(), child.id());
    Ok(child.id())
}
