use std::{
    env,
    path::{Path, PathBuf},
};

use directories::{BaseDirs, UserDirs};
use thiserror::Error;
use tracing::debug;

use crate::config::{vatsys_exec_relative, vatsys_maps_relative};

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("could not find suitable vatSys Maps folder for ATOP Oakland profile")]
    MapsDir,
    #[error("could not find suitable vatSys executable")]
    Executable,
}

/// One way of guessing where something lives. Returns `None` when the guess
/// can't even be formed (e.g. an unset environment variable).
pub trait Candidate {
    fn describe(&self) -> String;
    fn candidate(&self) -> Option<PathBuf>;
}

impl Candidate for PathBuf {
    fn describe(&self) -> String {
        self.display().to_string()
    }

    fn candidate(&self) -> Option<PathBuf> {
        Some(self.clone())
    }
}

/// The platform documents folder (on Windows the `Personal` shell folder,
/// which honours redirection).
pub struct UserDocuments {
    pub relative: PathBuf,
}

impl Candidate for UserDocuments {
    fn describe(&self) -> String {
        format!("documents folder/{}", self.relative.display())
    }

    fn candidate(&self) -> Option<PathBuf> {
        UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
            .map(|documents| documents.join(&self.relative))
    }
}

/// `<home>/Documents`, for when the shell folder lookup fails.
pub struct HomeDocuments {
    pub relative: PathBuf,
}

impl Candidate for HomeDocuments {
    fn describe(&self) -> String {
        format!("~/Documents/{}", self.relative.display())
    }

    fn candidate(&self) -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().join("Documents").join(&self.relative))
    }
}

/// A path below the directory named by an environment variable.
pub struct EnvRoot {
    pub var: &'static str,
    pub relative: PathBuf,
}

impl Candidate for EnvRoot {
    fn describe(&self) -> String {
        format!("%{}%/{}", self.var, self.relative.display())
    }

    fn candidate(&self) -> Option<PathBuf> {
        env::var_os(self.var).map(|root| PathBuf::from(root).join(&self.relative))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    MapsDir,
    Executable,
}

impl Target {
    fn matches(self, path: &Path) -> bool {
        match self {
            Target::MapsDir => path.is_dir(),
            Target::Executable => path.is_file(),
        }
    }
}

/// Tries each candidate in order; the first one that exists wins.
pub struct Locator {
    target: Target,
    candidates: Vec<Box<dyn Candidate>>,
}

impl Locator {
    pub fn new(target: Target, candidates: Vec<Box<dyn Candidate>>) -> Self {
        Self { target, candidates }
    }

    pub fn maps_dir() -> Self {
        let relative = vatsys_maps_relative();
        Self::new(
            Target::MapsDir,
            vec![
                Box::new(UserDocuments {
                    relative: relative.clone(),
                }),
                Box::new(HomeDocuments { relative }),
            ],
        )
    }

    pub fn vatsys_exec() -> Self {
        let relative = vatsys_exec_relative();
        Self::new(
            Target::Executable,
            vec![
                Box::new(EnvRoot {
                    var: "ProgramFiles(x86)",
                    relative: relative.clone(),
                }),
                Box::new(EnvRoot {
                    var: "ProgramW6432",
                    relative,
                }),
            ],
        )
    }

    pub fn locate(&self) -> Option<PathBuf> {
        self.candidates.iter().find_map(|candidate| {
            let path = candidate.candidate()?;
            let found = self.target.matches(&path);
            debug!(
                candidate = %candidate.describe(),
                path = %path.display(),
                found,
                "probing {:?}",
                self.target
            );
            found.then_some(path)
        })
    }

    /// Uses `given` when present, otherwise [`Locator::locate`].
    pub fn resolve(&self, given: Option<PathBuf>) -> Result<PathBuf, LocateError> {
        given.or_else(|| self.locate()).ok_or(match self.target {
            Target::MapsDir => LocateError::MapsDir,
            Target::Executable => LocateError::Executable,
        })
    }
}
