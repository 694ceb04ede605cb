use crate::consts;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The best scores achieved so far, highest first, capped at
/// [`MAX_HIGH_SCORES`][consts::MAX_HIGH_SCORES] entries.
///
/// On disk the list is a JSON array of integers.  The order in the file does
/// not matter; the list is re-sorted whenever it is loaded or changed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScores {
    scores: Vec<u32>,

    /// File that the list is saved to after every change, if any
    path: Option<PathBuf>,
}

impl HighScores {
    /// Create a high score list that is never written to disk
    pub(crate) fn in_memory<I: IntoIterator<Item = u32>>(scores: I) -> HighScores {
        let mut hs = HighScores {
            scores: scores.into_iter().collect(),
            path: None,
        };
        hs.normalize();
        hs
    }

    /// Read the high score list stored at `path`.  Later changes will be
    /// saved back to `path`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or did not contain a JSON
    /// array of non-negative integers.
    pub(crate) fn load(path: &Path) -> Result<HighScores, LoadError> {
        let src = fs_err::read(path).map_err(LoadError::read)?;
        let scores = serde_json::from_slice::<Vec<u32>>(&src).map_err(LoadError::deserialize)?;
        let mut hs = HighScores {
            scores,
            path: Some(path.to_owned()),
        };
        hs.normalize();
        Ok(hs)
    }

    /// Like [`HighScores::load()`], but any failure is logged and results in
    /// the list `[0]`, still backed by `path`.
    pub(crate) fn load_or_default(path: &Path) -> HighScores {
        match HighScores::load(path) {
            Ok(hs) => hs,
            Err(e) => {
                if !e.is_not_found() {
                    tracing::warn!(path = %path.display(), error = ?e, "Could not load high scores; starting fresh");
                }
                HighScores {
                    scores: vec![0],
                    path: Some(path.to_owned()),
                }
            }
        }
    }

    /// Write the list to its backing file.  Does nothing for an in-memory
    /// list.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the parent directory could not be created or the
    /// file could not be written.
    pub(crate) fn save(&self) -> Result<(), SaveError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(&self.scores).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }

    /// Record a final score, keep the best entries, and save the list (on a
    /// best-effort basis).  Returns `true` if `score` is now the highest score
    /// on the list.
    pub(crate) fn add_score(&mut self, score: u32) -> bool {
        self.scores.push(score);
        self.normalize();
        if let Err(e) = self.save() {
            tracing::warn!(error = ?e, "Could not save high scores");
        }
        self.scores.first() == Some(&score)
    }

    /// Return the best score recorded, or 0 if there are none
    pub(crate) fn high_score(&self) -> u32 {
        self.scores.first().copied().unwrap_or(0)
    }

    /// Return the recorded scores, highest first
    #[cfg(test)]
    pub(crate) fn scores(&self) -> &[u32] {
        &self.scores
    }

    fn normalize(&mut self) {
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        self.scores.truncate(consts::MAX_HIGH_SCORES);
    }
}

impl Default for HighScores {
    fn default() -> HighScores {
        HighScores::in_memory([0])
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high scores to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high scores to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }

    fn is_not_found(&self) -> bool {
        matches!(self.0, LoadErrorSource::Read(ref e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high scores")]
    Deserialize(#[source] serde_json::Error),
}
