//! Tagged outcome of a single icon generation.

use imageproc::image::ImageFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    /// The source decodes to a format this build has no decoder for.
    #[error("no decoder available for {format:?} images in this build")]
    MissingDependency { format: ImageFormat },

    #[error("{0:#}")]
    Failed(#[from] anyhow::Error),
}

impl IconError {
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, IconError::MissingDependency { .. })
    }

    /// Hint printed alongside a [`IconError::MissingDependency`].
    pub fn install_hint(&self) -> Option<&'static str> {
        match self {
            IconError::MissingDependency { .. } => Some(
                "rebuild with the image format feature enabled (e.g. `imageproc` default features)",
            ),
            IconError::Failed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_shows_the_whole_context_chain() {
        let err: IconError = anyhow::anyhow!("No such file or directory")
            .context("Failed to open app/icon.png")
            .into();

        let msg = err.to_string();
        assert!(msg.contains("Failed to open app/icon.png"));
        assert!(msg.contains("No such file or directory"));
        assert!(err.install_hint().is_none());
    }

    #[test]
    fn missing_dependency_has_hint() {
        let err = IconError::MissingDependency {
            format: ImageFormat::Avif,
        };
        assert!(err.is_missing_dependency());
        assert!(err.install_hint().is_some());
    }
}
