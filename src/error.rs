//! Error types for the atlas engine.

use thiserror::Error;

/// Errors raised by the rendering adapter behind [`crate::canvas::MapSurface`].
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The underlying map surface could not be mounted
    #[error("Map surface failed to mount: {reason}")]
    MountFailed {
        /// Adapter-supplied description of the failure
        reason: String,
    },

    /// I/O error while writing rendered output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML error while serializing an SVG document
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl SurfaceError {
    /// Create a mount failure with a reason.
    pub fn mount_failed(reason: impl Into<String>) -> Self {
        Self::MountFailed {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while operating the atlas engine.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Two catalogue entries share the same layer id
    #[error("Duplicate layer id in catalogue: {id}")]
    DuplicateLayerId {
        /// The repeated id
        id: String,
    },

    /// A catalogue entry names a category outside the closed set
    #[error("Layer '{id}' has unknown category '{category}'")]
    UnknownCategory {
        /// Layer carrying the bad category
        id: String,
        /// The unrecognised category tag
        category: String,
    },

    /// Layer opacity outside `[0, 1]`
    #[error("Layer '{id}' has opacity {opacity} outside [0, 1]")]
    InvalidOpacity {
        /// Offending layer id
        id: String,
        /// The configured opacity
        opacity: f32,
    },

    /// Threshold bands are empty, non-finite or not strictly descending
    #[error("Invalid threshold bands: {message}")]
    InvalidBands {
        /// Description of the problem
        message: String,
    },

    /// No layer with this id exists in the registry
    #[error("Layer not found: {id}")]
    LayerNotFound {
        /// The requested id
        id: String,
    },

    /// No rendered feature with this id exists
    #[error("Feature not found in rendered set: {id}")]
    FeatureNotFound {
        /// The requested id
        id: String,
    },

    /// Mounting the map surface failed
    #[error(transparent)]
    SurfaceMount(#[from] SurfaceError),

    /// The canvas is in its terminal failed state
    #[error("Map canvas unavailable: {reason}")]
    CanvasFailed {
        /// The original mount failure
        reason: String,
    },
}

impl AtlasError {
    /// Create a layer-not-found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::LayerNotFound { id: id.into() }
    }

    /// Create a feature-not-found error.
    pub fn feature_not_found(id: impl Into<String>) -> Self {
        Self::FeatureNotFound { id: id.into() }
    }

    /// Create an invalid bands error with a message.
    pub fn invalid_bands(message: impl Into<String>) -> Self {
        Self::InvalidBands {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the configuration class, which is only
    /// raised while building the registry or styling rules.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateLayerId { .. }
                | Self::UnknownCategory { .. }
                | Self::InvalidOpacity { .. }
                | Self::InvalidBands { .. }
        )
    }
}

/// Result alias for engine operations.
pub type AtlasResult<T> = Result<T, AtlasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(
            AtlasError::DuplicateLayerId {
                id: "ifr".to_string()
            }
            .is_configuration()
        );
        assert!(AtlasError::invalid_bands("empty").is_configuration());
        assert!(!AtlasError::not_found("cfr").is_configuration());
        assert!(!AtlasError::from(SurfaceError::mount_failed("no canvas")).is_configuration());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AtlasError::not_found("cfr-boundaries").to_string(),
            "Layer not found: cfr-boundaries"
        );
        assert_eq!(
            AtlasError::from(SurfaceError::mount_failed("no canvas")).to_string(),
            "Map surface failed to mount: no canvas"
        );
    }
}
