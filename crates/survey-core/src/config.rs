//! Pipeline configuration.

use survey_model::DEFAULT_MARKER_LABEL;

/// Options controlling discovery and header splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Header cell that ends the respondent metadata columns.
    pub marker_label: String,
    /// File extension of survey exports, without the dot.
    pub extension: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            marker_label: DEFAULT_MARKER_LABEL.to_string(),
            extension: "csv".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Set the marker column label.
    #[must_use]
    pub fn with_marker_label(mut self, marker: impl Into<String>) -> Self {
        self.marker_label = marker.into();
        self
    }

    /// Set the survey file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}
