use super::ids::PresentationId;

/// User-visible notifications queued by the editor.
/// The UI drains them after each interaction and shows a toast per notice.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    // Storage
    StorageWarning(String),
    /// Stored entries that could not be read; they stay in the store as they are.
    UnreadableEntries(usize),

    // Navigation
    PresentationNotFound(PresentationId),

    // Templates
    TemplateApplied(String),

    // Export
    ExportSucceeded { format: &'static str, file_name: String },
    ExportFailed { format: &'static str, reason: String },
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Self::StorageWarning(_) => "Storage unavailable",
            Self::UnreadableEntries(_) => "Some presentations could not be loaded",
            Self::PresentationNotFound(_) => "Presentation not found",
            Self::TemplateApplied(_) => "Template Applied",
            Self::ExportSucceeded { .. } => "Export Successful",
            Self::ExportFailed { .. } => "Export Failed",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::StorageWarning(reason) => {
                format!("Changes are kept for this session only: {}", reason)
            }
            Self::UnreadableEntries(count) => format!(
                "{} saved presentation(s) could not be read and were left in storage unchanged.",
                count
            ),
            Self::PresentationNotFound(_) => {
                "The presentation you're looking for doesn't exist.".to_string()
            }
            Self::TemplateApplied(name) => {
                format!("The {} template has been applied to your presentation.", name)
            }
            Self::ExportSucceeded { format, file_name } => {
                format!("Your presentation has been exported as {} ({}).", format, file_name)
            }
            Self::ExportFailed { format, reason } => {
                format!("There was an error exporting your presentation to {}: {}", format, reason)
            }
        }
    }

    /// Failures are rendered with the destructive style.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::StorageWarning(_)
                | Self::UnreadableEntries(_)
                | Self::PresentationNotFound(_)
                | Self::ExportFailed { .. }
        )
    }
}
