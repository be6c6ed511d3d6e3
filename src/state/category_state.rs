/// Category crawl outcome definitions
///
/// Every category handed to the orchestrator ends in exactly one of these states.
use std::fmt;

/// Represents how the crawl of a single category ended
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryStatus {
    // ===== Success States =====
    /// Every listing page was walked until the upper bound reached the total
    Complete,

    /// The first listing page carried no result counters at all
    Empty,

    // ===== Truncated States =====
    /// The page ceiling stopped a listing whose bound never reached the total
    PageLimitReached {
        /// The ceiling that was hit
        limit: u32,
    },

    // ===== Error States =====
    /// A transport error (or a panicked task) ended the category
    Failed {
        /// Description of the failure
        reason: String,
    },
}

impl CategoryStatus {
    /// Returns true if the listing was walked to its natural end
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Complete | Self::Empty)
    }

    /// Returns true if products were collected but the listing was cut short
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::PageLimitReached { .. })
    }

    /// Returns true if the category contributed no products because of an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short machine-friendly label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Empty => "empty",
            Self::PageLimitReached { .. } => "page_limit_reached",
            Self::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageLimitReached { limit } => write!(f, "{} ({} pages)", self.label(), limit),
            Self::Failed { reason } => write!(f, "{}: {}", self.label(), reason),
            _ => write!(f, "{}", self.label()),
        }
    }
}
