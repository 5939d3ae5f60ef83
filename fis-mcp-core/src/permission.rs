//! Write-gating for tools that mutate remote state

use tracing::warn;

use crate::tool::ToolError;

/// Whether mutating tools may call through to the remote service.
///
/// Resolved once at startup and handed to each mutating tool's constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteAccess {
    #[default]
    Disabled,
    Enabled,
}

impl WriteAccess {
    pub fn from_flag(allow_writes: bool) -> Self {
        if allow_writes {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }

    /// Fail with [`ToolError::WriteDisabled`] unless writes are enabled.
    ///
    /// `operation` completes the sentence "restart with --allow-writes to ...".
    pub fn require(self, operation: &str) -> Result<(), ToolError> {
        if self.is_enabled() {
            return Ok(());
        }
        warn!(operation, "refusing write operation, writes are disabled");
        Err(ToolError::WriteDisabled {
            operation: operation.to_string(),
        })
    }
}

impl From<bool> for WriteAccess {
    fn from(allow_writes: bool) -> Self {
        Self::from_flag(allow_writes)
    }
}
