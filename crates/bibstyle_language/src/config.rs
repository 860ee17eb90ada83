//! Configuration for a render.

/// Default value pushed by `entry.max$`.
pub const DEFAULT_ENTRY_MAX: i32 = 250;

/// Default limit on nested function and block calls.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for one VM run.
///
/// None of these change what a style computes; they control limits the
/// style can observe and how much the VM reports while running.
#[derive(Clone, Debug)]
pub struct VmConfig {
    /// Keep `warning$` messages in the context's warning list.
    pub record_warnings: bool,

    /// Log every executed command at INFO instead of DEBUG.
    pub trace_commands: bool,

    /// Value pushed by `entry.max$`.
    pub entry_max: i32,

    /// Name reported as the error source, usually the style file name.
    pub source_name: Option<String>,

    /// Deepest nesting of user-function and block calls before a run fails.
    /// `while$` iterations do not nest and are not limited.
    pub max_depth: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            record_warnings: true,
            trace_commands: false,
            entry_max: DEFAULT_ENTRY_MAX,
            source_name: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl VmConfig {
    /// Creates a configuration for interactive debugging.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            trace_commands: true,
            ..Self::default()
        }
    }

    /// Builder method to set warning recording.
    #[must_use]
    pub fn with_record_warnings(mut self, record: bool) -> Self {
        self.record_warnings = record;
        self
    }

    /// Builder method to set command tracing.
    #[must_use]
    pub fn with_trace_commands(mut self, trace: bool) -> Self {
        self.trace_commands = trace;
        self
    }

    /// Builder method to set the `entry.max$` value.
    #[must_use]
    pub fn with_entry_max(mut self, entry_max: i32) -> Self {
        self.entry_max = entry_max;
        self
    }

    /// Builder method to set the call depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder method to set the source name used in error contexts.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}
