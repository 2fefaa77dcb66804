//! Operation outcome carrying non-fatal warnings.

/// The result of an operation that succeeded but whose best-effort side
/// effects (email delivery, optional PDF generation) may have failed.
///
/// Side-effect failures never fail the operation itself; they surface
/// here so callers can report them without retrying the whole action.
#[derive(Debug, Clone)]
pub struct Completed<T> {
    /// The operation's primary result.
    pub value: T,
    /// Human-readable descriptions of failed side effects.
    pub warnings: Vec<String>,
}

impl<T> Completed<T> {
    /// A fully clean outcome.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Record a failed side effect.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Whether any side effect failed.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
