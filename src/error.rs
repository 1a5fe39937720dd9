//! Unified error types for ntl-systoolbox.
//!
//! Each external boundary owns a named error type: `FetchError` for the
//! lifecycle catalog, `ReportError` for the report sink and
//! [`InventoryErrorKind`] for inventory input. Catalog and report failures
//! are turned into severities where they happen; only inventory input
//! failures surface as a [`ToolboxError`], with a context string naming the
//! file.

use thiserror::Error;

/// Main error type for ntl-systoolbox operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ToolboxError {
    /// Errors while reading or parsing the inventory
    #[error("Failed to load inventory: {context}: {source}")]
    Inventory {
        context: String,
        #[source]
        source: InventoryErrorKind,
    },
}

/// Specific inventory error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InventoryErrorKind {
    #[error("cannot read file: {0}")]
    Unreadable(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("line {line}: {message}")]
    MalformedRow { line: usize, message: String },

    #[error("inventory has no header row")]
    Empty,
}

/// Convenient Result type for ntl-systoolbox operations
pub type Result<T> = std::result::Result<T, ToolboxError>;

impl From<InventoryErrorKind> for ToolboxError {
    fn from(source: InventoryErrorKind) -> Self {
        Self::Inventory {
            context: String::new(),
            source,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost-first, so a parser error read from
/// `hosts.csv` reads like `"hosts.csv: line 4: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on the error path.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ToolboxError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: ToolboxError, new_ctx: &str) -> ToolboxError {
    match err {
        ToolboxError::Inventory {
            context: existing,
            source,
        } => ToolboxError::Inventory {
            context: chain_context(new_ctx, &existing),
            source,
        },
    }
}

/// Returns "`new`: `existing`", or just `new` when nothing was set yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: ToolboxError = InventoryErrorKind::MissingColumn("os".to_string()).into();
        let err = Err::<(), _>(err).context("hosts.csv").unwrap_err();
        let display = err.to_string();
        assert!(display.contains("inventory"), "{display}");
        assert!(display.contains("hosts.csv"), "{display}");
        assert!(display.contains("'os'"), "{display}");
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(InventoryErrorKind::Empty).context("base")
        }

        fn outer() -> Result<()> {
            inner().context("outer layer")
        }

        match outer() {
            Err(ToolboxError::Inventory { context, .. }) => {
                assert_eq!(context, "outer layer: base");
            }
            other => panic!("Expected Inventory error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: std::result::Result<i32, InventoryErrorKind> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: std::result::Result<i32, InventoryErrorKind> =
            Err(InventoryErrorKind::Empty);
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
