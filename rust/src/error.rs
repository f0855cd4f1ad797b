//! Error handling and result types for BTree operations.
//!
//! Absence of a key is normally reported as `None`. The error type is used by
//! construction, the fallible accessors and the invariant checks.

/// Error type for B-tree operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BTreeError {
    /// Key not found in the tree.
    KeyNotFound,
    /// Invalid minimum degree specified.
    InvalidDegree(String),
    /// An invariant check around a modifying operation failed.
    DataIntegrityError(String),
    /// Arena bookkeeping disagrees with the tree structure.
    ArenaError(String),
    /// Tree structure violates a B-tree invariant.
    CorruptedTree(String),
}

impl BTreeError {
    /// Create an InvalidDegree error with context
    pub fn invalid_degree(degree: usize, min_required: usize) -> Self {
        Self::InvalidDegree(format!(
            "Degree {} is invalid (minimum required: {})",
            degree, min_required
        ))
    }

    /// Create an InvalidDegree error for a degree above the supported range
    pub fn degree_too_large(degree: usize, max_allowed: usize) -> Self {
        Self::InvalidDegree(format!(
            "Degree {} is invalid (maximum allowed: {})",
            degree, max_allowed
        ))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create an ArenaError with context
    pub fn arena_error(operation: &str, details: &str) -> Self {
        Self::ArenaError(format!("{} failed: {}", operation, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    pub fn is_degree_error(&self) -> bool {
        matches!(self, Self::InvalidDegree(_))
    }

    /// True for every variant that signals a broken tree rather than a
    /// rejected request.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            Self::DataIntegrityError(_) | Self::ArenaError(_) | Self::CorruptedTree(_)
        )
    }
}

impl std::fmt::Display for BTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BTreeError::KeyNotFound => write!(f, "Key not found in tree"),
            BTreeError::InvalidDegree(msg) => write!(f, "Invalid degree: {}", msg),
            BTreeError::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
            BTreeError::ArenaError(msg) => write!(f, "Arena error: {}", msg),
            BTreeError::CorruptedTree(msg) => write!(f, "Corrupted tree: {}", msg),
        }
    }
}

impl std::error::Error for BTreeError {}

/// Public result type for tree operations that may fail
pub type BTreeResult<T> = Result<T, BTreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, BTreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, BTreeError>;

/// Result type for tree construction
pub type InitResult<T> = Result<T, BTreeError>;

/// Result extension trait for attaching context to errors
pub trait BTreeResultExt<T> {
    /// Prefix the error message with `context`.
    fn with_context(self, context: &str) -> BTreeResult<T>;

    /// Prefix the error message with the name of the failing operation.
    fn with_operation(self, operation: &str) -> BTreeResult<T>;
}

impl<T> BTreeResultExt<T> for Result<T, BTreeError> {
    fn with_context(self, context: &str) -> BTreeResult<T> {
        self.map_err(|e| match e {
            BTreeError::KeyNotFound => BTreeError::KeyNotFound,
            BTreeError::InvalidDegree(msg) => {
                BTreeError::InvalidDegree(format!("{}: {}", context, msg))
            }
            BTreeError::DataIntegrityError(msg) => BTreeError::data_integrity(context, &msg),
            BTreeError::ArenaError(msg) => BTreeError::arena_error(context, &msg),
            BTreeError::CorruptedTree(msg) => BTreeError::corrupted_tree(context, &msg),
        })
    }

    fn with_operation(self, operation: &str) -> BTreeResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BTreeError::invalid_degree(1, 2);
        assert_eq!(
            err.to_string(),
            "Invalid degree: Degree 1 is invalid (minimum required: 2)"
        );
        assert!(err.is_degree_error());
        assert!(!err.is_integrity_error());

        assert_eq!(BTreeError::KeyNotFound.to_string(), "Key not found in tree");
    }

    #[test]
    fn test_with_operation_prefixes_message() {
        let result: BTreeResult<()> = Err(BTreeError::corrupted_tree("Node 3", "keys out of order"));
        let err = result.with_operation("delete").unwrap_err();
        assert_eq!(
            err,
            BTreeError::CorruptedTree(
                "Operation 'delete' corruption: Node 3 corruption: keys out of order".to_string()
            )
        );
        assert!(err.is_integrity_error());
    }

    #[test]
    fn test_key_not_found_keeps_its_shape() {
        let result: KeyResult<u8> = Err(BTreeError::KeyNotFound);
        assert_eq!(result.with_context("lookup"), Err(BTreeError::KeyNotFound));
    }
}
