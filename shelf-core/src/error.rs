//! Error types for shelf-core.

use thiserror::Error;

use crate::types::{BookId, TransactionId, UserId};

/// Why a borrow or return was refused.
///
/// Every variant is raised before any state is touched, so a refused
/// operation leaves registries and ledger exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("book {0} not found")]
    BookNotFound(BookId),

    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// The book exists but its copy count is zero or below.
    #[error("no copies of book {0} available")]
    NoCopiesAvailable(BookId),

    #[error("transaction {0} not found")]
    TransactionNotFound(TransactionId),

    #[error("transaction {0} was already returned")]
    AlreadyReturned(TransactionId),

    /// Strict returns only: the transaction borrowed a different book.
    #[error("transaction {transaction} is for book {actual}, not book {expected}")]
    BookMismatch {
        transaction: TransactionId,
        expected: BookId,
        actual: BookId,
    },
}
