//! Library service: the only place books, users and the ledger meet.
//!
//! The service exclusively owns one [`BookRegistry`], one [`UserRegistry`]
//! and one [`Ledger`]. Callers (the shell, tests) hold the service and pass
//! it around explicitly; there is no process-wide instance.
//!
//! Borrow and return each come in two forms:
//! - `try_borrow` / `try_return` report the cause of a refusal as a
//!   [`LibraryError`];
//! - `borrow` / `return_book` collapse that to a `bool`.

use crate::books::BookRegistry;
use crate::clock::{Clock, SystemClock};
use crate::error::LibraryError;
use crate::ledger::Ledger;
use crate::types::{Book, BookId, Transaction, TransactionId, User, UserId};
use crate::users::UserRegistry;

/// How a return call is validated against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnPolicy {
    /// Only the book must exist. The copy count is incremented even when the
    /// transaction id matches no outstanding borrow, so counts can drift.
    #[default]
    Permissive,
    /// The transaction must exist, be outstanding and belong to the book.
    Strict,
}

/// Result of an accepted return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// The transaction was outstanding and is now closed.
    Closed(Transaction),
    /// Copies were incremented but no outstanding transaction had this id.
    /// Only produced under [`ReturnPolicy::Permissive`].
    Unmatched(TransactionId),
}

#[derive(Debug)]
pub struct LibraryService {
    books: BookRegistry,
    users: UserRegistry,
    ledger: Ledger,
    clock: Box<dyn Clock>,
    policy: ReturnPolicy,
}

impl Default for LibraryService {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryService {
    /// Empty catalog, system clock, permissive returns.
    pub fn new() -> Self {
        Self {
            books: BookRegistry::new(),
            users: UserRegistry::new(),
            ledger: Ledger::new(),
            clock: Box::new(SystemClock),
            policy: ReturnPolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_policy(mut self, policy: ReturnPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ReturnPolicy {
        self.policy
    }

    // -----------------------------------------------------------------------
    // Books
    // -----------------------------------------------------------------------

    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        copies: i64,
    ) -> Book {
        self.books.add(title, author, isbn, copies)
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn books(&self) -> Vec<&Book> {
        self.books.list().collect()
    }

    pub fn search_books(&self, keyword: &str) -> Vec<&Book> {
        self.books.search(keyword)
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub fn add_user(&mut self, username: impl Into<String>, role: impl Into<String>) -> User {
        self.users.add(username, role)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn users(&self) -> Vec<&User> {
        self.users.list().collect()
    }

    // -----------------------------------------------------------------------
    // Ledger
    // -----------------------------------------------------------------------

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.list()
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.ledger.get(id)
    }

    /// Open borrows of `book_id` according to the ledger.
    pub fn outstanding_for_book(&self, book_id: BookId) -> usize {
        self.ledger.outstanding_for_book(book_id)
    }

    // -----------------------------------------------------------------------
    // Borrow / return
    // -----------------------------------------------------------------------

    /// Lend one copy of `book_id` to `user_id`.
    ///
    /// Checks, in order: the book exists, it has at least one copy, the user
    /// exists. On success the copy count drops by one and a transaction dated
    /// today is recorded.
    pub fn try_borrow(
        &mut self,
        user_id: UserId,
        book_id: BookId,
    ) -> Result<Transaction, LibraryError> {
        let copies = self
            .books
            .get(book_id)
            .ok_or(LibraryError::BookNotFound(book_id))?
            .copies;
        if copies <= 0 {
            return Err(LibraryError::NoCopiesAvailable(book_id));
        }
        if self.users.get(user_id).is_none() {
            return Err(LibraryError::UserNotFound(user_id));
        }

        self.books.set_copies(book_id, copies - 1);
        let tx = self.ledger.record(user_id, book_id, self.clock.today());
        tracing::info!(tx = %tx.id, user = %user_id, book = %book_id, copies_left = copies - 1, "book borrowed");
        Ok(tx)
    }

    /// [`try_borrow`](Self::try_borrow) without the cause.
    pub fn borrow(&mut self, user_id: UserId, book_id: BookId) -> bool {
        match self.try_borrow(user_id, book_id) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(error = %err, "borrow refused");
                false
            }
        }
    }

    /// Put one copy of `book_id` back and close transaction `tx_id`.
    ///
    /// Validation depends on the [`ReturnPolicy`]; see its variants.
    /// The increment saturates: a count already at `i64::MAX` stays there.
    pub fn try_return(
        &mut self,
        book_id: BookId,
        tx_id: TransactionId,
    ) -> Result<ReturnOutcome, LibraryError> {
        let copies = self
            .books
            .get(book_id)
            .ok_or(LibraryError::BookNotFound(book_id))?
            .copies;

        if self.policy == ReturnPolicy::Strict {
            let tx = self
                .ledger
                .get(tx_id)
                .ok_or(LibraryError::TransactionNotFound(tx_id))?;
            if !tx.is_outstanding() {
                return Err(LibraryError::AlreadyReturned(tx_id));
            }
            if tx.book_id != book_id {
                return Err(LibraryError::BookMismatch {
                    transaction: tx_id,
                    expected: book_id,
                    actual: tx.book_id,
                });
            }
        }

        self.books.set_copies(book_id, copies.saturating_add(1));
        let today = self.clock.today();
        let outcome = match self.ledger.mark_returned(tx_id, today) {
            Some(tx) => ReturnOutcome::Closed(tx.clone()),
            None => ReturnOutcome::Unmatched(tx_id),
        };

        match &outcome {
            ReturnOutcome::Closed(tx) if tx.book_id != book_id => tracing::warn!(
                tx = %tx_id,
                book = %book_id,
                borrowed_book = %tx.book_id,
                "return closed a transaction for a different book; copy counts have drifted"
            ),
            ReturnOutcome::Closed(_) => {
                tracing::info!(tx = %tx_id, book = %book_id, copies = copies.saturating_add(1), "book returned")
            }
            ReturnOutcome::Unmatched(_) => tracing::warn!(
                tx = %tx_id,
                book = %book_id,
                "no outstanding transaction matched; copy count incremented anyway"
            ),
        }
        Ok(outcome)
    }

    /// [`try_return`](Self::try_return) without the outcome detail.
    pub fn return_book(&mut self, book_id: BookId, tx_id: TransactionId) -> bool {
        match self.try_return(book_id, tx_id) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(error = %err, "return refused");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
