//! Append-only transaction ledger.
//!
//! The ledger stores `user_id`/`book_id` as given and never looks them up;
//! existence checks belong to [`crate::service::LibraryService`]. Dates are
//! supplied by the caller so the ledger stays independent of any clock.

use chrono::NaiveDate;

use crate::types::{BookId, Transaction, TransactionId, UserId};

#[derive(Debug, Clone)]
pub struct Ledger {
    entries: Vec<Transaction>,
    next_id: u32,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self { entries: Vec::new(), next_id: 1 }
    }

    /// Append an outstanding borrow and return a copy of it.
    pub fn record(
        &mut self,
        user_id: UserId,
        book_id: BookId,
        borrowed_on: NaiveDate,
    ) -> Transaction {
        let id = TransactionId(self.next_id);
        self.next_id += 1;
        let tx = Transaction { id, user_id, book_id, borrowed_on, returned_on: None };
        tracing::debug!(tx = %id, user = %user_id, book = %book_id, "transaction recorded");
        self.entries.push(tx.clone());
        tx
    }

    /// Close the first outstanding entry with id `tx_id`.
    ///
    /// Returns `None` and changes nothing when no such entry exists, whether
    /// the id is unknown or the entry is already returned.
    pub fn mark_returned(
        &mut self,
        tx_id: TransactionId,
        returned_on: NaiveDate,
    ) -> Option<&Transaction> {
        let tx = self
            .entries
            .iter_mut()
            .find(|tx| tx.id == tx_id && tx.is_outstanding())?;
        tx.returned_on = Some(returned_on);
        Some(&*tx)
    }

    pub fn get(&self, tx_id: TransactionId) -> Option<&Transaction> {
        self.entries.iter().find(|tx| tx.id == tx_id)
    }

    /// Full history in recorded order.
    pub fn list(&self) -> &[Transaction] {
        &self.entries
    }

    /// Number of open borrows of `book_id`.
    pub fn outstanding_for_book(&self, book_id: BookId) -> usize {
        self.entries
            .iter()
            .filter(|tx| tx.book_id == book_id && tx.is_outstanding())
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn record_appends_outstanding_entries_in_order() {
        let mut ledger = Ledger::new();
        let first = ledger.record(UserId(1), BookId(1), day(1));
        let second = ledger.record(UserId(2), BookId(1), day(2));

        assert_eq!(first.id, TransactionId(1));
        assert_eq!(second.id, TransactionId(2));
        assert!(first.is_outstanding());
        assert_eq!(ledger.list(), &[first, second]);
    }

    #[test]
    fn ledger_does_not_validate_references() {
        let mut ledger = Ledger::new();
        let tx = ledger.record(UserId(404), BookId(404), day(1));
        assert_eq!(ledger.get(tx.id).map(|t| t.book_id), Some(BookId(404)));
    }

    #[test]
    fn mark_returned_sets_date_once() {
        let mut ledger = Ledger::new();
        let tx = ledger.record(UserId(1), BookId(1), day(1));

        let closed = ledger.mark_returned(tx.id, day(5)).cloned();
        assert_eq!(closed.and_then(|t| t.returned_on), Some(day(5)));

        assert!(ledger.mark_returned(tx.id, day(9)).is_none());
        assert_eq!(ledger.get(tx.id).and_then(|t| t.returned_on), Some(day(5)));
    }

    #[test]
    fn mark_returned_unknown_id_is_silent() {
        let mut ledger = Ledger::new();
        ledger.record(UserId(1), BookId(1), day(1));
        let before = ledger.list().to_vec();

        assert!(ledger.mark_returned(TransactionId(77), day(2)).is_none());
        assert_eq!(ledger.list(), before.as_slice());
    }

    #[test]
    fn outstanding_count_tracks_returns() {
        let mut ledger = Ledger::new();
        let a = ledger.record(UserId(1), BookId(1), day(1));
        ledger.record(UserId(1), BookId(1), day(1));
        ledger.record(UserId(1), BookId(2), day(1));
        assert_eq!(ledger.outstanding_for_book(BookId(1)), 2);

        ledger.mark_returned(a.id, day(3));
        assert_eq!(ledger.outstanding_for_book(BookId(1)), 1);
        assert_eq!(ledger.outstanding_for_book(BookId(2)), 1);
        assert_eq!(ledger.outstanding_for_book(BookId(3)), 0);
    }
}
