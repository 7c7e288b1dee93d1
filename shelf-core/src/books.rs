//! Book registry.
//!
//! Books are keyed by a sequential [`BookId`] starting at 1. Ids only grow,
//! so iterating the `BTreeMap` yields books in insertion order.

use std::collections::BTreeMap;

use crate::types::{Book, BookId};

/// In-memory store of every catalogued book.
#[derive(Debug, Clone)]
pub struct BookRegistry {
    books: BTreeMap<BookId, Book>,
    next_id: u32,
}

impl Default for BookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BookRegistry {
    pub fn new() -> Self {
        Self { books: BTreeMap::new(), next_id: 1 }
    }

    /// Store a new book under the next id and return a copy of the record.
    ///
    /// Never fails. `copies` is stored as given, negative values included.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        copies: i64,
    ) -> Book {
        let id = BookId(self.next_id);
        self.next_id += 1;
        let book = Book {
            id,
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            copies,
        };
        tracing::debug!(book = %id, title = %book.title, copies, "book added");
        self.books.insert(id, book.clone());
        book
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id)
    }

    /// All books, oldest first.
    pub fn list(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Books whose title, author or ISBN contains `keyword`, ignoring case.
    /// An empty keyword matches everything.
    pub fn search(&self, keyword: &str) -> Vec<&Book> {
        self.books.values().filter(|b| b.matches(keyword)).collect()
    }

    /// Overwrite the copy count. No bounds check.
    pub fn set_copies(&mut self, id: BookId, copies: i64) -> Option<&Book> {
        let book = self.books.get_mut(&id)?;
        book.copies = copies;
        Some(book)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
