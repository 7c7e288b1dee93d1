//! Domain types for the catalog.
//!
//! Identifiers are sequential `u32` newtypes. Records held by a transaction
//! refer to books and users by identifier only; nothing here dereferences them.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<u32> for $name {
            fn from(n: u32) -> Self {
                Self(n)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

id_newtype!(
    /// Identifier of a book in the registry.
    BookId
);
id_newtype!(
    /// Identifier of a registered user.
    UserId
);
id_newtype!(
    /// Identifier of a borrow record in the ledger.
    TransactionId
);

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle of a borrow record. `Outstanding` → `Returned`, one way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Outstanding,
    Returned,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Outstanding => write!(f, "outstanding"),
            TransactionStatus::Returned => write!(f, "returned"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A catalogued title and how many copies are on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Free text; neither format nor uniqueness is checked.
    pub isbn: String,
    /// Copies currently available. Signed: a negative count given at
    /// creation is stored unchanged.
    pub copies: i64,
}

impl Book {
    /// True when `keyword` occurs in title, author or ISBN, ignoring case.
    pub fn matches(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        [&self.title, &self.author, &self.isbn]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID:{} | {} by {} | ISBN:{} | Copies:{}",
            self.id, self.title, self.author, self.isbn, self.copies
        )
    }
}

/// A library patron. The role is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID:{} | {} ({})", self.id, self.username, self.role)
    }
}

/// One borrow of one copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub borrowed_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub returned_on: Option<NaiveDate>,
}

impl Transaction {
    pub fn status(&self) -> TransactionStatus {
        match self.returned_on {
            None => TransactionStatus::Outstanding,
            Some(_) => TransactionStatus::Returned,
        }
    }

    pub fn is_outstanding(&self) -> bool {
        self.returned_on.is_none()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TxID:{} | User:{} | Book:{} | Borrowed:{} | Returned:",
            self.id, self.user_id, self.book_id, self.borrowed_on
        )?;
        match self.returned_on {
            Some(date) => write!(f, "{date}"),
            None => write!(f, "Not returned yet"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
