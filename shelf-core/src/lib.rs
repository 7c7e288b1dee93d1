//! Shelf core library: catalog registries, transaction ledger, service.
//!
//! Public API surface:
//! - [`types`]: identifier newtypes and records
//! - [`error`]: [`LibraryError`]
//! - [`books`], [`users`], [`ledger`]: the three in-memory stores
//! - [`service`]: [`LibraryService`], borrow / return bookkeeping
//! - [`clock`]: where "today" comes from
//! - [`seed`]: the startup catalog

pub mod books;
pub mod clock;
pub mod error;
pub mod ledger;
pub mod seed;
pub mod service;
pub mod types;
pub mod users;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::LibraryError;
pub use service::{LibraryService, ReturnOutcome, ReturnPolicy};
pub use types::{Book, BookId, Transaction, TransactionId, TransactionStatus, User, UserId};
