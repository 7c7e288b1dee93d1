//! Startup catalog loaded before the shell opens.

use crate::service::LibraryService;

/// `(title, author, isbn, copies)` of the preloaded books.
pub const BOOKS: [(&str, &str, &str, i64); 3] = [
    ("Java Programming", "James Gosling", "12345", 3),
    ("Data Structures", "Mark Allen", "67890", 2),
    ("Operating Systems", "Silberschatz", "11223", 4),
];

/// `(username, role)` of the preloaded users.
pub const USERS: [(&str, &str); 2] = [("Alice", "USER"), ("Bob", "ADMIN")];

/// Add the fixed books and users, in order, through the service.
pub fn preload(service: &mut LibraryService) {
    for (title, author, isbn, copies) in BOOKS {
        service.add_book(title, author, isbn, copies);
    }
    for (username, role) in USERS {
        service.add_user(username, role);
    }
    tracing::info!(books = BOOKS.len(), users = USERS.len(), "seed catalog loaded");
}
