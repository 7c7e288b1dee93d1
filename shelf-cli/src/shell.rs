//! Interactive menu over a [`LibraryService`].
//!
//! The shell is the only component that reads input or prints. It owns no
//! catalog state: every option is one call into the service.

use std::fmt::Display;
use std::io::{BufRead, Write};

use colored::Colorize;
use shelf_core::{BookId, LibraryService, ReturnOutcome, TransactionId, UserId};

use crate::prompt::{PromptError, Prompter};

const MENU: &str = "\
1. Add Book
2. List Books
3. Search Books
4. Borrow Book
5. Return Book
6. Add User
7. List Users
8. List Transactions
0. Exit";

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    ListBooks,
    SearchBooks,
    BorrowBook,
    ReturnBook,
    AddUser,
    ListUsers,
    ListTransactions,
    Exit,
}

impl TryFrom<i64> for MenuChoice {
    type Error = i64;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        Ok(match n {
            1 => Self::AddBook,
            2 => Self::ListBooks,
            3 => Self::SearchBooks,
            4 => Self::BorrowBook,
            5 => Self::ReturnBook,
            6 => Self::AddUser,
            7 => Self::ListUsers,
            8 => Self::ListTransactions,
            0 => Self::Exit,
            other => return Err(other),
        })
    }
}

enum Flow {
    Continue,
    Exit,
}

pub struct Shell<'a, R, W> {
    service: &'a mut LibraryService,
    prompt: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(service: &'a mut LibraryService, input: R, output: W) -> Self {
        Self { service, prompt: Prompter::new(input, output) }
    }

    /// Run the menu loop until option 0 or end of input.
    ///
    /// Unparseable numbers abandon the current option and redisplay the menu.
    /// Only I/O failures are returned.
    pub fn run(&mut self) -> Result<(), PromptError> {
        writeln!(self.prompt.out(), "=== Library Management System ===")?;
        loop {
            writeln!(self.prompt.out(), "\n{MENU}")?;
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(PromptError::InvalidNumber { input }) => {
                    tracing::debug!(%input, "rejected non-numeric input");
                    let msg = format!("Invalid number: '{input}'");
                    writeln!(self.prompt.out(), "{}", msg.red())?;
                }
                Err(PromptError::Closed) => {
                    writeln!(self.prompt.out(), "\nGoodbye!")?;
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn step(&mut self) -> Result<Flow, PromptError> {
        let selected: i64 = self.prompt.number("Choose an option: ")?;
        let choice = match MenuChoice::try_from(selected) {
            Ok(choice) => choice,
            Err(_) => {
                writeln!(self.prompt.out(), "{}", "Invalid choice!".red())?;
                return Ok(Flow::Continue);
            }
        };

        match choice {
            MenuChoice::AddBook => self.add_book()?,
            MenuChoice::ListBooks => self.list_books()?,
            MenuChoice::SearchBooks => self.search_books()?,
            MenuChoice::BorrowBook => self.borrow_book()?,
            MenuChoice::ReturnBook => self.return_book()?,
            MenuChoice::AddUser => self.add_user()?,
            MenuChoice::ListUsers => self.list_users()?,
            MenuChoice::ListTransactions => self.list_transactions()?,
            MenuChoice::Exit => {
                writeln!(self.prompt.out(), "Goodbye!")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    // -----------------------------------------------------------------------
    // Options
    // -----------------------------------------------------------------------

    fn add_book(&mut self) -> Result<(), PromptError> {
        let title = self.prompt.line("Title: ")?;
        let author = self.prompt.line("Author: ")?;
        let isbn = self.prompt.line("ISBN: ")?;
        let copies: i64 = self.prompt.number("Copies: ")?;
        let book = self.service.add_book(title, author, isbn, copies);
        writeln!(self.prompt.out(), "Added: {book}")?;
        Ok(())
    }

    fn list_books(&mut self) -> Result<(), PromptError> {
        let lines = lines_of(self.service.books());
        self.print_all(lines, "No books available.")
    }

    fn search_books(&mut self) -> Result<(), PromptError> {
        let keyword = self.prompt.line("Enter keyword: ")?;
        let lines = lines_of(self.service.search_books(&keyword));
        self.print_all(lines, "No books found.")
    }

    fn borrow_book(&mut self) -> Result<(), PromptError> {
        let user_id: UserId = self.prompt.number("Enter user ID: ")?;
        let book_id: BookId = self.prompt.number("Enter book ID to borrow: ")?;
        match self.service.try_borrow(user_id, book_id) {
            Ok(tx) => {
                writeln!(self.prompt.out(), "{}", "Book borrowed successfully.".green())?;
                writeln!(self.prompt.out(), "  {tx}")?;
            }
            Err(err) => {
                let msg = "Borrow failed (invalid user/book or no copies).";
                writeln!(self.prompt.out(), "{}", msg.red())?;
                writeln!(self.prompt.out(), "  {err}")?;
            }
        }
        Ok(())
    }

    fn return_book(&mut self) -> Result<(), PromptError> {
        let book_id: BookId = self.prompt.number("Enter book ID to return: ")?;
        let tx_id: TransactionId = self.prompt.number("Enter transaction ID: ")?;
        match self.service.try_return(book_id, tx_id) {
            Ok(outcome) => {
                writeln!(self.prompt.out(), "{}", "Book returned successfully.".green())?;
                if let ReturnOutcome::Unmatched(id) = outcome {
                    let note = format!("  note: no outstanding transaction {id}; ledger unchanged");
                    writeln!(self.prompt.out(), "{}", note.yellow())?;
                }
            }
            Err(err) => {
                writeln!(self.prompt.out(), "{}", "Invalid return.".red())?;
                writeln!(self.prompt.out(), "  {err}")?;
            }
        }
        Ok(())
    }

    fn add_user(&mut self) -> Result<(), PromptError> {
        let username = self.prompt.line("Username: ")?;
        let role = self.prompt.line("Role (ADMIN/USER): ")?;
        let user = self.service.add_user(username, role);
        writeln!(self.prompt.out(), "Added: {user}")?;
        Ok(())
    }

    fn list_users(&mut self) -> Result<(), PromptError> {
        let lines = lines_of(self.service.users());
        self.print_all(lines, "No users registered.")
    }

    fn list_transactions(&mut self) -> Result<(), PromptError> {
        let lines = lines_of(self.service.transactions());
        self.print_all(lines, "No transactions yet.")
    }

    fn print_all(&mut self, lines: Vec<String>, empty: &str) -> Result<(), PromptError> {
        let out = self.prompt.out();
        if lines.is_empty() {
            writeln!(out, "{empty}")?;
        }
        for line in lines {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

fn lines_of<T: Display>(items: impl IntoIterator<Item = T>) -> Vec<String> {
    items.into_iter().map(|item| item.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::NaiveDate;
    use shelf_core::{seed, FixedClock, ReturnPolicy};

    use super::*;

    /// Seeded service with a fixed clock so transaction lines are predictable.
    fn today_service(policy: ReturnPolicy) -> LibraryService {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date");
        let mut svc = LibraryService::new().with_clock(FixedClock(day)).with_policy(policy);
        seed::preload(&mut svc);
        svc
    }

    fn run(service: &mut LibraryService, input: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        Shell::new(service, Cursor::new(input.as_bytes()), &mut out)
            .run()
            .expect("shell run");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn menu_choice_maps_zero_through_eight() {
        assert_eq!(MenuChoice::try_from(0), Ok(MenuChoice::Exit));
        assert_eq!(MenuChoice::try_from(8), Ok(MenuChoice::ListTransactions));
        assert_eq!(MenuChoice::try_from(9), Err(9));
        assert_eq!(MenuChoice::try_from(-1), Err(-1));
    }

    #[test]
    fn exit_prints_goodbye_once() {
        let mut svc = today_service(Default::default());
        let out = run(&mut svc, "0\n");
        assert!(out.starts_with("=== Library Management System ==="));
        assert!(out.contains("0. Exit"));
        assert_eq!(out.matches("Goodbye!").count(), 1);
    }

    #[test]
    fn borrow_then_list_transactions() {
        let mut svc = today_service(Default::default());
        let out = run(&mut svc, "4\n1\n2\n8\n0\n");
        assert!(out.contains("Book borrowed successfully."));
        assert!(out.contains("TxID:1 | User:1 | Book:2 | Borrowed:2024-02-29 | Returned:Not returned yet"));
        assert_eq!(svc.book(BookId(2)).map(|b| b.copies), Some(1));
    }

    #[test]
    fn failed_borrow_prints_generic_message_and_cause() {
        let mut svc = today_service(Default::default());
        let out = run(&mut svc, "4\n99\n1\n0\n");
        assert!(out.contains("Borrow failed (invalid user/book or no copies)."));
        assert!(out.contains("user 99 not found"));
        assert!(svc.transactions().is_empty());
    }

    #[test]
    fn unmatched_permissive_return_is_noted() {
        let mut svc = today_service(Default::default());
        let out = run(&mut svc, "5\n1\n7\n0\n");
        assert!(out.contains("Book returned successfully."));
        assert!(out.contains("no outstanding transaction 7"));
        assert_eq!(svc.book(BookId(1)).map(|b| b.copies), Some(4));
    }

    #[test]
    fn strict_return_refusal_is_reported() {
        let mut svc = today_service(ReturnPolicy::Strict);
        let out = run(&mut svc, "5\n1\n7\n0\n");
        assert!(out.contains("Invalid return."));
        assert!(out.contains("transaction 7 not found"));
        assert_eq!(svc.book(BookId(1)).map(|b| b.copies), Some(3));
    }

    #[test]
    fn bad_number_abandons_option_and_redisplays_menu() {
        let mut svc = today_service(Default::default());
        let out = run(&mut svc, "1\nTitle\nAuthor\nISBN\nmany\n2\n0\n");
        assert!(out.contains("Invalid number: 'many'"));
        assert!(!out.contains("Added:"));
        assert_eq!(svc.books().len(), 3);
        assert!(out.contains("ID:3 | Operating Systems by Silberschatz | ISBN:11223 | Copies:4"));
    }

    #[test]
    fn invalid_choice_and_empty_listings() {
        let mut svc = LibraryService::new();
        let out = run(&mut svc, "12\n2\n3\nzzz\n7\n8\n0\n");
        assert!(out.contains("Invalid choice!"));
        assert!(out.contains("No books available."));
        assert!(out.contains("No books found."));
        assert!(out.contains("No users registered."));
        assert!(out.contains("No transactions yet."));
    }

    #[test]
    fn add_user_and_search() {
        let mut svc = today_service(Default::default());
        let out = run(&mut svc, "6\nCarol\nUSER\n3\nSTRUCT\n0\n");
        assert!(out.contains("Added: ID:3 | Carol (USER)"));
        assert!(out.contains("ID:2 | Data Structures by Mark Allen | ISBN:67890 | Copies:2"));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let mut svc = today_service(Default::default());
        let out = run(&mut svc, "2\n");
        assert!(out.trim_end().ends_with("Goodbye!"));
    }
}
