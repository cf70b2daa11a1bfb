// Library data module: owns the in-memory book collection and the
// operations the menu flows delegate to. It is intentionally free of any
// printing or prompting so the collection logic stays easy to unit test.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// One book record. Field order here is also the key order written to the
/// JSON file (title, author, year, genre, read).
///
/// `year` is signed: the add flow only ever stores non-negative values
/// (it validates digits-only input), but loaded files are trusted as-is
/// and may carry negative years.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub genre: String,
    pub read: bool,
}

/// Which field a search runs against. Variants map 1:1 onto the numbered
/// options of the search sub-menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Genre,
    Year,
    ReadStatus,
}

/// Aggregate numbers for the statistics view. `genre_counts` keeps each
/// genre in the order it was first seen in the collection.
#[derive(Debug, PartialEq)]
pub struct LibraryStats {
    pub total: usize,
    pub read: usize,
    pub unread: usize,
    pub oldest_year: i64,
    pub newest_year: i64,
    pub genre_counts: Vec<(String, usize)>,
}

/// The in-memory collection: an ordered sequence of records. Positions are
/// recomputed each time the list is displayed, and duplicates are allowed.
#[derive(Debug, Default)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    /// Create an empty library. Every session starts with one of these.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// All records in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Append a record to the end of the sequence.
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Delete the record at `index` (0-based) and hand it back, or `None`
    /// if the index is out of range.
    pub fn remove(&mut self, index: usize) -> Option<Book> {
        if index < self.books.len() {
            Some(self.books.remove(index))
        } else {
            None
        }
    }

    /// Flip the read flag of the record at `index` (0-based). Returns the
    /// updated record, or `None` if the index is out of range.
    pub fn toggle_read(&mut self, index: usize) -> Option<&Book> {
        let book = self.books.get_mut(index)?;
        book.read = !book.read;
        Some(book)
    }

    /// Collect the records matching `term` on the given field, preserving
    /// their relative order. `term` is expected already trimmed and
    /// lower-cased; the search flow folds it once at the prompt.
    pub fn search(&self, field: SearchField, term: &str) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|book| Self::matches(book, field, term))
            .collect()
    }

    fn matches(book: &Book, field: SearchField, term: &str) -> bool {
        match field {
            SearchField::Title => book.title.to_lowercase().contains(term),
            SearchField::Author => book.author.to_lowercase().contains(term),
            SearchField::Genre => book.genre.to_lowercase().contains(term),
            // Year matching is exact textual equality, not substring.
            SearchField::Year => term == book.year.to_string(),
            SearchField::ReadStatus => {
                (term == "read" && book.read) || (term == "unread" && !book.read)
            }
        }
    }

    /// Compute the statistics view, or `None` for an empty library.
    pub fn statistics(&self) -> Option<LibraryStats> {
        if self.books.is_empty() {
            return None;
        }

        let total = self.books.len();
        let read = self.books.iter().filter(|book| book.read).count();

        // Count per genre while keeping first-seen order, so the report
        // lists genres the way they entered the collection.
        let mut genre_counts: Vec<(String, usize)> = Vec::new();
        for book in &self.books {
            match genre_counts.iter_mut().find(|(genre, _)| *genre == book.genre) {
                Some((_, count)) => *count += 1,
                None => genre_counts.push((book.genre.clone(), 1)),
            }
        }

        let oldest_year = self.books.iter().map(|book| book.year).min()?;
        let newest_year = self.books.iter().map(|book| book.year).max()?;

        Some(LibraryStats {
            total,
            read,
            unread: total - read,
            oldest_year,
            newest_year,
            genre_counts,
        })
    }

    /// Serialize the whole collection as a JSON array and write it to
    /// `path`, overwriting any existing file.
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string(&self.books).context("Serializing library to json")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path))?;
        Ok(())
    }

    /// Read `path` and parse it as a JSON array of records. Parsed values
    /// are trusted as-is; add-time year validation is not re-run here.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
        let books: Vec<Book> = serde_json::from_str(&contents).context("Parsing library json")?;
        Ok(Self { books })
    }
}
