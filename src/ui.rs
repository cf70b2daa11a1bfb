// UI layer: renders the numbered menu and the per-option prompt flows
// using `dialoguer`. The functions are small and synchronous to make the
// flow easy to follow; all collection logic lives in `library`.

use crate::library::{Book, Library, SearchField};
use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::thread;
use std::time::Duration;

/// The nine operations reachable from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    Remove,
    Search,
    Display,
    Toggle,
    Statistics,
    Save,
    Load,
    Exit,
}

/// Dispatch is by exact literal: the trimmed choice has to be one of
/// "1".."9", so entries like "01" or "1.0" land on the invalid arm the
/// same as any other stray text.
fn parse_menu_choice(choice: &str) -> Option<MenuChoice> {
    match choice {
        "1" => Some(MenuChoice::Add),
        "2" => Some(MenuChoice::Remove),
        "3" => Some(MenuChoice::Search),
        "4" => Some(MenuChoice::Display),
        "5" => Some(MenuChoice::Toggle),
        "6" => Some(MenuChoice::Statistics),
        "7" => Some(MenuChoice::Save),
        "8" => Some(MenuChoice::Load),
        "9" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Main interactive menu. Receives the (initially empty) `Library` and
/// runs the read-eval loop until the user chooses option 9.
///
/// Note: the menu is re-printed before every prompt, and the choice is
/// matched as text; anything unrecognized is rejected with a message and
/// the loop simply comes around again.
pub fn main_menu(mut library: Library) -> Result<()> {
    println!("Welcome to your Personal Library Manager!");

    loop {
        print_menu();
        let choice = prompt_line("Enter your choice (1-9)")?;
        match parse_menu_choice(&choice) {
            Some(MenuChoice::Add) => handle_add(&mut library)?,
            Some(MenuChoice::Remove) => handle_remove(&mut library)?,
            Some(MenuChoice::Search) => handle_search(&library)?,
            Some(MenuChoice::Display) => print_library(&library),
            Some(MenuChoice::Toggle) => handle_toggle(&mut library)?,
            Some(MenuChoice::Statistics) => show_statistics(&library),
            Some(MenuChoice::Save) => handle_save(&library)?,
            Some(MenuChoice::Load) => {
                // The load flow answers None when nothing should change
                // (empty filename, missing file, bad JSON); only a real
                // result replaces the in-memory collection.
                if let Some(loaded) = handle_load()? {
                    library = loaded;
                }
            }
            Some(MenuChoice::Exit) => {
                println!("Goodbye! Happy reading!");
                break;
            }
            None => println!("Invalid choice. Please enter a number between 1 and 9."),
        }
    }
    Ok(())
}

/// Print the nine menu options.
fn print_menu() {
    println!("\nPersonal Library Manager");
    println!("1. Add a new book");
    println!("2. Remove a book");
    println!("3. Search for books");
    println!("4. Display all books");
    println!("5. Mark a book as read/unread");
    println!("6. View statistics");
    println!("7. Save library to file");
    println!("8. Load library from file");
    println!("9. Exit");
}

/// Read one line of input under `prompt` and trim it. Empty input is let
/// through on purpose; each flow applies its own validation rather than
/// the prompt widget's.
fn prompt_line(prompt: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(input.trim().to_string())
}

/// Collect the five record fields and append the new book. The year and
/// read-status prompts re-ask until they get a usable answer; the text
/// fields accept whatever was typed, empty included.
fn handle_add(library: &mut Library) -> Result<()> {
    println!("\nAdd a New Book");

    let title = prompt_line("Enter book title")?;
    let author = prompt_line("Enter author name")?;

    let year = loop {
        let input = prompt_line("Enter publication year")?;
        match parse_year_input(&input) {
            Some(year) => break year,
            None => println!("Please enter a valid year (numbers only)."),
        }
    };

    let genre = prompt_line("Enter genre")?;

    let read = loop {
        let input = prompt_line("Have you read this book? (yes/no)")?;
        match parse_read_input(&input) {
            Some(read) => break read,
            None => println!("Please answer with 'yes' or 'no'."),
        }
    };

    let book = Book { title: title.clone(), author, year, genre, read };
    library.add(book);
    println!("'{}' has been added to your library!", title);
    Ok(())
}

/// Year entry rule: non-empty, ASCII digits only, and small enough to fit
/// the year type. Anything else makes the add flow re-prompt.
fn parse_year_input(input: &str) -> Option<i64> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

/// Read-status entry rule: exactly "yes" or "no", case-insensitive.
fn parse_read_input(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Show the numbered list and delete the chosen record. A non-numeric
/// entry aborts with a message (no retry here), and an out-of-range
/// number likewise; the collection is only touched on a valid selection.
fn handle_remove(library: &mut Library) -> Result<()> {
    if library.is_empty() {
        println!("Your library is empty!");
        return Ok(());
    }

    println!("\nRemove a Book");
    print_library(library);

    let input = prompt_line("Enter the number of the book to remove")?;
    match input.parse::<i64>() {
        Ok(number) => {
            // The list was printed 1-based; anything outside it counts as
            // a range error, negative numbers included.
            let removed =
                index_from_choice(number, library.len()).and_then(|i| library.remove(i));
            match removed {
                Some(book) => {
                    println!("'{}' has been removed from your library.", book.title);
                }
                None => println!("Invalid selection. Please try again."),
            }
        }
        Err(_) => println!("Please enter a valid number."),
    }
    Ok(())
}

/// Show the numbered list and flip the chosen record's read flag,
/// reporting the new state. Same parse and range rules as removal.
fn handle_toggle(library: &mut Library) -> Result<()> {
    if library.is_empty() {
        println!("Your library is empty!");
        return Ok(());
    }

    print_library(library);

    let input = prompt_line("Enter the number of the book to toggle read status")?;
    match input.parse::<i64>() {
        Ok(number) => {
            let toggled =
                index_from_choice(number, library.len()).and_then(|i| library.toggle_read(i));
            match toggled {
                Some(book) => {
                    let status = if book.read { "read" } else { "unread" };
                    println!("'{}' is now marked as {}.", book.title, status);
                }
                None => println!("Invalid selection. Please try again."),
            }
        }
        Err(_) => println!("Please enter a valid number."),
    }
    Ok(())
}

/// Map a 1-based list answer onto a 0-based index, `None` when the answer
/// falls outside the printed list.
fn index_from_choice(number: i64, len: usize) -> Option<usize> {
    if number < 1 || number > len as i64 {
        return None;
    }
    Some((number - 1) as usize)
}

/// Ask which field to search, then for the term, and render the matches.
/// A non-numeric option aborts the search outright; a number outside 1-5
/// still asks for a term and simply matches nothing.
fn handle_search(library: &Library) -> Result<()> {
    if library.is_empty() {
        println!("Your library is empty!");
        return Ok(());
    }

    println!("\nSearch Options");
    println!("1. Search by title");
    println!("2. Search by author");
    println!("3. Search by genre");
    println!("4. Search by year");
    println!("5. Search by read status");

    let option = prompt_line("Choose a search option (1-5)")?;
    let option: i64 = match option.parse() {
        Ok(number) => number,
        Err(_) => {
            println!("Please enter a number between 1 and 5.");
            return Ok(());
        }
    };

    // The term is folded once here; all matching downstream assumes a
    // trimmed, lower-cased term.
    let term = prompt_line("Enter your search term")?.to_lowercase();

    let found = match search_field_from_option(option) {
        Some(field) => library.search(field, &term),
        None => Vec::new(),
    };

    if found.is_empty() {
        println!("No books found matching your criteria.");
    } else {
        println!("\nFound {} matching book(s):", found.len());
        print_book_list(&found);
    }
    Ok(())
}

/// Map a search sub-menu answer onto the field it targets. Numbers
/// outside 1-5 map to `None`: the flow still asks for a term and then
/// finds nothing, rather than aborting.
fn search_field_from_option(option: i64) -> Option<SearchField> {
    match option {
        1 => Some(SearchField::Title),
        2 => Some(SearchField::Author),
        3 => Some(SearchField::Genre),
        4 => Some(SearchField::Year),
        5 => Some(SearchField::ReadStatus),
        _ => None,
    }
}

/// Print the statistics view: counts, the year range, then genres in the
/// order they first appeared.
fn show_statistics(library: &Library) {
    let stats = match library.statistics() {
        Some(stats) => stats,
        None => {
            println!("Your library is empty!");
            return;
        }
    };

    println!("\nLibrary Statistics");
    println!("Total books: {}", stats.total);
    println!("Read books: {}", stats.read);
    println!("Unread books: {}", stats.unread);
    println!("Oldest book published in: {}", stats.oldest_year);
    println!("Newest book published in: {}", stats.newest_year);

    println!("\nBooks by genre:");
    for (genre, count) in &stats.genre_counts {
        println!("{}: {} book(s)", genre, count);
    }
}

/// Render the whole collection as the numbered list.
fn print_library(library: &Library) {
    let books: Vec<&Book> = library.books().iter().collect();
    print_book_list(&books);
}

/// The shared numbered-list renderer, also used for search results (which
/// is why they appear under the same header).
fn print_book_list(books: &[&Book]) {
    if books.is_empty() {
        println!("Your library is empty!");
        return;
    }

    println!("\nYour Library:");
    for (i, book) in books.iter().enumerate() {
        println!("{}", format_book_line(i + 1, book));
    }
}

/// Render one list line: `1. Dune by Herbert (1965) - Sci-Fi [Read]`.
fn format_book_line(number: usize, book: &Book) -> String {
    let status = if book.read { "Read" } else { "Unread" };
    format!(
        "{}. {} by {} ({}) - {} [{}]",
        number, book.title, book.author, book.year, book.genre, status
    )
}

/// Ask for a filename and write the whole collection to it as JSON.
/// Write errors are printed and the session carries on.
fn handle_save(library: &Library) -> Result<()> {
    let filename = prompt_line("Enter filename to save (e.g., my_library.json)")?;
    save_with_filename(library, &filename);
    Ok(())
}

/// The post-prompt half of the save flow. An empty filename is rejected
/// before any I/O happens and reports `false`; otherwise the write is
/// attempted under a brief spinner, its outcome printed, and `true`
/// reported whether or not the write succeeded.
fn save_with_filename(library: &Library, filename: &str) -> bool {
    if filename.is_empty() {
        println!("Filename cannot be empty.");
        return false;
    }

    // indicatif's spinner shows that the write is underway.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Saving...");
    // small delay to make the spinner visible
    thread::sleep(Duration::from_millis(300));

    match library.save_to_file(filename) {
        Ok(_) => println!("Library saved to {} successfully!", filename),
        Err(e) => println!("Error saving file: {:#}", e),
    }
    true
}

/// Ask for a filename and load a library from it. `Ok(None)` means
/// nothing should replace the current collection.
fn handle_load() -> Result<Option<Library>> {
    let filename = prompt_line("Enter filename to load (e.g., my_library.json)")?;
    Ok(load_with_filename(&filename))
}

/// The post-prompt half of the load flow. `None` is the keep-everything
/// answer: an empty filename, a missing file, or a file that would not
/// read or parse. Only `Some(..)` carries a replacement, and a file
/// holding `[]` is a perfectly good (empty) one.
fn load_with_filename(filename: &str) -> Option<Library> {
    if filename.is_empty() {
        println!("Filename cannot be empty.");
        return None;
    }

    if !Path::new(filename).exists() {
        println!("File does not exist.");
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Loading...");
    thread::sleep(Duration::from_millis(300));

    match Library::load_from_file(filename) {
        Ok(loaded) => {
            println!("Library loaded from {} successfully!", filename);
            Some(loaded)
        }
        Err(e) => {
            println!("Error loading file: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn menu_dispatch_accepts_exact_literals_only() {
        assert_eq!(parse_menu_choice("1"), Some(MenuChoice::Add));
        assert_eq!(parse_menu_choice("2"), Some(MenuChoice::Remove));
        assert_eq!(parse_menu_choice("3"), Some(MenuChoice::Search));
        assert_eq!(parse_menu_choice("4"), Some(MenuChoice::Display));
        assert_eq!(parse_menu_choice("5"), Some(MenuChoice::Toggle));
        assert_eq!(parse_menu_choice("6"), Some(MenuChoice::Statistics));
        assert_eq!(parse_menu_choice("7"), Some(MenuChoice::Save));
        assert_eq!(parse_menu_choice("8"), Some(MenuChoice::Load));
        assert_eq!(parse_menu_choice("9"), Some(MenuChoice::Exit));
        // Dispatch compares text, not parsed numbers.
        assert_eq!(parse_menu_choice("01"), None);
        assert_eq!(parse_menu_choice("1.0"), None);
        assert_eq!(parse_menu_choice("ten"), None);
        assert_eq!(parse_menu_choice(""), None);
    }

    #[test]
    fn year_input_accepts_digits_only() {
        assert_eq!(parse_year_input("1965"), Some(1965));
        assert_eq!(parse_year_input("0"), Some(0));
        assert_eq!(parse_year_input(""), None);
        assert_eq!(parse_year_input("-5"), None);
        assert_eq!(parse_year_input("19 65"), None);
        assert_eq!(parse_year_input("MCMLXV"), None);
        assert_eq!(parse_year_input("1965.0"), None);
    }

    #[test]
    fn year_input_rejects_values_too_large_for_the_type() {
        assert_eq!(parse_year_input("99999999999999999999"), None);
    }

    #[test]
    fn read_input_accepts_yes_or_no_case_insensitively() {
        assert_eq!(parse_read_input("yes"), Some(true));
        assert_eq!(parse_read_input("No"), Some(false));
        assert_eq!(parse_read_input("YES"), Some(true));
        assert_eq!(parse_read_input("y"), None);
        assert_eq!(parse_read_input("nope"), None);
        assert_eq!(parse_read_input(""), None);
    }

    #[test]
    fn choice_maps_one_based_onto_the_sequence() {
        assert_eq!(index_from_choice(1, 3), Some(0));
        assert_eq!(index_from_choice(3, 3), Some(2));
        assert_eq!(index_from_choice(0, 3), None);
        assert_eq!(index_from_choice(4, 3), None);
        assert_eq!(index_from_choice(-1, 3), None);
    }

    #[test]
    fn search_options_map_onto_the_five_fields() {
        assert_eq!(search_field_from_option(1), Some(SearchField::Title));
        assert_eq!(search_field_from_option(2), Some(SearchField::Author));
        assert_eq!(search_field_from_option(3), Some(SearchField::Genre));
        assert_eq!(search_field_from_option(4), Some(SearchField::Year));
        assert_eq!(search_field_from_option(5), Some(SearchField::ReadStatus));
    }

    #[test]
    fn search_options_outside_the_menu_match_no_field() {
        // Not an abort: the flow still asks for a term and then reports
        // that nothing matched.
        assert_eq!(search_field_from_option(0), None);
        assert_eq!(search_field_from_option(6), None);
        assert_eq!(search_field_from_option(-1), None);
    }

    #[test]
    fn book_lines_are_numbered_and_formatted() {
        let book = Book {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            year: 1965,
            genre: "Sci-Fi".to_string(),
            read: true,
        };
        assert_eq!(format_book_line(1, &book), "1. Dune by Herbert (1965) - Sci-Fi [Read]");

        let unread = Book { read: false, ..book };
        assert_eq!(
            format_book_line(2, &unread),
            "2. Dune by Herbert (1965) - Sci-Fi [Unread]"
        );
    }

    #[test]
    fn save_rejects_an_empty_filename_before_any_io() {
        assert!(!save_with_filename(&Library::new(), ""));
    }

    #[test]
    fn save_writes_the_named_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shelf.json");
        let path = path.to_str().unwrap();

        let mut library = Library::new();
        library.add(Book {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            year: 1965,
            genre: "Sci-Fi".to_string(),
            read: true,
        });
        assert!(save_with_filename(&library, path));

        let reloaded = load_with_filename(path).unwrap();
        assert_eq!(reloaded.books(), library.books());
    }

    #[test]
    fn load_keeps_the_current_collection_on_empty_filename() {
        assert!(load_with_filename("").is_none());
    }

    #[test]
    fn load_answers_none_for_a_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nowhere.json");
        assert!(load_with_filename(path.to_str().unwrap()).is_none());
    }

    #[test]
    fn load_answers_none_for_a_file_that_does_not_parse() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_with_filename(path.to_str().unwrap()).is_none());
    }
}
