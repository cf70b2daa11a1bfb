// Entrypoint for the CLI application.
// - Keeps `main` small: create the empty library and hand it to the UI loop.
// - Returns `anyhow::Result` so prompt I/O failures surface cleanly.

use library_manager_cli::{library::Library, ui::main_menu};

fn main() -> anyhow::Result<()> {
    // Every session starts from an empty collection; anything persisted
    // earlier only comes back through the load option in the menu.
    let library = Library::new();

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(library)?;
    Ok(())
}
