//! Interactive shell for the Librarium catalog.
//!
//! # Responsibility
//! - Collect raw command and field input, one command at a time.
//! - Render service results and report failures without crashing.
//! - Own process lifecycle: logging bootstrap, connection open/close.

use librarium_core::{
    default_log_level, init_logging, Book, DbManager, LibraryService, SqliteBookRepository,
};
use log::{error, info};
use std::io::{self, BufRead, Write};

const HELP_TEXT: &str = "Available commands:
    add     - add a book
    get     - look up a book by title
    getall  - list all available books
    update  - change a book's status
    delete  - remove a book
    help    - show this help
    exit    - quit";

fn main() {
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("librarium: {err}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), String> {
    let log_dir = std::env::current_dir()
        .map_err(|err| format!("cannot resolve working directory: {err}"))?
        .join("logs");
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| "log directory path is not valid UTF-8".to_string())?;
    init_logging(default_log_level(), log_dir)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let path = prompt(&mut lines, "Path to database: ")?;
    let path = normalize_db_path(&path);

    let mut manager = DbManager::new(&path);
    manager
        .open()
        .map_err(|err| format!("cannot open database `{path}`: {err}"))?;

    {
        let service = LibraryService::new(SqliteBookRepository::new(&manager));
        run_shell(&service, &mut lines)?;
    }

    manager.close();
    info!("event=app_exit module=cli status=ok");
    Ok(())
}

fn run_shell<R, L>(service: &LibraryService<R>, lines: &mut L) -> Result<(), String>
where
    R: librarium_core::BookRepository,
    L: Iterator<Item = io::Result<String>>,
{
    println!("Welcome to Librarium!");
    println!("Type 'help' for the command list.\n");

    loop {
        let Some(line) = next_line(lines, ">>> ")? else {
            // EOF behaves like exit.
            return Ok(());
        };
        let command = line.trim().to_lowercase();

        match command.as_str() {
            "" => continue,
            "help" | "?" => println!("{HELP_TEXT}\n"),
            "exit" => {
                println!("Goodbye.");
                return Ok(());
            }
            "add" | "get" | "getall" | "update" | "delete" => {
                if let Err(err) = dispatch(service, &command, lines) {
                    match err {
                        CommandError::Io(message) => return Err(message),
                        CommandError::Service(err) => {
                            error!("event=command_failed module=cli command={command} error={err}");
                            println!("The command failed, please check your input.\n");
                        }
                    }
                }
            }
            other => println!("Unknown command `{other}`. Type 'help' for the command list.\n"),
        }
    }
}

enum CommandError {
    Io(String),
    Service(librarium_core::ServiceError),
}

impl From<librarium_core::ServiceError> for CommandError {
    fn from(value: librarium_core::ServiceError) -> Self {
        Self::Service(value)
    }
}

fn dispatch<R, L>(service: &LibraryService<R>, command: &str, lines: &mut L) -> Result<(), CommandError>
where
    R: librarium_core::BookRepository,
    L: Iterator<Item = io::Result<String>>,
{
    match command {
        "add" => {
            let title = field(lines, "Title: ")?;
            let author = field(lines, "Author: ")?;
            let year = field(lines, "Year: ")?;
            service.add_book(&title, &author, &year)?;
            println!("Book added.\n");
        }
        "get" => {
            let title = field(lines, "Title: ")?;
            match service.get_book(&title)? {
                Some(book) => println!("{}\n", render_book(&book)),
                None => println!("Book not found or unavailable.\n"),
            }
        }
        "getall" => {
            let books = service.get_all_books()?;
            if books.is_empty() {
                println!("The library is empty.");
            } else {
                for book in &books {
                    println!("{}", render_book(book));
                }
            }
            println!();
        }
        "update" => {
            let title = field(lines, "Title: ")?;
            let status = field(lines, "New status: ")?;
            if service.update_status(&status, &title)? {
                println!("Status updated.\n");
            } else {
                println!("Book not found.\n");
            }
        }
        "delete" => {
            let title = field(lines, "Title: ")?;
            if service.delete_book(&title)? {
                println!("Book deleted.\n");
            } else {
                println!("Book not found.\n");
            }
        }
        _ => unreachable!("dispatch is only called for known commands"),
    }
    Ok(())
}

fn render_book(book: &Book) -> String {
    format!(
        "Book(id={}, title={}, author={}, year={}, status={})",
        book.id,
        book.title,
        book.author,
        book.year,
        book.status.as_label()
    )
}

/// Normalizes a user-supplied database location.
///
/// Strips one trailing `/` and appends the `.db` extension when missing.
fn normalize_db_path(path: &str) -> String {
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.ends_with(".db") {
        path.to_string()
    } else {
        format!("{path}.db")
    }
}

fn prompt<L>(lines: &mut L, text: &str) -> Result<String, String>
where
    L: Iterator<Item = io::Result<String>>,
{
    next_line(lines, text)?.ok_or_else(|| "unexpected end of input".to_string())
}

fn field<L>(lines: &mut L, text: &str) -> Result<String, CommandError>
where
    L: Iterator<Item = io::Result<String>>,
{
    next_line(lines, text)
        .map_err(CommandError::Io)?
        .ok_or_else(|| CommandError::Io("unexpected end of input".to_string()))
}

fn next_line<L>(lines: &mut L, text: &str) -> Result<Option<String>, String>
where
    L: Iterator<Item = io::Result<String>>,
{
    print!("{text}");
    io::stdout()
        .flush()
        .map_err(|err| format!("cannot flush stdout: {err}"))?;

    match lines.next() {
        Some(Ok(line)) => Ok(Some(line.trim().to_string())),
        Some(Err(err)) => Err(format!("cannot read input: {err}")),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_db_path;

    #[test]
    fn normalize_appends_db_extension() {
        assert_eq!(normalize_db_path("catalog"), "catalog.db");
        assert_eq!(normalize_db_path("data/catalog"), "data/catalog.db");
    }

    #[test]
    fn normalize_keeps_existing_extension() {
        assert_eq!(normalize_db_path("catalog.db"), "catalog.db");
    }

    #[test]
    fn normalize_strips_trailing_separator() {
        assert_eq!(normalize_db_path("catalog/"), "catalog.db");
        assert_eq!(normalize_db_path("catalog.db/"), "catalog.db");
    }
}
