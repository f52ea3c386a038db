//! Command-line front end for the book tracker. It resolves the database
//! location, opens the store, and maps each subcommand onto repository,
//! catalog, and filter calls.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use book_tracker::cover::{read_cover_file, write_cover_file};
use book_tracker::{
    validate, Book, BookFilter, BookRepository, Catalog, Config, GenreSelector, RawBookFields,
    SqliteBookRepository, Store, TrackerError,
};

#[derive(Parser)]
#[command(name = "book-tracker")]
#[command(author, version, about = "Track the books you own and read", long_about = None)]
struct Cli {
    /// SQLite database file (defaults to $BOOK_TRACKER_DB or ~/.book-tracker/books.sqlite)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books, optionally filtered by text and genre
    List {
        /// Case-insensitive text matched against title and author
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only show books tagged with exactly this genre
        #[arg(short, long)]
        genre: Option<String>,
    },

    /// List the genres used across the library
    Genres {
        /// Include the preset genres offered when tagging a book
        #[arg(long)]
        selectable: bool,
    },

    /// Show every field of one book
    Show { id: i64 },

    /// Add a new book
    Add(BookArgs),

    /// Edit an existing book; omitted fields keep their current value
    Edit {
        id: i64,

        #[command(flatten)]
        fields: BookArgs,

        /// Remove the stored cover image
        #[arg(long, conflicts_with = "cover")]
        clear_cover: bool,
    },

    /// Delete a book
    Delete { id: i64 },

    /// Write a book's cover image to a file
    ExportCover { id: i64, output: PathBuf },
}

#[derive(Args, Default)]
struct BookArgs {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    author: Option<String>,

    #[arg(long)]
    year: Option<String>,

    #[arg(long)]
    pages: Option<String>,

    /// Rating from 0 to 10
    #[arg(long)]
    rating: Option<String>,

    /// Last page read
    #[arg(long)]
    current_page: Option<String>,

    /// Genre to tag the book with (repeatable); replaces existing genres on edit
    #[arg(long = "genre")]
    genres: Vec<String>,

    /// Image file to store as the cover
    #[arg(long)]
    cover: Option<PathBuf>,
}

impl BookArgs {
    /// Overlay the provided flags onto `base`.
    fn apply_to(self, mut base: RawBookFields) -> Result<RawBookFields> {
        if let Some(title) = self.title {
            base.title = title;
        }
        if let Some(author) = self.author {
            base.author = author;
        }
        if let Some(year) = self.year {
            base.year = year;
        }
        if let Some(pages) = self.pages {
            base.pages = pages;
        }
        if let Some(rating) = self.rating {
            base.rating = rating;
        }
        if let Some(current_page) = self.current_page {
            base.current_page = current_page;
        }
        if !self.genres.is_empty() {
            base.genres = self.genres;
        }
        if let Some(path) = self.cover {
            base.cover = Some(read_cover_file(&path)?);
        }
        Ok(base)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::resolve(cli.db).context("failed to resolve database location")?;
    let store = Store::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let repo = SqliteBookRepository::new(store);

    match cli.command {
        Commands::List { search, genre } => list(&repo, search, genre.into()),
        Commands::Genres { selectable } => genres(&repo, selectable),
        Commands::Show { id } => show(&repo, id),
        Commands::Add(fields) => add(&repo, fields),
        Commands::Edit {
            id,
            fields,
            clear_cover,
        } => edit(&repo, id, fields, clear_cover),
        Commands::Delete { id } => delete(&repo, id),
        Commands::ExportCover { id, output } => export_cover(&repo, id, &output),
    }
}

/// Library logs go to stderr so listings on stdout stay clean. `RUST_LOG`
/// overrides the defaults.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "book_tracker=debug"
    } else {
        "book_tracker=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn list(repo: &impl BookRepository, search: String, genre: GenreSelector) -> Result<()> {
    let catalog = Catalog::load(repo)?;
    let visible = catalog.filter(&BookFilter::new(search, genre));

    if visible.is_empty() {
        println!("No books found.");
        return Ok(());
    }

    for book in visible {
        println!(
            "{}\t{}\t{}\t{}\t{}%\t{}",
            book.id(),
            book.title(),
            book.author(),
            book.year(),
            book.progress_percent(),
            book.genres()
        );
    }
    Ok(())
}

fn genres(repo: &impl BookRepository, selectable: bool) -> Result<()> {
    let genres = if selectable {
        Catalog::load(repo)?.genres().selectable()
    } else {
        repo.list_genres()?
    };

    for genre in genres {
        println!("{genre}");
    }
    Ok(())
}

fn find_book(repo: &impl BookRepository, id: i64) -> Result<Book> {
    let catalog = Catalog::load(repo)?;
    let book = catalog.get(id).cloned().ok_or(TrackerError::NotFound(id))?;
    Ok(book)
}

fn show(repo: &impl BookRepository, id: i64) -> Result<()> {
    let book = find_book(repo, id)?;

    println!("Id:           {}", book.id());
    println!("Title:        {}", book.title());
    println!("Author:       {}", book.author());
    println!("Year:         {}", book.year());
    println!("Pages:        {}", book.pages());
    println!("Rating:       {}", book.rating());
    println!("Genres:       {}", book.genres());
    println!(
        "Progress:     page {} of {} ({}%)",
        book.current_page(),
        book.pages(),
        book.progress_percent()
    );
    match book.cover() {
        Some(bytes) => println!("Cover:        {} bytes", bytes.len()),
        None => println!("Cover:        none"),
    }
    Ok(())
}

fn add(repo: &impl BookRepository, fields: BookArgs) -> Result<()> {
    let base = RawBookFields {
        current_page: "0".to_string(),
        ..RawBookFields::default()
    };
    let raw = fields.apply_to(base)?;
    let draft = validate(&raw).map_err(TrackerError::from)?;

    let book = repo.insert(draft)?;
    println!("Added book {}: {}", book.id(), book);
    Ok(())
}

fn edit(repo: &impl BookRepository, id: i64, fields: BookArgs, clear_cover: bool) -> Result<()> {
    let existing = find_book(repo, id)?;
    let mut raw = fields.apply_to(RawBookFields::from_book(&existing))?;
    if clear_cover {
        raw.cover = None;
    }
    let draft = validate(&raw).map_err(TrackerError::from)?;

    let book = Book::from_draft(id, draft);
    repo.update(&book)?;
    println!("Updated book {}: {}", book.id(), book);
    Ok(())
}

fn delete(repo: &impl BookRepository, id: i64) -> Result<()> {
    if repo.delete(id)? {
        println!("Deleted book {id}");
    } else {
        println!("No book with id {id}");
    }
    Ok(())
}

fn export_cover(repo: &impl BookRepository, id: i64, output: &std::path::Path) -> Result<()> {
    let book = find_book(repo, id)?;
    let bytes = book
        .cover()
        .with_context(|| format!("book {id} has no cover"))?;

    write_cover_file(output, bytes)?;
    println!("Wrote {} bytes to {}", bytes.len(), output.display());
    Ok(())
}
