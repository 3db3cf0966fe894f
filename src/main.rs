use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use katube::catalog::CatalogDirectory;
use katube::model::{Item, ItemIndex, MoveOutcome};
use katube::player::{PageView, DEFAULT_APP_NAME};
use katube::store::FileStore;
use katube::{Player, PlayerConfig};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "katube")]
#[command(about = "Manage playlists of a personal video catalog", long_about = None)]
struct Args {
    /// Path to the playlist store
    #[arg(short = 's', long, default_value = "~/.local/share/katube/store.json")]
    store: String,

    /// Catalog root (contains summary/ and data/)
    #[arg(short = 'c', long, default_value = ".")]
    catalog: String,

    /// Application id used as storage key prefix
    #[arg(long, default_value = DEFAULT_APP_NAME)]
    app: String,

    /// Plays per page
    #[arg(long, default_value = "20")]
    page_size: usize,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List playlists
    List,

    /// Create a playlist
    Create { name: String },

    /// Remove a playlist and its plays
    Remove { index: ItemIndex },

    /// Move a playlist (absolute: 0 = top, -1 = bottom)
    Move {
        index: ItemIndex,
        #[arg(allow_negative_numbers = true)]
        shift: i64,
        /// Shift relative to the current position
        #[arg(short = 'r', long)]
        relative: bool,
    },

    /// Show one page of a playlist
    Show {
        index: ItemIndex,
        /// Page to show, starting at 1
        #[arg(short = 'p', long, default_value = "1")]
        page: usize,
    },

    /// Add a play to a playlist
    Add { playlist: ItemIndex, play: String },

    /// Remove a play from a playlist
    RemovePlay { playlist: ItemIndex, index: ItemIndex },

    /// Move a play within a playlist
    MovePlay {
        playlist: ItemIndex,
        index: ItemIndex,
        #[arg(allow_negative_numbers = true)]
        shift: i64,
        #[arg(short = 'r', long)]
        relative: bool,
    },

    /// Print the play following a play, wrapping to the start
    Next { playlist: ItemIndex, index: ItemIndex },

    /// Search the catalog by tags
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        /// Page to show, starting at 1
        #[arg(short = 'p', long, default_value = "1")]
        page: usize,
    },

    /// Remove every playlist
    Clear,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in paths
    let store_path = PathBuf::from(shellexpand::tilde(&args.store).as_ref());
    let catalog_root = PathBuf::from(shellexpand::tilde(&args.catalog).as_ref());

    let store = FileStore::open(&store_path)
        .with_context(|| format!("Failed to open playlist store: {:?}", store_path))?;
    let catalog = CatalogDirectory::new(catalog_root);
    let config = PlayerConfig::new(args.app).with_page_size(args.page_size);

    let mut player = Player::new(config, Rc::new(store), catalog);

    match args.command {
        Command::List => {
            for playlist in player.playlists().iter() {
                println!(
                    "{:>4}  {} ({} plays)",
                    index_label(playlist.index()),
                    playlist.name(),
                    playlist.len()
                );
            }
        }

        Command::Create { name } => match player.create_playlist(&name) {
            Some(playlist) => println!(
                "Created {:?} at index {}",
                playlist.name(),
                index_label(playlist.index())
            ),
            None => bail!("Playlist name {:?} is empty or already used", name),
        },

        Command::Remove { index } => match player.remove_playlist(index) {
            Some(position) => println!("Removed playlist at position {}", position + 1),
            None => bail!("No playlist with index {}", index),
        },

        Command::Move {
            index,
            shift,
            relative,
        } => report_move(player.move_playlist(index, shift, relative), "playlist", index)?,

        Command::Show { index, page } => {
            if !player.select_playlist(index) {
                bail!("No playlist with index {}", index);
            }
            if !player.load_page(page_number(page)?) {
                bail!("Page {} does not exist", page);
            }
            if let Some(view) = player.page_view() {
                print_page(&view);
            }
        }

        Command::Add { playlist, play } => match player.add_play(playlist, &play) {
            Some(added) => println!("Added {:?} at index {}", added.name(), index_label(added.index())),
            None => bail!("No playlist with index {}", playlist),
        },

        Command::RemovePlay { playlist, index } => {
            select(&mut player, playlist)?;
            match player.remove_play(index) {
                Some(position) => println!("Removed play at position {}", position + 1),
                None => bail!("No play with index {}", index),
            }
        }

        Command::MovePlay {
            playlist,
            index,
            shift,
            relative,
        } => {
            select(&mut player, playlist)?;
            report_move(player.move_play(index, shift, relative), "play", index)?;
        }

        Command::Next { playlist, index } => {
            select(&mut player, playlist)?;
            if player.play(index).is_none() {
                bail!("No play with index {}", index);
            }
            if let Some(next) = player.next_play(index) {
                println!("{}  {}", index_label(next.index()), next.name());
            }
        }

        Command::Search { query, page } => {
            player.load_dictionary();
            player.search(&query.join(" "));
            if player.search_result().is_empty() {
                println!("No results");
                return Ok(());
            }
            if !player.load_page(page_number(page)?) {
                bail!("Page {} does not exist", page);
            }
            if let Some(view) = player.page_view() {
                print_page(&view);
            }
        }

        Command::Clear => {
            player.clear_all();
            println!("All playlists removed");
        }
    }

    Ok(())
}

fn select(player: &mut Player<CatalogDirectory>, index: ItemIndex) -> Result<()> {
    if !player.select_playlist(index) {
        bail!("No playlist with index {}", index);
    }
    Ok(())
}

fn report_move(outcome: MoveOutcome, what: &str, index: ItemIndex) -> Result<()> {
    let Some(position) = outcome.position() else {
        bail!("No {} with index {}", what, index);
    };

    if outcome.is_moved() {
        println!("Moved {} to position {}", what, position + 1);
    } else {
        println!("{} stays at position {}", what, position + 1);
    }
    Ok(())
}

/// Convert a 1-based page argument to a page number
fn page_number(page: usize) -> Result<usize> {
    match page.checked_sub(1) {
        Some(number) => Ok(number),
        None => bail!("Pages are numbered from 1"),
    }
}

fn index_label(index: Option<ItemIndex>) -> String {
    index.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_page(view: &PageView<'_>) {
    let name = view.playlist.name();
    if !name.is_empty() {
        println!("== {} ==", name);
    }

    for entry in &view.plays {
        println!(
            "[{}] {:>4}  {}",
            entry.position + 1,
            index_label(entry.play.index()),
            entry.play.name()
        );

        if let Some(summary) = &entry.summary {
            println!("        {}", summary.title);
            for principal in &summary.principal_array {
                println!("        {}", principal);
            }
            println!("        {} ({})", summary.media_path(), summary.mime_type);
        }
    }

    println!("Page {}/{}", view.page_number + 1, view.page_count.max(1));
}
