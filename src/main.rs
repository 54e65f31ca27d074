mod api;
mod app;
mod config;
mod fetch;
mod model;
mod pages;
mod shell;
mod ui;

use api::{ApiError, UnsplashClient};
use app::{App, InputMode, Route};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fetch::{Dispatcher, FetchMessage};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use pages::details::RELATED_LIMIT;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// TUI browser for Unsplash wallpapers
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Unsplash access key (overrides UNSPLASH_ACCESS_KEY and the config file)
    #[arg(long, global = true)]
    access_key: Option<String>,

    /// Base URL of the Unsplash API
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Where the TUI writes its log (default: the cache directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI browser (default)
    Run {
        /// Initial page, e.g. /categories or /showdetails/<id>
        #[arg(short, long, default_value = "/")]
        route: String,
    },
    /// Search photos and print id, title and author
    Search {
        query: String,
        #[arg(short = 'n', long, default_value_t = pages::search::SEARCH_PAGE_SIZE)]
        per_page: u32,
    },
    /// Print one photo's details and its related photos
    Show { id: String },
    /// List topics
    Topics {
        #[arg(short = 'n', long, default_value_t = pages::categories::TOPIC_PAGE_SIZE)]
        per_page: u32,
    },
    /// Register a download and save the photo
    Download {
        id: String,
        /// Output file (default: <id>.jpg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run {
        route: "/".to_string(),
    });

    match &command {
        Commands::Run { .. } => {
            let path = cli.log_file.clone().unwrap_or_else(default_log_path);
            init_file_logging(&path)?;
        }
        _ => init_stderr_logging(),
    }

    let overrides = config::Overrides {
        access_key: cli.access_key,
        api_url: cli.api_url,
    };
    let config = match config::Config::load(overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };
    let client = match UnsplashClient::new(&config.api_url, &config.access_key) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };

    match command {
        Commands::Run { route } => {
            let initial = Route::parse_or_home(&route);
            info!(path = %initial.path(), "Starting");
            let mut app = App::new(initial);
            let (dispatcher, rx) = Dispatcher::new(client);

            // Init terminal
            let mut terminal = ratatui::init();

            // Main loop
            let result = run_app(&mut terminal, &mut app, &dispatcher, rx);

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                error!(error = %e, "Terminal loop failed");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Search { query, per_page } => {
            exit_on_api_error(print_search(&client, &query, per_page).await);
        }
        Commands::Show { id } => {
            exit_on_api_error(print_photo(&client, &id).await);
        }
        Commands::Topics { per_page } => {
            exit_on_api_error(print_topics(&client, per_page).await);
        }
        Commands::Download { id, output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.jpg", id)));
            let url = match client.resolve_download_url(&id).await {
                Ok(url) => url,
                Err(e) => {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            };
            eprintln!("Downloading {} -> {} ...", id, output.display());
            download_photo(&url, &output).await?;
            eprintln!("Done.");
        }
    }

    Ok(())
}

fn default_log_path() -> PathBuf {
    config::project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir)
        .join("wallpaper-explorer.log")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The terminal belongs to ratatui while the TUI runs, so logs go to a file.
fn init_file_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn init_stderr_logging() {
    fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

fn run_app<S: api::PhotoSource>(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    dispatcher: &Dispatcher<S>,
    mut rx: UnboundedReceiver<FetchMessage>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        dispatcher.dispatch_all(app.take_requests());
        for url in app.take_links() {
            app.status_msg = match open_link(&url) {
                Ok(()) => format!("Opening: {}", url),
                Err(e) => {
                    warn!(error = %e, "No opener available");
                    format!("Download ready: {} (could not open: {})", url, e)
                }
            };
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 100ms timeout so fetch results show promptly
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        loop {
            match rx.try_recv() {
                Ok(message) => app.handle_message(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode == InputMode::Searching {
        handle_search_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('/') => app.input_mode = InputMode::Searching,
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            app.open_menu(index);
        }
        KeyCode::Esc | KeyCode::Backspace => app.back(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Home | KeyCode::Char('g') => app.selected = 0,
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('f') => app.toggle_favourite_selected(),
        KeyCode::Char('x') => app.remove_favourite_selected(),
        KeyCode::Char('d') => app.download_selected(),
        KeyCode::Tab | KeyCode::Char('l') => app.next_tab(),
        KeyCode::BackTab | KeyCode::Char('h') => app.prev_tab(),
        KeyCode::Char('r') => app.change_wallpaper(),
        KeyCode::Char('a') => app.toggle_auto_change(),
        KeyCode::Char('t') => app.toggle_two_factor(),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_search(),
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => app.shell.pop(),
        KeyCode::Char(c) => app.shell.push(c),
        _ => {}
    }
}

/// Hand a URL to the platform opener.
fn open_link(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = std::process::Command::new("open");
        c.arg(url);
        c
    };
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut c = std::process::Command::new("xdg-open");
        c.arg(url);
        c
    };

    command
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map(|_| ())
}

fn exit_on_api_error(result: Result<(), ApiError>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e.user_message());
        if e.is_retryable() {
            eprintln!("This may be temporary; try again shortly.");
        }
        std::process::exit(1);
    }
}

async fn print_search(client: &UnsplashClient, query: &str, per_page: u32) -> Result<(), ApiError> {
    let photos = client.search_photos(query, per_page).await?.into_result()?;
    if photos.is_empty() {
        eprintln!("No wallpapers found for \"{}\"", query.trim());
    }
    for photo in photos {
        println!(
            "{}\t{}\t{}",
            photo.id,
            ui::truncate_str(photo.title(), 60),
            photo.user.name
        );
    }
    Ok(())
}

async fn print_photo(client: &UnsplashClient, id: &str) -> Result<(), ApiError> {
    let (photo, related) = tokio::join!(
        client.get_photo(id),
        client.get_related_photos(id, RELATED_LIMIT)
    );
    let photo = photo?;
    let related = related.and_then(|listing| listing.into_result()).unwrap_or_else(|e| {
        warn!(error = %e, "Related photos unavailable");
        Vec::new()
    });

    println!("{}", photo.title());
    println!("  by {} (@{})", photo.user.name, photo.user.username);
    println!("  {}  {} likes", photo.dimensions(), photo.likes);
    if let Some(downloads) = photo.downloads {
        println!("  {} downloads", downloads);
    }
    println!("  {}", photo.caption());
    let tags: Vec<&str> = photo
        .tags
        .iter()
        .take(pages::details::TAG_LIMIT)
        .map(|t| t.title.as_str())
        .collect();
    if !tags.is_empty() {
        println!("  tags: {}", tags.join(", "));
    }
    if !related.is_empty() {
        println!("related:");
        for photo in related {
            println!("  {}\t{}", photo.id, ui::truncate_str(photo.short_title(), 60));
        }
    }
    Ok(())
}

async fn print_topics(client: &UnsplashClient, per_page: u32) -> Result<(), ApiError> {
    for topic in client.list_topics(per_page).await?.into_result()? {
        println!("{}\t{}\t{} photos", topic.id, topic.title, topic.total_photos);
    }
    Ok(())
}

async fn download_photo(url: &str, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let response = reqwest::get(url).await?.error_for_status()?;

    let pb = match response.content_length() {
        Some(total_size) => {
            let pb = ProgressBar::new(total_size);
            pb.set_style(ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
                .progress_chars("#>-"));
            pb
        }
        None => ProgressBar::new_spinner(),
    };

    let mut file = std::fs::File::create(output)?;
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(item) = stream.next().await {
        let chunk = item?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    pb.finish_with_message("Download complete");
    Ok(())
}
