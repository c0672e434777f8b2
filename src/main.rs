use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snooze::api::NewStory;
use snooze::app::App;
use snooze::config::Config;
use snooze::credentials::Credentials;
use snooze::story::Story;

#[derive(Parser)]
#[command(name = "snooze", about = "Command-line client for the Hack or Snooze story API")]
struct Cli {
    /// Path to the config file
    #[arg(long, default_value = "snooze.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the front page
    Stories,
    /// Create an account and log in
    Signup {
        username: String,
        password: String,
        /// Display name
        name: String,
    },
    /// Log in and remember the session
    Login { username: String, password: String },
    /// Forget the saved session
    Logout,
    /// Submit a new story
    Submit {
        title: String,
        author: String,
        url: String,
    },
    /// Favorite a story, or unfavorite it if it already is one
    Favorite { story_id: String },
    /// Delete one of your stories
    Delete { story_id: String },
    /// Show your favorite stories
    Favorites,
    /// Show the stories you submitted
    Mine,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snooze=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;
    let mut app = App::new(&config);

    match cli.command {
        Command::Stories => {
            restore_saved_session(&mut app, &config).await?;
            let count = app.fetch_front_page().await?;
            if count == 0 {
                println!("No stories yet.");
            }
            let session = app.auth.session();
            for (index, story) in app.store.front_page().enumerate() {
                let favorite = session.is_some_and(|s| s.is_favorite(&story.story_id));
                let owned = session.is_some_and(|s| s.owns(&story.story_id));
                print_story(index + 1, story, favorite, owned);
            }
        }

        Command::Signup {
            username,
            password,
            name,
        } => {
            app.signup(&username, &password, &name).await?;
            save_session(&app, &config)?;
            println!("Welcome, {name}! You are signed up and logged in.");
        }

        Command::Login { username, password } => {
            app.login(&username, &password).await?;
            save_session(&app, &config)?;
            println!("Logged in as {username}.");
        }

        Command::Logout => {
            Credentials::clear(&config.credentials_file)?;
            app.logout();
            println!("Logged out.");
        }

        Command::Submit { title, author, url } => {
            require_saved_session(&mut app, &config).await?;
            let Some(mut signed) = app.signed_in() else {
                bail!("not logged in; run `snooze login` first");
            };
            let story = signed
                .submit_story(&NewStory { author, title, url })
                .await?;
            println!("Story submitted: {}", story.story_id);
        }

        Command::Favorite { story_id } => {
            require_saved_session(&mut app, &config).await?;
            let Some(mut signed) = app.signed_in() else {
                bail!("not logged in; run `snooze login` first");
            };
            if signed.toggle_favorite(&story_id).await? {
                println!("Favorited {story_id}.");
            } else {
                println!("Unfavorited {story_id}.");
            }
        }

        Command::Delete { story_id } => {
            require_saved_session(&mut app, &config).await?;
            let Some(mut signed) = app.signed_in() else {
                bail!("not logged in; run `snooze login` first");
            };
            signed.delete_story(&story_id).await?;
            println!("Deleted {story_id}.");
        }

        Command::Favorites => {
            require_saved_session(&mut app, &config).await?;
            let Some(signed) = app.signed_in() else {
                bail!("not logged in; run `snooze login` first");
            };
            let favorites = signed.favorites();
            if favorites.is_empty() {
                println!("No favorites yet.");
            }
            for (index, story) in favorites.iter().enumerate() {
                let owned = signed.session().owns(&story.story_id);
                print_story(index + 1, story, true, owned);
            }
        }

        Command::Mine => {
            require_saved_session(&mut app, &config).await?;
            let Some(signed) = app.signed_in() else {
                bail!("not logged in; run `snooze login` first");
            };
            let own = signed.own_stories();
            if own.is_empty() {
                println!("You have not submitted any stories.");
            }
            for (index, story) in own.iter().enumerate() {
                let favorite = signed.session().is_favorite(&story.story_id);
                print_story(index + 1, story, favorite, true);
            }
        }
    }

    Ok(())
}

/// Try to restore a saved session; quietly stays anonymous when there is
/// none or the token has gone stale.
async fn restore_saved_session(app: &mut App, config: &Config) -> anyhow::Result<bool> {
    match Credentials::load(&config.credentials_file)? {
        Some(credentials) => Ok(app.restore_session(&credentials).await.is_some()),
        None => Ok(false),
    }
}

/// Like `restore_saved_session`, but a stale token is worth telling the
/// user about before an authenticated command fails less clearly.
async fn require_saved_session(app: &mut App, config: &Config) -> anyhow::Result<()> {
    let Some(credentials) = Credentials::load(&config.credentials_file)? else {
        return Ok(());
    };
    if app.restore_session(&credentials).await.is_none() {
        bail!("saved session is no longer valid; run `snooze login` again");
    }
    Ok(())
}

fn save_session(app: &App, config: &Config) -> anyhow::Result<()> {
    if let Some(session) = app.auth.session() {
        Credentials::new(&session.username, session.token()).save(&config.credentials_file)?;
    }
    Ok(())
}

fn print_story(index: usize, story: &Story, favorite: bool, owned: bool) {
    let star = if favorite { "*" } else { " " };
    let host = story
        .host_name()
        .unwrap_or_else(|_| "invalid url".to_string());
    let yours = if owned { " [yours]" } else { "" };
    println!(
        "{star} {index:>2}. {} ({host}) by {}, posted by {} [{}]{yours}",
        story.title, story.author, story.username, story.story_id
    );
}
