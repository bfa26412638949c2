mod store;

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use instagram_web::types::{Connection, UserNode};
use instagram_web::{ClientConfig, InstagramClient, POPULAR_TAGS};
use tracing_subscriber::EnvFilter;

use crate::store::SavedSession;

#[derive(Parser)]
#[command(name = "igweb", version, about = "Instagram web API client")]
struct Cli {
    /// Enable debug logging (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Request timeout in seconds (0 disables it)
    #[arg(long, global = true, default_value = "30", value_name = "SECS")]
    timeout: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and save the session cookies
    Login {
        username: String,
        #[arg(short, long, env = "IG_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Save a cookie string copied from a browser instead of logging in
    Import {
        /// e.g. "csrftoken=...; ds_user_id=...; sessionid=..."
        cookies: String,
    },
    /// Clear the saved session
    Logout,
    /// Show the logged-in user id
    Whoami,
    /// Print the saved cookie string
    Cookies,
    /// Fetch the home query for the logged-in user
    Home,
    /// List recent posts for a hashtag
    Tag {
        /// Hashtag without `#`
        name: String,
        /// Cursor from a previous page
        #[arg(long)]
        after: Option<String>,
    },
    /// List followers (of the logged-in user unless `--user` is given)
    Followers {
        #[arg(short, long)]
        user: Option<String>,
        #[arg(long)]
        after: Option<String>,
    },
    /// List followed accounts (of the logged-in user unless `--user` is given)
    Following {
        #[arg(short, long)]
        user: Option<String>,
        #[arg(long)]
        after: Option<String>,
    },
    /// Like a post by media id
    Like { media_id: String },
    /// Print the built-in popular hashtags
    Tags,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ClientConfig::default().with_timeout(match cli.timeout {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    });

    match cli.command {
        Command::Login { username, password } => cmd_login(&username, &password, config),
        Command::Import { cookies } => cmd_import(&cookies, config),
        Command::Logout => cmd_logout(),
        Command::Whoami => cmd_whoami(config),
        Command::Cookies => cmd_cookies(),
        Command::Home => with_client(config, |client| {
            let home = client.home_feed()?;
            print_user(&home.user);
            Ok(())
        }),
        Command::Tag { name, after } => with_client(config, |client| {
            let feed = client.tag_feed(&name, after.as_deref())?;
            println!("#{}\n", feed.name);
            for m in feed.media.nodes() {
                println!("  [{}] https://www.instagram.com/p/{}/", m.id, m.shortcode);
            }
            print_cursor(feed.media.next_cursor());
            Ok(())
        }),
        Command::Followers { user, after } => with_client(config, |client| {
            let page = match user {
                Some(id) => client.followers(&id, after.as_deref())?,
                None => client.my_followers(after.as_deref())?,
            };
            print_users(&page);
            Ok(())
        }),
        Command::Following { user, after } => with_client(config, |client| {
            let page = match user {
                Some(id) => client.following(&id, after.as_deref())?,
                None => client.my_following(after.as_deref())?,
            };
            print_users(&page);
            Ok(())
        }),
        Command::Like { media_id } => with_client(config, |client| {
            let status = client.like(&media_id)?;
            println!("Like {media_id}: {}", status.status);
            Ok(())
        }),
        Command::Tags => {
            for tag in POPULAR_TAGS {
                println!("{tag}");
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Resume the saved session, run `f`, then save the (possibly rotated)
/// cookies back even if `f` failed.
fn with_client<F>(config: ClientConfig, f: F) -> Result<()>
where
    F: FnOnce(&mut InstagramClient) -> instagram_web::Result<()>,
{
    let saved = SavedSession::load()?;
    let cookies = saved
        .cookies
        .filter(|c| !c.is_empty())
        .context("not logged in; run `igweb login <username>` first")?;
    let mut client = InstagramClient::from_cookies(&cookies, config)?;
    let outcome = f(&mut client);
    persist(&client)?;
    Ok(outcome?)
}

fn persist(client: &InstagramClient) -> Result<()> {
    SavedSession {
        cookies: Some(client.cookie_string()),
    }
    .save()
}

// ── session ──

fn cmd_login(username: &str, password: &str, config: ClientConfig) -> Result<()> {
    let client = InstagramClient::login(username, password, config)
        .with_context(|| format!("login as {username} failed"))?;
    persist(&client)?;
    println!(
        "Logged in as {username} (id={}).",
        client.user_id().unwrap_or("?")
    );
    Ok(())
}

fn cmd_import(cookies: &str, config: ClientConfig) -> Result<()> {
    let client = InstagramClient::from_cookies(cookies, config)?;
    if !client.is_authenticated() {
        bail!("cookie string needs both csrftoken and ds_user_id");
    }
    persist(&client)?;
    println!("Session saved (id={}).", client.user_id().unwrap_or("?"));
    Ok(())
}

fn cmd_logout() -> Result<()> {
    SavedSession::clear()?;
    println!("Session cleared.");
    Ok(())
}

fn cmd_whoami(config: ClientConfig) -> Result<()> {
    let saved = SavedSession::load()?;
    let Some(cookies) = saved.cookies.filter(|c| !c.is_empty()) else {
        println!("Not logged in.");
        return Ok(());
    };
    let client = InstagramClient::from_cookies(&cookies, config)?;
    match client.user_id() {
        Some(id) => println!("User id: {id}"),
        None => println!("Session has no ds_user_id cookie."),
    }
    Ok(())
}

fn cmd_cookies() -> Result<()> {
    let saved = SavedSession::load()?;
    println!("{}", saved.cookies.unwrap_or_default());
    Ok(())
}

// ── output ──

fn print_user(u: &UserNode) {
    println!("User:   {} (id={})", u.username, u.id);
    if !u.profile_pic_url.is_empty() {
        println!("Avatar: {}", u.profile_pic_url);
    }
}

fn print_users(page: &Connection<UserNode>) {
    if let Some(count) = page.count {
        println!("Total: {count}\n");
    }
    for u in page.nodes() {
        println!("  [{}] {}", u.id, u.username);
    }
    print_cursor(page.next_cursor());
}

fn print_cursor(cursor: Option<&str>) {
    if let Some(cursor) = cursor {
        println!("\nNext page: --after {cursor}");
    }
}
