//! `quill` — manage a self-hosted microblog from the terminal.
//!
//! Thin presentation layer over [`quill_session::SessionState`]: every
//! subcommand maps onto one session operation, renders the resulting
//! snapshot, and surfaces errors as plain text. No sync logic lives here.

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use quill_client::StoreClientFactory;
use quill_session::{ConfigurationStore, KeyringVault, SessionState, DEFAULT_PORT};
use quill_types::{Comment, Post};

#[derive(Parser, Debug)]
#[clap(name = "quill", version, about = "Sync client for a self-hosted quill server")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(long, short, default_value = "warn", help = "Log level filter")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Save the server address and API key for this device
    Configure {
        #[clap(long, help = "Server hostname or IP")]
        host: String,

        #[clap(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        #[clap(long, help = "API key issued by the server")]
        api_key: String,
    },
    /// Forget the saved server address and API key
    Disconnect,
    /// Show whether this device is connected to a server
    Status,
    /// Work with posts
    Posts {
        #[clap(subcommand)]
        action: PostCommands,
    },
    /// Work with comments
    Comments {
        #[clap(subcommand)]
        action: CommentCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PostCommands {
    /// List posts in server order
    List {
        #[clap(long, default_value_t = 1)]
        page: u32,

        #[clap(long, default_value_t = 20)]
        limit: u32,
    },
    /// Show one post
    Show { id: i64 },
    /// Publish a new post (at most 280 characters after trimming)
    Create { content: String },
    /// Delete a post
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum CommentCommands {
    /// List comments awaiting moderation across all posts
    Pending,
    /// List every comment on one post
    ForPost { post_id: i64 },
    /// Approve a pending comment
    Approve { id: i64 },
    /// Delete a comment
    Delete { id: i64 },
}

fn format_time(epoch_millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| epoch_millis.to_string())
}

fn print_post(post: &Post) {
    let visibility = if post.published { "published" } else { "draft" };
    println!(
        "#{:<6} {}  [{}] ({} comments)\n    {}",
        post.id,
        format_time(post.created_at),
        visibility,
        post.comment_count,
        post.content
    );
}

fn print_comment(comment: &Comment) {
    let state = if comment.approved { "approved" } else { "pending" };
    println!(
        "#{:<6} on post {}  {}  [{}] {}\n    {}",
        comment.id,
        comment.post_id,
        format_time(comment.created_at),
        state,
        comment.author_name,
        comment.content
    );
}

async fn run(command: Commands, mut session: SessionState) -> Result<()> {
    match command {
        Commands::Configure {
            host,
            port,
            api_key,
        } => {
            session.save_configuration(&host, port, &api_key)?;
            if session.configured() {
                println!("Connected to {}:{}", session.host(), session.port());
            } else {
                println!("Configuration saved, but host or API key is empty");
            }
        }
        Commands::Disconnect => {
            session.clear_configuration()?;
            println!("Disconnected; saved address and API key removed");
        }
        Commands::Status => {
            if session.configured() {
                println!("Connected to {}:{}", session.host(), session.port());
            } else {
                println!("Not configured; run `quill configure`");
            }
        }
        Commands::Posts { action } => match action {
            PostCommands::List { page, limit } => {
                let total = session.load_posts(page, limit).await?;
                for post in session.posts() {
                    print_post(post);
                }
                println!("{} of {} posts", session.posts().len(), total);
            }
            PostCommands::Show { id } => {
                let post = session.get_post(id).await?;
                print_post(&post);
            }
            PostCommands::Create { content } => {
                let post = session.create_post(&content).await?;
                println!("Created post #{}", post.id);
            }
            PostCommands::Delete { id } => {
                session.delete_post(id).await?;
                println!("Deleted post #{}", id);
            }
        },
        Commands::Comments { action } => match action {
            CommentCommands::Pending => {
                session.load_pending_comments().await?;
                if session.comments().is_empty() {
                    println!("No comments awaiting moderation");
                }
                for comment in session.comments() {
                    print_comment(comment);
                }
            }
            CommentCommands::ForPost { post_id } => {
                session.load_post_comments(post_id).await?;
                for comment in session.comments() {
                    print_comment(comment);
                }
            }
            CommentCommands::Approve { id } => {
                let comment = session.approve_comment(id).await?;
                println!("Approved comment #{}", comment.id);
            }
            CommentCommands::Delete { id } => {
                session.delete_comment(id).await?;
                println!("Deleted comment #{}", id);
            }
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli.log_level.parse().unwrap_or(LevelFilter::Warn);
    env_logger::Builder::new().filter_level(level).init();

    let session = SessionState::initialize(
        ConfigurationStore::new()?,
        Box::new(KeyringVault::new()),
        StoreClientFactory::create_http_client(),
    );

    run(cli.command, session).await
}
