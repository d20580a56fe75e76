//! services/client/src/bin/forum.rs

use clap::{Parser, Subcommand, ValueEnum};
use client_lib::{
    config::Config,
    error::ClientError,
    views::{render, AppState, NotificationCenter, PostView, UnreadPoller},
};
use forum_client_core::domain::VoteDirection;
use forum_client_core::validation;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "forum")]
#[command(about = "Command-line client for the discussion forum", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and print the session token to export as FORUM_TOKEN
    Login {
        email: String,
        #[arg(long, env = "FORUM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List all topics
    Topics,
    /// List the posts of a topic
    Posts {
        topic: i64,
        /// Search text
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Print a post and its comment thread
    Thread { post: i64 },
    /// Reply to a comment
    Reply { post: i64, parent: i64, text: String },
    /// Comment on a post
    Comment { post: i64, text: String },
    /// Vote on a post; voting the same way again removes the vote
    Vote { post: i64, direction: Direction },
    /// List notifications
    Notifications {
        /// Mark everything read after listing
        #[arg(long)]
        all_read: bool,
    },
    /// Poll the unread count until Ctrl-C
    Watch,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
}

impl From<Direction> for VoteDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => VoteDirection::Up,
            Direction::Down => VoteDirection::Down,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!(api_url = %config.api_url, "Configuration loaded.");

    // --- 2. Wire the Ports ---
    let app = AppState::with_http(config)?;
    if !matches!(cli.command, Command::Login { .. }) {
        app.resume_session().await?;
    }

    // --- 3. Run the Command ---
    match cli.command {
        Command::Login { email, password } => {
            let request = validation::login(&email, &password)?;
            let auth = app.auth.login(&request).await?;
            println!("Logged in as {}.", auth.user.username);
            println!("export FORUM_TOKEN={}", auth.token);
        }
        Command::Topics => {
            for topic in app.topics.list_topics().await? {
                println!("#{} {} ({})", topic.id, topic.title, topic.creator.username);
            }
        }
        Command::Posts { topic, query } => {
            let posts = app.posts.list_posts(topic, query.as_deref()).await?;
            if posts.is_empty() {
                println!("No posts.");
            }
            for post in posts {
                println!(
                    "#{} [{:+}] {} ({})",
                    post.id, post.vote_count, post.title, post.creator.username
                );
            }
        }
        Command::Thread { post } => {
            let view = PostView::open(&app, post).await?;
            print_thread(&app, &view).await;
        }
        Command::Reply { post, parent, text } => {
            let view = PostView::open(&app, post).await?;
            let created = view.reply(parent, &text).await?;
            info!(comment_id = created.id, "Reply posted.");
            print_thread(&app, &view).await;
        }
        Command::Comment { post, text } => {
            let view = PostView::open(&app, post).await?;
            let created = view.add_comment(&text).await?;
            info!(comment_id = created.id, "Comment posted.");
            print_thread(&app, &view).await;
        }
        Command::Vote { post, direction } => {
            let view = PostView::open(&app, post).await?;
            if let Some(state) = view.vote().cast(direction.into()).await? {
                println!(
                    "Post #{} now at {:+} (your vote: {:+})",
                    post,
                    state.vote_count(),
                    i8::from(state.user_vote())
                );
            }
        }
        Command::Notifications { all_read } => {
            let center = NotificationCenter::new(app.notifications.clone(), app.config.page_size);
            center.refresh_unread().await?;
            center.load_first_page().await?;
            println!("Unread: {}", center.badge().await.unwrap_or_else(|| "0".to_string()));
            for notification in center.notifications().await {
                println!("{}", render::render_notification(&notification));
            }
            if all_read {
                center.mark_all_read().await;
                println!("All marked read.");
            }
        }
        Command::Watch => {
            let center = Arc::new(NotificationCenter::new(
                app.notifications.clone(),
                app.config.page_size,
            ));
            let poller = UnreadPoller::spawn(center.clone(), app.config.poll_interval);
            tokio::signal::ctrl_c().await?;
            poller.stop().await;
            println!("Unread: {}", center.unread_count().await);
        }
    }

    Ok(())
}

async fn print_thread(app: &AppState, view: &PostView) {
    print!("{}", render::render_post_header(&view.post().await));
    println!("{} comments", view.total_comments().await);
    print!("{}", render::render_tree(&view.tree().await, &app.session));
}
