#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for querying a mailbox database (read-only)

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use mailbox_query::{
    Contact, FolderThread, MailboxClient, SearchHit, StoreConfig, ThreadDetail, ThreadSummary,
    UserProfile,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mailbox-cli")]
#[command(about = "Read-only CLI for a threaded mailbox database")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create any missing tables in the database
    Init,

    /// List folders with their thread counts
    Folders,

    /// List the threads in a folder
    List {
        /// Folder name (any case, may be percent-encoded)
        folder: String,

        /// Maximum number of threads to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Search subjects, bodies and senders
    Search {
        /// Text to look for (case-insensitive)
        query: String,

        /// Maximum number of results
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Show a thread, only if it is filed in the given folder
    Show {
        /// Folder containing the thread
        folder: String,

        /// Thread id
        thread_id: String,
    },

    /// Print a full conversation, oldest email first
    Thread {
        /// Thread id
        thread_id: String,
    },

    /// List every user's name and address
    Contacts,

    /// Show a user's profile and recent threads
    Profile {
        /// User id
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = StoreConfig::from_env()?;
    let client = MailboxClient::open(&config)?;

    match &args.command {
        Command::Init => {
            client.store().initialize_schema().await?;
            println!("Schema ready at {}", config.path.display());
        }
        Command::Folders => cmd_folders(&client, &args).await?,
        Command::List { folder, limit } => {
            cmd_list(&client, &args, folder, *limit).await?;
        }
        Command::Search { query, limit } => {
            cmd_search(&client, &args, query, *limit).await?;
        }
        Command::Show { folder, thread_id } => {
            cmd_show(&client, &args, folder, thread_id).await?;
        }
        Command::Thread { thread_id } => {
            cmd_thread(&client, &args, thread_id).await?;
        }
        Command::Contacts => cmd_contacts(&client, &args).await?,
        Command::Profile { user_id } => {
            cmd_profile(&client, &args, user_id).await?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_folders(client: &MailboxClient, args: &Args) -> anyhow::Result<()> {
    let summary = client.folders_with_thread_count().await?;

    if args.json {
        return print_json(&summary);
    }

    if summary.is_empty() {
        println!("No folders found.");
        return Ok(());
    }

    for folder in summary.iter() {
        println!("{:<30} {}", folder.name, folder.thread_count);
    }

    Ok(())
}

async fn cmd_list(
    client: &MailboxClient,
    args: &Args,
    folder: &str,
    limit: usize,
) -> anyhow::Result<()> {
    let threads = client.threads_for_folder(folder).await?;
    let display: Vec<&FolderThread> = threads.iter().take(limit).collect();

    if args.json {
        return print_json(&display);
    }

    if display.is_empty() {
        println!("No threads found.");
        return Ok(());
    }

    println!("{:<8} {:<20} {:<30} {}", "ID", "Last activity", "From", "Subject");
    println!("{}", "-".repeat(100));

    for thread in &display {
        let from = thread
            .latest_email()
            .and_then(|email| email.sender.as_ref())
            .map_or_else(
                || "-".to_string(),
                |s| format!("{} {}", s.first_name, s.last_name),
            );
        println!(
            "{:<8} {:<20} {:<30} {}",
            thread.id,
            format_date(thread.last_activity_date),
            truncate(&from, 28),
            truncate(thread.subject.as_deref().unwrap_or("(no subject)"), 40),
        );
    }

    println!("\n{} thread(s)", display.len());
    Ok(())
}

async fn cmd_search(
    client: &MailboxClient,
    args: &Args,
    query: &str,
    limit: usize,
) -> anyhow::Result<()> {
    let hits = client.search_threads(Some(query)).await?;
    let display: Vec<&SearchHit> = hits.iter().take(limit).collect();

    if args.json {
        return print_json(&display);
    }

    if display.is_empty() {
        println!("No threads found.");
        return Ok(());
    }

    println!(
        "{:<8} {:<20} {:<12} {:<30} {}",
        "ID", "Last activity", "Folder", "From", "Subject"
    );
    println!("{}", "-".repeat(110));

    for hit in &display {
        let from = hit
            .latest_email
            .as_ref()
            .and_then(|email| email.sender.as_ref())
            .map_or_else(|| "-".to_string(), Contact::to_string);
        println!(
            "{:<8} {:<20} {:<12} {:<30} {}",
            hit.id,
            format_date(hit.last_activity_date),
            truncate(hit.folder_name.as_deref().unwrap_or("-"), 12),
            truncate(&from, 28),
            truncate(hit.subject.as_deref().unwrap_or("(no subject)"), 40),
        );
    }

    println!("\n{} thread(s)", display.len());
    Ok(())
}

async fn cmd_show(
    client: &MailboxClient,
    args: &Args,
    folder: &str,
    thread_id: &str,
) -> anyhow::Result<()> {
    let summary = client.thread_in_folder(folder, thread_id).await?;

    if args.json {
        return print_json(&summary);
    }

    match summary {
        Some(summary) => print_thread_summary(&summary),
        None => println!("Thread {thread_id} not found in {folder}."),
    }
    Ok(())
}

async fn cmd_thread(client: &MailboxClient, args: &Args, thread_id: &str) -> anyhow::Result<()> {
    let detail = client.emails_for_thread(thread_id).await?;

    if args.json {
        return print_json(&detail);
    }

    match detail {
        Some(detail) => print_conversation(&detail),
        None => println!("Thread {thread_id} not found."),
    }
    Ok(())
}

async fn cmd_contacts(client: &MailboxClient, args: &Args) -> anyhow::Result<()> {
    let contacts = client.all_email_addresses().await?;

    if args.json {
        return print_json(&contacts);
    }

    for contact in &contacts {
        println!("{contact}");
    }
    Ok(())
}

async fn cmd_profile(client: &MailboxClient, args: &Args, user_id: &str) -> anyhow::Result<()> {
    let profile = client.user_profile(user_id).await?;

    if args.json {
        return print_json(&profile);
    }

    match profile {
        Some(profile) => print_profile(&profile),
        None => println!("User {user_id} not found."),
    }
    Ok(())
}

fn print_thread_summary(summary: &ThreadSummary) {
    println!("ID:      {}", summary.id);
    println!(
        "Subject: {}",
        summary.subject.as_deref().unwrap_or("(no subject)")
    );
    println!("Date:    {}", format_date(summary.last_activity_date));
    match (
        &summary.sender_first_name,
        &summary.sender_last_name,
        &summary.sender_email,
    ) {
        (Some(first), Some(last), Some(email)) => {
            println!("From:    {first} {last} <{email}>");
        }
        _ => println!("From:    -"),
    }
}

fn print_conversation(detail: &ThreadDetail) {
    println!(
        "Subject: {}",
        detail.subject.as_deref().unwrap_or("(no subject)")
    );

    for email in &detail.emails {
        let from = email.sender.as_ref().map_or_else(
            || "-".to_string(),
            |s| format!("{} {}", s.first_name, s.last_name),
        );
        println!("\n--- {} | {} ---\n", format_date(email.sent_date), from);
        println!("{}", email.body.as_deref().unwrap_or(""));
    }

    println!("\n{} email(s)", detail.emails.len());
}

fn print_profile(profile: &UserProfile) {
    println!("Name:     {} {}", profile.first_name, profile.last_name);
    println!("Email:    {}", profile.email);

    let optional = [
        ("Title:   ", &profile.job_title),
        ("Company: ", &profile.company),
        ("Location:", &profile.location),
        ("Avatar:  ", &profile.avatar_url),
        ("LinkedIn:", &profile.linkedin),
        ("Twitter: ", &profile.twitter),
        ("GitHub:  ", &profile.github),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            println!("{label} {value}");
        }
    }

    if !profile.latest_threads.is_empty() {
        println!("\n--- Recent Threads ---");
        for thread in &profile.latest_threads {
            println!("  {}", thread.subject.as_deref().unwrap_or("(no subject)"));
        }
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d %H:%M").to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
