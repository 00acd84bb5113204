use chrono::{DateTime, Utc};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;

use crate::app::{AppContext, AtlasError, Result};
use crate::cli::FeedArgs;
use crate::countdown::countdown;
use crate::feed::{FeedController, FeedSnapshot, FetchStatus, FilterSpec, VisibleLaunch};

/// Loads likes and `pages` consecutive pages starting at offset 0.
async fn load_feed(ctx: &AppContext, pages: usize) -> FeedController {
    let controller = ctx.feed_controller();
    controller.load_likes().await;

    let progress = tokio::spawn(report_progress(
        controller.subscribe(),
        ctx.config.api.max_retries,
    ));
    for _ in 0..pages.max(1) {
        controller.load_more().await;
        if controller.snapshot().state.status == FetchStatus::Failed {
            break;
        }
    }
    progress.abort();
    controller
}

/// Prints paging and retry progress to stderr while pages load.
async fn report_progress(mut updates: watch::Receiver<FeedSnapshot>, max_retries: u32) {
    while updates.changed().await.is_ok() {
        let line = progress_line(&updates.borrow_and_update(), max_retries);
        if let Some(line) = line {
            eprintln!("{}", line);
        }
    }
}

fn progress_line(snapshot: &FeedSnapshot, max_retries: u32) -> Option<String> {
    let state = &snapshot.state;
    match state.status {
        FetchStatus::Retrying => Some(format!(
            "Retrying offset {} ({}/{})",
            state.next_offset, state.retry_count, max_retries
        )),
        FetchStatus::Loading if snapshot.is_loading_more() => {
            Some(format!("Loading launches from offset {}", state.next_offset))
        }
        _ => None,
    }
}

fn filter_from(args: &FeedArgs) -> FilterSpec {
    let mut spec = FilterSpec::new(None, args.liked);
    if let Some(agency) = &args.agency {
        spec.toggle_agency(agency);
    }
    spec
}

fn print_notice(snapshot: &FeedSnapshot) {
    if let Some(notice) = &snapshot.notice {
        eprintln!("Error: {}", notice);
    }
}

pub async fn list_launches(ctx: &AppContext, args: &FeedArgs) -> Result<()> {
    let controller = load_feed(ctx, args.pages).await;
    controller.set_filter(filter_from(args));
    let snapshot = controller.snapshot();
    controller.dispose();

    print_notice(&snapshot);

    if let Some(message) = snapshot.empty_notice() {
        println!("{}", message);
        return Ok(());
    }

    if snapshot.visible.is_empty() {
        println!("No launches");
        return Ok(());
    }

    let now = Utc::now();
    for entry in &snapshot.visible {
        println!(
            "{}",
            format_launch(entry, now, &ctx.config.links.placeholder_image_url)
        );
    }

    println!(
        "{} of {} launches shown",
        snapshot.visible.len(),
        snapshot.state.items.len()
    );
    Ok(())
}

fn format_launch(entry: &VisibleLaunch, now: DateTime<Utc>, placeholder_image: &str) -> String {
    let launch = &entry.launch;
    format!(
        "{} {}\n  {} | {} | T- {}\n  {}\n  Image: {}\n  {}: {}",
        if entry.liked { "♥" } else { "♡" },
        launch.name,
        launch.id,
        launch.agency_name,
        countdown(now, launch.scheduled_time),
        launch.mission_summary(),
        launch.image_or(placeholder_image),
        entry.action.label,
        entry.action.url
    )
}

pub async fn list_agencies(ctx: &AppContext, pages: usize) -> Result<()> {
    let controller = load_feed(ctx, pages).await;
    let snapshot = controller.snapshot();
    controller.dispose();

    print_notice(&snapshot);

    if snapshot.agencies.is_empty() {
        println!("No agencies");
        return Ok(());
    }

    for agency in &snapshot.agencies {
        println!("{}", agency);
    }
    Ok(())
}

pub async fn toggle_like(ctx: &AppContext, id: &str) -> Result<()> {
    let controller = ctx.feed_controller();
    controller.load_likes().await;
    let liked = controller.toggle_like(id).await;
    controller.dispose();

    if liked {
        println!("Liked {}", id);
    } else {
        println!("Unliked {}", id);
    }
    Ok(())
}

pub async fn list_liked(ctx: &AppContext) -> Result<()> {
    let controller = ctx.feed_controller();
    controller.load_likes().await;
    let snapshot = controller.snapshot();
    controller.dispose();

    if snapshot.liked.is_empty() {
        println!("You haven't liked any launches yet.");
        return Ok(());
    }

    for id in snapshot.liked.iter() {
        println!("{}", id);
    }
    Ok(())
}

pub async fn open_launch(ctx: &AppContext, id: &str, pages: usize) -> Result<()> {
    let controller = load_feed(ctx, pages).await;
    let snapshot = controller.snapshot();
    controller.dispose();

    print_notice(&snapshot);

    let entry = snapshot
        .visible
        .iter()
        .find(|entry| entry.launch.id == id)
        .ok_or_else(|| AtlasError::LaunchNotFound(id.to_string()))?;

    println!("{}: {}", entry.action.label, entry.action.url);
    open::that(&entry.action.url)?;
    Ok(())
}

pub async fn watch(ctx: &AppContext, args: &FeedArgs) -> Result<()> {
    let controller = load_feed(ctx, args.pages).await;
    let mut ticks = controller.countdowns();
    controller.set_filter(filter_from(args));

    let snapshot = controller.snapshot();
    print_notice(&snapshot);
    if snapshot.visible.is_empty() {
        println!("{}", snapshot.empty_notice().unwrap_or("No launches"));
        controller.dispose();
        return Ok(());
    }

    println!("Watching {} launches (Ctrl-C to stop)", snapshot.visible.len());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            tick = ticks.recv() => match tick {
                Ok(tick) => {
                    let name = snapshot
                        .visible
                        .iter()
                        .find(|entry| entry.launch.id == tick.id)
                        .map(|entry| entry.launch.name.as_str())
                        .unwrap_or(tick.id.as_str());
                    println!("{:>14}  {}", tick.display, name);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("countdown output lagged by {} ticks", skipped);
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    controller.dispose();
    Ok(())
}
