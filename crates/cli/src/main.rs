use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use voyage_core::{
    affiliate_link, compose_phrase_reply, parse_preference_phrase, ActivityTag, GoalTag,
    PreferenceTag, SessionContext, TripType, UserSession, VibeTag, DEFAULT_BOOKING_AID,
};
use voyage_observability::{init_tracing, AppMetrics};
use voyage_social::{ClientConfig, NewPost, SocialClient, DEFAULT_API_URL};
use voyage_storage::Store;
use voyage_wizard::screens::PreferencesForm;
use voyage_wizard::{CatalogSource, LoadState, WizardController};

#[derive(Debug, Parser)]
#[command(name = "voyage")]
#[command(about = "Voyage trip planner and travel feed CLI")]
struct Cli {
    #[arg(long, env = "VOYAGE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    #[arg(long, env = "VOYAGE_BOOKING_AID", default_value = DEFAULT_BOOKING_AID, global = true)]
    aid: String,

    /// Backend user id to act as.
    #[arg(long, global = true)]
    user_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the trip wizard end to end and print the itinerary.
    Plan(PlanArgs),
    /// Show which preference tags a phrase maps to.
    Prefs { text: String },
    BookingLink {
        location: String,
        #[arg(long)]
        code: Option<String>,
    },
    Feed {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long)]
        json: bool,
    },
    Like { post_id: String },
    Save {
        post_id: String,
        #[arg(long)]
        collection: Option<String>,
    },
    /// List the wishlist, optionally narrowed to a location or collection.
    Saved {
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        collection: Option<String>,
        /// Show saved locations with counts instead of posts.
        #[arg(long)]
        locations: bool,
        #[arg(long)]
        json: bool,
    },
    Follow { author_id: String },
    Post {
        #[arg(long)]
        caption: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        country: String,
        #[arg(long)]
        city: Option<String>,
        #[arg(long = "image")]
        images: Vec<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Ping,
}

#[derive(Debug, Args)]
struct PlanArgs {
    #[arg(long)]
    destination: String,
    #[arg(long)]
    start: NaiveDate,
    #[arg(long)]
    end: NaiveDate,
    #[arg(long, default_value_t = 2)]
    adults: u8,
    #[arg(long, default_value_t = 0)]
    children: u8,
    #[arg(long)]
    trip_type: String,
    /// Free-text description of the trip, matched against the tag vocabulary.
    #[arg(long)]
    describe: Option<String>,
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Activity ids to keep; defaults to the first two recommendations.
    #[arg(long = "activity")]
    activities: Vec<String>,
    #[arg(long)]
    title: Option<String>,
    /// Directory to write the text export into.
    #[arg(long)]
    export: Option<PathBuf>,
    #[arg(long)]
    save: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("voyage_cli");
    let cli = Cli::parse();

    let session = match &cli.user_id {
        Some(user_id) => SessionContext::signed_in(UserSession {
            user_id: user_id.clone(),
            username: "voyage-cli".to_string(),
            display_name: "Voyage CLI".to_string(),
        }),
        None => SessionContext::default(),
    };

    match cli.command {
        Command::Plan(args) => run_plan(args, session, &cli.aid).await?,
        Command::Prefs { text } => {
            let matched = parse_preference_phrase(&text);
            let payload = serde_json::json!({
                "tags": matched.tag_ids(),
                "reply": compose_phrase_reply(&matched),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Command::BookingLink { location, code } => {
            println!("{}", affiliate_link(&location, code.as_deref(), &cli.aid));
        }
        command => {
            let client = build_client(&cli.api_url)?;
            run_social(command, &client, &session, &cli.aid).await?;
        }
    }

    Ok(())
}

fn build_client(api_url: &str) -> Result<SocialClient> {
    let config = ClientConfig::from_env()?.with_base_url(api_url)?;
    Ok(SocialClient::new(config, AppMetrics::shared())?)
}

async fn run_social(
    command: Command,
    client: &SocialClient,
    session: &SessionContext,
    aid: &str,
) -> Result<()> {
    match command {
        Command::Feed { page, json } => {
            let feed = client.fetch_feed(session, page).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&feed)?);
                return Ok(());
            }
            let now = Utc::now();
            for item in &feed.items {
                let post = &item.post;
                println!(
                    "[{}] @{} · {}, {} · {} likes · {}",
                    post.id,
                    item.author.username,
                    post.location_name,
                    post.country,
                    post.likes_count,
                    post.time_ago(now)
                );
                println!("    {}", post.caption);
                if let Some(code) = post
                    .booking_info
                    .as_ref()
                    .and_then(|info| info.affiliate_code.as_deref())
                {
                    println!("    book: {}", affiliate_link(&post.location_name, Some(code), aid));
                }
            }
            if feed.has_more {
                println!("more: --page {}", feed.page + 1);
            }
        }
        Command::Like { post_id } => {
            let result = client.like_post(session, &post_id).await;
            report(result, "like post", |response| {
                format!("{:?}: {} likes", response.action, response.likes_count)
            })?;
        }
        Command::Save {
            post_id,
            collection,
        } => {
            let result = client
                .save_post(session, &post_id, collection.as_deref(), None)
                .await;
            report(result, "save post", |response| {
                format!("{:?}: {} saves", response.action, response.saves_count)
            })?;
        }
        Command::Saved {
            location,
            collection,
            locations,
            json,
        } => {
            if locations {
                let result = client.saved_locations(session).await;
                report(result, "load saved locations", |found| {
                    if json {
                        return serde_json::to_string_pretty(found).unwrap_or_default();
                    }
                    found
                        .iter()
                        .map(|entry| format!("{} ({})", entry.location, entry.count))
                        .collect::<Vec<_>>()
                        .join("\n")
                })?;
                return Ok(());
            }

            let result = client
                .saved_posts(session, location.as_deref(), collection.as_deref())
                .await;
            report(result, "load saved posts", |saved| {
                if json {
                    return serde_json::to_string_pretty(saved).unwrap_or_default();
                }
                saved
                    .iter()
                    .map(|entry| {
                        let info = &entry.saved_info;
                        let mut line = format!(
                            "[{}] {} · {} · {}",
                            entry.post.id,
                            info.collection_name.as_deref().unwrap_or("-"),
                            info.location_category.as_deref().unwrap_or("Other"),
                            entry.post.caption
                        );
                        if let Some(notes) = info.personal_notes.as_deref() {
                            line.push_str(&format!("\n    note: {notes}"));
                        }
                        line
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::Follow { author_id } => {
            let result = client.follow_user(session, &author_id).await;
            report(result, "follow user", |response| {
                format!("{:?}: {} followers", response.action, response.followers_count)
            })?;
        }
        Command::Post {
            caption,
            location,
            country,
            city,
            images,
            tags,
        } => {
            let mut draft = NewPost::new(caption, location, country);
            draft.city = city;
            draft.images = images;
            for tag in &tags {
                draft.add_tag(tag);
            }
            let result = client.create_post(session, draft).await;
            report(result, "create post", |post| format!("created post {}", post.id))?;
        }
        Command::Ping => {
            let pong = client.ping().await?;
            println!("{}", pong.timestamp);
        }
        Command::Plan(_) | Command::Prefs { .. } | Command::BookingLink { .. } => {}
    }
    Ok(())
}

fn report<T>(
    result: Result<T, voyage_social::SocialError>,
    action: &str,
    render: impl FnOnce(&T) -> String,
) -> Result<()> {
    match result {
        Ok(value) => {
            println!("{}", render(&value));
            Ok(())
        }
        Err(err) => bail!(err.user_message(action)),
    }
}

async fn run_plan(args: PlanArgs, session: SessionContext, aid: &str) -> Result<()> {
    let database_url = env::var("VOYAGE_DATABASE_URL").ok();
    let store = Store::from_url(database_url.as_deref()).await?;
    let mut controller = WizardController::new(
        Arc::new(store),
        Arc::new(CatalogSource::from_env()),
        AppMetrics::shared(),
        session,
    )
    .with_booking_aid(aid);

    let form = controller.wizard_mut().setup_form_mut()?;
    form.destination = args.destination;
    form.start_date = Some(args.start);
    form.end_date = Some(args.end);
    form.adults = args.adults;
    form.children = args.children;
    form.trip_type = Some(
        TripType::parse(&args.trip_type)
            .with_context(|| format!("unknown trip type {:?}", args.trip_type))?,
    );
    controller.advance().await.context("trip setup is incomplete")?;

    let form = controller.wizard_mut().preferences_form_mut()?;
    if let Some(text) = args.describe.as_deref() {
        if let Some(reply) = form.describe(text) {
            println!("{reply}\n");
        }
    }
    for tag in &args.tags {
        select_tag(form, tag)?;
    }
    controller.advance().await.context("not enough preferences")?;

    let screen = controller.wizard_mut().recommendations_mut()?;
    if let LoadState::Failed(message) = screen.state() {
        bail!("recommendations unavailable: {message}");
    }
    let chosen = if args.activities.is_empty() {
        screen
            .visible()
            .iter()
            .take(2)
            .map(|option| option.id.clone())
            .collect()
    } else {
        args.activities
    };
    for id in &chosen {
        if screen.toggle(id).is_none() {
            bail!("unknown activity id {id:?}");
        }
    }
    controller.advance().await?;

    let screen = controller.wizard_mut().daily_options_mut()?;
    for day in 0..screen.total_days() {
        let pick = screen.days().get(day).and_then(|plan| {
            plan.options
                .get(day % plan.options.len().max(1))
                .map(|option| option.id.clone())
        });
        if let Some(option_id) = pick {
            screen.select(day, &option_id)?;
        }
    }
    controller.advance().await?;

    let builder = controller.wizard_mut().itinerary_mut()?;
    if let Some(title) = args.title.as_deref() {
        builder.rename(title);
    }
    let export = builder.export();
    println!("{}", export.contents);
    println!("Total: €{:.2}", builder.total_cost());
    println!("{}", builder.share_text());

    if let Some(dir) = args.export {
        let path = dir.join(&export.file_name);
        std::fs::write(&path, &export.contents)
            .with_context(|| format!("failed writing {}", path.display()))?;
        println!("exported to {}", path.display());
    }

    if args.save {
        let receipt = controller.save().await?;
        println!("{}", receipt.message());
    }

    Ok(())
}

fn select_tag(form: &mut PreferencesForm, tag: &str) -> Result<()> {
    if let Some(tag) = VibeTag::parse(tag) {
        if !form.preferences().vibe.contains(&tag) {
            form.toggle_vibe(tag);
        }
    } else if let Some(tag) = ActivityTag::parse(tag) {
        if !form.preferences().activities.contains(&tag) {
            form.toggle_activity(tag);
        }
    } else if let Some(tag) = GoalTag::parse(tag) {
        if !form.preferences().goals.contains(&tag) {
            form.toggle_goal(tag);
        }
    } else {
        bail!("unknown preference tag {tag:?}");
    }
    Ok(())
}
