use colored::Colorize;

use agora_feed::{FeedAssembler, PostView, UserView};
use agora_server::{AgoraServer, ServerConfig};
use agora_store::seed;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Feed(args) => cmd_feed(args),
        Command::Users(args) => cmd_users(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if args.static_dir.is_some() {
        config.static_dir = args.static_dir;
    }
    if args.no_seed {
        config.seed = false;
    }

    let server = AgoraServer::new(config)?;
    println!(
        "{} Agora listening on {}",
        "✓".green().bold(),
        format!("http://{}", server.config().bind_addr).bold()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_feed(args: ShowArgs) -> anyhow::Result<()> {
    let store = seed::sample_store()?;
    let feed = FeedAssembler::new(&store).assemble_feed()?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&feed)?),
        OutputFormat::Text => feed.iter().for_each(print_post),
    }
    Ok(())
}

fn cmd_users(args: ShowArgs) -> anyhow::Result<()> {
    let store = seed::sample_store()?;
    let users = FeedAssembler::new(&store).list_user_views()?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
        OutputFormat::Text => users.iter().for_each(print_user),
    }
    Ok(())
}

fn print_post(entry: &PostView) {
    let post = &entry.post;
    println!(
        "{} {}  {}",
        format!("#{}", post.id).yellow(),
        entry.user.username.bold(),
        post.timestamp.to_string().dimmed()
    );
    if let Some(text) = &post.content {
        println!("  {text}");
    }
    if let Some(media) = &post.media {
        println!("  [{}] {}", media.kind.to_string().cyan(), media.url.blue());
    }
    println!(
        "  {} likes, {} comments",
        post.likes_count().to_string().bold(),
        entry.comments_count.to_string().bold()
    );
}

fn print_user(user: &UserView) {
    println!(
        "{} {} <{}>",
        format!("#{}", user.id).yellow(),
        user.username.bold(),
        user.email
    );
    if let Some(bio) = &user.bio {
        println!("  {}", bio.dimmed());
    }
    println!(
        "  {} followers, {} following",
        user.followers_count.to_string().bold(),
        user.following_count.to_string().bold()
    );
}
