use anyhow::Result;
use clap::{Parser, Subcommand};

mod app;
mod handler;
mod logging;
mod markdown;
mod tui;
mod ui;

use app::App;
use cv_assistant_core::{
    config::API_URL_ENV, AskClient, Config, Dispatcher, Session, Viewport, ViewportSignal,
    DEFAULT_PROFILE,
};
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "cv-assistant")]
#[command(about = "Ask questions about a résumé and get AI-generated answers")]
#[command(version)]
struct Cli {
    /// Answer service endpoint (overrides the config file)
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question and print the answer
    Ask {
        /// Your question
        question: String,
    },
    /// Print the profile panel
    Profile,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_else(|_| Config::new());
    let api_url = config.resolve_api_url(cli.api_url.as_deref());

    match cli.command {
        None => run_tui(&config, &api_url).await,
        Some(Commands::Ask { question }) => {
            logging::init_stderr();
            ask_once(&api_url, &question).await
        }
        Some(Commands::Profile) => {
            print_profile();
            Ok(())
        }
    }
}

async fn run_tui(config: &Config, api_url: &str) -> Result<()> {
    let log_path = logging::default_log_path()?;
    logging::init_file(&log_path)?;

    let cell_width = config.cell_width_px();
    let viewport = ViewportSignal::new(tui::initial_viewport(cell_width)?);
    let mut app = App::new(DEFAULT_PROFILE, AskClient::new(api_url), viewport.subscribe());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(viewport, cell_width);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    if app.in_flight.is_some() {
        tracing::info!("exiting with a question still in flight");
    }
    tracing::info!(messages = app.session.messages().len(), "session ended");
    result
}

async fn run_loop(terminal: &mut tui::Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }
    Ok(())
}

/// One question through the same session path the TUI uses
async fn ask_once(api_url: &str, question: &str) -> Result<()> {
    let dispatcher = Dispatcher::new(AskClient::new(api_url));
    // No terminal layout here, so any wide width will do
    let mut session = Session::from_profile(&DEFAULT_PROFILE, Viewport::new(u32::MAX));

    // Blank questions are dropped by the session, same as in the TUI
    if let Some(answer) = dispatcher.submit(&mut session, question).await {
        println!("{}", answer);
    }
    Ok(())
}

fn print_profile() {
    let profile = DEFAULT_PROFILE;

    println!("{}", profile.name);
    println!("{}", profile.title);
    println!("{}", profile.badges.join(" · "));
    println!();
    println!("{}", profile.bio);
    println!();
    println!("{}: {}", profile.skills_heading, profile.skills.join(", "));
    println!("{}:", profile.expertise_heading);
    for item in profile.expertise {
        println!("  - {}", item);
    }
    println!();
    println!("{} {}", profile.cv_label, profile.cv_path);
    for link in profile.social_links {
        println!("{} {}", link.label, link.url);
    }
    println!("{}", profile.copyright);
}
