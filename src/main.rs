// folio — print a GitHub user's portfolio in the terminal.
// Thin presentation driver over the library; all logic lives there.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use folio::about::SectionItem;
use folio::state::{LanguageFilter, SortKey};
use folio::PortfolioApp;

struct CliArgs {
    username: String,
    refresh: bool,
    sort: Option<SortKey>,
    language: Option<String>,
    query: Option<String>,
}

fn parse_args() -> Option<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut username = None;
    let mut refresh = false;
    let mut sort = None;
    let mut language = None;
    let mut query = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--refresh" => refresh = true,
            "--sort" => sort = Some(SortKey::parse(&args.next()?)?),
            "--lang" => language = Some(args.next()?),
            "--query" => query = Some(args.next()?),
            "--help" | "-h" => return None,
            _ if username.is_none() => username = Some(arg),
            _ => return None,
        }
    }

    Some(CliArgs {
        username: username?,
        refresh,
        sort,
        language,
        query,
    })
}

fn print_usage() {
    eprintln!("Usage: folio <username> [--refresh] [--sort updated|stars|name] [--lang <language>] [--query <text>]");
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(args) = parse_args() else {
        print_usage();
        return ExitCode::from(2);
    };

    let mut app = match PortfolioApp::new(&args.username) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("{}", err.user_message());
            return ExitCode::FAILURE;
        }
    };

    let loaded = if args.refresh {
        app.refresh().await
    } else {
        app.load_with_recovery().await
    };
    if let Err(err) = loaded {
        eprintln!("{}", err.user_message());
        return ExitCode::FAILURE;
    }

    if let Some(sort) = args.sort {
        app.set_sort(sort);
    }
    if let Some(language) = args.language {
        app.set_language(LanguageFilter::Only(language));
    }
    if let Some(query) = &args.query {
        app.set_query(query);
    }

    let about = app.load_about().await;
    print_portfolio(&app, &about);

    ExitCode::SUCCESS
}

fn print_portfolio(app: &PortfolioApp, about: &folio::about::AboutContent) {
    let Some(portfolio) = app.portfolio() else {
        return;
    };
    let profile = &portfolio.profile;
    let stats = &portfolio.statistics;

    println!("{} (@{}) — {}", profile.name, profile.username, profile.title);
    println!("{}", profile.bio);
    println!(
        "{} · {} followers · {} following",
        profile.location, profile.followers, profile.following
    );
    println!("{}", profile.html_url);

    println!();
    println!(
        "Repositories: {} · Stars: {} · Forks: {}",
        stats.total_repos, stats.total_stars, stats.total_forks
    );
    let languages = stats.languages_by_count();
    if !languages.is_empty() {
        let listing: Vec<String> = languages
            .iter()
            .map(|(language, count)| format!("{} ({})", language, count))
            .collect();
        println!("Languages: {}", listing.join(", "));
    }

    if !about.greeting.is_empty() {
        println!();
        println!("{}", about.greeting);
        println!("{}", about.intro);
    }
    for section in &about.sections {
        println!();
        println!("{}", section.title);
        for item in &section.items {
            match item {
                SectionItem::Text(text) => println!("  {}", text),
                SectionItem::Rule => println!("  ──────────"),
            }
        }
    }

    println!();
    println!(
        "Showing {} of {} repositories (sort: {})",
        app.visible_repositories().len(),
        app.matching_count(),
        app.filter().sort().as_str()
    );
    for repo in app.visible_repositories() {
        let language = repo.language.as_deref().unwrap_or("-");
        let updated = repo
            .updated_at
            .map(|dt| dt.format("%d/%m/%Y").to_string())
            .unwrap_or_default();
        println!(
            "  {:<30} ★ {:<6} ⑂ {:<5} {:<12} {}",
            repo.name, repo.stars, repo.forks, language, updated
        );
    }
    if app.has_more() {
        println!(
            "  … {} more (narrow the filter to see them)",
            app.matching_count() - app.visible_repositories().len()
        );
    }
}
