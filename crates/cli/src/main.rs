use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{Movie, UserId};
use engine::{
    BrowsingSession, RatingImpact, RecommendationOrchestrator, RecommenderConfig, TimeScenario,
    UserSelector,
};
use pipeline::{GenreFilter, GenrePreference, SortOption};
use sources::Recommendation;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// ReelRecs - Movie Recommendation Browser
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Browse a movie catalog and get explained recommendations", long_about = None)]
struct Cli {
    /// Directory containing movies.json and users.json
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Optional JSON file overriding the recommender settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Pick a user by id or by name
#[derive(Args)]
#[group(required = true, multiple = false)]
struct UserArgs {
    /// User ID
    #[arg(long)]
    user_id: Option<UserId>,

    /// User name (the first user with this name is used)
    #[arg(long)]
    name: Option<String>,
}

impl UserArgs {
    fn selector(&self) -> Result<UserSelector> {
        match (self.user_id, &self.name) {
            (Some(id), _) => Ok(UserSelector::Id(id)),
            (None, Some(name)) => Ok(UserSelector::Name(name.clone())),
            (None, None) => bail!("Pass --user-id or --name"),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    /// Rating, high to low
    RatingDesc,
    /// Rating, low to high
    RatingAsc,
    /// Release year, newest first
    YearDesc,
    /// Release year, oldest first
    YearAsc,
}

impl From<SortArg> for SortOption {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::RatingDesc => SortOption::RatingHighToLow,
            SortArg::RatingAsc => SortOption::RatingLowToHigh,
            SortArg::YearDesc => SortOption::YearNewestFirst,
            SortArg::YearAsc => SortOption::YearOldestFirst,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List every genre in the catalog
    Genres,

    /// Browse the catalog with a genre filter and a sort order
    Browse {
        /// Genre to show, or "All"
        #[arg(long, default_value = "All")]
        genre: GenreFilter,

        #[arg(long, value_enum, default_value_t = SortArg::RatingDesc)]
        sort: SortArg,

        /// Only movies released in or after this year
        #[arg(long)]
        min_year: Option<u16>,
    },

    /// Show the highest-rated movies
    Top {
        /// Number of movies (defaults to the configured top_movies_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a user's watch history, genre preferences and similar users
    User {
        #[command(flatten)]
        user: UserArgs,
    },

    /// Get recommendations from every strategy
    Recommend {
        #[command(flatten)]
        user: UserArgs,

        /// Also show the genre tally and similar users behind the recommendations
        #[arg(long)]
        explain: bool,
    },

    /// Simulate watching more movies and compare recommendations
    Simulate {
        #[command(flatten)]
        user: UserArgs,

        /// Title to add to the simulated history (repeatable). Without it,
        /// the movies that could be added are listed.
        #[arg(long = "add")]
        add: Vec<String>,

        /// Genre filter for the list of addable movies
        #[arg(long, default_value = "All")]
        genre: GenreFilter,
    },

    /// Recommendations for a brand-new user
    ColdStart,

    /// Rate a movie from the user's watch history
    Rate {
        #[command(flatten)]
        user: UserArgs,

        #[arg(long)]
        title: String,

        /// Rating from 1 to 10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },

    /// Analyze a browsing session within one genre
    BrowseSession {
        #[arg(long)]
        genre: String,

        /// Title viewed during the session (repeatable)
        #[arg(long = "viewed")]
        viewed: Vec<String>,
    },

    /// Recommendations for a time of viewing
    Scenario {
        /// weekend-evening, weekday-morning, holiday-season or summer-vacation
        #[arg(long)]
        time: TimeScenario,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RecommenderConfig::from_json_file(path)?,
        None => RecommenderConfig::default(),
    };

    let start = Instant::now();
    let orchestrator = RecommendationOrchestrator::from_data_dir(&cli.data_dir, config)
        .context("Failed to load movie data")?;
    info!("Ready in {:?}", start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Genres => handle_genres(&orchestrator),
        Commands::Browse {
            genre,
            sort,
            min_year,
        } => handle_browse(&orchestrator, &genre, sort.into(), min_year),
        Commands::Top { limit } => handle_top(&orchestrator, limit),
        Commands::User { user } => handle_user(&orchestrator, &user.selector()?)?,
        Commands::Recommend { user, explain } => {
            handle_recommend(&orchestrator, &user.selector()?, explain)?
        }
        Commands::Simulate { user, add, genre } => {
            handle_simulate(&orchestrator, &user.selector()?, &add, &genre)?
        }
        Commands::ColdStart => handle_cold_start(&orchestrator),
        Commands::Rate {
            user,
            title,
            rating,
        } => handle_rate(&orchestrator, &user.selector()?, &title, rating)?,
        Commands::BrowseSession { genre, viewed } => {
            handle_browse_session(&orchestrator, BrowsingSession::new(genre, viewed))
        }
        Commands::Scenario { time } => handle_scenario(&orchestrator, time),
    }

    Ok(())
}

/// Handle the 'genres' command
fn handle_genres(orchestrator: &RecommendationOrchestrator) {
    println!("{}", "Genres:".bold().blue());
    for genre in orchestrator.catalog().genres() {
        let count = orchestrator.catalog().get_movies_by_genre(genre).len();
        println!("{}{} ({} movies)", "• ".green(), genre, count);
    }
}

/// Handle the 'browse' command
fn handle_browse(
    orchestrator: &RecommendationOrchestrator,
    genre: &GenreFilter,
    sort: SortOption,
    min_year: Option<u16>,
) {
    let movies = orchestrator.browse(genre, sort, min_year);
    println!("{}", format!("Movies ({}):", genre).bold().blue());
    if movies.is_empty() {
        println!("{}", "No movies match these filters.".yellow());
        return;
    }
    print_movies(&movies);
}

/// Handle the 'top' command
fn handle_top(orchestrator: &RecommendationOrchestrator, limit: Option<usize>) {
    let movies = orchestrator.top_movies(limit);
    println!("{}", format!("Top {} Rated Movies:", movies.len()).bold().blue());
    print_movies(&movies);
}

/// Handle the 'user' command
fn handle_user(orchestrator: &RecommendationOrchestrator, selector: &UserSelector) -> Result<()> {
    let user = orchestrator.find_user(selector)?;
    let context = orchestrator.build_context(user);

    println!("{}", format!("User {}: {}", user.id, user.name).bold().blue());

    println!("Watch history ({} movies):", user.watched_movies.len());
    if user.watched_movies.is_empty() {
        println!("  {}", "(nothing watched yet)".dimmed());
    }
    for title in &user.watched_movies {
        match orchestrator.catalog().get_movie(title) {
            Some(movie) => println!("{}{}", "• ".green(), format_movie(movie)),
            None => println!("{}{} {}", "• ".red(), title, "(not in catalog)".dimmed()),
        }
    }

    print_genre_preferences(&context.genre_preferences);

    let similar = orchestrator.similar_users(user);
    println!("Similar users:");
    if similar.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for other in similar {
        println!(
            "{}{} (id {}) shares {}: {}",
            "• ".cyan(),
            other.name,
            other.user_id,
            other.similarity,
            other.common_movies.join(", ")
        );
    }
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    orchestrator: &RecommendationOrchestrator,
    selector: &UserSelector,
    explain: bool,
) -> Result<()> {
    let user = orchestrator.find_user(selector)?;
    let recs = orchestrator.recommend(user);

    println!(
        "{}",
        format!("Recommendations for {}", user.name).bold().blue()
    );

    if explain {
        print_genre_preferences(&recs.context.genre_preferences);
        for other in &recs.similar_users {
            println!(
                "{}Similar user {} shares {} movies",
                "• ".cyan(),
                other.name,
                other.similarity
            );
        }
    }

    for result in &recs.strategies {
        println!();
        println!("{}", result.kind.label().bold());
        print_recommendations(&result.recommendations);
    }
    Ok(())
}

/// Handle the 'simulate' command
fn handle_simulate(
    orchestrator: &RecommendationOrchestrator,
    selector: &UserSelector,
    additions: &[String],
    genre: &GenreFilter,
) -> Result<()> {
    let user = orchestrator.find_user(selector)?;

    if additions.is_empty() {
        let addable = orchestrator.addable_movies(user, genre);
        println!(
            "{}",
            format!("Movies {} could add ({}):", user.name, genre)
                .bold()
                .blue()
        );
        print_movies(&addable);
        return Ok(());
    }

    let outcome = orchestrator.simulate(user, additions);

    println!("{}", "Before: Genre Preferences".bold());
    println!("  {}", format_preferences(&outcome.genres_before));
    print_recommendations(&outcome.before);

    println!();
    println!(
        "{}",
        format!("After adding {}", additions.join(", ")).bold()
    );
    println!("  {}", format_preferences(&outcome.genres_after));
    print_recommendations(&outcome.after);

    println!();
    if outcome.new_titles.is_empty() {
        println!("{}", "No new movies appeared in the recommendations.".yellow());
    } else {
        let new_titles: Vec<&str> = outcome.new_titles.iter().map(String::as_str).collect();
        println!(
            "{} {}",
            "Newly recommended:".green().bold(),
            new_titles.join(", ")
        );
    }
    Ok(())
}

/// Handle the 'cold-start' command
fn handle_cold_start(orchestrator: &RecommendationOrchestrator) {
    println!("{}", "Recommendations for a new user".bold().blue());
    println!("Without any watch history, only overall popularity is known.");
    print_recommendations(&orchestrator.cold_start());
}

/// Handle the 'rate' command
fn handle_rate(
    orchestrator: &RecommendationOrchestrator,
    selector: &UserSelector,
    title: &str,
    rating: u8,
) -> Result<()> {
    let user = orchestrator.find_user(selector)?;
    let feedback = orchestrator.rate(user, title, rating)?;

    println!(
        "{}",
        format!("{} rated {} as {}/10", user.name, feedback.title, feedback.rating)
            .bold()
            .blue()
    );

    let (genres, era) = match &feedback.movie {
        Some(movie) => (movie.genres.join(", "), movie.release_year.to_string()),
        None => ("these".to_string(), "the same".to_string()),
    };
    match feedback.impact {
        RatingImpact::Positive => {
            println!("{} More movies like '{}' will be recommended", "+".green(), title);
            println!("{} More {} movies will be recommended", "+".green(), genres);
            println!("{} Movies from the {} era may be recommended more", "+".green(), era);
        }
        RatingImpact::Negative => {
            println!("{} Fewer movies like '{}' will be recommended", "-".red(), title);
            println!("{} Fewer {} movies might be recommended", "-".red(), genres);
            println!("{} Different genres and styles will be prioritized", "-".red());
        }
        RatingImpact::Neutral => {
            println!("{} Neutral rating, minor impact on recommendations", "~".yellow());
        }
    }
    Ok(())
}

/// Handle the 'browse-session' command
fn handle_browse_session(orchestrator: &RecommendationOrchestrator, session: BrowsingSession) {
    let analysis = orchestrator.analyze_browsing(&session);

    println!(
        "You browsed {} movies in the {} genre.",
        analysis.viewed_count, analysis.genre
    );
    if analysis.strong_interest {
        println!("{} Strong interest in {} detected", "+".green(), analysis.genre);
        print_recommendations(&analysis.recommendations);
    } else {
        println!(
            "{} Not enough browsing activity to detect strong preferences",
            "~".yellow()
        );
    }
}

/// Handle the 'scenario' command
fn handle_scenario(orchestrator: &RecommendationOrchestrator, scenario: TimeScenario) {
    println!(
        "{}",
        format!("Recommendations for: {}", scenario).bold().blue()
    );
    println!("{}", scenario.description());
    print_recommendations(&orchestrator.scenario(scenario));
}

fn format_movie(movie: &Movie) -> String {
    format!(
        "{} ({}) [{}] - Rating: {}",
        movie.title,
        movie.release_year,
        movie.genres.join(", "),
        movie.rating
    )
}

fn format_preferences(preferences: &[GenrePreference]) -> String {
    if preferences.is_empty() {
        return "(no genre preferences)".to_string();
    }
    preferences
        .iter()
        .map(|p| format!("{} ({})", p.genre, p.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_genre_preferences(preferences: &[GenrePreference]) {
    println!("Genre preferences: {}", format_preferences(preferences));
}

fn print_movies(movies: &[&Movie]) {
    for (rank, movie) in movies.iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), format_movie(movie));
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("  {}", "No recommendations available.".yellow());
        return;
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {}",
            (rank + 1).to_string().green(),
            format_movie(&rec.movie)
        );
        println!("   {}", rec.reason.to_string().dimmed());
    }
}
