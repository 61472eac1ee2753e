use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use mood_journal::aggregate::{CalendarCell, Period};
use mood_journal::config::AppConfig;
use mood_journal::export::{export_entries, ExportFormat};
use mood_journal::logging::{init_logging, OperationTimer};
use mood_journal::metrics::MetricsCollector;
use mood_journal::preferences::{Preferences, ThemePreference};
use mood_journal::storage::SledBlobStore;
use mood_journal::validation::InputValidator;
use mood_journal::{EntryKey, JournalEntry, JournalService, LexiconScorer, Mood};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage directory (overrides storage.path)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write today's entry
    Add {
        /// Entry text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List entries of a week
    List {
        /// Weeks back (negative) or forward from the current week
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        week_offset: i64,

        /// List every entry instead of one week
        #[arg(long, conflicts_with = "week_offset")]
        all: bool,

        /// List the entries of one day (YYYY-MM-DD)
        #[arg(short, long, conflicts_with_all = ["week_offset", "all"])]
        day: Option<String>,
    },
    /// Show a single entry
    Show {
        /// Entry id or timestamp
        key: String,
    },
    /// Replace an entry's text and rescore it
    Edit {
        /// Entry id or timestamp
        key: String,

        /// New text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Delete entries
    Delete {
        /// Entry id or timestamp
        key: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Mood counts and percentages
    Stats {
        /// week, month or all
        #[arg(short, long, default_value = "week")]
        period: String,
    },
    /// This week against last week
    Compare,
    /// Mood of each day of a week
    Bars {
        /// Weeks back (negative) or forward from the current week
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        week_offset: i64,
    },
    /// Month calendar coloured by mood
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Entries of today and the two days before
    Recent,
    /// Export every entry to a file
    Export {
        /// Output format (txt, csv or json)
        #[arg(short, long)]
        format: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<String>,
    },
    /// Display preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print the stored preferences
    Show {
        /// Theme the system currently reports
        #[arg(long, default_value = "light")]
        system_theme: String,
    },
    /// Change stored preferences
    Set {
        /// Explicit theme (light or dark)
        #[arg(long)]
        theme: Option<String>,

        /// Follow the system theme
        #[arg(long)]
        use_system_theme: Option<bool>,

        /// Scale text up
        #[arg(long)]
        large_text: Option<bool>,

        /// Theme the system currently reports
        #[arg(long, default_value = "light")]
        system_theme: String,
    },
    /// Switch to the theme opposite to the active one
    ToggleTheme {
        /// Theme the system currently reports
        #[arg(long, default_value = "light")]
        system_theme: String,
    },
}

type Service = JournalService<SledBlobStore, LexiconScorer>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.storage.path = dir.to_string_lossy().into_owned();
    }

    // Initialize logging; the guard flushes the log file on exit
    let log_file = config.logging.file_path.as_ref().map(PathBuf::from);
    let _guard = init_logging(
        Some(&config.get_log_level()),
        log_file.as_deref(),
        config.logging.format == "json",
    )?;

    if let Err(e) = MetricsCollector::init() {
        warn!("Metrics disabled: {}", e);
    }

    info!("Starting mood-journal");

    if let Commands::Config = cli.command {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let storage_path = if cli.data_dir.is_some() {
        PathBuf::from(&config.storage.path)
    } else {
        config.storage_path()
    };
    debug!(path = %storage_path.display(), "Opening storage");
    let backend = SledBlobStore::open(&storage_path)
        .with_context(|| format!("Failed to open storage at {}", storage_path.display()))?;

    if let Commands::Prefs { action } = &cli.command {
        return run_prefs(&backend, action).await;
    }

    let now = Local::now();
    let today = now.date_naive();
    let scorer = LexiconScorer::new()?;
    let mut service = JournalService::open(backend, scorer, &config, today).await?;

    match cli.command {
        Commands::Add { text } => add_entry(&mut service, &text.join(" ")).await?,
        Commands::List { week_offset, all, day } => {
            list_entries(&service, week_offset, all, day.as_deref(), today)?;
        }
        Commands::Show { key } => show_entry(&service, &key)?,
        Commands::Edit { key, text } => edit_entry(&mut service, &key, &text.join(" ")).await?,
        Commands::Delete { key, yes } => delete_entry(&mut service, &key, yes).await?,
        Commands::Stats { period } => print_stats(&service, &period, today)?,
        Commands::Compare => print_comparison(&service, today)?,
        Commands::Bars { week_offset } => print_bars(&service, week_offset, today)?,
        Commands::Calendar { month } => print_calendar(&service, month.as_deref(), today)?,
        Commands::Recent => print_recent(&service, today),
        Commands::Export { format, output_dir } => export(&service, &config, format, output_dir)?,
        Commands::Prefs { .. } | Commands::Config => {}
    }

    Ok(())
}

/// Score and store today's entry
async fn add_entry(service: &mut Service, text: &str) -> Result<()> {
    match service.submit(text, Local::now()).await? {
        Some(entry) => {
            println!("Saved {} {} ({})", entry.mood, entry.emoji, entry.id);
        }
        None => println!("Nothing to save: entry text is blank"),
    }
    Ok(())
}

fn list_entries(service: &Service, week_offset: i64, all: bool, day: Option<&str>, today: NaiveDate) -> Result<()> {
    let entries: Vec<&JournalEntry> = if all {
        println!("All entries");
        service.entries().iter().collect()
    } else if let Some(raw) = day {
        let date = InputValidator::parse_date(raw)?;
        println!("{}", date.format("%a %b %-d, %Y"));
        service.day_entries(date)
    } else {
        println!("{}", service.week_label(week_offset, today)?);
        service.week_entries(week_offset, today)?
    };

    if entries.is_empty() {
        println!("No entries");
        return Ok(());
    }
    for entry in entries {
        print_entry_line(entry);
    }
    Ok(())
}

fn show_entry(service: &Service, key: &str) -> Result<()> {
    let key: EntryKey = key.parse()?;
    let Some(entry) = service.get(&key) else {
        bail!("No entry found for {key}");
    };

    println!("ID:    {}", entry.id);
    println!("Date:  {}, {}", entry.day, entry.date.format("%b %-d, %Y %-I:%M %p"));
    println!("Mood:  {} {}", entry.mood, entry.emoji);
    println!();
    println!("{}", entry.text);
    Ok(())
}

async fn edit_entry(service: &mut Service, key: &str, text: &str) -> Result<()> {
    let key: EntryKey = key.parse()?;
    match service.edit(&key, text, Local::now()).await? {
        Some(entry) => println!("Updated {} {} ({})", entry.mood, entry.emoji, entry.id),
        None => println!("Nothing to save: entry text is blank"),
    }
    Ok(())
}

async fn delete_entry(service: &mut Service, key: &str, confirmed: bool) -> Result<()> {
    let key: EntryKey = key.parse()?;
    if !confirmed {
        warn!(%key, "Delete not confirmed");
        println!("Refusing to delete {key} without --yes");
        return Ok(());
    }
    let removed = service.delete(&key).await?;
    println!("Deleted {removed} entr{}", if removed == 1 { "y" } else { "ies" });
    Ok(())
}

fn print_stats(service: &Service, period: &str, today: NaiveDate) -> Result<()> {
    let period: Period = period.parse()?;
    let summary = service.summary(period, today)?;

    println!("{} entries", summary.counts.total());
    for mood in Mood::ALL {
        println!(
            "{:<9} {} {:>3} {:>3}%",
            mood.as_str(),
            mood.emoji(),
            summary.counts.get(mood),
            summary.percentages.get(mood)
        );
    }
    Ok(())
}

fn print_comparison(service: &Service, today: NaiveDate) -> Result<()> {
    let comparison = service.week_comparison(today)?;
    println!("{} {}", comparison.trend_emoji(), comparison.summary());
    Ok(())
}

fn print_bars(service: &Service, week_offset: i64, today: NaiveDate) -> Result<()> {
    println!("{}", service.week_label(week_offset, today)?);
    for bar in service.week_bars(week_offset, today)? {
        let mood = bar.mood.map_or("-", Mood::as_str);
        println!("{} {:<9} {}", bar.label, mood, bar.color());
    }
    Ok(())
}

fn print_calendar(service: &Service, month: Option<&str>, today: NaiveDate) -> Result<()> {
    let (year, month) = match month {
        Some(raw) => InputValidator::parse_month(raw)?,
        None => (today.year(), today.month()),
    };
    let calendar = service.calendar(year, month)?;

    println!("{}", calendar.title());
    println!("  S   M   T   W   T   F   S");
    for week in calendar.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                CalendarCell::Empty => "   ".to_string(),
                CalendarCell::Day { date, mood } => {
                    format!("{:>2}{}", date.day(), mood.map_or(' ', mood_marker))
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }
    println!("+ positive  ~ neutral  - negative");
    Ok(())
}

const fn mood_marker(mood: Mood) -> char {
    match mood {
        Mood::Positive => '+',
        Mood::Neutral => '~',
        Mood::Negative => '-',
    }
}

fn print_recent(service: &Service, today: NaiveDate) {
    let recent = service.recent(today);
    if !recent.any() {
        println!("No entries in the last three days");
        return;
    }
    for (label, entry) in [
        ("Today", recent.today),
        ("Yesterday", recent.yesterday),
        ("Two days ago", recent.two_days_ago),
    ] {
        match entry {
            Some(entry) => println!("{label}: {} {}", entry.emoji, entry.text),
            None => println!("{label}: -"),
        }
    }
}

fn export(service: &Service, config: &AppConfig, format: Option<String>, output_dir: Option<String>) -> Result<()> {
    let format: ExportFormat = format.as_deref().unwrap_or(&config.export.default_format).parse()?;
    let output_dir = PathBuf::from(output_dir.unwrap_or_else(|| config.export.output_directory.clone()));
    InputValidator::validate_output_dir(&output_dir)?;

    let timer = OperationTimer::new("export");
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let path = export_entries(service.entries(), format, &output_dir, &timestamp)?;
    timer.finish();

    info!(path = %path.display(), count = service.entries().len(), "Exported entries");
    println!("Exported {} entries to {}", service.entries().len(), path.display());
    Ok(())
}

async fn run_prefs(backend: &SledBlobStore, action: &PrefsAction) -> Result<()> {
    let mut preferences = Preferences::load(backend).await?;

    match action {
        PrefsAction::Show { system_theme } => {
            let system: ThemePreference = system_theme.parse()?;
            print_preferences(&preferences, system);
        }
        PrefsAction::Set {
            theme,
            use_system_theme,
            large_text,
            system_theme,
        } => {
            let system: ThemePreference = system_theme.parse()?;
            let theme = theme.as_deref().map(str::parse::<ThemePreference>).transpose()?;
            preferences.apply(theme, *use_system_theme, *large_text);
            preferences.save(backend).await?;
            print_preferences(&preferences, system);
        }
        PrefsAction::ToggleTheme { system_theme } => {
            let system: ThemePreference = system_theme.parse()?;
            preferences.toggle_theme(system);
            preferences.save(backend).await?;
            print_preferences(&preferences, system);
        }
    }
    Ok(())
}

fn print_preferences(preferences: &Preferences, system: ThemePreference) {
    let stored = preferences.theme.map_or("unset", ThemePreference::as_str);
    println!("Theme:            {} (stored: {stored})", preferences.active_theme(system));
    println!("Use system theme: {}", preferences.use_system_theme);
    println!("Large text:       {} (scale {})", preferences.large_text, preferences.font_scale());
}

fn print_entry_line(entry: &JournalEntry) {
    let mut preview: String = entry.text.chars().take(60).collect();
    if entry.text.chars().count() > 60 {
        preview.push_str("...");
    }
    println!(
        "{} {:<9} {} {}  {}",
        entry.date.format("%a %b %-d"),
        entry.mood.as_str(),
        entry.emoji,
        preview,
        entry.id
    );
}
