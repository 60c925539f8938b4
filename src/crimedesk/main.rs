use chrono::{DateTime, FixedOffset, Utc};
use clap::Parser;
use colored::*;
use crimedesk::api::{CmdMessage, CmdResult, ConfigAction, DeskApi, DeskPaths, MessageLevel};
use crimedesk::config::{DeskConfig, CONFIG_KEYS};
use crimedesk::error::{DeskError, Result};
use crimedesk::model::{
    Attachment, CaseDraft, CaseRecord, Labeled, DATE_FORMAT, TIMESTAMP_FORMAT,
};
use crimedesk::stats::{CaseStats, Tally};
use crimedesk::store::fs::FsAttachmentStore;
use directories::ProjectDirs;
use std::fmt::Display;
use std::fs;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, FilterArgs, OfficerAction, RegisterArgs, SessionLine};

const DATA_DIR_ENV: &str = "CRIMEDESK_HOME";
const PROMPT: &str = "crimedesk> ";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("crimedesk=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

struct AppContext {
    api: DeskApi<FsAttachmentStore>,
}

enum Flow {
    Continue,
    Quit,
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    let (input, interactive): (Box<dyn BufRead>, bool) = match &cli.script {
        Some(path) => {
            let file = fs::File::open(path).map_err(DeskError::Io)?;
            (Box::new(BufReader::new(file)), false)
        }
        None => {
            let interactive = io::stdin().is_terminal();
            (Box::new(BufReader::new(io::stdin())), interactive)
        }
    };

    if interactive {
        println!(
            "{} (type {} for commands, {} to leave)",
            "Crime Unit Management".bold(),
            "help".cyan(),
            "quit".cyan()
        );
    }

    let mut lines = input.lines();
    loop {
        if interactive {
            print!("{}", PROMPT);
            io::stdout().flush().map_err(DeskError::Io)?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(DeskError::Io)?;
        if let Flow::Quit = handle_line(&mut ctx, &line) {
            break;
        }
    }

    tracing::debug!(cases = ctx.api.session().len(), "session ended");
    Ok(())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let config = match DeskConfig::load(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "could not read config, using defaults");
            DeskConfig::default()
        }
    };

    let paths = DeskPaths::new(data_dir);
    let attachments = FsAttachmentStore::new(paths.attachments_dir(&config));
    tracing::debug!(
        data_dir = %paths.data_dir.display(),
        attachments = %paths.attachments_dir(&config).display(),
        "session starting"
    );

    Ok(AppContext {
        api: DeskApi::new(attachments, paths, config),
    })
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "crimedesk", "crimedesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DeskError::Config("could not determine a data directory".into()))
}

fn handle_line(ctx: &mut AppContext, line: &str) -> Flow {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Flow::Continue;
    }

    let Some(words) = shlex::split(line) else {
        print_error(&DeskError::InvalidValue("unbalanced quotes".into()));
        return Flow::Continue;
    };

    let parsed = match SessionLine::try_parse_from(words) {
        Ok(parsed) => parsed,
        Err(e) => {
            // help and usage errors alike; the session keeps going
            let _ = e.print();
            return Flow::Continue;
        }
    };

    let outcome = match parsed.command {
        Commands::Register(args) => handle_register(ctx, args),
        Commands::List(filters) => handle_list(ctx, &filters, None),
        Commands::Search { term, filters } => handle_list(ctx, &filters, Some(term)),
        Commands::Show { id } => handle_show(ctx, &id),
        Commands::Stats(filters) => handle_stats(ctx, &filters),
        Commands::Officer { action } => handle_officer(ctx, action),
        Commands::Export { filters, out } => handle_export(ctx, &filters, out),
        Commands::Backup { out } => handle_backup(ctx, out),
        Commands::Files { id, extract } => handle_files(ctx, &id, extract),
        Commands::Clear { yes } => handle_clear(ctx, yes),
        Commands::Config { key, value } => handle_config(ctx, key, value),
        Commands::Info => handle_info(ctx),
        Commands::Quit => return Flow::Quit,
    };

    if let Err(e) = outcome {
        print_error(&e);
    }
    Flow::Continue
}

fn handle_register(ctx: &mut AppContext, args: RegisterArgs) -> Result<()> {
    let attachments = args
        .attachments
        .iter()
        .map(|path| read_attachment(path))
        .collect::<Result<Vec<_>>>()?;

    let draft = CaseDraft {
        crime_type: args.crime_type,
        location: args.location,
        officer: args.officer,
        status: args.status,
        priority: args.priority,
        description: args.description,
        notes: args.notes,
        incident_date: args.date,
        attachments,
    };

    let result = ctx.api.register_case(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes = fs::read(path).map_err(DeskError::Io)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Attachment::new(file_name, bytes))
}

fn handle_list(ctx: &mut AppContext, filters: &FilterArgs, term: Option<String>) -> Result<()> {
    let mut query = filters.to_query();
    if term.is_some() {
        query.text = term;
    }
    let result = ctx.api.list_cases(&query)?;
    print_cases(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.show_case(id)?;
    for record in &result.listed_records {
        print_case_detail(record, &result);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &mut AppContext, filters: &FilterArgs) -> Result<()> {
    let result = ctx.api.case_stats(&filters.to_query())?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_officer(ctx: &mut AppContext, action: OfficerAction) -> Result<()> {
    match action {
        OfficerAction::Add { name } => {
            let result = ctx.api.add_officer(&name.join(" "))?;
            print_messages(&result.messages);
        }
        OfficerAction::List => {
            let result = ctx.api.list_officers()?;
            for (i, name) in result.officers.iter().enumerate() {
                println!("{:>3}. {}", i + 1, name);
            }
        }
    }
    Ok(())
}

fn handle_export(ctx: &mut AppContext, filters: &FilterArgs, out: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export_csv(&filters.to_query())?;
    write_artifact(ctx, &result, out)
}

fn handle_backup(ctx: &mut AppContext, out: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.backup()?;
    write_artifact(ctx, &result, out)
}

fn write_artifact(ctx: &AppContext, result: &CmdResult, out: Option<PathBuf>) -> Result<()> {
    print_messages(&result.messages);
    let Some(artifact) = &result.artifact else {
        return Ok(());
    };
    let path = match out {
        Some(path) => {
            artifact.write_to(&path)?;
            path
        }
        None => artifact.write_to_dir(&ctx.api.export_dir())?,
    };
    print_messages(&[CmdMessage::success(format!(
        "Wrote {} case(s) to {}",
        artifact.record_count,
        path.display()
    ))]);
    Ok(())
}

fn handle_files(ctx: &mut AppContext, id: &str, extract: Option<PathBuf>) -> Result<()> {
    let result = match extract {
        Some(dest) => ctx.api.extract_files(id, &dest)?,
        None => ctx.api.case_files(id)?,
    };
    if result.written_paths.is_empty() {
        for reference in &result.attachments {
            let marker = if reference.path.exists() {
                "".normal()
            } else {
                " (missing)".red()
            };
            println!("  {}{}", reference.path.display(), marker);
        }
    } else {
        for path in &result.written_paths {
            println!("  {}", path.display());
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        print_messages(&[CmdMessage::warning(
            "This will delete all cases. Run `clear --yes` to confirm.",
        )]);
        return Ok(());
    }
    let result = ctx.api.clear()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        for key in CONFIG_KEYS {
            println!("{} = {}", key, config.get(key).unwrap_or_default());
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_info(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.info()?;
    if let Some(info) = &result.info {
        println!("{}", "System Information".bold());
        print_field("Total Cases", info.total_cases);
        print_field("Registered Officers", info.officers);
        let last = match info.last_registered {
            Some(at) => format!(
                "{} ({})",
                at.format(TIMESTAMP_FORMAT),
                format_time_ago(at)
            ),
            None => "never".to_string(),
        };
        print_field("Last Registration", last);
        print_field("Data Directory", info.data_dir.display());
        print_field("Evidence Uploads", info.attachments_dir.display());
        print_field("Exports", info.export_dir.display());
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_error(error: &DeskError) {
    match error {
        DeskError::Validation(messages) => {
            for message in messages {
                eprintln!("{} {}", "✗".red(), message.red());
            }
        }
        other => eprintln!("{} {}", "Error:".red().bold(), other),
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const ID_WIDTH: usize = 21;
const TYPE_WIDTH: usize = 18;
const LOCATION_WIDTH: usize = 22;
const OFFICER_WIDTH: usize = 17;
const STATUS_WIDTH: usize = 20;
const PRIORITY_WIDTH: usize = 9;

fn print_cases(result: &CmdResult) {
    if result.total_records == 0 {
        println!("No cases found. Add some cases to get started!");
        return;
    }

    println!(
        "{}",
        format!(
            "Showing {} of {} cases",
            result.listed_records.len(),
            result.total_records
        )
        .bold()
    );
    if result.listed_records.is_empty() {
        println!("No cases match your current filters. Try adjusting your search criteria.");
        return;
    }

    println!(
        "{}",
        format!(
            "{}{}{}{}{}{}{}",
            pad("ID", ID_WIDTH),
            pad("Type", TYPE_WIDTH),
            pad("Location", LOCATION_WIDTH),
            pad("Officer", OFFICER_WIDTH),
            pad("Status", STATUS_WIDTH),
            pad("Priority", PRIORITY_WIDTH),
            "Incident"
        )
        .dimmed()
    );

    for record in &result.listed_records {
        let priority = pad(record.priority.label(), PRIORITY_WIDTH);
        let priority = match record.priority.label() {
            "Critical" => priority.red().bold(),
            "High" => priority.yellow(),
            _ => priority.normal(),
        };
        println!(
            "{}{}{}{}{}{}{}",
            pad(record.id.as_str(), ID_WIDTH).yellow(),
            pad(record.crime_type.label(), TYPE_WIDTH),
            pad(&record.location, LOCATION_WIDTH),
            pad(&record.officer, OFFICER_WIDTH),
            pad(record.status.label(), STATUS_WIDTH),
            priority,
            record.incident_date.format(DATE_FORMAT)
        );
    }
}

fn print_case_detail(record: &CaseRecord, result: &CmdResult) {
    println!(
        "{} {} | {}",
        record.id.as_str().yellow(),
        record.crime_type.label().bold(),
        record.status
    );
    println!("--------------------------------");
    print_field("Location", &record.location);
    print_field("Officer", &record.officer);
    print_field("Status", record.status);
    print_field("Priority", record.priority);
    print_field("Incident Date", record.incident_date.format(DATE_FORMAT));
    print_field(
        "Registered",
        format!(
            "{} ({})",
            record.registered_at.format(TIMESTAMP_FORMAT),
            format_time_ago(record.registered_at)
        ),
    );
    print_field("Files", format!("{} attached", record.attached_file_count));
    println!("\n{}", "Description:".bold());
    println!("{}", record.description);
    if let Some(notes) = &record.notes {
        println!("\n{}", "Notes:".bold());
        println!("{}", notes);
    }
    if !result.attachments.is_empty() {
        println!("\n{}", "Evidence Files:".bold());
        for reference in &result.attachments {
            println!("  {}", reference.file_name);
        }
    }
}

fn print_field(label: &str, value: impl Display) {
    println!("{} {}", format!("{}:", label).bold(), value);
}

const BAR_WIDTH: usize = 30;

fn print_stats(stats: &CaseStats) {
    println!("{}", "Crime Analytics".bold());
    println!(
        "Total Cases: {}   Open Cases: {} ({:.1}%)   High Priority: {}   Avg Cases/Officer: {:.1}",
        stats.total, stats.open, stats.open_share, stats.high_priority, stats.avg_cases_per_officer
    );

    print_tallies("Case Status Distribution", &stats.by_status);
    print_tallies("Cases by Priority Level", &stats.by_priority);
    print_tallies("Crime Types Frequency", &stats.by_crime_type);
    print_tallies("Cases per Officer", &stats.by_officer);

    if !stats.trend.is_empty() {
        println!("\n{}", "Crime Trends Over Time".bold());
        for point in &stats.trend {
            println!(
                "  {}  {}{:>4}",
                point.month,
                pad(point.crime_type.label(), TYPE_WIDTH),
                point.count
            );
        }
    }
}

fn print_tallies<K: Display>(title: &str, tallies: &[Tally<K>]) {
    println!("\n{}", title.bold());
    let max = tallies.iter().map(|t| t.count).max().unwrap_or(0);
    let labels: Vec<String> = tallies.iter().map(|t| t.key.to_string()).collect();
    let label_width = labels.iter().map(|l| l.width()).max().unwrap_or(0) + 2;

    for (tally, label) in tallies.iter().zip(&labels) {
        let bar_len = if max == 0 {
            0
        } else {
            (tally.count * BAR_WIDTH).div_ceil(max)
        };
        println!(
            "  {}{:>4} {}",
            pad(label, label_width),
            tally.count,
            "■".repeat(bar_len).cyan()
        );
    }
}

/// Left-aligns `s` in a column of `width` cells, truncating with an ellipsis.
fn pad(s: &str, width: usize) -> String {
    let text = truncate_to_width(s, width.saturating_sub(1));
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<FixedOffset>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
