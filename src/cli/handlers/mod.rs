use std::path::PathBuf;

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output;
use crate::io::{config_io, filter_io, source_io};
use crate::model::config::{Settings, SortKey};
use crate::model::dimension::Dimension;
use crate::model::filter::FilterSet;
use crate::ops::build::BuildContext;
use crate::ops::{files, filter, pipeline};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config_dir = match cli.config_dir {
        Some(dir) => PathBuf::from(dir),
        None => config_io::config_dir(),
    };

    match cli.command {
        Commands::List(args) => cmd_list(&config_dir, args, json),
        Commands::Add(args) => cmd_add(&config_dir, args),
        Commands::Filter(args) => cmd_filter(&config_dir, args),
        Commands::Sort(args) => cmd_sort(&config_dir, args),
        Commands::Config(args) => cmd_config(&config_dir, args),
        Commands::File(args) => cmd_file(&config_dir, args),
    }
}

fn today() -> chrono::NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(
    config_dir: &std::path::Path,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (settings, _) = config_io::read_config(config_dir)?;
    let filters = if args.no_filters {
        FilterSet::default()
    } else {
        filter_io::read_filters(config_dir)
    };

    let (contents, warnings) = source_io::read_sources(&settings.files);
    for warning in &warnings {
        eprintln!("warning: {}", warning);
    }

    let mut ctx = BuildContext::new(today());
    let snapshot = pipeline::run(&contents, &filters, &settings, &mut ctx);

    if json {
        println!("{}", serde_json::to_string_pretty(&output::snapshot_json(&snapshot))?);
    } else if args.attributes {
        output::print_attributes(&snapshot);
    } else {
        output::print_snapshot(&snapshot);
    }
    Ok(())
}

fn cmd_add(
    config_dir: &std::path::Path,
    args: AddArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (settings, _) = config_io::read_config(config_dir)?;
    let Some(active) = settings.active_files().next() else {
        return Err("no active task file; run `sift file add <path>` first".into());
    };

    let line = if settings.append_creation_date {
        with_creation_date(&args.text, today())
    } else {
        args.text
    };

    source_io::append_line(&active.path, &line)?;
    println!("added to {}", active.path.display());
    Ok(())
}

/// Insert today's date as creation date unless the line already has one,
/// keeping any completion or priority markers in front.
fn with_creation_date(text: &str, today: chrono::NaiveDate) -> String {
    match crate::parse::task_parser::parse(text) {
        Ok(parsed) if parsed.created.is_none() && !parsed.complete => {
            match parsed.priority {
                Some(p) => format!("({}) {} {}", p, today, parsed.body),
                None => format!("{} {}", today, parsed.body),
            }
        }
        _ => text.to_string(),
    }
}

fn cmd_filter(
    config_dir: &std::path::Path,
    args: FilterArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.clear {
        filter_io::write_filters(config_dir, &FilterSet::default())?;
        println!("filters cleared");
        return Ok(());
    }

    let (Some(dimension), Some(value)) = (args.dimension, args.value) else {
        let filters = filter_io::read_filters(config_dir);
        if filters.is_empty() {
            println!("no filters set");
        }
        for (dim, rules) in &filters.rules {
            for rule in rules {
                let mode = if rule.exclude { "exclude" } else { "include" };
                println!("{} {} ({})", dim.as_str(), rule.value, mode);
            }
        }
        return Ok(());
    };

    let Some(dimension) = Dimension::from_key(&dimension) else {
        return Err(format!("unknown dimension '{}'", dimension).into());
    };

    let mut filters = filter_io::read_filters(config_dir);
    filter::toggle(&mut filters, dimension, &value, args.exclude);
    filter_io::write_filters(config_dir, &filters)?;

    for atom in value.split(',').map(str::trim).filter(|a| !a.is_empty()) {
        let state = match filters.state_of(dimension, atom) {
            Some(true) => "excluded",
            Some(false) => "included",
            None => "off",
        };
        println!("{} {}: {}", dimension.as_str(), atom, state);
    }
    Ok(())
}

fn cmd_sort(
    config_dir: &std::path::Path,
    args: SortArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut settings, mut doc) = config_io::read_config(config_dir)?;

    if args.reset {
        settings.sorting = Settings::default().sorting;
    } else if let Some(dimension) = args.dimension {
        if Dimension::from_key(&dimension).is_none() {
            return Err(format!("unknown dimension '{}'", dimension).into());
        }
        // Move the key to the front; create it if the persisted list
        // predates this dimension.
        let mut key = match settings.sorting.iter().position(|k| k.value == dimension) {
            Some(idx) => settings.sorting.remove(idx),
            None => SortKey {
                id: (settings.sorting.len() + 1).to_string(),
                value: dimension,
                invert: false,
            },
        };
        key.invert = args.invert;
        settings.sorting.insert(0, key);
    }

    config_io::replace_settings(&mut doc, &settings)?;
    config_io::write_config(config_dir, &doc)?;

    for key in &settings.sorting {
        let invert = if key.invert { " (inverted)" } else { "" };
        println!("{}{}", key.value, invert);
    }
    Ok(())
}

fn cmd_config(
    config_dir: &std::path::Path,
    args: ConfigArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (settings, mut doc) = config_io::read_config(config_dir)?;

    let Some(key) = args.key else {
        print_option(&settings, "show_completed");
        print_option(&settings, "show_hidden");
        print_option(&settings, "append_creation_date");
        print_option(&settings, "file_sorting");
        print_option(&settings, "convert_relative_to_absolute_dates");
        print_option(&settings, "threshold_date_in_the_future");
        print_option(&settings, "due_date_in_the_future");
        println!("future_window_days = {}", settings.future_window_days);
        return Ok(());
    };

    let Some(value) = args.value else {
        print_option(&settings, &key);
        if key == "future_window_days" {
            println!("future_window_days = {}", settings.future_window_days);
        }
        return Ok(());
    };

    if key == "future_window_days" {
        let days: i64 = value.parse()?;
        doc["future_window_days"] = toml_edit::value(days);
    } else {
        if bool_option(&settings, &key).is_none() {
            return Err(format!("unknown option '{}'", key).into());
        }
        let parsed: bool = value.parse()?;
        config_io::set_bool_option(&mut doc, &key, parsed);
    }

    config_io::write_config(config_dir, &doc)?;
    println!("{} = {}", key, value);
    Ok(())
}

fn bool_option(settings: &Settings, key: &str) -> Option<bool> {
    match key {
        "show_completed" => Some(settings.show_completed),
        "show_hidden" => Some(settings.show_hidden),
        "append_creation_date" => Some(settings.append_creation_date),
        "file_sorting" => Some(settings.file_sorting),
        "convert_relative_to_absolute_dates" => Some(settings.convert_relative_to_absolute_dates),
        "threshold_date_in_the_future" => Some(settings.threshold_date_in_the_future),
        "due_date_in_the_future" => Some(settings.due_date_in_the_future),
        _ => None,
    }
}

fn print_option(settings: &Settings, key: &str) {
    if let Some(value) = bool_option(settings, key) {
        println!("{} = {}", key, value);
    }
}

fn cmd_file(
    config_dir: &std::path::Path,
    args: FileCmd,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut settings, mut doc) = config_io::read_config(config_dir)?;

    match args.action {
        FileAction::Add { ref path } => {
            files::add_file(&mut settings.files, std::path::Path::new(&path));
        }
        FileAction::Remove { index } => {
            if index >= settings.files.len() {
                return Err(format!("no file at index {}", index).into());
            }
            files::remove_file(&mut settings.files, index);
        }
        FileAction::Use { index } => {
            if index >= settings.files.len() {
                return Err(format!("no file at index {}", index).into());
            }
            files::set_active(&mut settings.files, index);
        }
        FileAction::List => {}
    }

    if !matches!(args.action, FileAction::List) {
        config_io::replace_settings(&mut doc, &settings)?;
        config_io::write_config(config_dir, &doc)?;
    }

    if settings.files.is_empty() {
        println!("no files configured");
    }
    for (index, file) in settings.files.iter().enumerate() {
        let marker = if file.active { "*" } else { " " };
        println!("{} [{}] {}", marker, index, file.path.display());
    }
    Ok(())
}
