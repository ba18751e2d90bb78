use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use needledrop_config::{load as load_config, AppConfig};
use needledrop_lastfm::{collect_top_albums, dedup_chart_albums, LastFmClient, DEFAULT_PERIOD_SCHEDULE};
use needledrop_library::list_artist_directories;
use needledrop_matching::{match_name, MatchOutcome};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "needledrop",
    about = "Match Last.fm listening charts against a local music library"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve artist names against the library's directory names
    Find {
        /// Music library root; its subdirectories are the candidate
        /// artists. Falls back to library.root from the config.
        library_path: Option<PathBuf>,
        /// Files with one artist name per line; stdin when omitted
        files: Vec<PathBuf>,
    },
    /// Fetch a Last.fm user's top albums and print a deduplicated wantlist
    Poll {
        /// Last.fm username
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.telemetry.log_level);

    match cli.command {
        Command::Find {
            library_path,
            files,
        } => {
            let library_path = effective_library_path(library_path, &config);
            run_find(&library_path, &files, config.matching.max_distance_ratio)
        }
        Command::Poll { user } => run_poll(&config, &user).await,
    }
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer().with_target(true).with_level(true);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn effective_library_path(arg: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    arg.unwrap_or_else(|| config.library.root.clone())
}

#[derive(Debug, PartialEq, Eq)]
enum Resolution {
    Resolved(PathBuf),
    Skipped {
        query: String,
        closest: String,
        distance: usize,
    },
}

fn run_find(library_path: &Path, files: &[PathBuf], max_distance_ratio: f64) -> Result<()> {
    let candidates = list_artist_directories(library_path)
        .with_context(|| format!("could not list music library at {}", library_path.display()))?;
    if candidates.is_empty() {
        bail!(
            "no artist directories found under {}",
            library_path.display()
        );
    }

    let queries = read_query_lines(files)?;
    for resolution in resolve_queries(library_path, &candidates, &queries, max_distance_ratio)? {
        match resolution {
            Resolution::Resolved(path) => println!("{}", path.display()),
            Resolution::Skipped {
                query,
                closest,
                distance,
            } => {
                warn!(target: "cli", query = %query, closest = %closest, distance, "no acceptable match");
                eprintln!(
                    "No artist match found for \"{query}\" (closest option was \"{closest}\"). Skipping."
                );
            }
        }
    }

    Ok(())
}

/// Resolve each query in order; a rejection never stops the batch.
fn resolve_queries(
    library_path: &Path,
    candidates: &[String],
    queries: &[String],
    max_distance_ratio: f64,
) -> Result<Vec<Resolution>> {
    let mut resolutions = Vec::with_capacity(queries.len());
    for query in queries {
        let resolution = match match_name(query, candidates, max_distance_ratio)? {
            MatchOutcome::Accepted { candidate, .. } => {
                Resolution::Resolved(library_path.join(candidate))
            }
            MatchOutcome::Rejected { closest, distance } => Resolution::Skipped {
                query: query.clone(),
                closest,
                distance,
            },
        };
        resolutions.push(resolution);
    }
    Ok(resolutions)
}

/// Read query names, one per line, from the given files or from stdin
/// when none are listed. Surrounding whitespace is trimmed; lines that
/// trim to empty are kept as (degenerate) queries.
fn read_query_lines(files: &[PathBuf]) -> Result<Vec<String>> {
    let mut raw = String::new();

    if files.is_empty() {
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("reading artist names from stdin")?;
    } else {
        for file in files {
            let contents = fs::read_to_string(file)
                .with_context(|| format!("reading artist names from {}", file.display()))?;
            // An empty file contributes no queries, not one empty query.
            if contents.is_empty() {
                continue;
            }
            raw.push_str(&contents);
            if !contents.ends_with('\n') {
                raw.push('\n');
            }
        }
    }

    Ok(raw.lines().map(|line| line.trim().to_string()).collect())
}

async fn run_poll(config: &AppConfig, user: &str) -> Result<()> {
    let api_key = config
        .lastfm
        .api_key
        .clone()
        .or_else(|| std::env::var("LASTFM_API_KEY").ok())
        .context(
            "a Last.fm API key is required (set lastfm.api_key or the LASTFM_API_KEY environment variable)",
        )?;

    let requests_per_second = config.lastfm.max_requests_per_second.max(1) as u64;
    let mut builder = LastFmClient::builder(api_key)
        .rate_limit_interval(Duration::from_millis(1000 / requests_per_second));
    if let Some(base_url) = &config.lastfm.base_url {
        builder = builder.base_url(base_url);
    }
    let client = builder.build()?;

    let albums = collect_top_albums(&client, user, &DEFAULT_PERIOD_SCHEDULE).await?;
    info!(target: "cli", count = albums.len(), "collected chart albums");

    for (artist, album) in dedup_chart_albums(&albums) {
        println!("{} - {}", artist, album);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn query_lines_come_from_files_in_order() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");

        let mut handle = fs::File::create(&first).expect("file should be created");
        writeln!(handle, "  Nirvana  ").unwrap();
        writeln!(handle, "Pixies").unwrap();
        drop(handle);

        // No trailing newline on the last file.
        fs::write(&second, "Blur").expect("file should be written");

        let queries = read_query_lines(&[first, second]).expect("reading should succeed");
        assert_eq!(
            queries,
            vec!["Nirvana".to_string(), "Pixies".to_string(), "Blur".to_string()]
        );
    }

    #[test]
    fn empty_file_contributes_no_queries() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let empty = dir.path().join("empty.txt");
        let names = dir.path().join("names.txt");
        fs::write(&empty, "").expect("file should be written");
        fs::write(&names, "Pixies\n").expect("file should be written");

        let queries =
            read_query_lines(&[empty.clone(), names]).expect("reading should succeed");
        assert_eq!(queries, vec!["Pixies".to_string()]);

        let queries = read_query_lines(&[empty]).expect("reading should succeed");
        assert!(queries.is_empty());
    }

    #[test]
    fn library_path_falls_back_to_config_root() {
        let mut config = AppConfig::default();
        config.library.root = PathBuf::from("/music");

        assert_eq!(
            effective_library_path(None, &config),
            PathBuf::from("/music")
        );
        assert_eq!(
            effective_library_path(Some(PathBuf::from("/elsewhere")), &config),
            PathBuf::from("/elsewhere")
        );
    }

    #[test]
    fn blank_lines_are_kept_as_degenerate_queries() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let file = dir.path().join("names.txt");
        fs::write(&file, "Nirvana\n\nPixies\n").expect("file should be written");

        let queries = read_query_lines(&[file]).expect("reading should succeed");
        assert_eq!(
            queries,
            vec!["Nirvana".to_string(), String::new(), "Pixies".to_string()]
        );
    }

    #[test]
    fn one_rejection_does_not_stop_the_batch() {
        let candidates = vec!["Nirvana".to_string(), "Pixies".to_string()];
        let queries = vec![
            "Nirvana".to_string(),
            "Xqwzytv".to_string(),
            "Pixies".to_string(),
        ];

        let resolutions =
            resolve_queries(Path::new("/music"), &candidates, &queries, 0.5).unwrap();

        assert_eq!(resolutions.len(), 3);
        assert_eq!(
            resolutions[0],
            Resolution::Resolved(PathBuf::from("/music/Nirvana"))
        );
        assert!(matches!(resolutions[1], Resolution::Skipped { .. }));
        assert_eq!(
            resolutions[2],
            Resolution::Resolved(PathBuf::from("/music/Pixies"))
        );
    }

    #[test]
    fn resolved_paths_join_the_library_root() {
        let candidates = vec!["Sigur Ros (Iceland)".to_string()];
        let queries = vec!["Sigur Rós".to_string()];

        let resolutions =
            resolve_queries(Path::new("/music"), &candidates, &queries, 0.5).unwrap();

        assert_eq!(
            resolutions,
            vec![Resolution::Resolved(PathBuf::from(
                "/music/Sigur Ros (Iceland)"
            ))]
        );
    }
}
