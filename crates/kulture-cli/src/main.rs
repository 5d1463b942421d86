//! kulture CLI tool
//!
//! Runs ranking reports over a JSON batch of takes.
//!
//! Usage:
//!   kulture leaderboard <takes.json>
//!   kulture rank <user_id> <takes.json>
//!   kulture worst-takes <takes.json>
//!   kulture verify <takes.json>
//!   kulture view <takes.json> [current_user_id]
//!
//! Pass `-` instead of a path to read the batch from stdin.

mod config;

use config::CliConfig;
use kulture_ranking::{
    build_leaderboard, verify_take, view_takes, worst_takes_with_limit, RankResponse, Take,
};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Report requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Leaderboard,
    Rank { user_id: String },
    WorstTakes,
    Verify,
    View { current_user_id: Option<String> },
}

fn print_usage() {
    eprintln!("kulture - Verification and leaderboard reports for Kulture takes");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  kulture leaderboard <takes.json>              Authors ranked by points");
    eprintln!("  kulture rank <user_id> <takes.json>           One author's rank");
    eprintln!("  kulture worst-takes <takes.json>              Most downvoted takes");
    eprintln!("  kulture verify <takes.json>                   Per-take verification");
    eprintln!("  kulture view <takes.json> [current_user_id]   Take views with badges");
    eprintln!();
    eprintln!("Use - as the path to read from stdin. Community chains in the JSON");
    eprintln!("input may nest at most about 120 ancestors deep.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  KULTURE_WORST_TAKES_LIMIT  Rows in worst-takes (default: 50)");
    eprintln!("  KULTURE_MAX_CHAIN_DEPTH    Ancestor levels kept per take (default: all)");
    eprintln!("  KULTURE_PRETTY             Pretty-print JSON (default: false)");
    eprintln!("  RUST_LOG                   Log filter (default: kulture=info)");
}

/// Parse `args` (without the program name) into a command and input path.
fn parse_args(args: &[String]) -> Result<(Command, String), String> {
    let name = args.first().ok_or("missing command")?;
    let arg = |idx: usize, what: &str| {
        args.get(idx)
            .cloned()
            .ok_or_else(|| format!("{} requires a {} argument", name, what))
    };

    match name.as_str() {
        "leaderboard" => Ok((Command::Leaderboard, arg(1, "takes path")?)),
        "rank" => {
            let user_id = arg(1, "user_id")?;
            Ok((Command::Rank { user_id }, arg(2, "takes path")?))
        }
        "worst-takes" => Ok((Command::WorstTakes, arg(1, "takes path")?)),
        "verify" => Ok((Command::Verify, arg(1, "takes path")?)),
        "view" => {
            let path = arg(1, "takes path")?;
            let current_user_id = args.get(2).cloned();
            Ok((Command::View { current_user_id }, path))
        }
        other => Err(format!("Unknown command: {}", other)),
    }
}

/// Read and decode the take batch.
fn read_takes(path: &str) -> Result<Vec<Take>, Box<dyn std::error::Error>> {
    let raw = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path, e))?
    };
    let takes = parse_takes(&raw)?;
    tracing::info!("Loaded {} takes from {}", takes.len(), path);
    Ok(takes)
}

/// Decode a JSON batch of takes.
///
/// serde_json stops at 128 levels of nesting, which caps each community
/// chain at roughly 120 ancestors. Deeper hierarchies must be resolved
/// through the library (`CommunityDirectory`) rather than this tool.
fn parse_takes(raw: &str) -> Result<Vec<Take>, String> {
    serde_json::from_str(raw).map_err(|e| {
        if e.to_string().contains("recursion limit") {
            format!(
                "community chain nests deeper than the JSON decoder allows (about 120 levels): {}",
                e
            )
        } else {
            format!("Invalid takes JSON: {}", e)
        }
    })
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Run `command` over `takes` and return the JSON report.
fn run(
    command: &Command,
    mut takes: Vec<Take>,
    config: &CliConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(depth) = config.max_chain_depth {
        for take in &mut takes {
            take.community = take.community.truncated(depth);
        }
        tracing::debug!("Chains truncated to {} levels", depth);
    }

    let json = match command {
        Command::Leaderboard => to_json(&build_leaderboard(&takes)?, config.pretty)?,
        Command::Rank { user_id } => {
            let rank = build_leaderboard(&takes)?.rank_of(user_id);
            to_json(&RankResponse { rank }, config.pretty)?
        }
        Command::WorstTakes => {
            to_json(&worst_takes_with_limit(&takes, config.worst_takes_limit)?, config.pretty)?
        }
        Command::Verify => {
            let results = takes
                .iter()
                .map(verify_take)
                .collect::<kulture_ranking::Result<Vec<_>>>()?;
            to_json(&results, config.pretty)?
        }
        Command::View { current_user_id } => {
            to_json(&view_takes(&takes, current_user_id.as_deref())?, config.pretty)?
        }
    };
    Ok(json)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kulture=info,kulture_ranking=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if matches!(args.first().map(String::as_str), Some("-h" | "--help" | "help")) {
        print_usage();
        return Ok(());
    }

    let (command, path) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    let config = CliConfig::from_env()?;
    let takes = read_takes(&path)?;

    match run(&command, takes, &config) {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Report failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kulture_ranking::{Author, Community, Vote};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn batch() -> Vec<Take> {
        let chain = || Community::new("jazz", 2).with_parent(Community::new("music", 4));
        vec![
            Take::new("t1", Author::new("miles"), chain())
                .with_vote(Vote::up("a"))
                .with_vote(Vote::up("b")),
            Take::new("t2", Author::new("bird"), chain())
                .with_vote(Vote::up("a"))
                .with_vote(Vote::down("c")),
        ]
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_args(&args(&["leaderboard", "takes.json"])).unwrap(),
            (Command::Leaderboard, "takes.json".into())
        );
        assert_eq!(
            parse_args(&args(&["rank", "u1", "-"])).unwrap(),
            (Command::Rank { user_id: "u1".into() }, "-".into())
        );
        assert_eq!(
            parse_args(&args(&["view", "t.json", "u2"])).unwrap().0,
            Command::View { current_user_id: Some("u2".into()) }
        );
        assert_eq!(
            parse_args(&args(&["view", "t.json"])).unwrap().0,
            Command::View { current_user_id: None }
        );
    }

    #[test]
    fn rejects_bad_args() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args(&["rank", "u1"])).is_err());
        assert!(parse_args(&args(&["leaderboard"])).is_err());
        assert!(parse_args(&args(&["explode", "x"])).is_err());
    }

    #[test]
    fn leaderboard_report() {
        let out = run(&Command::Leaderboard, batch(), &CliConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["id"], "miles");
        assert_eq!(json[0]["points"], 2);
        assert_eq!(json[1]["id"], "bird");
        assert_eq!(json[1]["points"], 1);
    }

    #[test]
    fn depth_cap_applies_before_verification() {
        let config = CliConfig {
            max_chain_depth: Some(1),
            ..CliConfig::default()
        };
        let out = run(&Command::Leaderboard, batch(), &config).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["points"], 1);
    }

    #[test]
    fn rank_report() {
        let cmd = Command::Rank { user_id: "bird".into() };
        assert_eq!(run(&cmd, batch(), &CliConfig::default()).unwrap(), r#"{"rank":2}"#);
        let cmd = Command::Rank { user_id: "nobody".into() };
        assert_eq!(run(&cmd, batch(), &CliConfig::default()).unwrap(), r#"{"rank":null}"#);
    }

    #[test]
    fn worst_takes_report() {
        let out = run(&Command::WorstTakes, batch(), &CliConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["id"], "t2");
        assert_eq!(json[0]["score"], 0);
    }

    #[test]
    fn view_report_uses_current_user() {
        let cmd = Command::View { current_user_id: Some("c".into()) };
        let out = run(&cmd, batch(), &CliConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["currentUserVote"], serde_json::Value::Null);
        assert_eq!(json[1]["currentUserVote"], "DOWN");
    }

    /// JSON batch with one take whose chain has `depth` levels.
    fn nested_batch(depth: usize) -> String {
        let mut community = r#"{"id":"root","memberCount":2,"parent":null}"#.to_string();
        for i in 1..depth {
            community = format!(r#"{{"id":"c{}","memberCount":2,"parent":{}}}"#, i, community);
        }
        format!(r#"[{{"id":"t","authorId":"u","community":{}}}]"#, community)
    }

    #[test]
    fn parses_chains_within_decoder_limit() {
        let takes = parse_takes(&nested_batch(100)).unwrap();
        assert_eq!(takes[0].community.depth(), 100);
    }

    #[test]
    fn over_deep_chain_reports_nesting_limit() {
        let err = parse_takes(&nested_batch(300)).unwrap_err();
        assert!(err.contains("nests deeper"), "unexpected error: {}", err);
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = parse_takes("[{").unwrap_err();
        assert!(err.starts_with("Invalid takes JSON"));
    }

    #[test]
    fn malformed_batch_is_an_error() {
        let mut takes = batch();
        takes[0].votes.push(Vote::down("a"));
        assert!(run(&Command::Verify, takes, &CliConfig::default()).is_err());
    }
}
