//! `backref` command-line front end

mod commands;

use anyhow::{Context, Result};
use backref_core::BackrefConfig;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let snapshot = Arg::new("snapshot")
        .long("snapshot")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Space snapshot JSON file");
    let entry = Arg::new("entry")
        .long("entry")
        .help("Entry to treat as open in the editor (defaults to the snapshot's)");

    Command::new("backref")
        .version(backref_core::VERSION)
        .about("List and remove links pointing at a CMS entry")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .subcommand(
            Command::new("prune")
                .about("Print an entry with its links to TARGET removed")
                .arg(Arg::new("target").long("target").required(true).help("Linked entry id"))
                .arg(
                    Arg::new("file")
                        .value_parser(value_parser!(PathBuf))
                        .help("Entry JSON file (stdin if omitted)"),
                ),
        )
        .subcommand(
            Command::new("incoming")
                .about("Show entries linking to the open entry")
                .arg(snapshot.clone())
                .arg(entry.clone()),
        )
        .subcommand(
            Command::new("unlink")
                .about("Remove links to the open entry from TARGET")
                .arg(snapshot)
                .arg(entry)
                .arg(Arg::new("target").long("target").required(true).help("Entry to edit"))
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Do not write the snapshot back"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<BackrefConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Ok(BackrefConfig::load(path)?),
        None => Ok(BackrefConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("backref=info".parse()?))
        .init();

    let matches = cli().get_matches();
    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("prune", args)) => {
            let target = args.get_one::<String>("target").context("missing --target")?;
            let raw = match args.get_one::<PathBuf>("file") {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            println!("{}", commands::prune(&raw, target)?);
        }
        Some(("incoming", args)) => {
            let path = args.get_one::<PathBuf>("snapshot").context("missing --snapshot")?;
            let host = commands::load_host(path, args.get_one::<String>("entry").map(String::as_str))?;
            print!("{}", commands::incoming(host, config).await?);
        }
        Some(("unlink", args)) => {
            let path = args.get_one::<PathBuf>("snapshot").context("missing --snapshot")?;
            let target = args.get_one::<String>("target").context("missing --target")?;
            let host = commands::load_host(path, args.get_one::<String>("entry").map(String::as_str))?;

            let (report, snapshot) = commands::unlink(host, config, target).await?;
            println!("{report}");

            if args.get_flag("dry-run") {
                tracing::info!("dry run, snapshot not written");
            } else {
                std::fs::write(path, snapshot.to_json()?)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
        }
        _ => {}
    }

    Ok(())
}
