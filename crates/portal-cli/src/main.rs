//! `portal` command-line tool

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{KeyVaultArgs, OptionsArgs};

fn cli() -> Command {
    Command::new("portal")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Portal form helpers: dropdown option reconciliation and Key Vault reference details")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to a TOML portal configuration"),
        )
        .subcommand(
            Command::new("options")
                .about("Reconcile a JSON record list with a proposed new entry")
                .arg(
                    Arg::new("records")
                        .long("records")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of objects with `id` and `name`"),
                )
                .arg(
                    Arg::new("new-name")
                        .long("new-name")
                        .help("Proposed name of the entry to be created"),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .default_value("plan")
                        .value_parser(["plan", "resource-group"])
                        .help("What the proposed entry stands for"),
                )
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .default_value("append")
                        .value_parser(["append", "prepend-if-empty", "prepend"])
                        .help("Where the proposed entry goes"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("key-vault")
                .about("Show the details panel of a Key Vault reference")
                .arg(
                    Arg::new("reference")
                        .long("reference")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON Key Vault reference"),
                )
                .arg(
                    Arg::new("site")
                        .long("site")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON site, used for the SCM link"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let config = commands::load_config(matches.get_one::<PathBuf>("config"))?;

    let output = match matches.subcommand() {
        Some(("options", sub)) => commands::run_options(
            &config,
            &OptionsArgs {
                records: sub
                    .get_one::<PathBuf>("records")
                    .cloned()
                    .unwrap_or_default(),
                new_name: sub.get_one::<String>("new-name").cloned(),
                kind: commands::parse_kind(sub.get_one::<String>("kind").map(String::as_str))?,
                policy: commands::parse_policy(
                    sub.get_one::<String>("policy").map(String::as_str),
                )?,
                json: sub.get_flag("json"),
            },
        )?,
        Some(("key-vault", sub)) => commands::run_key_vault(
            &config,
            &KeyVaultArgs {
                reference: sub
                    .get_one::<PathBuf>("reference")
                    .cloned()
                    .unwrap_or_default(),
                site: sub.get_one::<PathBuf>("site").cloned(),
                json: sub.get_flag("json"),
            },
        )?,
        _ => {
            cli().print_help()?;
            return Ok(());
        }
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn options_subcommand_parses() {
        let matches = cli()
            .try_get_matches_from([
                "portal",
                "--config",
                "portal.toml",
                "options",
                "--records",
                "plans.json",
                "--new-name",
                "plan-x",
                "--policy",
                "prepend",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "options");
        assert_eq!(sub.get_one::<String>("kind").map(String::as_str), Some("plan"));
        assert_eq!(
            sub.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("portal.toml"))
        );
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let result = cli().try_get_matches_from([
            "portal", "options", "--records", "x.json", "--policy", "middle",
        ]);
        assert!(result.is_err());
    }
}
