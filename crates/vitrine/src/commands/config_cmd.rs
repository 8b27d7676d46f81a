//! Config subcommand handlers.

use dialoguer::{Confirm, Input};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

// ── Wizard ──────────────────────────────────────────────────────────

/// Prompt for every catalog setting, starting from `base`.
fn run_wizard(base: Config) -> Result<Config, CliError> {
    let mut cfg = base;

    let endpoint: String = Input::new()
        .with_prompt("Catalog endpoint")
        .default(cfg.catalog.endpoint.clone())
        .validate_with(|raw: &String| {
            vitrine_config::parse_endpoint(raw)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_err)?;
    cfg.catalog.endpoint = endpoint;

    cfg.catalog.limit = Input::new()
        .with_prompt("Products to request (0 = all)")
        .default(cfg.catalog.limit)
        .interact_text()
        .map_err(prompt_err)?;

    cfg.catalog.timeout = Input::new()
        .with_prompt("Fetch timeout (seconds)")
        .default(cfg.catalog.timeout)
        .validate_with(|secs: &u64| {
            if *secs == 0 {
                Err("must be at least 1 second")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_err)?;

    cfg.catalog.cache_ttl = Input::new()
        .with_prompt("Cache lifetime (seconds, 0 disables)")
        .default(cfg.catalog.cache_ttl)
        .interact_text()
        .map_err(prompt_err)?;

    cfg.catalog.offline = Confirm::new()
        .with_prompt("Always use the bundled catalog (offline)?")
        .default(cfg.catalog.offline)
        .interact()
        .map_err(prompt_err)?;

    Ok(cfg)
}

fn render_toml(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|_| format!("{cfg:#?}"))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init { defaults } => {
            let config_path = config::config_path();

            let cfg = if defaults {
                Config::default()
            } else {
                eprintln!("vitrine: configuration wizard");
                eprintln!("   Config path: {}\n", config_path.display());

                if config_path.exists() {
                    let overwrite = Confirm::new()
                        .with_prompt("A config file already exists. Overwrite it?")
                        .default(false)
                        .interact()
                        .map_err(prompt_err)?;
                    if !overwrite {
                        eprintln!("Left {} unchanged", config_path.display());
                        return Ok(());
                    }
                }
                run_wizard(Config::default())?
            };

            let written = config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Configuration written to {}", written.display());
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_warn();
            let out = output::render_single(global.output_format(), &cfg, render_toml, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_warn();
            cfg.set(&key, &value)?;
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key}");
            }
            Ok(())
        }
    }
}
