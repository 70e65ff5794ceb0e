//! `unsupported` subcommands: list, check, add.

use mm_domain::config::Config;
use mm_domain::{Feature, Model};
use mm_engine::{AddOutcome, OverrideStore, UnsupportedRegistry};

use super::UnsupportedCommand;

pub fn run(config: &Config, command: UnsupportedCommand) -> anyhow::Result<()> {
    let registry = UnsupportedRegistry::new(OverrideStore::new(
        config.registry.override_path.clone(),
    ));

    match command {
        UnsupportedCommand::List => {
            let combined = registry.combined();
            for feature in Feature::CATALOGUE {
                let models = combined.models_for(feature);
                if models.is_empty() {
                    continue;
                }
                let names: Vec<&str> = models.iter().map(Model::as_str).collect();
                println!("{:<16} {}", feature.as_str(), names.join(", "));
            }
            Ok(())
        }
        UnsupportedCommand::Check { feature, model } => {
            let (feature, model) = parse_pair(&feature, &model)?;
            if registry.is_unsupported(feature, model) {
                println!("{model} is listed as unsupported for {feature}");
            } else {
                println!("{model} is not listed for {feature}");
            }
            Ok(())
        }
        UnsupportedCommand::Add { feature, model } => {
            let (feature, model) = parse_pair(&feature, &model)?;
            match registry.add(feature, model)? {
                AddOutcome::Added => println!("added {model} to {feature}"),
                AddOutcome::AlreadyPresent => {
                    println!("{model} is already listed for {feature}")
                }
            }
            Ok(())
        }
    }
}

/// Strict parse: administrative input with a typo must be rejected, not
/// silently mapped to a sentinel.
fn parse_pair(feature: &str, model: &str) -> anyhow::Result<(Feature, Model)> {
    let feature: Feature = feature.parse()?;
    let model: Model = model.parse()?;
    Ok((feature, model))
}
