//! Resolve command implementation for the Stopover CLI.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use stopover_core::{PlaceResolver, ResolvedPlace};
use stopover_data::{NominatimResolver, NominatimResolverConfig};

use crate::{ARG_RESOLVE_QUERY, CliError, ENV_RESOLVE_QUERY};

/// CLI arguments for the `resolve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve a place name to a coordinate via a Nominatim \
                 instance and print the best match. The result can be \
                 pasted into a plan request as a destination.",
    about = "Resolve a place name to a coordinate"
)]
#[ortho_config(prefix = "STOPOVER")]
pub(crate) struct ResolveArgs {
    /// Free-text place name to look up.
    #[arg(value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Base URL of the Nominatim instance.
    #[arg(long = "base-url", value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
}

impl ResolveArgs {
    pub(crate) fn into_config(self) -> Result<ResolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ResolveConfig::try_from(merged)
    }
}

/// Resolved `resolve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolveConfig {
    pub(crate) query: String,
    pub(crate) base_url: String,
}

impl TryFrom<ResolveArgs> for ResolveConfig {
    type Error = CliError;

    fn try_from(args: ResolveArgs) -> Result<Self, Self::Error> {
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_RESOLVE_QUERY,
            env: ENV_RESOLVE_QUERY,
        })?;
        let base_url = args
            .base_url
            .unwrap_or_else(|| NominatimResolverConfig::default().base_url);
        Ok(Self { query, base_url })
    }
}

/// The rendered lookup result written to stdout.
#[derive(Debug, Serialize)]
pub(crate) struct PlaceReport {
    /// Canonical display name.
    pub(crate) name: String,
    /// Latitude in degrees.
    pub(crate) lat: f64,
    /// Longitude in degrees.
    pub(crate) lon: f64,
}

impl From<ResolvedPlace> for PlaceReport {
    fn from(place: ResolvedPlace) -> Self {
        Self {
            name: place.name,
            lat: place.location.y,
            lon: place.location.x,
        }
    }
}

pub(super) fn run_resolve(args: ResolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let config = args.into_config()?;
    let resolver =
        NominatimResolver::new(config.base_url.clone()).map_err(|source| {
            CliError::BuildResolver {
                base_url: config.base_url.clone(),
                source,
            }
        })?;
    let place = resolver.resolve(&config.query)?;
    write_place(&mut stdout, &PlaceReport::from(place))
}

fn write_place(writer: &mut dyn Write, place: &PlaceReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(place)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(|source| CliError::WriteReport { source })?;
    writer
        .write_all(b"\n")
        .map_err(|source| CliError::WriteReport { source })?;
    Ok(())
}
