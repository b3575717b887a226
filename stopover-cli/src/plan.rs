//! Plan command implementation for the Stopover CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use stopover_core::{
    Destination, MAX_DESTINATIONS, ManualStart, OriginProvider, OriginSelector, SolveRequest,
    SolveResponse, Solver, distance_km, nearest_destination,
};
use stopover_solver_greedy::GreedySolver;

use crate::{ARG_PLAN_ORIGIN, ARG_PLAN_REQUEST, ARG_PLAN_STORE, CliError, ENV_PLAN_REQUEST, files};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Sequence a destination set into a visiting order. The \
                 destinations come from a JSON-encoded plan request or \
                 from a previously saved plan database; the current \
                 position, when known, anchors the route and overrides \
                 any saved start.",
    about = "Sequence destinations into a visiting order"
)]
#[ortho_config(prefix = "STOPOVER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Load the destination set from a saved plan database instead.
    #[arg(long = ARG_PLAN_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
    /// Current position as "lat,lon" decimal degrees.
    #[arg(long = ARG_PLAN_ORIGIN, value_name = "lat,lon")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Where the destination set comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlanSource {
    /// A JSON-encoded plan request file.
    Request(Utf8PathBuf),
    /// A saved plan database.
    Store(Utf8PathBuf),
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) source: PlanSource,
    pub(crate) origin: Option<Coord<f64>>,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let origin = args.origin.as_deref().map(parse_origin).transpose()?;
        let source = if let Some(path) = args.request_path {
            PlanSource::Request(path)
        } else if let Some(path) = args.store {
            PlanSource::Store(path)
        } else {
            return Err(CliError::MissingArgument {
                field: ARG_PLAN_REQUEST,
                env: ENV_PLAN_REQUEST,
            });
        };
        Ok(Self { source, origin })
    }
}

/// Parse a "lat,lon" pair of finite decimal degrees.
fn parse_origin(value: &str) -> Result<Coord<f64>, CliError> {
    let invalid = || CliError::InvalidOrigin {
        value: value.to_owned(),
    };
    let (raw_lat, raw_lon) = value.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = raw_lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = raw_lon.trim().parse().map_err(|_| invalid())?;
    if !lat.is_finite() || !lon.is_finite() {
        return Err(invalid());
    }
    Ok(Coord { x: lon, y: lat })
}

/// JSON payload accepted by `stopover plan <path>`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlanRequest {
    /// Live position, when the caller has a fix.
    #[serde(default)]
    pub(crate) origin: Option<Coord<f64>>,
    /// Manually chosen start point.
    #[serde(default)]
    pub(crate) start: Option<ManualStart>,
    /// Destinations to sequence.
    pub(crate) destinations: Vec<Destination>,
}

/// Inputs gathered from the request or the store, before origin
/// precedence is applied.
#[derive(Debug, Clone)]
struct PlanInputs {
    destinations: Vec<Destination>,
    live_fix: Option<Coord<f64>>,
    manual_start: Option<ManualStart>,
}

/// Origin feed backed by a position reported on the command line or in
/// the request payload.
struct ReportedFix(Option<Coord<f64>>);

impl OriginProvider for ReportedFix {
    fn current(&self) -> Option<Coord<f64>> {
        self.0
    }
}

/// One stop of the rendered plan.
#[derive(Debug, Serialize)]
pub(crate) struct StopReport {
    /// Destination identifier.
    pub(crate) id: u64,
    /// Display name.
    pub(crate) name: String,
    /// Latitude in degrees.
    pub(crate) lat: f64,
    /// Longitude in degrees.
    pub(crate) lon: f64,
    /// Distance from the previous point, absent for the first stop of an
    /// anchorless plan.
    pub(crate) leg_km: Option<f64>,
}

/// Nearest-destination line of the rendered plan.
#[derive(Debug, Serialize)]
pub(crate) struct NearestReport {
    /// Display name of the closest destination.
    pub(crate) name: String,
    /// Its distance from the origin, in kilometres.
    pub(crate) distance_km: f64,
}

/// The rendered plan written to stdout.
#[derive(Debug, Serialize)]
pub(crate) struct PlanReport {
    /// Stops in visiting order.
    pub(crate) stops: Vec<StopReport>,
    /// Length over the stops only, in kilometres.
    pub(crate) route_km: f64,
    /// Length including the leg from the origin, when one is known.
    pub(crate) total_km: f64,
    /// Closest destination to the origin, when one is known.
    pub(crate) nearest: Option<NearestReport>,
    /// Pre-refinement path length, in kilometres.
    pub(crate) construction_km: f64,
    /// Number of full refinement scans performed.
    pub(crate) passes: u32,
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let config = args.into_config()?;
    execute(&config, &mut stdout)
}

fn execute(config: &PlanConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let inputs = load_inputs(config)?;

    let fix = config.origin.or(inputs.live_fix);
    let selector = match inputs.manual_start {
        Some(manual) => OriginSelector::with_manual(ReportedFix(fix), manual),
        None => OriginSelector::new(ReportedFix(fix)),
    };
    let anchor = selector.effective();

    let response = GreedySolver::new().solve(&SolveRequest {
        origin: anchor,
        destinations: inputs.destinations,
    })?;

    let report = build_report(anchor, &response);
    write_report(writer, &report)
}

fn load_inputs(config: &PlanConfig) -> Result<PlanInputs, CliError> {
    match &config.source {
        PlanSource::Request(path) => {
            require_existing(path, ARG_PLAN_REQUEST)?;
            let request = load_plan_request(path)?;
            if request.destinations.len() > MAX_DESTINATIONS {
                return Err(CliError::TooManyDestinations {
                    count: request.destinations.len(),
                    cap: MAX_DESTINATIONS,
                });
            }
            Ok(PlanInputs {
                destinations: request.destinations,
                live_fix: request.origin,
                manual_start: request.start,
            })
        }
        PlanSource::Store(path) => {
            require_existing(path, ARG_PLAN_STORE)?;
            load_from_store(path)
        }
    }
}

#[cfg(feature = "store-sqlite")]
fn load_from_store(path: &Utf8Path) -> Result<PlanInputs, CliError> {
    use stopover_core::{DestinationStore, SqliteDestinationStore};

    let store = SqliteDestinationStore::open(path.as_std_path())?;
    let plan = store.load()?.ok_or_else(|| CliError::EmptyStore {
        path: path.to_path_buf(),
    })?;
    Ok(PlanInputs {
        destinations: plan.itinerary.destinations().to_vec(),
        live_fix: None,
        manual_start: plan.manual_start,
    })
}

#[cfg(not(feature = "store-sqlite"))]
fn load_from_store(_path: &Utf8Path) -> Result<PlanInputs, CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "loading a saved plan",
    })
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match files::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = files::open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "the report aggregates leg distances"
)]
fn build_report(anchor: Option<Coord<f64>>, response: &SolveResponse) -> PlanReport {
    let route = &response.route;

    let mut stops = Vec::with_capacity(route.len());
    let mut previous = anchor;
    for destination in route.stops() {
        stops.push(StopReport {
            id: destination.id,
            name: destination.name.clone(),
            lat: destination.location.y,
            lon: destination.location.x,
            leg_km: previous.map(|from| distance_km(from, destination.location)),
        });
        previous = Some(destination.location);
    }

    let anchor_leg_km = match (anchor, route.stops().first()) {
        (Some(from), Some(first)) => distance_km(from, first.location),
        _ => 0.0,
    };
    let nearest = anchor
        .and_then(|from| nearest_destination(from, route.stops()))
        .map(|nearest| NearestReport {
            name: nearest.destination.name.clone(),
            distance_km: nearest.distance_km,
        });

    PlanReport {
        stops,
        route_km: route.length_km(),
        total_km: route.length_km() + anchor_leg_km,
        nearest,
        construction_km: response.diagnostics.construction_km,
        passes: response.diagnostics.passes,
    }
}

fn write_report(writer: &mut dyn Write, report: &PlanReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(|source| CliError::WriteReport { source })?;
    writer
        .write_all(b"\n")
        .map_err(|source| CliError::WriteReport { source })?;
    Ok(())
}
