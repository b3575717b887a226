//! Error types emitted by the Stopover CLI.
//!
//! Keep this error type reasonably small, as the CLI helpers return
//! `Result<_, CliError>` and the workspace enables
//! `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use stopover_core::{ResolveError, SolveError};
use stopover_data::ResolverBuildError;
use thiserror::Error;

/// Errors emitted by the Stopover CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// The cargo feature that was compiled out.
        feature: &'static str,
        /// Description of the attempted operation.
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Option the path came from.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option the path came from.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option the path came from.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The `--origin` value was not a "lat,lon" pair of finite degrees.
    #[error("invalid origin {value:?}: expected \"lat,lon\" in decimal degrees")]
    InvalidOrigin {
        /// The raw flag value.
        value: String,
    },
    /// Opening the plan request file failed.
    #[error("failed to open plan request {path:?}: {source}")]
    OpenPlanRequest {
        /// The request path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The plan request file was not valid JSON.
    #[error("failed to parse plan request {path:?}: {source}")]
    ParsePlanRequest {
        /// The request path.
        path: Utf8PathBuf,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The request holds more destinations than the engine accepts.
    #[error("request holds {count} destinations; the cap is {cap}")]
    TooManyDestinations {
        /// Destinations present in the request.
        count: usize,
        /// The enforced cap.
        cap: usize,
    },
    /// Reading the saved plan store failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to read the saved plan: {0}")]
    Store(#[from] stopover_core::SqliteStoreError),
    /// The saved plan store exists but holds no plan.
    #[error("saved plan store {path:?} holds no plan")]
    EmptyStore {
        /// The store path.
        path: Utf8PathBuf,
    },
    /// Sequencing the route failed.
    #[error("failed to sequence the route: {0}")]
    Plan(#[from] SolveError),
    /// Constructing the place resolver failed.
    #[error("failed to build the place resolver for {base_url}: {source}")]
    BuildResolver {
        /// The configured Nominatim base URL.
        base_url: String,
        /// Underlying construction failure.
        #[source]
        source: ResolverBuildError,
    },
    /// The place lookup failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Encoding the report as JSON failed.
    #[error("failed to serialise the plan report: {0}")]
    SerialiseReport(#[from] serde_json::Error),
    /// Writing the report to the output stream failed.
    #[error("failed to write the plan report: {source}")]
    WriteReport {
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}
