//! PERMIT: Runtime Permission Evaluator Demo CLI
//!
//! Exercises every evaluator operation against the built-in camera/storage
//! mapping (or a TOML catalog) and an in-memory host loaded from a fixture.
//!
//! Usage:
//!   cargo run -p demo -- required --capability storage --sdk 33
//!   cargo run -p demo -- granted --codes 0,-1
//!   cargo run -p demo -- check --host demo/fixtures/host.toml --capability camera
//!   cargo run -p demo -- flow --host demo/fixtures/host.toml --capability storage

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use permit_catalog::CapabilityCatalog;
use permit_contracts::{
    capability::PlatformVersion,
    error::{PermitError, PermitResult},
    flow::FlowAction,
    grant::GrantOutcome,
    permission::PermissionId,
};
use permit_core::{
    evaluator,
    traits::{IdentifierSource, StatusProvider},
    BuiltinIdentifiers, InMemoryHost, PermissionFlow,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// PERMIT: runtime permission evaluation demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "PERMIT runtime permission evaluator demo",
    long_about = "Resolves capabilities to permission identifiers, interprets grant\n\
                  outcomes, and walks the request / explain / settings flow against\n\
                  an in-memory host."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the permissions a capability needs on a platform version.
    Required(ResolveArgs),
    /// Decide whether a request outcome grants everything.
    Granted {
        /// Positional grant codes (0 = granted, -1 = denied).
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        codes: Vec<i32>,
        /// Keyed outcomes as PERMISSION=true|false.
        #[arg(long, value_delimiter = ',', conflicts_with = "codes")]
        keyed: Vec<String>,
    },
    /// Query a host fixture for grant and permanent-denial state.
    Check {
        #[command(flatten)]
        resolve: ResolveArgs,
        /// TOML host fixture.
        #[arg(long)]
        host: PathBuf,
    },
    /// Walk the permission flow for a capability against a host fixture.
    Flow {
        #[command(flatten)]
        resolve: ResolveArgs,
        /// TOML host fixture.
        #[arg(long)]
        host: PathBuf,
    },
}

#[derive(Args)]
struct ResolveArgs {
    /// Capability name, e.g. "camera" or "storage".
    #[arg(long)]
    capability: String,
    /// Platform version (API level).
    #[arg(long, default_value_t = 34)]
    sdk: u32,
    /// TOML capability catalog; the built-in mapping is used when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

impl ResolveArgs {
    /// Load the identifier source, plus the capability's description when a
    /// catalog provides one.
    fn source(&self) -> PermitResult<(Box<dyn IdentifierSource>, Option<String>)> {
        match &self.catalog {
            Some(path) => {
                let catalog = CapabilityCatalog::from_file(path)?;
                let description = catalog
                    .get(&self.capability)
                    .and_then(|entry| entry.description.clone());
                let source: Box<dyn IdentifierSource> = Box::new(catalog);
                Ok((source, description))
            }
            None => {
                let source: Box<dyn IdentifierSource> = Box::new(BuiltinIdentifiers);
                Ok((source, None))
            }
        }
    }

    fn version(&self) -> PlatformVersion {
        PlatformVersion(self.sdk)
    }

    fn print_heading(&self, description: Option<&str>) {
        match description {
            Some(d) => println!("{} ({}) on API level {}:", self.capability, d, self.sdk),
            None => println!("{} on API level {}:", self.capability, self.sdk),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Required(args) => run_required(&args),
        Command::Granted { codes, keyed } => run_granted(codes, &keyed),
        Command::Check { resolve, host } => run_check(&resolve, &host),
        Command::Flow { resolve, host } => run_flow(&resolve, &host),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_required(args: &ResolveArgs) -> PermitResult<()> {
    let (source, description) = args.source()?;
    let identifiers = source.resolve(&args.capability, args.version())?;

    args.print_heading(description.as_deref());
    for id in &identifiers {
        println!("  {}", id);
    }
    Ok(())
}

fn run_granted(codes: Vec<i32>, keyed: &[String]) -> PermitResult<()> {
    let outcome = if keyed.is_empty() {
        GrantOutcome::Codes(codes)
    } else {
        GrantOutcome::Keyed(parse_keyed(keyed)?)
    };

    let granted = evaluator::outcome_granted(&outcome);
    info!(granted, "outcome evaluated");
    println!("all granted: {}", granted);
    Ok(())
}

fn run_check(args: &ResolveArgs, host_path: &Path) -> PermitResult<()> {
    let host = InMemoryHost::from_file(host_path)?;
    let (source, description) = args.source()?;
    let identifiers = source.resolve(&args.capability, args.version())?;

    args.print_heading(description.as_deref());
    for id in &identifiers {
        println!("  {:<45} {:?}", id.as_str(), host.check(id));
    }
    println!(
        "has permissions:      {}",
        evaluator::has_permissions(Some(&host), Some(&identifiers))
    );
    println!(
        "permanently denied:   {}",
        evaluator::is_permanently_denied(Some(&host), Some(&identifiers))
    );
    Ok(())
}

/// Runs one pass of the cycle, answering every prompt with the host's
/// current state: a request is "answered" with the fixture's grant codes.
fn run_flow(args: &ResolveArgs, host_path: &Path) -> PermitResult<()> {
    let host = InMemoryHost::from_file(host_path)?;
    let (source, _) = args.source()?;
    let mut flow = PermissionFlow::new(source, args.version());
    let capability = args.capability.as_str();

    let mut action = flow.ensure(&host, capability)?;
    if let FlowAction::Request { identifiers } = &action {
        let codes: Vec<i32> = identifiers.iter().map(|id| host.check(id).code()).collect();
        let outcome = GrantOutcome::Keyed(GrantOutcome::pair(identifiers, &codes)?);
        action = flow.on_request_outcome(capability, &outcome)?;
    }
    if action == FlowAction::ExplainDenial {
        action = flow.on_explanation_accepted(&host, capability)?;
    }
    if action == FlowAction::OpenSettings {
        // Nothing changes in the fixture while "in settings".
        for (name, next) in flow.on_resume(&host)? {
            info!(capability = %name, action = ?next, "resumed");
        }
    }

    match serde_json::to_string_pretty(flow.events()) {
        Ok(events) => println!("{}", events),
        Err(e) => {
            eprintln!("Demo error: failed to serialize flow events: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn parse_keyed(pairs: &[String]) -> PermitResult<HashMap<PermissionId, bool>> {
    pairs
        .iter()
        .map(|pair| {
            let (id, value) = pair.split_once('=').ok_or_else(|| PermitError::InvalidArgument {
                reason: format!("expected PERMISSION=true|false, got '{}'", pair),
            })?;
            let granted = value.parse::<bool>().map_err(|_| PermitError::InvalidArgument {
                reason: format!("'{}' is not true or false", value),
            })?;
            Ok((PermissionId::new(id), granted))
        })
        .collect()
}
