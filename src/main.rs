//! # Sheetline Main Entry Point
//!
//! Sends one OAuth-signed request and prints the raw response body.

use std::process::ExitCode;

use anyhow::{Context, Result};
use sheetline::cmd_args::CommandLineArgs;
use sheetline::config::get_profile_path;
use sheetline::{
    Error, ExecutorConfig, IniProfileStore, RequestDescriptor, RequestExecutor, ReqwestTransport,
    ServiceRequest,
};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Environment variable consulted when no token flag is given
const ACCESS_TOKEN_ENV_VAR: &str = "SHEETLINE_ACCESS_TOKEN";

fn main() -> ExitCode {
    init_tracing_subscriber();

    match run(CommandLineArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[tracing::instrument(skip_all)]
fn run(cmd_args: CommandLineArgs) -> Result<()> {
    let config = load_config(cmd_args.profile())?;
    let access_token = read_access_token(&cmd_args)?;

    let mut descriptor = RequestDescriptor::new(access_token);
    descriptor
        .set_base_url(config.base_url())
        .set_method(cmd_args.method())
        .set_headers(cmd_args.headers().to_vec());
    if cmd_args.target_is_url() {
        descriptor.set_full_url(Some(cmd_args.target().clone()));
    } else {
        descriptor.set_endpoint(cmd_args.target().as_str());
    }
    if let Some(data) = cmd_args.data() {
        descriptor.set_post(data.as_str());
    }

    if cmd_args.verbose() {
        eprintln!("Request: {} {}", descriptor.method(), descriptor.resolved_url());
        for (name, value) in descriptor.headers() {
            eprintln!("  {name}: {value}");
        }
    }

    let executor = RequestExecutor::new(ReqwestTransport::new(&config)?);

    match executor.execute(&mut descriptor) {
        Ok(body) => {
            println!("{body}");
            Ok(())
        }
        Err(Error::Request(e)) => {
            if cmd_args.verbose() {
                if let Some(body) = e.body() {
                    eprintln!("{body}");
                }
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Load the named profile, falling back to built-in defaults
fn load_config(profile_name: &str) -> Result<ExecutorConfig> {
    let profile_path = get_profile_path();
    tracing::debug!("Loading profile '{}' from '{}'", profile_name, profile_path);

    let store = IniProfileStore::new(profile_path);
    let config = match store.get_profile(profile_name)? {
        Some(config) => config,
        None => {
            tracing::debug!("Profile '{}' not found, using defaults", profile_name);
            ExecutorConfig::default()
        }
    };

    tracing::debug!("Executor config: {:?}", config);
    Ok(config)
}

fn read_access_token(cmd_args: &CommandLineArgs) -> Result<String> {
    if let Some(token) = cmd_args.token() {
        return Ok(token.clone());
    }

    if let Some(path) = cmd_args.token_file() {
        return std::fs::read_to_string(path)
            .map(|token| token.trim().to_string())
            .with_context(|| format!("failed to read token file '{}'", path.display()));
    }

    std::env::var(ACCESS_TOKEN_ENV_VAR).with_context(|| {
        format!("no access token: pass --token, --token-file or set {ACCESS_TOKEN_ENV_VAR}")
    })
}

fn init_tracing_subscriber() {
    let mut filter = EnvFilter::from_env(format!(
        "{}_LOG_LEVEL",
        env!("CARGO_PKG_NAME").to_uppercase()
    ));

    for directive in ["reqwest=warn", "hyper=warn", "hyper_util=warn", "rustls=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
