use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

use crate::config::DEFAULT_PROFILE_NAME;
use crate::request::Method;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Profile to load executor settings from. Default is 'default'.
    /// If the profile is not configured, built-in defaults are used.
    #[clap(short = 'p', long, default_value = DEFAULT_PROFILE_NAME, help = "profile name")]
    profile: String,

    #[clap(
        short = 'X',
        long = "request",
        default_value = "GET",
        value_parser = parse_method,
        help = "HTTP method (GET, POST, PUT, DELETE)"
    )]
    method: Method,

    #[clap(
        short = 'H',
        long = "header",
        value_parser = parse_header,
        help = "Extra header as 'Name: Value' (repeatable)"
    )]
    headers: Vec<(String, String)>,

    #[clap(short = 'd', long = "data", help = "Request body for POST/PUT")]
    data: Option<String>,

    #[clap(long, conflicts_with = "token_file", help = "Access token JSON")]
    token: Option<String>,

    #[clap(long, help = "File holding the access token JSON")]
    token_file: Option<PathBuf>,

    /// Verbose mode
    /// Optional. Print request and response diagnostics to stderr.
    #[clap(short = 'v', long, help = "Print verbose message")]
    verbose: bool,

    /// Full URL, or an endpoint relative to the profile's base URL
    #[clap(help = "URL or endpoint")]
    target: String,
}

fn parse_method(value: &str) -> Result<Method, String> {
    value.parse()
}

fn parse_header(value: &str) -> Result<(String, String), String> {
    let (name, val) = value
        .split_once(':')
        .ok_or_else(|| format!("header must look like 'Name: Value', got '{value}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in '{value}'"));
    }

    Ok((name.to_string(), val.trim().to_string()))
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    method: Method,
    headers: Vec<(String, String)>,
    data: Option<String>,
    token: Option<String>,
    token_file: Option<PathBuf>,
    verbose: bool,
    target: String,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            method: args.method,
            headers: args.headers,
            data: args.data,
            token: args.token,
            token_file: args.token_file,
            verbose: args.verbose,
            target: args.target,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::try_parse_from(itr).map(Into::into)
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn data(&self) -> Option<&String> {
        self.data.as_ref()
    }

    pub fn token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    pub fn token_file(&self) -> Option<&PathBuf> {
        self.token_file.as_ref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn target(&self) -> &String {
        &self.target
    }

    /// True when the target is a full URL rather than an endpoint
    pub fn target_is_url(&self) -> bool {
        self.target.starts_with("http://") || self.target.starts_with("https://")
    }
}
