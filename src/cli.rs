use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "doql", about = "Run DOQL queries against a Device42 appliance")]
pub struct Cli {
    /// Path to config file
    #[arg(short = 'c', long, global = true, env = "DOQL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit diagnostics to stderr
    #[arg(short = 'v', long, global = true, env = "DOQL_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a DOQL query and print the result as JSON
    Query(QueryArgs),

    /// Discover tables and their columns via information_schema
    Schema(SchemaArgs),

    /// Check connectivity with the probe query
    Test(TestArgs),
}

/// Connection settings shared by every subcommand.
#[derive(Parser, Debug)]
pub struct ConnectionArgs {
    /// Appliance hostname or host:port
    #[arg(long, env = "DOQL_HOST")]
    pub host: Option<String>,

    /// Basic auth username
    #[arg(short = 'u', long, env = "DOQL_USER")]
    pub user: Option<String>,

    /// Basic auth password
    #[arg(short = 'p', long, env = "DOQL_PASSWD")]
    pub passwd: Option<String>,

    /// Accept self-signed certificates: true or false (default: true)
    #[arg(long, env = "DOQL_TRUST_SERVER_CERT", value_name = "BOOL")]
    pub trust_server_certificate: Option<bool>,

    /// Config file profile name
    #[arg(short = 'P', long, env = "DOQL_PROFILE")]
    pub profile: Option<String>,
}

#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Query text
    pub query: Option<String>,

    /// Read the query from a file
    #[arg(short = 'f', long = "file", conflicts_with = "query")]
    pub query_file: Option<PathBuf>,

    /// Annotate the query with the requesting user before dispatch
    #[arg(long, value_name = "NAME")]
    pub as_user: Option<String>,

    /// Write the result JSON to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug)]
pub struct TestArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}
