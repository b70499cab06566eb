use clap::Parser;
use doql::cli::{self, Cli, Command};
use doql::config::{self, ConnectionConfig};
use doql::error::DoqlError;
use doql::output;
use doql::runner::doql::{DoqlRunner, transport_available};
use doql::runner::{QueryRunner, SchemaMap};
use doql::sanitize;
use doql::verbose::{self, Timer};
use std::process;

#[tokio::main]
async fn main() {
    // Load .env file (optional, ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Query(ref args) => query(args, cli.verbose, cli.config.as_ref()).await,
        Command::Schema(ref args) => schema(args, cli.verbose, cli.config.as_ref()).await,
        Command::Test(ref args) => test(args, cli.verbose, cli.config.as_ref()).await,
    };

    if let Err(err) = result {
        output::print_error(&err);
        process::exit(1);
    }
}

async fn query(
    args: &cli::QueryArgs,
    verbose: bool,
    config_path: Option<&std::path::PathBuf>,
) -> Result<(), DoqlError> {
    let app_config = config::load(&args.connection, verbose, config_path)?;
    let verbose = app_config.verbose;
    emit_profile(verbose, &args.connection);

    let query = resolve_query(args)?;
    let query = match args.as_user.as_deref() {
        Some(user) => {
            // Host-side bookkeeping; the runner strips the block again
            // before transmission.
            verbose::emit(verbose, &format!("annotating query for user {}", user));
            sanitize::annotate_query(&query, &[("User", user)])
        }
        None => query,
    };

    verbose::emit(
        verbose,
        &format!("running query against {}...", app_config.connection.host),
    );
    let runner = build_runner(app_config.connection)?;
    let timer = Timer::start();
    let result = runner.run_query(&query, args.as_user.as_deref()).await?;
    verbose::emit(
        verbose,
        &format!(
            "query complete ({}ms, {} rows)",
            timer.elapsed_ms(),
            result.rows.len()
        ),
    );

    let json = output::result_json(&result)?;
    match &args.output {
        Some(path) => {
            verbose::emit(verbose, &format!("writing result to {}...", path.display()));
            output::write_file(&json, path)?;
        }
        None => output::print_result(&json),
    }

    Ok(())
}

async fn schema(
    args: &cli::SchemaArgs,
    verbose: bool,
    config_path: Option<&std::path::PathBuf>,
) -> Result<(), DoqlError> {
    let app_config = config::load(&args.connection, verbose, config_path)?;
    let verbose = app_config.verbose;
    emit_profile(verbose, &args.connection);

    verbose::emit(
        verbose,
        &format!("collecting schema from {}...", app_config.connection.host),
    );
    let runner = build_runner(app_config.connection)?;
    let timer = Timer::start();
    let mut schema = SchemaMap::new();
    let entries = runner.get_tables(&mut schema).await?;
    verbose::emit(
        verbose,
        &format!(
            "schema collected ({}ms, {} tables)",
            timer.elapsed_ms(),
            entries.len()
        ),
    );

    let json = output::schema_json(&entries)?;
    output::print_result(&json);

    Ok(())
}

async fn test(
    args: &cli::TestArgs,
    verbose: bool,
    config_path: Option<&std::path::PathBuf>,
) -> Result<(), DoqlError> {
    let app_config = config::load(&args.connection, verbose, config_path)?;
    let verbose = app_config.verbose;
    emit_profile(verbose, &args.connection);

    let host = app_config.connection.host.clone();
    verbose::emit(verbose, &format!("testing connection to {}...", host));
    let runner = build_runner(app_config.connection)?;
    let timer = Timer::start();
    // The bare probe; annotating it would turn it into an ordinary query
    runner.run_query(runner.noop_query(), None).await?;
    verbose::emit(verbose, &format!("probe returned ({}ms)", timer.elapsed_ms()));

    println!("connection to {} succeeded", host);

    Ok(())
}

// --- Helpers ---

fn emit_profile(verbose: bool, connection: &cli::ConnectionArgs) {
    if let Some(ref profile) = connection.profile {
        verbose::emit(verbose, &format!("using profile '{}'", profile));
    }
}

fn build_runner(connection: ConnectionConfig) -> Result<DoqlRunner, DoqlError> {
    if !transport_available() {
        return Err(DoqlError::Disabled {
            message: "HTTP client stack unavailable".to_string(),
        });
    }
    DoqlRunner::new(connection)
}

fn resolve_query(args: &cli::QueryArgs) -> Result<String, DoqlError> {
    if let Some(ref query) = args.query {
        return Ok(query.clone());
    }
    if let Some(ref path) = args.query_file {
        let content = std::fs::read_to_string(path).map_err(|e| DoqlError::Config {
            message: format!("cannot read query file {}: {}", path.display(), e),
        })?;
        return Ok(content);
    }
    Err(DoqlError::Config {
        message: "no query provided, pass it as an argument or use --file".to_string(),
    })
}
