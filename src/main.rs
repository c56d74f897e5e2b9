use clap::Parser;
use lockbox::cli::commands::{add::AddArgs, edit::EditArgs};
use lockbox::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init { force } => lockbox::cli::commands::init::execute(&cli, force),
        Commands::Add {
            ref title,
            ref username,
            ref url,
            ref notes,
            generate,
            length,
        } => lockbox::cli::commands::add::execute(
            &cli,
            AddArgs {
                title,
                username,
                url,
                notes,
                generate,
                length,
            },
        ),
        Commands::List { ref query } => {
            lockbox::cli::commands::list::execute(&cli, query.as_deref())
        }
        Commands::Show { ref id, reveal } => {
            lockbox::cli::commands::show::execute(&cli, id, reveal)
        }
        Commands::Edit {
            ref id,
            ref title,
            ref username,
            ref url,
            ref notes,
            password,
            generate,
        } => lockbox::cli::commands::edit::execute(
            &cli,
            EditArgs {
                id,
                title: title.as_deref(),
                username: username.as_deref(),
                url: url.as_deref(),
                notes: notes.as_deref(),
                password,
                generate,
            },
        ),
        Commands::Delete { ref id, force } => {
            lockbox::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::Copy { ref id } => lockbox::cli::commands::copy::execute(&cli, id),
        Commands::Generate { length } => lockbox::cli::commands::generate::execute(length),
        Commands::Destroy { force } => lockbox::cli::commands::destroy::execute(&cli, force),
        Commands::Path => lockbox::cli::commands::path::execute(&cli),
        Commands::Completions { shell } => lockbox::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        lockbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the `--verbose` default.
fn init_tracing(verbose: bool) {
    let default = if verbose { "lockbox=debug" } else { "lockbox=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
