//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

/// Fox Store - storefront and admin back-office API
#[derive(Parser, Debug)]
#[command(name = "fox-store")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage background jobs
    Jobs(JobsArgs),

    /// Create an admin account
    CreateAdmin(CreateAdminArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = DEFAULT_SERVER_HOST, env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_SERVER_PORT, env = "SERVER_PORT")]
    pub port: u16,
}

/// Arguments for the create-admin command.
///
/// Registration always produces regular accounts and the back-office
/// sits behind the admin gate, so the first admin has to come from here.
#[derive(Parser, Debug)]
pub struct CreateAdminArgs {
    /// Display name for the admin account
    #[arg(long)]
    pub name: String,

    /// E-mail address (must not already be registered)
    #[arg(long)]
    pub email: String,

    /// Password (minimum 6 characters)
    #[arg(long)]
    pub password: String,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the jobs command
#[derive(Parser, Debug)]
pub struct JobsArgs {
    #[command(subcommand)]
    pub action: JobsAction,
}

/// Job management actions
#[derive(Subcommand, Debug)]
pub enum JobsAction {
    /// Start background job worker
    Work,
    /// List pending jobs
    List,
    /// Clear failed jobs
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_admin_parses_its_arguments() {
        let cli = Cli::try_parse_from([
            "fox-store",
            "create-admin",
            "--name",
            "Root",
            "--email",
            "root@store.test",
            "--password",
            "secret123",
        ])
        .unwrap();

        match cli.command {
            Commands::CreateAdmin(args) => {
                assert_eq!(args.name, "Root");
                assert_eq!(args.email, "root@store.test");
                assert_eq!(args.password, "secret123");
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn create_admin_requires_an_email() {
        let result = Cli::try_parse_from([
            "fox-store",
            "create-admin",
            "--name",
            "Root",
            "--password",
            "secret123",
        ]);
        assert!(result.is_err());
    }
}
