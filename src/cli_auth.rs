//! Maintenance CLI for user accounts: bootstrap the first admin, promote or
//! demote users, list accounts. Operates directly on the label database.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use recursive_label_server::label_store::{LabelStore, SqliteLabelStore};
use recursive_label_server::user::{LabelHasher, UserRole};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite label database file.
    #[clap(value_parser = parse_path)]
    pub db_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Creates a user with the given email and password.
    CreateUser {
        email: String,
        password: String,

        /// Role to assign: "user" or "admin".
        #[clap(long, default_value = "user")]
        role: String,
    },

    /// Changes an existing user's role.
    SetRole { email: String, role: String },

    /// Lists all user accounts.
    ListUsers,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let store = SqliteLabelStore::new(&cli_args.db_path)
        .with_context(|| format!("Failed to open label database {:?}", cli_args.db_path))?;

    match cli_args.command {
        Command::CreateUser {
            email,
            password,
            role,
        } => {
            let role = UserRole::from_str(&role)?;
            if store.get_user_by_email(&email)?.is_some() {
                bail!("User {} already exists", email);
            }
            let password_hash = LabelHasher::Argon2.hash(&password)?;
            let user = store.create_user(&email, &password_hash, role)?;
            println!("Created {} user {} ({})", role.as_db_str(), user.email, user.id);
        }
        Command::SetRole { email, role } => {
            let role = UserRole::from_str(&role)?;
            if !store.set_user_role(&email, role)? {
                bail!("No user with email {}", email);
            }
            println!("Set {} to {}", email, role.as_db_str());
        }
        Command::ListUsers => {
            for user in store.list_users()? {
                println!("{}\t{}\t{}", user.id, user.email, user.role.as_db_str());
            }
        }
    }

    Ok(())
}
