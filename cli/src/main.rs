//! `shopctl`: headless client for the storefront REST API.
//!
//! Runs the same session and cart stores as the browser client over a
//! `reqwest` transport, persisting the token and cart as files in the state
//! directory. Results are printed as JSON on stdout; notices, prompts and
//! logs go to stderr.

mod commands;
mod notifier;
mod transport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use shop::config::DEFAULT_API_BASE_URL;
use shop::types::{ItemId, OrderId, UserId};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] shop::ApiError),
    #[error(transparent)]
    Auth(#[from] shop::AuthError),
    #[error("not signed in; run `shopctl login` first")]
    NotSignedIn,
    #[error("{0}")]
    Invalid(String),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "shopctl", about = "Storefront API command-line client")]
struct Cli {
    #[arg(long, env = "SHOP_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Directory holding the persisted token and cart.
    #[arg(long, env = "SHOP_STATE_DIR", default_value = ".shopctl")]
    state_dir: PathBuf,

    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in as it.
    Register(RegisterArgs),
    /// Revoke the token and forget it locally.
    Logout,
    /// Print the signed-in profile.
    Whoami,
    Items(ItemsCommand),
    Cart(CartCommand),
    /// Place an order for the current cart.
    Checkout,
    Orders(OrdersCommand),
    Profile(ProfileCommand),
    Users(UsersCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    password_confirmation: String,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
}

#[derive(Args, Debug)]
struct ItemsCommand {
    #[command(subcommand)]
    command: ItemsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ItemsSubcommand {
    List {
        #[arg(long, default_value = "")]
        q: String,
    },
    Show {
        id: ItemId,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        price: String,
    },
    Update {
        id: ItemId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    Delete {
        id: ItemId,
    },
}

#[derive(Args, Debug)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Subcommand, Debug)]
enum CartSubcommand {
    Show,
    Add {
        id: ItemId,
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    Set {
        id: ItemId,
        qty: String,
    },
    Inc {
        id: ItemId,
    },
    Dec {
        id: ItemId,
    },
    Remove {
        id: ItemId,
    },
    Clear,
}

#[derive(Args, Debug)]
struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Subcommand, Debug)]
enum OrdersSubcommand {
    List,
    Show { id: OrderId },
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update(ProfileUpdateArgs),
    /// Delete the signed-in account; the email must be typed again.
    Delete {
        #[arg(long)]
        confirm_email: String,
    },
}

#[derive(Args, Debug, Default)]
struct ProfileUpdateArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    password_confirmation: Option<String>,
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List {
        #[arg(long, default_value = "")]
        q: String,
    },
    Show {
        id: UserId,
    },
    Create(UserFields),
    Update {
        id: UserId,
        #[command(flatten)]
        fields: UserFields,
    },
    Delete {
        id: UserId,
    },
}

/// Editable user fields. Unset flags keep the stored value on update.
#[derive(Args, Debug, Default)]
struct UserFields {
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    role: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    password_confirmation: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
