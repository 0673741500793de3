use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use authgate_api::{
    ChangePasswordInput, ForgetPasswordInput, LoginInput, Outcome, RegisterInput,
    ResetPasswordInput, UpdateAccountInput,
};
use authgate_client::{
    AuthGateway, GatewayConfig, Hs256Verifier, RetryPolicy, RetryingTransport, SessionContext,
};

#[derive(Debug, Parser)]
#[command(name = "authgate", about = "Authgate CLI — identity backend operations")]
struct Cli {
    /// Print fault envelopes as JSON instead of a short message.
    #[arg(long, global = true)]
    json: bool,

    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and clear the stored session
    Logout,
    /// Change the password of the logged-in account
    ChangePassword {
        #[arg(long)]
        old_password: String,
        #[arg(long)]
        new_password: String,
    },
    /// Start a password reset
    ForgetPassword {
        #[arg(long)]
        email: String,
    },
    /// Resend the password-reset message
    ResendForgetPassword {
        #[arg(long)]
        email: String,
    },
    /// Complete a password reset with the emailed token
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        new_password: String,
    },
    /// Update name/email of the logged-in account
    UpdateAccount {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
}

// ─── Config & stored session ────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

fn config_dir(override_dir: Option<&PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.clone();
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("authgate")
}

fn resolve_config(override_dir: Option<&PathBuf>) -> anyhow::Result<GatewayConfig> {
    if let Some(config) = GatewayConfig::from_env() {
        return Ok(config);
    }

    let path = config_dir(override_dir).join("config.json");
    if path.exists() {
        let content = fs::read_to_string(&path).context("Failed to read config.json")?;
        return serde_json::from_str(&content).context("Invalid config.json format");
    }

    bail!(
        "Gateway config not found.\n\
         Set AUTHGATE_PROD_URL (optionally AUTHGATE_DEV_URL and AUTHGATE_DEV=1),\n\
         or create <config-dir>/authgate/config.json with\n\
         {{\"prod_url\": \"...\", \"dev_url\": \"...\", \"dev\": false}}"
    )
}

fn session_path(override_dir: Option<&PathBuf>) -> PathBuf {
    config_dir(override_dir).join("session.json")
}

fn load_session(override_dir: Option<&PathBuf>) -> Option<StoredSession> {
    let content = fs::read_to_string(session_path(override_dir)).ok()?;
    serde_json::from_str(&content).ok()
}

fn save_session(override_dir: Option<&PathBuf>, session: &StoredSession) -> anyhow::Result<()> {
    let dir = config_dir(override_dir);
    fs::create_dir_all(&dir).context("Failed to create config directory")?;
    let json = serde_json::to_string(session)?;
    fs::write(session_path(override_dir), json).context("Failed to write session.json")?;
    Ok(())
}

fn delete_session(override_dir: Option<&PathBuf>) -> anyhow::Result<()> {
    let path = session_path(override_dir);
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

fn require_session(override_dir: Option<&PathBuf>) -> anyhow::Result<SessionContext> {
    let stored = load_session(override_dir)
        .ok_or_else(|| anyhow::anyhow!("Not logged in.\nRun `authgate login` first."))?;
    Ok(SessionContext::with_token(stored.token))
}

/// Pull a session token out of a backend login response. Checks the
/// top-level `token` field, then `data.token`.
fn extract_token(body: &serde_json::Value) -> Option<String> {
    body.get("token")
        .or_else(|| body.get("data").and_then(|d| d.get("token")))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

// ─── Entry point ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_dir_override = cli.config_dir.clone();

    let config = resolve_config(config_dir_override.as_ref())?;
    let secret = std::env::var("AUTHGATE_SESSION_SECRET").unwrap_or_default();
    let gateway = AuthGateway::new(
        config,
        RetryingTransport::new(RetryPolicy::default())?,
        Hs256Verifier::new(secret.as_bytes()),
    );

    let credentialed = matches!(
        cli.command,
        Commands::Logout | Commands::ChangePassword { .. } | Commands::UpdateAccount { .. }
    );
    if credentialed && secret.is_empty() {
        bail!("AUTHGATE_SESSION_SECRET must be set for commands that verify the session token.");
    }

    let outcome = match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => {
            gateway
                .register(&RegisterInput {
                    name,
                    email,
                    password,
                })
                .await
        }
        Commands::Login { email, password } => {
            let outcome = gateway.login(&LoginInput { email, password }).await;
            if let Some(token) = outcome.success().and_then(extract_token) {
                save_session(config_dir_override.as_ref(), &StoredSession { token })?;
                eprintln!("Session stored.");
            }
            outcome
        }
        Commands::Logout => {
            let session = require_session(config_dir_override.as_ref())?;
            let outcome = gateway.logout(&session).await;
            if outcome.success().is_some() {
                delete_session(config_dir_override.as_ref())?;
                eprintln!("Session cleared.");
            }
            outcome
        }
        Commands::ChangePassword {
            old_password,
            new_password,
        } => {
            let session = require_session(config_dir_override.as_ref())?;
            gateway
                .change_password(
                    &session,
                    &ChangePasswordInput {
                        old_password,
                        new_password,
                    },
                )
                .await
        }
        Commands::ForgetPassword { email } => {
            gateway.forget_password(&ForgetPasswordInput { email }).await
        }
        Commands::ResendForgetPassword { email } => {
            gateway
                .resend_forget_password(&ForgetPasswordInput { email })
                .await
        }
        Commands::ResetPassword {
            token,
            new_password,
        } => {
            gateway
                .reset_password(&ResetPasswordInput {
                    token,
                    new_password,
                })
                .await
        }
        Commands::UpdateAccount { name, email } => {
            let session = require_session(config_dir_override.as_ref())?;
            gateway
                .update_account(&session, &UpdateAccountInput { name, email })
                .await
        }
    };

    std::process::exit(render(&outcome, cli.json)?);
}

fn render(outcome: &Outcome, json: bool) -> anyhow::Result<i32> {
    match outcome {
        Outcome::Success(body) => {
            println!("{}", serde_json::to_string_pretty(body)?);
            Ok(0)
        }
        Outcome::Fault(fault) => {
            if json {
                println!("{}", serde_json::to_string_pretty(fault)?);
            } else {
                eprintln!("Error: {}", fault.message());
            }
            Ok(1)
        }
        Outcome::Rejected => {
            eprintln!("Rejected: every field is required and must be non-empty.");
            Ok(2)
        }
    }
}
