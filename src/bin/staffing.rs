// Ops CLI: mint and inspect identity tokens without going through the
// HTTP surface. Uses the same JWT_SECRET as the running service.
use std::sync::Arc;

use clap::{Parser, Subcommand};

use course_staffing_api::auth::{SystemClock, TokenService};
use course_staffing_api::config;

#[derive(Parser)]
#[command(name = "staffing")]
#[command(about = "Course staffing CLI - token management")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Issue an identity token for a NetID")]
    Issue {
        #[arg(help = "NetID to issue the token for")]
        net_id: String,
    },

    #[command(about = "Verify a token and print its subject")]
    Verify {
        #[arg(help = "Token to verify")]
        token: String,
    },
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let token_service = TokenService::new(
        config::config().security.jwt_secret.clone(),
        Arc::new(SystemClock),
    );

    match cli.command {
        Commands::Issue { net_id } => {
            let token = token_service.issue(&net_id)?;
            println!("{token}");
        }
        Commands::Verify { token } => match token_service.verify(&token) {
            Ok(subject) => println!("valid token for {subject}"),
            Err(err) => {
                eprintln!("invalid token: {err}");
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
