//! qnapctl: log in to a QNAP NAS and manage installed applications.

use clap::{Parser, Subcommand};
use serde::Serialize;

use qnap_core_sdk::{AppsClient, AuthClient, ClientResult, ClientSettings};

#[derive(Parser)]
#[command(name = "qnapctl")]
#[command(about = "Manage applications on a QNAP NAS", version)]
struct Cli {
    /// NAS endpoint, e.g. https://nas.local:443
    #[arg(long, env = "QNAP_ENDPOINT")]
    endpoint: String,

    /// Session id from a previous `qnapctl login`
    #[arg(long, env = "QNAP_SID", hide_env_values = true)]
    sid: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long)]
    insecure: bool,

    /// Retries per request after the first send
    #[arg(long, default_value_t = 3)]
    retry_attempts: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and print the session
    Login {
        #[arg(long, env = "QNAP_USER")]
        user: String,
        #[arg(long, env = "QNAP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Invalidate the session given by --sid
    Logout,
    /// Application control
    #[command(subcommand)]
    Apps(AppsCommand),
}

#[derive(Subcommand)]
enum AppsCommand {
    /// List installed applications
    List {
        /// Print runtime state only
        #[arg(long)]
        states: bool,
    },
    Start {
        qname: String,
        /// Return as soon as the NAS accepts the request
        #[arg(long)]
        no_wait: bool,
    },
    Stop {
        qname: String,
        #[arg(long)]
        no_wait: bool,
    },
}

#[derive(Serialize)]
struct Failure<'a> {
    error: &'a qnap_core_sdk::Error,
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => log::error!("failed to encode output: {}", e),
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let settings = ClientSettings {
        retry_attempts: cli.retry_attempts,
        accept_invalid_certs: cli.insecure,
        ..ClientSettings::new(cli.endpoint)
    };

    match cli.command {
        Command::Login { user, password } => {
            let session = AuthClient::new(&settings)?.login(&user, &password).await?;
            print_json(&session);
        }
        Command::Logout => {
            let Some(sid) = cli.sid else {
                log::error!("logout needs --sid or QNAP_SID");
                std::process::exit(2);
            };
            AuthClient::new(&settings)?.logout(&sid).await?;
        }
        Command::Apps(cmd) => {
            let mut apps = AppsClient::new(&settings)?;
            if let Some(sid) = cli.sid {
                apps = apps.with_session_id(sid);
            }
            match cmd {
                AppsCommand::List { states: true } => print_json(&apps.list_states().await?),
                AppsCommand::List { states: false } => print_json(&apps.list().await?),
                AppsCommand::Start { qname, no_wait } => apps.start(&qname, no_wait).await?,
                AppsCommand::Stop { qname, no_wait } => apps.stop(&qname, no_wait).await?,
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        match serde_json::to_string(&Failure { error: &e }) {
            Ok(s) => eprintln!("{}", s),
            Err(_) => eprintln!("{}", e),
        }
        std::process::exit(1);
    }
}
