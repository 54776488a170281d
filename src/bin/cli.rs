//! roslink CLI
//!
//! Command-line interface for talking to a router's API service.

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use roslink::api::{ActiveApi, HotspotApi, ProfileApi, ProfileSpec, SystemApi};
use roslink::{Client, Config, Result, RosError};

/// roslink CLI
#[derive(Parser, Debug)]
#[command(name = "roslink-cli")]
#[command(about = "CLI for the RouterOS API")]
#[command(version)]
struct Args {
    /// Router address
    #[arg(long, default_value = "192.168.88.1")]
    host: String,

    /// API port (default 8728, or 8729 with --tls)
    #[arg(short, long)]
    port: Option<u16>,

    /// Use the TLS API service
    #[arg(long)]
    tls: bool,

    /// Accept any TLS certificate (trusted networks only)
    #[arg(long, requires = "tls")]
    insecure: bool,

    /// Login user
    #[arg(short, long, default_value = "admin")]
    user: String,

    /// Login password
    #[arg(long, env = "ROSLINK_PASSWORD", default_value = "")]
    password: String,

    /// Connect and read timeout in milliseconds
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a raw command, e.g. `exec /interface/print ?type=ether`
    Exec {
        /// Command path
        path: String,

        /// Parameters: key=value, .id=*1, ?key=value
        params: Vec<String>,
    },

    /// Show the router identity
    Identity,

    /// Show system resources
    Resources,

    /// Show the router clock
    Clock,

    /// Ping an address from the router
    Ping {
        address: String,

        #[arg(short, long, default_value = "4")]
        count: u32,
    },

    /// List hotspot users
    Users,

    /// Add a hotspot user
    AddUser {
        name: String,
        password: String,

        #[arg(long, default_value = "default")]
        profile: String,

        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Remove a hotspot user by id or name
    RemoveUser { id: String },

    /// List active hotspot sessions
    Active,

    /// Disconnect the active session of a user
    Kick { user: String },

    /// List hotspot user profiles
    Profiles,

    /// Add a hotspot user profile
    AddProfile {
        name: String,

        #[arg(long)]
        rate_limit: String,

        #[arg(long)]
        session_timeout: String,

        #[arg(long, default_value = "1")]
        shared_users: u32,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,roslink=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = Config::builder()
        .host(&args.host)
        .use_tls(args.tls)
        .allow_insecure_tls(args.insecure)
        .connect_timeout_ms(args.timeout_ms)
        .read_timeout_ms(args.timeout_ms);
    if let Some(port) = args.port {
        builder = builder.port(port);
    }
    let config = builder.build();

    let mut client = match Client::open(config, &args.user, &args.password) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to connect: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = run(&mut client, args.command);
    client.disconnect();

    match outcome {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Run one subcommand and render its output as JSON
fn run(client: &mut Client, command: Commands) -> Result<String> {
    match command {
        Commands::Exec { path, params } => {
            let params: Vec<&str> = params.iter().map(String::as_str).collect();
            let result = client.execute(&path, &params)?;
            render(&result)
        }
        Commands::Identity => render(&SystemApi::new(client).identity()?),
        Commands::Resources => render(&SystemApi::new(client).resources()?),
        Commands::Clock => render(&SystemApi::new(client).clock()?),
        Commands::Ping { address, count } => render(&SystemApi::new(client).ping(&address, count)?),
        Commands::Users => render(&HotspotApi::new(client).list_users()?),
        Commands::AddUser {
            name,
            password,
            profile,
            comment,
        } => {
            let id = HotspotApi::new(client).create_user(&name, &password, &profile, &comment)?;
            render(&serde_json::json!({ "id": id }))
        }
        Commands::RemoveUser { id } => {
            HotspotApi::new(client).remove_user(&id)?;
            render(&serde_json::json!({ "removed": id }))
        }
        Commands::Active => render(&ActiveApi::new(client).list_active()?),
        Commands::Kick { user } => {
            ActiveApi::new(client).kick_user(&user)?;
            render(&serde_json::json!({ "kicked": user }))
        }
        Commands::Profiles => render(&ProfileApi::new(client).list_profiles()?),
        Commands::AddProfile {
            name,
            rate_limit,
            session_timeout,
            shared_users,
        } => {
            let spec = ProfileSpec {
                name,
                rate_limit,
                session_timeout,
                shared_users,
            };
            let id = ProfileApi::new(client).add_profile(&spec)?;
            render(&serde_json::json!({ "id": id }))
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| RosError::Serialization(e.to_string()))
}
