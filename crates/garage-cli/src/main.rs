use anyhow::{Context, Result};
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use garage_core::auth::DEFAULT_TOKEN_TTL_HOURS;
use garage_core::models::{Administrator, Vehicle};
use garage_core::traits::{AdministratorStore, VehicleStore};
use garage_core::validation::AdministratorInput;
use garage_core::{AuthService, TokenService};
use garage_db::{Database, DatabaseConfig};

#[derive(Parser)]
#[command(name = "garage", version, about = "Garage vehicle registry administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Create the default administrator if no administrators exist
    Seed {
        #[arg(long, env = "GARAGE_SEED_ADMIN_EMAIL", default_value = "admin@gmail.com")]
        email: String,

        #[arg(long, env = "GARAGE_SEED_ADMIN_PASSWORD", default_value = "admin")]
        password: String,
    },

    /// Create an administrator account
    CreateAdmin {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// `admin` or `editor`
        #[arg(short, long)]
        role: String,
    },

    /// List administrators (passwords are never shown)
    ListAdmins {
        /// 1-based page of 10; omit to list all
        #[arg(long)]
        page: Option<u32>,
    },

    /// List vehicles
    ListVehicles {
        /// 1-based page of 10; omit to list all
        #[arg(long)]
        page: Option<u32>,
    },

    /// Log in and print a bearer token
    IssueToken {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Token signing key, must match the server's
        #[arg(long, env = "GARAGE_JWT_SECRET", hide_env_values = true)]
        secret: String,

        #[arg(long, env = "GARAGE_TOKEN_TTL_HOURS", default_value_t = DEFAULT_TOKEN_TTL_HOURS)]
        ttl_hours: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays scriptable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("garage=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = connect_db().await?;

    match cli.command {
        Commands::Migrate => {
            db.migrate().await?;
            println!("Migrations applied");
        }
        Commands::Seed { email, password } => {
            match db.seed_default_administrator(&email, &password).await? {
                Some(admin) => println!("Created default administrator {} (id {})", admin.email, admin.id),
                None => println!("Administrators already exist, nothing to seed"),
            }
        }
        Commands::CreateAdmin {
            email,
            password,
            role,
        } => {
            let auth = AuthService::new(db.administrator_repo());
            let admin = auth
                .create_administrator(AdministratorInput {
                    email: &email,
                    password: &password,
                    role: Some(&role),
                })
                .await?;
            println!("Created {} {} (id {})", admin.role, admin.email, admin.id);
        }
        Commands::ListAdmins { page } => {
            let admins = db.administrator_repo().list(page).await?;
            print_administrators(&admins);
        }
        Commands::ListVehicles { page } => {
            let vehicles = db.vehicle_repo().list(page).await?;
            print_vehicles(&vehicles);
        }
        Commands::IssueToken {
            email,
            password,
            secret,
            ttl_hours,
        } => {
            let ttl = TimeDelta::try_hours(ttl_hours)
                .context("GARAGE_TOKEN_TTL_HOURS is out of range")?;
            let tokens = TokenService::new(&secret, ttl)?;

            let auth = AuthService::new(db.administrator_repo());
            let admin = auth
                .login(&email, &password)
                .await?
                .context("Invalid email or password")?;

            println!("{}", tokens.generate_token(&admin)?);
        }
    }

    Ok(())
}

/// Connect to PostgreSQL using DATABASE_URL.
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env().context("Invalid database configuration")?;
    let db = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;
    Ok(db)
}

fn print_administrators(admins: &[Administrator]) {
    if admins.is_empty() {
        println!("No administrators found");
        return;
    }

    println!("{:>6}  {:<8}  EMAIL", "ID", "ROLE");
    for admin in admins {
        println!("{:>6}  {:<8}  {}", admin.id, admin.role.as_str(), admin.email);
    }
    println!("\nTotal: {} administrators", admins.len());
}

fn print_vehicles(vehicles: &[Vehicle]) {
    if vehicles.is_empty() {
        println!("No vehicles found");
        return;
    }

    println!("{:>6}  {:<20}  {:<12}  YEAR", "ID", "NAME", "BRAND");
    for vehicle in vehicles {
        println!(
            "{:>6}  {:<20}  {:<12}  {}",
            vehicle.id, vehicle.name, vehicle.brand, vehicle.year
        );
    }
    println!("\nTotal: {} vehicles", vehicles.len());
}
