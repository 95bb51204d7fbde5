use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use lectern_cli::admin::create_admin;
use lectern_cli::seeder::{self, SeedConfig};
use lectern_db::{PgPool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "lectern-cli")]
#[command(about = "Lectern CLI - Administrative tools for Lectern", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake courses, modules, lessons and students
    Seed {
        /// Number of courses to create
        #[arg(short = 'c', long, default_value = "5")]
        courses: usize,

        /// Number of modules per course
        #[arg(short = 'm', long, default_value = "4")]
        modules: usize,

        /// Number of lessons per module
        #[arg(short = 'l', long, default_value = "5")]
        lessons: usize,

        /// Number of students (each enrolled in up to two seeded courses)
        #[arg(short = 's', long, default_value = "20")]
        students: usize,
    },
    /// Remove all seeded data
    ClearSeed,
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match init_db_pool(&database_url, 5).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&pool, name, email, password).await,
        Commands::Seed {
            courses,
            modules,
            lessons,
            students,
        } => handle_seed(&pool, courses, modules, lessons, students).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
        Commands::Migrate => handle_migrate(&pool).await,
    }
}

fn prompt_or_exit<T>(result: Result<T, dialoguer::Error>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("❌ Failed to read {}: {}", what, e);
        std::process::exit(1);
    })
}

async fn handle_create_admin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let name = name.unwrap_or_else(|| {
        prompt_or_exit(Input::new().with_prompt("Name").interact_text(), "name")
    });

    let email = email.unwrap_or_else(|| {
        prompt_or_exit(
            Input::new().with_prompt("Email address").interact_text(),
            "email",
        )
    });

    let password = password.unwrap_or_else(|| {
        prompt_or_exit(
            Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords don't match")
                .interact(),
            "password",
        )
    });

    match create_admin(pool, &name, &email, &password).await {
        Ok(id) => {
            println!("\n✅ Admin created successfully!");
            println!("   ID: {}", id);
            println!("   Email: {}", email);
            println!("   Name: {}", name);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(
    pool: &PgPool,
    courses: usize,
    modules: usize,
    lessons: usize,
    students: usize,
) {
    let config = SeedConfig::new(courses)
        .with_modules(modules)
        .with_lessons(lessons)
        .with_students(students);

    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    match seeder::clear_all(pool).await {
        Ok(_) => println!("✅ Cleared seeded data"),
        Err(e) => {
            eprintln!("\n❌ Error clearing seeded data: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_migrate(pool: &PgPool) {
    match run_migrations(pool).await {
        Ok(_) => println!("✅ Migrations applied"),
        Err(e) => {
            eprintln!("\n❌ Error running migrations: {}", e);
            std::process::exit(1);
        }
    }
}
