/// Shelf Server - client-server book cataloguing service
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use clap::{Parser, Subcommand};
use shelf_core::types::NewBook;
use shelf_server::{
    api, config::ServerConfig, middleware, services::AuthService, state::AppState,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelf-server")]
#[command(about = "Shelf book cataloguing server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a user account
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Given name
        #[arg(long, default_value = "")]
        name: String,
        /// Family name
        #[arg(long, default_value = "")]
        surname: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// National id
        #[arg(long)]
        national_id: String,
    },
    /// List all user accounts
    ListUsers,
    /// Import catalog entries from a JSON file
    ImportBooks {
        /// Path to a JSON array of books
        path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve().await?,
        Commands::AddUser {
            username,
            password,
            name,
            surname,
            email,
            national_id,
        } => {
            add_user(&username, &password, &name, &surname, &email, &national_id).await?;
        }
        Commands::ListUsers => list_users().await?,
        Commands::ImportBooks { path } => import_books(&path).await?,
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Shelf Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let pool = shelf_storage::create_pool(&config.storage.database_url).await?;
    shelf_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    ));
    tracing::info!("Auth service initialized");

    let app_state = AppState::new(pool, Arc::clone(&auth_service));
    let app = create_router(app_state, auth_service);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(app_state: AppState, auth_service: Arc<AuthService>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Catalog
        .route("/books", get(api::books::search_books))
        .route("/books/:id", get(api::books::get_book))
        .route(
            "/books/:id/recommendations",
            get(api::books::recommended_for_book),
        )
        .route("/books/:id/ratings", get(api::books::ratings_for_book))
        .route(
            "/books/:id/ratings/summary",
            get(api::books::rating_summary_for_book),
        )
        // Libraries
        .route("/libraries", get(api::libraries::list_libraries))
        .route("/libraries", post(api::libraries::create_library))
        .route("/libraries/:name", put(api::libraries::rename_library))
        .route("/libraries/:name", delete(api::libraries::delete_library))
        .route("/libraries/:name/books", get(api::libraries::list_books))
        .route("/libraries/:name/books", post(api::libraries::add_book))
        .route(
            "/libraries/:name/books/:book_id",
            delete(api::libraries::remove_book),
        )
        // Recommendations
        .route(
            "/recommendations",
            get(api::recommendations::list_recommendations),
        )
        .route(
            "/recommendations/detailed",
            get(api::recommendations::list_recommendations_detailed),
        )
        .route(
            "/recommendations/count",
            get(api::recommendations::count_given),
        )
        .route(
            "/recommendations",
            post(api::recommendations::add_recommendation),
        )
        .route(
            "/recommendations",
            put(api::recommendations::update_comment),
        )
        .route(
            "/recommendations",
            delete(api::recommendations::delete_recommendation),
        )
        // Ratings
        .route("/ratings", post(api::ratings::save_rating))
        .route(
            "/ratings/detailed",
            get(api::ratings::list_ratings_detailed),
        )
        .route("/ratings/:book_id", get(api::ratings::get_rating))
        .route("/ratings/:book_id", put(api::ratings::update_rating))
        .route("/ratings/:book_id", delete(api::ratings::delete_rating))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn add_user(
    username: &str,
    password: &str,
    name: &str,
    surname: &str,
    email: &str,
    national_id: &str,
) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = shelf_storage::create_pool(&config.storage.database_url).await?;
    shelf_storage::run_migrations(&pool).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );

    let password_hash = auth_service.hash_password(password)?;

    let user = shelf_storage::users::create(
        &pool,
        shelf_core::types::NewUser {
            username: username.to_string(),
            name: name.to_string(),
            surname: surname.to_string(),
            email: email.to_string(),
            national_id: national_id.to_string(),
        },
        &password_hash,
    )
    .await?;

    tracing::info!("Created user {}", user.username);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = shelf_storage::create_pool(&config.storage.database_url).await?;
    shelf_storage::run_migrations(&pool).await?;

    let users = shelf_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} {}", user.username, user.name, user.surname);
    }

    Ok(())
}

async fn import_books(path: &str) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = shelf_storage::create_pool(&config.storage.database_url).await?;
    shelf_storage::run_migrations(&pool).await?;

    let contents = tokio::fs::read_to_string(path).await?;
    let books: Vec<NewBook> = serde_json::from_str(&contents)?;

    let count = books.len();
    for book in books {
        shelf_storage::books::insert(&pool, book).await?;
    }

    tracing::info!("Imported {} books from {}", count, path);

    Ok(())
}
