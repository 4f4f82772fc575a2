use pathwise::content::ContentLoader;
use pathwise::state::AppState;
use pathwise::{config, db, handlers, logging};

#[tokio::main]
async fn main() {
  logging::init("pathwise=debug,tower_http=debug");

  let settings = config::load();

  if !settings.content_dir.is_dir() {
    tracing::warn!(
      "Content directory {} does not exist; the catalog will be empty",
      settings.content_dir.display()
    );
  }

  let pool = db::init_db(&settings.database_path).expect("Failed to initialize database");
  let loader = ContentLoader::from_dir(&settings.content_dir);
  tracing::info!("Serving content from {}", loader.content_root().display());
  let app = handlers::router(AppState::with_db(loader, pool));

  let bind_addr = settings.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", settings.port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
