#[macro_use]
extern crate rocket;

use std::path::Path;

use rocket::fs::FileServer;
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};

mod boot;
mod config;
mod content;
mod models;
mod render;
mod routes;
mod rss;
mod seo;
mod view;

mod tests;

use config::SiteConfig;
use content::ContentStore;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Halaman tidak dijumpai.</p><a href='/'>&larr; Kembali</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Ralat pelayan.</p><a href='/'>&larr; Kembali</a></body></html>".to_string())
}

/// Assemble the Rocket instance from a config and a loaded content store.
/// Split out from the launch fn so tests can drive it with fixtures.
pub fn build_rocket(config: SiteConfig, store: ContentStore) -> Rocket<Build> {
    let static_dir = config.static_dir.clone();
    rocket::build()
        .manage(config)
        .manage(store)
        .mount("/static", FileServer::from(static_dir).rank(5))
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = match SiteConfig::load(Path::new("tapak.toml")) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    // Boot check: verify/create directories, warn about missing data files
    boot::run(&config);

    let store = ContentStore::load(&config);

    build_rocket(config, store)
}
