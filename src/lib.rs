#[macro_use]
extern crate rocket;

pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod seed;
pub mod store;

use rocket::fairing::AdHoc;

pub use config::{AppConfig, Environment};
pub use models::{Author, BlogPost, PostResponse, POSTS_COLLECTION};
pub use store::{Collection, Document, DocumentId, DocumentStore, StoreError, StoreResult};

pub fn create_rocket(store: DocumentStore) -> rocket::Rocket<rocket::Build> {
    let cors = rocket_cors::CorsOptions::default()
        .allowed_origins(rocket_cors::AllowedOrigins::all())
        .to_cors()
        .expect("CORS config");

    rocket::build()
        .manage(store)
        .attach(cors)
        .attach(AdHoc::on_shutdown("Shutdown log", |_| {
            Box::pin(async move {
                log::info!("event=server_shutdown status=ok");
            })
        }))
        .mount("/", routes![
            routes::health,
            routes::list_posts,
            routes::get_post,
            routes::create_post,
            routes::update_post,
            routes::delete_post,
        ])
        .register("/", catchers![
            routes::bad_request,
            routes::not_found_catcher,
            routes::unprocessable,
            routes::internal_error,
        ])
}
