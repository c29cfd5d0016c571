#[macro_use]
extern crate rocket;

use blog_posts::{create_rocket, seed, AppConfig, BlogPost, DocumentStore, Environment, POSTS_COLLECTION};

#[launch]
fn rocket() -> _ {
    let config = AppConfig::from_env(Environment::Production).expect("Invalid configuration");
    let store = DocumentStore::open(&config.database_url).expect("Failed to open database");

    if config.seed_posts > 0 {
        let existing = store
            .collection::<BlogPost>(POSTS_COLLECTION)
            .count()
            .expect("Failed to count posts");
        if existing == 0 {
            seed::seed_posts(&store, config.seed_posts).expect("Failed to seed posts");
        }
    }

    let mut rocket = create_rocket(store);
    if let Some(port) = config.port {
        let figment = rocket.figment().clone().merge(("port", port));
        rocket = rocket.configure(figment);
    }
    rocket
}
