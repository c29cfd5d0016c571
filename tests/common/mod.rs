#![allow(dead_code)]

use blog_posts::{create_rocket, seed, AppConfig, BlogPost, Collection, DocumentStore, Environment, POSTS_COLLECTION};
use rocket::http::ContentType;
use rocket::local::blocking::{Client, LocalResponse};

/// A running test server over the test store.
///
/// The database is dropped when the fixture goes out of scope, including
/// when a test panics.
pub struct TestApp {
    client: Client,
}

impl TestApp {
    pub fn start() -> Self {
        let config = AppConfig::from_env(Environment::Test).unwrap();
        Self::with_url(&config.database_url)
    }

    pub fn with_url(database_url: &str) -> Self {
        let store = DocumentStore::open(database_url).unwrap();
        let client = Client::tracked(create_rocket(store)).unwrap();
        Self { client }
    }

    /// Starts the server and seeds `n` sample posts.
    pub fn seeded(n: usize) -> Self {
        let app = Self::start();
        seed::seed_posts(app.store(), n).unwrap();
        app
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn store(&self) -> &DocumentStore {
        self.client.rocket().state::<DocumentStore>().unwrap()
    }

    pub fn posts(&self) -> Collection<'_, BlogPost> {
        self.store().collection(POSTS_COLLECTION)
    }

    pub fn post_json(&self, uri: &str, body: &serde_json::Value) -> LocalResponse<'_> {
        self.client.post(uri.to_string())
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
    }

    pub fn put_json(&self, uri: &str, body: &serde_json::Value) -> LocalResponse<'_> {
        self.client.put(uri.to_string())
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(store) = self.client.rocket().state::<DocumentStore>() {
            if let Err(e) = store.drop_database() {
                eprintln!("failed to drop test database: {e}");
            }
        }
    }
}

pub fn generate_post_data() -> serde_json::Value {
    serde_json::json!({
        "title": "something something",
        "author": {
            "firstName": "Someone",
            "lastName": "Somewhere"
        },
        "content": "Sed ut perspiciatis unde omnis iste natus error sit voluptatem accusantium doloremque laudantium, totam rem aperiam, eaque ipsa quae ab illo inventore veritatis et quasi architecto beatae vitae dicta sunt explicabo."
    })
}
