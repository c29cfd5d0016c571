use crate::models::{Author, BlogPost, POSTS_COLLECTION};
use crate::store::{Document, DocumentStore, StoreResult};

const TITLES: &[&str] = &[
    "10 things -- you won't believe #4",
    "Notes from a quiet morning",
    "Why I switched editors",
    "On the shortest day of the year",
    "A field guide to sourdough",
];

const AUTHORS: &[(&str, &str)] = &[
    ("Billy", "Bob"),
    ("Jane", "Roe"),
    ("Ada", "Lovelace"),
];

const CONTENT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

/// Builds `n` sample posts, cycling through a fixed set of titles and authors.
pub fn sample_posts(n: usize) -> Vec<BlogPost> {
    (0..n)
        .map(|i| {
            let (first, last) = AUTHORS[i % AUTHORS.len()];
            BlogPost {
                title: TITLES[i % TITLES.len()].to_string(),
                author: Author::new(first, last),
                content: CONTENT.to_string(),
            }
        })
        .collect()
}

/// Inserts `n` sample posts in one batch.
pub fn seed_posts(store: &DocumentStore, n: usize) -> StoreResult<Vec<Document<BlogPost>>> {
    log::info!("event=seed_posts count={n}");
    store
        .collection::<BlogPost>(POSTS_COLLECTION)
        .insert_many(sample_posts(n))
}
