//! Process-level application state.
//!
//! Everything a handler reads lives here, constructed once and shared as an
//! `Arc`. Nothing is ambient: the tables are built in [`State::new`] and
//! injected into handlers by the server.

use std::sync::Arc;

use crate::error::Error;
use crate::random::{RandomSource, ThreadRandom};
use crate::render::Templates;
use crate::store::{LookupTable, TitleSet};

pub struct State {
    /// Known users: login name to display name.
    pub users: LookupTable<String>,
    /// Known posts by id.
    pub posts: LookupTable<i64>,
    /// The one mutable table: movie titles, unique.
    pub movies: TitleSet,
    /// Compliment pool for the greeter pages.
    pub compliments: Vec<String>,
    pub templates: Templates,
    pub random: Box<dyn RandomSource>,
}

impl State {
    pub fn new() -> Result<Arc<Self>, Error> {
        Self::with_random(Box::new(ThreadRandom))
    }

    /// Builds the state with a caller-chosen random source. Tests pass a
    /// seeded source and get reproducible pages.
    pub fn with_random(random: Box<dyn RandomSource>) -> Result<Arc<Self>, Error> {
        Ok(Arc::new(Self {
            users: LookupTable::new([
                ("whiskey".to_owned(), "Whiskey The Dog"),
                ("spike".to_owned(), "Spike The Porcupine"),
            ]),
            posts: LookupTable::new([
                (1, "I like mayo!"),
                (2, "I hate double rainbow"),
                (3, "YOLO"),
            ]),
            movies: TitleSet::new(["Amadeus", "Chicken Run", "Dances With Wolves"]),
            compliments: ["cool", "clever", "tenacious", "awesome", "brave"]
                .map(String::from)
                .to_vec(),
            templates: Templates::new()?,
            random,
        }))
    }
}
