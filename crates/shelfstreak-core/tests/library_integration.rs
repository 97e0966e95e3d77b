//! Integration tests for shelves, achievements, profiles, the leaderboard,
//! clubs and the router's error handling.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use shelfstreak_core::bot::{CommandHandler, GENERIC_ERROR};
use shelfstreak_core::library::BookMetadata;
use shelfstreak_core::{
    BookLookup, BotContext, CalendarDate, Command, Config, CoreError, Database, DatabaseError,
    FixedClock, Invocation, LookupError, Reply, Router, UserId,
};

/// Canned catalogue: every query is its own title, genre taken from the map.
struct StubCatalog {
    genres: HashMap<String, String>,
    failing: bool,
}

impl StubCatalog {
    fn new() -> Self {
        Self {
            genres: HashMap::new(),
            failing: false,
        }
    }
}

#[async_trait]
impl BookLookup for StubCatalog {
    async fn lookup(&self, query: &str) -> Result<Option<BookMetadata>, LookupError> {
        if self.failing {
            return Err(LookupError::Status {
                service: "stub",
                status: 500,
            });
        }
        if query == "missing" {
            return Ok(None);
        }
        Ok(Some(BookMetadata {
            title: query.to_string(),
            author: "Some Author".into(),
            description: "No description available.".into(),
            genre: self
                .genres
                .get(query)
                .cloned()
                .unwrap_or_else(|| "Unknown Genre".into()),
            cover_url: "https://via.placeholder.com/150".into(),
        }))
    }
}

struct Harness {
    db: Arc<Database>,
    ctx: BotContext,
    router: Router,
}

impl Harness {
    fn with_catalog(catalog: StubCatalog) -> Self {
        let db = Arc::new(Database::open_memory().unwrap());
        let today: CalendarDate = "2024-06-01".parse().unwrap();
        let ctx = BotContext::new(
            Arc::clone(&db),
            Arc::new(FixedClock(today)),
            Arc::new(catalog),
            Config::default(),
        );
        Self {
            db,
            ctx,
            router: Router::with_default_handlers(),
        }
    }

    fn new() -> Self {
        Self::with_catalog(StubCatalog::new())
    }

    async fn run(&self, caller: &str, command: Command) -> Reply {
        self.router
            .dispatch(&self.ctx, &Invocation::new(caller, command).in_guild("guild"))
            .await
    }
}

#[tokio::test]
async fn test_addbook_shelves_and_awards_points() {
    let h = Harness::new();
    let reply = h
        .run("reader", Command::AddBook { title: "Dune".into() })
        .await;
    let embed = reply.embed.unwrap();
    assert_eq!(embed.title, "Book Added");
    assert_eq!(embed.description, "Added \"Dune\" to your list!");
    assert_eq!(embed.thumbnail.as_deref(), Some("https://via.placeholder.com/150"));

    let user = UserId::new("reader");
    assert_eq!(h.db.points(&user).unwrap(), Some(10));
    let count = h.run("reader", Command::BookCount).await;
    assert_eq!(count.embed.unwrap().description, "You've read **1** books so far!");
}

#[tokio::test]
async fn test_addbook_not_found_and_lookup_failure_store_nothing() {
    let h = Harness::new();
    let reply = h
        .run("reader", Command::AddBook { title: "missing".into() })
        .await;
    assert!(reply.content.unwrap().starts_with("Could not find the book."));

    let failing = Harness::with_catalog(StubCatalog {
        failing: true,
        ..StubCatalog::new()
    });
    let reply = failing
        .run("reader", Command::AddBook { title: "Dune".into() })
        .await;
    assert!(reply.content.unwrap().starts_with("Could not find the book."));
    assert!(failing.db.shelf(&UserId::new("reader")).unwrap().is_empty());
}

#[tokio::test]
async fn test_list_and_remove_books() {
    let h = Harness::new();
    for title in ["Dune", "Emma"] {
        h.run("reader", Command::AddBook { title: title.into() }).await;
    }
    let list = h.run("reader", Command::ListBooks).await;
    assert_eq!(
        list.embed.unwrap().description,
        "Here are the books you've read:\n1. Dune\n2. Emma"
    );

    let missing = h
        .run("reader", Command::RemoveBook { title: "Ulysses".into() })
        .await;
    assert_eq!(missing.content.as_deref(), Some("\"Ulysses\" is not in your list!"));

    let removed = h
        .run("reader", Command::RemoveBook { title: "Dune".into() })
        .await;
    assert_eq!(removed.embed.unwrap().fields[0].value, "1");
}

#[tokio::test]
async fn test_genre_explorer_unlocks_and_is_not_revoked() {
    let mut catalog = StubCatalog::new();
    for (title, genre) in [
        ("A", "Fantasy, Dragons"),
        ("B", "Romance"),
        ("C", "History"),
        ("D", "Poetry"),
        ("E", "Science Fiction"),
    ] {
        catalog.genres.insert(title.into(), genre.into());
    }
    let h = Harness::with_catalog(catalog);

    let none = h.run("reader", Command::Achievements).await;
    assert_eq!(
        none.content.as_deref(),
        Some("You haven't unlocked any achievements yet!")
    );

    let mut last = None;
    for title in ["A", "B", "C", "D", "E"] {
        last = Some(h.run("reader", Command::AddBook { title: title.into() }).await);
    }
    let unlocked_field = last.unwrap().embed.unwrap().fields.pop().unwrap();
    assert_eq!(unlocked_field.name, "Achievement Unlocked");
    assert_eq!(unlocked_field.value, "Genre Explorer");

    h.run("reader", Command::RemoveBook { title: "E".into() }).await;
    let listed = h.run("reader", Command::Achievements).await;
    assert_eq!(
        listed.embed.unwrap().description,
        "- Genre Explorer: Read books from 5 different genres"
    );
}

#[tokio::test]
async fn test_leaderboard_orders_by_books() {
    let h = Harness::new();
    let empty = h.run("a", Command::Leaderboard).await;
    assert_eq!(empty.content.as_deref(), Some("No one has logged any books yet!"));

    h.run("a", Command::AddBook { title: "X".into() }).await;
    for title in ["Y", "Z"] {
        h.run("b", Command::AddBook { title: title.into() }).await;
    }
    let board = h.run("a", Command::Leaderboard).await;
    assert_eq!(
        board.embed.unwrap().description,
        "1. <@b> - 2 books\n2. <@a> - 1 books"
    );
}

#[tokio::test]
async fn test_profile_bio_color_and_favorites() {
    let h = Harness::new();
    assert_eq!(
        h.run("reader", Command::Profile).await.content.as_deref(),
        Some("You haven't added any books yet!")
    );

    h.run("reader", Command::AddBook { title: "Dune".into() }).await;
    h.run("reader", Command::SetBio { bio: "Night reader".into() }).await;

    let bad = h
        .run("reader", Command::SetColor { color: "purple".into() })
        .await;
    assert_eq!(
        bad.content.as_deref(),
        Some("Please provide a valid hex color (e.g., #800080)!")
    );
    h.run("reader", Command::SetColor { color: "#112233".into() }).await;

    let not_read = h
        .run("reader", Command::Favorite { title: "Emma".into() })
        .await;
    assert_eq!(not_read.content.as_deref(), Some("\"Emma\" is not in your read list!"));
    let added = h
        .run("reader", Command::Favorite { title: "Dune".into() })
        .await;
    assert_eq!(added.content.as_deref(), Some("Added \"Dune\" to your favorites!"));

    let profile = h.run("reader", Command::Profile).await.embed.unwrap();
    assert_eq!(profile.title, "<@reader>'s Profile");
    assert_eq!(profile.color, "#112233");
    assert_eq!(profile.description, "Night reader");
    let field = |name: &str| {
        profile
            .fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.clone())
            .unwrap()
    };
    assert_eq!(field("Books Read"), "1");
    assert_eq!(field("Leaderboard Position"), "#1");
    assert_eq!(field("Reading Streak"), "No streak yet!");
    assert_eq!(field("Favorite Books"), "Dune");

    let removed = h
        .run("reader", Command::Favorite { title: "Dune".into() })
        .await;
    assert_eq!(removed.content.as_deref(), Some("Removed \"Dune\" from your favorites!"));
}

#[tokio::test]
async fn test_book_club_names_are_unique_per_guild() {
    let h = Harness::new();
    let created = h
        .run("owner", Command::BookClubCreate { name: "Night Owls".into() })
        .await;
    assert_eq!(created.embed.unwrap().description, "Book club **Night Owls** created!");

    let dup = h
        .run("other", Command::BookClubCreate { name: "night owls".into() })
        .await;
    assert!(dup.ephemeral);
    assert_eq!(
        dup.content.as_deref(),
        Some("A book club with that name already exists")
    );
    let club = h.db.load_club("guild-night-owls").unwrap().unwrap();
    assert_eq!(club.owner_id, UserId::new("owner"));
}

#[tokio::test]
async fn test_recommendation_list() {
    let h = Harness::new();
    let empty = h.run("reader", Command::Recommend).await;
    assert!(empty.content.unwrap().starts_with("No queer books available"));

    h.run("reader", Command::RecommendQueer { query: "Maurice".into() })
        .await;
    let pick = h.run("reader", Command::Recommend).await.embed.unwrap();
    assert_eq!(pick.fields[0].value, "Maurice");
}

#[tokio::test]
async fn test_trivia_and_help() {
    let h = Harness::new();
    assert_eq!(h.run("r", Command::FunFact).await.embed.unwrap().title, "Did You Know?");
    assert_eq!(h.run("r", Command::Quote).await.embed.unwrap().title, "Book Quote");
    let mood = h
        .run("r", Command::Mood { mood: "happy".into() })
        .await
        .embed
        .unwrap();
    assert_eq!(mood.description, "Here's a book for your **happy** mood!");
    let bad = h.run("r", Command::Mood { mood: "bored".into() }).await;
    assert_eq!(
        bad.content.as_deref(),
        Some("Please specify a valid mood: happy, sad, or adventurous.")
    );
    let help = h.run("r", Command::Help).await.embed.unwrap();
    assert!(help.description.contains("**/streakadd**"));
}

struct BrokenStore;

#[async_trait]
impl CommandHandler for BrokenStore {
    fn commands(&self) -> &'static [&'static str] {
        &["points"]
    }

    async fn handle(&self, _ctx: &BotContext, _invocation: &Invocation) -> Result<Reply, CoreError> {
        Err(DatabaseError::Locked.into())
    }
}

#[tokio::test]
async fn test_storage_failure_becomes_generic_reply() {
    let h = Harness::new();
    let mut router = Router::new();
    router.register(Arc::new(BrokenStore));

    let reply = router
        .dispatch(&h.ctx, &Invocation::new("reader", Command::Points))
        .await;
    assert!(reply.ephemeral);
    assert_eq!(reply.content.as_deref(), Some(GENERIC_ERROR));

    let unknown = router
        .dispatch(&h.ctx, &Invocation::new("reader", Command::Help))
        .await;
    assert_eq!(unknown.content.as_deref(), Some("Unknown command: help"));
}
