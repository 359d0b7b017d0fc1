//! Seed data for development servers and demos

use super::entities::{Author, Book};
use chrono::{TimeZone, Utc};

fn author(first: &str, last: &str, (y, m, d): (i32, u32, u32), genre: &str) -> Author {
    let date_of_birth = Utc
        .with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_default();
    Author::new(first, last, date_of_birth, genre)
}

/// A handful of authors with their books
pub fn seed_data() -> (Vec<Author>, Vec<Book>) {
    let stephen = author("Stephen", "King", (1947, 9, 21), "Horror");
    let george = author("George", "RR Martin", (1948, 9, 20), "Fantasy");
    let douglas = author("Douglas", "Adams", (1952, 3, 11), "Science fiction");
    let neil = author("Neil", "Gaiman", (1960, 11, 10), "Fantasy");
    let ursula = author("Ursula", "Le Guin", (1929, 10, 21), "Science fiction");
    let daphne = author("Daphne", "du Maurier", (1907, 5, 13), "Gothic");

    let books = vec![
        Book::new(
            "The Shining",
            Some("A family heads to an isolated hotel for the winter.".to_string()),
            stephen.id,
        ),
        Book::new("Misery", None, stephen.id),
        Book::new("A Game of Thrones", None, george.id),
        Book::new("A Dance with Dragons", None, george.id),
        Book::new(
            "The Hitchhiker's Guide to the Galaxy",
            Some("Don't panic.".to_string()),
            douglas.id,
        ),
        Book::new("American Gods", None, neil.id),
        Book::new("The Left Hand of Darkness", None, ursula.id),
        Book::new("Rebecca", None, daphne.id),
    ];

    (vec![stephen, george, douglas, neil, ursula, daphne], books)
}
