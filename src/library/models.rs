//! Public representations (DTOs) and the entity -> DTO mapper

use super::entities::{Author, Book};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Author as exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    /// "{firstName} {lastName}"
    pub name: String,
    /// Age in whole years
    pub age: i32,
    pub genre: String,
}

crate::impl_resource!(AuthorDto, "author_dto", {
    "id" => id,
    "name" => name,
    "age" => age,
    "genre" => genre,
});

impl AuthorDto {
    /// Map an author, computing the age as of `today`
    pub fn from_author(author: &Author, today: NaiveDate) -> Self {
        Self {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age: current_age(author.date_of_birth, today),
            genre: author.genre.clone(),
        }
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self::from_author(author, Utc::now().date_naive())
    }
}

/// Book as exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

crate::impl_resource!(BookDto, "book_dto", {
    "id" => id,
    "title" => title,
    "description" => description,
    "authorId" => author_id,
});

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            description: book.description.clone(),
            author_id: book.author_id,
        }
    }
}

/// Payload for creating an author, optionally with books
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreationDto {
    #[validate(length(min = 1, max = 50, message = "must be 1 to 50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "must be 1 to 50 characters"))]
    pub last_name: String,

    pub date_of_birth: DateTime<Utc>,

    #[validate(length(min = 1, max = 50, message = "must be 1 to 50 characters"))]
    pub genre: String,

    #[serde(default)]
    #[validate(nested)]
    pub books: Vec<BookForCreationDto>,
}

impl AuthorForCreationDto {
    /// Map to a new author entity with a fresh id
    pub fn to_author(&self) -> Author {
        Author::new(
            self.first_name.trim(),
            self.last_name.trim(),
            self.date_of_birth,
            self.genre.trim(),
        )
    }
}

/// Payload for creating a book
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookForCreationDto {
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub title: String,

    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub description: Option<String>,
}

impl BookForCreationDto {
    pub fn to_book(&self, author_id: Uuid) -> Book {
        Book::new(self.title.trim(), self.description.clone(), author_id)
    }
}

/// Whole years between a birth date and `today`
pub fn current_age(date_of_birth: DateTime<Utc>, today: NaiveDate) -> i32 {
    let born = date_of_birth.date_naive();
    let mut age = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_age() {
        let dob = Utc.with_ymd_and_hms(1947, 9, 21, 0, 0, 0).unwrap();
        assert_eq!(current_age(dob, date(2026, 9, 20)), 78);
        assert_eq!(current_age(dob, date(2026, 9, 21)), 79);
        assert_eq!(current_age(dob, date(2026, 12, 31)), 79);
    }

    #[test]
    fn test_author_dto_mapping() {
        let dob = Utc.with_ymd_and_hms(1947, 9, 21, 0, 0, 0).unwrap();
        let author = Author::new("Stephen", "King", dob, "Horror");
        let dto = AuthorDto::from_author(&author, date(2026, 10, 14));
        assert_eq!(dto.id, author.id);
        assert_eq!(dto.name, "Stephen King");
        assert_eq!(dto.age, 79);
        assert_eq!(dto.genre, "Horror");
    }

    #[test]
    fn test_creation_dto_validation() {
        let dto: AuthorForCreationDto = serde_json::from_value(serde_json::json!({
            "firstName": "",
            "lastName": "Rowling",
            "dateOfBirth": "1965-07-31T00:00:00Z",
            "genre": "Fantasy",
            "books": [{ "title": "" }]
        }))
        .unwrap();
        assert!(dto.validate().is_err());

        let dto: AuthorForCreationDto = serde_json::from_value(serde_json::json!({
            "firstName": "Joanne",
            "lastName": "Rowling",
            "dateOfBirth": "1965-07-31T00:00:00Z",
            "genre": "Fantasy"
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.books.is_empty());
        assert_eq!(dto.to_author().first_name, "Joanne");
    }
}
