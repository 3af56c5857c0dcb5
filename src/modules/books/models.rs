use serde::{Deserialize, Serialize};
use shelf_store::{Record, RecordId, Rules, Validate, Violation};

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub author: String,
    pub description: String,
    /// 1 to 5
    pub rating: i64,
    pub published_year: i64,
}

/// Every book field except the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub description: String,
    pub rating: i64,
    pub published_year: i64,
}

impl Record for Book {
    type Fields = BookFields;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_fields(id: RecordId, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            description: fields.description,
            rating: fields.rating,
            published_year: fields.published_year,
        }
    }

    fn apply_fields(&mut self, fields: BookFields) {
        *self = Self::from_fields(self.id, fields);
    }
}

/// Body of `POST /create-book` and `PUT /update_book`.
///
/// The id is ignored on create and selects the book to replace on update.
#[derive(Debug, Clone, Deserialize)]
pub struct BookRequest {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub title: String,
    pub author: String,
    pub description: String,
    pub rating: i64,
    pub published_year: i64,
}

impl BookRequest {
    pub fn into_fields(self) -> BookFields {
        BookFields {
            title: self.title,
            author: self.author,
            description: self.description,
            rating: self.rating,
            published_year: self.published_year,
        }
    }
}

impl Validate for BookRequest {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        Rules::new()
            .min_chars("title", &self.title, 3)
            .min_chars("author", &self.author, 1)
            .char_range("description", &self.description, 1, 100)
            .int_range("rating", self.rating, 1, 5)
            .int_range("published_year", self.published_year, 1, 2999)
            .finish()
    }
}

/// `?rating=R` filter
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RatingQuery {
    pub rating: i64,
}

impl Validate for RatingQuery {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        Rules::new().int_range("rating", self.rating, 1, 5).finish()
    }
}

/// Any integer year is accepted as a filter
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PublishedYearPath {
    pub published_year: i64,
}

impl Validate for PublishedYearPath {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        Ok(())
    }
}

/// The catalog a fresh books service starts with
pub fn seed_catalog() -> Vec<Book> {
    let book = |id, title: &str, author: &str, description: &str, rating, published_year| Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        description: description.to_string(),
        rating,
        published_year,
    };

    vec![
        book(1, "Computer Science Pro", "codingwithroby", "A very nice book!", 5, 2012),
        book(2, "Be Fast with FastAPI", "codingwithroby", "A great book!", 5, 2019),
        book(3, "Master Endpoints", "codingwithroby", "A awesome book!", 5, 2022),
        book(4, "HP1", "Author 1", "Book Description", 2, 2019),
        book(5, "HP2", "Author 2", "Book Description", 3, 2003),
        book(6, "HP3", "Author 3", "Book Description", 1, 2001),
    ]
}
