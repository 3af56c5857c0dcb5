use serde::{Deserialize, Serialize};
use shelf_store::{Record, RecordId, Rules, Validate, Violation};

/// A task on the todo list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    /// 1 to 5
    pub priority: i64,
    pub complete: bool,
}

/// Body of `POST /todo` and `PUT /todo/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFields {
    pub title: String,
    pub description: String,
    pub priority: i64,
    #[serde(default)]
    pub complete: bool,
}

impl Record for Todo {
    type Fields = TodoFields;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_fields(id: RecordId, fields: TodoFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            complete: fields.complete,
        }
    }

    fn apply_fields(&mut self, fields: TodoFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.priority = fields.priority;
        self.complete = fields.complete;
    }
}

impl Validate for TodoFields {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        Rules::new()
            .min_chars("title", &self.title, 3)
            .char_range("description", &self.description, 3, 100)
            .int_range("priority", self.priority, 1, 5)
            .finish()
    }
}
