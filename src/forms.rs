//! Explicit form validation. Each form has a `validate` method returning the
//! cleaned data or the per-field errors used to redisplay the form.

use serde::Deserialize;

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_MESSAGE_LENGTH: usize = 4000;

#[derive(Debug, Default)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First error recorded for a field, if any.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }
}

fn check_message(errors: &mut FieldErrors, message: &str) {
    if message.is_empty() {
        errors.push("message", "Message cannot be empty");
    } else if message.chars().count() > MAX_MESSAGE_LENGTH {
        errors.push(
            "message",
            format!("Message too long (max {MAX_MESSAGE_LENGTH} chars)"),
        );
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewTopicForm {
    pub title: String,
    pub message: String,
}

#[derive(Debug)]
pub struct NewTopicData {
    pub title: String,
    pub message: String,
}

impl NewTopicForm {
    pub fn validate(&self) -> Result<NewTopicData, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = self.title.trim();
        let message = self.message.trim();
        if title.is_empty() {
            errors.push("title", "Title cannot be empty");
        } else if title.chars().count() > MAX_TITLE_LENGTH {
            errors.push("title", format!("Title too long (max {MAX_TITLE_LENGTH} chars)"));
        }
        check_message(&mut errors, message);
        if errors.is_empty() {
            Ok(NewTopicData {
                title: title.to_string(),
                message: message.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    pub message: String,
}

#[derive(Debug)]
pub struct PostData {
    pub message: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<PostData, FieldErrors> {
        let mut errors = FieldErrors::default();
        let message = self.message.trim();
        check_message(&mut errors, message);
        if errors.is_empty() {
            Ok(PostData {
                message: message.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts_valid_topic() {
        let form = NewTopicForm {
            title: "  Hello  ".into(),
            message: " World ".into(),
        };
        let data = form.validate().unwrap();
        assert_eq!(data.title, "Hello");
        assert_eq!(data.message, "World");
    }

    #[test]
    fn rejects_empty_fields() {
        let form = NewTopicForm {
            title: "   ".into(),
            message: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.for_field("title"), Some("Title cannot be empty"));
        assert_eq!(errors.for_field("message"), Some("Message cannot be empty"));
    }

    #[test]
    fn rejects_overlong_title() {
        let form = NewTopicForm {
            title: "x".repeat(MAX_TITLE_LENGTH + 1),
            message: "ok".into(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.for_field("title").unwrap().starts_with("Title too long"));
        assert_eq!(errors.for_field("message"), None);
    }

    #[test]
    fn rejects_overlong_message() {
        let form = PostForm {
            message: "x".repeat(MAX_MESSAGE_LENGTH + 1),
        };
        assert!(form.validate().is_err());
    }
}
