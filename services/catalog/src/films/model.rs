//! Film record types and input validation.

use dvd_id::FilmId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::error::{FieldViolation, FilmError};

/// A persisted film record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    /// Store-assigned ID.
    pub id: FilmId,

    pub title: String,

    /// Release year. Not range-checked.
    pub year: i32,

    /// City the DVD is kept in.
    pub location: String,

    /// Whether the DVD can be borrowed.
    pub available: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
}

/// Film body as submitted by clients.
///
/// Every field is optional at the wire level so that create and update can
/// report all missing or empty fields at once. Unknown fields, including a
/// client-supplied `id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FilmInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[validate(length(min = 1, message = "location must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,

    #[validate(length(min = 1, message = "director must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
}

/// A validated, not yet persisted film.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFilm {
    pub title: String,
    pub year: i32,
    pub location: String,
    pub available: bool,
    pub director: Option<String>,
}

impl NewFilm {
    /// Attaches a store-assigned ID.
    pub fn into_film(self, id: FilmId) -> Film {
        Film {
            id,
            title: self.title,
            year: self.year,
            location: self.location,
            available: self.available,
            director: self.director,
        }
    }
}

/// The set of fields an update will overwrite. `None` leaves a field as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmPatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub location: Option<String>,
    pub available: Option<bool>,
    pub director: Option<String>,
}

impl FilmPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.year.is_none()
            && self.location.is_none()
            && self.available.is_none()
            && self.director.is_none()
    }

    /// Applies the patch in place and reports whether any stored value changed.
    pub fn apply_to(&self, film: &mut Film) -> bool {
        let before = film.clone();

        if let Some(title) = &self.title {
            film.title.clone_from(title);
        }
        if let Some(year) = self.year {
            film.year = year;
        }
        if let Some(location) = &self.location {
            film.location.clone_from(location);
        }
        if let Some(available) = self.available {
            film.available = available;
        }
        if let Some(director) = &self.director {
            film.director = Some(director.clone());
        }

        *film != before
    }
}

impl FilmInput {
    /// Validates a create body. All fields except `director` are required.
    pub fn into_new_film(self) -> Result<NewFilm, FilmError> {
        let mut violations = violations_from(self.validate());

        if self.title.is_none() {
            violations.push(FieldViolation::missing("title"));
        }
        if self.year.is_none() {
            violations.push(FieldViolation::missing("year"));
        }
        if self.location.is_none() {
            violations.push(FieldViolation::missing("location"));
        }
        if self.available.is_none() {
            violations.push(FieldViolation::missing("available"));
        }

        match (self.title, self.year, self.location, self.available) {
            (Some(title), Some(year), Some(location), Some(available))
                if violations.is_empty() =>
            {
                Ok(NewFilm {
                    title,
                    year,
                    location,
                    available,
                    director: self.director,
                })
            }
            _ => {
                violations.sort_by(|a, b| a.field.cmp(&b.field));
                Err(FilmError::Validation(violations))
            }
        }
    }

    /// Validates an update body. Absent fields are left unchanged.
    pub fn into_patch(self) -> Result<FilmPatch, FilmError> {
        let violations = violations_from(self.validate());
        if !violations.is_empty() {
            return Err(FilmError::Validation(violations));
        }

        Ok(FilmPatch {
            title: self.title,
            year: self.year,
            location: self.location,
            available: self.available,
            director: self.director,
        })
    }
}

fn violations_from(result: Result<(), ValidationErrors>) -> Vec<FieldViolation> {
    let Err(errors) = result else {
        return Vec::new();
    };

    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                FieldViolation::new(field.to_string(), message)
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_input() -> FilmInput {
        FilmInput {
            title: Some("Test Film".to_string()),
            year: Some(2023),
            location: Some("Test City".to_string()),
            available: Some(true),
            director: None,
        }
    }

    fn violation_fields(err: FilmError) -> Vec<String> {
        match err {
            FilmError::Validation(violations) => {
                violations.into_iter().map(|v| v.field).collect()
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_input_is_valid() {
        let film = complete_input().into_new_film().unwrap();
        assert_eq!(film.title, "Test Film");
        assert_eq!(film.year, 2023);
        assert_eq!(film.location, "Test City");
        assert!(film.available);
        assert_eq!(film.director, None);
    }

    #[test]
    fn test_create_reports_every_missing_field() {
        let err = FilmInput::default().into_new_film().unwrap_err();
        assert_eq!(
            violation_fields(err),
            vec!["available", "location", "title", "year"]
        );
    }

    #[test]
    fn test_create_rejects_empty_strings() {
        let input = FilmInput {
            title: Some(String::new()),
            location: Some(String::new()),
            ..complete_input()
        };
        let err = input.into_new_film().unwrap_err();
        assert_eq!(violation_fields(err), vec!["location", "title"]);
    }

    #[test]
    fn test_create_rejects_empty_director() {
        let input = FilmInput {
            director: Some(String::new()),
            ..complete_input()
        };
        assert_eq!(violation_fields(input.into_new_film().unwrap_err()), vec!["director"]);
    }

    #[test]
    fn test_year_is_unconstrained() {
        let input = FilmInput {
            year: Some(-12),
            ..complete_input()
        };
        assert_eq!(input.into_new_film().unwrap().year, -12);
    }

    #[test]
    fn test_client_id_is_ignored() {
        let json = r#"{
            "id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "title": "Test Film",
            "year": 2023,
            "location": "Test City",
            "available": true
        }"#;
        let input: FilmInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, complete_input());
    }

    #[test]
    fn test_wrong_types_fail_to_deserialize() {
        let year_as_text = r#"{"title": "A", "year": "2023", "location": "B", "available": true}"#;
        assert!(serde_json::from_str::<FilmInput>(year_as_text).is_err());

        let available_as_number = r#"{"title": "A", "year": 2023, "location": "B", "available": 1}"#;
        assert!(serde_json::from_str::<FilmInput>(available_as_number).is_err());
    }

    #[test]
    fn test_patch_keeps_only_present_fields() {
        let input: FilmInput =
            serde_json::from_str(r#"{"title": "New", "year": null, "available": false}"#).unwrap();
        let patch = input.into_patch().unwrap();
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert_eq!(patch.year, None);
        assert_eq!(patch.location, None);
        assert_eq!(patch.available, Some(false));
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_empty_patch() {
        assert!(FilmInput::default().into_patch().unwrap().is_empty());
    }

    #[test]
    fn test_patch_rejects_empty_title() {
        let input = FilmInput {
            title: Some(String::new()),
            ..FilmInput::default()
        };
        assert_eq!(violation_fields(input.into_patch().unwrap_err()), vec!["title"]);
    }

    #[test]
    fn test_apply_reports_changes() {
        let mut film = complete_input().into_new_film().unwrap().into_film(FilmId::new());
        let id = film.id;

        let same = FilmPatch {
            title: Some("Test Film".to_string()),
            ..FilmPatch::default()
        };
        assert!(!same.apply_to(&mut film));

        let different = FilmPatch {
            location: Some("Elsewhere".to_string()),
            ..FilmPatch::default()
        };
        assert!(different.apply_to(&mut film));
        assert_eq!(film.location, "Elsewhere");
        assert_eq!(film.id, id);
    }
}
