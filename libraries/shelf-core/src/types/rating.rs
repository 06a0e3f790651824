//! Rating types
//!
//! A rating is a user's evaluation of a single book on five criteria,
//! each scored 1-5 with a free-text note, plus an overall score and a
//! final comment. At most one rating exists per (user, book).

use super::ids::{BookId, LibraryId, UserId};
use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};

/// The five rating criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Writing style
    Style,
    /// Content
    Content,
    /// Enjoyment
    Enjoyment,
    /// Originality
    Originality,
    /// Quality of the edition
    Edition,
}

impl Criterion {
    /// All criteria, in canonical order
    pub const ALL: [Criterion; 5] = [
        Criterion::Style,
        Criterion::Content,
        Criterion::Enjoyment,
        Criterion::Originality,
        Criterion::Edition,
    ];

    /// Stable name used in queries and wire payloads
    pub fn as_str(self) -> &'static str {
        match self {
            Criterion::Style => "style",
            Criterion::Content => "content",
            Criterion::Enjoyment => "enjoyment",
            Criterion::Originality => "originality",
            Criterion::Edition => "edition",
        }
    }

    /// Parse a criterion from its stable name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "style" => Some(Criterion::Style),
            "content" => Some(Criterion::Content),
            "enjoyment" => Some(Criterion::Enjoyment),
            "originality" => Some(Criterion::Originality),
            "edition" => Some(Criterion::Edition),
            _ => None,
        }
    }
}

/// Per-criterion integer scores, each in [1, 5]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScores {
    /// Writing style score
    pub style: i64,
    /// Content score
    pub content: i64,
    /// Enjoyment score
    pub enjoyment: i64,
    /// Originality score
    pub originality: i64,
    /// Edition quality score
    pub edition: i64,
}

impl CriterionScores {
    /// Score for one criterion
    pub fn get(&self, criterion: Criterion) -> i64 {
        match criterion {
            Criterion::Style => self.style,
            Criterion::Content => self.content,
            Criterion::Enjoyment => self.enjoyment,
            Criterion::Originality => self.originality,
            Criterion::Edition => self.edition,
        }
    }

    /// Reject any score outside [1, 5]
    pub fn validate(&self) -> Result<()> {
        for criterion in Criterion::ALL {
            let score = self.get(criterion);
            if !(1..=5).contains(&score) {
                return Err(ShelfError::invalid_input(format!(
                    "{} score must be between 1 and 5, got {}",
                    criterion.as_str(),
                    score
                )));
            }
        }
        Ok(())
    }

    /// Arithmetic mean of the five scores
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> f64 {
        let sum = self.style + self.content + self.enjoyment + self.originality + self.edition;
        sum as f64 / 5.0
    }
}

/// Per-criterion free-text notes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionNotes {
    /// Note on writing style
    pub style: String,
    /// Note on content
    pub content: String,
    /// Note on enjoyment
    pub enjoyment: String,
    /// Note on originality
    pub originality: String,
    /// Note on the edition
    pub edition: String,
}

/// A stored rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Rating user
    pub user_id: UserId,

    /// Rated book
    pub book_id: BookId,

    /// Library through which the book was read
    pub library_id: LibraryId,

    /// Per-criterion scores
    pub scores: CriterionScores,

    /// Per-criterion notes
    pub notes: CriterionNotes,

    /// Overall score, caller-supplied (expected to equal the criterion mean)
    pub overall: f64,

    /// Closing comment
    pub final_comment: String,

    /// Creation timestamp
    pub created_at: String,
}

/// Data for saving a rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRating {
    /// Per-criterion scores
    pub scores: CriterionScores,

    /// Per-criterion notes
    pub notes: CriterionNotes,

    /// Overall score
    pub overall: f64,

    /// Closing comment
    pub final_comment: String,
}

impl NewRating {
    /// Reject out-of-range criterion or overall scores
    pub fn validate(&self) -> Result<()> {
        self.scores.validate()?;
        if !(1.0..=5.0).contains(&self.overall) {
            return Err(ShelfError::invalid_input(format!(
                "overall score must be between 1 and 5, got {}",
                self.overall
            )));
        }
        Ok(())
    }
}

/// Full replacement of a rating's mutable fields
pub type UpdateRating = NewRating;

/// Aggregate averages for one book, across all raters
///
/// Empty aggregates are zero-valued, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Number of ratings
    pub count: i64,

    /// Mean overall score, 0.0 when unrated
    pub overall: f64,

    /// Mean writing style score
    pub style: f64,

    /// Mean content score
    pub content: f64,

    /// Mean enjoyment score
    pub enjoyment: f64,

    /// Mean originality score
    pub originality: f64,

    /// Mean edition quality score
    pub edition: f64,
}

/// A rating joined with display names, for per-user listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingDetail {
    /// Rated book
    pub book_id: BookId,

    /// Book title
    pub book_title: String,

    /// Book author
    pub book_author: String,

    /// Library through which the book was read
    pub library_name: String,

    /// Per-criterion scores
    pub scores: CriterionScores,

    /// Overall score
    pub overall: f64,

    /// Closing comment
    pub final_comment: String,

    /// Creation timestamp
    pub created_at: String,
}
