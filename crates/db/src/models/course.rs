//! Course entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use coursekit_core::types::{DbId, Timestamp};

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    /// Unique by convention only; duplicate slugs are possible and the
    /// slug lookup takes the first match.
    pub slug: String,
    pub description: String,
    pub category_id: Option<DbId>,
    pub instructor_id: Option<DbId>,
    pub price: f64,
    pub original_price: f64,
    pub level: String,
    /// One of `draft`, `published`, `review`.
    pub status: String,
    pub featured: bool,
    pub students_count: i32,
    pub rating: f64,
    pub reviews_count: i32,
    pub thumbnail: String,
    pub prerequisites: Vec<DbId>,
    pub why_take_this_course: String,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a course.
///
/// Aggregate counters (`students_count`, `rating`, `reviews_count`) start at
/// zero via column defaults. Category existence, slug uniqueness, and price
/// ranges are client-form concerns, not checked here.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub instructor_id: Option<DbId>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub level: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub thumbnail: Option<String>,
    pub prerequisites: Option<Vec<DbId>>,
    pub why_take_this_course: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating a course. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub instructor_id: Option<DbId>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub level: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub thumbnail: Option<String>,
    pub prerequisites: Option<Vec<DbId>>,
    pub why_take_this_course: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Catalog listing filters. Equality filters plus one of the supported
/// sort orders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseFilters {
    pub category: Option<DbId>,
    pub level: Option<String>,
    pub sort: Option<CourseSort>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseSort {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    Rating,
}

impl CourseSort {
    /// ORDER BY clause fragment for this sort.
    pub fn order_clause(self) -> &'static str {
        match self {
            Self::Newest => "created_at DESC",
            Self::PriceLow => "price ASC",
            Self::PriceHigh => "price DESC",
            Self::Rating => "rating DESC",
        }
    }
}
