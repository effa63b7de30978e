use std::cmp::Ordering;

use serde::Deserialize;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::models::Movie;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Default,
    Title,
    Rating,
    Genre,
}

impl SortField {
    pub const ALL: [SortField; 4] =
        [SortField::Default, SortField::Title, SortField::Rating, SortField::Genre];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Default => "default",
            SortField::Title => "title",
            SortField::Rating => "rating",
            SortField::Genre => "genre",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortField::Default => "Default",
            SortField::Title => "Title",
            SortField::Rating => "Rating",
            SortField::Genre => "Genre",
        }
    }

    fn key(self, movie: &Movie) -> Option<String> {
        match self {
            SortField::Default => None,
            SortField::Title => Some(movie.title.clone()),
            SortField::Rating => Some(movie.rating.to_string()),
            SortField::Genre => Some(movie.genre_line()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Orders `movies` in place. `Default` keeps the fetched order, or reverses
    /// it when descending, without looking at any field.
    pub fn apply(self, movies: &mut [Movie]) {
        if self.field == SortField::Default {
            if self.order == SortOrder::Desc {
                movies.reverse();
            }
            return;
        }

        movies.sort_by(|a, b| {
            let (a, b) = (self.field.key(a), self.field.key(b));
            let ord = locale_cmp(a.as_deref().unwrap_or(""), b.as_deref().unwrap_or(""));
            match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }
}

/// Compares base letters first, ignoring case and accents. Ties go unaccented
/// before accented, then lowercase before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let (la, lb) = (a.to_lowercase(), b.to_lowercase());
    fold(&la).cmp(&fold(&lb)).then_with(|| la.cmp(&lb)).then_with(|| b.cmp(a))
}

fn fold(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
