use crate::models::Movie;

/// Text a rendered card shows, in reading order. Button labels are not part of it.
pub fn card_text(movie: &Movie) -> String {
    format!("{} Rating: {}/5 Genre: {}", movie.title, movie.rating, movie.genre_line())
}

/// Case-insensitive substring test. An empty query matches everything.
pub fn matches(text: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || text.to_lowercase().contains(&query.to_lowercase())
}

/// Visibility of each card for `query`, in the order the cards were rendered.
pub fn visibility(movies: &[Movie], query: &str) -> Vec<bool> {
    movies.iter().map(|m| matches(&card_text(m), query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies() -> Vec<Movie> {
        vec![
            Movie { id: 1, title: "Alien".into(), rating: 5, ..Default::default() },
            Movie {
                id: 2,
                title: "Amélie".into(),
                rating: 4,
                genre: vec!["Romance".into()],
                ..Default::default()
            },
        ]
    }

    #[test]
    fn matches_any_visible_text_ignoring_case() {
        assert_eq!(visibility(&movies(), "ALI"), vec![true, false]);
        assert_eq!(visibility(&movies(), "romance"), vec![false, true]);
        assert_eq!(visibility(&movies(), "rating: 4"), vec![false, true]);
    }

    #[test]
    fn unmatched_query_hides_all_and_empty_restores() {
        assert_eq!(visibility(&movies(), "zzz"), vec![false, false]);
        assert_eq!(visibility(&movies(), ""), vec![true, true]);
        assert_eq!(visibility(&movies(), "   "), vec![true, true]);
    }

    #[test]
    fn does_not_match_hidden_fields() {
        let movie = Movie { id: 3, title: "Heat".into(), plot: "bank job".into(), ..Default::default() };
        assert!(!matches(&card_text(&movie), "bank"));
    }

    #[test]
    fn button_labels_are_not_searchable() {
        assert_eq!(visibility(&movies(), "edit"), vec![false, false]);
        assert_eq!(visibility(&movies(), "details"), vec![false, false]);
    }
}
