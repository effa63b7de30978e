use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub rating: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub director: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub year: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub plot: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub poster: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub genre: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub actors: Vec<String>,
}

impl Movie {
    pub fn genre_line(&self) -> String {
        self.genre.join(", ")
    }

    pub fn actors_line(&self) -> String {
        self.actors.join(", ")
    }
}

/// Fields submitted by the add dialog.
#[derive(Clone, Debug, Deserialize)]
pub struct NewMovie {
    pub title: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub rating: i64,
    #[serde(default)]
    pub genre: String,
}

/// Fields submitted by the edit dialog. The id always comes from the record being edited.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieEdit {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub rating: i64,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub actors: String,
}

impl MovieEdit {
    pub fn into_movie(self, id: u64) -> Movie {
        Movie {
            id,
            title: self.title,
            rating: self.rating,
            director: self.director,
            year: self.year,
            plot: self.plot,
            poster: self.poster.trim().to_string(),
            genre: split_list(&self.genre),
            actors: split_list(&self.actors),
        }
    }
}

/// Splits a comma separated form value into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

/// Decoders for the record shapes older clients left in the collection.
mod lenient {
    use serde::{Deserialize, Deserializer, de::Error};
    use serde_json::Value;

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        match Value::deserialize(d)? {
            Value::Number(n) => n.as_u64().ok_or_else(|| D::Error::custom("id must be positive")),
            Value::String(s) => s.trim().parse().map_err(D::Error::custom),
            other => Err(D::Error::custom(format!("invalid id: {other}"))),
        }
    }

    pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        match Value::deserialize(d)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.round() as i64))
                .ok_or_else(|| D::Error::custom("number out of range")),
            Value::String(s) if s.trim().is_empty() => Ok(0),
            Value::String(s) => s.trim().parse().map_err(D::Error::custom),
            Value::Null => Ok(0),
            other => Err(D::Error::custom(format!("invalid number: {other}"))),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Array(items) => join(items),
            other => other.to_string(),
        })
    }

    pub fn list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => Vec::new(),
            Value::String(s) => super::split_list(&s),
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .filter(|s| !s.is_empty())
                .collect(),
            other => vec![other.to_string()],
        })
    }

    fn join(items: Vec<Value>) -> String {
        items
            .into_iter()
            .map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_records_written_by_older_clients() {
        let movie: Movie = serde_json::from_value(json!({
            "id": "7",
            "title": "Heat",
            "rating": "4",
            "year": 1995,
            "genre": "Crime, Drama",
            "actors": ["Al Pacino", " Robert De Niro "],
            "plot": null
        }))
        .unwrap();

        assert_eq!(movie.id, 7);
        assert_eq!(movie.rating, 4);
        assert_eq!(movie.year, "1995");
        assert_eq!(movie.genre, vec!["Crime", "Drama"]);
        assert_eq!(movie.actors, vec!["Al Pacino", "Robert De Niro"]);
        assert_eq!(movie.plot, "");
        assert_eq!(movie.poster, "");
    }

    #[test]
    fn encodes_lists_as_arrays() {
        let movie = Movie {
            id: 1,
            title: "Alien".into(),
            genre: vec!["Horror".into(), "Sci-Fi".into()],
            ..Default::default()
        };
        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["genre"], json!(["Horror", "Sci-Fi"]));
        assert_eq!(value["actors"], json!([]));
    }

    #[test]
    fn edit_form_never_carries_an_id() {
        let edit = MovieEdit {
            title: "Ran".into(),
            rating: 9,
            genre: "Drama,, War ".into(),
            ..Default::default()
        };
        let movie = edit.into_movie(12);
        assert_eq!(movie.id, 12);
        assert_eq!(movie.rating, 9);
        assert_eq!(movie.genre, vec!["Drama", "War"]);
    }

    #[test]
    fn rejects_missing_id() {
        assert!(serde_json::from_value::<Movie>(json!({ "title": "x" })).is_err());
    }
}
