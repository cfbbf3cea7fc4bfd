use indexmap::IndexMap;

pub const SEARCH_PATH: &str = "/search/";

/// Ranking profile that scores albums against the user's category weights.
pub const RANK_ALBUMS_PROFILE: &str = "rank_albums";

/// Category weights of the sample user: mostly pop.
pub const POP_USER_PROFILE: [(&str, f64); 3] = [("pop", 0.8), ("rock", 0.2), ("jazz", 0.1)];

/// Search request parameters, sent in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    params: IndexMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn yql(yql: impl Into<String>) -> Self {
        Self::new().with("yql", yql)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl IntoIterator for Query {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

/// Sparse tensor literal with one mapped dimension, e.g. `{{cat:pop}:0.8, {cat:rock}:0.2}`.
pub fn mapped_tensor(dimension: &str, cells: &[(&str, f64)]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .map(|(label, value)| format!("{{{}:{}}}:{}", dimension, label, value))
        .collect();
    format!("{{{}}}", cells.join(", "))
}

/// Matches every `music` document. The timeout is high because a fresh
/// container is still warming up.
pub fn warmup_query() -> Query {
    Query::yql("SELECT * FROM SOURCES * WHERE sddocname CONTAINS \"music\";").with("timeout", "5s")
}

/// Albums after 2015, ranked for a pop-leaning user: Diana Krall first, then Metallica.
pub fn ranked_query() -> Query {
    Query::yql("SELECT * FROM SOURCES * WHERE year > 2015;")
        .with("ranking", RANK_ALBUMS_PROFILE)
        .with(
            "ranking.features.query(user_profile)",
            mapped_tensor("cat", &POP_USER_PROFILE),
        )
}
