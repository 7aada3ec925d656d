use serde::Serialize;
use serde_json::Value;

use crate::analyzer::propose_outline;
use crate::data_models::{OutlineNode, SearchQuery, SearchResultItem};
use crate::error::SearchError;
use crate::knowledge;
use crate::search::{SearchClient, snippets_of, titles_of};

/// Everything gathered for one query: the SERP and the outline drafted from it.
#[derive(Serialize, Debug, Clone)]
pub struct SerpResearch {
    pub query: String,
    pub titles: Vec<String>,
    pub snippets: Vec<String>,
    pub outline: Vec<OutlineNode>,
    pub items: Vec<SearchResultItem>,
    pub raw: Value,
}

impl SerpResearch {
    pub fn from_items(query: &str, items: Vec<SearchResultItem>, raw: Value) -> Self {
        let titles = titles_of(&items);
        let snippets = snippets_of(&items);
        let outline = propose_outline(query, &titles, &snippets);
        Self {
            query: query.to_string(),
            titles,
            snippets,
            outline,
            items,
            raw,
        }
    }
}

/// Searches in the query's market (the language's default country unless one is given)
/// and drafts an outline from the result titles.
pub async fn serp_research(
    client: &SearchClient,
    query: &SearchQuery,
) -> Result<SerpResearch, SearchError> {
    let mut query = query.clone();
    if query.country.is_none() {
        query.country = Some(knowledge::profile(query.language).default_country.to_string());
    }
    let (items, raw) = client.search_query(&query).await?;
    Ok(SerpResearch::from_items(&query.text, items, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_models::HeadingLevel;
    use serde_json::json;

    fn item(title: &str, snippet: &str) -> SearchResultItem {
        SearchResultItem {
            title: title.to_string(),
            snippet: snippet.to_string(),
            link: None,
        }
    }

    #[test]
    fn test_from_items_builds_outline() {
        let items = vec![
            item("Best cats food", "a"),
            item("Best cats toys", ""),
            item("Best cats food", "c"),
        ];
        let research = SerpResearch::from_items("cats", items, json!({}));
        assert_eq!(research.titles.len(), 3);
        assert_eq!(research.snippets, vec!["a", "c"]);
        assert_eq!(research.outline[0], OutlineNode::h1("cats"));
        assert!(
            research
                .outline
                .iter()
                .any(|n| n.level == HeadingLevel::H2 && n.text == "Best cats")
        );
    }
}
