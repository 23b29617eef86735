//! The navbar search boxes.

use crate::config::SearchConfig;

/// What a search submission leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Go to the catalog page at this URL.
    Navigate(String),
    /// Show this message next to the box instead.
    Message(String),
}

/// The three search boxes share one behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBox {
    DesktopFull,
    DesktopCollapsed,
    Mobile,
}

/// User input on a search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTrigger {
    ButtonClick,
    /// A key pressed in the input, by its `KeyboardEvent.key` name.
    Key(String),
}

impl SearchTrigger {
    fn submits(&self) -> bool {
        match self {
            SearchTrigger::ButtonClick => true,
            SearchTrigger::Key(key) => key == "Enter",
        }
    }
}

/// Turns search input into catalog URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNavigator {
    catalog_page: String,
    param: String,
    empty_message: String,
}

impl SearchNavigator {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            catalog_page: config.catalog_page.clone(),
            param: config.param.clone(),
            empty_message: config.empty_message.clone(),
        }
    }

    /// Submit a query. Blank input yields a message, anything else a
    /// redirect carrying the trimmed, encoded query.
    pub fn submit(&self, input: &str) -> SearchOutcome {
        let query = input.trim();
        if query.is_empty() {
            return SearchOutcome::Message(self.empty_message.clone());
        }

        let url = format!(
            "{}?{}={}",
            self.catalog_page,
            self.param,
            urlencoding::encode(query)
        );
        tracing::debug!(%url, "search submitted");
        SearchOutcome::Navigate(url)
    }

    /// Handle input on one of the boxes. Returns `None` for keys that do
    /// not submit.
    pub fn handle(&self, search_box: SearchBox, trigger: &SearchTrigger, input: &str) -> Option<SearchOutcome> {
        if !trigger.submits() {
            return None;
        }
        tracing::trace!(?search_box, "search box submit");
        Some(self.submit(input))
    }

    /// Read the query back out of a catalog URL.
    pub fn query_from_url(&self, url: &str) -> Option<String> {
        let (_, query_string) = url.split_once('?')?;
        let query_string = query_string.split('#').next().unwrap_or_default();
        query_string
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(name, _)| *name == self.param)
            .and_then(|(_, value)| {
                urlencoding::decode(&value.replace('+', " "))
                    .ok()
                    .map(|v| v.into_owned())
            })
    }
}

impl Default for SearchNavigator {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}
