use std::sync::Arc;
use std::time::Duration;

use subex_config::UiConfig;
use subex_debounce::{Debounced, debounce};

/// Case-insensitive substring filter over a fixed list of item labels.
#[derive(Debug, Clone)]
pub struct ListFilter {
    labels: Vec<String>,
}

/// Outcome of one filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    pub query: String,
    /// Visibility per item, in list order.
    pub visible: Vec<bool>,
}

impl FilterResult {
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }
}

impl ListFilter {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|l| l.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// An empty or all-whitespace query shows everything.
    pub fn apply(&self, query: &str) -> FilterResult {
        let needle = query.trim().to_lowercase();
        let visible = self
            .labels
            .iter()
            .map(|label| needle.is_empty() || label.contains(&needle))
            .collect();
        FilterResult {
            query: query.to_string(),
            visible,
        }
    }

    /// Indices of the items matching `query`.
    pub fn matches(&self, query: &str) -> Vec<usize> {
        self.apply(query)
            .visible
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.then_some(i))
            .collect()
    }
}

/// A search field bound to a list: keystrokes are debounced and each quiet
/// period yields one filter pass.
#[derive(Debug, Clone)]
pub struct SearchBinding {
    input: Debounced<String>,
}

impl SearchBinding {
    /// Must be called within a Tokio runtime.
    pub fn new<F>(filter: ListFilter, wait: Duration, on_filtered: F) -> Self
    where
        F: Fn(FilterResult) + Send + Sync + 'static,
    {
        let filter = Arc::new(filter);
        let input = debounce(
            move |query: String| {
                let result = filter.apply(&query);
                tracing::debug!(
                    query = %result.query,
                    visible = result.visible_count(),
                    "list filtered"
                );
                on_filtered(result);
            },
            wait,
        );
        Self { input }
    }

    /// Binding whose quiet period is `[ui] debounce_ms`.
    pub fn from_config<F>(filter: ListFilter, ui: &UiConfig, on_filtered: F) -> Self
    where
        F: Fn(FilterResult) + Send + Sync + 'static,
    {
        Self::new(filter, ui.debounce(), on_filtered)
    }

    pub fn wait(&self) -> Duration {
        self.input.wait()
    }

    /// Feed the current field value after a keystroke.
    pub fn input(&self, query: impl Into<String>) {
        self.input.call(query.into());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio::time::sleep;

    use super::*;

    fn videos() -> ListFilter {
        ListFilter::new([
            "Anime/Frieren - 01.mkv",
            "Anime/Frieren - 02.mkv",
            "Movies/Perfect Blue.mp4",
        ])
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        assert_eq!(videos().matches("frieren"), vec![0, 1]);
        assert_eq!(videos().matches("BLUE"), vec![2]);
        assert_eq!(videos().matches("- 02"), vec![1]);
    }

    #[test]
    fn blank_query_shows_everything() {
        let result = videos().apply("   ");
        assert_eq!(result.visible, vec![true, true, true]);
        assert_eq!(result.visible_count(), 3);
    }

    #[test]
    fn no_match_hides_everything() {
        let result = videos().apply("ghibli");
        assert_eq!(result.visible_count(), 0);
        assert_eq!(result.query, "ghibli");
    }

    #[test]
    fn empty_list() {
        let filter = ListFilter::new(Vec::<String>::new());
        assert!(filter.is_empty());
        assert!(filter.apply("x").visible.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn typing_burst_filters_once_with_final_query() {
        let results = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&results);
        let search = SearchBinding::new(videos(), Duration::from_millis(300), move |r| {
            sink.lock().unwrap().push(r)
        });

        for query in ["p", "pe", "per", "perf"] {
            search.input(query);
            sleep(Duration::from_millis(50)).await;
        }
        sleep(Duration::from_millis(400)).await;

        let results = results.lock().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].query, "perf");
        assert_eq!(results[0].visible, vec![false, false, true]);
    }

    #[tokio::test(start_paused = true)]
    async fn configured_debounce_sets_quiet_period() {
        let ui = subex_config::parse("[ui]\ndebounce_ms = 150\n").unwrap().ui;
        let results = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&results);
        let search = SearchBinding::from_config(videos(), &ui, move |r| {
            sink.lock().unwrap().push(r)
        });
        assert_eq!(search.wait(), Duration::from_millis(150));

        search.input("blue");
        sleep(Duration::from_millis(140)).await;
        assert!(results.lock().unwrap().is_empty());

        sleep(Duration::from_millis(20)).await;
        assert_eq!(results.lock().unwrap().len(), 1);
    }
}
