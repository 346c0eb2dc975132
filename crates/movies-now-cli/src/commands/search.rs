use color_eyre::eyre::eyre;
use color_eyre::Result;
use movies_now_core::{MemoryTitle, ResultsView};
use serde_json::json;
use std::sync::Arc;

use super::{ui, Session};
use crate::output::Output;

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let session = Session::load()?;
    let mut app = session.open_app(Arc::new(MemoryTitle::new()))?;

    app.set_query(query);
    ui::with_spinner(&format!("Searching for '{}'...", query), app.search_settled()).await;

    report_results(
        app.results_view(),
        query,
        session.config.search.min_query_length,
        output,
    )
}

fn report_results(view: ResultsView, query: &str, min_query_length: usize, output: &Output) -> Result<()> {
    match view {
        ResultsView::Movies(movies) => {
            output.json(&json!({ "query": query, "results": movies }));
            output.success(format!("Found {} results", movies.len()));
            output.table(&ui::results_table(&movies));
            Ok(())
        }
        ResultsView::Error(message) => {
            output.json(&json!({ "query": query, "results": [], "error": message }));
            Err(eyre!("{}", message))
        }
        _ => {
            output.json(&json!({ "query": query, "results": [] }));
            if is_too_short(query, min_query_length) {
                output.warn(format!("Type at least {} characters to search", min_query_length));
            } else {
                output.info("Found 0 results");
            }
            Ok(())
        }
    }
}

pub(super) fn is_too_short(query: &str, min_query_length: usize) -> bool {
    query.chars().count() < min_query_length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn quiet() -> Output {
        Output::new(OutputFormat::Human, true)
    }

    #[test]
    fn test_is_too_short_counts_characters() {
        assert!(is_too_short("ab", 3));
        assert!(!is_too_short("abc", 3));
        assert!(!is_too_short("日本語", 3));
    }

    #[test]
    fn test_upstream_error_fails_the_command() {
        let result = report_results(ResultsView::Error("No Movie Found".to_string()), "zzzzzz", 3, &quiet());

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "No Movie Found");
    }

    #[test]
    fn test_empty_results_for_long_query_succeed() {
        assert!(report_results(ResultsView::Empty, "avengers", 3, &quiet()).is_ok());
        assert!(report_results(ResultsView::Empty, "ab", 3, &quiet()).is_ok());
    }
}
