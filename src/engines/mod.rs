//! Search engine implementations.

use scraper::Selector;

use crate::{BackendError, BackendResult};

// International engines
mod brave;
mod duckduckgo;
mod wikipedia;

// Chinese engines
mod bing_china;
mod so360;
mod sogou;

pub use brave::Brave;
pub use duckduckgo::DuckDuckGo;
pub use wikipedia::Wikipedia;

pub use bing_china::BingChina;
pub use so360::So360;
pub use sogou::Sogou;

fn selector(css: &str) -> BackendResult<Selector> {
    Selector::parse(css)
        .map_err(|e| BackendError::Parse(format!("Failed to parse selector '{}': {:?}", css, e)))
}

fn element_text(element: scraper::ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selector_valid() {
        assert!(selector("div.result > a").is_ok());
    }

    #[test]
    fn test_selector_invalid() {
        let err = selector("div[").unwrap_err();
        assert!(matches!(err, BackendError::Parse(ref m) if m.contains("div[")));
    }

    #[test]
    fn test_element_text_trims_and_joins() {
        let doc = Html::parse_fragment("<p>  Hello <b>world</b>  </p>");
        let p = doc.select(&selector("p").unwrap()).next().unwrap();
        assert_eq!(element_text(p), "Hello world");
    }
}
