use scraper::Selector;
use serde::{Deserialize, Serialize};

/// CSS selectors describing where listings live on the host page.
///
/// The page markup is treated as a loosely structured external schema: each
/// selector only asks whether a region exists, so drift degrades to "not
/// found" instead of failing the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// The element whose children are the listing items.
    pub container: String,
    /// Which children of the container count as listing items.
    pub item: String,
    /// Region inside an item carrying "Viewed" / "Applied" text.
    pub status: String,
    /// Region inside an item carrying "3 hours ago" style text.
    pub time: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            container: "ul.scaffold-layout__list-container, ul.jobs-search__results-list"
                .to_string(),
            item: "li".to_string(),
            status: ".job-card-container__footer-job-state, .job-card-list__footer-job-state"
                .to_string(),
            time: "time, .job-card-container__listed-time".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid {field} selector {selector:?}: {message}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        message: String,
    },
}

/// Parsed form of [`PageLayout`].
#[derive(Debug)]
pub struct CompiledLayout {
    pub container: Selector,
    pub item: Selector,
    pub status: Selector,
    pub time: Selector,
}

impl PageLayout {
    pub fn compile(&self) -> Result<CompiledLayout, LayoutError> {
        Ok(CompiledLayout {
            container: parse_selector("container", &self.container)?,
            item: parse_selector("item", &self.item)?,
            status: parse_selector("status", &self.status)?,
            time: parse_selector("time", &self.time)?,
        })
    }
}

fn parse_selector(field: &'static str, selector: &str) -> Result<Selector, LayoutError> {
    Selector::parse(selector).map_err(|err| LayoutError::InvalidSelector {
        field,
        selector: selector.to_string(),
        message: err.to_string(),
    })
}
