use scraper::{ElementRef, Html, Selector};

/// How text is read out of a matched element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRead {
    /// Concatenation of every descendant text node
    AllText,
    /// The element's sole string; missing when it has several children
    SingleString,
}

/// A single structural lookup: the first element matching `css`, optionally
/// searched only inside the first element matching `scope`
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub scope: Option<&'static str>,
    pub css: &'static str,
    pub read: TextRead,
}

impl Strategy {
    pub const fn new(name: &'static str, css: &'static str, read: TextRead) -> Self {
        Self {
            name,
            scope: None,
            css,
            read,
        }
    }

    /// Looks for `css` only inside the first element matching `scope`.
    pub const fn within(
        name: &'static str,
        scope: &'static str,
        css: &'static str,
        read: TextRead,
    ) -> Self {
        Self {
            name,
            scope: Some(scope),
            css,
            read,
        }
    }

    /// Runs this lookup against `doc`.
    ///
    /// Only the first matching element is considered. A selector that does not
    /// parse is treated like a selector that matches nothing.
    pub fn apply(&self, doc: &Html) -> Option<String> {
        let selector = Selector::parse(self.css).ok()?;
        let element = match self.scope {
            Some(scope) => {
                let scope = Selector::parse(scope).ok()?;
                doc.select(&scope).next()?.select(&selector).next()?
            }
            None => doc.select(&selector).next()?,
        };
        match self.read {
            TextRead::AllText => Some(element.text().collect::<String>()),
            TextRead::SingleString => single_string(element),
        }
    }
}

/// Ranked lookups tried in order; the first one that yields text wins.
#[derive(Debug, Clone, Copy)]
pub struct SelectorChain {
    pub field: &'static str,
    pub strategies: &'static [Strategy],
}

impl SelectorChain {
    pub const fn new(field: &'static str, strategies: &'static [Strategy]) -> Self {
        Self { field, strategies }
    }

    pub fn first_match(&self, doc: &Html) -> Option<String> {
        self.strategies.iter().find_map(|strategy| {
            let found = strategy.apply(doc);
            if found.is_some() {
                ::log::trace!("{}: matched via {}", self.field, strategy.name);
            }
            found
        })
    }
}

/// Text of an element that has exactly one child, descending through
/// single-child wrappers. Elements with mixed or multiple children have none.
pub fn single_string(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    if let Some(text) = only.value().as_text() {
        let text: &str = text;
        return Some(text.to_string());
    }
    ElementRef::wrap(only).and_then(single_string)
}
