//! In-memory fake page for resolver and facade tests
//!
//! Elements declare up front which CSS selectors and XPath expressions they
//! match, so no selector parsing happens here. A comma-separated list of
//! bare tag names (e.g. `"a, button, span, div"`) matches by tag, which is
//! what the fuzzy scan issues. Queries are logged so tests can assert how
//! many probes an operation performed.

use crate::errors::{AdapterError, AdapterErrorKind};
use crate::page::{ElementHandle, PageDriver};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::time::Duration;

/// One element in the fake DOM. Insertion order is document order.
#[derive(Clone, Debug)]
pub struct FakeElement {
    pub tag: String,
    pub css_selectors: Vec<String>,
    pub xpath_exprs: Vec<String>,
    pub role: Option<String>,
    pub accessible_name: Option<String>,
    pub text: String,
    pub visible: bool,
    pub text_read_fails: bool,
    pub click_fails: bool,
}

impl FakeElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            css_selectors: Vec::new(),
            xpath_exprs: Vec::new(),
            role: None,
            accessible_name: None,
            text: String::new(),
            visible: true,
            text_read_fails: false,
            click_fails: false,
        }
    }

    /// Declare a CSS selector this element matches.
    pub fn with_css(mut self, selector: impl Into<String>) -> Self {
        self.css_selectors.push(selector.into());
        self
    }

    /// Declare an XPath expression this element matches.
    pub fn with_xpath(mut self, expression: impl Into<String>) -> Self {
        self.xpath_exprs.push(expression.into());
        self
    }

    /// Set accessibility role and accessible name.
    pub fn with_role(mut self, role: impl Into<String>, name: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self.accessible_name = Some(name.into());
        self
    }

    /// Set visible text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Mark the element hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Make `text_content` fail for this element.
    pub fn failing_text_read(mut self) -> Self {
        self.text_read_fails = true;
        self
    }

    /// Make `click` fail for this element, as if an overlay intercepted it.
    pub fn failing_click(mut self) -> Self {
        self.click_fails = true;
        self
    }
}

#[derive(Default)]
struct PageState {
    elements: Vec<(ElementHandle, FakeElement)>,
    url: String,
    next_id: u64,
}

/// Fake page driver backed by a declared element list.
#[derive(Default)]
pub struct FakePage {
    state: RwLock<PageState>,
    clicks: Mutex<Vec<ElementHandle>>,
    fills: Mutex<Vec<(ElementHandle, String)>>,
    queries: Mutex<Vec<String>>,
    invalid_selectors: RwLock<HashSet<String>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element; returns its handle. Insertion order is document order.
    pub fn add_element(&self, element: FakeElement) -> ElementHandle {
        let mut state = self.state.write();
        state.next_id += 1;
        let handle = ElementHandle(state.next_id);
        state.elements.push((handle, element));
        handle
    }

    /// Detach an element, as if the DOM re-rendered without it.
    pub fn remove_element(&self, handle: ElementHandle) {
        self.state.write().elements.retain(|(h, _)| *h != handle);
    }

    /// Make a CSS selector raise `InvalidSelector` instead of matching.
    pub fn mark_selector_invalid(&self, selector: impl Into<String>) {
        self.invalid_selectors.write().insert(selector.into());
    }

    pub fn set_url(&self, url: impl Into<String>) {
        self.state.write().url = url.into();
    }

    /// Handles clicked so far, in order.
    pub fn clicks(&self) -> Vec<ElementHandle> {
        self.clicks.lock().clone()
    }

    /// Fill operations performed so far, in order.
    pub fn fills(&self) -> Vec<(ElementHandle, String)> {
        self.fills.lock().clone()
    }

    /// Every query issued so far, rendered as `kind:payload`.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }

    pub fn clear_query_log(&self) {
        self.queries.lock().clear();
    }

    fn log_query(&self, entry: String) {
        self.queries.lock().push(entry);
    }

    fn with_element<T>(
        &self,
        handle: ElementHandle,
        f: impl FnOnce(&FakeElement) -> T,
    ) -> Result<T, AdapterError> {
        let state = self.state.read();
        state
            .elements
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, el)| f(el))
            .ok_or_else(|| {
                AdapterError::new(AdapterErrorKind::TargetNotFound)
                    .with_hint(format!("{} is detached", handle))
            })
    }
}

/// `selector` is a comma-separated list of bare tag names and `tag` is one
/// of them. Anything with CSS syntax in it fails the bare-name check.
fn tag_list_matches(selector: &str, tag: &str) -> bool {
    selector
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()))
        .any(|part| part.eq_ignore_ascii_case(tag))
}

#[async_trait]
impl PageDriver for FakePage {
    async fn query_css(&self, selector: &str) -> Result<Vec<ElementHandle>, AdapterError> {
        self.log_query(format!("css:{}", selector));
        if self.invalid_selectors.read().contains(selector) {
            return Err(AdapterError::new(AdapterErrorKind::InvalidSelector)
                .with_hint(selector.to_string()));
        }
        let state = self.state.read();
        Ok(state
            .elements
            .iter()
            .filter(|(_, el)| {
                el.css_selectors.iter().any(|s| s == selector)
                    || tag_list_matches(selector, &el.tag)
            })
            .map(|(h, _)| *h)
            .collect())
    }

    async fn query_xpath(&self, expression: &str) -> Result<Vec<ElementHandle>, AdapterError> {
        self.log_query(format!("xpath:{}", expression));
        let state = self.state.read();
        Ok(state
            .elements
            .iter()
            .filter(|(_, el)| el.xpath_exprs.iter().any(|x| x == expression))
            .map(|(h, _)| *h)
            .collect())
    }

    async fn query_role(
        &self,
        role: &str,
        name: Option<&str>,
    ) -> Result<Vec<ElementHandle>, AdapterError> {
        self.log_query(match name {
            Some(n) => format!("role:{}[name={}]", role, n),
            None => format!("role:{}", role),
        });
        let state = self.state.read();
        Ok(state
            .elements
            .iter()
            .filter(|(_, el)| {
                el.role.as_deref() == Some(role)
                    && name.map_or(true, |n| el.accessible_name.as_deref() == Some(n))
            })
            .map(|(h, _)| *h)
            .collect())
    }

    async fn query_text(&self, text: &str) -> Result<Vec<ElementHandle>, AdapterError> {
        self.log_query(format!("text:{}", text));
        let state = self.state.read();
        Ok(state
            .elements
            .iter()
            .filter(|(_, el)| el.text.trim() == text)
            .map(|(h, _)| *h)
            .collect())
    }

    async fn is_visible(&self, element: ElementHandle) -> Result<bool, AdapterError> {
        self.with_element(element, |el| el.visible)
    }

    async fn text_content(&self, element: ElementHandle) -> Result<Option<String>, AdapterError> {
        let (failing, text) =
            self.with_element(element, |el| (el.text_read_fails, el.text.clone()))?;
        if failing {
            return Err(
                AdapterError::new(AdapterErrorKind::Internal).with_hint("text read failed")
            );
        }
        Ok(if text.is_empty() { None } else { Some(text) })
    }

    async fn click(&self, element: ElementHandle, _deadline: Duration) -> Result<(), AdapterError> {
        let failing = self.with_element(element, |el| el.click_fails)?;
        if failing {
            return Err(
                AdapterError::new(AdapterErrorKind::Internal).with_hint("click intercepted")
            );
        }
        self.clicks.lock().push(element);
        Ok(())
    }

    async fn fill(
        &self,
        element: ElementHandle,
        value: &str,
        _deadline: Duration,
    ) -> Result<(), AdapterError> {
        self.with_element(element, |_| ())?;
        self.fills.lock().push((element, value.to_string()));
        Ok(())
    }

    async fn wait_visible(
        &self,
        element: ElementHandle,
        timeout: Duration,
    ) -> Result<(), AdapterError> {
        let visible = self.with_element(element, |el| el.visible)?;
        if visible {
            Ok(())
        } else {
            Err(AdapterError::new(AdapterErrorKind::WaitTimeout)
                .with_hint(format!("{} not visible within {:?}", element, timeout)))
        }
    }

    async fn navigate(&self, url: &str, _deadline: Duration) -> Result<(), AdapterError> {
        self.state.write().url = url.to_string();
        Ok(())
    }

    async fn wait_for_url(&self, pattern: &str, timeout: Duration) -> Result<(), AdapterError> {
        // Fake semantics: substring match against the current URL.
        let url = self.state.read().url.clone();
        if url.contains(pattern) {
            Ok(())
        } else {
            Err(AdapterError::new(AdapterErrorKind::WaitTimeout).with_hint(format!(
                "url '{}' did not match '{}' within {:?}",
                url, pattern, timeout
            )))
        }
    }

    async fn current_url(&self) -> Result<String, AdapterError> {
        Ok(self.state.read().url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn css_queries_match_declared_selectors() {
        let page = FakePage::new();
        let submit = page.add_element(FakeElement::new("button").with_css("#submit"));
        page.add_element(FakeElement::new("a").with_css(".nav"));

        let matches = page.query_css("#submit").await.unwrap();
        assert_eq!(matches, vec![submit]);
    }

    #[tokio::test]
    async fn tag_list_selector_matches_by_tag() {
        let page = FakePage::new();
        let link = page.add_element(FakeElement::new("a").with_text("Home"));
        let button = page.add_element(FakeElement::new("button").with_text("Go"));
        page.add_element(FakeElement::new("input"));

        let matches = page.query_css("a, button, span, div").await.unwrap();
        assert_eq!(matches, vec![link, button]);
    }

    #[tokio::test]
    async fn detached_handle_reports_target_not_found() {
        let page = FakePage::new();
        let el = page.add_element(FakeElement::new("button"));
        page.remove_element(el);

        let err = page.click(el, Duration::from_secs(1)).await.unwrap_err();
        assert_eq!(err.kind, AdapterErrorKind::TargetNotFound);
    }

    #[tokio::test]
    async fn invalid_selector_raises() {
        let page = FakePage::new();
        page.mark_selector_invalid("div[[");
        let err = page.query_css("div[[").await.unwrap_err();
        assert_eq!(err.kind, AdapterErrorKind::InvalidSelector);
    }
}
