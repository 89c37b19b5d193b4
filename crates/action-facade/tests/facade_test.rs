//! Facade behavior: cache-backed acquisition, staleness, action reporting

use action_facade::{ActionError, ActionFacade, FacadeConfig};
use locator_cache::{CacheKey, CacheStore, MemoryStore};
use locator_engine::{
    DefaultElementResolver, LocatorError, LocatorSpec, LocatorStrategy, ResolverConfig,
    SelectorPayload,
};
use page_adapter::fake::{FakeElement, FakePage};
use page_adapter::{AdapterErrorKind, PageDriver};
use std::sync::Arc;
use std::time::Duration;

struct Fixture {
    page: Arc<FakePage>,
    cache: Arc<MemoryStore>,
    facade: ActionFacade,
}

fn fixture() -> Fixture {
    let page = Arc::new(FakePage::new());
    let cache = Arc::new(MemoryStore::new());
    let resolver = Arc::new(DefaultElementResolver::new(
        page.clone(),
        ResolverConfig::default(),
    ));
    let facade = ActionFacade::new(
        page.clone(),
        resolver,
        cache.clone(),
        FacadeConfig::default(),
    );
    Fixture { page, cache, facade }
}

#[tokio::test]
async fn click_resolves_acts_and_records() {
    let f = fixture();
    let submit = f
        .page
        .add_element(FakeElement::new("button").with_css("#submit"));

    let spec = LocatorSpec::css("#submit");
    f.facade.click(&spec, "Submit Button").await.unwrap();

    assert_eq!(f.page.clicks(), vec![submit]);

    let key = CacheKey::new("Submit Button", spec.fingerprint());
    let entry = f.cache.lookup(&key).unwrap();
    assert_eq!(entry.strategy, LocatorStrategy::Css);
    assert_eq!(entry.payload, SelectorPayload::Css("#submit".to_string()));
}

#[tokio::test]
async fn second_call_uses_cache_with_single_liveness_probe() {
    let f = fixture();
    f.page
        .add_element(FakeElement::new("button").with_css("#submit"));

    let spec = LocatorSpec::css("#submit").with_text("Submit");
    f.facade.click(&spec, "Submit Button").await.unwrap();

    let key = CacheKey::new("Submit Button", spec.fingerprint());
    let first_strategy = f.cache.lookup(&key).unwrap().strategy;

    f.page.clear_query_log();
    f.facade.click(&spec, "Submit Button").await.unwrap();

    // One query total: the liveness re-probe of the cached payload. No
    // exact-strategy chain re-run.
    assert_eq!(f.page.queries(), vec!["css:#submit".to_string()]);
    assert_eq!(f.cache.lookup(&key).unwrap().strategy, first_strategy);
}

#[tokio::test]
async fn stale_cache_invalidates_and_resolves_via_another_strategy() {
    let f = fixture();
    let old = f
        .page
        .add_element(FakeElement::new("button").with_css("#confirm"));

    let spec = LocatorSpec::css("#confirm").with_role("button", Some("Confirm".to_string()));
    f.facade.click(&spec, "Confirm").await.unwrap();
    assert_eq!(f.page.clicks(), vec![old]);

    // DOM re-renders: the structural selector is gone, the role survives.
    f.page.remove_element(old);
    let renewed = f
        .page
        .add_element(FakeElement::new("button").with_role("button", "Confirm"));

    f.facade.click(&spec, "Confirm").await.unwrap();
    assert_eq!(f.page.clicks(), vec![old, renewed]);

    let key = CacheKey::new("Confirm", spec.fingerprint());
    let entry = f.cache.lookup(&key).unwrap();
    assert_eq!(entry.strategy, LocatorStrategy::Role);
}

#[tokio::test]
async fn fuzzy_resolution_is_cached_as_matched_text() {
    let f = fixture();
    let order = f
        .page
        .add_element(FakeElement::new("button").with_text("Place Order"));

    let spec = LocatorSpec::text("Plce Order").with_fuzzy_threshold(0.8);
    f.facade.click(&spec, "Place Order Button").await.unwrap();

    let key = CacheKey::new("Place Order Button", spec.fingerprint());
    let entry = f.cache.lookup(&key).unwrap();
    assert_eq!(entry.strategy, LocatorStrategy::FuzzyText);
    assert_eq!(
        entry.payload,
        SelectorPayload::Text("Place Order".to_string())
    );

    // Revalidation is a single exact-text probe of the matched text.
    f.page.clear_query_log();
    f.facade.click(&spec, "Place Order Button").await.unwrap();
    assert_eq!(f.page.queries(), vec!["text:Place Order".to_string()]);
    assert_eq!(f.page.clicks(), vec![order, order]);
}

#[tokio::test]
async fn action_failure_on_resolved_handle_propagates_unmodified() {
    let f = fixture();
    f.page.add_element(
        FakeElement::new("button")
            .with_css("#submit")
            .failing_click(),
    );

    let err = f
        .facade
        .click(&LocatorSpec::css("#submit"), "Submit Button")
        .await
        .unwrap_err();

    match err {
        ActionError::Driver(driver_err) => {
            assert_eq!(driver_err.kind, AdapterErrorKind::Internal);
            assert_eq!(driver_err.hint.as_deref(), Some("click intercepted"));
        }
        other => panic!("expected driver error, got {other:?}"),
    }
}

#[tokio::test]
async fn locator_not_found_propagates_unchanged() {
    let f = fixture();

    let err = f
        .facade
        .click(&LocatorSpec::css("#missing"), "Missing Button")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(
        err,
        ActionError::Locator(LocatorError::NotFound(name)) if name == "Missing Button"
    ));
    assert!(f.cache.is_empty());
}

#[tokio::test]
async fn fill_reaches_the_resolved_element() {
    let f = fixture();
    let field = f
        .page
        .add_element(FakeElement::new("input").with_css("input[name='email']"));

    f.facade
        .fill(
            &LocatorSpec::css("input[name='email']"),
            "user@example.com",
            "Email Field",
        )
        .await
        .unwrap();

    assert_eq!(
        f.page.fills(),
        vec![(field, "user@example.com".to_string())]
    );
}

#[tokio::test]
async fn get_text_trims_the_result() {
    let f = fixture();
    f.page.add_element(
        FakeElement::new("div")
            .with_css("#order-confirmation")
            .with_text("  Order Placed!  "),
    );

    let text = f
        .facade
        .get_text(&LocatorSpec::css("#order-confirmation"), "Order Confirmation")
        .await
        .unwrap();

    assert_eq!(text, "Order Placed!");
}

#[tokio::test]
async fn get_text_fails_when_visibility_wait_times_out() {
    let f = fixture();
    f.page.add_element(
        FakeElement::new("div")
            .with_css("#banner")
            .with_text("Promo")
            .hidden(),
    );

    let err = f
        .facade
        .get_text(&LocatorSpec::css("#banner"), "Promo Banner")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ActionError::Driver(driver_err) if driver_err.kind == AdapterErrorKind::WaitTimeout
    ));
}

#[tokio::test]
async fn navigate_and_wait_for_url_pass_through() {
    let f = fixture();

    f.facade
        .navigate("https://automationexercise.com/view_cart")
        .await
        .unwrap();
    assert_eq!(
        f.page.current_url().await.unwrap(),
        "https://automationexercise.com/view_cart"
    );

    f.facade.wait_for_url("view_cart", None).await.unwrap();

    let err = f
        .facade
        .wait_for_url("checkout", Some(Duration::from_millis(100)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ActionError::Driver(driver_err) if driver_err.kind == AdapterErrorKind::WaitTimeout
    ));
}
