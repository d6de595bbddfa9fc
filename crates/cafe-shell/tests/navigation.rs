//! End-to-end navigation tests: router, registry, bridge and store wired
//! together through `ShellBuilder`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cafe_core::{CartLine, ChangeKind, NavigationEntry, ViewKind};
use cafe_shell::{
    HistoryBackend, LinkClick, LoadError, MemoryHistory, ModuleState, NavigationOutcome, Shell,
    ShellBuilder, ShellConfig, ShellError, StateStore, SubscriptionId, TransitionMode, ViewContext,
    ViewElement, ViewLoader, ViewModule, ViewTransitions,
};
use tokio::sync::Notify;

// =============================================================================
// Test views
// =============================================================================

struct CountingModule {
    kind: ViewKind,
    cart_renders: Arc<AtomicUsize>,
}

impl CountingModule {
    fn new(kind: ViewKind) -> Arc<Self> {
        Arc::new(CountingModule {
            kind,
            cart_renders: Arc::new(AtomicUsize::new(0)),
        })
    }
}

impl ViewModule for CountingModule {
    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn create(&self, ctx: ViewContext) -> Box<dyn ViewElement> {
        Box::new(CountingElement {
            kind: self.kind,
            ctx,
            subscription: None,
            cart_renders: self.cart_renders.clone(),
        })
    }
}

struct CountingElement {
    kind: ViewKind,
    ctx: ViewContext,
    subscription: Option<SubscriptionId>,
    cart_renders: Arc<AtomicUsize>,
}

impl ViewElement for CountingElement {
    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn mount(&mut self) {
        let renders = self.cart_renders.clone();
        self.subscription = Some(self.ctx.store.subscribe(ChangeKind::CartChanged, move |_, _| {
            renders.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));
    }

    fn unmount(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.ctx.store.unsubscribe(id);
        }
    }

    fn render(&self) -> String {
        format!("{} {:?}", self.kind, self.ctx.param)
    }
}

// =============================================================================
// Test loader
// =============================================================================

#[derive(Default)]
struct TestLoader {
    calls: Mutex<HashMap<ViewKind, usize>>,
    failures_left: Mutex<HashMap<ViewKind, usize>>,
    gated: Mutex<Option<ViewKind>>,
    gate: Notify,
}

impl TestLoader {
    fn calls(&self, view: ViewKind) -> usize {
        self.calls.lock().unwrap().get(&view).copied().unwrap_or(0)
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    fn fail_next(&self, view: ViewKind, times: usize) {
        self.failures_left.lock().unwrap().insert(view, times);
    }

    fn gate(&self, view: ViewKind) {
        *self.gated.lock().unwrap() = Some(view);
    }
}

#[async_trait]
impl ViewLoader for TestLoader {
    async fn load(&self, view: ViewKind) -> Result<Arc<dyn ViewModule>, LoadError> {
        *self.calls.lock().unwrap().entry(view).or_default() += 1;

        let gated = *self.gated.lock().unwrap() == Some(view);
        if gated {
            self.gate.notified().await;
        }

        {
            let mut failures = self.failures_left.lock().unwrap();
            if let Some(left) = failures.get_mut(&view).filter(|left| **left > 0) {
                *left -= 1;
                return Err(LoadError::Fetch("connection reset".into()));
            }
        }

        let module: Arc<dyn ViewModule> = CountingModule::new(view);
        Ok(module)
    }
}

// =============================================================================
// Transition capabilities
// =============================================================================

#[derive(Default)]
struct RecordingTransitions {
    started: AtomicUsize,
}

impl ViewTransitions for RecordingTransitions {
    fn start(&self, _duration: Duration, update: &mut dyn FnMut()) {
        self.started.fetch_add(1, Ordering::SeqCst);
        update();
    }
}

struct BrokenTransitions;

/// Loader whose order view panics while mounting.
struct ExplodingLoader;

struct ExplodingModule;

struct ExplodingElement;

impl ViewModule for ExplodingModule {
    fn kind(&self) -> ViewKind {
        ViewKind::Order
    }

    fn create(&self, _ctx: ViewContext) -> Box<dyn ViewElement> {
        Box::new(ExplodingElement)
    }
}

impl ViewElement for ExplodingElement {
    fn kind(&self) -> ViewKind {
        ViewKind::Order
    }

    fn mount(&mut self) {
        panic!("attempt to add with overflow");
    }

    fn render(&self) -> String {
        String::new()
    }
}

#[async_trait]
impl ViewLoader for ExplodingLoader {
    async fn load(&self, view: ViewKind) -> Result<Arc<dyn ViewModule>, LoadError> {
        match view {
            ViewKind::Order => Ok(Arc::new(ExplodingModule)),
            other => Ok(CountingModule::new(other)),
        }
    }
}

impl ViewTransitions for BrokenTransitions {
    fn start(&self, _duration: Duration, _update: &mut dyn FnMut()) {}
}

// =============================================================================
// Helpers
// =============================================================================

fn build(loader: Arc<TestLoader>) -> Shell {
    ShellBuilder::new(loader)
        .home_module(CountingModule::new(ViewKind::Menu))
        .build()
        .unwrap()
}

async fn started(loader: Arc<TestLoader>) -> Shell {
    let shell = build(loader);
    shell.start().await.unwrap();
    shell
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_start_mounts_home_without_loading() {
    let loader = Arc::new(TestLoader::default());
    let shell = started(loader.clone()).await;

    assert_eq!(shell.router().current_view(), Some(ViewKind::Menu));
    assert_eq!(shell.router().document().title(), "Coffee Masters");
    assert_eq!(loader.total_calls(), 0);
    assert_eq!(shell.history().current(), Some(NavigationEntry::new("/")));
}

#[tokio::test]
async fn test_navigate_loads_once_and_pushes_history() {
    let loader = Arc::new(TestLoader::default());
    let shell = started(loader.clone()).await;

    let outcome = shell.router().go("/order").await.unwrap();
    assert_eq!(
        outcome,
        NavigationOutcome::Mounted {
            view: ViewKind::Order,
            param: None
        }
    );
    assert_eq!(loader.calls(ViewKind::Order), 1);
    assert_eq!(shell.history().current().unwrap().route, "/order");
    assert_eq!(shell.router().current_view(), Some(ViewKind::Order));
    assert_eq!(shell.router().document().title(), "Your Order");

    shell.router().go("/order").await.unwrap();
    assert_eq!(loader.calls(ViewKind::Order), 1);
    assert_eq!(shell.registry().state(ViewKind::Order), ModuleState::Loaded);
}

#[tokio::test]
async fn test_unroutable_path_changes_nothing() {
    let loader = Arc::new(TestLoader::default());
    let shell = started(loader.clone()).await;
    let swaps = shell.router().slot().swap_count();

    let outcome = shell.router().go("/checkout").await.unwrap();

    assert_eq!(outcome, NavigationOutcome::Unroutable);
    assert_eq!(shell.router().current_route().unwrap().as_str(), "/");
    assert_eq!(shell.router().slot().swap_count(), swaps);
    assert_eq!(loader.total_calls(), 0);
    // The entry is pushed before resolution.
    assert_eq!(shell.history().current().unwrap().route, "/checkout");
}

#[tokio::test]
async fn test_product_route_passes_parameter() {
    let loader = Arc::new(TestLoader::default());
    let shell = started(loader).await;

    shell.router().go("/product-42").await.unwrap();

    assert_eq!(shell.router().current_view(), Some(ViewKind::Details));
    assert_eq!(shell.router().slot().current_param().as_deref(), Some("42"));
    assert_eq!(shell.router().slot().render().unwrap(), "details-page Some(\"42\")");
}

#[tokio::test]
async fn test_failed_load_keeps_view_and_retries() {
    let loader = Arc::new(TestLoader::default());
    loader.fail_next(ViewKind::Order, 1);
    let shell = started(loader.clone()).await;

    let err = shell.router().go("/order").await.unwrap_err();
    assert!(matches!(
        err,
        ShellError::ModuleLoad {
            view: ViewKind::Order,
            source: LoadError::Fetch(_)
        }
    ));
    assert_eq!(shell.router().current_view(), Some(ViewKind::Menu));
    assert_eq!(shell.registry().state(ViewKind::Order), ModuleState::NotLoaded);

    shell.router().go("/order").await.unwrap();
    assert_eq!(loader.calls(ViewKind::Order), 2);
    assert_eq!(shell.router().current_view(), Some(ViewKind::Order));
}

#[tokio::test]
async fn test_back_and_forward_replay_without_pushing() {
    let loader = Arc::new(TestLoader::default());
    let history = Arc::new(MemoryHistory::new());
    let shell = ShellBuilder::new(loader.clone())
        .home_module(CountingModule::new(ViewKind::Menu))
        .history(history.clone())
        .build()
        .unwrap();
    shell.start().await.unwrap();
    shell.router().go("/product-7").await.unwrap();
    shell.router().go("/order").await.unwrap();

    let outcome = shell.bridge().back().await.unwrap();
    assert_eq!(
        outcome,
        Some(NavigationOutcome::Mounted {
            view: ViewKind::Details,
            param: Some("7".to_string())
        })
    );
    assert_eq!(shell.router().current_route().unwrap().as_str(), "/product-7");

    shell.bridge().forward().await.unwrap();
    assert_eq!(shell.router().current_view(), Some(ViewKind::Order));
    assert_eq!(loader.calls(ViewKind::Details), 1);

    // Nothing was pushed by the replays: the stack is still three deep.
    let routes: Vec<String> = history.entries().into_iter().map(|e| e.route).collect();
    assert_eq!(routes, vec!["/", "/product-7", "/order"]);
    assert!(!history.can_go_forward());
}

#[tokio::test]
async fn test_pop_state_without_entry_is_ignored() {
    let shell = started(Arc::new(TestLoader::default())).await;

    assert_eq!(shell.bridge().handle_pop_state(None).await.unwrap(), None);
    assert_eq!(shell.bridge().back().await.unwrap(), None);
    assert_eq!(shell.router().current_view(), Some(ViewKind::Menu));
}

#[tokio::test]
async fn test_link_clicks() {
    let shell = started(Arc::new(TestLoader::default())).await;

    let mut external = LinkClick::external("https://example.com/");
    assert_eq!(shell.bridge().handle_click(&mut external).await.unwrap(), None);
    assert!(!external.default_prevented());
    assert_eq!(shell.history().current().unwrap().route, "/");

    let mut navlink = LinkClick::navlink("/order");
    let outcome = shell.bridge().handle_click(&mut navlink).await.unwrap();
    assert!(navlink.default_prevented());
    assert!(matches!(outcome, Some(NavigationOutcome::Mounted { view: ViewKind::Order, .. })));
    assert_eq!(shell.history().current().unwrap().route, "/order");
}

#[tokio::test]
async fn test_concurrent_navigations_share_one_load() {
    let loader = Arc::new(TestLoader::default());
    loader.gate(ViewKind::Order);
    let shell = started(loader.clone()).await;

    let router = shell.router();
    let (first, second, _) = tokio::join!(router.go("/order"), router.go("/order"), async {
        loader.gate.notify_one();
    });

    // The older request is superseded by the newer one for the same view.
    assert_eq!(first.unwrap(), NavigationOutcome::Superseded);
    assert!(matches!(second.unwrap(), NavigationOutcome::Mounted { .. }));
    assert_eq!(loader.calls(ViewKind::Order), 1);
}

#[tokio::test]
async fn test_superseded_navigation_never_mounts() {
    let loader = Arc::new(TestLoader::default());
    loader.gate(ViewKind::Details);
    let shell = started(loader.clone()).await;
    let router = shell.router();

    let (slow, fast) = tokio::join!(router.go("/product-3"), async {
        let outcome = router.go("/order").await;
        loader.gate.notify_one();
        outcome
    });

    assert_eq!(slow.unwrap(), NavigationOutcome::Superseded);
    assert!(matches!(fast.unwrap(), NavigationOutcome::Mounted { view: ViewKind::Order, .. }));
    assert_eq!(router.current_view(), Some(ViewKind::Order));
    assert_eq!(router.document().title(), "Your Order");
    // The module itself still finished loading and is cached.
    assert!(shell.registry().is_loaded(ViewKind::Details));
}

#[tokio::test]
async fn test_unroutable_path_does_not_cancel_pending_load() {
    let loader = Arc::new(TestLoader::default());
    loader.gate(ViewKind::Order);
    let shell = started(loader.clone()).await;
    let router = shell.router();

    let (pending, junk) = tokio::join!(router.go("/order"), async {
        let outcome = router.go("/unknown").await;
        loader.gate.notify_one();
        outcome
    });

    assert_eq!(junk.unwrap(), NavigationOutcome::Unroutable);
    assert!(matches!(pending.unwrap(), NavigationOutcome::Mounted { view: ViewKind::Order, .. }));
    assert_eq!(router.current_view(), Some(ViewKind::Order));
}

#[tokio::test]
async fn test_superseded_navigation_with_failed_load_is_superseded() {
    let loader = Arc::new(TestLoader::default());
    loader.gate(ViewKind::Details);
    loader.fail_next(ViewKind::Details, 1);
    let shell = started(loader.clone()).await;
    let router = shell.router();

    let (slow, fast) = tokio::join!(router.go("/product-3"), async {
        let outcome = router.go("/order").await;
        loader.gate.notify_one();
        outcome
    });

    assert_eq!(slow.unwrap(), NavigationOutcome::Superseded);
    assert!(matches!(fast.unwrap(), NavigationOutcome::Mounted { view: ViewKind::Order, .. }));
    assert_eq!(router.current_view(), Some(ViewKind::Order));
    assert_eq!(shell.registry().state(ViewKind::Details), ModuleState::NotLoaded);
}

#[tokio::test]
async fn test_panicking_mount_keeps_previous_view() {
    let shell = ShellBuilder::new(Arc::new(ExplodingLoader))
        .home_module(CountingModule::new(ViewKind::Menu))
        .build()
        .unwrap();
    shell.start().await.unwrap();

    let result = shell.router().go("/order").await;

    assert!(matches!(
        result,
        Err(ShellError::ViewMount {
            view: ViewKind::Order,
            ..
        })
    ));
    assert_eq!(shell.router().current_view(), Some(ViewKind::Menu));
    assert_eq!(shell.router().document().title(), "Coffee Masters");
    // The home view was mounted again and is subscribed once.
    assert_eq!(shell.store().subscriber_count(ChangeKind::CartChanged), 1);

    shell.router().go("/product-1").await.unwrap();
    assert_eq!(shell.router().current_view(), Some(ViewKind::Details));
}

#[tokio::test]
async fn test_handler_unsubscribed_mid_broadcast_is_skipped() {
    let shell = started(Arc::new(TestLoader::default())).await;
    let store = shell.store();
    let target = Arc::new(Mutex::new(None::<SubscriptionId>));
    let calls = Arc::new(AtomicUsize::new(0));

    let t = target.clone();
    store.subscribe(ChangeKind::CartChanged, move |_, store| {
        if let Some(id) = t.lock().unwrap().take() {
            store.unsubscribe(id);
        }
        Ok(())
    });
    let c = calls.clone();
    let id = store.subscribe(ChangeKind::CartChanged, move |_, _| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    *target.lock().unwrap() = Some(id);

    let report = store.set_cart(vec![CartLine::new("1", 1)]);

    // Mounted home view plus the first handler.
    assert_eq!(report.delivered, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_animated_swap_runs_inside_capability() {
    let capability = Arc::new(RecordingTransitions::default());
    let shell = ShellBuilder::new(Arc::new(TestLoader::default()))
        .home_module(CountingModule::new(ViewKind::Menu))
        .view_transitions(capability.clone())
        .build()
        .unwrap();
    assert_eq!(shell.router().transition_name(), "animated");

    shell.start().await.unwrap();
    shell.router().go("/order").await.unwrap();

    assert_eq!(capability.started.load(Ordering::SeqCst), 2);
    assert_eq!(shell.router().current_view(), Some(ViewKind::Order));
}

#[tokio::test]
async fn test_transitions_off_ignores_capability() {
    let mut config = ShellConfig::default();
    config.shell.transitions = TransitionMode::Off;
    let capability = Arc::new(RecordingTransitions::default());

    let shell = ShellBuilder::new(Arc::new(TestLoader::default()))
        .config(config)
        .home_module(CountingModule::new(ViewKind::Menu))
        .view_transitions(capability.clone())
        .build()
        .unwrap();
    shell.start().await.unwrap();
    shell.router().go("/order").await.unwrap();

    assert_eq!(shell.router().transition_name(), "immediate");
    assert_eq!(capability.started.load(Ordering::SeqCst), 0);
    assert_eq!(shell.router().current_view(), Some(ViewKind::Order));
}

#[tokio::test]
async fn test_capability_that_skips_update_still_swaps() {
    let shell = ShellBuilder::new(Arc::new(TestLoader::default()))
        .home_module(CountingModule::new(ViewKind::Menu))
        .view_transitions(Arc::new(BrokenTransitions))
        .build()
        .unwrap();
    shell.start().await.unwrap();
    shell.router().go("/order").await.unwrap();

    assert_eq!(shell.router().current_view(), Some(ViewKind::Order));
}

#[tokio::test]
async fn test_scroll_reset_after_swap() {
    let shell = started(Arc::new(TestLoader::default())).await;
    shell.router().document().scroll_to_x(320);

    shell.router().go("/order").await.unwrap();

    assert_eq!(shell.router().document().scroll_x(), 0);
}

#[tokio::test]
async fn test_mounted_view_follows_cart_and_unsubscribes_on_swap() {
    let home = CountingModule::new(ViewKind::Menu);
    let shell = ShellBuilder::new(Arc::new(TestLoader::default()))
        .home_module(home.clone())
        .build()
        .unwrap();
    shell.start().await.unwrap();
    assert_eq!(shell.store().subscriber_count(ChangeKind::CartChanged), 1);

    shell.store().set_cart(vec![CartLine::new("1", 2)]);
    assert_eq!(home.cart_renders.load(Ordering::SeqCst), 1);

    shell.router().go("/order").await.unwrap();
    // The menu element unsubscribed, the order element subscribed.
    assert_eq!(shell.store().subscriber_count(ChangeKind::CartChanged), 1);

    shell.store().set_cart(Vec::new());
    assert_eq!(home.cart_renders.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_shared_store_is_used() {
    let store = Arc::new(StateStore::new());
    let shell = ShellBuilder::new(Arc::new(TestLoader::default()))
        .store(store.clone())
        .home_module(CountingModule::new(ViewKind::Menu))
        .build()
        .unwrap();

    store.set_cart(vec![CartLine::new("5", 1)]);
    assert_eq!(shell.store().cart().len(), 1);
}

#[test]
fn test_builder_rejects_mismatched_home_module() {
    let result = ShellBuilder::new(Arc::new(TestLoader::default()))
        .home_module(CountingModule::new(ViewKind::Order))
        .build();

    assert!(matches!(result, Err(ShellError::InvalidConfig(_))));
}
