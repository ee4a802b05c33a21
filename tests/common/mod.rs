//! Shared fixture for the view stack integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use viewstack::{
    InMemoryHost, NavigationEvent, NavigationEventReceiver, NavigationParameter, NavigatorConfig,
    PopupViewStackService, View, ViewModel, ViewModelId, ViewModelRegistry, ViewModelSlot,
    ViewRegistry, ViewStackService,
};

macro_rules! test_view_model {
    ($name:ident) => {
        #[derive(Default)]
        pub struct $name {
            id: ViewModelId,
        }

        impl ViewModel for $name {
            fn id(&self) -> ViewModelId {
                self.id
            }
        }
    };
}

macro_rules! test_view {
    ($name:ident) => {
        #[derive(Default)]
        pub struct $name {
            slot: ViewModelSlot,
        }

        impl View for $name {
            fn view_model(&self) -> Option<Arc<dyn ViewModel>> {
                self.slot.get()
            }

            fn bind(&self, view_model: Arc<dyn ViewModel>) {
                self.slot.set(view_model)
            }
        }
    };
}

test_view_model!(Alpha);
test_view_model!(Beta);
test_view_model!(Gamma);
test_view_model!(Dialog);
test_view_model!(Toast);
test_view_model!(Unregistered);

test_view!(PageView);
test_view!(CompactPageView);
test_view!(DialogPopup);
test_view!(AltDialogPopup);
test_view!(ToastPopup);

/// View-model that records its lifecycle hooks
#[derive(Default)]
pub struct Recorder {
    id: ViewModelId,
    navigated_to: AtomicUsize,
    navigated_from: AtomicUsize,
    last_parameter: Mutex<Option<NavigationParameter>>,
}

impl Recorder {
    pub fn navigated_to_count(&self) -> usize {
        self.navigated_to.load(Ordering::SeqCst)
    }

    pub fn navigated_from_count(&self) -> usize {
        self.navigated_from.load(Ordering::SeqCst)
    }

    pub fn last_parameter(&self) -> Option<NavigationParameter> {
        self.last_parameter.lock().unwrap().clone()
    }
}

impl ViewModel for Recorder {
    fn id(&self) -> ViewModelId {
        self.id
    }

    fn navigated_to(&self, parameter: &NavigationParameter) {
        self.navigated_to.fetch_add(1, Ordering::SeqCst);
        *self.last_parameter.lock().unwrap() = Some(parameter.clone());
    }

    fn navigated_from(&self, _parameter: &NavigationParameter) {
        self.navigated_from.fetch_add(1, Ordering::SeqCst);
    }
}

/// Builder for services wired to in-memory hosts
pub struct Fixture {
    pub config: NavigatorConfig,
    pub views: Arc<ViewRegistry>,
    pub view_models: Arc<ViewModelRegistry>,
    page_delay: Option<Duration>,
    popup_delay: Option<Duration>,
}

impl Fixture {
    pub fn new() -> Self {
        let views = ViewRegistry::new();
        views.register_page::<Alpha, _, _>(None, PageView::default);
        views.register_page::<Alpha, _, _>(Some("compact"), CompactPageView::default);
        views.register_page::<Beta, _, _>(None, PageView::default);
        views.register_page::<Gamma, _, _>(None, PageView::default);
        views.register_page::<Recorder, _, _>(None, PageView::default);
        views.register_popup::<Dialog, _, _>(None, DialogPopup::default);
        views.register_popup::<Dialog, _, _>(Some("alt"), AltDialogPopup::default);
        views.register_popup::<Toast, _, _>(None, ToastPopup::default);
        views.register_popup::<Recorder, _, _>(Some("popup"), DialogPopup::default);

        let view_models = ViewModelRegistry::new();
        view_models.register_default::<Alpha>();
        view_models.register_default::<Beta>();
        view_models.register_default::<Dialog>();
        view_models.register_default::<Toast>();

        Self {
            config: NavigatorConfig::headless(),
            views: Arc::new(views),
            view_models: Arc::new(view_models),
            page_delay: None,
            popup_delay: None,
        }
    }

    pub fn with_config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

    pub fn with_popup_delay(mut self, delay: Duration) -> Self {
        self.popup_delay = Some(delay);
        self
    }

    fn host(&self, name: &str, delay: Option<Duration>) -> Arc<InMemoryHost> {
        let host = InMemoryHost::new(name);
        Arc::new(match delay {
            Some(delay) => host.with_transition_delay(delay),
            None => host,
        })
    }

    /// Page service plus the host behind it
    pub fn pages(&self) -> (Arc<ViewStackService>, Arc<InMemoryHost>) {
        let host = self.host("pages", self.page_delay);
        let service = ViewStackService::with_config(
            host.clone(),
            self.views.clone(),
            self.view_models.clone(),
            self.config.clone(),
        );
        (Arc::new(service), host)
    }

    /// Popup service, its popup host, and the page host underneath
    pub fn popups(&self) -> (Arc<PopupViewStackService>, Arc<InMemoryHost>, Arc<InMemoryHost>) {
        let (pages, page_host) = self.pages();
        let popup_host = self.host("popups", self.popup_delay);
        let service = PopupViewStackService::new(
            pages,
            popup_host.clone(),
            self.views.clone(),
            self.view_models.clone(),
        );
        (Arc::new(service), popup_host, page_host)
    }
}

pub fn vm<VM: ViewModel + Default>() -> Arc<dyn ViewModel> {
    Arc::new(VM::default())
}

pub fn ids(stack: &[Arc<dyn ViewModel>]) -> Vec<ViewModelId> {
    stack.iter().map(|view_model| view_model.id()).collect()
}

/// Everything already delivered to `receiver`
pub fn drain(receiver: &mut NavigationEventReceiver) -> Vec<NavigationEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

/// Id of the view-model bound to an event's page
pub fn event_id(event: &NavigationEvent) -> Option<ViewModelId> {
    event.view_model().map(|view_model| view_model.id())
}
