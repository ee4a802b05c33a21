//! Sample view-models, views and the scripted session behind `viewstack-demo run`

use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use viewstack::view::{ViewModelSlot, view_type_name};
use viewstack::{
    HostNavigation, InMemoryHost, NavigationEventReceiver, NavigationParameter, NavigatorConfig,
    PopupViewStackService, View, ViewModel, ViewModelId, ViewModelRegistry, ViewRegistry,
    ViewStackService,
};

use crate::cli::RunArgs;

#[derive(Default)]
pub struct HomeViewModel {
    id: ViewModelId,
}

impl ViewModel for HomeViewModel {
    fn id(&self) -> ViewModelId {
        self.id
    }
}

#[derive(Default)]
pub struct DetailViewModel {
    id: ViewModelId,
}

impl ViewModel for DetailViewModel {
    fn id(&self) -> ViewModelId {
        self.id
    }

    fn navigated_to(&self, parameter: &NavigationParameter) {
        if let Some(index) = parameter.get_as::<usize>("index") {
            log::info!("Detail {} shows item #{}", self.id, index);
        }
    }
}

#[derive(Default)]
pub struct ConfirmViewModel {
    id: ViewModelId,
}

impl ViewModel for ConfirmViewModel {
    fn id(&self) -> ViewModelId {
        self.id
    }

    fn navigated_from(&self, _parameter: &NavigationParameter) {
        log::info!("Confirmation {} dismissed", self.id);
    }
}

macro_rules! sample_view {
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

sample_view!(HomePage);
sample_view!(DetailPage);
sample_view!(ConfirmPopup);

fn registries() -> (Arc<ViewRegistry>, Arc<ViewModelRegistry>) {
    let views = ViewRegistry::new();
    views.register_page::<HomeViewModel, _, _>(None, HomePage::default);
    views.register_page::<DetailViewModel, _, _>(None, DetailPage::default);
    views.register_popup::<ConfirmViewModel, _, _>(None, ConfirmPopup::default);

    let view_models = ViewModelRegistry::new();
    view_models.register_default::<HomeViewModel>();
    view_models.register_default::<DetailViewModel>();
    view_models.register_default::<ConfirmViewModel>();

    (Arc::new(views), Arc::new(view_models))
}

fn watch(
    surface: &'static str,
    label: &'static str,
    mut events: NavigationEventReceiver,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut seen = 0;
        while let Some(event) = events.recv().await {
            seen += 1;
            let title = event
                .view_model()
                .map(|view_model| view_model.title())
                .unwrap_or_else(|| "<unbound>".to_string());
            println!(
                "  {} {:<8} {} ({}){}",
                surface.dimmed(),
                label.cyan(),
                title.bold(),
                view_type_name(event.page()),
                if event.animated() { " ~" } else { "" }
            );
        }
        seen
    })
}

fn print_stack(label: &str, stack: &[Arc<dyn ViewModel>]) {
    let titles: Vec<String> = stack.iter().map(|view_model| view_model.title()).collect();
    println!("{} [{}]", format!("{}:", label).green(), titles.join(", "));
}

/// Run the scripted session
pub async fn run(config: NavigatorConfig, args: &RunArgs) -> Result<()> {
    let (views, view_models) = registries();
    let delay = Duration::from_millis(args.transition_ms);

    let page_host = Arc::new(InMemoryHost::new("pages").with_transition_delay(delay));
    let popup_host = Arc::new(InMemoryHost::new("popups").with_transition_delay(delay));

    let pages = Arc::new(ViewStackService::with_config(
        page_host.clone(),
        views.clone(),
        view_models.clone(),
        config.clone(),
    ));
    let popups = PopupViewStackService::new(pages.clone(), popup_host.clone(), views, view_models);

    let watchers = vec![
        watch("page", "pushed", pages.pushed()),
        watch("page", "popped", pages.popped()),
        watch("popup", "pushed", popups.pushed()),
        watch("popup", "popped", popups.popped()),
    ];

    println!("{}", "Pushing pages".bold());
    pages.push_new::<HomeViewModel>(None, true).await?;
    let mut details = Vec::with_capacity(args.depth);
    for index in 0..args.depth {
        let detail: Arc<dyn ViewModel> = Arc::new(DetailViewModel::default());
        let parameter = NavigationParameter::new().with("index", index);
        pages
            .push_with_parameter(detail.clone(), &parameter, None, true)
            .await?;
        details.push(detail);
    }
    tokio::task::yield_now().await;
    print_stack("pages", &pages.current_stack());

    println!("{}", "Opening popups".bold());
    for _ in 0..args.popups {
        popups.push_popup_new::<ConfirmViewModel>(None, true).await?;
    }
    tokio::task::yield_now().await;
    print_stack("popups", &popups.popup_stack());
    print_stack("pages", &popups.pages().current_stack());

    if details.len() >= 2 {
        let middle = details[details.len() / 2].clone();
        println!("{} {}", "Removing".bold(), middle.title());
        pages.remove(&middle, None, true).await?;
        tokio::task::yield_now().await;
        print_stack("pages", &pages.current_stack());
    }

    println!("{}", "Closing popups".bold());
    if popups.top_popup().is_some() {
        popups.pop_popup(true).await?;
    }
    popups.pop_all_popups(false).await?;

    println!("{}", "Unwinding pages".bold());
    let (back, rest) = futures::future::join(pages.pop(true), async {
        tokio::time::sleep(delay / 2).await;
        pages.current_stack().len()
    })
    .await;
    back?;
    log::debug!("Snapshot depth during the animated pop: {}", rest);
    pages.pop_all(false).await?;
    tokio::task::yield_now().await;

    print_stack("pages", &pages.current_stack());
    print_stack("popups", &popups.popup_stack());
    println!(
        "{} page host depth {}, popup host depth {}",
        "Done:".green().bold(),
        page_host.depth(),
        popup_host.depth()
    );

    drop(popups);
    drop(pages);
    drop(page_host);
    drop(popup_host);

    let mut total = 0;
    for watcher in watchers {
        total += watcher.await?;
    }
    println!("{} {}", "Events observed:".dimmed(), total);
    Ok(())
}
