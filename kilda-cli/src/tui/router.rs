//! URL router shared by every app in the console
//!
//! Apps observe two streams: route parameters (the switch id, published only
//! when it changes) and navigation-completion events. Navigating to the URL
//! that is already current is a no-op unless the `navigated` flag has been
//! cleared first, which is what [`Router::renavigate`] does.

use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, watch};

const EVENT_CAPACITY: usize = 32;

pub const SWITCHES_URL: &str = "/switches";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Switches,
    SwitchDetail { switch_id: String },
    PortDetail { switch_id: String, port: String },
    NotFound(String),
}

impl Route {
    pub fn parse(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["switches"] => Route::Switches,
            ["switches", id] => Route::SwitchDetail {
                switch_id: id.to_string(),
            },
            ["switches", id, "port", port] => Route::PortDetail {
                switch_id: id.to_string(),
                port: port.to_string(),
            },
            _ => Route::NotFound(url.to_string()),
        }
    }

    pub fn switch_id(&self) -> Option<&str> {
        match self {
            Route::SwitchDetail { switch_id } | Route::PortDetail { switch_id, .. } => {
                Some(switch_id.as_str())
            }
            _ => None,
        }
    }
}

pub fn switch_url(switch_id: &str) -> String {
    format!("{}/{}", SWITCHES_URL, switch_id)
}

pub fn port_url(switch_id: &str, port: &str) -> String {
    format!("{}/{}/port/{}", SWITCHES_URL, switch_id, port)
}

/// Emitted after every completed navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEnd {
    pub id: u64,
    pub url: String,
}

#[derive(Debug)]
struct RouterInner {
    url: String,
    navigated: bool,
    next_id: u64,
}

#[derive(Clone)]
pub struct Router {
    inner: Arc<Mutex<RouterInner>>,
    events: broadcast::Sender<NavigationEnd>,
    params: watch::Sender<Option<String>>,
}

impl Router {
    /// A router sitting on `url` that has not navigated yet
    pub fn new(url: &str) -> Self {
        let url = normalize(url);
        let switch_id = Route::parse(&url).switch_id().map(str::to_string);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (params, _) = watch::channel(switch_id);

        Self {
            inner: Arc::new(Mutex::new(RouterInner {
                url,
                navigated: false,
                next_id: 1,
            })),
            events,
            params,
        }
    }

    pub fn url(&self) -> String {
        self.inner
            .lock()
            .map(|inner| inner.url.clone())
            .unwrap_or_default()
    }

    pub fn route(&self) -> Route {
        Route::parse(&self.url())
    }

    pub fn navigated(&self) -> bool {
        self.inner.lock().map(|inner| inner.navigated).unwrap_or(false)
    }

    pub fn set_navigated(&self, navigated: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.navigated = navigated;
        }
    }

    /// Navigate to `path`. Returns false when the navigation was skipped
    /// because `path` is already current.
    pub fn navigate(&self, path: &str) -> bool {
        let url = normalize(path);

        let event = {
            let Ok(mut inner) = self.inner.lock() else {
                return false;
            };
            if inner.navigated && inner.url == url {
                log::debug!("Ignoring navigation to current url {}", url);
                return false;
            }

            inner.url = url.clone();
            inner.navigated = true;
            let id = inner.next_id;
            inner.next_id += 1;
            NavigationEnd { id, url }
        };

        log::info!("Navigated to {} (#{})", event.url, event.id);

        let switch_id = Route::parse(&event.url).switch_id().map(str::to_string);
        self.params.send_if_modified(|current| {
            if *current != switch_id {
                *current = switch_id;
                true
            } else {
                false
            }
        });

        // No subscribers is fine
        let _ = self.events.send(event);
        true
    }

    /// Clear the `navigated` flag and navigate to the current url again, so
    /// everything listening re-resolves the route.
    pub fn renavigate(&self) -> bool {
        if self.navigated() {
            log::debug!("Forcing navigation to {}", self.url());
        }
        self.set_navigated(false);
        let url = self.url();
        self.navigate(&url)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<NavigationEnd> {
        self.events.subscribe()
    }

    pub fn subscribe_params(&self) -> watch::Receiver<Option<String>> {
        self.params.subscribe()
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    let with_slash = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };
    if with_slash.len() > 1 {
        with_slash.trim_end_matches('/').to_string()
    } else {
        with_slash
    }
}
