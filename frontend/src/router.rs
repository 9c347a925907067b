use std::collections::HashMap;

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{guard::RouteGuard, layout::DashboardLayout},
    pages::{
        auth::AuthPage,
        not_found::NotFoundPage,
        patients::{EditPatientPage, NewPatientPage, PatientPage, PatientsPage},
        settings::SettingsPage,
    },
    state::{auth::AuthProvider, common::CommonStore},
};

pub const AUTH_PATH: &str = "/auth";
pub const LANDING_PATH: &str = "/patients";
const MAX_REDIRECTS: usize = 8;

#[derive(Debug)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: &'static str,
    /// Reachable only without a session.
    pub auth_only: bool,
    pub redirect: Option<&'static str>,
    pub children: &'static [RouteDef],
}

impl RouteDef {
    const fn leaf(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name,
            auth_only: false,
            redirect: None,
            children: &[],
        }
    }
}

pub static ROUTES: &[RouteDef] = &[
    RouteDef {
        redirect: Some(LANDING_PATH),
        ..RouteDef::leaf("/", "root")
    },
    RouteDef {
        auth_only: true,
        ..RouteDef::leaf(AUTH_PATH, "auth")
    },
    RouteDef {
        children: &[
            RouteDef::leaf(LANDING_PATH, "patients"),
            RouteDef::leaf("/patient/:id", "patient"),
            RouteDef::leaf("/patient/:id/edit", "edit-patient"),
            RouteDef::leaf("/new", "new"),
            RouteDef::leaf("/settings", "settings"),
        ],
        ..RouteDef::leaf("", "dashboard")
    },
    RouteDef::leaf("/*any", "not-found"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    /// Outermost route first; the last entry is the matched leaf.
    pub chain: Vec<&'static RouteDef>,
    pub params: HashMap<String, String>,
}

impl RouteMatch {
    pub fn route(&self) -> &'static RouteDef {
        self.chain[self.chain.len() - 1]
    }

    pub fn name(&self) -> &'static str {
        self.route().name
    }

    pub fn is_auth_only(&self) -> bool {
        self.chain.iter().any(|route| route.auth_only)
    }
}

impl PartialEq for RouteDef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn match_pattern(pattern: &str, path: &[&str]) -> Option<HashMap<String, String>> {
    let pattern = segments(pattern);
    let mut params = HashMap::new();
    for (index, segment) in pattern.iter().enumerate() {
        if let Some(name) = segment.strip_prefix('*') {
            params.insert(name.to_string(), path[index.min(path.len())..].join("/"));
            return Some(params);
        }
        let actual = path.get(index)?;
        match segment.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), (*actual).to_string());
            }
            None if segment == actual => {}
            None => return None,
        }
    }
    (pattern.len() == path.len()).then_some(params)
}

fn match_in(
    routes: &'static [RouteDef],
    path: &[&str],
    chain: &mut Vec<&'static RouteDef>,
) -> Option<HashMap<String, String>> {
    for route in routes {
        chain.push(route);
        if route.children.is_empty() {
            if let Some(params) = match_pattern(route.path, path) {
                return Some(params);
            }
        } else if let Some(params) = match_in(route.children, path, chain) {
            return Some(params);
        }
        chain.pop();
    }
    None
}

/// First declared route matching `path`. Query strings and fragments are ignored.
pub fn match_route(path: &str) -> Option<RouteMatch> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = segments(path);
    let mut chain = Vec::new();
    match_in(ROUTES, &path, &mut chain).map(|params| RouteMatch { chain, params })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(&'static str),
}

/// Decides one navigation attempt from a snapshot of the session predicate.
pub fn guard(target: &RouteMatch, is_authenticated: bool) -> Navigation {
    match (target.is_auth_only(), is_authenticated) {
        (true, false) => Navigation::Proceed,
        (true, true) => Navigation::Redirect(LANDING_PATH),
        (false, false) => Navigation::Redirect(AUTH_PATH),
        (false, true) => Navigation::Proceed,
    }
}

/// Guard decision for a raw path. Unmatched paths are treated like any
/// other non-auth route.
pub fn guard_path(path: &str, is_authenticated: bool) -> Navigation {
    match match_route(path) {
        Some(target) => guard(&target, is_authenticated),
        None if is_authenticated => Navigation::Proceed,
        None => Navigation::Redirect(AUTH_PATH),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: String,
    pub redirects: Vec<&'static str>,
}

/// Follows guard decisions and static route redirects until the target settles.
pub fn resolve_navigation(path: &str, is_authenticated: bool) -> Resolution {
    let mut current = path.to_string();
    let mut redirects = Vec::new();
    while redirects.len() < MAX_REDIRECTS {
        let next = match guard_path(&current, is_authenticated) {
            Navigation::Redirect(target) => Some(target),
            Navigation::Proceed => match_route(&current).and_then(|m| m.route().redirect),
        };
        match next {
            Some(target) if target != current => {
                redirects.push(target);
                current = target.to_string();
            }
            _ => break,
        }
    }
    if redirects.len() == MAX_REDIRECTS {
        log::warn!("navigation to {} did not settle", path);
    }
    Resolution {
        path: current,
        redirects,
    }
}

/// Every concrete path pattern the router serves.
pub fn route_paths() -> Vec<&'static str> {
    fn collect(routes: &'static [RouteDef], out: &mut Vec<&'static str>) {
        for route in routes {
            if route.children.is_empty() {
                out.push(route.path);
            } else {
                collect(route.children, out);
            }
        }
    }
    let mut out = Vec::new();
    collect(ROUTES, &mut out);
    out
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::new());
    provide_context(CommonStore::new());
    view! {
        <Title text="Woundcare"/>
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=|| view! { <Redirect path=LANDING_PATH/> }/>
                    <Route path=AUTH_PATH view=GuardedAuth/>
                    <Route path="" view=GuardedDashboard>
                        <Route path=LANDING_PATH view=PatientsPage/>
                        <Route path="/patient/:id" view=PatientPage/>
                        <Route path="/patient/:id/edit" view=EditPatientPage/>
                        <Route path="/new" view=NewPatientPage/>
                        <Route path="/settings" view=SettingsPage/>
                    </Route>
                    <Route path="/*any" view=GuardedNotFound/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn GuardedAuth() -> impl IntoView {
    view! { <RouteGuard><AuthPage/></RouteGuard> }
}

#[component]
fn GuardedDashboard() -> impl IntoView {
    view! { <RouteGuard><DashboardLayout/></RouteGuard> }
}

#[component]
fn GuardedNotFound() -> impl IntoView {
    view! { <RouteGuard><NotFoundPage/></RouteGuard> }
}
