use leptos::*;

pub const DEFAULT_PATIENT_STATUS: &str = "Stable";

/// Ambient UI state shared by the dashboard shell.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonState {
    pub patient_status: String,
    pub sidebar_open: bool,
    /// Page-level fetch in flight, for the shell's busy indicator.
    pub is_loading: bool,
    /// Mirror of the session predicate for shell chrome. `AuthStore` stays
    /// the source of truth; the route guard never reads this.
    pub is_authenticated: bool,
}

impl Default for CommonState {
    fn default() -> Self {
        Self {
            patient_status: DEFAULT_PATIENT_STATUS.to_string(),
            sidebar_open: false,
            is_loading: false,
            is_authenticated: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommonStore {
    state: RwSignal<CommonState>,
}

impl CommonStore {
    pub fn new() -> Self {
        Self {
            state: create_rw_signal(CommonState::default()),
        }
    }

    pub fn state(&self) -> ReadSignal<CommonState> {
        self.state.read_only()
    }

    pub fn patient_status(&self) -> String {
        self.state.with(|s| s.patient_status.clone())
    }

    pub fn sidebar_open(&self) -> bool {
        self.state.with(|s| s.sidebar_open)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.is_loading)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated)
    }

    pub fn set_patient_status(&self, status: impl Into<String>) {
        let status = status.into();
        self.state.update(|s| s.patient_status = status);
    }

    pub fn set_sidebar_open(&self, open: bool) {
        self.state.update(|s| s.sidebar_open = open);
    }

    pub fn toggle_sidebar(&self) {
        self.state.update(|s| s.sidebar_open = !s.sidebar_open);
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.update(|s| s.is_loading = loading);
    }

    pub fn set_authenticated(&self, authenticated: bool) {
        self.state.update(|s| s.is_authenticated = authenticated);
    }
}

impl Default for CommonStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_common() -> CommonStore {
    match use_context::<CommonStore>() {
        Some(store) => store,
        None => {
            let store = CommonStore::new();
            provide_context(store);
            store
        }
    }
}
