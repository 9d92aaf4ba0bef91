//! Application state management for Canvass.
//!
//! This module contains the core `App` struct that manages all application state,
//! including UI state, cached data, session management, and background task
//! coordination for the campaign dashboard.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::ApiClient;
use crate::assignment::{check_capacity, AssignmentError};
use crate::auth::{Access, CredentialStore, RoleGate, Session};
use crate::cache::CacheManager;
use crate::config::Config;
use crate::forms::{CensusForm, EditorField, EditorForm};
use crate::models::{
    Building, BudgetItem, CensusRecord, District, NewBudgetItem, NewCensusRecord, NewDistrict,
    NewStrategyItem, NewTeamMember, Profile, ResidentialSquare, StrategyItem, TeamMember,
};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// 32 is sufficient for a full refresh (~9 API calls) with headroom.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for email input on the login form.
const MAX_USERNAME_LENGTH: usize = 80;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Buildings fetched per page in the assignment view.
pub const BUILDINGS_PAGE_SIZE: usize = 50;

/// How many recent census entries to pull for the overview tab.
const RECENT_CENSUS_LIMIT: usize = 100;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Census,
    Squares,
    Assignments,
    Districts,
    Budget,
    Team,
    Strategy,
}

impl Tab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Census => "Census",
            Tab::Squares => "Squares",
            Tab::Assignments => "Assignments",
            Tab::Districts => "Districts",
            Tab::Budget => "Budget",
            Tab::Team => "Team",
            Tab::Strategy => "Strategy",
        }
    }

    /// Tabs in display order, matching the number-key shortcuts.
    pub const ALL: [Tab; 8] = [
        Tab::Overview,
        Tab::Census,
        Tab::Squares,
        Tab::Assignments,
        Tab::Districts,
        Tab::Budget,
        Tab::Team,
        Tab::Strategy,
    ];

    /// True for tabs that only coordinators with the admin role may open.
    pub fn admin_only(&self) -> bool {
        matches!(
            self,
            Tab::Assignments | Tab::Districts | Tab::Budget | Tab::Team | Tab::Strategy
        )
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Overview => Tab::Census,
            Tab::Census => Tab::Squares,
            Tab::Squares => Tab::Assignments,
            Tab::Assignments => Tab::Districts,
            Tab::Districts => Tab::Budget,
            Tab::Budget => Tab::Team,
            Tab::Team => Tab::Strategy,
            Tab::Strategy => Tab::Overview,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Overview => Tab::Strategy,
            Tab::Census => Tab::Overview,
            Tab::Squares => Tab::Census,
            Tab::Assignments => Tab::Squares,
            Tab::Districts => Tab::Assignments,
            Tab::Budget => Tab::Districts,
            Tab::Team => Tab::Budget,
            Tab::Strategy => Tab::Team,
        }
    }
}

/// Which pane of the census tab has focus: the location selectors or the
/// household text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CensusFocus {
    Districts,
    Squares,
    Buildings,
    Fields,
}

/// Which pane of the assignment tab has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentFocus {
    Representatives,
    Buildings,
    AllBuildings,
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    LoggingIn,
    /// The add-item editor overlay is open on an admin tab
    Editing,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Result types from background refresh tasks.
///
/// These variants are sent through an MPSC channel from background tasks back
/// to the main application loop.
enum RefreshResult {
    /// The signed-in user's own profile row (drives the role gate)
    OwnProfile(Option<Profile>),
    Representatives(Vec<Profile>),
    Districts(Vec<District>),
    Squares(Vec<ResidentialSquare>),
    /// One page of buildings plus the exact total row count
    Buildings(Vec<Building>, usize),
    /// Buildings with no representative, for the assignment picker
    UnassignedBuildings(Vec<Building>),
    Census(Vec<CensusRecord>),
    Budget(Vec<BudgetItem>),
    Team(Vec<TeamMember>),
    Strategy(Vec<StrategyItem>),
    /// Current holdings count for a representative (id, count)
    RepHoldings(String, usize),
    /// A batch assignment was accepted (rep id, new holdings, message)
    AssignmentApplied(String, usize, String),
    /// Census entries recorded against a square (square id, rows)
    SquareCensus(String, Vec<CensusRecord>),
    /// A write completed; message for the status bar
    MutationOk(String),
    /// A census entry was accepted by the backend
    CensusSubmitted,
    /// Signal that all refresh tasks have completed
    RefreshComplete,
    /// An error occurred during a background task
    Error(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub session: Session,
    pub api: ApiClient,
    pub cache: CacheManager,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,

    // Login form state
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Role gate
    pub profile: Option<Profile>,
    pub profile_loading: bool,
    gate: RoleGate,

    // Cached data
    pub representatives: Vec<Profile>,
    pub districts: Vec<District>,
    pub squares: Vec<ResidentialSquare>,
    pub buildings: Vec<Building>,
    pub buildings_total: usize,
    pub buildings_offset: usize,
    pub unassigned_buildings: Vec<Building>,
    pub census: Vec<CensusRecord>,
    pub budget: Vec<BudgetItem>,
    pub team: Vec<TeamMember>,
    pub strategy: Vec<StrategyItem>,

    // Census tab state
    pub census_form: CensusForm,
    pub census_focus: CensusFocus,
    pub census_district_selection: usize,
    pub census_square_selection: usize,
    pub census_building_selection: usize,

    // Assignment tab state
    pub assignment_focus: AssignmentFocus,
    pub rep_selection: usize,
    pub building_selection: usize,
    pub all_buildings_selection: usize,
    /// Building ids ticked in the picker, in tick order
    pub selected_building_ids: Vec<String>,
    /// Current holdings of the selected representative, from the backend
    pub selected_rep_holdings: Option<usize>,

    // Simple list selections for the remaining tabs
    pub squares_selection: usize,
    pub districts_selection: usize,
    pub budget_selection: usize,
    pub team_selection: usize,
    pub strategy_selection: usize,

    // Add-item editor for the admin tabs
    pub editor: Option<EditorForm>,
    /// Armed row id for the two-press delete on the admin tabs
    pub pending_delete: Option<String>,

    /// Census rows fetched for the square under the cursor (square id, rows)
    pub square_census: Option<(String, Vec<CensusRecord>)>,

    // Background task channel
    refresh_rx: Option<mpsc::Receiver<RefreshResult>>,
    refresh_tx: mpsc::Sender<RefreshResult>,

    // Status message
    pub status_message: Option<String>,

    // Cache ages for status bar
    pub cache_ages: crate::cache::manager::CacheAges,
}

impl App {
    /// Create a new application instance
    pub async fn new() -> Result<Self> {
        debug!("App::new() starting");
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        let backend_url = config.backend_url()?;
        let anon_key = config.anon_key()?.to_string();
        debug!(backend = %backend_url, "Config loaded");

        let cache_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
        debug!(?cache_dir, "Cache directory configured");

        // Load session from disk if it exists
        let mut session = Session::new(cache_dir.clone());
        let load_result = session.load();
        debug!(?load_result, has_data = session.data.is_some(), "Session loaded");

        let mut api = ApiClient::new(&backend_url, &anon_key)?;

        // If we have a valid session, set the token on the API client
        if let Some(ref data) = session.data {
            debug!(expired = data.is_expired(), "Session found");
            if !data.is_expired() {
                api.set_token(data.access_token.clone());
                debug!("Token set on API client");
            }
        } else {
            debug!("No session data found");
        }

        let cache = CacheManager::new(cache_dir)?;

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // Get credentials from env vars or config
        let login_username = std::env::var("CANVASS_EMAIL")
            .ok()
            .or_else(|| config.last_username.clone())
            .unwrap_or_default();

        let login_password = std::env::var("CANVASS_PASSWORD").unwrap_or_default();

        Ok(Self {
            config,
            session,
            api,
            cache,

            state: AppState::Normal,
            current_tab: Tab::Overview,

            login_username,
            login_password,
            login_focus: LoginFocus::Username,
            login_error: None,

            profile: None,
            profile_loading: false,
            gate: RoleGate::admin_only(),

            representatives: Vec::new(),
            districts: Vec::new(),
            squares: Vec::new(),
            buildings: Vec::new(),
            buildings_total: 0,
            buildings_offset: 0,
            unassigned_buildings: Vec::new(),
            census: Vec::new(),
            budget: Vec::new(),
            team: Vec::new(),
            strategy: Vec::new(),

            census_form: CensusForm::new(),
            census_focus: CensusFocus::Districts,
            census_district_selection: 0,
            census_square_selection: 0,
            census_building_selection: 0,

            assignment_focus: AssignmentFocus::Representatives,
            rep_selection: 0,
            building_selection: 0,
            all_buildings_selection: 0,
            selected_building_ids: Vec::new(),
            selected_rep_holdings: None,

            squares_selection: 0,
            districts_selection: 0,
            budget_selection: 0,
            team_selection: 0,
            strategy_selection: 0,

            editor: None,
            pending_delete: None,
            square_census: None,

            refresh_rx: Some(rx),
            refresh_tx: tx,

            status_message: None,
            cache_ages: Default::default(),
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Check if the user is authenticated with a valid session
    pub fn is_authenticated(&self) -> bool {
        self.session.is_valid()
    }

    /// Attempt login with the credentials from the login form
    pub async fn attempt_login(&mut self) -> Result<()> {
        let username = self.login_username.clone();
        let password = self.login_password.clone();

        if username.is_empty() || password.is_empty() {
            self.login_error = Some("Email and password required".to_string());
            return Err(anyhow::anyhow!("Email and password required"));
        }

        self.login_error = None;

        match self.api.sign_in(&username, &password).await {
            Ok(session_data) => {
                if let Err(e) = CredentialStore::store(&username, &password) {
                    warn!(error = %e, "Failed to store credentials");
                }

                self.config.last_username = Some(username);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.session.update(session_data);
                if let Err(e) = self.session.save() {
                    warn!(error = %e, "Failed to save session");
                }

                if let Some(ref data) = self.session.data {
                    self.api.set_token(data.access_token.clone());
                }

                self.login_password.clear();
                self.state = AppState::Normal;
                info!("Login successful");

                self.fetch_own_profile();
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                let text = e.to_string().to_lowercase();
                let user_message = if text.contains("unauthorized") || text.contains("denied") {
                    "Invalid email or password".to_string()
                } else if text.contains("network") || text.contains("connect") {
                    "Unable to connect to server. Check your internet connection.".to_string()
                } else if text.contains("timeout") {
                    "Connection timed out. Please try again.".to_string()
                } else {
                    format!("Login failed: {}", e)
                };
                self.login_error = Some(user_message);
                Err(e)
            }
        }
    }

    /// Interactive login on the terminal, used by the `--login` flag for
    /// headless or scripted setups where the TUI overlay is unwanted.
    pub async fn login_interactive(&mut self) -> Result<()> {
        println!("\n=== Canvass Login ===\n");

        let email = if let Some(ref last_user) = self.config.last_username {
            print!("Email [{}]: ", last_user);
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            let input = input.trim();

            if input.is_empty() {
                last_user.clone()
            } else {
                input.to_string()
            }
        } else {
            print!("Email: ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            input.trim().to_string()
        };

        let password = if CredentialStore::has_credentials(&email) {
            print!("Use stored password? [Y/n]: ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if input.trim().to_lowercase() != "n" {
                CredentialStore::get_password(&email)?
            } else {
                rpassword::prompt_password("Password: ")?
            }
        } else {
            rpassword::prompt_password("Password: ")?
        };

        println!("\nAuthenticating...");

        let session_data = self.api.sign_in(&email, &password).await?;

        if let Err(e) = CredentialStore::store(&email, &password) {
            warn!(error = %e, "Failed to store credentials");
        }

        self.config.last_username = Some(email);
        self.config.save()?;

        self.session.update(session_data);
        self.session.save()?;

        if let Some(ref data) = self.session.data {
            self.api.set_token(data.access_token.clone());
        }

        println!("Login successful!\n");
        Ok(())
    }

    /// Start the login process (show login overlay)
    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// Sign out: revoke the token server-side, drop the local session, and
    /// bring the login overlay back up.
    pub fn sign_out(&mut self) {
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.sign_out().await {
                warn!(error = %e, "Sign-out request failed");
            }
        });

        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session");
        }
        self.api.clear_token();
        self.profile = None;
        self.profile_loading = false;
        self.login_password.clear();
        info!("Signed out");
        self.start_login();
    }

    // =========================================================================
    // Role gate
    // =========================================================================

    /// Evaluate access to the admin area for the current profile state.
    pub fn admin_access(&self) -> Access {
        self.gate.evaluate(self.profile.as_ref(), self.profile_loading)
    }

    /// Switch tabs, bouncing non-admins off the admin-only tabs.
    pub fn select_tab(&mut self, tab: Tab) {
        self.pending_delete = None;
        if tab.admin_only() {
            match self.admin_access() {
                Access::Granted => {}
                Access::Pending => {
                    // Withhold the tab until the profile has loaded
                    self.status_message = Some("Checking permissions...".to_string());
                    return;
                }
                Access::Denied { notice } => {
                    self.status_message = Some(notice);
                    self.current_tab = Tab::Census;
                    return;
                }
            }
        }
        self.current_tab = tab;
    }

    /// Kick off a background fetch of the signed-in user's profile row.
    ///
    /// The user id comes from the auth endpoint so the token gets validated
    /// server-side; the stored id is the fallback when that lookup fails.
    pub fn fetch_own_profile(&mut self) {
        let stored_id = match self.session.user_id() {
            Some(id) => id.to_string(),
            None => return,
        };

        self.profile_loading = true;
        let api = self.api.clone();
        let tx = self.refresh_tx.clone();

        tokio::spawn(async move {
            let user_id = match api.current_user().await {
                Ok(user) => user.id,
                Err(e) => {
                    debug!(error = %e, "current_user lookup failed, using stored id");
                    stored_id
                }
            };

            match api.fetch_profile_by_user(&user_id).await {
                Ok(profile) => {
                    Self::send_result(&tx, RefreshResult::OwnProfile(profile)).await;
                }
                Err(e) => {
                    error!(error = %e, "Failed to fetch own profile");
                    Self::send_result(&tx, RefreshResult::OwnProfile(None)).await;
                }
            }
        });
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Load all data from cache
    pub fn load_from_cache(&mut self) -> Result<()> {
        if let Ok(Some(cached)) = self.cache.load_representatives() {
            self.representatives = cached.data;
        }
        if let Ok(Some(cached)) = self.cache.load_districts() {
            self.districts = cached.data;
        }
        if let Ok(Some(cached)) = self.cache.load_squares() {
            self.squares = cached.data;
        }
        if let Ok(Some(cached)) = self.cache.load_buildings() {
            self.buildings_total = cached.data.len();
            self.buildings = cached.data;
        }
        if let Ok(Some(cached)) = self.cache.load_census() {
            self.census = cached.data;
        }
        if let Ok(Some(cached)) = self.cache.load_budget() {
            self.budget = cached.data;
        }
        if let Ok(Some(cached)) = self.cache.load_team() {
            self.team = cached.data;
        }
        if let Ok(Some(cached)) = self.cache.load_strategy() {
            self.strategy = cached.data;
        }

        self.cache_ages = self.cache.get_cache_ages();
        Ok(())
    }

    /// Check if any cache data is stale
    pub fn is_cache_stale(&self) -> bool {
        self.cache.any_stale()
    }

    // =========================================================================
    // Background Data Refresh
    // =========================================================================

    /// Spawn a background task to refresh all data
    pub fn refresh_all_background(&mut self) {
        info!("Starting background refresh of all data");

        if !self.is_authenticated() {
            warn!("No valid session for refresh");
            return;
        }

        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        let offset = self.buildings_offset;

        tokio::spawn(async move {
            Self::execute_background_refresh(tx, api, offset).await;
        });

        self.fetch_own_profile();
        self.status_message = Some("Refreshing data...".to_string());
    }

    /// Helper to send refresh results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<RefreshResult>, result: RefreshResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send refresh result - channel closed");
        }
    }

    /// Execute the background refresh task.
    ///
    /// Runs in a spawned Tokio task and fetches all campaign tables in
    /// parallel, sending each table back through the MPSC channel as it
    /// arrives. Cloning the client is cheap; the clones share one pool.
    async fn execute_background_refresh(
        tx: mpsc::Sender<RefreshResult>,
        api: ApiClient,
        buildings_offset: usize,
    ) {
        info!("Background refresh task started");

        let api1 = api.clone();
        let api2 = api.clone();
        let api3 = api.clone();
        let api4 = api.clone();
        let api5 = api.clone();
        let api6 = api.clone();
        let api7 = api.clone();
        let api8 = api.clone();

        let (reps_res, districts_res, squares_res, buildings_res, unassigned_res, census_res, budget_res, team_res, strategy_res) = futures::join!(
            api1.fetch_representatives(),
            api2.fetch_districts(),
            api3.fetch_squares(),
            api4.fetch_buildings_page(buildings_offset, BUILDINGS_PAGE_SIZE),
            api5.fetch_unassigned_buildings(),
            api6.fetch_recent_census(RECENT_CENSUS_LIMIT),
            api7.fetch_budget_items(),
            api8.fetch_team_members(),
            api.fetch_strategy_items(),
        );

        Self::send_fetch_result(&tx, "Representatives", reps_res, RefreshResult::Representatives)
            .await;
        Self::send_fetch_result(&tx, "Districts", districts_res, RefreshResult::Districts).await;
        Self::send_fetch_result(&tx, "Squares", squares_res, RefreshResult::Squares).await;

        match buildings_res {
            Ok((rows, total)) => {
                debug!(count = rows.len(), total, "Buildings page fetched");
                Self::send_result(&tx, RefreshResult::Buildings(rows, total)).await;
            }
            Err(e) => {
                error!(error = %e, "Buildings fetch failed");
                Self::send_result(&tx, RefreshResult::Error(format!("Buildings: {}", e))).await;
            }
        }

        Self::send_fetch_result_or_empty(
            &tx,
            "UnassignedBuildings",
            unassigned_res,
            RefreshResult::UnassignedBuildings,
        )
        .await;
        Self::send_fetch_result(&tx, "Census", census_res, RefreshResult::Census).await;
        Self::send_fetch_result_or_empty(&tx, "Budget", budget_res, RefreshResult::Budget).await;
        Self::send_fetch_result_or_empty(&tx, "Team", team_res, RefreshResult::Team).await;
        Self::send_fetch_result_or_empty(&tx, "Strategy", strategy_res, RefreshResult::Strategy)
            .await;

        info!("Background refresh complete");
        Self::send_result(&tx, RefreshResult::RefreshComplete).await;
    }

    /// Helper to send a successful fetch result or an error
    async fn send_fetch_result<T, F>(
        tx: &mpsc::Sender<RefreshResult>,
        name: &str,
        result: Result<T>,
        wrapper: F,
    ) where
        F: FnOnce(T) -> RefreshResult,
    {
        match result {
            Ok(data) => {
                debug!("{} fetched successfully", name);
                Self::send_result(tx, wrapper(data)).await;
            }
            Err(e) => {
                error!(error = %e, "{} fetch failed", name);
                Self::send_result(tx, RefreshResult::Error(format!("{}: {}", name, e))).await;
            }
        }
    }

    /// Helper to send a fetch result or an empty default
    async fn send_fetch_result_or_empty<T, F>(
        tx: &mpsc::Sender<RefreshResult>,
        name: &str,
        result: Result<Vec<T>>,
        wrapper: F,
    ) where
        F: FnOnce(Vec<T>) -> RefreshResult,
    {
        match result {
            Ok(data) => {
                debug!("{} fetched successfully", name);
                Self::send_result(tx, wrapper(data)).await;
            }
            Err(e) => {
                debug!(error = %e, "{} fetch failed, using empty list", name);
                Self::send_result(tx, wrapper(Vec::new())).await;
            }
        }
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        // Collect all pending results first to avoid borrow conflicts
        let results: Vec<RefreshResult> = {
            if let Some(ref mut rx) = self.refresh_rx {
                let mut results = Vec::new();
                while let Ok(result) = rx.try_recv() {
                    results.push(result);
                }
                results
            } else {
                Vec::new()
            }
        };

        for result in results {
            self.process_refresh_result(result);
        }
    }

    /// Process a single refresh result from a background task.
    ///
    /// Updates the corresponding app state and caches the data.
    fn process_refresh_result(&mut self, result: RefreshResult) {
        match result {
            RefreshResult::OwnProfile(profile) => {
                self.profile_loading = false;
                self.profile = profile;
                // The gate can flip when a different user signs in; bounce
                // off an admin tab that is no longer allowed
                if self.current_tab.admin_only() {
                    if let Access::Denied { notice } = self.admin_access() {
                        self.status_message = Some(notice);
                        self.current_tab = Tab::Census;
                    }
                }
            }
            RefreshResult::Representatives(data) => {
                if let Err(e) = self.cache.save_representatives(&data) {
                    warn!(error = %e, "Failed to cache representatives");
                }
                self.representatives = data;
            }
            RefreshResult::Districts(data) => {
                if let Err(e) = self.cache.save_districts(&data) {
                    warn!(error = %e, "Failed to cache districts");
                }
                self.districts = data;
                self.cache_ages = self.cache.get_cache_ages();
            }
            RefreshResult::Squares(data) => {
                if let Err(e) = self.cache.save_squares(&data) {
                    warn!(error = %e, "Failed to cache squares");
                }
                self.squares = data;
            }
            RefreshResult::Buildings(data, total) => {
                if let Err(e) = self.cache.save_buildings(&data) {
                    warn!(error = %e, "Failed to cache buildings");
                }
                self.buildings = data;
                self.buildings_total = total;
                self.cache_ages = self.cache.get_cache_ages();
            }
            RefreshResult::UnassignedBuildings(data) => {
                // Drop picker ticks that no longer exist or got assigned
                self.selected_building_ids
                    .retain(|id| data.iter().any(|b| &b.id == id));
                self.unassigned_buildings = data;
            }
            RefreshResult::Census(data) => {
                if let Err(e) = self.cache.save_census(&data) {
                    warn!(error = %e, "Failed to cache census entries");
                }
                self.census = data;
                self.cache_ages = self.cache.get_cache_ages();
            }
            RefreshResult::Budget(data) => {
                if let Err(e) = self.cache.save_budget(&data) {
                    warn!(error = %e, "Failed to cache budget items");
                }
                self.budget = data;
            }
            RefreshResult::Team(data) => {
                if let Err(e) = self.cache.save_team(&data) {
                    warn!(error = %e, "Failed to cache team members");
                }
                self.team = data;
            }
            RefreshResult::Strategy(data) => {
                if let Err(e) = self.cache.save_strategy(&data) {
                    warn!(error = %e, "Failed to cache strategy items");
                }
                self.strategy = data;
            }
            RefreshResult::RepHoldings(rep_id, count) => {
                // Ignore stale responses for a rep we already moved off
                if self
                    .selected_representative()
                    .map(|r| r.id == rep_id)
                    .unwrap_or(false)
                {
                    self.selected_rep_holdings = Some(count);
                }
            }
            RefreshResult::AssignmentApplied(rep_id, count, message) => {
                // Ticks survive a rejected batch; only an accepted one
                // clears them
                self.selected_building_ids.clear();
                self.status_message = Some(message);
                if self
                    .selected_representative()
                    .map(|r| r.id == rep_id)
                    .unwrap_or(false)
                {
                    self.selected_rep_holdings = Some(count);
                }
            }
            RefreshResult::SquareCensus(square_id, rows) => {
                // Ignore responses for a square the cursor already left
                let still_selected = self
                    .squares
                    .get(self.squares_selection)
                    .map(|s| s.id == square_id)
                    .unwrap_or(false);
                if still_selected {
                    self.square_census = Some((square_id, rows));
                }
            }
            RefreshResult::MutationOk(message) => {
                self.status_message = Some(message);
            }
            RefreshResult::CensusSubmitted => {
                self.census_form.clear_household_fields();
                self.status_message = Some("Census entry saved".to_string());
            }
            RefreshResult::RefreshComplete => {
                // Only clear status if it's a progress message, preserve errors
                if let Some(ref msg) = self.status_message {
                    if !msg.starts_with("Error") && !msg.starts_with("Access denied") {
                        self.status_message = None;
                    }
                }
            }
            RefreshResult::Error(msg) => {
                error!(error = %msg, "Background task error");
                let lower = msg.to_lowercase();
                let user_message = if lower.contains("rate limit") {
                    "Server is busy. Please wait a moment and try again.".to_string()
                } else if lower.contains("unauthorized") || lower.contains("401") {
                    "Session expired. Please log in again.".to_string()
                } else if lower.contains("network") || lower.contains("connect") {
                    "Network error. Check your connection.".to_string()
                } else {
                    format!("Error: {}", msg)
                };
                self.status_message = Some(user_message);
            }
        }
    }

    // =========================================================================
    // Buildings pagination
    // =========================================================================

    pub fn next_buildings_page(&mut self) {
        if self.buildings_offset + BUILDINGS_PAGE_SIZE < self.buildings_total {
            self.buildings_offset += BUILDINGS_PAGE_SIZE;
            self.building_selection = 0;
            self.fetch_buildings_page();
        }
    }

    pub fn prev_buildings_page(&mut self) {
        if self.buildings_offset > 0 {
            self.buildings_offset = self.buildings_offset.saturating_sub(BUILDINGS_PAGE_SIZE);
            self.building_selection = 0;
            self.fetch_buildings_page();
        }
    }

    fn fetch_buildings_page(&mut self) {
        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        let offset = self.buildings_offset;

        tokio::spawn(async move {
            match api.fetch_buildings_page(offset, BUILDINGS_PAGE_SIZE).await {
                Ok((rows, total)) => {
                    Self::send_result(&tx, RefreshResult::Buildings(rows, total)).await;
                }
                Err(e) => {
                    Self::send_result(&tx, RefreshResult::Error(format!("Buildings: {}", e)))
                        .await;
                }
            }
        });
    }

    // =========================================================================
    // Assignment workflow
    // =========================================================================

    pub fn selected_representative(&self) -> Option<&Profile> {
        self.representatives.get(self.rep_selection)
    }

    /// Called when the rep cursor moves; refreshes the holdings count shown
    /// next to the capacity limit.
    pub fn on_representative_selected(&mut self) {
        self.selected_rep_holdings = None;
        let rep_id = match self.selected_representative() {
            Some(rep) => rep.id.clone(),
            None => return,
        };

        let api = self.api.clone();
        let tx = self.refresh_tx.clone();

        tokio::spawn(async move {
            match api.count_assigned_buildings(&rep_id).await {
                Ok(count) => {
                    Self::send_result(&tx, RefreshResult::RepHoldings(rep_id, count)).await;
                }
                Err(e) => {
                    debug!(error = %e, "Failed to count rep holdings");
                }
            }
        });
    }

    /// Toggle a building in the assignment picker.
    pub fn toggle_building_selection(&mut self) {
        let id = match self.unassigned_buildings.get(self.building_selection) {
            Some(b) => b.id.clone(),
            None => return,
        };
        if let Some(pos) = self.selected_building_ids.iter().position(|s| *s == id) {
            self.selected_building_ids.remove(pos);
        } else {
            self.selected_building_ids.push(id);
        }
    }

    /// Assign the ticked buildings to the selected representative.
    ///
    /// Capacity is re-checked against the backend count inside the task, and
    /// the whole batch is written with one request, so either every ticked
    /// building lands on the representative or none do.
    pub fn submit_assignment(&mut self) {
        let rep = match self.selected_representative() {
            Some(rep) => rep.clone(),
            None => {
                self.status_message = Some(AssignmentError::NoRepresentative.to_string());
                return;
            }
        };
        if self.selected_building_ids.is_empty() {
            self.status_message = Some(AssignmentError::EmptySelection.to_string());
            return;
        }

        let building_ids = self.selected_building_ids.clone();
        let api = self.api.clone();
        let tx = self.refresh_tx.clone();

        self.status_message = Some("Assigning buildings...".to_string());

        tokio::spawn(async move {
            let current = match api.count_assigned_buildings(&rep.id).await {
                Ok(count) => count,
                Err(e) => {
                    Self::send_result(&tx, RefreshResult::Error(format!("Assignment: {}", e)))
                        .await;
                    return;
                }
            };

            if let Err(e) = check_capacity(&rep.full_name, current, building_ids.len()) {
                Self::send_result(&tx, RefreshResult::Error(e.to_string())).await;
                return;
            }

            if let Err(e) = api.assign_buildings(&rep.id, &building_ids).await {
                Self::send_result(&tx, RefreshResult::Error(format!("Assignment: {}", e))).await;
                return;
            }

            info!(rep = %rep.full_name, count = building_ids.len(), "Buildings assigned");
            Self::send_result(
                &tx,
                RefreshResult::AssignmentApplied(
                    rep.id.clone(),
                    current + building_ids.len(),
                    format!(
                        "Assigned {} building(s) to {}",
                        building_ids.len(),
                        rep.full_name
                    ),
                ),
            )
            .await;

            // Refetch the lists the assignment changed
            if let Ok(data) = api.fetch_unassigned_buildings().await {
                Self::send_result(&tx, RefreshResult::UnassignedBuildings(data)).await;
            }
            if let Ok((rows, total)) = api.fetch_buildings_page(0, BUILDINGS_PAGE_SIZE).await {
                Self::send_result(&tx, RefreshResult::Buildings(rows, total)).await;
            }
        });
    }

    // =========================================================================
    // Census workflow
    // =========================================================================

    /// Squares in the district currently picked on the census form.
    pub fn census_squares(&self) -> Vec<&ResidentialSquare> {
        match self.census_form.district_id.as_deref() {
            Some(district_id) => self
                .squares
                .iter()
                .filter(|s| s.district_id.as_deref() == Some(district_id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Submit the census form as a completed survey entry.
    pub fn submit_census(&mut self) {
        let profile_id = match self.profile.as_ref() {
            Some(p) => p.id.clone(),
            None => {
                self.status_message = Some("Profile not loaded yet".to_string());
                return;
            }
        };

        let record: NewCensusRecord = match self.census_form.to_new_record(&profile_id, Utc::now())
        {
            Some(record) => record,
            None => {
                self.status_message =
                    Some("Fill in location, head of household, and card counts".to_string());
                return;
            }
        };

        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        let square_id = record.residential_square_id.clone();

        self.status_message = Some("Saving census entry...".to_string());

        tokio::spawn(async move {
            if let Err(e) = api.insert_census(&record).await {
                Self::send_result(&tx, RefreshResult::Error(format!("Census: {}", e))).await;
                return;
            }

            info!(square = %square_id, "Census entry saved");
            Self::send_result(&tx, RefreshResult::CensusSubmitted).await;

            if let Ok(data) = api.fetch_recent_census(RECENT_CENSUS_LIMIT).await {
                Self::send_result(&tx, RefreshResult::Census(data)).await;
            }
        });
    }

    // =========================================================================
    // Squares tab
    // =========================================================================

    /// Called when the square cursor moves; pulls the full census list for
    /// the square so the detail pane shows an exact count rather than one
    /// derived from the recent-entries window.
    pub fn on_square_selected(&mut self) {
        self.square_census = None;
        let square_id = match self.squares.get(self.squares_selection) {
            Some(s) => s.id.clone(),
            None => return,
        };

        let api = self.api.clone();
        let tx = self.refresh_tx.clone();

        tokio::spawn(async move {
            match api.fetch_census_for_square(&square_id).await {
                Ok(rows) => {
                    Self::send_result(&tx, RefreshResult::SquareCensus(square_id, rows)).await;
                }
                Err(e) => {
                    debug!(error = %e, "Failed to fetch census for square");
                }
            }
        });
    }

    // =========================================================================
    // Add-item editor (admin tabs)
    // =========================================================================

    /// Open the add-item editor for the current tab, if it has one.
    pub fn open_editor(&mut self) {
        let form = match self.current_tab {
            Tab::Districts => EditorForm::new(
                " New District ",
                vec![
                    EditorField::required("Name (Arabic)"),
                    EditorField::optional("Name (French)"),
                    EditorField::optional("Coordinator"),
                    EditorField::numeric("Target votes"),
                    EditorField::optional("Priority"),
                ],
            ),
            Tab::Budget => EditorForm::new(
                " New Budget Item ",
                vec![
                    EditorField::required("Category"),
                    EditorField::optional("Description"),
                    EditorField::numeric("Allocated (MAD)"),
                    EditorField::numeric("Spent (MAD)"),
                    EditorField::optional("Priority"),
                ],
            ),
            Tab::Team => EditorForm::new(
                " New Team Member ",
                vec![
                    EditorField::required("Name"),
                    EditorField::required("Role"),
                    EditorField::optional("Team type"),
                    EditorField::optional("Status"),
                ],
            ),
            Tab::Strategy => EditorForm::new(
                " New Strategy Item ",
                vec![
                    EditorField::required("Title"),
                    EditorField::optional("Status"),
                    EditorField::optional("Priority"),
                    EditorField::numeric("Progress (0-100)"),
                ],
            ),
            _ => return,
        };
        self.editor = Some(form);
        self.state = AppState::Editing;
    }

    /// Close the editor without saving.
    pub fn cancel_editor(&mut self) {
        self.editor = None;
        self.state = AppState::Normal;
    }

    /// Validate the editor form and insert the new row in the background.
    pub fn submit_editor(&mut self) {
        let form = match self.editor.as_ref() {
            Some(f) => f,
            None => return,
        };
        if !form.ready() {
            self.status_message = Some("Fill in the required fields".to_string());
            return;
        }

        let api = self.api.clone();
        let tx = self.refresh_tx.clone();

        match self.current_tab {
            Tab::Districts => {
                let district = NewDistrict {
                    name_ar: form.value(0).unwrap_or_default(),
                    name_fr: form.value(1),
                    coordinator_name: form.value(2),
                    target_votes: form.number(3).map(|v| v as i64),
                    priority_level: form.value(4),
                    status: None,
                };
                tokio::spawn(async move {
                    if let Err(e) = api.insert_district(&district).await {
                        Self::send_result(&tx, RefreshResult::Error(format!("District: {}", e)))
                            .await;
                        return;
                    }
                    Self::send_result(&tx, RefreshResult::MutationOk("District added".to_string()))
                        .await;
                    if let Ok(data) = api.fetch_districts().await {
                        Self::send_result(&tx, RefreshResult::Districts(data)).await;
                    }
                });
            }
            Tab::Budget => {
                let item = NewBudgetItem {
                    category: form.value(0).unwrap_or_default(),
                    description: form.value(1),
                    allocated: form.number(2).unwrap_or(0.0),
                    spent: form.number(3).unwrap_or(0.0),
                    status: None,
                    priority: form.value(4),
                };
                tokio::spawn(async move {
                    if let Err(e) = api.insert_budget_item(&item).await {
                        Self::send_result(&tx, RefreshResult::Error(format!("Budget: {}", e)))
                            .await;
                        return;
                    }
                    Self::send_result(
                        &tx,
                        RefreshResult::MutationOk("Budget item added".to_string()),
                    )
                    .await;
                    if let Ok(data) = api.fetch_budget_items().await {
                        Self::send_result(&tx, RefreshResult::Budget(data)).await;
                    }
                });
            }
            Tab::Team => {
                let member = NewTeamMember {
                    name: form.value(0).unwrap_or_default(),
                    role: form.value(1).unwrap_or_default(),
                    team_type: form.value(2),
                    status: form.value(3),
                    responsibilities: Vec::new(),
                };
                tokio::spawn(async move {
                    if let Err(e) = api.insert_team_member(&member).await {
                        Self::send_result(&tx, RefreshResult::Error(format!("Team: {}", e))).await;
                        return;
                    }
                    Self::send_result(
                        &tx,
                        RefreshResult::MutationOk("Team member added".to_string()),
                    )
                    .await;
                    if let Ok(data) = api.fetch_team_members().await {
                        Self::send_result(&tx, RefreshResult::Team(data)).await;
                    }
                });
            }
            Tab::Strategy => {
                let item = NewStrategyItem {
                    title: form.value(0).unwrap_or_default(),
                    status: form.value(1),
                    priority: form.value(2),
                    progress: form.number(3).map(|v| (v as i64).clamp(0, 100)),
                    tactics: None,
                };
                tokio::spawn(async move {
                    if let Err(e) = api.insert_strategy_item(&item).await {
                        Self::send_result(&tx, RefreshResult::Error(format!("Strategy: {}", e)))
                            .await;
                        return;
                    }
                    Self::send_result(
                        &tx,
                        RefreshResult::MutationOk("Strategy item added".to_string()),
                    )
                    .await;
                    if let Ok(data) = api.fetch_strategy_items().await {
                        Self::send_result(&tx, RefreshResult::Strategy(data)).await;
                    }
                });
            }
            _ => return,
        }

        self.editor = None;
        self.state = AppState::Normal;
        self.status_message = Some("Saving...".to_string());
    }

    // =========================================================================
    // Deletion (admin tabs)
    // =========================================================================

    /// Two-press delete for the admin list tabs: the first press arms the
    /// selected row, pressing again on the same row performs the delete.
    pub fn request_delete(&mut self) {
        let (id, label) = match self.current_tab {
            Tab::Districts => match self.districts.get(self.districts_selection) {
                Some(d) => (d.id.clone(), d.display_name()),
                None => return,
            },
            Tab::Budget => match self.budget.get(self.budget_selection) {
                Some(b) => (b.id.clone(), b.category.clone()),
                None => return,
            },
            Tab::Team => match self.team.get(self.team_selection) {
                Some(m) => (m.id.clone(), m.name.clone()),
                None => return,
            },
            Tab::Strategy => match self.strategy.get(self.strategy_selection) {
                Some(s) => (s.id.clone(), s.title.clone()),
                None => return,
            },
            _ => return,
        };

        if self.pending_delete.as_deref() == Some(id.as_str()) {
            self.pending_delete = None;
            self.perform_delete(id);
        } else {
            self.status_message = Some(format!("Press d again to delete {}", label));
            self.pending_delete = Some(id);
        }
    }

    /// Disarm the pending delete; any key other than a repeat press does this.
    pub fn clear_pending_delete(&mut self) {
        self.pending_delete = None;
    }

    fn perform_delete(&mut self, id: String) {
        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        let tab = self.current_tab;

        self.status_message = Some("Deleting...".to_string());

        tokio::spawn(async move {
            let result = match tab {
                Tab::Districts => api.delete_district(&id).await,
                Tab::Budget => api.delete_budget_item(&id).await,
                Tab::Team => api.delete_team_member(&id).await,
                Tab::Strategy => api.delete_strategy_item(&id).await,
                _ => return,
            };

            if let Err(e) = result {
                Self::send_result(&tx, RefreshResult::Error(format!("Delete: {}", e))).await;
                return;
            }

            info!(%id, "Row deleted");
            Self::send_result(&tx, RefreshResult::MutationOk("Deleted".to_string())).await;

            match tab {
                Tab::Districts => {
                    if let Ok(data) = api.fetch_districts().await {
                        Self::send_result(&tx, RefreshResult::Districts(data)).await;
                    }
                }
                Tab::Budget => {
                    if let Ok(data) = api.fetch_budget_items().await {
                        Self::send_result(&tx, RefreshResult::Budget(data)).await;
                    }
                }
                Tab::Team => {
                    if let Ok(data) = api.fetch_team_members().await {
                        Self::send_result(&tx, RefreshResult::Team(data)).await;
                    }
                }
                Tab::Strategy => {
                    if let Ok(data) = api.fetch_strategy_items().await {
                        Self::send_result(&tx, RefreshResult::Strategy(data)).await;
                    }
                }
                _ => {}
            }
        });
    }

    // =========================================================================
    // Strategy progress
    // =========================================================================

    /// Nudge the selected strategy item's progress by `delta` percent.
    pub fn adjust_strategy_progress(&mut self, delta: i64) {
        let item = match self.strategy.get(self.strategy_selection) {
            Some(i) => i.clone(),
            None => return,
        };

        let progress = (item.progress.unwrap_or(0) + delta).clamp(0, 100);
        if Some(progress) == item.progress {
            return;
        }

        let api = self.api.clone();
        let tx = self.refresh_tx.clone();

        tokio::spawn(async move {
            if let Err(e) = api.update_strategy_progress(&item.id, progress).await {
                Self::send_result(&tx, RefreshResult::Error(format!("Strategy: {}", e))).await;
                return;
            }
            Self::send_result(
                &tx,
                RefreshResult::MutationOk(format!("Progress set to {}%", progress)),
            )
            .await;
            if let Ok(data) = api.fetch_strategy_items().await {
                Self::send_result(&tx, RefreshResult::Strategy(data)).await;
            }
        });
    }

    // =========================================================================
    // Building release
    // =========================================================================

    /// Release the building under the cursor in the All Buildings pane back
    /// to the unassigned pool.
    pub fn unassign_selected_building(&mut self) {
        let building = match self.buildings.get(self.all_buildings_selection) {
            Some(b) => b.clone(),
            None => return,
        };
        if !building.is_assigned() {
            self.status_message = Some("Building is not assigned".to_string());
            return;
        }

        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        let offset = self.buildings_offset;

        self.status_message = Some("Releasing building...".to_string());

        tokio::spawn(async move {
            if let Err(e) = api.unassign_building(&building.id).await {
                Self::send_result(&tx, RefreshResult::Error(format!("Release: {}", e))).await;
                return;
            }

            info!(building = building.building_number, "Building released");
            Self::send_result(
                &tx,
                RefreshResult::MutationOk(format!(
                    "Building #{} released",
                    building.building_number
                )),
            )
            .await;

            if let Ok(data) = api.fetch_unassigned_buildings().await {
                Self::send_result(&tx, RefreshResult::UnassignedBuildings(data)).await;
            }
            if let Ok((rows, total)) = api.fetch_buildings_page(offset, BUILDINGS_PAGE_SIZE).await
            {
                Self::send_result(&tx, RefreshResult::Buildings(rows, total)).await;
            }
        });
    }

    // =========================================================================
    // Derived data for the overview tab
    // =========================================================================

    /// Total potential voters recorded across loaded census entries.
    pub fn total_potential_voters(&self) -> i64 {
        self.census
            .iter()
            .filter_map(|r| r.total_potential_voters)
            .sum()
    }

    /// Census entries recorded for a given square.
    pub fn census_count_for_square(&self, square_id: &str) -> usize {
        self.census
            .iter()
            .filter(|r| r.residential_square_id == square_id)
            .count()
    }

    /// Resolve a representative's display name by profile id.
    pub fn representative_name(&self, profile_id: &str) -> Option<&str> {
        self.representatives
            .iter()
            .find(|p| p.id == profile_id)
            .map(|p| p.full_name.as_str())
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let dir = std::env::temp_dir().join("canvass-app-tests");
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        App {
            config: Config::default(),
            session: Session::new(dir.clone()),
            api: ApiClient::new("http://localhost", "anon").unwrap(),
            cache: CacheManager::new(dir).unwrap(),

            state: AppState::Normal,
            current_tab: Tab::Overview,

            login_username: String::new(),
            login_password: String::new(),
            login_focus: LoginFocus::Username,
            login_error: None,

            profile: None,
            profile_loading: false,
            gate: RoleGate::admin_only(),

            representatives: Vec::new(),
            districts: Vec::new(),
            squares: Vec::new(),
            buildings: Vec::new(),
            buildings_total: 0,
            buildings_offset: 0,
            unassigned_buildings: Vec::new(),
            census: Vec::new(),
            budget: Vec::new(),
            team: Vec::new(),
            strategy: Vec::new(),

            census_form: CensusForm::new(),
            census_focus: CensusFocus::Districts,
            census_district_selection: 0,
            census_square_selection: 0,
            census_building_selection: 0,

            assignment_focus: AssignmentFocus::Representatives,
            rep_selection: 0,
            building_selection: 0,
            all_buildings_selection: 0,
            selected_building_ids: Vec::new(),
            selected_rep_holdings: None,

            squares_selection: 0,
            districts_selection: 0,
            budget_selection: 0,
            team_selection: 0,
            strategy_selection: 0,

            editor: None,
            pending_delete: None,
            square_census: None,

            refresh_rx: Some(rx),
            refresh_tx: tx,

            status_message: None,
            cache_ages: Default::default(),
        }
    }

    fn profile(role: &str) -> Profile {
        Profile {
            id: "p-1".to_string(),
            user_id: "u-1".to_string(),
            full_name: "Amina Haddad".to_string(),
            role: role.to_string(),
            assigned_district: None,
            phone: None,
        }
    }

    // -------------------------------------------------------------------------
    // Tab Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_tab_next_wraps() {
        assert_eq!(Tab::Overview.next(), Tab::Census);
        assert_eq!(Tab::Strategy.next(), Tab::Overview);
    }

    #[test]
    fn test_tab_prev_wraps() {
        assert_eq!(Tab::Overview.prev(), Tab::Strategy);
        assert_eq!(Tab::Census.prev(), Tab::Overview);
    }

    #[test]
    fn test_tab_next_prev_are_inverse() {
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
    }

    #[test]
    fn test_admin_only_tabs() {
        assert!(!Tab::Overview.admin_only());
        assert!(!Tab::Census.admin_only());
        assert!(!Tab::Squares.admin_only());
        assert!(Tab::Assignments.admin_only());
        assert!(Tab::Districts.admin_only());
        assert!(Tab::Budget.admin_only());
        assert!(Tab::Team.admin_only());
        assert!(Tab::Strategy.admin_only());
    }

    // -------------------------------------------------------------------------
    // Refresh result handling
    // -------------------------------------------------------------------------

    #[test]
    fn test_ticks_survive_rejected_assignment() {
        let mut app = test_app();
        app.selected_building_ids = vec!["b-1".to_string(), "b-2".to_string()];

        app.process_refresh_result(RefreshResult::Error("capacity exceeded".to_string()));
        assert_eq!(app.selected_building_ids.len(), 2);
    }

    #[test]
    fn test_accepted_assignment_clears_ticks() {
        let mut app = test_app();
        app.representatives = vec![profile("representative")];
        app.rep_selection = 0;
        app.selected_building_ids = vec!["b-1".to_string(), "b-2".to_string()];

        app.process_refresh_result(RefreshResult::AssignmentApplied(
            "p-1".to_string(),
            5,
            "Assigned 2 building(s) to Amina Haddad".to_string(),
        ));

        assert!(app.selected_building_ids.is_empty());
        assert_eq!(app.selected_rep_holdings, Some(5));
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_non_admin_profile_bounces_off_admin_tab() {
        let mut app = test_app();
        app.current_tab = Tab::Budget;
        app.profile_loading = true;

        app.process_refresh_result(RefreshResult::OwnProfile(Some(profile("representative"))));

        assert_eq!(app.current_tab, Tab::Census);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_admin_profile_keeps_admin_tab() {
        let mut app = test_app();
        app.current_tab = Tab::Budget;
        app.profile_loading = true;

        app.process_refresh_result(RefreshResult::OwnProfile(Some(profile("admin"))));

        assert_eq!(app.current_tab, Tab::Budget);
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_username_char() {
        assert!(can_add_username_char(0, 'a'));
        assert!(can_add_username_char(79, 'z'));
        assert!(!can_add_username_char(80, 'a'));
        assert!(!can_add_username_char(0, '\n'));
        assert!(!can_add_username_char(0, '\t'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\r'));
    }
}
