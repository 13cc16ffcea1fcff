use ratatui::widgets::{ListState, TableState};
use std::time::Instant;
use tracing::debug;

use crate::api::RecommendationQuery;
use crate::catalog::Phone;
use crate::config::Config;
use crate::filters::price_cap::{self, PRICE_MAX};
use crate::filters::{brand_options, label_of, normalize_brand, Mode};
use crate::ranking::RankedItem;
use crate::scoring::CategoryTable;
use crate::tui::theme::{resolve_theme, ThemeColors};

const FLASH_SECS: u64 = 3;

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Mode,
    Brand,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Breakdown,
    Help,
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,

    // Filters
    pub mode: Mode,
    pub brands: Vec<String>,
    pub brand: Option<String>,
    pub min_ram: Option<f64>,
    pub max_price: u32,

    // Selection state per screen
    pub mode_state: ListState,
    pub brand_state: ListState,
    pub table_state: TableState,

    pub results: Vec<RankedItem<Phone>>,
    pub has_searched: bool,
    pub categories: CategoryTable,
    pub theme: ThemeColors,

    pub flash_message: Option<Flash>,
    pub search_requested: bool,
    /// Bumped on every new or cancelled search; results from an older
    /// generation are dropped
    pub search_generation: u64,
    pub is_loading: bool,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl App {
    /// Build the wizard state with the config's search defaults preselected
    pub fn new(config: &Config) -> Self {
        let mode = config.defaults.mode.unwrap_or_default();
        let brands = brand_options(config.brands.as_deref());
        let brand = config.defaults.brand.as_deref().and_then(normalize_brand);

        let mut mode_state = ListState::default();
        mode_state.select(Mode::ALL.iter().position(|m| *m == mode));

        let mut brand_state = ListState::default();
        brand_state.select(Some(brand_index(&brands, brand.as_deref())));

        Self {
            screen: Screen::Mode,
            input_mode: InputMode::Normal,
            mode,
            brands,
            brand,
            min_ram: config.defaults.min_ram,
            max_price: config
                .defaults
                .max_price
                .map(|p| price_cap::clamp_price(p as f64) as u32)
                .unwrap_or(PRICE_MAX),
            mode_state,
            brand_state,
            table_state: TableState::default(),
            results: Vec::new(),
            has_searched: false,
            categories: config.category_table(),
            theme: resolve_theme(config.theme),
            flash_message: None,
            search_requested: false,
            search_generation: 0,
            is_loading: false,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// Query for the current filters. The price is always sent; the top of
    /// the range stands for "Any".
    pub fn query(&self) -> RecommendationQuery {
        RecommendationQuery {
            mode: self.mode,
            brand: self.brand.clone(),
            min_ram: self.min_ram,
            max_price: Some(self.max_price),
        }
    }

    pub fn price_label(&self) -> String {
        label_of(self.max_price as f64)
    }

    pub fn brand_label(&self) -> &str {
        self.brand.as_deref().unwrap_or("Any")
    }

    // --- Mode screen ---

    pub fn next_mode(&mut self) {
        let i = wrap_next(self.mode_state.selected(), Mode::ALL.len());
        self.mode_state.select(Some(i));
    }

    pub fn previous_mode(&mut self) {
        let i = wrap_previous(self.mode_state.selected(), Mode::ALL.len());
        self.mode_state.select(Some(i));
    }

    /// Confirm the highlighted mode. Brand and results start over.
    pub fn choose_mode(&mut self) {
        let idx = self.mode_state.selected().unwrap_or(0);
        self.mode = Mode::ALL.get(idx).copied().unwrap_or_default();
        self.brand = None;
        self.brand_state.select(Some(0));
        self.cancel_search();
        self.clear_results();
        self.screen = Screen::Brand;
    }

    // --- Brand screen ---

    pub fn next_brand(&mut self) {
        let i = wrap_next(self.brand_state.selected(), self.brands.len());
        self.brand_state.select(Some(i));
    }

    pub fn previous_brand(&mut self) {
        let i = wrap_previous(self.brand_state.selected(), self.brands.len());
        self.brand_state.select(Some(i));
    }

    /// Confirm the highlighted brand and run the first search
    pub fn choose_brand(&mut self) {
        let idx = self.brand_state.selected().unwrap_or(0);
        self.brand = self.brands.get(idx).and_then(|b| normalize_brand(b));
        self.screen = Screen::Results;
        self.request_search();
    }

    /// Step back one screen
    pub fn go_back(&mut self) {
        self.screen = match self.screen {
            Screen::Mode => {
                self.should_quit = true;
                Screen::Mode
            }
            Screen::Brand => Screen::Mode,
            Screen::Results => {
                self.cancel_search();
                Screen::Brand
            }
        };
    }

    // --- Results screen ---

    pub fn next_row(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let i = wrap_next(self.table_state.selected(), self.results.len());
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let i = wrap_previous(self.table_state.selected(), self.results.len());
        self.table_state.select(Some(i));
    }

    pub fn selected_item(&self) -> Option<&RankedItem<Phone>> {
        self.table_state.selected().and_then(|i| self.results.get(i))
    }

    /// Cycle the mode and search again, keeping the brand
    pub fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
        self.mode_state
            .select(Mode::ALL.iter().position(|m| *m == self.mode));
        self.request_search();
    }

    /// Cycle the brand and search again
    pub fn cycle_brand(&mut self) {
        self.next_brand();
        let idx = self.brand_state.selected().unwrap_or(0);
        self.brand = self.brands.get(idx).and_then(|b| normalize_brand(b));
        self.request_search();
    }

    /// Move the price cap one step and search again
    pub fn step_price(&mut self, forward: bool) {
        self.max_price = price_cap::step(Some(self.max_price as f64), forward);
        self.request_search();
    }

    /// Ask the event loop to start a search; any pending one is dropped
    pub fn request_search(&mut self) {
        self.search_generation = self.search_generation.wrapping_add(1);
        self.search_requested = true;
        self.is_loading = true;
    }

    /// Drop any requested or in-flight search; its results will be ignored
    pub fn cancel_search(&mut self) {
        if self.search_requested || self.is_loading {
            self.search_generation = self.search_generation.wrapping_add(1);
        }
        self.search_requested = false;
        self.is_loading = false;
    }

    /// Apply the result of the search started at `generation`, unless a
    /// newer search or a reset has happened since
    pub fn apply_search(
        &mut self,
        generation: u64,
        result: anyhow::Result<Vec<RankedItem<Phone>>>,
    ) {
        if generation != self.search_generation {
            debug!(generation, current = self.search_generation, "dropping stale search result");
            return;
        }
        self.update_results(result);
    }

    /// Apply a finished search
    pub fn update_results(&mut self, result: anyhow::Result<Vec<RankedItem<Phone>>>) {
        self.is_loading = false;
        self.has_searched = true;
        match result {
            Ok(items) => {
                let count = items.len();
                self.results = items;
                self.table_state
                    .select(if self.results.is_empty() { None } else { Some(0) });
                self.show_flash(format!(
                    "Found {} phone{}",
                    count,
                    if count == 1 { "" } else { "s" }
                ));
            }
            Err(e) => {
                self.clear_results();
                self.has_searched = true;
                self.show_error(format!("Failed to fetch recommendations: {}", e));
            }
        }
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.table_state.select(None);
        self.has_searched = false;
        if self.input_mode == InputMode::Breakdown {
            self.input_mode = InputMode::Normal;
        }
    }

    /// Open the selected phone's price link in the browser
    pub fn open_selected(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        let name = item.item.display_name();
        match item.item.price_url.clone() {
            Some(url) if !url.is_empty() => match crate::browser::open_url(&url) {
                Ok(()) => self.show_flash(format!("Opened: {}", name)),
                Err(e) => self.show_error(format!("Failed to open browser: {}", e)),
            },
            _ => self.show_error(format!("No price link for {}", name)),
        }
    }

    // --- Overlays ---

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_breakdown(&mut self) {
        if self.selected_item().is_some() {
            self.input_mode = InputMode::Breakdown;
        }
    }

    pub fn dismiss_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    // --- Flash and spinner ---

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some(Flash {
            text: msg,
            is_error: false,
            shown_at: Instant::now(),
        });
    }

    pub fn show_error(&mut self, msg: String) {
        self.flash_message = Some(Flash {
            text: msg,
            is_error: true,
            shown_at: Instant::now(),
        });
    }

    pub fn update_flash(&mut self) {
        if let Some(ref flash) = self.flash_message {
            if flash.shown_at.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    /// Advance the loading spinner animation frame
    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}

fn brand_index(brands: &[String], brand: Option<&str>) -> usize {
    brand
        .and_then(|b| brands.iter().position(|o| o.eq_ignore_ascii_case(b)))
        .unwrap_or(0)
}

fn wrap_next(selected: Option<usize>, len: usize) -> usize {
    match selected {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    }
}

fn wrap_previous(selected: Option<usize>, len: usize) -> usize {
    match selected {
        Some(0) | None => len.saturating_sub(1),
        Some(i) => i - 1,
    }
}
