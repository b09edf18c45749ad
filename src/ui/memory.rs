// src/ui/memory.rs

// Implementações em memória dos widgets. Guardam o "DOM" atual e um contador
// de mutações, o que permite afirmar que um tick com erro não tocou em nada.
// O ConsoleView usa o MemoryView por baixo; os testes usam direto.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::common::sync_utils::lock;
use crate::models::{actions::SlaForm, snapshot::GeoPoint};
use crate::ui::widgets::{
    Control, DashboardView, Notification, PointLayer, SeriesChart, SiteCard, Slot, SystemStatus,
};

// --- View ---

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub texts: BTreeMap<Slot, String>,
    pub cards: Vec<SiteCard>,
    pub status: SystemStatus,
    pub loading: bool,
    pub controls: HashMap<Control, bool>,
    pub notifications: Vec<Notification>,
    pub form: SlaForm,
    pub mutations: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            texts: BTreeMap::new(),
            cards: Vec::new(),
            status: SystemStatus::Offline,
            loading: false,
            controls: HashMap::new(),
            notifications: Vec::new(),
            form: SlaForm::default(),
            mutations: 0,
        }
    }
}

impl ViewState {
    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    /// Controles nunca configurados contam como habilitados.
    pub fn is_enabled(&self, control: Control) -> bool {
        self.controls.get(&control).copied().unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    state: Arc<Mutex<ViewState>>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        lock(&self.state).clone()
    }

    /// Simula o usuário digitando no formulário de SLA.
    pub fn fill_sla_form(&self, form: SlaForm) {
        lock(&self.state).form = form;
    }

    fn mutate(&self, f: impl FnOnce(&mut ViewState)) {
        let mut state = lock(&self.state);
        f(&mut state);
        state.mutations += 1;
    }
}

impl DashboardView for MemoryView {
    fn set_text(&mut self, slot: Slot, text: String) {
        self.mutate(|s| {
            s.texts.insert(slot, text);
        });
    }

    fn replace_site_cards(&mut self, cards: Vec<SiteCard>) {
        self.mutate(|s| s.cards = cards);
    }

    fn set_status(&mut self, status: SystemStatus) {
        self.mutate(|s| s.status = status);
    }

    fn set_loading(&mut self, loading: bool) {
        self.mutate(|s| s.loading = loading);
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        self.mutate(|s| {
            s.controls.insert(control, enabled);
        });
    }

    fn show_notification(&mut self, notification: Notification) {
        self.mutate(|s| s.notifications.push(notification));
    }

    fn dismiss_notification(&mut self, id: u64) {
        self.mutate(|s| s.notifications.retain(|n| n.id != id));
    }

    fn sla_form(&self) -> SlaForm {
        lock(&self.state).form.clone()
    }

    fn clear_sla_inputs(&mut self) {
        self.mutate(|s| {
            s.form.power_requirement.clear();
            s.form.duration_hours.clear();
        });
    }
}

// --- Mapa ---

#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub position: GeoPoint,
    pub color: String,
    pub radius: f64,
    pub popup: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerState {
    pub points: Vec<MapPoint>,
    pub clears: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryLayer {
    state: Arc<Mutex<LayerState>>,
}

impl MemoryLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LayerState {
        lock(&self.state).clone()
    }
}

impl PointLayer for MemoryLayer {
    fn clear(&mut self) {
        let mut state = lock(&self.state);
        state.points.clear();
        state.clears += 1;
    }

    fn add_point(&mut self, position: GeoPoint, color: &str, radius: f64, popup: String) {
        lock(&self.state).points.push(MapPoint {
            position,
            color: color.to_string(),
            radius,
            popup,
        });
    }
}

// --- Gráficos ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartState {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub buckets: Vec<usize>,
    pub updates: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryChart {
    state: Arc<Mutex<ChartState>>,
}

impl MemoryChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ChartState {
        lock(&self.state).clone()
    }
}

impl SeriesChart for MemoryChart {
    fn set_points(&mut self, labels: Vec<String>, values: Vec<f64>) {
        let mut state = lock(&self.state);
        state.labels = labels;
        state.values = values;
        state.updates += 1;
    }

    fn set_buckets(&mut self, counts: &[usize]) {
        let mut state = lock(&self.state);
        state.buckets = counts.to_vec();
        state.updates += 1;
    }
}
