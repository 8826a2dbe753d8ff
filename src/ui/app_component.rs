use crate::constants::{ERROR_LOAD_FAILED, ERROR_NO_ACTION_SELECTED, LOG_STALE_RESULT};
use crate::models::{Account, Action as ScheduledAction, Cluster, Instance, Operation, Overview, SystemEvent};
use crate::schedule::{FormEffect, FormMsg};
use crate::service::actions::RowAction;
use crate::ui::components::{
    DialogComponent, ListPane, ResourceTable, ScheduleDialog, StatusBar, StatusInfo,
};
use crate::ui::core::{
    actions::{Action, DialogType, View},
    event_handler::EventType,
    task_manager::TaskManager,
    AppContext, Component,
};
use crate::ui::layout::LayoutManager;
use crate::utils::debounce::Debouncer;
use crate::utils::epoch::FetchEpoch;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, error, info};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Tabs,
    Frame,
};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::mpsc;

/// Application state separate from UI concerns
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: View,
    pub overview: Option<Overview>,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
}

impl AppState {
    /// Clear any transient messages
    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.info_message = None;
    }
}

pub struct AppComponent {
    // Component composition
    accounts: ResourceTable<Account>,
    clusters: ResourceTable<Cluster>,
    instances: ResourceTable<Instance>,
    schedules: ResourceTable<ScheduledAction>,
    events: ResourceTable<SystemEvent>,
    dialog: DialogComponent,
    schedule_dialog: ScheduleDialog,

    // Application state
    state: AppState,
    epochs: HashMap<View, FetchEpoch>,
    loaded_views: HashSet<View>,

    // Services
    context: AppContext,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    search_debouncer: Debouncer<Action>,

    should_quit: bool,
}

impl AppComponent {
    pub fn new(context: AppContext) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new();
        let per_page = context.config.ui.per_page;
        let debounce = Duration::from_millis(context.config.ui.search_debounce_ms);
        let search_debouncer = Debouncer::new(debounce, task_manager.action_sender());

        let state = AppState {
            view: context.config.default_view(),
            ..Default::default()
        };

        Self {
            accounts: ResourceTable::new(View::Accounts, per_page),
            clusters: ResourceTable::new(View::Clusters, per_page),
            instances: ResourceTable::new(View::Instances, per_page),
            schedules: ResourceTable::new(View::Schedules, per_page),
            events: ResourceTable::new(View::Events, per_page),
            dialog: DialogComponent::new(context.logger.clone()),
            schedule_dialog: ScheduleDialog::new(),
            state,
            epochs: View::ALL.iter().map(|v| (*v, FetchEpoch::new())).collect(),
            loaded_views: HashSet::new(),
            context,
            task_manager,
            background_action_rx,
            search_debouncer,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn current_view(&self) -> View {
        self.state.view
    }

    /// Rows loaded for `view`, before any search or filter
    pub fn item_count(&self, view: View) -> usize {
        self.table(view).len()
    }

    pub fn schedule_dialog(&self) -> &ScheduleDialog {
        &self.schedule_dialog
    }

    pub fn dialog(&self) -> &DialogComponent {
        &self.dialog
    }

    pub fn is_loading(&self, view: View) -> bool {
        self.table(view).is_loading()
    }

    /// Get the number of active background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Load the starting view and the overview
    pub fn start(&mut self) {
        info!("Starting on {} view", self.state.view.name());
        self.reload(self.state.view);
        self.task_manager.spawn_overview_load(self.context.service.clone());
    }

    fn table(&self, view: View) -> &dyn ListPane {
        match view {
            View::Accounts => &self.accounts,
            View::Clusters => &self.clusters,
            View::Instances => &self.instances,
            View::Schedules => &self.schedules,
            View::Events => &self.events,
        }
    }

    fn table_mut(&mut self, view: View) -> &mut dyn ListPane {
        match view {
            View::Accounts => &mut self.accounts,
            View::Clusters => &mut self.clusters,
            View::Instances => &mut self.instances,
            View::Schedules => &mut self.schedules,
            View::Events => &mut self.events,
        }
    }

    /// Start a fresh load of `view`; anything still in flight for it becomes stale.
    fn reload(&mut self, view: View) {
        let epoch = self.epochs.entry(view).or_default().begin();
        debug!("Reloading {} (epoch {})", view.name(), epoch);
        self.table_mut(view).set_loading(true);
        self.loaded_views.insert(view);
        self.task_manager
            .spawn_view_load(self.context.service.clone(), view, epoch);
    }

    fn is_current(&self, view: View, epoch: u64) -> bool {
        let current = self.epochs.get(&view).map(|e| e.is_current(epoch)).unwrap_or(false);
        if !current {
            debug!("{} ({} epoch {})", LOG_STALE_RESULT, view.name(), epoch);
        }
        current
    }

    fn switch_view(&mut self, view: View) {
        self.state.view = view;
        if !self.loaded_views.contains(&view) {
            self.reload(view);
        }
    }

    /// Handle global keyboard shortcuts that aren't component-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Tab => Action::NextView,
            KeyCode::BackTab => Action::PreviousView,
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                Action::SwitchView(View::ALL[index])
            }
            KeyCode::Char('r') => Action::Reload(self.state.view),
            KeyCode::Char('L') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Char('?') => Action::ShowDialog(DialogType::Help),
            KeyCode::Char('a') => Action::ShowDialog(DialogType::Schedule),
            _ => self.handle_view_key(key),
        }
    }

    /// Keys acting on the selected row of the current view
    fn handle_view_key(&mut self, key: KeyEvent) -> Action {
        match (self.state.view, key.code) {
            (View::Clusters, KeyCode::Enter) => match self.clusters.selected_item() {
                Some(cluster) => Action::ShowClusterDetail(cluster.id),
                None => Action::None,
            },
            (View::Clusters, KeyCode::Char('p')) => self.confirm_power(Operation::PowerOn),
            (View::Clusters, KeyCode::Char('o')) => self.confirm_power(Operation::PowerOff),
            (View::Instances, KeyCode::Enter) => match self.instances.selected_item() {
                Some(instance) => Action::ShowInstanceDetail(instance.id),
                None => Action::None,
            },
            (View::Schedules, KeyCode::Char('e')) => self.row_action(RowAction::Enable),
            (View::Schedules, KeyCode::Char('d')) => self.row_action(RowAction::Disable),
            (View::Schedules, KeyCode::Char('x')) => match self.schedules.selected_item() {
                Some(action) => Action::ShowDialog(DialogType::ConfirmDelete { action_id: action.id }),
                None => Action::ShowError(ERROR_NO_ACTION_SELECTED.to_string()),
            },
            _ => Action::None,
        }
    }

    fn confirm_power(&self, operation: Operation) -> Action {
        match self.clusters.selected_item() {
            Some(cluster) => Action::ShowDialog(DialogType::ConfirmPower {
                cluster_id: cluster.id,
                cluster_name: cluster.name,
                operation,
            }),
            None => Action::None,
        }
    }

    fn row_action(&self, row_action: RowAction) -> Action {
        match self.schedules.selected_item() {
            Some(action) => Action::ApplyRowAction {
                action_id: action.id,
                row_action,
            },
            None => Action::ShowError(ERROR_NO_ACTION_SELECTED.to_string()),
        }
    }

    fn run_form_effect(&mut self, effect: FormEffect) {
        match effect {
            FormEffect::None => {}
            FormEffect::Reload => self.reload(View::Schedules),
            effect => {
                self.task_manager
                    .spawn_form_effect(self.context.service.clone(), effect);
            }
        }
    }

    fn load_failed(&mut self, view: View, message: String) {
        error!("{} {}: {}", ERROR_LOAD_FAILED, view.name(), message);
        // Previous data stays on screen
        self.table_mut(view).set_loading(false);
        self.state.error_message = Some(format!("{} {}: {}", ERROR_LOAD_FAILED, view.name(), message));
    }

    /// Handle app-level actions that require business logic
    pub fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Action::None
            }
            Action::SwitchView(view) => {
                self.switch_view(view);
                Action::None
            }
            Action::NextView => {
                self.switch_view(self.state.view.next());
                Action::None
            }
            Action::PreviousView => {
                self.switch_view(self.state.view.previous());
                Action::None
            }
            Action::Reload(view) => {
                self.state.clear_messages();
                self.reload(view);
                self.task_manager.spawn_overview_load(self.context.service.clone());
                Action::None
            }
            Action::AccountsLoaded { epoch, accounts } => {
                if self.is_current(View::Accounts, epoch) {
                    self.accounts.set_items(accounts);
                }
                Action::None
            }
            Action::ClustersLoaded { epoch, clusters } => {
                if self.is_current(View::Clusters, epoch) {
                    self.clusters.set_items(clusters);
                }
                Action::None
            }
            Action::InstancesLoaded { epoch, instances } => {
                if self.is_current(View::Instances, epoch) {
                    self.instances.set_items(instances);
                }
                Action::None
            }
            Action::ActionsLoaded { epoch, actions } => {
                if self.is_current(View::Schedules, epoch) {
                    self.schedules.set_items(actions);
                }
                Action::None
            }
            Action::EventsLoaded { epoch, events } => {
                if self.is_current(View::Events, epoch) {
                    self.events.set_items(events);
                }
                Action::None
            }
            Action::OverviewLoaded(overview) => {
                self.state.overview = Some(overview);
                Action::None
            }
            Action::LoadFailed { view, epoch, message } => {
                if self.is_current(view, epoch) {
                    self.load_failed(view, message);
                }
                Action::None
            }
            Action::SearchChanged { view, query } => {
                self.search_debouncer.call(Action::SearchCommitted { view, query });
                Action::None
            }
            Action::PowerCluster { cluster_id, operation } => {
                info!("Requesting {} for cluster {}", operation.label(), cluster_id);
                self.task_manager
                    .spawn_power(self.context.service.clone(), cluster_id, operation);
                Action::None
            }
            Action::ShowClusterDetail(cluster_id) => {
                self.task_manager
                    .spawn_cluster_detail(self.context.service.clone(), cluster_id);
                Action::None
            }
            Action::ShowInstanceDetail(instance_id) => {
                self.task_manager
                    .spawn_instance_detail(self.context.service.clone(), instance_id);
                Action::None
            }
            Action::Schedule(msg) => {
                let effect = self.schedule_dialog.apply(msg);
                self.run_form_effect(effect);
                Action::None
            }
            Action::ApplyRowAction { action_id, row_action } => {
                let epoch = self.epochs.entry(View::Schedules).or_default().begin();
                self.schedules.set_loading(true);
                self.task_manager
                    .spawn_row_action(self.context.service.clone(), action_id, row_action, epoch);
                Action::None
            }
            Action::RowActionFailed { epoch, message } => {
                // Rows are unchanged; only a newer reload may keep the spinner
                if self.is_current(View::Schedules, epoch) {
                    self.schedules.set_loading(false);
                }
                self.handle_app_action(Action::ShowError(message))
            }
            Action::ShowDialog(DialogType::Schedule) => {
                self.handle_app_action(Action::Schedule(FormMsg::Open))
            }
            Action::ShowInfo(message) => {
                info!("{}", message);
                self.state.error_message = None;
                self.state.info_message = Some(message);
                Action::None
            }
            Action::ShowError(message) => {
                error!("{}", message);
                self.state.info_message = None;
                self.state.error_message = Some(message);
                Action::None
            }
            other => other,
        }
    }

    /// Process background actions from task manager
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();

        // Process all available background actions
        while let Ok(action) = self.background_action_rx.try_recv() {
            actions.push(action);
        }

        // Clean up finished tasks
        let completed_tasks = self.task_manager.cleanup_finished_tasks();
        if !completed_tasks.is_empty() {
            debug!("Cleaned up {} finished tasks", completed_tasks.len());
        }

        actions
    }

    /// Check if any background operations are running
    pub fn is_busy(&self) -> bool {
        self.task_manager.is_busy()
    }

    /// Route a key to whichever layer currently owns the keyboard
    fn route_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        if self.schedule_dialog.is_open() {
            return self.schedule_dialog.handle_key_events(key);
        }
        if self.dialog.is_visible() {
            return self.dialog.handle_key_events(key);
        }

        let view = self.state.view;
        if self.table(view).is_capturing_input() {
            return self.table_mut(view).handle_key_events(key);
        }

        match self.handle_global_key(key) {
            Action::None => self.table_mut(view).handle_key_events(key),
            action => action,
        }
    }

    /// Process an event through the component hierarchy
    pub fn handle_event(&mut self, event_type: EventType) -> anyhow::Result<()> {
        let action = match event_type {
            EventType::Key(key) => {
                self.state.info_message = None;
                let action = self.route_key(key);
                if let Action::SearchCommitted { .. } = action {
                    // Enter/Esc supersede a pending keystroke update
                    self.search_debouncer.cancel();
                }
                action
            }
            EventType::Resize(_, _) | EventType::Tick | EventType::Other => Action::None,
        };

        let action = self.update(action);
        self.handle_app_action(action);
        Ok(())
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<String> = View::ALL
            .iter()
            .enumerate()
            .map(|(i, view)| {
                match self.item_count(*view) {
                    0 => format!("{} {}", i + 1, view.title()),
                    count => format!("{} {} ({})", i + 1, view.title(), count),
                }
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.state.view.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .divider("│");

        f.render_widget(tabs, area);
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.route_key(key)
    }

    fn update(&mut self, action: Action) -> Action {
        // Process through component hierarchy
        let action = self.dialog.update(action);
        let action = self.accounts.update(action);
        let action = self.clusters.update(action);
        let action = self.instances.update(action);
        let action = self.schedules.update(action);
        self.events.update(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = LayoutManager::main_layout(rect);

        self.render_tabs(f, chunks[0]);

        let view = self.state.view;
        self.table_mut(view).render(f, chunks[1]);

        let status = StatusInfo {
            overview: self.state.overview.as_ref(),
            error: self.state.error_message.as_deref(),
            info: self.state.info_message.as_deref(),
            busy: self.task_manager.is_busy(),
        };
        StatusBar::render(f, chunks[2], &status);

        // Render dialogs on top if visible
        if self.dialog.is_visible() {
            self.dialog.render(f, rect);
        }
        if self.schedule_dialog.is_open() {
            self.schedule_dialog.render(f, rect);
        }
    }
}
