//! Application state machine sitting between the map, the input form, the list view
//! and the [`WorkoutStore`].

use crate::database::KvStorage;
use crate::error::{Error, Result};
use crate::store::WorkoutStore;
use crate::types::{Position, WorkoutForm, WorkoutRecord, WorkoutType};
use std::collections::HashMap;

/// What the map needs to draw one workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub position: Position,
    pub popup: String,
    pub workout_type: WorkoutType,
}

impl Marker {
    pub fn for_record(record: &WorkoutRecord) -> Self {
        Self {
            id: record.id().to_string(),
            position: record.position(),
            popup: record.description().to_string(),
            workout_type: record.workout_type(),
        }
    }

    /// CSS class of the popup, e.g. `running-popup`.
    pub fn popup_class(&self) -> String {
        format!("{}-popup", self.workout_type)
    }
}

/// How the view should move when centering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub animate: bool,
    pub pan_duration_secs: f64,
}

impl ViewOptions {
    pub const JUMP: Self = Self {
        animate: false,
        pan_duration_secs: 0.0,
    };
}

/// The interactive map widget.
pub trait MapService {
    fn add_marker(&mut self, marker: &Marker);
    fn remove_marker(&mut self, marker: &Marker);
    fn set_view(&mut self, center: Position, zoom: u8, options: ViewOptions);
}

/// The rendered workout list plus a place for blocking notices.
pub trait ListView {
    fn render(&mut self, records: &[WorkoutRecord]);
    fn notify(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Zoom used when the map first shows up.
    pub initial_zoom: u8,
    /// Zoom used when focusing a single workout.
    pub focus_zoom: u8,
    pub pan_duration_secs: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_zoom: 15,
            focus_zoom: 16,
            pan_duration_secs: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MapState {
    Unavailable,
    Ready,
}

pub struct SessionController<S, M, V> {
    store: WorkoutStore<S>,
    map: M,
    view: V,
    config: SessionConfig,
    map_state: MapState,
    pending: Option<Position>,
    markers: HashMap<String, Marker>,
}

impl<S: KvStorage, M: MapService, V: ListView> SessionController<S, M, V> {
    pub fn new(store: WorkoutStore<S>, map: M, view: V, config: SessionConfig) -> Self {
        Self {
            store,
            map,
            view,
            config,
            map_state: MapState::Unavailable,
            pending: None,
            markers: HashMap::new(),
        }
    }

    /// The map finished loading around `center`. Triggers the first render.
    pub fn on_map_ready(&mut self, center: Position) {
        tracing::info!(%center, zoom = self.config.initial_zoom, "map ready");
        self.map_state = MapState::Ready;
        self.map.set_view(center, self.config.initial_zoom, ViewOptions::JUMP);
        self.redraw();
    }

    /// Location lookup failed; the map never shows up but the store still works.
    pub fn on_map_unavailable(&mut self, reason: &str) {
        tracing::warn!(reason, "map unavailable");
        self.map_state = MapState::Unavailable;
        self.view.notify("Couldn't get the location");
    }

    /// Opens the input form for a workout at `position`.
    pub fn on_map_click(&mut self, position: Position) {
        crate::dlog!("map_click position={position}");
        self.pending = Some(position);
    }

    pub const fn is_form_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate the form, store the workout and focus the map on it.
    ///
    /// Invalid input shows a notice and leaves everything (including the open form)
    /// as it was.
    pub fn submit(&mut self, form: &WorkoutForm) -> Result<String> {
        let position = self.pending.ok_or(Error::NoPositionSelected)?;

        let record = match form.build(position) {
            Ok(r) => r,
            Err(e) => {
                self.view.notify(&e.to_string());
                return Err(e);
            }
        };
        let id = record.id().to_string();

        self.store.add(record)?;
        self.pending = None;

        if self.map_ready() {
            self.map.set_view(position, self.config.focus_zoom, ViewOptions::JUMP);
        }
        self.redraw();
        Ok(id)
    }

    /// Click somewhere on the list entry for `id`.
    pub fn on_list_click(&mut self, id: &str, is_delete_affordance: bool) -> Result<()> {
        if is_delete_affordance {
            self.delete(id)?;
        } else {
            self.select(id);
        }
        Ok(())
    }

    /// Count the interaction and pan the map to the workout. `false` for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.store.increment_interaction(id) {
            return false;
        }
        let Some(position) = self.store.find(id).map(WorkoutRecord::position) else {
            return false;
        };

        if self.map_ready() {
            let options = ViewOptions {
                animate: true,
                pan_duration_secs: self.config.pan_duration_secs,
            };
            self.map.set_view(position, self.config.focus_zoom, options);
        }
        true
    }

    /// Delete the workout and its marker. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Result<Option<WorkoutRecord>> {
        let Some(removed) = self.store.remove(id)? else {
            return Ok(None);
        };

        let marker = self
            .markers
            .remove(removed.id())
            .unwrap_or_else(|| Marker::for_record(&removed));
        if self.map_ready() {
            self.map.remove_marker(&marker);
        }
        self.redraw();
        Ok(Some(removed))
    }

    /// Wipe every workout, the stored copy and all markers.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()?;
        self.pending = None;
        for (_, marker) in self.markers.drain() {
            self.map.remove_marker(&marker);
        }
        self.redraw();
        Ok(())
    }

    pub const fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }

    pub const fn map(&self) -> &M {
        &self.map
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn map_ready(&self) -> bool {
        matches!(self.map_state, MapState::Ready)
    }

    /// Push the list to the view and place markers for workouts that have none yet.
    fn redraw(&mut self) {
        if !self.map_ready() {
            return;
        }

        self.view.render(self.store.all());
        for record in self.store.all() {
            if self.markers.contains_key(record.id()) {
                continue;
            }
            let marker = Marker::for_record(record);
            self.map.add_marker(&marker);
            self.markers.insert(marker.id.clone(), marker);
        }
    }
}
