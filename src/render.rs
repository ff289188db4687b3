//! Headless stand-ins for the list view and the map widget.

use crate::session::{ListView, MapService, Marker, ViewOptions};
use crate::types::{Position, WorkoutRecord};
use crate::utils::format_metric;

/// Keeps the most recent list render as text lines, ready to print.
#[derive(Debug, Default)]
pub struct TextList {
    details: bool,
    lines: Vec<String>,
    notices: Vec<String>,
}

impl TextList {
    pub fn new(details: bool) -> Self {
        Self {
            details,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn format_row(&self, index: usize, r: &WorkoutRecord) -> String {
        let kind = r.kind();
        let summary = format!(
            "{}\t{} km\t{} min\t{} {}\t{} {}",
            r.description(),
            r.distance(),
            r.duration(),
            format_metric(kind.metric()),
            kind.metric_unit(),
            kind.extra(),
            kind.extra_unit(),
        );

        if self.details {
            format!(
                "{}\t{}\t{summary}\t{}\tclicks={}",
                index + 1,
                r.id(),
                r.position(),
                r.interaction_count()
            )
        } else {
            summary
        }
    }
}

impl ListView for TextList {
    fn render(&mut self, records: &[WorkoutRecord]) {
        self.lines = records
            .iter()
            .enumerate()
            .map(|(i, r)| self.format_row(i, r))
            .collect();
    }

    fn notify(&mut self, message: &str) {
        tracing::warn!(notice = message, "user notice");
        self.notices.push(message.to_string());
    }
}

/// Map that reports every command to the log.
#[derive(Debug, Default)]
pub struct LogMap {
    markers: usize,
    center: Option<(Position, u8)>,
}

impl LogMap {
    pub const fn marker_count(&self) -> usize {
        self.markers
    }

    pub const fn center(&self) -> Option<(Position, u8)> {
        self.center
    }
}

impl MapService for LogMap {
    fn add_marker(&mut self, marker: &Marker) {
        self.markers += 1;
        tracing::info!(
            id = %marker.id,
            position = %marker.position,
            popup = %marker.popup,
            class = %marker.popup_class(),
            "marker placed"
        );
    }

    fn remove_marker(&mut self, marker: &Marker) {
        self.markers = self.markers.saturating_sub(1);
        tracing::info!(id = %marker.id, position = %marker.position, "marker removed");
    }

    fn set_view(&mut self, center: Position, zoom: u8, options: ViewOptions) {
        self.center = Some((center, zoom));
        tracing::info!(
            %center,
            zoom,
            animate = options.animate,
            pan_secs = options.pan_duration_secs,
            "view centered"
        );
    }
}
