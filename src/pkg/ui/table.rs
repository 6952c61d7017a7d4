use std::collections::{HashMap, HashSet};

use crate::pkg::internal::adaptors::candidates::spec::StoredCandidate;
use crate::pkg::internal::adaptors::jobs::spec::{Requirement, StoredJob};

pub const PAGE_SIZE: usize = 10;
pub const SUBMITTED_COLUMN_KEY: &str = "submittedAt";

#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub default_width: i32,
    pub min_width: i32,
    pub max_width: i32,
}

impl ColumnSpec {
    pub fn new(key: &str, label: &str) -> Self {
        ColumnSpec {
            key: key.into(),
            label: label.into(),
            default_width: 180,
            min_width: 80,
            max_width: 420,
        }
    }

    pub fn with_widths(mut self, default_width: i32, min_width: i32, max_width: i32) -> Self {
        self.default_width = default_width;
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }
}

/// One column per profile field the posting collects, plus the submission
/// date at the end.
pub fn columns_for_job(job: &StoredJob) -> Vec<ColumnSpec> {
    let mut columns: Vec<ColumnSpec> = job
        .profile_fields
        .iter()
        .filter(|field| field.requirement != Requirement::Off)
        .map(|field| ColumnSpec::new(&field.key, &field.label))
        .collect();
    columns.push(ColumnSpec::new(SUBMITTED_COLUMN_KEY, "Applied").with_widths(140, 100, 240));
    columns
}

#[derive(Debug, Clone)]
struct ResizeCapture {
    key: String,
    start_x: i32,
    start_width: i32,
    min: i32,
    max: i32,
}

#[derive(Debug, Clone)]
struct DragState {
    source: String,
    over: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderCheckbox {
    pub checked: bool,
    pub indeterminate: bool,
}

/// Per-page interaction state for the candidates table. Nothing here is
/// persisted; the whole value is rebuilt when the page mounts another job.
pub struct CandidatesTable {
    job_id: String,
    columns: Vec<ColumnSpec>,
    column_order: Vec<String>,
    column_widths: HashMap<String, i32>,
    selected: HashSet<String>,
    current_page: usize,
    candidates: Vec<StoredCandidate>,
    resize: Option<ResizeCapture>,
    drag: Option<DragState>,
}

impl CandidatesTable {
    pub fn new(job_id: &str, columns: Vec<ColumnSpec>, candidates: Vec<StoredCandidate>) -> Self {
        let column_order = columns.iter().map(|column| column.key.clone()).collect();
        let column_widths = columns
            .iter()
            .map(|column| (column.key.clone(), column.default_width))
            .collect();
        CandidatesTable {
            job_id: job_id.into(),
            columns,
            column_order,
            column_widths,
            selected: HashSet::new(),
            current_page: 1,
            candidates,
            resize: None,
            drag: None,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn set_job(&mut self, job_id: &str, columns: Vec<ColumnSpec>, candidates: Vec<StoredCandidate>) {
        *self = CandidatesTable::new(job_id, columns, candidates);
    }

    pub fn set_candidates(&mut self, candidates: Vec<StoredCandidate>) {
        if candidates.len() != self.candidates.len() {
            self.current_page = 1;
        }
        let ids: HashSet<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        self.selected.retain(|id| ids.contains(id.as_str()));
        self.candidates = candidates;
    }

    // -- pagination ------------------------------------------------------

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.candidates.len().div_ceil(PAGE_SIZE)
    }

    /// Out-of-range requests are no-ops.
    pub fn set_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
        }
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    pub fn visible(&self) -> &[StoredCandidate] {
        let start = (self.current_page - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.candidates.len());
        if start >= end {
            return &[];
        }
        &self.candidates[start..end]
    }

    // -- selection -------------------------------------------------------

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn toggle_selected(&mut self, id: &str) {
        if self.selected.remove(id) {
            return;
        }
        let visible = self.visible().iter().any(|candidate| candidate.id == id);
        if visible {
            self.selected.insert(id.to_string());
        }
    }

    pub fn header_checkbox(&self) -> HeaderCheckbox {
        let visible = self.visible();
        let selected = visible
            .iter()
            .filter(|candidate| self.selected.contains(&candidate.id))
            .count();
        HeaderCheckbox {
            checked: !visible.is_empty() && selected == visible.len(),
            indeterminate: selected > 0 && selected < visible.len(),
        }
    }

    pub fn toggle_select_all(&mut self) {
        if self.header_checkbox().checked {
            self.selected.clear();
            return;
        }
        let ids: Vec<String> = self
            .visible()
            .iter()
            .map(|candidate| candidate.id.clone())
            .collect();
        self.selected.extend(ids);
    }

    // -- resize ----------------------------------------------------------

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    pub fn begin_resize(&mut self, key: &str, pointer_x: i32) -> bool {
        let Some(spec) = self.columns.iter().find(|column| column.key == key) else {
            return false;
        };
        let start_width = self
            .column_widths
            .get(key)
            .copied()
            .unwrap_or(spec.default_width);
        self.resize = Some(ResizeCapture {
            key: key.into(),
            start_x: pointer_x,
            start_width,
            min: spec.min_width,
            max: spec.max_width,
        });
        true
    }

    pub fn update_resize(&mut self, pointer_x: i32) {
        let Some(capture) = &self.resize else {
            return;
        };
        let width =
            (capture.start_width + (pointer_x - capture.start_x)).clamp(capture.min, capture.max);
        self.column_widths.insert(capture.key.clone(), width);
    }

    pub fn end_resize(&mut self) {
        self.resize = None;
    }

    pub fn width_of(&self, key: &str) -> i32 {
        self.column_widths.get(key).copied().unwrap_or_else(|| {
            self.columns
                .iter()
                .find(|column| column.key == key)
                .map(|column| column.default_width)
                .unwrap_or(0)
        })
    }

    // -- reorder ---------------------------------------------------------

    /// Resize wins over reorder while the pointer is down.
    pub fn begin_drag(&mut self, key: &str) -> bool {
        if self.resize.is_some() || !self.column_order.iter().any(|k| k == key) {
            return false;
        }
        self.drag = Some(DragState {
            source: key.into(),
            over: None,
        });
        true
    }

    /// Marks `key` as the drop target; the return value is whether a drop
    /// there would be accepted.
    pub fn drag_over(&mut self, key: &str) -> bool {
        let Some(drag) = &mut self.drag else {
            return false;
        };
        if drag.source == key {
            drag.over = None;
            return false;
        }
        drag.over = Some(key.to_string());
        true
    }

    pub fn drop_target(&self) -> Option<&str> {
        self.drag.as_ref().and_then(|drag| drag.over.as_deref())
    }

    pub fn drop_on(&mut self, key: &str) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if drag.source == key {
            return;
        }
        let from = self.column_order.iter().position(|k| *k == drag.source);
        let to = self.column_order.iter().position(|k| *k == key);
        let (Some(from), Some(to)) = (from, to) else {
            return;
        };
        let moved = self.column_order.remove(from);
        self.column_order.insert(to, moved);
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn column_order(&self) -> &[String] {
        &self.column_order
    }

    pub fn ordered_columns(&self) -> Vec<&ColumnSpec> {
        self.column_order
            .iter()
            .filter_map(|key| self.columns.iter().find(|column| column.key == *key))
            .collect()
    }
}
