//! Facet control registry.
//!
//! [`FilterState`] mirrors the facet inputs on the page: each control is
//! tagged with the facet it feeds. [`FilterState::read`] produces the current
//! [`FilterParams`] snapshot. No validation happens here.

use coursegrid_sdk::types::{FilterParams, facet};

/// Kind of input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Dropdown; single value.
    Select,
    /// Free text; single value.
    Text,
    /// One checkbox of a group sharing a facet; multi-valued.
    Checkbox,
}

/// One registered control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetControl {
    pub facet: String,
    pub kind: ControlKind,
    /// Current value (selects, text) or the value the checkbox submits.
    pub value: String,
    pub checked: bool,
}

/// A change reported by a facet control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlChange {
    /// A select or text control now holds `value`.
    Value { facet: String, value: String },
    /// The checkbox submitting `value` was toggled.
    Checked {
        facet: String,
        value: String,
        checked: bool,
    },
}

impl ControlChange {
    pub fn value(facet: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Value {
            facet: facet.into(),
            value: value.into(),
        }
    }

    pub fn checked(facet: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self::Checked {
            facet: facet.into(),
            value: value.into(),
            checked,
        }
    }
}

/// Registry of facet controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    controls: Vec<FacetControl>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The grid page's controls: category, tag and price selects.
    pub fn standard() -> Self {
        Self::new()
            .with_select(facet::CATEGORY)
            .with_select(facet::TAG)
            .with_select(facet::PRICE)
    }

    /// Register a select control.
    pub fn with_select(mut self, facet: &str) -> Self {
        self.push(facet, ControlKind::Select, "");
        self
    }

    /// Register a text control.
    pub fn with_text(mut self, facet: &str) -> Self {
        self.push(facet, ControlKind::Text, "");
        self
    }

    /// Register a checkbox submitting `value` for `facet`.
    pub fn with_checkbox(mut self, facet: &str, value: &str) -> Self {
        self.push(facet, ControlKind::Checkbox, value);
        self
    }

    fn push(&mut self, facet: &str, kind: ControlKind, value: &str) {
        self.controls.push(FacetControl {
            facet: facet.to_string(),
            kind,
            value: value.to_string(),
            checked: false,
        });
    }

    /// Registered controls in registration order.
    pub fn controls(&self) -> &[FacetControl] {
        &self.controls
    }

    /// Set the value of the single-valued control(s) for a facet.
    ///
    /// Returns false when no such control is registered.
    pub fn set_value(&mut self, facet: &str, value: &str) -> bool {
        let mut found = false;
        for control in self
            .controls
            .iter_mut()
            .filter(|c| c.facet == facet && c.kind != ControlKind::Checkbox)
        {
            control.value = value.to_string();
            found = true;
        }
        found
    }

    /// Check or uncheck the checkbox submitting `value` for a facet.
    ///
    /// Returns false when no such checkbox is registered.
    pub fn set_checked(&mut self, facet: &str, value: &str, checked: bool) -> bool {
        let mut found = false;
        for control in self
            .controls
            .iter_mut()
            .filter(|c| c.facet == facet && c.kind == ControlKind::Checkbox && c.value == value)
        {
            control.checked = checked;
            found = true;
        }
        found
    }

    /// Apply a reported control change.
    pub fn apply(&mut self, change: &ControlChange) -> bool {
        match change {
            ControlChange::Value { facet, value } => self.set_value(facet, value),
            ControlChange::Checked {
                facet,
                value,
                checked,
            } => self.set_checked(facet, value, *checked),
        }
    }

    /// Clear every control: selects and text to empty, checkboxes unchecked.
    pub fn reset(&mut self) {
        for control in &mut self.controls {
            match control.kind {
                ControlKind::Select | ControlKind::Text => control.value.clear(),
                ControlKind::Checkbox => control.checked = false,
            }
        }
    }

    /// Snapshot of the current selections.
    ///
    /// Single-valued controls contribute their value; checked checkboxes of
    /// one facet are joined with commas in registration order. Empty values
    /// are omitted.
    pub fn read(&self) -> FilterParams {
        let mut params = FilterParams::new();
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();

        for control in &self.controls {
            match control.kind {
                ControlKind::Select | ControlKind::Text => {
                    params.insert(control.facet.as_str(), control.value.trim());
                }
                ControlKind::Checkbox => {
                    let index = match groups.iter().position(|(f, _)| *f == control.facet) {
                        Some(index) => index,
                        None => {
                            groups.push((control.facet.as_str(), Vec::new()));
                            groups.len() - 1
                        }
                    };
                    if control.checked && !control.value.is_empty() {
                        groups[index].1.push(control.value.as_str());
                    }
                }
            }
        }

        for (facet, values) in groups {
            params.insert(facet, values.join(","));
        }
        params
    }
}
