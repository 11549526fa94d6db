//! Element policy predicates.
//!
//! Both predicates only look at an [`ElementProfile`] snapshot plus the
//! platform flags, so the same element on the same platform always gets the
//! same answer.

use crate::device::DeviceCapabilities;

/// Class that opts an element out of synthetic clicks.
pub const NEEDS_CLICK_CLASS: &str = "needsclick";

/// Class that opts an arbitrary element into synthetic focus.
pub const NEEDS_FOCUS_CLASS: &str = "needsfocus";

/// Selector for the labellable elements a `<label>` without `for` wraps.
pub const LABELLABLE_SELECTOR: &str =
    "button, input:not([type=hidden]), keygen, meter, output, progress, select, textarea";

/// Tag names the policies distinguish.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementTag {
    Button,
    Select,
    Textarea,
    Input,
    Label,
    Iframe,
    Video,
    Other(String),
}

impl ElementTag {
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "button" => ElementTag::Button,
            "select" => ElementTag::Select,
            "textarea" => ElementTag::Textarea,
            "input" => ElementTag::Input,
            "label" => ElementTag::Label,
            "iframe" => ElementTag::Iframe,
            "video" => ElementTag::Video,
            _ => ElementTag::Other(lower),
        }
    }
}

/// The attributes of an element the policies read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementProfile {
    pub tag: ElementTag,
    /// Lower-cased `type` property for inputs and buttons, empty otherwise.
    pub input_type: String,
    pub disabled: bool,
    pub read_only: bool,
    pub class_name: String,
}

impl ElementProfile {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag: ElementTag::from_name(tag_name),
            input_type: String::new(),
            disabled: false,
            read_only: false,
            class_name: String::new(),
        }
    }

    /// An `<input>` of the given type.
    pub fn input(input_type: &str) -> Self {
        Self::new("input").with_type(input_type)
    }

    pub fn with_type(mut self, input_type: &str) -> Self {
        self.input_type = input_type.to_ascii_lowercase();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = class_name.to_string();
        self
    }

    pub fn has_class_marker(&self, marker: &str) -> bool {
        has_class_marker(&self.class_name, marker)
    }
}

/// Whether the element must receive the browser's own click untouched.
pub fn needs_click(target: &ElementProfile, caps: &DeviceCapabilities) -> bool {
    match target.tag {
        // Synthetic clicks on disabled controls would still fire handlers.
        ElementTag::Button | ElementTag::Select | ElementTag::Textarea if target.disabled => {
            return true
        }
        // iOS only opens the file picker for trusted clicks.
        ElementTag::Input if (caps.ios && target.input_type == "file") || target.disabled => {
            return true
        }
        // iOS home-screen apps can stop events from reaching frames.
        ElementTag::Label | ElementTag::Iframe | ElementTag::Video => return true,
        _ => {}
    }

    target.has_class_marker(NEEDS_CLICK_CLASS)
}

/// Whether a synthetic tap must focus the element itself, since a
/// synthetic click alone would not.
pub fn needs_focus(target: &ElementProfile, caps: &DeviceCapabilities) -> bool {
    match target.tag {
        ElementTag::Textarea => true,
        ElementTag::Select => !caps.android,
        ElementTag::Input => match target.input_type.as_str() {
            "button" | "checkbox" | "file" | "image" | "radio" | "submit" => false,
            _ => !target.disabled && !target.read_only,
        },
        _ => target.has_class_marker(NEEDS_FOCUS_CLASS),
    }
}

/// Inputs whose caret is placed at the end of the value instead of calling
/// `focus()`. Only these input types expose a selection range.
pub fn places_caret_on_focus(
    target: &ElementProfile,
    caps: &DeviceCapabilities,
    supports_selection_range: bool,
) -> bool {
    if target.tag != ElementTag::Input {
        return false;
    }
    match target.input_type.as_str() {
        "text" => caps.ios && supports_selection_range,
        "search" | "url" | "tel" | "password" => true,
        _ => false,
    }
}

/// Matches `marker` as a whole word inside a class attribute.
pub fn has_class_marker(class_name: &str, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }
    let bytes = class_name.as_bytes();
    class_name.match_indices(marker).any(|(start, _)| {
        let end = start + marker.len();
        let before_ok = start == 0 || !is_word_byte(bytes[start - 1]);
        let after_ok = end == bytes.len() || !is_word_byte(bytes[end]);
        before_ok && after_ok
    })
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

#[cfg(test)]
#[path = "tests/policy_tests.rs"]
mod tests;
