use std::collections::HashSet;

use crate::static_eval::RawListenOptions;

lazy_static::lazy_static! {
    /// Events that are listened to passively unless the author says otherwise.
    pub static ref PASSIVE_DEFAULTS: HashSet<&'static str> = {
        let mut s = HashSet::new();
        // Drag and drop
        s.insert("dragstart");
        s.insert("drag");
        s.insert("dragend");
        s.insert("dragenter");
        s.insert("dragover");
        s.insert("dragleave");
        s.insert("drop");

        // Mouse
        s.insert("mouseenter");
        s.insert("mouseover");
        s.insert("mousemove");
        s.insert("mousedown");
        s.insert("mouseup");
        s.insert("mouseleave");
        s.insert("mouseout");
        s.insert("mousewheel");

        // Pointer
        s.insert("pointerover");
        s.insert("pointerenter");
        s.insert("pointerdown");
        s.insert("pointermove");
        s.insert("pointerup");
        s.insert("pointercancel");
        s.insert("pointerout");
        s.insert("pointerleave");

        s.insert("resize");
        s.insert("scroll");

        // Touch
        s.insert("touchstart");
        s.insert("touchmove");
        s.insert("touchend");
        s.insert("touchenter");
        s.insert("touchleave");
        s.insert("touchcancel");

        s.insert("wheel");
        s
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFlags {
    pub capture: bool,
    pub passive: bool,
    pub disabled: bool,
}

pub fn is_passive_by_default(core_name: &str) -> bool {
    PASSIVE_DEFAULTS.contains(core_name.to_lowercase().as_str())
}

pub fn resolve_flags(core_name: &str, options: &RawListenOptions) -> ResolvedFlags {
    ResolvedFlags {
        capture: options.capture.unwrap_or(false),
        passive: options
            .passive
            .unwrap_or_else(|| is_passive_by_default(core_name)),
        // Only an explicit `enabled: false` disables.
        disabled: options.enabled == Some(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passive_defaults() {
        let none = RawListenOptions::default();
        assert!(resolve_flags("scroll", &none).passive);
        assert!(resolve_flags("touchstart", &none).passive);
        assert!(resolve_flags("Wheel", &none).passive);
        assert!(!resolve_flags("click", &none).passive);
        assert!(!resolve_flags("keydown", &none).passive);
    }

    #[test]
    fn test_explicit_passive_wins() {
        let opts = RawListenOptions {
            passive: Some(false),
            ..Default::default()
        };
        assert!(!resolve_flags("scroll", &opts).passive);

        let opts = RawListenOptions {
            passive: Some(true),
            ..Default::default()
        };
        assert!(resolve_flags("click", &opts).passive);
    }

    #[test]
    fn test_capture_defaults_false() {
        assert!(!resolve_flags("click", &RawListenOptions::default()).capture);
        let opts = RawListenOptions {
            capture: Some(true),
            ..Default::default()
        };
        assert!(resolve_flags("click", &opts).capture);
    }

    #[test]
    fn test_only_explicit_false_disables() {
        let absent = RawListenOptions::default();
        let enabled = RawListenOptions {
            enabled: Some(true),
            ..Default::default()
        };
        let disabled = RawListenOptions {
            enabled: Some(false),
            ..Default::default()
        };
        assert!(!resolve_flags("click", &absent).disabled);
        assert!(!resolve_flags("click", &enabled).disabled);
        assert!(resolve_flags("click", &disabled).disabled);
    }

    #[test]
    fn test_table_contents() {
        let expected = [
            "dragstart", "drag", "dragend", "dragenter", "dragover", "dragleave", "drop",
            "mouseenter", "mouseover", "mousemove", "mousedown", "mouseup", "mouseleave",
            "mouseout", "mousewheel", "pointerover", "pointerenter", "pointerdown",
            "pointermove", "pointerup", "pointercancel", "pointerout", "pointerleave",
            "resize", "scroll", "touchstart", "touchmove", "touchend", "touchenter",
            "touchleave", "touchcancel", "wheel",
        ];
        for event in expected {
            assert!(PASSIVE_DEFAULTS.contains(event), "missing {event}");
        }
        assert_eq!(PASSIVE_DEFAULTS.len(), expected.len());
        assert!(!PASSIVE_DEFAULTS.contains("click"));
        assert!(!PASSIVE_DEFAULTS.contains("keydown"));
    }
}
