//! Visual parameters derived from the step snapshot.
//!
//! Everything here is a pure function of `(StepSnapshot, Catalog)`. The
//! browser animates between successive values through CSS transitions, so
//! each visual also carries its transition timing.

use crate::machine::StepSnapshot;

const CARD_EASE: &str = "cubic-bezier(0.43, 0.13, 0.23, 0.96)";
const MUTED_NODE: &str = "rgba(102, 126, 234, 0.3)";
const MUTED_INDICATOR: &str = "#667eea50";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardRole {
    Past,
    Active,
    Future,
}

impl CardRole {
    /// Keyed on the sign of `current - index`.
    pub fn of(current: usize, index: usize) -> Self {
        match current.cmp(&index) {
            std::cmp::Ordering::Greater => CardRole::Past,
            std::cmp::Ordering::Equal => CardRole::Active,
            std::cmp::Ordering::Less => CardRole::Future,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardVisual {
    pub role: CardRole,
    pub opacity: f64,
    pub scale: f64,
    pub offset_y: f64,
    pub blur_px: f64,
    pub z_index: i32,
    pub interactive: bool,
}

impl CardVisual {
    pub fn for_role(role: CardRole) -> Self {
        match role {
            CardRole::Active => Self {
                role,
                opacity: 1.0,
                scale: 1.0,
                offset_y: 0.0,
                blur_px: 0.0,
                z_index: 10,
                interactive: true,
            },
            CardRole::Future => Self {
                role,
                opacity: 0.3,
                scale: 0.8,
                offset_y: 100.0,
                blur_px: 15.0,
                z_index: 5,
                interactive: false,
            },
            CardRole::Past => Self {
                role,
                opacity: 0.0,
                scale: 0.9,
                offset_y: -100.0,
                blur_px: 0.0,
                z_index: 1,
                interactive: false,
            },
        }
    }

    pub fn style(&self) -> String {
        format!(
            "opacity: {}; transform: translateY({}px) scale({}); filter: blur({}px); z-index: {}; \
             pointer-events: {}; transition: all 0.6s {};",
            self.opacity,
            self.offset_y,
            self.scale,
            self.blur_px,
            self.z_index,
            if self.interactive { "auto" } else { "none" },
            CARD_EASE,
        )
    }
}

pub fn card_visuals(snapshot: &StepSnapshot) -> Vec<CardVisual> {
    (0..snapshot.count)
        .map(|index| CardVisual::for_role(CardRole::of(snapshot.current, index)))
        .collect()
}

/// Fraction of the progress line that is filled.
pub fn progress_ratio(snapshot: &StepSnapshot) -> f64 {
    if snapshot.count <= 1 {
        return 0.0;
    }
    snapshot.current as f64 / (snapshot.count - 1) as f64
}

pub fn progress_fill_style(snapshot: &StepSnapshot) -> String {
    format!(
        "height: {}%; transition: height 0.6s ease-in-out;",
        progress_ratio(snapshot) * 100.0
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
    pub position_ratio: f64,
    pub scale: f64,
    pub opacity: f64,
    pub background: String,
    pub glow: Option<String>,
}

impl NodeVisual {
    pub fn new(snapshot: &StepSnapshot, index: usize, accent: &str) -> Self {
        let reached = snapshot.current >= index;
        let position_ratio = if snapshot.count <= 1 {
            0.0
        } else {
            index as f64 / (snapshot.count - 1) as f64
        };
        Self {
            position_ratio,
            scale: if reached { 1.2 } else { 1.0 },
            opacity: if reached { 1.0 } else { 0.4 },
            background: if reached { accent.to_string() } else { MUTED_NODE.to_string() },
            glow: reached.then(|| format!("0 0 20px {accent}80")),
        }
    }

    pub fn style(&self) -> String {
        format!(
            "top: {}%; transform: scale({}); opacity: {}; transition: all 0.4s;",
            self.position_ratio * 100.0,
            self.scale,
            self.opacity,
        )
    }

    pub fn inner_style(&self) -> String {
        format!(
            "background: {}; box-shadow: {};",
            self.background,
            self.glow.as_deref().unwrap_or("none"),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorVisual {
    pub active: bool,
    pub width_px: f64,
    pub opacity: f64,
    pub background: String,
    pub glow: Option<String>,
}

impl IndicatorVisual {
    pub fn new(snapshot: &StepSnapshot, index: usize, accent: &str) -> Self {
        let active = snapshot.current == index;
        let reached = snapshot.current >= index;
        Self {
            active,
            width_px: if active { 40.0 } else { 12.0 },
            opacity: if active { 1.0 } else { 0.4 },
            background: if reached { accent.to_string() } else { MUTED_INDICATOR.to_string() },
            glow: active.then(|| format!("0 0 15px {accent}80")),
        }
    }

    pub fn style(&self) -> String {
        format!(
            "width: {}px; opacity: {}; background-color: {}; box-shadow: {}; cursor: pointer; \
             transition: all 0.3s;",
            self.width_px,
            self.opacity,
            self.background,
            self.glow.as_deref().unwrap_or("none"),
        )
    }
}

pub fn card_gradient(accent: &str) -> String {
    format!("background: linear-gradient(135deg, {accent}20, {accent}05);")
}

pub fn card_border(accent: &str) -> String {
    format!("background: linear-gradient(135deg, {accent}, transparent);")
}

pub fn show_scroll_hint(snapshot: &StepSnapshot) -> bool {
    !snapshot.is_last()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(current: usize) -> StepSnapshot {
        StepSnapshot {
            current,
            count: 4,
            locked: true,
        }
    }

    #[test]
    fn card_roles_follow_current_step() {
        let roles: Vec<_> = card_visuals(&at(1)).into_iter().map(|v| v.role).collect();
        assert_eq!(
            roles,
            vec![CardRole::Past, CardRole::Active, CardRole::Future, CardRole::Future]
        );
    }

    #[test]
    fn only_active_card_is_interactive_and_sharp() {
        let visuals = card_visuals(&at(2));
        assert_eq!(visuals.iter().filter(|v| v.interactive).count(), 1);
        assert_eq!(visuals[2].blur_px, 0.0);
        assert_eq!(visuals[3].blur_px, 15.0);
        assert_eq!(visuals[0].opacity, 0.0);
    }

    #[test]
    fn progress_spans_zero_to_one() {
        assert_eq!(progress_ratio(&at(0)), 0.0);
        assert!((progress_ratio(&at(1)) - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(progress_ratio(&at(3)), 1.0);
        let single = StepSnapshot { current: 0, count: 1, locked: false };
        assert_eq!(progress_ratio(&single), 0.0);
    }

    #[test]
    fn reached_nodes_glow_in_accent() {
        let snapshot = at(1);
        let reached = NodeVisual::new(&snapshot, 1, "#764ba2");
        let pending = NodeVisual::new(&snapshot, 2, "#f093fb");
        assert_eq!(reached.glow.as_deref(), Some("0 0 20px #764ba280"));
        assert_eq!(reached.scale, 1.2);
        assert_eq!(pending.glow, None);
        assert_eq!(pending.background, MUTED_NODE);
        assert!((pending.position_ratio - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn active_indicator_is_wide() {
        let snapshot = at(2);
        let active = IndicatorVisual::new(&snapshot, 2, "#f093fb");
        let past = IndicatorVisual::new(&snapshot, 0, "#667eea");
        let future = IndicatorVisual::new(&snapshot, 3, "#4facfe");
        assert_eq!(active.width_px, 40.0);
        assert_eq!(past.width_px, 12.0);
        assert_eq!(past.background, "#667eea");
        assert_eq!(future.background, MUTED_INDICATOR);
        assert!(active.style().contains("box-shadow: 0 0 15px #f093fb80"));
    }

    #[test]
    fn hint_hidden_on_last_step() {
        assert!(show_scroll_hint(&at(2)));
        assert!(!show_scroll_hint(&at(3)));
    }
}
