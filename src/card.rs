// card.rs - Skill cards and the hover tilt state machine
//
// Cards are plain data; the only behaviour is the tilt that follows the
// pointer while hovered and snaps back to flat on leave. Soft-skill cards
// additionally emit a few floating particles while hovered.

use serde::{Deserialize, Serialize};

use crate::tween::{Repeat, Tween};

const TILT_DIVISOR: f32 = 10.0;
const PERSPECTIVE_PX: u32 = 1000;

const PARTICLE_COUNT: u8 = 3;
const PARTICLE_PERIOD: f32 = 1.5;
const PARTICLE_PEAK: f32 = 0.8;
const PARTICLE_STAGGER: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
    Tools,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SkillCard {
    Technical { name: String, icon: String, category: String },
    Soft { name: String, description: String, accent: String },
    Tool { name: String, icon: String },
}

impl SkillCard {
    pub fn name(&self) -> &str {
        match self {
            SkillCard::Technical { name, .. } | SkillCard::Soft { name, .. } | SkillCard::Tool { name, .. } => name,
        }
    }

    pub fn category(&self) -> SkillCategory {
        match self {
            SkillCard::Technical { .. } => SkillCategory::Technical,
            SkillCard::Soft { .. } => SkillCategory::Soft,
            SkillCard::Tool { .. } => SkillCategory::Tools,
        }
    }

    /// Opaque asset path, if the card shows an icon
    pub fn icon(&self) -> Option<&str> {
        match self {
            SkillCard::Technical { icon, .. } | SkillCard::Tool { icon, .. } => Some(icon),
            SkillCard::Soft { .. } => None,
        }
    }

    pub fn emits_particles(&self) -> bool {
        matches!(self, SkillCard::Soft { .. })
    }
}

/// Card bounds in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CardRect {
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Rotation in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Tilt {
    pub rotate_x: f32,
    pub rotate_y: f32,
}

impl Tilt {
    pub const ZERO: Tilt = Tilt { rotate_x: 0.0, rotate_y: 0.0 };

    pub fn css_transform(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg)",
            PERSPECTIVE_PX, self.rotate_x, self.rotate_y
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
}

#[derive(Debug, Clone, Default)]
pub struct CardTilt {
    state: HoverState,
    tilt: Tilt,
}

impl CardTilt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn tilt(&self) -> Tilt {
        self.tilt
    }

    pub fn pointer_enter(&mut self) {
        self.state = HoverState::Hovered;
    }

    /// Track the pointer; ignored unless hovered
    pub fn pointer_move(&mut self, client_x: f32, client_y: f32, rect: CardRect) -> Tilt {
        if self.state == HoverState::Idle {
            return self.tilt;
        }
        let x = client_x - rect.left;
        let y = client_y - rect.top;
        let (cx, cy) = rect.center();
        let tilt = Tilt { rotate_x: (y - cy) / TILT_DIVISOR, rotate_y: (cx - x) / TILT_DIVISOR };
        if tilt.rotate_x.is_finite() && tilt.rotate_y.is_finite() {
            self.tilt = tilt;
        }
        self.tilt
    }

    pub fn pointer_leave(&mut self) -> Tilt {
        self.state = HoverState::Idle;
        self.tilt = Tilt::ZERO;
        self.tilt
    }
}

/// One floating particle above a hovered soft-skill card
#[derive(Debug, Clone, PartialEq)]
pub struct HoverParticle {
    /// 1-based position, drives spread and stagger
    pub index: u8,
    pub x: Tween,
    pub y: Tween,
    pub opacity: Tween,
    pub scale: Tween,
}

impl HoverParticle {
    fn new(index: u8) -> Self {
        let p = index as f32;
        let anim = |keys: Vec<f32>| {
            Tween::new(keys, PARTICLE_PERIOD).delay(p * PARTICLE_STAGGER).repeat(Repeat::Forever)
        };
        Self {
            index,
            x: anim(vec![0.0, (p - 2.0) * 15.0]),
            y: anim(vec![-5.0, -20.0 - p * 5.0]),
            opacity: anim(vec![0.0, PARTICLE_PEAK, 0.0]),
            scale: anim(vec![0.0, PARTICLE_PEAK, 0.0]),
        }
    }

    /// (x, y, opacity, scale) at `t` seconds since hover began
    pub fn sample(&self, t: f32) -> (f32, f32, f32, f32) {
        (self.x.sample(t), self.y.sample(t), self.opacity.sample(t), self.scale.sample(t))
    }
}

/// Particles for `card` while in `state`; none unless a hovered soft card
pub fn hover_particles(card: &SkillCard, state: HoverState) -> Vec<HoverParticle> {
    if state != HoverState::Hovered || !card.emits_particles() {
        return Vec::new();
    }
    (1..=PARTICLE_COUNT).map(HoverParticle::new).collect()
}

/// The skills section: every card plus the selected category
#[derive(Debug, Clone)]
pub struct SkillDeck {
    cards: Vec<SkillCard>,
    tilts: Vec<CardTilt>,
    active: SkillCategory,
}

impl SkillDeck {
    pub fn new(cards: Vec<SkillCard>) -> Self {
        let tilts = vec![CardTilt::new(); cards.len()];
        Self { cards, tilts, active: SkillCategory::Technical }
    }

    pub fn active(&self) -> SkillCategory {
        self.active
    }

    /// Switch tabs; every card returns to rest
    pub fn select(&mut self, category: SkillCategory) {
        if self.active == category {
            return;
        }
        self.active = category;
        for tilt in &mut self.tilts {
            tilt.pointer_leave();
        }
    }

    pub fn cards(&self) -> &[SkillCard] {
        &self.cards
    }

    /// Cards shown under the selected tab, with their deck index
    pub fn active_cards(&self) -> impl Iterator<Item = (usize, &SkillCard)> + '_ {
        self.cards.iter().enumerate().filter(move |(_, c)| c.category() == self.active)
    }

    pub fn tilt(&self, index: usize) -> Option<&CardTilt> {
        self.tilts.get(index)
    }

    pub fn pointer_enter(&mut self, index: usize) -> Vec<HoverParticle> {
        let Some(tilt) = self.tilts.get_mut(index) else { return Vec::new() };
        tilt.pointer_enter();
        hover_particles(&self.cards[index], tilt.state())
    }

    pub fn pointer_move(&mut self, index: usize, client_x: f32, client_y: f32, rect: CardRect) -> Option<Tilt> {
        self.tilts.get_mut(index).map(|t| t.pointer_move(client_x, client_y, rect))
    }

    pub fn pointer_leave(&mut self, index: usize) -> Option<Tilt> {
        self.tilts.get_mut(index).map(CardTilt::pointer_leave)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const RECT: CardRect = CardRect { left: 100.0, top: 200.0, width: 200.0, height: 120.0 };

    fn deck() -> SkillDeck {
        SkillDeck::new(vec![
            SkillCard::Technical { name: "Rust".into(), icon: "/icons/rust.svg".into(), category: "Languages".into() },
            SkillCard::Soft {
                name: "Mentoring".into(),
                description: "Pairing and reviews".into(),
                accent: "from-purple-500 to-pink-500".into(),
            },
            SkillCard::Tool { name: "Git".into(), icon: "/icons/git.svg".into() },
            SkillCard::Technical { name: "SQL".into(), icon: "/icons/sql.svg".into(), category: "Data".into() },
        ])
    }

    #[test]
    fn test_tilt_follows_pointer() {
        let mut tilt = CardTilt::new();
        tilt.pointer_enter();
        // Right of center: rotates around y, not x
        let t = tilt.pointer_move(100.0 + 150.0, 200.0 + 60.0, RECT);
        assert_eq!(t, Tilt { rotate_x: 0.0, rotate_y: -5.0 });
        let t = tilt.pointer_move(100.0, 200.0, RECT);
        assert_eq!(t, Tilt { rotate_x: -6.0, rotate_y: 10.0 });
    }

    #[test]
    fn test_leave_resets_exactly() {
        let mut tilt = CardTilt::new();
        tilt.pointer_enter();
        tilt.pointer_move(100.0 + 37.3, 200.0 + 91.7, RECT);
        assert_ne!(tilt.tilt(), Tilt::ZERO);
        assert_eq!(tilt.pointer_leave(), Tilt { rotate_x: 0.0, rotate_y: 0.0 });
        assert_eq!(tilt.state(), HoverState::Idle);
    }

    #[test]
    fn test_release_mid_hover_leaves_card_flat() {
        let d = deck();
        let mut tilt = CardTilt::new();
        tilt.pointer_enter();
        assert_eq!(hover_particles(&d.cards()[1], tilt.state()).len(), 3);
        tilt.pointer_move(100.0 + 12.0, 200.0 + 8.0, RECT);

        // releasing the binding goes through the same reset as a pointer leave
        let flat = tilt.pointer_leave();
        assert_eq!(flat.css_transform(), "perspective(1000px) rotateX(0deg) rotateY(0deg)");
        assert!(hover_particles(&d.cards()[1], tilt.state()).is_empty());
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut tilt = CardTilt::new();
        assert_eq!(tilt.pointer_move(0.0, 0.0, RECT), Tilt::ZERO);
    }

    #[test]
    fn test_zero_sized_card_keeps_tilt_finite() {
        let mut tilt = CardTilt::new();
        tilt.pointer_enter();
        let t = tilt.pointer_move(5.0, 5.0, CardRect::default());
        assert!(t.rotate_x.is_finite() && t.rotate_y.is_finite());
    }

    #[test]
    fn test_css_transform() {
        let t = Tilt { rotate_x: -6.0, rotate_y: 2.5 };
        assert_eq!(t.css_transform(), "perspective(1000px) rotateX(-6deg) rotateY(2.5deg)");
        assert_eq!(Tilt::ZERO.css_transform(), "perspective(1000px) rotateX(0deg) rotateY(0deg)");
    }

    #[test]
    fn test_only_soft_cards_emit_particles() {
        let mut d = deck();
        assert!(d.pointer_enter(0).is_empty());
        assert!(d.pointer_enter(2).is_empty());

        let particles = d.pointer_enter(1);
        assert_eq!(particles.len(), 3);
        assert_eq!(particles[0].x.keyframes, vec![0.0, -15.0]);
        assert_eq!(particles[2].y.keyframes, vec![-5.0, -35.0]);
        assert_eq!(particles[1].x.delay, 0.6);
        assert_eq!(particles[0].opacity.keyframes, vec![0.0, 0.8, 0.0]);
        assert_eq!(particles[0].scale.keyframes, vec![0.0, 0.8, 0.0]);
        assert_eq!(particles[0].opacity.duration, 1.5);
        assert_eq!(particles[2].scale.duration, 1.5);

        assert!(hover_particles(&d.cards()[1], HoverState::Idle).is_empty());
    }

    #[test]
    fn test_particle_waits_for_stagger() {
        let p = HoverParticle::new(3);
        assert_eq!(p.sample(0.5), (0.0, -5.0, 0.0, 0.0));
    }

    #[test]
    fn test_particle_peaks_mid_cycle() {
        // first particle starts at 0.3 s; its keyframe peak lands half a period later
        let (_, _, opacity, scale) = HoverParticle::new(1).sample(0.3 + 0.75);
        assert_relative_eq!(opacity, 0.8, epsilon = 1e-5);
        assert_relative_eq!(scale, 0.8, epsilon = 1e-5);
    }

    #[test]
    fn test_deck_filters_by_tab() {
        let mut d = deck();
        let names: Vec<_> = d.active_cards().map(|(_, c)| c.name()).collect();
        assert_eq!(names, vec!["Rust", "SQL"]);

        d.select(SkillCategory::Tools);
        let tools: Vec<_> = d.active_cards().map(|(i, _)| i).collect();
        assert_eq!(tools, vec![2]);
    }

    #[test]
    fn test_switching_tab_flattens_cards() {
        let mut d = deck();
        d.pointer_enter(0);
        d.pointer_move(0, 120.0, 210.0, RECT);
        d.select(SkillCategory::Soft);
        assert_eq!(d.tilt(0).map(CardTilt::tilt), Some(Tilt::ZERO));
    }

    #[test]
    fn test_out_of_range_index() {
        let mut d = deck();
        assert!(d.pointer_enter(99).is_empty());
        assert_eq!(d.pointer_leave(99), None);
    }

    #[test]
    fn test_card_json_shape() {
        let card: SkillCard = serde_json::from_str(r#"{"kind":"tool","name":"Figma","icon":"/f.svg"}"#).unwrap();
        assert_eq!(card.category(), SkillCategory::Tools);
        assert_eq!(card.icon(), Some("/f.svg"));
    }
}
